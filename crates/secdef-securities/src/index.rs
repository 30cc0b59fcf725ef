//! Index securities: reference rates and price indices.

use serde::{Deserialize, Serialize};

use secdef_core::Tenor;

use crate::ids::{ExternalId, ExternalIdBundle};

/// A term IBOR rate, e.g. 3M USD LIBOR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IborIndexSecurity {
    /// Index name.
    pub name: String,
    /// Identifiers of the index.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Index tenor.
    pub tenor: Tenor,
    /// Identifier of the IBOR index convention.
    pub convention_id: ExternalId,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// An overnight rate, e.g. SOFR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvernightIndexSecurity {
    /// Index name.
    pub name: String,
    /// Identifiers of the index.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Identifier of the overnight index convention.
    pub convention_id: ExternalId,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A consumer price index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceIndexSecurity {
    /// Index name.
    pub name: String,
    /// Identifiers of the index.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Identifier of the price index convention, if any.
    #[serde(default)]
    pub convention_id: Option<ExternalId>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}
