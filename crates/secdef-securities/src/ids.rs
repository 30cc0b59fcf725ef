//! External identifiers.
//!
//! Securities, conventions, regions and legal entities are all looked up by
//! scheme-qualified identifiers written `SCHEME~VALUE`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use secdef_core::Currency;

use crate::error::SecurityError;

/// Well-known identifier schemes.
pub mod schemes {
    /// Financial region codes (e.g. `US`, `GB`, `US+GB`).
    pub const FINANCIAL_REGION: &str = "FINANCIAL_REGION";
    /// ISO 4217 currency codes, used for currency-level calendars.
    pub const ISO_CURRENCY_ALPHA3: &str = "ISO_CURRENCY_ALPHA3";
    /// ISDA holiday calendar codes (e.g. `USNY`).
    pub const ISDA_HOLIDAY: &str = "ISDA_HOLIDAY";
    /// Plain names for conventions and bundles.
    pub const SIMPLE_NAME: &str = "Reference";
    /// Market tickers.
    pub const TICKER: &str = "TICKER";
    /// Internal security identifiers.
    pub const SECURITY_ID: &str = "SECDEF";
    /// Legal entity identifiers.
    pub const LEGAL_ENTITY: &str = "LEI";
}

/// An identifier qualified by its scheme.
///
/// # Example
///
/// ```rust
/// use secdef_securities::ids::ExternalId;
///
/// let id: ExternalId = "TICKER~USDLIBOR3M".parse().unwrap();
/// assert_eq!(id.scheme(), "TICKER");
/// assert_eq!(id.value(), "USDLIBOR3M");
/// assert_eq!(id.to_string(), "TICKER~USDLIBOR3M");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId {
    scheme: String,
    value: String,
}

impl ExternalId {
    /// Creates an identifier from a scheme and a value.
    pub fn of(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
        }
    }

    /// Returns the scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the identifier belongs to `scheme`.
    pub fn is_scheme(&self, scheme: &str) -> bool {
        self.scheme == scheme
    }

    /// Wraps the identifier in a single-element bundle.
    pub fn to_bundle(&self) -> ExternalIdBundle {
        ExternalIdBundle::of(self.clone())
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.scheme, self.value)
    }
}

impl FromStr for ExternalId {
    type Err = SecurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('~') {
            Some((scheme, value)) if !scheme.is_empty() && !value.is_empty() => {
                Ok(ExternalId::of(scheme, value))
            }
            _ => Err(SecurityError::invalid_identifier(
                s,
                "expected SCHEME~VALUE",
            )),
        }
    }
}

impl TryFrom<String> for ExternalId {
    type Error = SecurityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExternalId> for String {
    fn from(id: ExternalId) -> Self {
        id.to_string()
    }
}

/// An ordered set of identifiers naming the same object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalIdBundle(BTreeSet<ExternalId>);

impl ExternalIdBundle {
    /// Creates a bundle holding a single identifier.
    pub fn of(id: ExternalId) -> Self {
        Self(std::iter::once(id).collect())
    }

    /// Creates a bundle from several identifiers.
    pub fn of_all(ids: impl IntoIterator<Item = ExternalId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Returns a copy with `id` added.
    pub fn with(mut self, id: ExternalId) -> Self {
        self.0.insert(id);
        self
    }

    /// Returns true if the bundle holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the identifiers in order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalId> {
        self.0.iter()
    }

    /// Returns true if `id` is one of the identifiers.
    pub fn contains(&self, id: &ExternalId) -> bool {
        self.0.contains(id)
    }

    /// Returns true if the two bundles share an identifier.
    pub fn intersects(&self, other: &ExternalIdBundle) -> bool {
        self.0.iter().any(|id| other.0.contains(id))
    }

    /// Returns the value for `scheme`, if present.
    pub fn value(&self, scheme: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|id| id.is_scheme(scheme))
            .map(ExternalId::value)
    }
}

impl fmt::Display for ExternalIdBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "Bundle[{}]", ids.join(", "))
    }
}

impl From<ExternalId> for ExternalIdBundle {
    fn from(id: ExternalId) -> Self {
        ExternalIdBundle::of(id)
    }
}

impl FromIterator<ExternalId> for ExternalIdBundle {
    fn from_iter<T: IntoIterator<Item = ExternalId>>(iter: T) -> Self {
        Self::of_all(iter)
    }
}

/// Identifier of a financial region (e.g. `FINANCIAL_REGION~US`).
pub fn financial_region_id(code: impl Into<String>) -> ExternalId {
    ExternalId::of(schemes::FINANCIAL_REGION, code)
}

/// Identifier of a currency-level region, used for currency calendars.
pub fn currency_region_id(currency: Currency) -> ExternalId {
    ExternalId::of(schemes::ISO_CURRENCY_ALPHA3, currency.code())
}

/// Identifier of a named convention or bundle.
pub fn simple_name_id(name: impl Into<String>) -> ExternalId {
    ExternalId::of(schemes::SIMPLE_NAME, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ExternalId = "FINANCIAL_REGION~US".parse().unwrap();
        assert_eq!(id, financial_region_id("US"));
        assert_eq!(id.to_string(), "FINANCIAL_REGION~US");
    }

    #[test]
    fn test_value_may_contain_separator() {
        let id: ExternalId = "Test~USD Libor ACT/360~X".parse().unwrap();
        assert_eq!(id.scheme(), "Test");
        assert_eq!(id.value(), "USD Libor ACT/360~X");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("NOSEPARATOR".parse::<ExternalId>().is_err());
        assert!("~VALUE".parse::<ExternalId>().is_err());
        assert!("SCHEME~".parse::<ExternalId>().is_err());
    }

    #[test]
    fn test_bundle() {
        let bundle = ExternalIdBundle::of(ExternalId::of("TICKER", "USDLIBOR3M"))
            .with(ExternalId::of("BBG", "US0003M Index"));
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.value("TICKER"), Some("USDLIBOR3M"));
        assert_eq!(bundle.value("ISIN"), None);
        assert!(bundle.intersects(&ExternalId::of("BBG", "US0003M Index").to_bundle()));
    }

    #[test]
    fn test_serde_as_string() {
        let id = currency_region_id(Currency::EUR);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ISO_CURRENCY_ALPHA3~EUR\"");
        let back: ExternalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
