//! CLI command implementations.

pub mod convert;
pub mod stubs;
pub mod validate;

pub use convert::ConvertArgs;
pub use stubs::StubsArgs;
pub use validate::ValidateArgs;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use secdef_conversion::ConversionConfig;
use secdef_core::Date;
use secdef_ext_file::InMemoryReferenceStore;
use secdef_securities::{ExternalId, ExternalIdBundle, Security};
use secdef_traits::ReferenceDataProvider;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Conversion settings.
    pub config: ConversionConfig,
}

impl Context {
    /// Reads the conversion settings from `config`, or uses the defaults.
    pub fn load(format: OutputFormat, config: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config {
            Some(path) => ConversionConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => ConversionConfig::default(),
        };
        Ok(Self { format, config })
    }
}

/// Reference data loaded from a JSON file.
pub struct Reference {
    /// The store, for trade and security listings.
    pub store: Arc<InMemoryReferenceStore>,
    /// The same store behind the provider interface.
    pub provider: ReferenceDataProvider,
}

impl Reference {
    /// Loads `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let store = Arc::new(
            InMemoryReferenceStore::from_json_file(path)
                .with_context(|| format!("loading reference data from {}", path.display()))?,
        );
        let provider = ReferenceDataProvider::from_single(store.clone());
        Ok(Self { store, provider })
    }

    /// The security identified by `id`.
    pub fn security(&self, id: &str) -> anyhow::Result<Security> {
        let ids = ExternalIdBundle::of(parse_id(id)?);
        self.provider
            .securities
            .get_single(&ids)?
            .ok_or_else(|| CliError::SecurityNotFound(id.to_string()).into())
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a `SCHEME~VALUE` identifier.
pub fn parse_id(s: &str) -> CliResult<ExternalId> {
    s.parse().map_err(|_| CliError::InvalidIdentifier(s.to_string()))
}
