//! Conversion settings.
//!
//! Settings are read from TOML; every field has a default so an empty file
//! (or no file) is a valid configuration:
//!
//! ```toml
//! default_settlement_time = "12:00:00"
//! series_normalisation_threshold = 0.5
//! fra_series_divisor = 100.0
//!
//! [credit]
//! placeholder_protection_buyer = "LEI~BUYER"
//! placeholder_protection_seller = "LEI~SELLER"
//! placeholder_reference_entity = "LEI~OBLIGOR"
//! ```

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use secdef_securities::ExternalId;

use crate::error::{ConversionError, ConversionResult};

/// Settings shared by the converters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Settlement time used when a trade carries a date but no time (UTC).
    #[serde(default = "default_settlement_time")]
    pub default_settlement_time: NaiveTime,

    /// Fixing series whose latest value exceeds this are quoted in percent.
    #[serde(default = "default_normalisation_threshold")]
    pub series_normalisation_threshold: f64,

    /// Divisor applied to FRA index series.
    #[serde(default = "default_fra_divisor")]
    pub fra_series_divisor: f64,

    /// Credit settings.
    #[serde(default)]
    pub credit: CreditConfig,
}

/// Placeholder legal entities for CDS that do not name their parties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditConfig {
    /// Protection buyer used when a CDS names none.
    #[serde(default)]
    pub placeholder_protection_buyer: Option<ExternalId>,
    /// Protection seller used when a CDS names none.
    #[serde(default)]
    pub placeholder_protection_seller: Option<ExternalId>,
    /// Reference obligor used when a CDS names none.
    #[serde(default)]
    pub placeholder_reference_entity: Option<ExternalId>,
}

fn default_settlement_time() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_normalisation_threshold() -> f64 {
    0.5
}

fn default_fra_divisor() -> f64 {
    100.0
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            default_settlement_time: default_settlement_time(),
            series_normalisation_threshold: default_normalisation_threshold(),
            fra_series_divisor: default_fra_divisor(),
            credit: CreditConfig::default(),
        }
    }
}

impl ConversionConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConversionResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConversionError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConversionError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks the numeric settings.
    pub fn validate(&self) -> ConversionResult<()> {
        if self.fra_series_divisor.is_nan() || self.fra_series_divisor <= 0.0 {
            return Err(ConversionError::config(format!(
                "fra_series_divisor must be positive, got {}",
                self.fra_series_divisor
            )));
        }
        if self.series_normalisation_threshold.is_nan() {
            return Err(ConversionError::config(
                "series_normalisation_threshold must be a number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::default();
        assert_eq!(
            config.default_settlement_time,
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert_eq!(config.series_normalisation_threshold, 0.5);
        assert_eq!(config.fra_series_divisor, 100.0);
        assert!(config.credit.placeholder_reference_entity.is_none());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            ConversionConfig::from_toml_str("").unwrap(),
            ConversionConfig::default()
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_settlement_time = "17:30:00"

[credit]
placeholder_reference_entity = "LEI~OBLIGOR"
"#
        )
        .unwrap();
        let config = ConversionConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.default_settlement_time,
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
        assert_eq!(
            config.credit.placeholder_reference_entity,
            Some(ExternalId::of("LEI", "OBLIGOR"))
        );
        assert_eq!(config.fra_series_divisor, 100.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = ConversionConfig::from_toml_str("fra_series_divisor = 0.0").unwrap_err();
        assert!(matches!(err, ConversionError::Config(_)));
        let err = ConversionConfig::from_toml_str("credit = 3").unwrap_err();
        assert!(matches!(err, ConversionError::Config(_)));
    }
}
