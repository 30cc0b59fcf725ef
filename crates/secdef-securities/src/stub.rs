//! Stub period descriptors for swap legs.

use serde::{Deserialize, Serialize};

use secdef_core::Date;

use crate::error::{SecurityError, SecurityResult};
use crate::ids::ExternalId;

pub use secdef_core::types::StubType;

/// How the stub period(s) of a leg are calculated.
///
/// Rates and reference-rate identifiers are optional overrides; a stub
/// rate takes precedence over interpolation between two index rates.
/// A rate is only considered set when it is present and not NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StubCalculationMethod {
    #[serde(rename = "type")]
    stub_type: StubType,
    #[serde(default)]
    first_stub_rate: Option<f64>,
    #[serde(default)]
    last_stub_rate: Option<f64>,
    #[serde(default)]
    first_stub_end_date: Option<Date>,
    #[serde(default)]
    last_stub_end_date: Option<Date>,
    #[serde(default)]
    first_stub_start_reference_rate_id: Option<ExternalId>,
    #[serde(default)]
    first_stub_end_reference_rate_id: Option<ExternalId>,
    #[serde(default)]
    last_stub_start_reference_rate_id: Option<ExternalId>,
    #[serde(default)]
    last_stub_end_reference_rate_id: Option<ExternalId>,
}

impl StubCalculationMethod {
    /// Creates a method of the given type with no overrides.
    #[must_use]
    pub fn new(stub_type: StubType) -> Self {
        Self {
            stub_type,
            ..Self::default()
        }
    }

    /// Sets the first stub rate.
    #[must_use]
    pub fn with_first_stub_rate(mut self, rate: f64) -> Self {
        self.first_stub_rate = Some(rate);
        self
    }

    /// Sets the last stub rate.
    #[must_use]
    pub fn with_last_stub_rate(mut self, rate: f64) -> Self {
        self.last_stub_rate = Some(rate);
        self
    }

    /// Sets the date on which the first stub ends.
    #[must_use]
    pub fn with_first_stub_end_date(mut self, date: Date) -> Self {
        self.first_stub_end_date = Some(date);
        self
    }

    /// Sets the date on which the last stub ends.
    #[must_use]
    pub fn with_last_stub_end_date(mut self, date: Date) -> Self {
        self.last_stub_end_date = Some(date);
        self
    }

    /// Sets the index at the start of the first stub.
    #[must_use]
    pub fn with_first_stub_start_reference_rate_id(mut self, id: ExternalId) -> Self {
        self.first_stub_start_reference_rate_id = Some(id);
        self
    }

    /// Sets the index at the end of the first stub.
    #[must_use]
    pub fn with_first_stub_end_reference_rate_id(mut self, id: ExternalId) -> Self {
        self.first_stub_end_reference_rate_id = Some(id);
        self
    }

    /// Sets the index at the start of the last stub.
    #[must_use]
    pub fn with_last_stub_start_reference_rate_id(mut self, id: ExternalId) -> Self {
        self.last_stub_start_reference_rate_id = Some(id);
        self
    }

    /// Sets the index at the end of the last stub.
    #[must_use]
    pub fn with_last_stub_end_reference_rate_id(mut self, id: ExternalId) -> Self {
        self.last_stub_end_reference_rate_id = Some(id);
        self
    }

    /// Returns the stub type.
    pub fn stub_type(&self) -> StubType {
        self.stub_type
    }

    /// Returns the first stub rate if set and not NaN.
    pub fn first_stub_rate(&self) -> Option<f64> {
        self.first_stub_rate.filter(|r| !r.is_nan())
    }

    /// Returns the last stub rate if set and not NaN.
    pub fn last_stub_rate(&self) -> Option<f64> {
        self.last_stub_rate.filter(|r| !r.is_nan())
    }

    /// Returns true if a usable first stub rate is set.
    pub fn has_first_stub_rate(&self) -> bool {
        self.first_stub_rate().is_some()
    }

    /// Returns true if a usable last stub rate is set.
    pub fn has_last_stub_rate(&self) -> bool {
        self.last_stub_rate().is_some()
    }

    /// Returns the first stub end date.
    pub fn first_stub_end_date(&self) -> Option<Date> {
        self.first_stub_end_date
    }

    /// Returns the last stub end date.
    pub fn last_stub_end_date(&self) -> Option<Date> {
        self.last_stub_end_date
    }

    /// Returns the first stub start reference rate id.
    pub fn first_stub_start_reference_rate_id(&self) -> Option<&ExternalId> {
        self.first_stub_start_reference_rate_id.as_ref()
    }

    /// Returns the first stub end reference rate id.
    pub fn first_stub_end_reference_rate_id(&self) -> Option<&ExternalId> {
        self.first_stub_end_reference_rate_id.as_ref()
    }

    /// Returns the last stub start reference rate id.
    pub fn last_stub_start_reference_rate_id(&self) -> Option<&ExternalId> {
        self.last_stub_start_reference_rate_id.as_ref()
    }

    /// Returns the last stub end reference rate id.
    pub fn last_stub_end_reference_rate_id(&self) -> Option<&ExternalId> {
        self.last_stub_end_reference_rate_id.as_ref()
    }

    /// Both first-stub reference ids, when both are set.
    pub fn first_stub_reference_rate_ids(&self) -> Option<(&ExternalId, &ExternalId)> {
        self.first_stub_start_reference_rate_id
            .as_ref()
            .zip(self.first_stub_end_reference_rate_id.as_ref())
    }

    /// Both last-stub reference ids, when both are set.
    pub fn last_stub_reference_rate_ids(&self) -> Option<(&ExternalId, &ExternalId)> {
        self.last_stub_start_reference_rate_id
            .as_ref()
            .zip(self.last_stub_end_reference_rate_id.as_ref())
    }

    /// Checks the method is internally consistent.
    ///
    /// A dual stub needs both stub end dates. On each side that applies to
    /// the stub type, reference rate ids must come as a start/end pair.
    pub fn validate(&self) -> SecurityResult<&Self> {
        match self.stub_type {
            StubType::Both => {
                if self.first_stub_end_date.is_none() {
                    return Err(SecurityError::invalid_stub(
                        "Dual stub must have a first stub period end date",
                    ));
                }
                if self.last_stub_end_date.is_none() {
                    return Err(SecurityError::invalid_stub(
                        "Dual stub must have a last stub period end date",
                    ));
                }
                check_pair(
                    "Dual stub",
                    "first",
                    self.first_stub_start_reference_rate_id.is_some(),
                    self.first_stub_end_reference_rate_id.is_some(),
                )?;
                check_pair(
                    "Dual stub",
                    "last",
                    self.last_stub_start_reference_rate_id.is_some(),
                    self.last_stub_end_reference_rate_id.is_some(),
                )?;
            }
            StubType::ShortStart | StubType::LongStart => check_pair(
                "Stub",
                "first",
                self.first_stub_start_reference_rate_id.is_some(),
                self.first_stub_end_reference_rate_id.is_some(),
            )?,
            StubType::ShortEnd | StubType::LongEnd => check_pair(
                "Stub",
                "last",
                self.last_stub_start_reference_rate_id.is_some(),
                self.last_stub_end_reference_rate_id.is_some(),
            )?,
            StubType::None => {}
        }
        Ok(self)
    }
}

fn check_pair(label: &str, side: &str, has_start: bool, has_end: bool) -> SecurityResult<()> {
    match (has_start, has_end) {
        (true, false) => Err(SecurityError::invalid_stub(format!(
            "{label} has a {side} stub start reference rate identifier without a stub end reference rate"
        ))),
        (false, true) => Err(SecurityError::invalid_stub(format!(
            "{label} has a {side} stub end reference rate identifier without a stub start reference rate"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn libor(tenor: &str) -> ExternalId {
        ExternalId::of("TICKER", format!("USDLIBOR{tenor}"))
    }

    #[test]
    fn test_nan_rate_is_unset() {
        let m = StubCalculationMethod::new(StubType::ShortStart).with_first_stub_rate(f64::NAN);
        assert!(!m.has_first_stub_rate());
        assert_eq!(m.first_stub_rate(), None);

        let m = StubCalculationMethod::new(StubType::ShortStart).with_first_stub_rate(0.01);
        assert_eq!(m.first_stub_rate(), Some(0.01));
    }

    #[test]
    fn test_dual_stub_needs_both_end_dates() {
        let m = StubCalculationMethod::new(StubType::Both).with_first_stub_end_date(date(2014, 9, 12));
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("last stub period end date"));

        let m = StubCalculationMethod::new(StubType::Both).with_last_stub_end_date(date(2014, 9, 12));
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("first stub period end date"));

        let m = StubCalculationMethod::new(StubType::Both)
            .with_first_stub_end_date(date(2014, 9, 12))
            .with_last_stub_end_date(date(2016, 6, 12));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_dual_stub_reference_ids_must_pair() {
        let base = StubCalculationMethod::new(StubType::Both)
            .with_first_stub_end_date(date(2014, 9, 12))
            .with_last_stub_end_date(date(2016, 6, 12));

        let m = base.clone().with_first_stub_start_reference_rate_id(libor("1M"));
        assert!(m.validate().is_err());
        let m = base.clone().with_last_stub_end_reference_rate_id(libor("6M"));
        assert!(m.validate().is_err());
        let m = base
            .with_first_stub_start_reference_rate_id(libor("1M"))
            .with_first_stub_end_reference_rate_id(libor("3M"));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_start_stub_checks_first_side_only() {
        let m = StubCalculationMethod::new(StubType::ShortStart)
            .with_first_stub_start_reference_rate_id(libor("1M"));
        let err = m.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid stub: Stub has a first stub start reference rate identifier without a stub end reference rate"
        );

        // last side is ignored for start stubs
        let m = StubCalculationMethod::new(StubType::LongStart)
            .with_last_stub_start_reference_rate_id(libor("1M"));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_end_stub_checks_last_side_only() {
        let m = StubCalculationMethod::new(StubType::ShortEnd)
            .with_last_stub_end_reference_rate_id(libor("6M"));
        assert!(m.validate().is_err());

        let m = StubCalculationMethod::new(StubType::LongEnd)
            .with_first_stub_start_reference_rate_id(libor("1M"));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_none_always_valid() {
        let m = StubCalculationMethod::new(StubType::None)
            .with_first_stub_start_reference_rate_id(libor("1M"))
            .with_last_stub_end_reference_rate_id(libor("6M"));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "type": "SHORT_START",
            "first_stub_rate": 0.012,
            "first_stub_start_reference_rate_id": "TICKER~USDLIBOR1M",
            "first_stub_end_reference_rate_id": "TICKER~USDLIBOR3M"
        }"#;
        let m: StubCalculationMethod = serde_json::from_str(json).unwrap();
        assert_eq!(m.stub_type(), StubType::ShortStart);
        assert_eq!(m.first_stub_rate(), Some(0.012));
        assert!(m.first_stub_reference_rate_ids().is_some());
    }
}
