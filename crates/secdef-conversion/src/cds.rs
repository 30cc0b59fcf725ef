//! Conversion of standard and legacy credit default swaps.
//!
//! CDS records often leave the parties unnamed. Those roles are filled from
//! the placeholder entities in [`CreditConfig`]; a role that is neither named
//! nor configured is an error.

use tracing::{info, warn};

use secdef_core::types::StubType;
use secdef_instruments::cds::CdsTerms as CdsDefinitionTerms;
use secdef_instruments::{CdsDefinition, LegalEntity};
use secdef_securities::cds::{CdsStubType, CdsTerms, LegacyCdsSecurity, StandardCdsSecurity};
use secdef_securities::ExternalId;
use secdef_traits::ReferenceDataProvider;

use crate::annuity_utils::{joint_calendar, tenor_from_frequency};
use crate::config::CreditConfig;
use crate::error::{ConversionError, ConversionResult};

/// Converts CDS securities into [`CdsDefinition`]s.
#[derive(Debug, Clone)]
pub struct CreditDefaultSwapSecurityConverter {
    provider: ReferenceDataProvider,
    credit: CreditConfig,
}

impl CreditDefaultSwapSecurityConverter {
    /// Creates a converter over `provider` with placeholder parties from `credit`.
    pub fn new(provider: ReferenceDataProvider, credit: CreditConfig) -> Self {
        Self { provider, credit }
    }

    /// Converts a standard CDS.
    pub fn convert_standard(&self, security: &StandardCdsSecurity) -> ConversionResult<CdsDefinition> {
        let upfront = security.upfront_amount.as_ref().map(|u| u.amount);
        self.convert_terms(&security.name, &security.terms, None, upfront)
    }

    /// Converts a legacy CDS.
    pub fn convert_legacy(&self, security: &LegacyCdsSecurity) -> ConversionResult<CdsDefinition> {
        self.convert_terms(&security.name, &security.terms, security.fixed_recovery, None)
    }

    fn convert_terms(
        &self,
        name: &str,
        terms: &CdsTerms,
        recovery_rate: Option<f64>,
        upfront_amount: Option<f64>,
    ) -> ConversionResult<CdsDefinition> {
        let protection_buyer = self.party(
            name,
            "protection_buyer",
            terms.protection_buyer.as_ref(),
            self.credit.placeholder_protection_buyer.as_ref(),
        )?;
        let protection_seller = self.party(
            name,
            "protection_seller",
            terms.protection_seller.as_ref(),
            self.credit.placeholder_protection_seller.as_ref(),
        )?;
        let reference_entity = self.party(
            name,
            "reference_entity",
            terms.reference_entity.as_ref(),
            self.credit.placeholder_reference_entity.as_ref(),
        )?;
        let calendar = joint_calendar(self.provider.holidays.as_ref(), &terms.calendars)?;
        let definition = CdsDefinition::from_terms(
            CdsDefinitionTerms {
                currency: terms.notional.currency,
                buy_protection: terms.buy_protection,
                start_date: terms.start_date,
                maturity_date: terms.maturity_date,
                stub_type: stub_type(terms.stub_type),
                coupon_period: tenor_from_frequency(terms.coupon_frequency)?,
                day_count: terms.day_count,
                business_day_convention: terms.business_day_convention,
                notional: terms.notional.amount,
                coupon: terms.coupon,
                include_accrued_premium: terms.include_accrued_premium,
                protection_start: terms.protection_start,
                protection_buyer,
                protection_seller,
                reference_entity,
                recovery_rate,
                upfront_amount,
            },
            calendar.as_ref(),
        )?;
        info!(cds = name, periods = definition.premium.len(), "converted CDS");
        Ok(definition)
    }

    /// Resolves a CDS party, falling back to the configured placeholder.
    fn party(
        &self,
        cds: &str,
        role: &str,
        named: Option<&ExternalId>,
        placeholder: Option<&ExternalId>,
    ) -> ConversionResult<LegalEntity> {
        let id = match (named, placeholder) {
            (Some(id), _) => id,
            (None, Some(id)) => {
                warn!(cds, role, placeholder = %id, "CDS names no party; using placeholder");
                id
            }
            (None, None) => {
                return Err(ConversionError::config(format!(
                    "CDS {cds} names no {role} and no placeholder is configured"
                )))
            }
        };
        let entity = self
            .provider
            .legal_entities
            .get_single(id)?
            .ok_or_else(|| ConversionError::missing(format!("Legal entity {id} not found")))?;
        Ok(LegalEntity {
            short_name: entity.short_name.unwrap_or(entity.name),
            ratings: entity.ratings,
            sector: entity.sector,
            region: entity.region,
        })
    }
}

/// Schedule stub of a CDS stub placement.
pub fn stub_type(stub: CdsStubType) -> StubType {
    match stub {
        CdsStubType::FrontShort => StubType::ShortStart,
        CdsStubType::FrontLong => StubType::LongStart,
        CdsStubType::BackShort => StubType::ShortEnd,
        CdsStubType::BackLong => StubType::LongEnd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    use secdef_core::calendars::BusinessDayConvention;
    use secdef_core::daycounts::DayCountConvention;
    use secdef_core::{Currency, Date, Frequency};
    use secdef_ext_file::InMemoryReferenceStore;
    use secdef_securities::cds::SeniorityLevel;
    use secdef_securities::notional::InterestRateNotional;
    use secdef_securities::reference::LegalEntity as EntityRecord;
    use secdef_securities::ExternalIdBundle;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn provider() -> ReferenceDataProvider {
        let store = InMemoryReferenceStore::new();
        for (name, lei) in [("Acme Corp", "ACME"), ("Dealer Bank", "DEALER"), ("Fund", "FUND")] {
            store.add_legal_entity(EntityRecord::new(
                name,
                ExternalIdBundle::of(ExternalId::of("LEI", lei)),
            ));
        }
        ReferenceDataProvider::from_single(Arc::new(store))
    }

    fn terms() -> CdsTerms {
        CdsTerms {
            buy_protection: true,
            protection_buyer: Some(ExternalId::of("LEI", "FUND")),
            protection_seller: Some(ExternalId::of("LEI", "DEALER")),
            reference_entity: None,
            start_date: date(2025, 3, 20),
            maturity_date: date(2030, 6, 20),
            stub_type: CdsStubType::FrontShort,
            coupon_frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Act360,
            business_day_convention: BusinessDayConvention::Following,
            calendars: Vec::new(),
            notional: InterestRateNotional::new(Currency::USD, 10_000_000.0),
            coupon: 0.01,
            include_accrued_premium: true,
            protection_start: true,
        }
    }

    fn credit() -> CreditConfig {
        CreditConfig {
            placeholder_reference_entity: Some(ExternalId::of("LEI", "ACME")),
            ..CreditConfig::default()
        }
    }

    #[test]
    fn test_stub_mapping() {
        assert_eq!(stub_type(CdsStubType::FrontShort), StubType::ShortStart);
        assert_eq!(stub_type(CdsStubType::FrontLong), StubType::LongStart);
        assert_eq!(stub_type(CdsStubType::BackShort), StubType::ShortEnd);
        assert_eq!(stub_type(CdsStubType::BackLong), StubType::LongEnd);
    }

    #[test]
    fn test_standard_cds_uses_placeholder_obligor() {
        let converter = CreditDefaultSwapSecurityConverter::new(provider(), credit());
        let security = StandardCdsSecurity {
            name: "ACME 5Y".into(),
            ids: ExternalIdBundle::default(),
            terms: terms(),
            quoted_spread: Some(0.0125),
            upfront_amount: Some(InterestRateNotional::new(Currency::USD, 112_500.0)),
        };
        let definition = converter.convert_standard(&security).unwrap();
        assert_eq!(definition.reference_entity.short_name, "Acme Corp");
        assert_eq!(definition.protection_seller.short_name, "Dealer Bank");
        assert_eq!(definition.premium.len(), 21);
        // Protection runs to the end of the maturity day.
        let last = definition.premium.last().unwrap();
        assert_eq!(last.accrual_end, date(2030, 6, 21));
        assert_relative_eq!(definition.upfront_amount.unwrap(), 112_500.0);
    }

    #[test]
    fn test_legacy_cds_missing_placeholder() {
        let converter =
            CreditDefaultSwapSecurityConverter::new(provider(), CreditConfig::default());
        let security = LegacyCdsSecurity {
            name: "ACME 5Y legacy".into(),
            ids: ExternalIdBundle::default(),
            terms: terms(),
            trade_date: date(2025, 3, 18),
            seniority: SeniorityLevel::SeniorUnsecured,
            fixed_recovery: Some(0.4),
            fee_settlement_date: None,
        };
        let err = converter.convert_legacy(&security).unwrap_err();
        assert!(matches!(err, ConversionError::Config(_)));

        let converter = CreditDefaultSwapSecurityConverter::new(provider(), credit());
        let definition = converter.convert_legacy(&security).unwrap();
        assert_eq!(definition.recovery_rate, Some(0.4));
        assert!(definition.upfront_amount.is_none());
    }

    #[test]
    fn test_unknown_party() {
        let mut terms = terms();
        terms.protection_seller = Some(ExternalId::of("LEI", "GHOST"));
        let security = StandardCdsSecurity {
            name: "ACME 5Y".into(),
            ids: ExternalIdBundle::default(),
            terms,
            quoted_spread: None,
            upfront_amount: None,
        };
        let err = CreditDefaultSwapSecurityConverter::new(provider(), credit())
            .convert_standard(&security)
            .unwrap_err();
        assert_eq!(err.to_string(), "Legal entity LEI~GHOST not found");
    }
}
