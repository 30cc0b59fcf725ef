//! Conversion of bonds, bills and bond futures, as securities and as trades.
//!
//! Bond conventions come from convention bundles named after the issuer
//! domicile:
//!
//! | Security        | Bundle                               |
//! |-----------------|--------------------------------------|
//! | Government bond | `{domicile}_TREASURY_BOND_CONVENTION`  |
//! | Corporate bond  | `{domicile}_CORPORATE_BOND_CONVENTION` |
//! | Inflation bond  | `{domicile}_INFLATION_BOND_CONVENTION` |
//!
//! Supranational issuers (`SNAT`) use the calendar of the bond currency,
//! everyone else the calendar of their domicile region.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info};

use secdef_core::calendars::{BusinessDayConvention, Calendar};
use secdef_core::Date;
use secdef_instruments::bond::{FixedBondTerms, IndexationMethod, InflationBondTerms};
use secdef_instruments::payment::PaymentFixed;
use secdef_instruments::{
    BillSecurityDefinition, BillTransactionDefinition, BondCapitalIndexedSecurityDefinition,
    BondCapitalIndexedTransactionDefinition, BondFixedSecurityDefinition,
    BondFixedTransactionDefinition, BondFuturesSecurityDefinition,
    BondFuturesTransactionDefinition, InstrumentDefinition, LegalEntity,
};
use secdef_securities::bond::{
    BillSecurity, BondFutureSecurity, BondSecurity, IndexInterpolation,
    InflationBondTerms as InflationAttributes, YieldConvention,
};
use secdef_securities::ids::{financial_region_id, simple_name_id};
use secdef_securities::{ConventionBundle, ExternalId, Security, Trade};
use secdef_traits::{calendar_for_currency, calendar_for_ids, calendar_for_region, ReferenceDataProvider};

use crate::annuity_utils::tenor_from_frequency;
use crate::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::index::price_index;

/// Trade attributes copied into an issuer's ratings.
const RATING_AGENCIES: [&str; 3] = ["Moody's", "S&P", "Fitch"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondKind {
    Government,
    Corporate,
}

/// Converts bond-family securities and trades.
#[derive(Debug, Clone)]
pub struct BondAndBondFutureTradeConverter {
    provider: ReferenceDataProvider,
    config: ConversionConfig,
}

impl BondAndBondFutureTradeConverter {
    /// Creates a converter over `provider`.
    pub fn new(provider: ReferenceDataProvider, config: ConversionConfig) -> Self {
        Self { provider, config }
    }

    /// Converts a bond-family security without position information.
    ///
    /// Zero coupon bonds become a single [`PaymentFixed`] of one at maturity.
    pub fn convert_security(&self, security: &Security) -> ConversionResult<InstrumentDefinition> {
        let empty = BTreeMap::new();
        match security {
            Security::GovernmentBond(bond) => {
                self.fixed_coupon_bond(bond, BondKind::Government, bond_issuer(bond, &empty))
            }
            Security::CorporateBond(bond) => {
                self.fixed_coupon_bond(bond, BondKind::Corporate, bond_issuer(bond, &empty))
            }
            Security::InflationBond(bond) => {
                self.inflation_bond(bond, bond_issuer(bond, &empty))
            }
            Security::Bill(bill) => {
                let issuer = self.legal_entity(&bill.legal_entity_id)?;
                Ok(InstrumentDefinition::BillSecurity(self.bill(bill, issuer)?))
            }
            Security::BondFuture(future) => Ok(InstrumentDefinition::BondFuturesSecurity(
                self.bond_future(future)?,
            )),
            Security::MunicipalBond(_) => Err(ConversionError::unsupported(
                "Municipal bonds are not converted",
            )),
            Security::FloatingRateNote(frn) => Err(ConversionError::unsupported(format!(
                "Floating rate note {} has no bond definition",
                frn.name
            ))),
            other => Err(ConversionError::unsupported(format!(
                "Cannot convert {other} with the bond converter"
            ))),
        }
    }

    /// Converts a bond, bond future, bill or FRN trade into a transaction.
    pub fn convert(&self, trade: &Trade) -> ConversionResult<InstrumentDefinition> {
        let security = &trade.security;
        if !security.is_bond_family() {
            return Err(ConversionError::unsupported(format!(
                "Can only handle trades with bond, bond future, bill or floating rate note securities; have {security}"
            )));
        }
        let trade_date = trade
            .trade_date
            .ok_or_else(|| ConversionError::invalid_field("trade_date", "Trade date should not be null"))?;
        let quantity = trade.quantity.to_f64().ok_or_else(|| {
            ConversionError::invalid_field("quantity", format!("{} is not representable", trade.quantity))
        })?;
        let price = trade
            .premium
            .ok_or_else(|| ConversionError::invalid_field("premium", "Trade premium should not be null"))?;

        match security {
            Security::BondFuture(future) => {
                let trade_time = trade_time(trade)?;
                let contracts = trade.quantity.trunc().to_i64().ok_or_else(|| {
                    ConversionError::invalid_field(
                        "quantity",
                        format!("{} contracts overflow", trade.quantity),
                    )
                })?;
                let definition = BondFuturesTransactionDefinition {
                    underlying: self.bond_future(future)?,
                    quantity: contracts,
                    trade_date: utc(trade_date, trade_time),
                    trade_price: price,
                };
                info!(trade = %trade.id, future = %future.name, "converted bond future trade");
                return Ok(InstrumentDefinition::BondFuturesTransaction(definition));
            }
            Security::InflationBond(bond) => {
                let trade_time = trade_time(trade)?;
                let terms = InflationAttributes::from_bond(bond)?;
                let calendar = self.bond_calendar(bond)?;
                let settlement = calendar.add_business_days(trade_date, terms.days_to_settle);
                let InstrumentDefinition::BondCapitalIndexedSecurity(underlying) =
                    self.inflation_bond(bond, bond_issuer(bond, &trade.attributes))?
                else {
                    return Err(ConversionError::unsupported(format!(
                        "Zero coupon inflation bond {} has no transaction definition",
                        bond.name
                    )));
                };
                info!(trade = %trade.id, bond = %bond.name, "converted inflation bond trade");
                return Ok(InstrumentDefinition::BondCapitalIndexedTransaction(
                    BondCapitalIndexedTransactionDefinition {
                        underlying,
                        quantity,
                        settlement: utc(settlement, trade_time),
                        price,
                    },
                ));
            }
            _ => {}
        }

        let settle_time = trade.premium_time.unwrap_or(self.config.default_settlement_time);
        let premium_date = trade.premium_date.ok_or_else(|| {
            ConversionError::invalid_field("premium_date", "Trade premium date should not be null")
        })?;
        let settlement = utc(premium_date, settle_time);

        let definition = match security {
            Security::Bill(bill) => {
                let issuer = self.legal_entity(&bill.legal_entity_id)?;
                InstrumentDefinition::BillTransaction(BillTransactionDefinition {
                    underlying: self.bill(bill, issuer)?,
                    quantity,
                    settlement,
                    settlement_amount: price,
                })
            }
            Security::FloatingRateNote(frn) => {
                return Err(ConversionError::unsupported(format!(
                    "Floating rate note {} has no bond definition",
                    frn.name
                )))
            }
            Security::GovernmentBond(bond) | Security::CorporateBond(bond) => {
                let kind = if matches!(security, Security::GovernmentBond(_)) {
                    BondKind::Government
                } else {
                    BondKind::Corporate
                };
                match self.fixed_coupon_bond(bond, kind, bond_issuer(bond, &trade.attributes))? {
                    InstrumentDefinition::BondFixedSecurity(underlying) => {
                        InstrumentDefinition::BondFixedTransaction(BondFixedTransactionDefinition {
                            underlying,
                            quantity,
                            settlement,
                            price,
                        })
                    }
                    zero_coupon => zero_coupon,
                }
            }
            other => {
                return Err(ConversionError::unsupported(format!(
                    "Cannot convert trades of {other}"
                )))
            }
        };
        info!(trade = %trade.id, kind = definition.kind(), "converted bond trade");
        Ok(definition)
    }

    /// Builds the definition of a bond future and its deliverable basket.
    pub fn bond_future(&self, future: &BondFutureSecurity) -> ConversionResult<BondFuturesSecurityDefinition> {
        let mut basket = Vec::with_capacity(future.basket.len());
        let mut conversion_factors = Vec::with_capacity(future.basket.len());
        for deliverable in &future.basket {
            let security = self
                .provider
                .securities
                .get_single(&deliverable.identifiers)?
                .ok_or_else(|| {
                    ConversionError::missing(format!(
                        "Security with identifier bundle {} not in security source",
                        deliverable.identifiers
                    ))
                })?;
            let definition = match &security {
                Security::GovernmentBond(bond) => {
                    self.fixed_coupon_bond(bond, BondKind::Government, bond_issuer(bond, &BTreeMap::new()))?
                }
                Security::CorporateBond(bond) => {
                    self.fixed_coupon_bond(bond, BondKind::Corporate, bond_issuer(bond, &BTreeMap::new()))?
                }
                other => {
                    return Err(ConversionError::invalid_field(
                        "basket",
                        format!("Could not construct fixed coupon bond from {other}"),
                    ))
                }
            };
            let InstrumentDefinition::BondFixedSecurity(bond) = definition else {
                return Err(ConversionError::invalid_field(
                    "basket",
                    format!("Could not construct fixed coupon bond from {security}"),
                ));
            };
            basket.push(bond);
            conversion_factors.push(deliverable.conversion_factor);
        }
        debug!(future = %future.name, deliverables = basket.len(), "resolved bond future basket");
        Ok(BondFuturesSecurityDefinition::new(
            future.name.clone(),
            future.currency,
            future.expiry,
            future.first_delivery_date,
            future.last_delivery_date,
            future.unit_amount,
            basket,
            conversion_factors,
        )?)
    }

    fn fixed_coupon_bond(
        &self,
        bond: &BondSecurity,
        kind: BondKind,
        issuer: LegalEntity,
    ) -> ConversionResult<InstrumentDefinition> {
        let (name, convention) = match kind {
            BondKind::Government => {
                let name = format!("{}_TREASURY_BOND_CONVENTION", bond.issuer_domicile);
                let convention = self
                    .convention_bundle(&name)?
                    .ok_or_else(|| ConversionError::missing(format!("Convention called {name} was null")))?;
                (name, convention)
            }
            BondKind::Corporate => {
                let name = format!("{}_CORPORATE_BOND_CONVENTION", bond.issuer_domicile);
                let convention = self.convention_bundle(&name)?.ok_or_else(|| {
                    ConversionError::missing(format!(
                        "No corporate bond convention found for domicile {}",
                        bond.issuer_domicile
                    ))
                })?;
                (name, convention)
            }
        };
        check_coupon_type(bond)?;
        let calendar = self.bond_calendar(bond)?;
        let first_accrual_date = accrual_date(bond)?;
        let end_of_month = convention_eom(&convention, &name)?;
        if bond.is_zero_coupon() {
            return Ok(InstrumentDefinition::PaymentFixed(PaymentFixed::new(
                bond.currency,
                bond.maturity_date,
                1.0,
            )));
        }
        let settlement_days = convention
            .settlement_days_for(first_accrual_date, bond.maturity_date)
            .ok_or_else(|| {
                ConversionError::invalid_field(
                    "bond_settlement_days",
                    format!("Could not get bond settlement days from {name}"),
                )
            })?;
        let terms = FixedBondTerms {
            name: bond.name.clone(),
            currency: bond.currency,
            first_accrual_date,
            first_coupon_date: bond.first_coupon_date,
            maturity_date: bond.maturity_date,
            payment_period: tenor_from_frequency(bond.coupon_frequency)?,
            rate: bond.coupon_rate / 100.0,
            settlement_days,
            day_count: bond.day_count,
            business_day_convention: BusinessDayConvention::Following,
            yield_convention: bond.yield_convention,
            end_of_month,
            issuer,
        };
        let definition = BondFixedSecurityDefinition::from_terms(terms, calendar.as_ref())?;
        debug!(bond = %bond.name, coupons = definition.coupons.len(), "built fixed coupon bond");
        Ok(InstrumentDefinition::BondFixedSecurity(definition))
    }

    fn inflation_bond(&self, bond: &BondSecurity, issuer: LegalEntity) -> ConversionResult<InstrumentDefinition> {
        let name = format!("{}_INFLATION_BOND_CONVENTION", bond.issuer_domicile);
        let convention = self
            .convention_bundle(&name)?
            .ok_or_else(|| ConversionError::missing(format!("Convention called {name} was null")))?;
        check_coupon_type(bond)?;
        let inflation = InflationAttributes::from_bond(bond)?;
        let index = price_index(&self.provider, &inflation.reference_index_id, bond.currency)?;
        let calendar = self.bond_calendar(bond)?;
        let first_accrual_date = accrual_date(bond)?;
        let end_of_month = convention_eom(&convention, &name)?;
        if bond.is_zero_coupon() {
            return Ok(InstrumentDefinition::PaymentFixed(PaymentFixed::new(
                bond.currency,
                bond.maturity_date,
                1.0,
            )));
        }
        if convention
            .settlement_days_for(first_accrual_date, bond.maturity_date)
            .is_none()
        {
            return Err(ConversionError::invalid_field(
                "bond_settlement_days",
                format!("Could not get bond settlement days from {name}"),
            ));
        }
        let method = match (inflation.interpolation, bond.yield_convention) {
            (IndexInterpolation::Monthly, _) | (IndexInterpolation::Daily, YieldConvention::BrazilIlBond) => {
                IndexationMethod::Monthly
            }
            (IndexInterpolation::Daily, _) => IndexationMethod::Interpolated,
        };
        let terms = InflationBondTerms {
            name: bond.name.clone(),
            currency: bond.currency,
            price_index: index,
            method,
            monthly_lag: inflation.inflation_lag,
            index_start_value: inflation.base_cpi,
            first_accrual_date,
            first_coupon_date: bond.first_coupon_date,
            maturity_date: bond.maturity_date,
            payment_period: tenor_from_frequency(bond.coupon_frequency)?,
            real_rate: bond.coupon_rate / 100.0,
            settlement_days: inflation.days_to_settle,
            day_count: bond.day_count,
            business_day_convention: BusinessDayConvention::Following,
            yield_convention: bond.yield_convention,
            end_of_month,
            issuer,
        };
        let definition = BondCapitalIndexedSecurityDefinition::from_terms(terms, calendar.as_ref())?;
        debug!(bond = %bond.name, method = ?method, "built capital-indexed bond");
        Ok(InstrumentDefinition::BondCapitalIndexedSecurity(definition))
    }

    fn bill(&self, bill: &BillSecurity, issuer: LegalEntity) -> ConversionResult<BillSecurityDefinition> {
        let calendar = calendar_for_ids(self.provider.holidays.as_ref(), &[bill.region_id.clone()])?;
        Ok(BillSecurityDefinition {
            name: bill.name.clone(),
            currency: bill.currency,
            end_date: bill.maturity_date,
            notional: 1.0,
            settlement_days: bill.days_to_settle,
            calendar_name: calendar.name().to_string(),
            yield_convention: bill.yield_convention,
            day_count: bill.day_count,
            issuer,
        })
    }

    fn bond_calendar(&self, bond: &BondSecurity) -> ConversionResult<Arc<dyn Calendar>> {
        let calendar = if bond.is_supranational() {
            calendar_for_currency(self.provider.holidays.as_ref(), bond.currency)?
        } else {
            calendar_for_region(
                self.provider.regions.as_ref(),
                self.provider.holidays.as_ref(),
                &financial_region_id(bond.issuer_domicile.as_str()),
            )?
        };
        Ok(calendar)
    }

    fn convention_bundle(&self, name: &str) -> ConversionResult<Option<ConventionBundle>> {
        Ok(self
            .provider
            .convention_bundles
            .get_convention_bundle(&simple_name_id(name))?)
    }

    fn legal_entity(&self, id: &ExternalId) -> ConversionResult<LegalEntity> {
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

fn check_coupon_type(bond: &BondSecurity) -> ConversionResult<()> {
    if bond.has_excluded_coupon_type() {
        return Err(ConversionError::unsupported(format!(
            "Cannot support fixed coupon bonds with coupon of type {}",
            bond.coupon_type
        )));
    }
    Ok(())
}

fn accrual_date(bond: &BondSecurity) -> ConversionResult<Date> {
    bond.interest_accrual_date.ok_or_else(|| {
        ConversionError::invalid_field(
            "interest_accrual_date",
            "Bond first interest accrual date was null",
        )
    })
}

fn convention_eom(convention: &ConventionBundle, name: &str) -> ConversionResult<bool> {
    convention.eom.ok_or_else(|| {
        ConversionError::invalid_field(
            "eom",
            format!("Could not get EOM convention information from {name}"),
        )
    })
}

fn trade_time(trade: &Trade) -> ConversionResult<NaiveTime> {
    trade
        .trade_time
        .ok_or_else(|| ConversionError::invalid_field("trade_time", "Trade time should not be null"))
}

fn utc(date: Date, time: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.as_naive_date().and_time(time))
}

/// Issuer of a bond, with ratings taken from the trade attributes.
fn bond_issuer(
    bond: &BondSecurity,
    attributes: &BTreeMap<String, String>,
) -> LegalEntity {
    let ratings = RATING_AGENCIES
        .iter()
        .filter_map(|agency| {
            attributes
                .get(*agency)
                .map(|rating| ((*agency).to_string(), rating.clone()))
        })
        .collect();
    LegalEntity {
        short_name: bond.issuer_name.clone(),
        ratings,
        sector: (!bond.issuer_type.is_empty()).then(|| bond.issuer_type.clone()),
        region: Some(bond.issuer_domicile.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    use secdef_core::daycounts::DayCountConvention;
    use secdef_core::{Currency, Frequency};
    use secdef_ext_file::InMemoryReferenceStore;
    use secdef_securities::bond::{attributes, BondFutureDeliverable};
    use secdef_securities::index::PriceIndexSecurity;
    use secdef_securities::reference::{Holiday, LegalEntity as EntityRecord, Region};
    use secdef_securities::ExternalIdBundle;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn bundle(name: &str, eom: Option<bool>, settlement: Option<i32>) -> ConventionBundle {
        ConventionBundle {
            name: name.into(),
            ids: ExternalIdBundle::of(simple_name_id(name)),
            eom,
            bond_settlement_days: settlement,
            day_count: None,
            business_day_convention: None,
            swap_floating_leg_initial_rate: None,
        }
    }

    fn store() -> InMemoryReferenceStore {
        let store = InMemoryReferenceStore::new();
        store.add_region(Region {
            name: "United States".into(),
            ids: ExternalIdBundle::of(financial_region_id("US")),
            country: Some("US".into()),
            currency: Some(Currency::USD),
        });
        store.add_holiday(Holiday {
            id: financial_region_id("US"),
            dates: vec![date(2025, 8, 15)],
        });
        store.add_convention_bundle(bundle("US_TREASURY_BOND_CONVENTION", Some(false), Some(1)));
        store.add_convention_bundle(bundle("US_INFLATION_BOND_CONVENTION", Some(false), Some(1)));
        store.add_convention_bundle(bundle("GB_CORPORATE_BOND_CONVENTION", None, Some(1)));
        store.add_security(Security::PriceIndex(PriceIndexSecurity {
            name: "US CPI-U NSA".into(),
            ids: ExternalIdBundle::of(ExternalId::of("TICKER", "CPURNSA")),
            convention_id: None,
            description: None,
        }));
        store.add_legal_entity(EntityRecord::new(
            "United States Treasury",
            ExternalIdBundle::of(ExternalId::of("LEI", "UST")),
        ));
        store
    }

    fn converter(store: InMemoryReferenceStore) -> BondAndBondFutureTradeConverter {
        BondAndBondFutureTradeConverter::new(
            ReferenceDataProvider::from_single(Arc::new(store)),
            ConversionConfig::default(),
        )
    }

    fn treasury() -> BondSecurity {
        BondSecurity {
            name: "T 4 02/15/30".into(),
            ids: ExternalIdBundle::of(ExternalId::of("ISIN", "US91282CMM00")),
            issuer_name: "US TREASURY N/B".into(),
            issuer_type: "SOVEREIGN".into(),
            issuer_domicile: "US".into(),
            currency: Currency::USD,
            coupon_type: "FIXED".into(),
            coupon_rate: 4.0,
            coupon_frequency: Frequency::SemiAnnual,
            day_count: DayCountConvention::ActActIsda,
            yield_convention: YieldConvention::StreetConvention,
            interest_accrual_date: Some(date(2025, 2, 15)),
            first_coupon_date: date(2025, 8, 15),
            maturity_date: date(2030, 2, 15),
            settlement_date: None,
            attributes: BTreeMap::new(),
        }
    }

    fn tips(interpolation: &str, yield_convention: YieldConvention) -> BondSecurity {
        let mut bond = treasury();
        bond.name = "TII 1 7/8 07/15/34".into();
        bond.coupon_rate = 1.875;
        bond.yield_convention = yield_convention;
        bond.interest_accrual_date = Some(date(2024, 7, 15));
        bond.first_coupon_date = date(2025, 1, 15);
        bond.maturity_date = date(2034, 7, 15);
        for (key, value) in [
            (attributes::REFERENCE_INDEX_ID, "TICKER~CPURNSA"),
            (attributes::INFLATION_LAG, "3"),
            (attributes::BASE_CPI, "310.1"),
            (attributes::DAYS_TO_SETTLE, "1"),
            (attributes::INTERPOLATION_METHOD, interpolation),
        ] {
            bond.attributes.insert(key.into(), value.into());
        }
        bond
    }

    #[test]
    fn test_government_bond() {
        let definition = converter(store())
            .convert_security(&Security::GovernmentBond(treasury()))
            .unwrap();
        let InstrumentDefinition::BondFixedSecurity(bond) = definition else {
            panic!("expected a fixed coupon bond");
        };
        assert_eq!(bond.coupons.len(), 10);
        assert_relative_eq!(bond.coupons[0].rate, 0.04);
        // 2025-08-15 is a holiday in the US calendar.
        assert_eq!(bond.coupons[0].period.payment_date, date(2025, 8, 18));
        assert_eq!(bond.settlement_days, 1);
        assert_eq!(bond.issuer.short_name, "US TREASURY N/B");
        assert_eq!(bond.issuer.region.as_deref(), Some("US"));
    }

    #[test]
    fn test_missing_and_incomplete_conventions() {
        let us = converter(store());
        let mut bond = treasury();
        bond.issuer_domicile = "DE".into();
        let err = us
            .convert_security(&Security::GovernmentBond(bond.clone()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Convention called DE_TREASURY_BOND_CONVENTION was null");

        let err = us
            .convert_security(&Security::CorporateBond(bond))
            .unwrap_err();
        assert_eq!(err.to_string(), "No corporate bond convention found for domicile DE");

        let mut bond = treasury();
        bond.issuer_domicile = "GB".into();
        let with_region = store();
        with_region.add_region(Region {
            name: "United Kingdom".into(),
            ids: ExternalIdBundle::of(financial_region_id("GB")),
            country: Some("GB".into()),
            currency: Some(Currency::GBP),
        });
        let err = converter(with_region)
            .convert_security(&Security::CorporateBond(bond))
            .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidField { ref field, .. } if field == "eom"));
    }

    #[test]
    fn test_zero_coupon_and_excluded_types() {
        let converter = converter(store());
        let mut zero = treasury();
        zero.coupon_type = "ZERO COUPON".into();
        let definition = converter
            .convert_security(&Security::GovernmentBond(zero))
            .unwrap();
        assert_eq!(
            definition,
            InstrumentDefinition::PaymentFixed(PaymentFixed::new(Currency::USD, date(2030, 2, 15), 1.0))
        );

        let mut pik = treasury();
        pik.coupon_type = "TOGGLE PIK NOTES".into();
        assert!(matches!(
            converter.convert_security(&Security::GovernmentBond(pik)),
            Err(ConversionError::Unsupported(_))
        ));
        assert!(matches!(
            converter.convert_security(&Security::MunicipalBond(treasury())),
            Err(ConversionError::Unsupported(_))
        ));

        let mut no_accrual = treasury();
        no_accrual.interest_accrual_date = None;
        assert!(converter
            .convert_security(&Security::GovernmentBond(no_accrual))
            .unwrap_err()
            .to_string()
            .ends_with("Bond first interest accrual date was null"));
    }

    #[test]
    fn test_inflation_interpolation() {
        let converter = converter(store());
        let monthly = converter
            .convert_security(&Security::InflationBond(tips("Monthly", YieldConvention::StreetConvention)))
            .unwrap();
        let InstrumentDefinition::BondCapitalIndexedSecurity(monthly) = monthly else {
            panic!("expected an inflation bond");
        };
        assert_eq!(monthly.method, IndexationMethod::Monthly);
        assert_eq!(monthly.price_index.name, "US CPI-U NSA");
        assert_relative_eq!(monthly.index_start_value, 310.1);

        let brazil = converter
            .convert_security(&Security::InflationBond(tips("Daily", YieldConvention::BrazilIlBond)))
            .unwrap();
        assert!(matches!(
            brazil,
            InstrumentDefinition::BondCapitalIndexedSecurity(ref b) if b.method == IndexationMethod::Monthly
        ));

        let daily = converter
            .convert_security(&Security::InflationBond(tips("Daily", YieldConvention::StreetConvention)))
            .unwrap();
        assert!(matches!(
            daily,
            InstrumentDefinition::BondCapitalIndexedSecurity(ref b) if b.method == IndexationMethod::Interpolated
        ));

        assert!(converter
            .convert_security(&Security::InflationBond(tips("Weekly", YieldConvention::StreetConvention)))
            .is_err());
    }

    #[test]
    fn test_bond_future_basket() {
        let store = store();
        store.add_security(Security::GovernmentBond(treasury()));
        let converter = converter(store);
        let mut future = BondFutureSecurity {
            name: "TYH5".into(),
            ids: ExternalIdBundle::default(),
            currency: Currency::USD,
            expiry: date(2025, 3, 20),
            first_delivery_date: date(2025, 3, 3),
            last_delivery_date: date(2025, 3, 31),
            unit_amount: 100_000.0,
            basket: vec![BondFutureDeliverable {
                identifiers: ExternalIdBundle::of(ExternalId::of("ISIN", "US91282CMM00")),
                conversion_factor: 0.8512,
            }],
        };
        let definition = converter.bond_future(&future).unwrap();
        assert_eq!(definition.basket.len(), 1);
        assert_eq!(definition.conversion_factors, vec![0.8512]);

        future.basket.push(BondFutureDeliverable {
            identifiers: ExternalIdBundle::of(ExternalId::of("ISIN", "MISSING")),
            conversion_factor: 0.9,
        });
        let err = converter.bond_future(&future).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Security with identifier bundle Bundle[ISIN~MISSING] not in security source"
        );
    }

    #[test]
    fn test_bond_trade_settlement() {
        let converter = converter(store());
        let trade = Trade::new("T1", Security::GovernmentBond(treasury()), dec!(1_000_000))
            .with_trade_date(date(2025, 3, 3), None)
            .with_premium(99.5, Some(date(2025, 3, 4)), None);
        let InstrumentDefinition::BondFixedTransaction(transaction) = converter.convert(&trade).unwrap()
        else {
            panic!("expected a bond transaction");
        };
        assert_relative_eq!(transaction.quantity, 1_000_000.0);
        assert_relative_eq!(transaction.price, 99.5);
        assert_eq!(
            transaction.settlement,
            utc(date(2025, 3, 4), NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        );

        let no_premium_date = Trade::new("T2", Security::GovernmentBond(treasury()), dec!(1))
            .with_trade_date(date(2025, 3, 3), None)
            .with_premium(99.5, None, None);
        assert!(matches!(
            converter.convert(&no_premium_date),
            Err(ConversionError::InvalidField { ref field, .. }) if field == "premium_date"
        ));
    }

    #[test]
    fn test_inflation_trade_needs_time() {
        let converter = converter(store());
        let bond = Security::InflationBond(tips("Monthly", YieldConvention::StreetConvention));
        let without_time = Trade::new("T3", bond.clone(), dec!(10))
            .with_trade_date(date(2025, 3, 7), None)
            .with_premium(101.0, None, None);
        assert!(matches!(
            converter.convert(&without_time),
            Err(ConversionError::InvalidField { ref field, .. }) if field == "trade_time"
        ));

        let time = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        let with_time = Trade::new("T4", bond, dec!(10))
            .with_trade_date(date(2025, 3, 7), Some(time))
            .with_premium(101.0, None, None);
        let InstrumentDefinition::BondCapitalIndexedTransaction(transaction) =
            converter.convert(&with_time).unwrap()
        else {
            panic!("expected an inflation bond transaction");
        };
        // One business day after a Friday.
        assert_eq!(transaction.settlement, utc(date(2025, 3, 10), time));
    }

    #[test]
    fn test_bill_and_rejected_trades() {
        let converter = converter(store());
        let bill = BillSecurity {
            name: "B 0 06/26/25".into(),
            ids: ExternalIdBundle::default(),
            currency: Currency::USD,
            maturity_date: date(2025, 6, 26),
            issue_date: date(2024, 12, 26),
            minimum_increment: 100.0,
            days_to_settle: 1,
            region_id: financial_region_id("US"),
            yield_convention: YieldConvention::Discount,
            day_count: DayCountConvention::Act360,
            legal_entity_id: ExternalId::of("LEI", "UST"),
        };
        let definition = converter
            .convert_security(&Security::Bill(bill.clone()))
            .unwrap();
        let InstrumentDefinition::BillSecurity(definition) = definition else {
            panic!("expected a bill");
        };
        assert_relative_eq!(definition.notional, 1.0);
        assert_eq!(definition.issuer.short_name, "United States Treasury");

        let mut orphan = bill;
        orphan.legal_entity_id = ExternalId::of("LEI", "NOBODY");
        assert!(matches!(
            converter.convert_security(&Security::Bill(orphan)),
            Err(ConversionError::MissingReferenceData(_))
        ));

        let no_date = Trade::new("T5", Security::GovernmentBond(treasury()), dec!(1));
        assert!(matches!(
            converter.convert(&no_date),
            Err(ConversionError::InvalidField { ref field, .. }) if field == "trade_date"
        ));
    }
}
