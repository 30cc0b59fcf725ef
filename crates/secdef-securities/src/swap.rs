//! Swap securities: the leg-based interest-rate swap and the legacy swap.
//!
//! [`InterestRateSwapSecurity`] carries fully specified legs with per-leg
//! calendars, conventions, stubs and notional schedules. [`SwapSecurity`]
//! is the older two-leg form that relies on per-currency conventions.

use serde::{Deserialize, Serialize};

use secdef_core::calendars::{BusinessDayConvention, RollConvention};
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Currency, Date, Frequency};

use crate::ids::{ExternalId, ExternalIdBundle};
use crate::notional::InterestRateSwapNotional;
use crate::stub::StubCalculationMethod;

// ===== SHARED LEG VOCABULARY =====

/// Direction of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayReceiveType {
    /// The holder pays this leg.
    Pay,
    /// The holder receives this leg.
    Receive,
}

/// Kind of floating rate a leg references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloatingRateType {
    /// Term interbank offered rate.
    Ibor,
    /// Overnight index, compounded.
    Ois,
    /// Overnight index, arithmetic average.
    OvernightArithmeticAverage,
    /// Constant maturity swap rate.
    Cms,
    /// Overnight index with a term fixing.
    OvernightIndexed,
}

impl FloatingRateType {
    /// Returns true for term IBOR rates.
    pub fn is_ibor(&self) -> bool {
        matches!(self, FloatingRateType::Ibor)
    }

    /// Returns true for overnight-indexed rates.
    pub fn is_overnight(&self) -> bool {
        matches!(
            self,
            FloatingRateType::Ois
                | FloatingRateType::OvernightArithmeticAverage
                | FloatingRateType::OvernightIndexed
        )
    }
}

impl std::fmt::Display for FloatingRateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FloatingRateType::Ibor => "IBOR",
            FloatingRateType::Ois => "OIS",
            FloatingRateType::OvernightArithmeticAverage => "OVERNIGHT_ARITHMETIC_AVERAGE",
            FloatingRateType::Cms => "CMS",
            FloatingRateType::OvernightIndexed => "OVERNIGHT_INDEXED",
        };
        write!(f, "{name}")
    }
}

/// How sub-period coupons compound into a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompoundingMethod {
    /// No compounding.
    #[default]
    None,
    /// Flat compounding: spread is not compounded.
    Flat,
    /// Straight compounding: rate plus spread compounded.
    Straight,
    /// Compounding of the rate only, spread added simply.
    SpreadExclusive,
}

/// Which end of a period a derived date is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRelativeTo {
    /// Period start.
    Start,
    /// Period end.
    #[default]
    End,
}

/// Unit of a date offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffsetType {
    /// Business days on the associated calendar.
    #[default]
    Business,
    /// Calendar days.
    Calendar,
}

/// Calendars plus a business day convention for adjusting a family of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAdjustment {
    /// Holiday calendar identifiers; the joint calendar applies.
    pub calendars: Vec<ExternalId>,
    /// Business day convention.
    pub convention: BusinessDayConvention,
}

impl DateAdjustment {
    /// Creates an adjustment over the given calendars.
    pub fn new(calendars: Vec<ExternalId>, convention: BusinessDayConvention) -> Self {
        Self {
            calendars,
            convention,
        }
    }
}

/// A rate that may step through time; only the initial rate drives coupons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Rate in effect from the start of the leg.
    pub initial_rate: f64,
    /// Later steps, as `(effective date, rate)`.
    #[serde(default)]
    pub steps: Vec<(Date, f64)>,
}

impl RateSchedule {
    /// A constant rate.
    pub fn constant(rate: f64) -> Self {
        Self {
            initial_rate: rate,
            steps: Vec::new(),
        }
    }
}

/// Which notionals are exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotionalExchange {
    /// Exchange notional on the effective date.
    #[serde(default)]
    pub exchange_initial_notional: bool,
    /// Exchange notional at maturity.
    #[serde(default)]
    pub exchange_final_notional: bool,
    /// Exchange notional on interim amortisation dates.
    #[serde(default)]
    pub exchange_interim_notional: bool,
}

impl NotionalExchange {
    /// No notional exchange.
    pub const NO_EXCHANGE: NotionalExchange = NotionalExchange {
        exchange_initial_notional: false,
        exchange_final_notional: false,
        exchange_interim_notional: false,
    };
}

// ===== INTEREST RATE SWAP =====

/// Fields shared by fixed and floating legs of an [`InterestRateSwapSecurity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegCommon {
    /// Notional schedule.
    pub notional: InterestRateSwapNotional,
    /// Pay or receive.
    pub pay_receive_type: PayReceiveType,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Frequency of payments (and accrual periods).
    pub payment_frequency: Frequency,
    /// Payment date adjustment.
    #[serde(default)]
    pub payment_adjustment: Option<DateAdjustment>,
    /// Whether payments are measured from the period start or end.
    #[serde(default)]
    pub payment_relative_to: DateRelativeTo,
    /// Payment lag in business days.
    #[serde(default)]
    pub payment_offset: i32,
    /// Accrual period adjustment.
    #[serde(default)]
    pub accrual_adjustment: Option<DateAdjustment>,
    /// Maturity date adjustment.
    #[serde(default)]
    pub maturity_adjustment: Option<DateAdjustment>,
    /// Roll convention for regular periods.
    #[serde(default)]
    pub roll_convention: RollConvention,
    /// Stub handling.
    #[serde(default)]
    pub stub_calculation_method: Option<StubCalculationMethod>,
    /// Compounding of sub-periods.
    #[serde(default)]
    pub compounding_method: CompoundingMethod,
}

impl LegCommon {
    /// Creates the common part of a leg with no adjustments, stubs or roll.
    pub fn new(
        notional: InterestRateSwapNotional,
        pay_receive_type: PayReceiveType,
        day_count: DayCountConvention,
        payment_frequency: Frequency,
    ) -> Self {
        Self {
            notional,
            pay_receive_type,
            day_count,
            payment_frequency,
            payment_adjustment: None,
            payment_relative_to: DateRelativeTo::End,
            payment_offset: 0,
            accrual_adjustment: None,
            maturity_adjustment: None,
            roll_convention: RollConvention::None,
            stub_calculation_method: None,
            compounding_method: CompoundingMethod::None,
        }
    }

    /// Sets payment, accrual and maturity adjustment to the same calendars and convention.
    #[must_use]
    pub fn with_adjustment(mut self, adjustment: DateAdjustment) -> Self {
        self.payment_adjustment = Some(adjustment.clone());
        self.accrual_adjustment = Some(adjustment.clone());
        self.maturity_adjustment = Some(adjustment);
        self
    }

    /// Sets the stub calculation method.
    #[must_use]
    pub fn with_stub(mut self, stub: StubCalculationMethod) -> Self {
        self.stub_calculation_method = Some(stub);
        self
    }

    /// Sets the roll convention.
    #[must_use]
    pub fn with_roll_convention(mut self, roll: RollConvention) -> Self {
        self.roll_convention = roll;
        self
    }

    /// Sets the payment lag.
    #[must_use]
    pub fn with_payment_offset(mut self, offset: i32) -> Self {
        self.payment_offset = offset;
        self
    }
}

/// Fixed-rate leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedInterestRateSwapLeg {
    /// Common leg fields.
    #[serde(flatten)]
    pub common: LegCommon,
    /// Fixed rate.
    pub rate: RateSchedule,
}

/// Floating-rate leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingInterestRateSwapLeg {
    /// Common leg fields.
    #[serde(flatten)]
    pub common: LegCommon,
    /// Kind of floating rate.
    pub floating_rate_type: FloatingRateType,
    /// Index identifier (security or convention).
    pub floating_reference_rate_id: ExternalId,
    /// Spread over the index.
    #[serde(default)]
    pub spread_schedule: Option<RateSchedule>,
    /// Known rate for the first period.
    #[serde(default)]
    pub custom_rates: Option<RateSchedule>,
    /// Gearing applied to the index rate.
    #[serde(default)]
    pub gearing: Option<f64>,
    /// Frequency of resets within a payment period.
    pub reset_frequency: Frequency,
    /// Reset date adjustment.
    #[serde(default)]
    pub reset_adjustment: Option<DateAdjustment>,
    /// Whether resets are measured from the period start or end.
    #[serde(default = "default_reset_relative_to")]
    pub reset_relative_to: DateRelativeTo,
    /// Fixing date adjustment.
    #[serde(default)]
    pub fixing_adjustment: Option<DateAdjustment>,
    /// Fixing lag (usually negative).
    #[serde(default)]
    pub fixing_offset: i32,
    /// Fixing lag unit.
    #[serde(default)]
    pub fixing_offset_type: OffsetType,
}

fn default_reset_relative_to() -> DateRelativeTo {
    DateRelativeTo::Start
}

impl FloatingInterestRateSwapLeg {
    /// Creates a floating leg with no spread, custom rate or fixing adjustment.
    pub fn new(
        common: LegCommon,
        floating_rate_type: FloatingRateType,
        floating_reference_rate_id: ExternalId,
        reset_frequency: Frequency,
    ) -> Self {
        Self {
            common,
            floating_rate_type,
            floating_reference_rate_id,
            spread_schedule: None,
            custom_rates: None,
            gearing: None,
            reset_frequency,
            reset_adjustment: None,
            reset_relative_to: DateRelativeTo::Start,
            fixing_adjustment: None,
            fixing_offset: 0,
            fixing_offset_type: OffsetType::Business,
        }
    }

    /// Sets a constant spread.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread_schedule = Some(RateSchedule::constant(spread));
        self
    }

    /// Sets reset and fixing adjustment with a fixing lag.
    #[must_use]
    pub fn with_fixing(mut self, adjustment: DateAdjustment, fixing_offset: i32) -> Self {
        self.reset_adjustment = Some(adjustment.clone());
        self.fixing_adjustment = Some(adjustment);
        self.fixing_offset = fixing_offset;
        self
    }
}

/// A leg of an [`InterestRateSwapSecurity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterestRateSwapLeg {
    /// Fixed-rate leg.
    Fixed(FixedInterestRateSwapLeg),
    /// Floating-rate leg.
    Floating(FloatingInterestRateSwapLeg),
}

impl InterestRateSwapLeg {
    /// Returns the fields shared by every leg.
    pub fn common(&self) -> &LegCommon {
        match self {
            InterestRateSwapLeg::Fixed(leg) => &leg.common,
            InterestRateSwapLeg::Floating(leg) => &leg.common,
        }
    }

    /// Returns true if the holder pays this leg.
    pub fn is_payer(&self) -> bool {
        self.common().pay_receive_type == PayReceiveType::Pay
    }

    /// Returns true for fixed legs.
    pub fn is_fixed(&self) -> bool {
        matches!(self, InterestRateSwapLeg::Fixed(_))
    }

    /// Returns the leg currency.
    pub fn currency(&self) -> Currency {
        self.common().notional.currency()
    }

    /// Returns the floating leg, if this is one.
    pub fn as_floating(&self) -> Option<&FloatingInterestRateSwapLeg> {
        match self {
            InterestRateSwapLeg::Floating(leg) => Some(leg),
            InterestRateSwapLeg::Fixed(_) => None,
        }
    }
}

/// A leg-based interest-rate swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateSwapSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the security.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Effective (start) date.
    pub effective_date: Date,
    /// Maturity before adjustment.
    pub unadjusted_maturity: Date,
    /// Notional exchange flags.
    #[serde(default)]
    pub notional_exchange: NotionalExchange,
    /// The legs; conversion needs exactly one pay and one receive leg.
    pub legs: Vec<InterestRateSwapLeg>,
}

impl InterestRateSwapSecurity {
    /// Returns the first paying leg.
    pub fn pay_leg(&self) -> Option<&InterestRateSwapLeg> {
        self.legs.iter().find(|leg| leg.is_payer())
    }

    /// Returns the first receiving leg.
    pub fn receive_leg(&self) -> Option<&InterestRateSwapLeg> {
        self.legs.iter().find(|leg| !leg.is_payer())
    }
}

// ===== LEGACY SWAP =====

/// Fields shared by the legs of a [`SwapSecurity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapLegCommon {
    /// Day count of the leg.
    pub day_count: DayCountConvention,
    /// Payment frequency.
    pub frequency: Frequency,
    /// Region whose calendar adjusts dates.
    pub region_id: ExternalId,
    /// Business day convention.
    pub business_day_convention: BusinessDayConvention,
    /// Notional currency.
    pub currency: Currency,
    /// Notional amount.
    pub notional: f64,
    /// End-of-month rolling.
    #[serde(default)]
    pub eom: bool,
}

/// Floating-rate details of a legacy swap leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingLegTerms {
    /// Index identifier.
    pub floating_reference_rate_id: ExternalId,
    /// Kind of floating rate.
    pub floating_rate_type: FloatingRateType,
    /// Known first fixing.
    #[serde(default)]
    pub initial_floating_rate: Option<f64>,
    /// Settlement lag of the index.
    #[serde(default)]
    pub settlement_days: i32,
}

/// A leg of a legacy [`SwapSecurity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwapLeg {
    /// Fixed rate.
    Fixed {
        /// Common fields.
        #[serde(flatten)]
        common: SwapLegCommon,
        /// Fixed rate.
        rate: f64,
    },
    /// Plain floating rate.
    Floating {
        /// Common fields.
        #[serde(flatten)]
        common: SwapLegCommon,
        /// Floating terms.
        #[serde(flatten)]
        terms: FloatingLegTerms,
    },
    /// Floating rate plus a spread.
    FloatingSpread {
        /// Common fields.
        #[serde(flatten)]
        common: SwapLegCommon,
        /// Floating terms.
        #[serde(flatten)]
        terms: FloatingLegTerms,
        /// Spread over the index.
        spread: f64,
    },
    /// Floating rate times a gearing.
    FloatingGearing {
        /// Common fields.
        #[serde(flatten)]
        common: SwapLegCommon,
        /// Floating terms.
        #[serde(flatten)]
        terms: FloatingLegTerms,
        /// Gearing factor.
        gearing: f64,
    },
    /// Fixed leg of an inflation swap.
    FixedInflation {
        /// Common fields.
        #[serde(flatten)]
        common: SwapLegCommon,
        /// Fixed rate.
        rate: f64,
    },
    /// Index leg of an inflation swap.
    InflationIndex {
        /// Common fields.
        #[serde(flatten)]
        common: SwapLegCommon,
        /// Price index identifier.
        index_id: ExternalId,
    },
}

impl SwapLeg {
    /// Returns the fields shared by every leg.
    pub fn common(&self) -> &SwapLegCommon {
        match self {
            SwapLeg::Fixed { common, .. }
            | SwapLeg::Floating { common, .. }
            | SwapLeg::FloatingSpread { common, .. }
            | SwapLeg::FloatingGearing { common, .. }
            | SwapLeg::FixedInflation { common, .. }
            | SwapLeg::InflationIndex { common, .. } => common,
        }
    }

    /// Returns the floating terms of floating legs.
    pub fn floating_terms(&self) -> Option<&FloatingLegTerms> {
        match self {
            SwapLeg::Floating { terms, .. }
            | SwapLeg::FloatingSpread { terms, .. }
            | SwapLeg::FloatingGearing { terms, .. } => Some(terms),
            _ => None,
        }
    }

    /// Returns the leg kind as a display label.
    pub fn kind(&self) -> &'static str {
        match self {
            SwapLeg::Fixed { .. } => "fixed",
            SwapLeg::Floating { .. } => "floating",
            SwapLeg::FloatingSpread { .. } => "floating spread",
            SwapLeg::FloatingGearing { .. } => "floating gearing",
            SwapLeg::FixedInflation { .. } => "fixed inflation",
            SwapLeg::InflationIndex { .. } => "inflation index",
        }
    }
}

/// The legacy two-leg swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the security.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Trade date.
    pub trade_date: Date,
    /// Effective date.
    pub effective_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Counterparty name.
    #[serde(default)]
    pub counterparty: String,
    /// Leg paid by the holder.
    pub pay_leg: SwapLeg,
    /// Leg received by the holder.
    pub receive_leg: SwapLeg,
    /// Exchange notional at the start.
    #[serde(default)]
    pub exchange_initial_notional: bool,
    /// Exchange notional at maturity.
    #[serde(default)]
    pub exchange_final_notional: bool,
}
