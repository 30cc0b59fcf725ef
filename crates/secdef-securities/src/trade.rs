//! Trades: a position in a security with its booking details.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use secdef_core::Date;

use crate::ids::ExternalId;
use crate::security::Security;

/// A trade in a security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade identifier.
    pub id: String,
    /// The traded security.
    pub security: Security,
    /// Quantity (number of units or face amount).
    pub quantity: Decimal,
    /// Trade date.
    #[serde(default)]
    pub trade_date: Option<Date>,
    /// Trade time (UTC).
    #[serde(default)]
    pub trade_time: Option<NaiveTime>,
    /// Clean price or premium.
    #[serde(default)]
    pub premium: Option<f64>,
    /// Premium settlement date.
    #[serde(default)]
    pub premium_date: Option<Date>,
    /// Premium settlement time (UTC).
    #[serde(default)]
    pub premium_time: Option<NaiveTime>,
    /// Counterparty.
    #[serde(default)]
    pub counterparty: Option<ExternalId>,
    /// Free-form attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Trade {
    /// Creates a trade with only the security and quantity set.
    pub fn new(id: impl Into<String>, security: Security, quantity: Decimal) -> Self {
        Self {
            id: id.into(),
            security,
            quantity,
            trade_date: None,
            trade_time: None,
            premium: None,
            premium_date: None,
            premium_time: None,
            counterparty: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the trade date and time.
    #[must_use]
    pub fn with_trade_date(mut self, date: Date, time: Option<NaiveTime>) -> Self {
        self.trade_date = Some(date);
        self.trade_time = time;
        self
    }

    /// Sets the premium with its settlement date and time.
    #[must_use]
    pub fn with_premium(mut self, premium: f64, date: Option<Date>, time: Option<NaiveTime>) -> Self {
        self.premium = Some(premium);
        self.premium_date = date;
        self.premium_time = time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TRADE: &str = r#"{
        "id": "T1",
        "security": {
            "security_type": "IBOR_INDEX",
            "name": "USD LIBOR 3M",
            "ids": ["TICKER~US0003M"],
            "tenor": "3M",
            "convention_id": "Reference~USD LIBOR"
        },
        "quantity": 2500000,
        "trade_date": "2025-03-03",
        "premium": 99.5,
        "attributes": { "Moody's": "Aa1" }
    }"#;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_trade_from_json() {
        let trade: Trade = serde_json::from_str(TRADE).unwrap();
        assert_eq!(trade.quantity, dec!(2500000));
        assert_eq!(trade.trade_date, Some(date(2025, 3, 3)));
        assert_eq!(trade.premium, Some(99.5));
        assert!(trade.premium_date.is_none());
        assert_eq!(trade.attributes.get("Moody's").map(String::as_str), Some("Aa1"));
    }

    #[test]
    fn test_builder_setters() {
        let security = serde_json::from_str::<Trade>(TRADE).unwrap().security;
        let noon = NaiveTime::from_hms_opt(12, 0, 0);
        let trade = Trade::new("T2", security, dec!(-1.5))
            .with_trade_date(date(2025, 3, 3), None)
            .with_premium(100.25, Some(date(2025, 3, 5)), noon);

        assert_eq!(trade.quantity, dec!(-1.5));
        assert!(trade.trade_time.is_none());
        assert_eq!(trade.premium_date, Some(date(2025, 3, 5)));
        assert_eq!(trade.premium_time, noon);
        assert!(trade.counterparty.is_none());
    }
}
