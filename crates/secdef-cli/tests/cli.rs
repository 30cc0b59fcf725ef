//! Command-line tests for the `secdef` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const TREASURY: &str = r#"{
    "security_type": "GOVERNMENT_BOND",
    "name": "T 4 02/15/30",
    "ids": ["ISIN~US91282CMM00"],
    "issuer_name": "US TREASURY N/B",
    "issuer_type": "SOVEREIGN",
    "issuer_domicile": "US",
    "currency": "USD",
    "coupon_type": "FIXED",
    "coupon_rate": 4.0,
    "coupon_frequency": "SemiAnnual",
    "day_count": "ACT/ACT",
    "interest_accrual_date": "2025-02-15",
    "first_coupon_date": "2025-08-15",
    "maturity_date": "2030-02-15"
}"#;

fn swap(id: &str, stub: &str) -> String {
    format!(
        r#"{{
        "security_type": "INTEREST_RATE_SWAP",
        "name": "USD 5Y {id}",
        "ids": ["SECDEF~{id}"],
        "effective_date": "2025-01-15",
        "unadjusted_maturity": "2030-01-15",
        "legs": [
            {{
                "kind": "fixed",
                "notional": {{ "currency": "USD", "notionals": [10000000.0] }},
                "pay_receive_type": "PAY",
                "day_count": "30/360",
                "payment_frequency": "SemiAnnual",
                "rate": {{ "initial_rate": 0.04 }},
                "stub_calculation_method": {stub}
            }},
            {{
                "kind": "floating",
                "notional": {{ "currency": "USD", "notionals": [10000000.0] }},
                "pay_receive_type": "RECEIVE",
                "day_count": "ACT/360",
                "payment_frequency": "Quarterly",
                "floating_rate_type": "IBOR",
                "floating_reference_rate_id": "TICKER~US0003M",
                "reset_frequency": "Quarterly"
            }}
        ]
    }}"#
    )
}

const SHORT_START: &str =
    r#"{ "type": "SHORT_START", "first_stub_rate": 0.035, "first_stub_end_date": "2025-03-17" }"#;

const DUAL_WITHOUT_DATES: &str = r#"{ "type": "BOTH", "first_stub_rate": 0.035 }"#;

fn reference_file(securities: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
        "securities": [{}],
        "convention_bundles": [
            {{
                "name": "US_TREASURY_BOND_CONVENTION",
                "ids": ["Reference~US_TREASURY_BOND_CONVENTION"],
                "eom": false,
                "bond_settlement_days": 1
            }}
        ],
        "regions": [
            {{ "name": "United States", "ids": ["FINANCIAL_REGION~US"], "currency": "USD" }}
        ]
    }}"#,
        securities.join(",")
    )
    .unwrap();
    file
}

fn secdef() -> Command {
    Command::cargo_bin("secdef").unwrap()
}

#[test]
fn test_convert_bond_table() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["convert", "--data"])
        .arg(data.path())
        .args(["--id", "ISIN~US91282CMM00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BondFixedSecurityDefinition"))
        .stdout(predicate::str::contains("2030-02-15"));
}

#[test]
fn test_convert_bond_json() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["--format", "json", "--quiet", "convert", "--data"])
        .arg(data.path())
        .args(["--id", "ISIN~US91282CMM00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""definition_type": "BondFixedSecurity""#))
        .stdout(predicate::str::contains(r#""security_type": "GOVERNMENT_BOND""#));
}

#[test]
fn test_convert_with_valuation_date() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["convert", "--data"])
        .arg(data.path())
        .args(["--id", "ISIN~US91282CMM00", "--valuation-date", "2025-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Derivative at 2025-06-02"))
        .stdout(predicate::str::contains("Remaining coupons"));
}

#[test]
fn test_convert_unknown_security() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["convert", "--data"])
        .arg(data.path())
        .args(["--id", "ISIN~NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No security found for ISIN~NOPE"));
}

#[test]
fn test_convert_unknown_trade() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["convert", "--data"])
        .arg(data.path())
        .args(["--trade", "T42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No trade found with id T42"));
}

#[test]
fn test_stubs() {
    let data = reference_file(&[swap("IRS1", SHORT_START)]);
    secdef()
        .args(["stubs", "--data"])
        .arg(data.path())
        .args(["--id", "SECDEF~IRS1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ShortStart"))
        .stdout(predicate::str::contains("3.5000%"))
        .stdout(predicate::str::contains("2025-03-17"));
}

#[test]
fn test_stubs_of_a_bond() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["stubs", "--data"])
        .arg(data.path())
        .args(["--id", "ISIN~US91282CMM00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not an interest rate swap"));
}

#[test]
fn test_validate_clean_file() {
    let data = reference_file(&[TREASURY.to_string(), swap("IRS1", SHORT_START)]);
    secdef()
        .args(["validate", "--data"])
        .arg(data.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 swap(s) checked, no problems found"));
}

#[test]
fn test_validate_reports_bad_stub() {
    let data = reference_file(&[swap("IRS1", SHORT_START), swap("IRS2", DUAL_WITHOUT_DATES)]);
    secdef()
        .args(["validate", "--data"])
        .arg(data.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Dual stub must have a first stub period end date"))
        .stderr(predicate::str::contains("1 validation problem(s) found"));
}

#[test]
fn test_missing_config_file() {
    let data = reference_file(&[TREASURY.to_string()]);
    secdef()
        .args(["--config", "/nonexistent/secdef.toml", "validate", "--data"])
        .arg(data.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading configuration"));
}
