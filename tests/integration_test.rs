use std::process::{Command, Output};
use anyhow::{anyhow, Result};

const HEADER: &str = "id,date,time,type,status,amount,merchant,description";

fn run(args: &[&str], success_rate: &str) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_biometric-payment-engine");

    let output = Command::new(binary_path)
        .args(args)
        .env("BIOPAY_SCAN_TICK_MS", "1")
        .env("BIOPAY_SCAN_STEP", "50")
        .env("BIOPAY_SCAN_DURATION_MS", "5")
        .env("BIOPAY_SCAN_REPORT_DELAY_MS", "1")
        .env("BIOPAY_AUTH_DELAY_MS", "0")
        .env("BIOPAY_SUCCESS_RATE", success_rate)
        .env("BIOPAY_SEED", "7")
        .env_remove("BIOPAY_BACKEND_URL")
        .output()?;

    Ok(output)
}

#[test]
fn test_cli_customer_payment_debits_balance() -> Result<()> {
    let output = run(&["pay", "45.99", "Coffee Shop", "info"], "1")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some(HEADER));

    let row = lines.next().ok_or_else(|| anyhow!("transaction missing from output"))?;
    let fields: Vec<&str> = row.split(',').collect();

    assert_eq!(fields.len(), 8);
    assert!(fields[0].starts_with("txn-"));
    assert_eq!(fields[3], "outgoing");
    assert_eq!(fields[4], "completed");
    assert_eq!(fields[5], "45.99");
    assert_eq!(fields[6], "Coffee Shop");
    assert_eq!(lines.next(), None);

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("₹2538.24"), "balance missing from log: {stderr}");

    Ok(())
}

#[test]
fn test_cli_merchant_request_records_incoming_payment() -> Result<()> {
    let output = run(&["request", "120.5", "Table 4"], "1")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let rows: Vec<&str> = stdout.lines().skip(1).collect();

    assert_eq!(rows.len(), 1);

    let fields: Vec<&str> = rows[0].split(',').collect();

    assert_eq!(fields[3], "incoming");
    assert_eq!(fields[5], "120.50");
    assert_eq!(fields[7], "Table 4");

    Ok(())
}

#[test]
fn test_cli_failed_scan_records_nothing() -> Result<()> {
    let output = run(&["request", "10"], "0")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec![HEADER]);

    Ok(())
}

#[test]
fn test_cli_palm_vein_checkout_pays_merchant() -> Result<()> {
    let output = run(&["scan", "palm-vein", "12.99", "Grocery Store"], "1")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let rows: Vec<&str> = stdout.lines().skip(1).collect();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains(",outgoing,completed,12.99,Grocery Store,Paid via "));

    Ok(())
}

#[test]
fn test_cli_rejects_negative_amount() -> Result<()> {
    let output = run(&["pay", "-5"], "1")?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_rejects_invalid_configuration() -> Result<()> {
    let output = run(&["pay", "10"], "1.5")?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("BIOPAY_SUCCESS_RATE"));

    Ok(())
}

#[test]
fn test_cli_reads_log_level_only_after_command_arguments() -> Result<()> {
    let output = run(&["request", "10", "info"], "1")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let rows: Vec<&str> = stdout.lines().skip(1).collect();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].ends_with(",incoming,completed,10.00,Your Business,info"));

    let output = run(&["pay", "10", "debug", "warn"], "1")?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains(",outgoing,completed,10.00,debug,Payment"));

    Ok(())
}
