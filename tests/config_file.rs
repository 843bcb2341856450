// Loading configuration from disk and building a factory from it

use ledger_lens::{CoreConfig, EntityFactory, Transaction};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_file_drives_native_asset() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "network": {{ "key": "XAHAU", "name": "Xahau", "native_asset": "XAH" }}, "resolver": {{ "timeout_ms": 1500 }} }}"#
    )
    .unwrap();

    let config = CoreConfig::from_file(file.path()).unwrap();
    assert_eq!(config.resolver_timeout().as_millis(), 1500);

    let factory = EntityFactory::from_config(&config);
    let tx = factory.transaction(
        json!({ "TransactionType": "Payment", "Account": "rA", "Amount": "1000000" }),
        None,
    );

    let Transaction::Payment(payment) = tx else {
        panic!("expected a Payment");
    };
    assert_eq!(payment.amount().unwrap().currency, "XAH");
}

#[test]
fn test_missing_config_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = CoreConfig::from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "network": {{ "native_asset": "" }} }}"#).unwrap();

    let err = CoreConfig::from_file(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("native_asset"));
}
