use std::io::Write;

use securewiper::config::ConfigSection;
use securewiper::{AppConfig, HashAlgorithm, PassCount};

#[test]
fn test_load_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "product:\n  tool_version: SecureWiper Enterprise v4.1\npacing:\n  sub_step_delay_ms: 5\ndefaults:\n  pass_count: 7\n  hash_algorithm: blake3"
    )
    .unwrap();

    let config = AppConfig::load(file.path()).unwrap();

    assert_eq!(config.product.tool_version, "SecureWiper Enterprise v4.1");
    assert_eq!(config.product.certificate_prefix, "SWC");
    assert_eq!(config.pacing.sub_step_delay_ms, 5);
    assert_eq!(config.pacing.finalize_delay_ms, 1000);
    assert_eq!(config.defaults.pass_count, PassCount::Seven);
    assert_eq!(config.defaults.hash_algorithm, HashAlgorithm::Blake3);
}

#[test]
fn test_load_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"defaults": {{"pass_count": 35}}}}"#).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.defaults.pass_count, PassCount::ThirtyFive);
    assert_eq!(config.get("defaults.pass_count").as_deref(), Some("35"));
}

#[test]
fn test_unsupported_pass_count_rejected() {
    assert!("defaults:\n  pass_count: 5\n".parse::<AppConfig>().is_err());
}

#[test]
fn test_missing_file_is_a_read_error() {
    let err = AppConfig::load(std::path::Path::new("/nonexistent/securewiper.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_invalid_verification_url_rejected() {
    let mut config = AppConfig::default();
    assert!(config
        .apply_override("product.verification_base_url=ftp://verify")
        .is_err());
}
