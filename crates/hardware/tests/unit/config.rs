//! # Configuration Tests
//!
//! Defaults, JSON deserialization and validation.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rv32pipe_core::common::error::ConfigError;
use rv32pipe_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_pipeline);
    assert_eq!(config.general.max_cycles, 1_000_000);
    assert_eq!(config.memory.depth_log, 16);
    assert_eq!(config.memory.depth_words(), 65_536);
    assert_eq!(config.memory.out_of_range, OutOfRangePolicy::Wrap);
    assert!(config.image.rewrite_halt);
    assert_eq!(config.image.format, ImageFormat::Auto);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::from_json(r#"{ "memory": { "out_of_range": "Fault" } }"#).unwrap();
    assert_eq!(config.memory.depth_log, 16);
    assert_eq!(config.memory.out_of_range, OutOfRangePolicy::Fault);
    assert_eq!(config.general, GeneralConfig::default());
}

#[test]
fn test_full_json() {
    let json = r#"{
        "general": { "trace_pipeline": true, "max_cycles": 42 },
        "memory": { "depth_log": 12, "out_of_range": "Wrap" },
        "image": { "rewrite_halt": false, "format": "Verilog" }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.trace_pipeline);
    assert_eq!(config.general.max_cycles, 42);
    assert_eq!(config.memory.depth_words(), 4096);
    assert!(!config.image.rewrite_halt);
    assert_eq!(config.image.format, ImageFormat::Verilog);
}

#[test]
fn test_serialize_round_trip() {
    let mut config = Config::default();
    config.image.format = ImageFormat::Words;
    config.memory.out_of_range = OutOfRangePolicy::Fault;
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"Fault\""));
    assert_eq!(Config::from_json(&json).unwrap(), config);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(29)]
#[case(32)]
fn test_depth_log_out_of_range(#[case] depth: u32) {
    let json = format!(r#"{{ "memory": {{ "depth_log": {depth} }} }}"#);
    let err = Config::from_json(&json).unwrap_err();
    assert!(matches!(err, ConfigError::DepthLog { got, min: 2, max: 28 } if got == depth));
}

#[rstest]
#[case(r#"{ "memory": { "out_of_range": "Explode" } }"#)]
#[case(r#"{ "general": { "max_cycles": -1 } }"#)]
#[case("not json")]
fn test_invalid_json(#[case] json: &str) {
    assert!(matches!(Config::from_json(json), Err(ConfigError::Json(_))));
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.json");
    std::fs::write(&path, r#"{ "general": { "max_cycles": 7 } }"#).unwrap();
    assert_eq!(Config::from_file(&path).unwrap().general.max_cycles, 7);
    assert!(matches!(
        Config::from_file(dir.path().join("missing.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn depth_words_saturates_past_address_width() {
    let mut config = Config::default();
    config.memory.depth_log = 64;
    assert_eq!(config.memory.depth_words(), usize::MAX);
    assert!(config.validate().is_err());
}
