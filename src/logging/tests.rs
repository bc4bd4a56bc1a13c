// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<_> = (0..=6u8)
        .map(|n| LogLevel::new(n).unwrap().to_filter_string())
        .collect();
    assert_eq!(
        filters,
        ["off", "error", "warn", "info", "debug", "trace", "trace"]
    );
}

#[test]
fn test_log_level_rejects_out_of_range() {
    assert!(LogLevel::from_u8(7).is_none());
    let err = LogLevel::try_from(9).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 9"
    );
}

#[test]
fn test_log_level_deserialize_from_number() {
    let level: LogLevel = serde_json::from_value(serde_json::json!(4)).unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert!(serde_json::from_value::<LogLevel>(serde_json::json!(12)).is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_log_file("logs/reorg.log".to_string())
        .with_json_file(true)
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some("logs/reorg.log"));
    assert!(config.json_file());
}
