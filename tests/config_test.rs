//! 設定ファイルテスト
//!
//! 設定の読み書きとAPI URLの検証

use geodais::config::Config;
use geodais::error::GeodaisError;
use geodais_common::DEFAULT_API_BASE;
use tempfile::tempdir;

/// 設定ファイルがない場合は既定値
#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読込失敗");

    assert_eq!(config.dashboard.api_base, DEFAULT_API_BASE);
    assert_eq!(config.registros_url(), "https://backend-geodais.onrender.com/api/registros");
}

/// 保存した設定を読み戻す
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_api_base("http://localhost:8080/api/".to_string()).unwrap();
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読込失敗");
    assert_eq!(loaded.dashboard.api_base, "http://localhost:8080/api/");
    assert_eq!(loaded.registros_url(), "http://localhost:8080/api/registros");
    assert_eq!(loaded.dashboard.map, config.dashboard.map);
}

/// 一部のキーだけの設定ファイル
#[test]
fn test_partial_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"map": {"zoom": 9}}"#).unwrap();

    let config = Config::load_from(&path).expect("読込失敗");
    assert_eq!(config.dashboard.api_base, DEFAULT_API_BASE);
    assert_eq!(config.dashboard.map.zoom, 9);
    assert_eq!(config.dashboard.map.base_layers.len(), 2);
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(GeodaisError::JsonParse(_))));
}

/// http(s) 以外のURLは拒否
#[test]
fn test_set_api_base_rejects_non_http() {
    let mut config = Config::default();
    let result = config.set_api_base("ftp://example.com".to_string());
    assert!(matches!(result, Err(GeodaisError::Config(_))));
    assert_eq!(config.dashboard.api_base, DEFAULT_API_BASE);
}
