//! Rendering and config loading.

use std::fs;

use insta::assert_snapshot;
use sauti_cli::config::GridConfig;
use sauti_cli::render::write_page_csv;
use sauti_model::RowRecord;
use serde_json::json;
use tempfile::tempdir;

fn csv_text(rows: &[RowRecord]) -> String {
    let mut out = Vec::new();
    write_page_csv(rows, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_page_csv_uses_union_of_columns() {
    let rows = vec![
        RowRecord(json!({"market": "Busia", "product": "Dry Maize", "retail": 120})),
        RowRecord(json!({"market": "Owino, Kampala", "product": "Beans", "wholesale": 95.5})),
        RowRecord(json!({"market": "Mbale", "product": null})),
    ];
    assert_snapshot!(csv_text(&rows), @r#"
    market,product,retail,wholesale
    Busia,Dry Maize,120,
    "Owino, Kampala",Beans,,95.5
    Mbale,,,
    "#);
}

#[test]
fn test_page_csv_empty_page_writes_nothing() {
    assert_eq!(csv_text(&[]), "");
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "api_base = \"http://localhost:8888/sauti/\"\nstate_dir = \"/tmp/sauti-state\"\n",
    )
    .unwrap();

    let config = GridConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.api_base, "http://localhost:8888/sauti/");
    assert_eq!(config.state_dir(), std::path::PathBuf::from("/tmp/sauti-state"));
    assert_eq!(config.token_env, "SAUTI_API_TOKEN");
    assert_eq!(config.timeout_secs, 30);
}

#[test]
fn test_missing_default_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = GridConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GridConfig::default());
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(GridConfig::load(Some(dir.path().join("absent.toml").as_path())).is_err());
}

#[test]
fn test_malformed_file_names_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "timeout_secs = \"soon\"").unwrap();
    let err = GridConfig::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("config.toml"));
}
