use std::path::PathBuf;
use std::time::Duration;

use statica::config::{CONFIG_PATH_VAR, Config};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_config_defaults() {
    let cfg = Config::load_with(no_env).unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("www"));
    assert_eq!(cfg.idle_timeout(), Duration::from_secs(5));
}

#[test]
fn test_config_env_overrides() {
    let cfg = Config::load_with(|key| match key {
        "LISTEN" => Some("0.0.0.0:3000".to_string()),
        "DOC_ROOT" => Some("/srv/www".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("/srv/www"));
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        "server:\n  listen_addr: \"0.0.0.0:5000\"\n  idle_timeout_ms: 250\nstatic_files:\n  doc_root: /var/www\n",
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.idle_timeout(), Duration::from_millis(250));
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("/var/www"));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("static_files:\n  doc_root: site\n").unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.idle_timeout_ms, 5_000);
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("site"));
}

#[test]
fn test_config_file_then_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statica.yaml");
    std::fs::write(&path, "server:\n  listen_addr: \"127.0.0.1:9000\"\n").unwrap();
    let path_str = path.display().to_string();

    let cfg = Config::load_with(|key| match key {
        CONFIG_PATH_VAR => Some(path_str.clone()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");

    let cfg = Config::load_with(|key| match key {
        CONFIG_PATH_VAR => Some(path_str.clone()),
        "LISTEN" => Some("127.0.0.1:9001".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9001");
}

#[test]
fn test_config_missing_file_is_error() {
    let result = Config::load_with(|key| match key {
        CONFIG_PATH_VAR => Some("/no/such/statica.yaml".to_string()),
        _ => None,
    });

    assert!(result.is_err());
}

#[test]
fn test_config_invalid_yaml_is_error() {
    assert!(Config::from_yaml_str("server: [1, 2").is_err());
}

#[test]
fn test_config_validate() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    let mut cfg = Config::default();

    cfg.static_files.doc_root = dir.path().to_path_buf();
    assert!(cfg.validate().is_ok());

    cfg.static_files.doc_root = file;
    assert!(cfg.validate().is_err());

    cfg.static_files.doc_root = dir.path().join("missing");
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::load_with(no_env).unwrap();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}
