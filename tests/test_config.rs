mod common;

use common::TempRoot;
use vidstream::config::Config;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.document_root, "./video");
    assert_eq!(cfg.server.log_level, "info");
    assert_eq!(cfg.stream.read_chunk, 1023);
    assert_eq!(cfg.stream.write_window, 16 * 1024);
    assert!(cfg.stream.contain_paths);
}

#[test]
fn test_config_from_yaml() {
    let yaml = r#"
server:
  listen_addr: "0.0.0.0:4433"
  document_root: /srv/video
stream:
  read_chunk: 512
  contain_paths: false
"#;
    let cfg = Config::from_yaml(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:4433");
    assert_eq!(cfg.server.document_root, "/srv/video");
    assert_eq!(cfg.server.log_level, "info");
    assert_eq!(cfg.stream.read_chunk, 512);
    assert_eq!(cfg.stream.write_window, 16 * 1024);
    assert!(!cfg.stream.contain_paths);
}

#[test]
fn test_config_empty_yaml_is_default() {
    let cfg = Config::from_yaml("{}").unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_rejects_bad_yaml() {
    assert!(Config::from_yaml("stream:\n  read_chunk: lots\n").is_err());
}

#[test]
fn test_config_env_overrides() {
    let mut cfg = Config::default();
    cfg.apply_overrides(|key| match key {
        "LISTEN" => Some("0.0.0.0:3000".to_string()),
        "DOCUMENT_ROOT" => Some("/data".to_string()),
        _ => None,
    });

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.document_root, "/data");
    assert_eq!(cfg.server.log_level, "info");
}

#[test]
fn test_config_no_overrides() {
    let mut cfg = Config::default();
    cfg.apply_overrides(no_env);

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_load_from_file() {
    let root = TempRoot::new();
    let file = root.write("vidstream.yaml", b"server:\n  log_level: debug\n");

    let cfg = Config::load(Some(file.as_path())).unwrap();
    assert_eq!(cfg.server.log_level, "debug");
}

#[test]
fn test_config_load_missing_file_fails() {
    let root = TempRoot::new();

    let missing = root.path().join("absent.yaml");

    assert!(Config::load(Some(missing.as_path())).is_err());
}

#[test]
fn test_validate_accepts_directory_root() {
    let root = TempRoot::new();
    let mut cfg = Config::default();
    cfg.server.document_root = root.root();

    assert!(cfg.validate().is_ok());
}

#[test]
fn test_validate_rejects_file_root() {
    let root = TempRoot::new();
    let file = root.write("a.txt", b"a");
    let mut cfg = Config::default();
    cfg.server.document_root = file.to_string_lossy().into_owned();

    assert!(cfg.validate().is_err());
}

#[test]
fn test_validate_rejects_missing_root() {
    let root = TempRoot::new();
    let mut cfg = Config::default();
    cfg.server.document_root = root.path().join("absent").to_string_lossy().into_owned();

    assert!(cfg.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let root = TempRoot::new();
    let mut cfg = Config::default();
    cfg.server.document_root = root.root();
    cfg.stream.write_window = 0;

    assert!(cfg.validate().is_err());
}
