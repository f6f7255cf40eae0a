//! Integration tests for configuration loading and settings access

use std::fs;
use std::path::PathBuf;

use mcstarter::config::loader::LoadOptions;
use mcstarter::config::{keys, SettingsSource};
use mcstarter::{Config, ConfigLoader, Error, ProcessPriority, ServerConfiguration};
use tempfile::TempDir;

fn offline() -> LoadOptions {
    LoadOptions {
        create_default: true,
        detect_java: false,
        validate: true,
    }
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.java.path = PathBuf::from("/usr/lib/jvm/java-17/bin/java");
    config.java.min_ram_mb = 1024;
    config.java.max_ram_mb = 4096;
    config.server.priority = ProcessPriority::AboveNormal;
    config.server.ignore_command_blocks = false;
    config.server.server_identities = vec!["Server".to_string(), "Rcon".to_string()];
    config.logging.level = "debug".to_string();

    let loader = ConfigLoader::with_search_paths(Vec::new());
    loader.save_to_path(&config, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[java]"));
    assert!(text.contains("above_normal"));

    let loaded = ConfigLoader::load_from_path(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[java]\npath = \"/opt/java/bin/java\"\nmax_ram_mb = 3072\n",
    )
    .unwrap();

    let mut loader = ConfigLoader::with_search_paths(vec![dir.path().join("config")]);
    let config = loader.load_with_options(offline()).unwrap();

    assert_eq!(config.java.min_ram_mb, 512);
    assert_eq!(config.java.max_ram_mb, 3072);
    assert_eq!(config.server.priority, ProcessPriority::Normal);
    assert!(config.server.ignore_command_blocks);
    assert_eq!(
        config.server.server_identities,
        vec!["Server".to_string(), "@".to_string()]
    );
}

#[test]
fn test_invalid_ram_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[java]\nmin_ram_mb = 2048\nmax_ram_mb = 1024\n").unwrap();

    let mut loader = ConfigLoader::with_search_paths(vec![dir.path().join("config")]);
    let err = loader.load_with_options(offline()).unwrap_err();
    assert!(matches!(err, Error::ConfigValidationFailed { .. }));
}

#[test]
fn test_zero_ram_fails_validation() {
    let loader = ConfigLoader::with_search_paths(Vec::new());
    let mut config = Config::default();
    config.java.min_ram_mb = 0;
    assert!(loader.validate_config(&config).is_err());
}

#[test]
fn test_first_search_path_wins() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("config.json"), r#"{"java": {"max_ram_mb": 2048}}"#).unwrap();
    fs::write(second.path().join("config.toml"), "[java]\nmax_ram_mb = 8192\n").unwrap();

    let mut loader = ConfigLoader::with_search_paths(vec![
        first.path().join("config"),
        second.path().join("config"),
    ]);
    let config = loader.load_with_options(offline()).unwrap();
    assert_eq!(config.java.max_ram_mb, 2048);
    assert_eq!(
        loader.current_path(),
        Some(first.path().join("config.json").as_path())
    );
}

#[test]
fn test_settings_source_builds_server_configuration() {
    let mut config = Config::default();
    config.java.path = PathBuf::from("/opt/java/bin/java");
    config.java.min_ram_mb = 768;
    config.server.priority = ProcessPriority::Idle;

    assert_eq!(config.read_int(keys::MIN_RAM), Some(768));
    assert_eq!(config.read_bool(keys::IGNORE_COMMAND_BLOCKS), Some(true));

    let server = ServerConfiguration::from_settings(&config, "/srv/mc/server.jar").unwrap();
    assert_eq!(server.priority, ProcessPriority::Idle);
    assert_eq!(
        server.command_line(),
        "-Xms768M -Xmx1024M -jar \"/srv/mc/server.jar\" nogui"
    );
}

#[test]
fn test_missing_java_setting() {
    let config = Config::default();
    let err = ServerConfiguration::from_settings(&config, "/srv/mc/server.jar").unwrap_err();
    assert!(matches!(err, Error::SettingMissing { .. }));
}
