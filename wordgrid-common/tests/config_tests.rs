//! Configuration loading tests
//!
//! Tests that touch WORDGRID_CONFIG are marked #[serial] so they do not race
//! each other on the process environment.

use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use wordgrid_common::config::{explicit_config_path, Config, CONFIG_ENV_VAR};
use wordgrid_common::db::rotation::RotationBoundary;
use wordgrid_common::Error;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("Should write config");
    path
}

#[test]
fn test_load_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
database_path = "/srv/wordgrid/game.db"
puzzle_dir = "/srv/wordgrid/puzzles"
site_dir = "/srv/wordgrid/site"
bind_address = "0.0.0.0"
port = 8080
rotation_boundary = "inclusive"
"#,
    );

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(
        config,
        Config {
            database_path: PathBuf::from("/srv/wordgrid/game.db"),
            puzzle_dir: Some(PathBuf::from("/srv/wordgrid/puzzles")),
            site_dir: PathBuf::from("/srv/wordgrid/site"),
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            rotation_boundary: RotationBoundary::Inclusive,
        }
    );
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_unknown_boundary_is_error() {
    let err = Config::from_toml_str("rotation_boundary = \"sometimes\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_cli_argument_beats_environment() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/wordgrid-from-env.toml");

    let resolved = explicit_config_path(Some(Path::new("/tmp/wordgrid-from-cli.toml")));
    assert_eq!(resolved, Some(PathBuf::from("/tmp/wordgrid-from-cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_environment_variable_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "port = 9100\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    assert_eq!(explicit_config_path(None), Some(path.clone()));
    let config = Config::load(None).unwrap();
    assert_eq!(config.port, 9100);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_empty_environment_variable_ignored() {
    env::set_var(CONFIG_ENV_VAR, "");
    assert_eq!(explicit_config_path(None), None);
    env::remove_var(CONFIG_ENV_VAR);
}
