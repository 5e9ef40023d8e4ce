//! Root folder resolution and config file handling
//!
//! Tests that touch PANTRY_ROOT_FOLDER are marked #[serial] so they never
//! race each other on the process environment.

use pantry_common::config::{resolve_root_folder, PantryConfig, RootFolderInitializer, ROOT_FOLDER_ENV};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_env_var_beats_config_file() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/pantry-env");
    let config = PantryConfig {
        root_folder: Some(PathBuf::from("/tmp/pantry-toml")),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &config), PathBuf::from("/tmp/pantry-env"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_cli_arg_beats_env_var() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/pantry-env");

    let resolved = resolve_root_folder(Some(Path::new("/tmp/pantry-cli")), &PantryConfig::default());
    assert_eq!(resolved, PathBuf::from("/tmp/pantry-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_config_file_used_without_env() {
    env::remove_var(ROOT_FOLDER_ENV);
    let config = PantryConfig {
        root_folder: Some(PathBuf::from("/tmp/pantry-toml")),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &config), PathBuf::from("/tmp/pantry-toml"));
}

#[test]
#[serial]
fn test_blank_env_var_ignored() {
    env::set_var(ROOT_FOLDER_ENV, "   ");

    let resolved = resolve_root_folder(None, &PantryConfig::default());
    assert!(resolved.ends_with("pantry") || resolved.ends_with("pantry_data"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
fn test_load_config_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 6000\ncatalog_path = \"/srv/recipes.json\"\n").unwrap();

    let config = PantryConfig::load(&path).unwrap();
    assert_eq!(config.port, Some(6000));
    assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/recipes.json")));
    assert_eq!(config.root_folder, None);
}

#[test]
fn test_missing_config_file_is_error_for_load() {
    let dir = tempfile::tempdir().unwrap();
    assert!(PantryConfig::load(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_initializer_creates_layout() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("pantry");
    let initializer = RootFolderInitializer::new(root.clone());

    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert!(initializer.uploads_path().is_dir());
    assert_eq!(initializer.database_path(), root.join("pantry.db"));
}
