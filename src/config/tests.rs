use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use crate::errors::errors::ConfigError;

use super::*;

#[test]
fn test_default_settings() {
    let settings = BuildSettings::default();

    assert_eq!(settings.cxx_out_dir, "./dist");
    assert_eq!(settings.cxx_out_name, "x.cxx");
    assert_eq!(settings.out_name, "main");
    assert_eq!(settings.language, "");
    assert_eq!(settings.mode, BuildMode::Transpile);
    assert!(settings.post_commands.is_empty());
}

#[test]
fn test_load_fills_missing_fields() {
    let settings = BuildSettings::load(r#"{ "out_name": "app", "mode": "compile" }"#).unwrap();

    assert_eq!(settings.out_name, "app");
    assert_eq!(settings.mode, BuildMode::Compile);
    assert_eq!(settings.cxx_out_dir, "./dist");
    assert_eq!(settings.cxx_out_name, "x.cxx");
}

#[test]
fn test_load_post_commands() {
    let settings =
        BuildSettings::load(r#"{ "post_commands": ["strip main", "echo done"] }"#).unwrap();

    assert_eq!(settings.post_commands, vec!["strip main", "echo done"]);
}

#[test]
fn test_load_empty_object() {
    assert_eq!(BuildSettings::load("{}").unwrap(), BuildSettings::default());
}

#[test]
fn test_load_malformed() {
    assert!(matches!(
        BuildSettings::load("{ out_name: "),
        Err(ConfigError::Malformed(_))
    ));
    assert!(matches!(
        BuildSettings::load(r#"{ "mode": "interpret" }"#),
        Err(ConfigError::Malformed(_))
    ));
}

#[test]
fn test_settings_json_round_trip() {
    let mut settings = BuildSettings::default();
    settings.language = String::from("tr");

    let json = settings.to_json().unwrap();
    assert!(json.contains(r#""mode": "transpile""#));
    assert_eq!(BuildSettings::load(&json).unwrap(), settings);
}

#[test]
fn test_read_missing_file() {
    let error = BuildSettings::read(Path::new("/nonexistent/x.set")).unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }));
    assert!(error.to_string().contains("/nonexistent/x.set"));
}

#[test]
fn test_context_paths() {
    let ctx = Context::new("/opt/x", BuildSettings::default());

    assert_eq!(ctx.exec_path, PathBuf::from("/opt/x"));
    assert_eq!(ctx.stdlib_path, PathBuf::from("/opt/x/lib"));
    assert_eq!(ctx.langs_path, PathBuf::from("/opt/x/localization"));
    assert_eq!(ctx.entry_point, ENTRY_POINT);
}

#[test]
fn test_source_file_extension() {
    assert!(Context::is_source_file(Path::new("src/main.xx")));
    assert!(!Context::is_source_file(Path::new("src/main.rs")));
    assert!(!Context::is_source_file(Path::new("README.xdoc")));
}
