#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

// Overrides::apply tests

#[test]
fn Overrides___apply___defaults_keep_manifest_options() {
    let options = GeneratorOptions::default()
        .with_wrap_enabled(false)
        .with_navigator_name("Routes");

    let applied = Overrides::default().apply(options.clone());

    assert_eq!(applied, options);
}

#[test]
fn Overrides___apply___flags_win() {
    let overrides = Overrides {
        debug: true,
        no_wrap: true,
        namespace: Some("com.example.nav".to_string()),
        navigator_name: Some("Routes".to_string()),
    };

    let applied = overrides.apply(GeneratorOptions::default());

    assert!(applied.debug);
    assert!(!applied.wrap_enabled);
    assert_eq!(applied.navigator_namespace.as_deref(), Some("com.example.nav"));
    assert_eq!(applied.navigator_name, "Routes");
}

// load tests

#[test]
fn load___reads_options_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extrabind.toml");
    fs::write(
        &path,
        r#"
[options]
wrap_enabled = false
navigator_name = "Routes"
"#,
    )
    .unwrap();

    let (manifest, options) = load(path.to_str().unwrap(), &Overrides::default()).unwrap();

    assert!(manifest.fields.is_empty());
    assert!(!options.wrap_enabled);
    assert_eq!(options.navigator_name, "Routes");
}

#[test]
fn load___missing_file___returns_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load(path.to_str().unwrap(), &Overrides::default()).unwrap_err();

    assert!(err.to_string().contains("Failed to load manifest"));
}

#[test]
fn load___malformed_toml___returns_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extrabind.toml");
    fs::write(&path, "[[fields]\nclass = ").unwrap();

    assert!(load(path.to_str().unwrap(), &Overrides::default()).is_err());
}
