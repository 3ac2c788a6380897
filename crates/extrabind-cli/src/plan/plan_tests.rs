#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn render___prints_builders_binders_and_navigator() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extrabind.toml");
    fs::write(
        &path,
        r#"
[[fields]]
class = "com.example.Detail"
name = "id"
type = "int"

[[targets]]
class = "com.example.Detail"
"#,
    )
    .unwrap();

    let json = render(path.to_str().unwrap(), &Overrides::default(), true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["builders"][0]["target"], "com.example.Detail");
    assert_eq!(value["builders"][0]["chain"][0], "id");
    assert_eq!(value["binders"][0]["lookups"][0]["key"], "id");
    assert_eq!(value["navigator"]["entries"][0]["method"], "gotoDetail");
    assert!(!json.contains('\n'));
}
