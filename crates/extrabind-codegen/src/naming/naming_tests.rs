#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn capitalize___capitalizes_first_letter() {
    assert_eq!(capitalize("hello"), "Hello");
    assert_eq!(capitalize("a"), "A");
    assert_eq!(capitalize(""), "");
}

#[test]
fn capitalize___preserves_rest_of_string() {
    assert_eq!(capitalize("helloWorld"), "HelloWorld");
    assert_eq!(capitalize("ALLCAPS"), "ALLCAPS");
}

#[test]
fn to_pascal_case___folds_namespaces() {
    assert_eq!(to_pascal_case("com.example.app"), "ComExampleApp");
    assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
    assert_eq!(to_pascal_case(""), "");
}

#[test_case("id", true)]
#[test_case("userId", true)]
#[test_case("_private", true)]
#[test_case("$value", true)]
#[test_case("key2", true)]
#[test_case("", false)]
#[test_case("2key", false)]
#[test_case("user-id", false)]
#[test_case("user id", false)]
#[test_case("class", false)]
#[test_case("_", false)]
fn is_java_identifier___validates(key: &str, expected: bool) {
    assert_eq!(is_java_identifier(key), expected);
}

#[test]
fn state_class_name___capitalizes_key() {
    assert_eq!(state_class_name("flag"), "AfterSettingFlag");
    assert_eq!(state_class_name("userId"), "AfterSettingUserId");
}

#[test_case("com.example.Detail", "com.example", "Detail")]
#[test_case("com.example.Outer.Inner", "com.example", "Outer$Inner")]
#[test_case("Detail", "", "Detail")]
#[test_case("com.example.lowercase", "com.example", "lowercase")]
fn split_canonical_name___splits_at_first_type(canonical: &str, namespace: &str, simple: &str) {
    assert_eq!(
        split_canonical_name(canonical),
        (namespace.to_string(), simple.to_string())
    );
}

#[test]
fn qualified___omits_empty_namespace() {
    assert_eq!(qualified("com.example", "Navigator"), "com.example.Navigator");
    assert_eq!(qualified("", "Navigator"), "Navigator");
}
