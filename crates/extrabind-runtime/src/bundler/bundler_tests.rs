#![allow(non_snake_case)]

use super::*;
use serde::Serialize;

#[derive(Serialize)]
struct Point {
    x: i32,
    y: i32,
}

struct Ticket {
    seat: u32,
}

impl Parcelable for Ticket {
    fn write_to_parcel(&self) -> RuntimeResult<serde_json::Value> {
        Ok(serde_json::json!({ "seat": self.seat }))
    }
}

#[test]
fn Bundler___create___starts_empty() {
    let bundle = Bundler::create().get();

    assert!(bundle.is_empty());
}

#[test]
fn Bundler___put___chains_values() {
    let bundle = Bundler::create().put("id", 3).put("flag", true).get();

    assert_eq!(bundle.get("id"), Some(&ExtraValue::Int(3)));
    assert_eq!(bundle.get("flag"), Some(&ExtraValue::Boolean(true)));
}

#[test]
fn Bundler___put_char_sequence___uses_char_sequence_variant() {
    let bundle = Bundler::create().put_char_sequence("title", "Hi").get();

    assert_eq!(
        bundle.get("title"),
        Some(&ExtraValue::CharSequence("Hi".to_string()))
    );
}

#[test]
fn Bundler___put_serializable___stores_json_payload() {
    let bundle = Bundler::create()
        .put_serializable("point", &Point { x: 1, y: 2 })
        .unwrap()
        .get();

    assert_eq!(
        bundle.get("point"),
        Some(&ExtraValue::Serializable(serde_json::json!({"x": 1, "y": 2})))
    );
}

#[test]
fn Bundler___put_parcelable___uses_parcel_form() {
    let bundle = Bundler::create()
        .put_parcelable("ticket", &Ticket { seat: 12 })
        .unwrap()
        .get();

    assert_eq!(
        bundle.get("ticket"),
        Some(&ExtraValue::Parcelable(serde_json::json!({"seat": 12})))
    );
}

#[test]
fn Bundler___put_wrapped___passes_through_parceler() {
    let bundle = Bundler::create()
        .put_wrapped("point", "com.example.Point", &Point { x: 5, y: 6 }, &JsonParceler)
        .unwrap()
        .get();

    let Some(ExtraValue::Wrapped(wrapped)) = bundle.get("point") else {
        panic!("expected a wrapped value");
    };
    assert_eq!(wrapped["parcel"], "com.example.Point");
    assert_eq!(
        JsonParceler.unwrap(wrapped).unwrap(),
        serde_json::json!({"x": 5, "y": 6})
    );
}

#[test]
fn JsonParceler___wrap___rejects_empty_type_name() {
    let result = JsonParceler.wrap("", serde_json::Value::Null);

    assert!(matches!(result, Err(RuntimeError::Parceler(_))));
}

#[test]
fn JsonParceler___unwrap___rejects_unwrapped_value() {
    let result = JsonParceler.unwrap(&serde_json::json!(7));

    assert!(matches!(result, Err(RuntimeError::Parceler(_))));
}

#[test]
fn Bundler___of___seeds_existing_extras() {
    let mut seed = Bundle::new();
    seed.put("id", 1);

    let bundler = Bundler::of(seed);

    assert!(bundler.contains("id"));
    assert!(!bundler.contains("other"));
}
