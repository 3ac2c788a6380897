#![allow(non_snake_case)]

use super::*;
use crate::types::Primitive;
use test_case::test_case;

fn setter(key: &str, value_type: &str, accessor: BundleAccessor) -> SetterPlan {
    SetterPlan {
        key: key.to_string(),
        value_type: value_type.to_string(),
        accessor,
    }
}

fn int(key: &str) -> SetterPlan {
    setter(key, "Integer", BundleAccessor::Primitive(Primitive::Int))
}

fn plan() -> BuilderPlan {
    BuilderPlan {
        target: "com.example.B".to_string(),
        namespace: "com.example".to_string(),
        builder_name: "B__IntentBuilder".to_string(),
        launch_class: Some("com.example.BActivity".to_string()),
        initial: InitialState::Sequence,
        states: vec![
            StatePlan {
                name: "RequiredSequence".to_string(),
                setter: setter("flag", "Boolean", BundleAccessor::Primitive(Primitive::Boolean)),
                next: "AfterSettingFlag".to_string(),
            },
            StatePlan {
                name: "AfterSettingFlag".to_string(),
                setter: int("id"),
                next: ALL_SET.to_string(),
            },
        ],
        chain: vec!["flag".to_string(), "id".to_string()],
        optional: vec![setter("note", "String", BundleAccessor::String)],
    }
}

#[test]
fn generate_intent_builder___outer_class_wires_intent() {
    let source = generate_intent_builder(&plan());

    assert_eq!(source.type_name, "B__IntentBuilder");
    let code = &source.contents;
    assert!(code.contains("public class B__IntentBuilder {"));
    assert!(code.contains("private final extrabind.Bundler bundler = extrabind.Bundler.create();"));
    assert!(code.contains("public B__IntentBuilder(android.content.Context context) {"));
    assert!(code.contains(
        "intent = new android.content.Intent(context, com.example.BActivity.class);"
    ));
    assert!(code.contains("public InitialState getInitialState() {"));
}

#[test]
fn generate_intent_builder___each_state_exposes_one_setter() {
    let code = generate_intent_builder(&plan()).contents;

    assert!(code.contains("public static class RequiredSequence<ALL_SET> {"));
    assert!(code.contains("public AfterSettingFlag<ALL_SET> flag(Boolean value) {"));
    assert!(code.contains("bundler.putBoolean(\"flag\", value);"));
    assert!(code.contains("return new AfterSettingFlag<>(bundler, allSetState);"));
    assert!(code.contains("public static class AfterSettingFlag<ALL_SET> {"));
    assert!(code.contains("public ALL_SET id(Integer value) {"));
    assert!(code.contains("return allSetState;"));
    assert_eq!(code.matches("public static class").count(), 4);
}

#[test]
fn generate_intent_builder___all_set_has_optional_setters_and_build() {
    let code = generate_intent_builder(&plan()).contents;

    assert!(code.contains("public AllSet note(String value) {"));
    assert!(code.contains("bundler.putString(\"note\", value);"));
    assert!(code.contains("return this;"));
    assert!(code.contains("public android.content.Intent build() {"));
    assert!(code.contains("intent.putExtras(bundler.get());"));
}

#[test]
fn generate_intent_builder___initial_state_starts_sequence() {
    let code = generate_intent_builder(&plan()).contents;

    assert!(code.contains("public static class InitialState extends RequiredSequence<AllSet> {"));
    assert!(code.contains("super(bundler, new AllSet(bundler, intent));"));
}

#[test]
fn generate_intent_builder___delegated_initial_state() {
    let plan = BuilderPlan {
        initial: InitialState::Delegated {
            ancestor: "com.example.A".to_string(),
            builder: "com.example.A__IntentBuilder".to_string(),
        },
        states: Vec::new(),
        ..plan()
    };

    let code = generate_intent_builder(&plan).contents;

    assert!(code.contains(
        "public static class InitialState extends \
         com.example.A__IntentBuilder.RequiredSequence<AllSet> {"
    ));
    assert!(!code.contains("class RequiredSequence"));
}

#[test]
fn generate_intent_builder___no_required_initial_state_is_all_set() {
    let plan = BuilderPlan {
        initial: InitialState::AllSet,
        states: Vec::new(),
        chain: Vec::new(),
        ..plan()
    };

    let code = generate_intent_builder(&plan).contents;

    assert!(code.contains("public static class InitialState extends AllSet {"));
    assert!(code.contains("super(bundler, intent);"));
}

#[test]
fn generate_intent_builder___sequence_only_has_no_intent() {
    let plan = BuilderPlan {
        launch_class: None,
        optional: Vec::new(),
        ..plan()
    };

    let code = generate_intent_builder(&plan).contents;

    assert!(code.contains("public static class RequiredSequence<ALL_SET> {"));
    assert!(!code.contains("android.content.Intent intent"));
    assert!(!code.contains("InitialState"));
    assert!(!code.contains("class AllSet"));
}

#[test]
fn generate_intent_builder___is_deterministic() {
    assert_eq!(
        generate_intent_builder(&plan()).contents,
        generate_intent_builder(&plan()).contents
    );
}

#[test_case(int("id"), "bundler.putInt(\"id\", value);")]
#[test_case(setter("t", "CharSequence", BundleAccessor::CharSequence), "bundler.putCharSequence(\"t\", value);")]
#[test_case(setter("r", "com.example.Record", BundleAccessor::Serializable), "bundler.putSerializable(\"r\", value);")]
#[test_case(setter("p", "com.example.Item", BundleAccessor::Parcelable), "bundler.putParcelable(\"p\", (android.os.Parcelable) value);")]
#[test_case(setter("w", "java.util.List<com.example.Item>", BundleAccessor::Wrapped), "bundler.putParcelable(\"w\", org.parceler.Parcels.wrap(value));")]
fn store_statement___per_accessor(setter: SetterPlan, expected: &str) {
    assert_eq!(store_statement(&setter, "value"), expected);
}
