#![allow(non_snake_case)]

use super::*;
use crate::facts::TypeDecl;
use crate::oracle::ManifestOracle;

fn build(manifest: &Manifest) -> (BindingSet, Diagnostics) {
    let oracle = ManifestOracle::new(&manifest.types);
    let mut diagnostics = Diagnostics::new();
    let set = ModelBuilder::new(&oracle)
        .wrap_enabled(manifest.options.wrap_enabled)
        .build(manifest, &mut diagnostics);
    (set, diagnostics)
}

#[test]
fn ModelBuilder___build___groups_fields_by_key() {
    let mut manifest = Manifest::default();
    manifest.fields = vec![
        FieldFact::new("com.example.A", "id", "int"),
        FieldFact::new("com.example.A", "note", "java.lang.String").optional(),
        FieldFact::new("com.example.A", "alias", "int").with_key("id"),
    ];

    let (set, diagnostics) = build(&manifest);

    assert!(diagnostics.is_empty());
    let id = set.lookup("com.example.A").unwrap();
    let target = set.target(id);
    assert_eq!(target.own_groups.keys().collect::<Vec<_>>(), vec!["id", "note"]);
    let group = set.group(target.own_groups.get("id").unwrap());
    assert_eq!(group.field_names(), vec!["alias", "id"]);
    assert!(group.is_required());
    assert!(!set.group(target.own_groups.get("note").unwrap()).is_required());
}

#[test]
fn ModelBuilder___build___blank_key_defaults_to_field_name() {
    let mut manifest = Manifest::default();
    manifest.fields = vec![FieldFact::new("com.example.A", "count", "long").with_key("   ")];

    let (set, _) = build(&manifest);

    let target = set.by_name("com.example.A").unwrap();
    assert!(target.own_groups.contains("count"));
}

#[test]
fn ModelBuilder___build___same_key_in_unrelated_classes_stays_independent() {
    let mut manifest = Manifest::default();
    manifest.fields = vec![
        FieldFact::new("com.example.A", "a", "int").with_key("shared"),
        FieldFact::new("com.example.B", "b", "int").with_key("shared").optional(),
    ];

    let (set, diagnostics) = build(&manifest);

    assert!(diagnostics.is_empty());
    let a = set.by_name("com.example.A").unwrap();
    let b = set.by_name("com.example.B").unwrap();
    let group_a = a.own_groups.get("shared").unwrap();
    let group_b = b.own_groups.get("shared").unwrap();
    assert_ne!(group_a, group_b);
    assert_eq!(set.group(group_a).field_names(), vec!["a"]);
    assert_eq!(set.group(group_b).field_names(), vec!["b"]);
    assert!(set.group(group_a).is_required());
    assert!(!set.group(group_b).is_required());
}

#[test]
fn ModelBuilder___build___reports_each_broken_rule() {
    let mut manifest = Manifest::default();
    manifest.types = vec![TypeDecl::class("com.example.Hidden").with_visibility(Visibility::Private)];
    manifest.fields = vec![
        FieldFact::new("com.example.Hidden", "x", "int")
            .with_modifier(Modifier::Private)
            .with_modifier(Modifier::Static),
        FieldFact::new("com.example.A", "ok", "int"),
    ];

    let (set, diagnostics) = build(&manifest);

    assert_eq!(diagnostics.error_count(), 3);
    assert_eq!(diagnostics.for_element("com.example.Hidden.x").count(), 3);
    assert!(set.lookup("com.example.Hidden").is_none());
    assert!(set.lookup("com.example.A").is_some());
}

#[test]
fn ModelBuilder___build___rejects_interface_and_enum_enclosures() {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.Api").with_kind(ClassKind::Interface),
        TypeDecl::class("com.example.Mode").with_kind(ClassKind::Enum),
    ];
    manifest.fields = vec![
        FieldFact::new("com.example.Api", "x", "int"),
        FieldFact::new("com.example.Mode", "y", "int"),
    ];

    let (set, diagnostics) = build(&manifest);

    assert!(set.is_empty());
    let messages: Vec<String> = diagnostics.iter().map(|d| d.message.clone()).collect();
    assert!(messages[0].contains("not in an interface"));
    assert!(messages[1].contains("not in an enum"));
}

#[test]
fn ModelBuilder___build___rejects_bad_keys_and_types() {
    let mut manifest = Manifest::default();
    manifest.fields = vec![
        FieldFact::new("com.example.A", "a", "int").with_key("not-a-key"),
        FieldFact::new("com.example.A", "b", "int").with_key("class"),
        FieldFact::new("com.example.A", "c", "java.util.List<"),
        FieldFact::new("com.example.A", "d", "com.example.Opaque"),
    ];

    let (set, diagnostics) = build(&manifest);

    assert_eq!(diagnostics.error_count(), 4);
    let kinds: Vec<&str> = diagnostics.iter().map(|d| d.element.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["com.example.A.a", "com.example.A.b", "com.example.A.c", "com.example.A.d"]
    );
    assert!(diagnostics.iter().nth(3).unwrap().message.contains("cannot be stored"));
    assert!(set.is_empty());
}

#[test]
fn ModelBuilder___build___records_classification() {
    let mut manifest = Manifest::default();
    manifest.types = vec![TypeDecl::class("com.example.Payload").parcel_marker()];
    manifest.fields = vec![
        FieldFact::new("com.example.A", "payload", "com.example.Payload"),
        FieldFact::new("com.example.A", "count", "int"),
    ];

    let (set, _) = build(&manifest);

    let id = set.lookup("com.example.A").unwrap();
    let payload = set.group(set.target(id).own_groups.get("payload").unwrap());
    assert!(payload.needs_wrap());
    assert_eq!(payload.primary().unwrap().accessor, BundleAccessor::Wrapped);
    let count = set.group(set.target(id).own_groups.get("count").unwrap());
    assert!(!count.needs_wrap());
}

#[test]
fn ModelBuilder___build___marks_generation_roots() {
    let mut manifest = Manifest::default();
    manifest.types = vec![TypeDecl::class("com.example.Model").with_kind(ClassKind::Abstract)];
    manifest.fields = vec![FieldFact::new("com.example.Model", "id", "int")];
    manifest.targets = vec![
        TargetFact::new("com.example.DetailActivity", "com.example.Model"),
        TargetFact::new("com.example.EmptyActivity", ""),
    ];

    let (set, diagnostics) = build(&manifest);

    assert!(diagnostics.is_empty());
    let model = set.by_name("com.example.Model").unwrap();
    assert!(model.is_abstract);
    assert_eq!(
        model.launch_class.as_deref(),
        Some("com.example.DetailActivity")
    );
    let empty = set.by_name("com.example.EmptyActivity").unwrap();
    assert!(empty.is_generation_root());
    assert!(empty.own_groups.is_empty());
}

#[test]
fn ModelBuilder___build___duplicate_association_keeps_first() {
    let mut manifest = Manifest::default();
    manifest.targets = vec![
        TargetFact::new("com.example.FirstActivity", "com.example.Model"),
        TargetFact::new("com.example.FirstActivity", "com.example.Model"),
        TargetFact::new("com.example.SecondActivity", "com.example.Model"),
    ];

    let (set, diagnostics) = build(&manifest);

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        set.by_name("com.example.Model").unwrap().launch_class.as_deref(),
        Some("com.example.FirstActivity")
    );
}
