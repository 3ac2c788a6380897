#![allow(non_snake_case)]

use super::*;
use crate::binding::ModelBuilder;
use crate::facts::{FieldFact, Manifest, TargetFact, TypeDecl};
use crate::oracle::ManifestOracle;

fn resolved(manifest: &Manifest) -> (BindingSet, Diagnostics) {
    let oracle = ManifestOracle::new(&manifest.types);
    let mut diagnostics = Diagnostics::new();
    let mut set = ModelBuilder::new(&oracle).build(manifest, &mut diagnostics);
    resolve(&mut set, &oracle, &mut diagnostics);
    (set, diagnostics)
}

/// A(id required, note optional) <- B(flag required)
fn scenario() -> Manifest {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.A"),
        TypeDecl::class("com.example.B").extending("com.example.A"),
    ];
    manifest.fields = vec![
        FieldFact::new("com.example.A", "id", "int"),
        FieldFact::new("com.example.A", "note", "java.lang.String").optional(),
        FieldFact::new("com.example.B", "flag", "boolean"),
    ];
    manifest
}

#[test]
fn resolve___links_parent_and_children() {
    let (set, diagnostics) = resolved(&scenario());

    assert!(diagnostics.is_empty());
    let a = set.lookup("com.example.A").unwrap();
    let b = set.lookup("com.example.B").unwrap();
    assert_eq!(set.target(b).parent, Some(a));
    assert_eq!(set.target(a).children, vec![b]);
    assert_eq!(set.target(a).parent, None);
}

#[test]
fn resolve___merged_groups_are_adopted_by_reference() {
    let (set, _) = resolved(&scenario());
    let a = set.by_name("com.example.A").unwrap();
    let b = set.by_name("com.example.B").unwrap();

    for (key, group) in a.merged_groups.iter() {
        assert_eq!(b.merged_groups.get(key), Some(group));
    }
    assert_eq!(b.merged_groups.len(), 3);
    assert_eq!(b.own_groups.len(), 1);
}

#[test]
fn resolve___redeclared_key_merges_parent_and_own_bindings() {
    let mut manifest = scenario();
    manifest
        .fields
        .push(FieldFact::new("com.example.B", "otherNote", "java.lang.String").with_key("note"));

    let (set, _) = resolved(&manifest);
    let b = set.lookup("com.example.B").unwrap();
    let target = set.target(b);
    let merged = set.group(target.merged_groups.get("note").unwrap());
    let own = set.group(target.own_groups.get("note").unwrap());

    assert_eq!(merged.field_names(), vec!["note", "otherNote"]);
    assert_eq!(own.field_names(), vec!["otherNote"]);
    assert_eq!(target.merged_groups.len(), 3);
}

#[test]
fn resolve___redeclared_optional_key_stays_required() {
    let mut manifest = scenario();
    manifest.fields.push(
        FieldFact::new("com.example.B", "otherId", "int")
            .with_key("id")
            .optional(),
    );

    let (set, _) = resolved(&manifest);
    let b = set.lookup("com.example.B").unwrap();

    let required: Vec<&str> = set
        .required_groups(b)
        .iter()
        .map(|g| g.key.as_str())
        .collect();
    assert_eq!(required, vec!["flag", "id"]);
    assert!(set.optional_groups(b).iter().all(|g| g.key != "id"));
}

#[test]
fn resolve___redeclared_key_reaches_grandchildren() {
    let mut manifest = scenario();
    manifest
        .types
        .push(TypeDecl::class("com.example.C").extending("com.example.B"));
    manifest.fields.extend([
        FieldFact::new("com.example.B", "otherId", "int").with_key("id").optional(),
        FieldFact::new("com.example.C", "tag", "java.lang.String").optional(),
    ]);

    let (set, _) = resolved(&manifest);
    let b = set.by_name("com.example.B").unwrap();
    let c = set.by_name("com.example.C").unwrap();

    assert_eq!(c.merged_groups.get("id"), b.merged_groups.get("id"));
    let id = set.group(c.merged_groups.get("id").unwrap());
    assert!(id.is_required());
    assert_eq!(id.field_names(), vec!["id", "otherId"]);
}

#[test]
fn resolve___shadowing_field_keeps_both_bindings() {
    let mut manifest = scenario();
    manifest
        .fields
        .push(FieldFact::new("com.example.B", "note", "java.lang.String"));

    let (set, _) = resolved(&manifest);
    let b = set.by_name("com.example.B").unwrap();
    let note = set.group(b.merged_groups.get("note").unwrap());

    assert_eq!(note.bindings().len(), 2);
    assert!(note.is_required());
}

#[test]
fn resolve___skips_intermediate_non_targets() {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.Root"),
        TypeDecl::class("com.example.Middle").extending("com.example.Root"),
        TypeDecl::class("com.example.Leaf").extending("com.example.Middle"),
    ];
    manifest.fields = vec![
        FieldFact::new("com.example.Root", "id", "int"),
        FieldFact::new("com.example.Leaf", "tag", "java.lang.String").optional(),
    ];

    let (set, _) = resolved(&manifest);

    let root = set.lookup("com.example.Root").unwrap();
    let leaf = set.by_name("com.example.Leaf").unwrap();
    assert_eq!(leaf.parent, Some(root));
    assert_eq!(leaf.closest_required_ancestor, Some(root));
    assert!(leaf.merged_groups.contains("id"));
}

#[test]
fn resolve___closest_required_ancestor_skips_optional_only_parents() {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.A"),
        TypeDecl::class("com.example.B").extending("com.example.A"),
        TypeDecl::class("com.example.C").extending("com.example.B"),
        TypeDecl::class("com.example.D").extending("com.example.C"),
    ];
    manifest.fields = vec![
        FieldFact::new("com.example.A", "id", "int"),
        FieldFact::new("com.example.B", "note", "java.lang.String").optional(),
        FieldFact::new("com.example.C", "flag", "boolean"),
        FieldFact::new("com.example.D", "tag", "java.lang.String").optional(),
    ];

    let (set, _) = resolved(&manifest);
    let id = |name: &str| set.lookup(name).unwrap();

    assert_eq!(set.target(id("com.example.A")).closest_required_ancestor, None);
    assert_eq!(
        set.target(id("com.example.B")).closest_required_ancestor,
        Some(id("com.example.A"))
    );
    assert_eq!(
        set.target(id("com.example.C")).closest_required_ancestor,
        Some(id("com.example.A"))
    );
    assert_eq!(
        set.target(id("com.example.D")).closest_required_ancestor,
        Some(id("com.example.C"))
    );
    assert!(!set.target(id("com.example.B")).has_required_fields);
}

#[test]
fn resolve___cyclic_targets_are_reported_and_cut() {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.A").extending("com.example.B"),
        TypeDecl::class("com.example.B").extending("com.example.A"),
    ];
    manifest.fields = vec![
        FieldFact::new("com.example.A", "a", "int"),
        FieldFact::new("com.example.B", "b", "int"),
    ];

    let (set, diagnostics) = resolved(&manifest);

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(topological_order(&set).len(), 2);
    let roots = set.targets().filter(|t| t.parent.is_none()).count();
    assert_eq!(roots, 1);
}

#[test]
fn resolve___cycle_outside_targets_makes_a_root() {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.A").extending("com.example.X"),
        TypeDecl::class("com.example.X").extending("com.example.Y"),
        TypeDecl::class("com.example.Y").extending("com.example.X"),
    ];
    manifest.fields = vec![FieldFact::new("com.example.A", "a", "int")];

    let (set, diagnostics) = resolved(&manifest);

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(set.by_name("com.example.A").unwrap().parent, None);
}

#[test]
fn topological_order___parents_before_children() {
    let (set, _) = resolved(&scenario());
    let order = topological_order(&set);

    let position = |name: &str| {
        let id = set.lookup(name).unwrap();
        order.iter().position(|&o| o == id).unwrap()
    };
    assert!(position("com.example.A") < position("com.example.B"));
}

#[test]
fn EmissionSet___from_set___lists_roots_and_sequence_only_ancestors() {
    let mut manifest = Manifest::default();
    manifest.types = vec![
        TypeDecl::class("com.example.Base"),
        TypeDecl::class("com.example.Detail").extending("com.example.Base"),
        TypeDecl::class("com.example.Own").extending("com.example.Base"),
    ];
    manifest.fields = vec![
        FieldFact::new("com.example.Base", "id", "int"),
        FieldFact::new("com.example.Detail", "note", "java.lang.String").optional(),
        FieldFact::new("com.example.Own", "flag", "boolean"),
    ];
    manifest.targets = vec![
        TargetFact::new("com.example.DetailActivity", "com.example.Detail"),
        TargetFact::new("com.example.OwnActivity", "com.example.Own"),
    ];

    let (set, _) = resolved(&manifest);
    let emission = EmissionSet::from_set(&set);

    let names = |ids: &[TargetId]| -> Vec<String> {
        ids.iter().map(|&id| set.target(id).canonical_name.clone()).collect()
    };
    assert_eq!(names(&emission.roots), vec!["com.example.Detail", "com.example.Own"]);
    assert_eq!(names(&emission.sequence_only), vec!["com.example.Base"]);
}
