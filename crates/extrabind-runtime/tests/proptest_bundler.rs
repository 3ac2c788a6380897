//! Property-based tests for the bundler and dynamic binder
//!
//! Optional setters store into distinct keys, so applying them in any order
//! must produce the same bundle, and whatever a bundler stores must come back
//! out of a binder reading the same keys.

use extrabind_runtime::{
    Bundle, Bundler, DynamicBinder, ExtraBinder, ExtraValue, ExtractionDescriptor, FieldMap,
    Finder, GroupDescriptor,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

// Strategy: simple extra values (no floats, so equality is exact)
fn arb_extra_value() -> impl Strategy<Value = ExtraValue> {
    prop_oneof![
        any::<bool>().prop_map(ExtraValue::Boolean),
        any::<i32>().prop_map(ExtraValue::Int),
        any::<i64>().prop_map(ExtraValue::Long),
        "[a-zA-Z0-9 ]{0,16}".prop_map(ExtraValue::String),
    ]
}

// Strategy: distinct identifier-like keys mapped to values
fn arb_extras() -> impl Strategy<Value = BTreeMap<String, ExtraValue>> {
    prop::collection::btree_map("[a-z][a-zA-Z0-9]{0,7}", arb_extra_value(), 0..8)
}

fn build(entries: &[(String, ExtraValue)]) -> Bundle {
    entries
        .iter()
        .fold(Bundler::create(), |bundler, (key, value)| {
            bundler.put(key, value.clone())
        })
        .get()
}

proptest! {
    /// Property: setters on distinct keys commute
    #[test]
    fn proptest_setters_commute(
        (extras, shuffled) in arb_extras().prop_flat_map(|extras| {
            let entries: Vec<(String, ExtraValue)> = extras.clone().into_iter().collect();
            (Just(extras), Just(entries).prop_shuffle())
        })
    ) {
        let in_order: Vec<(String, ExtraValue)> = extras.into_iter().collect();

        prop_assert_eq!(build(&in_order), build(&shuffled));
    }

    /// Property: values stored by a bundler come back out of a binder
    #[test]
    fn proptest_bundler_binder_roundtrip(extras in arb_extras()) {
        let entries: Vec<(String, ExtraValue)> = extras.clone().into_iter().collect();
        let bundle = build(&entries);
        let binder = DynamicBinder::new(ExtractionDescriptor {
            target: "com.example.Any".to_string(),
            groups: extras
                .keys()
                .map(|key| GroupDescriptor {
                    key: key.clone(),
                    fields: vec![key.clone()],
                    required: true,
                    wrapped: false,
                })
                .collect(),
        });
        let mut target = FieldMap::new();

        binder
            .inject(Finder::Bundle, &mut target, &bundle)
            .expect("every required key was stored");

        for (key, value) in &extras {
            prop_assert_eq!(target.get(key), Some(value));
        }
    }

    /// Property: the JSON wire format is lossless
    #[test]
    fn proptest_bundle_wire_roundtrip(extras in arb_extras()) {
        let entries: Vec<(String, ExtraValue)> = extras.into_iter().collect();
        let bundle = build(&entries);

        let bytes = bundle.to_bytes().expect("Serialization should succeed");
        let recovered = Bundle::from_bytes(&bytes).expect("Deserialization should succeed");

        prop_assert_eq!(recovered, bundle);
    }
}
