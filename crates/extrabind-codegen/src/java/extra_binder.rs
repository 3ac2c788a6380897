//! Extraction routine emission
//!
//! Renders an [`InjectionPlan`] as a `Foo__ExtraBinder` implementing the
//! runtime `ExtraBinder<Foo>` interface. The parent binder runs first, then
//! each of the target's own keys is looked up once and assigned to every
//! field bound to it. `targetName()` gives the key the runtime registry
//! stores the binder under.

use super::{GeneratedSource, PARCELABLE, PARCELS, RUNTIME_PACKAGE, SourceWriter};
use crate::plan::{InjectionPlan, LookupPlan};
use extrabind_runtime::describe_fields;

pub fn generate_extra_binder(plan: &InjectionPlan) -> GeneratedSource {
    let mut w = SourceWriter::unit(&plan.namespace);
    let target = &plan.target;

    w.open(&format!(
        "public class {} implements {RUNTIME_PACKAGE}.ExtraBinder<{target}>",
        plan.binder_name
    ));
    w.line(&format!(
        "public static final {0} INSTANCE = new {0}();",
        plan.binder_name
    ));
    w.blank();
    w.line("@Override");
    w.open("public String targetName()");
    w.line(&format!("return \"{target}\";"));
    w.close();
    w.blank();
    w.line("@Override");
    w.open(&format!(
        "public void inject({RUNTIME_PACKAGE}.Finder finder, {target} target, Object source)"
    ));
    if let Some(parent) = &plan.parent_binder {
        w.line(&format!("{parent}.INSTANCE.inject(finder, target, source);"));
    }
    if !plan.lookups.is_empty() {
        w.line("Object object;");
    }
    for lookup in &plan.lookups {
        write_lookup(&mut w, lookup);
    }
    w.close();
    w.close();

    GeneratedSource {
        namespace: plan.namespace.clone(),
        type_name: plan.binder_name.clone(),
        origin: plan.target.clone(),
        contents: w.finish(),
    }
}

/// The exception message for a missing required key
pub fn missing_extra_message(lookup: &LookupPlan) -> String {
    let fields: Vec<&str> = lookup.assignments.iter().map(|a| a.field.as_str()).collect();
    format!(
        "Required extra with key '{}' for {} was not found. \
         If this extra is optional, mark the field as nullable.",
        lookup.key,
        describe_fields(&fields)
    )
}

fn write_lookup(w: &mut SourceWriter, lookup: &LookupPlan) {
    w.line(&format!("object = finder.getExtra(source, \"{}\");", lookup.key));
    if lookup.required {
        w.open("if (object == null)");
        w.line(&format!(
            "throw new {RUNTIME_PACKAGE}.RequiredExtraMissingException(\"{}\");",
            escape(&missing_extra_message(lookup))
        ));
        w.close();
        write_assignments(w, lookup);
    } else {
        w.open("if (object != null)");
        write_assignments(w, lookup);
        w.close();
    }
}

fn write_assignments(w: &mut SourceWriter, lookup: &LookupPlan) {
    for assignment in &lookup.assignments {
        let value = if assignment.wrapped {
            format!("{PARCELS}.unwrap(({PARCELABLE}) object)")
        } else {
            format!("({}) object", assignment.cast_type)
        };
        w.line(&format!("target.{} = {value};", assignment.field));
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
