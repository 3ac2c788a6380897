//! Type-state builder emission
//!
//! Renders a [`BuilderPlan`] as `Foo__IntentBuilder` with nested state
//! classes. For a target with required keys `flag` and `id` and optional key
//! `note`:
//!
//! ```text
//! InitialState ─flag()→ AfterSettingFlag ─id()→ AllSet ─note()↺ ─build()→ Intent
//! ```
//!
//! `RequiredSequence` and the `AfterSetting*` states are generic over the
//! `AllSet` they land in, so a descendant without required keys of its own
//! reuses its ancestor's sequence and lands in its own `AllSet`.

use super::{GeneratedSource, PARCELABLE, PARCELS, RUNTIME_PACKAGE, SourceWriter};
use crate::classify::BundleAccessor;
use crate::plan::{
    ALL_SET, BuilderPlan, INITIAL_STATE, InitialState, REQUIRED_SEQUENCE, SetterPlan, StatePlan,
};

const INTENT: &str = "android.content.Intent";
const CONTEXT: &str = "android.content.Context";

pub fn generate_intent_builder(plan: &BuilderPlan) -> GeneratedSource {
    let bundler = format!("{RUNTIME_PACKAGE}.Bundler");
    let mut w = SourceWriter::unit(&plan.namespace);

    w.open(&format!("public class {}", plan.builder_name));
    if let Some(launch_class) = &plan.launch_class {
        w.line(&format!("private final {INTENT} intent;"));
        w.line(&format!("private final {bundler} bundler = {bundler}.create();"));
        w.blank();
        w.open(&format!("public {}({CONTEXT} context)", plan.builder_name));
        w.line(&format!("intent = new {INTENT}(context, {launch_class}.class);"));
        w.close();
        w.blank();
        w.open(&format!("public {INITIAL_STATE} getInitialState()"));
        w.line(&format!("return new {INITIAL_STATE}(bundler, intent);"));
        w.close();
        w.blank();
        write_all_set(&mut w, plan, &bundler);
    }

    for state in &plan.states {
        w.blank();
        write_state(&mut w, state, &bundler);
    }

    if plan.launch_class.is_some() {
        w.blank();
        write_initial_state(&mut w, plan, &bundler);
    }
    w.close();

    GeneratedSource {
        namespace: plan.namespace.clone(),
        type_name: plan.builder_name.clone(),
        origin: plan.target.clone(),
        contents: w.finish(),
    }
}

/// The statement storing `value` under the setter's key
pub fn store_statement(setter: &SetterPlan, value: &str) -> String {
    let method = setter.accessor.put_method();
    let stored = match setter.accessor {
        BundleAccessor::Parcelable => format!("({PARCELABLE}) {value}"),
        BundleAccessor::Wrapped => format!("{PARCELS}.wrap({value})"),
        _ => value.to_string(),
    };
    format!("bundler.{method}(\"{}\", {stored});", setter.key)
}

fn write_all_set(w: &mut SourceWriter, plan: &BuilderPlan, bundler: &str) {
    w.open(&format!("public static class {ALL_SET}"));
    w.line(&format!("private final {bundler} bundler;"));
    w.line(&format!("private final {INTENT} intent;"));
    w.blank();
    w.open(&format!("public {ALL_SET}({bundler} bundler, {INTENT} intent)"));
    w.line("this.bundler = bundler;");
    w.line("this.intent = intent;");
    w.close();

    for setter in &plan.optional {
        w.blank();
        w.open(&format!("public {ALL_SET} {}({} value)", setter.key, setter.value_type));
        w.line(&store_statement(setter, "value"));
        w.line("return this;");
        w.close();
    }

    w.blank();
    w.open(&format!("public {INTENT} build()"));
    w.line("intent.putExtras(bundler.get());");
    w.line("return intent;");
    w.close();
    w.close();
}

fn write_state(w: &mut SourceWriter, state: &StatePlan, bundler: &str) {
    w.open(&format!("public static class {}<ALL_SET>", state.name));
    w.line(&format!("private final {bundler} bundler;"));
    w.line("private final ALL_SET allSetState;");
    w.blank();
    w.open(&format!("public {}({bundler} bundler, ALL_SET allSetState)", state.name));
    w.line("this.bundler = bundler;");
    w.line("this.allSetState = allSetState;");
    w.close();
    w.blank();

    let setter = &state.setter;
    let returns = if state.next == ALL_SET {
        "ALL_SET".to_string()
    } else {
        format!("{}<ALL_SET>", state.next)
    };
    w.open(&format!("public {returns} {}({} value)", setter.key, setter.value_type));
    w.line(&store_statement(setter, "value"));
    if state.next == ALL_SET {
        w.line("return allSetState;");
    } else {
        w.line(&format!("return new {}<>(bundler, allSetState);", state.next));
    }
    w.close();
    w.close();
}

fn write_initial_state(w: &mut SourceWriter, plan: &BuilderPlan, bundler: &str) {
    let (supertype, init) = match &plan.initial {
        InitialState::Sequence => (
            format!("{REQUIRED_SEQUENCE}<{ALL_SET}>"),
            format!("super(bundler, new {ALL_SET}(bundler, intent));"),
        ),
        InitialState::Delegated { builder, .. } => (
            format!("{builder}.{REQUIRED_SEQUENCE}<{ALL_SET}>"),
            format!("super(bundler, new {ALL_SET}(bundler, intent));"),
        ),
        InitialState::AllSet => (ALL_SET.to_string(), "super(bundler, intent);".to_string()),
    };
    w.open(&format!("public static class {INITIAL_STATE} extends {supertype}"));
    w.open(&format!("public {INITIAL_STATE}({bundler} bundler, {INTENT} intent)"));
    w.line(&init);
    w.close();
    w.close();
}

#[cfg(test)]
#[path = "intent_builder/intent_builder_tests.rs"]
mod intent_builder_tests;
