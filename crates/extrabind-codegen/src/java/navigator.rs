//! Navigator facade and binder dispatch table emission

use super::{GeneratedSource, RUNTIME_PACKAGE, SourceWriter};
use crate::navigator::NavigatorPlan;
use crate::plan::InjectionPlan;

/// Simple name of the generated dispatch table
pub const DISPATCH_TABLE: &str = "ExtraBinders";

pub fn generate_navigator(plan: &NavigatorPlan) -> GeneratedSource {
    let mut w = SourceWriter::unit(&plan.namespace);

    w.open(&format!("public class {}", plan.name));
    w.open(&format!("private {}()", plan.name));
    w.close();
    for entry in &plan.entries {
        w.blank();
        w.open(&format!(
            "public static {} {}(android.content.Context context)",
            entry.return_type(),
            entry.method
        ));
        w.line(&format!(
            "return new {}(context).getInitialState();",
            entry.builder
        ));
        w.close();
    }
    w.close();

    GeneratedSource {
        namespace: plan.namespace.clone(),
        type_name: plan.name.clone(),
        origin: plan.name.clone(),
        contents: w.finish(),
    }
}

/// Static registration of every generated binder, in place of lookup by name
pub fn generate_dispatch_table(namespace: &str, binders: &[InjectionPlan]) -> GeneratedSource {
    let mut sorted: Vec<&InjectionPlan> = binders.iter().collect();
    sorted.sort_by(|a, b| a.target.cmp(&b.target));

    let mut w = SourceWriter::unit(namespace);
    w.open(&format!("public final class {DISPATCH_TABLE}"));
    w.open(&format!("private {DISPATCH_TABLE}()"));
    w.close();
    w.blank();
    w.open(&format!(
        "public static void registerAll({RUNTIME_PACKAGE}.BinderRegistry registry)"
    ));
    for plan in sorted {
        let binder = crate::naming::qualified(&plan.namespace, &plan.binder_name);
        w.line(&format!("registry.register({binder}.INSTANCE);"));
    }
    w.close();
    w.close();

    GeneratedSource {
        namespace: namespace.to_string(),
        type_name: DISPATCH_TABLE.to_string(),
        origin: DISPATCH_TABLE.to_string(),
        contents: w.finish(),
    }
}
