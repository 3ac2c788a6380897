//! Navigator aggregation: one facade entry point per generation root

use crate::model::BindingSet;
use crate::naming::to_pascal_case;
use crate::options::GeneratorOptions;
use crate::plan::INITIAL_STATE;
use serde::Serialize;
use std::collections::HashMap;

/// Longest namespace that is a whole-segment prefix of every namespace.
///
/// Starts from the first namespace and drops its last segment until every
/// other namespace starts with it. Empty input or no shared segment yields
/// the default (empty) namespace.
pub fn common_namespace<S: AsRef<str>>(namespaces: &[S]) -> String {
    let Some(first) = namespaces.first() else {
        return String::new();
    };
    let mut candidate: Vec<&str> = first.as_ref().split('.').filter(|s| !s.is_empty()).collect();
    while !candidate.is_empty() {
        let prefix = candidate.join(".");
        if namespaces
            .iter()
            .all(|ns| is_segment_prefix(&prefix, ns.as_ref()))
        {
            return prefix;
        }
        candidate.pop();
    }
    String::new()
}

fn is_segment_prefix(prefix: &str, namespace: &str) -> bool {
    namespace == prefix
        || namespace
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// One `gotoX(context)` method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigatorEntry {
    pub method: String,
    pub target: String,
    /// Qualified name of the builder whose `InitialState` is returned
    pub builder: String,
}

impl NavigatorEntry {
    /// Qualified return type of the method
    pub fn return_type(&self) -> String {
        format!("{}.{INITIAL_STATE}", self.builder)
    }
}

/// The navigator facade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigatorPlan {
    pub namespace: String,
    pub name: String,
    /// Sorted by method name
    pub entries: Vec<NavigatorEntry>,
}

impl NavigatorPlan {
    pub fn lower(set: &BindingSet, options: &GeneratorOptions) -> Self {
        let roots: Vec<_> = set.generation_roots().collect();

        let namespace = match &options.navigator_namespace {
            Some(namespace) => namespace.clone(),
            None => {
                let namespaces: Vec<&str> = roots.iter().map(|t| t.namespace.as_str()).collect();
                common_namespace(&namespaces)
            }
        };

        let base_name = |simple_name: &str| format!("goto{}", simple_name.replace('$', ""));
        let mut counts: HashMap<String, usize> = HashMap::new();
        for target in &roots {
            *counts.entry(base_name(&target.simple_name)).or_default() += 1;
        }

        let mut entries: Vec<NavigatorEntry> = roots
            .iter()
            .map(|target| {
                let base = base_name(&target.simple_name);
                let method = if counts.get(&base).copied().unwrap_or_default() > 1 {
                    format!(
                        "goto{}{}",
                        to_pascal_case(&target.namespace),
                        target.simple_name.replace('$', "")
                    )
                } else {
                    base
                };
                NavigatorEntry {
                    method,
                    target: target.canonical_name.clone(),
                    builder: target.qualified_builder_name(),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.method.cmp(&b.method).then_with(|| a.target.cmp(&b.target)));

        Self {
            namespace,
            name: options.navigator_name.clone(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
