//! Language-neutral plans lowered from the resolved binding model
//!
//! A [`BuilderPlan`] is the type-state machine of one builder: the chain of
//! required states, each with exactly one transition, the optional stage and
//! how the initial state is reached. An [`InjectionPlan`] is the ordered list
//! of lookups the extraction routine performs. The Java emitters render these
//! plans verbatim; tests assert on them directly.

use crate::classify::BundleAccessor;
use crate::model::{BindingSet, ExtraGroup, TargetId};
use crate::naming::state_class_name;
use extrabind_runtime::{ExtractionDescriptor, GroupDescriptor};
use serde::Serialize;
use std::collections::HashMap;

/// Name of the state the last required setter returns
pub const ALL_SET: &str = "AllSet";

/// Name of the first required state
pub const REQUIRED_SEQUENCE: &str = "RequiredSequence";

pub const INITIAL_STATE: &str = "InitialState";

/// One builder setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetterPlan {
    pub key: String,
    /// Java parameter type, primitives boxed
    pub value_type: String,
    pub accessor: BundleAccessor,
}

impl SetterPlan {
    fn from_group(group: &ExtraGroup) -> Option<Self> {
        let primary = group.primary()?;
        Some(Self {
            key: group.key.clone(),
            value_type: primary.ty.boxed().java_source(),
            accessor: primary.accessor,
        })
    }
}

/// A required state and its single transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatePlan {
    pub name: String,
    pub setter: SetterPlan,
    /// The state the setter returns; [`ALL_SET`] for the last one
    pub next: String,
}

/// How `InitialState` is obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialState {
    /// Starts this builder's own required sequence
    Sequence,
    /// Starts an ancestor's required sequence, landing in this builder's `AllSet`
    Delegated {
        ancestor: String,
        /// Qualified name of the ancestor's builder
        builder: String,
    },
    /// No required extra anywhere in the ancestry
    AllSet,
}

/// The type-state machine of one builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderPlan {
    pub target: String,
    pub namespace: String,
    pub builder_name: String,
    /// Class the built container is addressed to; `None` for sequence-only builders
    pub launch_class: Option<String>,
    pub initial: InitialState,
    /// Required states, first to last; empty unless `initial` is `Sequence`
    pub states: Vec<StatePlan>,
    /// Keys set, in order, on the way to `AllSet`
    pub chain: Vec<String>,
    /// Setters of the optional stage, sorted by key
    pub optional: Vec<SetterPlan>,
}

impl BuilderPlan {
    /// Lower the full builder of a generation root
    pub fn lower(set: &BindingSet, id: TargetId) -> Self {
        let target = set.target(id);
        let required = set.required_groups(id);
        let mut optional = set.optional_groups(id);

        let (initial, states, chain) = if target.has_required_fields {
            let states = required_states(&required);
            let chain = keys(&required);
            (InitialState::Sequence, states, chain)
        } else if let Some(ancestor) = target.closest_required_ancestor {
            let ancestor_target = set.target(ancestor);
            let chain = keys(&set.required_groups(ancestor));
            optional.retain(|g| !chain.contains(&g.key));
            let initial = InitialState::Delegated {
                ancestor: ancestor_target.canonical_name.clone(),
                builder: ancestor_target.qualified_builder_name(),
            };
            (initial, Vec::new(), chain)
        } else {
            (InitialState::AllSet, Vec::new(), Vec::new())
        };

        Self {
            target: target.canonical_name.clone(),
            namespace: target.namespace.clone(),
            builder_name: target.builder_name(),
            launch_class: target.launch_class.clone(),
            initial,
            states,
            chain,
            optional: optional.into_iter().filter_map(SetterPlan::from_group).collect(),
        }
    }

    /// Lower only the shared required sequence of an ancestor
    pub fn lower_sequence(set: &BindingSet, id: TargetId) -> Self {
        let target = set.target(id);
        let required = set.required_groups(id);
        Self {
            target: target.canonical_name.clone(),
            namespace: target.namespace.clone(),
            builder_name: target.builder_name(),
            launch_class: None,
            initial: InitialState::Sequence,
            states: required_states(&required),
            chain: keys(&required),
            optional: Vec::new(),
        }
    }

    pub fn is_sequence_only(&self) -> bool {
        self.launch_class.is_none()
    }

    /// Distinct states on the required path, `AllSet` included
    pub fn state_count(&self) -> usize {
        self.chain.len() + 1
    }

    /// Method names of the required chain, in call order
    pub fn chain_methods(&self) -> Vec<&str> {
        self.chain.iter().map(String::as_str).collect()
    }

    /// Two required keys that name the same intermediate state, as
    /// `(first key, second key, state name)`
    pub fn state_name_collision(&self) -> Option<(String, String, String)> {
        let mut named: HashMap<&str, &str> = HashMap::new();
        for pair in self.states.windows(2) {
            let (key, state) = (pair[0].setter.key.as_str(), pair[1].name.as_str());
            if let Some(first) = named.insert(state, key) {
                return Some((first.to_string(), key.to_string(), state.to_string()));
            }
        }
        None
    }
}

fn keys(groups: &[&ExtraGroup]) -> Vec<String> {
    groups.iter().map(|g| g.key.clone()).collect()
}

/// `RequiredSequence` sets the first key; each `AfterSetting<Key>` sets the next
fn required_states(required: &[&ExtraGroup]) -> Vec<StatePlan> {
    let setters: Vec<SetterPlan> = required
        .iter()
        .filter_map(|g| SetterPlan::from_group(g))
        .collect();
    setters
        .iter()
        .enumerate()
        .map(|(i, setter)| {
            let name = match i {
                0 => REQUIRED_SEQUENCE.to_string(),
                _ => state_class_name(&setters[i - 1].key),
            };
            let next = match setters.get(i + 1) {
                Some(_) => state_class_name(&setter.key),
                None => ALL_SET.to_string(),
            };
            StatePlan {
                name,
                setter: setter.clone(),
                next,
            }
        })
        .collect()
}

/// One field assignment of the extraction routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentPlan {
    pub field: String,
    /// Java type the looked-up value is cast to
    pub cast_type: String,
    pub wrapped: bool,
}

/// One key lookup of the extraction routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupPlan {
    pub key: String,
    pub required: bool,
    pub assignments: Vec<AssignmentPlan>,
}

impl LookupPlan {
    fn from_group(group: &ExtraGroup) -> Self {
        Self {
            key: group.key.clone(),
            required: group.is_required(),
            assignments: group
                .bindings()
                .iter()
                .map(|b| AssignmentPlan {
                    field: b.name.clone(),
                    cast_type: b.ty.boxed().java_source(),
                    wrapped: b.needs_wrap,
                })
                .collect(),
        }
    }

    fn to_descriptor(&self) -> GroupDescriptor {
        GroupDescriptor {
            key: self.key.clone(),
            fields: self.assignments.iter().map(|a| a.field.clone()).collect(),
            required: self.required,
            wrapped: self.assignments.iter().any(|a| a.wrapped),
        }
    }
}

/// The extraction routine of one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionPlan {
    pub target: String,
    pub namespace: String,
    pub binder_name: String,
    /// Qualified binder of the parent target, invoked first
    pub parent_binder: Option<String>,
    /// Lookups for the target's own groups, in declaration order
    pub lookups: Vec<LookupPlan>,
    /// Lookups the ancestor binders perform, root first
    pub inherited: Vec<LookupPlan>,
}

impl InjectionPlan {
    pub fn lower(set: &BindingSet, id: TargetId) -> Self {
        let target = set.target(id);
        let mut inherited = Vec::new();
        for ancestor in set.ancestors(id).into_iter().rev() {
            inherited.extend(set.own_groups(ancestor).map(LookupPlan::from_group));
        }
        Self {
            target: target.canonical_name.clone(),
            namespace: target.namespace.clone(),
            binder_name: target.binder_name(),
            parent_binder: target
                .parent
                .map(|parent| set.target(parent).qualified_binder_name()),
            lookups: set.own_groups(id).map(LookupPlan::from_group).collect(),
            inherited,
        }
    }

    /// Descriptor for a binder performing the same lookups, ancestors first
    pub fn to_descriptor(&self) -> ExtractionDescriptor {
        ExtractionDescriptor {
            target: self.target.clone(),
            groups: self
                .inherited
                .iter()
                .chain(&self.lookups)
                .map(LookupPlan::to_descriptor)
                .collect(),
        }
    }
}
