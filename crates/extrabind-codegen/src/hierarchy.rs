//! Inheritance resolver
//!
//! Links binding targets into a forest along their declared superclasses,
//! pushes groups down from roots to leaves, and computes each target's closest
//! required ancestor.

use crate::error::{Diagnostics, ModelError};
use crate::model::{BindingSet, GroupId, TargetId};
use crate::oracle::TypeOracle;
use std::collections::HashSet;
use tracing::debug;

/// Link, merge and annotate every target in `set`
pub fn resolve(set: &mut BindingSet, oracle: &dyn TypeOracle, diagnostics: &mut Diagnostics) {
    link(set, oracle, diagnostics);
    let order = topological_order(set);
    for &id in &order {
        let has_required = set.own_groups(id).any(|g| g.is_required());
        set.target_mut(id).has_required_fields = has_required;
    }
    merge(set, &order);
    compute_closest_required_ancestors(set, &order);
}

/// Walk each target's superclass chain until another target is found
fn link(set: &mut BindingSet, oracle: &dyn TypeOracle, diagnostics: &mut Diagnostics) {
    let ids: Vec<TargetId> = set.ids().collect();
    for id in ids {
        let canonical = set.target(id).canonical_name.clone();
        let mut visited = HashSet::from([canonical.clone()]);
        let mut current = canonical.clone();

        let parent = loop {
            let Some(superclass) = oracle.superclass(&current) else {
                break None;
            };
            if !visited.insert(superclass.clone()) {
                diagnostics.model(ModelError::CyclicHierarchy {
                    class: canonical.clone(),
                    through: superclass,
                });
                break None;
            }
            if let Some(parent) = set.lookup(&superclass) {
                break Some(parent);
            }
            current = superclass;
        };

        let Some(parent) = parent else {
            continue;
        };
        if closes_cycle(set, id, parent) {
            diagnostics.model(ModelError::CyclicHierarchy {
                class: canonical,
                through: set.target(parent).canonical_name.clone(),
            });
            continue;
        }
        set.target_mut(id).parent = Some(parent);
        set.target_mut(parent).children.push(id);
        debug!(
            child = %set.target(id).canonical_name,
            parent = %set.target(parent).canonical_name,
            "linked targets"
        );
    }
}

/// Whether making `parent` the parent of `child` would loop back to `child`
fn closes_cycle(set: &BindingSet, child: TargetId, parent: TargetId) -> bool {
    parent == child || set.ancestors(parent).contains(&child)
}

/// Every target, each after its parent; roots in discovery order
pub fn topological_order(set: &BindingSet) -> Vec<TargetId> {
    let mut order = Vec::with_capacity(set.len());
    let mut stack: Vec<TargetId> = set
        .ids()
        .filter(|&id| set.target(id).parent.is_none())
        .collect();
    stack.reverse();
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(set.target(id).children.iter().rev().copied());
    }
    order
}

/// Adopt every inherited group.
///
/// A key the child declares again gets one merged group holding the
/// inherited bindings and the child's own, so it is required if any of them
/// is. The child's own group stays as declared for extraction.
fn merge(set: &mut BindingSet, order: &[TargetId]) {
    for &id in order {
        let Some(parent) = set.target(id).parent else {
            continue;
        };
        let inherited: Vec<(String, GroupId)> = set
            .target(parent)
            .merged_groups
            .iter()
            .map(|(key, group)| (key.to_string(), group))
            .collect();
        for (key, group) in inherited {
            let merged = match set.target(id).own_groups.get(&key) {
                Some(own) => set.combine_groups(&key, &[group, own]),
                None => group,
            };
            set.target_mut(id).merged_groups.replace(&key, merged);
        }
    }
}

/// Nearest proper ancestor with required fields of its own
fn compute_closest_required_ancestors(set: &mut BindingSet, order: &[TargetId]) {
    for &id in order {
        let closest = set.target(id).parent.and_then(|parent| {
            let parent = set.target(parent);
            if parent.has_required_fields {
                Some(parent.id)
            } else {
                parent.closest_required_ancestor
            }
        });
        set.target_mut(id).closest_required_ancestor = closest;
    }
}

/// Targets that get generated code.
///
/// Every generation root is emitted in full. A closest required ancestor of
/// an emitted target that is not a root itself still needs its required
/// sequence, so it is listed as sequence-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionSet {
    pub roots: Vec<TargetId>,
    pub sequence_only: Vec<TargetId>,
}

impl EmissionSet {
    pub fn from_set(set: &BindingSet) -> Self {
        let roots: Vec<TargetId> = set
            .generation_roots()
            .map(|target| target.id)
            .collect();
        let mut sequence_only = Vec::new();
        for &id in &roots {
            let target = set.target(id);
            if target.has_required_fields {
                continue;
            }
            if let Some(ancestor) = target.closest_required_ancestor
                && !set.target(ancestor).is_generation_root()
                && !sequence_only.contains(&ancestor)
            {
                sequence_only.push(ancestor);
            }
        }
        sequence_only.sort();
        Self {
            roots,
            sequence_only,
        }
    }
}

#[cfg(test)]
#[path = "hierarchy/hierarchy_tests.rs"]
mod hierarchy_tests;
