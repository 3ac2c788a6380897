//! The binding model: targets, extra groups and field bindings
//!
//! Targets and groups live in two arenas owned by a [`BindingSet`]. A target's
//! key map stores [`GroupId`]s, so a descendant that inherits a key holds the
//! very group its ancestor declared rather than a copy.

use crate::classify::BundleAccessor;
use crate::naming;
use crate::types::TypeDescriptor;
use serde::Serialize;
use std::collections::HashMap;

/// Stable index of a target in its [`BindingSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetId(usize);

impl TargetId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Stable index of a group in its [`BindingSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupId(usize);

/// One annotated field, as bound to a key
#[derive(Debug, Clone, Serialize)]
pub struct FieldBinding {
    pub name: String,
    pub ty: TypeDescriptor,
    pub required: bool,
    /// Carried by the opaque transport
    pub needs_wrap: bool,
    pub accessor: BundleAccessor,
    pub declaring_class: String,
}

impl PartialEq for FieldBinding {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.declaring_class == other.declaring_class
    }
}

impl Eq for FieldBinding {}

impl PartialOrd for FieldBinding {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldBinding {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.declaring_class.cmp(&other.declaring_class))
    }
}

/// Every field bound to one key
#[derive(Debug, Clone, Serialize)]
pub struct ExtraGroup {
    pub key: String,
    /// Sorted by field name then declaring class, no duplicates
    bindings: Vec<FieldBinding>,
}

impl ExtraGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            bindings: Vec::new(),
        }
    }

    /// Add a binding; returns false if that field of that class is already bound
    pub fn add(&mut self, binding: FieldBinding) -> bool {
        match self.bindings.binary_search(&binding) {
            Ok(_) => false,
            Err(pos) => {
                self.bindings.insert(pos, binding);
                true
            }
        }
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Required iff at least one binding is
    pub fn is_required(&self) -> bool {
        self.bindings.iter().any(|b| b.required)
    }

    pub fn needs_wrap(&self) -> bool {
        self.bindings.iter().any(|b| b.needs_wrap)
    }

    /// The binding whose type the builder setter takes
    pub fn primary(&self) -> Option<&FieldBinding> {
        self.bindings.first()
    }

    pub fn field_names(&self) -> Vec<String> {
        self.bindings.iter().map(|b| b.name.clone()).collect()
    }
}

/// Insertion-ordered key → group map
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyedGroups {
    order: Vec<(String, GroupId)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl KeyedGroups {
    pub fn get(&self, key: &str) -> Option<GroupId> {
        self.index.get(key).map(|&i| self.order[i].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert unless the key is present; returns whether it was inserted
    pub fn insert(&mut self, key: &str, group: GroupId) -> bool {
        if self.contains(key) {
            return false;
        }
        self.index.insert(key.to_string(), self.order.len());
        self.order.push((key.to_string(), group));
        true
    }

    /// Point `key` at `group`, keeping its position if already present
    pub fn replace(&mut self, key: &str, group: GroupId) -> Option<GroupId> {
        match self.index.get(key) {
            Some(&i) => Some(std::mem::replace(&mut self.order[i].1, group)),
            None => {
                self.insert(key, group);
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, GroupId)> {
        self.order.iter().map(|(key, id)| (key.as_str(), *id))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// The compiled model of one class's extras
#[derive(Debug, Clone, Serialize)]
pub struct BindingTarget {
    pub id: TargetId,
    pub namespace: String,
    /// Nested simple name, outer classes joined with `$`
    pub simple_name: String,
    pub canonical_name: String,
    /// Recorded for library users of `Analysis::model`; lowering and emission
    /// treat abstract and concrete classes alike
    pub is_abstract: bool,
    /// Groups this class declares itself
    pub own_groups: KeyedGroups,
    /// Own groups plus everything inherited
    pub merged_groups: KeyedGroups,
    pub parent: Option<TargetId>,
    pub children: Vec<TargetId>,
    /// Computed from the class's own groups
    pub has_required_fields: bool,
    pub closest_required_ancestor: Option<TargetId>,
    /// Class the built container is addressed to; set on generation roots only
    pub launch_class: Option<String>,
}

impl BindingTarget {
    pub fn is_generation_root(&self) -> bool {
        self.launch_class.is_some()
    }

    pub fn builder_name(&self) -> String {
        format!("{}{}", self.simple_name, naming::BUILDER_SUFFIX)
    }

    pub fn binder_name(&self) -> String {
        format!("{}{}", self.simple_name, naming::BINDER_SUFFIX)
    }

    /// Fully qualified name of the generated builder
    pub fn qualified_builder_name(&self) -> String {
        naming::qualified(&self.namespace, &self.builder_name())
    }

    pub fn qualified_binder_name(&self) -> String {
        naming::qualified(&self.namespace, &self.binder_name())
    }
}

/// Arena of every target and group in one round
#[derive(Debug, Clone, Default, Serialize)]
pub struct BindingSet {
    targets: Vec<BindingTarget>,
    groups: Vec<ExtraGroup>,
    #[serde(skip)]
    by_name: HashMap<String, TargetId>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The target for `canonical_name`, created on first use
    pub fn get_or_create_target(&mut self, canonical_name: &str, is_abstract: bool) -> TargetId {
        if let Some(&id) = self.by_name.get(canonical_name) {
            return id;
        }
        let id = TargetId(self.targets.len());
        let (namespace, simple_name) = naming::split_canonical_name(canonical_name);
        self.targets.push(BindingTarget {
            id,
            namespace,
            simple_name,
            canonical_name: canonical_name.to_string(),
            is_abstract,
            own_groups: KeyedGroups::default(),
            merged_groups: KeyedGroups::default(),
            parent: None,
            children: Vec::new(),
            has_required_fields: false,
            closest_required_ancestor: None,
            launch_class: None,
        });
        self.by_name.insert(canonical_name.to_string(), id);
        id
    }

    /// The group `target` declares for `key`, created on first use
    pub fn get_or_create_group(&mut self, target: TargetId, key: &str) -> GroupId {
        if let Some(id) = self.targets[target.0].own_groups.get(key) {
            return id;
        }
        let id = GroupId(self.groups.len());
        self.groups.push(ExtraGroup::new(key));
        let target = &mut self.targets[target.0];
        target.own_groups.insert(key, id);
        target.merged_groups.insert(key, id);
        id
    }

    /// A fresh group holding the bindings of every group in `parts`
    pub fn combine_groups(&mut self, key: &str, parts: &[GroupId]) -> GroupId {
        let mut combined = ExtraGroup::new(key);
        for &part in parts {
            for binding in self.groups[part.0].bindings.clone() {
                combined.add(binding);
            }
        }
        let id = GroupId(self.groups.len());
        self.groups.push(combined);
        id
    }

    pub fn lookup(&self, canonical_name: &str) -> Option<TargetId> {
        self.by_name.get(canonical_name).copied()
    }

    pub fn target(&self, id: TargetId) -> &BindingTarget {
        &self.targets[id.0]
    }

    pub fn target_mut(&mut self, id: TargetId) -> &mut BindingTarget {
        &mut self.targets[id.0]
    }

    pub fn by_name(&self, canonical_name: &str) -> Option<&BindingTarget> {
        self.lookup(canonical_name).map(|id| self.target(id))
    }

    pub fn group(&self, id: GroupId) -> &ExtraGroup {
        &self.groups[id.0]
    }

    pub fn group_mut(&mut self, id: GroupId) -> &mut ExtraGroup {
        &mut self.groups[id.0]
    }

    pub fn targets(&self) -> impl Iterator<Item = &BindingTarget> {
        self.targets.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = TargetId> + use<> {
        (0..self.targets.len()).map(TargetId)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Merged groups of a target, in insertion order
    pub fn merged_groups(&self, id: TargetId) -> impl Iterator<Item = &ExtraGroup> {
        self.target(id)
            .merged_groups
            .iter()
            .map(|(_, group)| self.group(group))
    }

    pub fn own_groups(&self, id: TargetId) -> impl Iterator<Item = &ExtraGroup> {
        self.target(id)
            .own_groups
            .iter()
            .map(|(_, group)| self.group(group))
    }

    /// Merged required groups sorted by key
    pub fn required_groups(&self, id: TargetId) -> Vec<&ExtraGroup> {
        let mut groups: Vec<&ExtraGroup> =
            self.merged_groups(id).filter(|g| g.is_required()).collect();
        groups.sort_by(|a, b| a.key.cmp(&b.key));
        groups
    }

    /// Merged optional groups sorted by key
    pub fn optional_groups(&self, id: TargetId) -> Vec<&ExtraGroup> {
        let mut groups: Vec<&ExtraGroup> =
            self.merged_groups(id).filter(|g| !g.is_required()).collect();
        groups.sort_by(|a, b| a.key.cmp(&b.key));
        groups
    }

    /// Proper ancestors, nearest first
    pub fn ancestors(&self, id: TargetId) -> Vec<TargetId> {
        let mut chain = Vec::new();
        let mut current = self.target(id).parent;
        while let Some(parent) = current {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.target(parent).parent;
        }
        chain
    }

    /// Targets that are generation roots, in discovery order
    pub fn generation_roots(&self) -> impl Iterator<Item = &BindingTarget> {
        self.targets.iter().filter(|t| t.is_generation_root())
    }
}
