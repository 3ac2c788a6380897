//! Binding model builder
//!
//! Turns the flat field facts into one [`BindingTarget`](crate::model::BindingTarget)
//! per declaring class, grouping fields by key. Facts that break a rule are
//! reported and skipped; the rest of the batch is still processed.

use crate::classify::{BundleAccessor, Classification, classify};
use crate::error::{Diagnostics, ModelError};
use crate::facts::{ClassKind, FieldFact, Manifest, Modifier, TargetFact, Visibility};
use crate::model::{BindingSet, FieldBinding};
use crate::naming::is_java_identifier;
use crate::oracle::TypeOracle;
use crate::types::TypeDescriptor;
use tracing::debug;

/// Builds the initial, unlinked binding model for one round
pub struct ModelBuilder<'a> {
    oracle: &'a dyn TypeOracle,
    wrap_enabled: bool,
    debug: bool,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(oracle: &'a dyn TypeOracle) -> Self {
        Self {
            oracle,
            wrap_enabled: true,
            debug: false,
        }
    }

    pub fn wrap_enabled(mut self, enabled: bool) -> Self {
        self.wrap_enabled = enabled;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build targets from every field fact, then mark generation roots
    pub fn build(&self, manifest: &Manifest, diagnostics: &mut Diagnostics) -> BindingSet {
        let mut set = BindingSet::new();
        for fact in &manifest.fields {
            self.add_field(&mut set, fact, diagnostics);
        }
        for fact in &manifest.targets {
            self.add_root(&mut set, fact, diagnostics);
        }
        set
    }

    /// Resolve the key a field is bound to: the explicit key unless blank
    pub fn resolve_key(fact: &FieldFact) -> &str {
        let explicit = fact.key.trim();
        if explicit.is_empty() {
            &fact.name
        } else {
            explicit
        }
    }

    fn class_kind(&self, class: &str) -> ClassKind {
        self.oracle.class_kind(class).unwrap_or_default()
    }

    /// Every rule the fact breaks, in a fixed order
    fn validate(&self, fact: &FieldFact) -> Result<(TypeDescriptor, Classification), Vec<ModelError>> {
        let class = || fact.class.clone();
        let field = || fact.name.clone();
        let mut errors = Vec::new();

        if fact.has_modifier(Modifier::Private) {
            errors.push(ModelError::PrivateField { class: class(), field: field() });
        }
        if fact.has_modifier(Modifier::Static) {
            errors.push(ModelError::StaticField { class: class(), field: field() });
        }
        let kind = self.class_kind(&fact.class);
        if !kind.is_class() {
            errors.push(ModelError::InvalidEnclosingKind {
                class: class(),
                field: field(),
                kind: kind.to_string(),
            });
        }
        if self.oracle.visibility(&fact.class) == Some(Visibility::Private) {
            errors.push(ModelError::PrivateEnclosingClass { class: class(), field: field() });
        }
        let key = Self::resolve_key(fact);
        if !is_java_identifier(key) {
            errors.push(ModelError::InvalidKey {
                class: class(),
                field: field(),
                key: key.to_string(),
            });
        }

        let classified = match TypeDescriptor::parse(&fact.ty) {
            Ok(ty) => {
                let classification = classify(&ty, self.oracle, self.wrap_enabled);
                if classification.is_valid() {
                    Some((ty, classification))
                } else {
                    errors.push(ModelError::InvalidType {
                        class: class(),
                        field: field(),
                        ty: fact.ty.clone(),
                    });
                    None
                }
            }
            Err(err) => {
                errors.push(ModelError::MalformedType {
                    class: class(),
                    field: field(),
                    descriptor: fact.ty.clone(),
                    reason: err.to_string(),
                });
                None
            }
        };

        match classified {
            Some(classified) if errors.is_empty() => Ok(classified),
            _ => Err(errors),
        }
    }

    fn add_field(&self, set: &mut BindingSet, fact: &FieldFact, diagnostics: &mut Diagnostics) {
        let (ty, classification) = match self.validate(fact) {
            Ok(valid) => valid,
            Err(errors) => {
                for err in errors {
                    diagnostics.model(err);
                }
                return;
            }
        };
        let Some(accessor) = BundleAccessor::resolve(&ty, classification, self.oracle) else {
            return;
        };

        let is_new = set.lookup(&fact.class).is_none();
        let is_abstract = self.class_kind(&fact.class) == ClassKind::Abstract;
        let target = set.get_or_create_target(&fact.class, is_abstract);
        if is_new && self.debug {
            debug!(class = %fact.class, "created binding target");
        }

        let key = Self::resolve_key(fact);
        let group = set.get_or_create_group(target, key);
        let binding = FieldBinding {
            name: fact.name.clone(),
            ty,
            required: !fact.optional,
            needs_wrap: classification.needs_wrap(),
            accessor,
            declaring_class: fact.class.clone(),
        };
        if self.debug {
            debug!(
                class = %fact.class,
                field = %fact.name,
                key,
                required = binding.required,
                ?classification,
                "bound field"
            );
        }
        set.group_mut(group).add(binding);
    }

    fn add_root(&self, set: &mut BindingSet, fact: &TargetFact, diagnostics: &mut Diagnostics) {
        let model = fact.model_name();
        let is_abstract = self.class_kind(model) == ClassKind::Abstract;
        let id = set.get_or_create_target(model, is_abstract);
        let target = set.target_mut(id);

        match &target.launch_class {
            Some(existing) if existing == &fact.class => {}
            Some(existing) => diagnostics.model(ModelError::DuplicateAssociation {
                class: model.to_string(),
                existing: existing.clone(),
                ignored: fact.class.clone(),
            }),
            None => {
                target.launch_class = Some(fact.class.clone());
                if self.debug {
                    debug!(model, launch = %fact.class, "marked generation root");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "binding/binding_tests.rs"]
mod binding_tests;
