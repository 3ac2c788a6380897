//! Extra binders: the `inject(finder, target, source)` contract

use crate::{ExtraSource, ExtraValue, Finder, Parceler, RuntimeError, RuntimeResult};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Populates a target's extra fields from a source.
///
/// Generated extraction routines implement this once per binding target and
/// are registered in a [`crate::BinderRegistry`] under the target's canonical
/// name.
pub trait ExtraBinder: Send + Sync {
    /// Canonical name of the class this binder populates
    fn target_name(&self) -> &str;

    /// Assign every extra group of the target from `source`.
    ///
    /// A required group whose lookup returns nothing fails with
    /// [`RuntimeError::RequiredExtraMissing`]; an optional group whose lookup
    /// returns nothing leaves the field untouched.
    fn inject(
        &self,
        finder: Finder,
        target: &mut dyn Any,
        source: &dyn ExtraSource,
    ) -> RuntimeResult<()>;
}

/// Join field descriptions the way the missing-extra message reads them:
/// `field 'a'`, `field 'a' and field 'b'`, `field 'a', field 'b', and field 'c'`.
pub fn describe_fields<S: AsRef<str>>(fields: &[S]) -> String {
    let described: Vec<String> = fields
        .iter()
        .map(|name| format!("field '{}'", name.as_ref()))
        .collect();

    match described.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Untyped target: field name to current value.
///
/// Fields never assigned hold no entry, which stands for the field's default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    values: BTreeMap<String, ExtraValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preassign a default for a field
    pub fn with_default(mut self, field: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: ExtraValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&ExtraValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One key and every field it populates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub key: String,
    pub fields: Vec<String>,
    pub required: bool,
    /// Stored through the opaque transport
    #[serde(default)]
    pub wrapped: bool,
}

/// Everything a binder needs to know about one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionDescriptor {
    pub target: String,
    pub groups: Vec<GroupDescriptor>,
}

/// Binder driven by an [`ExtractionDescriptor`] instead of compiled code.
///
/// It performs the same lookups, in the same order, as the generated routine
/// for the target, and injects into a [`FieldMap`].
pub struct DynamicBinder {
    descriptor: ExtractionDescriptor,
    parceler: Option<Arc<dyn Parceler>>,
}

impl DynamicBinder {
    pub fn new(descriptor: ExtractionDescriptor) -> Self {
        Self {
            descriptor,
            parceler: None,
        }
    }

    /// Use `parceler` to unwrap groups stored through the opaque transport
    pub fn with_parceler(mut self, parceler: Arc<dyn Parceler>) -> Self {
        self.parceler = Some(parceler);
        self
    }

    pub fn descriptor(&self) -> &ExtractionDescriptor {
        &self.descriptor
    }

    fn unwrap_value(&self, group: &GroupDescriptor, value: &ExtraValue) -> RuntimeResult<ExtraValue> {
        if !group.wrapped {
            return Ok(value.clone());
        }
        let ExtraValue::Wrapped(wrapped) = value else {
            return Err(RuntimeError::Parceler(format!(
                "extra '{}' holds a {} value, expected a wrapped one",
                group.key,
                value.kind()
            )));
        };
        let parceler = self.parceler.as_ref().ok_or_else(|| {
            RuntimeError::Parceler(format!("no parceler configured to unwrap '{}'", group.key))
        })?;
        Ok(ExtraValue::Wrapped(parceler.unwrap(wrapped)?))
    }
}

impl ExtraBinder for DynamicBinder {
    fn target_name(&self) -> &str {
        &self.descriptor.target
    }

    fn inject(
        &self,
        finder: Finder,
        target: &mut dyn Any,
        source: &dyn ExtraSource,
    ) -> RuntimeResult<()> {
        let fields = target
            .downcast_mut::<FieldMap>()
            .ok_or_else(|| RuntimeError::TargetMismatch(self.descriptor.target.clone()))?;

        for group in &self.descriptor.groups {
            let Some(value) = finder.get_extra(source, &group.key)? else {
                if group.required {
                    return Err(RuntimeError::RequiredExtraMissing {
                        key: group.key.clone(),
                        fields: describe_fields(&group.fields),
                    });
                }
                continue;
            };

            let value = self.unwrap_value(group, value)?;
            for field in &group.fields {
                fields.set(field.clone(), value.clone());
            }
        }

        debug!(
            target_class = %self.descriptor.target,
            groups = self.descriptor.groups.len(),
            "injected extras"
        );
        Ok(())
    }
}
