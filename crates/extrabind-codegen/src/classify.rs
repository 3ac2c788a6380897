//! Field classifier
//!
//! Decides how a field's value travels through a bundle: directly as a
//! primitive or text, directly through one of the transportable capabilities,
//! wrapped by the opaque transport, or not at all.
//!
//! # Container Rules
//!
//! With the opaque transport enabled, a type that is not directly
//! transportable may still be wrapped when it is
//!
//! | Shape | Condition |
//! |-------|-----------|
//! | marker-annotated class | always |
//! | `List<E>`, `Set<E>`, `SparseArray<E>` | `E` is an acceptable element |
//! | `Map<K, V>` | both `K` and `V` are acceptable elements |
//!
//! An acceptable element is directly transportable, marker-annotated, or
//! itself a container satisfying these rules.

use crate::oracle::{CHAR_SEQUENCE, PARCELABLE, SERIALIZABLE, STRING, TypeOracle};
use crate::types::{Primitive, TypeDescriptor};
use serde::{Deserialize, Serialize};

const SINGLE_ELEMENT_CONTAINERS: &[&str] =
    &["java.util.List", "java.util.Set", "android.util.SparseArray"];
const MAP: &str = "java.util.Map";

/// How a field's type is carried in a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// A primitive or its boxed class
    DirectPrimitive,
    /// Assignable to `CharSequence`
    DirectText,
    /// Serializable or parcelable
    DirectTransportable,
    /// Carried by the opaque transport
    WrappedOpaque,
    Invalid,
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Classification::Invalid)
    }

    pub fn is_direct(&self) -> bool {
        matches!(
            self,
            Classification::DirectPrimitive
                | Classification::DirectText
                | Classification::DirectTransportable
        )
    }

    pub fn needs_wrap(&self) -> bool {
        matches!(self, Classification::WrappedOpaque)
    }
}

/// Classify a field type.
///
/// Pure over the oracle: the same type and oracle always classify the same.
pub fn classify(ty: &TypeDescriptor, oracle: &dyn TypeOracle, wrap_enabled: bool) -> Classification {
    let direct = classify_direct(ty, oracle);
    if direct.is_valid() {
        return direct;
    }
    if wrap_enabled && (is_marked(ty, oracle) || is_wrappable_container(ty, oracle)) {
        return Classification::WrappedOpaque;
    }
    Classification::Invalid
}

fn classify_direct(ty: &TypeDescriptor, oracle: &dyn TypeOracle) -> Classification {
    if ty.unboxed_primitive().is_some() {
        return Classification::DirectPrimitive;
    }
    match ty {
        TypeDescriptor::Primitive { .. } => Classification::DirectPrimitive,
        TypeDescriptor::Array { component } => {
            // arrays serialize when their components do
            if classify_direct(component, oracle).is_valid() {
                Classification::DirectTransportable
            } else {
                Classification::Invalid
            }
        }
        TypeDescriptor::Declared { name, .. } => {
            if oracle.is_assignable(name, CHAR_SEQUENCE) {
                Classification::DirectText
            } else if oracle.is_assignable(name, PARCELABLE)
                || oracle.is_assignable(name, SERIALIZABLE)
            {
                Classification::DirectTransportable
            } else {
                Classification::Invalid
            }
        }
    }
}

fn is_marked(ty: &TypeDescriptor, oracle: &dyn TypeOracle) -> bool {
    matches!(ty, TypeDescriptor::Declared { name, .. } if oracle.has_parcel_marker(name))
}

fn is_acceptable_element(ty: &TypeDescriptor, oracle: &dyn TypeOracle) -> bool {
    classify_direct(ty, oracle).is_valid()
        || is_marked(ty, oracle)
        || is_wrappable_container(ty, oracle)
}

fn is_wrappable_container(ty: &TypeDescriptor, oracle: &dyn TypeOracle) -> bool {
    let TypeDescriptor::Declared { name, args } = ty else {
        return false;
    };
    match args.as_slice() {
        [element] => {
            SINGLE_ELEMENT_CONTAINERS
                .iter()
                .any(|container| oracle.is_assignable(name, container))
                && is_acceptable_element(element, oracle)
        }
        [key, value] => {
            oracle.is_assignable(name, MAP)
                && is_acceptable_element(key, oracle)
                && is_acceptable_element(value, oracle)
        }
        _ => false,
    }
}

/// The bundle accessor family a field's value is stored and read through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleAccessor {
    Primitive(Primitive),
    String,
    CharSequence,
    Parcelable,
    Serializable,
    /// Stored as the parcelable produced by the opaque transport
    Wrapped,
}

impl BundleAccessor {
    /// Pick the accessor for a classified type; `None` for invalid types
    pub fn resolve(
        ty: &TypeDescriptor,
        classification: Classification,
        oracle: &dyn TypeOracle,
    ) -> Option<Self> {
        match classification {
            Classification::DirectPrimitive => ty.unboxed_primitive().map(BundleAccessor::Primitive),
            Classification::DirectText => match ty {
                TypeDescriptor::Declared { name, .. } if name == STRING => {
                    Some(BundleAccessor::String)
                }
                _ => Some(BundleAccessor::CharSequence),
            },
            Classification::DirectTransportable => match ty {
                TypeDescriptor::Declared { name, .. } if oracle.is_assignable(name, PARCELABLE) => {
                    Some(BundleAccessor::Parcelable)
                }
                _ => Some(BundleAccessor::Serializable),
            },
            Classification::WrappedOpaque => Some(BundleAccessor::Wrapped),
            Classification::Invalid => None,
        }
    }

    /// Name of the `Bundler` method storing this family
    pub fn put_method(&self) -> &'static str {
        match self {
            BundleAccessor::Primitive(Primitive::Boolean) => "putBoolean",
            BundleAccessor::Primitive(Primitive::Byte) => "putByte",
            BundleAccessor::Primitive(Primitive::Char) => "putChar",
            BundleAccessor::Primitive(Primitive::Short) => "putShort",
            BundleAccessor::Primitive(Primitive::Int) => "putInt",
            BundleAccessor::Primitive(Primitive::Long) => "putLong",
            BundleAccessor::Primitive(Primitive::Float) => "putFloat",
            BundleAccessor::Primitive(Primitive::Double) => "putDouble",
            BundleAccessor::String => "putString",
            BundleAccessor::CharSequence => "putCharSequence",
            BundleAccessor::Parcelable | BundleAccessor::Wrapped => "putParcelable",
            BundleAccessor::Serializable => "putSerializable",
        }
    }
}
