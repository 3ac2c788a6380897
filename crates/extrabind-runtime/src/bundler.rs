//! Accumulating container behind generated builder setters.
//!
//! Every setter of a generated builder state stores its value into a
//! [`Bundler`] rather than onto a field; `build()` then materializes the
//! accumulated [`Bundle`]. Values that are neither primitive nor text go
//! through one of the transportable capabilities or, for types only the
//! opaque transport can carry, through a [`Parceler`].

use crate::{Bundle, ExtraValue, RuntimeError, RuntimeResult};
use serde::Serialize;

/// Transportable-by-reference capability.
///
/// When a value is both parcelable and serializable, the parcelable form is
/// the one a generated setter stores.
pub trait Parcelable {
    /// Flatten the value into its transport form
    fn write_to_parcel(&self) -> RuntimeResult<serde_json::Value>;
}

/// Opaque transport for values with no direct bundle representation.
pub trait Parceler: Send + Sync {
    /// Wrap a value of `type_name` into an opaque payload
    fn wrap(&self, type_name: &str, value: serde_json::Value) -> RuntimeResult<serde_json::Value>;

    /// Recover the original payload from a wrapped one
    fn unwrap(&self, wrapped: &serde_json::Value) -> RuntimeResult<serde_json::Value>;
}

/// [`Parceler`] that tags the payload with its type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParceler;

impl Parceler for JsonParceler {
    fn wrap(&self, type_name: &str, value: serde_json::Value) -> RuntimeResult<serde_json::Value> {
        if type_name.is_empty() {
            return Err(RuntimeError::Parceler(
                "cannot wrap a value without a type name".to_string(),
            ));
        }
        Ok(serde_json::json!({ "parcel": type_name, "payload": value }))
    }

    fn unwrap(&self, wrapped: &serde_json::Value) -> RuntimeResult<serde_json::Value> {
        wrapped
            .get("payload")
            .cloned()
            .ok_or_else(|| RuntimeError::Parceler(format!("not a wrapped value: {wrapped}")))
    }
}

/// Fluent accumulator of extras.
#[derive(Debug, Clone, Default)]
pub struct Bundler {
    bundle: Bundle,
}

impl Bundler {
    /// Create an empty bundler
    pub fn create() -> Self {
        Self::default()
    }

    /// Create a bundler seeded with existing extras
    pub fn of(bundle: Bundle) -> Self {
        Self { bundle }
    }

    /// Store a primitive or text value
    pub fn put(mut self, key: &str, value: impl Into<ExtraValue>) -> Self {
        self.bundle.put(key, value);
        self
    }

    /// Store text through the char-sequence accessor
    pub fn put_char_sequence(mut self, key: &str, value: impl Into<String>) -> Self {
        self.bundle.put(key, ExtraValue::CharSequence(value.into()));
        self
    }

    /// Store a value through the serializable capability
    pub fn put_serializable<T: Serialize + ?Sized>(
        mut self,
        key: &str,
        value: &T,
    ) -> RuntimeResult<Self> {
        let payload = serde_json::to_value(value)?;
        self.bundle.put(key, ExtraValue::Serializable(payload));
        Ok(self)
    }

    /// Store a value through the transportable-by-reference capability
    pub fn put_parcelable<T: Parcelable + ?Sized>(
        mut self,
        key: &str,
        value: &T,
    ) -> RuntimeResult<Self> {
        let payload = value.write_to_parcel()?;
        self.bundle.put(key, ExtraValue::Parcelable(payload));
        Ok(self)
    }

    /// Store a value through the opaque transport
    pub fn put_wrapped<T: Serialize + ?Sized>(
        mut self,
        key: &str,
        type_name: &str,
        value: &T,
        parceler: &dyn Parceler,
    ) -> RuntimeResult<Self> {
        let wrapped = parceler.wrap(type_name, serde_json::to_value(value)?)?;
        self.bundle.put(key, ExtraValue::Wrapped(wrapped));
        Ok(self)
    }

    /// Whether a key has been stored already
    pub fn contains(&self, key: &str) -> bool {
        self.bundle.contains_key(key)
    }

    /// Materialize the accumulated extras
    pub fn get(self) -> Bundle {
        self.bundle
    }
}

#[cfg(test)]
#[path = "bundler/bundler_tests.rs"]
mod bundler_tests;
