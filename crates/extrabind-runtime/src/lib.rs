//! extrabind-runtime - Runtime side of generated extra binders and builders
//!
//! This crate provides the types that generated extraction routines and
//! type-state builders work against:
//! - [`Bundle`] the in-memory key-value container and its JSON wire format
//! - [`Bundler`] the accumulating container behind every builder setter
//! - [`Finder`] and [`ExtraSource`] for looking up extras by key
//! - [`ExtraBinder`] and [`BinderRegistry`] for dispatching `inject` by class name
//! - [`DynamicBinder`] a descriptor-driven binder used where no compiled binder exists
//! - [`RuntimeError`] including the fail-fast [`RuntimeError::RequiredExtraMissing`]

mod binder;
mod bundle;
mod bundler;
mod error;
mod finder;
mod registry;

pub use binder::{
    DynamicBinder, ExtraBinder, ExtractionDescriptor, FieldMap, GroupDescriptor, describe_fields,
};
pub use bundle::{Bundle, ExtraValue};
pub use bundler::{Bundler, JsonParceler, Parcelable, Parceler};
pub use error::{RuntimeError, RuntimeResult};
pub use finder::{ActivitySource, ExtraSource, Finder, FragmentSource};
pub use registry::BinderRegistry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BinderRegistry, Bundle, Bundler, DynamicBinder, ExtraBinder, ExtraSource, ExtraValue,
        Finder, RuntimeError, RuntimeResult,
    };
}
