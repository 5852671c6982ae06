//! Ubershader material resolution.
//!
//! Surfaces are described by a [`FeatureKey`](ubermat_core::material::FeatureKey).
//! Instead of generating a shader per key, keys are mapped onto a small
//! fixed palette of precompiled variants:
//!
//! 1. [`normalize`] clears feature combinations no variant supports.
//! 2. [`variant_slot`] maps the key to one of [`VariantSlot::COUNT`] slots.
//! 3. [`VariantCache`] compiles the slot's package on first use. Slots the
//!    [`VariantRegistry`] leaves empty fall back to [`VariantSlot::BASELINE`].
//! 4. [`bind`] configures a [`MaterialInstance`](crate::materials::MaterialInstance)
//!    for the key.
//!
//! [`UbershaderLoader`] runs the whole pipeline and owns the compiled
//! variants. Recoverable problems are reported through a
//! [`DiagnosticSink`] rather than returned as errors.

mod binder;
mod cache;
mod diagnostics;
mod loader;
mod registry;
mod resolver;
mod slot;

pub use binder::{bind, DEFAULT_IOR, DEFAULT_REFLECTANCE};
pub use cache::VariantCache;
pub use diagnostics::{CollectingSink, DiagnosticSink, LogSink, LOG_TARGET};
pub use loader::{LoaderDescriptor, UbershaderLoader};
pub use registry::{channel_parameters, ChannelParameters, VariantRegistry, ALPHA_MODE_CONSTANT};
pub use resolver::{baseline_key, normalize, resolve_variant};
pub use slot::{variant_slot, VariantSlot};
