//! CPU-side material feature descriptions.
//!
//! An importer describes each surface with a [`FeatureKey`]: which shading
//! model and alpha mode it uses, which optional lighting features are
//! enabled, and which texture channels carry a texture (and from which
//! source UV set). A [`UvMap`] translates source UV set indices into the
//! at most two UV sets a precompiled shader can read.
//!
//! Supporting types:
//! - [`ShadingModel`] / [`AlphaMode`]: mutually exclusive choices
//! - [`TextureChannel`] / [`TextureChannels`]: per-channel texture presence
//! - [`UvSet`]: shader-side UV set assigned to a source index
//! - [`constrain_material`]: fits a key's textures into the available UV sets

mod types;
mod uv;

pub use types::{AlphaMode, FeatureKey, ShadingModel, TextureChannel, TextureChannels};
pub use uv::{constrain_material, UvMap, UvSet};
