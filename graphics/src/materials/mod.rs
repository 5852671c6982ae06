//! Material system for the graphics engine.
//!
//! This module provides a two-level material abstraction:
//!
//! - [`Material`] - A compiled shader program and its declared parameters
//! - [`MaterialInstance`] - Per-surface parameter values and texture bindings
//!
//! Instances share their material through `Arc`; the renderer can compare
//! `Arc` pointers to group draw calls that use the same program.

mod instance;
mod material;
mod parameters;

pub use instance::{CullingMode, MaterialInstance, TextureBinding, TransparencyMode};
pub use material::{Material, MaterialDescriptor, ShaderPackage};
pub use parameters::{ParameterInfo, ParameterType, ParameterValue};
