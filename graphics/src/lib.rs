//! # Ubermat Graphics
//!
//! GPU side of the ubershader material engine.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GraphicsDevice`] - Resource creation on top of a [`GpuBackend`]
//! - [`Material`] and [`MaterialInstance`] - Compiled variants and their per-surface parameter blocks
//! - [`ubershader`] - Feature key resolution onto a fixed palette of precompiled variants
//! - Backend support: Dummy (for testing) and wgpu (`wgpu-backend` feature)
//!
//! ## Example
//!
//! ```ignore
//! use ubermat_graphics::{GraphicsDevice, LoaderDescriptor, UbershaderLoader};
//! use ubermat_core::material::{FeatureKey, UvMap};
//!
//! let device = GraphicsDevice::dummy();
//! let loader = UbershaderLoader::new(device, LoaderDescriptor::new())?;
//!
//! let mut key = FeatureKey::new().with_double_sided(true);
//! let instance = loader.create_material_instance(&mut key, &mut UvMap::new(), "floor")?;
//!
//! loader.destroy_materials();
//! ```

pub mod backend;
pub mod device;
pub mod error;
pub mod materials;
pub mod resources;
pub mod types;
pub mod ubershader;

// Re-export main types for convenience
pub use backend::{DummyBackend, GpuBackend};
#[cfg(feature = "wgpu-backend")]
pub use backend::WgpuBackend;
pub use device::GraphicsDevice;
pub use error::GraphicsError;
pub use materials::{
    CullingMode, Material, MaterialDescriptor, MaterialInstance, ParameterType, ParameterValue,
    ShaderPackage, TextureBinding, TransparencyMode,
};
pub use resources::{Sampler, Texture};
pub use types::{SamplerDescriptor, TextureDescriptor, TextureFormat, TextureUsage};
pub use ubershader::{
    CollectingSink, DiagnosticSink, LoaderDescriptor, LogSink, UbershaderLoader, VariantRegistry,
    VariantSlot,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the graphics library version and the palette flavour.
pub fn init() {
    log::info!(
        "Ubermat Graphics v{} initialized ({} palette)",
        VERSION,
        if cfg!(feature = "lite") { "lite" } else { "full" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_dummy_backend() {
        let backend = DummyBackend::new();
        assert_eq!(backend.name(), "Dummy Backend");
    }
}
