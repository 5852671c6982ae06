//! GPU backend abstraction layer.
//!
//! The material engine only needs a narrow slice of a GPU API: compiling
//! shader programs from precompiled packages, creating and uploading
//! textures, creating samplers and destroying what it created.
//!
//! # Available Backends
//!
//! - [`DummyBackend`] (always available): no GPU work, counts every call
//! - `WgpuBackend` (`wgpu-backend` feature): wraps an existing wgpu device

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

pub mod dummy;

#[cfg(feature = "wgpu-backend")]
use std::sync::Arc;

use crate::error::GraphicsError;
use crate::materials::ShaderPackage;
use crate::types::{SamplerDescriptor, TextureDescriptor};

pub use dummy::DummyBackend;
#[cfg(feature = "wgpu-backend")]
pub use wgpu_backend::WgpuBackend;

/// Handle to a compiled shader program.
#[derive(Clone)]
pub enum GpuProgram {
    /// Placeholder from [`DummyBackend`]
    Dummy,
    /// wgpu shader module together with its pipeline-overridable constants
    #[cfg(feature = "wgpu-backend")]
    Wgpu {
        module: Arc<wgpu::ShaderModule>,
        constants: Vec<(&'static str, f64)>,
    },
}

impl std::fmt::Debug for GpuProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuProgram::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu { module, constants } => f
                .debug_struct("GpuProgram::Wgpu")
                .field("module", module)
                .field("constants", constants)
                .finish(),
        }
    }
}

/// Handle to a GPU texture resource.
#[derive(Clone)]
pub enum GpuTexture {
    /// Placeholder from [`DummyBackend`]
    Dummy,
    /// Texture plus its default view
    #[cfg(feature = "wgpu-backend")]
    Wgpu {
        texture: Arc<wgpu::Texture>,
        view: Arc<wgpu::TextureView>,
    },
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuTexture::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu { texture, view } => f
                .debug_struct("GpuTexture::Wgpu")
                .field("texture", texture)
                .field("view", view)
                .finish(),
        }
    }
}

/// Handle to a GPU sampler resource.
#[derive(Clone)]
pub enum GpuSampler {
    /// Placeholder from [`DummyBackend`]
    Dummy,
    /// wgpu sampler
    #[cfg(feature = "wgpu-backend")]
    Wgpu(Arc<wgpu::Sampler>),
}

impl std::fmt::Debug for GpuSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuSampler::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(sampler) => f.debug_tuple("GpuSampler::Wgpu").field(sampler).finish(),
        }
    }
}

/// Operations the material engine consumes from a GPU API.
///
/// Compilation is synchronous: `compile_program` either returns a usable
/// program or fails.
pub trait GpuBackend: Send + Sync + 'static {
    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Compile a shader program from a precompiled package.
    fn compile_program(
        &self,
        package: &ShaderPackage,
        label: Option<&str>,
    ) -> Result<GpuProgram, GraphicsError>;

    /// Release a compiled program.
    fn destroy_program(&self, program: &GpuProgram);

    /// Allocate a texture described by `descriptor`.
    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<GpuTexture, GraphicsError>;

    /// Upload the full contents of mip level 0.
    fn write_texture(
        &self,
        texture: &GpuTexture,
        data: &[u8],
        descriptor: &TextureDescriptor,
    ) -> Result<(), GraphicsError>;

    /// Free a texture allocation.
    fn destroy_texture(&self, texture: &GpuTexture);

    /// Create sampling state.
    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<GpuSampler, GraphicsError>;
}
