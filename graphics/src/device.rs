//! Graphics device.
//!
//! [`GraphicsDevice`] validates resource requests, forwards them to a
//! [`GpuBackend`] and remembers what it handed out (weakly) so leaks of
//! textures and compiled variants show up in [`GraphicsDevice::texture_count`]
//! and [`GraphicsDevice::material_count`].

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::backend::{DummyBackend, GpuBackend};
use crate::error::GraphicsError;
use crate::materials::{Material, MaterialDescriptor};
use crate::resources::{Sampler, Texture};
use crate::types::{SamplerDescriptor, TextureDescriptor};

/// Largest texture dimension the device accepts.
const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// Entry point for every GPU object the material engine creates.
///
/// Shared as `Arc<GraphicsDevice>`; textures and materials keep their
/// device alive.
///
/// # Example
///
/// ```ignore
/// let device = GraphicsDevice::new(Arc::new(DummyBackend::new()));
///
/// let texture = device.create_texture(&TextureDescriptor::new_2d(
///     1, 1,
///     TextureFormat::Rgba8Unorm,
///     TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
/// ))?;
/// device.write_texture(&texture, &[0; 4])?;
/// ```
pub struct GraphicsDevice {
    backend: Arc<dyn GpuBackend>,
    name: String,
    textures: RwLock<Vec<Weak<Texture>>>,
    materials: RwLock<Vec<Weak<Material>>>,
}

impl GraphicsDevice {
    /// Create a device on top of a backend.
    pub fn new(backend: Arc<dyn GpuBackend>) -> Arc<Self> {
        let name = backend.name().to_string();
        Arc::new(Self {
            backend,
            name,
            textures: RwLock::new(Vec::new()),
            materials: RwLock::new(Vec::new()),
        })
    }

    /// Create a device on a fresh [`DummyBackend`].
    pub fn dummy() -> Arc<Self> {
        Self::new(Arc::new(DummyBackend::new()))
    }

    /// Get the backend.
    pub fn backend(&self) -> &Arc<dyn GpuBackend> {
        &self.backend
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a GPU texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the texture dimensions are zero or exceed device
    /// limits, or if the backend fails to allocate it.
    pub fn create_texture(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError> {
        if descriptor.size.width > MAX_TEXTURE_DIMENSION
            || descriptor.size.height > MAX_TEXTURE_DIMENSION
        {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture dimension exceeds maximum {MAX_TEXTURE_DIMENSION}"
            )));
        }

        if descriptor.size.width == 0 || descriptor.size.height == 0 {
            return Err(GraphicsError::InvalidParameter(
                "texture dimensions cannot be zero".to_string(),
            ));
        }

        let gpu_handle = self.backend.create_texture(descriptor)?;
        let texture = Arc::new(Texture::new(
            Arc::clone(self),
            descriptor.clone(),
            gpu_handle,
        ));

        track(&self.textures, &texture);

        log::trace!(
            "GraphicsDevice: created texture {:?}, size={}x{}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height
        );

        Ok(texture)
    }

    /// Upload the full contents of a texture's first mip level.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is smaller than the texture or the backend
    /// rejects the upload.
    pub fn write_texture(&self, texture: &Texture, data: &[u8]) -> Result<(), GraphicsError> {
        let expected = texture.descriptor().upload_size();
        if (data.len() as u64) < expected {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture upload of {} bytes, expected {expected}",
                data.len()
            )));
        }
        self.backend
            .write_texture(texture.gpu_handle(), data, texture.descriptor())
    }

    /// Release a texture's GPU allocation.
    ///
    /// The [`Texture`] object stays valid as a handle but must not be bound
    /// afterwards.
    pub fn destroy_texture(&self, texture: &Texture) {
        log::trace!("GraphicsDevice: destroying texture {:?}", texture.label());
        self.backend.destroy_texture(texture.gpu_handle());
    }

    /// Create a sampler. Samplers are not tracked.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn create_sampler(
        &self,
        descriptor: &SamplerDescriptor,
    ) -> Result<Arc<Sampler>, GraphicsError> {
        let gpu_handle = self.backend.create_sampler(descriptor)?;
        let sampler = Arc::new(Sampler::new(descriptor.clone(), gpu_handle));

        log::trace!("GraphicsDevice: created sampler {:?}", descriptor.label);

        Ok(sampler)
    }

    /// Compile a material from its shader package.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::ShaderCompilationFailed`] if the backend
    /// cannot compile the package.
    pub fn create_material(
        self: &Arc<Self>,
        descriptor: &MaterialDescriptor,
    ) -> Result<Arc<Material>, GraphicsError> {
        let gpu_handle = self
            .backend
            .compile_program(&descriptor.package, descriptor.label.as_deref())?;
        let material = Arc::new(Material::new(
            Arc::clone(self),
            descriptor.clone(),
            gpu_handle,
        ));

        track(&self.materials, &material);

        log::trace!("GraphicsDevice: created material {:?}", descriptor.label);

        Ok(material)
    }

    /// Release a material's compiled program.
    pub fn destroy_material(&self, material: &Material) {
        log::trace!("GraphicsDevice: destroying material {:?}", material.label());
        self.backend.destroy_program(material.gpu_handle());
    }

    /// Textures created by this device that still have a handle somewhere.
    pub fn texture_count(&self) -> usize {
        live(&self.textures)
    }

    /// Materials created by this device that still have a handle somewhere.
    pub fn material_count(&self) -> usize {
        live(&self.materials)
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .finish()
    }
}

// Entries of released resources are pruned on every insert.
fn track<T>(tracked: &RwLock<Vec<Weak<T>>>, resource: &Arc<T>) {
    let mut tracked = tracked.write();
    tracked.retain(|w| w.strong_count() > 0);
    tracked.push(Arc::downgrade(resource));
}

fn live<T>(tracked: &RwLock<Vec<Weak<T>>>) -> usize {
    tracked.read().iter().filter(|w| w.strong_count() > 0).count()
}

static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);
