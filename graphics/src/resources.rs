//! Device-created resources bound to material instances.
//!
//! Both types are handed out as `Arc`s by [`GraphicsDevice`] and shared by
//! every instance that binds them.

use std::sync::Arc;

use crate::backend::{GpuSampler, GpuTexture};
use crate::device::GraphicsDevice;
use crate::types::{Extent3d, SamplerDescriptor, TextureDescriptor, TextureFormat};

/// A texture allocated through [`GraphicsDevice::create_texture`].
///
/// Keeps its device alive. Dropping the last handle does not free the GPU
/// allocation; that happens in [`GraphicsDevice::destroy_texture`].
pub struct Texture {
    device: Arc<GraphicsDevice>,
    descriptor: TextureDescriptor,
    gpu_handle: GpuTexture,
}

impl Texture {
    pub(crate) fn new(
        device: Arc<GraphicsDevice>,
        descriptor: TextureDescriptor,
        gpu_handle: GpuTexture,
    ) -> Self {
        Self {
            device,
            descriptor,
            gpu_handle,
        }
    }

    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    pub fn gpu_handle(&self) -> &GpuTexture {
        &self.gpu_handle
    }

    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    pub fn size(&self) -> Extent3d {
        self.descriptor.size
    }

    pub fn width(&self) -> u32 {
        self.descriptor.size.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.size.height
    }

    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("label", &self.descriptor.label)
            .field("size", &self.descriptor.size)
            .field("format", &self.descriptor.format)
            .finish_non_exhaustive()
    }
}

/// Sampling state paired with a texture in a [`TextureBinding`](crate::TextureBinding).
pub struct Sampler {
    descriptor: SamplerDescriptor,
    gpu_handle: GpuSampler,
}

impl Sampler {
    pub(crate) fn new(descriptor: SamplerDescriptor, gpu_handle: GpuSampler) -> Self {
        Self {
            descriptor,
            gpu_handle,
        }
    }

    pub fn gpu_handle(&self) -> &GpuSampler {
        &self.gpu_handle
    }

    pub fn descriptor(&self) -> &SamplerDescriptor {
        &self.descriptor
    }

    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("label", &self.descriptor.label)
            .field("filter", &self.descriptor.filter)
            .field("address_mode", &self.descriptor.address_mode)
            .finish()
    }
}

static_assertions::assert_impl_all!(Texture: Send, Sync);
static_assertions::assert_impl_all!(Sampler: Send, Sync);
