//! [`GpuBackend`] on wgpu.
//!
//! The backend does not own adapter selection: it wraps a device and queue
//! the application already created, so material programs live on the same
//! device as the rest of the renderer.

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::materials::ShaderPackage;
use crate::types::{
    AddressMode, FilterMode, SamplerDescriptor, TextureDescriptor, TextureFormat, TextureUsage,
};

use super::{GpuBackend, GpuProgram, GpuSampler, GpuTexture};

/// Compiles ubershader variants into wgpu shader modules.
pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl std::fmt::Debug for WgpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuBackend").finish_non_exhaustive()
    }
}

impl WgpuBackend {
    /// Create a backend on top of an existing device and queue.
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        Self { device, queue }
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }
}

impl GpuBackend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu Backend"
    }

    fn compile_program(
        &self,
        package: &ShaderPackage,
        label: Option<&str>,
    ) -> Result<GpuProgram, GraphicsError> {
        if package.source.trim().is_empty() {
            return Err(GraphicsError::ShaderCompilationFailed(format!(
                "{}: empty shader source",
                package.name
            )));
        }

        // Validation errors would otherwise reach the device's uncaptured
        // error handler, which panics by default.
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label.unwrap_or(package.name)),
                source: wgpu::ShaderSource::Wgsl(package.source.into()),
            });
        if let Some(error) = pollster::block_on(scope.pop()) {
            return Err(GraphicsError::ShaderCompilationFailed(format!(
                "{}: {error}",
                package.name
            )));
        }

        Ok(GpuProgram::Wgpu {
            module: Arc::new(module),
            constants: package.constants.clone(),
        })
    }

    fn destroy_program(&self, _program: &GpuProgram) {
        // Shader modules are released when the last handle drops.
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<GpuTexture, GraphicsError> {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: descriptor.label.as_deref(),
            size: wgpu::Extent3d {
                width: descriptor.size.width,
                height: descriptor.size.height,
                depth_or_array_layers: descriptor.size.depth,
            },
            mip_level_count: descriptor.mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: convert_texture_format(descriptor.format),
            usage: convert_texture_usage(descriptor.usage),
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(GpuTexture::Wgpu {
            texture: Arc::new(texture),
            view: Arc::new(view),
        })
    }

    fn write_texture(
        &self,
        texture: &GpuTexture,
        data: &[u8],
        descriptor: &TextureDescriptor,
    ) -> Result<(), GraphicsError> {
        let GpuTexture::Wgpu {
            texture: wgpu_texture,
            ..
        } = texture
        else {
            return Err(GraphicsError::Internal(
                "write_texture called with non-Wgpu texture".to_string(),
            ));
        };

        if (data.len() as u64) < descriptor.upload_size() {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture upload of {} bytes, expected {}",
                data.len(),
                descriptor.upload_size()
            )));
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: wgpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(descriptor.size.width * descriptor.format.block_size()),
                rows_per_image: Some(descriptor.size.height),
            },
            wgpu::Extent3d {
                width: descriptor.size.width,
                height: descriptor.size.height,
                depth_or_array_layers: descriptor.size.depth,
            },
        );

        Ok(())
    }

    fn destroy_texture(&self, texture: &GpuTexture) {
        if let GpuTexture::Wgpu { texture, .. } = texture {
            texture.destroy();
        }
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<GpuSampler, GraphicsError> {
        let address_mode = convert_address_mode(descriptor.address_mode);
        let filter = convert_filter_mode(descriptor.filter);
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: descriptor.label.as_deref(),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: convert_mipmap_filter_mode(descriptor.filter),
            ..Default::default()
        });

        Ok(GpuSampler::Wgpu(Arc::new(sampler)))
    }
}

fn convert_texture_format(format: TextureFormat) -> wgpu::TextureFormat {
    match format {
        TextureFormat::R8Unorm => wgpu::TextureFormat::R8Unorm,
        TextureFormat::Rg8Unorm => wgpu::TextureFormat::Rg8Unorm,
        TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
        TextureFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        TextureFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
    }
}

const USAGE_FLAGS: [(TextureUsage, wgpu::TextureUsages); 3] = [
    (TextureUsage::COPY_SRC, wgpu::TextureUsages::COPY_SRC),
    (TextureUsage::COPY_DST, wgpu::TextureUsages::COPY_DST),
    (TextureUsage::TEXTURE_BINDING, wgpu::TextureUsages::TEXTURE_BINDING),
];

fn convert_texture_usage(usage: TextureUsage) -> wgpu::TextureUsages {
    USAGE_FLAGS
        .iter()
        .filter(|(ours, _)| usage.contains(*ours))
        .fold(wgpu::TextureUsages::empty(), |acc, (_, theirs)| acc | *theirs)
}

fn convert_address_mode(mode: AddressMode) -> wgpu::AddressMode {
    match mode {
        AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        AddressMode::Repeat => wgpu::AddressMode::Repeat,
        AddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
    }
}

fn convert_filter_mode(mode: FilterMode) -> wgpu::FilterMode {
    match mode {
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
        FilterMode::Linear => wgpu::FilterMode::Linear,
    }
}

fn convert_mipmap_filter_mode(mode: FilterMode) -> wgpu::MipmapFilterMode {
    match mode {
        FilterMode::Nearest => wgpu::MipmapFilterMode::Nearest,
        FilterMode::Linear => wgpu::MipmapFilterMode::Linear,
    }
}
