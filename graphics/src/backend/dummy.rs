//! Dummy GPU backend for testing and development.
//!
//! This backend doesn't perform actual GPU operations but provides
//! a valid implementation for exercising the material engine without
//! requiring GPU hardware. Every call is counted so tests can observe
//! how often programs are compiled and resources are released.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::GraphicsError;
use crate::materials::ShaderPackage;
use crate::types::{SamplerDescriptor, TextureDescriptor};

use super::{GpuBackend, GpuProgram, GpuSampler, GpuTexture};

/// Dummy GPU backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    fail_programs: bool,
    fail_textures: bool,
    programs_compiled: AtomicUsize,
    programs_destroyed: AtomicUsize,
    textures_created: AtomicUsize,
    textures_written: AtomicUsize,
    textures_destroyed: AtomicUsize,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every program compilation fail.
    pub fn with_failing_programs(mut self) -> Self {
        self.fail_programs = true;
        self
    }

    /// Make every texture creation fail.
    pub fn with_failing_textures(mut self) -> Self {
        self.fail_textures = true;
        self
    }

    /// Number of successful program compilations.
    pub fn programs_compiled(&self) -> usize {
        self.programs_compiled.load(Ordering::Acquire)
    }

    /// Number of destroyed programs.
    pub fn programs_destroyed(&self) -> usize {
        self.programs_destroyed.load(Ordering::Acquire)
    }

    /// Number of successfully created textures.
    pub fn textures_created(&self) -> usize {
        self.textures_created.load(Ordering::Acquire)
    }

    /// Number of texture uploads.
    pub fn textures_written(&self) -> usize {
        self.textures_written.load(Ordering::Acquire)
    }

    /// Number of destroyed textures.
    pub fn textures_destroyed(&self) -> usize {
        self.textures_destroyed.load(Ordering::Acquire)
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn compile_program(
        &self,
        package: &ShaderPackage,
        label: Option<&str>,
    ) -> Result<GpuProgram, GraphicsError> {
        log::trace!(
            "DummyBackend: compiling program {:?} from package {} ({} bytes)",
            label,
            package.name,
            package.source.len()
        );
        if self.fail_programs {
            return Err(GraphicsError::ShaderCompilationFailed(format!(
                "{}: compilation disabled on this backend",
                package.name
            )));
        }
        self.programs_compiled.fetch_add(1, Ordering::AcqRel);
        Ok(GpuProgram::Dummy)
    }

    fn destroy_program(&self, _program: &GpuProgram) {
        log::trace!("DummyBackend: destroying program");
        self.programs_destroyed.fetch_add(1, Ordering::AcqRel);
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<GpuTexture, GraphicsError> {
        log::trace!(
            "DummyBackend: creating texture {:?} ({}x{}x{})",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height,
            descriptor.size.depth
        );
        if self.fail_textures {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "texture {:?}: allocation disabled on this backend",
                descriptor.label
            )));
        }
        self.textures_created.fetch_add(1, Ordering::AcqRel);
        Ok(GpuTexture::Dummy)
    }

    fn write_texture(
        &self,
        _texture: &GpuTexture,
        data: &[u8],
        descriptor: &TextureDescriptor,
    ) -> Result<(), GraphicsError> {
        log::trace!(
            "DummyBackend: write_texture {:?} ({}x{}) len={}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height,
            data.len()
        );
        self.textures_written.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn destroy_texture(&self, _texture: &GpuTexture) {
        log::trace!("DummyBackend: destroying texture");
        self.textures_destroyed.fetch_add(1, Ordering::AcqRel);
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<GpuSampler, GraphicsError> {
        log::trace!("DummyBackend: creating sampler {:?}", descriptor.label);
        Ok(GpuSampler::Dummy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TextureFormat, TextureUsage};

    fn test_package() -> ShaderPackage {
        ShaderPackage::new("test", "fn main() {}")
    }

    #[test]
    fn test_counts_compilations() {
        let backend = DummyBackend::new();
        backend.compile_program(&test_package(), Some("a")).unwrap();
        backend.compile_program(&test_package(), None).unwrap();
        assert_eq!(backend.programs_compiled(), 2);
        assert_eq!(backend.programs_destroyed(), 0);
    }

    #[test]
    fn test_failing_programs() {
        let backend = DummyBackend::new().with_failing_programs();
        let result = backend.compile_program(&test_package(), None);
        assert!(matches!(
            result,
            Err(GraphicsError::ShaderCompilationFailed(_))
        ));
        assert_eq!(backend.programs_compiled(), 0);
    }

    #[test]
    fn test_failing_textures() {
        let backend = DummyBackend::new().with_failing_textures();
        let desc = TextureDescriptor::new_2d(
            1,
            1,
            TextureFormat::Rgba8Unorm,
            TextureUsage::TEXTURE_BINDING,
        );
        assert!(backend.create_texture(&desc).is_err());
        assert_eq!(backend.textures_created(), 0);
    }
}
