//! Material definition.
//!
//! A [`Material`] is a compiled shader program together with the parameter
//! interface its package declares. It is created by [`GraphicsDevice`] and
//! shared by any number of [`MaterialInstance`]s.
//!
//! [`GraphicsDevice`]: crate::GraphicsDevice
//! [`MaterialInstance`]: super::MaterialInstance

use std::sync::Arc;

use crate::backend::GpuProgram;
use crate::device::GraphicsDevice;

use super::parameters::{ParameterInfo, ParameterType};

/// A precompiled shader package.
///
/// The source is embedded in the binary; `constants` are pipeline-overridable
/// values that specialize one source into several variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderPackage {
    /// Package name, used for labels and diagnostics.
    pub name: &'static str,
    /// Shader source (WGSL).
    pub source: &'static str,
    /// Override constants applied when the program is used.
    pub constants: Vec<(&'static str, f64)>,
    /// Parameters the program reads.
    pub parameters: Vec<ParameterInfo>,
}

impl ShaderPackage {
    /// Create a package without constants or parameters.
    pub fn new(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source,
            constants: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Add an override constant.
    pub fn with_constant(mut self, name: &'static str, value: f64) -> Self {
        self.constants.push((name, value));
        self
    }

    /// Declare a parameter.
    pub fn with_parameter(mut self, name: &'static str, ty: ParameterType) -> Self {
        self.parameters.push(ParameterInfo::new(name, ty));
        self
    }

    /// Declare several parameters.
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = ParameterInfo>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Find a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterInfo> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Descriptor for creating a material.
#[derive(Debug, Clone)]
pub struct MaterialDescriptor {
    /// Package to compile.
    pub package: ShaderPackage,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl MaterialDescriptor {
    /// Create a new material descriptor.
    pub fn new(package: ShaderPackage) -> Self {
        Self {
            package,
            label: None,
        }
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A compiled shader program and its parameter interface.
///
/// Materials are created by [`GraphicsDevice::create_material`] and hold
/// a strong reference to their parent device.
///
/// # Example
///
/// ```ignore
/// let material = device.create_material(
///     &MaterialDescriptor::new(package).with_label("lit_opaque"),
/// )?;
/// assert!(material.has_parameter("base_color_index"));
/// ```
pub struct Material {
    device: Arc<GraphicsDevice>,
    descriptor: MaterialDescriptor,
    gpu_handle: GpuProgram,
}

impl Material {
    /// Wrap a compiled program. Only [`GraphicsDevice::create_material`] calls this.
    pub(crate) fn new(
        device: Arc<GraphicsDevice>,
        descriptor: MaterialDescriptor,
        gpu_handle: GpuProgram,
    ) -> Self {
        Self {
            device,
            descriptor,
            gpu_handle,
        }
    }

    /// Backend program handle.
    pub fn gpu_handle(&self) -> &GpuProgram {
        &self.gpu_handle
    }

    /// Device that compiled this material.
    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    pub fn descriptor(&self) -> &MaterialDescriptor {
        &self.descriptor
    }

    /// Get the shader package this material was compiled from.
    pub fn package(&self) -> &ShaderPackage {
        &self.descriptor.package
    }

    /// Label, set by the loader to the variant slot name.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.descriptor.package.parameters
    }

    /// Find a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterInfo> {
        self.descriptor.package.parameter(name)
    }

    /// Whether the material declares a parameter with this name.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }

    /// Iterate over declared texture parameters.
    pub fn sampler_parameters(&self) -> impl Iterator<Item = &ParameterInfo> {
        self.parameters().iter().filter(|p| p.is_sampler())
    }
}

impl std::fmt::Debug for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("label", &self.descriptor.label)
            .field("package", &self.descriptor.package.name)
            .field("parameter_count", &self.descriptor.package.parameters.len())
            .finish()
    }
}

// Ensure Material is Send + Sync
static_assertions::assert_impl_all!(Material: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn test_package() -> ShaderPackage {
        ShaderPackage::new("test", "fn main() {}")
            .with_constant("ALPHA_MODE", 2.0)
            .with_parameter("ior", ParameterType::Float)
            .with_parameter("base_color_map", ParameterType::Sampler2d)
    }

    #[test]
    fn test_package_builder() {
        let package = test_package();
        assert_eq!(package.constants, vec![("ALPHA_MODE", 2.0)]);
        assert_eq!(package.parameters.len(), 2);
        assert_eq!(
            package.parameter("ior").map(|p| p.ty),
            Some(ParameterType::Float)
        );
        assert!(package.parameter("reflectance").is_none());
    }

    #[test]
    fn test_material_creation() {
        let device = GraphicsDevice::dummy();
        let desc = MaterialDescriptor::new(test_package()).with_label("test");

        let material = Material::new(device, desc, GpuProgram::Dummy);
        assert_eq!(material.label(), Some("test"));
        assert!(material.has_parameter("ior"));
        assert!(!material.has_parameter("reflectance"));
        assert_eq!(material.sampler_parameters().count(), 1);
    }

    #[test]
    fn test_material_debug() {
        let device = GraphicsDevice::dummy();
        let material = Material::new(
            device,
            MaterialDescriptor::new(test_package()),
            GpuProgram::Dummy,
        );
        let debug = format!("{:?}", material);
        assert!(debug.contains("Material"));
        assert!(debug.contains("test"));
    }
}
