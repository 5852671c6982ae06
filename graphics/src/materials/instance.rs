//! Material instance with its own parameter block.
//!
//! A [`MaterialInstance`] holds per-surface parameter values and texture
//! bindings. Multiple instances share the same [`Material`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::GraphicsError;
use crate::resources::{Sampler, Texture};

use super::material::Material;
use super::parameters::{ParameterType, ParameterValue};

/// Face culling applied when drawing with an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullingMode {
    /// No culling.
    None,
    /// Cull back faces.
    #[default]
    Back,
}

/// How transparent surfaces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransparencyMode {
    /// Single pass.
    #[default]
    Default,
    /// Back faces first, then front faces.
    TwoPassesTwoSides,
}

/// A texture bound together with its sampler.
#[derive(Debug, Clone)]
pub struct TextureBinding {
    /// The texture.
    pub texture: Arc<Texture>,
    /// The sampler.
    pub sampler: Arc<Sampler>,
}

impl TextureBinding {
    /// Create a new texture binding.
    pub fn new(texture: Arc<Texture>, sampler: Arc<Sampler>) -> Self {
        Self { texture, sampler }
    }
}

/// A material instance with its own parameter block.
///
/// Values can only be set for parameters the material declares, with the
/// declared type.
///
/// # Example
///
/// ```ignore
/// let mut instance = MaterialInstance::new(material.clone()).with_label("helmet");
/// instance.set_parameter("ior", 1.5f32)?;
/// instance.set_texture("base_color_map", albedo, linear_sampler)?;
/// instance.set_double_sided(true);
/// ```
pub struct MaterialInstance {
    material: Arc<Material>,
    label: Option<String>,
    parameters: HashMap<&'static str, ParameterValue>,
    textures: HashMap<&'static str, TextureBinding>,
    double_sided: bool,
    culling_mode: CullingMode,
    transparency_mode: TransparencyMode,
}

impl MaterialInstance {
    /// Instance with no parameters written, back-face culling and default transparency.
    pub fn new(material: Arc<Material>) -> Self {
        Self {
            material,
            label: None,
            parameters: HashMap::new(),
            textures: HashMap::new(),
            double_sided: false,
            culling_mode: CullingMode::default(),
            transparency_mode: TransparencyMode::default(),
        }
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Variant this instance draws with.
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Get the instance label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set a value parameter.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::UnknownParameter`] if the material does not
    /// declare `name`, and [`GraphicsError::InvalidParameter`] if the value
    /// type does not match the declaration.
    pub fn set_parameter(
        &mut self,
        name: &str,
        value: impl Into<ParameterValue>,
    ) -> Result<(), GraphicsError> {
        let value = value.into();
        let info = self
            .material
            .parameter(name)
            .ok_or_else(|| GraphicsError::UnknownParameter(name.to_string()))?;
        if info.ty != value.ty() {
            return Err(GraphicsError::InvalidParameter(format!(
                "{name}: declared as {:?}, got {:?}",
                info.ty,
                value.ty()
            )));
        }
        self.parameters.insert(info.name, value);
        Ok(())
    }

    /// Bind a texture and sampler to a sampler parameter.
    ///
    /// # Errors
    ///
    /// Same as [`set_parameter`](Self::set_parameter).
    pub fn set_texture(
        &mut self,
        name: &str,
        texture: Arc<Texture>,
        sampler: Arc<Sampler>,
    ) -> Result<(), GraphicsError> {
        let info = self
            .material
            .parameter(name)
            .ok_or_else(|| GraphicsError::UnknownParameter(name.to_string()))?;
        if info.ty != ParameterType::Sampler2d {
            return Err(GraphicsError::InvalidParameter(format!(
                "{name}: declared as {:?}, got a texture",
                info.ty
            )));
        }
        self.textures
            .insert(info.name, TextureBinding::new(texture, sampler));
        Ok(())
    }

    /// Value written for `name`, if any.
    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// Texture and sampler bound to `name`, if any.
    pub fn texture(&self, name: &str) -> Option<&TextureBinding> {
        self.textures.get(name)
    }

    /// Written values, in no particular order.
    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, &ParameterValue)> {
        self.parameters.iter().map(|(name, value)| (*name, value))
    }

    /// Bound textures, in no particular order.
    pub fn textures(&self) -> impl Iterator<Item = (&'static str, &TextureBinding)> {
        self.textures.iter().map(|(name, binding)| (*name, binding))
    }

    /// Set whether both faces are shaded.
    pub fn set_double_sided(&mut self, double_sided: bool) {
        self.double_sided = double_sided;
    }

    /// Whether both faces are shaded.
    pub fn is_double_sided(&self) -> bool {
        self.double_sided
    }

    pub fn set_culling_mode(&mut self, mode: CullingMode) {
        self.culling_mode = mode;
    }

    pub fn culling_mode(&self) -> CullingMode {
        self.culling_mode
    }

    /// Set the transparency mode.
    pub fn set_transparency_mode(&mut self, mode: TransparencyMode) {
        self.transparency_mode = mode;
    }

    pub fn transparency_mode(&self) -> TransparencyMode {
        self.transparency_mode
    }
}

impl std::fmt::Debug for MaterialInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialInstance")
            .field("material", &self.material.label())
            .field("parameter_count", &self.parameters.len())
            .field("texture_count", &self.textures.len())
            .field("double_sided", &self.double_sided)
            .field("label", &self.label)
            .finish()
    }
}

// Ensure MaterialInstance is Send + Sync
static_assertions::assert_impl_all!(MaterialInstance: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GraphicsDevice;
    use crate::materials::{MaterialDescriptor, ShaderPackage};
    use crate::types::{SamplerDescriptor, TextureDescriptor, TextureFormat, TextureUsage};

    fn create_test_material(device: &Arc<GraphicsDevice>) -> Arc<Material> {
        let package = ShaderPackage::new("test", "fn main() {}")
            .with_parameter("ior", ParameterType::Float)
            .with_parameter("base_color_index", ParameterType::Int)
            .with_parameter("base_color_map", ParameterType::Sampler2d);
        device
            .create_material(&MaterialDescriptor::new(package).with_label("test_material"))
            .unwrap()
    }

    #[test]
    fn test_material_instance_creation() {
        let device = GraphicsDevice::dummy();
        let material = create_test_material(&device);
        let instance = MaterialInstance::new(material.clone()).with_label("test_instance");

        assert!(Arc::ptr_eq(instance.material(), &material));
        assert_eq!(instance.label(), Some("test_instance"));
        assert_eq!(instance.culling_mode(), CullingMode::Back);
        assert_eq!(instance.transparency_mode(), TransparencyMode::Default);
    }

    #[test]
    fn test_set_declared_parameter() {
        let device = GraphicsDevice::dummy();
        let mut instance = MaterialInstance::new(create_test_material(&device));

        instance.set_parameter("ior", 1.5f32).unwrap();
        instance.set_parameter("base_color_index", -1).unwrap();

        assert_eq!(instance.parameter("ior"), Some(&ParameterValue::Float(1.5)));
        assert_eq!(
            instance.parameter("base_color_index"),
            Some(&ParameterValue::Int(-1))
        );
        assert_eq!(instance.parameters().count(), 2);
    }

    #[test]
    fn test_set_unknown_parameter() {
        let device = GraphicsDevice::dummy();
        let mut instance = MaterialInstance::new(create_test_material(&device));

        let result = instance.set_parameter("reflectance", 0.5f32);
        assert!(matches!(result, Err(GraphicsError::UnknownParameter(_))));
        assert!(instance.parameter("reflectance").is_none());
    }

    #[test]
    fn test_set_parameter_type_mismatch() {
        let device = GraphicsDevice::dummy();
        let mut instance = MaterialInstance::new(create_test_material(&device));

        let result = instance.set_parameter("ior", 1);
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }

    #[test]
    fn test_set_texture() {
        let device = GraphicsDevice::dummy();
        let mut instance = MaterialInstance::new(create_test_material(&device));
        let texture = device
            .create_texture(&TextureDescriptor::new_2d(
                1,
                1,
                TextureFormat::Rgba8Unorm,
                TextureUsage::TEXTURE_BINDING,
            ))
            .unwrap();
        let sampler = device.create_sampler(&SamplerDescriptor::new()).unwrap();

        instance
            .set_texture("base_color_map", texture.clone(), sampler.clone())
            .unwrap();
        let binding = instance.texture("base_color_map").unwrap();
        assert!(Arc::ptr_eq(&binding.texture, &texture));

        let result = instance.set_texture("ior", texture, sampler);
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }
}
