//! Instance binding.
//!
//! Turns a resolved variant and a normalized key into a fully bound
//! [`MaterialInstance`]. Parameters the variant does not declare are
//! skipped, so one binder serves every palette.

use std::sync::Arc;

use ubermat_core::material::{FeatureKey, TextureChannel, UvMap};
use ubermat_core::math::Mat3;

use crate::error::GraphicsError;
use crate::materials::{
    CullingMode, Material, MaterialInstance, ParameterValue, TextureBinding, TransparencyMode,
};

use super::registry::channel_parameters;

/// Index of refraction written to variants that declare `ior`.
pub const DEFAULT_IOR: f32 = 1.5;
/// Reflectance written to variants that declare `reflectance`.
pub const DEFAULT_REFLECTANCE: f32 = 0.5;

/// Create an instance of `material` configured for `key`.
///
/// - Base channels always get their UV index and an identity UV matrix.
/// - Clear coat, sheen, volume and transmission channels are written only
///   when their feature is enabled on the key.
/// - Every declared texture parameter is bound to `dummy`, so nothing is
///   left unbound until the caller attaches real textures.
/// - `ior` and `reflectance` get their defaults when declared.
///
/// # Errors
///
/// Returns an error only if a declared parameter has a type that does not
/// match what the binder writes, which indicates a malformed package.
pub fn bind(
    material: &Arc<Material>,
    key: &FeatureKey,
    uv_map: &UvMap,
    dummy: &TextureBinding,
    label: &str,
) -> Result<MaterialInstance, GraphicsError> {
    let mut instance = MaterialInstance::new(Arc::clone(material)).with_label(label);

    for channel in TextureChannel::BASE {
        bind_channel(&mut instance, key, uv_map, channel)?;
    }

    instance.set_double_sided(key.double_sided);
    if key.double_sided {
        instance.set_culling_mode(CullingMode::None);
        instance.set_transparency_mode(TransparencyMode::TwoPassesTwoSides);
    } else {
        instance.set_culling_mode(CullingMode::Back);
        instance.set_transparency_mode(TransparencyMode::Default);
    }

    if key.has_clear_coat {
        for channel in TextureChannel::CLEAR_COAT {
            bind_channel(&mut instance, key, uv_map, channel)?;
        }
    }
    if key.has_sheen {
        for channel in TextureChannel::SHEEN {
            bind_channel(&mut instance, key, uv_map, channel)?;
        }
    }
    if key.has_volume {
        bind_channel(&mut instance, key, uv_map, TextureChannel::VolumeThickness)?;
    }
    if key.has_transmission {
        bind_channel(&mut instance, key, uv_map, TextureChannel::Transmission)?;
    }

    for parameter in material.sampler_parameters() {
        instance.set_texture(
            parameter.name,
            Arc::clone(&dummy.texture),
            Arc::clone(&dummy.sampler),
        )?;
    }

    set_if_declared(&mut instance, "ior", DEFAULT_IOR)?;
    set_if_declared(&mut instance, "reflectance", DEFAULT_REFLECTANCE)?;

    Ok(instance)
}

fn bind_channel(
    instance: &mut MaterialInstance,
    key: &FeatureKey,
    uv_map: &UvMap,
    channel: TextureChannel,
) -> Result<(), GraphicsError> {
    let names = channel_parameters(channel);
    let index = uv_map.uv_index(key.uv_source(channel), key.has_texture(channel));
    set_if_declared(instance, names.index, index)?;
    set_if_declared(instance, names.uv_matrix, Mat3::identity())?;
    Ok(())
}

fn set_if_declared(
    instance: &mut MaterialInstance,
    name: &str,
    value: impl Into<ParameterValue>,
) -> Result<(), GraphicsError> {
    if instance.material().has_parameter(name) {
        instance.set_parameter(name, value)
    } else {
        log::debug!(
            "bind: {:?} does not declare {name}, skipping",
            instance.material().label()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GraphicsDevice;
    use crate::materials::{MaterialDescriptor, ParameterType, ShaderPackage};
    use crate::types::{SamplerDescriptor, TextureDescriptor, TextureFormat, TextureUsage};
    use ubermat_core::material::UvSet;

    fn setup(package: ShaderPackage) -> (Arc<Material>, TextureBinding) {
        let device = GraphicsDevice::dummy();
        let material = device
            .create_material(&MaterialDescriptor::new(package))
            .unwrap();
        let texture = device
            .create_texture(&TextureDescriptor::new_2d(
                1,
                1,
                TextureFormat::Rgba8Unorm,
                TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
            ))
            .unwrap();
        let sampler = device.create_sampler(&SamplerDescriptor::default()).unwrap();
        (material, TextureBinding::new(texture, sampler))
    }

    fn full_package() -> ShaderPackage {
        let mut package = ShaderPackage::new("test", "fn fs_main() {}");
        for channel in TextureChannel::ALL {
            let names = channel_parameters(channel);
            package = package
                .with_parameter(names.index, ParameterType::Int)
                .with_parameter(names.uv_matrix, ParameterType::Mat3)
                .with_parameter(names.map, ParameterType::Sampler2d);
        }
        package
            .with_parameter("ior", ParameterType::Float)
            .with_parameter("reflectance", ParameterType::Float)
    }

    #[test]
    fn test_base_channel_indices() {
        let (material, dummy) = setup(full_package());
        let key = FeatureKey::new()
            .with_texture(TextureChannel::BaseColor, 0)
            .with_texture(TextureChannel::Occlusion, 3);
        let uv_map = UvMap::new().with_set(0, UvSet::Uv0).with_set(3, UvSet::Uv1);

        let instance = bind(&material, &key, &uv_map, &dummy, "m").unwrap();

        assert_eq!(instance.parameter("base_color_index"), Some(&ParameterValue::Int(0)));
        assert_eq!(instance.parameter("occlusion_index"), Some(&ParameterValue::Int(1)));
        assert_eq!(instance.parameter("normal_index"), Some(&ParameterValue::Int(-1)));
        assert_eq!(
            instance.parameter("emissive_uv_matrix"),
            Some(&ParameterValue::Mat3(Mat3::identity()))
        );
    }

    #[test]
    fn test_inactive_groups_are_not_written() {
        let (material, dummy) = setup(full_package());
        let key = FeatureKey::new().with_sheen(true);

        let instance = bind(&material, &key, &UvMap::new(), &dummy, "m").unwrap();

        assert!(instance.parameter("sheen_color_index").is_some());
        assert!(instance.parameter("sheen_roughness_uv_matrix").is_some());
        assert!(instance.parameter("clear_coat_index").is_none());
        assert!(instance.parameter("transmission_index").is_none());
        assert!(instance.parameter("volume_thickness_index").is_none());
    }

    #[test]
    fn test_volume_uses_its_own_uv_source() {
        let (material, dummy) = setup(full_package());
        let key = FeatureKey::new()
            .with_volume(true)
            .with_transmission(true)
            .with_texture(TextureChannel::Transmission, 0)
            .with_texture(TextureChannel::VolumeThickness, 1);
        let uv_map = UvMap::new().with_set(0, UvSet::Uv0).with_set(1, UvSet::Uv1);

        let instance = bind(&material, &key, &uv_map, &dummy, "m").unwrap();

        assert_eq!(instance.parameter("transmission_index"), Some(&ParameterValue::Int(0)));
        assert_eq!(
            instance.parameter("volume_thickness_index"),
            Some(&ParameterValue::Int(1))
        );
    }

    #[test]
    fn test_culling_state() {
        let (material, dummy) = setup(full_package());

        let key = FeatureKey::new().with_double_sided(true);
        let double = bind(&material, &key, &UvMap::new(), &dummy, "m").unwrap();
        assert!(double.is_double_sided());
        assert_eq!(double.culling_mode(), CullingMode::None);
        assert_eq!(double.transparency_mode(), TransparencyMode::TwoPassesTwoSides);

        let single = bind(&material, &FeatureKey::new(), &UvMap::new(), &dummy, "m").unwrap();
        assert!(!single.is_double_sided());
        assert_eq!(single.culling_mode(), CullingMode::Back);
        assert_eq!(single.transparency_mode(), TransparencyMode::Default);
    }

    #[test]
    fn test_every_sampler_gets_dummy() {
        let (material, dummy) = setup(full_package());
        let instance = bind(&material, &FeatureKey::new(), &UvMap::new(), &dummy, "m").unwrap();

        assert_eq!(instance.textures().count(), TextureChannel::COUNT);
        for (_, binding) in instance.textures() {
            assert!(Arc::ptr_eq(&binding.texture, &dummy.texture));
            assert!(Arc::ptr_eq(&binding.sampler, &dummy.sampler));
        }
    }

    #[test]
    fn test_optional_defaults_only_when_declared() {
        let (material, dummy) = setup(full_package());
        let instance = bind(&material, &FeatureKey::new(), &UvMap::new(), &dummy, "m").unwrap();
        assert_eq!(instance.parameter("ior"), Some(&ParameterValue::Float(1.5)));
        assert_eq!(instance.parameter("reflectance"), Some(&ParameterValue::Float(0.5)));

        let bare = ShaderPackage::new("bare", "fn fs_main() {}")
            .with_parameter("base_color_index", ParameterType::Int);
        let (material, dummy) = setup(bare);
        let instance = bind(&material, &FeatureKey::new(), &UvMap::new(), &dummy, "m").unwrap();
        assert!(instance.parameter("ior").is_none());
        assert!(instance.parameter("reflectance").is_none());
        assert_eq!(instance.parameters().count(), 1);
    }

    #[test]
    fn test_mistyped_declaration_is_an_error() {
        let package = ShaderPackage::new("bad", "fn fs_main() {}")
            .with_parameter("ior", ParameterType::Int);
        let (material, dummy) = setup(package);
        assert!(matches!(
            bind(&material, &FeatureKey::new(), &UvMap::new(), &dummy, "m"),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }
}
