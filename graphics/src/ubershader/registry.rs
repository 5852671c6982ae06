//! Registration of precompiled shader packages per variant slot.
//!
//! The registry is independent of the slot function: it only says which
//! slots have a package. Reduced palettes leave slots empty, and lookups of
//! empty slots fall back to [`VariantSlot::BASELINE`].
//!
//! # Built-in palette
//!
//! | Slot | Variant | Source |
//! |------|---------|--------|
//! | 0, 3, 6 | unlit × opaque/masked/fade | `unlit.wgsl` |
//! | 1, 4, 7 | lit × opaque/masked/fade | `lit.wgsl` |
//! | 2, 5, 8 | specular-glossiness × opaque/masked/fade | `specular_glossiness.wgsl` |
//! | 9 | lit sheen | `lit_sheen.wgsl` |
//! | 10 | lit transmission | `lit_transmission.wgsl` |
//! | 11 | lit volume | `lit_volume.wgsl` |
//!
//! With the `lite` feature only slots 1 and 7 are populated, both from
//! `lite.wgsl`.

use ubermat_core::material::{AlphaMode, TextureChannel};
#[cfg(not(feature = "lite"))]
use ubermat_core::material::ShadingModel;

use crate::error::GraphicsError;
use crate::materials::{ParameterInfo, ParameterType, ShaderPackage};

use super::slot::VariantSlot;

/// Name of the override constant selecting the alpha mode.
pub const ALPHA_MODE_CONSTANT: &str = "ALPHA_MODE";

macro_rules! ubershader_source {
    ($file:literal) => {
        concat!(
            include_str!("../../../shaders/ubershader/common.wgsl"),
            include_str!(concat!("../../../shaders/ubershader/", $file))
        )
    };
}

#[cfg(not(feature = "lite"))]
const UNLIT_SOURCE: &str = ubershader_source!("unlit.wgsl");
#[cfg(not(feature = "lite"))]
const LIT_SOURCE: &str = ubershader_source!("lit.wgsl");
#[cfg(not(feature = "lite"))]
const SPECULAR_GLOSSINESS_SOURCE: &str = ubershader_source!("specular_glossiness.wgsl");
#[cfg(not(feature = "lite"))]
const SHEEN_SOURCE: &str = ubershader_source!("lit_sheen.wgsl");
#[cfg(not(feature = "lite"))]
const TRANSMISSION_SOURCE: &str = ubershader_source!("lit_transmission.wgsl");
#[cfg(not(feature = "lite"))]
const VOLUME_SOURCE: &str = ubershader_source!("lit_volume.wgsl");
#[cfg(feature = "lite")]
const LITE_SOURCE: &str = ubershader_source!("lite.wgsl");

/// Names of the three parameters a texture channel owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelParameters {
    /// UV set index (`Int`, `-1` when the channel has no texture).
    pub index: &'static str,
    /// UV transform (`Mat3`).
    pub uv_matrix: &'static str,
    /// Texture (`Sampler2d`).
    pub map: &'static str,
}

/// Parameter names of a texture channel.
pub const fn channel_parameters(channel: TextureChannel) -> ChannelParameters {
    macro_rules! names {
        ($prefix:literal) => {
            ChannelParameters {
                index: concat!($prefix, "_index"),
                uv_matrix: concat!($prefix, "_uv_matrix"),
                map: concat!($prefix, "_map"),
            }
        };
    }
    match channel {
        TextureChannel::BaseColor => names!("base_color"),
        TextureChannel::Normal => names!("normal"),
        TextureChannel::MetallicRoughness => names!("metallic_roughness"),
        TextureChannel::Occlusion => names!("occlusion"),
        TextureChannel::Emissive => names!("emissive"),
        TextureChannel::ClearCoat => names!("clear_coat"),
        TextureChannel::ClearCoatRoughness => names!("clear_coat_roughness"),
        TextureChannel::ClearCoatNormal => names!("clear_coat_normal"),
        TextureChannel::SheenColor => names!("sheen_color"),
        TextureChannel::SheenRoughness => names!("sheen_roughness"),
        TextureChannel::Transmission => names!("transmission"),
        TextureChannel::VolumeThickness => names!("volume_thickness"),
    }
}

/// Index, UV matrix and map declarations for a set of channels.
#[cfg(not(feature = "lite"))]
fn channel_declarations(channels: &[TextureChannel]) -> Vec<ParameterInfo> {
    channels
        .iter()
        .flat_map(|&channel| {
            let names = channel_parameters(channel);
            [
                ParameterInfo::new(names.index, ParameterType::Int),
                ParameterInfo::new(names.uv_matrix, ParameterType::Mat3),
                ParameterInfo::new(names.map, ParameterType::Sampler2d),
            ]
        })
        .collect()
}

#[cfg(not(feature = "lite"))]
const STANDARD_FACTORS: [ParameterInfo; 7] = [
    ParameterInfo::new("base_color_factor", ParameterType::Float4),
    ParameterInfo::new("emissive_factor", ParameterType::Float3),
    ParameterInfo::new("metallic_factor", ParameterType::Float),
    ParameterInfo::new("roughness_factor", ParameterType::Float),
    ParameterInfo::new("normal_scale", ParameterType::Float),
    ParameterInfo::new("occlusion_strength", ParameterType::Float),
    ParameterInfo::new("alpha_cutoff", ParameterType::Float),
];

#[cfg(not(feature = "lite"))]
const CLEAR_COAT_FACTORS: [ParameterInfo; 3] = [
    ParameterInfo::new("clear_coat_factor", ParameterType::Float),
    ParameterInfo::new("clear_coat_roughness_factor", ParameterType::Float),
    ParameterInfo::new("clear_coat_normal_scale", ParameterType::Float),
];

const IOR: ParameterInfo = ParameterInfo::new("ior", ParameterType::Float);
const REFLECTANCE: ParameterInfo = ParameterInfo::new("reflectance", ParameterType::Float);

fn package(
    slot: VariantSlot,
    source: &'static str,
    alpha: AlphaMode,
    parameters: Vec<ParameterInfo>,
) -> ShaderPackage {
    ShaderPackage::new(slot.name(), source)
        .with_constant(ALPHA_MODE_CONSTANT, alpha.index() as f64)
        .with_parameters(parameters)
}

#[cfg(not(feature = "lite"))]
fn unlit_package(slot: VariantSlot, alpha: AlphaMode) -> ShaderPackage {
    let mut params = channel_declarations(&TextureChannel::BASE);
    params.extend([
        ParameterInfo::new("base_color_factor", ParameterType::Float4),
        ParameterInfo::new("emissive_factor", ParameterType::Float3),
        ParameterInfo::new("alpha_cutoff", ParameterType::Float),
    ]);
    package(slot, UNLIT_SOURCE, alpha, params)
}

#[cfg(not(feature = "lite"))]
fn lit_package(slot: VariantSlot, alpha: AlphaMode) -> ShaderPackage {
    let mut params = channel_declarations(&TextureChannel::BASE);
    params.extend(channel_declarations(&TextureChannel::CLEAR_COAT));
    params.extend(STANDARD_FACTORS);
    params.extend(CLEAR_COAT_FACTORS);
    params.extend([IOR, REFLECTANCE]);
    package(slot, LIT_SOURCE, alpha, params)
}

#[cfg(not(feature = "lite"))]
fn specular_glossiness_package(slot: VariantSlot, alpha: AlphaMode) -> ShaderPackage {
    let mut params = channel_declarations(&TextureChannel::BASE);
    params.extend(channel_declarations(&TextureChannel::CLEAR_COAT));
    params.extend([
        ParameterInfo::new("base_color_factor", ParameterType::Float4),
        ParameterInfo::new("specular_factor", ParameterType::Float3),
        ParameterInfo::new("glossiness_factor", ParameterType::Float),
        ParameterInfo::new("emissive_factor", ParameterType::Float3),
        ParameterInfo::new("normal_scale", ParameterType::Float),
        ParameterInfo::new("occlusion_strength", ParameterType::Float),
        ParameterInfo::new("alpha_cutoff", ParameterType::Float),
    ]);
    params.extend(CLEAR_COAT_FACTORS);
    package(slot, SPECULAR_GLOSSINESS_SOURCE, alpha, params)
}

#[cfg(not(feature = "lite"))]
fn sheen_package() -> ShaderPackage {
    let mut params = channel_declarations(&TextureChannel::BASE);
    params.extend(channel_declarations(&TextureChannel::SHEEN));
    params.extend(STANDARD_FACTORS);
    params.extend([
        ParameterInfo::new("sheen_color_factor", ParameterType::Float3),
        ParameterInfo::new("sheen_roughness_factor", ParameterType::Float),
        REFLECTANCE,
    ]);
    package(VariantSlot::SHEEN, SHEEN_SOURCE, AlphaMode::Opaque, params)
}

#[cfg(not(feature = "lite"))]
fn transmission_package() -> ShaderPackage {
    let mut params = channel_declarations(&TextureChannel::BASE);
    params.extend(channel_declarations(&[TextureChannel::Transmission]));
    params.extend(STANDARD_FACTORS);
    params.extend([
        ParameterInfo::new("transmission_factor", ParameterType::Float),
        IOR,
    ]);
    package(
        VariantSlot::TRANSMISSION,
        TRANSMISSION_SOURCE,
        AlphaMode::Blend,
        params,
    )
}

#[cfg(not(feature = "lite"))]
fn volume_package() -> ShaderPackage {
    let mut params = channel_declarations(&TextureChannel::BASE);
    params.extend(channel_declarations(&[
        TextureChannel::Transmission,
        TextureChannel::VolumeThickness,
    ]));
    params.extend(STANDARD_FACTORS);
    params.extend([
        ParameterInfo::new("attenuation_color", ParameterType::Float3),
        ParameterInfo::new("attenuation_distance", ParameterType::Float),
        ParameterInfo::new("transmission_factor", ParameterType::Float),
        ParameterInfo::new("volume_thickness_factor", ParameterType::Float),
        IOR,
    ]);
    package(VariantSlot::VOLUME, VOLUME_SOURCE, AlphaMode::Blend, params)
}

#[cfg(feature = "lite")]
fn lite_package(slot: VariantSlot, alpha: AlphaMode) -> ShaderPackage {
    let mut params: Vec<ParameterInfo> = TextureChannel::BASE
        .iter()
        .flat_map(|&channel| {
            let names = channel_parameters(channel);
            [
                ParameterInfo::new(names.index, ParameterType::Int),
                ParameterInfo::new(names.map, ParameterType::Sampler2d),
            ]
        })
        .collect();
    params.extend([
        ParameterInfo::new("base_color_factor", ParameterType::Float4),
        ParameterInfo::new("emissive_factor", ParameterType::Float3),
        ParameterInfo::new("metallic_factor", ParameterType::Float),
        ParameterInfo::new("roughness_factor", ParameterType::Float),
        ParameterInfo::new("alpha_cutoff", ParameterType::Float),
    ]);
    package(slot, LITE_SOURCE, alpha, params)
}

/// Shader packages registered per [`VariantSlot`].
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    packages: [Option<ShaderPackage>; VariantSlot::COUNT],
}

impl VariantRegistry {
    /// Create a registry with no packages.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The palette compiled into this build.
    #[cfg(not(feature = "lite"))]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for shading in ShadingModel::ALL {
            for alpha in AlphaMode::ALL {
                let slot = VariantSlot::grid(shading, alpha);
                let package = match shading {
                    ShadingModel::Unlit => unlit_package(slot, alpha),
                    ShadingModel::Lit => lit_package(slot, alpha),
                    ShadingModel::SpecularGlossiness => specular_glossiness_package(slot, alpha),
                };
                registry.set(slot, Some(package));
            }
        }
        registry
            .with_variant(VariantSlot::SHEEN, sheen_package())
            .with_variant(VariantSlot::TRANSMISSION, transmission_package())
            .with_variant(VariantSlot::VOLUME, volume_package())
    }

    /// The palette compiled into this build.
    #[cfg(feature = "lite")]
    pub fn builtin() -> Self {
        let fade = VariantSlot::grid(ubermat_core::material::ShadingModel::Lit, AlphaMode::Blend);
        Self::empty()
            .with_variant(
                VariantSlot::BASELINE,
                lite_package(VariantSlot::BASELINE, AlphaMode::Opaque),
            )
            .with_variant(fade, lite_package(fade, AlphaMode::Blend))
    }

    /// Register a package for a slot, replacing any previous one.
    pub fn with_variant(mut self, slot: VariantSlot, package: ShaderPackage) -> Self {
        self.set(slot, Some(package));
        self
    }

    /// Remove the package of a slot.
    pub fn without_variant(mut self, slot: VariantSlot) -> Self {
        self.set(slot, None);
        self
    }

    fn set(&mut self, slot: VariantSlot, package: Option<ShaderPackage>) {
        self.packages[slot.index()] = package;
    }

    /// Get the package registered for a slot.
    pub fn get(&self, slot: VariantSlot) -> Option<&ShaderPackage> {
        self.packages[slot.index()].as_ref()
    }

    /// Whether a slot has a package.
    pub fn contains(&self, slot: VariantSlot) -> bool {
        self.get(slot).is_some()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.packages.iter().filter(|p| p.is_some()).count()
    }

    /// Whether no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that the registry can serve every key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::FeatureNotSupported`] when the baseline slot
    /// is empty, since fallback resolution would have nothing to land on.
    pub fn validate(&self) -> Result<(), GraphicsError> {
        if self.contains(VariantSlot::BASELINE) {
            Ok(())
        } else {
            Err(GraphicsError::FeatureNotSupported(format!(
                "variant registry has no package for the baseline slot {}",
                VariantSlot::BASELINE
            )))
        }
    }
}
