//! Feature key and the enums it is built from.

use bitflags::bitflags;

/// Lighting model family of a surface.
///
/// The discriminant is the column of the variant grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingModel {
    /// No lighting, base color only.
    Unlit = 0,
    /// Metallic-roughness PBR.
    #[default]
    Lit = 1,
    /// Specular-glossiness PBR.
    SpecularGlossiness = 2,
}

impl ShadingModel {
    /// All shading models, in index order.
    pub const ALL: [Self; 3] = [Self::Unlit, Self::Lit, Self::SpecularGlossiness];

    /// Index of this model in the variant grid.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Alpha rendering mode.
///
/// Affects pipeline state (blend configuration) and selects the row of the
/// variant grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Fully opaque (alpha ignored).
    #[default]
    Opaque = 0,
    /// Alpha masking with cutoff threshold.
    Mask = 1,
    /// Full alpha blending.
    Blend = 2,
}

impl AlphaMode {
    /// All alpha modes, in index order.
    pub const ALL: [Self; 3] = [Self::Opaque, Self::Mask, Self::Blend];

    /// Index of this mode in the variant grid.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A texture input of the surface model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    /// Base color (albedo) texture.
    BaseColor,
    /// Tangent-space normal map.
    Normal,
    /// Metallic-roughness texture (B=metallic, G=roughness).
    MetallicRoughness,
    /// Ambient occlusion texture.
    Occlusion,
    /// Emissive texture.
    Emissive,
    /// Clear coat intensity texture.
    ClearCoat,
    /// Clear coat roughness texture.
    ClearCoatRoughness,
    /// Clear coat normal map.
    ClearCoatNormal,
    /// Sheen color texture.
    SheenColor,
    /// Sheen roughness texture.
    SheenRoughness,
    /// Transmission factor texture.
    Transmission,
    /// Volume thickness texture.
    VolumeThickness,
}

impl TextureChannel {
    /// Number of texture channels.
    pub const COUNT: usize = 12;

    /// All channels, in priority order (base color first).
    pub const ALL: [Self; Self::COUNT] = [
        Self::BaseColor,
        Self::Normal,
        Self::MetallicRoughness,
        Self::Occlusion,
        Self::Emissive,
        Self::ClearCoat,
        Self::ClearCoatRoughness,
        Self::ClearCoatNormal,
        Self::SheenColor,
        Self::SheenRoughness,
        Self::Transmission,
        Self::VolumeThickness,
    ];

    /// Channels every variant reads.
    pub const BASE: [Self; 5] = [
        Self::BaseColor,
        Self::Normal,
        Self::MetallicRoughness,
        Self::Occlusion,
        Self::Emissive,
    ];

    /// Channels of the clear coat feature.
    pub const CLEAR_COAT: [Self; 3] = [
        Self::ClearCoat,
        Self::ClearCoatRoughness,
        Self::ClearCoatNormal,
    ];

    /// Channels of the sheen feature.
    pub const SHEEN: [Self; 2] = [Self::SheenColor, Self::SheenRoughness];

    /// Stable index of this channel, usable for per-channel arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Presence flag for this channel.
    pub const fn flag(self) -> TextureChannels {
        TextureChannels::from_bits_truncate(1 << self as u32)
    }

    /// Snake-case name, also the prefix of the channel's shader parameters.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BaseColor => "base_color",
            Self::Normal => "normal",
            Self::MetallicRoughness => "metallic_roughness",
            Self::Occlusion => "occlusion",
            Self::Emissive => "emissive",
            Self::ClearCoat => "clear_coat",
            Self::ClearCoatRoughness => "clear_coat_roughness",
            Self::ClearCoatNormal => "clear_coat_normal",
            Self::SheenColor => "sheen_color",
            Self::SheenRoughness => "sheen_roughness",
            Self::Transmission => "transmission",
            Self::VolumeThickness => "volume_thickness",
        }
    }
}

bitflags! {
    /// Set of texture channels that carry a texture.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureChannels: u16 {
        /// Base color texture present.
        const BASE_COLOR = 1 << 0;
        /// Normal map present.
        const NORMAL = 1 << 1;
        /// Metallic-roughness texture present.
        const METALLIC_ROUGHNESS = 1 << 2;
        /// Occlusion texture present.
        const OCCLUSION = 1 << 3;
        /// Emissive texture present.
        const EMISSIVE = 1 << 4;
        /// Clear coat texture present.
        const CLEAR_COAT = 1 << 5;
        /// Clear coat roughness texture present.
        const CLEAR_COAT_ROUGHNESS = 1 << 6;
        /// Clear coat normal map present.
        const CLEAR_COAT_NORMAL = 1 << 7;
        /// Sheen color texture present.
        const SHEEN_COLOR = 1 << 8;
        /// Sheen roughness texture present.
        const SHEEN_ROUGHNESS = 1 << 9;
        /// Transmission texture present.
        const TRANSMISSION = 1 << 10;
        /// Volume thickness texture present.
        const VOLUME_THICKNESS = 1 << 11;
    }
}

/// Description of the rendering features a surface requires.
///
/// This is a small `Copy` value owned by the caller. The ubershader loader
/// rewrites it in place when a requested combination cannot be honored, so
/// after instantiation the key describes what was actually bound.
///
/// Exactly one [`ShadingModel`] and one [`AlphaMode`] are set by
/// construction. Clear coat is mutually exclusive with sheen, transmission
/// and volume; the loader resolves conflicts before variant lookup.
///
/// # Example
///
/// ```ignore
/// use ubermat_core::material::*;
///
/// let key = FeatureKey::new()
///     .with_alpha_mode(AlphaMode::Blend)
///     .with_double_sided(true)
///     .with_texture(TextureChannel::BaseColor, 0)
///     .with_texture(TextureChannel::Occlusion, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureKey {
    /// Lighting model family.
    pub shading: ShadingModel,
    /// Alpha rendering mode.
    pub alpha_mode: AlphaMode,
    /// Render both faces.
    pub double_sided: bool,
    /// Clear coat layer enabled.
    pub has_clear_coat: bool,
    /// Sheen layer enabled.
    pub has_sheen: bool,
    /// Transmission enabled.
    pub has_transmission: bool,
    /// Volume (thickness/attenuation) enabled.
    pub has_volume: bool,
    /// Shader diagnostics requested. Not available from precompiled variants.
    pub enable_diagnostics: bool,
    /// Channels that carry a texture.
    pub textures: TextureChannels,
    /// Source UV set index per channel, indexed by [`TextureChannel::index`].
    pub uv_sources: [u8; TextureChannel::COUNT],
}

impl FeatureKey {
    /// Create a key for a lit, opaque, single-sided surface without textures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shading model.
    #[must_use]
    pub fn with_shading(mut self, shading: ShadingModel) -> Self {
        self.shading = shading;
        self
    }

    /// Set the alpha mode.
    #[must_use]
    pub fn with_alpha_mode(mut self, alpha_mode: AlphaMode) -> Self {
        self.alpha_mode = alpha_mode;
        self
    }

    /// Set double-sided rendering.
    #[must_use]
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// Enable or disable the clear coat layer.
    #[must_use]
    pub fn with_clear_coat(mut self, enabled: bool) -> Self {
        self.has_clear_coat = enabled;
        self
    }

    /// Enable or disable the sheen layer.
    #[must_use]
    pub fn with_sheen(mut self, enabled: bool) -> Self {
        self.has_sheen = enabled;
        self
    }

    /// Enable or disable transmission.
    #[must_use]
    pub fn with_transmission(mut self, enabled: bool) -> Self {
        self.has_transmission = enabled;
        self
    }

    /// Enable or disable volume.
    #[must_use]
    pub fn with_volume(mut self, enabled: bool) -> Self {
        self.has_volume = enabled;
        self
    }

    /// Request shader diagnostics.
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.enable_diagnostics = enabled;
        self
    }

    /// Mark a channel as textured, sampled from the given source UV set.
    #[must_use]
    pub fn with_texture(mut self, channel: TextureChannel, uv_source: u8) -> Self {
        self.textures.insert(channel.flag());
        self.uv_sources[channel.index()] = uv_source;
        self
    }

    /// Whether the channel carries a texture.
    pub fn has_texture(&self, channel: TextureChannel) -> bool {
        self.textures.contains(channel.flag())
    }

    /// Source UV set index of the channel.
    pub fn uv_source(&self, channel: TextureChannel) -> u8 {
        self.uv_sources[channel.index()]
    }

    /// Whether the feature that reads `channel` is enabled. Base channels
    /// are always read.
    pub fn reads_channel(&self, channel: TextureChannel) -> bool {
        match channel {
            TextureChannel::ClearCoat
            | TextureChannel::ClearCoatRoughness
            | TextureChannel::ClearCoatNormal => self.has_clear_coat,
            TextureChannel::SheenColor | TextureChannel::SheenRoughness => self.has_sheen,
            TextureChannel::Transmission => self.has_transmission,
            TextureChannel::VolumeThickness => self.has_volume,
            _ => true,
        }
    }

    /// Whether any of sheen, transmission or volume is enabled.
    pub fn has_exclusive_feature(&self) -> bool {
        self.has_sheen || self.has_transmission || self.has_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_is_lit_opaque() {
        let key = FeatureKey::new();
        assert_eq!(key.shading, ShadingModel::Lit);
        assert_eq!(key.alpha_mode, AlphaMode::Opaque);
        assert!(!key.double_sided);
        assert!(!key.has_exclusive_feature());
        assert!(key.textures.is_empty());
    }

    #[test]
    fn channel_flags_match_named_constants() {
        assert_eq!(TextureChannel::BaseColor.flag(), TextureChannels::BASE_COLOR);
        assert_eq!(TextureChannel::Occlusion.flag(), TextureChannels::OCCLUSION);
        assert_eq!(
            TextureChannel::ClearCoatNormal.flag(),
            TextureChannels::CLEAR_COAT_NORMAL
        );
        assert_eq!(
            TextureChannel::VolumeThickness.flag(),
            TextureChannels::VOLUME_THICKNESS
        );
    }

    #[test]
    fn channel_indices_follow_all_order() {
        for (i, channel) in TextureChannel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn with_texture_records_uv_source() {
        let key = FeatureKey::new()
            .with_texture(TextureChannel::Emissive, 3)
            .with_texture(TextureChannel::BaseColor, 1);

        assert!(key.has_texture(TextureChannel::Emissive));
        assert!(key.has_texture(TextureChannel::BaseColor));
        assert!(!key.has_texture(TextureChannel::Normal));
        assert_eq!(key.uv_source(TextureChannel::Emissive), 3);
        assert_eq!(key.uv_source(TextureChannel::BaseColor), 1);
    }

    #[test]
    fn keys_compare_by_value() {
        let a = FeatureKey::new().with_sheen(true);
        let b = FeatureKey::new().with_sheen(true);
        let c = FeatureKey::new().with_volume(true);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.has_exclusive_feature());
    }

    #[test]
    fn reads_channel_follows_feature_flags() {
        let key = FeatureKey::new().with_transmission(true);
        assert!(key.reads_channel(TextureChannel::Emissive));
        assert!(key.reads_channel(TextureChannel::Transmission));
        assert!(!key.reads_channel(TextureChannel::SheenColor));
        assert!(!key.reads_channel(TextureChannel::ClearCoatNormal));
        assert!(!key.reads_channel(TextureChannel::VolumeThickness));
    }
}
