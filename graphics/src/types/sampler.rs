//! Sampler state.
//!
//! Material textures are sampled with one filter and one address mode on
//! all axes, so the descriptor does not split them per axis.

/// Texel filtering, used for magnification, minification and mip selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
}

/// Handling of UVs outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

/// Descriptor for [`GraphicsDevice::create_sampler`](crate::GraphicsDevice::create_sampler).
///
/// Defaults to nearest filtering and clamping, which is what placeholder
/// textures need.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamplerDescriptor {
    pub label: Option<String>,
    pub filter: FilterMode,
    pub address_mode: AddressMode,
}

impl SamplerDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }
}
