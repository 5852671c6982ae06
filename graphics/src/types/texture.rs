//! Texture types and descriptors.

use bitflags::bitflags;

/// Texture dimensions in texels. `depth` is 1 for 2D textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent3d {
    pub fn new_2d(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 1,
        }
    }

    /// Number of texels covered by this extent.
    pub fn texel_count(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }
}

/// Formats material textures come in.
///
/// Base color and emissive maps are usually sRGB; data maps (normal,
/// metallic-roughness, occlusion) are linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TextureFormat {
    R8Unorm,
    Rg8Unorm,
    #[default]
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Rgba16Float,
}

impl TextureFormat {
    /// Bytes per texel.
    pub fn block_size(&self) -> u32 {
        match self {
            Self::R8Unorm => 1,
            Self::Rg8Unorm => 2,
            Self::Rgba8Unorm | Self::Rgba8UnormSrgb => 4,
            Self::Rgba16Float => 8,
        }
    }
}

bitflags! {
    /// How a texture will be used once created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureUsage: u32 {
        const COPY_SRC = 1 << 0;
        /// Target of [`GraphicsDevice::write_texture`](crate::GraphicsDevice::write_texture).
        const COPY_DST = 1 << 1;
        /// Bindable to a material's texture parameter.
        const TEXTURE_BINDING = 1 << 2;
    }
}

/// Descriptor for [`GraphicsDevice::create_texture`](crate::GraphicsDevice::create_texture).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    pub label: Option<String>,
    pub size: Extent3d,
    pub mip_level_count: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
}

impl TextureDescriptor {
    /// Single-mip 2D texture.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            label: None,
            size: Extent3d::new_2d(width, height),
            mip_level_count: 1,
            format,
            usage,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of bytes a full upload of mip level 0 must provide.
    pub fn upload_size(&self) -> u64 {
        self.size.texel_count() * self.format.block_size() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_size() {
        let desc = TextureDescriptor::new_2d(
            1,
            1,
            TextureFormat::Rgba8Unorm,
            TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
        );
        assert_eq!(desc.upload_size(), 4);

        let desc = TextureDescriptor::new_2d(4, 2, TextureFormat::Rgba16Float, TextureUsage::empty());
        assert_eq!(desc.upload_size(), 64);
    }
}
