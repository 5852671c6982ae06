//! Descriptors for the GPU resources the material engine creates.

mod sampler;
mod texture;

pub use sampler::{AddressMode, FilterMode, SamplerDescriptor};
pub use texture::{Extent3d, TextureDescriptor, TextureFormat, TextureUsage};
