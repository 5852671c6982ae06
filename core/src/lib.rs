//! # Ubermat Core
//!
//! CPU-side data shared between asset importers and the ubershader material
//! engine: feature keys describing what a surface needs, texture channels,
//! UV-set mapping and vertex attribute semantics.
//!
//! Nothing in this crate touches the GPU.

pub mod material;
pub mod math;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("Ubermat Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
