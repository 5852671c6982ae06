//! Common utilities for ubershader integration tests.
//!
//! Every test runs against the dummy backend so compile and texture
//! counters can be checked, with warnings captured by a collecting sink.

#![allow(dead_code)]

use std::sync::Arc;

use ubermat_core::material::{AlphaMode, FeatureKey, ShadingModel, UvMap};
use ubermat_graphics::{
    CollectingSink, DummyBackend, GraphicsDevice, LoaderDescriptor, MaterialInstance,
    UbershaderLoader, VariantRegistry, VariantSlot,
};

/// Loader wired to an observable backend and sink.
pub struct TestContext {
    pub backend: Arc<DummyBackend>,
    pub sink: Arc<CollectingSink>,
    pub loader: UbershaderLoader,
}

impl TestContext {
    /// Context with the built-in palette.
    pub fn new() -> Self {
        Self::with_registry(VariantRegistry::builtin())
    }

    /// Context with a custom palette.
    pub fn with_registry(registry: VariantRegistry) -> Self {
        Self::build(DummyBackend::new(), registry)
    }

    /// Context whose backend refuses to compile programs.
    pub fn with_failing_programs() -> Self {
        Self::build(DummyBackend::new().with_failing_programs(), VariantRegistry::builtin())
    }

    fn build(backend: DummyBackend, registry: VariantRegistry) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let backend = Arc::new(backend);
        let sink = Arc::new(CollectingSink::new());
        let device = GraphicsDevice::new(backend.clone());
        let loader = UbershaderLoader::new(
            device,
            LoaderDescriptor::new()
                .with_registry(registry)
                .with_sink(sink.clone())
                .with_label("test_loader"),
        )
        .expect("loader creation should succeed on the dummy backend");

        Self {
            backend,
            sink,
            loader,
        }
    }

    /// Create an instance, expecting the key to be supported.
    pub fn instance(&self, key: &mut FeatureKey) -> MaterialInstance {
        let mut uv_map = UvMap::new();
        self.loader
            .create_material_instance(key, &mut uv_map, "test_material")
            .expect("instance creation should not fail")
            .expect("non-diagnostics keys always produce an instance")
    }
}

/// A normalized key that maps to `slot`.
pub fn key_for_slot(slot: VariantSlot) -> FeatureKey {
    match slot {
        VariantSlot::SHEEN => FeatureKey::new().with_sheen(true),
        VariantSlot::TRANSMISSION => FeatureKey::new().with_transmission(true),
        VariantSlot::VOLUME => FeatureKey::new().with_volume(true).with_transmission(true),
        _ => FeatureKey::new()
            .with_shading(ShadingModel::ALL[slot.index() % 3])
            .with_alpha_mode(AlphaMode::ALL[slot.index() / 3]),
    }
}
