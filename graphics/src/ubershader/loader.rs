//! Material instance creation on top of the precompiled palette.

use std::sync::Arc;

use ubermat_core::material::{constrain_material, FeatureKey, UvMap};
use ubermat_core::mesh::VertexAttributeSemantic;

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::materials::{Material, MaterialInstance, TextureBinding};
use crate::resources::Texture;
use crate::types::{SamplerDescriptor, TextureDescriptor, TextureFormat, TextureUsage};

use super::binder::bind;
use super::cache::VariantCache;
use super::diagnostics::{DiagnosticSink, LogSink};
use super::registry::VariantRegistry;
use super::resolver::{normalize, resolve_variant};
use super::slot::VariantSlot;

/// Texel written to the placeholder texture.
const DUMMY_TEXEL: [u8; 4] = [0, 0, 0, 0];

/// Configuration for an [`UbershaderLoader`].
pub struct LoaderDescriptor {
    /// Variants available to the loader.
    pub registry: VariantRegistry,
    /// Receiver of resolution warnings.
    pub sink: Arc<dyn DiagnosticSink>,
    /// Debug label.
    pub label: Option<String>,
    /// Sampler paired with the placeholder texture.
    pub dummy_sampler: SamplerDescriptor,
}

impl LoaderDescriptor {
    /// Built-in palette, warnings forwarded to `log`.
    pub fn new() -> Self {
        Self {
            registry: VariantRegistry::builtin(),
            sink: Arc::new(LogSink),
            label: None,
            dummy_sampler: SamplerDescriptor::new().with_label("ubershader_dummy_sampler"),
        }
    }

    pub fn with_registry(mut self, registry: VariantRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_dummy_sampler(mut self, sampler: SamplerDescriptor) -> Self {
        self.dummy_sampler = sampler;
        self
    }
}

impl Default for LoaderDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoaderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderDescriptor")
            .field("registry", &self.registry)
            .field("label", &self.label)
            .field("dummy_sampler", &self.dummy_sampler)
            .finish_non_exhaustive()
    }
}

/// Creates material instances from feature keys using a fixed palette of
/// precompiled variants.
///
/// Variants compile lazily, once per slot, and are shared by every instance
/// resolved to that slot. A 1×1 placeholder texture is created up front and
/// bound to every texture parameter of new instances.
///
/// Call [`destroy_materials`](Self::destroy_materials) to release the GPU
/// objects owned by the loader.
///
/// # Example
///
/// ```ignore
/// let loader = UbershaderLoader::new(device, LoaderDescriptor::new())?;
///
/// let mut key = FeatureKey::new()
///     .with_alpha_mode(AlphaMode::Blend)
///     .with_texture(TextureChannel::BaseColor, 0);
/// let mut uv_map = UvMap::new();
/// let instance = loader.create_material_instance(&mut key, &mut uv_map, "glass")?;
/// ```
pub struct UbershaderLoader {
    device: Arc<GraphicsDevice>,
    cache: VariantCache,
    dummy: TextureBinding,
    sink: Arc<dyn DiagnosticSink>,
    label: Option<String>,
}

impl UbershaderLoader {
    /// Create a loader and its placeholder texture.
    ///
    /// # Errors
    ///
    /// Fails if the registry has no baseline variant, or if the placeholder
    /// texture or its sampler cannot be created.
    pub fn new(
        device: Arc<GraphicsDevice>,
        descriptor: LoaderDescriptor,
    ) -> Result<Self, GraphicsError> {
        let LoaderDescriptor {
            registry,
            sink,
            label,
            dummy_sampler,
        } = descriptor;

        registry.validate()?;

        let texture = device.create_texture(
            &TextureDescriptor::new_2d(
                1,
                1,
                TextureFormat::Rgba8Unorm,
                TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
            )
            .with_label("ubershader_dummy_texture"),
        )?;
        device.write_texture(&texture, &DUMMY_TEXEL)?;
        let sampler = device.create_sampler(&dummy_sampler)?;

        log::info!(
            "UbershaderLoader {:?}: {} of {} variants registered on {}",
            label,
            registry.len(),
            VariantSlot::COUNT,
            device.name()
        );

        Ok(Self {
            cache: VariantCache::new(Arc::clone(&device), registry),
            device,
            dummy: TextureBinding::new(texture, sampler),
            sink,
            label,
        })
    }

    /// Create an instance for a feature key.
    ///
    /// `key` and `uv_map` are updated to describe what was actually bound:
    /// conflicting features are cleared, textures that do not fit in two UV
    /// sets are removed, a missing variant rewrites the key to the baseline
    /// one, and `uv_map` is rebuilt. Each change is reported to the sink.
    ///
    /// Returns `Ok(None)` for keys requesting diagnostics mode.
    ///
    /// # Errors
    ///
    /// Fails when a variant does not compile.
    pub fn create_material_instance(
        &self,
        key: &mut FeatureKey,
        uv_map: &mut UvMap,
        label: &str,
    ) -> Result<Option<MaterialInstance>, GraphicsError> {
        match normalize(key, label, self.sink.as_ref()) {
            Ok(()) => {}
            Err(GraphicsError::FeatureNotSupported(message)) => {
                self.sink.warn(&message);
                return Ok(None);
            }
            Err(err) => return Err(err),
        }

        for channel in constrain_material(key, uv_map) {
            self.sink.warn(&format!(
                "'{label}': {} texture does not fit in two UV sets, disabling it",
                channel.name()
            ));
        }

        let material = resolve_variant(&self.cache, key, label, self.sink.as_ref())?;
        bind(&material, key, uv_map, &self.dummy, label).map(Some)
    }

    /// Number of compiled variants.
    pub fn materials_count(&self) -> usize {
        self.cache.populated_count()
    }

    /// Compiled variants, in slot order.
    pub fn materials(&self) -> Vec<Arc<Material>> {
        self.cache.materials()
    }

    /// Number of addressable variant slots.
    pub fn slot_count(&self) -> usize {
        self.cache.capacity()
    }

    /// Whether meshes lacking `attribute` need placeholder vertex data.
    ///
    /// Every variant reads both UV sets and the vertex color.
    pub fn needs_dummy_data(&self, attribute: VertexAttributeSemantic) -> bool {
        matches!(
            attribute,
            VertexAttributeSemantic::TexCoord0
                | VertexAttributeSemantic::TexCoord1
                | VertexAttributeSemantic::Color
        )
    }

    /// The placeholder texture bound to unset texture parameters.
    pub fn dummy_texture(&self) -> &Arc<Texture> {
        &self.dummy.texture
    }

    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    pub fn registry(&self) -> &VariantRegistry {
        self.cache.registry()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Release every compiled variant and the placeholder texture.
    ///
    /// Instances still alive keep their [`Material`] handles, but those
    /// handles must not be rendered with afterwards.
    pub fn destroy_materials(self) {
        let materials = self.cache.take_all();
        let count = materials.len();
        for (slot, material) in materials {
            let users = Arc::strong_count(&material) - 1;
            if users > 0 {
                log::warn!(
                    "UbershaderLoader: variant {slot} destroyed while {users} handle(s) remain"
                );
            }
            self.device.destroy_material(&material);
        }
        self.device.destroy_texture(&self.dummy.texture);

        log::info!(
            "UbershaderLoader {:?}: destroyed {count} variants",
            self.label
        );
    }
}

impl std::fmt::Debug for UbershaderLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UbershaderLoader")
            .field("label", &self.label)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(UbershaderLoader: Send, Sync);
