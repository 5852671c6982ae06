//! Feature conflict resolution and variant lookup with baseline fallback.
//!
//! Both entry points take the caller's [`FeatureKey`] by mutable reference.
//! On return the key describes exactly what was resolved: dropped features
//! are cleared and a fallback rewrites it to the baseline key.

use std::sync::Arc;

use ubermat_core::material::{AlphaMode, FeatureKey, ShadingModel};

use crate::error::GraphicsError;
use crate::materials::Material;

use super::cache::VariantCache;
use super::diagnostics::DiagnosticSink;
use super::slot::{variant_slot, VariantSlot};

/// Apply the feature precedence rules to a key, in place.
///
/// 1. Volume with sheen drops sheen.
/// 2. Transmission with sheen drops sheen.
/// 3. Clear coat with any of volume, transmission or sheen drops all three.
///
/// Each drop is reported through `sink`.
///
/// # Errors
///
/// Returns [`GraphicsError::FeatureNotSupported`] for keys requesting
/// diagnostics mode. The key is left untouched in that case.
pub fn normalize(
    key: &mut FeatureKey,
    label: &str,
    sink: &dyn DiagnosticSink,
) -> Result<(), GraphicsError> {
    if key.enable_diagnostics {
        return Err(GraphicsError::FeatureNotSupported(format!(
            "'{label}': diagnostics mode is not available with ubershaders"
        )));
    }

    if key.has_volume && key.has_sheen {
        sink.warn(&format!(
            "'{label}': volume and sheen cannot be combined, dropping sheen"
        ));
        key.has_sheen = false;
    }

    if key.has_transmission && key.has_sheen {
        sink.warn(&format!(
            "'{label}': transmission and sheen cannot be combined, dropping sheen"
        ));
        key.has_sheen = false;
    }

    if key.has_clear_coat && key.has_exclusive_feature() {
        sink.warn(&format!(
            "'{label}': clear coat cannot be combined with volume, transmission or sheen, dropping them"
        ));
        key.has_volume = false;
        key.has_transmission = false;
        key.has_sheen = false;
    }

    Ok(())
}

/// The key a missing variant falls back to.
///
/// Lit and opaque with no exclusive feature, which maps to
/// [`VariantSlot::BASELINE`]. Textures, double-sidedness and clear coat are
/// kept.
pub fn baseline_key(key: &FeatureKey) -> FeatureKey {
    FeatureKey {
        shading: ShadingModel::Lit,
        alpha_mode: AlphaMode::Opaque,
        has_sheen: false,
        has_transmission: false,
        has_volume: false,
        ..*key
    }
}

/// Find the compiled variant for a normalized key.
///
/// When the key's slot has no registered variant, `key` is rewritten with
/// [`baseline_key`], a warning is reported and the lookup is retried once.
///
/// # Errors
///
/// Propagates compile failures from the cache. Returns
/// [`GraphicsError::FeatureNotSupported`] if the baseline variant itself is
/// missing, which a validated registry rules out.
pub fn resolve_variant(
    cache: &VariantCache,
    key: &mut FeatureKey,
    label: &str,
    sink: &dyn DiagnosticSink,
) -> Result<Arc<Material>, GraphicsError> {
    let slot = variant_slot(key);
    if let Some(material) = cache.resolve(slot)? {
        return Ok(material);
    }

    sink.warn(&format!(
        "'{label}': variant {slot} is not available in this build, falling back to {}",
        VariantSlot::BASELINE
    ));
    *key = baseline_key(key);

    let fallback = variant_slot(key);
    cache.resolve(fallback)?.ok_or_else(|| {
        GraphicsError::FeatureNotSupported(format!(
            "'{label}': fallback variant {fallback} is not available"
        ))
    })
}
