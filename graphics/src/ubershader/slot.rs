//! Variant slot addressing.
//!
//! Nine base slots form a shading × alpha grid (`shading + 3 * alpha`).
//! Three further slots hold the sheen, transmission and volume variants,
//! which take priority over the grid.

use ubermat_core::material::{AlphaMode, FeatureKey, ShadingModel};

/// Address of one compiled variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantSlot(u8);

impl VariantSlot {
    /// Number of addressable slots.
    pub const COUNT: usize = 12;

    /// Lit, opaque, no exclusive feature. Every palette must provide it.
    pub const BASELINE: Self = Self::grid(ShadingModel::Lit, AlphaMode::Opaque);
    /// Lit with sheen.
    pub const SHEEN: Self = Self(9);
    /// Lit with transmission.
    pub const TRANSMISSION: Self = Self(10);
    /// Lit with volume.
    pub const VOLUME: Self = Self(11);

    /// Slot of the base grid for a shading model and alpha mode.
    pub const fn grid(shading: ShadingModel, alpha: AlphaMode) -> Self {
        Self(shading.index() + 3 * alpha.index())
    }

    /// Slot at a raw index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    /// Raw index of this slot.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All slots, in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Variant name of this slot.
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "unlit_opaque",
            1 => "lit_opaque",
            2 => "specular_glossiness_opaque",
            3 => "unlit_masked",
            4 => "lit_masked",
            5 => "specular_glossiness_masked",
            6 => "unlit_fade",
            7 => "lit_fade",
            8 => "specular_glossiness_fade",
            9 => "lit_sheen",
            10 => "lit_transmission",
            _ => "lit_volume",
        }
    }
}

impl std::fmt::Display for VariantSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// Slot a feature key resolves to.
///
/// Volume wins over transmission, which wins over sheen; otherwise the slot
/// comes from the shading × alpha grid. Total for every key.
pub fn variant_slot(key: &FeatureKey) -> VariantSlot {
    if key.has_volume {
        VariantSlot::VOLUME
    } else if key.has_transmission {
        VariantSlot::TRANSMISSION
    } else if key.has_sheen {
        VariantSlot::SHEEN
    } else {
        VariantSlot::grid(key.shading, key.alpha_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_lit_opaque() {
        assert_eq!(VariantSlot::BASELINE.index(), 1);
        assert_eq!(variant_slot(&FeatureKey::new()), VariantSlot::BASELINE);
    }

    #[test]
    fn test_grid_covers_first_nine_slots() {
        let mut seen = [false; VariantSlot::COUNT];
        for shading in ShadingModel::ALL {
            for alpha in AlphaMode::ALL {
                let key = FeatureKey::new()
                    .with_shading(shading)
                    .with_alpha_mode(alpha);
                seen[variant_slot(&key).index()] = true;
            }
        }
        assert!(seen[..9].iter().all(|s| *s));
        assert!(seen[9..].iter().all(|s| !*s));
    }

    #[test]
    fn test_exclusive_priority() {
        let all = FeatureKey::new()
            .with_volume(true)
            .with_transmission(true)
            .with_sheen(true);
        assert_eq!(variant_slot(&all), VariantSlot::VOLUME);
        assert_eq!(
            variant_slot(&all.with_volume(false)),
            VariantSlot::TRANSMISSION
        );
        assert_eq!(
            variant_slot(&all.with_volume(false).with_transmission(false)),
            VariantSlot::SHEEN
        );
    }

    #[test]
    fn test_exclusive_ignores_grid() {
        let key = FeatureKey::new()
            .with_shading(ShadingModel::Unlit)
            .with_alpha_mode(AlphaMode::Blend)
            .with_sheen(true);
        assert_eq!(variant_slot(&key), VariantSlot::SHEEN);
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(VariantSlot::from_index(11), Some(VariantSlot::VOLUME));
        assert_eq!(VariantSlot::from_index(12), None);
        assert_eq!(VariantSlot::all().count(), VariantSlot::COUNT);
    }

    #[test]
    fn test_display() {
        assert_eq!(VariantSlot::BASELINE.to_string(), "lit_opaque (1)");
    }
}
