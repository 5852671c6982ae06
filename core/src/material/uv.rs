//! Mapping from asset UV sets to the two UV sets a shader reads.

use super::types::{FeatureKey, TextureChannel};

/// Shader-side UV set assigned to an asset's source UV index.
///
/// The discriminant is one past the zero-based shader UV index, so
/// [`UvSet::Unused`] acts as the "no UV set assigned" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UvSet {
    /// No shader UV set assigned.
    #[default]
    Unused = 0,
    /// First shader UV set.
    Uv0 = 1,
    /// Second shader UV set.
    Uv1 = 2,
}

/// Per-asset table from source UV index to shader [`UvSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UvMap {
    sets: [UvSet; UvMap::MAX_SOURCES],
}

impl UvMap {
    /// Number of source UV indices the map can address.
    pub const MAX_SOURCES: usize = 8;

    /// Create a map with every source unassigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a shader UV set to a source index.
    #[must_use]
    pub fn with_set(mut self, source: u8, set: UvSet) -> Self {
        self.set(source, set);
        self
    }

    /// Assign a shader UV set to a source index. Out-of-range sources are ignored.
    pub fn set(&mut self, source: u8, set: UvSet) {
        if let Some(entry) = self.sets.get_mut(source as usize) {
            *entry = set;
        }
    }

    /// Shader UV set of a source index. Out-of-range sources are unused.
    pub fn get(&self, source: u8) -> UvSet {
        self.sets
            .get(source as usize)
            .copied()
            .unwrap_or(UvSet::Unused)
    }

    /// Zero-based shader UV index for a channel, or `-1` when the channel
    /// has no texture.
    pub fn uv_index(&self, source: u8, has_texture: bool) -> i32 {
        if has_texture {
            self.get(source) as i32 - 1
        } else {
            -1
        }
    }

    /// Number of distinct shader UV sets in use.
    pub fn used_sets(&self) -> usize {
        let uv0 = self.sets.contains(&UvSet::Uv0);
        let uv1 = self.sets.contains(&UvSet::Uv1);
        uv0 as usize + uv1 as usize
    }
}

/// Fit the key's textures into at most two shader UV sets.
///
/// The map is rebuilt from scratch: walking channels in
/// [`TextureChannel::ALL`] order, each new source index of a present texture
/// takes the next free set (`Uv0`, then `Uv1`). A texture whose source index
/// would need a third set, or lies outside the map, is removed from the key.
/// Textures of disabled features are left alone and take no set.
///
/// Returns the channels whose textures were removed.
pub fn constrain_material(key: &mut FeatureKey, uv_map: &mut UvMap) -> Vec<TextureChannel> {
    let mut rebuilt = UvMap::new();
    let mut next = [UvSet::Uv0, UvSet::Uv1].into_iter();
    let mut dropped = Vec::new();

    for channel in TextureChannel::ALL {
        if !key.has_texture(channel) || !key.reads_channel(channel) {
            continue;
        }

        let source = key.uv_source(channel);
        if source as usize >= UvMap::MAX_SOURCES {
            key.textures.remove(channel.flag());
            dropped.push(channel);
            continue;
        }

        if rebuilt.get(source) != UvSet::Unused {
            continue;
        }

        match next.next() {
            Some(set) => rebuilt.set(source, set),
            None => {
                key.textures.remove(channel.flag());
                dropped.push(channel);
            }
        }
    }

    *uv_map = rebuilt;
    dropped
}
