//! Lazily populated table of compiled variants.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::materials::{Material, MaterialDescriptor};

use super::registry::VariantRegistry;
use super::slot::VariantSlot;

/// One compiled [`Material`] per populated slot, compiled on first use.
///
/// The slot table lock is held across compilation, so concurrent callers
/// resolving the same slot trigger a single compile and share its result.
pub struct VariantCache {
    device: Arc<GraphicsDevice>,
    registry: VariantRegistry,
    slots: Mutex<[Option<Arc<Material>>; VariantSlot::COUNT]>,
}

impl VariantCache {
    pub fn new(device: Arc<GraphicsDevice>, registry: VariantRegistry) -> Self {
        Self {
            device,
            registry,
            slots: Mutex::new(Default::default()),
        }
    }

    /// Get the compiled variant for a slot, compiling it if needed.
    ///
    /// Returns `Ok(None)` when the registry has no package for the slot.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when a registered package fails to
    /// compile. The slot stays empty, so a later call retries.
    pub fn resolve(&self, slot: VariantSlot) -> Result<Option<Arc<Material>>, GraphicsError> {
        let mut slots = self.slots.lock();
        if let Some(material) = &slots[slot.index()] {
            return Ok(Some(Arc::clone(material)));
        }

        let Some(package) = self.registry.get(slot) else {
            return Ok(None);
        };

        log::debug!("VariantCache: compiling variant {slot}");
        let descriptor = MaterialDescriptor::new(package.clone()).with_label(slot.name());
        let material = self.device.create_material(&descriptor)?;
        slots[slot.index()] = Some(Arc::clone(&material));
        Ok(Some(material))
    }

    /// Compiled variants, in slot order.
    pub fn materials(&self) -> Vec<Arc<Material>> {
        self.slots.lock().iter().flatten().cloned().collect()
    }

    /// Number of slots holding a compiled variant.
    pub fn populated_count(&self) -> usize {
        self.slots.lock().iter().filter(|s| s.is_some()).count()
    }

    /// Size of the slot table.
    pub const fn capacity(&self) -> usize {
        VariantSlot::COUNT
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    /// Empty the table, handing every compiled variant to the caller.
    pub(crate) fn take_all(&self) -> Vec<(VariantSlot, Arc<Material>)> {
        let mut slots = self.slots.lock();
        VariantSlot::all()
            .filter_map(|slot| slots[slot.index()].take().map(|m| (slot, m)))
            .collect()
    }
}

impl std::fmt::Debug for VariantCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantCache")
            .field("populated", &self.populated_count())
            .field("registered", &self.registry.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(VariantCache: Send, Sync);
