use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::foundation::{
    core::Size,
    error::{PixtileError, PixtileResult},
};
use crate::surface::SurfaceId;

/// Counters describing surface churn seen by a [`SurfaceRegistry`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub live_surfaces: usize,
    pub live_bytes: usize,
    pub registered: u64,
    pub disposed: u64,
}

/// Explicit leak tracker for surfaces.
///
/// Surfaces opt in with [`crate::Surface::tracked`]; `dispose` removes them again. A test
/// teardown calls [`SurfaceRegistry::check_disposed`] to assert nothing leaked.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    live: RefCell<BTreeMap<SurfaceId, Size>>,
    stats: RefCell<RegistryStats>,
}

fn byte_len(size: Size) -> usize {
    (size.width.max(0) as usize)
        .saturating_mul(size.height.max(0) as usize)
        .saturating_mul(4)
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, id: SurfaceId, size: Size) {
        let previous = self.live.borrow_mut().insert(id, size);
        let mut stats = self.stats.borrow_mut();
        if let Some(old) = previous {
            stats.live_bytes = stats.live_bytes.saturating_sub(byte_len(old));
        } else {
            stats.live_surfaces += 1;
            stats.registered = stats.registered.saturating_add(1);
        }
        stats.live_bytes = stats.live_bytes.saturating_add(byte_len(size));
    }

    pub(crate) fn release(&self, id: SurfaceId) {
        if let Some(size) = self.live.borrow_mut().remove(&id) {
            let mut stats = self.stats.borrow_mut();
            stats.live_surfaces = stats.live_surfaces.saturating_sub(1);
            stats.live_bytes = stats.live_bytes.saturating_sub(byte_len(size));
            stats.disposed = stats.disposed.saturating_add(1);
        }
    }

    pub fn stats(&self) -> RegistryStats {
        *self.stats.borrow()
    }

    /// Ids of surfaces registered but not yet disposed, in creation order.
    pub fn live(&self) -> Vec<SurfaceId> {
        self.live.borrow().keys().copied().collect()
    }

    /// Fails with a state error naming every surface that was never disposed.
    pub fn check_disposed(&self) -> PixtileResult<()> {
        let live = self.live.borrow();
        if live.is_empty() {
            return Ok(());
        }
        for (id, size) in live.iter() {
            tracing::warn!(%id, width = size.width, height = size.height, "surface leaked");
        }
        let ids: Vec<String> = live.keys().map(ToString::to_string).collect();
        Err(PixtileError::state(format!(
            "{} surface(s) not disposed: {}",
            live.len(),
            ids.join(", ")
        )))
    }

    /// Forgets every tracked surface and resets the counters.
    pub fn clear(&self) {
        self.live.borrow_mut().clear();
        *self.stats.borrow_mut() = RegistryStats::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/registry.rs"]
mod tests;
