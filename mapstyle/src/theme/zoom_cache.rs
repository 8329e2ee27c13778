//! Per-zoom write-once caches

use crate::mercator::MAX_ZOOM;
use std::fmt;
use std::sync::OnceLock;

const SLOTS: usize = MAX_ZOOM as usize + 1;

/// Maps each zoom level to a value derived once during theme preparation.
///
/// Each slot is written at most once; later writes for the same zoom are
/// ignored, so concurrent readers always observe the first stored value.
pub struct ZoomScaledCache<T> {
    slots: [OnceLock<T>; SLOTS],
}

impl<T> ZoomScaledCache<T> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    /// Stores `value` for `zoom` unless a value is already present.
    ///
    /// Returns `true` if the value was stored.
    pub fn insert(&self, zoom: u8, value: T) -> bool {
        match self.slots.get(zoom as usize) {
            Some(slot) => slot.set(value).is_ok(),
            None => {
                tracing::debug!(zoom, max_zoom = MAX_ZOOM, "Ignoring zoom level beyond cache range");
                false
            }
        }
    }

    pub fn get(&self, zoom: u8) -> Option<&T> {
        self.slots.get(zoom as usize).and_then(OnceLock::get)
    }

    /// The value for `zoom`, or `fallback` when the zoom was never prepared.
    pub fn get_or<'a>(&'a self, zoom: u8, fallback: &'a T) -> &'a T {
        self.get(zoom).unwrap_or(fallback)
    }

    /// Number of populated zoom levels.
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

impl<T> Default for ZoomScaledCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ZoomScaledCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.slots
                    .iter()
                    .enumerate()
                    .filter_map(|(zoom, slot)| slot.get().map(|v| (zoom, v))),
            )
            .finish()
    }
}
