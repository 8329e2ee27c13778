//! Lazily loaded bitmap resources
//!
//! Bitmaps referenced by a theme are decoded on first use, from whichever
//! render thread gets there first. A failed load is logged once and the
//! resource is marked invalid; it is never retried.

use crate::graphics::{Bitmap, BitmapSpec, GraphicFactory};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
enum BitmapState {
    Unloaded,
    Loaded(Arc<dyn Bitmap>),
    Invalid,
    Released,
}

/// A bitmap decoded at most once.
pub struct LazyBitmap {
    spec: BitmapSpec,
    factory: Arc<dyn GraphicFactory>,
    state: RwLock<BitmapState>,
}

impl LazyBitmap {
    pub fn new(spec: BitmapSpec, factory: Arc<dyn GraphicFactory>) -> Self {
        Self {
            spec,
            factory,
            state: RwLock::new(BitmapState::Unloaded),
        }
    }

    pub fn spec(&self) -> &BitmapSpec {
        &self.spec
    }

    /// Returns the bitmap, decoding it on first call.
    ///
    /// Returns `None` if decoding failed now or earlier, or after
    /// [`release`](Self::release).
    pub fn get(&self) -> Option<Arc<dyn Bitmap>> {
        {
            let state = self.state.read();
            match &*state {
                BitmapState::Loaded(bitmap) => return Some(Arc::clone(bitmap)),
                BitmapState::Invalid | BitmapState::Released => return None,
                BitmapState::Unloaded => {}
            }
        }

        let mut state = self.state.write();
        if let BitmapState::Loaded(bitmap) = &*state {
            return Some(Arc::clone(bitmap));
        }
        if !matches!(*state, BitmapState::Unloaded) {
            return None;
        }

        match self.factory.load_bitmap(&self.spec) {
            Ok(bitmap) => {
                *state = BitmapState::Loaded(Arc::clone(&bitmap));
                Some(bitmap)
            }
            Err(e) => {
                tracing::warn!(src = %self.spec.src, error = %e, "Bitmap resource unavailable");
                *state = BitmapState::Invalid;
                None
            }
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(*self.state.read(), BitmapState::Invalid)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.read(), BitmapState::Loaded(_))
    }

    /// Drops the decoded bitmap. Later calls to `get` return `None`.
    pub fn release(&self) {
        *self.state.write() = BitmapState::Released;
    }
}

impl fmt::Debug for LazyBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.read() {
            BitmapState::Unloaded => "unloaded",
            BitmapState::Loaded(_) => "loaded",
            BitmapState::Invalid => "invalid",
            BitmapState::Released => "released",
        };
        f.debug_struct("LazyBitmap")
            .field("src", &self.spec.src)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubFactory;

    #[test]
    fn test_loads_once() {
        let factory = Arc::new(StubFactory::new().with_bitmap("a.png", 8, 8));
        let bitmap = LazyBitmap::new(BitmapSpec::new("a.png"), factory.clone());
        assert!(!bitmap.is_loaded());
        let first = bitmap.get().unwrap();
        let second = bitmap.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.load_count(), 1);
    }

    #[test]
    fn test_failure_is_never_retried() {
        let factory = Arc::new(StubFactory::new());
        let bitmap = LazyBitmap::new(BitmapSpec::new("missing.png"), factory.clone());
        assert!(bitmap.get().is_none());
        assert!(bitmap.is_invalid());
        assert!(bitmap.get().is_none());
        assert_eq!(factory.load_count(), 1);
    }

    #[test]
    fn test_release() {
        let factory = Arc::new(StubFactory::new().with_bitmap("a.png", 8, 8));
        let bitmap = LazyBitmap::new(BitmapSpec::new("a.png"), factory);
        assert!(bitmap.get().is_some());
        bitmap.release();
        assert!(bitmap.get().is_none());
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let factory = Arc::new(StubFactory::new().with_bitmap("a.png", 8, 8));
        let bitmap = LazyBitmap::new(BitmapSpec::new("a.png"), factory.clone());
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert!(bitmap.get().is_some()));
            }
        });
        assert_eq!(factory.load_count(), 1);
    }
}
