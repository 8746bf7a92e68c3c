//! Single in-flight flag with a drop guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared "operation in progress" flag.
///
/// Clones share the same flag. At most one [`BusyGuard`] exists at a time.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claims the flag, or returns `None` if it is already held.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(BusyGuard {
            busy: Arc::clone(&self.busy),
        })
    }
}

/// Holds a [`BusyFlag`]; releases it when dropped.
#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
