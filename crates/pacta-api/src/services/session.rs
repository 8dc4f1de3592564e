//! In-progress flags with guaranteed reset.
//!
//! Each long-running workflow operation raises a flag while it is
//! outstanding and must lower it on every exit path, including error
//! returns and dropped futures. A drop guard makes the reset structural
//! rather than relying on a trailing statement.

use std::sync::atomic::{AtomicBool, Ordering};

/// An operation-in-progress flag.
#[derive(Debug, Default)]
pub struct OpFlag(AtomicBool);

impl OpFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag for the duration of the returned guard.
    pub fn raise(&self) -> OpGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        OpGuard(&self.0)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lowers the flag when dropped.
#[derive(Debug)]
pub struct OpGuard<'a>(&'a AtomicBool);

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
