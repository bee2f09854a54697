//! Cooperative cancellation.
//!
//! Parsing a backup file and importing its records both check a [`CancelToken`]
//! at safe points (between read chunks, between records). Clones share state, so
//! a client can hand one clone to a worker and keep the other to abort it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
