//! Operation Lock
//!
//! Ledger calls take seconds, so a second click on "cast" or "redeem" must
//! not start a second transaction. Every user-triggered action holds an
//! `OperationGuard` for its whole duration; the guard frees the lock when
//! dropped, whether the action succeeded, failed or was cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anchor_lang::prelude::*;

use crate::session::SessionError;

/// Shared in-progress flag
///
/// Clones share the same flag, so a view that only triggers actions can
/// hold a clone to grey out its buttons.
#[derive(Clone, Debug, Default)]
pub struct OperationLock {
    busy: Arc<AtomicBool>,
}

impl OperationLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock, or fail if an operation is already running
    pub fn try_acquire(&self) -> Result<OperationGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| error!(SessionError::OperationInProgress))?;

        Ok(OperationGuard {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the lock is held; releases it on drop
#[derive(Debug)]
pub struct OperationGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
