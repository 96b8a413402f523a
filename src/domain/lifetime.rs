use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use super::state::{ContactState, Pending, StateStore};
use crate::errors::AppError;

/// Shared flag telling response handlers whether they may still touch state.
#[derive(Debug, Clone)]
pub struct LifetimeToken {
    active: Arc<AtomicBool>,
}

impl LifetimeToken {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for LifetimeToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks one remote operation as in flight for as long as it lives.
///
/// Acquiring fails if the same operation is already pending. The marker is
/// cleared by [`InFlight::finish`] together with the result, or on drop if
/// the request failed or its future was abandoned.
pub(crate) struct InFlight<'a> {
    store: &'a StateStore,
    token: &'a LifetimeToken,
    op: Pending,
    released: bool,
}

impl<'a> InFlight<'a> {
    pub(crate) fn acquire(
        store: &'a StateStore,
        token: &'a LifetimeToken,
        op: Pending,
    ) -> Result<Self, AppError> {
        if !token.is_active() {
            return Err(AppError::Inactive);
        }

        let marked = store.update_if(|s| s.pending.insert(op.clone()));
        if !marked {
            return Err(AppError::Busy(op.describe()));
        }

        Ok(Self {
            store,
            token,
            op,
            released: false,
        })
    }

    /// Applies a successful response and clears the marker in one notification.
    /// Refuses when the controller was torn down while the request was out.
    pub(crate) fn finish(mut self, apply: impl FnOnce(&mut ContactState)) -> Result<(), AppError> {
        self.released = true;
        if !self.token.is_active() {
            log::debug!("dropping response for {:?}: controller torn down", self.op);
            return Err(AppError::Inactive);
        }

        let op = self.op.clone();
        self.store.update(|s| {
            s.pending.remove(&op);
            apply(s);
        });
        Ok(())
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.released || !self.token.is_active() {
            return;
        }
        let op = &self.op;
        self.store.update_if(|s| s.pending.remove(op));
    }
}
