//! Shared, mutex-guarded lock controller.
//!
//! A code entry is a read-modify-write of state and counter. When several
//! tasks may enter codes on the same lock (a keypad task and a remote console,
//! say), every entry has to run under one lock so two rejections can never
//! read the same counter value.
//!
//! [`SharedLockController`] holds the controller behind a
//! `tokio::sync::Mutex` and publishes every applied transition on a
//! `tokio::sync::broadcast` channel, so observers (displays, audit logs,
//! buzzers) can react without polling.
//!
//! # Examples
//!
//! ```
//! use codelock_controller::{LockController, SharedLockController};
//! use codelock_core::LockState;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> codelock_core::Result<()> {
//! let lock = LockController::new("12345678", "87654321", LockState::Locked)?;
//! let shared = SharedLockController::new(lock);
//! let mut reports = shared.subscribe();
//!
//! shared.enter_code("12345678").await?;
//!
//! let report = reports.recv().await.unwrap();
//! assert_eq!(report.to, LockState::Unlocked);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::trace;

use codelock_core::constants::DEFAULT_REPORT_CHANNEL_CAPACITY;
use codelock_core::{LockId, LockState, Result};

use crate::controller::{LockController, LockSnapshot, StateTransition};
use crate::report::TransitionReport;

/// Cloneable handle to a lock controller shared between tasks.
#[derive(Debug, Clone)]
pub struct SharedLockController {
    id: LockId,
    inner: Arc<Mutex<LockController>>,
    reports: broadcast::Sender<TransitionReport>,
}

impl SharedLockController {
    /// Wrap a controller with the default report channel capacity.
    pub fn new(controller: LockController) -> Self {
        Self::with_channel_capacity(controller, DEFAULT_REPORT_CHANNEL_CAPACITY)
    }

    /// Wrap a controller with a custom report channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (a `tokio::sync::broadcast` requirement).
    pub fn with_channel_capacity(controller: LockController, capacity: usize) -> Self {
        let (reports, _) = broadcast::channel(capacity);
        Self {
            id: controller.id(),
            inner: Arc::new(Mutex::new(controller)),
            reports,
        }
    }

    /// Get the lock identifier.
    pub fn id(&self) -> LockId {
        self.id
    }

    /// Enter a code, serialized with every other entry on this lock.
    ///
    /// The report is published to subscribers while the lock is still held,
    /// so subscribers see reports in the order they were applied.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the code is not 8-12 digits. Nothing
    /// is published in that case.
    pub async fn enter_code(&self, code: &str) -> Result<TransitionReport> {
        let mut controller = self.inner.lock().await;
        let report = controller.enter_code(code)?;

        // No receivers is not an error; observers are optional
        if self.reports.send(report.clone()).is_err() {
            trace!(lock_id = %self.id, "No report subscribers");
        }

        Ok(report)
    }

    /// Subscribe to reports of every transition applied from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TransitionReport> {
        self.reports.subscribe()
    }

    /// Get the current state.
    pub async fn state(&self) -> LockState {
        self.inner.lock().await.state()
    }

    /// Get the current failed attempt counter.
    pub async fn failed_attempts(&self) -> u32 {
        self.inner.lock().await.failed_attempts()
    }

    /// Get a consistent snapshot of state and counter.
    pub async fn snapshot(&self) -> LockSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Get the last N transitions, oldest first.
    pub async fn last_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.inner.lock().await.last_transitions(count)
    }
}

impl From<LockController> for SharedLockController {
    fn from(controller: LockController) -> Self {
        Self::new(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::Outcome;
    use codelock_core::Error;
    use codelock_core::constants::MAX_FAILED_ATTEMPTS;

    fn shared_lock() -> SharedLockController {
        LockController::new("12345678", "87654321", LockState::Locked)
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_enter_code_updates_shared_state() {
        let lock = shared_lock();
        let other = lock.clone();

        lock.enter_code("12345678").await.unwrap();

        assert_eq!(other.state().await, LockState::Unlocked);
        assert_eq!(other.id(), lock.id());
    }

    #[tokio::test]
    async fn test_subscribers_receive_reports_in_order() {
        let lock = shared_lock();
        let mut reports = lock.subscribe();

        lock.enter_code("00000000").await.unwrap();
        lock.enter_code("12345678").await.unwrap();

        let first = reports.recv().await.unwrap();
        let second = reports.recv().await.unwrap();
        assert_eq!(first.outcome, Outcome::IncorrectCode { remaining: 2 });
        assert_eq!(second.outcome, Outcome::Unlocked);
    }

    #[tokio::test]
    async fn test_invalid_input_not_published() {
        let lock = shared_lock();
        let mut reports = lock.subscribe();

        let result = lock.enter_code("1234").await;

        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert!(matches!(
            reports.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
        assert_eq!(lock.failed_attempts().await, 0);
    }

    #[tokio::test]
    async fn test_enter_code_without_subscribers() {
        let lock = shared_lock();
        let report = lock.enter_code("00000000").await.unwrap();
        assert_eq!(report.failed_attempts, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_wrong_codes_lock_out_exactly_once() {
        let lock = shared_lock();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let lock = lock.clone();
                tokio::spawn(async move { lock.enter_code(&format!("{:08}", i)).await })
            })
            .collect();

        let mut lockouts = 0;
        for handle in handles {
            let report = handle.await.unwrap().unwrap();
            if report.outcome == Outcome::LockedOut {
                lockouts += 1;
            }
        }

        assert_eq!(lockouts, 1);
        let snapshot = lock.snapshot().await;
        assert_eq!(snapshot.state, LockState::Error);
        assert_eq!(snapshot.failed_attempts, MAX_FAILED_ATTEMPTS);
        assert_eq!(lock.last_transitions(100).await.len(), 10);
    }
}
