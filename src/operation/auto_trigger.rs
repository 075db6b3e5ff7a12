/// Parameter watcher for operations that run on creation and on change
use parking_lot::Mutex;
use std::future::Future;

use crate::logger::{self, LogTag};

pub struct AutoTrigger<P> {
    enabled: bool,
    current: Mutex<Option<P>>,
}

impl<P: Clone + PartialEq> AutoTrigger<P> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: Mutex::new(None),
        }
    }

    /// Record the watched value; true when the owner should invoke its operation
    pub fn observe(&self, value: P) -> bool {
        let mut current = self.current.lock();
        let changed = current.as_ref() != Some(&value);
        *current = Some(value);
        self.enabled && changed
    }

    pub fn current(&self) -> Option<P> {
        self.current.lock().clone()
    }
}

/// Spawn an auto-triggered invocation onto the ambient tokio runtime
///
/// Outside a runtime nothing is spawned and false is returned; the caller can
/// still invoke the operation explicitly.
pub fn spawn_triggered<F>(name: &str, fut: F) -> bool
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(fut);
            true
        }
        Err(_) => {
            logger::warning(
                LogTag::Operation,
                &format!("[{}] auto-trigger skipped: no tokio runtime", name),
            );
            false
        }
    }
}
