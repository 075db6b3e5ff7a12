//! Generic idle/loading/error/success tracker around one external call
//!
//! One `AsyncOperation<T>` is created per call site and reused across
//! invocations. Invoking it moves the state to `Loading` before the returned
//! future is polled, so a caller never sees a stale result next to a new
//! `Loading`. Concurrent invocations are not fenced: whichever call settles
//! last decides the visible state.

use super::state::{OperationState, OperationStatus};
use crate::logger::{self, LogTag};
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Used when a failure renders to an empty message
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Render a failure as a user-facing message
pub fn error_message<E: Display>(err: &E) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Cloning yields another handle to the same state
pub struct AsyncOperation<T: Clone> {
    name: &'static str,
    empty: Option<T>,
    state: Arc<watch::Sender<OperationState<T>>>,
    active: Arc<AtomicBool>,
}

impl<T: Clone> Clone for AsyncOperation<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            empty: self.empty.clone(),
            state: Arc::clone(&self.state),
            active: Arc::clone(&self.active),
        }
    }
}

impl<T: Clone> AsyncOperation<T> {
    /// Tracker whose empty result is `None`
    pub fn new(name: &'static str) -> Self {
        Self::with_empty_option(name, None)
    }

    /// Tracker with a declared empty result, e.g. `0.0` for a balance
    pub fn with_empty(name: &'static str, empty: T) -> Self {
        Self::with_empty_option(name, Some(empty))
    }

    fn with_empty_option(name: &'static str, empty: Option<T>) -> Self {
        let (tx, _rx) = watch::channel(OperationState::idle(&empty));
        Self {
            name,
            empty,
            state: Arc::new(tx),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> OperationState<T> {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> OperationStatus {
        self.state.borrow().status
    }

    pub fn result(&self) -> Option<T> {
        self.state.borrow().result.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<OperationState<T>> {
        self.state.subscribe()
    }

    /// Mark the owner as gone; calls still in flight will not touch the state
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Track one external call
    ///
    /// State becomes `Loading` immediately; the returned future awaits `call`
    /// once and resolves to the value, or `None` when it failed (the message is
    /// then in `error()`).
    pub fn run<F, E>(&self, call: F) -> impl Future<Output = Option<T>>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run_checked(Ok::<(), String>(()), move |_| call)
    }

    /// Track one external call guarded by a synchronous precondition check
    ///
    /// If `precheck` is an error the state goes straight to `Error` with its
    /// message and `dispatch` is never called.
    pub fn run_checked<A, P, D, F, E>(&self, precheck: Result<A, P>, dispatch: D) -> impl Future<Output = Option<T>>
    where
        P: Display,
        D: FnOnce(A) -> F,
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let call = match precheck {
            Ok(args) => {
                self.begin();
                Some(dispatch(args))
            }
            Err(err) => {
                self.fail(error_message(&err));
                None
            }
        };

        let handle = self.clone();
        async move {
            let outcome = call?.await;
            handle.settle(outcome)
        }
    }

    /// Immediate transition to `Error` without dispatching anything
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        logger::debug(
            LogTag::Operation,
            &format!("[{}] failed before dispatch: {}", self.name, message),
        );
        self.state
            .send_replace(OperationState::failed(&self.empty, message));
    }

    fn begin(&self) {
        logger::debug(LogTag::Operation, &format!("[{}] loading", self.name));
        self.state.send_replace(OperationState::loading(&self.empty));
    }

    fn settle<E: Display>(&self, outcome: Result<T, E>) -> Option<T> {
        let (next, value) = match outcome {
            Ok(value) => (OperationState::success(value.clone()), Some(value)),
            Err(err) => {
                let message = error_message(&err);
                logger::debug(
                    LogTag::Operation,
                    &format!("[{}] error: {}", self.name, message),
                );
                (OperationState::failed(&self.empty, message), None)
            }
        };

        if !self.is_active() {
            logger::debug(
                LogTag::Operation,
                &format!("[{}] owner inactive, dropping late {}", self.name, next.status),
            );
            return value;
        }

        if next.status == OperationStatus::Success {
            logger::debug(LogTag::Operation, &format!("[{}] success", self.name));
        }
        self.state.send_replace(next);
        value
    }
}
