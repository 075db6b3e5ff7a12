//! Async operation status tracking (idle / loading / error / success)

pub mod auto_trigger;
pub mod state;
pub mod tracker;

pub use auto_trigger::{spawn_triggered, AutoTrigger};
pub use state::{OperationState, OperationStatus};
pub use tracker::{error_message, AsyncOperation, FALLBACK_ERROR_MESSAGE};
