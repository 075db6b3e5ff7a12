use serde::Serialize;

/// Lifecycle of one tracked external call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Idle,
    Loading,
    Error,
    Success,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Idle => "idle",
            OperationStatus::Loading => "loading",
            OperationStatus::Error => "error",
            OperationStatus::Success => "success",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Error | OperationStatus::Success)
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot observed by callers
///
/// `error` is only set in `Error`. `result` is only a real outcome in
/// `Success`; in every other status it holds the operation's declared empty
/// value (usually `None`, `Some(0.0)` for balances).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationState<T> {
    pub status: OperationStatus,
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T: Clone> OperationState<T> {
    pub(crate) fn idle(empty: &Option<T>) -> Self {
        Self {
            status: OperationStatus::Idle,
            result: empty.clone(),
            error: None,
        }
    }

    pub(crate) fn loading(empty: &Option<T>) -> Self {
        Self {
            status: OperationStatus::Loading,
            result: empty.clone(),
            error: None,
        }
    }

    pub(crate) fn success(value: T) -> Self {
        Self {
            status: OperationStatus::Success,
            result: Some(value),
            error: None,
        }
    }

    pub(crate) fn failed(empty: &Option<T>, message: String) -> Self {
        Self {
            status: OperationStatus::Error,
            result: empty.clone(),
            error: Some(message),
        }
    }
}
