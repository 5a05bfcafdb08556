use thiserror::Error;

/// Failures of the wiring around the dialog. Opening, confirming and closing
/// never fail; callers report their own errors from inside their callbacks.
#[derive(Debug, Error)]
pub enum MessageBoxError {
    #[error("no message box was provided to this part of the tree")]
    NotProvided,
    #[error("invalid message box defaults: {0}")]
    InvalidDefaults(#[from] serde_json::Error),
}
