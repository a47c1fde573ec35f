//! Error types for route definitions

/// Route definition errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Action name is not one of the standard actions
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// HTTP method name is not recognised
    #[error("unknown http method: {0}")]
    UnknownMethod(String),

    /// Model name is empty
    #[error("model name must not be empty")]
    EmptyModelName,
}
