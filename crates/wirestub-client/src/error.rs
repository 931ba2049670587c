use thiserror::Error;

/// Client-side call failures, deliberately collapsed to three kinds.
///
/// Callers can distinguish "could not reach the server"
/// ([`CallError::Connection`]) from "my call was malformed"
/// ([`CallError::Parameter`]) from everything else ([`CallError::Rpc`]),
/// which includes errors the server reported in its response envelope.
#[derive(Debug, Error)]
pub enum CallError {
    /// Socket-level failures, including an empty response.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Arity mismatch detected before any network I/O.
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Everything else: malformed responses, serialization failures, and
    /// errors carried back from the server.
    #[error("RPC error: {0}")]
    Rpc(String),
}
