use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request parameters, bound by name.
pub type ParamMap = Map<String, Value>;

/// A request envelope sent from a generated client stub to the server.
///
/// Serializes to `{"procedure": <name>, "params": {<name>: <value>, ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    pub procedure: String,
    pub params: ParamMap,
}

impl Request {
    pub fn new(procedure: impl Into<String>, params: ParamMap) -> Self {
        Request {
            procedure: procedure.into(),
            params,
        }
    }
}

/// A response envelope sent from the server back to the calling stub.
///
/// Exactly one of two shapes goes over the wire: `{"result": <value>}` on
/// success or `{"error": <message>}` on failure.
///
/// # Example
///
/// ```
/// use wirestub_common::protocol::Response;
/// use serde_json::json;
///
/// let ok = Response::success(json!({"pi": 3.14159}));
/// assert!(ok.is_success());
///
/// let failed = Response::failure("Division by zero");
/// assert!(!failed.is_success());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Success { result: Value },
    Failure { error: String },
}

impl Response {
    /// Creates a successful response carrying the procedure's return value.
    pub fn success(result: impl Into<Value>) -> Self {
        Response::Success {
            result: result.into(),
        }
    }

    /// Creates an error response carrying a human-readable message.
    pub fn failure(error: impl Into<String>) -> Self {
        Response::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }
}
