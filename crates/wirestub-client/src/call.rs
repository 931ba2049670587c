use std::net::TcpStream;

use serde_json::Value;
use wirestub_common::protocol::{JsonCodec, ParamMap, Request};
use wirestub_common::wire;

use crate::error::CallError;

/// Connection target for a generated stub call.
///
/// The contract bakes no endpoint into the generated text; every stub takes
/// a `&CallTarget` and the caller defaults it at the call site.
///
/// # Example
///
/// ```
/// use wirestub_client::CallTarget;
///
/// let target = CallTarget::default();
/// assert_eq!(target.host, "localhost");
/// assert_eq!(target.port, 9999);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    pub host: String,
    pub port: u16,
}

impl CallTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        CallTarget {
            host: host.into(),
            port,
        }
    }
}

impl Default for CallTarget {
    fn default() -> Self {
        CallTarget::new("localhost", 9999)
    }
}

/// One declared parameter, as carried in a generated stub's
/// `expected_params` metadata.
///
/// The `data_type` string comes straight from the contract and is advisory:
/// [`validate_params`] checks only the count, never names or types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub data_type: &'static str,
}

/// Arity check performed before any network I/O.
///
/// Fails with [`CallError::Parameter`] when the number of supplied
/// parameters differs from the declared count. Parameter names and the
/// advisory types in `expected_params` are never compared against the
/// supplied values.
pub fn validate_params(params: &ParamMap, expected_params: &[ParamSpec]) -> Result<(), CallError> {
    if params.len() != expected_params.len() {
        return Err(CallError::Parameter(format!(
            "Expected {} parameters, got {}",
            expected_params.len(),
            params.len()
        )));
    }
    Ok(())
}

/// Performs one synchronous RPC round trip.
///
/// Sequence, over one freshly opened connection:
///
/// 1. Validate arity locally; fail fast before touching the network.
/// 2. Connect to the target; failures become [`CallError::Connection`].
/// 3. Send the `{"procedure": ..., "params": ...}` envelope as one frame.
/// 4. Perform a single bounded read. An empty read means the server closed
///    without answering.
/// 5. Parse the bytes as JSON.
/// 6. An `error` key fails the call with that message; otherwise the value
///    under `result` is returned.
///
/// # Example
///
/// ```no_run
/// use serde_json::{json, Map};
/// use wirestub_client::{make_request, CallTarget, ParamSpec};
///
/// let expected = &[ParamSpec { name: "a", data_type: "int" }];
/// let mut params = Map::new();
/// params.insert("a".to_string(), json!(2));
///
/// let result = make_request("double", params, expected, &CallTarget::default());
/// ```
pub fn make_request(
    procedure: &str,
    params: ParamMap,
    expected_params: &[ParamSpec],
    target: &CallTarget,
) -> Result<Value, CallError> {
    validate_params(&params, expected_params)?;

    let mut stream = TcpStream::connect((target.host.as_str(), target.port))
        .map_err(|e| CallError::Connection(format!("Connection failed: {}", e)))?;

    let request = Request::new(procedure, params);
    let payload = JsonCodec::encode_request(&request)
        .map_err(|e| CallError::Rpc(format!("Failed to encode request: {}", e)))?;

    wire::write_frame(&mut stream, &payload)
        .map_err(|e| CallError::Connection(format!("Connection failed: {}", e)))?;

    let data = wire::read_frame(&mut stream)
        .map_err(|e| CallError::Connection(format!("Connection failed: {}", e)))?;
    if data.is_empty() {
        return Err(CallError::Connection("No response from server".to_string()));
    }

    let response: Value = serde_json::from_slice(&data)
        .map_err(|_| CallError::Rpc("Invalid response from server".to_string()))?;

    if let Some(error) = response.get("error") {
        let message = match error.as_str() {
            Some(text) => text.to_string(),
            None => error.to_string(),
        };
        return Err(CallError::Rpc(message));
    }

    response
        .get("result")
        .cloned()
        .ok_or_else(|| CallError::Rpc("Response carried no result".to_string()))
}
