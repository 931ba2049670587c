use serde_json::Value;
use wirestub_common::protocol::{ParamMap, Response};

use crate::registry::{Export, Registry};

/// Server-side arity check.
///
/// Mirrors the client-side count check but is derived from the registered
/// callable's own declared parameter count rather than the contract.
pub fn validate_arity(declared: usize, supplied: usize) -> Result<(), String> {
    if declared != supplied {
        return Err(format!(
            "Parameter mismatch: expected {}, got {}",
            declared, supplied
        ));
    }
    Ok(())
}

/// Resolves and invokes one parsed request.
///
/// This is the Dispatching step of the per-connection state machine. Every
/// outcome is a [`Response`]; nothing raised by a handler crosses this
/// boundary.
///
/// Validation order, each failure short-circuiting to an error envelope:
///
/// 1. the request must be a JSON object;
/// 2. `procedure` must be present, a string, and non-empty;
/// 3. `params`, when present, must be an object (absent means no
///    parameters);
/// 4. the name must be registered, and registered as a callable;
/// 5. the supplied parameter count must match the callable's declared
///    arity.
pub fn handle_request(request: &Value, registry: &Registry) -> Response {
    let Some(fields) = request.as_object() else {
        return Response::failure("Invalid request format");
    };

    let procedure = match fields.get("procedure").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name,
        _ => return Response::failure("No procedure specified"),
    };

    let no_params = ParamMap::new();
    let params = match fields.get("params") {
        None => &no_params,
        Some(Value::Object(map)) => map,
        Some(_) => return Response::failure("Invalid parameters format"),
    };

    let export = match registry.lookup(procedure) {
        Some(export) => export,
        None => return Response::failure(format!("Procedure {} not found", procedure)),
    };

    let (arity, handler) = match export {
        Export::Procedure { arity, handler } => (*arity, handler),
        Export::Value(_) => {
            return Response::failure(format!("{} is not a callable function", procedure));
        }
    };

    if let Err(message) = validate_arity(arity, params.len()) {
        return Response::failure(message);
    }

    match handler(params) {
        Ok(result) => Response::success(result),
        Err(message) => Response::failure(format!("Function execution error: {}", message)),
    }
}
