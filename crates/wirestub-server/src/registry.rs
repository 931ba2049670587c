use std::collections::HashMap;

use serde_json::Value;
use wirestub_common::protocol::ParamMap;

/// A procedure implementation supplied by the deployer.
///
/// Receives the request's parameters bound by name and returns either a
/// JSON result or a message describing the execution failure.
pub type Handler = Box<dyn Fn(&ParamMap) -> Result<Value, String> + Send + Sync>;

/// A name binding in the server's dispatch namespace.
///
/// The deployer's module may export more than callables; a bare value under
/// a procedure name is looked up like any other binding and rejected at
/// invocation time.
pub enum Export {
    /// A callable with its own declared parameter count.
    Procedure { arity: usize, handler: Handler },
    /// A non-callable export.
    Value(Value),
}

/// Explicit registration table mapping procedure names to exports.
///
/// Built once at server startup from the deployer-supplied registration
/// function, then read-only for the process lifetime. Later registrations
/// under the same name overwrite earlier ones.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wirestub_server::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("double", 1, |params| {
///     let n = params
///         .get("n")
///         .and_then(|v| v.as_i64())
///         .ok_or_else(|| "n must be an integer".to_string())?;
///     Ok(json!(n * 2))
/// });
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Default)]
pub struct Registry {
    exports: HashMap<String, Export>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            exports: HashMap::new(),
        }
    }

    /// Binds a callable under `name`.
    ///
    /// `arity` is the callable's own declared parameter count; the dispatch
    /// arity check is derived from it, not from the contract.
    pub fn register<F>(&mut self, name: impl Into<String>, arity: usize, handler: F)
    where
        F: Fn(&ParamMap) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.exports.insert(
            name.into(),
            Export::Procedure {
                arity,
                handler: Box::new(handler),
            },
        );
    }

    /// Binds a non-callable export under `name`.
    pub fn register_value(&mut self, name: impl Into<String>, value: Value) {
        self.exports.insert(name.into(), Export::Value(value));
    }

    pub fn lookup(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}
