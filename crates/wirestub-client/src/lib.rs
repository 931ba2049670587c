//! Wirestub Client Runtime
//!
//! The runtime half that generated client stubs re-export and delegate to.
//! A generated stub builds its parameter map and declared-parameter
//! metadata, then hands the actual round trip to [`make_request`].
//!
//! Each call opens a fresh TCP connection, sends one JSON request frame,
//! performs one bounded read for the response, and closes the connection.
//! There is no pooling, pipelining, or reuse.

pub mod call;
pub mod error;

pub use call::{make_request, validate_params, CallTarget, ParamSpec};
pub use error::CallError;
