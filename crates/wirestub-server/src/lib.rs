//! Wirestub Server Runtime
//!
//! The runtime half that generated server stubs re-export and delegate to.
//! A generated server binary builds a [`Registry`] from the deployer's
//! `procedures` module and runs [`start_server`], a strictly sequential
//! blocking accept loop: one connection, one request, one response, closed.
//!
//! Dispatch is fully dynamic. The registry maps procedure names to the
//! callables the deployer registered at startup; nothing about the contract
//! is baked into this crate.

pub mod dispatch;
pub mod registry;
pub mod server;

pub use dispatch::{handle_request, validate_arity};
pub use registry::{Export, Registry};
pub use server::{start_server, RpcServer, ServeError, ServerConfig};
