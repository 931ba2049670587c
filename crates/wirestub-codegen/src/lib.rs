//! Wirestub Codegen
//!
//! Contract model and stub emitters for the wirestub RPC system.
//!
//! A contract is a declarative list of remote procedures with named, typed
//! parameters. This crate loads the contract JSON into [`Contract`] and
//! translates it into two independent source artifacts:
//!
//! - [`emit_client`] - a module with one stub function per procedure,
//!   delegating to the `wirestub-client` runtime;
//! - [`emit_server`] - a standalone binary dispatching over a registry the
//!   deployer fills in, delegating to the `wirestub-server` runtime.
//!
//! Both emitters are pure: the same contract always yields byte-identical
//! text.
//!
//! # Example
//!
//! ```
//! use wirestub_codegen::{emit_client, Contract};
//!
//! let contract = Contract::from_json(r#"{
//!     "remote_procedures": [{
//!         "procedure_name": "add",
//!         "parameters": [
//!             {"parameter_name": "a", "data_type": "int"},
//!             {"parameter_name": "b", "data_type": "int"}
//!         ],
//!         "return_type": "int"
//!     }]
//! }"#).unwrap();
//!
//! let source = emit_client(&contract).unwrap();
//! assert!(source.contains("pub fn add("));
//! ```

pub mod client;
pub mod contract;
pub mod server;

pub use client::emit_client;
pub use contract::{Contract, ContractError, Parameter, Procedure};
pub use server::emit_server;
