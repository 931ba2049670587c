//! Wirestub Common Types and Wire Protocol
//!
//! This crate provides the envelope definitions and TCP framing shared by
//! the client and server halves of the wirestub RPC protocol.
//!
//! # Overview
//!
//! Wirestub generates client and server stubs from a declarative service
//! contract. The two generated artifacts never share code at run time other
//! than what lives here: the request/response envelopes, the JSON codec,
//! and the single-frame TCP read/write helpers.
//!
//! # Wire Protocol
//!
//! - **Transport**: plain TCP, one short-lived connection per call
//! - **Serialization**: JSON
//! - **Message Format**: a single newline-free JSON document per direction
//! - **Framing**: one bounded read of up to [`wire::MAX_FRAME`] bytes
//!
//! # Components
//!
//! - [`protocol`] - Envelope types ([`Request`], [`Response`]) and the codec
//! - [`wire`] - Blocking single-frame read/write over a [`std::net::TcpStream`]
//!
//! # Example
//!
//! ```
//! use wirestub_common::protocol::{Request, Response};
//! use serde_json::{json, Map};
//!
//! let mut params = Map::new();
//! params.insert("a".to_string(), json!(2));
//! let request = Request::new("add", params);
//!
//! let response = Response::success(json!(5));
//! assert!(response.is_success());
//! ```

pub mod protocol;
pub mod wire;

pub use protocol::{Request, Response};
