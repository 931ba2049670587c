use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use wirestub_common::protocol::{JsonCodec, Response};
use wirestub_common::wire;

use crate::dispatch::handle_request;
use crate::registry::Registry;

/// Listening endpoint for a generated server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ServerConfig {
            host: host.into(),
            port,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig::new("localhost", 9999)
    }
}

/// Server startup failures.
///
/// Binding the listening socket is the only fatal operation; everything
/// after it is recovered per connection.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },
}

/// A bound listening socket and its accept loop.
///
/// Connections are processed strictly one at a time: the loop does not
/// accept a second connection until the current one is closed. A slow peer
/// therefore blocks all other peers for the duration of its connection.
#[derive(Debug)]
pub struct RpcServer {
    listener: TcpListener,
}

impl RpcServer {
    /// Binds the listening socket. This is the only fatal failure point of
    /// the server half.
    pub fn bind(config: &ServerConfig) -> Result<Self, ServeError> {
        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).map_err(|source| ServeError::Bind { addr, source })?;
        Ok(RpcServer { listener })
    }

    /// The actual bound address, useful when the configured port is 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop for the process lifetime.
    ///
    /// The listening socket never closes. Accept failures are logged and
    /// the loop continues; per-connection failures never escape
    /// [`handle_connection`].
    pub fn run(&self, registry: &Registry) {
        loop {
            match self.listener.accept() {
                Ok((stream, peer_addr)) => {
                    debug!("Connection accepted from {}", peer_addr);
                    handle_connection(stream, registry);
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}

/// Binds the configured endpoint and serves requests forever.
///
/// This is the entry point generated server binaries call. It returns only
/// when binding fails.
pub fn start_server(config: &ServerConfig, registry: &Registry) -> Result<(), ServeError> {
    let server = RpcServer::bind(config)?;
    match server.local_addr() {
        Ok(addr) => info!("Server running on {}", addr),
        Err(_) => info!("Server running on {}:{}", config.host, config.port),
    }
    server.run(registry);
    Ok(())
}

/// Drives one connection through Reading, Parsing, Dispatching, and
/// Responding. The stream is dropped on every exit path.
fn handle_connection(mut stream: TcpStream, registry: &Registry) {
    // Reading: one bounded read.
    let data = match wire::read_frame(&mut stream) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to read request: {}", e);
            return;
        }
    };
    if data.is_empty() {
        // Peer closed without sending; abort without responding.
        debug!("Connection closed by peer before sending a request");
        return;
    }

    // Parsing, then Dispatching.
    let response = match serde_json::from_slice::<Value>(&data) {
        Ok(request) => handle_request(&request, registry),
        Err(_) => Response::failure("Invalid JSON request"),
    };

    // Responding.
    if let Err(e) = respond(&mut stream, &response) {
        warn!("Failed to send response: {}", e);
        // Best-effort error payload before the connection drops.
        let fallback = Response::failure(e.to_string());
        if let Ok(encoded) = JsonCodec::encode_response(&fallback) {
            let _ = wire::write_frame(&mut stream, &encoded);
        }
    }
}

fn respond(stream: &mut TcpStream, response: &Response) -> io::Result<()> {
    let encoded = JsonCodec::encode_response(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    wire::write_frame(stream, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_generated_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn bind_on_ephemeral_port() {
        let config = ServerConfig::new("127.0.0.1", 0);
        let server = RpcServer::bind(&config).unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn bind_failure_is_fatal_and_named() {
        let config = ServerConfig::new("127.0.0.1", 0);
        let first = RpcServer::bind(&config).unwrap();
        let taken = first.local_addr().unwrap().port();

        let err = RpcServer::bind(&ServerConfig::new("127.0.0.1", taken)).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to bind 127.0.0.1:"), "{}", message);
    }
}
