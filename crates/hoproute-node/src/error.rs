//! Error types for the node runtime.

use std::net::SocketAddrV6;

use hoproute_core::ParseError;

/// Errors that can occur while binding or running the router node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("routing table error: {0}")]
    Table(#[from] ParseError),
    #[error("bound address {0} is not IPv4")]
    NotIpv4(SocketAddrV6),
}
