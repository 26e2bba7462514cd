//! Error types for the hoproute-core crate.

use std::net::AddrParseError;
use std::num::ParseIntError;

/// Errors from decoding an inbound datagram into a [`Packet`].
///
/// A decode failure discards only the affected datagram; the receive loop
/// keeps running.
///
/// [`Packet`]: crate::packet::Packet
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("datagram is not valid UTF-8")]
    NotUtf8,
    #[error("expected 3 comma-separated fields, got {actual}")]
    MissingFields { actual: usize },
    #[error("invalid destination port {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("invalid destination address {value:?}: {source}")]
    InvalidAddress {
        value: String,
        source: AddrParseError,
    },
}

/// Errors from parsing a routing table line or loading a table file.
///
/// The table loader attaches line numbers via [`ParseError::AtLine`]. A
/// malformed line aborts the whole load; it is never silently skipped.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("expected 5 whitespace-separated fields, got {actual}")]
    FieldCount { actual: usize },
    #[error("invalid network prefix {value:?}: {source}")]
    InvalidPrefix {
        value: String,
        source: ipnet::AddrParseError,
    },
    #[error("network prefix {value} has host bits set")]
    HostBits { value: String },
    #[error("invalid port {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("port range {low}-{high} is inverted")]
    InvalidPortRange { low: u16, high: u16 },
    #[error("invalid next-hop address {value:?}: {source}")]
    InvalidNextHop {
        value: String,
        source: AddrParseError,
    },
    #[error("routing table line {line}: {source}")]
    AtLine {
        line: usize,
        source: Box<ParseError>,
    },
    #[error("failed to read routing table: {0}")]
    Io(#[from] std::io::Error),
}
