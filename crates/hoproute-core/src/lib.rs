//! Core routing logic for the hoproute UDP router simulator.
//!
//! This crate defines the packet wire format, the routing table model with
//! first-match resolution, and the pure forwarding decision function. It
//! performs no I/O beyond reading a table file on request and has no async
//! dependencies, so every routing path can be exercised by fast,
//! deterministic unit tests.

pub mod decision;
pub mod error;
pub mod packet;
pub mod table;

pub use decision::{decide, Outcome, RouterIdentity};
pub use error::{DecodeError, ParseError};
pub use packet::Packet;
pub use table::{RouteEntry, RoutingTable};
