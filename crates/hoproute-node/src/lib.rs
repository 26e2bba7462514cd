//! Node runtime for the hoproute UDP router simulator.
//!
//! This crate wraps the pure routing core with the process shell: CLI
//! argument handling, tracing setup, the bound UDP socket, the table
//! freshness policy, and the sequential receive loop.

pub mod error;
pub mod logging;
pub mod node;
pub mod table_source;

pub use error::NodeError;
pub use node::{NodeConfig, RouterNode};
pub use table_source::{Freshness, TableSource};
