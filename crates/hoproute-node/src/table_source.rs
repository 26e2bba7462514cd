//! Routing table freshness policy.
//!
//! The documented behavior re-reads the table file on every lookup so that
//! edits take effect without a restart, at the cost of file I/O per packet.
//! The cached policy keeps the no-restart property while removing the
//! redundant I/O: the parsed table is reused until the file modification
//! time changes.

use std::path::PathBuf;
use std::time::SystemTime;

use hoproute_core::RoutingTable;

use crate::error::NodeError;

/// When a cached parse of the routing table file may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Reopen and re-parse the file on every lookup.
    PerLookup,
    /// Re-parse only when the file modification time changes.
    OnChange,
}

/// Supplies the routing table for each lookup, applying a [`Freshness`]
/// policy. The receive loop holds exactly one of these; the lookup
/// algorithm itself never touches the filesystem.
#[derive(Debug)]
pub struct TableSource {
    path: PathBuf,
    freshness: Freshness,
    table: RoutingTable,
    loaded_at: Option<SystemTime>,
}

impl TableSource {
    pub fn new(path: PathBuf, freshness: Freshness) -> Self {
        Self {
            path,
            freshness,
            table: RoutingTable::new(),
            loaded_at: None,
        }
    }

    /// The table to use for the next lookup.
    ///
    /// A parse or read failure aborts only the lookup that requested the
    /// table; the previously cached table is not clobbered.
    pub fn current(&mut self) -> Result<&RoutingTable, NodeError> {
        match self.freshness {
            Freshness::PerLookup => {
                self.table = RoutingTable::load(&self.path)?;
            }
            Freshness::OnChange => {
                let modified = std::fs::metadata(&self.path)?.modified()?;
                if self.loaded_at != Some(modified) {
                    self.table = RoutingTable::load(&self.path)?;
                    self.loaded_at = Some(modified);
                }
            }
        }
        Ok(&self.table)
    }
}
