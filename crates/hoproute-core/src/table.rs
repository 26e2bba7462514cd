//! Routing table model and first-match route resolution.
//!
//! A table is an ordered sequence of entries, one per line of the table
//! file. Order is semantically significant: resolution returns the first
//! entry whose predicate matches, never the longest prefix and never a
//! later tie-breaker.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::ops::RangeInclusive;
use std::path::Path;

use ipnet::Ipv4Net;

use crate::error::ParseError;

/// One routing table entry: a destination predicate and the next hop to
/// forward matching packets to.
///
/// The predicate covers every address in the declared network block,
/// network and broadcast addresses included, combined with an inclusive
/// destination port range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub network: Ipv4Net,
    pub ports: RangeInclusive<u16>,
    pub next_hop: SocketAddrV4,
}

impl RouteEntry {
    /// Parse a `CIDR port_low port_high next_hop_ip next_hop_port` line.
    ///
    /// The prefix must be a true network address; host bits set after the
    /// mask are rejected. An inverted port range is rejected as well.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ParseError::FieldCount {
                actual: fields.len(),
            });
        }

        let network: Ipv4Net = fields[0].parse().map_err(|source| ParseError::InvalidPrefix {
            value: fields[0].to_string(),
            source,
        })?;
        if network.addr() != network.network() {
            return Err(ParseError::HostBits {
                value: fields[0].to_string(),
            });
        }

        let low = parse_port(fields[1])?;
        let high = parse_port(fields[2])?;
        if low > high {
            return Err(ParseError::InvalidPortRange { low, high });
        }

        let next_hop_ip: Ipv4Addr =
            fields[3].parse().map_err(|source| ParseError::InvalidNextHop {
                value: fields[3].to_string(),
                source,
            })?;
        let next_hop_port = parse_port(fields[4])?;

        Ok(Self {
            network,
            ports: low..=high,
            next_hop: SocketAddrV4::new(next_hop_ip, next_hop_port),
        })
    }

    /// Whether a destination falls inside this entry's network block and
    /// port range.
    ///
    /// Containment is a prefix test (`addr & mask == network`), which is
    /// equivalent to enumerating every address in the block and testing
    /// membership, without materializing the set.
    #[must_use]
    pub fn matches(&self, destination: &SocketAddrV4) -> bool {
        self.network.contains(destination.ip()) && self.ports.contains(&destination.port())
    }

    /// Enumerate every address in the entry's block, network and broadcast
    /// addresses included.
    ///
    /// Only sensible for small prefixes; a /8 yields 16 million addresses.
    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start = u32::from(self.network.network());
        let end = u32::from(self.network.broadcast());
        (start..=end).map(Ipv4Addr::from)
    }
}

fn parse_port(field: &str) -> Result<u16, ParseError> {
    field.parse().map_err(|source| ParseError::InvalidPort {
        value: field.to_string(),
        source,
    })
}

/// An ordered routing table, resolution order = file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from entries in resolution order.
    pub fn from_entries(iter: impl IntoIterator<Item = RouteEntry>) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }

    /// Parse a whole table, one entry per line.
    ///
    /// Blank lines are tolerated. The first malformed line aborts the load
    /// with its 1-based line number attached; a bad entry is never skipped.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = RouteEntry::parse(line).map_err(|source| ParseError::AtLine {
                line: index + 1,
                source: Box::new(source),
            })?;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Read and parse a routing table file.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// First-match resolution.
    ///
    /// Scans entries in file order and returns the next hop of the first
    /// entry matching the destination, or `None` when the table is
    /// exhausted. Deterministic and side-effect-free.
    #[must_use]
    pub fn resolve(&self, destination: &SocketAddrV4) -> Option<SocketAddrV4> {
        self.entries
            .iter()
            .find(|entry| entry.matches(destination))
            .map(|entry| entry.next_hop)
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }
}
