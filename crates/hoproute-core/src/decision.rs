//! Pure forwarding decision logic.
//!
//! [`decide`] encapsulates the deliver/forward/no-route choice that drives
//! the receive loop. By separating decision-making from socket I/O, every
//! outcome can be tested with fast, deterministic unit tests and no real
//! socket.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::packet::Packet;
use crate::table::RoutingTable;

/// The fixed identity of this router process: the address and port its
/// socket is bound to. Supplied once at startup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterIdentity {
    addr: SocketAddrV4,
}

impl RouterIdentity {
    pub fn new(address: Ipv4Addr, port: u16) -> Self {
        Self {
            addr: SocketAddrV4::new(address, port),
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddrV4 {
        self.addr
    }

    /// Whether a destination is this router itself (address and port both
    /// match).
    #[must_use]
    pub fn is_self(&self, destination: &SocketAddrV4) -> bool {
        *destination == self.addr
    }
}

impl From<SocketAddrV4> for RouterIdentity {
    fn from(addr: SocketAddrV4) -> Self {
        Self { addr }
    }
}

impl fmt::Display for RouterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.addr.fmt(f)
    }
}

/// Terminal outcome for one received packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The packet is addressed to this router; consume it locally.
    Deliver,
    /// Re-transmit the original datagram bytes unchanged to this next hop.
    Forward(SocketAddrV4),
    /// No table entry matches the destination; drop the packet.
    NoRoute,
}

/// Decide what to do with one decoded packet.
///
/// The identity check short-circuits routing: a self-addressed packet is
/// delivered even when the table would also match it. Purely a function of
/// its inputs, with no state carried across packets.
#[must_use]
pub fn decide(identity: &RouterIdentity, packet: &Packet, table: &RoutingTable) -> Outcome {
    if identity.is_self(&packet.destination) {
        return Outcome::Deliver;
    }
    match table.resolve(&packet.destination) {
        Some(next_hop) => Outcome::Forward(next_hop),
        None => Outcome::NoRoute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> RouterIdentity {
        RouterIdentity::new(Ipv4Addr::new(10, 0, 0, 1), 5000)
    }

    fn table_routing_everything() -> RoutingTable {
        RoutingTable::parse("0.0.0.0/0 1 65535 9.9.9.9 9999").unwrap()
    }

    #[test]
    fn self_addressed_packet_is_delivered_regardless_of_table() {
        let packet = Packet::new(Ipv4Addr::new(10, 0, 0, 1), 5000, "hi");
        // The catch-all entry would match, but identity short-circuits it.
        let outcome = decide(&identity(), &packet, &table_routing_everything());
        assert_eq!(outcome, Outcome::Deliver);
    }

    #[test]
    fn matching_port_alone_is_not_delivery() {
        let packet = Packet::new(Ipv4Addr::new(10, 0, 0, 2), 5000, "hi");
        let outcome = decide(&identity(), &packet, &table_routing_everything());
        assert_eq!(
            outcome,
            Outcome::Forward(SocketAddrV4::new(Ipv4Addr::new(9, 9, 9, 9), 9999))
        );
    }

    #[test]
    fn routed_packet_is_forwarded_to_resolved_next_hop() {
        let table = RoutingTable::parse("192.168.1.0/30 100 200 10.0.0.5 9000").unwrap();
        let packet = Packet::new(Ipv4Addr::new(192, 168, 1, 2), 150, "hi");
        let outcome = decide(&identity(), &packet, &table);
        assert_eq!(
            outcome,
            Outcome::Forward(SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 5), 9000))
        );
    }

    #[test]
    fn unroutable_packet_is_no_route() {
        let table = RoutingTable::parse("192.168.1.0/30 100 200 10.0.0.5 9000").unwrap();
        let packet = Packet::new(Ipv4Addr::new(192, 168, 1, 2), 300, "hi");
        assert_eq!(decide(&identity(), &packet, &table), Outcome::NoRoute);
    }

    #[test]
    fn empty_table_is_no_route() {
        let packet = Packet::new(Ipv4Addr::new(172, 16, 0, 1), 80, "hi");
        assert_eq!(
            decide(&identity(), &packet, &RoutingTable::new()),
            Outcome::NoRoute
        );
    }
}
