//! The router node: bound socket, identity, and the receive loop.
//!
//! The node is an explicit context object built once at startup and handed
//! the shutdown channel; nothing about it is process-global. Datagrams are
//! processed strictly one at a time, so no state is shared across packets
//! and no locking exists anywhere in the loop.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use tokio::net::UdpSocket;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use hoproute_core::{decide, Outcome, Packet, RouterIdentity};

use crate::error::NodeError;
use crate::table_source::{Freshness, TableSource};

/// Size of the receive buffer. Oversized datagrams are truncated by the
/// transport; the application layer does not detect this.
pub const RECV_BUFFER: usize = 1024;

/// Configuration for a [`RouterNode`].
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// IPv4 address to bind the UDP socket to.
    pub address: Ipv4Addr,
    /// UDP port to bind. Port 0 requests an ephemeral port.
    pub port: u16,
    /// Path to the routing table file.
    pub table_path: PathBuf,
    /// Routing table freshness policy.
    pub freshness: Freshness,
}

/// A router node bound to its UDP socket.
pub struct RouterNode {
    identity: RouterIdentity,
    socket: UdpSocket,
    tables: TableSource,
    shutdown_rx: watch::Receiver<bool>,
}

impl RouterNode {
    /// Bind the socket and build the node context.
    ///
    /// The identity is derived from the address the socket actually bound,
    /// so binding port 0 yields a usable ephemeral-port identity.
    pub async fn bind(
        config: NodeConfig,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Result<Self, NodeError> {
        let socket = UdpSocket::bind(SocketAddrV4::new(config.address, config.port)).await?;
        let local = match socket.local_addr()? {
            SocketAddr::V4(addr) => addr,
            SocketAddr::V6(addr) => return Err(NodeError::NotIpv4(addr)),
        };

        info!("router listening on {local}");

        Ok(Self {
            identity: RouterIdentity::from(local),
            socket,
            tables: TableSource::new(config.table_path, config.freshness),
            shutdown_rx,
        })
    }

    /// The identity derived from the bound socket address.
    #[must_use]
    pub fn identity(&self) -> RouterIdentity {
        self.identity
    }

    /// Receive and process datagrams until shutdown is signalled.
    ///
    /// Each datagram runs to completion (decode, decide, act) before the
    /// next receive; the receive itself is the only suspension point.
    /// Socket errors propagate out and are fatal.
    pub async fn run(&mut self) -> Result<(), NodeError> {
        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut buf = vec![0u8; RECV_BUFFER];

        loop {
            tokio::select! {
                result = self.socket.recv_from(&mut buf) => {
                    let (n, src) = result?;
                    debug!(%src, bytes = n, "received datagram");
                    self.handle_datagram(&buf[..n], src).await?;
                }
                _ = shutdown_rx.changed() => {
                    info!("shutdown requested, stopping receive loop");
                    return Ok(());
                }
            }
        }
    }

    /// Process one raw datagram: decode, decide, act.
    ///
    /// Decode and table failures drop the datagram and keep the loop
    /// alive; only transmit I/O errors propagate.
    async fn handle_datagram(&mut self, raw: &[u8], src: SocketAddr) -> Result<(), NodeError> {
        let packet = match Packet::decode(raw) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(%src, "discarding undecodable datagram: {e}");
                return Ok(());
            }
        };

        let identity = self.identity;
        let table = match self.tables.current() {
            Ok(table) => table,
            Err(e) => {
                error!(
                    destination = %packet.destination,
                    "routing table unavailable, dropping packet: {e}"
                );
                return Ok(());
            }
        };

        match decide(&identity, &packet, table) {
            Outcome::Deliver => {
                info!(destination = %packet.destination, "delivered: {}", packet.payload);
            }
            Outcome::Forward(next_hop) => {
                info!(
                    destination = %packet.destination,
                    %next_hop,
                    "forwarding packet"
                );
                // The original bytes go out unchanged; no re-serialization.
                self.socket.send_to(raw, SocketAddr::V4(next_hop)).await?;
            }
            Outcome::NoRoute => {
                warn!(destination = %packet.destination, "no route, dropping packet");
            }
        }

        Ok(())
    }
}
