//! Packet wire format parsing and serialization.
//!
//! The wire form is UTF-8 text with three comma-separated fields:
//! `address,port,message`. Only the first two commas are field separators;
//! any commas after the second belong to the message, so splitting is done
//! with `splitn(3, ',')` rather than on every comma.

use std::net::{Ipv4Addr, SocketAddrV4};

use crate::error::DecodeError;

/// A decoded datagram: the final destination plus the text payload.
///
/// One `Packet` exists per received datagram. It is created by
/// [`Packet::decode`], consumed by the decision engine, and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Where the packet ultimately wants to go.
    pub destination: SocketAddrV4,
    /// The message text being carried.
    pub payload: String,
}

impl Packet {
    pub fn new(address: Ipv4Addr, port: u16, payload: impl Into<String>) -> Self {
        Self {
            destination: SocketAddrV4::new(address, port),
            payload: payload.into(),
        }
    }

    /// Parse a packet from raw datagram bytes.
    ///
    /// Fails when the bytes are not UTF-8, fewer than three comma-separated
    /// fields exist, or the address or port field does not parse.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(raw).map_err(|_| DecodeError::NotUtf8)?;

        let mut fields = text.splitn(3, ',');
        let (Some(address), Some(port), Some(payload)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(DecodeError::MissingFields {
                actual: text.splitn(3, ',').count(),
            });
        };

        let address: Ipv4Addr = address.parse().map_err(|source| DecodeError::InvalidAddress {
            value: address.to_string(),
            source,
        })?;
        let port: u16 = port.parse().map_err(|source| DecodeError::InvalidPort {
            value: port.to_string(),
            source,
        })?;

        Ok(Self {
            destination: SocketAddrV4::new(address, port),
            payload: payload.to_string(),
        })
    }

    /// Serialize the packet back to wire bytes.
    ///
    /// Forwarding re-transmits the original datagram bytes instead of
    /// calling this, so a forwarded packet is never re-serialized.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        format!(
            "{},{},{}",
            self.destination.ip(),
            self.destination.port(),
            self.payload
        )
        .into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_basic_packet() {
        let packet = Packet::decode(b"10.0.0.1,5000,hello").unwrap();
        assert_eq!(
            packet.destination,
            SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 5000)
        );
        assert_eq!(packet.payload, "hello");
    }

    #[test]
    fn commas_after_the_second_belong_to_the_message() {
        let packet = Packet::decode(b"10.0.0.1,5000,hello, world, again").unwrap();
        assert_eq!(packet.payload, "hello, world, again");
    }

    #[test]
    fn empty_message_is_valid() {
        let packet = Packet::decode(b"10.0.0.1,5000,").unwrap();
        assert_eq!(packet.payload, "");
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let original = Packet::new(Ipv4Addr::new(192, 168, 1, 7), 4242, "a,b,c");
        let decoded = Packet::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn too_few_fields() {
        let err = Packet::decode(b"10.0.0.1,5000").unwrap_err();
        assert!(matches!(err, DecodeError::MissingFields { actual: 2 }));

        let err = Packet::decode(b"just text").unwrap_err();
        assert!(matches!(err, DecodeError::MissingFields { actual: 1 }));
    }

    #[test]
    fn non_numeric_port() {
        let err = Packet::decode(b"10.0.0.1,notaport,hello").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPort { .. }));
    }

    #[test]
    fn malformed_address() {
        let err = Packet::decode(b"10.0.0,5000,hello").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidAddress { .. }));
    }

    #[test]
    fn non_utf8_bytes() {
        let err = Packet::decode(&[0xFF, 0xFE, 0x2C, 0x31, 0x2C, 0x78]).unwrap_err();
        assert!(matches!(err, DecodeError::NotUtf8));
    }
}
