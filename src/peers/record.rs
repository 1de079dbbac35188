use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Service bits a peer advertises in its `version` message.
///
/// `bitcoin-cli getpeerinfo` prints them as a zero-padded hex string
/// (`"0000000000000409"`); plain integers are accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ServiceFlags(u64);

impl ServiceFlags {
    /// Serves the complete block chain
    pub const NODE_NETWORK: ServiceFlags = ServiceFlags(1 << 0);
    /// Serves witness data (segwit)
    pub const NODE_WITNESS: ServiceFlags = ServiceFlags(1 << 3);
    /// Serves BIP157 compact block filters
    pub const NODE_COMPACT_FILTERS: ServiceFlags = ServiceFlags(1 << 6);
    /// Serves only the most recent 288 blocks
    pub const NODE_NETWORK_LIMITED: ServiceFlags = ServiceFlags(1 << 10);

    /// Known flags with their short table labels, in display order
    const LABELED: &'static [(ServiceFlags, &'static str)] = &[
        (Self::NODE_NETWORK, "N"),
        (Self::NODE_WITNESS, "W"),
        (Self::NODE_COMPACT_FILTERS, "C_F"),
        (Self::NODE_NETWORK_LIMITED, "N_L"),
    ];

    pub const fn from_bits(bits: u64) -> Self {
        ServiceFlags(bits)
    }

    pub const fn contains(&self, other: ServiceFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the peer can serve historical blocks (NODE_NETWORK)
    pub const fn is_full_node(&self) -> bool {
        self.contains(Self::NODE_NETWORK)
    }

    /// Short labels of the known bits that are set
    pub fn labels(&self) -> Vec<&'static str> {
        Self::LABELED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }

    /// Parse the hex form printed by the node, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.is_empty() {
            return Some(ServiceFlags(0));
        }
        u64::from_str_radix(digits, 16).ok().map(ServiceFlags::from_bits)
    }
}

impl std::ops::BitOr for ServiceFlags {
    type Output = ServiceFlags;

    fn bitor(self, rhs: ServiceFlags) -> ServiceFlags {
        ServiceFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for ServiceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels().join(", "))
    }
}

impl<'de> Deserialize<'de> for ServiceFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagsVisitor;

        impl<'de> Visitor<'de> for FlagsVisitor {
            type Value = ServiceFlags;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a hex string or an unsigned integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ServiceFlags, E> {
                ServiceFlags::from_hex(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ServiceFlags, E> {
                Ok(ServiceFlags::from_bits(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ServiceFlags, E> {
                u64::try_from(v)
                    .map(ServiceFlags)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(FlagsVisitor)
    }
}

/// Which side opened the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Inbound => "Inbound",
            Direction::Outbound => "Outbound",
        }
    }
}

/// One entry of `getpeerinfo`.
///
/// Only the keys the table shows are kept; anything else in the object is
/// ignored. Absent keys take the `Default` value (empty string, zero,
/// `false`, no ping, `-1` sync heights).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PeerRecord {
    pub id: u64,
    #[serde(rename = "addr")]
    pub address: String,
    pub inbound: bool,
    /// Unix timestamp of the connection
    #[serde(rename = "conntime")]
    pub connected_since: i64,
    #[serde(rename = "subver")]
    pub user_agent: String,
    #[serde(rename = "version")]
    pub protocol_version: u32,
    pub services: ServiceFlags,
    #[serde(rename = "bytessent")]
    pub bytes_sent: u64,
    #[serde(rename = "bytesrecv")]
    pub bytes_received: u64,
    /// Last measured round trip, in seconds
    #[serde(rename = "pingtime")]
    pub ping_time: Option<f64>,
    #[serde(rename = "relaytxes")]
    pub relays_txs: bool,
    /// Last header height we have in common with the peer, -1 if unknown
    pub synced_headers: i64,
    /// Last block height we have in common with the peer, -1 if unknown
    pub synced_blocks: i64,
}

/// Height the node reports before it knows how far a peer has synced
pub const UNKNOWN_HEIGHT: i64 = -1;

impl Default for PeerRecord {
    fn default() -> Self {
        Self {
            id: 0,
            address: String::new(),
            inbound: false,
            connected_since: 0,
            user_agent: String::new(),
            protocol_version: 0,
            services: ServiceFlags::default(),
            bytes_sent: 0,
            bytes_received: 0,
            ping_time: None,
            relays_txs: false,
            synced_headers: UNKNOWN_HEIGHT,
            synced_blocks: UNKNOWN_HEIGHT,
        }
    }
}

impl PeerRecord {
    pub fn direction(&self) -> Direction {
        if self.inbound {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }

    /// Peer does not advertise NODE_NETWORK
    pub fn lacks_full_node(&self) -> bool {
        !self.services.is_full_node()
    }
}
