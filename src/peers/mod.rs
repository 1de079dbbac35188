pub mod fetcher;
pub mod record;

use chrono::{DateTime, Local};

pub use fetcher::{FetchError, PeerFetcher};
pub use record::{Direction, PeerRecord};

/// The peer list returned by one fetch, and when it was taken.
/// Each refresh replaces the previous snapshot wholesale.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub peers: Vec<PeerRecord>,
    pub taken_at: DateTime<Local>,
}

impl Snapshot {
    pub fn new(peers: Vec<PeerRecord>, taken_at: DateTime<Local>) -> Self {
        Self { peers, taken_at }
    }

    pub fn inbound_count(&self) -> usize {
        self.peers.iter().filter(|p| p.direction() == Direction::Inbound).count()
    }

    pub fn outbound_count(&self) -> usize {
        self.peers.len() - self.inbound_count()
    }

    /// Peers without NODE_NETWORK
    pub fn limited_count(&self) -> usize {
        self.peers.iter().filter(|p| p.lacks_full_node()).count()
    }
}
