use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::color_scheme::ColorScheme;
use crate::config::MonitorConfig;
use crate::peers::{FetchError, PeerFetcher, PeerRecord, Snapshot};
use crate::signals::ShutdownFlag;

/// Whether the refresh loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Running,
    Stopped,
}

/// What the last refresh produced
#[derive(Debug, Clone)]
pub enum Feed {
    /// Nothing fetched yet
    Waiting,
    Peers(Snapshot),
    /// One-line notice shown instead of the table
    Failed { message: String, at: DateTime<Local> },
}

/// Main application state
pub struct App {
    pub state: RefreshState,
    pub feed: Feed,
    pub refresh_interval: Duration,
    /// Shown in the header as the data source
    pub source_label: String,
    pub color_scheme: ColorScheme,

    // Set by the `r` key, consumed by the loop
    pub refresh_requested: bool,
    pub refresh_count: u64,
    pub failure_count: u64,

    // Peer table scrolling
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl App {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            state: RefreshState::Running,
            feed: Feed::Waiting,
            refresh_interval: config.refresh_interval,
            source_label: format!(
                "{} {}",
                config.cli.display(),
                crate::peers::fetcher::PEER_INFO_SUBCOMMAND
            ),
            color_scheme: ColorScheme::from_id(config.color_scheme_id),
            refresh_requested: false,
            refresh_count: 0,
            failure_count: 0,
            scroll_offset: 0,
            visible_rows: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == RefreshState::Running
    }

    /// Interrupt received: leave the loop after this iteration
    pub fn stop(&mut self) {
        if self.state == RefreshState::Running {
            info!("stopping");
        }
        self.state = RefreshState::Stopped;
    }

    /// A SIGINT/SIGTERM stops the loop like a quit key does
    pub fn handle_shutdown(&mut self, flag: &ShutdownFlag) {
        if flag.is_raised() {
            self.stop();
        }
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// One refresh cycle: fetch and store the outcome
    pub fn refresh(&mut self, fetcher: &PeerFetcher) {
        let result = fetcher.fetch();
        self.apply_fetch(result, Local::now());
    }

    /// Replace the current feed with the outcome of a fetch.
    /// Failures never end the loop; they are shown until the next cycle.
    pub fn apply_fetch(&mut self, result: Result<Vec<PeerRecord>, FetchError>, at: DateTime<Local>) {
        self.refresh_requested = false;
        self.refresh_count += 1;

        match result {
            Ok(peers) => {
                info!(peers = peers.len(), "refreshed peer list");
                self.feed = Feed::Peers(Snapshot::new(peers, at));
                self.clamp_scroll();
            }
            Err(err) => {
                warn!(error = %err, "peer refresh failed");
                self.failure_count += 1;
                self.feed = Feed::Failed {
                    message: format!("Error fetching peer info: {}", err),
                    at,
                };
                self.scroll_offset = 0;
            }
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.feed {
            Feed::Peers(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    fn peer_count(&self) -> usize {
        self.snapshot().map_or(0, |s| s.peers.len())
    }

    fn max_scroll(&self) -> usize {
        self.peer_count().saturating_sub(self.visible_rows.max(1))
    }

    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = (self.scroll_offset + rows).min(self.max_scroll());
    }

    pub fn scroll_home(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_end(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    pub fn page_rows(&self) -> usize {
        self.visible_rows.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peers::fetcher::ParseError;
    use chrono::TimeZone;

    fn peers(n: u64) -> Vec<PeerRecord> {
        (0..n).map(|id| PeerRecord { id, ..Default::default() }).collect()
    }

    fn at() -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn starts_running_and_waiting() {
        let app = App::new(&MonitorConfig::default());
        assert!(app.is_running());
        assert!(matches!(app.feed, Feed::Waiting));
        assert_eq!(app.refresh_interval, Duration::from_secs(15));
        assert_eq!(app.source_label, "bitcoin-cli getpeerinfo");
    }

    #[test]
    fn failure_replaces_snapshot_and_keeps_running() {
        let mut app = App::new(&MonitorConfig::default());
        app.apply_fetch(Ok(peers(3)), at());
        assert_eq!(app.snapshot().map(|s| s.peers.len()), Some(3));

        app.apply_fetch(Err(ParseError::NotAList("an object").into()), at());
        assert!(app.is_running());
        assert!(app.snapshot().is_none());
        match &app.feed {
            Feed::Failed { message, .. } => {
                assert_eq!(message, "Error fetching peer info: expected a list of peers, got an object")
            }
            other => panic!("unexpected feed {other:?}"),
        }
        assert_eq!(app.failure_count, 1);
        assert_eq!(app.refresh_count, 2);
    }

    #[test]
    fn each_refresh_is_independent() {
        let mut app = App::new(&MonitorConfig::default());
        app.apply_fetch(Ok(peers(5)), at());
        app.apply_fetch(Ok(peers(2)), at());
        assert_eq!(app.snapshot().map(|s| s.peers.len()), Some(2));
    }

    #[cfg(unix)]
    #[test]
    fn failing_client_does_not_stop_the_loop() {
        let fetcher = PeerFetcher::new("false");
        let mut app = App::new(&MonitorConfig::default());
        app.refresh(&fetcher);
        app.refresh(&fetcher);
        assert!(app.is_running());
        assert_eq!(app.refresh_count, 2);
        assert_eq!(app.failure_count, 2);
        assert!(matches!(app.feed, Feed::Failed { .. }));
    }

    #[test]
    fn stop_is_terminal() {
        let mut app = App::new(&MonitorConfig::default());
        app.stop();
        assert_eq!(app.state, RefreshState::Stopped);
        app.apply_fetch(Ok(peers(1)), at());
        assert_eq!(app.state, RefreshState::Stopped);
    }

    #[test]
    fn shutdown_signal_stops_the_loop() {
        let flag = ShutdownFlag::new();
        let mut app = App::new(&MonitorConfig::default());

        app.handle_shutdown(&flag);
        assert!(app.is_running());

        flag.clone().raise();
        app.handle_shutdown(&flag);
        assert_eq!(app.state, RefreshState::Stopped);
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut app = App::new(&MonitorConfig::default());
        app.visible_rows = 4;
        app.apply_fetch(Ok(peers(10)), at());

        app.scroll_down(100);
        assert_eq!(app.scroll_offset, 6);
        app.scroll_up(2);
        assert_eq!(app.scroll_offset, 4);
        app.scroll_home();
        assert_eq!(app.scroll_offset, 0);
        app.scroll_end();
        assert_eq!(app.scroll_offset, 6);

        // A smaller peer list pulls the offset back in range
        app.apply_fetch(Ok(peers(5)), at());
        assert_eq!(app.scroll_offset, 1);
    }
}
