pub mod footer;
pub mod format;
pub mod header;
pub mod peer_table;
pub mod plain;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

const FOOTER_HEIGHT: u16 = 1;

/// Peer rows that fit on a terminal of this height
pub fn table_rows(terminal_height: u16) -> usize {
    // -1 for the column header row
    terminal_height.saturating_sub(header::HEADER_HEIGHT + FOOTER_HEIGHT + 1) as usize
}

/// Render the complete UI
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEADER_HEIGHT), // title + peer counts
            Constraint::Min(2),                        // peer table
            Constraint::Length(FOOTER_HEIGHT),         // key bar
        ])
        .split(f.area());

    header::draw_header(f, app, chunks[0]);
    peer_table::draw_peer_table(f, app, chunks[1]);
    footer::draw_footer(f, app, chunks[2]);
}
