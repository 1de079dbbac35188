use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Feed};
use crate::color_scheme::ColorScheme;
use crate::peers::PeerRecord;
use crate::ui::format::{
    fit, format_bytes, format_connection_duration, format_height, format_ping, truncate_address,
    truncate_with_ellipsis, Align,
};

/// User agents longer than this are cut with "..."
const USER_AGENT_MAX: usize = 20;

const ADDRESS_WIDTH: u16 = 24;

/// A fixed table column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    pub width: u16,
    pub align: Align,
}

const fn col(title: &'static str, width: u16, align: Align) -> Column {
    Column { title, width, align }
}

/// Table columns, in display order:
/// ID Address Connected Services Version Protocol Headers Blocks Bytes-Out
/// Bytes-In Ping Direction Relay
pub const COLUMNS: [Column; 13] = [
    col("ID", 5, Align::Right),
    col("Address", ADDRESS_WIDTH, Align::Left),
    col("Connected", 10, Align::Right),
    col("Services", 14, Align::Left),
    col("Version", USER_AGENT_MAX as u16 + 3, Align::Left),
    col("Protocol", 8, Align::Right),
    col("Headers", 8, Align::Right),
    col("Blocks", 8, Align::Right),
    col("Bytes Out", 10, Align::Right),
    col("Bytes In", 10, Align::Right),
    col("Ping", 7, Align::Right),
    col("Direction", 9, Align::Left),
    col("Relay", 5, Align::Left),
];

/// Display strings for one peer, in `COLUMNS` order
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRow {
    pub cells: [String; 13],
    /// Peer does not advertise NODE_NETWORK
    pub limited: bool,
    pub inbound: bool,
}

impl PeerRow {
    pub fn from_record(peer: &PeerRecord, taken_at: DateTime<Local>) -> Self {
        Self {
            cells: [
                peer.id.to_string(),
                truncate_address(&peer.address, ADDRESS_WIDTH as usize),
                format_connection_duration(peer.connected_since, taken_at.timestamp()),
                peer.services.to_string(),
                truncate_with_ellipsis(&peer.user_agent, USER_AGENT_MAX),
                peer.protocol_version.to_string(),
                format_height(peer.synced_headers),
                format_height(peer.synced_blocks),
                format_bytes(peer.bytes_sent),
                format_bytes(peer.bytes_received),
                format_ping(peer.ping_time),
                peer.direction().label().to_string(),
                if peer.relays_txs { "Yes" } else { "No" }.to_string(),
            ],
            limited: peer.lacks_full_node(),
            inbound: peer.inbound,
        }
    }
}

/// Draw the column header and one line per peer (or the current notice)
pub fn draw_peer_table(f: &mut Frame, app: &App, area: Rect) {
    if area.height < 2 {
        return;
    }
    let cs = &app.color_scheme;

    // --- Column header row (full-width colored background) ---
    let header_area = Rect { height: 1, ..area };
    let header_style = Style::default().bg(cs.table_header_bg).fg(cs.table_header_fg);
    let titles: String = COLUMNS
        .iter()
        .map(|c| format!("{} ", fit(c.title, c.width as usize, c.align)))
        .collect();
    f.render_widget(
        Paragraph::new(fit(&titles, area.width as usize, Align::Left)).style(header_style),
        header_area,
    );

    let body = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };

    let snapshot = match &app.feed {
        Feed::Peers(snapshot) => snapshot,
        Feed::Failed { message, .. } => {
            draw_notice(f, body, message, cs.notice_error);
            return;
        }
        Feed::Waiting => {
            draw_notice(f, body, "Waiting for the first refresh...", cs.notice_info);
            return;
        }
    };

    if snapshot.peers.is_empty() {
        draw_notice(f, body, "No peers connected.", cs.notice_info);
        return;
    }

    let visible = body.height as usize;
    let start = app.scroll_offset.min(snapshot.peers.len().saturating_sub(visible));
    let end = (start + visible).min(snapshot.peers.len());

    for (i, peer) in snapshot.peers[start..end].iter().enumerate() {
        let row = PeerRow::from_record(peer, snapshot.taken_at);
        let row_area = Rect {
            y: body.y + i as u16,
            height: 1,
            ..body
        };
        f.render_widget(Paragraph::new(build_row_line(&row, cs)), row_area);
    }
}

fn draw_notice(f: &mut Frame, area: Rect, message: &str, style: Style) {
    let line = Line::from(Span::styled(format!(" {}", message), style));
    f.render_widget(Paragraph::new(line), Rect { height: 1, ..area });
}

/// Build one styled table line. Limited peers get the warning style over
/// every cell so the whole row stands out.
fn build_row_line(row: &PeerRow, cs: &ColorScheme) -> Line<'static> {
    let base_style = Style::default().bg(cs.row_bg);
    let column_fg: [Color; 13] = [
        cs.col_id,
        cs.col_address,
        cs.row_fg,
        cs.col_services,
        cs.row_fg,
        cs.row_fg,
        cs.row_fg,
        cs.row_fg,
        cs.col_bytes,
        cs.col_bytes,
        cs.col_ping,
        if row.inbound { cs.col_inbound } else { cs.row_fg },
        cs.row_fg,
    ];

    let spans = COLUMNS
        .iter()
        .zip(row.cells.iter())
        .zip(column_fg)
        .map(|((column, text), fg)| {
            let mut style = base_style.fg(fg);
            if row.limited {
                style = style.patch(cs.row_limited);
            }
            Span::styled(format!("{} ", fit(text, column.width as usize, column.align)), style)
        })
        .collect::<Vec<_>>();

    Line::from(spans)
}
