//! One-shot text rendering for `--once`

use crate::peers::Snapshot;
use crate::ui::format::fit;
use crate::ui::peer_table::{PeerRow, COLUMNS};

/// Render the snapshot as an aligned text table. Rows of peers without
/// NODE_NETWORK start with `*`.
pub fn render_plain(snapshot: &Snapshot) -> String {
    if snapshot.peers.is_empty() {
        return "No peers connected.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format_line("  ", COLUMNS.iter().map(|c| c.title)));

    for peer in &snapshot.peers {
        let row = PeerRow::from_record(peer, snapshot.taken_at);
        let marker = if row.limited { "* " } else { "  " };
        out.push_str(&format_line(marker, row.cells.iter().map(String::as_str)));
    }

    out.push_str(&format!(
        "\n{} peers ({} inbound, {} outbound) at {}. * = no NODE_NETWORK\n",
        snapshot.peers.len(),
        snapshot.inbound_count(),
        snapshot.outbound_count(),
        snapshot.taken_at.format("%Y-%m-%d %H:%M:%S"),
    ));
    out
}

fn format_line<'a>(marker: &str, cells: impl Iterator<Item = &'a str>) -> String {
    let body: Vec<String> = COLUMNS
        .iter()
        .zip(cells)
        .map(|(column, text)| fit(text, column.width as usize, column.align))
        .collect();
    format!("{}{}\n", marker, body.join(" ").trim_end())
}
