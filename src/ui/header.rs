use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Feed};

pub const HEADER_HEIGHT: u16 = 2;

/// Two-line header:
///
///   Bitcoin Peer Monitor                    bitcoin-cli getpeerinfo, every 15s
///   Peers: 10 (in 2 / out 8)  Limited: 1  Updated: 14:02:11
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let cs = &app.color_scheme;
    let label = Style::default().fg(cs.info_label);
    let value = Style::default().fg(cs.info_value);

    let source = format!(
        "{}, every {}s ",
        app.source_label,
        app.refresh_interval.as_secs()
    );
    let title = " Bitcoin Peer Monitor";
    let gap = (area.width as usize).saturating_sub(title.len() + source.len());
    let title_line = Line::from(vec![
        Span::styled(title, cs.title),
        Span::raw(" ".repeat(gap)),
        Span::styled(source, label),
    ]);

    let status_line = match &app.feed {
        Feed::Peers(snapshot) => {
            let limited = snapshot.limited_count();
            let limited_style = if limited > 0 {
                Style::default().fg(cs.info_warning)
            } else {
                value
            };
            Line::from(vec![
                Span::styled(" Peers: ", label),
                Span::styled(snapshot.peers.len().to_string(), value),
                Span::styled(" (in ", label),
                Span::styled(snapshot.inbound_count().to_string(), value),
                Span::styled(" / out ", label),
                Span::styled(snapshot.outbound_count().to_string(), value),
                Span::styled(")  Limited: ", label),
                Span::styled(limited.to_string(), limited_style),
                Span::styled("  Updated: ", label),
                Span::styled(snapshot.taken_at.format("%H:%M:%S").to_string(), value),
            ])
        }
        Feed::Failed { at, .. } => Line::from(vec![
            Span::styled(" Peers: ", label),
            Span::styled("-", value),
            Span::styled("  Last attempt failed at ", label),
            Span::styled(at.format("%H:%M:%S").to_string(), cs.notice_error),
        ]),
        Feed::Waiting => Line::from(Span::styled(" Peers: -", label)),
    };

    f.render_widget(Paragraph::new(vec![title_line, status_line]), area);
}
