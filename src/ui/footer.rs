use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Key bar: (key_label, description)
const KEYS: &[(&str, &str)] = &[
    ("r", "Refresh "),
    ("↑↓", "Scroll "),
    ("PgUp/PgDn", "Page "),
    ("q", "Quit "),
];

const LEGEND: &str = "highlighted = no NODE_NETWORK ";

/// Bottom bar: key labels on the left, highlight legend on the right
pub fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let label_style = Style::default().fg(cs.footer_label_fg).bg(cs.footer_label_bg);

    // Full-width dark background first
    f.render_widget(
        Paragraph::new(" ".repeat(area.width as usize)).style(label_style),
        area,
    );

    let mut spans: Vec<Span> = Vec::new();
    let mut used = 0;
    for (key, desc) in KEYS {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(cs.footer_key_fg)
                .bg(cs.footer_key_bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(desc.to_string(), label_style));
        used += key.chars().count() + desc.len();
    }

    let legend_width = LEGEND.len();
    if (area.width as usize) > used + legend_width {
        spans.push(Span::styled(
            " ".repeat(area.width as usize - used - legend_width),
            label_style,
        ));
        spans.push(Span::styled(LEGEND, label_style.patch(cs.row_limited)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
