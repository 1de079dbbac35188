use ratatui::style::{Color, Modifier, Style};

/// Available color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSchemeId {
    Default,
    Monochrome,
}

/// All color slots used across the app
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Header
    pub title: Style,
    pub info_label: Color,
    pub info_value: Color,
    pub info_warning: Color,

    // Peer table header
    pub table_header_bg: Color,
    pub table_header_fg: Color,

    // Peer table rows
    pub row_fg: Color,
    pub row_bg: Color,
    /// Whole-row style for peers without NODE_NETWORK
    pub row_limited: Style,

    // Column-specific colors
    pub col_id: Color,
    pub col_address: Color,
    pub col_services: Color,
    pub col_bytes: Color,
    pub col_ping: Color,
    pub col_inbound: Color,

    // Notices
    pub notice_error: Style,
    pub notice_info: Style,

    // Footer
    pub footer_key_fg: Color,
    pub footer_key_bg: Color,
    pub footer_label_fg: Color,
    pub footer_label_bg: Color,
}

impl ColorScheme {
    pub fn from_id(id: ColorSchemeId) -> Self {
        match id {
            ColorSchemeId::Default => Self::default_scheme(),
            ColorSchemeId::Monochrome => Self::monochrome(),
        }
    }

    /// htop-like dark theme
    fn default_scheme() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            info_label: Color::White,
            info_value: Color::Cyan,
            info_warning: Color::Yellow,

            table_header_bg: Color::Green,
            table_header_fg: Color::Black,

            row_fg: Color::White,
            row_bg: Color::Reset,
            row_limited: Style::default().fg(Color::Yellow),

            col_id: Color::White,
            col_address: Color::Cyan,
            col_services: Color::Green,
            col_bytes: Color::White,
            col_ping: Color::Magenta,
            col_inbound: Color::Blue,

            notice_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            notice_info: Style::default().fg(Color::DarkGray),

            footer_key_fg: Color::Black,
            footer_key_bg: Color::Cyan,
            footer_label_fg: Color::Indexed(252),
            footer_label_bg: Color::Indexed(234),
        }
    }

    /// No colors; emphasis through modifiers only
    fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            info_label: Color::Reset,
            info_value: Color::Reset,
            info_warning: Color::Reset,

            table_header_bg: Color::Reset,
            table_header_fg: Color::Reset,

            row_fg: Color::Reset,
            row_bg: Color::Reset,
            row_limited: Style::default().add_modifier(Modifier::REVERSED),

            col_id: Color::Reset,
            col_address: Color::Reset,
            col_services: Color::Reset,
            col_bytes: Color::Reset,
            col_ping: Color::Reset,
            col_inbound: Color::Reset,

            notice_error: Style::default().add_modifier(Modifier::BOLD),
            notice_info: Style::default(),

            footer_key_fg: Color::Reset,
            footer_key_bg: Color::Reset,
            footer_label_fg: Color::Reset,
            footer_label_bg: Color::Reset,
        }
    }
}
