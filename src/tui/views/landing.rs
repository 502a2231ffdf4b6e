// Landing view - the storefront home page

use crate::identity::display_name;
use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let (headline, hint) = match app.identity.as_ref() {
        Some(identity) => (
            format!("Welcome back, {}", display_name(Some(identity))),
            "Open the account menu (m) to manage your profile",
        ),
        None => ("You are signed out".to_string(), "Press q to quit"),
    };

    let lines = vec![
        Line::from(""),
        Line::styled(
            headline,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(hint, Style::default().fg(theme.muted)),
    ];

    let page = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(page, area);
}
