// Change password view
//
// Placeholder page reached from the account menu.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(""),
        Line::styled(
            "Password changes are not available here yet",
            Style::default().fg(theme.foreground),
        ),
        Line::from(""),
        Line::styled("Press b to go back", Style::default().fg(theme.muted)),
    ];

    let page = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Change Password "),
    );
    f.render_widget(page, area);
}
