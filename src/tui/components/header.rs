// Header component
//
// Back button, page title and the avatar that opens the account menu.
// Records hit areas for the back button and avatar as it draws.

use crate::identity::{avatar_initial, display_name};
use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const BACK_LABEL: &str = " ← Back ";

/// Avatar chip text: initial, name and a caret showing menu state
pub fn avatar_label(app: &App) -> String {
    let identity = app.identity.as_ref();
    let caret = if app.dropdown.is_open() { "▴" } else { "▾" };
    format!(
        " ({}) {} {} ",
        avatar_initial(identity),
        display_name(identity),
        caret
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }
    let row = Rect::new(inner.x, inner.y, inner.width, 1);

    let title = Paragraph::new(Line::from(Span::styled(
        app.route().title(),
        Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, row);

    // Back button, only when there is somewhere to go
    let back = if app.router.can_go_back() {
        let width = (BACK_LABEL.width() as u16).min(row.width);
        let rect = Rect::new(row.x, row.y, width, 1);
        f.render_widget(
            Paragraph::new(BACK_LABEL).style(Style::default().fg(theme.highlight)),
            rect,
        );
        rect
    } else {
        Rect::default()
    };

    let label = avatar_label(app);
    let width = (label.width() as u16).min(row.width);
    let avatar = Rect::new(row.right().saturating_sub(width), row.y, width, 1);
    let avatar_style = if app.dropdown.is_open() {
        Style::default()
            .fg(theme.background)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.highlight)
    };
    f.render_widget(Paragraph::new(label).style(avatar_style), avatar);

    app.hit_areas.back = back;
    app.hit_areas.avatar = avatar;
    app.dropdown.set_bounds(avatar);
}
