// Profile form component
//
// Username and email inputs plus the Edit / Update button. Inputs are
// read-only until edit mode; the button disables while an update is pending.

use crate::profile::{EditMode, ProfileField};
use crate::tui::app::App;
use crate::tui::layout::{responsive_cells, responsive_height};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const FIELDS: [ProfileField; 2] = [ProfileField::Username, ProfileField::Email];
const FIELD_HEIGHT: u16 = 3;

/// Rows the form needs at this width
pub fn height(width: u16) -> u16 {
    // border + hint + fields + spacer + button + border
    responsive_height(width.saturating_sub(2), FIELDS.len(), FIELD_HEIGHT) + 5
}

fn button_label(app: &App) -> String {
    match app.profile.mode() {
        EditMode::ReadOnly => " Edit ".to_string(),
        EditMode::Editing => format!(" {} ", app.profile.submit_label()),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let profile = &app.profile;
    let editing = profile.is_editing();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(editing))
        .title(" Profile ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(responsive_height(inner.width, FIELDS.len(), FIELD_HEIGHT)),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let hint = if editing {
        "Tab switches fields · Enter saves"
    } else {
        "Press e or click Edit to change your details"
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(theme.muted)),
        chunks[0],
    );

    let cells = responsive_cells(chunks[1], FIELDS.len(), FIELD_HEIGHT);
    let mut field_areas = Vec::with_capacity(FIELDS.len());
    let mut cursor = None;

    for (field, cell) in FIELDS.iter().zip(cells.iter()) {
        let focused = editing && profile.focused_field() == *field;
        let value = profile.form().get(*field);

        let text = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(theme.muted))
        } else if editing {
            Span::styled(value, Style::default().fg(theme.foreground))
        } else {
            Span::styled(value, Style::default().fg(theme.muted))
        };

        let field_block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(focused))
            .title(format!(" {} ", field.label()));
        let field_inner = field_block.inner(*cell);
        f.render_widget(Paragraph::new(Line::from(text)).block(field_block), *cell);

        if focused && field_inner.width > 0 {
            let offset = (value.width() as u16).min(field_inner.width - 1);
            cursor = Some(Position::new(field_inner.x + offset, field_inner.y));
        }
        field_areas.push((*field, *cell));
    }

    let label = button_label(app);
    let enabled = !editing || profile.is_submit_enabled();
    let width = (label.width() as u16).min(chunks[3].width);
    let button = Rect::new(
        chunks[3].right().saturating_sub(width),
        chunks[3].y,
        width,
        chunks[3].height,
    );
    f.render_widget(
        Paragraph::new(label).style(theme.button_style(enabled)),
        button,
    );

    if let Some(position) = cursor {
        f.set_cursor_position(position);
    }

    app.hit_areas.fields = field_areas;
    app.hit_areas.form_button = button;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_grows_when_fields_stack() {
        assert_eq!(height(100), 8);
        assert_eq!(height(40), 11);
    }
}
