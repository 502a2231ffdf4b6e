// Edit profile view - profile form above the loyalty points panel

use crate::tui::app::App;
use crate::tui::components::{loyalty_panel, profile_form};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(profile_form::height(area.width)),
            Constraint::Min(0),
        ])
        .split(area);

    profile_form::render(f, chunks[0], app);
    loyalty_panel::render(f, chunks[1], &app.account, &app.theme);
}
