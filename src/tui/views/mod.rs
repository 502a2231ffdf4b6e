// Views module - screen-level rendering logic
//
// Each route is a full-screen page inside a shared shell:
// - Landing ("/"): where logout lands
// - Edit profile ("/edit-profile"): profile form and loyalty points
// - Change password ("/change-password"): placeholder page
//
// This module draws the shell and dispatches to the page for the route.

mod change_password;
mod edit_profile;
mod landing;

use super::app::{App, Route};
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

const HEADER_HEIGHT: u16 = 3;
const LOGS_HEIGHT: u16 = 5;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let screen = f.area();
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, screen);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(LOGS_HEIGHT),
        ])
        .split(screen);

    components::header::render(f, chunks[0], app);

    // Hit areas belong to the page being drawn
    app.hit_areas.fields.clear();
    app.hit_areas.form_button = Default::default();

    match app.route() {
        Route::Landing => landing::render(f, chunks[1], app),
        Route::EditProfile => edit_profile::render(f, chunks[1], app),
        Route::ChangePassword => change_password::render(f, chunks[1], app),
    }

    components::logs_strip::render(f, chunks[2], &app.log_buffer, &app.theme);

    // Overlays: menu above the page, toasts above everything
    components::account_menu::render(f, screen, app);
    components::toast::render(f, screen, app.notifications.active(), &app.theme);
}
