// Account menu overlay
//
// Drawn under the avatar while the dropdown is open. The dropdown's bounds
// grow to cover the menu so clicks inside it are not treated as outside.

use crate::dropdown::MenuItem;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

const MENU_WIDTH: u16 = 24;

/// Menu rect anchored below the avatar, kept inside `screen`
fn menu_area(avatar: Rect, screen: Rect) -> Rect {
    let height = MenuItem::ALL.len() as u16 + 2;
    let width = MENU_WIDTH.min(screen.width);
    let x = avatar
        .right()
        .saturating_sub(width)
        .max(screen.x)
        .min(screen.right().saturating_sub(width));
    let y = avatar.bottom().min(screen.bottom().saturating_sub(height));
    Rect::new(x, y, width, height.min(screen.height))
}

pub fn render(f: &mut Frame, screen: Rect, app: &mut App) {
    app.hit_areas.menu_items.clear();
    if !app.dropdown.is_open() {
        return;
    }

    let theme = &app.theme;
    let area = menu_area(app.hit_areas.avatar, screen);
    let highlighted = app.dropdown.highlighted_item();

    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .map(|item| {
            let style = if *item == highlighted {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };
            ListItem::new(format!(" {} {}", item.icon(), item.label())).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(List::new(items).block(block), area);

    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.bottom() {
            break;
        }
        app.hit_areas
            .menu_items
            .push((*item, Rect::new(inner.x, y, inner.width, 1)));
    }

    app.dropdown.set_bounds(app.hit_areas.avatar.union(area));
}
