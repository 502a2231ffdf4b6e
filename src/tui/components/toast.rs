//! Toast notification component
//!
//! Non-blocking overlays stacked in the bottom-right corner on top of all
//! other content. Expiry is owned by the NotificationBridge; this only draws.

use crate::notify::{Toast, ToastLevel};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TOAST_HEIGHT: u16 = 3;

/// Rect for the `index`-th toast counted up from the bottom edge
fn toast_area(area: Rect, index: u16, text: &str) -> Option<Rect> {
    // Add 4 for padding (1 char each side) and border
    let width = (text.width() as u16 + 4).min(area.width.saturating_sub(4));
    let offset = TOAST_HEIGHT * (index + 1) + 1;
    if width == 0 || offset > area.height {
        return None;
    }

    let x = area.right().saturating_sub(width + 2);
    let y = area.bottom().saturating_sub(offset);
    Some(Rect::new(x, y, width, TOAST_HEIGHT))
}

/// Render active toasts, newest at the bottom
///
/// Uses `Clear` so each toast is visible on top of other content.
pub fn render<'a>(
    f: &mut Frame,
    area: Rect,
    toasts: impl DoubleEndedIterator<Item = &'a Toast>,
    theme: &Theme,
) {
    for (index, toast) in toasts.rev().enumerate() {
        let text = toast.text();
        let Some(toast_area) = toast_area(area, index as u16, &text) else {
            break;
        };

        let color = match toast.level {
            ToastLevel::Success => theme.success,
            ToastLevel::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.background));

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(paragraph, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_stack_upwards_from_bottom_right() {
        let area = Rect::new(0, 0, 80, 24);
        let first = toast_area(area, 0, "✓ Saved").unwrap();
        let second = toast_area(area, 1, "✓ Saved").unwrap();

        assert_eq!(first.right(), 78);
        assert_eq!(first.y, 20);
        assert_eq!(second.y, 17);
    }

    #[test]
    fn test_toast_clipped_to_narrow_area() {
        let area = Rect::new(0, 0, 20, 24);
        let rect = toast_area(area, 0, "✗ Username is already taken").unwrap();
        assert_eq!(rect.width, 16);
    }

    #[test]
    fn test_no_room_for_toast() {
        assert!(toast_area(Rect::new(0, 0, 80, 5), 1, "hi").is_none());
    }
}
