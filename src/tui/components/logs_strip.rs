// Logs strip component
//
// The newest log lines captured by TuiLogLayer, shown at the bottom of the
// screen so service activity is visible without leaving the TUI.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

pub fn render(f: &mut Frame, area: Rect, logs: &LogBuffer, theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .recent(visible)
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Logs "),
    );
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_format_pads_level() {
        let entry = LogEntry {
            timestamp: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 9, 5, 3).unwrap(),
            level: LogLevel::Info,
            message: "Profile updated".to_string(),
        };
        assert_eq!(format_log_entry(&entry), "[09:05:03] INFO  Profile updated");
    }
}
