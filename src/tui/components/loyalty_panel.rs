// Loyalty points panel
//
// Stat cards, tier progress gauge, recent activity and the redemption guide.
// Everything here is derived from the LoyaltyAccount; the panel holds no state.

use crate::loyalty::{
    format_points, tier_palette, LoyaltyAccount, TransactionKind, REDEMPTION_GUIDE,
};
use crate::tui::layout::{responsive_cells, responsive_height, Breakpoint};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

const CARD_HEIGHT: u16 = 3;

/// Rows of the guide at this width
fn guide_rows(width: u16) -> u16 {
    if Breakpoint::from_width(width).at_least(Breakpoint::Wide) {
        REDEMPTION_GUIDE.len().div_ceil(2) as u16
    } else {
        REDEMPTION_GUIDE.len() as u16
    }
}

/// Rows for the activity table: header, borders and at least one line
fn activity_height(transactions: usize) -> u16 {
    u16::try_from(transactions.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(3)
}

pub fn render(f: &mut Frame, area: Rect, account: &LoyaltyAccount, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Loyalty Points ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let table_height = activity_height(account.transactions.len());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(responsive_height(inner.width, 3, CARD_HEIGHT)),
            Constraint::Length(2),
            Constraint::Length(table_height),
            Constraint::Length(guide_rows(inner.width) + 2),
            Constraint::Min(0),
        ])
        .split(inner);

    render_stat_cards(f, chunks[0], account, theme);
    render_progress(f, chunks[1], account, theme);
    render_activity(f, chunks[2], account, theme);
    render_guide(f, chunks[3], theme);
}

fn stat_card<'a>(title: &'a str, value: String, style: Style, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Span::styled(value, style.add_modifier(Modifier::BOLD)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(format!(" {} ", title)),
        )
}

fn render_stat_cards(f: &mut Frame, area: Rect, account: &LoyaltyAccount, theme: &Theme) {
    let cells = responsive_cells(area, 3, CARD_HEIGHT);
    let palette = tier_palette(&account.standing.tier);
    let text = Style::default().fg(theme.foreground);

    f.render_widget(
        stat_card(
            "Current Points",
            format_points(account.current_points),
            text,
            theme,
        ),
        cells[0],
    );
    f.render_widget(
        stat_card(
            "Total Earned",
            format_points(account.total_earned),
            text,
            theme,
        ),
        cells[1],
    );
    f.render_widget(
        stat_card(
            "Current Tier",
            account.standing.tier.clone(),
            Style::default().fg(palette.fg).bg(palette.bg),
            theme,
        ),
        cells[2],
    );
}

fn render_progress(f: &mut Frame, area: Rect, account: &LoyaltyAccount, theme: &Theme) {
    let standing = &account.standing;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let heading = Line::from(vec![
        Span::styled(
            standing.heading(),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            standing.points_needed_label(),
            Style::default().fg(theme.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(heading), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.border))
        .ratio(standing.progress.clamp(0.0, 1.0))
        .label(standing.progress_label());
    f.render_widget(gauge, rows[1]);
}

fn render_activity(f: &mut Frame, area: Rect, account: &LoyaltyAccount, theme: &Theme) {
    let show_type = Breakpoint::from_width(area.width).at_least(Breakpoint::Normal);

    let rows: Vec<Row> = account
        .transactions
        .iter()
        .map(|tx| {
            let points_color = match tx.kind {
                TransactionKind::Earned => theme.success,
                TransactionKind::Redeemed => theme.error,
            };
            let mut cells = vec![
                Cell::from(tx.date_label()),
                Cell::from(tx.description.clone()),
            ];
            if show_type {
                cells.push(Cell::from(tx.kind.label()));
            }
            cells.push(
                Cell::from(Line::from(tx.points_label()).alignment(Alignment::Right))
                    .style(Style::default().fg(points_color)),
            );
            Row::new(cells).style(Style::default().fg(theme.foreground))
        })
        .collect();

    let mut header = vec!["Date", "Description"];
    let mut widths = vec![Constraint::Length(10), Constraint::Min(12)];
    if show_type {
        header.push("Type");
        widths.push(Constraint::Length(9));
    }
    header.push("Points");
    widths.push(Constraint::Length(8));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Recent Activity ");

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No transactions yet")
                .style(Style::default().fg(theme.muted))
                .block(block),
            area,
        );
        return;
    }

    let table = Table::new(rows, widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}

fn render_guide(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" How to Use Your Points ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = REDEMPTION_GUIDE
        .iter()
        .map(|reward| {
            Line::from(vec![
                Span::styled(
                    format!("{:>6} pts ", format_points(reward.points)),
                    Style::default().fg(theme.highlight),
                ),
                Span::styled(reward.perk, Style::default().fg(theme.foreground)),
            ])
        })
        .collect();

    let per_column = guide_rows(area.width) as usize;
    let columns = lines.len().div_ceil(per_column.max(1));
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(inner);

    for (column, chunk) in lines.chunks(per_column.max(1)).zip(areas.iter()) {
        f.render_widget(Paragraph::new(column.to_vec()), *chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loyalty::ledger::sample_transactions;

    #[test]
    fn test_guide_splits_into_two_columns_when_wide() {
        assert_eq!(guide_rows(120), 3);
        assert_eq!(guide_rows(80), 6);
    }

    #[test]
    fn test_activity_height_saturates_for_huge_ledgers() {
        assert_eq!(activity_height(0), 4);
        assert_eq!(activity_height(5), 8);
        assert_eq!(activity_height(65_534), u16::MAX);
        assert_eq!(activity_height(70_000), u16::MAX);
    }

    #[test]
    fn test_render_oversized_ledger() {
        use crate::loyalty::ledger::Transaction;
        use crate::loyalty::TierTable;
        use ratatui::{backend::TestBackend, Terminal};

        let template = sample_transactions().remove(0);
        let transactions: Vec<Transaction> = (0..65_534u32)
            .map(|id| Transaction {
                id,
                ..template.clone()
            })
            .collect();
        let account =
            LoyaltyAccount::new(2450, 5680, transactions, &TierTable::default()).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &account, &Theme::default()))
            .unwrap();
    }
}
