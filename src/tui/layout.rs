use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: stat cards and form fields stack
    Compact,
    /// 60-99 cols: cards side by side, guide in one column
    Normal,
    /// 100+ cols: guide in two columns, full transaction table
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

/// Split a row into `count` equal columns, or stack them when compact
pub fn responsive_cells(area: Rect, count: usize, cell_height: u16) -> Vec<Rect> {
    let stacked = !Breakpoint::from_width(area.width).at_least(Breakpoint::Normal);
    let (direction, constraints) = if stacked {
        (Direction::Vertical, vec![Constraint::Length(cell_height); count])
    } else {
        (
            Direction::Horizontal,
            vec![Constraint::Ratio(1, count as u32); count],
        )
    };

    Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Height needed by `responsive_cells` for the same inputs
pub fn responsive_height(width: u16, count: usize, cell_height: u16) -> u16 {
    if Breakpoint::from_width(width).at_least(Breakpoint::Normal) {
        cell_height
    } else {
        cell_height * count as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
    }

    #[test]
    fn test_at_least_comparisons() {
        let normal = Breakpoint::Normal;
        assert!(normal.at_least(Breakpoint::Compact));
        assert!(normal.at_least(Breakpoint::Normal));
        assert!(!normal.at_least(Breakpoint::Wide));
    }

    #[test]
    fn test_cells_stack_when_compact() {
        let cells = responsive_cells(Rect::new(0, 0, 40, 9), 3, 3);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[1].y, 3);
        assert_eq!(cells[1].width, 40);
        assert_eq!(responsive_height(40, 3, 3), 9);
    }

    #[test]
    fn test_cells_share_row_when_wide() {
        let cells = responsive_cells(Rect::new(0, 0, 90, 3), 3, 3);
        assert_eq!(cells[1].y, 0);
        assert_eq!(cells[1].x, 30);
        assert_eq!(responsive_height(90, 3, 3), 3);
    }
}
