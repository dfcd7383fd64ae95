mod footer;
mod header;
mod input_panel;
mod list_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

const HEADER_ROWS: u16 = 1;
const INPUT_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 2;
// Top and bottom border of the list block
const LIST_BORDER_ROWS: u16 = 2;

/// Candidate rows that fit in a terminal area
pub fn list_rows(area: Rect) -> usize {
    area.height
        .saturating_sub(HEADER_ROWS + INPUT_ROWS + FOOTER_ROWS + LIST_BORDER_ROWS) as usize
}

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Length(INPUT_ROWS), // Chips + query
            Constraint::Min(3),             // Candidate list
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    input_panel::render(frame, app, root[1]);
    list_panel::render(frame, app, root[2]);
    footer::render(frame, app, root[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rows() {
        assert_eq!(list_rows(Rect::new(0, 0, 80, 24)), 16);
        assert_eq!(list_rows(Rect::new(0, 0, 80, 5)), 0);
    }
}
