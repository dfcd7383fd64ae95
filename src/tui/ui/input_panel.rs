use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Focus};
use crate::tui::theme::theme;

const PLACEHOLDER: &str = "Type a first or last name";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focus == Focus::Input;

    let block = Block::default()
        .title(t.panel_title("SEARCH", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![];
    for record in app.session.selected_records() {
        spans.push(Span::styled(format!(" {} ", record.display_name()), t.chip()));
        spans.push(Span::raw(" "));
    }

    if app.input.is_empty() && spans.is_empty() {
        spans.push(Span::styled(PLACEHOLDER, t.text_muted()));
    } else {
        spans.push(Span::styled(app.input.clone(), t.text_primary()));
    }

    // Keep the query end visible when chips overflow the line
    let width: usize = spans.iter().map(|s| s.width()).sum();
    let scroll = width.saturating_sub(inner.width.saturating_sub(1) as usize);
    let input = Paragraph::new(Line::from(spans)).scroll((0, scroll as u16));
    frame.render_widget(input, inner);

    if focused {
        let cursor_x = inner.x + (width - scroll).min(inner.width as usize) as u16;
        if app.input.is_empty() && app.session.selected().is_empty() {
            frame.set_cursor_position((inner.x, inner.y));
        } else {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}
