use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Focus};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focus == Focus::List;
    let session = &app.session;

    let block = Block::default()
        .title(t.panel_title("PEOPLE", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = session.error() {
        let msg = Paragraph::new(Line::styled(format!("Could not load people: {}", error), t.error()))
            .wrap(Wrap { trim: false });
        frame.render_widget(msg, inner);
        return;
    }

    let ids = session.visible_ids();
    if ids.is_empty() {
        let text = if session.is_filtered() {
            "Nobody matches"
        } else {
            "No people loaded"
        };
        frame.render_widget(Paragraph::new(Line::styled(text, t.text_muted())), inner);
        return;
    }

    // Rows rendered from the window, shown from the scroll offset down
    let window = app.window();
    let skip = session.offset().saturating_sub(window.top);
    let rows = inner.height as usize;

    let lines: Vec<Line> = ids[window.range()]
        .iter()
        .skip(skip)
        .take(rows)
        .map(|&id| {
            let selected = session.is_selected(id);
            let mark = Span::styled(if selected { "[x] " } else { "[ ] " }, t.checkbox(selected));
            let name = app.display_name(id);

            if session.active() == Some(id) {
                Line::from(vec![mark, Span::styled(name, t.active_row())])
            } else {
                Line::from(vec![mark, Span::styled(name, t.text_primary())])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if window.total_height > rows {
        let mut state = ScrollbarState::new(window.total_height)
            .viewport_content_length(rows)
            .position(session.offset());
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut state,
        );
    }
}
