use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::{theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let line1 = match app.session.active() {
        Some(id) if app.session.is_selected(id) => Line::from(vec![
            Span::styled(format!("{} ", app.display_name(id)), t.text_primary().add_modifier(Modifier::BOLD)),
            Span::styled("~ ", t.text_muted()),
            Span::styled("Enter", t.key_hint()),
            Span::styled(" to remove", t.text_muted()),
        ]),
        Some(id) => Line::from(vec![
            Span::styled(format!("{} ", app.display_name(id)), t.text_primary().add_modifier(Modifier::BOLD)),
            Span::styled("~ ", t.text_muted()),
            Span::styled("Enter", t.key_hint()),
            Span::styled(" to select", t.text_muted()),
        ]),
        None => Line::styled(format!("Status: {}", app.status), t.status_message()),
    };

    let footer = Paragraph::new(vec![line1, hints(t)]);
    frame.render_widget(footer, area);
}

fn hints(t: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("type", t.key_hint()),
        Span::styled(":filter  ", t.text_muted()),
        Span::styled("arrows", t.key_hint()),
        Span::styled(":navigate  ", t.text_muted()),
        Span::styled("Enter", t.key_hint()),
        Span::styled(":toggle  ", t.text_muted()),
        Span::styled("Backspace", t.key_hint()),
        Span::styled(":edit/unselect  ", t.text_muted()),
        Span::styled("Esc", t.key_hint()),
        Span::styled(":back/clear/quit  ", t.text_muted()),
        Span::styled("Ctrl-C", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ])
}
