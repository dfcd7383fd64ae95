use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let session = &app.session;

    let source = if app.source.chars().count() > 45 {
        let tail: String = app
            .source
            .chars()
            .rev()
            .take(42)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    } else {
        app.source.clone()
    };

    let badge = if !session.is_loaded() {
        "NO LIST".to_string()
    } else if session.is_filtered() {
        format!("{} MATCHING", session.visible_ids().len())
    } else {
        format!("{} PEOPLE", session.visible_ids().len())
    };

    let line = Line::from(vec![
        Span::styled("namepick ", t.text_primary().add_modifier(Modifier::BOLD)),
        Span::styled(format!("[{}] ", badge), t.count_badge(session.is_filtered())),
        Span::styled(source, t.text_muted()),
        Span::raw(" "),
        Span::styled(
            format!("{} selected", session.selected().len()),
            t.text_secondary(),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}
