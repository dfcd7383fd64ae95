mod app;
mod handlers;
mod theme;
mod ui;

use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use namepick_core::UserId;
use ratatui::prelude::*;

pub use app::App;
use handlers::handle_input;
use ui::draw_ui;

/// Run the picker until the user quits; returns the selected ids in
/// selection order
pub fn run(mut app: App) -> io::Result<Vec<UserId>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = loop {
        app.tick(Instant::now());

        if let Err(err) = terminal.draw(|f| {
            app.fit_to(ui::list_rows(f.area()));
            draw_ui(f, &app);
        }) {
            break Err(err);
        }

        if !event::poll(app.poll_timeout(Instant::now()))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if handle_input(&mut app, key, Instant::now())? {
            break Ok(());
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result?;
    log::debug!("Picker closed with {} selected", app.session.selected().len());
    Ok(app.session.selected().to_vec())
}
