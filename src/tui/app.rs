use std::time::{Duration, Instant};

use namepick_core::{
    Debouncer, FilterEngine, PickerSession, Step, UserId, UserRecord, ViewportConfig, Window,
};

/// Longest wait between redraws when nothing is pending
const IDLE_POLL: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Input,
    List,
}

pub struct App {
    pub session: PickerSession,
    pub engine: FilterEngine,
    pub viewport: ViewportConfig,
    /// Query text as typed; reaches the session once the debouncer fires
    pub input: String,
    pub focus: Focus,
    pub source: String,
    pub status: String,
    debouncer: Debouncer<String>,
    list_rows: usize,
}

impl App {
    pub fn new(
        engine: FilterEngine,
        viewport: ViewportConfig,
        debounce: Duration,
        source: impl Into<String>,
    ) -> Self {
        Self {
            session: PickerSession::new(),
            engine,
            // One terminal row per candidate
            viewport: ViewportConfig {
                item_height: 1,
                ..viewport
            },
            input: String::new(),
            focus: Focus::Input,
            source: source.into(),
            status: "Loading".to_string(),
            debouncer: Debouncer::new(debounce),
            list_rows: 0,
        }
    }

    pub fn load(&mut self, records: Vec<UserRecord>) {
        let count = records.len();
        self.session.load(records, &mut self.engine);
        self.input.clear();
        self.debouncer.cancel();
        self.set_status(format!("{} candidates", count));
    }

    pub fn load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.session.load_failed(message.clone(), &mut self.engine);
        self.set_status(format!("Load failed: {}", message));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    pub fn type_char(&mut self, c: char, now: Instant) {
        self.input.push(c);
        self.focus = Focus::Input;
        self.debouncer.schedule(self.input.clone(), now);
    }

    /// Delete the last query character, or the last chip when the query is
    /// already empty
    pub fn backspace(&mut self, now: Instant) {
        if self.input.pop().is_some() {
            self.debouncer.schedule(self.input.clone(), now);
        } else if let Some(id) = self.session.remove_last_selected() {
            let name = self.display_name(id);
            self.set_status(format!("Removed {}", name));
        }
    }

    /// Leave the list, then clear the query; returns true when there was
    /// nothing left to back out of
    pub fn escape(&mut self) -> bool {
        if self.focus == Focus::List {
            self.session.deactivate();
            self.focus = Focus::Input;
            return false;
        }
        if self.input.is_empty() && !self.debouncer.is_pending() {
            return true;
        }
        self.input.clear();
        self.debouncer.cancel();
        self.run_filter(String::new());
        false
    }

    /// Fire the pending filter once its delay elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.run_filter(query);
        }
    }

    fn run_filter(&mut self, query: String) {
        self.session.set_query(query);
        self.session.apply_filter(&mut self.engine);
        if self.session.is_filtered() {
            let count = self.session.visible_ids().len();
            self.set_status(format!("{} matching", count));
        } else {
            self.set_status(format!("{} candidates", self.session.visible_ids().len()));
        }
    }

    /// How long the event loop may block before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.debouncer
            .time_until_due(now)
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL))
    }

    pub fn move_active(&mut self, step: Step) {
        self.focus = Focus::List;
        self.session.move_active(step);
        self.session.scroll_to_active(&self.viewport, self.list_rows);
    }

    pub fn toggle_active(&mut self) {
        let Some(id) = self.session.active() else {
            return;
        };
        let name = self.display_name(id);

        match self.session.toggle_active(&mut self.engine) {
            Some(true) => {
                // Selecting resets the query
                self.input.clear();
                self.debouncer.cancel();
                self.focus = Focus::Input;
                self.set_status(format!("Selected {}", name));
            }
            Some(false) => self.set_status(format!("Removed {}", name)),
            None => {}
        }
    }

    /// Resize the list to `rows` terminal rows
    pub fn fit_to(&mut self, rows: usize) {
        self.list_rows = rows;
        self.viewport.visible_items = self.viewport.visible_items.max(rows);
        self.session.scroll_to_active(&self.viewport, rows);
    }

    pub fn list_rows(&self) -> usize {
        self.list_rows
    }

    pub fn window(&self) -> Window {
        self.session.window(&self.viewport)
    }

    pub fn display_name(&self, id: UserId) -> String {
        self.session
            .record(id)
            .map(UserRecord::display_name)
            .unwrap_or_else(|| id.to_string())
    }
}
