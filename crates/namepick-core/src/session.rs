// Namepick Picker Session
// State of one picker instance: candidates, query, selection, active row

use std::collections::HashMap;

use crate::cache::{FilterResult, SelectorId};
use crate::engine::FilterEngine;
use crate::matcher::{CandidateFilter, UserId, UserRecord};
use crate::viewport::{scroll_offset_for, ViewportConfig, Window};

/// Direction for moving the active row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// One multi-select picker
///
/// The session owns no engine; every operation that filters takes the
/// shared [`FilterEngine`] so several pickers can share one cache, each
/// under its own [`SelectorId`].
#[derive(Debug, Clone)]
pub struct PickerSession {
    selector: SelectorId,
    /// `None` until a list has been loaded
    candidates: Option<Vec<UserRecord>>,
    positions: HashMap<UserId, usize>,
    all_ids: Vec<UserId>,
    query: String,
    filtered: FilterResult,
    selected: Vec<UserId>,
    active: Option<UserId>,
    offset: usize,
    error: Option<String>,
}

impl Default for PickerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerSession {
    pub fn new() -> Self {
        Self::with_selector(SelectorId::next())
    }

    pub fn with_selector(selector: SelectorId) -> Self {
        Self {
            selector,
            candidates: None,
            positions: HashMap::new(),
            all_ids: Vec::new(),
            query: String::new(),
            filtered: None,
            selected: Vec::new(),
            active: None,
            offset: 0,
            error: None,
        }
    }

    fn reset(&mut self) {
        *self = Self::with_selector(self.selector);
    }

    /// Replace the candidate list and start over
    ///
    /// Selection, query and the selector's cached results are dropped.
    pub fn load<F: CandidateFilter>(&mut self, records: Vec<UserRecord>, engine: &mut FilterEngine<F>) {
        self.reset();
        engine.invalidate(self.selector);

        self.all_ids = records.iter().map(|r| r.id).collect();
        self.positions = self
            .all_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        log::debug!("{} loaded {} candidates", self.selector, records.len());
        self.candidates = Some(records);
    }

    /// Record a failed load; the session is left without a list
    ///
    /// Results cached for the previous list are dropped with it.
    pub fn load_failed<F: CandidateFilter>(&mut self, message: impl Into<String>, engine: &mut FilterEngine<F>) {
        self.reset();
        engine.invalidate(self.selector);
        let message = message.into();
        log::warn!("{} failed to load candidates: {}", self.selector, message);
        self.error = Some(message);
    }

    /// Filter with the current query
    ///
    /// Scrolls back to the top and makes the first match active.
    pub fn apply_filter<F: CandidateFilter>(&mut self, engine: &mut FilterEngine<F>) {
        let filter = (!self.query.is_empty()).then_some(self.query.as_str());
        self.filtered = engine.filter(self.candidates.as_deref(), filter, self.selector);
        self.offset = 0;
        self.active = self.filtered.as_ref().and_then(|ids| ids.first().copied());
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows to show: the filtered ids, or every id when unfiltered
    pub fn visible_ids(&self) -> &[UserId] {
        match &self.filtered {
            Some(ids) => &ids[..],
            None => &self.all_ids[..],
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered.is_some()
    }

    /// Select an unselected candidate or deselect a selected one
    ///
    /// Selecting clears the query and drops the filter. Returns true when the
    /// candidate ends up selected; unknown ids are ignored.
    pub fn toggle<F: CandidateFilter>(&mut self, id: UserId, engine: &mut FilterEngine<F>) -> bool {
        if !self.positions.contains_key(&id) {
            return false;
        }

        if let Some(i) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(i);
            return false;
        }

        self.selected.push(id);
        self.query.clear();
        if self.is_filtered() {
            self.apply_filter(engine);
        }
        true
    }

    /// Toggle the active candidate, if any
    pub fn toggle_active<F: CandidateFilter>(&mut self, engine: &mut FilterEngine<F>) -> Option<bool> {
        let id = self.active?;
        Some(self.toggle(id, engine))
    }

    /// Move the active row one step within the visible rows
    ///
    /// Moving down with no active row activates the first one; moving past
    /// either end does nothing.
    pub fn move_active(&mut self, step: Step) -> Option<UserId> {
        let items = self.visible_ids();
        let index = self.active.and_then(|a| items.iter().position(|id| *id == a));

        let next = match (step, index) {
            (Step::Up, Some(i)) if i > 0 => Some(items[i - 1]),
            (Step::Down, Some(i)) => items.get(i + 1).copied(),
            (Step::Down, None) => items.first().copied(),
            _ => None,
        };

        if next.is_some() {
            self.active = next;
        }
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    /// Deselect the most recently selected candidate
    pub fn remove_last_selected(&mut self) -> Option<UserId> {
        self.selected.pop()
    }

    pub fn selector(&self) -> SelectorId {
        self.selector
    }

    pub fn is_loaded(&self) -> bool {
        self.candidates.is_some()
    }

    pub fn candidates(&self) -> Option<&[UserRecord]> {
        self.candidates.as_deref()
    }

    pub fn record(&self, id: UserId) -> Option<&UserRecord> {
        let i = *self.positions.get(&id)?;
        self.candidates.as_ref()?.get(i)
    }

    pub fn selected(&self) -> &[UserId] {
        &self.selected
    }

    pub fn selected_records(&self) -> impl Iterator<Item = &UserRecord> + '_ {
        self.selected.iter().filter_map(|id| self.record(*id))
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.selected.contains(&id)
    }

    pub fn active(&self) -> Option<UserId> {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Rendered slice of the visible rows at the current offset
    pub fn window(&self, viewport: &ViewportConfig) -> Window {
        viewport.window(self.offset, self.visible_ids().len())
    }

    /// Scroll so the active row is inside `viewport_rows` rows
    pub fn scroll_to_active(&mut self, viewport: &ViewportConfig, viewport_rows: usize) {
        let Some(active) = self.active else {
            return;
        };
        let Some(index) = self.visible_ids().iter().position(|id| *id == active) else {
            return;
        };

        let item_height = viewport.item_height.max(1);
        let row = scroll_offset_for(index, self.offset / item_height, viewport_rows);
        self.offset = row * item_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Иван", "Петров"),
            UserRecord::new(2, "Пётр", "Иванов"),
            UserRecord::new(3, "Анна", "Щербакова"),
            UserRecord::new(4, "John", "Smith"),
        ]
    }

    fn loaded() -> (PickerSession, FilterEngine) {
        let mut engine = FilterEngine::builtin();
        let mut session = PickerSession::new();
        session.load(users(), &mut engine);
        (session, engine)
    }

    fn filtered(query: &str) -> (PickerSession, FilterEngine) {
        let (mut session, mut engine) = loaded();
        session.set_query(query);
        session.apply_filter(&mut engine);
        (session, engine)
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = PickerSession::new();

        assert!(!session.is_loaded());
        assert!(session.visible_ids().is_empty());
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_filter_without_list_stays_unfiltered() {
        let mut engine = FilterEngine::builtin();
        let mut session = PickerSession::new();
        session.set_query("ivan");
        session.apply_filter(&mut engine);

        assert!(!session.is_filtered());
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_apply_filter_activates_first_match() {
        let (session, _) = filtered("Bdfy");

        assert!(session.is_filtered());
        assert_eq!(session.visible_ids(), &[UserId(1), UserId(2)]);
        assert_eq!(session.active(), Some(UserId(1)));
    }

    #[test]
    fn test_no_matches_leaves_nothing_active() {
        let (session, _) = filtered("zzz");

        assert!(session.is_filtered());
        assert!(session.visible_ids().is_empty());
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_apply_filter_scrolls_to_top() {
        let (mut session, mut engine) = loaded();
        session.set_offset(300);
        session.set_query("a");
        session.apply_filter(&mut engine);
        assert_eq!(session.offset(), 0);
    }

    #[test]
    fn test_selecting_resets_filter() {
        let (mut session, mut engine) = filtered("sch");
        assert_eq!(session.active(), Some(UserId(3)));

        assert_eq!(session.toggle_active(&mut engine), Some(true));
        assert_eq!(session.selected(), &[UserId(3)]);
        assert_eq!(session.query(), "");
        assert!(!session.is_filtered());
        assert_eq!(session.visible_ids().len(), 4);
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_deselect() {
        let (mut session, mut engine) = loaded();

        assert!(session.toggle(UserId(2), &mut engine));
        assert!(session.toggle(UserId(4), &mut engine));
        assert!(!session.toggle(UserId(2), &mut engine));
        assert_eq!(session.selected(), &[UserId(4)]);
        assert!(!session.toggle(UserId(99), &mut engine));
    }

    #[test]
    fn test_selected_records_keep_selection_order() {
        let (mut session, mut engine) = loaded();
        session.toggle(UserId(4), &mut engine);
        session.toggle(UserId(1), &mut engine);

        let names: Vec<String> = session.selected_records().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["John Smith", "Иван Петров"]);
    }

    #[test]
    fn test_move_active() {
        let (mut session, _) = loaded();

        assert_eq!(session.move_active(Step::Up), None);
        assert_eq!(session.move_active(Step::Down), Some(UserId(1)));
        assert_eq!(session.move_active(Step::Down), Some(UserId(2)));
        assert_eq!(session.move_active(Step::Up), Some(UserId(1)));
        assert_eq!(session.move_active(Step::Up), Some(UserId(1)));

        for _ in 0..10 {
            session.move_active(Step::Down);
        }
        assert_eq!(session.active(), Some(UserId(4)));
    }

    #[test]
    fn test_move_active_within_filter() {
        let (mut session, _) = filtered("Bdfy");

        assert_eq!(session.move_active(Step::Down), Some(UserId(2)));
        assert_eq!(session.move_active(Step::Down), Some(UserId(2)));
    }

    #[test]
    fn test_deactivate_and_remove_last() {
        let (mut session, mut engine) = filtered("Bdfy");
        session.deactivate();
        assert_eq!(session.toggle_active(&mut engine), None);

        session.toggle(UserId(1), &mut engine);
        session.toggle(UserId(3), &mut engine);
        assert_eq!(session.remove_last_selected(), Some(UserId(3)));
        assert_eq!(session.selected(), &[UserId(1)]);
    }

    #[test]
    fn test_reload_drops_state_and_cache() {
        let (mut session, mut engine) = filtered("Bdfy");
        session.toggle(UserId(1), &mut engine);
        assert!(!engine.cache().is_empty());

        session.load(vec![UserRecord::new(7, "Иванна", "Ли")], &mut engine);

        assert!(session.selected().is_empty());
        assert!(engine.cache().is_empty());
        session.set_query("Bdfy");
        session.apply_filter(&mut engine);
        assert_eq!(session.visible_ids(), &[UserId(7)]);
    }

    #[test]
    fn test_load_failed() {
        let (mut session, mut engine) = loaded();
        session.load_failed("connection refused", &mut engine);

        assert!(!session.is_loaded());
        assert_eq!(session.error(), Some("connection refused"));
    }

    #[test]
    fn test_failed_reload_drops_cached_results() {
        let mut engine = FilterEngine::builtin();
        let mut session = PickerSession::new();
        session.load(vec![UserRecord::new(1, "Иван", "Петров")], &mut engine);
        session.set_query("ivan");
        session.apply_filter(&mut engine);
        assert_eq!(session.visible_ids(), &[UserId(1)]);

        session.load_failed("connection refused", &mut engine);
        session.set_query("ivan");
        session.apply_filter(&mut engine);

        assert!(!session.is_filtered());
        assert!(session.visible_ids().is_empty());
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_scroll_to_active() {
        let viewport = ViewportConfig {
            item_height: 1,
            visible_items: 2,
            overscan_items: 0,
        };
        let (mut session, _) = loaded();
        for _ in 0..4 {
            session.move_active(Step::Down);
        }
        session.scroll_to_active(&viewport, 2);

        assert_eq!(session.offset(), 2);
        assert_eq!(session.window(&viewport).range(), 2..4);
    }
}
