mod palette;

use ratatui::prelude::*;

pub use palette::Palette;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    // Panel border style
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.palette.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.border_default)
        }
    }

    // Count badge in the header: filtered or not
    pub fn count_badge(&self, filtered: bool) -> Style {
        let bg = if filtered {
            self.palette.bg_badge_filtered
        } else {
            self.palette.bg_badge_all
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    // Selected candidate chip in the input panel
    pub fn chip(&self) -> Style {
        Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.accent_success)
    }

    // Checkbox style
    pub fn checkbox(&self, checked: bool) -> Style {
        if checked {
            Style::default().fg(self.palette.accent_success)
        } else {
            Style::default().fg(self.palette.text_muted)
        }
    }

    // Active list row
    pub fn active_row(&self) -> Style {
        Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    // Primary text
    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    // Secondary/dimmed text
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    // Muted text (hints, labels)
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Title style for focused panel
    pub fn title_focused(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    // Title style for unfocused panel
    pub fn title_unfocused(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Key hint style (the key part like "Enter")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    // Status message style
    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.accent_warning)
    }

    // Load error
    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_danger)
            .add_modifier(Modifier::BOLD)
    }

    // Panel title with optional focus indicator
    pub fn panel_title(&self, title: &str, focused: bool) -> Line<'_> {
        if focused {
            Line::styled(format!(" {} ", title), self.title_focused())
        } else {
            Line::styled(format!(" {} ", title), self.title_unfocused())
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}
