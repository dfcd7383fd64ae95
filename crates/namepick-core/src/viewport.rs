// Namepick Viewport
// Fixed-height virtual scrolling math for candidate lists

/// Fixed-height list window settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Height of one row, in the caller's units (pixels, terminal rows)
    pub item_height: usize,
    /// Rows rendered past the first visible one
    pub visible_items: usize,
    /// Extra rows rendered ahead; also the granularity of the window start
    pub overscan_items: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            item_height: 50,
            visible_items: 50,
            overscan_items: 20,
        }
    }
}

/// Slice of the list to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First rendered index
    pub start: usize,
    /// One past the last rendered index
    pub end: usize,
    /// Offset of the first rendered row from the top of the list
    pub top: usize,
    /// Height of the whole list
    pub total_height: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl ViewportConfig {
    fn item_height(&self) -> usize {
        self.item_height.max(1)
    }

    /// Rows to render for a scroll `offset` over `item_count` rows
    ///
    /// The start snaps down to a multiple of `overscan_items` so the window
    /// only moves once per overscan block while scrolling.
    pub fn window(&self, offset: usize, item_count: usize) -> Window {
        let item_height = self.item_height();
        let mut start = offset / item_height;
        let mut visible = self.visible_items;

        if self.overscan_items > 0 {
            start -= start % self.overscan_items;
            visible += self.overscan_items;
        }

        let start = start.min(item_count);
        let end = (start + 1 + visible).min(item_count);

        Window {
            start,
            end,
            top: start * item_height,
            total_height: item_count * item_height,
        }
    }
}

/// Scroll offset, in rows, that keeps `index` inside `viewport_rows` rows
///
/// Returns `current_offset` when the row is already visible.
pub fn scroll_offset_for(index: usize, current_offset: usize, viewport_rows: usize) -> usize {
    if viewport_rows == 0 {
        return index;
    }
    if index < current_offset {
        index
    } else if index >= current_offset + viewport_rows {
        index + 1 - viewport_rows
    } else {
        current_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewportConfig::default();
        assert_eq!(config.item_height, 50);
        assert_eq!(config.visible_items, 50);
        assert_eq!(config.overscan_items, 20);
    }

    #[test]
    fn test_window_at_top() {
        let window = ViewportConfig::default().window(0, 1000);

        assert_eq!(window.start, 0);
        // 1 + visible + overscan
        assert_eq!(window.end, 71);
        assert_eq!(window.top, 0);
        assert_eq!(window.total_height, 50_000);
    }

    #[test]
    fn test_window_snaps_to_overscan_block() {
        let config = ViewportConfig::default();

        // Row 37 snaps down to row 20
        let window = config.window(37 * 50 + 10, 1000);
        assert_eq!(window.start, 20);
        assert_eq!(window.end, 91);
        assert_eq!(window.top, 1000);

        // Every offset inside the block gives the same window
        assert_eq!(config.window(39 * 50, 1000), window);
    }

    #[test]
    fn test_window_clamped_to_list() {
        let config = ViewportConfig::default();

        let window = config.window(0, 10);
        assert_eq!(window.range(), 0..10);

        let window = config.window(5_000, 10);
        assert!(window.is_empty());
        assert_eq!(window.start, 10);
    }

    #[test]
    fn test_window_without_overscan() {
        let config = ViewportConfig {
            item_height: 1,
            visible_items: 5,
            overscan_items: 0,
        };
        let window = config.window(13, 100);

        assert_eq!(window.range(), 13..19);
        assert_eq!(window.len(), 6);
    }

    #[test]
    fn test_zero_item_height() {
        let config = ViewportConfig {
            item_height: 0,
            visible_items: 2,
            overscan_items: 0,
        };
        let window = config.window(4, 10);
        assert_eq!(window.range(), 4..7);
        assert_eq!(window.total_height, 10);
    }

    #[test]
    fn test_empty_list() {
        let window = ViewportConfig::default().window(0, 0);
        assert!(window.is_empty());
        assert_eq!(window.total_height, 0);
    }

    #[test]
    fn test_scroll_offset_for() {
        assert_eq!(scroll_offset_for(3, 0, 10), 0);
        assert_eq!(scroll_offset_for(12, 0, 10), 3);
        assert_eq!(scroll_offset_for(2, 5, 10), 2);
        assert_eq!(scroll_offset_for(14, 5, 10), 5);
        assert_eq!(scroll_offset_for(15, 5, 10), 6);
    }
}
