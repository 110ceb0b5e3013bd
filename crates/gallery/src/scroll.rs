use std::ops::Range;

use tracing::trace;

/// Scroll position of the menu list, measured in rows.
///
/// When every row fits (`visible >= len`) the offset stays at zero; on short
/// viewports `reveal` moves the window just far enough to show a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuScroller {
    len: usize,
    visible: usize,
    offset: usize,
}

impl MenuScroller {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            visible: len.max(1),
            offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn needs_scrolling(&self) -> bool {
        self.len > self.visible
    }

    pub fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.visible)
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.offset..(self.offset + self.visible).min(self.len)
    }

    pub fn set_visible(&mut self, rows: usize) {
        self.visible = rows.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Returns true when the offset changed.
    pub fn reveal(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let before = self.offset;
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.visible {
            self.offset = index + 1 - self.visible;
        }
        self.offset = self.offset.min(self.max_offset());
        if before != self.offset {
            trace!(index, offset = self.offset, "scrolled menu to reveal entry");
        }
        before != self.offset
    }

    /// Returns true when the offset changed.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let before = self.offset;
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.offset = target.min(self.max_offset());
        before != self.offset
    }
}
