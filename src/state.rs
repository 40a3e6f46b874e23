//! Sidebar open/closed state

use serde::Serialize;

/// The only source of truth for the sidebar.
///
/// Page markers (panel, overlay and body classes, toggle attributes) are
/// rendered from this value and never read back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SidebarState {
    is_open: bool,
    saved_scroll_offset: Option<f64>,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Mirrors `is_open` for the toggle control's `aria-expanded`
    pub fn toggle_control_expanded(&self) -> bool {
        self.is_open
    }

    /// Scroll offset captured when the panel opened
    pub fn saved_scroll_offset(&self) -> Option<f64> {
        self.saved_scroll_offset
    }

    /// Transition to open, capturing `scroll_y`.
    ///
    /// Returns false when already open; the offset captured on the first
    /// transition is kept.
    pub fn open(&mut self, scroll_y: f64) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.saved_scroll_offset = Some(scroll_y);
        true
    }

    /// Transition to closed.
    ///
    /// Returns the scroll offset to restore when this call closed an open
    /// panel, or `None` when it was already closed.
    pub fn close(&mut self) -> Option<f64> {
        if !self.is_open {
            return None;
        }
        self.is_open = false;
        Some(self.saved_scroll_offset.take().unwrap_or(0.0))
    }
}
