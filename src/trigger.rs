//! Sidebar triggers and the listeners that produce them

use serde::Serialize;

use crate::shortcuts::KeyInput;

/// Where a page-level activation landed, resolved by the host before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Target {
    Toggle,
    Overlay,
    /// The panel or any of its descendants
    Panel,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Trigger {
    ToggleActivated,
    OverlayActivated,
    /// Activation seen at document level after bubbling
    PageActivated(Target),
    /// A navigation link inside the panel was activated
    NavLinkActivated { href: Option<String> },
    Key(KeyInput),
    Resized,
    PageLoaded,
}

/// What the host must do with the originating event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EventOutcome {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventOutcome {
    pub fn pass() -> Self {
        Self::default()
    }

    /// Suppress both the default action and further propagation
    pub fn consume() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
        }
    }

    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    Toggle,
    Overlay,
    /// Each navigation link inside the panel
    NavLinks,
    Document,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerSpec {
    pub target: ListenTarget,
    pub event: &'static str,
}

/// The complete listener set for one sidebar: one listener per trigger per surface.
///
/// Toggle and overlay also listen for `touchend`, since iOS Safari sends no
/// `click` to a plain backdrop element. Those handlers consume the event, which
/// suppresses the emulated click that would otherwise follow.
pub const LISTENERS: [ListenerSpec; 9] = [
    ListenerSpec { target: ListenTarget::Toggle, event: "click" },
    ListenerSpec { target: ListenTarget::Toggle, event: "touchend" },
    ListenerSpec { target: ListenTarget::Overlay, event: "click" },
    ListenerSpec { target: ListenTarget::Overlay, event: "touchend" },
    ListenerSpec { target: ListenTarget::NavLinks, event: "click" },
    ListenerSpec { target: ListenTarget::Document, event: "click" },
    ListenerSpec { target: ListenTarget::Document, event: "keydown" },
    ListenerSpec { target: ListenTarget::Window, event: "resize" },
    ListenerSpec { target: ListenTarget::Window, event: "load" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_listener_set_has_no_duplicates() {
        let unique: HashSet<_> = LISTENERS.iter().collect();
        assert_eq!(unique.len(), LISTENERS.len());
    }

    #[test]
    fn test_touch_end_bound_on_toggle_and_overlay() {
        for target in [ListenTarget::Toggle, ListenTarget::Overlay] {
            let events: Vec<_> = LISTENERS
                .iter()
                .filter(|l| l.target == target)
                .map(|l| l.event)
                .collect();
            assert_eq!(events, ["click", "touchend"], "{target:?}");
        }
    }

    #[test]
    fn test_one_keydown_listener() {
        let keydowns = LISTENERS.iter().filter(|l| l.event == "keydown").count();
        assert_eq!(keydowns, 1);
    }

    #[test]
    fn test_one_document_click_listener() {
        let document_clicks = LISTENERS
            .iter()
            .filter(|l| l.target == ListenTarget::Document && l.event == "click")
            .count();
        assert_eq!(document_clicks, 1);
    }
}
