//! sidebar-ui - Sidebar controller and page embellishments
//!
//! This library drives the navigation sidebar of a server-rendered web
//! application and the small page enhancements around it:
//! - Sidebar open/close with overlay, body scroll lock and focus handling
//! - Trigger routing (toggle, overlay, outside click, Escape, resize, nav links)
//! - Cancellable deferred tasks for post-open focus and post-navigation close
//! - Notifications, counter and progress-bar animation, keyboard shortcuts
//! - Server-side rendering of the sidebar surfaces in their closed state
//!
//! The controller never reads state back from the page. Page classes and
//! attributes are a projection of [`state::SidebarState`].
//!
//! ## Example
//! ```rust
//! use sidebar_ui::prelude::*;
//!
//! let page = MemoryPage::new(600.0);
//! let mut sidebar = SidebarController::new(SidebarConfig::default(), page);
//!
//! sidebar.page_mut().set_scroll_y(420.0);
//! sidebar.open();
//! assert!(sidebar.is_open());
//! assert_eq!(sidebar.page().body_top(), Some(-420.0));
//!
//! sidebar.page_mut().set_viewport_width(900.0);
//! sidebar.handle(Trigger::Resized);
//! assert!(!sidebar.is_open());
//! assert_eq!(sidebar.page().scroll_y(), 420.0);
//! ```

pub mod animate;
pub mod config;
pub mod controller;
pub mod deferred;
pub mod error;
pub mod markup;
pub mod nav;
pub mod notify;
pub mod shortcuts;
pub mod state;
pub mod surface;
pub mod trigger;

// Re-export common types
pub mod prelude {
    pub use crate::config::{SidebarConfig, UiConfig};
    pub use crate::controller::{SidebarController, SidebarSnapshot};
    pub use crate::deferred::Deferred;
    pub use crate::error::{UiError, UiResult};
    pub use crate::shortcuts::{KeyInput, Shortcut};
    pub use crate::state::SidebarState;
    pub use crate::surface::{MemoryPage, PageSurfaces, Surface};
    pub use crate::trigger::{EventOutcome, Target, Trigger};
}

#[cfg(feature = "wasm")]
pub mod wasm;
