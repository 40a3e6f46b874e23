//! Sidebar controller
//!
//! Owns the open/closed lifecycle of the navigation panel and keeps body
//! scroll, keyboard focus and the toggle's accessibility attributes in step
//! with it. Every trigger is routed through [`SidebarController::open`],
//! [`SidebarController::close`] and [`SidebarController::toggle`].

use serde::Serialize;

use crate::config::SidebarConfig;
use crate::deferred::{Deferred, DeferredQueue, Pending};
use crate::error::UiResult;
use crate::nav::is_navigable_href;
use crate::shortcuts::Shortcut;
use crate::state::SidebarState;
use crate::surface::{PageSurfaces, Surface};
use crate::trigger::{EventOutcome, Target, Trigger};

pub struct SidebarController<P: PageSurfaces> {
    config: SidebarConfig,
    state: SidebarState,
    page: P,
    deferred: DeferredQueue,
}

impl<P: PageSurfaces> SidebarController<P> {
    /// Create a controller for `page`. The sidebar starts closed; nothing is
    /// written to the page until [`SidebarController::sync`], an operation or
    /// a trigger.
    pub fn new(config: SidebarConfig, page: P) -> Self {
        Self {
            config,
            state: SidebarState::new(),
            page,
            deferred: DeferredQueue::new(),
        }
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn pending(&self) -> &[Pending] {
        self.deferred.pending()
    }

    /// Earliest due time of a pending deferred task
    pub fn next_due(&self) -> Option<f64> {
        self.deferred.next_due()
    }

    /// Open the panel. Calling it while open re-renders the same state.
    pub fn open(&mut self) {
        let scroll_y = self.page.scroll_y();
        let opened = self.state.open(scroll_y);
        self.project();
        if opened {
            self.deferred.cancel(Deferred::CloseAfterNavigation);
            let now = self.page.now_ms();
            self.deferred
                .schedule(Deferred::FocusFirstLink, now, self.config.focus_delay_ms);
            log::debug!("sidebar opened at scroll offset {scroll_y}");
        }
    }

    /// Close the panel. Scroll is restored only when this call closed an open
    /// panel; closing a closed panel just re-renders the closed markers.
    pub fn close(&mut self) {
        let restore = self.state.close();
        self.project();
        if let Some(scroll_y) = restore {
            self.deferred.cancel(Deferred::FocusFirstLink);
            self.page.scroll_to(scroll_y);
            log::debug!("sidebar closed, scroll restored to {scroll_y}");
        }
    }

    /// Overwrite whatever the page shows with the current state. Hosts call
    /// this once when binding, since delivered markup may carry stale markers.
    pub fn sync(&mut self) {
        self.project();
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Route a trigger to the open/close primitives
    pub fn handle(&mut self, trigger: Trigger) -> EventOutcome {
        match trigger {
            Trigger::ToggleActivated => {
                self.toggle();
                EventOutcome::consume()
            }
            Trigger::OverlayActivated => {
                self.close();
                EventOutcome::consume()
            }
            Trigger::PageActivated(target) => {
                if self.is_open() && matches!(target, Target::Outside | Target::Overlay) {
                    self.close();
                }
                EventOutcome::pass()
            }
            Trigger::NavLinkActivated { href } => {
                let narrow = self.config.is_narrow(self.page.viewport_width());
                if narrow && is_navigable_href(href.as_deref()) {
                    let now = self.page.now_ms();
                    self.deferred.schedule(
                        Deferred::CloseAfterNavigation,
                        now,
                        self.config.nav_close_delay_ms,
                    );
                }
                EventOutcome::pass()
            }
            Trigger::Key(input) => {
                let Some(shortcut) = Shortcut::classify(&input) else {
                    return EventOutcome::pass();
                };
                match shortcut {
                    Shortcut::Dismiss => {
                        self.page.dismiss_modals();
                        self.close();
                    }
                    Shortcut::FocusSearch => self.page.focus_search(),
                    Shortcut::CreateNew => self.page.follow_create_link(),
                }
                if shortcut.overrides_browser() {
                    EventOutcome::prevent_default()
                } else {
                    EventOutcome::pass()
                }
            }
            Trigger::Resized => {
                if self.is_open() && !self.config.is_narrow(self.page.viewport_width()) {
                    self.close();
                }
                EventOutcome::pass()
            }
            Trigger::PageLoaded => {
                if self.config.is_narrow(self.page.viewport_width()) {
                    self.close();
                } else {
                    self.sync();
                }
                EventOutcome::pass()
            }
        }
    }

    /// Run deferred tasks that are due on the page clock
    pub fn run_due(&mut self) -> usize {
        let now = self.page.now_ms();
        self.run_due_at(now)
    }

    pub fn run_due_at(&mut self, now_ms: f64) -> usize {
        let due = self.deferred.take_due(now_ms);
        for task in &due {
            match task {
                Deferred::FocusFirstLink => {
                    if self.is_open() {
                        self.page.focus_first_link();
                    }
                }
                Deferred::CloseAfterNavigation => self.close(),
            }
        }
        due.len()
    }

    pub fn snapshot(&self) -> SidebarSnapshot {
        SidebarSnapshot {
            is_open: self.state.is_open(),
            saved_scroll_offset: self.state.saved_scroll_offset(),
            viewport_width: self.page.viewport_width(),
            panel_exists: self.page.has_surface(Surface::Panel),
            overlay_exists: self.page.has_surface(Surface::Overlay),
            toggle_exists: self.page.has_surface(Surface::Toggle),
            pending: self.deferred.pending().to_vec(),
        }
    }

    fn project(&mut self) {
        let open = self.state.is_open();
        for surface in Surface::MARKED {
            self.page.set_shown(surface, open);
        }
        let top = self.state.saved_scroll_offset().filter(|_| open).map(|y| -y);
        self.page.set_body_lock(top);
        self.page.set_toggle(open, self.config.toggle_label(open));
    }
}

/// Point-in-time view of the controller for debugging from the console
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarSnapshot {
    pub is_open: bool,
    pub saved_scroll_offset: Option<f64>,
    pub viewport_width: f64,
    pub panel_exists: bool,
    pub overlay_exists: bool,
    pub toggle_exists: bool,
    pub pending: Vec<Pending>,
}

impl SidebarSnapshot {
    pub fn to_json(&self) -> UiResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
