//! Page surfaces the sidebar projects onto
//!
//! [`PageSurfaces`] is the seam between the controller and a concrete page.
//! The browser implementation lives in `wasm::page`; [`MemoryPage`] keeps
//! everything in memory for headless hosting and tests.
//!
//! Implementations must treat an absent surface as a silent no-op. Pages
//! without a sidebar are normal.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Surface {
    Panel,
    Overlay,
    Body,
    Toggle,
}

impl Surface {
    /// The three surfaces that carry the shown marker
    pub const MARKED: [Surface; 3] = [Surface::Panel, Surface::Overlay, Surface::Body];
    pub const ALL: [Surface; 4] = [Surface::Panel, Surface::Overlay, Surface::Body, Surface::Toggle];
}

pub trait PageSurfaces {
    /// Current vertical scroll offset of the window
    fn scroll_y(&self) -> f64;

    /// Scroll vertically to `y`, keeping the horizontal offset
    fn scroll_to(&mut self, y: f64);

    /// Layout viewport width in CSS pixels
    fn viewport_width(&self) -> f64;

    /// Monotonic-enough clock in milliseconds
    fn now_ms(&self) -> f64;

    fn has_surface(&self, surface: Surface) -> bool;

    /// Set or clear the shown marker on panel, overlay or body
    fn set_shown(&mut self, surface: Surface, shown: bool);

    /// Pin the body at `top` (negative scroll offset), or release it with `None`
    fn set_body_lock(&mut self, top: Option<f64>);

    /// Project expanded state and accessible label onto the toggle control
    fn set_toggle(&mut self, expanded: bool, label: &str);

    fn focus_first_link(&mut self);

    /// Hide every modal dialog on the page
    fn dismiss_modals(&mut self);

    fn focus_search(&mut self) {}

    /// Follow the page's primary "create" link, if it has one
    fn follow_create_link(&mut self) {}
}

/// In-memory page.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    viewport_width: f64,
    scroll_x: f64,
    scroll_y: f64,
    now_ms: f64,
    present: HashSet<Surface>,
    shown: HashMap<Surface, bool>,
    body_top: Option<f64>,
    toggle_expanded: Option<bool>,
    toggle_label: Option<String>,
    has_nav_links: bool,
    link_focused: bool,
    open_modals: usize,
    search_focused: bool,
    create_link: Option<String>,
    location: Option<String>,
}

impl MemoryPage {
    /// A page with every sidebar surface present and one nav link
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            scroll_x: 0.0,
            scroll_y: 0.0,
            now_ms: 0.0,
            present: Surface::ALL.into_iter().collect(),
            shown: HashMap::new(),
            body_top: None,
            toggle_expanded: None,
            toggle_label: None,
            has_nav_links: true,
            link_focused: false,
            open_modals: 0,
            search_focused: false,
            create_link: None,
            location: None,
        }
    }

    /// Remove a surface from the page
    pub fn without(mut self, surface: Surface) -> Self {
        self.present.remove(&surface);
        self.shown.remove(&surface);
        self
    }

    pub fn without_nav_links(mut self) -> Self {
        self.has_nav_links = false;
        self
    }

    pub fn with_create_link(mut self, href: &str) -> Self {
        self.create_link = Some(href.to_string());
        self
    }

    /// Markup delivered with the shown markers already set, as cached or
    /// server-rendered pages sometimes are
    pub fn with_residual_open_markup(mut self) -> Self {
        for surface in Surface::MARKED {
            if self.present.contains(&surface) {
                self.shown.insert(surface, true);
            }
        }
        self
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Simulate the user scrolling
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_scroll_x(&mut self, x: f64) {
        self.scroll_x = x;
    }

    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn open_modal(&mut self) {
        self.open_modals += 1;
    }

    pub fn open_modals(&self) -> usize {
        self.open_modals
    }

    /// Shown marker of a surface; `None` when the surface is absent
    pub fn is_shown(&self, surface: Surface) -> Option<bool> {
        if !self.present.contains(&surface) {
            return None;
        }
        Some(self.shown.get(&surface).copied().unwrap_or(false))
    }

    /// Markers of panel, overlay and body in that order
    pub fn markers(&self) -> [Option<bool>; 3] {
        Surface::MARKED.map(|s| self.is_shown(s))
    }

    pub fn body_top(&self) -> Option<f64> {
        self.body_top
    }

    pub fn toggle_expanded(&self) -> Option<bool> {
        self.toggle_expanded
    }

    pub fn toggle_label(&self) -> Option<&str> {
        self.toggle_label.as_deref()
    }

    pub fn link_focused(&self) -> bool {
        self.link_focused
    }

    /// Blur whatever has focus
    pub fn blur(&mut self) {
        self.link_focused = false;
        self.search_focused = false;
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    /// Where the page navigated to, if anywhere
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl PageSurfaces for MemoryPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn has_surface(&self, surface: Surface) -> bool {
        self.present.contains(&surface)
    }

    fn set_shown(&mut self, surface: Surface, shown: bool) {
        if self.present.contains(&surface) {
            self.shown.insert(surface, shown);
        }
    }

    fn set_body_lock(&mut self, top: Option<f64>) {
        if self.present.contains(&Surface::Body) {
            self.body_top = top;
        }
    }

    fn set_toggle(&mut self, expanded: bool, label: &str) {
        if self.present.contains(&Surface::Toggle) {
            self.toggle_expanded = Some(expanded);
            self.toggle_label = Some(label.to_string());
        }
    }

    fn focus_first_link(&mut self) {
        if self.present.contains(&Surface::Panel) && self.has_nav_links {
            self.search_focused = false;
            self.link_focused = true;
        }
    }

    fn dismiss_modals(&mut self) {
        self.open_modals = 0;
    }

    fn focus_search(&mut self) {
        self.link_focused = false;
        self.search_focused = true;
    }

    fn follow_create_link(&mut self) {
        if let Some(href) = &self.create_link {
            self.location = Some(href.clone());
        }
    }
}
