//! Server-side markup for the sidebar surfaces
//!
//! Rendered in the closed projection so the first paint agrees with a
//! freshly constructed controller.

use std::fmt::Write;

use crate::config::SidebarConfig;
use crate::nav::is_active_link;

/// One entry in the sidebar navigation
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

impl NavItem {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Escape text for use in element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The toggle button, collapsed
pub fn render_toggle(config: &SidebarConfig) -> String {
    format!(
        r#"<button type="button" id="{id}" class="navbar-toggler" aria-controls="{panel}" aria-expanded="false" aria-label="{label}"><span class="navbar-toggler-icon"></span></button>"#,
        id = escape_html(&config.ids.toggle),
        panel = escape_html(&config.ids.panel),
        label = escape_html(config.toggle_label(false)),
    )
}

pub fn render_overlay(config: &SidebarConfig) -> String {
    format!(
        r#"<div id="{}" class="sidebar-overlay"></div>"#,
        escape_html(&config.ids.overlay)
    )
}

/// The panel with its navigation links; the link matching `current_path`
/// is marked active.
pub fn render_panel(config: &SidebarConfig, items: &[NavItem], current_path: &str) -> String {
    let link_class = nav_link_class(config);
    let mut html = format!(
        r#"<nav id="{}" class="sidebar"><ul class="nav flex-column">"#,
        escape_html(&config.ids.panel)
    );
    for item in items {
        let active = if is_active_link(Some(&item.href), current_path) {
            " active"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<li class="nav-item"><a class="{link_class}{active}" href="{}">{}</a></li>"#,
            escape_html(&item.href),
            escape_html(&item.label),
        );
    }
    html.push_str("</ul></nav>");
    html
}

/// Toggle, overlay and panel in document order
pub fn render_sidebar(config: &SidebarConfig, items: &[NavItem], current_path: &str) -> String {
    let mut html = render_toggle(config);
    html.push_str(&render_overlay(config));
    html.push_str(&render_panel(config, items, current_path));
    html
}

pub const LOADING_OVERLAY_CLASS: &str = "loading-overlay";

/// Page-blocking overlay with a spinner, hidden until shown
pub fn render_loading_overlay() -> String {
    format!(
        r#"<div class="{LOADING_OVERLAY_CLASS}" style="display: none"><div class="loading-spinner"></div></div>"#
    )
}

// The link selector is a class selector in every stock layout; anything
// fancier falls back to the stock class.
fn nav_link_class(config: &SidebarConfig) -> String {
    match config.nav_link_selector.strip_prefix('.') {
        Some(class) if !class.is_empty() && class.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') => {
            class.to_string()
        }
        _ => "nav-link".to_string(),
    }
}
