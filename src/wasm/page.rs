//! Browser implementation of the sidebar surfaces

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::config::SidebarConfig;
use crate::error::{UiError, UiResult};
use crate::surface::{PageSurfaces, Surface};
use crate::trigger::Target;

/// The live document. Surfaces are looked up on every write, so markup
/// replaced after binding is still reached.
pub struct DomPage {
    window: Window,
    document: Document,
    config: SidebarConfig,
}

impl DomPage {
    pub fn new(config: SidebarConfig) -> UiResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| UiError::HostUnavailable("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::HostUnavailable("window has no document".to_string()))?;
        Ok(Self {
            window,
            document,
            config,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, surface: Surface) -> Option<Element> {
        match surface {
            Surface::Panel => self.document.get_element_by_id(&self.config.ids.panel),
            Surface::Overlay => self.document.get_element_by_id(&self.config.ids.overlay),
            Surface::Toggle => self.document.get_element_by_id(&self.config.ids.toggle),
            Surface::Body => self.document.body().map(Element::from),
        }
    }

    /// Navigation links inside the panel
    pub fn nav_links(&self) -> Vec<Element> {
        let Some(panel) = self.element(Surface::Panel) else {
            return Vec::new();
        };
        let Ok(list) = panel.query_selector_all(&self.config.nav_link_selector) else {
            log::warn!("invalid nav link selector '{}'", self.config.nav_link_selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Classify an event target against the sidebar surfaces
    pub fn locate(&self, node: Option<&Node>) -> Target {
        let Some(node) = node else {
            return Target::Outside;
        };
        let contains = |surface: Surface| {
            self.element(surface)
                .is_some_and(|el| el.contains(Some(node)))
        };
        if contains(Surface::Toggle) {
            Target::Toggle
        } else if contains(Surface::Overlay) {
            Target::Overlay
        } else if contains(Surface::Panel) {
            Target::Panel
        } else {
            Target::Outside
        }
    }

    /// `bootstrap.Modal.getInstance(modal).hide()`; `None` when Bootstrap is
    /// not loaded or the modal was never initialised
    fn bootstrap_hide(&self, modal: &Element) -> Option<()> {
        let bootstrap = Reflect::get(&self.window, &JsValue::from_str("bootstrap")).ok()?;
        if bootstrap.is_undefined() || bootstrap.is_null() {
            return None;
        }
        let modal_class = Reflect::get(&bootstrap, &JsValue::from_str("Modal")).ok()?;
        let get_instance: Function = Reflect::get(&modal_class, &JsValue::from_str("getInstance"))
            .ok()?
            .dyn_into()
            .ok()?;
        let instance = get_instance.call1(&modal_class, modal).ok()?;
        if instance.is_undefined() || instance.is_null() {
            return None;
        }
        let hide: Function = Reflect::get(&instance, &JsValue::from_str("hide"))
            .ok()?
            .dyn_into()
            .ok()?;
        hide.call0(&instance).ok().map(|_| ())
    }

    fn html_element(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl PageSurfaces for DomPage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, y: f64) {
        let x = self.window.scroll_x().unwrap_or(0.0);
        self.window.scroll_to_with_x_and_y(x, y);
    }

    fn viewport_width(&self) -> f64 {
        // clientWidth, scrollbar excluded
        match self.document.document_element() {
            Some(root) => f64::from(root.client_width()),
            None => self
                .window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0),
        }
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn has_surface(&self, surface: Surface) -> bool {
        self.element(surface).is_some()
    }

    fn set_shown(&mut self, surface: Surface, shown: bool) {
        let class = match surface {
            Surface::Body => &self.config.classes.body_open,
            Surface::Panel | Surface::Overlay => &self.config.classes.shown,
            Surface::Toggle => return,
        };
        match self.element(surface) {
            Some(el) => {
                let _ = el.class_list().toggle_with_force(class, shown);
            }
            None => log::debug!("{surface:?} not on page, skipping marker"),
        }
    }

    fn set_body_lock(&mut self, top: Option<f64>) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let _ = match top {
            Some(top) => style.set_property("top", &format!("{top}px")),
            None => style.remove_property("top").map(|_| ()),
        };
    }

    fn set_toggle(&mut self, expanded: bool, label: &str) {
        let Some(toggle) = self.element(Surface::Toggle) else {
            log::debug!("toggle control not on page, skipping");
            return;
        };
        let _ = toggle
            .class_list()
            .toggle_with_force(&self.config.classes.toggle_active, expanded);
        let _ = toggle.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
        let _ = toggle.set_attribute("aria-label", label);
    }

    fn focus_first_link(&mut self) {
        let link = self
            .element(Surface::Panel)
            .and_then(|panel| panel.query_selector(&self.config.nav_link_selector).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(link) = link {
            let _ = link.focus();
        }
    }

    fn dismiss_modals(&mut self) {
        let Ok(modals) = self.document.query_selector_all(".modal") else {
            return;
        };
        for modal in (0..modals.length()).filter_map(|i| modals.get(i)) {
            let Ok(modal) = modal.dyn_into::<Element>() else {
                continue;
            };
            if self.bootstrap_hide(&modal).is_some() || !modal.class_list().contains("show") {
                continue;
            }
            let dismiss = modal
                .query_selector(r#"[data-bs-dismiss="modal"]"#)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(button) = dismiss {
                button.click();
            }
        }
    }

    fn focus_search(&mut self) {
        if let Some(input) = self.html_element(r#"input[type="search"]"#) {
            let _ = input.focus();
        }
    }

    fn follow_create_link(&mut self) {
        let href = self
            .document
            .query_selector(r#".btn-primary[href*="create"]"#)
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("href"));
        if let Some(href) = href {
            let _ = self.window.location().set_href(&href);
        }
    }
}
