//! Page enhancements bound next to the sidebar
//!
//! None of these know about the sidebar state.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, Window,
};

use crate::animate::{parse_counter_text, CounterAnimation, ProgressAnimation};
use crate::config::{AnimationConfig, FormConfig, LayoutConfig, NotificationConfig};
use crate::markup::{escape_html, render_loading_overlay, LOADING_OVERLAY_CLASS};
use crate::nav::is_active_link;
use crate::notify::{Alert, Toast};

use super::page::DomPage;

/// Bootstrap's `.fade` transition
const FADE_MS: u32 = 150;

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("invalid selector '{selector}'");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Call `frame` with elapsed milliseconds on every animation frame until it
/// returns false.
fn run_frames(window: &Window, mut frame: impl FnMut(f64) -> bool + 'static) {
    let start = js_sys::Date::now();
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    let win = window.clone();
    *slot.borrow_mut() = Some(Closure::new(move || {
        if !frame(js_sys::Date::now() - start) {
            // breaks the self-reference; freed once this frame returns
            next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));
    let first = slot.borrow();
    if let Some(callback) = first.as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Mark the panel links that point at the current path
pub fn mark_active_links(page: &DomPage, pathname: &str) {
    for link in page.nav_links() {
        if is_active_link(link.get_attribute("href").as_deref(), pathname) {
            let _ = link.class_list().add_1("active");
        }
    }
}

/// Wrap every `.table` in a `.table-responsive` container once
pub fn wrap_tables(document: &Document) {
    for table in query_all(document, ".table") {
        let Some(parent) = table.parent_element() else {
            continue;
        };
        if parent.class_list().contains("table-responsive") {
            continue;
        }
        let Ok(wrapper) = document.create_element("div") else {
            continue;
        };
        wrapper.set_class_name("table-responsive");
        let _ = parent.insert_before(&wrapper, Some(&table));
        let _ = wrapper.append_child(&table);
    }
}

/// Publish the navbar's outer height as a custom property on the root element
pub fn set_navbar_height(document: &Document, config: &LayoutConfig) {
    let height = document
        .query_selector(&config.navbar_selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|navbar| f64::from(navbar.offset_height()));
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let value = LayoutConfig::navbar_height_value(height);
    let _ = root
        .style()
        .set_property(&config.navbar_height_property, &value);
}

/// Keep the navbar height current across resizes and the final load
pub fn navbar_height_listeners(window: &Window, document: &Document, config: &LayoutConfig) -> Vec<EventListener> {
    set_navbar_height(document, config);
    ["resize", "load"]
        .into_iter()
        .map(|event| {
            let document = document.clone();
            let config = config.clone();
            EventListener::new(window, event, move |_| set_navbar_height(&document, &config))
        })
        .collect()
}

pub fn detect_touch(window: &Window, document: &Document) {
    let touch = Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0;
    if !touch {
        return;
    }
    if let Some(body) = document.body() {
        let _ = body.class_list().add_1("touch-device");
        log::debug!("touch device detected");
    }
}

pub fn animate_counters(window: &Window, document: &Document, config: &AnimationConfig) {
    for el in query_all(document, &config.counter_selector) {
        let Some(target) = el.text_content().as_deref().and_then(parse_counter_text) else {
            continue;
        };
        let counter = CounterAnimation::new(target, config.counter_ms);
        el.set_text_content(Some("0"));
        run_frames(window, move |elapsed| {
            el.set_text_content(Some(&counter.text_at(elapsed)));
            !counter.is_finished(elapsed)
        });
    }
}

pub fn animate_progress_bars(window: &Window, document: &Document, config: &AnimationConfig) {
    for el in query_all(document, &config.progress_selector) {
        let target = ProgressAnimation::target_from_attrs(
            el.get_attribute("data-width").as_deref(),
            el.get_attribute("aria-valuenow").as_deref(),
        );
        let Some(target) = target else {
            continue;
        };
        let Ok(bar) = el.dyn_into::<HtmlElement>() else {
            continue;
        };
        let animation = ProgressAnimation::new(target, config.progress_ms);
        let _ = bar.style().set_property("width", "0%");
        run_frames(window, move |elapsed| {
            let _ = bar.style().set_property("width", &animation.css_at(elapsed));
            !animation.is_finished(elapsed)
        });
    }
}

/// Keeps the observer and its callback alive for the page's lifetime
pub struct LazyImages {
    _observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// Load `img[data-src]` as the images scroll into view
pub fn lazy_images(document: &Document) -> Option<LazyImages> {
    let images = query_all(document, "img[data-src]");
    if images.is_empty() {
        return None;
    }
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let img = entry.target();
                if let Some(src) = img.get_attribute("data-src") {
                    let _ = img.set_attribute("src", &src);
                }
                let _ = img.class_list().remove_1("lazy");
                observer.unobserve(&img);
            }
        },
    );
    let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(_) => {
            log::debug!("IntersectionObserver unavailable, lazy images left as-is");
            return None;
        }
    };
    for img in &images {
        observer.observe(img);
    }
    Some(LazyImages {
        _observer: observer,
        _callback: callback,
    })
}

/// Show a busy state on a form's submit button while it submits
pub fn form_busy_listener(document: &Document, config: &FormConfig) -> EventListener {
    let busy_html = format!(r#"<span class="loading"></span> {}"#, escape_html(&config.busy_label));
    let restore_after = config.restore_after_ms;
    EventListener::new(document, "submit", move |event| {
        let Some(form) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let button = form
            .query_selector(r#"button[type="submit"]"#)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let Some(button) = button else {
            return;
        };
        let original = button.inner_html();
        button.set_inner_html(&busy_html);
        button.set_disabled(true);
        Timeout::new(restore_after, move || {
            button.set_inner_html(&original);
            button.set_disabled(false);
        })
        .forget();
    })
}

fn fade_out_later(el: Element, after_ms: u32) {
    Timeout::new(after_ms, move || {
        let _ = el.class_list().remove_1("show");
        Timeout::new(FADE_MS, move || el.remove()).forget();
    })
    .forget();
}

/// Prepend an alert into the content container and fade it out later
pub fn show_alert(document: &Document, config: &NotificationConfig, alert: &Alert) {
    let container = document
        .query_selector(&config.container_selector)
        .ok()
        .flatten();
    let Some(container) = container else {
        log::debug!("no '{}' to show alerts in", config.container_selector);
        return;
    };
    if container.insert_adjacent_html("afterbegin", &alert.to_html()).is_err() {
        return;
    }
    if let Some(el) = container.first_element_child() {
        fade_out_later(el, alert.duration_ms);
    }
}

/// Append a toast, creating the toast container on first use
pub fn show_toast(document: &Document, config: &NotificationConfig, toast: &Toast) {
    let container = match document.query_selector(".toast-container").ok().flatten() {
        Some(container) => container,
        None => {
            let (Some(body), Ok(container)) = (document.body(), document.create_element("div")) else {
                return;
            };
            container.set_class_name("toast-container");
            if body.append_child(&container).is_err() {
                return;
            }
            container
        }
    };
    if container
        .insert_adjacent_html("beforeend", &toast.to_html(&config.just_now_label))
        .is_err()
    {
        return;
    }
    if let Some(el) = container.last_element_child() {
        let _ = el.class_list().add_1("show");
        fade_out_later(el, config.alert_duration_ms);
    }
}

/// Show or hide the page loading overlay, creating it on first show
pub fn loading_overlay(document: &Document, show: bool) {
    let selector = format!(".{LOADING_OVERLAY_CLASS}");
    let existing = document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let overlay = match existing {
        Some(overlay) => overlay,
        None if show => {
            let Some(body) = document.body() else {
                return;
            };
            if body
                .insert_adjacent_html("beforeend", &render_loading_overlay())
                .is_err()
            {
                return;
            }
            let Some(overlay) = body
                .last_element_child()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            overlay
        }
        None => return,
    };
    if show {
        let _ = overlay.style().remove_property("display");
        let _ = overlay.class_list().add_1("show");
    } else {
        let _ = overlay.class_list().remove_1("show");
        Timeout::new(FADE_MS, move || {
            if !overlay.class_list().contains("show") {
                let _ = overlay.style().set_property("display", "none");
            }
        })
        .forget();
    }
}

/// Ask the user to confirm through the browser dialog. A blocked dialog
/// counts as declined.
pub fn confirm(window: &Window, message: &str) -> bool {
    window.confirm_with_message(message).unwrap_or(false)
}
