//! WASM bindings for sidebar-ui
//!
//! [`SidebarUi`] binds one sidebar controller to the live document, with
//! exactly one listener per trigger, and runs the page enhancements. Only
//! one instance may be bound at a time; freeing it unbinds every listener.

mod enhance;
mod logger;
mod page;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, Node};

use crate::config::UiConfig;
use crate::controller::SidebarController;
use crate::deferred::{Deferred, Pending};
use crate::error::{UiError, UiResult};
use crate::notify::{Alert, NotificationKind, Toast};
use crate::shortcuts::KeyInput;
use crate::surface::Surface;
use crate::trigger::{EventOutcome, ListenTarget, Target, Trigger, LISTENERS};

pub use page::DomPage;

thread_local! {
    static BOUND: Cell<bool> = const { Cell::new(false) };
}

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

struct ArmedTimer {
    due_ms: f64,
    _timeout: Timeout,
}

/// Controller plus the browser timers standing in for its deferred tasks
struct Runtime {
    controller: RefCell<SidebarController<DomPage>>,
    timers: RefCell<HashMap<Deferred, ArmedTimer>>,
}

impl Runtime {
    /// Run `f` against the controller, then re-arm timers.
    ///
    /// A call made while the controller is already borrowed comes from an
    /// event the controller itself raised (a synthetic click, say) and is
    /// dropped.
    fn with_controller<R>(
        self: &Rc<Self>,
        f: impl FnOnce(&mut SidebarController<DomPage>) -> R,
    ) -> Option<R> {
        let result = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                log::debug!("sidebar busy, dropping nested call");
                return None;
            };
            f(&mut controller)
        };
        self.sync_timers();
        Some(result)
    }

    fn dispatch(self: &Rc<Self>, trigger: Trigger) -> Option<EventOutcome> {
        self.with_controller(|controller| controller.handle(trigger))
    }

    /// Make the armed timers match the controller's pending tasks
    fn sync_timers(self: &Rc<Self>) {
        let pending: Vec<Pending> = match self.controller.try_borrow() {
            Ok(controller) => controller.pending().to_vec(),
            Err(_) => return,
        };
        let now = js_sys::Date::now();
        let mut timers = self.timers.borrow_mut();
        timers.retain(|task, armed| {
            pending
                .iter()
                .any(|p| p.task == *task && p.due_ms == armed.due_ms)
        });
        for p in pending {
            if timers.contains_key(&p.task) {
                continue;
            }
            let delay = (p.due_ms - now).max(0.0).ceil() as u32;
            let runtime: Weak<Self> = Rc::downgrade(self);
            let (task, due_ms) = (p.task, p.due_ms);
            let timeout = Timeout::new(delay, move || {
                if let Some(runtime) = runtime.upgrade() {
                    runtime.fire(task, due_ms);
                }
            });
            timers.insert(task, ArmedTimer { due_ms, _timeout: timeout });
        }
    }

    fn fire(self: &Rc<Self>, task: Deferred, due_ms: f64) {
        drop(self.timers.borrow_mut().remove(&task));
        // the timer was armed for `due_ms`; never let clock skew make it early
        let now = js_sys::Date::now().max(due_ms);
        self.with_controller(|controller| controller.run_due_at(now));
    }

    fn locate(&self, event: &Event) -> Option<Target> {
        let controller = self.controller.try_borrow().ok()?;
        let node = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        Some(controller.page().locate(node.as_ref()))
    }
}

/// Listen for `event` on `target`, translating it into a sidebar trigger
fn listen(
    runtime: &Rc<Runtime>,
    target: &EventTarget,
    event: &'static str,
    to_trigger: impl Fn(&Runtime, &Event) -> Option<Trigger> + 'static,
) -> EventListener {
    let runtime = Rc::downgrade(runtime);
    EventListener::new_with_options(
        target,
        event,
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            let Some(trigger) = to_trigger(&runtime, event) else {
                return;
            };
            if let Some(outcome) = runtime.dispatch(trigger) {
                if outcome.prevent_default {
                    event.prevent_default();
                }
                if outcome.stop_propagation {
                    event.stop_propagation();
                }
            }
        },
    )
}

fn key_input(event: &Event) -> Option<KeyInput> {
    let event = event.dyn_ref::<KeyboardEvent>()?;
    Some(KeyInput {
        key: event.key(),
        key_code: event.key_code(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
    })
}

fn bind_sidebar(runtime: &Rc<Runtime>) -> Vec<EventListener> {
    let (window, document, toggle, overlay, links) = {
        let controller = runtime.controller.borrow();
        let page = controller.page();
        (
            page.window().clone(),
            page.document().clone(),
            page.element(Surface::Toggle),
            page.element(Surface::Overlay),
            page.nav_links(),
        )
    };

    let mut listeners = Vec::new();
    for listener in LISTENERS {
        match (listener.target, listener.event) {
            (ListenTarget::Toggle, event) => {
                if let Some(toggle) = &toggle {
                    listeners.push(listen(runtime, toggle, event, |_, _| {
                        Some(Trigger::ToggleActivated)
                    }));
                }
            }
            (ListenTarget::Overlay, event) => {
                if let Some(overlay) = &overlay {
                    listeners.push(listen(runtime, overlay, event, |_, _| {
                        Some(Trigger::OverlayActivated)
                    }));
                }
            }
            (ListenTarget::NavLinks, event) => {
                for link in &links {
                    let href_source: Element = link.clone();
                    listeners.push(listen(runtime, link, event, move |_, _| {
                        Some(Trigger::NavLinkActivated {
                            href: href_source.get_attribute("href"),
                        })
                    }));
                }
            }
            (ListenTarget::Document, "keydown") => {
                listeners.push(listen(runtime, &document, "keydown", |_, event| {
                    key_input(event).map(Trigger::Key)
                }));
            }
            (ListenTarget::Document, event) => {
                listeners.push(listen(runtime, &document, event, |runtime, event| {
                    runtime.locate(event).map(Trigger::PageActivated)
                }));
            }
            (ListenTarget::Window, "load") => {
                listeners.push(listen(runtime, &window, "load", |_, _| {
                    Some(Trigger::PageLoaded)
                }));
            }
            (ListenTarget::Window, event) => {
                listeners.push(listen(runtime, &window, event, |_, _| Some(Trigger::Resized)));
            }
        }
    }
    listeners
}

/// The sidebar and page enhancements bound to the current document
#[wasm_bindgen]
pub struct SidebarUi {
    runtime: Rc<Runtime>,
    config: UiConfig,
    _listeners: Vec<EventListener>,
    _lazy_images: Option<enhance::LazyImages>,
}

impl SidebarUi {
    fn bind(config: UiConfig) -> UiResult<Self> {
        let page = DomPage::new(config.sidebar.clone())?;
        if BOUND.with(|bound| bound.replace(true)) {
            return Err(UiError::AlreadyBound);
        }

        let window = page.window().clone();
        let document = page.document().clone();
        let pathname = window.location().pathname().unwrap_or_default();

        enhance::mark_active_links(&page, &pathname);
        enhance::wrap_tables(&document);
        enhance::detect_touch(&window, &document);
        enhance::animate_progress_bars(&window, &document, &config.animations);
        enhance::animate_counters(&window, &document, &config.animations);
        let lazy_images = enhance::lazy_images(&document);

        let runtime = Rc::new(Runtime {
            controller: RefCell::new(SidebarController::new(config.sidebar.clone(), page)),
            timers: RefCell::new(HashMap::new()),
        });
        // delivered markup may still carry an open panel
        runtime.with_controller(|controller| controller.sync());
        let mut listeners = bind_sidebar(&runtime);
        listeners.push(enhance::form_busy_listener(&document, &config.forms));
        listeners.extend(enhance::navbar_height_listeners(&window, &document, &config.layout));

        if document.ready_state() == "complete" {
            runtime.dispatch(Trigger::PageLoaded);
        }
        log::info!("sidebar bound with {} listeners", listeners.len());

        Ok(Self {
            runtime,
            config,
            _listeners: listeners,
            _lazy_images: lazy_images,
        })
    }

    fn document(&self) -> Option<web_sys::Document> {
        self.runtime
            .controller
            .try_borrow()
            .ok()
            .map(|controller| controller.page().document().clone())
    }

    fn window(&self) -> Option<web_sys::Window> {
        self.runtime
            .controller
            .try_borrow()
            .ok()
            .map(|controller| controller.page().window().clone())
    }
}

#[wasm_bindgen]
impl SidebarUi {
    /// Bind to the current document. `config_json` overrides any subset of
    /// the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<SidebarUi, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => UiConfig::from_json(json),
            None => Ok(UiConfig::default()),
        };
        config
            .and_then(Self::bind)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn open(&self) {
        self.runtime.with_controller(|controller| controller.open());
    }

    pub fn close(&self) {
        self.runtime.with_controller(|controller| controller.close());
    }

    pub fn toggle(&self) {
        self.runtime.with_controller(|controller| controller.toggle());
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.runtime
            .controller
            .try_borrow()
            .map(|controller| controller.is_open())
            .unwrap_or(false)
    }

    /// Controller state as JSON, for poking at from the devtools console
    #[wasm_bindgen(js_name = debugState)]
    pub fn debug_state(&self) -> Result<String, JsValue> {
        let controller = self
            .runtime
            .controller
            .try_borrow()
            .map_err(|_| JsValue::from_str("sidebar busy"))?;
        controller
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(&self, message: &str, kind: Option<String>, duration_ms: Option<u32>) {
        let Some(document) = self.document() else {
            return;
        };
        let kind = NotificationKind::parse(kind.as_deref().unwrap_or("info"));
        let duration = duration_ms.unwrap_or(self.config.notifications.alert_duration_ms);
        enhance::show_alert(&document, &self.config.notifications, &Alert::new(message, kind, duration));
    }

    #[wasm_bindgen(js_name = showToast)]
    pub fn show_toast(&self, title: &str, message: &str, kind: Option<String>) {
        let Some(document) = self.document() else {
            return;
        };
        let kind = NotificationKind::parse(kind.as_deref().unwrap_or("info"));
        enhance::show_toast(&document, &self.config.notifications, &Toast::new(title, message, kind));
    }

    /// Show (default) or hide the page loading overlay
    #[wasm_bindgen(js_name = loadingOverlay)]
    pub fn loading_overlay(&self, show: Option<bool>) {
        if let Some(document) = self.document() {
            enhance::loading_overlay(&document, show.unwrap_or(true));
        }
    }

    /// Confirm a deletion, using the configured prompt when `message` is omitted
    #[wasm_bindgen(js_name = confirmDelete)]
    pub fn confirm_delete(&self, message: Option<String>) -> bool {
        let message = message.unwrap_or_else(|| self.config.forms.confirm_delete_message.clone());
        self.window()
            .is_some_and(|window| enhance::confirm(&window, &message))
    }

    /// Run `callback` only if the user confirms `message`
    #[wasm_bindgen(js_name = confirmAction)]
    pub fn confirm_action(&self, message: &str, callback: &js_sys::Function) -> Result<(), JsValue> {
        let confirmed = self
            .window()
            .is_some_and(|window| enhance::confirm(&window, message));
        if confirmed {
            callback.call0(&JsValue::NULL)?;
        }
        Ok(())
    }
}

impl Drop for SidebarUi {
    fn drop(&mut self) {
        BOUND.with(|bound| bound.set(false));
    }
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
