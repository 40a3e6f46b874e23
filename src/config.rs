//! Page configuration
//!
//! Every field has a default matching the stock page markup, so hosts only
//! pass the values they want to change.

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Viewport width separating the mobile (overlay) layout from desktop
pub const DEFAULT_BREAKPOINT_PX: f64 = 768.0;
/// Delay before focus moves into an opened panel, matching the slide-in transition
pub const DEFAULT_FOCUS_DELAY_MS: u32 = 300;
/// Delay before a navigation click closes the panel
pub const DEFAULT_NAV_CLOSE_DELAY_MS: u32 = 100;

/// Top-level configuration for everything the crate binds on a page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub sidebar: SidebarConfig,
    pub notifications: NotificationConfig,
    pub forms: FormConfig,
    pub animations: AnimationConfig,
    pub layout: LayoutConfig,
}

impl UiConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> UiResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with Korean toggle, timestamp, busy and confirmation labels
    pub fn korean() -> Self {
        Self {
            sidebar: SidebarConfig {
                labels: ToggleLabels {
                    open: "메뉴 열기".to_string(),
                    close: "메뉴 닫기".to_string(),
                },
                ..Default::default()
            },
            notifications: NotificationConfig {
                just_now_label: "방금 전".to_string(),
                ..Default::default()
            },
            forms: FormConfig {
                busy_label: "처리중...".to_string(),
                confirm_delete_message: "정말로 삭제하시겠습니까?".to_string(),
                ..Default::default()
            },
            animations: AnimationConfig::default(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn validate(&self) -> UiResult<()> {
        self.sidebar.validate()?;
        require_non_empty("notifications.container_selector", &self.notifications.container_selector)?;
        require_non_empty("layout.navbar_selector", &self.layout.navbar_selector)?;
        if !self.layout.navbar_height_property.starts_with("--") {
            return Err(UiError::InvalidConfig(format!(
                "layout.navbar_height_property must be a custom property, got '{}'",
                self.layout.navbar_height_property
            )));
        }
        Ok(())
    }
}

/// Sidebar surfaces, markers and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub breakpoint_px: f64,
    pub focus_delay_ms: u32,
    pub nav_close_delay_ms: u32,
    pub labels: ToggleLabels,
    pub ids: SurfaceIds,
    pub nav_link_selector: String,
    pub classes: MarkerClasses,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            focus_delay_ms: DEFAULT_FOCUS_DELAY_MS,
            nav_close_delay_ms: DEFAULT_NAV_CLOSE_DELAY_MS,
            labels: ToggleLabels::default(),
            ids: SurfaceIds::default(),
            nav_link_selector: ".nav-link".to_string(),
            classes: MarkerClasses::default(),
        }
    }
}

impl SidebarConfig {
    /// Set the mobile/desktop breakpoint
    pub fn with_breakpoint(mut self, px: f64) -> Self {
        self.breakpoint_px = px;
        self
    }

    /// Set both deferral delays
    pub fn with_delays(mut self, focus_ms: u32, nav_close_ms: u32) -> Self {
        self.focus_delay_ms = focus_ms;
        self.nav_close_delay_ms = nav_close_ms;
        self
    }

    /// True when `width` is on the mobile side of the breakpoint
    pub fn is_narrow(&self, width: f64) -> bool {
        width < self.breakpoint_px
    }

    /// Accessible label for the toggle control in the given state
    pub fn toggle_label(&self, open: bool) -> &str {
        if open {
            &self.labels.close
        } else {
            &self.labels.open
        }
    }

    pub fn validate(&self) -> UiResult<()> {
        if !self.breakpoint_px.is_finite() || self.breakpoint_px <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "breakpoint_px must be a positive number, got {}",
                self.breakpoint_px
            )));
        }
        require_non_empty("sidebar.ids.panel", &self.ids.panel)?;
        require_non_empty("sidebar.ids.overlay", &self.ids.overlay)?;
        require_non_empty("sidebar.ids.toggle", &self.ids.toggle)?;
        require_non_empty("sidebar.nav_link_selector", &self.nav_link_selector)?;
        require_class_name("sidebar.classes.shown", &self.classes.shown)?;
        require_class_name("sidebar.classes.body_open", &self.classes.body_open)?;
        require_class_name("sidebar.classes.toggle_active", &self.classes.toggle_active)?;
        Ok(())
    }
}

/// Accessible labels for the toggle control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleLabels {
    /// Label while closed (activating opens)
    pub open: String,
    /// Label while open (activating closes)
    pub close: String,
}

impl Default for ToggleLabels {
    fn default() -> Self {
        Self {
            open: "open menu".to_string(),
            close: "close menu".to_string(),
        }
    }
}

/// Element ids of the three sidebar surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceIds {
    pub panel: String,
    pub overlay: String,
    pub toggle: String,
}

impl Default for SurfaceIds {
    fn default() -> Self {
        Self {
            panel: "sidebar".to_string(),
            overlay: "sidebarOverlay".to_string(),
            toggle: "sidebarToggle".to_string(),
        }
    }
}

/// Class names the controller projects onto the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerClasses {
    /// Set on panel and overlay while open
    pub shown: String,
    /// Set on the body while open
    pub body_open: String,
    /// Set on the toggle control while open
    pub toggle_active: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            shown: "show".to_string(),
            body_open: "sidebar-open".to_string(),
            toggle_active: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub alert_duration_ms: u32,
    /// Alerts are prepended into the first element matching this selector
    pub container_selector: String,
    pub just_now_label: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            alert_duration_ms: 5000,
            container_selector: ".main-content".to_string(),
            just_now_label: "just now".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub busy_label: String,
    pub restore_after_ms: u32,
    /// Prompt used by delete confirmations when the caller passes none
    pub confirm_delete_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            busy_label: "Processing...".to_string(),
            restore_after_ms: 3000,
            confirm_delete_message: "Are you sure you want to delete this?".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Element whose outer height is published for the sidebar offset
    pub navbar_selector: String,
    /// Custom property set on the root element
    pub navbar_height_property: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            navbar_selector: ".navbar".to_string(),
            navbar_height_property: "--navbar-height".to_string(),
        }
    }
}

impl LayoutConfig {
    /// CSS value for a measured navbar height; a missing navbar counts as 0
    pub fn navbar_height_value(height_px: Option<f64>) -> String {
        let height = height_px.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(0.0);
        format!("{}px", height.round())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub counter_ms: u32,
    pub progress_ms: u32,
    pub counter_selector: String,
    pub progress_selector: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            counter_ms: 1500,
            progress_ms: 1000,
            counter_selector: ".stat-card h4, .stat-number".to_string(),
            progress_selector: ".progress-naver .progress-bar".to_string(),
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> UiResult<()> {
    if value.trim().is_empty() {
        return Err(UiError::InvalidConfig(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_class_name(field: &str, value: &str) -> UiResult<()> {
    require_non_empty(field, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(UiError::InvalidConfig(format!(
            "{field} must be a single class name, got '{value}'"
        )));
    }
    Ok(())
}
