//! Alert and toast notifications
//!
//! Builds the Bootstrap markup for both; placing it on the page is the
//! host's job.

use serde::{Deserialize, Serialize};

use crate::markup::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    /// Parse a kind name; anything unknown is `Info`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" | "danger" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Font Awesome icon name
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-triangle",
            Self::Warning => "exclamation-circle",
            Self::Info => "info-circle",
        }
    }

    /// Bootstrap contextual suffix (`alert-*`, `text-*`)
    pub fn contextual(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A dismissible alert shown at the top of the content area
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: u32,
}

impl Alert {
    pub fn new(message: &str, kind: NotificationKind, duration_ms: u32) -> Self {
        Self {
            message: message.to_string(),
            kind,
            duration_ms,
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="alert alert-{ctx} alert-dismissible fade show" role="alert"><i class="fas fa-{icon} me-2"></i>{message}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
            ctx = self.kind.contextual(),
            icon = self.kind.icon(),
            message = escape_html(&self.message),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Toast {
    pub fn new(title: &str, message: &str, kind: NotificationKind) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            kind,
        }
    }

    pub fn to_html(&self, just_now_label: &str) -> String {
        format!(
            r#"<div class="toast" role="alert" aria-live="assertive" aria-atomic="true"><div class="toast-header"><i class="fas fa-{icon} me-2 text-{ctx}"></i><strong class="me-auto">{title}</strong><small class="text-muted">{when}</small><button type="button" class="btn-close" data-bs-dismiss="toast"></button></div><div class="toast-body">{message}</div></div>"#,
            icon = self.kind.icon(),
            ctx = self.kind.contextual(),
            title = escape_html(&self.title),
            when = escape_html(just_now_label),
            message = escape_html(&self.message),
        )
    }
}
