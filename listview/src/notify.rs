//! Transient notifications and navigation requests emitted by list pages.

use std::sync::Mutex;

use tracing::{error, info};

use crate::types::{Identity, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Receives notices from controllers and gateways.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.text, "success"),
            NoticeLevel::Error => error!(notice = %notice.text, "error"),
        }
    }
}

/// Keeps every notice in memory, oldest first.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}

/// How a detail page should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    View,
    Add,
}

/// A detail-page location, `/<kinds>/<owner>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub mode: RouteMode,
}

impl Route {
    pub fn detail(kind: ResourceKind, id: &Identity, mode: RouteMode) -> Self {
        Self {
            path: format!("/{}/{}/{}", kind.plural(), id.owner, id.name),
            mode,
        }
    }
}

/// Receives navigation requests (the host's router).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Keeps every navigation request in memory.
#[derive(Debug, Default)]
pub struct RouteLog {
    routes: Mutex<Vec<Route>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for RouteLog {
    fn navigate(&self, route: &Route) {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.clone());
    }
}
