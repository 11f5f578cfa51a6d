//! Application catalog: compiled-in apps plus the user's apps from configuration.

use std::sync::OnceLock;

use crate::model::{AppRecord, Point, ShellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Shell-provided window bodies.
pub enum BuiltinSurface {
    Settings,
    AddApp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinApp {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub surface: BuiltinSurface,
    pub icon_x: f64,
    pub icon_y: f64,
}

include!(concat!(env!("OUT_DIR"), "/builtin_apps_generated.rs"));

/// Built-in apps as regular records, in catalog order.
pub fn builtin_apps() -> &'static [AppRecord] {
    static RECORDS: OnceLock<Vec<AppRecord>> = OnceLock::new();
    RECORDS.get_or_init(|| {
        BUILTIN_APPS
            .iter()
            .map(|app| AppRecord {
                id: app.id.to_string(),
                name: app.name.to_string(),
                icon: app.icon.to_string(),
                code: String::new(),
                prompt: String::new(),
                position: Point::new(app.icon_x, app.icon_y),
            })
            .collect()
    })
}

/// Ids owned by the shell. They are never persisted and cannot be added or deleted by users.
pub fn is_reserved_app_id(app_id: &str) -> bool {
    BUILTIN_APPS.iter().any(|app| app.id == app_id)
}

pub fn builtin_surface(app_id: &str) -> Option<BuiltinSurface> {
    BUILTIN_APPS
        .iter()
        .find(|app| app.id == app_id)
        .map(|app| app.surface)
}

/// Drops reserved ids and repeated ids (first occurrence wins) from a user app list.
pub fn sanitize_user_apps(apps: Vec<AppRecord>) -> Vec<AppRecord> {
    let mut kept: Vec<AppRecord> = Vec::with_capacity(apps.len());
    for app in apps {
        if is_reserved_app_id(&app.id) || kept.iter().any(|existing| existing.id == app.id) {
            continue;
        }
        kept.push(app);
    }
    kept
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a window body shows, resolved from its id.
pub enum WindowContent {
    Builtin(BuiltinSurface),
    /// Markup supplied by a user app.
    Html(String),
    /// No app record, or an app without content.
    Missing,
}

#[derive(Debug, Clone, Copy)]
pub struct AppCatalog<'a> {
    user_apps: &'a [AppRecord],
}

impl<'a> AppCatalog<'a> {
    pub fn new(user_apps: &'a [AppRecord]) -> Self {
        Self { user_apps }
    }

    pub fn for_state(state: &'a ShellState) -> Self {
        Self::new(&state.config.apps)
    }

    /// Built-in apps first, then user apps in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &'a AppRecord> {
        let user_apps = self.user_apps;
        builtin_apps()
            .iter()
            .chain(user_apps.iter().filter(|app| !is_reserved_app_id(&app.id)))
    }

    pub fn find(&self, app_id: &str) -> Option<&'a AppRecord> {
        self.iter().find(|app| app.id == app_id)
    }

    pub fn window_content(&self, app_id: &str) -> WindowContent {
        if let Some(surface) = builtin_surface(app_id) {
            return WindowContent::Builtin(surface);
        }
        match self.find(app_id) {
            Some(app) if !app.code.is_empty() => WindowContent::Html(app.code.clone()),
            _ => WindowContent::Missing,
        }
    }

    /// Apps whose name contains `query`, ignoring case. An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&'a AppRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|app| app.name.to_lowercase().contains(&needle))
            .collect()
    }
}
