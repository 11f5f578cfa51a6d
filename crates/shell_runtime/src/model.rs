use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum window width enforced on every resize-driven update.
pub const MIN_WINDOW_WIDTH: f64 = 200.0;
/// Minimum window height enforced on every resize-driven update.
pub const MIN_WINDOW_HEIGHT: f64 = 200.0;
pub const DEFAULT_WINDOW_WIDTH: f64 = 600.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 400.0;
/// Top-left origin of a freshly created window, before jitter.
pub const WINDOW_SPAWN_BASE: f64 = 100.0;
/// Per-axis range of the random offset added to [`WINDOW_SPAWN_BASE`].
pub const WINDOW_SPAWN_JITTER: f64 = 200.0;
/// First value handed out by the global stacking counter.
pub const INITIAL_Z_INDEX: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Window identity. Matches the id of the application record the window shows.
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn clamped_min(self, min_width: f64, min_height: f64) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Position and size captured together, e.g. at the start of a resize gesture.
pub struct WindowGeometry {
    pub position: Point,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One open, or previously opened, application surface.
///
/// Records are never removed: closing only clears `is_open`, so a reopened window keeps the
/// geometry it had when it was closed.
pub struct WindowRecord {
    pub id: WindowId,
    pub is_open: bool,
    pub position: Point,
    pub size: Size,
    pub is_minimized: bool,
    pub z_index: u32,
}

impl WindowRecord {
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            position: self.position,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Partial window update. `None` fields are left as they are.
pub struct WindowUpdate {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub is_minimized: Option<bool>,
}

impl WindowUpdate {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn geometry(geometry: WindowGeometry) -> Self {
        Self {
            position: Some(geometry.position),
            size: Some(geometry.size),
            is_minimized: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellTheme {
    pub primary: String,
    pub background: String,
    pub desktop_background: String,
    pub font: String,
}

impl Default for ShellTheme {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".to_string(),
            background: "#1e293b".to_string(),
            desktop_background: "#1e293b".to_string(),
            font: "system-ui".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Shallow theme merge; only the provided fields change.
pub struct ThemePatch {
    pub primary: Option<String>,
    pub background: Option<String>,
    pub desktop_background: Option<String>,
    pub font: Option<String>,
}

impl ShellTheme {
    pub fn apply(&mut self, patch: ThemePatch) {
        if let Some(primary) = patch.primary {
            self.primary = primary;
        }
        if let Some(background) = patch.background {
            self.background = background;
        }
        if let Some(desktop_background) = patch.desktop_background {
            self.desktop_background = desktop_background;
        }
        if let Some(font) = patch.font {
            self.font = font;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    /// BCP 47 tag, also the persisted value.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12")]
    TwelveHour,
    #[default]
    #[serde(rename = "24")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Application record owned by the icon/app layer. The window manager only reads it.
pub struct AppRecord {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Renderable markup shown as the window body. Empty means "no content".
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub prompt: String,
    /// Desktop icon position.
    #[serde(default)]
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// The part of shell state that survives a reload.
///
/// `apps` holds user applications only; built-in apps come from the compiled catalog.
pub struct PersistableShellConfig {
    pub theme: ShellTheme,
    pub language: Language,
    pub time_format: TimeFormat,
    pub show_seconds: bool,
    pub show_date: bool,
    pub icon_size: IconSize,
    pub apps: Vec<AppRecord>,
}

impl Default for PersistableShellConfig {
    fn default() -> Self {
        Self {
            theme: ShellTheme::default(),
            language: Language::default(),
            time_format: TimeFormat::default(),
            show_seconds: true,
            show_date: true,
            icon_size: IconSize::default(),
            apps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// In-memory only state. Every reload starts from [`SessionState::default`].
pub struct SessionState {
    pub windows: Vec<WindowRecord>,
    pub next_z_index: u32,
    pub search_query: String,
    /// Set once a configuration change has been made in this session. Boot hydration that
    /// arrives afterwards is ignored.
    pub config_dirty: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_z_index: INITIAL_Z_INDEX,
            search_query: String::new(),
            config_dirty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellState {
    pub config: PersistableShellConfig,
    pub session: SessionState,
}

impl ShellState {
    pub fn from_config(config: PersistableShellConfig) -> Self {
        Self {
            config,
            session: SessionState::default(),
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.session.windows.iter().find(|w| w.id == *window_id)
    }

    pub fn open_window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.window(window_id).filter(|w| w.is_open)
    }

    pub fn is_window_open(&self, window_id: &WindowId) -> bool {
        self.open_window(window_id).is_some()
    }

    pub fn user_app(&self, app_id: &str) -> Option<&AppRecord> {
        self.config.apps.iter().find(|app| app.id == app_id)
    }
}
