//! Shell actions, side-effect intents, and the transition function for the shell state tree.

use crate::{
    apps::{is_reserved_app_id, sanitize_user_apps},
    model::{
        AppRecord, IconSize, Language, PersistableShellConfig, ShellState, ThemePatch,
        TimeFormat, WindowId, WindowRecord, WindowUpdate, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
    window_manager::{bring_to_front_internal, take_z_index, WindowPlacement},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_shell`]. Dispatching one of these is the only way state changes.
pub enum ShellAction {
    /// Open a window, creating its record on first use. Focuses it when already open.
    OpenWindow {
        /// Window (and app) id.
        window_id: WindowId,
    },
    /// Mark a window closed. Geometry and stacking value are kept for a later reopen.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Merge position/size/minimized fields into an existing record.
    UpdateWindow {
        /// Window to update.
        window_id: WindowId,
        /// Fields to replace.
        updates: WindowUpdate,
    },
    /// Raise an open window above all others.
    BringToFront {
        /// Window to raise.
        window_id: WindowId,
    },
    /// Merge theme colors and font.
    SetTheme {
        /// Fields to replace.
        patch: ThemePatch,
    },
    SetLanguage {
        language: Language,
    },
    SetTimeFormat {
        time_format: TimeFormat,
    },
    SetShowSeconds {
        enabled: bool,
    },
    SetShowDate {
        enabled: bool,
    },
    SetIconSize {
        icon_size: IconSize,
    },
    /// Add a user app. Reserved or already used ids are ignored.
    AddApp {
        app: AppRecord,
    },
    /// Replace the user app with the same id.
    UpdateApp {
        app: AppRecord,
    },
    /// Remove a user app and close its window.
    DeleteApp {
        app_id: String,
    },
    SetSearchQuery {
        query: String,
    },
    /// Replace configuration with a value read from storage at boot.
    HydrateConfig {
        config: PersistableShellConfig,
    },
    /// Replace configuration with an imported value and persist it.
    LoadConfig {
        config: PersistableShellConfig,
    },
    /// Restore initial configuration and clear durable storage.
    ResetConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_shell`] for the host layer to execute.
pub enum RuntimeEffect {
    /// Write the persistable projection of the new state.
    PersistConfig,
    /// Remove the persisted configuration.
    ClearPersistedConfig,
}

/// Applies `action` to `state` and returns the side effects the host should run.
///
/// Total: every action on every state yields a valid state. Actions naming a window or app that
/// does not exist leave the state untouched.
pub fn reduce_shell(
    state: &mut ShellState,
    action: ShellAction,
    placement: &mut dyn WindowPlacement,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        ShellAction::OpenWindow { window_id } => open_window(state, window_id, placement),
        ShellAction::CloseWindow { window_id } => {
            if let Some(window) = find_window_mut(state, &window_id) {
                window.is_open = false;
            }
        }
        ShellAction::UpdateWindow { window_id, updates } => {
            if let Some(window) = find_window_mut(state, &window_id) {
                apply_window_update(window, updates);
            }
        }
        ShellAction::BringToFront { window_id } => {
            bring_to_front_internal(state, &window_id);
        }
        ShellAction::SetTheme { patch } => {
            state.config.theme.apply(patch);
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::SetLanguage { language } => {
            state.config.language = language;
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::SetTimeFormat { time_format } => {
            state.config.time_format = time_format;
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::SetShowSeconds { enabled } => {
            state.config.show_seconds = enabled;
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::SetShowDate { enabled } => {
            state.config.show_date = enabled;
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::SetIconSize { icon_size } => {
            state.config.icon_size = icon_size;
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::AddApp { app } => {
            if !is_reserved_app_id(&app.id) && state.user_app(&app.id).is_none() {
                state.config.apps.push(app);
                effects.push(RuntimeEffect::PersistConfig);
            }
        }
        ShellAction::UpdateApp { app } => {
            if let Some(existing) = state.config.apps.iter_mut().find(|a| a.id == app.id) {
                *existing = app;
                effects.push(RuntimeEffect::PersistConfig);
            }
        }
        ShellAction::DeleteApp { app_id } => {
            let before_len = state.config.apps.len();
            state.config.apps.retain(|a| a.id != app_id);
            if state.config.apps.len() != before_len {
                if let Some(window) = find_window_mut(state, &WindowId::new(app_id)) {
                    window.is_open = false;
                }
                effects.push(RuntimeEffect::PersistConfig);
            }
        }
        ShellAction::SetSearchQuery { query } => {
            state.session.search_query = query;
        }
        ShellAction::HydrateConfig { config } => {
            if !state.session.config_dirty {
                state.config = sanitize_config(config);
            }
        }
        ShellAction::LoadConfig { config } => {
            state.config = sanitize_config(config);
            effects.push(RuntimeEffect::PersistConfig);
        }
        ShellAction::ResetConfig => {
            state.config = PersistableShellConfig::default();
            effects.push(RuntimeEffect::ClearPersistedConfig);
        }
    }

    if !effects.is_empty() {
        state.session.config_dirty = true;
    }
    effects
}

fn open_window(state: &mut ShellState, window_id: WindowId, placement: &mut dyn WindowPlacement) {
    match state.window(&window_id).map(|w| w.is_open) {
        Some(true) => {
            bring_to_front_internal(state, &window_id);
        }
        Some(false) => {
            let z_index = take_z_index(state);
            if let Some(window) = find_window_mut(state, &window_id) {
                window.is_open = true;
                window.z_index = z_index;
            }
        }
        None => {
            let position = placement.spawn_position();
            let z_index = take_z_index(state);
            state.session.windows.push(WindowRecord {
                id: window_id,
                is_open: true,
                position,
                size: Default::default(),
                is_minimized: false,
                z_index,
            });
        }
    }
}

fn apply_window_update(window: &mut WindowRecord, updates: WindowUpdate) {
    if let Some(position) = updates.position {
        window.position = position;
    }
    if let Some(size) = updates.size {
        window.size = size.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    }
    if let Some(is_minimized) = updates.is_minimized {
        window.is_minimized = is_minimized;
    }
}

fn find_window_mut<'a>(
    state: &'a mut ShellState,
    window_id: &WindowId,
) -> Option<&'a mut WindowRecord> {
    state
        .session
        .windows
        .iter_mut()
        .find(|w| w.id == *window_id)
}

fn sanitize_config(mut config: PersistableShellConfig) -> PersistableShellConfig {
    config.apps = sanitize_user_apps(config.apps);
    config
}
