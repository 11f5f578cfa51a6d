//! Browser desktop shell window manager: state store, window model, drag/resize engine,
//! persistence bridge and the Leptos binding that renders open windows.

pub mod apps;
pub mod clock;
pub mod components;
mod effect_executor;
pub mod host;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod pointer;
pub mod reducer;
pub mod runtime_context;
pub mod store;
pub mod window_manager;

pub use apps::{AppCatalog, BuiltinSurface, WindowContent};
pub use clock::{format_clock_date, format_clock_time, ClockSnapshot};
pub use components::ShellDesktop;
pub use host::ShellHostContext;
pub use interaction::{InteractionEngine, InteractionSession, PointerTracking, ResizeDirection};
pub use model::*;
pub use persistence::{
    export_config_json, import_config_json, load_shell_config, persist_shell_config,
    read_shell_config, PersistenceError, EXPORT_FILE_NAME, SHELL_CONFIG_KEY,
};
pub use reducer::{reduce_shell, RuntimeEffect, ShellAction};
pub use runtime_context::{use_shell_runtime, ShellProvider, ShellRuntimeContext};
pub use store::{ShellStore, SubscriptionId};
pub use window_manager::{render_plan, FixedPlacement, RenderedWindow, SpawnJitter, WindowPlacement};
