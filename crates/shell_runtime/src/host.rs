//! Host-side helpers that execute reducer effects against injected services.

mod boot;
mod persistence_effects;

use std::rc::Rc;

use leptos::Callback;
use shell_host::{ConfigStorage, NoopConfigStorage};

use crate::{
    reducer::{RuntimeEffect, ShellAction},
    runtime_context::ShellRuntimeContext,
};

#[derive(Clone)]
/// Service bundle the entry layer injects into [`crate::ShellProvider`].
pub struct ShellHostContext {
    storage: Rc<dyn ConfigStorage>,
}

impl Default for ShellHostContext {
    fn default() -> Self {
        Self::new(Rc::new(NoopConfigStorage))
    }
}

impl ShellHostContext {
    pub fn new(storage: Rc<dyn ConfigStorage>) -> Self {
        Self { storage }
    }

    /// Returns the configured durable configuration store.
    pub fn storage(&self) -> Rc<dyn ConfigStorage> {
        self.storage.clone()
    }

    /// Loads the stored configuration once and dispatches it as a hydration action.
    pub fn install_boot_hydration(&self, dispatch: Callback<ShellAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: ShellRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistConfig => {
                persistence_effects::persist_config(self.clone(), runtime)
            }
            RuntimeEffect::ClearPersistedConfig => {
                persistence_effects::clear_config(self.clone())
            }
        }
    }
}
