//! Runtime provider and context wiring for the shell.
//!
//! [`ShellProvider`] owns the [`ShellStore`], mirrors its snapshots into a signal for rendering,
//! queues reducer effects for the host, and keeps the single drag/resize engine.

use std::{cell::RefCell, rc::Rc};

use leptos::*;

use crate::{
    effect_executor,
    host::ShellHostContext,
    interaction::InteractionEngine,
    model::ShellState,
    persistence::{export_config_json, import_config_json, PersistenceError},
    pointer::PointerListenerGuard,
    reducer::{RuntimeEffect, ShellAction},
    store::ShellStore,
};

#[derive(Clone, Copy)]
/// Leptos context for reading shell state and dispatching [`ShellAction`] values.
pub struct ShellRuntimeContext {
    /// Injected host services used to run effects.
    pub host: StoredValue<ShellHostContext>,
    /// Canonical state container. Only `dispatch` writes to it.
    pub store: StoredValue<ShellStore>,
    /// Latest committed snapshot.
    pub state: RwSignal<Rc<ShellState>>,
    /// Effects emitted by the reducer and not yet executed.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Drag/resize session shared by every window.
    pub interaction: StoredValue<InteractionEngine<PointerListenerGuard>>,
    pub dispatch: Callback<ShellAction>,
}

impl ShellRuntimeContext {
    pub fn dispatch_action(&self, action: ShellAction) {
        self.dispatch.call(action);
    }

    /// Loads an imported configuration document. On a parse failure the error is logged and
    /// returned, and the current configuration stays in place.
    pub fn import_config(&self, raw: &str) -> Result<(), PersistenceError> {
        let config = import_config_json(raw)?;
        self.dispatch_action(ShellAction::LoadConfig { config });
        Ok(())
    }

    /// Export document for the current configuration.
    pub fn export_config(&self) -> Result<String, PersistenceError> {
        export_config_json(&self.state.get_untracked())
    }
}

#[component]
/// Provides [`ShellRuntimeContext`] to descendant components and hydrates stored configuration.
pub fn ShellProvider(
    /// Host bundle assembled by the entry layer.
    #[prop(optional)]
    host: ShellHostContext,
    children: Children,
) -> impl IntoView {
    let host = store_value(host);
    let store = store_value(ShellStore::default());
    let state = create_rw_signal(store.with_value(ShellStore::state));
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let interaction = store_value(InteractionEngine::new());

    let published: Rc<RefCell<Option<Rc<ShellState>>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&published);
    store.update_value(|store| {
        store.subscribe(move |next| *sink.borrow_mut() = Some(Rc::clone(next)));
    });

    let dispatch = Callback::new(move |action: ShellAction| {
        let Some(new_effects) = store.try_update_value(|store| store.dispatch(action)) else {
            logging::warn!("shell store disposed; dropping action");
            return;
        };
        // Publish after the store borrow ends so subscribers of `state` may dispatch again.
        let next = published.borrow_mut().take();
        if let Some(next) = next {
            state.set(next);
        }
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    });

    let runtime = ShellRuntimeContext {
        host,
        store,
        state,
        effects,
        interaction,
        dispatch,
    };

    provide_context(runtime);

    host.get_value().install_boot_hydration(dispatch);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`ShellRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ShellProvider`].
pub fn use_shell_runtime() -> ShellRuntimeContext {
    use_context::<ShellRuntimeContext>().expect("ShellRuntimeContext not provided")
}
