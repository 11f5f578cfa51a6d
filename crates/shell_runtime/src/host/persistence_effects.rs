use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::ShellHostContext, persistence, runtime_context::ShellRuntimeContext};

pub(super) fn persist_config(host: ShellHostContext, runtime: ShellRuntimeContext) {
    let state = runtime.state.get_untracked();
    spawn_local(async move {
        let storage = host.storage();
        if let Err(err) = persistence::persist_shell_config(storage.as_ref(), &state).await {
            logging::warn!("persist shell config failed: {err}");
        }
    });
}

pub(super) fn clear_config(host: ShellHostContext) {
    spawn_local(async move {
        let storage = host.storage();
        if let Err(err) = persistence::clear_shell_config(storage.as_ref()).await {
            logging::warn!("clear shell config failed: {err}");
        }
    });
}
