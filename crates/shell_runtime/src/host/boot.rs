use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{host::ShellHostContext, persistence, reducer::ShellAction};

pub(super) fn install_boot_hydration(host: ShellHostContext, dispatch: Callback<ShellAction>) {
    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let storage = host.storage();
            if let Some(config) = persistence::load_shell_config(storage.as_ref()).await {
                dispatch.call(ShellAction::HydrateConfig { config });
            }
        });
    });
}
