//! Drains reducer-emitted runtime effects in order.

use leptos::*;

use crate::runtime_context::ShellRuntimeContext;

/// Installs the executor for `runtime.effects`.
pub fn install(runtime: ShellRuntimeContext) {
    // Clear the queue before running so effects that dispatch again enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            runtime.host.get_value().run_runtime_effect(runtime, effect);
        }
    });
}
