mod shell_app;

pub use shell_app::{ShellApp, ShellEntry, SHELL_STYLESHEET};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <ShellApp /> })
}
