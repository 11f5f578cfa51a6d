use leptos::*;
use leptos_meta::*;
use shell_runtime::{ShellDesktop, ShellHostContext, ShellProvider};

/// Layout rules for the desktop, window frames, resize handles and taskbar.
pub const SHELL_STYLESHEET: &str = include_str!("theme_shell/shell.css");

#[component]
pub fn ShellApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="iShell" />
        <Meta name="description" content="A desktop-style window shell running in the browser." />
        <Style id="ishell-layout">{SHELL_STYLESHEET}</Style>

        <main class="site-root">
            <ShellEntry />
        </main>
    }
}

#[component]
pub fn ShellEntry() -> impl IntoView {
    let host = ShellHostContext::new(shell_host_web::config_storage());

    view! {
        <ShellProvider host=host>
            <ShellDesktop />
        </ShellProvider>
    }
}

#[cfg(test)]
mod tests {
    use shell_runtime::ResizeDirection;

    use super::*;

    #[test]
    fn stylesheet_sizes_every_resize_handle() {
        assert!(SHELL_STYLESHEET.contains(".ishell-window {\n  position: absolute;"));
        for direction in ResizeDirection::ALL {
            let selector = format!(".window-resize-handle.{}", direction.css_class());
            assert!(
                SHELL_STYLESHEET.contains(&selector),
                "missing rule for {selector}"
            );
        }
    }
}
