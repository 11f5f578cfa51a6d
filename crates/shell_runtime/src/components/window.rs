use super::*;
use crate::{
    apps::{BuiltinSurface, WindowContent},
    interaction::ResizeDirection,
    pointer::{begin_drag, begin_resize, is_primary_press, pointer_from_event},
    window_manager::{rendered_window, RenderedWindow},
};

fn window_style(win: &RenderedWindow) -> String {
    format!(
        "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        win.position.x, win.position.y, win.size.width, win.size.height, win.z_index
    )
}

fn stop_pointer_event(ev: &web_sys::PointerEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn ShellWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_shell_runtime();
    let window_id = store_value(window_id);

    let window = create_memo(move |_| {
        window_id.with_value(|id| rendered_window(&runtime.state.get(), id))
    });
    let chrome = create_memo(move |_| {
        window.with(|win| {
            win.as_ref()
                .map(|win| (win.title.clone(), win.icon.clone()))
                .unwrap_or_default()
        })
    });
    let content = create_memo(move |_| window.with(|win| win.as_ref().map(|w| w.content.clone())));
    let topmost = create_memo(move |_| {
        window_id.with_value(|id| is_topmost(&runtime.state.get(), id))
    });

    let focus = move |_: web_sys::PointerEvent| {
        if !topmost.get_untracked() {
            runtime.dispatch_action(ShellAction::BringToFront {
                window_id: window_id.get_value(),
            });
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        stop_pointer_event(&ev);
        begin_drag(runtime, &window_id.get_value(), pointer_from_event(&ev));
    };
    let close = move |_| {
        runtime.dispatch_action(ShellAction::CloseWindow {
            window_id: window_id.get_value(),
        });
    };

    view! {
        <section
            class="ishell-window"
            class:focused=move || topmost.get()
            style=move || window.with(|win| win.as_ref().map(window_style).unwrap_or_default())
            on:pointerdown=focus
            role="dialog"
            aria-label=move || chrome.get().0
        >
            <header class="titlebar" on:pointerdown=begin_move>
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">
                        {move || chrome.get().1}
                    </span>
                    <span>{move || chrome.get().0}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| stop_pointer_event(&ev)
                        on:click=close
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody content=content />
            </div>
            {ResizeDirection::ALL
                .into_iter()
                .map(|direction| {
                    view! { <WindowResizeHandle window_id=window_id direction=direction /> }
                })
                .collect_view()}
        </section>
    }
}

#[component]
fn WindowResizeHandle(
    window_id: StoredValue<WindowId>,
    direction: ResizeDirection,
) -> impl IntoView {
    let runtime = use_shell_runtime();
    let class_name = format!("window-resize-handle {}", direction.css_class());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        begin_resize(runtime, &window_id.get_value(), direction, pointer_from_event(&ev));
    };

    view! { <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown /> }
}

#[component]
fn WindowBody(content: Memo<Option<WindowContent>>) -> impl IntoView {
    move || match content.get() {
        Some(WindowContent::Html(code)) => {
            view! { <div class="window-app" inner_html=code></div> }.into_view()
        }
        Some(WindowContent::Builtin(BuiltinSurface::Settings)) => view! {
            <div class="window-builtin" data-surface="settings">
                <ConfigTransfer />
            </div>
        }
        .into_view(),
        Some(WindowContent::Builtin(BuiltinSurface::AddApp)) => {
            view! { <div class="window-builtin" data-surface="add-app">"Add App"</div> }
                .into_view()
        }
        Some(WindowContent::Missing) | None => {
            view! { <p class="window-missing">"App not found"</p> }.into_view()
        }
    }
}

/// Export and import of the configuration document through a text area.
#[component]
fn ConfigTransfer() -> impl IntoView {
    let runtime = use_shell_runtime();
    let document = create_rw_signal(String::new());
    let status = create_rw_signal(None::<String>);

    let export = move |_| match runtime.export_config() {
        Ok(json) => {
            document.set(json);
            status.set(None);
        }
        Err(err) => status.set(Some(err.to_string())),
    };
    let import = move |_| {
        let result = document.with_untracked(|raw| runtime.import_config(raw));
        status.set(result.err().map(|err| err.to_string()));
    };

    view! {
        <div class="config-transfer">
            <textarea
                class="config-transfer-document"
                aria-label="Configuration JSON"
                spellcheck="false"
                prop:value=move || document.get()
                on:input=move |ev| document.set(event_target_value(&ev))
            ></textarea>
            <div class="config-transfer-actions">
                <button on:click=export>"Export"</button>
                <button on:click=import>"Import"</button>
            </div>
            {move || {
                status
                    .get()
                    .map(|message| {
                        view! { <p class="config-transfer-error" role="alert">{message}</p> }
                    })
            }}
        </div>
    }
}
