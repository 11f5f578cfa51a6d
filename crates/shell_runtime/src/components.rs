//! Shell UI composition: desktop surface, window layer and taskbar.

mod window;

use std::time::Duration;

use leptos::*;

use self::window::ShellWindow;
use crate::{
    apps::AppCatalog,
    clock::{format_clock_date, format_clock_time, ClockSnapshot},
    model::{ShellState, WindowId},
    reducer::ShellAction,
    runtime_context::{use_shell_runtime, ShellRuntimeContext},
    window_manager::{is_topmost, taskbar_windows, window_chrome},
};

fn desktop_style(state: &ShellState) -> String {
    let theme = &state.config.theme;
    format!(
        "--ishell-primary:{};--ishell-background:{};background:{};font-family:{};",
        theme.primary, theme.background, theme.desktop_background, theme.font
    )
}

fn open_window_ids(state: &ShellState) -> Vec<WindowId> {
    taskbar_windows(state)
        .into_iter()
        .map(|window| window.id.clone())
        .collect()
}

/// Opens the app's window, or focuses it when it is already open.
fn launch(runtime: ShellRuntimeContext, app_id: &str) {
    runtime.dispatch_action(ShellAction::OpenWindow {
        window_id: WindowId::new(app_id),
    });
}

#[component]
/// Desktop surface with every open window and the taskbar.
pub fn ShellDesktop() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;

    view! {
        <div
            class="ishell-desktop"
            lang=move || state.get().config.language.code()
            style=move || desktop_style(&state.get())
        >
            <div class="ishell-window-layer">
                <For
                    each=move || open_window_ids(&state.get())
                    key=|window_id| window_id.clone()
                    let:window_id
                >
                    <ShellWindow window_id=window_id />
                </For>
            </div>
            <Taskbar />
        </div>
    }
}

#[component]
fn Taskbar() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let launchers = move || {
        AppCatalog::for_state(&state.get())
            .iter()
            .map(|app| (app.id.clone(), app.name.clone(), app.icon.clone()))
            .collect::<Vec<_>>()
    };
    let running = move || {
        let state = state.get();
        let catalog = AppCatalog::for_state(&state);
        taskbar_windows(&state)
            .into_iter()
            .map(|window| {
                let (title, icon) = window_chrome(&catalog, &window.id);
                let active = is_topmost(&state, &window.id);
                (window.id.clone(), title, icon, active)
            })
            .collect::<Vec<_>>()
    };
    let clock_time = move || {
        let state = state.get();
        format_clock_time(
            clock_now.get(),
            state.config.time_format,
            state.config.show_seconds,
        )
    };
    let clock_date = move || {
        let state = state.get();
        state
            .config
            .show_date
            .then(|| format_clock_date(clock_now.get(), state.config.language))
    };

    view! {
        <nav class="ishell-taskbar" aria-label="Taskbar">
            <div class="taskbar-launchers">
                <For each=launchers key=|(id, _, _)| id.clone() let:app>
                    {{
                        let (app_id, name, icon) = app;
                        view! {
                            <button
                                class="taskbar-launcher"
                                title=name
                                on:click=move |_| launch(runtime, &app_id)
                            >
                                {icon}
                            </button>
                        }
                    }}
                </For>
            </div>
            <div class="taskbar-windows">
                <For
                    each=running
                    key=|(id, title, _, active)| (id.clone(), title.clone(), *active)
                    let:entry
                >
                    {{
                        let (window_id, title, icon, active) = entry;
                        view! {
                            <button
                                class="taskbar-window"
                                class:active=active
                                on:click=move |_| {
                                    if !active {
                                        runtime.dispatch_action(ShellAction::BringToFront {
                                            window_id: window_id.clone(),
                                        });
                                    }
                                }
                            >
                                <span aria-hidden="true">{icon}</span>
                                <span>{title}</span>
                            </button>
                        }
                    }}
                </For>
            </div>
            <AppSearch />
            <div class="taskbar-clock" role="timer">
                <span class="taskbar-clock-time">{clock_time}</span>
                {move || {
                    clock_date().map(|date| view! { <span class="taskbar-clock-date">{date}</span> })
                }}
            </div>
        </nav>
    }
}

#[component]
fn AppSearch() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;

    let query = move || state.get().session.search_query.clone();
    let results = move || {
        let state = state.get();
        AppCatalog::for_state(&state)
            .search(&state.session.search_query)
            .into_iter()
            .map(|app| (app.id.clone(), app.name.clone(), app.icon.clone()))
            .collect::<Vec<_>>()
    };
    let set_query = move |query: String| {
        runtime.dispatch_action(ShellAction::SetSearchQuery { query });
    };

    view! {
        <div class="taskbar-search">
            <input
                type="search"
                placeholder="Search apps"
                prop:value=query
                on:input=move |ev| set_query(event_target_value(&ev))
            />
            <Show when=move || !results().is_empty() fallback=|| ()>
                <ul class="taskbar-search-results" role="listbox">
                    <For each=results key=|(id, _, _)| id.clone() let:app>
                        {{
                            let (app_id, name, icon) = app;
                            view! {
                                <li
                                    role="option"
                                    on:click=move |_| {
                                        launch(runtime, &app_id);
                                        set_query(String::new());
                                    }
                                >
                                    <span aria-hidden="true">{icon}</span>
                                    <span>{name}</span>
                                </li>
                            }
                        }}
                    </For>
                </ul>
            </Show>
        </div>
    }
}
