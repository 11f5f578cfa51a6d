//! Browser side of the drag/resize engine: document-level listeners and event translation.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::{
    interaction::{PointerTracking, ResizeDirection},
    model::{Point, WindowId},
    runtime_context::ShellRuntimeContext,
};

/// Removes the session's listeners when dropped.
pub struct PointerListenerGuard {
    removers: Vec<Box<dyn FnOnce()>>,
}

impl PointerListenerGuard {
    fn track<E>(&mut self, event: E, handler: impl Fn(E::EventType) + 'static)
    where
        E: ev::EventDescriptor + 'static,
        E::EventType: JsCast,
    {
        let handle = window_event_listener(event, handler);
        self.removers.push(Box::new(move || handle.remove()));
    }
}

impl Drop for PointerListenerGuard {
    fn drop(&mut self) {
        for remove in self.removers.drain(..) {
            remove();
        }
    }
}

/// Attaches move, up, cancel and Escape listeners on the browser window.
pub struct DocumentPointerTracking {
    runtime: ShellRuntimeContext,
}

impl DocumentPointerTracking {
    pub fn new(runtime: ShellRuntimeContext) -> Self {
        Self { runtime }
    }
}

impl PointerTracking for DocumentPointerTracking {
    type Guard = PointerListenerGuard;

    fn attach(&self) -> PointerListenerGuard {
        let runtime = self.runtime;
        let mut guard = PointerListenerGuard {
            removers: Vec::with_capacity(4),
        };
        guard.track(ev::pointermove, move |ev| {
            pointer_moved(runtime, pointer_from_event(&ev));
        });
        guard.track(ev::pointerup, move |_| end_interaction(runtime));
        guard.track(ev::pointercancel, move |_| cancel_interaction(runtime));
        guard.track(ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                ev.prevent_default();
                cancel_interaction(runtime);
            }
        });
        guard
    }
}

pub fn pointer_from_event(ev: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Primary button for mouse, primary contact otherwise.
pub fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

pub fn begin_drag(runtime: ShellRuntimeContext, window_id: &WindowId, pointer: Point) {
    let state = runtime.state.get_untracked();
    let tracker = DocumentPointerTracking::new(runtime);
    let focus = runtime
        .interaction
        .try_update_value(|engine| engine.begin_drag(&tracker, &state, window_id, pointer))
        .flatten();
    if let Some(action) = focus {
        runtime.dispatch_action(action);
    }
}

pub fn begin_resize(
    runtime: ShellRuntimeContext,
    window_id: &WindowId,
    direction: ResizeDirection,
    pointer: Point,
) {
    let state = runtime.state.get_untracked();
    let tracker = DocumentPointerTracking::new(runtime);
    runtime.interaction.update_value(|engine| {
        engine.begin_resize(&tracker, &state, window_id, direction, pointer);
    });
}

fn pointer_moved(runtime: ShellRuntimeContext, pointer: Point) {
    let state = runtime.state.get_untracked();
    let update = runtime
        .interaction
        .try_update_value(|engine| engine.pointer_move(&state, pointer))
        .flatten();
    if let Some(action) = update {
        runtime.dispatch_action(action);
    }
}

fn end_interaction(runtime: ShellRuntimeContext) {
    runtime.interaction.update_value(|engine| engine.end());
}

fn cancel_interaction(runtime: ShellRuntimeContext) {
    let revert = runtime
        .interaction
        .try_update_value(|engine| engine.cancel())
        .flatten();
    if let Some(action) = revert {
        runtime.dispatch_action(action);
    }
}
