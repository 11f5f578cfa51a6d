//! Pointer-driven drag and resize sessions.
//!
//! The engine turns pointer positions into [`ShellAction`] values; it never touches state
//! itself. A session lives from pointer-down to pointer-up. While one is active the engine holds
//! the guard returned by [`PointerTracking::attach`], so document-level move/up listeners exist
//! exactly as long as the session does.

use crate::{
    model::{
        Point, ShellState, WindowGeometry, WindowId, WindowUpdate, MIN_WINDOW_HEIGHT,
        MIN_WINDOW_WIDTH,
    },
    reducer::ShellAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Edge or corner hit region a resize starts from.
pub enum ResizeDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeDirection {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub fn has_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn has_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn has_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn has_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::North => "edge-n",
            Self::South => "edge-s",
            Self::East => "edge-e",
            Self::West => "edge-w",
            Self::NorthEast => "edge-ne",
            Self::NorthWest => "edge-nw",
            Self::SouthEast => "edge-se",
            Self::SouthWest => "edge-sw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionSession {
    #[default]
    Idle,
    Dragging {
        window_id: WindowId,
        /// Pointer position minus window top-left at gesture start.
        anchor_offset: Point,
        /// Window position at gesture start, restored on cancel.
        origin: Point,
    },
    Resizing {
        window_id: WindowId,
        direction: ResizeDirection,
        pointer_start: Point,
        start: WindowGeometry,
    },
}

/// Acquires document-level pointer listeners for the lifetime of one session.
///
/// The returned guard must release the listeners when dropped.
pub trait PointerTracking {
    type Guard;

    fn attach(&self) -> Self::Guard;
}

/// Drag/resize state machine. `G` is the listener guard type of the host's [`PointerTracking`].
pub struct InteractionEngine<G> {
    session: InteractionSession,
    listeners: Option<G>,
}

impl<G> Default for InteractionEngine<G> {
    fn default() -> Self {
        Self {
            session: InteractionSession::Idle,
            listeners: None,
        }
    }
}

impl<G> InteractionEngine<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.session, InteractionSession::Idle)
    }

    pub fn active_window(&self) -> Option<&WindowId> {
        match &self.session {
            InteractionSession::Idle => None,
            InteractionSession::Dragging { window_id, .. }
            | InteractionSession::Resizing { window_id, .. } => Some(window_id),
        }
    }

    /// Pointer-down on a window's title bar. Starts a drag and returns the focus action to
    /// dispatch. Ignored while another session is active or when the window is not open.
    pub fn begin_drag<T>(
        &mut self,
        tracker: &T,
        state: &ShellState,
        window_id: &WindowId,
        pointer: Point,
    ) -> Option<ShellAction>
    where
        T: PointerTracking<Guard = G>,
    {
        if self.is_active() {
            return None;
        }
        let window = state.open_window(window_id)?;
        self.enter(
            tracker,
            InteractionSession::Dragging {
                window_id: window_id.clone(),
                anchor_offset: Point::new(
                    pointer.x - window.position.x,
                    pointer.y - window.position.y,
                ),
                origin: window.position,
            },
        );
        Some(ShellAction::BringToFront {
            window_id: window_id.clone(),
        })
    }

    /// Pointer-down on one of the eight resize hit regions. Returns whether a session started.
    pub fn begin_resize<T>(
        &mut self,
        tracker: &T,
        state: &ShellState,
        window_id: &WindowId,
        direction: ResizeDirection,
        pointer: Point,
    ) -> bool
    where
        T: PointerTracking<Guard = G>,
    {
        if self.is_active() {
            return false;
        }
        let Some(window) = state.open_window(window_id) else {
            return false;
        };
        self.enter(
            tracker,
            InteractionSession::Resizing {
                window_id: window_id.clone(),
                direction,
                pointer_start: pointer,
                start: window.geometry(),
            },
        );
        true
    }

    /// Pointer-move while a session is active. Returns the single update to dispatch.
    ///
    /// If the window was closed mid-gesture the session ends and nothing is returned.
    pub fn pointer_move(&mut self, state: &ShellState, pointer: Point) -> Option<ShellAction> {
        let action = match &self.session {
            InteractionSession::Idle => return None,
            InteractionSession::Dragging {
                window_id,
                anchor_offset,
                ..
            } => {
                if !state.is_window_open(window_id) {
                    self.end();
                    return None;
                }
                ShellAction::UpdateWindow {
                    window_id: window_id.clone(),
                    updates: WindowUpdate::position(drag_position(pointer, *anchor_offset)),
                }
            }
            InteractionSession::Resizing {
                window_id,
                direction,
                pointer_start,
                start,
            } => {
                if !state.is_window_open(window_id) {
                    self.end();
                    return None;
                }
                let delta = Point::new(pointer.x - pointer_start.x, pointer.y - pointer_start.y);
                ShellAction::UpdateWindow {
                    window_id: window_id.clone(),
                    updates: WindowUpdate::geometry(resize_geometry(*start, *direction, delta)),
                }
            }
        };
        Some(action)
    }

    /// Pointer-up. The last dispatched geometry is already committed.
    pub fn end(&mut self) {
        self.session = InteractionSession::Idle;
        self.listeners = None;
    }

    /// Aborts the gesture and returns the update restoring the gesture-start geometry.
    pub fn cancel(&mut self) -> Option<ShellAction> {
        let action = match &self.session {
            InteractionSession::Idle => None,
            InteractionSession::Dragging {
                window_id, origin, ..
            } => Some(ShellAction::UpdateWindow {
                window_id: window_id.clone(),
                updates: WindowUpdate::position(*origin),
            }),
            InteractionSession::Resizing {
                window_id, start, ..
            } => Some(ShellAction::UpdateWindow {
                window_id: window_id.clone(),
                updates: WindowUpdate::geometry(*start),
            }),
        };
        self.end();
        action
    }

    fn enter<T>(&mut self, tracker: &T, session: InteractionSession)
    where
        T: PointerTracking<Guard = G>,
    {
        self.session = session;
        self.listeners = Some(tracker.attach());
    }
}

/// New top-left for a drag. Neither axis may go above or left of the viewport origin.
pub fn drag_position(pointer: Point, anchor_offset: Point) -> Point {
    Point {
        x: (pointer.x - anchor_offset.x).max(0.0),
        y: (pointer.y - anchor_offset.y).max(0.0),
    }
}

/// Geometry after moving the grabbed edge(s) by `delta` from the gesture start.
///
/// Right/bottom edges move freely down to the minimum size. Left/top edges keep the opposite
/// edge fixed; once the minimum is reached the origin stops at `start + start_size - min`.
///
/// Sizes follow the pointer's travel since the press, not its distance from the window's
/// current origin. A press a few pixels inside the edge therefore does not make the window jump
/// by that offset on the first move, and the right/bottom edges track the pointer exactly.
pub fn resize_geometry(
    start: WindowGeometry,
    direction: ResizeDirection,
    delta: Point,
) -> WindowGeometry {
    let mut next = start;

    if direction.has_right() {
        next.size.width = (start.size.width + delta.x).max(MIN_WINDOW_WIDTH);
    } else if direction.has_left() {
        let grow = -delta.x;
        next.size.width = (start.size.width + grow).max(MIN_WINDOW_WIDTH);
        next.position.x = (start.position.x - grow)
            .min(start.position.x + start.size.width - MIN_WINDOW_WIDTH);
    }

    if direction.has_bottom() {
        next.size.height = (start.size.height + delta.y).max(MIN_WINDOW_HEIGHT);
    } else if direction.has_top() {
        let grow = -delta.y;
        next.size.height = (start.size.height + grow).max(MIN_WINDOW_HEIGHT);
        next.position.y = (start.position.y - grow)
            .min(start.position.y + start.size.height - MIN_WINDOW_HEIGHT);
    }

    next
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::Size,
        reducer::reduce_shell,
        window_manager::FixedPlacement,
    };

    #[derive(Default)]
    struct CountingTracker {
        live: Rc<Cell<i32>>,
    }

    struct CountingGuard(Rc<Cell<i32>>);

    impl Drop for CountingGuard {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    impl PointerTracking for CountingTracker {
        type Guard = CountingGuard;

        fn attach(&self) -> CountingGuard {
            self.live.set(self.live.get() + 1);
            CountingGuard(self.live.clone())
        }
    }

    fn state_with_window(id: &str, geometry: WindowGeometry) -> ShellState {
        let mut state = ShellState::default();
        let mut placement = FixedPlacement(geometry.position);
        reduce_shell(
            &mut state,
            ShellAction::OpenWindow {
                window_id: id.into(),
            },
            &mut placement,
        );
        reduce_shell(
            &mut state,
            ShellAction::UpdateWindow {
                window_id: id.into(),
                updates: WindowUpdate::geometry(geometry),
            },
            &mut placement,
        );
        state
    }

    fn apply(state: &mut ShellState, action: Option<ShellAction>) {
        if let Some(action) = action {
            reduce_shell(state, action, &mut FixedPlacement(Point::default()));
        }
    }

    fn geometry(x: f64, y: f64, w: f64, h: f64) -> WindowGeometry {
        WindowGeometry {
            position: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    #[test]
    fn drag_follows_pointer_minus_anchor_and_focuses() {
        let tracker = CountingTracker::default();
        let mut state = state_with_window("w", geometry(100.0, 120.0, 600.0, 400.0));
        let mut engine = InteractionEngine::new();

        let focus = engine.begin_drag(&tracker, &state, &"w".into(), Point::new(130.0, 135.0));
        assert_eq!(
            focus,
            Some(ShellAction::BringToFront {
                window_id: "w".into()
            })
        );
        assert_eq!(tracker.live.get(), 1);

        let update = engine.pointer_move(&state, Point::new(230.0, 185.0));
        apply(&mut state, update);
        assert_eq!(
            state.window(&"w".into()).map(|w| w.position),
            Some(Point::new(200.0, 170.0))
        );

        engine.end();
        assert!(!engine.is_active());
        assert_eq!(tracker.live.get(), 0);
        assert_eq!(engine.pointer_move(&state, Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn drag_clamps_each_axis_at_the_origin() {
        assert_eq!(
            drag_position(Point::new(5.0, 300.0), Point::new(40.0, 10.0)),
            Point::new(0.0, 290.0)
        );
        assert_eq!(
            drag_position(Point::new(500.0, 2.0), Point::new(40.0, 10.0)),
            Point::new(460.0, 0.0)
        );
    }

    #[test]
    fn second_pointer_down_does_not_replace_the_active_session() {
        let tracker = CountingTracker::default();
        let mut state = state_with_window("a", geometry(0.0, 0.0, 300.0, 300.0));
        apply(
            &mut state,
            Some(ShellAction::OpenWindow {
                window_id: "b".into(),
            }),
        );
        let mut engine = InteractionEngine::new();

        assert!(engine
            .begin_drag(&tracker, &state, &"a".into(), Point::new(10.0, 10.0))
            .is_some());
        assert!(engine
            .begin_drag(&tracker, &state, &"b".into(), Point::new(10.0, 10.0))
            .is_none());
        assert!(!engine.begin_resize(
            &tracker,
            &state,
            &"b".into(),
            ResizeDirection::East,
            Point::new(0.0, 0.0)
        ));
        assert_eq!(engine.active_window(), Some(&"a".into()));
        assert_eq!(tracker.live.get(), 1);
    }

    #[test]
    fn sessions_do_not_start_on_closed_or_missing_windows() {
        let tracker = CountingTracker::default();
        let mut state = state_with_window("a", geometry(0.0, 0.0, 300.0, 300.0));
        apply(
            &mut state,
            Some(ShellAction::CloseWindow {
                window_id: "a".into(),
            }),
        );
        let mut engine = InteractionEngine::new();

        assert!(engine
            .begin_drag(&tracker, &state, &"a".into(), Point::new(1.0, 1.0))
            .is_none());
        assert!(!engine.begin_resize(
            &tracker,
            &state,
            &"ghost".into(),
            ResizeDirection::South,
            Point::new(1.0, 1.0)
        ));
        assert_eq!(tracker.live.get(), 0);
    }

    #[test]
    fn closing_mid_drag_ends_the_session_quietly() {
        let tracker = CountingTracker::default();
        let mut state = state_with_window("a", geometry(50.0, 50.0, 300.0, 300.0));
        let mut engine = InteractionEngine::new();
        engine.begin_drag(&tracker, &state, &"a".into(), Point::new(60.0, 60.0));

        apply(
            &mut state,
            Some(ShellAction::CloseWindow {
                window_id: "a".into(),
            }),
        );
        assert_eq!(engine.pointer_move(&state, Point::new(90.0, 90.0)), None);
        assert!(!engine.is_active());
        assert_eq!(tracker.live.get(), 0);
    }

    #[test]
    fn right_and_bottom_edges_follow_the_pointer_down_to_the_floor() {
        let start = geometry(100.0, 100.0, 600.0, 400.0);

        let grown = resize_geometry(start, ResizeDirection::SouthEast, Point::new(50.0, 25.0));
        assert_eq!(grown, geometry(100.0, 100.0, 650.0, 425.0));

        let floored =
            resize_geometry(start, ResizeDirection::SouthEast, Point::new(-900.0, -900.0));
        assert_eq!(floored, geometry(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn press_inside_the_edge_does_not_jump_on_the_first_move() {
        let tracker = CountingTracker::default();
        let mut state = state_with_window("w", geometry(100.0, 100.0, 600.0, 400.0));
        let mut engine = InteractionEngine::new();
        // Right edge sits at x = 700; press 4px inside it.
        assert!(engine.begin_resize(
            &tracker,
            &state,
            &"w".into(),
            ResizeDirection::East,
            Point::new(696.0, 300.0),
        ));

        let update = engine.pointer_move(&state, Point::new(697.0, 300.0));
        apply(&mut state, update);
        assert_eq!(
            state.window(&"w".into()).map(|w| w.size),
            Some(Size::new(601.0, 400.0))
        );
        engine.end();
    }

    #[test]
    fn left_edge_holds_the_right_edge_fixed() {
        let start = geometry(300.0, 100.0, 400.0, 400.0);

        let wider = resize_geometry(start, ResizeDirection::West, Point::new(-100.0, 37.0));
        assert_eq!(wider, geometry(200.0, 100.0, 500.0, 400.0));

        let floored = resize_geometry(start, ResizeDirection::West, Point::new(300.0, 0.0));
        assert_eq!(floored, geometry(500.0, 100.0, 200.0, 400.0));
        assert_eq!(floored.position.x + floored.size.width, 700.0);
    }

    #[test]
    fn top_left_corner_grows_up_and_left_then_stops_at_the_floor() {
        let tracker = CountingTracker::default();
        let mut state = state_with_window("w", geometry(300.0, 300.0, 600.0, 400.0));
        let mut engine = InteractionEngine::new();
        assert!(engine.begin_resize(
            &tracker,
            &state,
            &"w".into(),
            ResizeDirection::NorthWest,
            Point::new(302.0, 303.0),
        ));

        let update = engine.pointer_move(&state, Point::new(252.0, 273.0));
        apply(&mut state, update);
        let record = state.window(&"w".into()).expect("window");
        assert_eq!(record.geometry(), geometry(250.0, 270.0, 650.0, 430.0));

        let update = engine.pointer_move(&state, Point::new(1302.0, 1303.0));
        apply(&mut state, update);
        let record = state.window(&"w".into()).expect("window");
        assert_eq!(record.geometry(), geometry(700.0, 500.0, 200.0, 200.0));

        let update = engine.pointer_move(&state, Point::new(2302.0, 2303.0));
        apply(&mut state, update);
        let record = state.window(&"w".into()).expect("window");
        assert_eq!(record.geometry(), geometry(700.0, 500.0, 200.0, 200.0));
    }

    #[test]
    fn every_intermediate_resize_respects_the_minimum_size() {
        let tracker = CountingTracker::default();
        for direction in ResizeDirection::ALL {
            let mut state = state_with_window("w", geometry(400.0, 400.0, 300.0, 260.0));
            let mut engine = InteractionEngine::new();
            let pointer_start = Point::new(400.0, 400.0);
            assert!(engine.begin_resize(&tracker, &state, &"w".into(), direction, pointer_start));

            let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
            for _ in 0..200 {
                seed = seed
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let dx = ((seed >> 33) % 1600) as f64 - 800.0;
                let dy = ((seed >> 17) % 1600) as f64 - 800.0;
                let pointer = Point::new(pointer_start.x + dx, pointer_start.y + dy);
                let update = engine.pointer_move(&state, pointer);
                assert!(update.is_some());
                apply(&mut state, update);

                let record = state.window(&"w".into()).expect("window");
                assert!(record.size.width >= MIN_WINDOW_WIDTH, "{direction:?} width");
                assert!(record.size.height >= MIN_WINDOW_HEIGHT, "{direction:?} height");
            }
            engine.end();
        }
        assert_eq!(tracker.live.get(), 0);
    }

    #[test]
    fn single_axis_directions_leave_the_other_axis_alone() {
        let start = geometry(100.0, 100.0, 400.0, 300.0);
        let north = resize_geometry(start, ResizeDirection::North, Point::new(75.0, -50.0));
        assert_eq!(north, geometry(100.0, 50.0, 400.0, 350.0));

        let east = resize_geometry(start, ResizeDirection::East, Point::new(75.0, -50.0));
        assert_eq!(east, geometry(100.0, 100.0, 475.0, 300.0));
    }

    #[test]
    fn cancel_restores_the_gesture_start_geometry() {
        let tracker = CountingTracker::default();
        let start = geometry(100.0, 100.0, 500.0, 300.0);
        let mut state = state_with_window("w", start);
        let mut engine = InteractionEngine::new();

        engine.begin_resize(
            &tracker,
            &state,
            &"w".into(),
            ResizeDirection::SouthWest,
            Point::new(100.0, 400.0),
        );
        let update = engine.pointer_move(&state, Point::new(40.0, 480.0));
        apply(&mut state, update);
        assert_ne!(state.window(&"w".into()).map(|w| w.geometry()), Some(start));

        let revert = engine.cancel();
        apply(&mut state, revert);
        assert_eq!(state.window(&"w".into()).map(|w| w.geometry()), Some(start));
        assert_eq!(tracker.live.get(), 0);

        engine.begin_drag(&tracker, &state, &"w".into(), Point::new(150.0, 110.0));
        let update = engine.pointer_move(&state, Point::new(450.0, 310.0));
        apply(&mut state, update);
        let revert = engine.cancel();
        apply(&mut state, revert);
        assert_eq!(
            state.window(&"w".into()).map(|w| w.position),
            Some(start.position)
        );
        assert_eq!(engine.cancel(), None);
    }
}
