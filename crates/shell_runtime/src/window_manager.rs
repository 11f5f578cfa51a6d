//! Window lifecycle, stacking and spawn placement helpers, plus the read-only projection the
//! renderer binds to.

use crate::{
    apps::{AppCatalog, WindowContent},
    model::{
        Point, ShellState, Size, WindowId, WindowRecord, INITIAL_Z_INDEX, WINDOW_SPAWN_BASE,
        WINDOW_SPAWN_JITTER,
    },
};

/// Icon shown for windows whose application record no longer exists.
pub const FALLBACK_WINDOW_ICON: &str = "📱";

/// Source of the top-left position for a window opened for the first time.
pub trait WindowPlacement {
    fn spawn_position(&mut self) -> Point;
}

#[derive(Debug, Clone)]
/// Xorshift-based jitter in `[base, base + range)` on each axis.
pub struct SpawnJitter {
    seed: u64,
}

impl SpawnJitter {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state
        Self { seed: seed.max(1) }
    }

    pub fn from_clock() -> Self {
        Self::new(shell_host::unix_time_ms_now())
    }

    fn next_unit(&mut self) -> f64 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.seed = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl WindowPlacement for SpawnJitter {
    fn spawn_position(&mut self) -> Point {
        Point {
            x: WINDOW_SPAWN_BASE + self.next_unit() * WINDOW_SPAWN_JITTER,
            y: WINDOW_SPAWN_BASE + self.next_unit() * WINDOW_SPAWN_JITTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Placement that always returns the same point.
pub struct FixedPlacement(pub Point);

impl WindowPlacement for FixedPlacement {
    fn spawn_position(&mut self) -> Point {
        self.0
    }
}

/// Hands out the current stacking counter value and advances it. When the counter is exhausted
/// every record is renumbered from [`INITIAL_Z_INDEX`] in its current stacking order first.
pub(crate) fn take_z_index(state: &mut ShellState) -> u32 {
    if state.session.next_z_index == u32::MAX {
        compact_z_indices(state);
    }
    let z_index = state.session.next_z_index;
    state.session.next_z_index += 1;
    z_index
}

fn compact_z_indices(state: &mut ShellState) {
    let mut order: Vec<usize> = (0..state.session.windows.len()).collect();
    order.sort_by_key(|&index| state.session.windows[index].z_index);
    let mut next = INITIAL_Z_INDEX;
    for index in order {
        state.session.windows[index].z_index = next;
        next += 1;
    }
    state.session.next_z_index = next;
}

/// Raises an open window above every other window. Returns `false` for missing or closed ids.
pub(crate) fn bring_to_front_internal(state: &mut ShellState, window_id: &WindowId) -> bool {
    if !state.is_window_open(window_id) {
        return false;
    }
    let z_index = take_z_index(state);
    if let Some(window) = state
        .session
        .windows
        .iter_mut()
        .find(|w| w.id == *window_id)
    {
        window.z_index = z_index;
    }
    true
}

/// Open windows in the order their records were created. Used for taskbar entries and as the
/// stable DOM order; paint order comes from `z_index`.
pub fn taskbar_windows(state: &ShellState) -> Vec<&WindowRecord> {
    state.session.windows.iter().filter(|w| w.is_open).collect()
}

/// Open windows sorted bottom to top. Ties keep creation order, so the later record paints last.
pub fn open_windows_in_paint_order(state: &ShellState) -> Vec<&WindowRecord> {
    let mut windows = taskbar_windows(state);
    windows.sort_by_key(|w| w.z_index);
    windows
}

pub fn topmost_open_window(state: &ShellState) -> Option<&WindowRecord> {
    open_windows_in_paint_order(state).into_iter().last()
}

pub fn is_topmost(state: &ShellState, window_id: &WindowId) -> bool {
    topmost_open_window(state).is_some_and(|w| w.id == *window_id)
}

#[derive(Debug, Clone, PartialEq)]
/// Everything the renderer needs to draw one window frame.
pub struct RenderedWindow {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub content: WindowContent,
    pub position: Point,
    pub size: Size,
    pub z_index: u32,
}

/// Resolves title and icon for a window from its application record.
pub fn window_chrome(catalog: &AppCatalog<'_>, window_id: &WindowId) -> (String, String) {
    match catalog.find(window_id.as_str()) {
        Some(app) => (app.name.clone(), app.icon.clone()),
        None => (window_id.to_string(), FALLBACK_WINDOW_ICON.to_string()),
    }
}

pub fn rendered_window(state: &ShellState, window_id: &WindowId) -> Option<RenderedWindow> {
    let window = state.open_window(window_id)?;
    let catalog = AppCatalog::for_state(state);
    Some(render(&catalog, window))
}

/// Open windows resolved for rendering, bottom to top.
pub fn render_plan(state: &ShellState) -> Vec<RenderedWindow> {
    let catalog = AppCatalog::for_state(state);
    open_windows_in_paint_order(state)
        .into_iter()
        .map(|window| render(&catalog, window))
        .collect()
}

fn render(catalog: &AppCatalog<'_>, window: &WindowRecord) -> RenderedWindow {
    let (title, icon) = window_chrome(catalog, &window.id);
    RenderedWindow {
        id: window.id.clone(),
        title,
        icon,
        content: catalog.window_content(window.id.as_str()),
        position: window.position,
        size: window.size,
        z_index: window.z_index,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        apps::BuiltinSurface,
        model::{AppRecord, WINDOW_SPAWN_BASE},
        reducer::{reduce_shell, ShellAction},
    };

    fn open(state: &mut ShellState, id: &str) {
        let mut placement = FixedPlacement(Point::new(120.0, 140.0));
        reduce_shell(
            state,
            ShellAction::OpenWindow {
                window_id: id.into(),
            },
            &mut placement,
        );
    }

    fn user_app(id: &str, code: &str) -> AppRecord {
        AppRecord {
            id: id.to_string(),
            name: format!("App {id}"),
            icon: "🧪".to_string(),
            code: code.to_string(),
            prompt: String::new(),
            position: Point::default(),
        }
    }

    #[test]
    fn spawn_jitter_stays_inside_the_bounded_range() {
        let mut jitter = SpawnJitter::new(42);
        for _ in 0..500 {
            let point = jitter.spawn_position();
            assert!(point.x >= WINDOW_SPAWN_BASE && point.x < WINDOW_SPAWN_BASE + 200.0);
            assert!(point.y >= WINDOW_SPAWN_BASE && point.y < WINDOW_SPAWN_BASE + 200.0);
        }
    }

    #[test]
    fn spawn_jitter_with_zero_seed_still_moves() {
        let mut jitter = SpawnJitter::new(0);
        let first = jitter.spawn_position();
        let second = jitter.spawn_position();
        assert_ne!(first, second);
    }

    #[test]
    fn paint_order_is_ascending_and_skips_closed_windows() {
        let mut state = ShellState::default();
        open(&mut state, "a");
        open(&mut state, "b");
        open(&mut state, "c");
        reduce_shell(
            &mut state,
            ShellAction::BringToFront {
                window_id: "a".into(),
            },
            &mut FixedPlacement(Point::default()),
        );
        reduce_shell(
            &mut state,
            ShellAction::CloseWindow {
                window_id: "b".into(),
            },
            &mut FixedPlacement(Point::default()),
        );

        let order: Vec<&str> = open_windows_in_paint_order(&state)
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a"]);
        assert!(is_topmost(&state, &"a".into()));

        let taskbar: Vec<&str> = taskbar_windows(&state)
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(taskbar, vec!["a", "c"]);
    }

    #[test]
    fn render_plan_resolves_chrome_and_content() {
        let mut state = ShellState::default();
        state.config.apps.push(user_app("notes", "<p>hi</p>"));
        state.config.apps.push(user_app("blank", ""));
        open(&mut state, "settings");
        open(&mut state, "notes");
        open(&mut state, "blank");
        open(&mut state, "ghost");

        let plan = render_plan(&state);
        assert_eq!(plan.len(), 4);

        assert_eq!(plan[0].title, "Settings");
        assert_eq!(
            plan[0].content,
            WindowContent::Builtin(BuiltinSurface::Settings)
        );
        assert_eq!(plan[1].title, "App notes");
        assert_eq!(plan[1].icon, "🧪");
        assert_eq!(plan[1].content, WindowContent::Html("<p>hi</p>".to_string()));
        assert_eq!(plan[2].content, WindowContent::Missing);
        assert_eq!(plan[3].title, "ghost");
        assert_eq!(plan[3].icon, FALLBACK_WINDOW_ICON);
        assert_eq!(plan[3].position, Point::new(120.0, 140.0));
        assert!(plan.windows(2).all(|pair| pair[0].z_index < pair[1].z_index));
    }

    #[test]
    fn rendered_window_is_none_for_closed_windows() {
        let mut state = ShellState::default();
        open(&mut state, "settings");
        reduce_shell(
            &mut state,
            ShellAction::CloseWindow {
                window_id: "settings".into(),
            },
            &mut FixedPlacement(Point::default()),
        );
        assert_eq!(rendered_window(&state, &"settings".into()), None);
    }

    #[test]
    fn exhausted_stacking_counter_renumbers_and_keeps_order() {
        let mut state = ShellState::default();
        open(&mut state, "a");
        open(&mut state, "b");
        open(&mut state, "c");
        for (window, z_index) in state.session.windows.iter_mut().zip([u32::MAX - 1, 7, 9]) {
            window.z_index = z_index;
        }
        state.session.next_z_index = u32::MAX;

        assert!(bring_to_front_internal(&mut state, &"b".into()));

        let order: Vec<&str> = open_windows_in_paint_order(&state)
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        let z: Vec<u32> = state.session.windows.iter().map(|w| w.z_index).collect();
        assert_eq!(z, vec![INITIAL_Z_INDEX + 2, INITIAL_Z_INDEX + 3, INITIAL_Z_INDEX + 1]);
        assert_eq!(state.session.next_z_index, INITIAL_Z_INDEX + 4);
    }
}
