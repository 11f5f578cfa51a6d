//! Dispatch entry point owning the canonical [`ShellState`].
//!
//! Each dispatch reduces a private copy and then swaps in a new [`Rc`], so readers holding a
//! snapshot never observe a partially applied action.

use std::rc::Rc;

use crate::{
    model::{PersistableShellConfig, ShellState},
    persistence::{export_config_json, import_config_json, PersistenceError},
    reducer::{reduce_shell, RuntimeEffect, ShellAction},
    window_manager::{SpawnJitter, WindowPlacement},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`ShellStore::subscribe`].
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&Rc<ShellState>)>;

pub struct ShellStore {
    state: Rc<ShellState>,
    placement: Box<dyn WindowPlacement>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for ShellStore {
    fn default() -> Self {
        Self::new(ShellState::default())
    }
}

impl ShellStore {
    /// Store with clock-seeded spawn jitter.
    pub fn new(state: ShellState) -> Self {
        Self::with_placement(state, Box::new(SpawnJitter::from_clock()))
    }

    pub fn with_placement(state: ShellState, placement: Box<dyn WindowPlacement>) -> Self {
        Self {
            state: Rc::new(state),
            placement,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn from_config(config: PersistableShellConfig) -> Self {
        Self::new(ShellState::from_config(config))
    }

    /// Current snapshot. Cheap to clone and never mutated afterwards.
    pub fn state(&self) -> Rc<ShellState> {
        Rc::clone(&self.state)
    }

    /// Applies `action`, notifies subscribers when the state changed, and returns the effects
    /// the host should run.
    pub fn dispatch(&mut self, action: ShellAction) -> Vec<RuntimeEffect> {
        let mut next = ShellState::clone(&self.state);
        let effects = reduce_shell(&mut next, action, self.placement.as_mut());
        if next != *self.state {
            self.state = Rc::new(next);
            for (_, subscriber) in &self.subscribers {
                subscriber(&self.state);
            }
        }
        effects
    }

    /// Replaces the configuration with an imported document.
    ///
    /// A document that fails to parse is logged and returned as an error; the current state is
    /// kept and no effects are produced.
    pub fn import_config(&mut self, raw: &str) -> Result<Vec<RuntimeEffect>, PersistenceError> {
        let config = import_config_json(raw)?;
        Ok(self.dispatch(ShellAction::LoadConfig { config }))
    }

    pub fn export_config(&self) -> Result<String, PersistenceError> {
        export_config_json(&self.state)
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&Rc<ShellState>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{Language, Point, TimeFormat},
        window_manager::FixedPlacement,
    };

    fn store() -> ShellStore {
        ShellStore::with_placement(
            ShellState::default(),
            Box::new(FixedPlacement(Point::new(150.0, 150.0))),
        )
    }

    #[test]
    fn dispatch_replaces_the_snapshot_and_keeps_old_ones_intact() {
        let mut store = store();
        let before = store.state();

        store.dispatch(ShellAction::OpenWindow {
            window_id: "settings".into(),
        });
        let after = store.state();

        assert!(before.session.windows.is_empty());
        assert_eq!(after.session.windows.len(), 1);
        assert_eq!(after.session.windows[0].position, Point::new(150.0, 150.0));
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn subscribers_see_changes_only() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |state| {
            sink.borrow_mut().push(state.session.windows.len());
        });

        store.dispatch(ShellAction::OpenWindow {
            window_id: "a".into(),
        });
        store.dispatch(ShellAction::CloseWindow {
            window_id: "missing".into(),
        });
        store.dispatch(ShellAction::OpenWindow {
            window_id: "b".into(),
        });
        assert_eq!(*seen.borrow(), vec![1, 2]);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(ShellAction::OpenWindow {
            window_id: "c".into(),
        });
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn dispatch_returns_reducer_effects() {
        let mut store = store();
        let effects = store.dispatch(ShellAction::SetLanguage {
            language: Language::Tr,
        });
        assert_eq!(effects, vec![RuntimeEffect::PersistConfig]);
        assert_eq!(store.state().config.language, Language::Tr);

        let effects = store.dispatch(ShellAction::BringToFront {
            window_id: "nobody".into(),
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn export_then_import_restores_the_configuration() {
        let mut store = store();
        store.dispatch(ShellAction::SetLanguage {
            language: Language::Tr,
        });
        store.dispatch(ShellAction::SetTimeFormat {
            time_format: TimeFormat::TwelveHour,
        });
        let exported = store.export_config().expect("export");

        let mut fresh = self::store();
        let effects = fresh.import_config(&exported).expect("import");
        assert_eq!(effects, vec![RuntimeEffect::PersistConfig]);
        assert_eq!(fresh.state().config, store.state().config);
    }

    #[test]
    fn rejected_import_keeps_state_and_notifies_nobody() {
        let mut store = store();
        store.dispatch(ShellAction::SetLanguage {
            language: Language::Tr,
        });
        let before = store.state();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        let result = store.import_config("{\"language\": ");
        assert!(matches!(result, Err(PersistenceError::ImportParseFailure(_))));
        assert!(Rc::ptr_eq(&before, &store.state()));
        assert_eq!(*calls.borrow(), 0);
    }
}
