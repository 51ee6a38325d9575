use std::collections::BTreeSet;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::taxonomy::Taxonomy,
    persistence::store::{
        self,
        StateStore,
        NAV_ACTIVE_KEY,
        NAV_EXPANDED_KEY,
        NAV_OPEN_KEY,
    },
};

pub const DESKTOP_MIN_WIDTH: f32 = 801.0;

pub fn is_desktop(viewport_width: f32) -> bool {
    viewport_width >= DESKTOP_MIN_WIDTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub section: String,
    pub topic: String,
}

impl Selection {
    pub fn new(section: impl Into<String>, topic: impl Into<String>) -> Self {
        Self { section: section.into(), topic: topic.into() }
    }
}

/// Panel open/close requests raised while drawing a frame. They are resolved
/// once, after every widget has run, so no handler can race another:
/// activating a topic always wins over the outside-click close.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenRequests {
    pub toggle: bool,
    pub activation: bool,
    pub dismiss: bool,
}

#[derive(Debug)]
pub struct NavState {
    pub open: bool,
    explicit_preference: bool,
    pub expanded: BTreeSet<usize>,
    pub active: Option<Selection>,
    pub pending_scroll: bool,
}

impl NavState {
    /// Restores navigation state from the store. A persisted selection that
    /// no longer exists in the taxonomy is dropped; a missing open flag is
    /// derived from the viewport width until the user expresses a preference.
    pub fn load(store: &dyn StateStore, taxonomy: &Taxonomy, viewport_width: f32) -> Self {
        let persisted_open = store::get_json::<bool>(store, NAV_OPEN_KEY);
        let explicit_preference = persisted_open.is_some();
        let open = persisted_open.unwrap_or_else(|| is_desktop(viewport_width));

        let expanded =
            store::get_json::<BTreeSet<usize>>(store, NAV_EXPANDED_KEY).unwrap_or_default();

        let active = store::get_json::<Selection>(store, NAV_ACTIVE_KEY)
            .filter(|s| taxonomy.contains(&s.section, &s.topic));
        let pending_scroll = active.is_some();

        Self { open, explicit_preference, expanded, active, pending_scroll }
    }

    pub fn has_explicit_preference(&self) -> bool {
        self.explicit_preference
    }

    pub fn is_active(&self, section: &str, topic: &str) -> bool {
        self.active.as_ref().is_some_and(|s| s.section == section && s.topic == topic)
    }

    /// Makes `selection` the single active topic, expands its section and
    /// persists both facts.
    pub fn activate(&mut self, selection: Selection, taxonomy: &Taxonomy, store: &dyn StateStore) {
        if let Some(index) = taxonomy.section_index(&selection.section) {
            self.expanded.insert(index);
            store::set_json(store, NAV_EXPANDED_KEY, &self.expanded);
        }

        store::set_json(store, NAV_ACTIVE_KEY, &selection);
        self.active = Some(selection);
        self.pending_scroll = true;
    }

    pub fn toggle_expanded(&mut self, index: usize, store: &dyn StateStore) {
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
        store::set_json(store, NAV_EXPANDED_KEY, &self.expanded);
    }

    /// Applies the frame's open/close requests as one write. Precedence:
    /// activation forces open, else the menu toggle flips, else an outside
    /// click closes. Each outcome counts as an explicit user preference.
    pub fn resolve(&mut self, requests: OpenRequests, store: &dyn StateStore) {
        let target = if requests.activation {
            Some(true)
        } else if requests.toggle {
            Some(!self.open)
        } else if requests.dismiss {
            Some(false)
        } else {
            None
        };

        if let Some(open) = target {
            if open && requests.toggle {
                self.pending_scroll = true;
            }
            self.set_open(open, store);
        }
    }

    /// Width changes only re-derive the open state while the user has never
    /// opened or closed the panel themselves.
    pub fn on_viewport_change(&mut self, viewport_width: f32) {
        if !self.explicit_preference {
            self.open = is_desktop(viewport_width);
        }
    }

    fn set_open(&mut self, open: bool, store: &dyn StateStore) {
        self.open = open;
        self.explicit_preference = true;
        store::set_json(store, NAV_OPEN_KEY, &open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;

    const WIDE: f32 = 1200.0;
    const NARROW: f32 = 600.0;

    fn taxonomy() -> Taxonomy {
        Taxonomy::built_in()
    }

    #[test]
    fn test_initial_open_derivation() {
        let store = MemoryStore::new();

        let nav = NavState::load(&store, &taxonomy(), WIDE);
        assert!(nav.open);
        assert!(!nav.has_explicit_preference());

        let nav = NavState::load(&store, &taxonomy(), NARROW);
        assert!(!nav.open);

        // A persisted preference wins regardless of viewport.
        store.set(NAV_OPEN_KEY, "true");
        let nav = NavState::load(&store, &taxonomy(), NARROW);
        assert!(nav.open);
        assert!(nav.has_explicit_preference());
    }

    #[test]
    fn test_corrupt_state_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(NAV_OPEN_KEY, "maybe");
        store.set(NAV_EXPANDED_KEY, "{oops");
        store.set(NAV_ACTIVE_KEY, "[1,2,3]");

        let nav = NavState::load(&store, &taxonomy(), WIDE);
        assert!(nav.open);
        assert!(!nav.has_explicit_preference());
        assert!(nav.expanded.is_empty());
        assert!(nav.active.is_none());
    }

    #[test]
    fn test_activation_persists_and_survives_reload() {
        let store = MemoryStore::new();
        let taxonomy = taxonomy();
        let mut nav = NavState::load(&store, &taxonomy, WIDE);

        nav.activate(Selection::new("section3", "interrogatives"), &taxonomy, &store);
        assert!(nav.is_active("section3", "interrogatives"));
        assert!(nav.expanded.contains(&2));

        nav.activate(Selection::new("section1", "numbers"), &taxonomy, &store);
        assert!(nav.is_active("section1", "numbers"));
        assert!(!nav.is_active("section3", "interrogatives"));

        let reloaded = NavState::load(&store, &taxonomy, WIDE);
        assert_eq!(reloaded.active, Some(Selection::new("section1", "numbers")));
        assert!(reloaded.expanded.contains(&0));
        assert!(reloaded.expanded.contains(&2));
        assert!(reloaded.pending_scroll);
    }

    #[test]
    fn test_restore_ignores_vanished_selection() {
        let store = MemoryStore::new();
        store.set(NAV_ACTIVE_KEY, r#"{"section":"section1","topic":"gone"}"#);

        let nav = NavState::load(&store, &taxonomy(), WIDE);
        assert!(nav.active.is_none());
        assert!(!nav.pending_scroll);
    }

    #[test]
    fn test_expand_toggle_round_trip() {
        let store = MemoryStore::new();
        let taxonomy = taxonomy();
        let mut nav = NavState::load(&store, &taxonomy, WIDE);

        nav.toggle_expanded(4, &store);
        nav.toggle_expanded(1, &store);
        assert_eq!(store.get(NAV_EXPANDED_KEY), Some("[1,4]".to_string()));

        nav.toggle_expanded(4, &store);
        let reloaded = NavState::load(&store, &taxonomy, WIDE);
        assert!(reloaded.expanded.contains(&1));
        assert!(!reloaded.expanded.contains(&4));
    }

    #[test]
    fn test_resolution_precedence() {
        let store = MemoryStore::new();
        let mut nav = NavState::load(&store, &taxonomy(), NARROW);
        assert!(!nav.open);

        // Activation wins over a same-frame outside click.
        nav.resolve(OpenRequests { activation: true, dismiss: true, ..Default::default() }, &store);
        assert!(nav.open);
        assert_eq!(store.get(NAV_OPEN_KEY), Some("true".to_string()));

        nav.resolve(OpenRequests { dismiss: true, ..Default::default() }, &store);
        assert!(!nav.open);
        assert_eq!(store.get(NAV_OPEN_KEY), Some("false".to_string()));

        nav.resolve(OpenRequests { toggle: true, ..Default::default() }, &store);
        assert!(nav.open);

        // No requests, no change.
        let before = nav.open;
        nav.resolve(OpenRequests::default(), &store);
        assert_eq!(nav.open, before);
    }

    #[test]
    fn test_viewport_rederives_only_without_preference() {
        let store = MemoryStore::new();
        let mut nav = NavState::load(&store, &taxonomy(), WIDE);
        assert!(nav.open);

        nav.on_viewport_change(NARROW);
        assert!(!nav.open);
        nav.on_viewport_change(WIDE);
        assert!(nav.open);

        nav.resolve(OpenRequests { toggle: true, ..Default::default() }, &store);
        assert!(!nav.open);

        // The explicit choice now sticks across width changes.
        nav.on_viewport_change(WIDE);
        assert!(!nav.open);
    }
}
