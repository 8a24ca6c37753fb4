use std::collections::BTreeSet;

/// Key name the fire action is bound to: a single space, as delivered by
/// browser-style key identifiers.
pub const FIRE_KEY: &str = " ";

/// The set of currently-held keys, by lowercase key name.
///
/// Membership only: no ordering, no repeat counts. `press` and `release` are
/// the only mutations, so a key-event callback can never leave the state
/// half-updated across a tick boundary.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Names are normalized to lowercase on entry.
    pub fn press(&mut self, key: &str) {
        tracing::trace!(key, "press");
        self.held.insert(key.to_lowercase());
    }

    /// Record a key release. Returns whether the key was actually held.
    pub fn release(&mut self, key: &str) -> bool {
        tracing::trace!(key, "release");
        self.held.remove(&key.to_lowercase())
    }

    /// Whether a key is held. Callers pass lowercase names.
    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    // Semantic accessors. Each action has a letter binding and an arrow
    // binding; either one counts as held.

    pub fn turn_left(&self) -> bool {
        self.is_held("a") || self.is_held("arrowleft")
    }

    pub fn turn_right(&self) -> bool {
        self.is_held("d") || self.is_held("arrowright")
    }

    pub fn forward(&self) -> bool {
        self.is_held("w") || self.is_held("arrowup")
    }

    pub fn backward(&self) -> bool {
        self.is_held("s") || self.is_held("arrowdown")
    }

    pub fn modifier(&self) -> bool {
        self.is_held("shift")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_membership() {
        let mut input = InputState::new();
        input.press("w");
        assert!(input.is_held("w"));
        assert!(input.release("w"));
        assert!(!input.is_held("w"));
    }

    #[test]
    fn release_of_unheld_key_is_false() {
        let mut input = InputState::new();
        assert!(!input.release("w"));
    }

    #[test]
    fn names_are_lowercased() {
        let mut input = InputState::new();
        input.press("Shift");
        assert!(input.modifier());
        assert!(input.release("SHIFT"));
        assert!(!input.modifier());
    }

    #[test]
    fn either_binding_counts() {
        let mut input = InputState::new();
        input.press("arrowleft");
        assert!(input.turn_left());
        input.release("arrowleft");
        input.press("a");
        assert!(input.turn_left());
    }

    #[test]
    fn bindings_are_independent() {
        let mut input = InputState::new();
        input.press("w");
        input.press("d");
        assert!(input.forward());
        assert!(input.turn_right());
        assert!(!input.turn_left());
        assert!(!input.backward());
    }

    #[test]
    fn fire_key_is_a_single_space() {
        let mut input = InputState::new();
        input.press(FIRE_KEY);
        assert!(input.is_held(" "));
        assert!(input.release(FIRE_KEY));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut input = InputState::new();
        input.press("w");
        input.press("a");
        input.clear();
        assert_eq!(input.held_count(), 0);
    }
}
