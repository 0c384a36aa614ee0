//! Player controls
//!
//! The simulation only knows about logical actions. Host key names are mapped
//! through [`KeyBindings`] before they reach [`InputState`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Drive forward (burns fuel)
    Accelerate,
    /// Brake / reverse (burns fuel at a lower rate)
    Brake,
}

/// Which actions are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    accelerate: bool,
    brake: bool,
}

impl InputState {
    pub fn press(&mut self, action: Action) {
        *self.slot(action) = true;
    }

    pub fn release(&mut self, action: Action) {
        *self.slot(action) = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Accelerate => self.accelerate,
            Action::Brake => self.brake,
        }
    }

    /// Release everything (restart, focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Convenience for tests and autopilots
    pub fn holding(actions: &[Action]) -> Self {
        let mut input = Self::default();
        for &action in actions {
            input.press(action);
        }
        input
    }

    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Accelerate => &mut self.accelerate,
            Action::Brake => &mut self.brake,
        }
    }
}

/// Host key name -> action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: Vec<(String, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = [
            ("ArrowRight", Action::Accelerate),
            ("d", Action::Accelerate),
            ("D", Action::Accelerate),
            ("ArrowLeft", Action::Brake),
            ("a", Action::Brake),
            ("A", Action::Brake),
        ];
        Self {
            bindings: keys
                .iter()
                .map(|&(key, action)| (key.to_string(), action))
                .collect(),
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == key)
            .map(|&(_, action)| action)
    }

    /// Apply a key-down event; returns whether the key is bound
    pub fn key_down(&self, input: &mut InputState, key: &str) -> bool {
        match self.action_for(key) {
            Some(action) => {
                input.press(action);
                true
            }
            None => false,
        }
    }

    /// Apply a key-up event; returns whether the key is bound
    pub fn key_up(&self, input: &mut InputState, key: &str) -> bool {
        match self.action_for(key) {
            Some(action) => {
                input.release(action);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::default();
        input.press(Action::Accelerate);
        assert!(input.is_held(Action::Accelerate));
        assert!(!input.is_held(Action::Brake));
        input.release(Action::Accelerate);
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        let mut input = InputState::default();

        assert!(bindings.key_down(&mut input, "ArrowRight"));
        assert!(bindings.key_down(&mut input, "a"));
        assert!(input.is_held(Action::Accelerate));
        assert!(input.is_held(Action::Brake));

        assert!(!bindings.key_down(&mut input, "Escape"));

        bindings.key_up(&mut input, "ArrowRight");
        assert!(!input.is_held(Action::Accelerate));

        input.clear();
        assert!(!input.is_held(Action::Brake));
    }
}
