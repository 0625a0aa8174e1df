use crate::action::{Action, Key};
use spinview_camera::MovementKeys;

/// Held movement keys, fed by key transitions from the windowing backend.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    movement: MovementKeys,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns the action bound to `key` on press.
    ///
    /// Backends that report key repeat should filter repeats out before
    /// calling this, otherwise a held X flickers the wireframe.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> Option<Action> {
        match key {
            Key::W => self.movement.forward = pressed,
            Key::S => self.movement.backward = pressed,
            Key::A => self.movement.left = pressed,
            Key::D => self.movement.right = pressed,
            _ => {}
        }

        if !pressed {
            return None;
        }
        let action = Action::for_key(key);
        if let Some(action) = action {
            tracing::debug!(?key, ?action, "key action");
        }
        action
    }

    /// Movement keys held right now.
    pub fn movement(&self) -> MovementKeys {
        self.movement
    }

    /// Drop every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.movement = MovementKeys::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_are_level_triggered() {
        let mut input = InputState::new();
        input.handle_key(Key::W, true);
        input.handle_key(Key::D, true);
        let keys = input.movement();
        assert!(keys.forward && keys.right);
        assert!(!keys.backward && !keys.left);

        input.handle_key(Key::W, false);
        assert!(!input.movement().forward);
        assert!(input.movement().right);
    }

    #[test]
    fn actions_fire_on_press_only() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(Key::X, true), Some(Action::ToggleWireframe));
        assert_eq!(input.handle_key(Key::X, false), None);
        assert_eq!(input.handle_key(Key::Escape, true), Some(Action::Quit));
        assert_eq!(input.handle_key(Key::A, true), None);
    }

    #[test]
    fn release_all_clears_movement() {
        let mut input = InputState::new();
        input.handle_key(Key::S, true);
        input.handle_key(Key::A, true);
        input.release_all();
        assert!(!input.movement().any());
    }
}
