use serde::{Deserialize, Serialize};

/// Keys the viewer cares about. Backends map their own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    X,
    Escape,
    F1,
    Other,
}

impl Key {
    /// Parse a key name as used in replay scripts (case-insensitive).
    pub fn from_name(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "x" => Some(Key::X),
            "escape" | "esc" => Some(Key::Escape),
            "f1" => Some(Key::F1),
            _ => None,
        }
    }
}

/// A one-shot command triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Close the window and exit.
    Quit,
    /// Switch between filled and line rasterization.
    ToggleWireframe,
    /// Show or hide the stats overlay.
    ToggleOverlay,
}

impl Action {
    pub fn for_key(key: Key) -> Option<Action> {
        match key {
            Key::Escape => Some(Action::Quit),
            Key::X => Some(Action::ToggleWireframe),
            Key::F1 => Some(Action::ToggleOverlay),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_bindings() {
        assert_eq!(Action::for_key(Key::Escape), Some(Action::Quit));
        assert_eq!(Action::for_key(Key::X), Some(Action::ToggleWireframe));
        assert_eq!(Action::for_key(Key::F1), Some(Action::ToggleOverlay));
        assert_eq!(Action::for_key(Key::W), None);
        assert_eq!(Action::for_key(Key::Other), None);
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("esc"), Some(Key::Escape));
        assert_eq!(Key::from_name("F1"), Some(Key::F1));
        assert_eq!(Key::from_name("space"), None);
    }
}
