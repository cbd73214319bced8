//! Keyboard input handling for the game.
//!
//! This module defines the [`GameKey`] enum for abstracting game actions from physical keys,
//! [`UiAction`] for on-screen buttons, and [`KeyState`] for turning held movement keys into
//! a [`MoveIntent`]. It also includes the mapping from winit key events to game keys.

use super::player::MoveIntent;
use std::collections::HashSet;
use winit::keyboard;

/// Enum representing all in-game actions that can be triggered by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Move player forward (W or Up Arrow).
    MoveForward,
    /// Move player backward (S or Down Arrow).
    MoveBackward,
    /// Move player left (A or Left Arrow).
    MoveLeft,
    /// Move player right (D or Right Arrow).
    MoveRight,
    /// Pause, resume, back to menu or quit depending on the screen.
    Escape,
}

impl GameKey {
    pub fn is_movement(&self) -> bool {
        !matches!(self, GameKey::Escape)
    }
}

/// Buttons on the menu, pause and game-over screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// "Start Game" on the main menu.
    Start,
    /// "Exit" on the main menu.
    Exit,
    /// "Restart" on the game-over screen.
    Restart,
    /// "Main Menu" on the game-over and pause screens.
    MainMenu,
    /// "Resume Game" on the pause screen.
    Resume,
}

/// Tracks the set of currently pressed game keys.
#[derive(Debug, Default)]
pub struct KeyState {
    /// Set of currently pressed keys.
    pub pressed_keys: HashSet<GameKey>,
}

impl KeyState {
    /// Creates a new, empty [`KeyState`]
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    /// Marks a key as pressed.
    pub fn press_key(&mut self, key: GameKey) {
        self.pressed_keys.insert(key);
    }

    /// Marks a key as released.
    pub fn release_key(&mut self, key: GameKey) {
        self.pressed_keys.remove(&key);
    }

    /// Checks if a key is currently pressed.
    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }

    /// Movement intent for the held keys. Opposite keys cancel out.
    pub fn intent(&self) -> MoveIntent {
        let axis = |positive: GameKey, negative: GameKey| {
            self.is_pressed(positive) as i8 as f32 - self.is_pressed(negative) as i8 as f32
        };
        MoveIntent {
            forward: axis(GameKey::MoveForward, GameKey::MoveBackward),
            strafe: axis(GameKey::MoveRight, GameKey::MoveLeft),
        }
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it matches a mapped action.
///
/// Supports both named keys (arrows, escape) and character keys (WASD).
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => GameKey::MoveForward,
            ArrowDown => GameKey::MoveBackward,
            ArrowLeft => GameKey::MoveLeft,
            ArrowRight => GameKey::MoveRight,
            Escape => GameKey::Escape,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => GameKey::MoveForward,
            "s" => GameKey::MoveBackward,
            "a" => GameKey::MoveLeft,
            "d" => GameKey::MoveRight,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey};

    #[test]
    fn test_winit_mapping() {
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::Escape)),
            Some(GameKey::Escape)
        );
        assert_eq!(
            winit_key_to_game_key(&Key::Character("W".into())),
            Some(GameKey::MoveForward)
        );
        assert_eq!(winit_key_to_game_key(&Key::Character("q".into())), None);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = KeyState::new();
        keys.press_key(GameKey::MoveForward);
        keys.press_key(GameKey::MoveLeft);
        assert_eq!(
            keys.intent(),
            MoveIntent {
                forward: 1.0,
                strafe: -1.0
            }
        );

        keys.press_key(GameKey::MoveBackward);
        keys.release_key(GameKey::MoveLeft);
        assert!(keys.intent().is_idle());
    }
}
