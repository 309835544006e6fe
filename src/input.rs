//! Keyboard input
//!
//! Thin capability over macroquad's key state: held keys drive the
//! movement axes, fresh presses drive the diagonal tie-break, and a
//! released-anything check restarts the game. WASD and the arrow keys are
//! interchangeable.

use macroquad::input::{
    is_key_down, is_key_pressed, is_key_released, is_mouse_button_released, KeyCode, MouseButton,
};

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::A, KeyCode::Left];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::D, KeyCode::Right];
const UP_KEYS: [KeyCode; 2] = [KeyCode::W, KeyCode::Up];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::S, KeyCode::Down];

/// Keys watched by `any_released`. Browsers and window managers eat some
/// combinations, so this sticks to keys the game itself uses.
const WATCHED_KEYS: [KeyCode; 11] = [
    KeyCode::A,
    KeyCode::Left,
    KeyCode::D,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::Up,
    KeyCode::S,
    KeyCode::Down,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Escape,
];

#[derive(Default)]
pub struct Input;

impl Input {
    pub fn new() -> Self {
        Self
    }

    /// -1 while a left key is held, +1 for right, 0 for neither or both.
    pub fn horizontal_axis(&self) -> i32 {
        axis(&LEFT_KEYS, &RIGHT_KEYS)
    }

    pub fn vertical_axis(&self) -> i32 {
        axis(&UP_KEYS, &DOWN_KEYS)
    }

    /// True only on the frame a horizontal key went down.
    pub fn horizontal_pressed(&self) -> bool {
        any_pressed(&LEFT_KEYS) || any_pressed(&RIGHT_KEYS)
    }

    pub fn vertical_pressed(&self) -> bool {
        any_pressed(&UP_KEYS) || any_pressed(&DOWN_KEYS)
    }

    /// True on the frame any watched key or mouse button came back up.
    pub fn any_released(&self) -> bool {
        WATCHED_KEYS.iter().any(|&key| is_key_released(key))
            || [MouseButton::Left, MouseButton::Right, MouseButton::Middle]
                .iter()
                .any(|&button| is_mouse_button_released(button))
    }
}

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|&key| is_key_down(key))
}

fn any_pressed(keys: &[KeyCode]) -> bool {
    keys.iter().any(|&key| is_key_pressed(key))
}

fn axis(negative: &[KeyCode], positive: &[KeyCode]) -> i32 {
    let mut delta = 0;
    if any_down(negative) {
        delta -= 1;
    }
    if any_down(positive) {
        delta += 1;
    }
    delta
}
