//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};
use tower_app::app_loop::FrameInput;
use tower_core::InputSnapshot;

const MENU_KEYS: [KeyCode; 6] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::R,
    KeyCode::M,
];

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = MENU_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect();

    let gameplay = InputSnapshot {
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
        up: is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::Down),
        attack_pressed: is_key_pressed(KeyCode::Space),
        pause_pressed: is_key_pressed(KeyCode::Escape),
    };

    FrameInput { keys_pressed, gameplay }
}
