//! Input snapshot and key edge tracking
//!
//! The platform layer fills an `InputSnapshot` of raw held/not-held bits once
//! per frame. Edges (pressed / released) are derived here by `KeyState`, not by
//! the platform.
//!
//! ```text
//!          /‾‾‾‾‾‾‾‾\
//!    _____/          \_____
//!    Up  Pressed Down Released Up
//! ```

use std::collections::VecDeque;

/// Edge-aware state of one key, advanced once per poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Up,
    Pressed,
    Down,
    Released,
}

impl KeyState {
    /// Next state given whether the key is physically down this frame
    pub fn advance(self, is_down: bool) -> Self {
        match (self, is_down) {
            (KeyState::Up | KeyState::Released, true) => KeyState::Pressed,
            (KeyState::Pressed | KeyState::Down, true) => KeyState::Down,
            (KeyState::Pressed | KeyState::Down, false) => KeyState::Released,
            (KeyState::Up | KeyState::Released, false) => KeyState::Up,
        }
    }

    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, KeyState::Pressed | KeyState::Down)
    }

    /// True only on the first frame of a press
    #[inline]
    pub fn just_pressed(self) -> bool {
        self == KeyState::Pressed
    }
}

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Space,
    Escape,
    Q,
    Other,
}

/// Raw per-frame input, polled once at the top of each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Read but not used by the simulation yet
    pub reverse: bool,
    /// Fire in play, confirm on menus
    pub fire: bool,
    pub cancel: bool,
    pub quit: bool,
    /// Window size in pixels
    pub window: (u32, u32),
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            thrust: false,
            turn_left: false,
            turn_right: false,
            reverse: false,
            fire: false,
            cancel: false,
            quit: false,
            window: (1280, 720),
        }
    }
}

impl InputSnapshot {
    /// Apply a key transition using the default WASD layout.
    /// Q is a one-way quit signal: releasing it does not clear it.
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        match key {
            KeyCode::W => self.thrust = down,
            KeyCode::A => self.turn_left = down,
            KeyCode::S => self.reverse = down,
            KeyCode::D => self.turn_right = down,
            KeyCode::Space => self.fire = down,
            KeyCode::Escape => self.cancel = down,
            KeyCode::Q => self.quit = true,
            KeyCode::Other => {}
        }
    }

    /// Snapshot asking the loop to stop
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Default::default()
        }
    }
}

/// Anything that can produce one input snapshot per frame
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Replays a fixed list of snapshots, then asks to quit forever after
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue `snapshot` for `count` consecutive frames
    pub fn hold(mut self, snapshot: InputSnapshot, count: usize) -> Self {
        self.frames
            .extend(std::iter::repeat_n(snapshot, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_else(InputSnapshot::quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state_cycle() {
        let mut key = KeyState::Up;
        let held = [true, true, true, false, false, true];
        let expected = [
            KeyState::Pressed,
            KeyState::Down,
            KeyState::Down,
            KeyState::Released,
            KeyState::Up,
            KeyState::Pressed,
        ];
        for (down, want) in held.iter().zip(expected) {
            key = key.advance(*down);
            assert_eq!(key, want);
        }
    }

    #[test]
    fn test_quick_retap_is_a_new_press() {
        let key = KeyState::Released.advance(true);
        assert!(key.just_pressed());
        assert!(key.is_down());
        assert!(!KeyState::Down.just_pressed());
        assert!(!KeyState::Released.is_down());
    }

    #[test]
    fn test_wasd_mapping() {
        let mut input = InputSnapshot::default();
        input.set_key(KeyCode::W, true);
        input.set_key(KeyCode::A, true);
        input.set_key(KeyCode::Space, true);
        assert!(input.thrust && input.turn_left && input.fire);
        assert!(!input.turn_right);

        input.set_key(KeyCode::W, false);
        input.set_key(KeyCode::D, true);
        assert!(!input.thrust);
        assert!(input.turn_right);

        input.set_key(KeyCode::Other, true);
        assert!(!input.quit);
        input.set_key(KeyCode::Q, false);
        assert!(input.quit);
    }

    #[test]
    fn test_scripted_input_quits_when_exhausted() {
        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        let mut script = ScriptedInput::default().hold(fire, 2);
        assert_eq!(script.remaining(), 2);
        assert!(script.poll().fire);
        assert!(script.poll().fire);
        let last = script.poll();
        assert!(last.quit);
        assert!(!last.fire);
        assert!(script.poll().quit);
    }
}
