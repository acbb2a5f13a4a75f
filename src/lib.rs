//! Rock Drift - a wrap-around asteroid field shooter
//!
//! Core modules:
//! - `sim`: Simulation (geometry, movement, entity pools, collisions, tick)
//! - `screen`: Title / play / credits screen state machine
//! - `input`: Per-tick input snapshot and key edge tracking
//! - `assets`: Named sprite registry over an external image loader
//! - `render`: Draw-call contract and frame composition
//! - `driver`: The frame loop tying everything together
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod driver;
pub mod input;
pub mod render;
pub mod screen;
pub mod settings;
pub mod sim;

pub use driver::Game;
pub use screen::{Screen, ScreenEvent};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical play field dimensions (the renderer scales this to the window)
    pub const PLAY_WIDTH: f32 = 640.0;
    pub const PLAY_HEIGHT: f32 = 480.0;

    /// Base acceleration unit; turn rate, thrust and spawn speeds derive from it
    pub const ACCELERATION: f32 = std::f32::consts::PI / 2.0 / 20.0;

    /// Muzzle speed multiplier applied to `ACCELERATION`
    pub const BULLET_SPEED_FACTOR: f32 = 60.0;

    /// Ring buffer capacity for live bullets
    pub const BULLET_CAPACITY: usize = 4096;

    /// Bullet vs asteroid center distance that counts as a hit (16px sprite / 2)
    pub const BULLET_HIT_DISTANCE: f32 = 8.0;
    /// Ship vs asteroid center distance that counts as a hit
    pub const PLAYER_HIT_DISTANCE: f32 = 24.0;

    /// Asteroid sprite footprint, used by the rectangle-based collision modes
    pub const ASTEROID_SIZE: f32 = 16.0;

    /// Fraction of the max coordinate a body may drift past an edge before wrapping
    pub const WRAP_OVERHANG: f32 = 0.02;

    /// Initial asteroid count range (inclusive)
    pub const ASTEROID_COUNT_MIN: u32 = 20;
    pub const ASTEROID_COUNT_MAX: u32 = 30;

    /// Random magnitude multiplier range applied to asteroid velocity
    pub const ASTEROID_SPEED_SCALE_MIN: f32 = 1.0;
    pub const ASTEROID_SPEED_SCALE_MAX: f32 = 10.0;

    /// Fixed end-of-frame delay (~60 Hz, no catch-up)
    pub const FRAME_DELAY_MS: u64 = 16;
}

/// Convert a body angle (radians, 0 along +x) into the clockwise degrees a
/// sprite authored facing "up" should be rotated by.
#[inline]
pub fn sprite_rotation_degrees(angle: f32) -> f32 {
    (angle - std::f32::consts::FRAC_PI_2).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_sprite_rotation_facing_up_is_zero() {
        assert!(sprite_rotation_degrees(FRAC_PI_2).abs() < 1e-4);
        assert!((sprite_rotation_degrees(PI) - 90.0).abs() < 1e-4);
    }
}
