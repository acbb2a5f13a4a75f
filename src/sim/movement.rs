//! Kinematic bodies and the per-tick integrator
//!
//! One `integrate` call is one simulation tick is one rendered frame. There is
//! no `dt`: velocities are in play field units per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WRAP_OVERHANG;

/// Linear and angular motion state shared by every simulated object
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Heading in radians (0 along +x)
    pub angle: f32,
    pub angular_vel: f32,
    pub angular_acc: f32,
}

impl Body {
    /// Body at rest at `pos`
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    /// Explicit Euler step: velocities first, then positions
    pub fn integrate(&mut self) {
        self.vel += self.acc;
        self.angular_vel += self.angular_acc;
        self.pos += self.vel;
        self.angle += self.angular_vel;
    }

    /// Wrap both axes into a `width` x `height` toroidal field
    pub fn wrap(&mut self, width: f32, height: f32) {
        self.pos.x = wrap_coord(self.pos.x, 0.0, width);
        self.pos.y = wrap_coord(self.pos.y, 0.0, height);
    }
}

/// Teleport a coordinate to the opposite edge once it drifts past the overhang.
///
/// The overhang is `WRAP_OVERHANG * max` on both sides so sprites leave the
/// visible frame completely before reappearing.
pub fn wrap_coord(coord: f32, min: f32, max: f32) -> f32 {
    let overhang = max * WRAP_OVERHANG;
    if coord > max + overhang {
        min - overhang
    } else if coord < min - overhang {
        max + overhang
    } else {
        coord
    }
}

/// Strict bounds check with no overhang (used to cull bullets)
pub fn is_out_of_bounds(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x < 0.0 || pos.x > width || pos.y < 0.0 || pos.y > height
}
