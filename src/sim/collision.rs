//! Collision detection between bullets, asteroids and the ship
//!
//! Detection only ever flips liveness flags; positions are never corrected.
//! Bullets are resolved first, so an asteroid shot this tick cannot also kill
//! the ship.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, point_in_polygon, segment_hits_polygon};
use super::movement::is_out_of_bounds;
use super::state::{Asteroid, Bullet, GameState};
use crate::consts::*;

/// How a bullet is tested against an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// Center distance under `bullet_hit_distance`
    #[default]
    Distance,
    /// Bullet center inside the asteroid's bounding box
    PointInRect,
    /// Bullet path over the last tick crosses (or ends inside) the bounding box
    Sweep,
}

impl CollisionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionStrategy::Distance => "distance",
            CollisionStrategy::PointInRect => "point_in_rect",
            CollisionStrategy::Sweep => "sweep",
        }
    }
}

/// Tunables for one collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    pub strategy: CollisionStrategy,
    pub bullet_hit_distance: f32,
    pub player_hit_distance: f32,
    /// Side length of the asteroid bounding box for the rectangle strategies
    pub asteroid_size: f32,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            strategy: CollisionStrategy::Distance,
            bullet_hit_distance: BULLET_HIT_DISTANCE,
            player_hit_distance: PLAYER_HIT_DISTANCE,
            asteroid_size: ASTEROID_SIZE,
        }
    }
}

/// A bullet/asteroid pair that destroyed each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: usize,
    pub asteroid: usize,
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub bullet_hits: Vec<BulletHit>,
    /// Index of the asteroid that rammed the ship, if any
    pub player_hit: Option<usize>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.bullet_hits.is_empty() && self.player_hit.is_none()
    }
}

/// Deactivate every live bullet outside the field (no wrap overhang).
/// Returns the number culled.
pub fn cull_out_of_bounds(state: &mut GameState) -> usize {
    let (width, height) = (state.width, state.height);
    let mut culled = 0;
    state.bullets.for_each_live_mut(|_, bullet| {
        if is_out_of_bounds(bullet.body.pos, width, height) {
            bullet.is_used = false;
            culled += 1;
        }
    });
    culled
}

/// Whether `bullet` hits `asteroid` under the given parameters
pub fn bullet_hits_asteroid(bullet: &Bullet, asteroid: &Asteroid, params: &CollisionParams) -> bool {
    let center = asteroid.body.pos;
    let pos = bullet.body.pos;
    match params.strategy {
        CollisionStrategy::Distance => pos.distance(center) <= params.bullet_hit_distance,
        CollisionStrategy::PointInRect => {
            let rect = Rect::centered(center, params.asteroid_size, params.asteroid_size);
            point_in_polygon(&rect.corners(), pos)
        }
        CollisionStrategy::Sweep => {
            let rect = Rect::centered(center, params.asteroid_size, params.asteroid_size);
            let corners = rect.corners();
            let from = pos - bullet.body.vel;
            segment_hits_polygon(&corners, from, pos) || point_in_polygon(&corners, pos)
        }
    }
}

/// Whether an asteroid centred at `asteroid_pos` rams a ship at `ship_pos`
#[inline]
pub fn ship_hits_asteroid(ship_pos: Vec2, asteroid_pos: Vec2, params: &CollisionParams) -> bool {
    ship_pos.distance(asteroid_pos) <= params.player_hit_distance
}

/// Run one collision pass over the current state.
///
/// For each live asteroid the first live bullet that hits it wins and both are
/// deactivated. Liveness is checked before every pair test, so anything
/// removed earlier in the pass is never considered again.
pub fn resolve_collisions(state: &mut GameState, params: &CollisionParams) -> CollisionReport {
    let mut report = CollisionReport::default();

    for (ai, asteroid) in state.asteroids.iter_mut().enumerate() {
        if !asteroid.is_used {
            continue;
        }
        for (bi, bullet) in state.bullets.iter_live_mut() {
            if bullet_hits_asteroid(bullet, asteroid, params) {
                bullet.is_used = false;
                asteroid.is_used = false;
                log::debug!("Bullet {} destroyed asteroid {}", bi, ai);
                report.bullet_hits.push(BulletHit {
                    bullet: bi,
                    asteroid: ai,
                });
                break;
            }
        }
    }

    let player = &mut state.player;
    if !player.is_dead {
        for (ai, asteroid) in state.asteroids.iter_mut().enumerate() {
            if asteroid.is_used && ship_hits_asteroid(player.body.pos, asteroid.body.pos, params) {
                asteroid.is_used = false;
                player.is_dead = true;
                report.player_hit = Some(ai);
                log::info!("Ship destroyed by asteroid {} at {:?}", ai, player.body.pos);
                break;
            }
        }
    }

    report
}
