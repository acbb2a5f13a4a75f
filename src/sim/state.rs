//! Game state and core simulation types
//!
//! All simulation state lives in one explicitly constructed `GameState` that
//! the frame loop owns. Nothing here is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::movement::Body;
use super::pool::{Pooled, RingPool};
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Thrust was applied this tick (drives the thruster sprite)
    pub is_flying: bool,
    /// Fire latch: set on the tick a shot is taken, cleared when fire is released
    pub has_fired: bool,
    /// Terminal: once set the simulation stops advancing
    pub is_dead: bool,
}

impl Player {
    /// Ship centred in the field, facing up
    pub fn new(width: f32, height: f32) -> Self {
        let mut body = Body::at(Vec2::new(width / 2.0, height / 2.0));
        body.angle = std::f32::consts::FRAC_PI_2;
        Self {
            body,
            is_flying: false,
            has_fired: false,
            is_dead: false,
        }
    }

    /// Unit vector the ship's nose points along (screen space, y down)
    #[inline]
    pub fn heading(&self) -> Vec2 {
        -Vec2::new(self.body.angle.cos(), self.body.angle.sin())
    }

    /// Apply one tick of turning and thrust, then move.
    ///
    /// Turning is direct: angular velocity is reset every tick and only the
    /// held keys contribute. Thrust accumulates into velocity.
    pub fn steer(&mut self, turn_left: bool, turn_right: bool, thrust: bool) {
        self.is_flying = false;

        self.body.angular_vel = 0.0;
        if turn_right {
            self.body.angular_vel += ACCELERATION;
        }
        if turn_left {
            self.body.angular_vel -= ACCELERATION;
        }
        self.body.angle += self.body.angular_vel;

        if thrust {
            self.body.vel += self.heading() * ACCELERATION;
            self.is_flying = true;
        }

        self.body.pos += self.body.vel;
    }

    /// Edge-triggered fire. Returns the muzzle position and velocity on the
    /// tick the trigger goes down; holding it yields nothing further until
    /// it is released.
    pub fn pull_trigger(&mut self, fire_held: bool) -> Option<(Vec2, Vec2)> {
        if !fire_held {
            self.has_fired = false;
            return None;
        }
        if self.has_fired {
            return None;
        }
        self.has_fired = true;
        let vel = self.heading() * ACCELERATION * BULLET_SPEED_FACTOR;
        Some((self.body.pos, vel))
    }
}

/// An asteroid. Dead asteroids keep their slot forever and are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub is_used: bool,
}

impl Asteroid {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            is_used: true,
        }
    }
}

/// A bullet slot in the ring pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub is_used: bool,
}

impl Bullet {
    /// Live bullet at `pos` travelling along `vel`, pointed the way it flies
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        let mut body = Body::at(pos);
        body.vel = vel;
        body.angle = vel.y.atan2(vel.x);
        Self {
            body,
            is_used: true,
        }
    }
}

impl Pooled for Bullet {
    fn is_live(&self) -> bool {
        self.is_used
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Play field dimensions
    pub width: f32,
    pub height: f32,
    /// Simulation tick counter
    pub ticks: u64,
    pub player: Player,
    /// Insertion-ordered; never compacted
    pub asteroids: Vec<Asteroid>,
    pub bullets: RingPool<Bullet>,
}

impl GameState {
    /// Empty field with the player in the middle and no asteroids yet
    pub fn new(width: f32, height: f32, bullet_capacity: usize) -> Self {
        Self {
            width,
            height,
            ticks: 0,
            player: Player::new(width, height),
            asteroids: Vec::new(),
            bullets: RingPool::with_capacity(bullet_capacity),
        }
    }

    /// Create a bullet, overwriting the oldest slot if the pool is full.
    /// Never fails; returns the slot used.
    pub fn create_bullet(&mut self, pos: Vec2, vel: Vec2) -> usize {
        self.bullets.insert_overwriting(Bullet::new(pos, vel))
    }

    pub fn live_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.is_used).count()
    }

    pub fn live_bullets(&self) -> usize {
        self.bullets.live_count()
    }

    /// Simulation has reached its terminal state
    pub fn is_over(&self) -> bool {
        self.player.is_dead
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(PLAY_WIDTH, PLAY_HEIGHT, BULLET_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_player_starts_centered_facing_up() {
        let player = Player::new(640.0, 480.0);
        assert_eq!(player.body.pos, Vec2::new(320.0, 240.0));
        assert!((player.body.angle - FRAC_PI_2).abs() < 1e-6);
        // Up on screen is -y
        assert!(player.heading().x.abs() < 1e-6);
        assert!((player.heading().y + 1.0).abs() < 1e-6);
        assert!(!player.is_dead);
    }

    #[test]
    fn test_player_thrust_moves_up() {
        let mut player = Player::new(640.0, 480.0);
        player.steer(false, false, true);
        assert!(player.is_flying);
        assert!(player.body.vel.y < 0.0);
        assert!(player.body.pos.y < 240.0);

        // Releasing thrust keeps momentum
        let vel = player.body.vel;
        player.steer(false, false, false);
        assert!(!player.is_flying);
        assert_eq!(player.body.vel, vel);
    }

    #[test]
    fn test_player_turning_does_not_accumulate_spin() {
        let mut player = Player::new(640.0, 480.0);
        player.steer(false, true, false);
        player.steer(false, true, false);
        assert!((player.body.angle - (FRAC_PI_2 + 2.0 * ACCELERATION)).abs() < 1e-5);
        player.steer(false, false, false);
        assert_eq!(player.body.angular_vel, 0.0);

        // Both keys cancel
        player.steer(true, true, false);
        assert_eq!(player.body.angular_vel, 0.0);
    }

    #[test]
    fn test_trigger_latch() {
        let mut player = Player::new(640.0, 480.0);
        assert!(player.pull_trigger(true).is_some());
        assert!(player.pull_trigger(true).is_none());
        assert!(player.pull_trigger(true).is_none());
        assert!(player.pull_trigger(false).is_none());
        assert!(!player.has_fired);
        assert!(player.pull_trigger(true).is_some());
    }

    #[test]
    fn test_muzzle_velocity_follows_heading() {
        let mut player = Player::new(640.0, 480.0);
        let (pos, vel) = player.pull_trigger(true).unwrap();
        assert_eq!(pos, player.body.pos);
        assert!((vel.length() - ACCELERATION * BULLET_SPEED_FACTOR).abs() < 1e-4);
        assert!(vel.y < 0.0);
    }

    #[test]
    fn test_bullet_faces_travel_direction() {
        let bullet = Bullet::new(Vec2::ZERO, Vec2::new(0.0, -3.0));
        assert!(bullet.is_used);
        assert!((bullet.body.angle + FRAC_PI_2).abs() < 1e-6);

        let bullet = Bullet::new(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(bullet.body.angle, 0.0);
    }

    #[test]
    fn test_create_bullet_wraps_pool() {
        let mut state = GameState::new(640.0, 480.0, 3);
        for i in 0..3 {
            state.create_bullet(Vec2::new(i as f32, 0.0), Vec2::X);
        }
        let slot = state.create_bullet(Vec2::new(50.0, 50.0), Vec2::Y);
        assert_eq!(slot, 0);
        assert_eq!(state.live_bullets(), 3);
        let first = state.bullets.get(0).unwrap();
        assert_eq!(first.body.pos, Vec2::new(50.0, 50.0));
    }
}
