//! Seeded spawn policy
//!
//! Every random draw in the simulation goes through one PCG32 stream seeded at
//! construction, so a given seed always produces the same asteroid field.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::movement::Body;
use super::state::{Asteroid, GameState};
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    seed: u64,
    rng: Pcg32,
    count_min: u32,
    count_max: u32,
    speed_scale_min: f32,
    speed_scale_max: f32,
}

impl SpawnPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            count_min: ASTEROID_COUNT_MIN,
            count_max: ASTEROID_COUNT_MAX,
            speed_scale_min: ASTEROID_SPEED_SCALE_MIN,
            speed_scale_max: ASTEROID_SPEED_SCALE_MAX,
        }
    }

    /// Inclusive range for the initial asteroid count (order-insensitive)
    pub fn with_count_range(mut self, a: u32, b: u32) -> Self {
        self.count_min = a.min(b);
        self.count_max = a.max(b);
        self
    }

    /// Range of the random magnitude factor applied to asteroid velocity
    pub fn with_speed_scale(mut self, a: f32, b: f32) -> Self {
        self.speed_scale_min = a.min(b);
        self.speed_scale_max = a.max(b);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw an initial asteroid count from the configured range
    pub fn roll_count(&mut self) -> u32 {
        self.rng.random_range(self.count_min..=self.count_max)
    }

    /// A fresh asteroid body somewhere in a `width` x `height` field
    pub fn roll_asteroid(&mut self, width: f32, height: f32) -> Body {
        let pos = Vec2::new(
            self.rng.random_range(0..=width.max(0.0) as u32) as f32,
            self.rng.random_range(0..=height.max(0.0) as u32) as f32,
        );
        let vel = Vec2::new(
            self.signed(ACCELERATION) * self.speed_scale(),
            self.signed(ACCELERATION) * self.speed_scale(),
        );

        Body {
            pos,
            vel,
            acc: Vec2::ZERO,
            angle: self.signed(ACCELERATION),
            angular_vel: ACCELERATION * self.signed(1.0),
            angular_acc: 0.0,
        }
    }

    /// Append `count` live asteroids to the state. Returns how many were added.
    pub fn spawn(&mut self, state: &mut GameState, count: u32) -> usize {
        state.asteroids.reserve(count as usize);
        for _ in 0..count {
            let body = self.roll_asteroid(state.width, state.height);
            state.asteroids.push(Asteroid::new(body));
        }
        count as usize
    }

    /// Populate the opening asteroid field
    pub fn spawn_initial(&mut self, state: &mut GameState) -> usize {
        let count = self.roll_count();
        let added = self.spawn(state, count);
        log::info!(
            "Spawned {} asteroids (seed {}, field {}x{})",
            added,
            self.seed,
            state.width,
            state.height
        );
        added
    }

    fn signed(&mut self, magnitude: f32) -> f32 {
        self.rng.random_range(-magnitude..=magnitude)
    }

    fn speed_scale(&mut self) -> f32 {
        self.rng
            .random_range(self.speed_scale_min..=self.speed_scale_max)
    }
}
