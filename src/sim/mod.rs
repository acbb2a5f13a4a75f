//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no variable timestep
//! - Seeded RNG only
//! - Stable iteration order (slot / insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod movement;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{BulletHit, CollisionParams, CollisionReport, CollisionStrategy, resolve_collisions};
pub use geometry::{
    Orientation, Rect, cross, on_segment, orientation, point_in_polygon, segment_hits_polygon,
    segments_intersect, subtract,
};
pub use movement::{Body, is_out_of_bounds, wrap_coord};
pub use pool::{Pooled, RingPool};
pub use spawn::SpawnPolicy;
pub use state::{Asteroid, Bullet, GameState, Player};
pub use tick::{TickInput, TickOutcome, tick};
