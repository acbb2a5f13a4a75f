//! One simulation tick
//!
//! Order per tick: ship (steer, move, fire, wrap), bullets (cull, move),
//! asteroids (move, wrap), then a single collision pass.

use super::collision::{CollisionParams, CollisionReport, cull_out_of_bounds, resolve_collisions};
use super::state::GameState;

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire held (edge detection happens in the ship's trigger latch)
    pub fire: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Ring slot of the bullet fired this tick
    pub fired: Option<usize>,
    /// Bullets removed for leaving the field
    pub culled: usize,
    pub collisions: CollisionReport,
}

/// Advance the game state by one tick. A dead ship freezes the simulation.
pub fn tick(state: &mut GameState, input: &TickInput, params: &CollisionParams) -> TickOutcome {
    if state.is_over() {
        return TickOutcome::default();
    }

    state.ticks += 1;

    let fired = update_player(state, input);
    let culled = update_bullets(state);
    update_asteroids(state);
    let collisions = resolve_collisions(state, params);

    TickOutcome {
        fired,
        culled,
        collisions,
    }
}

fn update_player(state: &mut GameState, input: &TickInput) -> Option<usize> {
    let player = &mut state.player;
    player.steer(input.turn_left, input.turn_right, input.thrust);

    // Fire from the post-move position, before wrapping
    let fired = player
        .pull_trigger(input.fire)
        .map(|(pos, vel)| state.create_bullet(pos, vel));

    state.player.body.wrap(state.width, state.height);
    fired
}

fn update_bullets(state: &mut GameState) -> usize {
    let culled = cull_out_of_bounds(state);
    state
        .bullets
        .for_each_live_mut(|_, bullet| bullet.body.integrate());
    culled
}

fn update_asteroids(state: &mut GameState) {
    let (width, height) = (state.width, state.height);
    for asteroid in state.asteroids.iter_mut().filter(|a| a.is_used) {
        asteroid.body.integrate();
        asteroid.body.wrap(width, height);
    }
}
