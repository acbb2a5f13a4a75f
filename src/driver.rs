//! Frame loop
//!
//! `Game` is the single owner of all mutable game state. Each frame runs
//! strictly in sequence: poll input, update, render, wait. The wait is a fixed
//! delay with no catch-up, so simulation speed tracks wall time only roughly.

use std::time::Duration;

use serde::Serialize;

use crate::assets::AssetRegistry;
use crate::input::{InputSnapshot, InputSource, KeyState};
use crate::render::{Renderer, render_frame};
use crate::screen::{Screen, ScreenEvent};
use crate::settings::Settings;
use crate::sim::{CollisionParams, GameState, SpawnPolicy, TickInput, TickOutcome, tick};

/// End-of-frame wait
pub trait FramePacer {
    fn wait(&mut self);
}

/// Sleep a fixed amount every frame
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FramePacer for FixedDelay {
    fn wait(&mut self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// Don't wait at all (tests, benchmarks)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl FramePacer for NoDelay {
    fn wait(&mut self) {}
}

/// Counters for a finished (or ongoing) run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub rounds: u32,
    pub ticks: u64,
    pub screen: &'static str,
    pub live_asteroids: usize,
    pub asteroids_destroyed: u64,
    pub bullets_fired: u64,
    pub bullets_culled: u64,
    pub player_dead: bool,
}

pub struct Game {
    settings: Settings,
    params: CollisionParams,
    spawner: SpawnPolicy,
    screen: Screen,
    state: GameState,
    fire: KeyState,
    cancel: KeyState,
    window: (u32, u32),
    running: bool,
    summary: RunSummary,
}

impl Game {
    /// Build a game from settings. Starting directly on the play screen spawns
    /// the first round immediately.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.validated();
        let params = settings.collision_params();
        let spawner = settings.spawn_policy(seed);
        let state = GameState::new(
            settings.play_width,
            settings.play_height,
            settings.bullet_capacity,
        );
        let screen = settings.start_screen;

        let mut game = Self {
            settings,
            params,
            spawner,
            screen,
            state,
            fire: KeyState::Up,
            cancel: KeyState::Up,
            window: (0, 0),
            running: true,
            summary: RunSummary::default(),
        };

        log::info!(
            "Game created: seed {}, collisions '{}', start screen '{}'",
            seed,
            game.params.strategy.as_str(),
            screen.as_str()
        );
        if screen == Screen::Play {
            game.start_round();
        }
        game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the loop to stop after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Replace the simulation with a fresh round from the spawn policy's stream
    pub fn start_round(&mut self) {
        self.state = GameState::new(
            self.settings.play_width,
            self.settings.play_height,
            self.settings.bullet_capacity,
        );
        // A fire key still held from the confirm press must not shoot
        self.state.player.has_fired = self.fire.is_down();
        self.spawner.spawn_initial(&mut self.state);
        self.summary.rounds += 1;
    }

    /// Process one frame of input: screen transitions, then a simulation tick
    /// when playing. Returns the tick outcome if one ran.
    pub fn update(&mut self, input: &InputSnapshot) -> Option<TickOutcome> {
        self.fire = self.fire.advance(input.fire);
        self.cancel = self.cancel.advance(input.cancel);

        if input.window != self.window {
            log::debug!("Window size {}x{}", input.window.0, input.window.1);
            self.window = input.window;
        }

        if input.quit {
            log::info!("Quit requested");
            self.running = false;
            return None;
        }

        // Cancel takes priority, but an event this screen ignores must not
        // swallow a press it does accept
        let next = [
            (self.cancel, ScreenEvent::Cancel),
            (self.fire, ScreenEvent::Confirm),
        ]
        .into_iter()
        .filter(|(key, _)| key.just_pressed())
        .find_map(|(_, event)| self.screen.next(event));
        if let Some(next) = next {
            self.enter(next);
            return None;
        }

        if self.screen != Screen::Play {
            return None;
        }

        let was_dead = self.state.is_over();
        let outcome = tick(
            &mut self.state,
            &TickInput {
                thrust: input.thrust,
                turn_left: input.turn_left,
                turn_right: input.turn_right,
                fire: input.fire,
            },
            &self.params,
        );
        self.record(&outcome);
        if !was_dead && self.state.is_over() {
            log::info!("Ship destroyed after {} ticks", self.state.ticks);
        }
        Some(outcome)
    }

    fn enter(&mut self, next: Screen) {
        log::info!("Screen {} -> {}", self.screen.as_str(), next.as_str());
        self.screen = next;
        if next == Screen::Play {
            self.start_round();
        }
    }

    fn record(&mut self, outcome: &TickOutcome) {
        if outcome.fired.is_some() {
            self.summary.bullets_fired += 1;
        }
        self.summary.bullets_culled += outcome.culled as u64;
        self.summary.asteroids_destroyed += outcome.collisions.bullet_hits.len() as u64;
        if outcome.collisions.player_hit.is_some() {
            self.summary.asteroids_destroyed += 1;
        }
    }

    /// Update and draw one frame
    pub fn run_frame<R: Renderer + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        assets: &AssetRegistry,
        renderer: &mut R,
    ) -> Option<TickOutcome> {
        let outcome = self.update(input);
        render_frame(renderer, self.screen, &self.state, assets);
        self.summary.frames += 1;
        outcome
    }

    /// Run until the input source asks to quit or `stop` is called
    pub fn run<I, R, P>(
        &mut self,
        input: &mut I,
        assets: &AssetRegistry,
        renderer: &mut R,
        pacer: &mut P,
    ) -> RunSummary
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
        P: FramePacer + ?Sized,
    {
        log::info!("Entering frame loop on '{}'", self.screen.as_str());
        while self.running {
            let snapshot = input.poll();
            self.run_frame(&snapshot, assets, renderer);
            pacer.wait();
        }
        let summary = self.summary();
        log::info!(
            "Frame loop done: {} frames, {} ticks",
            summary.frames,
            summary.ticks
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.state.ticks,
            screen: self.screen.as_str(),
            live_asteroids: self.state.live_asteroids(),
            player_dead: self.state.is_over(),
            ..self.summary.clone()
        }
    }
}
