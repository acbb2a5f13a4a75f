//! Frame composition over an abstract renderer
//!
//! The platform provides the three primitives in `Renderer`. This module decides
//! what goes on screen: each body is drawn with its sprite centred on its
//! position and rotated from its heading.

use glam::Vec2;

use crate::assets::{AssetHandle, AssetRegistry, Sprite};
use crate::screen::Screen;
use crate::sim::{Body, GameState, Rect};
use crate::sprite_rotation_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 0xff);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Drawing primitives supplied by the platform
pub trait Renderer {
    fn clear(&mut self, color: Color);
    /// Draw `handle` stretched into `dst`, rotated clockwise by `degrees` about its centre
    fn draw(&mut self, handle: AssetHandle, dst: Rect, degrees: f32);
    fn present(&mut self);
}

/// Look up a sprite that must exist once assets are loaded.
///
/// # Panics
/// If `name` was never registered. Callers check with
/// `AssetRegistry::ensure_loaded` at startup.
pub fn require_sprite<'a>(assets: &'a AssetRegistry, name: &str) -> &'a Sprite {
    match assets.fetch_by_name(name) {
        Some(sprite) => sprite,
        None => panic!("sprite '{}' not loaded", name),
    }
}

/// Destination rectangle for `sprite` centred on `pos`
pub fn sprite_rect(sprite: &Sprite, pos: Vec2) -> Rect {
    Rect::centered(pos, sprite.width as f32, sprite.height as f32)
}

fn draw_body<R: Renderer + ?Sized>(renderer: &mut R, sprite: &Sprite, body: &Body) {
    renderer.draw(
        sprite.handle,
        sprite_rect(sprite, body.pos),
        sprite_rotation_degrees(body.angle),
    );
}

/// Draw one full frame for `screen`
pub fn render_frame<R: Renderer + ?Sized>(
    renderer: &mut R,
    screen: Screen,
    state: &GameState,
    assets: &AssetRegistry,
) {
    renderer.clear(Color::BLACK);

    match screen {
        Screen::Title => draw_card(renderer, state, require_sprite(assets, "title")),
        Screen::Credits => draw_card(renderer, state, require_sprite(assets, "credits")),
        Screen::Play => draw_play(renderer, state, assets),
    }

    renderer.present();
}

/// Full-screen menu sprite, centred on the field
fn draw_card<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState, sprite: &Sprite) {
    let center = Vec2::new(state.width / 2.0, state.height / 2.0);
    renderer.draw(sprite.handle, sprite_rect(sprite, center), 0.0);
}

fn draw_play<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState, assets: &AssetRegistry) {
    let asteroid = require_sprite(assets, "asteroid");
    for a in state.asteroids.iter().filter(|a| a.is_used) {
        draw_body(renderer, asteroid, &a.body);
    }

    let player = &state.player;
    draw_body(renderer, require_sprite(assets, "ship"), &player.body);
    if player.has_fired {
        draw_body(renderer, require_sprite(assets, "shipguns"), &player.body);
    }
    if player.is_flying {
        draw_body(renderer, require_sprite(assets, "shipthruster"), &player.body);
    }

    let bullet = require_sprite(assets, "bullet");
    state
        .bullets
        .for_each_live(|_, b| draw_body(renderer, bullet, &b.body));
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub handle: AssetHandle,
    pub dst: Rect,
    pub degrees: f32,
}

/// Renderer that records the current frame's draw calls instead of drawing.
/// Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Draw calls since the last clear
    pub commands: Vec<DrawCommand>,
    pub clear_color: Option<Color>,
    pub frames_presented: u64,
    pub total_draws: u64,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.clear_color = Some(color);
    }

    fn draw(&mut self, handle: AssetHandle, dst: Rect, degrees: f32) {
        self.commands.push(DrawCommand {
            handle,
            dst,
            degrees,
        });
        self.total_draws += 1;
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}
