//! Rock Drift entry point
//!
//! Headless native runner: loads settings, registers placeholder sprites, and
//! drives the frame loop with a scripted demo pilot and a recording renderer.
//! Prints a JSON summary of the run on exit.
//!
//! Usage: `rock-drift [--settings <path>] [--max-frames <n>]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use rock_drift::assets::{
        AssetError, AssetRegistry, GAME_SPRITES, MENU_SPRITES, PlaceholderLoader, SPRITE_PATHS,
    };
    use rock_drift::driver::FixedDelay;
    use rock_drift::input::{InputSnapshot, InputSource};
    use rock_drift::render::RecordingRenderer;
    use rock_drift::{Game, Settings};

    const DEFAULT_SETTINGS_PATH: &str = "rock-drift.json";

    #[derive(Parser)]
    #[command(name = "rock-drift")]
    #[command(about = "Run the asteroid field headless with a scripted pilot")]
    struct Args {
        /// Settings JSON; defaults apply when omitted and rock-drift.json is absent
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Frames to run before quitting
        #[arg(long, default_value_t = 600)]
        max_frames: u64,
    }

    /// Presses confirm on the title screen, then sweeps the ship around while
    /// tapping fire. Quits after a fixed number of frames.
    struct DemoPilot {
        frame: u64,
        max_frames: u64,
    }

    impl InputSource for DemoPilot {
        fn poll(&mut self) -> InputSnapshot {
            self.frame += 1;
            if self.frame > self.max_frames {
                return InputSnapshot::quit();
            }
            let phase = self.frame % 120;
            InputSnapshot {
                // Confirm on frame 1, then a tap every 8 frames
                fire: self.frame == 1 || self.frame % 8 == 0,
                turn_left: phase < 40,
                turn_right: (60..100).contains(&phase),
                thrust: self.frame % 30 < 5,
                ..Default::default()
            }
        }
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    fn load_assets() -> Result<AssetRegistry, AssetError> {
        let mut loader = PlaceholderLoader::new(16, 16);
        let mut assets = AssetRegistry::new();
        assets.load_all(&mut loader, &SPRITE_PATHS)?;
        assets.ensure_loaded(&GAME_SPRITES)?;
        assets.ensure_loaded(&MENU_SPRITES)?;
        Ok(assets)
    }

    fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
        match path {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("failed loading settings from {}", path.display())),
            None => Ok(Settings::load_or_default(DEFAULT_SETTINGS_PATH)),
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let max_frames = args.max_frames;

        let settings = load_settings(args.settings.as_ref())?;
        let seed = settings.seed.unwrap_or_else(time_seed);
        let mut pacer = FixedDelay(settings.frame_delay());

        let assets = load_assets().context("failed registering sprites")?;
        let mut game = Game::new(settings, seed);
        let mut pilot = DemoPilot {
            frame: 0,
            max_frames,
        };
        let mut renderer = RecordingRenderer::default();

        let summary = game.run(&mut pilot, &assets, &mut renderer, &mut pacer);
        log::info!("{} draw calls issued", renderer.total_draws);
        let json = serde_json::to_string_pretty(&summary).context("failed encoding run summary")?;
        println!("{}", json);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rock Drift (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host
}
