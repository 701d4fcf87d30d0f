//! Poing entry point
//!
//! Parses flags, merges them over the settings file, sets up logging and
//! runs the frame loop on the chosen backend.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use poing::consts::HEADLESS_DEFAULT_FRAMES;
use poing::platform::{FrameClock, FrameDriver, HeadlessPlatform, TerminalPlatform};
use poing::sim::HasVelocity;
use poing::{BackendKind, Settings};

#[derive(Parser, Debug)]
#[command(name = "poing", version, about = "Single-pad Pong")]
struct Args {
    /// Display backend
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Arena width in pixels [default: 1280]
    #[arg(long)]
    width: Option<i32>,

    /// Arena height in pixels [default: 720]
    #[arg(long)]
    height: Option<i32>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second [default: 60]
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Let the computer play the pad
    #[arg(long)]
    autopilot: bool,

    /// Log destination while the terminal backend owns the screen
    #[arg(long, default_value = "poing.log")]
    log_file: PathBuf,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(fps) = self.fps {
            settings.target_fps = fps;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.frames.is_some() {
            settings.max_frames = self.frames;
        }
        settings.autopilot |= self.autopilot;

        if settings.backend == BackendKind::Headless && settings.max_frames.is_none() {
            settings.max_frames = Some(HEADLESS_DEFAULT_FRAMES);
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// Log to stderr, or to a file when the terminal is taken over by the game
fn init_logging(backend: BackendKind, log_file: &Path) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if backend == BackendKind::Terminal {
        let file = File::create(log_file)
            .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = args.settings()?;
    init_logging(settings.backend, &args.log_file)?;

    // Draw the seed here so it can be logged and replayed
    let seed = settings.resolve_seed();
    settings.seed = Some(seed);
    log::info!(
        "Poing starting: {} backend, {}x{}, {} fps, seed {seed}",
        settings.backend.as_str(),
        settings.width,
        settings.height,
        settings.target_fps
    );

    match settings.backend {
        BackendKind::Terminal => {
            let platform = TerminalPlatform::new(&settings)?;
            let clock = FrameClock::real_time(settings.target_fps);
            FrameDriver::new(platform, &settings, clock).run()?;
        }
        BackendKind::Headless => {
            let platform = HeadlessPlatform::new(&settings);
            let clock = FrameClock::virtual_time(settings.target_fps);
            let mut driver = FrameDriver::new(platform, &settings, clock);
            while driver.step()? {}

            let scene = driver.scene();
            println!("frames: {}", driver.frame());
            println!("phase: {:?}", scene.phase());
            if let Some(world) = scene.world() {
                let speed = world.ball.speed();
                println!("ball speed: ({}, {})", speed.x, speed.y);
            }
            if let Some(autopilot) = driver.autopilot() {
                println!("restarts: {}", autopilot.restarts());
            }
        }
    }

    log::info!("Poing exiting");
    Ok(())
}
