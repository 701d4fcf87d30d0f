//! Game settings and tuning
//!
//! Loaded from an optional JSON file; every field has a default so a file
//! only needs the values it changes. Command-line flags override the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::Key;

/// Display backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Draw into the terminal, read the keyboard from it
    #[default]
    Terminal,
    /// No display, virtual clock, scripted input
    Headless,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Terminal => "terminal",
            BackendKind::Headless => "headless",
        }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ball_size: IVec2,
    /// Pixels per tick
    pub ball_speed: IVec2,
    /// Left bound of the random spawn column
    pub ball_spawn_min_x: i32,
    pub pad_x: i32,
    pub pad_size: IVec2,
    /// Pixels per frame while a move key is held
    pub pad_step: i32,
    pub fade_out_rate: f32,
    pub ball_flash_rate: f32,
    pub pad_flash_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_size: IVec2::new(BALL_WIDTH, BALL_HEIGHT),
            ball_speed: IVec2::new(BALL_SPEED_X, BALL_SPEED_Y),
            ball_spawn_min_x: BALL_SPAWN_MIN_X,
            pad_x: PAD_X,
            pad_size: IVec2::new(PAD_WIDTH, PAD_HEIGHT),
            pad_step: PAD_STEP,
            fade_out_rate: FADE_OUT_RATE,
            ball_flash_rate: BALL_FLASH_RATE,
            pad_flash_rate: PAD_FLASH_RATE,
        }
    }
}

/// Something the headless backend does at a given frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ScriptAction {
    Press { key: Key },
    Release { key: Key },
    /// Press and release
    Tap { key: Key },
    Resize { width: i32, height: i32 },
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub frame: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

/// Everything the program can be configured with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendKind,
    pub width: i32,
    pub height: i32,
    pub target_fps: u32,
    /// Fixed seed for reproducible runs, random when absent
    pub seed: Option<u64>,
    /// Size reported while fullscreen (headless backend)
    pub fullscreen_size: IVec2,
    /// Drive the pad automatically
    pub autopilot: bool,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Headless input script
    pub script: Vec<ScriptedEvent>,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_fps: TARGET_FPS,
            seed: None,
            fullscreen_size: IVec2::new(DEFAULT_FULLSCREEN_WIDTH, DEFAULT_FULLSCREEN_HEIGHT),
            autopilot: false,
            max_frames: None,
            script: Vec::new(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            anyhow::bail!("window size must be positive, got {}x{}", self.width, self.height);
        }
        if self.target_fps == 0 {
            anyhow::bail!("target fps must be positive");
        }
        if self.fullscreen_size.x <= 0 || self.fullscreen_size.y <= 0 {
            anyhow::bail!(
                "fullscreen size must be positive, got {}x{}",
                self.fullscreen_size.x,
                self.fullscreen_size.y
            );
        }
        let t = &self.tuning;
        if t.ball_size.x <= 0 || t.ball_size.y <= 0 || t.pad_size.x <= 0 || t.pad_size.y <= 0 {
            anyhow::bail!("ball and pad sizes must be positive");
        }
        Ok(())
    }

    /// The configured seed, or a fresh one drawn once
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
