//! Poing - a single-pad Pong
//!
//! Core modules:
//! - `sim`: Simulation core (entities, animations, per-frame scene update)
//! - `input`: Thread-safe keyboard state shared with a listener thread
//! - `renderer`: Draw-call sinks (recording list, terminal canvas)
//! - `platform`: Frame driver, timing and display backends
//! - `settings`: Configuration and game tuning

pub mod color;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use input::{InputSource, Key, KeyboardState};
pub use settings::{BackendKind, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    use crate::Color;

    /// Default window size
    pub const DEFAULT_WIDTH: i32 = 1280;
    pub const DEFAULT_HEIGHT: i32 = 720;
    /// Size the headless backend reports when switched to fullscreen
    pub const DEFAULT_FULLSCREEN_WIDTH: i32 = 1920;
    pub const DEFAULT_FULLSCREEN_HEIGHT: i32 = 1080;

    /// Frame pacing target
    pub const TARGET_FPS: u32 = 60;
    /// Largest dt handed to the scene, prevents huge animation jumps after a stall
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Frame limit for headless runs that set none
    pub const HEADLESS_DEFAULT_FRAMES: u64 = 600;

    /// Ball defaults
    pub const BALL_WIDTH: i32 = 20;
    pub const BALL_HEIGHT: i32 = 20;
    pub const BALL_SPEED_X: i32 = 3;
    pub const BALL_SPEED_Y: i32 = 3;
    pub const BALL_COLOR: Color = Color::WHITE;
    /// Ball spawns at x in [BALL_SPAWN_MIN_X, width]
    pub const BALL_SPAWN_MIN_X: i32 = 50;

    /// Pad defaults
    pub const PAD_X: i32 = 5;
    pub const PAD_WIDTH: i32 = 10;
    pub const PAD_HEIGHT: i32 = 100;
    /// Pixels per frame while a move key is held
    pub const PAD_STEP: i32 = 5;
    pub const PAD_COLOR: Color = Color::WHITE;

    /// Channel decay of the fade-out, per second
    pub const FADE_OUT_RATE: f32 = 180.0;
    /// Colour the ball fades out from after a miss
    pub const MISS_FADE_COLOR: Color = Color::new(255, 150, 150);

    /// Ball flash when hit by a moving pad
    pub const BALL_FLASH_COLOR: Color = Color::new(64, 128, 255);
    pub const BALL_FLASH_RATE: f32 = 250.0;
    /// Pad flash on every contact
    pub const PAD_FLASH_COLOR: Color = Color::new(255, 64, 64);
    pub const PAD_FLASH_RATE: f32 = 500.0;

    /// Upward kick given to a missed ball
    pub const BOUNCE_OFF_LIFT: i32 = -5;
    /// Gravity pulling a missed ball down, per second
    pub const BOUNCE_OFF_GRAVITY: f32 = 15.0;

    /// Status panel geometry (anchored top-right)
    pub const HUD_PANEL_LEFT_INSET: i32 = 300;
    pub const HUD_PANEL_RIGHT_INSET: i32 = 25;
    pub const HUD_PANEL_TOP: i32 = 25;
    pub const HUD_PANEL_HEIGHT: i32 = 100;
    pub const HUD_BACKGROUND: Color = Color::new(15, 15, 15);
    pub const HUD_TEXT_COLOR: Color = Color::new(55, 85, 255);

    /// Status messages
    pub const HELP_TEXT: &str = "Q/A: move pad\nSPACE: pause\nF: toggle fullscreen";
    pub const PAUSED_TEXT: &str = "Spacebar to unpause";
    pub const GAME_OVER_TEXT: &str = "Game over\nR to restart";
    pub const OUT_OF_BOUNDS_TEXT: &str = "Ball out of bounds\nR to restart";
}
