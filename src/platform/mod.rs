//! Platform layer
//!
//! A [`Platform`] owns the display and the keyboard; the [`FrameDriver`]
//! runs the scene against one:
//! - Terminal: crossterm raw mode, character-cell canvas, wall-clock pacing
//! - Headless: virtual clock, scripted input, recorded draw calls

pub mod autopilot;
pub mod clock;
pub mod headless;
pub mod terminal;

pub use autopilot::Autopilot;
pub use clock::{ClockMode, FrameClock, FrameStats};
pub use headless::HeadlessPlatform;
pub use terminal::TerminalPlatform;

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use crate::input::KeyboardState;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::Scene;

/// Window-level happenings the scene cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The arena changed size, in pixels
    Resized { width: i32, height: i32 },
    CloseRequested,
}

pub trait Platform {
    type Canvas: Renderer;

    /// Arena size in pixels
    fn display_size(&self) -> (i32, i32);
    /// Shared handle to the keyboard state this platform feeds
    fn keyboard(&self) -> KeyboardState;
    /// Events pending before `frame` runs
    fn poll_events(&mut self, frame: u64) -> Vec<PlatformEvent>;
    /// Clear the canvas for a new frame
    fn begin_frame(&mut self);
    fn canvas(&mut self) -> &mut Self::Canvas;
    fn present(&mut self) -> Result<()>;
    /// Flip fullscreen. Returns the new arena size if it changed.
    fn toggle_fullscreen(&mut self) -> Option<(i32, i32)>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Give the display back. Called once when the loop stops.
    fn shutdown(&mut self) -> Result<()>;
}

pub struct FrameDriver<P: Platform> {
    platform: P,
    scene: Scene<KeyboardState>,
    clock: FrameClock,
    autopilot: Option<Autopilot>,
    fullscreen_requested: Rc<Cell<bool>>,
    max_frames: Option<u64>,
    frame: u64,
}

impl<P: Platform> FrameDriver<P> {
    pub fn new(platform: P, settings: &Settings, clock: FrameClock) -> Self {
        let keyboard = platform.keyboard();
        let mut scene = Scene::new(keyboard.clone(), settings.tuning.clone(), settings.resolve_seed());
        let (width, height) = platform.display_size();
        scene.set_display_dimensions(width, height);

        let fullscreen_requested = Rc::new(Cell::new(false));
        let request = Rc::clone(&fullscreen_requested);
        scene.set_fullscreen_callback(move || request.set(true));

        let autopilot = settings.autopilot.then(|| {
            log::info!("Autopilot enabled");
            Autopilot::new(keyboard)
        });

        Self {
            platform,
            scene,
            clock,
            autopilot,
            fullscreen_requested,
            max_frames: settings.max_frames,
            frame: 0,
        }
    }

    pub fn scene(&self) -> &Scene<KeyboardState> {
        &self.scene
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn autopilot(&self) -> Option<&Autopilot> {
        self.autopilot.as_ref()
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame. Returns false once the loop should stop.
    pub fn step(&mut self) -> Result<bool> {
        for event in self.platform.poll_events(self.frame) {
            match event {
                PlatformEvent::Resized { width, height } => self.scene.reshape(width, height),
                PlatformEvent::CloseRequested => {
                    log::info!("Close requested at frame {}", self.frame);
                    return Ok(false);
                }
            }
        }

        if let Some(autopilot) = self.autopilot.as_mut() {
            autopilot.steer(&self.scene);
        }

        self.platform.begin_frame();
        self.scene.update(self.clock.dt(), self.platform.canvas());
        self.platform.present()?;

        if self.fullscreen_requested.replace(false) {
            if let Some((width, height)) = self.platform.toggle_fullscreen() {
                self.scene.reshape(width, height);
            }
        }

        if let Some(stats) = self.clock.end_frame() {
            let title = format!(
                "Poing! | {:.1} FPS | dt {:.4} | {} ticks",
                stats.fps, stats.dt, stats.ticks
            );
            log::debug!("{title}");
            self.platform.set_title(&title)?;
        }

        self.frame += 1;
        Ok(self.max_frames.is_none_or(|max| self.frame < max))
    }

    /// Loop until closed or out of frames, then release the display
    pub fn run(mut self) -> Result<P> {
        log::info!("Frame loop starting");
        let outcome = loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        // A failed frame is the error worth reporting, shutdown failures only log then
        match (outcome, self.platform.shutdown()) {
            (Err(frame), Err(shutdown)) => {
                log::error!("Shutdown after a failed frame also failed: {shutdown:#}");
                return Err(frame);
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => return Err(e),
            (Ok(()), Ok(())) => {}
        }
        log::info!(
            "Frame loop stopped after {} frames ({:?})",
            self.frame,
            self.scene.phase()
        );
        Ok(self.platform)
    }
}
