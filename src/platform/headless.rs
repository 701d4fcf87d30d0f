//! Headless platform: no display, input comes from a frame-numbered script

use anyhow::Result;

use super::{Platform, PlatformEvent};
use crate::input::KeyboardState;
use crate::renderer::DrawList;
use crate::settings::{ScriptAction, ScriptedEvent, Settings};

pub struct HeadlessPlatform {
    keyboard: KeyboardState,
    canvas: DrawList,
    size: (i32, i32),
    /// Size to go back to when leaving fullscreen
    windowed_size: (i32, i32),
    fullscreen_size: (i32, i32),
    fullscreen: bool,
    script: Vec<ScriptedEvent>,
    next_event: usize,
    presented: u64,
    title: String,
}

impl HeadlessPlatform {
    pub fn new(settings: &Settings) -> Self {
        let mut script = settings.script.clone();
        script.sort_by_key(|e| e.frame);
        log::info!(
            "Headless platform {}x{}, {} scripted events",
            settings.width,
            settings.height,
            script.len()
        );
        Self {
            keyboard: KeyboardState::new(),
            canvas: DrawList::new(),
            size: (settings.width, settings.height),
            windowed_size: (settings.width, settings.height),
            fullscreen_size: (settings.fullscreen_size.x, settings.fullscreen_size.y),
            fullscreen: false,
            script,
            next_event: 0,
            presented: 0,
            title: String::new(),
        }
    }

    /// Draw calls of the most recent frame
    pub fn last_frame(&self) -> &DrawList {
        &self.canvas
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Platform for HeadlessPlatform {
    type Canvas = DrawList;

    fn display_size(&self) -> (i32, i32) {
        self.size
    }

    fn keyboard(&self) -> KeyboardState {
        self.keyboard.clone()
    }

    fn poll_events(&mut self, frame: u64) -> Vec<PlatformEvent> {
        let mut events = Vec::new();
        while let Some(scripted) = self.script.get(self.next_event) {
            if scripted.frame > frame {
                break;
            }
            log::debug!("Frame {frame}: {:?}", scripted.action);
            match scripted.action {
                ScriptAction::Press { key } => self.keyboard.press(key),
                ScriptAction::Release { key } => self.keyboard.release(key),
                ScriptAction::Tap { key } => self.keyboard.tap(key),
                ScriptAction::Resize { width, height } => {
                    self.size = (width, height);
                    if !self.fullscreen {
                        self.windowed_size = self.size;
                    }
                    events.push(PlatformEvent::Resized { width, height });
                }
                ScriptAction::Close => events.push(PlatformEvent::CloseRequested),
            }
            self.next_event += 1;
        }
        events
    }

    fn begin_frame(&mut self) {
        self.canvas.clear();
    }

    fn canvas(&mut self) -> &mut DrawList {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        log::trace!("Presented frame with {} draw calls", self.canvas.len());
        Ok(())
    }

    fn toggle_fullscreen(&mut self) -> Option<(i32, i32)> {
        self.fullscreen = !self.fullscreen;
        self.size = if self.fullscreen {
            self.fullscreen_size
        } else {
            self.windowed_size
        };
        log::info!(
            "Fullscreen {}: {}x{}",
            if self.fullscreen { "on" } else { "off" },
            self.size.0,
            self.size.1
        );
        Some(self.size)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = title.to_string();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("Headless platform: {} frames presented", self.presented);
        Ok(())
    }
}
