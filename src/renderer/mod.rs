//! Draw-call sinks
//!
//! The simulation issues immediate-mode draw calls against [`Renderer`]. The
//! headless backend records them into a [`DrawList`], the terminal backend
//! rasterises them onto a character grid.

pub mod terminal;

pub use terminal::TerminalCanvas;

use crate::Color;
use crate::sim::Rect;

/// Receives the draw calls of one frame, in arena pixel coordinates
pub trait Renderer {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Text laid out inside `panel`, one line per `\n`
    fn draw_text(&mut self, panel: Rect, text: &str, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Text { panel: Rect, text: String, color: Color },
}

/// Records draw calls for inspection
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Rectangles drawn this frame, in call order
    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, color } => Some((rect, color)),
            DrawCommand::Text { .. } => None,
        })
    }

    /// Last text drawn this frame
    pub fn text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
    }
}

impl Renderer for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(&mut self, panel: Rect, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            panel,
            text: text.to_string(),
            color,
        });
    }
}
