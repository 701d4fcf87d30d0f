//! Status text panel

use super::arena::Rect;
use crate::consts::*;
use crate::renderer::Renderer;

/// A short status message drawn in a panel at the top-right of the arena
#[derive(Debug, Clone)]
pub struct Hud {
    text: String,
    /// Unknown until the first reshape
    panel: Option<Rect>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            text: HELP_TEXT.to_string(),
            panel: None,
        }
    }

    pub fn reshape(&mut self, width: i32, _height: i32) {
        self.panel = Some(Rect::new(
            width - HUD_PANEL_LEFT_INSET,
            HUD_PANEL_TOP,
            HUD_PANEL_LEFT_INSET - HUD_PANEL_RIGHT_INSET,
            HUD_PANEL_HEIGHT,
        ));
    }

    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            log::debug!("Hud: {:?}", text);
            self.text = text.to_string();
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn panel(&self) -> Option<Rect> {
        self.panel
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let Some(panel) = self.panel else {
            return;
        };
        renderer.fill_rect(panel, HUD_BACKGROUND);
        renderer.draw_text(panel, &self.text, HUD_TEXT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};

    #[test]
    fn test_panel_tracks_width() {
        let mut hud = Hud::new();
        assert!(hud.panel().is_none());
        hud.reshape(1280, 720);
        assert_eq!(hud.panel(), Some(Rect::new(980, 25, 275, 100)));
        hud.reshape(800, 600);
        assert_eq!(hud.panel().map(|p| p.right()), Some(775));
    }

    #[test]
    fn test_draw_before_reshape_is_noop() {
        let hud = Hud::new();
        let mut list = DrawList::new();
        hud.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_draw_emits_panel_and_text() {
        let mut hud = Hud::new();
        hud.reshape(1280, 720);
        hud.set_text(PAUSED_TEXT);
        let mut list = DrawList::new();
        hud.draw(&mut list);
        assert_eq!(list.len(), 2);
        assert!(matches!(
            &list.commands()[1],
            DrawCommand::Text { text, .. } if text == PAUSED_TEXT
        ));
    }
}
