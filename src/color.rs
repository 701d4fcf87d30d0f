//! RGB colour value type

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit per channel RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats, for tweening
    pub fn to_array_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Build from float channels, clamping to 0..=255 and truncating
    pub fn from_array_f32(channels: [f32; 3]) -> Self {
        let [r, g, b] = channels.map(|c| c.clamp(0.0, 255.0) as u8);
        Self { r, g, b }
    }

    pub fn is_black(self) -> bool {
        self == Color::BLACK
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
    }

    #[test]
    fn test_from_f32_clamps_and_truncates() {
        let c = Color::from_array_f32([-4.0, 127.9, 300.0]);
        assert_eq!(c, Color::new(0, 127, 255));
    }
}
