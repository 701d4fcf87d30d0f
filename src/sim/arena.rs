//! Arena and rectangle geometry
//!
//! Integer pixel coordinates, origin top-left, y grows downward.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Inclusive overlap of the vertical spans (touching edges count)
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top() <= other.bottom() && self.bottom() >= other.top()
    }
}

/// The rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether the far edges of `rect` are still inside the arena.
    ///
    /// The origin never moves on resize, so only the right and bottom edges
    /// can end up outside after the arena shrinks.
    pub fn fits(&self, rect: &Rect) -> bool {
        rect.right() <= self.width && rect.bottom() <= self.height
    }

    /// Clamp a top coordinate so a span of `span` pixels stays inside the
    /// arena vertically. Arenas shorter than the span pin it to the top.
    pub fn clamp_y(&self, y: i32, span: i32) -> i32 {
        let max_y = (self.height - span).max(0);
        y.clamp(0, max_y)
    }

    /// Random top-left position for a rect of `size` that keeps it fully
    /// inside the arena, no further left than `min_x`
    pub fn random_position<R: Rng + ?Sized>(
        &self,
        min_x: i32,
        size: IVec2,
        rng: &mut R,
    ) -> IVec2 {
        let max_x = (self.width - size.x).max(0);
        let max_y = (self.height - size.y).max(0);
        let x = rng.random_range(min_x.min(max_x)..=max_x);
        let y = rng.random_range(0..=max_y);
        IVec2::new(x, y)
    }
}
