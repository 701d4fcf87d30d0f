//! Game entities composed from small capabilities
//!
//! [`Body`] holds the shared state (geometry, speed, colour). Any type that
//! exposes a body through [`HasBody`] picks up [`HasPosition`],
//! [`HasVelocity`] and [`HasColor`]; types that also own an
//! [`AnimationSet`] implement [`HasAnimations`].

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationId, AnimationKind, AnimationSet};
use super::arena::{Arena, Rect};
use crate::Color;

/// Handle naming an entity in the scene's storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Ball,
    Pad,
}

/// Positioned, sized, coloured state shared by every entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: IVec2,
    pub color: Color,
}

impl Body {
    pub fn new(rect: Rect, speed: IVec2, color: Color) -> Self {
        Self { rect, speed, color }
    }
}

pub trait HasBody {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
}

impl HasBody for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

pub trait HasPosition {
    fn position(&self) -> IVec2;
    fn set_position(&mut self, pos: IVec2);
    fn bounds(&self) -> Rect;

    fn move_to(&mut self, x: i32, y: i32) {
        self.set_position(IVec2::new(x, y));
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        let pos = self.position();
        self.set_position(pos + IVec2::new(dx, dy));
    }
}

pub trait HasVelocity: HasPosition {
    fn speed(&self) -> IVec2;
    fn set_speed(&mut self, speed: IVec2);

    /// Apply the speed once. This is a fixed per-tick step, unlike
    /// animations which scale by dt.
    fn step(&mut self) {
        let speed = self.speed();
        self.move_by(speed.x, speed.y);
    }
}

pub trait HasColor {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

impl<T: HasBody + ?Sized> HasPosition for T {
    fn position(&self) -> IVec2 {
        self.body().rect.pos
    }

    fn set_position(&mut self, pos: IVec2) {
        self.body_mut().rect.pos = pos;
    }

    fn bounds(&self) -> Rect {
        self.body().rect
    }
}

impl<T: HasBody + ?Sized> HasVelocity for T {
    fn speed(&self) -> IVec2 {
        self.body().speed
    }

    fn set_speed(&mut self, speed: IVec2) {
        self.body_mut().speed = speed;
    }
}

impl<T: HasBody + ?Sized> HasColor for T {
    fn color(&self) -> Color {
        self.body().color
    }

    fn set_color(&mut self, color: Color) {
        self.body_mut().color = color;
    }
}

/// Entities carrying a list of running animations
pub trait HasAnimations: HasBody {
    fn animations(&self) -> &AnimationSet;
    /// Body and animation list borrowed together, the list drives the body
    fn parts_mut(&mut self) -> (&mut Body, &mut AnimationSet);

    fn add_animation(&mut self, kind: AnimationKind) -> AnimationId {
        let (body, animations) = self.parts_mut();
        animations.attach(kind, body)
    }

    fn remove_animation(&mut self, id: AnimationId) -> bool {
        self.parts_mut().1.remove(id)
    }

    fn clear_animations(&mut self) {
        self.parts_mut().1.clear();
    }

    fn animate(&mut self, dt: f32, arena: &Arena) {
        let (body, animations) = self.parts_mut();
        animations.advance(dt, body, arena);
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
    pub animations: AnimationSet,
}

impl Ball {
    pub fn new(rect: Rect, speed: IVec2, color: Color) -> Self {
        Self {
            body: Body::new(rect, speed, color),
            animations: AnimationSet::new(EntityId::Ball),
        }
    }

    /// Reverse horizontal speed. A non-zero `adjust_y` also nudges the
    /// vertical speed (english from a moving pad).
    pub fn bounce_x(&mut self, adjust_y: i32) {
        self.body.speed.x = -self.body.speed.x;
        if adjust_y != 0 {
            log::debug!("Ball: english {adjust_y:+}");
            self.body.speed.y += adjust_y;
        }
    }

    pub fn bounce_y(&mut self) {
        self.body.speed.y = -self.body.speed.y;
    }

    /// Grow each speed component by one unit of magnitude
    pub fn increase_speed(&mut self) {
        let grow = |v: i32| if v < 0 { v - 1 } else { v + 1 };
        self.body.speed = IVec2::new(grow(self.body.speed.x), grow(self.body.speed.y));
    }

    /// Animations first, then one movement step
    pub fn update(&mut self, dt: f32, arena: &Arena) {
        self.animate(dt, arena);
        self.step();
    }

    /// Put the ball back in play at `pos`
    pub fn reset(&mut self, pos: IVec2, speed: IVec2, color: Color) {
        self.clear_animations();
        self.body.rect.pos = pos;
        self.body.speed = speed;
        self.body.color = color;
    }
}

/// The player's pad. Only moved by input; its speed is left to animations.
#[derive(Debug, Clone)]
pub struct Pad {
    pub body: Body,
    pub animations: AnimationSet,
}

impl Pad {
    pub fn new(rect: Rect, color: Color) -> Self {
        Self {
            body: Body::new(rect, IVec2::ZERO, color),
            animations: AnimationSet::new(EntityId::Pad),
        }
    }

    pub fn update(&mut self, dt: f32, arena: &Arena) {
        self.animate(dt, arena);
    }

    /// Keep the pad inside the arena vertically
    pub fn clamp_to(&mut self, arena: &Arena) {
        let rect = &mut self.body.rect;
        rect.pos.y = arena.clamp_y(rect.pos.y, rect.size.y);
    }
}

macro_rules! impl_animated_entity {
    ($($ty:ty),*) => {$(
        impl HasBody for $ty {
            fn body(&self) -> &Body {
                &self.body
            }

            fn body_mut(&mut self) -> &mut Body {
                &mut self.body
            }
        }

        impl HasAnimations for $ty {
            fn animations(&self) -> &AnimationSet {
                &self.animations
            }

            fn parts_mut(&mut self) -> (&mut Body, &mut AnimationSet) {
                (&mut self.body, &mut self.animations)
            }
        }
    )*};
}

impl_animated_entity!(Ball, Pad);
