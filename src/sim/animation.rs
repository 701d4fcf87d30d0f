//! Transient visual effects layered over entity physics
//!
//! An animation starts life as an [`AnimationKind`] recipe. Attaching it to an
//! entity binds it to that entity's [`EntityId`] and reads whatever initial
//! state it needs from the target, producing an [`Animation`]. Only bound
//! animations can be updated.
//!
//! Rates are per second and scaled by the frame's `dt`. Tweened colours keep
//! their fractional progress between frames; the colour written to the
//! target is truncated to whole channel values.

use glam::IVec2;

use super::arena::Arena;
use super::entity::{EntityId, HasColor, HasPosition, HasVelocity};
use crate::Color;
use crate::consts::{BOUNCE_OFF_GRAVITY, BOUNCE_OFF_LIFT};

/// Anything an animation can drive
pub trait AnimationTarget: HasVelocity + HasColor {}

impl<T: HasVelocity + HasColor + ?Sized> AnimationTarget for T {}

/// Identifies an animation within its owner's [`AnimationSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u32);

/// Which target attribute an animation writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Color,
    Velocity,
}

/// Unbound animation recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Drive the colour from `from` to black, `rate` channel units per second
    FadeOut { from: Color, rate: f32 },
    /// Start at `color` and return to the target's own colour
    Flash { color: Color, rate: f32 },
    /// Kick a missed ball back up and let it fall out of the arena
    BallBounceOff,
}

impl AnimationKind {
    pub fn fade_out(from: Color, rate: f32) -> Self {
        AnimationKind::FadeOut { from, rate }
    }

    pub fn flash(color: Color, rate: f32) -> Self {
        AnimationKind::Flash { color, rate }
    }

    pub fn ball_bounce_off() -> Self {
        AnimationKind::BallBounceOff
    }

    pub fn channel(&self) -> Channel {
        match self {
            AnimationKind::FadeOut { .. } | AnimationKind::Flash { .. } => Channel::Color,
            AnimationKind::BallBounceOff => Channel::Velocity,
        }
    }

    /// Bind to `target`. Flash and BallBounceOff capture target state here.
    ///
    /// `restore` overrides the colour a Flash returns to.
    fn bind<T: AnimationTarget + ?Sized>(
        self,
        id: AnimationId,
        target_id: EntityId,
        target: &mut T,
        restore: Option<Color>,
    ) -> Animation {
        let effect = match self {
            AnimationKind::FadeOut { from, rate } => Effect::FadeOut {
                channels: from.to_array_f32(),
                rate,
            },
            AnimationKind::Flash { color, rate } => {
                let restore = restore.unwrap_or_else(|| target.color());
                target.set_color(color);
                Effect::Flash {
                    channels: color.to_array_f32(),
                    rate,
                    restore,
                }
            }
            AnimationKind::BallBounceOff => {
                let speed_x = -target.speed().x;
                target.set_speed(IVec2::new(speed_x, BOUNCE_OFF_LIFT));
                Effect::BallBounceOff {
                    speed_x,
                    speed_y: BOUNCE_OFF_LIFT as f32,
                }
            }
        };

        Animation {
            id,
            kind: self,
            target: target_id,
            effect,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Effect {
    FadeOut {
        channels: [f32; 3],
        rate: f32,
    },
    Flash {
        channels: [f32; 3],
        rate: f32,
        restore: Color,
    },
    BallBounceOff {
        speed_x: i32,
        speed_y: f32,
    },
}

/// An animation bound to exactly one target entity
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    id: AnimationId,
    kind: AnimationKind,
    target: EntityId,
    effect: Effect,
}

impl Animation {
    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    /// Handle of the entity this animation drives
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Colour a Flash will come back to
    pub fn restore_color(&self) -> Option<Color> {
        match self.effect {
            Effect::Flash { restore, .. } => Some(restore),
            _ => None,
        }
    }

    /// Advance by `dt` seconds and write the result to the target
    pub fn update<T: AnimationTarget + ?Sized>(&mut self, dt: f32, target: &mut T) {
        match &mut self.effect {
            Effect::FadeOut { channels, rate } => {
                let step = *rate * dt;
                for c in channels.iter_mut() {
                    *c = (*c - step).max(0.0);
                }
                target.set_color(Color::from_array_f32(*channels));
            }
            Effect::Flash {
                channels,
                rate,
                restore,
            } => {
                let step = *rate * dt;
                for (c, goal) in channels.iter_mut().zip(restore.to_array_f32()) {
                    *c = if *c < goal {
                        (*c + step).min(goal)
                    } else {
                        (*c - step).max(goal)
                    };
                }
                target.set_color(Color::from_array_f32(*channels));
            }
            Effect::BallBounceOff { speed_x, speed_y } => {
                *speed_y += BOUNCE_OFF_GRAVITY * dt;
                target.set_speed(IVec2::new(*speed_x, *speed_y as i32));
            }
        }
    }

    /// Pure completion check
    pub fn is_finished<T: HasPosition + ?Sized>(&self, target: &T, arena: &Arena) -> bool {
        match &self.effect {
            Effect::FadeOut { channels, .. } => Color::from_array_f32(*channels).is_black(),
            Effect::Flash {
                channels, restore, ..
            } => Color::from_array_f32(*channels) == *restore,
            Effect::BallBounceOff { .. } => target.position().y >= arena.height,
        }
    }
}

/// Ordered list of the animations running on one entity.
///
/// Insertion order is update order: when two animations write the same
/// attribute in a frame, the later one wins.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    owner: EntityId,
    active: Vec<Animation>,
    next_id: u32,
}

impl AnimationSet {
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            active: Vec::new(),
            next_id: 0,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Bind `kind` to `target` and append it
    pub fn attach<T: AnimationTarget + ?Sized>(
        &mut self,
        kind: AnimationKind,
        target: &mut T,
    ) -> AnimationId {
        // A flash landing on a flash returns to the original colour, not the
        // mid-flash one
        let restore = match kind {
            AnimationKind::Flash { .. } => self.active.iter().find_map(Animation::restore_color),
            _ => None,
        };

        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let animation = kind.bind(id, self.owner, target, restore);
        log::debug!("{:?}: attached {:?}", self.owner, animation.kind);
        self.active.push(animation);
        id
    }

    /// Remove one animation, returns whether it was present
    pub fn remove(&mut self, id: AnimationId) -> bool {
        let before = self.active.len();
        self.active.retain(|a| a.id != id);
        self.active.len() != before
    }

    pub fn clear(&mut self) {
        if !self.active.is_empty() {
            log::debug!("{:?}: clearing {} animations", self.owner, self.active.len());
        }
        self.active.clear();
    }

    /// Update every animation once, dropping those that finished
    pub fn advance<T: AnimationTarget + ?Sized>(&mut self, dt: f32, target: &mut T, arena: &Arena) {
        let owner = self.owner;
        self.active.retain_mut(|animation| {
            debug_assert_eq!(animation.target, owner);
            animation.update(dt, target);
            let finished = animation.is_finished(target, arena);
            if finished {
                log::debug!("{:?}: {:?} finished", owner, animation.kind);
            }
            !finished
        });
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.active.iter()
    }

    /// Whether any running animation writes `channel`
    pub fn drives(&self, channel: Channel) -> bool {
        self.active.iter().any(|a| a.kind.channel() == channel)
    }
}
