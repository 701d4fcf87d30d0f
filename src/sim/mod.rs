//! Simulation core
//!
//! All gameplay logic lives here, independent of any display or keyboard:
//! - Entities are plain structs composed from capability traits
//! - Animations are a closed set, bound to one entity each
//! - The scene consumes input through [`crate::InputSource`] and draws
//!   through [`crate::renderer::Renderer`]
//! - Randomness comes from one seeded generator per scene

pub mod animation;
pub mod arena;
pub mod entity;
pub mod hud;
pub mod scene;

pub use animation::{Animation, AnimationId, AnimationKind, AnimationSet, AnimationTarget, Channel};
pub use arena::{Arena, Rect};
pub use entity::{
    Ball, Body, EntityId, HasAnimations, HasBody, HasColor, HasPosition, HasVelocity, Pad,
};
pub use hud::Hud;
pub use scene::{EndReason, FullscreenCallback, Scene, ScenePhase, World};
