//! Demo mode: plays the pad through the keyboard state
//!
//! Holds Q/A to keep the pad centred on the ball and taps R a while after a
//! round ends, so a run can go on unattended.

use crate::input::{InputSource, Key, KeyboardState};
use crate::sim::{HasAnimations, HasPosition, Scene};

/// Frames to wait after a round ends before restarting, if the miss
/// animations are still running
const RESTART_TIMEOUT_FRAMES: u32 = 180;

#[derive(Debug)]
pub struct Autopilot {
    keyboard: KeyboardState,
    ended_frames: u32,
    restarts: u32,
}

impl Autopilot {
    pub fn new(keyboard: KeyboardState) -> Self {
        Self {
            keyboard,
            ended_frames: 0,
            restarts: 0,
        }
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    fn hold(&self, key: Key, held: bool) {
        if held {
            self.keyboard.press(key);
        } else if self.keyboard.is_held(key) {
            self.keyboard.release(key);
        }
    }

    /// Update held keys for the coming frame
    pub fn steer<I: InputSource>(&mut self, scene: &Scene<I>) {
        let Some(world) = scene.world() else {
            return;
        };

        if scene.is_paused() {
            return;
        }

        if scene.is_ended() {
            self.hold(Key::PAD_UP, false);
            self.hold(Key::PAD_DOWN, false);
            self.ended_frames += 1;
            let settled = world.ball.animations().is_empty();
            if settled || self.ended_frames >= RESTART_TIMEOUT_FRAMES {
                log::info!("Autopilot: restarting");
                self.keyboard.tap(Key::RESTART);
                self.ended_frames = 0;
                self.restarts += 1;
            }
            return;
        }
        self.ended_frames = 0;

        let ball = world.ball.bounds();
        let pad = world.pad.bounds();
        let ball_mid = ball.top() + ball.size.y / 2;
        let pad_mid = pad.top() + pad.size.y / 2;
        let deadzone = scene.tuning().pad_step;

        self.hold(Key::PAD_UP, ball_mid < pad_mid - deadzone);
        self.hold(Key::PAD_DOWN, ball_mid > pad_mid + deadzone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    fn scene(kb: &KeyboardState) -> Scene<KeyboardState> {
        let mut scene = Scene::new(kb.clone(), Tuning::default(), 3);
        scene.set_display_dimensions(1280, 720);
        scene
    }

    #[test]
    fn test_tracks_ball() {
        let kb = KeyboardState::new();
        let mut scene = scene(&kb);
        let mut pilot = Autopilot::new(kb.clone());

        scene.world_mut().unwrap().ball.move_to(600, 50);
        pilot.steer(&scene);
        assert!(kb.is_held(Key::PAD_UP));
        assert!(!kb.is_held(Key::PAD_DOWN));

        scene.world_mut().unwrap().ball.move_to(600, 650);
        pilot.steer(&scene);
        assert!(!kb.is_held(Key::PAD_UP));
        assert!(kb.is_held(Key::PAD_DOWN));
    }

    #[test]
    fn test_restarts_after_timeout() {
        let kb = KeyboardState::new();
        let mut scene = scene(&kb);
        let mut pilot = Autopilot::new(kb.clone());

        // Out of bounds end: no animations, restarts straight away
        scene.world_mut().unwrap().ball.move_to(1000, 300);
        scene.reshape(800, 600);
        assert!(scene.is_ended());
        pilot.steer(&scene);
        assert_eq!(pilot.restarts(), 1);
        assert_eq!(kb.pop_released(), Some(Key::RESTART));
    }
}
