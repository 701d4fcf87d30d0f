//! Single-pad scene: per-frame input, movement, collisions and round state
//!
//! One frame, in order:
//! 1. take at most one released key (pause / fullscreen / restart)
//! 2. move the pad from held keys, clamp it to the arena
//! 3. advance ball and pad animations, step the ball
//! 4. issue draw calls
//! 5. resolve collisions on the post-move positions
//!
//! While paused only steps 1 and 4 run. Collisions are checked after the
//! draw, so the frame that shows an overlap is the one before it resolves.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::AnimationKind;
use super::arena::{Arena, Rect};
use super::entity::{Ball, HasAnimations, HasColor, HasPosition, HasVelocity, Pad};
use super::hud::Hud;
use crate::consts::*;
use crate::input::{InputSource, Key};
use crate::renderer::Renderer;
use crate::settings::Tuning;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The ball got past the pad
    Miss,
    /// A resize left the ball outside the arena
    OutOfBounds,
}

impl EndReason {
    pub fn message(self) -> &'static str {
        match self {
            EndReason::Miss => GAME_OVER_TEXT,
            EndReason::OutOfBounds => OUT_OF_BOUNDS_TEXT,
        }
    }
}

/// Observable scene state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Playing,
    Paused,
    Ended,
}

/// Entities and the arena they live in. Exists once display dimensions are known.
#[derive(Debug, Clone)]
pub struct World {
    pub arena: Arena,
    pub ball: Ball,
    pub pad: Pad,
}

pub type FullscreenCallback = Box<dyn FnMut()>;

pub struct Scene<I: InputSource> {
    input: I,
    tuning: Tuning,
    /// One generator for the scene's whole lifetime
    rng: Pcg32,
    world: Option<World>,
    paused: bool,
    ended: Option<EndReason>,
    hud: Hud,
    fullscreen_callback: Option<FullscreenCallback>,
}

impl<I: InputSource> Scene<I> {
    pub fn new(input: I, tuning: Tuning, seed: u64) -> Self {
        log::info!("Scene: created (seed {seed})");
        Self {
            input,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            world: None,
            paused: false,
            ended: None,
            hud: Hud::new(),
            fullscreen_callback: None,
        }
    }

    pub fn set_fullscreen_callback(&mut self, callback: impl FnMut() + 'static) {
        self.fullscreen_callback = Some(Box::new(callback));
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_ended(&self) -> bool {
        self.ended.is_some()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.ended
    }

    pub fn phase(&self) -> ScenePhase {
        if self.paused {
            ScenePhase::Paused
        } else if self.ended.is_some() {
            ScenePhase::Ended
        } else {
            ScenePhase::Playing
        }
    }

    pub fn status_text(&self) -> &str {
        self.hud.text()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        log::info!("Scene: paused");
        self.paused = true;
        self.refresh_hud();
    }

    pub fn unpause(&mut self) {
        if !self.paused {
            return;
        }
        log::info!("Scene: unpaused");
        self.paused = false;
        self.refresh_hud();
    }

    fn refresh_hud(&mut self) {
        let text = if self.paused {
            PAUSED_TEXT
        } else if let Some(reason) = self.ended {
            reason.message()
        } else {
            HELP_TEXT
        };
        self.hud.set_text(text);
    }

    /// Build the ball and pad for an arena of the given size
    pub fn set_display_dimensions(&mut self, width: i32, height: i32) {
        log::info!("Scene: display dimensions {width}x{height}");
        let arena = Arena::new(width, height);
        let t = &self.tuning;

        let ball_pos = arena.random_position(t.ball_spawn_min_x, t.ball_size, &mut self.rng);
        let ball = Ball::new(
            Rect::new(ball_pos.x, ball_pos.y, t.ball_size.x, t.ball_size.y),
            t.ball_speed,
            BALL_COLOR,
        );
        let pad = Pad::new(
            Rect::new(t.pad_x, height / 2 - t.pad_size.y / 2, t.pad_size.x, t.pad_size.y),
            PAD_COLOR,
        );

        self.world = Some(World { arena, ball, pad });
        self.hud.reshape(width, height);
    }

    /// Start a new round after the previous one ended
    pub fn restart(&mut self) {
        let Some(world) = self.world.as_mut() else {
            log::warn!("Scene: restart before display dimensions, ignored");
            return;
        };
        let pos = world
            .arena
            .random_position(
                self.tuning.ball_spawn_min_x,
                self.tuning.ball_size,
                &mut self.rng,
            );
        world.ball.reset(pos, self.tuning.ball_speed, BALL_COLOR);
        self.ended = None;
        log::info!("Scene: restarting, ball at ({}, {})", pos.x, pos.y);
        self.refresh_hud();
    }

    /// The arena changed size
    pub fn reshape(&mut self, width: i32, height: i32) {
        log::info!("Scene: reshape to {width}x{height}");
        self.hud.reshape(width, height);
        let Some(world) = self.world.as_mut() else {
            log::warn!("Scene: reshape before display dimensions, ignored");
            return;
        };
        world.arena = Arena::new(width, height);
        let ball_fits = world.arena.fits(&world.ball.bounds());
        world.pad.clamp_to(&world.arena);

        if !ball_fits {
            self.end_round(EndReason::OutOfBounds);
        }
    }

    /// Advance one frame of `dt` seconds and draw it
    pub fn update<R: Renderer + ?Sized>(&mut self, dt: f32, renderer: &mut R) {
        if self.world.is_none() {
            log::warn!("Scene: frame before display dimensions, skipped");
            return;
        }

        match self.input.pop_released() {
            Some(Key::PAUSE) => {
                if self.paused {
                    self.unpause();
                } else {
                    self.pause();
                }
            }
            Some(Key::FULLSCREEN) => {
                if let Some(callback) = self.fullscreen_callback.as_mut() {
                    callback();
                }
            }
            Some(Key::RESTART) if self.is_ended() => self.restart(),
            _ => {}
        }

        let pad_move = if self.paused || self.is_ended() {
            0
        } else {
            self.steer_pad()
        };

        let paused = self.paused;
        let Some(world) = self.world.as_mut() else {
            return;
        };
        world.pad.clamp_to(&world.arena);

        if !paused {
            world.ball.update(dt, &world.arena);
            world.pad.update(dt, &world.arena);
        }

        renderer.fill_rect(world.ball.bounds(), world.ball.color());
        renderer.fill_rect(world.pad.bounds(), world.pad.color());
        self.hud.draw(renderer);

        if !paused {
            self.resolve_collisions(pad_move);
        }
    }

    /// Move the pad from held keys. Returns -1 (up), 0 or 1 (down).
    fn steer_pad(&mut self) -> i32 {
        let step = self.tuning.pad_step;
        let Some(world) = self.world.as_mut() else {
            return 0;
        };

        let mut pad_move = 0;
        if self.input.is_held(Key::PAD_DOWN) {
            world.pad.move_by(0, step);
            pad_move = 1;
        }
        if self.input.is_held(Key::PAD_UP) {
            world.pad.move_by(0, -step);
            pad_move = -1;
        }
        pad_move
    }

    fn resolve_collisions(&mut self, pad_move: i32) {
        if self.pad_contact(pad_move) {
            self.end_round(EndReason::Miss);
        }
        self.wall_bounces();
    }

    /// Ball against the pad column. Returns true on a miss.
    fn pad_contact(&mut self, pad_move: i32) -> bool {
        let ended = self.is_ended();
        let t = &self.tuning;
        let Some(world) = self.world.as_mut() else {
            return false;
        };

        let ball = world.ball.bounds();
        let pad = world.pad.bounds();
        if ball.left() > pad.right() {
            return false;
        }

        if ball.overlaps_vertically(&pad) {
            // Only a ball heading into the pad bounces, otherwise a ball deep
            // in the column would flip back and forth
            if world.ball.speed().x < 0 {
                world.ball.bounce_x(pad_move);
                world.ball.increase_speed();
                world
                    .pad
                    .add_animation(AnimationKind::flash(PAD_FLASH_COLOR, t.pad_flash_rate));
                if pad_move != 0 {
                    world
                        .ball
                        .add_animation(AnimationKind::flash(BALL_FLASH_COLOR, t.ball_flash_rate));
                }
                let speed = world.ball.speed();
                log::debug!("Scene: pad contact, ball speed ({}, {})", speed.x, speed.y);
            }
            false
        } else {
            ball.left() <= 0 && !ended
        }
    }

    /// Right, top and bottom walls. Inactive once the round has ended.
    ///
    /// A wall only turns a ball heading into it, so a ball straddling a wall
    /// leaves it instead of flipping every frame.
    fn wall_bounces(&mut self) {
        if self.is_ended() {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };

        let ball = world.ball.bounds();
        let speed = world.ball.speed();
        if ball.right() > world.arena.width && speed.x > 0 {
            world.ball.bounce_x(0);
        }
        if (ball.top() < 0 && speed.y < 0) || (ball.bottom() > world.arena.height && speed.y > 0) {
            world.ball.bounce_y();
        }
    }

    fn end_round(&mut self, reason: EndReason) {
        if self.ended.is_some() {
            return;
        }
        let fade_rate = self.tuning.fade_out_rate;
        let Some(world) = self.world.as_mut() else {
            return;
        };

        log::info!("Scene: round ended ({reason:?})");
        if reason == EndReason::Miss {
            world.ball.clear_animations();
            world
                .ball
                .add_animation(AnimationKind::fade_out(MISS_FADE_COLOR, fade_rate));
            world.ball.add_animation(AnimationKind::ball_bounce_off());
        }
        self.ended = Some(reason);
        self.refresh_hud();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyboardState;
    use crate::renderer::DrawList;
    use crate::sim::animation::Channel;
    use glam::IVec2;
    use std::cell::Cell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> (Scene<KeyboardState>, KeyboardState) {
        let kb = KeyboardState::new();
        let mut scene = Scene::new(kb.clone(), Tuning::default(), 42);
        scene.set_display_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        (scene, kb)
    }

    fn place(scene: &mut Scene<KeyboardState>, ball: (i32, i32), speed: (i32, i32), pad_y: i32) {
        let world = scene.world_mut().unwrap();
        world.ball.move_to(ball.0, ball.1);
        world.ball.set_speed(IVec2::new(speed.0, speed.1));
        world.pad.move_to(PAD_X, pad_y);
    }

    fn frame(scene: &mut Scene<KeyboardState>) -> DrawList {
        let mut list = DrawList::new();
        scene.update(DT, &mut list);
        list
    }

    #[test]
    fn test_new_scene_has_no_world() {
        let scene = Scene::new(KeyboardState::new(), Tuning::default(), 1);
        assert!(scene.world().is_none());
        assert_eq!(scene.phase(), ScenePhase::Playing);
        assert_eq!(scene.status_text(), HELP_TEXT);
    }

    #[test]
    fn test_update_before_dimensions_is_skipped() {
        let mut scene = Scene::new(KeyboardState::new(), Tuning::default(), 1);
        let mut list = DrawList::new();
        scene.update(DT, &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_set_display_dimensions_places_entities() {
        let (scene, _) = scene();
        let world = scene.world().unwrap();
        assert_eq!(world.pad.bounds(), Rect::new(PAD_X, 310, PAD_WIDTH, PAD_HEIGHT));
        let ball = world.ball.position();
        assert!((BALL_SPAWN_MIN_X..=DEFAULT_WIDTH - BALL_WIDTH).contains(&ball.x));
        assert!((0..=DEFAULT_HEIGHT - BALL_HEIGHT).contains(&ball.y));
        assert!(world.arena.fits(&world.ball.bounds()));
        assert_eq!(world.ball.speed(), IVec2::new(BALL_SPEED_X, BALL_SPEED_Y));
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let (a, _) = scene();
        let (b, _) = scene();
        assert_eq!(
            a.world().unwrap().ball.position(),
            b.world().unwrap().ball.position()
        );
    }

    #[test]
    fn test_frame_draws_ball_pad_and_hud() {
        let (mut scene, _) = scene();
        place(&mut scene, (600, 300), (3, 3), 310);
        let list = frame(&mut scene);
        let rects: Vec<_> = list.rects().map(|(r, _)| *r).collect();
        assert_eq!(rects[0], Rect::new(603, 303, BALL_WIDTH, BALL_HEIGHT));
        assert_eq!(rects[1], Rect::new(PAD_X, 310, PAD_WIDTH, PAD_HEIGHT));
        assert_eq!(list.text(), Some(HELP_TEXT));
    }

    #[test]
    fn test_pause_toggle_freezes_ball() {
        let (mut scene, kb) = scene();
        place(&mut scene, (600, 300), (3, 3), 310);

        kb.tap(Key::PAUSE);
        frame(&mut scene);
        assert_eq!(scene.phase(), ScenePhase::Paused);
        assert_eq!(scene.status_text(), PAUSED_TEXT);
        assert_eq!(scene.world().unwrap().ball.position(), IVec2::new(600, 300));

        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.position(), IVec2::new(600, 300));

        kb.tap(Key::PAUSE);
        frame(&mut scene);
        assert_eq!(scene.phase(), ScenePhase::Playing);
        assert_eq!(scene.status_text(), HELP_TEXT);
        assert_eq!(scene.world().unwrap().ball.position(), IVec2::new(603, 303));
    }

    #[test]
    fn test_paused_pad_ignores_held_keys() {
        let (mut scene, kb) = scene();
        place(&mut scene, (600, 300), (3, 3), 310);
        scene.pause();
        kb.press(Key::PAD_DOWN);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().pad.position().y, 310);
    }

    #[test]
    fn test_held_keys_move_pad() {
        let (mut scene, kb) = scene();
        place(&mut scene, (600, 300), (3, 3), 310);
        kb.press(Key::PAD_DOWN);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().pad.position().y, 310 + PAD_STEP);
        kb.release(Key::PAD_DOWN);
        kb.press(Key::PAD_UP);
        frame(&mut scene);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().pad.position().y, 310 - PAD_STEP);
    }

    #[test]
    fn test_pad_clamped_at_edges() {
        let (mut scene, kb) = scene();
        place(&mut scene, (600, 300), (3, 3), 2);
        kb.press(Key::PAD_UP);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().pad.position().y, 0);

        place(&mut scene, (600, 300), (3, 3), DEFAULT_HEIGHT - PAD_HEIGHT - 2);
        kb.release(Key::PAD_UP);
        kb.press(Key::PAD_DOWN);
        frame(&mut scene);
        assert_eq!(
            scene.world().unwrap().pad.position().y,
            DEFAULT_HEIGHT - PAD_HEIGHT
        );
    }

    #[test]
    fn test_fullscreen_key_invokes_callback() {
        let (mut scene, kb) = scene();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        scene.set_fullscreen_callback(move || seen.set(seen.get() + 1));
        kb.tap(Key::FULLSCREEN);
        frame(&mut scene);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_one_discrete_key_per_frame() {
        let (mut scene, kb) = scene();
        kb.tap(Key::PAUSE);
        kb.tap(Key::PAUSE);
        frame(&mut scene);
        assert!(scene.is_paused());
        frame(&mut scene);
        assert!(!scene.is_paused());
    }

    #[test]
    fn test_pad_contact_flips_and_speeds_up() {
        let (mut scene, _) = scene();
        // One step from (18, 300) lands the ball's left edge on the pad's right edge
        place(&mut scene, (18, 300), (-3, 3), 310);
        frame(&mut scene);
        let world = scene.world().unwrap();
        assert_eq!(world.ball.speed(), IVec2::new(4, 4));
        assert_eq!(world.pad.animations().len(), 1);
        assert_eq!(world.pad.color(), PAD_FLASH_COLOR);
        // Pad was still, no ball flash
        assert!(world.ball.animations().is_empty());
        assert!(!scene.is_ended());
    }

    #[test]
    fn test_moving_pad_adds_english_and_ball_flash() {
        let (mut scene, kb) = scene();
        place(&mut scene, (18, 300), (-3, 3), 310);
        kb.press(Key::PAD_DOWN);
        frame(&mut scene);
        let world = scene.world().unwrap();
        // bounce: (3, 3 + 1), then +1 magnitude each
        assert_eq!(world.ball.speed(), IVec2::new(4, 5));
        assert_eq!(world.ball.color(), BALL_FLASH_COLOR);
        assert!(world.ball.animations().drives(Channel::Color));
    }

    #[test]
    fn test_ball_leaving_pad_column_does_not_bounce_again() {
        let (mut scene, _) = scene();
        place(&mut scene, (5, 300), (3, 3), 310);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(3, 3));
    }

    #[test]
    fn test_miss_ends_round_once() {
        let (mut scene, _) = scene();
        place(&mut scene, (2, 600), (-3, 3), 100);
        frame(&mut scene);
        assert_eq!(scene.end_reason(), Some(EndReason::Miss));
        assert_eq!(scene.status_text(), GAME_OVER_TEXT);

        let world = scene.world().unwrap();
        assert_eq!(world.ball.animations().len(), 2);
        assert!(world.ball.animations().drives(Channel::Color));
        assert!(world.ball.animations().drives(Channel::Velocity));
        // Bounce-off reversed x and kicked the ball up
        assert_eq!(world.ball.speed(), IVec2::new(3, BOUNCE_OFF_LIFT));

        // Still left of the wall: no second attachment
        scene.world_mut().unwrap().ball.move_to(-20, 600);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.animations().len(), 2);
        assert_eq!(scene.end_reason(), Some(EndReason::Miss));
    }

    #[test]
    fn test_ended_pad_ignores_keys() {
        let (mut scene, kb) = scene();
        place(&mut scene, (2, 600), (-3, 3), 100);
        frame(&mut scene);
        assert!(scene.is_ended());
        kb.press(Key::PAD_DOWN);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().pad.position().y, 100);
    }

    #[test]
    fn test_right_wall_bounce() {
        let (mut scene, _) = scene();
        place(&mut scene, (DEFAULT_WIDTH - BALL_WIDTH - 1, 300), (3, 3), 310);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(-3, 3));
    }

    #[test]
    fn test_top_and_bottom_wall_bounce() {
        let (mut scene, _) = scene();
        place(&mut scene, (600, 1), (3, -3), 310);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(3, 3));

        place(&mut scene, (600, DEFAULT_HEIGHT - BALL_HEIGHT - 1), (3, 3), 310);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(3, -3));
    }

    #[test]
    fn test_ball_past_right_wall_comes_back() {
        let (mut scene, _) = scene();
        place(&mut scene, (DEFAULT_WIDTH, 300), (3, 3), 310);
        for _ in 0..20 {
            frame(&mut scene);
        }
        let world = scene.world().unwrap();
        assert!(world.ball.speed().x < 0);
        assert!(world.ball.bounds().right() <= DEFAULT_WIDTH);
        assert!(!scene.is_ended());
    }

    #[test]
    fn test_ball_past_floor_comes_back() {
        let (mut scene, _) = scene();
        place(&mut scene, (600, DEFAULT_HEIGHT), (3, 3), 310);
        for _ in 0..20 {
            frame(&mut scene);
        }
        let world = scene.world().unwrap();
        assert!(world.ball.speed().y < 0);
        assert!(world.ball.bounds().bottom() <= DEFAULT_HEIGHT);
    }

    #[test]
    fn test_ball_leaving_wall_is_not_turned_back() {
        let (mut scene, _) = scene();
        // Straddling the ceiling but already heading down
        place(&mut scene, (600, -10), (3, 3), 310);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(3, 3));

        // Straddling the right wall but already heading left
        place(&mut scene, (DEFAULT_WIDTH - 5, 300), (-3, 3), 310);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(-3, 3));
    }

    #[test]
    fn test_ended_gates_both_vertical_walls() {
        let (mut scene, _) = scene();
        place(&mut scene, (2, 600), (-3, 3), 100);
        frame(&mut scene);
        assert!(scene.is_ended());

        // Ball below the floor while ended: the bounce-off keeps control of
        // vertical speed, the bottom wall does not flip it
        let world = scene.world_mut().unwrap();
        world.ball.clear_animations();
        world.ball.move_to(600, DEFAULT_HEIGHT);
        world.ball.set_speed(IVec2::new(3, 4));
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(3, 4));

        // Same above the ceiling
        let world = scene.world_mut().unwrap();
        world.ball.move_to(600, -50);
        world.ball.set_speed(IVec2::new(3, -4));
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(3, -4));
    }

    #[test]
    fn test_restart_only_when_ended() {
        let (mut scene, kb) = scene();
        place(&mut scene, (600, 300), (7, 7), 310);
        kb.tap(Key::RESTART);
        frame(&mut scene);
        assert_eq!(scene.world().unwrap().ball.speed(), IVec2::new(7, 7));

        place(&mut scene, (2, 600), (-3, 3), 100);
        frame(&mut scene);
        assert!(scene.is_ended());

        kb.tap(Key::RESTART);
        frame(&mut scene);
        assert!(!scene.is_ended());
        assert_eq!(scene.status_text(), HELP_TEXT);
        let world = scene.world().unwrap();
        assert!(world.ball.animations().is_empty());
        assert_eq!(world.ball.color(), BALL_COLOR);
    }

    #[test]
    fn test_resize_out_of_bounds_ends_without_animation() {
        let (mut scene, _) = scene();
        place(&mut scene, (1000, 300), (3, 3), 310);
        scene.reshape(800, 600);
        assert_eq!(scene.end_reason(), Some(EndReason::OutOfBounds));
        assert_eq!(scene.status_text(), OUT_OF_BOUNDS_TEXT);
        assert!(scene.world().unwrap().ball.animations().is_empty());
    }

    #[test]
    fn test_resize_keeping_ball_inside_keeps_playing() {
        let (mut scene, _) = scene();
        place(&mut scene, (300, 300), (3, 3), 310);
        scene.reshape(800, 600);
        assert!(!scene.is_ended());
        assert_eq!(scene.world().unwrap().arena, Arena::new(800, 600));
        assert_eq!(scene.hud().panel().map(|p| p.left()), Some(500));
    }

    #[test]
    fn test_resize_clamps_pad() {
        let (mut scene, _) = scene();
        place(&mut scene, (300, 100), (3, 3), 600);
        scene.reshape(1280, 400);
        assert_eq!(scene.world().unwrap().pad.position().y, 300);
    }

    #[test]
    fn test_resize_after_miss_keeps_miss_message() {
        let (mut scene, _) = scene();
        place(&mut scene, (2, 600), (-3, 3), 100);
        frame(&mut scene);
        scene.reshape(640, 300);
        assert_eq!(scene.end_reason(), Some(EndReason::Miss));
        assert_eq!(scene.status_text(), GAME_OVER_TEXT);
    }

    #[test]
    fn test_unpause_after_end_shows_end_message() {
        let (mut scene, _) = scene();
        place(&mut scene, (1000, 300), (3, 3), 310);
        scene.pause();
        scene.reshape(800, 600);
        assert_eq!(scene.status_text(), PAUSED_TEXT);
        scene.unpause();
        assert_eq!(scene.status_text(), OUT_OF_BOUNDS_TEXT);
    }
}
