//! Session controller: the Idle / Running state machine and the frame loop.
//!
//! A session starts on the start key, runs one simulation step per frame and
//! ends on collision. Ending resets the world, shows the game-over message and
//! arms a timer that swaps in the title message. Starting again cancels that
//! timer so a stale title never covers a fresh session.

pub mod clock;
pub mod pump;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use pump::{FramePump, ScriptedPump};
pub use timer::Delayed;

use crate::game::{update, StepOutcome, Tuning, World};
use crate::input::GameKey;
use crate::render::{draw, Hud, Surface};
use rand::Rng;
use std::io;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// What the host hands the loop between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Key(GameKey),
    /// The surface was recreated and needs repainting.
    Redraw,
    Quit,
}

/// One game's world, HUD and pending title timer.
#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    hud: Hud,
    title_timer: Delayed<&'static str>,
    /// Frames simulated since the session started.
    frame: u64,
    sessions_played: u32,
}

impl Session {
    pub fn new(tuning: Tuning, width: f64, height: f64, now_ms: u64) -> Self {
        Self {
            world: World::new(tuning, width, height, now_ms),
            hud: Hud::new(&tuning),
            title_timer: Delayed::new(),
            frame: 0,
            sessions_played: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn phase(&self) -> Phase {
        if self.world.running {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.world.running
    }

    pub fn title_pending(&self) -> bool {
        self.title_timer.is_pending()
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    /// Paint the initial idle world and show the title.
    pub fn boot<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        draw(&self.world, surface, &mut self.hud);
        self.show_title();
    }

    /// Repaint the current world without simulating.
    pub fn redraw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        draw(&self.world, surface, &mut self.hud);
    }

    /// Dispatch a logical key. Returns whether it did anything.
    pub fn handle_key(&mut self, key: GameKey, now_ms: u64) -> bool {
        match (self.phase(), key) {
            (Phase::Running, GameKey::Flap) => {
                self.flap();
                true
            }
            (Phase::Idle, GameKey::Start) => {
                self.start(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Override the current velocity with the upward impulse.
    pub fn flap(&mut self) {
        self.world.entity.velocity = self.world.tuning.flap_impulse;
    }

    /// Idle -> Running.
    pub fn start(&mut self, now_ms: u64) {
        self.title_timer.cancel();
        self.world.time = now_ms;
        self.world.entity.velocity = self.world.tuning.start_velocity;
        self.world.age = 0;
        self.world.running = true;
        self.hud.message.hide();
        self.frame = 0;
        self.sessions_played += 1;
        info!(session = self.sessions_played, "session started");
    }

    /// Simulate one frame and paint it, unless this variant skips the frame.
    /// Ends the session when the step reports a collision.
    pub fn tick<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R) -> StepOutcome
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let outcome = update(&mut self.world, now_ms, rng);
        let frame = self.frame;
        self.frame += 1;

        let tuning = &self.world.tuning;
        let skip_alternate = tuning.skip_alternate_frames && frame % 2 == 1;
        let skip_crash = outcome.collided && tuning.skip_draw_on_game_over;
        if !skip_alternate && !skip_crash {
            draw(&self.world, surface, &mut self.hud);
        }

        if !self.world.running {
            self.game_over(now_ms);
        }
        outcome
    }

    /// Fire the title timer if it is due.
    pub fn poll_timers(&mut self, now_ms: u64) {
        if let Some(title) = self.title_timer.poll(now_ms) {
            debug!("title timer fired");
            self.hud.message.set_text(title);
            self.hud.message.set_font_scale(1.0);
            self.hud.message.show();
        }
    }

    fn show_title(&mut self) {
        self.hud.message.set_text(self.world.tuning.title);
        self.hud.message.set_font_scale(1.0);
        self.hud.message.show();
    }

    /// Running -> Idle.
    fn game_over(&mut self, now_ms: u64) {
        info!(
            session = self.sessions_played,
            score = self.world.score,
            age_ms = self.world.age,
            frames = self.frame,
            "game over"
        );
        self.world.reset(now_ms);

        let tuning = self.world.tuning;
        self.hud.message.set_text(tuning.game_over);
        self.hud.message.set_font_scale(tuning.game_over_font_scale);
        self.hud.message.show();
        self.title_timer
            .schedule(now_ms + tuning.title_delay_ms, tuning.title);
    }
}

/// Drive `session` until the pump asks to quit.
///
/// Input returned by the pump is applied before the frame it precedes, then
/// timers are polled, then one step runs if a session is in progress.
pub fn run_loop<C, P, S, R>(
    session: &mut Session,
    clock: &C,
    pump: &mut P,
    surface: &mut S,
    rng: &mut R,
) -> io::Result<()>
where
    C: Clock + ?Sized,
    P: FramePump<S>,
    S: Surface,
    R: Rng + ?Sized,
{
    session.boot(surface);
    loop {
        let commands = pump.next_frame(surface, session)?;
        let now = clock.now_ms();
        for command in commands {
            match command {
                Command::Quit => return Ok(()),
                Command::Redraw => session.redraw(surface),
                Command::Key(key) => {
                    session.handle_key(key, now);
                }
            }
        }
        session.poll_timers(now);
        if session.is_running() {
            session.tick(now, surface, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Obstacle, Variant};
    use crate::render::{DrawOp, RecordingSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session(variant: Variant) -> Session {
        let (w, h) = variant.tuning().surface_size(800.0, 600.0);
        Session::new(variant.tuning(), w, h, 0)
    }

    /// Obstacle right on top of the entity with the gap far below it.
    fn blocking_obstacle() -> Obstacle {
        Obstacle {
            position: 90.0,
            offset: 400.0,
            opening: 150.0,
        }
    }

    #[test]
    fn test_boot_shows_title_and_prompt() {
        let mut s = session(Variant::Classic);
        let mut surface = RecordingSurface::new();
        s.boot(&mut surface);
        assert!(s.hud().message.is_visible());
        assert_eq!(s.hud().message.text(), "Annas persönlicher Flappy-Bird-Klon");
        assert!(surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::FillText { text, .. } if text == "Press Enter to start the game.")));
    }

    #[test]
    fn test_start_key_starts_session() {
        let mut s = session(Variant::Classic);
        s.world_mut().age = 999;
        assert!(s.handle_key(GameKey::Start, 500));
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.world().time, 500);
        assert_eq!(s.world().age, 0);
        assert_eq!(s.world().entity.velocity, -0.1);
        assert!(!s.hud().message.is_visible());
    }

    #[test]
    fn test_flap_ignored_while_idle() {
        let mut s = session(Variant::Classic);
        let before = s.world().entity.velocity;
        assert!(!s.handle_key(GameKey::Flap, 0));
        assert_eq!(s.world().entity.velocity, before);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut s = session(Variant::Classic);
        s.handle_key(GameKey::Start, 0);
        s.world_mut().age = 300;
        assert!(!s.handle_key(GameKey::Start, 100));
        assert_eq!(s.world().age, 300);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut s = session(Variant::Classic);
        s.handle_key(GameKey::Start, 0);
        s.world_mut().entity.velocity = 0.9;
        assert!(s.handle_key(GameKey::Flap, 10));
        assert_eq!(s.world().entity.velocity, -0.3);
    }

    #[test]
    fn test_collision_resets_and_shows_game_over() {
        let mut s = session(Variant::Classic);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        s.handle_key(GameKey::Start, 0);
        s.world_mut().score = 5;
        s.world_mut().obstacles.push(blocking_obstacle());

        let outcome = s.tick(16, &mut surface, &mut rng);
        assert!(outcome.collided);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.world().score, 0);
        assert!(s.world().obstacles.is_empty());
        assert_eq!(s.hud().message.text(), "Uups!");
        assert!(s.title_pending());
        // Classic paints the crash frame.
        assert!(!surface.ops().is_empty());
    }

    #[test]
    fn test_title_replaces_game_over_after_delay() {
        let mut s = session(Variant::Classic);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        s.handle_key(GameKey::Start, 0);
        s.world_mut().obstacles.push(blocking_obstacle());
        s.tick(16, &mut surface, &mut rng);

        s.poll_timers(1000);
        assert_eq!(s.hud().message.text(), "Uups!");
        s.poll_timers(1016);
        assert_eq!(s.hud().message.text(), "Annas persönlicher Flappy-Bird-Klon");
        assert!(s.hud().message.is_visible());
    }

    #[test]
    fn test_restart_cancels_pending_title() {
        let mut s = session(Variant::Classic);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        s.handle_key(GameKey::Start, 0);
        s.world_mut().obstacles.push(blocking_obstacle());
        s.tick(16, &mut surface, &mut rng);

        s.handle_key(GameKey::Start, 200);
        s.poll_timers(5000);
        assert!(!s.hud().message.is_visible());
    }

    #[test]
    fn test_arcade_game_over_uses_large_font() {
        let mut s = session(Variant::Arcade);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        s.handle_key(GameKey::Start, 0);
        s.world_mut().obstacles.push(Obstacle {
            position: 110.0,
            offset: 400.0,
            opening: 150.0,
        });
        s.tick(16, &mut surface, &mut rng);
        assert_eq!(s.hud().message.font_scale(), 2.0);

        s.poll_timers(16 + 750);
        assert_eq!(s.hud().message.font_scale(), 1.0);
    }

    #[test]
    fn test_compact_draws_every_other_frame() {
        let mut s = session(Variant::Compact);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        s.handle_key(GameKey::Start, 0);

        let mut surface = RecordingSurface::new();
        let mut drawn = Vec::new();
        for i in 1..=4 {
            s.world_mut().entity.position = 200.0;
            s.tick(i * 16, &mut surface, &mut rng);
            drawn.push(!surface.take().is_empty());
        }
        assert!(surface.ops().is_empty());
        assert_eq!(drawn, vec![true, false, true, false]);
    }

    #[test]
    fn test_compact_skips_crash_frame() {
        let mut s = session(Variant::Compact);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        s.handle_key(GameKey::Start, 0);
        s.world_mut().obstacles.push(Obstacle {
            position: 50.0,
            offset: 400.0,
            opening: 100.0,
        });
        let outcome = s.tick(16, &mut surface, &mut rng);
        assert!(outcome.collided);
        assert!(surface.ops().is_empty());
        assert_eq!(s.hud().message.text(), "Crashed!");
    }
}
