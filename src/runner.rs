//! Headless session driver
//!
//! Plays the part of the browser host: feeds frame deltas to the simulation,
//! pumps the round clock with wall-clock time and projects each frame into
//! draw commands. The native binary and the tests drive sessions through it.

use crate::Viewport;
use crate::config::GameConfig;
use crate::platform::DirectionState;
use crate::renderer::{DrawCommand, cleared, project};
use crate::sim::{ObjectKind, Outcome, Session, SessionEvent, update};

/// Owns a session plus the host-side state around it.
///
/// `frame` and `step` never drain session events. The caller owns draining:
/// events queue up until [`Runner::drain_events`] (or `run_until_end`) takes them.
pub struct Runner {
    pub session: Session,
    pub viewport: Viewport,
    pub input: DirectionState,
    /// Let the built-in autopilot steer instead of `input`
    pub autopilot: bool,
    /// Wall-clock seconds fed through `advance_clock`
    elapsed: f64,
}

impl Runner {
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Self {
        Self {
            session: Session::new(config, viewport, seed),
            viewport,
            input: DirectionState::default(),
            autopilot: false,
            elapsed: 0.0,
        }
    }

    /// Begin a round (ignored while one is running)
    pub fn start(&mut self) -> bool {
        self.session.start(self.viewport)
    }

    /// Stop the round and return the draw list for the blank surface
    pub fn reset(&mut self) -> Vec<DrawCommand> {
        self.session.reset();
        self.input = DirectionState::default();
        cleared(self.viewport.width, self.viewport.height)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Whether the host should keep requesting animation frames
    pub fn wants_frame(&self) -> bool {
        self.session.running
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// One animation frame: update then project.
    ///
    /// Returns `None` once the round is no longer running.
    pub fn frame(&mut self, dt: f32) -> Option<Vec<DrawCommand>> {
        if !self.session.running {
            return None;
        }

        let input = if self.autopilot {
            autopilot_input(&self.session)
        } else {
            self.input
        };
        update(&mut self.session, &input.to_tick_input(), dt, self.viewport);

        Some(project(&self.session, self.viewport.width, self.viewport.height))
    }

    /// Feed wall-clock seconds to the round clock
    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt as f64;
        self.session.advance_countdown(dt);
    }

    /// Frame plus clock for the same delta
    pub fn step(&mut self, dt: f32) -> Option<Vec<DrawCommand>> {
        let commands = self.frame(dt);
        self.advance_clock(dt);
        commands
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.session.drain_events()
    }

    /// Step with a fixed delta until the round ends or `limit` seconds pass
    pub fn run_until_end(&mut self, dt: f32, limit: f64) -> Option<Outcome> {
        let deadline = self.elapsed + limit;
        while self.elapsed < deadline {
            self.step(dt);
            for event in self.drain_events() {
                if let SessionEvent::Ended(outcome) = event {
                    return Some(outcome);
                }
            }
        }
        log::warn!("Round still running after {limit}s");
        None
    }
}

/// Demo steering: chase the lowest banana, otherwise hold still
pub fn autopilot_input(session: &Session) -> DirectionState {
    let basket = &session.basket;
    let center = basket.pos.x + basket.width / 2.0;

    let target = session
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Good && o.pos.y + o.size < basket.pos.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|o| o.pos.x + o.size / 2.0);

    match target {
        // Dead zone of one step avoids jittering around the target
        Some(x) if x < center - basket.speed => DirectionState {
            left: true,
            right: false,
        },
        Some(x) if x > center + basket.speed => DirectionState {
            left: false,
            right: true,
        },
        _ => DirectionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FallingObject, TickInput};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_config() -> GameConfig {
        GameConfig {
            initial_burst: 0,
            spawn_interval: 1000.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_idle_runner_draws_nothing() {
        let mut runner = Runner::new(GameConfig::default(), Viewport::default(), 1);
        assert!(!runner.wants_frame());
        assert!(runner.frame(DT).is_none());
    }

    #[test]
    fn test_time_runs_out_without_reaching_goal() {
        let mut runner = Runner::new(quiet_config(), Viewport::default(), 1);
        runner.start();

        let outcome = runner.run_until_end(DT, 40.0).expect("round should end");
        assert_eq!(outcome, Outcome { won: false, score: 0 });
        assert!(runner.elapsed() >= 30.0);
        assert!(runner.elapsed() < 30.5);
        assert!(!runner.wants_frame());
        assert!(!runner.session.countdown().is_active());
    }

    #[test]
    fn test_frame_projects_state() {
        let mut runner = Runner::new(quiet_config(), Viewport::default(), 2);
        runner.start();
        runner.session.objects.push(FallingObject {
            id: 999,
            pos: Vec2::new(10.0, 10.0),
            size: 20.0,
            fall_speed: 2.0,
            kind: ObjectKind::Bad,
        });

        let commands = runner.frame(DT).expect("running session draws");
        assert!(
            commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Circle { .. }))
        );
    }

    #[test]
    fn test_reset_stops_frames_and_clears() {
        let mut runner = Runner::new(GameConfig::default(), Viewport::default(), 3);
        runner.start();
        runner.input.left = true;
        runner.step(DT);

        let commands = runner.reset();
        assert_eq!(commands.len(), 1);
        assert!(!runner.wants_frame());
        assert_eq!(runner.input, DirectionState::default());

        // Clock keeps ticking on the host side but the round clock is cancelled
        runner.advance_clock(5.0);
        assert_eq!(runner.session.time_remaining, 30);
    }

    #[test]
    fn test_long_frame_spawns_once() {
        let config = GameConfig {
            initial_burst: 0,
            double_spawn_chance: 0.0,
            ..GameConfig::default()
        };
        let mut runner = Runner::new(config, Viewport::default(), 4);
        runner.start();

        // A stalled tab resumes with a multi-second delta
        runner.frame(3.0);
        assert_eq!(runner.session.objects.len(), 1);
    }

    #[test]
    fn test_low_frame_rate_keeps_spawn_cadence() {
        let config = GameConfig {
            initial_burst: 0,
            double_spawn_chance: 0.0,
            ..GameConfig::default()
        };
        let mut runner = Runner::new(config.clone(), Viewport::default(), 6);
        let mut direct = Session::new(config, Viewport::default(), 6);
        runner.start();
        direct.start(Viewport::default());

        // 8 fps for 6 seconds; remove objects as they appear so none leave or get caught
        let mut from_runner = 0;
        let mut from_update = 0;
        for _ in 0..48 {
            runner.frame(0.125);
            from_runner += runner.session.objects.len();
            runner.session.objects.clear();

            update(&mut direct, &TickInput::default(), 0.125, Viewport::default());
            from_update += direct.objects.len();
            direct.objects.clear();
        }
        assert_eq!(from_runner, from_update);
        assert_eq!(from_runner, 9);
    }

    #[test]
    fn test_events_queue_until_drained() {
        let mut runner = Runner::new(quiet_config(), Viewport::default(), 7);
        runner.start();
        for _ in 0..120 {
            runner.step(DT);
        }

        // Started, score, time, then one TimeChanged per elapsed second
        let events = runner.drain_events();
        assert_eq!(events[0], SessionEvent::Started);
        let ticks = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::TimeChanged(_)))
            .count();
        assert!(ticks >= 2);
        assert!(runner.drain_events().is_empty());

        runner.step(DT);
        assert!(runner.drain_events().len() <= 1);
    }

    #[test]
    fn test_autopilot_steers_toward_banana() {
        let mut session = Session::with_seed(Viewport::default(), 5);
        session.objects.push(FallingObject {
            id: 1,
            pos: Vec2::new(50.0, 100.0),
            size: 20.0,
            fall_speed: 2.0,
            kind: ObjectKind::Good,
        });
        assert!(autopilot_input(&session).left);

        session.objects[0].pos.x = 700.0;
        assert!(autopilot_input(&session).right);

        session.objects[0].kind = ObjectKind::Bad;
        assert_eq!(autopilot_input(&session), DirectionState::default());
    }

    #[test]
    fn test_autopilot_round_scores() {
        let mut runner = Runner::new(GameConfig::default(), Viewport::default(), 2024);
        runner.autopilot = true;
        runner.start();

        let outcome = runner.run_until_end(DT, 40.0).expect("round should end");
        assert!(outcome.score > 0);
    }
}
