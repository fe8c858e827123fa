//! Session state and lifecycle
//!
//! A [`Session`] is one timed play-through. It owns everything the simulation
//! mutates: score, clock, falling objects, the basket, the seeded RNG and the
//! queue of events waiting for the display layer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timer::Countdown;
use crate::Viewport;
use crate::config::GameConfig;

/// What a falling object does when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Banana: +1 score
    Good,
    /// Rock: score penalty
    Bad,
}

/// A falling item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Top-left corner in logical pixels
    pub pos: Vec2,
    /// Edge length of the square bounding box
    pub size: f32,
    /// Base pixels per tick before the score speedup
    pub fall_speed: f32,
    pub kind: ObjectKind,
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner in logical pixels
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick while a direction is held
    pub speed: f32,
}

impl Basket {
    /// Basket centred horizontally and pinned to the viewport bottom
    pub fn new(config: &GameConfig, viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - config.basket_width / 2.0,
                viewport.height - config.basket_bottom_offset,
            ),
            width: config.basket_width,
            height: config.basket_height,
            speed: config.basket_speed,
        }
    }

    /// Keep the basket fully inside the viewport horizontally.
    ///
    /// A viewport narrower than the basket pins it to the left edge.
    #[inline]
    pub fn clamp_to(&mut self, viewport: Viewport) {
        self.pos.x = self.pos.x.clamp(0.0, self.max_x(viewport));
    }

    /// Largest x the basket may occupy in this viewport
    #[inline]
    pub fn max_x(&self, viewport: Viewport) -> f32 {
        (viewport.width - self.width).max(0.0)
    }
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    pub score: u32,
}

impl Outcome {
    /// Result text shown to the player
    pub fn message(&self) -> String {
        if self.won {
            format!("You caught {} bananas! Still not a website.", self.score)
        } else {
            format!(
                "Time's up! You caught {} bananas. Still not a website.",
                self.score
            )
        }
    }
}

/// Notifications for the display layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A round began (host should arm its countdown timer)
    Started,
    ScoreChanged(u32),
    TimeChanged(u32),
    /// The round is over (host should stop timers and show the result)
    Ended(Outcome),
    /// Session was reset (host should clear the drawing surface)
    Cleared,
}

/// One timed play-through
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    pub running: bool,
    pub score: u32,
    /// Whole seconds left on the clock
    pub time_remaining: u32,
    /// Falling objects in spawn order
    pub objects: Vec<FallingObject>,
    pub basket: Basket,
    /// Last viewport seen by `start`/`update`
    pub viewport: Viewport,
    /// Seconds accumulated toward the next spawn
    pub(crate) spawn_timer: f32,
    pub(crate) rng: Pcg32,
    countdown: Countdown,
    events: Vec<SessionEvent>,
    next_id: u32,
}

impl Session {
    /// Create an idle session; nothing falls until [`Session::start`]
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Self {
        Self {
            running: false,
            score: 0,
            time_remaining: config.round_seconds,
            objects: Vec::new(),
            basket: Basket::new(&config, viewport),
            viewport,
            spawn_timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            countdown: Countdown::new(config.countdown_period),
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Session with default tuning
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::new(GameConfig::default(), viewport, seed)
    }

    /// Allocate a new object ID
    pub(crate) fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// The countdown handle (active while a round runs)
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Begin a round. Ignored while a round is already running.
    ///
    /// Returns whether a new round started.
    pub fn start(&mut self, viewport: Viewport) -> bool {
        if self.running {
            log::debug!("start ignored: session already running");
            return false;
        }

        self.viewport = viewport;
        self.score = 0;
        self.time_remaining = self.config.round_seconds;
        self.objects.clear();
        self.spawn_timer = 0.0;
        self.basket.pos.y = viewport.height - self.config.basket_bottom_offset;
        self.basket.clamp_to(viewport);

        for _ in 0..self.config.initial_burst {
            self.spawn();
        }

        self.running = true;
        self.countdown.start();

        log::info!(
            "Round started: {}s on the clock, {} to win",
            self.time_remaining,
            self.config.win_score
        );
        self.emit(SessionEvent::Started);
        self.emit(SessionEvent::ScoreChanged(self.score));
        self.emit(SessionEvent::TimeChanged(self.time_remaining));
        true
    }

    /// One countdown fire: lose a second, end the round when the clock runs out
    pub fn countdown_tick(&mut self) {
        if !self.countdown.is_active() {
            return;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.emit(SessionEvent::TimeChanged(self.time_remaining));

        if self.time_remaining == 0 {
            self.end(false);
        }
    }

    /// Pump the countdown with elapsed wall-clock seconds
    pub fn advance_countdown(&mut self, dt: f32) {
        let fires = self.countdown.advance(dt);
        for _ in 0..fires {
            self.countdown_tick();
        }
    }

    /// Finish the round and publish its outcome
    pub fn end(&mut self, won: bool) {
        if !self.running {
            return;
        }

        self.running = false;
        self.countdown.cancel();

        let outcome = Outcome {
            won,
            score: self.score,
        };
        log::info!(
            "Round over ({}): score {}",
            if won { "win" } else { "time up" },
            outcome.score
        );
        self.emit(SessionEvent::Ended(outcome));
    }

    /// Stop everything and return to the idle state
    pub fn reset(&mut self) {
        self.running = false;
        self.countdown.cancel();
        self.objects.clear();
        self.score = 0;
        self.time_remaining = self.config.round_seconds;

        log::info!("Session reset");
        self.emit(SessionEvent::ScoreChanged(self.score));
        self.emit(SessionEvent::TimeChanged(self.time_remaining));
        self.emit(SessionEvent::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 500.0)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::with_seed(viewport(), 1);
        assert!(!session.running);
        assert_eq!(session.time_remaining, 30);
        assert!(session.objects.is_empty());
        assert_eq!(session.basket.pos, Vec2::new(360.0, 440.0));
    }

    #[test]
    fn test_start_spawns_burst_and_arms_countdown() {
        let mut session = Session::with_seed(viewport(), 7);
        assert!(session.start(viewport()));

        assert!(session.running);
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining, 30);
        assert_eq!(session.objects.len(), 4);
        assert!(session.countdown().is_active());
        assert_eq!(
            session.drain_events(),
            vec![
                SessionEvent::Started,
                SessionEvent::ScoreChanged(0),
                SessionEvent::TimeChanged(30)
            ]
        );
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut session = Session::with_seed(viewport(), 7);
        session.start(viewport());
        session.score = 3;
        assert!(!session.start(viewport()));
        assert_eq!(session.score, 3);
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut session = Session::with_seed(viewport(), 3);
        session.start(viewport());
        session.drain_events();

        for _ in 0..29 {
            session.countdown_tick();
        }
        assert!(session.running);
        assert_eq!(session.time_remaining, 1);

        session.countdown_tick();
        assert!(!session.running);
        assert!(!session.countdown().is_active());

        let events = session.drain_events();
        assert_eq!(
            events.last(),
            Some(&SessionEvent::Ended(Outcome {
                won: false,
                score: 0
            }))
        );

        // Late fires after the round ended are swallowed
        session.countdown_tick();
        assert_eq!(session.time_remaining, 0);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_advance_countdown_uses_wall_clock() {
        let mut session = Session::with_seed(viewport(), 3);
        session.start(viewport());
        session.advance_countdown(2.5);
        assert_eq!(session.time_remaining, 28);
        session.advance_countdown(0.5);
        assert_eq!(session.time_remaining, 27);
    }

    #[test]
    fn test_reset_cancels_and_clears() {
        let mut session = Session::with_seed(viewport(), 5);
        session.start(viewport());
        session.score = 12;
        session.time_remaining = 4;
        session.drain_events();

        session.reset();
        assert!(!session.running);
        assert!(!session.countdown().is_active());
        assert!(session.objects.is_empty());
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining, 30);
        assert_eq!(session.drain_events().last(), Some(&SessionEvent::Cleared));

        // A countdown fire queued by the host before it noticed the reset
        session.countdown_tick();
        assert_eq!(session.time_remaining, 30);
    }

    #[test]
    fn test_outcome_message() {
        let won = Outcome { won: true, score: 25 };
        assert_eq!(won.message(), "You caught 25 bananas! Still not a website.");
        let lost = Outcome { won: false, score: 9 };
        assert_eq!(
            lost.message(),
            "Time's up! You caught 9 bananas. Still not a website."
        );
    }

    #[test]
    fn test_basket_clamp_narrow_viewport() {
        let mut basket = Basket::new(&GameConfig::default(), viewport());
        basket.pos.x = 30.0;
        basket.clamp_to(Viewport::new(50.0, 500.0));
        assert_eq!(basket.pos.x, 0.0);
        assert_eq!(basket.max_x(Viewport::new(50.0, 500.0)), 0.0);
    }

    #[test]
    fn test_basket_clamp_right_edge() {
        let mut basket = Basket::new(&GameConfig::default(), viewport());
        basket.pos.x = 10_000.0;
        basket.clamp_to(viewport());
        assert_eq!(basket.pos.x, basket.max_x(viewport()));
        assert_eq!(basket.pos.x, viewport().width - basket.width);
    }
}
