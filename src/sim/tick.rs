//! Per-frame simulation update
//!
//! Advances a running session by one frame: basket movement, spawning,
//! falling, catches and the win check.

use rand::Rng;

use super::collision::{object_hits_basket, object_missed};
use super::state::{ObjectKind, Session, SessionEvent};
use crate::Viewport;

/// Held directions for a single tick, decoupled from the input device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub const fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }
}

/// Move the basket by its per-tick speed for each held direction, then clamp
pub fn tick_input(session: &mut Session, input: &TickInput, viewport: Viewport) {
    let basket = &mut session.basket;
    if input.left {
        basket.pos.x -= basket.speed;
    }
    if input.right {
        basket.pos.x += basket.speed;
    }
    basket.clamp_to(viewport);
}

/// Advance a running session by `dt` seconds. No-op once the round is over.
pub fn update(session: &mut Session, input: &TickInput, dt: f32, viewport: Viewport) {
    if !session.running {
        return;
    }
    session.viewport = viewport;

    tick_input(session, input, viewport);

    // Periodic spawning; any leftover time past the interval is dropped
    session.spawn_timer += dt;
    if session.spawn_timer > session.config.spawn_interval {
        session.spawn_timer = 0.0;
        session.spawn();
        let double = session.config.double_spawn_chance;
        if session.rng.random_bool(double) {
            session.spawn();
        }
    }

    // Reverse pass so removals don't shift unvisited indices
    for i in (0..session.objects.len()).rev() {
        let speedup = 1.0 + session.score as f32 * session.config.score_speedup;
        let obj = &mut session.objects[i];
        obj.pos.y += obj.fall_speed * speedup;

        if object_hits_basket(obj, &session.basket) {
            let kind = obj.kind;
            session.objects.remove(i);
            match kind {
                ObjectKind::Good => session.score += 1,
                ObjectKind::Bad => {
                    session.score = session.score.saturating_sub(session.config.bad_penalty)
                }
            }
            log::debug!("caught {:?}, score {}", kind, session.score);
            session.emit(SessionEvent::ScoreChanged(session.score));
            continue;
        }

        if object_missed(obj, viewport.height, session.config.offscreen_margin) {
            session.objects.remove(i);
        }
    }

    if session.score >= session.config.win_score {
        session.end(true);
    }

    // Keep the basket on the floor across resizes
    session.basket.pos.y = viewport.height - session.config.basket_bottom_offset;
}
