//! Session simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (reproducible sessions)
//! - Objects kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{object_hits_basket, object_missed};
pub use state::{Basket, FallingObject, ObjectKind, Outcome, Session, SessionEvent};
pub use tick::{TickInput, tick_input, update};
pub use timer::Countdown;
