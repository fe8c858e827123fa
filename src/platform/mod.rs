//! Platform abstraction layer
//!
//! Device-independent handling of browser input. The host forwards raw key
//! names and touch positions; this layer turns them into held directions.

pub mod input;

pub use input::{DirectionState, Key};
