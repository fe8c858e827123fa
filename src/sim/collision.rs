//! Basket collision detection
//!
//! Objects are caught from above: once an object's bottom edge reaches the
//! basket's top edge while the two overlap horizontally, it counts as a catch.
//! Objects that have already sunk past the basket top still count, so a fast
//! object can never tunnel through.

use super::state::{Basket, FallingObject};

/// Whether `obj` is in the basket this tick
#[inline]
pub fn object_hits_basket(obj: &FallingObject, basket: &Basket) -> bool {
    obj.pos.y + obj.size >= basket.pos.y
        && obj.pos.x + obj.size > basket.pos.x
        && obj.pos.x < basket.pos.x + basket.width
}

/// Whether `obj` has fallen far enough below the viewport to be dropped
#[inline]
pub fn object_missed(obj: &FallingObject, viewport_height: f32, margin: f32) -> bool {
    obj.pos.y > viewport_height + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObjectKind;
    use glam::Vec2;

    fn basket() -> Basket {
        Basket {
            pos: Vec2::new(100.0, 400.0),
            width: 80.0,
            height: 40.0,
            speed: 6.0,
        }
    }

    fn object(x: f32, y: f32) -> FallingObject {
        FallingObject {
            id: 1,
            pos: Vec2::new(x, y),
            size: 20.0,
            fall_speed: 2.0,
            kind: ObjectKind::Good,
        }
    }

    #[test]
    fn test_hit_when_touching_top_edge() {
        assert!(object_hits_basket(&object(120.0, 380.0), &basket()));
    }

    #[test]
    fn test_miss_when_above() {
        assert!(!object_hits_basket(&object(120.0, 379.0), &basket()));
    }

    #[test]
    fn test_horizontal_edges_are_exclusive() {
        // Right edge of object exactly on basket left edge
        assert!(!object_hits_basket(&object(80.0, 390.0), &basket()));
        // Left edge of object exactly on basket right edge
        assert!(!object_hits_basket(&object(180.0, 390.0), &basket()));
        // One pixel of overlap on either side
        assert!(object_hits_basket(&object(81.0, 390.0), &basket()));
        assert!(object_hits_basket(&object(179.0, 390.0), &basket()));
    }

    #[test]
    fn test_below_basket_still_caught() {
        assert!(object_hits_basket(&object(120.0, 520.0), &basket()));
    }

    #[test]
    fn test_missed_threshold() {
        assert!(!object_missed(&object(0.0, 550.0), 500.0, 50.0));
        assert!(object_missed(&object(0.0, 550.5), 500.0, 50.0));
    }
}
