//! Session → draw commands
//!
//! Pure projection of the current state into paint primitives, in logical
//! pixels with a top-left origin. Painted in list order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vertex::colors;
use crate::sim::{Basket, FallingObject, ObjectKind, Session};

/// Corner radius for bananas and the basket
pub const CORNER_RADIUS: f32 = 8.0;
/// Banana height relative to its size
pub const BANANA_ASPECT: f32 = 0.6;
/// Basket hole inset from the left/right edges
pub const HOLE_INSET_X: f32 = 6.0;
/// Basket hole inset from the top edge
pub const HOLE_INSET_TOP: f32 = 8.0;
/// Total width/height the hole is smaller than the basket
pub const HOLE_SHRINK: f32 = 12.0;

/// A single paint primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { size: Vec2, color: [f32; 4] },
    FillRect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    RoundRect {
        min: Vec2,
        size: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Stroked quadratic Bézier
    QuadCurve {
        from: Vec2,
        ctrl: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
}

/// Draw list for the current frame
pub fn project(session: &Session, width: f32, height: f32) -> Vec<DrawCommand> {
    let size = Vec2::new(width, height);
    let mut commands = Vec::with_capacity(2 + session.objects.len() * 2 + 2);

    commands.push(DrawCommand::Clear {
        size,
        color: colors::BACKGROUND,
    });
    commands.push(DrawCommand::FillRect {
        min: Vec2::ZERO,
        size,
        color: colors::FIELD_TINT,
    });

    for obj in &session.objects {
        push_object(&mut commands, obj);
    }
    push_basket(&mut commands, &session.basket);

    commands
}

/// Draw list for a freshly reset surface
pub fn cleared(width: f32, height: f32) -> Vec<DrawCommand> {
    vec![DrawCommand::Clear {
        size: Vec2::new(width, height),
        color: colors::BACKGROUND,
    }]
}

fn push_object(commands: &mut Vec<DrawCommand>, obj: &FallingObject) {
    let s = obj.size;
    let p = obj.pos;
    match obj.kind {
        ObjectKind::Good => {
            commands.push(DrawCommand::RoundRect {
                min: p,
                size: Vec2::new(s, s * BANANA_ASPECT),
                radius: CORNER_RADIUS,
                color: colors::BANANA,
            });
            // Curve highlight across the top
            commands.push(DrawCommand::QuadCurve {
                from: p + Vec2::new(s * 0.2, s * 0.2),
                ctrl: p + Vec2::new(s * 0.5, s * 0.05),
                to: p + Vec2::new(s * 0.8, s * 0.2),
                width: 1.0,
                color: colors::BANANA_DETAIL,
            });
        }
        ObjectKind::Bad => {
            commands.push(DrawCommand::Circle {
                center: p + Vec2::splat(s / 2.0),
                radius: s / 2.0,
                color: colors::ROCK,
            });
        }
    }
}

fn push_basket(commands: &mut Vec<DrawCommand>, basket: &Basket) {
    commands.push(DrawCommand::RoundRect {
        min: basket.pos,
        size: Vec2::new(basket.width, basket.height),
        radius: CORNER_RADIUS,
        color: colors::BASKET,
    });
    commands.push(DrawCommand::FillRect {
        min: basket.pos + Vec2::new(HOLE_INSET_X, HOLE_INSET_TOP),
        size: Vec2::new(basket.width - HOLE_SHRINK, basket.height - HOLE_SHRINK),
        color: colors::BASKET_HOLE,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;

    fn session_with(kinds: &[ObjectKind]) -> Session {
        let mut session = Session::with_seed(Viewport::new(800.0, 500.0), 1);
        for (i, kind) in kinds.iter().enumerate() {
            session.objects.push(FallingObject {
                id: i as u32 + 1,
                pos: Vec2::new(100.0 + i as f32 * 50.0, 40.0),
                size: 30.0,
                fall_speed: 2.0,
                kind: *kind,
            });
        }
        session
    }

    #[test]
    fn test_empty_session_draws_background_and_basket() {
        let session = session_with(&[]);
        let commands = project(&session, 800.0, 500.0);
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(commands[2], DrawCommand::RoundRect { .. }));
        assert_eq!(
            commands[3],
            DrawCommand::FillRect {
                min: Vec2::new(366.0, 448.0),
                size: Vec2::new(68.0, 28.0),
                color: colors::BASKET_HOLE,
            }
        );
    }

    #[test]
    fn test_object_shapes_by_kind() {
        let session = session_with(&[ObjectKind::Good, ObjectKind::Bad]);
        let commands = project(&session, 800.0, 500.0);

        // clear, tint, banana body + curve, rock, basket body + hole
        assert_eq!(commands.len(), 7);
        assert_eq!(
            commands[2],
            DrawCommand::RoundRect {
                min: Vec2::new(100.0, 40.0),
                size: Vec2::new(30.0, 18.0),
                radius: CORNER_RADIUS,
                color: colors::BANANA,
            }
        );
        assert!(matches!(commands[3], DrawCommand::QuadCurve { .. }));
        assert_eq!(
            commands[4],
            DrawCommand::Circle {
                center: Vec2::new(165.0, 55.0),
                radius: 15.0,
                color: colors::ROCK,
            }
        );
    }

    #[test]
    fn test_cleared() {
        assert_eq!(cleared(10.0, 20.0).len(), 1);
    }
}
