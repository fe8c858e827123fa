//! Falling object spawning

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, ObjectKind, Session};

impl Session {
    /// Drop one new object just above the top edge of the viewport
    pub fn spawn(&mut self) {
        let config = &self.config;
        let size = self.rng.random_range(config.min_size..=config.max_size) as f32;

        // Keep the whole object on screen; a viewport too narrow for that
        // collapses the range to its left bound.
        let min_x = size;
        let max_x = (self.viewport.width - size).max(min_x);
        let x = self.rng.random_range(min_x..=max_x);

        let kind = if self.rng.random_bool(config.good_chance) {
            ObjectKind::Good
        } else {
            ObjectKind::Bad
        };
        let fall_speed = self
            .rng
            .random_range(config.min_fall_speed..config.max_fall_speed);

        let id = self.next_object_id();
        log::trace!("spawn #{id} {kind:?} size={size} x={x:.1} speed={fall_speed:.2}");
        self.objects.push(FallingObject {
            id,
            pos: Vec2::new(x, -size),
            size,
            fall_speed,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::Viewport;
    use crate::sim::{ObjectKind, Session};

    #[test]
    fn test_spawn_ranges() {
        let viewport = Viewport::new(640.0, 480.0);
        let mut session = Session::with_seed(viewport, 42);

        for _ in 0..500 {
            session.spawn();
        }

        for obj in &session.objects {
            assert!((20.0..=36.0).contains(&obj.size));
            assert_eq!(obj.size.fract(), 0.0);
            assert!(obj.pos.x >= obj.size);
            assert!(obj.pos.x <= viewport.width - obj.size);
            assert_eq!(obj.pos.y, -obj.size);
            assert!(obj.fall_speed >= 1.6 && obj.fall_speed < 3.4);
        }
    }

    #[test]
    fn test_good_fraction_converges() {
        let mut session = Session::with_seed(Viewport::new(800.0, 600.0), 2024);
        for _ in 0..1000 {
            session.spawn();
        }

        let good = session
            .objects
            .iter()
            .filter(|o| o.kind == ObjectKind::Good)
            .count();
        let fraction = good as f64 / 1000.0;
        assert!(
            (fraction - 0.82).abs() < 0.05,
            "good fraction {fraction} too far from 0.82"
        );
    }

    #[test]
    fn test_spawn_ids_unique() {
        let mut session = Session::with_seed(Viewport::default(), 9);
        for _ in 0..100 {
            session.spawn();
        }
        let mut ids: Vec<u32> = session.objects.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_spawn_in_narrow_viewport() {
        let mut session = Session::with_seed(Viewport::new(30.0, 200.0), 1);
        session.spawn();
        let obj = &session.objects[0];
        assert_eq!(obj.pos.x, obj.size);
    }
}
