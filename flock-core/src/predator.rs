use crate::behavior;
use crate::boid::Bounds;
use crate::vector::Vector2D;

/// A constant-velocity hunter that agents flee from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predator {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Predator {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    /// Enter from the left edge at mid height, heading down and right.
    pub fn spawn(bounds: &Bounds) -> Self {
        Self::new(
            Vector2D::new(0.0, libm::floorf(bounds.height() / 2.0)),
            Vector2D::new(2.0, 1.5),
        )
    }

    /// Move one step and bounce off the arena edges.
    ///
    /// After reflecting, an x past the right edge is also forced back to 0.
    pub fn advance(&mut self, bounds: &Bounds) {
        self.position += self.velocity;

        if self.position.x <= 0.0 || self.position.x >= bounds.width() {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y <= 0.0 || self.position.y >= bounds.height() {
            self.velocity.y = -self.velocity.y;
        }
        if self.position.x > bounds.width() {
            self.position.x = 0.0;
        }
    }

    /// Repulsion on an agent at `position` within `radius`.
    pub fn repulsion(&self, position: Vector2D, radius: f32, strength: f32) -> Vector2D {
        behavior::repel(position, self.position, radius, strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::new(100.0, 100.0).unwrap()
    }

    #[test]
    fn test_spawn() {
        let predator = Predator::spawn(&Bounds::new(800.0, 601.0).unwrap());
        assert_eq!(predator.position, Vector2D::new(0.0, 300.0));
        assert_eq!(predator.velocity, Vector2D::new(2.0, 1.5));
    }

    #[test]
    fn test_advance_moves_at_constant_velocity() {
        let mut predator = Predator::new(Vector2D::new(10.0, 10.0), Vector2D::new(2.0, 1.5));
        predator.advance(&arena());
        predator.advance(&arena());
        assert_eq!(predator.position, Vector2D::new(14.0, 13.0));
        assert_eq!(predator.velocity, Vector2D::new(2.0, 1.5));
    }

    #[test]
    fn test_advance_reflects_y() {
        let mut predator = Predator::new(Vector2D::new(50.0, 99.0), Vector2D::new(0.0, 2.0));
        predator.advance(&arena());
        assert_eq!(predator.position.y, 101.0);
        assert_eq!(predator.velocity.y, -2.0);
    }

    #[test]
    fn test_advance_reflects_then_wraps_x() {
        let mut predator = Predator::new(Vector2D::new(99.0, 50.0), Vector2D::new(2.0, 0.0));
        predator.advance(&arena());
        assert_eq!(predator.velocity.x, -2.0);
        assert_eq!(predator.position.x, 0.0);
    }

    #[test]
    fn test_advance_reflects_at_left_edge() {
        let mut predator = Predator::new(Vector2D::new(1.0, 50.0), Vector2D::new(-2.0, 0.0));
        predator.advance(&arena());
        assert_eq!(predator.position.x, -1.0);
        assert_eq!(predator.velocity.x, 2.0);
    }

    #[test]
    fn test_repulsion() {
        let predator = Predator::new(Vector2D::new(0.0, 0.0), Vector2D::zero());

        let force = predator.repulsion(Vector2D::new(0.0, 50.0), 100.0, 1.0);
        assert!((force.magnitude() - 0.5).abs() < 1e-6);
        assert!(force.y > 0.0);

        assert!(predator
            .repulsion(Vector2D::new(0.0, 100.0), 100.0, 2.0)
            .is_zero());
    }
}
