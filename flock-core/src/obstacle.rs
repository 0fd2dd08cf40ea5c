use crate::behavior;
use crate::boid::Bounds;
use crate::vector::Vector2D;

/// Most obstacles an environment holds.
pub const MAX_OBSTACLES: usize = 16;

/// Outline used by renderers. Avoidance always treats an obstacle as a circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

/// Static geometry agents steer around
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    position: Vector2D,
    size: f32,
    shape: Shape,
}

impl Obstacle {
    pub fn new(position: Vector2D, size: f32, shape: Shape) -> Self {
        Self {
            position,
            size,
            shape,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn safe_distance(&self, margin: f32) -> f32 {
        self.size + margin
    }

    /// Repulsion for an agent at `position` closer than `size + margin`.
    pub fn avoidance(&self, position: Vector2D, margin: f32, strength: f32) -> Vector2D {
        behavior::repel(position, self.position, self.safe_distance(margin), strength)
    }

    /// The standard four-obstacle course scaled to the arena.
    pub fn default_layout(bounds: &Bounds) -> [Obstacle; 4] {
        let (w, h) = (bounds.width(), bounds.height());
        [
            Obstacle::new(Vector2D::new(w / 3.0, h / 3.0), 30.0, Shape::Circle),
            Obstacle::new(Vector2D::new(w / 3.0 * 2.0, h / 3.0 * 2.0), 40.0, Shape::Square),
            Obstacle::new(Vector2D::new(w / 2.0, h / 4.0), 25.0, Shape::Triangle),
            Obstacle::new(Vector2D::new(w / 2.0, h / 4.0 * 3.0), 35.0, Shape::Circle),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_does_not_change_avoidance() {
        let at = Vector2D::new(100.0, 100.0);
        let agent = Vector2D::new(120.0, 100.0);
        let circle = Obstacle::new(at, 30.0, Shape::Circle);
        let square = Obstacle::new(at, 30.0, Shape::Square);
        let triangle = Obstacle::new(at, 30.0, Shape::Triangle);

        let expected = circle.avoidance(agent, 30.0, 1.5);
        assert_eq!(square.avoidance(agent, 30.0, 1.5), expected);
        assert_eq!(triangle.avoidance(agent, 30.0, 1.5), expected);
    }

    #[test]
    fn test_avoidance_strength() {
        let obstacle = Obstacle::new(Vector2D::new(0.0, 0.0), 20.0, Shape::Circle);

        // safe distance 50, agent at 25: 1.5 * (50 - 25) / 50
        let force = obstacle.avoidance(Vector2D::new(0.0, 25.0), 30.0, 1.5);
        assert!((force.magnitude() - 0.75).abs() < 1e-6);
        assert!(force.y > 0.0);

        assert!(obstacle
            .avoidance(Vector2D::new(0.0, 50.0), 30.0, 1.5)
            .is_zero());
    }

    #[test]
    fn test_default_layout() {
        let bounds = Bounds::new(900.0, 600.0).unwrap();
        let layout = Obstacle::default_layout(&bounds);

        assert_eq!(layout[0].position(), Vector2D::new(300.0, 200.0));
        assert_eq!(layout[1].shape(), Shape::Square);
        assert_eq!(layout[1].size(), 40.0);
        assert_eq!(layout[2].position(), Vector2D::new(450.0, 150.0));
        assert_eq!(layout[3].position(), Vector2D::new(450.0, 450.0));
    }
}
