#[cfg(feature = "std")]
use rand::Rng;

use crate::error::FlockError;
use crate::vector::Vector2D;

/// Arena dimensions. Positions live in the half-open box `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self, FlockError> {
        let valid = |extent: f32| extent.is_finite() && extent > 0.0;
        if !valid(width) || !valid(height) {
            return Err(FlockError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn contains(&self, position: Vector2D) -> bool {
        position.x >= 0.0 && position.x < self.width && position.y >= 0.0 && position.y < self.height
    }

    /// Toroidal teleport: leaving past the far edge lands on 0, dropping below 0
    /// lands on the far edge.
    pub fn wrap(&self, position: &mut Vector2D) {
        position.x = wrap_axis(position.x, self.width);
        position.y = wrap_axis(position.y, self.height);
    }
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value >= extent {
        0.0
    } else if value < 0.0 {
        // The far edge itself is outside the half-open arena.
        libm::nextafterf(extent, 0.0)
    } else {
        value
    }
}

/// A single flocking agent
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Force accumulated for the current step; zero between steps.
    pub acceleration: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
        }
    }

    /// Spawn in the middle third of the arena with a small random heading.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        // Divide first so the upper bound stays finite for huge arenas.
        let (w, h) = (bounds.width() / 3.0, bounds.height() / 3.0);
        let position = Vector2D::new(rng.gen_range(w..w * 2.0), rng.gen_range(h..h * 2.0));
        let velocity = Vector2D::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Integrate one step: accelerate, cap the speed, move, clear the force, wrap.
    pub fn update(&mut self, max_speed: f32, bounds: &Bounds) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
        bounds.wrap(&mut self.position);
    }
}
