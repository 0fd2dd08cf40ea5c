use crate::boid::Boid;
use crate::vector::Vector2D;

/// Per-step output handed to logging collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsRecord {
    pub step: u64,
    /// Mean agent distance to the flock centroid, taken before any force is applied.
    pub avg_distance_to_center: f32,
    /// Unordered agent pairs closer than the collision distance this step.
    pub collisions: u32,
    pub with_predator: bool,
}

/// Mean position of `agents`; the origin when there are none.
pub fn centroid(agents: &[Boid]) -> Vector2D {
    if agents.is_empty() {
        return Vector2D::zero();
    }
    agents.iter().map(|b| b.position).sum::<Vector2D>() / agents.len() as f32
}

/// Mean distance of `agents` to `center`; zero when there are none.
pub fn mean_distance_to(agents: &[Boid], center: Vector2D) -> f32 {
    if agents.is_empty() {
        return 0.0;
    }
    agents
        .iter()
        .map(|b| b.position.distance(&center))
        .sum::<f32>()
        / agents.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_centroid() {
        let agents = [at(0.0, 0.0), at(10.0, 0.0), at(5.0, 15.0)];
        assert_eq!(centroid(&agents), Vector2D::new(5.0, 5.0));
    }

    #[test]
    fn test_mean_distance_of_pair_is_half_separation() {
        let agents = [at(0.0, 0.0), at(6.0, 8.0)];
        let center = centroid(&agents);
        assert!((mean_distance_to(&agents, center) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(centroid(&[]), Vector2D::zero());
        assert_eq!(mean_distance_to(&[], Vector2D::new(1.0, 1.0)), 0.0);
    }
}
