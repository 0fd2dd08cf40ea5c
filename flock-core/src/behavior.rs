//! Steering functions for one subject agent against a set of candidate neighbors.
//!
//! The candidate set may include the subject itself: every rule ignores
//! candidates at distance zero, which is how self is excluded.

use crate::boid::Boid;
use crate::config::{SteeringConfig, Weights};
use crate::vector::Vector2D;

/// Classic steer-toward-desired: rescale `desired` to `speed`, subtract the
/// current velocity, clamp to `max_force`. A zero `desired` yields zero.
fn steer(desired: Vector2D, velocity: Vector2D, speed: f32, max_force: f32) -> Vector2D {
    if desired.is_zero() {
        return Vector2D::zero();
    }
    (desired.with_magnitude(speed) - velocity).limit(max_force)
}

/// Distance-weighted repulsion from neighbors closer than `separation_distance`.
pub fn separation<'a, I>(boid: &Boid, others: I, config: &SteeringConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.separation_distance {
            let diff = boid.position - other.position;
            if !diff.is_zero() {
                sum += diff.normalize() / distance;
                count += 1;
            }
        }
    }

    if count > 0 {
        sum = sum / count as f32;
    }

    steer(sum, boid.velocity, config.max_speed, config.max_force)
}

/// Steer toward the average heading of neighbors within `alignment_distance`.
pub fn alignment<'a, I>(boid: &Boid, others: I, config: &SteeringConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.alignment_distance {
            sum += other.velocity;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }
    steer(
        sum / count as f32,
        boid.velocity,
        config.max_speed,
        config.max_force,
    )
}

/// Seek the centre of mass of neighbors within `cohesion_distance`.
pub fn cohesion<'a, I>(boid: &Boid, others: I, config: &SteeringConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.cohesion_distance {
            sum += other.position;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }
    seek(boid, sum / count as f32, config)
}

pub fn seek(boid: &Boid, target: Vector2D, config: &SteeringConfig) -> Vector2D {
    seek_with(boid, target, config.max_speed, config.max_force)
}

/// [`seek`] with explicit approach speed and force clamp.
pub fn seek_with(boid: &Boid, target: Vector2D, speed: f32, max_force: f32) -> Vector2D {
    steer(target - boid.position, boid.velocity, speed, max_force)
}

/// Weighted sum of separation, alignment and cohesion.
pub fn flock(boid: &Boid, others: &[Boid], config: &SteeringConfig, weights: &Weights) -> Vector2D {
    separation(boid, others, config) * weights.separation
        + alignment(boid, others, config) * weights.alignment
        + cohesion(boid, others, config) * weights.cohesion
}

/// Push `position` away from `source` with a strength falling linearly from
/// `max_strength` at the source to zero at `radius`.
pub fn repel(position: Vector2D, source: Vector2D, radius: f32, max_strength: f32) -> Vector2D {
    let distance = position.distance(&source);
    if distance >= radius {
        return Vector2D::zero();
    }
    let away = position - source;
    if away.is_zero() {
        return Vector2D::zero();
    }
    away.normalize() * ((radius - distance) / radius) * max_strength
}
