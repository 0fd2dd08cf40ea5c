//! Tuning constants for the steering functions and the environment step.
//!
//! Two speed caps live here on purpose: [`SteeringConfig::max_speed`] shapes the
//! desired velocity inside the steering math, while [`EnvironmentConfig::max_speed`]
//! bounds the velocity an agent actually moves with.

/// Constants used inside the steering functions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    /// Length a desired velocity is rescaled to before subtracting the current velocity.
    pub max_speed: f32,
    /// Upper bound on the length of every steering vector.
    pub max_force: f32,
    pub separation_distance: f32,
    pub alignment_distance: f32,
    pub cohesion_distance: f32,
}

impl SteeringConfig {
    /// Same limits with the alignment and cohesion radius set to `radius`.
    pub fn with_neighbor_distance(self, radius: f32) -> Self {
        Self {
            alignment_distance: radius,
            cohesion_distance: radius,
            ..self
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            max_force: 0.05,
            separation_distance: 20.0,
            alignment_distance: 50.0,
            cohesion_distance: 50.0,
        }
    }
}

/// Relative strength of the three flocking rules
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Weights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
}

impl Weights {
    pub const fn new(separation: f32, alignment: f32, cohesion: f32) -> Self {
        Self {
            separation,
            alignment,
            cohesion,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Constants owned by an [`crate::Environment`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentConfig {
    /// Velocity cap applied when an agent integrates.
    pub max_speed: f32,
    pub steering: SteeringConfig,
    pub predator_radius: f32,
    pub predator_strength: f32,
    pub collision_distance: f32,
    pub obstacle_margin: f32,
    pub obstacle_strength: f32,
    pub leader_approach_speed: f32,
    pub leader_max_force: f32,
    /// Scale applied to the clamped leader-follow steer.
    pub leader_weight: f32,
    /// Distance the leader moves per pressed direction per step.
    pub leader_manual_speed: f32,
}

/// Alignment and cohesion radius used by the environment's flocking pass.
pub const FLOCK_NEIGHBOR_DISTANCE: f32 = 100.0;

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            steering: SteeringConfig::default().with_neighbor_distance(FLOCK_NEIGHBOR_DISTANCE),
            predator_radius: 100.0,
            predator_strength: 2.0,
            collision_distance: 5.0,
            obstacle_margin: 30.0,
            obstacle_strength: 1.5,
            leader_approach_speed: 4.0,
            leader_max_force: 0.05,
            leader_weight: 0.05,
            leader_manual_speed: 2.5,
        }
    }
}

/// What a collaborator chooses when it creates an environment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationSettings {
    pub agent_count: usize,
    pub width: f32,
    pub height: f32,
    pub weights: Weights,
    pub with_predator: bool,
    /// Make the first agent a leader the others weakly follow.
    pub with_leader: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            agent_count: 30,
            width: 800.0,
            height: 600.0,
            weights: Weights::default(),
            with_predator: false,
            with_leader: true,
        }
    }
}
