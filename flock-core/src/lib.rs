#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation core.
//!
//! Agents steer by separation, alignment and cohesion, flee an optional
//! predator, avoid static obstacles and weakly follow an optional leader.
//! [`Environment::step`] folds all of that into one bounded acceleration per
//! agent and integrates the whole flock.
//!
//! Builds without `std` (with `alloc`); random construction needs the `std`
//! feature.

extern crate alloc;

pub mod behavior;
mod boid;
mod config;
mod environment;
mod error;
mod input;
pub mod metrics;
mod obstacle;
mod predator;
mod vector;

pub use boid::{Boid, Bounds};
pub use config::{
    EnvironmentConfig, SimulationSettings, SteeringConfig, Weights, FLOCK_NEIGHBOR_DISTANCE,
};
pub use environment::{Environment, EnvironmentBuilder, LeaderIndex};
pub use error::FlockError;
pub use input::{Direction, PressedDirections, UnknownDirection};
pub use metrics::MetricsRecord;
pub use obstacle::{Obstacle, Shape, MAX_OBSTACLES};
pub use predator::Predator;
pub use vector::Vector2D;
