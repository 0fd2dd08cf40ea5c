use alloc::vec::Vec;

#[cfg(feature = "std")]
use rand::Rng;

use crate::behavior;
use crate::boid::{Boid, Bounds};
#[cfg(feature = "std")]
use crate::config::SimulationSettings;
use crate::config::{EnvironmentConfig, Weights};
use crate::error::FlockError;
use crate::input::PressedDirections;
use crate::metrics::{self, MetricsRecord};
use crate::obstacle::{Obstacle, MAX_OBSTACLES};
use crate::predator::Predator;
use crate::vector::Vector2D;

/// Position of the leader in the agent list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderIndex(usize);

impl LeaderIndex {
    /// The leader is always the first agent.
    pub const FIRST: LeaderIndex = LeaderIndex(0);

    pub fn get(self) -> usize {
        self.0
    }
}

/// The simulation world: agents, obstacles, an optional predator and leader,
/// and the step engine that moves them
#[derive(Debug, Clone)]
pub struct Environment {
    bounds: Bounds,
    agents: Vec<Boid>,
    obstacles: heapless::Vec<Obstacle, MAX_OBSTACLES>,
    predator: Option<Predator>,
    leader: Option<LeaderIndex>,
    config: EnvironmentConfig,
    weights: Weights,
    step: u64,
    collisions: u32,
}

/// Assembles an [`Environment`] from explicit state
#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    width: f32,
    height: f32,
    agents: Vec<Boid>,
    obstacles: Vec<Obstacle>,
    predator: Option<Predator>,
    with_leader: bool,
    config: EnvironmentConfig,
    weights: Weights,
}

impl EnvironmentBuilder {
    /// An empty arena: no agents, obstacles, predator or leader.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            agents: Vec::new(),
            obstacles: Vec::new(),
            predator: None,
            with_leader: false,
            config: EnvironmentConfig::default(),
            weights: Weights::default(),
        }
    }

    pub fn agent(mut self, boid: Boid) -> Self {
        self.agents.push(boid);
        self
    }

    pub fn agents<I: IntoIterator<Item = Boid>>(mut self, agents: I) -> Self {
        self.agents.extend(agents);
        self
    }

    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn obstacles<I: IntoIterator<Item = Obstacle>>(mut self, obstacles: I) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    pub fn predator(mut self, predator: Predator) -> Self {
        self.predator = Some(predator);
        self
    }

    /// Follow the first agent. Ignored when there are no agents.
    pub fn leader(mut self, with_leader: bool) -> Self {
        self.with_leader = with_leader;
        self
    }

    pub fn config(mut self, config: EnvironmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn build(self) -> Result<Environment, FlockError> {
        let bounds = Bounds::new(self.width, self.height)?;

        let mut obstacles = heapless::Vec::new();
        for obstacle in self.obstacles {
            obstacles.push(obstacle).map_err(|_| FlockError::TooManyObstacles {
                capacity: MAX_OBSTACLES,
            })?;
        }

        let mut agents = self.agents;
        for boid in agents.iter_mut() {
            boid.acceleration = Vector2D::zero();
        }

        let leader = (self.with_leader && !agents.is_empty()).then_some(LeaderIndex::FIRST);

        log::debug!(
            "environment {}x{}: {} agents, {} obstacles, predator={}, leader={}",
            bounds.width(),
            bounds.height(),
            agents.len(),
            obstacles.len(),
            self.predator.is_some(),
            leader.is_some()
        );

        Ok(Environment {
            bounds,
            agents,
            obstacles,
            predator: self.predator,
            leader,
            config: self.config,
            weights: self.weights,
            step: 0,
            collisions: 0,
        })
    }
}

impl Environment {
    pub fn builder(width: f32, height: f32) -> EnvironmentBuilder {
        EnvironmentBuilder::new(width, height)
    }

    /// Randomly populated environment with the standard obstacle course.
    #[cfg(feature = "std")]
    pub fn new<R: Rng + ?Sized>(
        settings: &SimulationSettings,
        config: EnvironmentConfig,
        rng: &mut R,
    ) -> Result<Self, FlockError> {
        let bounds = Bounds::new(settings.width, settings.height)?;
        let agents: Vec<Boid> = (0..settings.agent_count)
            .map(|_| Boid::random(&bounds, rng))
            .collect();

        let mut builder = EnvironmentBuilder::new(settings.width, settings.height)
            .agents(agents)
            .obstacles(Obstacle::default_layout(&bounds))
            .leader(settings.with_leader)
            .weights(settings.weights)
            .config(config);
        if settings.with_predator {
            builder = builder.predator(Predator::spawn(&bounds));
        }
        builder.build()
    }

    /// [`Environment::new`] seeded from the thread-local generator.
    #[cfg(feature = "std")]
    pub fn from_settings(settings: &SimulationSettings) -> Result<Self, FlockError> {
        Self::new(settings, EnvironmentConfig::default(), &mut rand::thread_rng())
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn agents(&self) -> &[Boid] {
        &self.agents
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn predator(&self) -> Option<&Predator> {
        self.predator.as_ref()
    }

    pub fn leader(&self) -> Option<LeaderIndex> {
        self.leader
    }

    pub fn leader_agent(&self) -> Option<&Boid> {
        self.leader.map(|leader| &self.agents[leader.get()])
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Collisions counted during the most recent step.
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn set_weights(&mut self, weights: Weights) {
        self.weights = weights;
    }

    /// Advance the simulation by one step.
    ///
    /// Agents integrate in index order, so an agent's force sees the agents
    /// before it already moved. With the `parallel` feature every force is read
    /// from the state left by the leader override instead.
    pub fn step(&mut self, input: PressedDirections) -> MetricsRecord {
        self.steer_leader(input);

        let center = metrics::centroid(&self.agents);
        let avg_distance_to_center = metrics::mean_distance_to(&self.agents, center);

        self.collisions = 0;
        let step = self.step;
        self.step += 1;

        if let Some(predator) = self.predator.as_mut() {
            predator.advance(&self.bounds);
        }

        // Pairs are counted before either member integrates.
        self.collisions = self.count_collisions();
        self.integrate_agents();

        let record = MetricsRecord {
            step,
            avg_distance_to_center,
            collisions: self.collisions,
            with_predator: self.predator.is_some(),
        };
        log::trace!("{:?}", record);
        record
    }

    fn steer_leader(&mut self, input: PressedDirections) {
        let Some(leader) = self.leader else {
            return;
        };
        if input.is_empty() {
            return;
        }
        let boid = &mut self.agents[leader.get()];
        input.nudge(&mut boid.position, self.config.leader_manual_speed);
        self.bounds.wrap(&mut boid.position);
    }

    #[cfg(not(feature = "parallel"))]
    fn integrate_agents(&mut self) {
        let max_speed = self.config.max_speed;
        for i in 0..self.agents.len() {
            let force = self.steering_force(i);
            let boid = &mut self.agents[i];
            boid.apply_force(force);
            boid.update(max_speed, &self.bounds);
        }
    }

    #[cfg(feature = "parallel")]
    fn integrate_agents(&mut self) {
        let forces = self.compute_forces();
        let max_speed = self.config.max_speed;
        for (boid, force) in self.agents.iter_mut().zip(forces) {
            boid.apply_force(force);
            boid.update(max_speed, &self.bounds);
        }
    }

    /// Steering force for every agent, in index order, all read from the current state.
    pub fn compute_forces(&self) -> Vec<Vector2D> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.agents.len())
                .into_par_iter()
                .map(|i| self.steering_force(i))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..self.agents.len()).map(|i| self.steering_force(i)).collect()
        }
    }

    /// Total force on agent `index`: flocking, predator, obstacles, then leader.
    /// `None` when there is no such agent.
    pub fn force_on(&self, index: usize) -> Option<Vector2D> {
        (index < self.agents.len()).then(|| self.steering_force(index))
    }

    fn steering_force(&self, index: usize) -> Vector2D {
        let config = &self.config;
        let boid = &self.agents[index];

        let mut force = behavior::flock(boid, &self.agents, &config.steering, &self.weights);

        if let Some(predator) = &self.predator {
            force += predator.repulsion(boid.position, config.predator_radius, config.predator_strength);
        }

        for obstacle in &self.obstacles {
            force += obstacle.avoidance(boid.position, config.obstacle_margin, config.obstacle_strength);
        }

        if let Some(leader) = self.leader.filter(|leader| leader.get() != index) {
            let target = self.agents[leader.get()].position;
            let pull = behavior::seek_with(
                boid,
                target,
                config.leader_approach_speed,
                config.leader_max_force,
            );
            force += pull * config.leader_weight;
        }

        force
    }

    /// Unordered agent pairs closer than the collision distance.
    pub fn count_collisions(&self) -> u32 {
        let threshold = self.config.collision_distance;
        let mut count = 0;
        for (i, boid) in self.agents.iter().enumerate() {
            for other in &self.agents[i + 1..] {
                if boid.position.distance(&other.position) < threshold {
                    count += 1;
                }
            }
        }
        count
    }
}
