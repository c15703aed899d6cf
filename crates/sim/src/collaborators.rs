//! Narrow capability traits for everything the agent drives but does not own:
//! the rigid body, the visual layer, the motion trail and the course.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// Force application and velocity control, owned by the physics engine.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);
    /// Continuous force, applied over the next integration step.
    fn add_force(&mut self, force: Vec3);
    fn sleep(&mut self);
    fn wake_up(&mut self);
}

/// Mesh and explosion-effect visibility.
pub trait Visuals {
    fn set_mesh_visible(&mut self, visible: bool);
    fn set_explosion_visible(&mut self, visible: bool);
}

pub trait Trail {
    fn is_emitting(&self) -> bool;
    fn set_emitting(&mut self, emitting: bool);
    fn clear(&mut self);
}

/// Where the course manager placed an agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub orientation: Orientation,
    pub next_checkpoint: usize,
}

/// Read access to the checkpoint circuit plus spawn placement.
pub trait Course {
    fn checkpoint_count(&self) -> usize;
    fn checkpoint_position(&self, index: usize) -> Vec3;

    /// Place agent `slot` at the checkpoint before `next_checkpoint`.
    /// With `randomize`, the course picks the next checkpoint itself.
    fn reset_agent_position(
        &mut self,
        slot: usize,
        next_checkpoint: usize,
        randomize: bool,
    ) -> SpawnPoint;
}

/// Runtime-tunable environment parameters supplied by the training orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentParameters {
    values: HashMap<String, f32>,
}

impl EnvironmentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: f32) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get_with_default(&self, key: &str, default: f32) -> f32 {
        self.values.get(key).copied().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aircraft_shared::CHECKPOINT_RADIUS_KEY;

    #[test]
    fn test_parameters_fall_back_to_default() {
        let params = EnvironmentParameters::new();
        assert_eq!(params.get_with_default(CHECKPOINT_RADIUS_KEY, 0.0), 0.0);

        let params = params.with(CHECKPOINT_RADIUS_KEY, 25.0);
        assert_eq!(params.get_with_default(CHECKPOINT_RADIUS_KEY, 0.0), 25.0);
    }
}
