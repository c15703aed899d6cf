use aircraft_shared::*;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::collaborators::{Course, SpawnPoint};
use crate::orientation::Orientation;

/// What a body overlaps this physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Nearest checkpoint trigger the body is inside.
    pub checkpoint: Option<usize>,
    pub ground: bool,
}

/// Closed loop of checkpoints over a flat ground plane.
#[derive(Debug, Clone)]
pub struct CheckpointCircuit {
    checkpoints: Vec<Vec3>,
    trigger_radius: f32,
    agent_count: usize,
    rng: Pcg64,
}

impl CheckpointCircuit {
    pub fn new(
        checkpoints: Vec<Vec3>,
        trigger_radius: f32,
        agent_count: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if checkpoints.is_empty() {
            return Err(ConfigError::EmptyCircuit);
        }
        Ok(Self {
            checkpoints,
            trigger_radius,
            agent_count: agent_count.max(1),
            rng: Pcg64::seed_from_u64(seed),
        })
    }

    /// Evenly spaced checkpoints on a horizontal circle.
    pub fn ring(config: &CircuitConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.checkpoint_count;
        let checkpoints = (0..n)
            .map(|i| {
                let theta = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec3::new(
                    config.radius * theta.cos(),
                    config.altitude,
                    config.radius * theta.sin(),
                )
            })
            .collect();
        Self::new(checkpoints, config.trigger_radius, config.agent_count, seed)
    }

    pub fn checkpoints(&self) -> &[Vec3] {
        &self.checkpoints
    }

    pub fn contacts(&self, position: Vec3) -> Contacts {
        let radius_sq = self.trigger_radius * self.trigger_radius;
        let checkpoint = self
            .checkpoints
            .iter()
            .enumerate()
            .map(|(i, c)| (i, (*c - position).length_squared()))
            .filter(|(_, d)| *d <= radius_sq)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i);

        Contacts {
            checkpoint,
            ground: position.y <= GROUND_ALTITUDE,
        }
    }
}

impl Course for CheckpointCircuit {
    fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    fn checkpoint_position(&self, index: usize) -> Vec3 {
        self.checkpoints[index % self.checkpoints.len()]
    }

    fn reset_agent_position(
        &mut self,
        slot: usize,
        next_checkpoint: usize,
        randomize: bool,
    ) -> SpawnPoint {
        let count = self.checkpoints.len();
        let next = if randomize {
            self.rng.gen_range(0..count)
        } else {
            next_checkpoint % count
        };
        let previous = (next + count - 1) % count;

        let base = self.checkpoints[previous];
        let orientation = Orientation::facing(self.checkpoints[next] - base);

        // Spread agents abreast so they do not spawn inside each other
        let lateral = orientation.rotation() * Vec3::X;
        let offset = (slot as f32 - self.agent_count as f32 / 2.0) * SPAWN_LATERAL_SPACING;

        SpawnPoint {
            position: base + lateral * offset,
            orientation,
            next_checkpoint: next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_layout() {
        let config = CircuitConfig::default();
        let circuit = CheckpointCircuit::ring(&config, 0).unwrap();
        assert_eq!(circuit.checkpoint_count(), config.checkpoint_count);
        for c in circuit.checkpoints() {
            assert!((c.y - config.altitude).abs() < 1e-4);
            assert!((Vec3::new(c.x, 0.0, c.z).length() - config.radius).abs() < 1e-2);
        }
    }

    #[test]
    fn test_spawn_at_previous_checkpoint_facing_next() {
        let config = CircuitConfig::default();
        let mut circuit = CheckpointCircuit::ring(&config, 0).unwrap();
        let spawn = circuit.reset_agent_position(0, 0, false);

        assert_eq!(spawn.next_checkpoint, 0);
        let previous = circuit.checkpoints()[config.checkpoint_count - 1];
        assert!((spawn.position - previous).length() <= SPAWN_LATERAL_SPACING);

        let to_next = (circuit.checkpoints()[0] - spawn.position).normalize();
        assert!(spawn.orientation.forward().dot(to_next) > 0.99);
    }

    #[test]
    fn test_randomized_spawn_is_seeded() {
        let config = CircuitConfig::default();
        let mut a = CheckpointCircuit::ring(&config, 9).unwrap();
        let mut b = CheckpointCircuit::ring(&config, 9).unwrap();
        for _ in 0..20 {
            let sa = a.reset_agent_position(0, 0, true);
            let sb = b.reset_agent_position(0, 0, true);
            assert_eq!(sa.next_checkpoint, sb.next_checkpoint);
            assert!(sa.next_checkpoint < config.checkpoint_count);
        }
    }

    #[test]
    fn test_contacts() {
        let config = CircuitConfig::default();
        let circuit = CheckpointCircuit::ring(&config, 0).unwrap();
        let c2 = circuit.checkpoints()[2];

        let inside = circuit.contacts(c2 + Vec3::new(0.0, 0.0, config.trigger_radius * 0.5));
        assert_eq!(inside.checkpoint, Some(2));
        assert!(!inside.ground);

        let outside = circuit.contacts(c2 + Vec3::new(0.0, 0.0, config.trigger_radius * 2.0));
        assert_eq!(outside.checkpoint, None);

        let grounded = circuit.contacts(Vec3::new(0.0, -1.0, 0.0));
        assert!(grounded.ground);
    }

    #[test]
    fn test_empty_circuit_rejected() {
        assert_eq!(
            CheckpointCircuit::new(Vec::new(), 10.0, 1, 0).unwrap_err(),
            ConfigError::EmptyCircuit
        );
    }
}
