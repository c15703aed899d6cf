use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in (0, 180) degrees, got {value}")]
    AngleOutOfRange { name: &'static str, value: f32 },
    #[error("step_timeout must be at least one step")]
    ZeroStepTimeout,
    #[error("a circuit needs at least one checkpoint")]
    EmptyCircuit,
}

/// Construction-time tunables for one aircraft. Immutable once the agent is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub thrust: f32,
    pub pitch_speed: f32,
    pub yaw_speed: f32,
    pub roll_speed: f32,
    pub boost_multiplier: f32,
    pub max_pitch_angle: f32,
    pub max_roll_angle: f32,
    pub smoothing_rate: f32,
    pub step_timeout: u32,
    pub training_mode: bool,
    pub dt: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            thrust: DEFAULT_THRUST,
            pitch_speed: DEFAULT_PITCH_SPEED,
            yaw_speed: DEFAULT_YAW_SPEED,
            roll_speed: DEFAULT_ROLL_SPEED,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
            max_pitch_angle: MAX_PITCH_ANGLE,
            max_roll_angle: MAX_ROLL_ANGLE,
            smoothing_rate: SMOOTHING_RATE,
            step_timeout: DEFAULT_STEP_TIMEOUT,
            training_mode: false,
            dt: DT,
        }
    }
}

impl AgentConfig {
    pub fn training() -> Self {
        Self {
            training_mode: true,
            ..Default::default()
        }
    }

    /// Episode step budget: bounded while training, unbounded when racing.
    pub fn max_steps(&self) -> Option<u32> {
        self.training_mode.then_some(TRAINING_MAX_STEPS)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("thrust", self.thrust)?;
        positive("pitch_speed", self.pitch_speed)?;
        positive("yaw_speed", self.yaw_speed)?;
        positive("roll_speed", self.roll_speed)?;
        positive("boost_multiplier", self.boost_multiplier)?;
        positive("smoothing_rate", self.smoothing_rate)?;
        positive("dt", self.dt)?;
        angle("max_pitch_angle", self.max_pitch_angle)?;
        angle("max_roll_angle", self.max_roll_angle)?;
        if self.step_timeout == 0 {
            return Err(ConfigError::ZeroStepTimeout);
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn angle(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(ConfigError::AngleOutOfRange { name, value })
    }
}

/// Shape of the headless ring course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    pub checkpoint_count: usize,
    pub radius: f32,
    pub altitude: f32,
    /// Radius of each checkpoint's trigger volume.
    pub trigger_radius: f32,
    pub agent_count: usize,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            checkpoint_count: DEFAULT_CHECKPOINT_COUNT,
            radius: DEFAULT_CIRCUIT_RADIUS,
            altitude: DEFAULT_CIRCUIT_ALTITUDE,
            trigger_radius: DEFAULT_TRIGGER_RADIUS,
            agent_count: 1,
        }
    }
}

impl CircuitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checkpoint_count == 0 {
            return Err(ConfigError::EmptyCircuit);
        }
        positive("radius", self.radius)?;
        positive("trigger_radius", self.trigger_radius)?;
        Ok(())
    }
}

/// Everything the headless driver needs to run one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub seed: u64,
    pub policy: String,
    pub agent: AgentConfig,
    pub circuit: CircuitConfig,
    /// Proximity arrival radius; 0 disables the proximity channel.
    pub checkpoint_radius: f32,
    pub max_ticks: u32,
    pub frame_interval: u32,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            policy: "seeker".into(),
            agent: AgentConfig::default(),
            circuit: CircuitConfig::default(),
            checkpoint_radius: 0.0,
            max_ticks: TRAINING_MAX_STEPS,
            frame_interval: FRAME_INTERVAL,
        }
    }
}

impl EpisodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;
        self.circuit.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(AgentConfig::default().validate(), Ok(()));
        assert_eq!(EpisodeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_max_steps_only_in_training() {
        assert_eq!(AgentConfig::default().max_steps(), None);
        assert_eq!(AgentConfig::training().max_steps(), Some(TRAINING_MAX_STEPS));
    }

    #[test]
    fn test_rejects_degenerate_values() {
        let cfg = AgentConfig {
            pitch_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                name: "pitch_speed",
                value: -1.0
            })
        );

        let cfg = AgentConfig {
            max_roll_angle: 180.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::AngleOutOfRange { name: "max_roll_angle", .. })
        ));

        let cfg = AgentConfig {
            step_timeout: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroStepTimeout));

        let circuit = CircuitConfig {
            checkpoint_count: 0,
            ..Default::default()
        };
        assert_eq!(circuit.validate(), Err(ConfigError::EmptyCircuit));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: EpisodeConfig =
            serde_json::from_str(r#"{ "seed": 7, "agent": { "training_mode": true } }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert!(cfg.agent.training_mode);
        assert_eq!(cfg.agent.step_timeout, DEFAULT_STEP_TIMEOUT);
        assert_eq!(cfg.circuit, CircuitConfig::default());
    }
}
