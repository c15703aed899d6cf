use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::EpisodeConfig;

/// One tick of control input: pitch and yaw in [-1, 1], boost on/off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub pitch: f32,
    pub yaw: f32,
    pub boost: bool,
}

impl ControlInput {
    pub fn none() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            boost: false,
        }
    }

    /// Decode a raw `[pitch, yaw, boost]` action vector.
    ///
    /// Axes are clamped to [-1, 1] and NaN reads as neutral. Boost is on when
    /// the raw value reaches `BOOST_THRESHOLD`.
    pub fn from_raw(raw: [f32; crate::ACTION_SIZE]) -> Self {
        Self {
            pitch: sanitize_axis(raw[0]),
            yaw: sanitize_axis(raw[1]),
            boost: raw[2] >= crate::BOOST_THRESHOLD,
        }
    }
}

impl Default for ControlInput {
    fn default() -> Self {
        Self::none()
    }
}

fn sanitize_axis(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

/// Lifecycle of a single aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Normal flight, control inputs accepted.
    Active,
    /// Disabled; inputs ignored, body asleep, no reward or timeout processing.
    Frozen,
    /// Mesh hidden behind the explosion effect. Only reachable outside training.
    Exploded,
}

impl LifecycleState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Frozen => "Frozen",
            Self::Exploded => "Exploded",
        }
    }

    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Why a training episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// The step deadline passed without reaching a checkpoint.
    Timeout,
    /// Hit something that is not another agent.
    Collision,
    /// The per-episode step budget ran out.
    MaxSteps,
}

/// Reward delta and termination signal produced by a tick or an event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepOutcome {
    pub reward: f32,
    pub done: Option<EpisodeEnd>,
}

impl StepOutcome {
    pub fn reward(reward: f32) -> Self {
        Self { reward, done: None }
    }

    pub fn terminal(reward: f32, end: EpisodeEnd) -> Self {
        Self {
            reward,
            done: Some(end),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.is_some()
    }

    /// Fold a later outcome into this one. The first termination wins.
    pub fn merge(&mut self, other: StepOutcome) {
        self.reward += other.reward;
        if self.done.is_none() {
            self.done = other.done;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Observation {
    pub data: [f32; crate::OBS_SIZE],
}

impl Observation {
    pub fn local_checkpoint(&self) -> Vec3 {
        Vec3::new(self.data[3], self.data[4], self.data[5])
    }
}

impl serde::Serialize for Observation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.as_slice().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Observation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v: Vec<f32> = Vec::deserialize(deserializer)?;
        if v.len() != crate::OBS_SIZE {
            return Err(serde::de::Error::custom(format!(
                "expected {} floats, got {}",
                crate::OBS_SIZE,
                v.len()
            )));
        }
        let mut data = [0.0f32; crate::OBS_SIZE];
        data.copy_from_slice(&v);
        Ok(Observation { data })
    }
}

/// Periodic capture of one agent for reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub tick: u32,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub speed: f32,
    pub state: LifecycleState,
    pub next_checkpoint: usize,
    pub mesh_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub config: EpisodeConfig,
    pub frames: Vec<AgentSnapshot>,
    pub result: EpisodeResult,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeResult {
    /// `None` when the tick budget ran out outside training.
    pub end: Option<EpisodeEnd>,
    pub final_tick: u32,
    pub total_reward: f32,
    pub checkpoints_reached: u32,
    pub explosions: u32,
}
