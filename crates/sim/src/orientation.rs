use aircraft_shared::AgentConfig;
use glam::{EulerRot, Quat, Vec3};

use crate::smoothing::SmoothedControls;

/// Euler attitude in degrees. Pitch and roll are kept in
/// [-max_angle, max_angle]; yaw is a free heading in [0, 360).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Orientation {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Level attitude pointing along `direction`. Positive pitch is nose down.
    pub fn facing(direction: Vec3) -> Self {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::default();
        }
        let yaw = dir.x.atan2(dir.z).to_degrees();
        let pitch = (-dir.y).clamp(-1.0, 1.0).asin().to_degrees();
        Self::new(pitch, yaw.rem_euclid(360.0), 0.0)
    }

    /// Yaw about Y, then pitch about X, then roll about Z.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Express a world-space direction in the agent's frame.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * world
    }

    /// Normalize and clamp pitch/roll to the configured envelope.
    pub fn clamped(self, config: &AgentConfig) -> Self {
        Self {
            pitch: normalize_angle(self.pitch).clamp(-config.max_pitch_angle, config.max_pitch_angle),
            yaw: self.yaw.rem_euclid(360.0),
            roll: normalize_angle(self.roll).clamp(-config.max_roll_angle, config.max_roll_angle),
        }
    }

    /// One integration step: `angle + delta * dt * axis_speed` per axis.
    pub fn integrate(&self, deltas: &SmoothedControls, config: &AgentConfig, dt: f32) -> Self {
        Self {
            pitch: self.pitch + deltas.pitch * dt * config.pitch_speed,
            yaw: self.yaw + deltas.yaw * dt * config.yaw_speed,
            roll: self.roll + deltas.roll * dt * config.roll_speed,
        }
        .clamped(config)
    }
}

/// Normalize degrees to (-180, 180].
pub fn normalize_angle(degrees: f32) -> f32 {
    let a = degrees.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Forward thrust vector handed to the rigid body.
pub fn thrust_force(forward: Vec3, config: &AgentConfig, boost: bool) -> Vec3 {
    let boost_modifier = if boost { config.boost_multiplier } else { 1.0 };
    forward * config.thrust * boost_modifier
}
