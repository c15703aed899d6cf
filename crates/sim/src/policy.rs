use aircraft_shared::{ControlInput, Observation};

pub trait Policy: Send {
    fn name(&self) -> &str;
    fn act(&mut self, obs: &Observation) -> ControlInput;
}

/// Policy that does nothing - useful for testing.
pub struct DoNothingPolicy;

impl Policy for DoNothingPolicy {
    fn name(&self) -> &str {
        "do_nothing"
    }

    fn act(&mut self, _obs: &Observation) -> ControlInput {
        ControlInput::none()
    }
}

/// Direction cosine below which an axis is considered on target.
const AIM_DEADBAND: f32 = 0.05;
/// Boost when the checkpoint is within this cone ahead (~25 deg).
const BOOST_ALIGNMENT: f32 = 0.9;

/// Bang-bang autopilot that steers at the next checkpoint.
pub struct SeekerPolicy;

impl SeekerPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeekerPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for SeekerPolicy {
    fn name(&self) -> &str {
        "seeker"
    }

    fn act(&mut self, obs: &Observation) -> ControlInput {
        let to_next = obs.local_checkpoint();
        let dist = to_next.length();
        if dist < 1e-3 {
            return ControlInput::none();
        }
        let dir = to_next / dist;

        let yaw = if dir.x > AIM_DEADBAND {
            1.0
        } else if dir.x < -AIM_DEADBAND {
            -1.0
        } else if dir.z < 0.0 {
            // Dead astern: commit to a turn
            1.0
        } else {
            0.0
        };

        // Positive pitch is nose down
        let pitch = if dir.y > AIM_DEADBAND {
            -1.0
        } else if dir.y < -AIM_DEADBAND {
            1.0
        } else {
            0.0
        };

        ControlInput {
            pitch,
            yaw,
            boost: dir.z > BOOST_ALIGNMENT,
        }
    }
}

/// Resolve a built-in policy by name.
pub fn policy_by_name(name: &str) -> Option<Box<dyn Policy>> {
    match name {
        "do_nothing" => Some(Box::new(DoNothingPolicy)),
        "seeker" => Some(Box::new(SeekerPolicy::new())),
        _ => None,
    }
}

pub const POLICY_NAMES: &[&str] = &["do_nothing", "seeker"];

#[cfg(test)]
mod tests {
    use super::*;
    use aircraft_shared::OBS_SIZE;

    fn obs_with_target(x: f32, y: f32, z: f32) -> Observation {
        let mut data = [0.0; OBS_SIZE];
        data[3] = x;
        data[4] = y;
        data[5] = z;
        Observation { data }
    }

    #[test]
    fn test_seeker_flies_straight_at_target_ahead() {
        let action = SeekerPolicy::new().act(&obs_with_target(0.0, 0.0, 100.0));
        assert_eq!(action.yaw, 0.0);
        assert_eq!(action.pitch, 0.0);
        assert!(action.boost);
    }

    #[test]
    fn test_seeker_turns_and_climbs_toward_target() {
        let action = SeekerPolicy::new().act(&obs_with_target(-50.0, 30.0, 20.0));
        assert_eq!(action.yaw, -1.0);
        assert_eq!(action.pitch, -1.0);
        assert!(!action.boost);
    }

    #[test]
    fn test_seeker_turns_when_target_is_astern() {
        let action = SeekerPolicy::new().act(&obs_with_target(0.0, 0.0, -100.0));
        assert_eq!(action.yaw, 1.0);
    }

    #[test]
    fn test_policy_by_name() {
        for name in POLICY_NAMES {
            assert_eq!(policy_by_name(name).unwrap().name(), *name);
        }
        assert!(policy_by_name("chaser").is_none());
    }
}
