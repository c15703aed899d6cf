use aircraft_shared::ControlInput;

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Roll intent: bank into a turn, otherwise level out proportionally.
pub fn roll_target(yaw_input: f32, roll_angle: f32, max_roll_angle: f32) -> f32 {
    if yaw_input == 0.0 {
        (-roll_angle / max_roll_angle).clamp(-1.0, 1.0)
    } else {
        -yaw_input
    }
}

/// Rate-limited control deltas, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedControls {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl SmoothedControls {
    /// Advance all three axes toward this tick's targets.
    pub fn update(
        &mut self,
        input: &ControlInput,
        roll_angle: f32,
        max_roll_angle: f32,
        rate: f32,
        dt: f32,
    ) {
        let max_delta = rate * dt;
        let roll = roll_target(input.yaw, roll_angle, max_roll_angle);
        self.pitch = move_towards(self.pitch, input.pitch, max_delta);
        self.yaw = move_towards(self.yaw, input.yaw, max_delta);
        self.roll = move_towards(self.roll, roll, max_delta);
    }
}
