//! Minimal stand-ins for the engine collaborators so episodes can run
//! without a physics or rendering backend.

use aircraft_shared::{DEFAULT_BODY_DRAG, DEFAULT_BODY_MASS};
use glam::Vec3;

use crate::collaborators::{RigidBody, Trail, Visuals};

/// Point-mass body with linear drag. Forces accumulate until `integrate`.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    position: Vec3,
    velocity: Vec3,
    pending_force: Vec3,
    mass: f32,
    drag: f32,
    asleep: bool,
}

impl KinematicBody {
    pub fn new(mass: f32, drag: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            pending_force: Vec3::ZERO,
            mass,
            drag,
            asleep: false,
        }
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Advance one physics step. Sleeping bodies drop their forces.
    pub fn integrate(&mut self, dt: f32) {
        let force = std::mem::take(&mut self.pending_force);
        if self.asleep {
            return;
        }
        self.velocity += force / self.mass * dt;
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        self.position += self.velocity * dt;
    }
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_MASS, DEFAULT_BODY_DRAG)
    }
}

impl RigidBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    // Point masses carry no spin
    fn set_angular_velocity(&mut self, _angular_velocity: Vec3) {}

    fn add_force(&mut self, force: Vec3) {
        self.pending_force += force;
    }

    fn sleep(&mut self) {
        self.asleep = true;
        self.velocity = Vec3::ZERO;
        self.pending_force = Vec3::ZERO;
    }

    fn wake_up(&mut self) {
        self.asleep = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessVisuals {
    pub mesh_visible: bool,
    pub explosion_visible: bool,
}

impl Default for HeadlessVisuals {
    fn default() -> Self {
        Self {
            mesh_visible: true,
            explosion_visible: false,
        }
    }
}

impl Visuals for HeadlessVisuals {
    fn set_mesh_visible(&mut self, visible: bool) {
        self.mesh_visible = visible;
    }

    fn set_explosion_visible(&mut self, visible: bool) {
        self.explosion_visible = visible;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessTrail {
    pub emitting: bool,
    pub clears: u32,
}

impl Trail for HeadlessTrail {
    fn is_emitting(&self) -> bool {
        self.emitting
    }

    fn set_emitting(&mut self, emitting: bool) {
        self.emitting = emitting;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aircraft_shared::{DEFAULT_THRUST, DT};

    #[test]
    fn test_thrust_approaches_terminal_speed() {
        let mut body = KinematicBody::default();
        for _ in 0..1000 {
            body.add_force(Vec3::Z * DEFAULT_THRUST);
            body.integrate(DT);
        }
        let terminal = DEFAULT_THRUST / (DEFAULT_BODY_MASS * DEFAULT_BODY_DRAG);
        let speed = body.velocity().length();
        assert!((speed - terminal).abs() / terminal < 0.05, "speed {speed}");
        assert!(body.position().z > 0.0);
    }

    #[test]
    fn test_sleeping_body_holds_still() {
        let mut body = KinematicBody::default();
        body.set_velocity(Vec3::new(10.0, 0.0, 0.0));
        body.sleep();
        assert!(body.is_asleep());
        body.add_force(Vec3::Z * DEFAULT_THRUST);
        body.integrate(DT);
        assert_eq!(body.velocity(), Vec3::ZERO);
        assert_eq!(body.position(), Vec3::ZERO);

        body.wake_up();
        assert!(!body.is_asleep());
        body.add_force(Vec3::Z * DEFAULT_THRUST);
        body.integrate(DT);
        assert!(body.velocity().z > 0.0);
    }
}
