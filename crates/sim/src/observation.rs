use aircraft_shared::*;

use crate::agent::AircraftAgent;
use crate::collaborators::{Course, RigidBody, Trail, Visuals};

impl<B: RigidBody, V: Visuals, T: Trail> AircraftAgent<B, V, T> {
    /// Observation vector for the policy (6 floats).
    ///
    /// [0..3) velocity in the agent frame, [3..6) vector to the next
    /// checkpoint in the agent frame.
    pub fn observe(&self, course: &dyn Course) -> Observation {
        let mut data = [0.0f32; OBS_SIZE];
        let velocity = self.orientation().to_local(self.body().velocity());
        let to_next = self.vector_to_next_checkpoint(course);
        data[..3].copy_from_slice(&velocity.to_array());
        data[3..].copy_from_slice(&to_next.to_array());
        Observation { data }
    }
}
