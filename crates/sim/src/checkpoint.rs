use glam::Vec3;
use tracing::debug;

use crate::collaborators::Course;
use crate::orientation::Orientation;

/// Progress through a circular checkpoint course.
#[derive(Debug, Clone, Default)]
pub struct CheckpointTracker {
    next_index: usize,
    arrivals: u32,
    /// Step of the most recent arrival; at most one arrival per step.
    last_arrival_step: Option<u32>,
}

impl CheckpointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Arrivals since the last `reset`.
    pub fn arrivals(&self) -> u32 {
        self.arrivals
    }

    pub fn reset(&mut self, next_index: usize, checkpoint_count: usize) {
        self.set_next(next_index, checkpoint_count);
        self.arrivals = 0;
        self.last_arrival_step = None;
    }

    /// Point at a new next checkpoint without touching the arrival count.
    pub fn set_next(&mut self, next_index: usize, checkpoint_count: usize) {
        self.next_index = if checkpoint_count == 0 {
            0
        } else {
            next_index % checkpoint_count
        };
    }

    /// Displacement to the next checkpoint in the agent's local frame.
    pub fn vector_to_next(
        &self,
        course: &dyn Course,
        position: Vec3,
        orientation: &Orientation,
    ) -> Vec3 {
        let target = course.checkpoint_position(self.next_index);
        orientation.to_local(target - position)
    }

    /// Arrive when the next checkpoint is strictly closer than `radius`.
    pub fn check_arrival_by_proximity(
        &mut self,
        local_to_next: Vec3,
        radius: f32,
        step: u32,
        checkpoint_count: usize,
    ) -> bool {
        if local_to_next.length() < radius {
            self.arrive(step, checkpoint_count)
        } else {
            false
        }
    }

    /// Arrive when the contacted checkpoint is the one we are looking for.
    pub fn check_arrival_by_contact(
        &mut self,
        contacted: usize,
        step: u32,
        checkpoint_count: usize,
    ) -> bool {
        if contacted == self.next_index {
            self.arrive(step, checkpoint_count)
        } else {
            false
        }
    }

    fn arrive(&mut self, step: u32, checkpoint_count: usize) -> bool {
        if checkpoint_count == 0 || self.last_arrival_step == Some(step) {
            return false;
        }
        let reached = self.next_index;
        self.next_index = (self.next_index + 1) % checkpoint_count;
        self.arrivals += 1;
        self.last_arrival_step = Some(step);
        debug!(step, reached, next = self.next_index, "checkpoint reached");
        true
    }
}
