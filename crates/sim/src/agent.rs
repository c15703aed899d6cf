use aircraft_shared::*;
use glam::Vec3;
use tracing::{debug, info, warn};

use crate::checkpoint::CheckpointTracker;
use crate::collaborators::{Course, EnvironmentParameters, RigidBody, SpawnPoint, Trail, Visuals};
use crate::error::AgentError;
use crate::lifecycle::{Lifecycle, SequenceEvent};
use crate::orientation::{thrust_force, Orientation};
use crate::reward::{CollisionResponse, EpisodeTimeout, RewardPolicy};
use crate::smoothing::SmoothedControls;

/// Per-aircraft control loop: smoothing, attitude, checkpoint progress,
/// reward shaping, timeouts and the freeze/explode/respawn lifecycle.
///
/// The agent owns its collaborators and only emits reward deltas; the
/// accumulated reward belongs to whoever drives it.
pub struct AircraftAgent<B, V, T> {
    config: AgentConfig,
    slot: usize,
    body: B,
    visuals: V,
    trail: T,
    parameters: EnvironmentParameters,

    orientation: Orientation,
    controls: SmoothedControls,
    boost: bool,
    tracker: CheckpointTracker,
    rewards: RewardPolicy,
    timeout: EpisodeTimeout,
    lifecycle: Lifecycle,
    step_count: u32,
    explosions: u32,
    /// Set once a terminal outcome is emitted; cleared by `begin_episode`.
    terminated: bool,
}

impl<B: RigidBody, V: Visuals, T: Trail> AircraftAgent<B, V, T> {
    pub fn new(
        config: AgentConfig,
        slot: usize,
        body: B,
        visuals: V,
        trail: T,
        parameters: EnvironmentParameters,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            config,
            slot,
            body,
            visuals,
            trail,
            parameters,
            orientation: Orientation::default(),
            controls: SmoothedControls::default(),
            boost: false,
            tracker: CheckpointTracker::new(),
            rewards: RewardPolicy::new(&config),
            timeout: EpisodeTimeout::new(config.step_timeout),
            lifecycle: Lifecycle::new(config.training_mode, config.dt),
            step_count: 0,
            explosions: 0,
            terminated: false,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn trail(&self) -> &T {
        &self.trail
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn controls(&self) -> SmoothedControls {
        self.controls
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn next_checkpoint_index(&self) -> usize {
        self.tracker.next_index()
    }

    pub fn checkpoints_reached(&self) -> u32 {
        self.tracker.arrivals()
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn deadline(&self) -> Option<u32> {
        self.timeout.deadline()
    }

    pub fn explosions(&self) -> u32 {
        self.explosions
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Reset for a new episode: stop, reposition, rewind progress, re-arm the timeout.
    pub fn begin_episode(&mut self, course: &mut dyn Course) {
        if self.lifecycle.reset() != LifecycleState::Active {
            self.body.wake_up();
            self.visuals.set_mesh_visible(true);
            self.visuals.set_explosion_visible(false);
        }
        self.body.set_velocity(Vec3::ZERO);
        self.body.set_angular_velocity(Vec3::ZERO);
        self.trail.set_emitting(false);
        self.controls = SmoothedControls::default();
        self.boost = false;
        self.step_count = 0;
        self.terminated = false;

        let count = course.checkpoint_count();
        self.tracker.reset(0, count);
        let spawn = course.reset_agent_position(self.slot, 0, self.config.training_mode);
        self.apply_spawn(&spawn, count);

        if self.config.training_mode {
            self.timeout.arm(self.step_count);
        } else {
            self.timeout.disarm();
        }
        info!(
            slot = self.slot,
            training = self.config.training_mode,
            next_checkpoint = self.tracker.next_index(),
            "episode begin"
        );
    }

    /// One fixed tick. Inputs are ignored unless the agent is Active, and
    /// the whole tick is a no-op once the episode has terminated.
    pub fn step(&mut self, input: &ControlInput, course: &mut dyn Course) -> StepOutcome {
        if self.terminated {
            return StepOutcome::default();
        }
        self.step_count += 1;

        if !self.state().accepts_input() {
            self.advance_sequence(course);
            return StepOutcome::default();
        }

        self.boost = input.boost;
        if self.boost && !self.trail.is_emitting() {
            self.trail.clear();
        }
        self.trail.set_emitting(self.boost);

        self.process_movement(input);

        let mut outcome = StepOutcome::reward(self.rewards.step_penalty());

        let radius = self
            .parameters
            .get_with_default(CHECKPOINT_RADIUS_KEY, 0.0);
        let local = self.vector_to_next_checkpoint(course);
        if self.tracker.check_arrival_by_proximity(
            local,
            radius,
            self.step_count,
            course.checkpoint_count(),
        ) {
            outcome.merge(self.on_checkpoint());
        }

        if self.config.training_mode && self.timeout.is_exceeded(self.step_count) {
            info!(step = self.step_count, "step timeout");
            outcome.merge(self.rewards.timeout());
        }

        if let Some(truncated) = self.rewards.max_steps_reached(self.step_count) {
            outcome.merge(truncated);
        }

        self.finish(outcome)
    }

    /// Trigger volume entered. Only the next checkpoint counts.
    pub fn on_trigger_enter(
        &mut self,
        other_tag: &str,
        checkpoint: Option<usize>,
        course: &dyn Course,
    ) -> StepOutcome {
        if self.terminated || other_tag != CHECKPOINT_TAG || !self.lifecycle.is_active() {
            return StepOutcome::default();
        }
        let Some(index) = checkpoint else {
            return StepOutcome::default();
        };
        if self
            .tracker
            .check_arrival_by_contact(index, self.step_count, course.checkpoint_count())
        {
            self.on_checkpoint()
        } else {
            StepOutcome::default()
        }
    }

    /// Solid collision. Anything not tagged as an agent is hostile.
    pub fn on_collision_enter(&mut self, other_tag: &str) -> StepOutcome {
        if self.terminated {
            return StepOutcome::default();
        }
        if !self.lifecycle.is_active() {
            warn!(
                slot = self.slot,
                state = self.state().label(),
                other_tag,
                "collision ignored while not active"
            );
            return StepOutcome::default();
        }

        match self.rewards.on_collision(other_tag) {
            None => StepOutcome::default(),
            Some(CollisionResponse::Terminate(outcome)) => {
                info!(step = self.step_count, other_tag, "collision ends episode");
                self.finish(outcome)
            }
            Some(CollisionResponse::Explode) => {
                self.start_explosion();
                StepOutcome::default()
            }
        }
    }

    /// Stop the agent. Not supported while training.
    pub fn freeze(&mut self) -> Result<(), AgentError> {
        if self.lifecycle.freeze()? {
            self.stop();
        }
        Ok(())
    }

    /// Resume flight after `freeze`. Not supported while training.
    pub fn thaw(&mut self) -> Result<(), AgentError> {
        if self.lifecycle.thaw()? {
            self.body.wake_up();
        }
        Ok(())
    }

    /// Displacement to the next checkpoint in the agent's frame.
    pub fn vector_to_next_checkpoint(&self, course: &dyn Course) -> Vec3 {
        self.tracker
            .vector_to_next(course, self.body.position(), &self.orientation)
    }

    pub fn snapshot(&self, tick: u32) -> AgentSnapshot {
        AgentSnapshot {
            tick,
            position: self.body.position(),
            pitch: self.orientation.pitch,
            yaw: self.orientation.yaw,
            roll: self.orientation.roll,
            speed: self.body.velocity().length(),
            state: self.state(),
            next_checkpoint: self.tracker.next_index(),
            mesh_visible: self.state() != LifecycleState::Exploded,
        }
    }

    fn process_movement(&mut self, input: &ControlInput) {
        let dt = self.config.dt;

        // Thrust along the heading held at the start of the tick
        let force = thrust_force(self.orientation.forward(), &self.config, self.boost);
        self.body.add_force(force);

        self.controls.update(
            input,
            self.orientation.roll,
            self.config.max_roll_angle,
            self.config.smoothing_rate,
            dt,
        );
        self.orientation = self.orientation.integrate(&self.controls, &self.config, dt);
    }

    fn finish(&mut self, outcome: StepOutcome) -> StepOutcome {
        self.terminated |= outcome.is_done();
        outcome
    }

    fn on_checkpoint(&mut self) -> StepOutcome {
        if !self.config.training_mode {
            return StepOutcome::default();
        }
        self.timeout.arm(self.step_count);
        StepOutcome::reward(self.rewards.checkpoint_reward())
    }

    fn start_explosion(&mut self) {
        match self.lifecycle.explode() {
            Ok(true) => {
                self.stop();
                self.visuals.set_mesh_visible(false);
                self.visuals.set_explosion_visible(true);
                self.explosions += 1;
                debug!(slot = self.slot, step = self.step_count, "exploded");
            }
            Ok(false) => {}
            // explode is only reached outside training
            Err(e) => warn!(slot = self.slot, error = %e, "explosion rejected"),
        }
    }

    fn advance_sequence(&mut self, course: &mut dyn Course) {
        match self.lifecycle.advance() {
            SequenceEvent::None => {}
            SequenceEvent::RevealAndRespawn => {
                self.visuals.set_mesh_visible(true);
                self.visuals.set_explosion_visible(false);
                let count = course.checkpoint_count();
                let spawn =
                    course.reset_agent_position(self.slot, self.tracker.next_index(), false);
                self.apply_spawn(&spawn, count);
                debug!(slot = self.slot, step = self.step_count, "respawned");
            }
            SequenceEvent::Thaw => {
                self.body.wake_up();
                debug!(slot = self.slot, step = self.step_count, "thawed");
            }
        }
    }

    fn stop(&mut self) {
        self.body.set_velocity(Vec3::ZERO);
        self.body.set_angular_velocity(Vec3::ZERO);
        self.body.sleep();
        self.trail.set_emitting(false);
    }

    fn apply_spawn(&mut self, spawn: &SpawnPoint, checkpoint_count: usize) {
        self.body.set_position(spawn.position);
        self.orientation = spawn.orientation.clamped(&self.config);
        self.tracker.set_next(spawn.next_checkpoint, checkpoint_count);
    }
}
