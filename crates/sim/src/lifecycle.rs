//! Active / Frozen / Exploded lifecycle of one aircraft.
//!
//! The explosion sequence spans many ticks. It is held as an explicit
//! phase plus countdown and advanced once per tick, so the per-tick step
//! never blocks. Collaborator side effects are left to the caller, which
//! reacts to the [`SequenceEvent`] each advance returns.

use aircraft_shared::{LifecycleState, EXPLOSION_DURATION_SECS, RESPAWN_SETTLE_SECS};
use tracing::debug;

use crate::error::AgentError;

/// Respawn has no phase of its own: it happens on the
/// `HidingMesh` to `WaitingThaw` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionPhase {
    /// Mesh hidden, explosion effect shown.
    HidingMesh,
    /// Mesh back at the respawn point, still frozen.
    WaitingThaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplosionSequence {
    pub phase: ExplosionPhase,
    pub ticks_remaining: u32,
}

/// Side effect due on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    None,
    /// Hide the explosion, show the mesh, respawn.
    RevealAndRespawn,
    Thaw,
}

/// Number of fixed ticks covering `secs`; never zero.
pub fn ticks_for(secs: f32, dt: f32) -> u32 {
    ((secs / dt).round() as u32).max(1)
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: LifecycleState,
    sequence: Option<ExplosionSequence>,
    training: bool,
    hide_ticks: u32,
    thaw_ticks: u32,
}

impl Lifecycle {
    pub fn new(training: bool, dt: f32) -> Self {
        Self {
            state: LifecycleState::Active,
            sequence: None,
            training,
            hide_ticks: ticks_for(EXPLOSION_DURATION_SECS, dt),
            thaw_ticks: ticks_for(RESPAWN_SETTLE_SECS, dt),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn sequence(&self) -> Option<ExplosionSequence> {
        self.sequence
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// Active → Frozen. Returns whether the state changed.
    pub fn freeze(&mut self) -> Result<bool, AgentError> {
        if self.training {
            return Err(AgentError::FreezeInTraining);
        }
        if self.state != LifecycleState::Active {
            return Ok(false);
        }
        self.transition(LifecycleState::Frozen);
        Ok(true)
    }

    /// Frozen → Active. Returns whether the state changed.
    pub fn thaw(&mut self) -> Result<bool, AgentError> {
        if self.training {
            return Err(AgentError::ThawInTraining);
        }
        if self.sequence.is_some() {
            return Err(AgentError::ExplosionInProgress);
        }
        if self.state != LifecycleState::Frozen {
            return Ok(false);
        }
        self.transition(LifecycleState::Active);
        Ok(true)
    }

    /// Start the explosion sequence from Active, passing through Frozen.
    /// Returns false if the agent is not Active.
    pub fn explode(&mut self) -> Result<bool, AgentError> {
        if !self.freeze()? {
            return Ok(false);
        }
        self.transition(LifecycleState::Exploded);
        self.sequence = Some(ExplosionSequence {
            phase: ExplosionPhase::HidingMesh,
            ticks_remaining: self.hide_ticks,
        });
        Ok(true)
    }

    /// Count one tick off the running sequence.
    pub fn advance(&mut self) -> SequenceEvent {
        let Some(seq) = self.sequence.as_mut() else {
            return SequenceEvent::None;
        };
        seq.ticks_remaining = seq.ticks_remaining.saturating_sub(1);
        if seq.ticks_remaining > 0 {
            return SequenceEvent::None;
        }

        let phase = seq.phase;
        match phase {
            ExplosionPhase::HidingMesh => {
                seq.phase = ExplosionPhase::WaitingThaw;
                seq.ticks_remaining = self.thaw_ticks;
                self.transition(LifecycleState::Frozen);
                SequenceEvent::RevealAndRespawn
            }
            ExplosionPhase::WaitingThaw => {
                self.sequence = None;
                self.transition(LifecycleState::Active);
                SequenceEvent::Thaw
            }
        }
    }

    /// Back to Active for a new episode. Returns the state we left.
    pub fn reset(&mut self) -> LifecycleState {
        let previous = self.state;
        self.sequence = None;
        self.state = LifecycleState::Active;
        previous
    }

    fn transition(&mut self, to: LifecycleState) {
        debug!(from = self.state.label(), to = to.label(), "lifecycle transition");
        self.state = to;
    }
}
