use aircraft_shared::*;

/// Reward shaping. Everything here is training-only; racing emits nothing.
#[derive(Debug, Clone, Copy)]
pub struct RewardPolicy {
    training: bool,
    max_steps: Option<u32>,
}

/// What a hostile collision turns into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionResponse {
    /// Training: penalize and end the episode.
    Terminate(StepOutcome),
    /// Racing: run the explosion/respawn sequence.
    Explode,
}

impl RewardPolicy {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            training: config.training_mode,
            max_steps: config.max_steps(),
        }
    }

    pub fn max_steps(&self) -> Option<u32> {
        self.max_steps
    }

    /// `-1 / max_steps` per tick; skipped when the episode is unbounded.
    pub fn step_penalty(&self) -> f32 {
        match self.max_steps {
            Some(n) if n > 0 => -1.0 / n as f32,
            _ => 0.0,
        }
    }

    pub fn checkpoint_reward(&self) -> f32 {
        if self.training {
            CHECKPOINT_REWARD
        } else {
            0.0
        }
    }

    pub fn timeout(&self) -> StepOutcome {
        StepOutcome::terminal(TIMEOUT_PENALTY, EpisodeEnd::Timeout)
    }

    /// `None` when the collider is another agent.
    pub fn on_collision(&self, other_tag: &str) -> Option<CollisionResponse> {
        if other_tag == AGENT_TAG {
            return None;
        }
        Some(if self.training {
            CollisionResponse::Terminate(StepOutcome::terminal(
                COLLISION_PENALTY,
                EpisodeEnd::Collision,
            ))
        } else {
            CollisionResponse::Explode
        })
    }

    /// Truncation once the step budget is spent.
    pub fn max_steps_reached(&self, step: u32) -> Option<StepOutcome> {
        match self.max_steps {
            Some(n) if n > 0 && step >= n => Some(StepOutcome::terminal(0.0, EpisodeEnd::MaxSteps)),
            _ => None,
        }
    }
}

/// Step deadline pushed forward on every checkpoint. Armed only in training.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeTimeout {
    step_timeout: u32,
    deadline: Option<u32>,
}

impl EpisodeTimeout {
    pub fn new(step_timeout: u32) -> Self {
        Self {
            step_timeout,
            deadline: None,
        }
    }

    pub fn deadline(&self) -> Option<u32> {
        self.deadline
    }

    pub fn arm(&mut self, current_step: u32) {
        self.deadline = Some(current_step.saturating_add(self.step_timeout));
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_exceeded(&self, current_step: u32) -> bool {
        self.deadline.is_some_and(|deadline| current_step > deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_penalty_sums_to_minus_one() {
        let policy = RewardPolicy::new(&AgentConfig::training());
        let total: f32 = (0..TRAINING_MAX_STEPS).map(|_| policy.step_penalty()).sum();
        assert!((total + 1.0).abs() < 1e-4, "got {total}");
    }

    #[test]
    fn test_racing_has_no_shaping() {
        let policy = RewardPolicy::new(&AgentConfig::default());
        assert_eq!(policy.max_steps(), None);
        assert_eq!(policy.step_penalty(), 0.0);
        assert_eq!(policy.checkpoint_reward(), 0.0);
        assert_eq!(policy.max_steps_reached(1_000_000), None);
    }

    #[test]
    fn test_collision_responses() {
        let training = RewardPolicy::new(&AgentConfig::training());
        let racing = RewardPolicy::new(&AgentConfig::default());

        assert_eq!(training.on_collision(AGENT_TAG), None);
        assert_eq!(racing.on_collision(AGENT_TAG), None);
        assert_eq!(
            training.on_collision("wall"),
            Some(CollisionResponse::Terminate(StepOutcome::terminal(
                -1.0,
                EpisodeEnd::Collision
            )))
        );
        assert_eq!(racing.on_collision("wall"), Some(CollisionResponse::Explode));
        // Unknown tags fall through to the hostile path
        assert_eq!(racing.on_collision(""), Some(CollisionResponse::Explode));
    }

    #[test]
    fn test_timeout_fires_after_deadline_not_at_it() {
        let mut timeout = EpisodeTimeout::new(300);
        assert!(!timeout.is_exceeded(10_000));

        timeout.arm(0);
        assert_eq!(timeout.deadline(), Some(300));
        assert!(!timeout.is_exceeded(300));
        assert!(timeout.is_exceeded(301));

        timeout.arm(50);
        assert_eq!(timeout.deadline(), Some(350));
        assert!(!timeout.is_exceeded(301));
    }

    #[test]
    fn test_max_steps_truncation() {
        let policy = RewardPolicy::new(&AgentConfig::training());
        assert_eq!(policy.max_steps_reached(TRAINING_MAX_STEPS - 1), None);
        assert_eq!(
            policy.max_steps_reached(TRAINING_MAX_STEPS),
            Some(StepOutcome::terminal(0.0, EpisodeEnd::MaxSteps))
        );
    }
}
