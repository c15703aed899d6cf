use aircraft_shared::*;
use tracing::info;

use crate::agent::AircraftAgent;
use crate::collaborators::{EnvironmentParameters, RigidBody};
use crate::course::CheckpointCircuit;
use crate::error::AgentError;
use crate::headless::{HeadlessTrail, HeadlessVisuals, KinematicBody};
use crate::policy::Policy;

pub type HeadlessAgent = AircraftAgent<KinematicBody, HeadlessVisuals, HeadlessTrail>;

/// Build a headless agent for `config`. The episode has not begun yet.
pub fn headless_agent(config: &EpisodeConfig) -> Result<HeadlessAgent, AgentError> {
    let parameters =
        EnvironmentParameters::new().with(CHECKPOINT_RADIUS_KEY, config.checkpoint_radius);
    AircraftAgent::new(
        config.agent,
        0,
        KinematicBody::default(),
        HeadlessVisuals::default(),
        HeadlessTrail::default(),
        parameters,
    )
}

/// Fly one deterministic episode on the headless ring circuit.
///
/// Training episodes stop at the first termination; racing runs until
/// `max_ticks`.
pub fn run_episode(config: &EpisodeConfig, policy: &mut dyn Policy) -> Result<EpisodeReport, AgentError> {
    config.validate()?;
    let mut circuit = CheckpointCircuit::ring(&config.circuit, config.seed)?;
    let mut agent = headless_agent(config)?;
    agent.begin_episode(&mut circuit);

    let frame_interval = config.frame_interval.max(1);
    let dt = config.agent.dt;
    let mut frames = vec![agent.snapshot(0)];
    let mut total_reward = 0.0f32;
    let mut end = None;
    let mut inside_checkpoint = None;
    let mut tick = 0;

    while tick < config.max_ticks {
        let obs = agent.observe(&circuit);
        let input = policy.act(&obs);
        let mut outcome = agent.step(&input, &mut circuit);

        agent.body_mut().integrate(dt);

        // Checkpoint triggers fire on entry; the ground is solid while flying
        let contacts = circuit.contacts(agent.body().position());
        if contacts.checkpoint != inside_checkpoint {
            if let (Some(index), false) = (contacts.checkpoint, outcome.is_done()) {
                outcome.merge(agent.on_trigger_enter(CHECKPOINT_TAG, Some(index), &circuit));
            }
            inside_checkpoint = contacts.checkpoint;
        }
        if contacts.ground && !outcome.is_done() && agent.state() == LifecycleState::Active {
            outcome.merge(agent.on_collision_enter(GROUND_TAG));
        }

        total_reward += outcome.reward;
        tick += 1;

        if tick % frame_interval == 0 {
            frames.push(agent.snapshot(tick));
        }
        if let Some(reason) = outcome.done {
            end = Some(reason);
            if tick % frame_interval != 0 {
                frames.push(agent.snapshot(tick));
            }
            break;
        }
    }

    info!(
        policy = policy.name(),
        seed = config.seed,
        ticks = tick,
        reward = total_reward,
        checkpoints = agent.checkpoints_reached(),
        ?end,
        "episode finished"
    );

    Ok(EpisodeReport {
        config: config.clone(),
        frames,
        result: EpisodeResult {
            end,
            final_tick: tick,
            total_reward,
            checkpoints_reached: agent.checkpoints_reached(),
            explosions: agent.explosions(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DoNothingPolicy;

    #[test]
    fn test_episode_records_frames() {
        let config = EpisodeConfig {
            max_ticks: 100,
            ..Default::default()
        };
        let report = run_episode(&config, &mut DoNothingPolicy).unwrap();
        assert_eq!(report.result.final_tick, 100);
        assert_eq!(report.frames.len(), 1 + 100 / FRAME_INTERVAL as usize);
        assert_eq!(report.result.end, None);
        assert_eq!(report.result.total_reward, 0.0);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut config = EpisodeConfig::default();
        config.circuit.checkpoint_count = 0;
        let err = run_episode(&config, &mut DoNothingPolicy).unwrap_err();
        assert_eq!(err, AgentError::Config(ConfigError::EmptyCircuit));
    }
}
