use aircraft_shared::*;
use aircraft_sim::{policy_by_name, run_episode, DoNothingPolicy, SeekerPolicy};

fn small_ring(training: bool) -> EpisodeConfig {
    EpisodeConfig {
        seed: 42,
        agent: AgentConfig {
            training_mode: training,
            ..Default::default()
        },
        circuit: CircuitConfig {
            radius: 400.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_do_nothing_passes_one_checkpoint_then_times_out() {
    let config = small_ring(true);
    let report = run_episode(&config, &mut DoNothingPolicy).unwrap();

    assert_eq!(
        report.result.end,
        Some(EpisodeEnd::Timeout),
        "ended {:?} at tick {}",
        report.result.end,
        report.result.final_tick
    );
    assert_eq!(report.result.checkpoints_reached, 1);
    assert!(report.result.final_tick > config.agent.step_timeout + 1);

    // -ticks/5000 + 0.5 for the checkpoint - 0.5 for the timeout
    let expected = -(report.result.final_tick as f32) / TRAINING_MAX_STEPS as f32;
    assert!(
        (report.result.total_reward - expected).abs() < 1e-3,
        "reward {} expected {}",
        report.result.total_reward,
        expected
    );
}

#[test]
fn test_seeker_reaches_checkpoints() {
    let config = small_ring(true);
    let report = run_episode(&config, &mut SeekerPolicy::new()).unwrap();
    assert!(
        report.result.checkpoints_reached >= 1,
        "seeker reached {} checkpoints, ended {:?} at tick {}",
        report.result.checkpoints_reached,
        report.result.end,
        report.result.final_tick
    );
}

#[test]
fn test_episodes_are_deterministic() {
    let config = small_ring(true);
    let a = run_episode(&config, &mut SeekerPolicy::new()).unwrap();
    let b = run_episode(&config, &mut SeekerPolicy::new()).unwrap();
    assert_eq!(a.result.final_tick, b.result.final_tick);
    assert_eq!(a.result.total_reward, b.result.total_reward);
    assert_eq!(a.frames.len(), b.frames.len());
}

#[test]
fn test_training_ground_hit_ends_episode() {
    let mut config = small_ring(true);
    config.circuit.altitude = -1.0;
    let report = run_episode(&config, &mut DoNothingPolicy).unwrap();

    assert_eq!(report.result.end, Some(EpisodeEnd::Collision));
    assert_eq!(report.result.final_tick, 1);
    let expected = -1.0 - 1.0 / TRAINING_MAX_STEPS as f32;
    assert!((report.result.total_reward - expected).abs() < 1e-6);
    assert_eq!(report.result.explosions, 0);
}

#[test]
fn test_racing_ground_hit_explodes_and_respawns() {
    let mut config = small_ring(false);
    config.circuit.altitude = -1.0;
    config.max_ticks = 400;
    let report = run_episode(&config, &mut DoNothingPolicy).unwrap();

    assert_eq!(report.result.end, None);
    assert_eq!(report.result.final_tick, 400);
    assert_eq!(report.result.total_reward, 0.0);
    // Hidden 100 ticks, frozen 50, then the ground is hit again on thaw
    assert_eq!(report.result.explosions, 3);
    assert!(report
        .frames
        .iter()
        .any(|f| f.state == LifecycleState::Exploded && !f.mesh_visible));
}

#[test]
fn test_racing_runs_to_max_ticks() {
    let mut config = small_ring(false);
    config.max_ticks = 1000;
    let report = run_episode(&config, &mut SeekerPolicy::new()).unwrap();
    assert_eq!(report.result.end, None);
    assert_eq!(report.result.final_tick, 1000);
    assert_eq!(report.result.total_reward, 0.0);
}

#[test]
fn test_report_serializes() {
    let mut config = small_ring(true);
    config.max_ticks = 50;
    let mut policy = policy_by_name("seeker").unwrap();
    let report = run_episode(&config, policy.as_mut()).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: EpisodeReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.frames.len(), report.frames.len());
    assert_eq!(back.config, config);
}
