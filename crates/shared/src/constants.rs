// Tick rate
pub const TICK_RATE: u32 = 50;
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// Episode
pub const TRAINING_MAX_STEPS: u32 = 5000;
pub const DEFAULT_STEP_TIMEOUT: u32 = 300;

// Reward shaping
pub const CHECKPOINT_REWARD: f32 = 0.5;
pub const TIMEOUT_PENALTY: f32 = -0.5;
pub const COLLISION_PENALTY: f32 = -1.0;

// Flight tunables
pub const DEFAULT_THRUST: f32 = 100_000.0;
pub const DEFAULT_PITCH_SPEED: f32 = 100.0; // deg/s
pub const DEFAULT_YAW_SPEED: f32 = 100.0;
pub const DEFAULT_ROLL_SPEED: f32 = 100.0;
pub const DEFAULT_BOOST_MULTIPLIER: f32 = 2.0;
pub const MAX_PITCH_ANGLE: f32 = 45.0; // deg
pub const MAX_ROLL_ANGLE: f32 = 45.0;
pub const SMOOTHING_RATE: f32 = 2.0; // units/s
pub const BOOST_THRESHOLD: f32 = 0.5;

// Explosion / respawn sequence (seconds)
pub const EXPLOSION_DURATION_SECS: f32 = 2.0;
pub const RESPAWN_SETTLE_SECS: f32 = 1.0;

// Collider tags
pub const AGENT_TAG: &str = "agent";
pub const CHECKPOINT_TAG: &str = "checkpoint";
pub const GROUND_TAG: &str = "ground";

// Runtime parameter keys
pub const CHECKPOINT_RADIUS_KEY: &str = "checkpoint_radius";

// Observation
pub const OBS_SIZE: usize = 6;
pub const ACTION_SIZE: usize = 3;

// Headless course
pub const DEFAULT_CHECKPOINT_COUNT: usize = 8;
pub const DEFAULT_CIRCUIT_RADIUS: f32 = 600.0;
pub const DEFAULT_CIRCUIT_ALTITUDE: f32 = 200.0;
pub const DEFAULT_TRIGGER_RADIUS: f32 = 40.0;
pub const SPAWN_LATERAL_SPACING: f32 = 10.0;
pub const GROUND_ALTITUDE: f32 = 0.0;

// Headless rigid body
pub const DEFAULT_BODY_MASS: f32 = 1000.0;
pub const DEFAULT_BODY_DRAG: f32 = 1.0;

// Frame capture
pub const FRAME_INTERVAL: u32 = 10; // 5 fps at 50Hz
