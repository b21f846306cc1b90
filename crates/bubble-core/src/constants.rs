// Simulation tuning constants for the bubble field.
//
// Units: positions and sizes in CSS px, velocities in px per normalized step
// (one step == one nominal 60 fps frame), times in milliseconds unless noted.

// Population
pub const DEFAULT_POPULATION: usize = 12;

// Particle sizing (diameter, px)
pub const SIZE_MIN_PX: f32 = 22.0;
pub const SIZE_MAX_PX: f32 = 68.0;

// Speed drawn at creation and respawn
pub const SPAWN_SPEED_MIN: f32 = 0.25;
pub const SPAWN_SPEED_MAX: f32 = 0.85;

// Speed governance applied after every step
pub const MIN_SPEED: f32 = 0.12;
pub const MAX_SPEED: f32 = 1.6;

// Bounces
pub const WALL_RESTITUTION: f32 = 0.92; // fraction of velocity kept after a wall hit
pub const OBSTACLE_PADDING_PX: f32 = 10.0;
pub const OBSTACLE_DAMPING: f32 = 0.85;
pub const OBSTACLE_PERTURBATION: f32 = 0.06; // max random nudge per velocity component

// Drift field: three sine/cosine terms per axis
pub const DRIFT_AMPLITUDES: [f32; 3] = [0.045, 0.025, 0.012];
pub const DRIFT_FREQUENCIES: [f32; 3] = [0.31, 0.73, 1.37]; // rad per second

// Render-only scale pulse
pub const PULSE_AMPLITUDE: f32 = 0.035;
pub const PULSE_FREQUENCY: f32 = 1.6; // rad per second

// Frame timing
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_MS: f64 = 40.0; // caps dt after tab backgrounding

// Pop/respawn
pub const POP_DURATION_MS: f64 = 420.0; // matches the CSS pop animation
pub const RESPAWN_PLACEMENT_ATTEMPTS: usize = 12;

// Obstacle snapshot staleness bound
pub const OBSTACLE_REFRESH_MS: f64 = 1200.0;
