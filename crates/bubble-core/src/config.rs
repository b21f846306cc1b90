//! Field configuration with defaults drawn from `constants.rs`.

use crate::constants::*;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("size range is empty or non-positive: {min}..{max}")]
    SizeRange { min: f32, max: f32 },
    #[error("spawn speed range {min}..{max} is outside the governed range {floor}..{ceil}")]
    SpawnSpeedRange {
        min: f32,
        max: f32,
        floor: f32,
        ceil: f32,
    },
    #[error("speed bounds are inverted or non-positive: min={min} max={max}")]
    SpeedBounds { min: f32, max: f32 },
    #[error("restitution must lie in (0, 1], got {0}")]
    Restitution(f32),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Tuning for one mounted field.
///
/// `Default` reproduces the shipped look; adapters usually only override
/// `population` (from markup) and `seed` (in tests).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub population: usize,
    pub size_min: f32,
    pub size_max: f32,
    pub spawn_speed_min: f32,
    pub spawn_speed_max: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub restitution: f32,
    pub obstacle_padding: f32,
    pub obstacle_damping: f32,
    pub obstacle_perturbation: f32,
    pub pop_duration_ms: f64,
    pub obstacle_refresh_ms: f64,
    pub max_frame_ms: f64,
    /// Fixed RNG seed; `None` draws one from the platform entropy source.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            size_min: SIZE_MIN_PX,
            size_max: SIZE_MAX_PX,
            spawn_speed_min: SPAWN_SPEED_MIN,
            spawn_speed_max: SPAWN_SPEED_MAX,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            restitution: WALL_RESTITUTION,
            obstacle_padding: OBSTACLE_PADDING_PX,
            obstacle_damping: OBSTACLE_DAMPING,
            obstacle_perturbation: OBSTACLE_PERTURBATION,
            pop_duration_ms: POP_DURATION_MS,
            obstacle_refresh_ms: OBSTACLE_REFRESH_MS,
            max_frame_ms: MAX_FRAME_MS,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check ranges the integrator relies on.
    ///
    /// The spawn range must sit inside the governed range so a freshly kicked
    /// particle already satisfies the speed bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size_min > 0.0 && self.size_min <= self.size_max) {
            return Err(ConfigError::SizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        if !(self.min_speed > 0.0 && self.min_speed <= self.max_speed) {
            return Err(ConfigError::SpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if !(self.spawn_speed_min <= self.spawn_speed_max
            && self.spawn_speed_min >= self.min_speed
            && self.spawn_speed_max <= self.max_speed)
        {
            return Err(ConfigError::SpawnSpeedRange {
                min: self.spawn_speed_min,
                max: self.spawn_speed_max,
                floor: self.min_speed,
                ceil: self.max_speed,
            });
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(ConfigError::Restitution(self.restitution));
        }
        for (name, value) in [
            ("pop_duration_ms", self.pop_duration_ms),
            ("obstacle_refresh_ms", self.obstacle_refresh_ms),
            ("max_frame_ms", self.max_frame_ms),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
