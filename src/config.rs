//! Runtime tuning
//!
//! Every constant in [`crate::consts`] has a field here. A tuning document only
//! needs the keys it wants to change; everything else falls back to the
//! compile-time default. Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How the frame scheduler maps display frames to simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoopMode {
    /// Accumulate wall-clock time and run whole `SIM_DT` slices
    #[default]
    FixedStep,
    /// Exactly one step per display frame, whatever the refresh rate
    PerFrame,
}

impl LoopMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopMode::FixedStep => "FixedStep",
            LoopMode::PerFrame => "PerFrame",
        }
    }
}

/// Terrain generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    pub step: f32,
    pub length: f32,
    pub baseline: f32,
    pub default_height: f32,
    pub flat_zone_end: f32,
    pub flat_jitter: f32,
    pub flat_min_height: f32,
    pub flat_max_height: f32,
    pub band_step: f32,
    pub base_jitter: f32,
    pub jitter_per_level: f32,
    pub band_per_level: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            step: TERRAIN_STEP,
            length: TERRAIN_LENGTH,
            baseline: TERRAIN_BASELINE,
            default_height: TERRAIN_DEFAULT_HEIGHT,
            flat_zone_end: FLAT_ZONE_END,
            flat_jitter: FLAT_JITTER,
            flat_min_height: FLAT_MIN_HEIGHT,
            flat_max_height: FLAT_MAX_HEIGHT,
            band_step: MOUNTAIN_BAND_STEP,
            base_jitter: MOUNTAIN_BASE_JITTER,
            jitter_per_level: MOUNTAIN_JITTER_PER_LEVEL,
            band_per_level: MOUNTAIN_BAND_PER_LEVEL,
            min_height: TERRAIN_MIN_HEIGHT,
            max_height: TERRAIN_MAX_HEIGHT,
        }
    }
}

/// One run of evenly pitched coins followed by an empty gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinSet {
    pub count: u32,
    pub gap: f32,
}

/// Pickup placement and coin animation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleTuning {
    pub canister_start_x: f32,
    pub canister_spacing: f32,
    pub canister_width: f32,
    pub canister_height: f32,
    pub canister_clearance: f32,
    pub coin_start_x: f32,
    pub coin_pitch: f32,
    pub coin_radius: f32,
    pub coin_hover: f32,
    pub coin_sets: Vec<CoinSet>,
    pub coin_animation_duration: f32,
    pub coin_animation_rise: f32,
}

impl Default for CollectibleTuning {
    fn default() -> Self {
        Self {
            canister_start_x: CANISTER_START_X,
            canister_spacing: CANISTER_SPACING,
            canister_width: CANISTER_WIDTH,
            canister_height: CANISTER_HEIGHT,
            canister_clearance: CANISTER_CLEARANCE,
            coin_start_x: COIN_START_X,
            coin_pitch: COIN_PITCH,
            coin_radius: COIN_RADIUS,
            coin_hover: COIN_HOVER,
            coin_sets: COIN_SETS
                .iter()
                .map(|&(count, gap)| CoinSet { count, gap })
                .collect(),
            coin_animation_duration: COIN_ANIMATION_DURATION,
            coin_animation_rise: COIN_ANIMATION_RISE,
        }
    }
}

/// Vehicle dynamics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    pub fuel_capacity: f32,
    pub acceleration: f32,
    pub acceleration_fuel_rate: f32,
    pub brake_acceleration: f32,
    pub brake_fuel_rate: f32,
    pub gravity: f32,
    pub friction: f32,
    pub angular_damping: f32,
    pub contact_sink: f32,
    pub restitution: f32,
    pub slope_span: f32,
    pub slope_alignment: f32,
    pub death_depth: f32,
    pub units_per_metre: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            start_x: VEHICLE_START_X,
            start_y: VEHICLE_START_Y,
            width: VEHICLE_WIDTH,
            height: VEHICLE_HEIGHT,
            fuel_capacity: FUEL_CAPACITY,
            acceleration: ACCELERATION,
            acceleration_fuel_rate: ACCELERATION_FUEL_RATE,
            brake_acceleration: BRAKE_ACCELERATION,
            brake_fuel_rate: BRAKE_FUEL_RATE,
            gravity: GRAVITY,
            friction: FRICTION,
            angular_damping: ANGULAR_DAMPING,
            contact_sink: CONTACT_SINK,
            restitution: RESTITUTION,
            slope_span: SLOPE_SPAN,
            slope_alignment: SLOPE_ALIGNMENT,
            death_depth: DEATH_DEPTH,
            units_per_metre: UNITS_PER_METRE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub lead: f32,
    pub viewport_height: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            lead: CAMERA_LEAD,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub terrain: TerrainTuning,
    pub collectibles: CollectibleTuning,
    pub vehicle: VehicleTuning,
    pub camera: CameraTuning,
    pub loop_mode: LoopMode,
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

impl Tuning {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "juu_climb_tuning";

    /// Environment variable naming a tuning file (native only)
    pub const PATH_ENV: &'static str = "JUU_CLIMB_TUNING";

    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        check(t.step > 0.0, "terrain.step", "must be positive")?;
        check(t.length > t.step, "terrain.length", "must exceed one step")?;
        check(
            t.min_height <= t.max_height,
            "terrain.min_height",
            "must not exceed terrain.max_height",
        )?;
        check(
            t.flat_min_height <= t.flat_max_height,
            "terrain.flat_min_height",
            "must not exceed terrain.flat_max_height",
        )?;
        check(t.band_step > 0.0, "terrain.band_step", "must be positive")?;

        let c = &self.collectibles;
        check(c.canister_spacing > 0.0, "collectibles.canister_spacing", "must be positive")?;
        check(c.coin_pitch > 0.0, "collectibles.coin_pitch", "must be positive")?;
        check(!c.coin_sets.is_empty(), "collectibles.coin_sets", "must not be empty")?;
        check(
            c.coin_sets.last().is_some_and(|s| s.count > 0 || s.gap > 0.0),
            "collectibles.coin_sets",
            "last set must advance placement",
        )?;
        check(
            c.coin_animation_duration > 0.0,
            "collectibles.coin_animation_duration",
            "must be positive",
        )?;

        let v = &self.vehicle;
        check(v.fuel_capacity > 0.0, "vehicle.fuel_capacity", "must be positive")?;
        check(
            v.friction > 0.0 && v.friction <= 1.0,
            "vehicle.friction",
            "must be in (0, 1]",
        )?;
        check(
            v.angular_damping > 0.0 && v.angular_damping <= 1.0,
            "vehicle.angular_damping",
            "must be in (0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&v.restitution),
            "vehicle.restitution",
            "must be in [0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&v.slope_alignment),
            "vehicle.slope_alignment",
            "must be in [0, 1]",
        )?;
        check(v.units_per_metre > 0.0, "vehicle.units_per_metre", "must be positive")?;
        Ok(())
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Tuning saved");
        }
    }

    /// Load tuning from the file named by `JUU_CLIMB_TUNING`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
