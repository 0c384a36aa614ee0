//! Session state and core simulation types
//!
//! Everything a run needs lives in [`GameSession`]; the scheduler owns it and
//! lends it to each simulation stage in turn.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectibles::{Coin, CollectibleGenerator, FuelCanister};
use super::collision::Aabb;
use super::terrain::{TerrainGenerator, TerrainProfile};
use crate::config::{Tuning, VehicleTuning};

/// The player's vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Center of the body (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Body rotation (radians)
    pub angle: f32,
    pub angular_vel: f32,
    pub size: Vec2,
    /// Fuel level in `[0, capacity]`
    pub fuel: f32,
    pub capacity: f32,
    /// Touching (or being pushed out of) the ground this tick
    pub grounded: bool,
}

impl Vehicle {
    pub fn new(tuning: &VehicleTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.start_x, tuning.start_y),
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            size: Vec2::new(tuning.width, tuning.height),
            fuel: tuning.fuel_capacity,
            capacity: tuning.fuel_capacity,
            grounded: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Lowest point of the (unrotated) body
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Burn fuel, never dropping below empty
    pub fn burn(&mut self, amount: f32) {
        self.fuel = (self.fuel - amount).clamp(0.0, self.capacity);
    }

    pub fn refuel(&mut self) {
        self.fuel = self.capacity;
    }

    /// -1 when moving left (sprite is mirrored), +1 otherwise
    pub fn facing(&self) -> f32 {
        if self.vel.x < 0.0 { -1.0 } else { 1.0 }
    }
}

/// Viewport offset into the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    OutOfFuel,
    FellOff,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    /// Terminal until restart
    Ended { cause: EndCause },
}

/// Per-frame numbers for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub distance_meters: u32,
    pub fuel_percent: u32,
    pub coins: u32,
    pub ended: bool,
}

/// One playthrough (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Seed the terrain was generated from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    pub vehicle: Vehicle,
    pub camera: Camera,
    pub terrain: TerrainProfile,
    /// In placement order; pickup scans rely on it
    pub canisters: Vec<FuelCanister>,
    pub coins: Vec<Coin>,
    /// Furthest distance reached (metres)
    pub distance: u32,
    pub coins_collected: u32,
    /// Simulation steps taken while running
    pub time_ticks: u64,
}

impl GameSession {
    /// Fresh session: new terrain and pickups, vehicle at the start line
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let terrain = TerrainGenerator::new(&tuning.terrain, seed).generate();
        let placer = CollectibleGenerator::new(&tuning.collectibles);
        let canisters = placer.place_fuel_canisters(&terrain);
        let coins = placer.place_coins(&terrain);

        log::info!(
            "Session started with seed {} ({} canisters, {} coins)",
            seed,
            canisters.len(),
            coins.len()
        );

        Self {
            seed,
            phase: SessionPhase::Running,
            vehicle: Vehicle::new(&tuning.vehicle),
            camera: Camera::default(),
            terrain,
            canisters,
            coins,
            distance: 0,
            coins_collected: 0,
            time_ticks: 0,
            tuning,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Running -> Ended. Later calls keep the first cause.
    pub fn end(&mut self, cause: EndCause) {
        if !self.is_running() {
            return;
        }
        self.phase = SessionPhase::Ended { cause };
        log::info!(
            "Session ended ({:?}): {} m, {} coins",
            cause,
            self.distance,
            self.coins_collected
        );
    }

    /// Seed for the next run, derived from this one
    pub fn next_seed(&self) -> u64 {
        Pcg32::seed_from_u64(self.seed).random()
    }

    /// Rebuild everything with a derived seed, keeping the tuning
    pub fn restart(&mut self) {
        let seed = self.next_seed();
        self.restart_with_seed(seed);
    }

    pub fn restart_with_seed(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(seed, tuning);
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            distance_meters: self.distance,
            fuel_percent: self.vehicle.fuel.round().max(0.0) as u32,
            coins: self.coins_collected,
            ended: !self.is_running(),
        }
    }
}
