//! Fuel canisters and coins
//!
//! Placement runs once per session against the freshly generated terrain.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::terrain::TerrainProfile;
use crate::config::CollectibleTuning;

/// A fuel canister sitting just above the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCanister {
    /// Center
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared exactly once, on pickup
    pub active: bool,
}

impl FuelCanister {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Relative slack when comparing accumulated animation time to its duration;
/// summing `1/60` in f32 lands just under whole seconds
const DURATION_SLACK: f32 = 1e-4;

/// Coin lifecycle: idle until touched, then a short rise-and-fade, then gone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CoinState {
    Idle,
    Collecting { elapsed: f32, start_y: f32 },
    Collected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub state: CoinState,
}

impl Coin {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            state: CoinState::Idle,
        }
    }

    /// Still in the world (idle or animating)
    pub fn is_active(&self) -> bool {
        !matches!(self.state, CoinState::Collected)
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, CoinState::Collecting { .. })
    }

    /// Only idle coins can be picked up
    pub fn is_collectible(&self) -> bool {
        matches!(self.state, CoinState::Idle)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Idle -> Collecting; any other state is left alone
    pub fn start_collecting(&mut self) -> bool {
        if !self.is_collectible() {
            return false;
        }
        self.state = CoinState::Collecting {
            elapsed: 0.0,
            start_y: self.pos.y,
        };
        true
    }

    /// Advance the pickup animation; the coin rises `rise` units over `duration`
    pub fn advance_collection(&mut self, dt: f32, duration: f32, rise: f32) {
        let CoinState::Collecting { elapsed, start_y } = self.state else {
            return;
        };

        let elapsed = elapsed + dt;
        if elapsed >= duration * (1.0 - DURATION_SLACK) {
            self.state = CoinState::Collected;
        } else {
            self.pos.y = start_y - rise * (elapsed / duration);
            self.state = CoinState::Collecting { elapsed, start_y };
        }
    }

    /// Render opacity: fades out while collecting
    pub fn opacity(&self, duration: f32) -> f32 {
        match self.state {
            CoinState::Collecting { elapsed, .. } => (1.0 - elapsed / duration).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }
}

/// Places pickups along a terrain profile
pub struct CollectibleGenerator<'a> {
    tuning: &'a CollectibleTuning,
}

impl<'a> CollectibleGenerator<'a> {
    pub fn new(tuning: &'a CollectibleTuning) -> Self {
        Self { tuning }
    }

    /// One canister every `canister_spacing` units from `canister_start_x` to the terrain end
    pub fn place_fuel_canisters(&self, terrain: &TerrainProfile) -> Vec<FuelCanister> {
        let Some(last_x) = terrain.last_x() else {
            return Vec::new();
        };
        let t = self.tuning;
        let size = Vec2::new(t.canister_width, t.canister_height);

        let mut canisters = Vec::new();
        let mut x = t.canister_start_x;
        while x < last_x {
            let ground = terrain.height_at(x);
            canisters.push(FuelCanister {
                pos: Vec2::new(x, ground - t.canister_height / 2.0 - t.canister_clearance),
                size,
                active: true,
            });
            x += t.canister_spacing;
        }

        log::debug!("Placed {} fuel canisters", canisters.len());
        canisters
    }

    /// Coins in sets: `count` coins at `coin_pitch`, then `gap` of nothing.
    /// Once the set list runs out the last set repeats until the terrain ends.
    pub fn place_coins(&self, terrain: &TerrainProfile) -> Vec<Coin> {
        let Some(last_x) = terrain.last_x() else {
            return Vec::new();
        };
        let t = self.tuning;
        let Some(&last_set) = t.coin_sets.last() else {
            return Vec::new();
        };

        let mut coins = Vec::new();
        let mut x = t.coin_start_x;
        let listed = t.coin_sets.len();
        let mut sets = t.coin_sets.iter().copied().chain(std::iter::repeat(last_set));
        let mut placed_sets = 0;

        while x < last_x {
            let Some(set) = sets.next() else { break };
            placed_sets += 1;
            let set_start = x;

            for _ in 0..set.count {
                if x >= last_x {
                    break;
                }
                let ground = terrain.height_at(x);
                coins.push(Coin::new(
                    Vec2::new(x, ground - t.coin_radius - t.coin_hover),
                    t.coin_radius,
                ));
                x += t.coin_pitch;
            }
            x += set.gap;

            if placed_sets >= listed && x <= set_start {
                // The repeating set does not advance, so the end is never reached
                break;
            }
        }

        log::debug!("Placed {} coins", coins.len());
        coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoinSet;

    fn flat(length: f32) -> TerrainProfile {
        TerrainProfile::flat(350.0, 20.0, length + 20.0)
    }

    #[test]
    fn test_canisters_follow_spacing() {
        let tuning = CollectibleTuning::default();
        let terrain = flat(4980.0);
        let cans = CollectibleGenerator::new(&tuning).place_fuel_canisters(&terrain);
        let xs: Vec<f32> = cans.iter().map(|c| c.pos.x).collect();
        assert_eq!(xs, vec![500.0, 1200.0, 1900.0, 2600.0, 3300.0, 4000.0, 4700.0]);
        for can in &cans {
            assert!(can.active);
            assert_eq!(can.pos.y, 350.0 - 20.0 - 10.0);
        }
    }

    #[test]
    fn test_empty_terrain_places_nothing() {
        let tuning = CollectibleTuning::default();
        let generator = CollectibleGenerator::new(&tuning);
        let terrain = TerrainProfile::default();
        assert!(generator.place_fuel_canisters(&terrain).is_empty());
        assert!(generator.place_coins(&terrain).is_empty());
    }

    #[test]
    fn test_coin_sets_and_gaps() {
        let tuning = CollectibleTuning {
            coin_sets: vec![CoinSet { count: 2, gap: 1000.0 }, CoinSet { count: 1, gap: 100.0 }],
            ..Default::default()
        };
        let terrain = flat(2400.0);
        let coins = CollectibleGenerator::new(&tuning).place_coins(&terrain);
        let xs: Vec<f32> = coins.iter().map(|c| c.pos.x).collect();
        // 100, 380 | gap -> 1660 | then the last set repeats: 1660, 2040
        assert_eq!(xs, vec![100.0, 380.0, 1660.0, 2040.0]);
        for coin in &coins {
            assert_eq!(coin.state, CoinState::Idle);
            assert_eq!(coin.pos.y, 350.0 - 30.0 - 20.0);
        }
    }

    #[test]
    fn test_empty_middle_set_does_not_stop_placement() {
        let tuning = CollectibleTuning {
            coin_sets: vec![
                CoinSet { count: 1, gap: 0.0 },
                CoinSet { count: 0, gap: 0.0 },
                CoinSet { count: 1, gap: 500.0 },
            ],
            ..Default::default()
        };
        let terrain = flat(1500.0);
        let coins = CollectibleGenerator::new(&tuning).place_coins(&terrain);
        let xs: Vec<f32> = coins.iter().map(|c| c.pos.x).collect();
        // 100 | empty set | 380, then 380 + 280 + 500 = 1160 repeating
        assert_eq!(xs, vec![100.0, 380.0, 1160.0]);
    }

    #[test]
    fn test_stalled_repeating_set_terminates() {
        let tuning = CollectibleTuning {
            coin_sets: vec![CoinSet { count: 1, gap: 0.0 }, CoinSet { count: 0, gap: 0.0 }],
            ..Default::default()
        };
        let coins = CollectibleGenerator::new(&tuning).place_coins(&flat(1500.0));
        assert_eq!(coins.len(), 1);
    }

    #[test]
    fn test_coin_placement_stops_at_domain_edge() {
        let tuning = CollectibleTuning {
            coin_sets: vec![CoinSet { count: 10, gap: 500.0 }],
            ..Default::default()
        };
        let terrain = flat(2000.0);
        assert_eq!(terrain.last_x(), Some(2000.0));
        let coins = CollectibleGenerator::new(&tuning).place_coins(&terrain);
        assert_eq!(coins.len(), 7);
        assert!(coins.iter().all(|c| c.pos.x < 2000.0));
    }

    #[test]
    fn test_coin_collection_animation() {
        let mut coin = Coin::new(Vec2::new(0.0, 200.0), 30.0);
        assert!(coin.start_collecting());
        assert!(!coin.start_collecting());
        assert_eq!(coin.opacity(1.0), 1.0);

        coin.advance_collection(0.25, 1.0, 100.0);
        assert!((coin.pos.y - 175.0).abs() < 1e-4);
        assert!((coin.opacity(1.0) - 0.75).abs() < 1e-4);

        coin.advance_collection(0.75, 1.0, 100.0);
        assert_eq!(coin.state, CoinState::Collected);
        assert!(!coin.is_active());
        assert_eq!(coin.opacity(1.0), 1.0);
    }

    #[test]
    fn test_animation_ends_after_exactly_duration_over_dt() {
        let dt = 1.0 / 60.0;
        let mut coin = Coin::new(Vec2::new(0.0, 200.0), 30.0);
        coin.start_collecting();
        for _ in 0..59 {
            coin.advance_collection(dt, 1.0, 100.0);
        }
        assert!(coin.is_collecting());
        coin.advance_collection(dt, 1.0, 100.0);
        assert_eq!(coin.state, CoinState::Collected);
    }

    #[test]
    fn test_idle_coin_ignores_animation_step() {
        let mut coin = Coin::new(Vec2::new(0.0, 200.0), 30.0);
        coin.advance_collection(0.5, 1.0, 100.0);
        assert_eq!(coin.state, CoinState::Idle);
        assert_eq!(coin.pos.y, 200.0);
    }
}
