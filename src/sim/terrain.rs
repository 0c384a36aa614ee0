//! Procedural terrain
//!
//! The ride surface is a polyline sampled at a fixed x step. The opening
//! stretch stays close to the baseline so the first few hundred units are
//! always rideable; past it, the allowed band and the per-step jitter widen
//! one "mountain level" at a time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::TerrainTuning;
use crate::consts::{TERRAIN_DEFAULT_HEIGHT, TERRAIN_STEP};

/// Height samples for one session, x strictly increasing at a fixed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    points: Vec<Vec2>,
    step: f32,
    default_height: f32,
}

impl Default for TerrainProfile {
    fn default() -> Self {
        Self::empty(TERRAIN_DEFAULT_HEIGHT)
    }
}

impl TerrainProfile {
    /// A profile with no samples; every query answers `default_height`
    pub fn empty(default_height: f32) -> Self {
        Self {
            points: Vec::new(),
            step: TERRAIN_STEP,
            default_height,
        }
    }

    /// Build a profile from points already spaced `step` apart
    pub fn from_points(points: Vec<Vec2>, step: f32) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[1].x > w[0].x),
            "terrain x must be strictly increasing"
        );
        Self {
            points,
            step,
            default_height: TERRAIN_DEFAULT_HEIGHT,
        }
    }

    /// Flat profile covering `[0, length)`; handy for tests and tooling
    pub fn flat(height: f32, step: f32, length: f32) -> Self {
        let count = (length / step).ceil() as usize;
        let points = (0..count)
            .map(|i| Vec2::new(i as f32 * step, height))
            .collect();
        Self::from_points(points, step)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_x(&self) -> Option<f32> {
        self.points.first().map(|p| p.x)
    }

    pub fn last_x(&self) -> Option<f32> {
        self.points.last().map(|p| p.x)
    }

    /// Ground height at `x`
    ///
    /// Linear between samples; clamps to the first sample before the start and
    /// to the last sample at or past the final segment. Never extrapolates.
    pub fn height_at(&self, x: f32) -> f32 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return self.default_height;
        };
        if x.is_nan() || x < first.x {
            return first.y;
        }

        let index = ((x - first.x) / self.step).floor() as usize;
        if index >= self.points.len() - 1 {
            return last.y;
        }

        let a = self.points[index];
        let b = self.points[index + 1];
        let ratio = (x - a.x) / (b.x - a.x);
        a.y + (b.y - a.y) * ratio
    }

    /// Surface angle at `x`, from a central difference `span` units either side
    pub fn slope_angle_at(&self, x: f32, span: f32) -> f32 {
        let rise = self.height_at(x + span) - self.height_at(x - span);
        rise.atan2(2.0 * span)
    }
}

/// Allowed jitter and height band at one x position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBand {
    pub jitter: f32,
    pub min: f32,
    pub max: f32,
}

/// Seeded terrain generator
pub struct TerrainGenerator<'a> {
    tuning: &'a TerrainTuning,
    rng: Pcg32,
}

impl<'a> TerrainGenerator<'a> {
    pub fn new(tuning: &'a TerrainTuning, seed: u64) -> Self {
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Mountain level at `x` (0 for the first band past the flat zone)
    pub fn mountain_level(&self, x: f32) -> u32 {
        let t = self.tuning;
        ((x - t.flat_zone_end) / t.band_step).floor().max(0.0) as u32
    }

    /// Jitter and clamp band in effect at `x`
    pub fn band_at(&self, x: f32) -> HeightBand {
        let t = self.tuning;
        if x < t.flat_zone_end {
            return HeightBand {
                jitter: t.flat_jitter,
                min: t.flat_min_height.max(t.min_height),
                max: t.flat_max_height.min(t.max_height),
            };
        }

        let level = self.mountain_level(x) as f32;
        let spread = level * t.band_per_level;
        HeightBand {
            jitter: t.base_jitter + level * t.jitter_per_level,
            min: (t.baseline - spread).max(t.min_height),
            max: (t.baseline + spread).min(t.max_height),
        }
    }

    /// Walk the terrain length and produce the height profile
    pub fn generate(&mut self) -> TerrainProfile {
        let t = self.tuning;
        let count = (t.length / t.step).ceil() as usize;
        let mut points = Vec::with_capacity(count);
        let mut y = t.baseline;

        for i in 0..count {
            let x = i as f32 * t.step;
            let band = self.band_at(x);
            y += self.rng.random_range(-0.5..0.5) * band.jitter;
            y = y.clamp(band.min, band.max);
            points.push(Vec2::new(x, y));
        }

        log::debug!(
            "Generated terrain: {} samples over {} units",
            points.len(),
            t.length
        );

        TerrainProfile {
            points,
            step: t.step,
            default_height: t.default_height,
        }
    }
}
