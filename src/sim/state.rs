//! Pattern state and generation
//!
//! The arc collection is built once and then only mutated by `tick`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::RadialArc;
use super::color::Hsl;
use crate::consts::*;

/// A half-open `[min, max)` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw a value. An empty or inverted range yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Narrow a sample to `f32`. A value just below `max` that rounds up onto
    /// the open end is stepped back to the next `f32` below it.
    pub fn narrow(&self, value: f64) -> f32 {
        let narrowed = value as f32;
        if value < self.max && f64::from(narrowed) >= self.max {
            next_f32_below(narrowed)
        } else {
            narrowed
        }
    }
}

fn next_f32_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// Generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub arc_count: usize,
    pub orbit_markers_per_arc: usize,
    /// Arc radius (world units)
    pub radius: UniformRange,
    /// Starting angle (degrees)
    pub start_angle_deg: UniformRange,
    /// Angular speed (radians per tick)
    pub speed: UniformRange,
    /// Hue (degrees)
    pub hue: UniformRange,
    pub saturation: f32,
    pub lightness: f32,
    /// Height of the lead marker before the first tick
    pub lead_elevation: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            arc_count: ARC_COUNT,
            orbit_markers_per_arc: ORBIT_MARKERS_PER_ARC,
            radius: UniformRange::new(RADIUS_MIN, RADIUS_MAX),
            start_angle_deg: UniformRange::new(0.0, 360.0),
            speed: UniformRange::new(SPEED_MIN, SPEED_MAX),
            hue: UniformRange::new(HUE_MIN as f64, HUE_MAX as f64),
            saturation: SATURATION,
            lightness: LIGHTNESS,
            lead_elevation: LEAD_MARKER_ELEVATION,
        }
    }
}

/// The complete arc collection plus tick bookkeeping
#[derive(Debug, Clone)]
pub struct PatternState {
    /// Arcs in creation order
    pub(super) arcs: Vec<RadialArc>,
    /// Accepted ticks since generation
    pub(super) ticks: u64,
    /// Height of each lead marker at generation time
    lead_elevation: f32,
}

impl PatternState {
    /// Generate a fresh pattern, drawing every per-arc value from `rng`
    pub fn generate<R: Rng + ?Sized>(config: &PatternConfig, rng: &mut R) -> Self {
        let arcs = (0..config.arc_count)
            .map(|_| {
                // Draw order matches the visual recipe: color, size, placement, motion
                let hue = config.hue.narrow(config.hue.sample(rng));
                let color = Hsl::new(hue, config.saturation, config.lightness);
                let radius = config.radius.sample(rng);
                let start_deg = config.start_angle_deg.sample(rng);
                let speed = config.speed.sample(rng);

                RadialArc::new(
                    radius,
                    start_deg.to_radians(),
                    speed,
                    color,
                    config.orbit_markers_per_arc,
                )
            })
            .collect();

        Self {
            arcs,
            ticks: 0,
            lead_elevation: config.lead_elevation,
        }
    }

    /// Generate with a seeded PCG stream (reproducible)
    pub fn from_seed(config: &PatternConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::generate(config, &mut rng)
    }

    /// Wrap arcs built elsewhere
    pub fn from_arcs(arcs: Vec<RadialArc>, lead_elevation: f32) -> Self {
        Self {
            arcs,
            ticks: 0,
            lead_elevation,
        }
    }

    pub fn arcs(&self) -> &[RadialArc] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn lead_elevation(&self) -> f32 {
        self.lead_elevation
    }

    /// Total number of visual elements (lead + orbit markers of every arc)
    pub fn marker_count(&self) -> usize {
        self.arcs.iter().map(|arc| arc.orbit_count() + 1).sum()
    }
}
