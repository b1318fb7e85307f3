//! Radial arc geometry
//!
//! An arc is a ring of orbit markers plus one lead marker, all sharing a radius
//! and a phase. In polar coordinates:
//! - radius: distance from the common origin
//! - phase: current rotation (radians, accumulates without wrapping)
//! - orbit offsets: fixed angles evenly partitioning a full turn
//!
//! Marker positions are derived from these values on demand and never stored.

use glam::Vec3;
use std::f64::consts::TAU;

use super::color::Hsl;
use crate::polar_to_cartesian;

/// Evenly spaced angular offsets `2π·j/n` for `j = 0..n`
pub fn orbit_offsets(count: usize) -> Vec<f64> {
    (0..count)
        .map(|j| (j as f64 / count as f64) * TAU)
        .collect()
}

/// One radial motif. Only the phase changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialArc {
    radius: f64,
    phase: f64,
    speed: f64,
    color: Hsl,
    orbit_offsets: Vec<f64>,
}

impl RadialArc {
    pub fn new(radius: f64, phase: f64, speed: f64, color: Hsl, orbit_count: usize) -> Self {
        Self {
            radius,
            phase,
            speed,
            color,
            orbit_offsets: orbit_offsets(orbit_count),
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current phase (the angle of the lead marker)
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Radians added to the phase per tick
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn color(&self) -> Hsl {
        self.color
    }

    pub fn orbit_offsets(&self) -> &[f64] {
        &self.orbit_offsets
    }

    pub fn orbit_count(&self) -> usize {
        self.orbit_offsets.len()
    }

    /// Advance the phase by one tick
    #[inline]
    pub(super) fn advance(&mut self) {
        self.phase += self.speed;
    }

    /// Position of a marker at `offset` radians from the lead, lifted to height `z`
    #[inline]
    pub fn marker_position(&self, offset: f64, z: f32) -> Vec3 {
        polar_to_cartesian(self.radius, self.phase + offset, z)
    }

    /// Lead marker position in the orbital plane
    pub fn lead_position(&self) -> Vec3 {
        polar_to_cartesian(self.radius, self.phase, 0.0)
    }

    /// Position of orbit marker `index`, if it exists
    pub fn orbit_position(&self, index: usize) -> Option<Vec3> {
        self.orbit_offsets
            .get(index)
            .map(|&offset| self.marker_position(offset, 0.0))
    }

    /// Positions of every orbit marker, in offset order
    pub fn orbit_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.orbit_offsets
            .iter()
            .map(|&offset| self.marker_position(offset, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn test_arc(orbit_count: usize) -> RadialArc {
        RadialArc::new(100.0, 0.0, 0.01, Hsl::new(240.0, 0.5, 0.3), orbit_count)
    }

    #[test]
    fn test_orbit_offsets_partition_turn() {
        let offsets = orbit_offsets(4);
        assert_eq!(offsets, vec![0.0, PI / 2.0, PI, 3.0 * PI / 2.0]);
        assert!(orbit_offsets(0).is_empty());
    }

    #[test]
    fn test_lead_position_tracks_phase() {
        let arc = test_arc(4);
        let lead = arc.lead_position();
        assert!((lead.x - 100.0).abs() < 1e-4);
        assert!(lead.y.abs() < 1e-4);
        assert_eq!(lead.z, 0.0);
    }

    #[test]
    fn test_orbit_position_uses_offset() {
        let arc = test_arc(4);
        // Marker 1 sits a quarter turn ahead of the lead
        let p = arc.orbit_position(1).unwrap();
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 100.0).abs() < 1e-4);
        assert!(arc.orbit_position(4).is_none());
    }

    #[test]
    fn test_position_is_pure() {
        let arc = RadialArc::new(57.3, 12345.678, 0.005, Hsl::new(210.0, 0.5, 0.3), 50);
        assert_eq!(arc.orbit_position(17), arc.orbit_position(17));
        assert_eq!(arc.lead_position(), arc.lead_position());
        let all: Vec<Vec3> = arc.orbit_positions().collect();
        assert_eq!(all.len(), 50);
        assert_eq!(Some(all[17]), arc.orbit_position(17));
    }

    #[test]
    fn test_marker_elevation() {
        let arc = test_arc(1);
        let lifted = arc.marker_position(0.0, 100.0);
        assert_eq!(lifted.z, 100.0);
        assert_eq!(lifted.truncate(), arc.lead_position().truncate());
    }
}
