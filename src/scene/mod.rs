//! Scene adapter
//!
//! Maps pure pattern state onto a rendering backend. The backend only needs
//! two capabilities: create a marker from a style, and move it.

pub mod store;

pub use store::{Marker, MarkerId, MarkerStore};

use glam::Vec3;
use rand::Rng;

use crate::consts::{LEAD_MARKER_RADIUS, ORBIT_MARKER_RADIUS};
use crate::sim::{PatternConfig, PatternState, RadialArc, tick};

/// Geometric primitive used for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Lit sphere
    Sphere,
    /// Flat disc lying in the orbital plane, facing +Z
    Disc,
}

/// Surface response to the light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMaterial {
    /// Diffuse only
    Matte,
    /// Diffuse plus a sharp highlight
    Glossy,
}

/// Everything a backend needs to build a visual element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub material: MarkerMaterial,
    pub radius: f32,
    /// Linear RGB
    pub color: [f32; 3],
}

impl MarkerStyle {
    /// Small white disc marking the head of an arc
    pub fn lead() -> Self {
        Self {
            shape: MarkerShape::Disc,
            material: MarkerMaterial::Matte,
            radius: LEAD_MARKER_RADIUS,
            color: [1.0, 1.0, 1.0],
        }
    }

    /// Glossy sphere in the arc's color
    pub fn orbit(color: [f32; 3]) -> Self {
        Self {
            shape: MarkerShape::Sphere,
            material: MarkerMaterial::Glossy,
            radius: ORBIT_MARKER_RADIUS,
            color,
        }
    }
}

/// A rendering backend the pattern writes into. Writes are fire-and-forget.
pub trait SceneBackend {
    type Handle: Copy;

    fn create_marker(&mut self, style: MarkerStyle) -> Self::Handle;
    fn set_position(&mut self, handle: Self::Handle, position: Vec3);
}

/// Backend handles for one arc, index-aligned with its orbit offsets
#[derive(Debug, Clone)]
pub struct ArcBinding<H> {
    pub lead: H,
    pub orbit: Vec<H>,
}

/// A running pattern: the arc collection plus the markers that show it.
///
/// Existing means running; there is no way to reset or stop it.
#[derive(Debug)]
pub struct Pattern<H> {
    state: PatternState,
    bindings: Vec<ArcBinding<H>>,
}

impl<H: Copy> Pattern<H> {
    /// Generate a new pattern and register its markers with `backend`
    pub fn generate<B, R>(config: &PatternConfig, rng: &mut R, backend: &mut B) -> Self
    where
        B: SceneBackend<Handle = H>,
        R: Rng + ?Sized,
    {
        let state = PatternState::generate(config, rng);
        log::info!(
            "Generated {} arcs ({} markers)",
            state.len(),
            state.marker_count()
        );
        Self::bind(state, backend)
    }

    /// Register markers for an existing state at their initial placement
    pub fn bind<B>(state: PatternState, backend: &mut B) -> Self
    where
        B: SceneBackend<Handle = H>,
    {
        let elevation = state.lead_elevation();
        let bindings = state
            .arcs()
            .iter()
            .map(|arc| bind_arc(arc, elevation, backend))
            .collect();

        Self { state, bindings }
    }

    /// Advance one tick and push every new position to the backend
    pub fn update<B>(&mut self, backend: &mut B)
    where
        B: SceneBackend<Handle = H>,
    {
        tick(&mut self.state);
        self.sync(backend);
    }

    /// Write the current position of every marker to the backend
    pub fn sync<B>(&self, backend: &mut B)
    where
        B: SceneBackend<Handle = H>,
    {
        for (arc, binding) in self.state.arcs().iter().zip(&self.bindings) {
            backend.set_position(binding.lead, arc.lead_position());
            for (&handle, position) in binding.orbit.iter().zip(arc.orbit_positions()) {
                backend.set_position(handle, position);
            }
        }
    }

    pub fn state(&self) -> &PatternState {
        &self.state
    }

    pub fn bindings(&self) -> &[ArcBinding<H>] {
        &self.bindings
    }
}

fn bind_arc<B: SceneBackend>(
    arc: &RadialArc,
    elevation: f32,
    backend: &mut B,
) -> ArcBinding<B::Handle> {
    let orbit_style = MarkerStyle::orbit(arc.color().to_linear());
    let orbit = arc
        .orbit_offsets()
        .iter()
        .map(|&offset| {
            let handle = backend.create_marker(orbit_style);
            backend.set_position(handle, arc.marker_position(offset, 0.0));
            handle
        })
        .collect();

    let lead = backend.create_marker(MarkerStyle::lead());
    backend.set_position(lead, arc.marker_position(0.0, elevation));

    ArcBinding { lead, orbit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FrameLimiter;
    use crate::sim::Hsl;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f64::consts::PI;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(MarkerStyle),
        SetPosition(usize, Vec3),
    }

    /// Records every backend call in order
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        next: usize,
    }

    impl RecordingBackend {
        fn position_writes(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::SetPosition(..)))
                .count()
        }

        fn last_position(&self, handle: usize) -> Option<Vec3> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::SetPosition(h, p) if *h == handle => Some(*p),
                _ => None,
            })
        }
    }

    impl SceneBackend for RecordingBackend {
        type Handle = usize;

        fn create_marker(&mut self, style: MarkerStyle) -> usize {
            self.calls.push(Call::Create(style));
            self.next += 1;
            self.next - 1
        }

        fn set_position(&mut self, handle: usize, position: Vec3) {
            self.calls.push(Call::SetPosition(handle, position));
        }
    }

    fn single_arc_pattern(backend: &mut RecordingBackend) -> Pattern<usize> {
        let arc = RadialArc::new(100.0, 0.0, 0.01, Hsl::new(240.0, 0.5, 0.3), 4);
        Pattern::bind(PatternState::from_arcs(vec![arc], 100.0), backend)
    }

    fn assert_close(actual: Vec3, x: f64, y: f64, z: f32) {
        assert!((actual.x as f64 - x).abs() < 1e-4, "{:?}", actual);
        assert!((actual.y as f64 - y).abs() < 1e-4, "{:?}", actual);
        assert_eq!(actual.z, z);
    }

    #[test]
    fn test_initial_placement() {
        let mut backend = RecordingBackend::default();
        let pattern = single_arc_pattern(&mut backend);

        let creates = backend
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count();
        assert_eq!(creates, 5);

        let binding = &pattern.bindings()[0];
        assert_eq!(binding.orbit.len(), 4);
        // Lead starts lifted above the plane
        assert_close(backend.last_position(binding.lead).unwrap(), 100.0, 0.0, 100.0);
        assert_close(backend.last_position(binding.orbit[1]).unwrap(), 0.0, 100.0, 0.0);
    }

    #[test]
    fn test_marker_styles() {
        let mut backend = RecordingBackend::default();
        single_arc_pattern(&mut backend);
        let expected_orbit = MarkerStyle::orbit(Hsl::new(240.0, 0.5, 0.3).to_linear());

        let styles: Vec<MarkerStyle> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Create(style) => Some(*style),
                _ => None,
            })
            .collect();
        assert_eq!(&styles[..4], &[expected_orbit; 4]);
        assert_eq!(styles[4], MarkerStyle::lead());
    }

    #[test]
    fn test_update_moves_every_marker() {
        let mut backend = RecordingBackend::default();
        let mut pattern = single_arc_pattern(&mut backend);
        let before = backend.position_writes();

        pattern.update(&mut backend);
        assert_eq!(backend.position_writes() - before, 5);

        let binding = pattern.bindings()[0].clone();
        assert_close(
            backend.last_position(binding.lead).unwrap(),
            100.0 * 0.01f64.cos(),
            100.0 * 0.01f64.sin(),
            0.0,
        );
        assert_close(
            backend.last_position(binding.orbit[2]).unwrap(),
            100.0 * (0.01 + PI).cos(),
            100.0 * (0.01 + PI).sin(),
            0.0,
        );

        pattern.update(&mut backend);
        assert_close(
            backend.last_position(binding.lead).unwrap(),
            100.0 * 0.02f64.cos(),
            100.0 * 0.02f64.sin(),
            0.0,
        );
    }

    #[test]
    fn test_empty_pattern_is_noop() {
        let mut backend = RecordingBackend::default();
        let config = PatternConfig {
            arc_count: 0,
            ..Default::default()
        };
        let mut pattern = Pattern::generate(&config, &mut Pcg32::seed_from_u64(5), &mut backend);
        pattern.update(&mut backend);
        assert!(backend.calls.is_empty());
        assert!(pattern.state().is_empty());
    }

    #[test]
    fn test_generate_registers_all_markers() {
        let mut store = MarkerStore::new();
        let config = PatternConfig::default();
        let pattern = Pattern::generate(&config, &mut Pcg32::seed_from_u64(11), &mut store);
        assert_eq!(store.len(), pattern.state().marker_count());

        for (arc, binding) in pattern.state().arcs().iter().zip(pattern.bindings()) {
            let lead = store.get(binding.lead).unwrap();
            assert_eq!(lead.position.z, config.lead_elevation);
            for (j, &handle) in binding.orbit.iter().enumerate() {
                assert_eq!(Some(store.get(handle).unwrap().position), arc.orbit_position(j));
            }
        }
    }

    #[test]
    fn test_rate_gated_updates() {
        let mut backend = RecordingBackend::default();
        let mut pattern = single_arc_pattern(&mut backend);
        let mut limiter = FrameLimiter::new(10.0);

        let mut frame = |time: f64, backend: &mut RecordingBackend| {
            let writes = backend.position_writes();
            if limiter.accept(time) {
                pattern.update(backend);
            }
            backend.position_writes() - writes
        };

        assert_eq!(frame(0.0, &mut backend), 5);
        // Too soon: nothing moves
        assert_eq!(frame(40.0, &mut backend), 0);
        assert_eq!(frame(99.0, &mut backend), 0);
        // At the interval: exactly one tick
        assert_eq!(frame(100.0, &mut backend), 5);
        assert_eq!(frame(350.0, &mut backend), 5);
        drop(frame);

        assert_eq!(pattern.state().ticks(), 3);
    }
}
