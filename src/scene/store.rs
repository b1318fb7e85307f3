//! In-memory marker list
//!
//! Holds the style and latest position of every registered marker. The GPU
//! renderer reads it each frame; the headless native run uses it on its own.

use glam::Vec3;

use super::{MarkerStyle, SceneBackend};

/// Index of a marker inside a `MarkerStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u32);

impl MarkerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A registered visual element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub style: MarkerStyle,
    pub position: Vec3,
}

#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            markers: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.index())
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Axis-aligned bounds of all marker centers
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.markers.first()?.position;
        Some(self.markers.iter().fold((first, first), |(lo, hi), m| {
            (lo.min(m.position), hi.max(m.position))
        }))
    }
}

impl SceneBackend for MarkerStore {
    type Handle = MarkerId;

    fn create_marker(&mut self, style: MarkerStyle) -> MarkerId {
        let id = MarkerId(self.markers.len() as u32);
        self.markers.push(Marker {
            style,
            position: Vec3::ZERO,
        });
        id
    }

    fn set_position(&mut self, handle: MarkerId, position: Vec3) {
        match self.markers.get_mut(handle.index()) {
            Some(marker) => marker.position = position,
            None => log::warn!("Position write to unknown marker {:?}", handle),
        }
    }
}
