use crate::errors::GeometryError;
use crate::{Rectangle, Ring};
use std::sync::Arc;

/// An exterior ring plus zero or more hole rings.  All geometric work is
/// delegated to the rings; holes are inside the exterior by convention, not
/// enforcement.  Rings are shared, so a hole-less polygon is just another
/// reference to its exterior ring.
#[derive(Debug, Clone)]
pub struct Polygon {
    exterior: Arc<Ring>,
    holes: Vec<Arc<Ring>>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Result<Self, GeometryError> {
        if !exterior.is_closed() || exterior.is_empty() {
            return Err(GeometryError::RingTooFewPoints(exterior.num_points()));
        }
        for hole in &holes {
            if !hole.is_closed() || hole.is_empty() {
                return Err(GeometryError::HoleNotClosed);
            }
        }
        Ok(Polygon {
            exterior: Arc::new(exterior),
            holes: holes.into_iter().map(Arc::new).collect(),
        })
    }

    /// Wrap an already-shared ring without holes; no ring data is copied.
    pub fn from_ring(exterior: Arc<Ring>) -> Self {
        Polygon {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn holes(&self) -> impl Iterator<Item = &Ring> {
        self.holes.iter().map(|h| h.as_ref())
    }

    pub fn num_holes(&self) -> usize {
        self.holes.len()
    }

    pub fn hole_at(&self, index: usize) -> Option<&Ring> {
        self.holes.get(index).map(|h| h.as_ref())
    }

    pub fn rect(&self) -> Rectangle {
        self.exterior.rect()
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}
