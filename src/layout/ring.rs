use serde::Serialize;

use crate::math::{cos_deg, sin_deg, Point2};

use super::HOLE_INSET;

/// One concentric ring of holes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ring {
    index: usize,
    ring_diameter: f64,
    hole_count: u32,
    hole_diameter: f64,
    gap: f64,
}

/// Position of a single hole on its ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HolePlacement {
    /// Position of the hole on the ring, counter-clockwise from `+x`.
    pub index: u32,
    /// Angle of the hole center in degrees, `index * (360 / hole_count)`.
    pub angle_deg: f64,
    /// Hole center in the cross-section plane.
    pub center: Point2,
}

impl Ring {
    pub(super) fn new(
        index: usize,
        ring_diameter: f64,
        hole_count: u32,
        hole_diameter: f64,
        gap: f64,
    ) -> Self {
        Self {
            index,
            ring_diameter,
            hole_count,
            hole_diameter,
            gap,
        }
    }

    /// Returns the periphery index, `0` for the outermost ring.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the diameter this ring's holes are laid out from.
    #[must_use]
    pub fn ring_diameter(&self) -> f64 {
        self.ring_diameter
    }

    /// Returns the number of holes on this ring.
    #[must_use]
    pub fn hole_count(&self) -> u32 {
        self.hole_count
    }

    /// Returns the diameter of each hole.
    #[must_use]
    pub fn hole_diameter(&self) -> f64 {
        self.hole_diameter
    }

    /// Returns the spacing constant shared by every ring of the solid.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Returns the angular pitch between neighbouring holes in degrees.
    #[must_use]
    pub fn angle_step(&self) -> f64 {
        360.0 / f64::from(self.hole_count)
    }

    /// Returns the distance from the axis to every hole center.
    ///
    /// `d/2 - (hole_diameter + gap)/2 - 1`.
    #[must_use]
    pub fn radial_offset(&self) -> f64 {
        self.ring_diameter / 2.0 - (self.hole_diameter + self.gap) / 2.0 - HOLE_INSET
    }

    /// Iterates over the hole placements of this ring.
    pub fn holes(&self) -> impl Iterator<Item = HolePlacement> {
        let step = self.angle_step();
        let radius = self.radial_offset();
        (0..self.hole_count).map(move |index| {
            let angle_deg = f64::from(index) * step;
            HolePlacement {
                index,
                angle_deg,
                center: Point2::new(radius * cos_deg(angle_deg), radius * sin_deg(angle_deg)),
            }
        })
    }
}
