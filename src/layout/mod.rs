//! Hole layout for hepta-tubular cylinders.
//!
//! A solid is a tube of `outer_diameter` with a central bore of
//! `inner_diameter`, pierced by through-holes of the same diameter arranged on
//! concentric rings ("peripheries"). [`PlanLayout`] turns a [`SolidSpec`] into
//! a [`RingLayout`] describing every ring and hole; it produces no mesh.

mod plan_layout;
mod ring;
mod solid_spec;

pub use plan_layout::PlanLayout;
pub use ring::{HolePlacement, Ring};
pub use solid_spec::SolidSpec;

use serde::Serialize;

/// Maximum number of holes placed on a single ring.
pub const MAX_HOLES_PER_RING: u32 = 8;

/// Distance every bore extends past each end face of the solid.
pub const BORE_OVERSHOOT: f64 = 1.0;

/// Extra inward offset of hole centers from the clearance radius of a ring.
pub const HOLE_INSET: f64 = 1.0;

/// Fully parameterized hole layout for one solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingLayout {
    spec: SolidSpec,
    num_peripheries: u32,
    total_diameter_covered: f64,
    remaining_diameter: f64,
    num_gaps: u32,
    gap: f64,
    rings: Vec<Ring>,
}

impl RingLayout {
    /// Returns the spec the layout was planned from.
    #[must_use]
    pub fn spec(&self) -> &SolidSpec {
        &self.spec
    }

    /// Returns the number of rings, `ceil(max_holes / 8)`.
    #[must_use]
    pub fn num_peripheries(&self) -> u32 {
        self.num_peripheries
    }

    /// Returns the diameter reserved for holes and the central bore.
    #[must_use]
    pub fn total_diameter_covered(&self) -> f64 {
        self.total_diameter_covered
    }

    /// Returns the diameter left over for gaps.
    #[must_use]
    pub fn remaining_diameter(&self) -> f64 {
        self.remaining_diameter
    }

    /// Returns the number of gap slots the remaining diameter is split into.
    #[must_use]
    pub fn num_gaps(&self) -> u32 {
        self.num_gaps
    }

    /// Returns the spacing constant shared by every ring.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Returns the rings, outermost first.
    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Returns the number of holes across all rings.
    #[must_use]
    pub fn total_holes(&self) -> u32 {
        self.rings.iter().map(Ring::hole_count).sum()
    }

    /// Returns the length of every through-bore.
    #[must_use]
    pub fn bore_length(&self) -> f64 {
        self.spec.length() + 2.0 * BORE_OVERSHOOT
    }

    /// Returns the `z` coordinate every through-bore starts at.
    #[must_use]
    pub fn bore_start(&self) -> f64 {
        -BORE_OVERSHOOT
    }

    /// Iterates over every hole of every ring, outermost ring first.
    pub fn holes(&self) -> impl Iterator<Item = (&Ring, HolePlacement)> + '_ {
        self.rings
            .iter()
            .flat_map(|ring| ring.holes().map(move |hole| (ring, hole)))
    }
}
