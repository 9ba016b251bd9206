use tracing::debug;

use crate::error::{LayoutError, Result};

use super::{Ring, RingLayout, SolidSpec, MAX_HOLES_PER_RING};

/// Plans the concentric hole rings of a hepta-tubular cylinder.
///
/// Holes are spilled onto `ceil(max_holes / 8)` rings. The diameter left
/// after reserving `inner_diameter * (2 * rings + 1)` is divided into
/// `2 * rings + 2` equal gap slots, rounded up to a whole number. Ring `j`
/// sits at `outer_diameter - 2 * (inner_diameter + gap) * j`.
///
/// Planning never drops holes: a ring that cannot be placed fails the whole
/// plan.
pub struct PlanLayout {
    spec: SolidSpec,
}

impl PlanLayout {
    /// Creates a new `PlanLayout` operation.
    #[must_use]
    pub fn new(spec: SolidSpec) -> Self {
        Self { spec }
    }

    /// Executes the planner.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpec`] if the spec is invalid or leaves no
    /// diameter for gaps, and [`LayoutError::InfeasibleLayout`] if an inner
    /// ring does not clear the hole diameter or its hole centers would fall
    /// on or past the axis.
    pub fn execute(&self) -> Result<RingLayout> {
        let spec = self.spec;
        spec.validate()?;

        let outer = spec.outer_diameter();
        let inner = spec.inner_diameter();
        let max_holes = spec.max_holes();

        let num_peripheries = max_holes.div_ceil(MAX_HOLES_PER_RING);
        let total_diameter_covered = inner * f64::from(2 * num_peripheries + 1);
        let remaining_diameter = outer - total_diameter_covered;
        if remaining_diameter <= 0.0 {
            return Err(LayoutError::InvalidSpec(format!(
                "{max_holes} holes of diameter {inner} need more than {outer} of diameter \
                 (remaining diameter {remaining_diameter})"
            ))
            .into());
        }

        let num_gaps = num_peripheries * 2 + 2;
        let gap = (remaining_diameter / f64::from(num_gaps)).ceil();

        let ring_at = |j: u32| {
            let ring_diameter = outer - 2.0 * (inner + gap) * f64::from(j);
            let hole_count = (max_holes - MAX_HOLES_PER_RING * j).min(MAX_HOLES_PER_RING);
            Ring::new(j as usize, ring_diameter, hole_count, inner, gap)
        };

        // Diameter and radius shrink with every ring, so the innermost ring
        // bounds all of them.
        let innermost = ring_at(num_peripheries - 1);
        if innermost.ring_diameter() <= inner {
            return Err(infeasible(
                num_peripheries - 1,
                format!(
                    "diameter {} does not clear hole diameter {inner}",
                    innermost.ring_diameter()
                ),
            ));
        }
        if innermost.radial_offset() <= 0.0 {
            return Err(infeasible(
                num_peripheries - 1,
                format!(
                    "hole centers at radius {} do not clear the axis",
                    innermost.radial_offset()
                ),
            ));
        }
        let rings: Vec<Ring> = (0..num_peripheries).map(ring_at).collect();

        debug!(
            num_peripheries,
            gap,
            remaining_diameter,
            "planned {max_holes} holes"
        );

        Ok(RingLayout {
            spec,
            num_peripheries,
            total_diameter_covered,
            remaining_diameter,
            num_gaps,
            gap,
            rings,
        })
    }
}

fn infeasible(ring: u32, reason: String) -> crate::error::HeptaError {
    LayoutError::InfeasibleLayout {
        ring: ring as usize,
        reason,
    }
    .into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::HeptaError;
    use approx::assert_relative_eq;

    fn plan(outer: f64, inner: f64, length: f64, max_holes: u32) -> Result<RingLayout> {
        PlanLayout::new(SolidSpec::new(outer, inner, length, max_holes)?).execute()
    }

    #[test]
    fn single_ring_scenario() {
        let layout = plan(50.0, 5.0, 100.0, 8).unwrap();
        assert_eq!(layout.num_peripheries(), 1);
        assert_relative_eq!(layout.total_diameter_covered(), 15.0);
        assert_relative_eq!(layout.remaining_diameter(), 35.0);
        assert_eq!(layout.num_gaps(), 4);
        assert_relative_eq!(layout.gap(), 9.0);

        let rings = layout.rings();
        assert_eq!(rings.len(), 1);
        assert_relative_eq!(rings[0].ring_diameter(), 50.0);
        assert_eq!(rings[0].hole_count(), 8);
        assert_relative_eq!(rings[0].hole_diameter(), 5.0);
        assert_relative_eq!(rings[0].radial_offset(), 17.0);

        let angles: Vec<f64> = rings[0].holes().map(|h| h.angle_deg).collect();
        assert_eq!(
            angles,
            vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]
        );
    }

    #[test]
    fn peripheries_round_up() {
        let cases = [(1, 1), (8, 1), (9, 2), (16, 2), (17, 3)];
        for (max_holes, expected) in cases {
            let layout = plan(200.0, 5.0, 100.0, max_holes).unwrap();
            assert_eq!(layout.num_peripheries(), expected, "max_holes = {max_holes}");
            assert_eq!(layout.rings().len(), expected as usize);
        }
    }

    #[test]
    fn hole_counts_sum_to_max_holes() {
        for max_holes in 1..=24 {
            let layout = plan(200.0, 5.0, 100.0, max_holes).unwrap();
            assert_eq!(layout.total_holes(), max_holes, "max_holes = {max_holes}");
            for ring in layout.rings() {
                assert!((1..=MAX_HOLES_PER_RING).contains(&ring.hole_count()));
            }
        }
    }

    #[test]
    fn partial_last_ring() {
        let layout = plan(200.0, 5.0, 100.0, 19).unwrap();
        let counts: Vec<u32> = layout.rings().iter().map(Ring::hole_count).collect();
        assert_eq!(counts, vec![8, 8, 3]);
    }

    #[test]
    fn ring_diameters_strictly_decrease() {
        let layout = plan(200.0, 5.0, 100.0, 24).unwrap();
        // remaining = 200 - 5 * 7 = 165, gap = ceil(165 / 8) = 21
        assert_relative_eq!(layout.gap(), 21.0);
        let diameters: Vec<f64> = layout.rings().iter().map(Ring::ring_diameter).collect();
        assert_relative_eq!(diameters[0], 200.0);
        assert_relative_eq!(diameters[1], 200.0 - 2.0 * 26.0);
        assert_relative_eq!(diameters[2], 200.0 - 4.0 * 26.0);
        for pair in diameters.windows(2) {
            assert!(pair[1] < pair[0]);
        }
        for ring in layout.rings() {
            assert!(ring.ring_diameter() > 5.0);
            assert_relative_eq!(ring.gap(), layout.gap());
        }
    }

    #[test]
    fn angles_are_exact_multiples_of_pitch() {
        let layout = plan(200.0, 5.0, 100.0, 21).unwrap();
        for ring in layout.rings() {
            let n = ring.hole_count();
            for hole in ring.holes() {
                assert_eq!(hole.angle_deg, f64::from(hole.index) * (360.0 / f64::from(n)));
            }
        }
    }

    #[test]
    fn no_room_for_gaps_is_invalid() {
        // 5 * 3 = 15 >= 15
        let result = plan(15.0, 5.0, 100.0, 8);
        assert!(matches!(
            result,
            Err(HeptaError::Layout(LayoutError::InvalidSpec(_)))
        ));
    }

    #[test]
    fn ring_inside_bore_is_infeasible() {
        // remaining = 9 - 7 = 2, gap = ceil(2 / 8) = 1, ring 2 = 9 - 2 * 2 * 2 = 1
        let result = plan(9.0, 1.0, 10.0, 17);
        assert!(matches!(
            result,
            Err(HeptaError::Layout(LayoutError::InfeasibleLayout { ring: 2, .. }))
        ));
    }

    #[test]
    fn hole_centers_past_axis_are_infeasible() {
        // remaining = 30 - 18 = 12, gap = ceil(12 / 10) = 2,
        // ring 3 = 30 - 2 * 4 * 3 = 6, radius = 3 - 2 - 1 = 0
        let result = plan(30.0, 2.0, 10.0, 32);
        assert!(matches!(
            result,
            Err(HeptaError::Layout(LayoutError::InfeasibleLayout { ring: 3, .. }))
        ));
    }

    #[test]
    fn outer_ring_radius_must_clear_axis() {
        // remaining = 0.5, gap = 1, radius = 1.75 - 1 - 1 < 0
        let result = plan(3.5, 1.0, 10.0, 4);
        assert!(matches!(
            result,
            Err(HeptaError::Layout(LayoutError::InfeasibleLayout { ring: 0, .. }))
        ));
    }

    #[test]
    fn huge_infeasible_request_fails_without_allocating() {
        // 536870912 rings with gap 931, the innermost far past the axis
        let result = plan(1e12, 1.0, 1.0, u32::MAX);
        assert!(matches!(
            result,
            Err(HeptaError::Layout(LayoutError::InfeasibleLayout {
                ring: 536_870_911,
                ..
            }))
        ));
    }

    #[test]
    fn planning_is_deterministic() {
        let a = plan(63.5, 4.2, 80.0, 13).unwrap();
        let b = plan(63.5, 4.2, 80.0, 13).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bore_spans_past_both_ends() {
        let layout = plan(50.0, 5.0, 100.0, 8).unwrap();
        assert_relative_eq!(layout.bore_start(), -1.0);
        assert_relative_eq!(layout.bore_length(), 102.0);
    }
}
