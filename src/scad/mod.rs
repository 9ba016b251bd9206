//! OpenSCAD rendering of a planned layout.
//!
//! The geometry kernel only sees the text produced here. Ring diameters and
//! hole counts are taken from the [`RingLayout`] verbatim so the kernel can not
//! drop a ring the planner accepted.

use std::fmt;

use crate::layout::{RingLayout, BORE_OVERSHOOT, HOLE_INSET};

/// Default `$fn` for every cylinder.
pub const DEFAULT_SEGMENTS: u32 = 100;

/// Name of the top-level module in the emitted program.
pub const MODULE_NAME: &str = "dynamic_hepta_tubular_cylinder";

/// Renders a [`RingLayout`] as an OpenSCAD program.
///
/// The output is a pure function of the layout and segment count:
/// identical inputs give byte-identical text.
pub struct EmitScad<'a> {
    layout: &'a RingLayout,
    segments: u32,
}

impl<'a> EmitScad<'a> {
    /// Creates a new `EmitScad` operation with [`DEFAULT_SEGMENTS`].
    #[must_use]
    pub fn new(layout: &'a RingLayout) -> Self {
        Self {
            layout,
            segments: DEFAULT_SEGMENTS,
        }
    }

    /// Sets the `$fn` used for every cylinder.
    #[must_use]
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(3);
        self
    }

    /// Executes the operation, returning the program text.
    #[must_use]
    pub fn execute(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EmitScad<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout;
        let spec = layout.spec();
        let fn_ = self.segments;

        writeln!(f, "// {MODULE_NAME}")?;
        writeln!(
            f,
            "// peripheries = {}, gap = {}, holes = {}",
            layout.num_peripheries(),
            layout.gap(),
            layout.total_holes()
        )?;
        writeln!(f)?;
        writeln!(f, "outer_d = {};", spec.outer_diameter())?;
        writeln!(f, "inner_d = {};", spec.inner_diameter())?;
        writeln!(f, "length = {};", spec.length())?;
        writeln!(f, "max_holes = {};", spec.max_holes())?;
        writeln!(f, "gap = {};", layout.gap())?;
        writeln!(f, "overshoot = {BORE_OVERSHOOT};")?;
        writeln!(f)?;

        writeln!(f, "module place_holes(d, num_holes) {{")?;
        writeln!(f, "    angle = 360 / num_holes;")?;
        writeln!(f, "    r = d / 2 - (inner_d + gap) / 2 - {HOLE_INSET};")?;
        writeln!(f, "    for (i = [0 : num_holes - 1]) {{")?;
        writeln!(
            f,
            "        translate([r * cos(i * angle), r * sin(i * angle), -overshoot])"
        )?;
        writeln!(
            f,
            "            cylinder(d = inner_d, h = length + 2 * overshoot, $fn = {fn_});"
        )?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")?;
        writeln!(f)?;

        writeln!(f, "module {MODULE_NAME}() {{")?;
        writeln!(f, "    difference() {{")?;
        writeln!(f, "        cylinder(d = outer_d, h = length, $fn = {fn_});")?;
        writeln!(f, "        translate([0, 0, -overshoot])")?;
        writeln!(
            f,
            "            cylinder(d = inner_d, h = length + 2 * overshoot, $fn = {fn_});"
        )?;
        for ring in layout.rings() {
            writeln!(
                f,
                "        place_holes({}, {}); // ring {}",
                ring.ring_diameter(),
                ring.hole_count(),
                ring.index()
            )?;
        }
        writeln!(f, "    }}")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "{MODULE_NAME}();")
    }
}
