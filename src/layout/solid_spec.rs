use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Input parameters of a hepta-tubular cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidSpec {
    outer_diameter: f64,
    inner_diameter: f64,
    length: f64,
    max_holes: u32,
}

impl SolidSpec {
    /// Creates a validated spec.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpec`] if any dimension is non-finite or
    /// non-positive, if `outer_diameter <= inner_diameter`, or if
    /// `max_holes < 1`.
    pub fn new(
        outer_diameter: f64,
        inner_diameter: f64,
        length: f64,
        max_holes: u32,
    ) -> Result<Self> {
        let spec = Self {
            outer_diameter,
            inner_diameter,
            length,
            max_holes,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks the spec invariants.
    ///
    /// Specs built through [`SolidSpec::new`] always pass; deserialized specs
    /// must be validated before use.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpec`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("outer_diameter", self.outer_diameter),
            ("inner_diameter", self.inner_diameter),
            ("length", self.length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidSpec(format!(
                    "{name} must be a positive finite number, got {value}"
                ))
                .into());
            }
        }
        if self.outer_diameter <= self.inner_diameter {
            return Err(LayoutError::InvalidSpec(format!(
                "outer_diameter {} must exceed inner_diameter {}",
                self.outer_diameter, self.inner_diameter
            ))
            .into());
        }
        if self.max_holes < 1 {
            return Err(LayoutError::InvalidSpec("max_holes must be at least 1".into()).into());
        }
        Ok(())
    }

    /// Returns the outer diameter of the tube.
    #[must_use]
    pub fn outer_diameter(&self) -> f64 {
        self.outer_diameter
    }

    /// Returns the diameter of the central bore and of every hole.
    #[must_use]
    pub fn inner_diameter(&self) -> f64 {
        self.inner_diameter
    }

    /// Returns the length of the tube along its axis.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the total number of holes requested across all rings.
    #[must_use]
    pub fn max_holes(&self) -> u32 {
        self.max_holes
    }
}
