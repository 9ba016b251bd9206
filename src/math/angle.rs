//! Trigonometry on angles given in degrees.
//!
//! Quarter turns are resolved exactly so that holes placed at 0, 90, 180 and
//! 270 degrees land on the axes without a `6e-17` residue, matching how the
//! geometry kernel evaluates `cos`/`sin` on degree arguments.

/// Sine of an angle in degrees.
#[must_use]
pub fn sin_deg(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return f64::NAN;
    }
    let reduced = degrees.rem_euclid(360.0);
    if reduced == 0.0 || reduced == 180.0 {
        0.0
    } else if reduced == 90.0 {
        1.0
    } else if reduced == 270.0 {
        -1.0
    } else {
        reduced.to_radians().sin()
    }
}

/// Cosine of an angle in degrees.
#[must_use]
pub fn cos_deg(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return f64::NAN;
    }
    let reduced = degrees.rem_euclid(360.0);
    if reduced == 90.0 || reduced == 270.0 {
        0.0
    } else if reduced == 0.0 {
        1.0
    } else if reduced == 180.0 {
        -1.0
    } else {
        reduced.to_radians().cos()
    }
}
