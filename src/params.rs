//! Text parameters from a request surface (web form, query string, CLI).
//!
//! Field names follow the form the generator was driven by: `outer_d`,
//! `inner_d`, `length` and `max_holes`.

use serde::Deserialize;

use crate::error::{ParamError, Result};
use crate::layout::SolidSpec;

/// Raw, unparsed solid parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SolidSpecForm {
    pub outer_d: Option<String>,
    pub inner_d: Option<String>,
    pub length: Option<String>,
    pub max_holes: Option<String>,
}

impl SolidSpecForm {
    /// Collects the known fields from key/value pairs; unknown keys are ignored
    /// and later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "outer_d" => &mut form.outer_d,
                "inner_d" => &mut form.inner_d,
                "length" => &mut form.length,
                "max_holes" => &mut form.max_holes,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        form
    }

    /// Parses and validates the form into a [`SolidSpec`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] for missing, non-numeric or out-of-range
    /// fields, and [`crate::error::LayoutError::InvalidSpec`] when the fields
    /// parse but do not describe a valid solid.
    pub fn parse(&self) -> Result<SolidSpec> {
        let outer = parse_dimension("outer_d", self.outer_d.as_deref())?;
        let inner = parse_dimension("inner_d", self.inner_d.as_deref())?;
        let length = parse_dimension("length", self.length.as_deref())?;
        let max_holes = parse_count("max_holes", self.max_holes.as_deref())?;
        SolidSpec::new(outer, inner, length, max_holes)
    }
}

fn parse_dimension(field: &'static str, raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).ok_or(ParamError::Missing(field))?;
    let value: f64 = raw.parse().map_err(|_| ParamError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParamError::OutOfRange {
            field,
            value: raw.to_string(),
            reason: "must be finite",
        }
        .into());
    }
    if value <= 0.0 {
        return Err(ParamError::OutOfRange {
            field,
            value: raw.to_string(),
            reason: "must be positive",
        }
        .into());
    }
    Ok(value)
}

fn parse_count(field: &'static str, raw: Option<&str>) -> Result<u32> {
    let raw = raw.map(str::trim).ok_or(ParamError::Missing(field))?;
    let value: i64 = raw.parse().map_err(|_| ParamError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if value < 1 {
        return Err(ParamError::OutOfRange {
            field,
            value: raw.to_string(),
            reason: "must be at least 1",
        }
        .into());
    }
    u32::try_from(value).map_err(|_| {
        ParamError::OutOfRange {
            field,
            value: raw.to_string(),
            reason: "is too large",
        }
        .into()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{HeptaError, LayoutError};

    fn form(outer: &str, inner: &str, length: &str, holes: &str) -> SolidSpecForm {
        SolidSpecForm::from_pairs([
            ("outer_d", outer),
            ("inner_d", inner),
            ("length", length),
            ("max_holes", holes),
        ])
    }

    #[test]
    fn parses_valid_form() {
        let spec = form("50", " 5.0 ", "100", "8").parse().unwrap();
        assert_eq!(spec, SolidSpec::new(50.0, 5.0, 100.0, 8).unwrap());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let parsed = SolidSpecForm::from_pairs([("submit", "go"), ("outer_d", "1")]);
        assert_eq!(parsed.outer_d.as_deref(), Some("1"));
        assert!(parsed.inner_d.is_none());
    }

    #[test]
    fn missing_field() {
        let mut f = form("50", "5", "100", "8");
        f.length = None;
        assert!(matches!(
            f.parse(),
            Err(HeptaError::Param(ParamError::Missing("length")))
        ));
    }

    #[test]
    fn non_numeric_field() {
        assert!(matches!(
            form("fifty", "5", "100", "8").parse(),
            Err(HeptaError::Param(ParamError::NotANumber { field: "outer_d", .. }))
        ));
        assert!(matches!(
            form("50", "5", "100", "8.5").parse(),
            Err(HeptaError::Param(ParamError::NotANumber { field: "max_holes", .. }))
        ));
    }

    #[test]
    fn out_of_range_fields() {
        for (f, field) in [
            (form("50", "5", "-1", "8"), "length"),
            (form("inf", "5", "100", "8"), "outer_d"),
            (form("50", "NaN", "100", "8"), "inner_d"),
            (form("50", "5", "100", "0"), "max_holes"),
            (form("50", "5", "100", "-4"), "max_holes"),
            (form("50", "5", "100", "99999999999"), "max_holes"),
        ] {
            match f.parse() {
                Err(HeptaError::Param(ParamError::OutOfRange { field: got, .. })) => {
                    assert_eq!(got, field);
                }
                other => panic!("expected out of range {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn geometric_violation_is_invalid_spec() {
        assert!(matches!(
            form("5", "10", "100", "8").parse(),
            Err(HeptaError::Layout(LayoutError::InvalidSpec(_)))
        ));
    }
}
