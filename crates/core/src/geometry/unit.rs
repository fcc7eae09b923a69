//! Length units and presentation formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DossierError, Result};

use super::length::Length;

/// A physical length unit recognized in configuration and output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Pt,
    Mm,
    Cm,
    In,
}

impl LengthUnit {
    /// All units, sorted by name.
    pub const fn all() -> [LengthUnit; 4] {
        [Self::Cm, Self::In, Self::Mm, Self::Pt]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::In => "in",
        }
    }

    /// The length of one unit.
    pub const fn size(self) -> Length {
        match self {
            Self::Pt => Length::PT,
            Self::Mm => Length::MM,
            Self::Cm => Length::CM,
            Self::In => Length::INCH,
        }
    }

    /// Formats `value` with at most three decimals and the unit name, e.g.
    /// `"2.5cm"`. Values rounding to zero are written as a bare `"0"`.
    pub fn format(self, value: Length) -> String {
        if value.is_zero() {
            return "0".to_string();
        }

        let mut text = format!("{:.3}", value.in_unit(self));
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "0" || text == "-0" {
            return "0".to_string();
        }

        text.push_str(self.name());
        text
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LengthUnit {
    type Err = DossierError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Self::Pt),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" | "inch" => Ok(Self::In),
            _ => Err(DossierError::InvalidUnit(s.to_string())),
        }
    }
}

/// Presentation settings for lengths in reports. Values are rounded to the
/// nearest multiple of `nearest` (if set) before conversion to `unit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthFormat {
    pub unit: LengthUnit,
    pub nearest: Option<Length>,
}

impl LengthFormat {
    pub const fn new(unit: LengthUnit) -> Self {
        Self {
            unit,
            nearest: None,
        }
    }

    pub const fn rounded(unit: LengthUnit, nearest: Length) -> Self {
        Self {
            unit,
            nearest: Some(nearest),
        }
    }

    fn round(&self, value: Length) -> Length {
        match self.nearest {
            Some(nearest) => value.round(nearest),
            None => value,
        }
    }

    /// Returns the numeric value of `value` in the configured unit.
    pub fn value(&self, value: Length) -> f64 {
        self.round(value).in_unit(self.unit)
    }

    /// Returns a human-readable representation of `value`.
    pub fn format(&self, value: Length) -> String {
        self.unit.format(self.round(value))
    }
}

impl Default for LengthFormat {
    fn default() -> Self {
        Self::new(LengthUnit::Mm)
    }
}
