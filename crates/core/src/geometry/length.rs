//! Signed distances measured in points (1/72 inch).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{DossierError, Result};

use super::unit::LengthUnit;

/// A signed distance. Values are stored in points; the unit accessors
/// convert on the way out.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);
    pub const PT: Length = Length(1.0);
    pub const INCH: Length = Length(72.0);
    pub const CM: Length = Length(72.0 / 2.54);
    pub const MM: Length = Length(72.0 / 25.4);

    /// Default margin for approximate comparisons.
    pub const APPROX_MARGIN: Length = Self::MM;

    pub const fn from_pt(value: f64) -> Self {
        Self(value)
    }

    pub fn from_inch(value: f64) -> Self {
        Self::INCH.scale(value)
    }

    pub fn from_cm(value: f64) -> Self {
        Self::CM.scale(value)
    }

    pub fn from_mm(value: f64) -> Self {
        Self::MM.scale(value)
    }

    /// Returns the distance in points (1/72 inch).
    pub const fn pt(self) -> f64 {
        self.0
    }

    /// Returns the distance in inches.
    pub fn inch(self) -> f64 {
        self.0 / Self::INCH.0
    }

    /// Returns the distance in centimeters.
    pub fn cm(self) -> f64 {
        self.0 / Self::CM.0
    }

    /// Returns the distance in millimeters.
    pub fn mm(self) -> f64 {
        self.0 / Self::MM.0
    }

    /// Returns the distance expressed in `unit`.
    pub fn in_unit(self, unit: LengthUnit) -> f64 {
        self.0 / unit.size().0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the closest multiple of `nearest`. A zero `nearest` leaves
    /// the value untouched.
    pub fn round(self, nearest: Length) -> Self {
        if nearest.0 == 0.0 {
            return self;
        }
        Self((self.0 / nearest.0).round() * nearest.0)
    }

    /// Returns the scalar product of the length and `factor`.
    pub const fn scale(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }

    pub fn min(self, other: Length) -> Self {
        if other < self { other } else { self }
    }

    pub fn max(self, other: Length) -> Self {
        if other > self { other } else { self }
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Reports whether both lengths differ by no more than `margin`.
    pub fn approx_eq(self, other: Length, margin: Length) -> bool {
        (self - other).abs() <= margin
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        Length(self * rhs.0)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, Add::add)
    }
}

/// Formats the length in points. Presentation in other units goes through
/// [`super::LengthFormat`].
impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&LengthUnit::Pt.format(*self))
    }
}

/// Parses `"<number><unit>"`, e.g. `"2.5cm"`, `"-3 mm"` or `"1e1pt"`. A
/// bare zero is accepted without a unit.
impl FromStr for Length {
    type Err = DossierError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let number = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let unit = &s[number.len()..];
        let number = number.trim();

        let value: f64 = number.parse().map_err(|_| {
            DossierError::BadConfig(format!("invalid length {s:?}: cannot parse {number:?}"))
        })?;

        if unit.is_empty() {
            if value == 0.0 {
                return Ok(Length::ZERO);
            }
            return Err(DossierError::InvalidUnit(format!("{s} (missing unit)")));
        }

        let unit: LengthUnit = unit.parse()?;
        let length = unit.size() * value;
        if !length.is_finite() {
            return Err(DossierError::BadConfig(format!("invalid length {s:?}: out of range")));
        }
        Ok(length)
    }
}
