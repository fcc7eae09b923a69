use std::fmt;

use super::length::Length;

/// A position on a page, measured from the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub left: Length,
    pub top: Length,
}

impl Point {
    pub const fn new(left: Length, top: Length) -> Self {
        Self { left, top }
    }

    /// Moves the point by the given offset.
    pub fn shift(self, offset: Size) -> Self {
        Self {
            left: self.left + offset.width,
            top: self.top + offset.height,
        }
    }

    pub fn approx_eq(&self, other: &Point, margin: Length) -> bool {
        self.left.approx_eq(other.left, margin) && self.top.approx_eq(other.top, margin)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.top)
    }
}

/// A two-dimensional extent, used both for dimensions and offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: Length,
    pub height: Length,
}

impl Size {
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift() {
        let p = Point::new(Length::from_cm(1.0), Length::from_cm(2.0));
        let moved = p.shift(Size::new(Length::from_cm(0.5), Length::from_cm(-1.0)));

        assert!(moved.approx_eq(
            &Point::new(Length::from_cm(1.5), Length::from_cm(1.0)),
            Length::APPROX_MARGIN
        ));
    }

    #[test]
    fn test_display() {
        let p = Point::new(Length::from_pt(3.0), Length::ZERO);
        assert_eq!(p.to_string(), "(3pt, 0)");
    }
}
