use std::fmt;

use crate::error::{DossierError, Result};

use super::length::Length;
use super::point::Point;

/// An axis-aligned rectangle with directed edges. Until normalized, `right`
/// may lie left of `left` and `bottom` above `top`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// X-coordinate of the upper-left corner.
    pub left: Length,
    /// Y-coordinate of the upper-left corner.
    pub top: Length,
    /// X-coordinate of the lower-right corner.
    pub right: Length,
    /// Y-coordinate of the lower-right corner.
    pub bottom: Length,
}

impl Rect {
    pub const fn new(left: Length, top: Length, right: Length, bottom: Length) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Constructs a rectangle from coordinates in points.
    pub const fn from_points(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            Length::from_pt(left),
            Length::from_pt(top),
            Length::from_pt(right),
            Length::from_pt(bottom),
        )
    }

    /// Constructs a rectangle from coordinates in centimeters.
    pub fn from_centimeters(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            Length::from_cm(left),
            Length::from_cm(top),
            Length::from_cm(right),
            Length::from_cm(bottom),
        )
    }

    pub fn from_xywh(left: Length, top: Length, width: Length, height: Length) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Swaps edges as necessary so both width and height are non-negative.
    pub fn normalize(self) -> Self {
        let mut r = self;
        if r.right < r.left {
            std::mem::swap(&mut r.left, &mut r.right);
        }
        if r.bottom < r.top {
            std::mem::swap(&mut r.top, &mut r.bottom);
        }
        r
    }

    /// Fails unless `left <= right` and `top <= bottom`. Rectangles with NaN
    /// components never validate.
    pub fn validate(&self) -> Result<()> {
        if self.left <= self.right && self.top <= self.bottom {
            return Ok(());
        }
        Err(DossierError::InvalidRect(self.to_string()))
    }

    pub fn width(&self) -> Length {
        self.right - self.left
    }

    pub fn height(&self) -> Length {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right, self.top)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    pub fn is_empty(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }

    /// Tests whether the rectangle is fully contained within `other`.
    pub fn inside(&self, other: &Rect) -> bool {
        other.contains(self)
    }

    /// Tests whether the rectangle fully contains `other`. Edges may touch;
    /// `other` must itself be normalized.
    pub fn contains(&self, other: &Rect) -> bool {
        self.left <= other.left
            && other.left <= other.right
            && other.right <= self.right
            && self.top <= other.top
            && other.top <= other.bottom
            && other.bottom <= self.bottom
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn approx_eq(&self, other: &Rect, margin: Length) -> bool {
        self.left.approx_eq(other.left, margin)
            && self.top.approx_eq(other.top, margin)
            && self.right.approx_eq(other.right, margin)
            && self.bottom.approx_eq(other.bottom, margin)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.top_left(), self.bottom_right())
    }
}
