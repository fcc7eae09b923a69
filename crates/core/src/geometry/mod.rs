//! Geometry primitives shared by sketches, page content and reports.
//!
//! All coordinates are relative to the top-left corner of a page, with the
//! vertical axis growing downwards.

pub mod compare;
pub mod length;
pub mod point;
pub mod rect;
pub mod unit;

pub use compare::{HorizontalDirection, VerticalDirection, row_column_compare, sort_reading_order};
pub use length::Length;
pub use point::{Point, Size};
pub use rect::Rect;
pub use unit::{LengthFormat, LengthUnit};
