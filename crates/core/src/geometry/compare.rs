//! Row/column ordering of rectangles ("reading order").

use std::cmp::Ordering;

use super::rect::Rect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalDirection {
    #[default]
    TopToBottom,
    BottomToTop,
}

/// Returns a function comparing the positions of two rectangles organized
/// into rows and columns, with orientations controlled by `v` and `h`.
///
/// Rectangles whose centers lie within each other's vertical span are on
/// the same row and get ordered horizontally by the same rule. `Equal` means
/// both rectangles overlap at least 50% on both axes.
pub fn row_column_compare(
    v: VerticalDirection,
    h: HorizontalDirection,
) -> impl Fn(&Rect, &Rect) -> Ordering + Copy {
    let before_v = match v {
        VerticalDirection::TopToBottom => Ordering::Less,
        VerticalDirection::BottomToTop => Ordering::Greater,
    };
    let before_h = match h {
        HorizontalDirection::LeftToRight => Ordering::Less,
        HorizontalDirection::RightToLeft => Ordering::Greater,
    };

    move |a: &Rect, b: &Rect| {
        let ac = a.center();
        let bc = b.center();

        if ac.top < b.top || bc.top > a.bottom {
            return before_v;
        }
        if bc.top < a.top || ac.top > b.bottom {
            return before_v.reverse();
        }
        if ac.left < b.left || bc.left > a.right {
            return before_h;
        }
        if bc.left < a.left || ac.left > b.right {
            return before_h.reverse();
        }

        Ordering::Equal
    }
}

/// Sorts `items` into reading order using [`row_column_compare`].
///
/// The comparator is not a total order for arbitrary inputs, so this uses a
/// stable insertion sort which tolerates inconsistent answers.
pub fn sort_reading_order<T>(
    items: &mut [T],
    bounds: impl Fn(&T) -> Rect,
    v: VerticalDirection,
    h: HorizontalDirection,
) {
    let compare = row_column_compare(v, h);

    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&bounds(&items[j - 1]), &bounds(&items[j])) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
