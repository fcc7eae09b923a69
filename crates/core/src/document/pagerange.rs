use std::fmt;
use std::str::FromStr;

use crate::error::{DossierError, Result};

/// One-based, inclusive range of pages. `upper` may be [`PageRange::LAST`]
/// to cover everything from `lower` to the end; if both ends are `LAST`
/// only the last page is covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRange {
    lower: usize,
    upper: usize,
}

impl PageRange {
    pub const LAST: usize = usize::MAX;

    pub const ALL: PageRange = PageRange {
        lower: 1,
        upper: Self::LAST,
    };

    pub fn new(lower: usize, upper: usize) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    /// Range covering only page `n`.
    pub fn single(n: usize) -> Result<Self> {
        Self::new(n, n)
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    pub fn validate(&self) -> Result<()> {
        if self.lower < 1 {
            return Err(DossierError::InvalidPageRange(format!(
                "lower end must be >=1, got {}",
                self.lower
            )));
        }
        if self.upper < self.lower {
            return Err(DossierError::InvalidPageRange(format!(
                "upper end must be same as lower ({}) or larger, got {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    /// Reports whether page `n` lies within the range. A range starting at
    /// [`PageRange::LAST`] needs to know the page count and never contains
    /// anything here.
    pub fn contains(&self, n: usize) -> bool {
        self.lower != Self::LAST && self.lower <= n && n <= self.upper
    }
}

impl Default for PageRange {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower == Self::LAST {
            return f.write_str("(last)");
        }
        if self.lower == self.upper {
            return write!(f, "{}", self.lower);
        }
        if self.upper == Self::LAST {
            return write!(f, "{}-(last)", self.lower);
        }
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

fn parse_bound(text: &str, whole: &str) -> Result<usize> {
    match text.trim() {
        "last" | "(last)" => Ok(PageRange::LAST),
        number => number.parse().map_err(|_| {
            DossierError::InvalidPageRange(format!("cannot parse {whole:?}"))
        }),
    }
}

/// Accepts `"3"`, `"1-4"`, `"2-"` (open end) and `"last"`.
impl FromStr for PageRange {
    type Err = DossierError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        match s.split_once('-') {
            None => {
                let n = parse_bound(s, s)?;
                Self::new(n, n)
            }
            Some((lower, upper)) => {
                let lower = parse_bound(lower, s)?;
                let upper = if upper.trim().is_empty() {
                    Self::LAST
                } else {
                    parse_bound(upper, s)?
                };
                Self::new(lower, upper)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new() {
        assert_eq!(PageRange::new(0, 1).unwrap_err().kind(), ErrorKind::InvalidPageRange);
        assert_eq!(PageRange::new(3, 2).unwrap_err().kind(), ErrorKind::InvalidPageRange);
        assert!(PageRange::new(PageRange::LAST, PageRange::LAST).is_ok());
        assert!(PageRange::single(7).is_ok());
    }

    #[test]
    fn test_display() {
        for (range, want) in [
            (PageRange::ALL, "1-(last)"),
            (PageRange::new(3, 3).unwrap(), "3"),
            (PageRange::new(1, 4).unwrap(), "1-4"),
            (PageRange::new(2, PageRange::LAST).unwrap(), "2-(last)"),
            (PageRange::new(PageRange::LAST, PageRange::LAST).unwrap(), "(last)"),
        ] {
            assert_eq!(range.to_string(), want);
        }
    }

    #[test]
    fn test_parse() {
        for (text, want) in [
            ("3", PageRange::new(3, 3).unwrap()),
            ("1-4", PageRange::new(1, 4).unwrap()),
            (" 2- ", PageRange::new(2, PageRange::LAST).unwrap()),
            ("last", PageRange::new(PageRange::LAST, PageRange::LAST).unwrap()),
            ("5-last", PageRange::new(5, PageRange::LAST).unwrap()),
        ] {
            assert_eq!(text.parse::<PageRange>().unwrap(), want, "{text:?}");
        }

        for text in ["", "x", "0", "4-2", "1-2-3", "-3"] {
            let err = text.parse::<PageRange>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPageRange, "{text:?}");
        }
    }

    #[test]
    fn test_contains() {
        let range = PageRange::new(2, 4).unwrap();
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert!(PageRange::ALL.contains(1000));
    }
}
