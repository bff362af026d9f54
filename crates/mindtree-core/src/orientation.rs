//! Layout orientation and the axis mapping it implies.
//!
//! A tree grows along one axis (the *growth* axis) and spreads siblings along
//! the other (the *cross* axis). [`Orientation`] is the only place that knows
//! which screen axis is which, so layout code can be written once in
//! cross/growth terms.
//!
//! ```text
//!  TopToBottom            LeftToRight
//!
//!   cross ──►              growth ──►
//!  growth                 cross
//!    │  ┌─┐                 │  ┌─┐  ┌─┐
//!    ▼  └┬┘                 ▼  └─┘─►└─┘
//!      ┌─┴─┐                          ┌─┐
//!      ▼   ▼                     ────►└─┘
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Point, Size};

/// Direction in which a mind map tree grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Roots at the top, children below their parent.
    TopToBottom,
    /// Roots at the left, children to the right of their parent.
    #[default]
    LeftToRight,
}

impl Orientation {
    /// Returns the other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Self::TopToBottom => Self::LeftToRight,
            Self::LeftToRight => Self::TopToBottom,
        }
    }

    /// Extent of `size` along the growth axis.
    pub fn growth_extent(self, size: Size) -> f32 {
        match self {
            Self::TopToBottom => size.height(),
            Self::LeftToRight => size.width(),
        }
    }

    /// Extent of `size` along the cross axis.
    pub fn cross_extent(self, size: Size) -> f32 {
        match self {
            Self::TopToBottom => size.width(),
            Self::LeftToRight => size.height(),
        }
    }

    /// Coordinate of `point` along the growth axis.
    pub fn growth_of(self, point: Point) -> f32 {
        match self {
            Self::TopToBottom => point.y(),
            Self::LeftToRight => point.x(),
        }
    }

    /// Coordinate of `point` along the cross axis.
    pub fn cross_of(self, point: Point) -> f32 {
        match self {
            Self::TopToBottom => point.x(),
            Self::LeftToRight => point.y(),
        }
    }

    /// Builds a screen point from cross and growth coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindtree_core::{geometry::Point, orientation::Orientation};
    ///
    /// assert_eq!(Orientation::TopToBottom.compose(3.0, 8.0), Point::new(3.0, 8.0));
    /// assert_eq!(Orientation::LeftToRight.compose(3.0, 8.0), Point::new(8.0, 3.0));
    /// ```
    pub fn compose(self, cross: f32, growth: f32) -> Point {
        match self {
            Self::TopToBottom => Point::new(cross, growth),
            Self::LeftToRight => Point::new(growth, cross),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopToBottom => write!(f, "top-to-bottom"),
            Self::LeftToRight => write!(f, "left-to-right"),
        }
    }
}

/// Returned when an orientation string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown orientation `{0}`, expected `top-to-bottom` or `left-to-right`")]
pub struct ParseOrientationError(String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    /// Accepts the kebab-case names and the short `tb`/`lr` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top-to-bottom" | "tb" => Ok(Self::TopToBottom),
            "left-to-right" | "lr" => Ok(Self::LeftToRight),
            _ => Err(ParseOrientationError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled() {
        assert_eq!(Orientation::TopToBottom.toggled(), Orientation::LeftToRight);
        assert_eq!(Orientation::LeftToRight.toggled(), Orientation::TopToBottom);
    }

    #[test]
    fn test_extents() {
        let size = Size::new(600.0, 150.0);

        assert_eq!(Orientation::TopToBottom.growth_extent(size), 150.0);
        assert_eq!(Orientation::TopToBottom.cross_extent(size), 600.0);
        assert_eq!(Orientation::LeftToRight.growth_extent(size), 600.0);
        assert_eq!(Orientation::LeftToRight.cross_extent(size), 150.0);
    }

    #[test]
    fn test_compose_roundtrip() {
        for orientation in [Orientation::TopToBottom, Orientation::LeftToRight] {
            let point = orientation.compose(12.0, -4.0);
            assert_eq!(orientation.cross_of(point), 12.0);
            assert_eq!(orientation.growth_of(point), -4.0);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("tb".parse(), Ok(Orientation::TopToBottom));
        assert_eq!("Left-To-Right".parse(), Ok(Orientation::LeftToRight));
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for orientation in [Orientation::TopToBottom, Orientation::LeftToRight] {
            assert_eq!(orientation.to_string().parse(), Ok(orientation));
        }
    }
}
