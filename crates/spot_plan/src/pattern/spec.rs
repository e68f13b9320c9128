//! Field specification: one variant per field shape.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pattern::{DiscPattern, ImagePattern, RectanglePattern, SpotPattern};
use crate::spots::SpotSet;

/// Shape tag of a field, as written in configuration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Rectangle,
    Disc,
    Image,
}

impl FromStr for ShapeTag {
    type Err = Error;

    /// Accepts `rectangle`/`square`, `disc`/`circle`/`circular` and `image`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "square" => Ok(ShapeTag::Rectangle),
            "disc" | "circle" | "circular" => Ok(ShapeTag::Disc),
            "image" => Ok(ShapeTag::Image),
            _ => Err(Error::UnknownShape { tag: s.to_owned() }),
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeTag::Rectangle => f.write_str("rectangle"),
            ShapeTag::Disc => f.write_str("disc"),
            ShapeTag::Image => f.write_str("image"),
        }
    }
}

/// Geometry of one treatment field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "lowercase"))]
#[derive(Clone, Debug, PartialEq)]
pub enum FieldSpec {
    Rectangle(RectanglePattern),
    Disc(DiscPattern),
    Image(ImagePattern),
}

impl FieldSpec {
    pub fn shape(&self) -> ShapeTag {
        match self {
            FieldSpec::Rectangle(_) => ShapeTag::Rectangle,
            FieldSpec::Disc(_) => ShapeTag::Disc,
            FieldSpec::Image(_) => ShapeTag::Image,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            FieldSpec::Rectangle(p) => p.validate(),
            FieldSpec::Disc(p) => p.validate(),
            FieldSpec::Image(p) => p.validate(),
        }
    }
}

impl SpotPattern for FieldSpec {
    fn generate(&self) -> Result<SpotSet> {
        match self {
            FieldSpec::Rectangle(p) => p.generate(),
            FieldSpec::Disc(p) => p.generate(),
            FieldSpec::Image(p) => p.generate(),
        }
    }
}

impl From<RectanglePattern> for FieldSpec {
    fn from(p: RectanglePattern) -> Self {
        FieldSpec::Rectangle(p)
    }
}

impl From<DiscPattern> for FieldSpec {
    fn from(p: DiscPattern) -> Self {
        FieldSpec::Disc(p)
    }
}

impl From<ImagePattern> for FieldSpec {
    fn from(p: ImagePattern) -> Self {
        FieldSpec::Image(p)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    #[test]
    fn shape_tags_parse_with_aliases() {
        assert_eq!("square".parse::<ShapeTag>().unwrap(), ShapeTag::Rectangle);
        assert_eq!("Circle".parse::<ShapeTag>().unwrap(), ShapeTag::Disc);
        assert_eq!("circular".parse::<ShapeTag>().unwrap(), ShapeTag::Disc);
        assert_eq!(" image ".parse::<ShapeTag>().unwrap(), ShapeTag::Image);
    }

    #[test]
    fn unknown_shape_tag_fails() {
        let err = "hexagon".parse::<ShapeTag>().unwrap_err();
        assert!(matches!(err, Error::UnknownShape { ref tag } if tag == "hexagon"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for tag in [ShapeTag::Rectangle, ShapeTag::Disc, ShapeTag::Image] {
            assert_eq!(tag.to_string().parse::<ShapeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn dispatches_to_variant_generator() {
        let spec: FieldSpec = DiscPattern::new(DVec2::ZERO, 2.0, 1.0).into();
        assert_eq!(spec.shape(), ShapeTag::Disc);
        assert_eq!(spec.generate().unwrap().len(), 5);

        let spec: FieldSpec =
            RectanglePattern::new(DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0), 1.0).into();
        assert_eq!(spec.shape(), ShapeTag::Rectangle);
        assert_eq!(spec.generate().unwrap().len(), 9);
    }

    #[test]
    fn validate_forwards_variant_errors() {
        let spec: FieldSpec = DiscPattern::new(DVec2::ZERO, -1.0, 1.0).into();
        assert!(spec.validate().is_err());
    }
}
