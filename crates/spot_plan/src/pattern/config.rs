//! Flat field configuration as read from plan input files.
//!
//! [`FieldConfig`] mirrors the attribute bag of a plan input: a shape string plus
//! optional fields, only some of which apply to a given shape. Converting it with
//! [`FieldSpec::try_from`] checks that the fields required by the shape are present
//! and yields a validated [`FieldSpec`].
use std::path::PathBuf;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pattern::{
    ActivationWindow, DiscPattern, FieldSpec, ImagePattern, LatticeMode, RectanglePattern,
    Resample, RowOrder, ShapeTag,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldConfig {
    /// `rectangle`, `disc` or `image` (aliases accepted, see [`ShapeTag`]).
    pub shape: String,
    /// `square` or `hexagonal`; rectangles only.
    pub lattice: Option<String>,
    /// Spot spacing in cm.
    pub spacing: Option<f64>,
    /// Samples per axis when no positive spacing is given.
    pub spot_count: Option<usize>,
    pub xy_min: Option<[f64; 2]>,
    pub xy_max: Option<[f64; 2]>,
    pub center: Option<[f64; 2]>,
    pub diameter: Option<f64>,
    pub image_path: Option<PathBuf>,
    pub threshold_lower: Option<f64>,
    pub threshold_upper: Option<f64>,
    /// `nearest` or `bilinear`; images only.
    pub resample: Option<String>,
}

impl FieldConfig {
    pub fn new(shape: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            ..Default::default()
        }
    }
}

impl TryFrom<FieldConfig> for FieldSpec {
    type Error = Error;

    fn try_from(cfg: FieldConfig) -> Result<Self> {
        let shape: ShapeTag = cfg.shape.parse()?;
        let spacing = cfg.spacing.unwrap_or(0.0);

        let spec = match shape {
            ShapeTag::Rectangle => {
                let lattice = match cfg.lattice.as_deref() {
                    Some(s) => s.parse()?,
                    None => LatticeMode::default(),
                };
                FieldSpec::Rectangle(RectanglePattern {
                    xy_min: required(cfg.xy_min, "xy_min")?,
                    xy_max: required(cfg.xy_max, "xy_max")?,
                    spacing,
                    fallback_count: cfg.spot_count,
                    lattice,
                })
            }
            ShapeTag::Disc => FieldSpec::Disc(DiscPattern {
                center: required(cfg.center, "center")?,
                diameter: cfg
                    .diameter
                    .ok_or_else(|| missing(ShapeTag::Disc, "diameter"))?,
                spacing,
                fallback_count: cfg.spot_count,
            }),
            ShapeTag::Image => {
                let defaults = ActivationWindow::DEFAULT;
                let resample = match cfg.resample.as_deref().map(str::to_ascii_lowercase) {
                    None => Resample::default(),
                    Some(s) if s == "nearest" => Resample::Nearest,
                    Some(s) if s == "bilinear" => Resample::Bilinear,
                    Some(other) => {
                        return Err(Error::InvalidConfig(format!(
                            "unknown resample filter '{other}'"
                        )))
                    }
                };
                FieldSpec::Image(ImagePattern {
                    source: cfg
                        .image_path
                        .ok_or_else(|| missing(ShapeTag::Image, "image_path"))?
                        .into(),
                    xy_min: required(cfg.xy_min, "xy_min")?,
                    xy_max: required(cfg.xy_max, "xy_max")?,
                    spacing,
                    activation: ActivationWindow::new(
                        cfg.threshold_lower.unwrap_or(defaults.lower),
                        cfg.threshold_upper.unwrap_or(defaults.upper),
                    ),
                    resample,
                    row_order: RowOrder::TopDown,
                })
            }
        };

        spec.validate()?;
        Ok(spec)
    }
}

fn required(value: Option<[f64; 2]>, name: &str) -> Result<DVec2> {
    value
        .map(DVec2::from)
        .ok_or_else(|| Error::InvalidConfig(format!("missing field '{name}'")))
}

fn missing(shape: ShapeTag, name: &str) -> Error {
    Error::InvalidConfig(format!("{shape} field requires '{name}'"))
}
