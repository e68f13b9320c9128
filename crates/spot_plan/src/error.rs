//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! unknown shape tags, malformed spot sets, invalid control-point counts, invalid spacing,
//! invalid configuration, and image decoding failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown field shape '{tag}'")]
    UnknownShape { tag: String },

    #[error(
        "malformed spot set: {coordinates} coordinates do not form x,y pairs for {weights} weights"
    )]
    MalformedSpotSet { coordinates: usize, weights: usize },

    #[error("invalid control point count {requested} for {layers} energy layer(s)")]
    InvalidLayerCount { requested: usize, layers: usize },

    #[error("invalid spot spacing {0} and no fallback spot count")]
    InvalidSpacing(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
