#![forbid(unsafe_code)]

//! Error type shared by the canvas, rasterizers, atlas, and dispatcher.

use std::fmt;

/// Failure of a single sprite request.
///
/// Every variant is fatal for the request that produced it; nothing is
/// retried and no partial sprite is left in the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteError {
    /// Coverage buffer for a `width x height` canvas could not be obtained.
    CanvasAlloc { width: u32, height: u32 },
    /// Sprite (with padding) does not fit in the configured atlas dimensions.
    GlyphTooLarge,
    /// No free slot or shelf space is left in the atlas.
    AtlasFull,
    /// Coverage buffer length does not match the declared dimensions.
    InvalidRaster,
    /// Line metrics violate a geometric constraint.
    InvalidMetrics(&'static str),
    /// Line metrics could not be parsed.
    Config(String),
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasAlloc { width, height } => {
                write!(f, "failed to allocate {width}x{height} sprite canvas")
            }
            Self::GlyphTooLarge => write!(f, "sprite too large for atlas"),
            Self::AtlasFull => write!(f, "atlas allocation failed (full/fragmented)"),
            Self::InvalidRaster => write!(f, "invalid raster (bitmap size mismatch)"),
            Self::InvalidMetrics(reason) => write!(f, "invalid line metrics: {reason}"),
            Self::Config(msg) => write!(f, "line metrics parse error: {msg}"),
        }
    }
}

impl std::error::Error for SpriteError {}
