#![forbid(unsafe_code)]

//! Per-cell decoration metrics.
//!
//! A font's underline, strikethrough, and overline geometry, resolved to
//! whole pixels for one cell size. Loadable from JSON; missing fields fall
//! back to the defaults for a 10x20 cell.

use serde::{Deserialize, Serialize};

use crate::error::SpriteError;
use crate::raster::SpriteRequest;
use crate::style::LineStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LineMetrics {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Rows from the cell top to the top of the underline.
    pub underline_position: u32,
    pub underline_thickness: u32,
    /// Rows from the cell top to the top of the strikethrough bar.
    pub strikethrough_position: u32,
    pub strikethrough_thickness: u32,
    /// Rows from the cell top to the top of the overline.
    pub overline_position: u32,
    pub overline_thickness: u32,
}

impl Default for LineMetrics {
    fn default() -> Self {
        Self {
            cell_width: 10,
            cell_height: 20,
            underline_position: 17,
            underline_thickness: 1,
            strikethrough_position: 10,
            strikethrough_thickness: 1,
            overline_position: 0,
            overline_thickness: 1,
        }
    }
}

impl LineMetrics {
    /// Parse metrics from JSON and validate them.
    pub fn from_json_str(s: &str) -> Result<Self, SpriteError> {
        let metrics: Self =
            serde_json::from_str(s).map_err(|err| SpriteError::Config(err.to_string()))?;
        metrics.validate()?;
        Ok(metrics)
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Only on an internal `serde_json` formatting error.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reject geometry no sprite could be drawn for.
    ///
    /// Thicknesses are not checked: oversized strokes are clipped by the
    /// rasterizers.
    pub fn validate(&self) -> Result<(), SpriteError> {
        if self.cell_width == 0 {
            return Err(SpriteError::InvalidMetrics("cell_width must be non-zero"));
        }
        if self.cell_height == 0 {
            return Err(SpriteError::InvalidMetrics("cell_height must be non-zero"));
        }
        let positions = [
            ("underline_position exceeds cell_height", self.underline_position),
            ("strikethrough_position exceeds cell_height", self.strikethrough_position),
            ("overline_position exceeds cell_height", self.overline_position),
        ];
        for (reason, position) in positions {
            if position > self.cell_height {
                return Err(SpriteError::InvalidMetrics(reason));
            }
        }
        Ok(())
    }

    /// Sprite geometry for drawing `style` in this cell.
    #[must_use]
    pub fn request_for(&self, style: LineStyle) -> SpriteRequest {
        let (line_position, thickness) = match style {
            LineStyle::Overline => (self.overline_position, self.overline_thickness),
            LineStyle::Strikethrough => (self.strikethrough_position, self.strikethrough_thickness),
            LineStyle::Underline
            | LineStyle::DoubleUnderline
            | LineStyle::DottedUnderline
            | LineStyle::DashedUnderline
            | LineStyle::CurlyUnderline => (self.underline_position, self.underline_thickness),
        };
        SpriteRequest::new(self.cell_width, self.cell_height, line_position, thickness)
    }
}
