#![forbid(unsafe_code)]

//! Sprite dispatcher: rasterize a line style, pack it, and compute metrics.

use crate::atlas::{AtlasPacker, AtlasRegion};
use crate::error::SpriteError;
use crate::raster::{SpriteRequest, rasterize};
use crate::style::LineStyle;

/// Placed sprite, in the same conventions as font glyphs.
///
/// `offset_y` is the distance from the sprite's top edge to the cell bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteGlyph {
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub atlas_x: u32,
    pub atlas_y: u32,
    pub advance_x: u32,
}

impl SpriteGlyph {
    /// Atlas region the sprite was copied into.
    #[must_use]
    pub fn region(&self) -> AtlasRegion {
        AtlasRegion::new(self.atlas_x, self.atlas_y, self.width, self.height)
    }
}

/// Rasterize `style` for `request` and pack the result into `atlas`.
///
/// Any canvas or atlas failure is returned as-is; the canvas is dropped on
/// every path and the atlas only changes when the whole sprite was copied.
pub fn render_glyph<A>(
    atlas: &mut A,
    style: LineStyle,
    request: &SpriteRequest,
) -> Result<SpriteGlyph, SpriteError>
where
    A: AtlasPacker + ?Sized,
{
    let span = crate::trace_span!("render_glyph", ?style);
    let _guard = span.enter();

    let raster = rasterize(style, request)?;
    let canvas = &raster.canvas;
    let region = atlas
        .allocate_and_copy(canvas.pixels(), canvas.width(), canvas.height())
        .map_err(|err| {
            crate::debug!(?style, %err, "failed to pack line sprite");
            err
        })?;

    Ok(SpriteGlyph {
        width: region.width,
        height: region.height,
        offset_x: 0,
        offset_y: baseline_offset(request, raster.y_offset),
        atlas_x: region.x,
        atlas_y: region.y,
        advance_x: request.width,
    })
}

/// `(height - line_position) - y_offset`, saturating at every step.
fn baseline_offset(request: &SpriteRequest, y_offset: i32) -> i32 {
    let above_bottom = request.height.saturating_sub(request.line_position);
    i32::try_from(above_bottom)
        .unwrap_or(i32::MAX)
        .saturating_sub(y_offset)
}
