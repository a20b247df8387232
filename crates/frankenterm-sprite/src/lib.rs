#![forbid(unsafe_code)]

//! Procedural sprites for FrankenTerm line decorations.
//!
//! Underlines (single, double, dotted, dashed, curly), overlines, and
//! strikethroughs are rasterized into single-channel coverage bitmaps sized
//! to a cell, packed into a shared atlas, and composited like any other
//! glyph. Output is deterministic: the same request always yields the same
//! bytes.
//!
//! ```
//! use frankenterm_sprite::{LineStyle, SpriteAtlas, SpriteRequest, render_glyph};
//!
//! let mut atlas = SpriteAtlas::new(256, 256);
//! let request = SpriteRequest::new(36, 18, 9, 2);
//! let glyph = render_glyph(&mut atlas, LineStyle::Underline, &request).unwrap();
//! assert_eq!((glyph.width, glyph.height, glyph.offset_y), (36, 2, 9));
//! ```

pub mod atlas;
pub mod cache;
pub mod canvas;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod raster;
pub mod sprite;
pub mod style;

pub use atlas::{AtlasPacker, AtlasRegion, SpriteAtlas};
pub use cache::{SpriteCache, SpriteCacheStats, SpriteKey};
pub use canvas::{Canvas, Coverage, PixelRect};
pub use error::SpriteError;
pub use metrics::LineMetrics;
pub use raster::{CurlyWave, Rasterized, SpriteRequest, rasterize};
pub use sprite::{SpriteGlyph, render_glyph};
pub use style::LineStyle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, trace_span, warn};
