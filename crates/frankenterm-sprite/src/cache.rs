#![forbid(unsafe_code)]

//! Memoized sprite placement.
//!
//! Line sprites depend only on their style and geometry, so each distinct
//! request is rasterized and packed once and then served from the map.

use std::collections::HashMap;

use crate::atlas::AtlasPacker;
use crate::error::SpriteError;
use crate::metrics::LineMetrics;
use crate::raster::SpriteRequest;
use crate::sprite::{SpriteGlyph, render_glyph};
use crate::style::LineStyle;

/// Cache key: one sprite per style and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    pub style: LineStyle,
    pub request: SpriteRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Sprite cache in front of an atlas.
#[derive(Debug)]
pub struct SpriteCache<A> {
    atlas: A,
    map: HashMap<SpriteKey, SpriteGlyph>,
    stats: SpriteCacheStats,
}

impl<A: AtlasPacker> SpriteCache<A> {
    pub fn new(atlas: A) -> Self {
        Self {
            atlas,
            map: HashMap::new(),
            stats: SpriteCacheStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> SpriteCacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn atlas(&self) -> &A {
        &self.atlas
    }

    pub fn atlas_mut(&mut self) -> &mut A {
        &mut self.atlas
    }

    pub fn into_atlas(self) -> A {
        self.atlas
    }

    /// Placed sprite for `style` at `request`, rendering it on a miss.
    ///
    /// Failures are returned and not cached; a later call retries.
    pub fn get_or_render(
        &mut self,
        style: LineStyle,
        request: &SpriteRequest,
    ) -> Result<SpriteGlyph, SpriteError> {
        let key = SpriteKey {
            style,
            request: *request,
        };
        if let Some(glyph) = self.map.get(&key) {
            self.stats.hits += 1;
            return Ok(*glyph);
        }

        self.stats.misses += 1;
        let glyph = render_glyph(&mut self.atlas, style, request)?;
        self.map.insert(key, glyph);
        Ok(glyph)
    }

    /// Placed sprite for `style` in the cell described by `metrics`.
    pub fn get_or_render_for(
        &mut self,
        metrics: &LineMetrics,
        style: LineStyle,
    ) -> Result<SpriteGlyph, SpriteError> {
        self.get_or_render(style, &metrics.request_for(style))
    }

    /// Forget every cached placement and hand its atlas space back.
    pub fn clear(&mut self) {
        crate::debug!(entries = self.map.len(), "clearing sprite cache");
        for glyph in self.map.drain().map(|(_, glyph)| glyph) {
            self.atlas.free(glyph.region());
        }
    }
}
