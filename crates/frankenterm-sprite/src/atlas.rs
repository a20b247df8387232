#![forbid(unsafe_code)]

//! Shared coverage atlas that finished sprites are packed into.
//!
//! The dispatcher only needs [`AtlasPacker`]: copy a coverage buffer in and
//! get its placement back. [`SpriteAtlas`] is the in-memory implementation:
//! a single R8 backing store, a shelf allocator with best-fit reuse of freed
//! slots, a padding border around every sprite, and a dirty-rect list for
//! GPU upload scheduling.

use crate::canvas::PixelRect;
use crate::error::SpriteError;

/// Placement of a sprite inside the atlas (padding excluded).
pub type AtlasRegion = PixelRect;

/// Destination for finished sprite bitmaps.
pub trait AtlasPacker {
    /// Reserve room for a `width x height` sprite and copy `coverage` into it.
    ///
    /// Either the whole sprite is written and its region returned, or the
    /// atlas is left untouched and an error is returned.
    fn allocate_and_copy(
        &mut self,
        coverage: &[u8],
        width: u32,
        height: u32,
    ) -> Result<AtlasRegion, SpriteError>;

    /// Give back a region returned by [`AtlasPacker::allocate_and_copy`].
    ///
    /// Packers that never reclaim space can ignore this.
    fn free(&mut self, _region: AtlasRegion) {}
}

/// Where the next sprite goes on the current shelf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Shelf {
    x: u32,
    y: u32,
    height: u32,
}

impl Shelf {
    /// Place a `w x h` slot inside a `bounds_w x bounds_h` atlas.
    ///
    /// Returns the slot together with the shelf state after it, or `None`
    /// if the slot does not fit even after starting a new shelf. `self` is
    /// never modified; the caller commits the returned state.
    fn place(self, w: u32, h: u32, bounds_w: u32, bounds_h: u32) -> Option<(PixelRect, Shelf)> {
        let start = if self.x.saturating_add(w) > bounds_w {
            Shelf {
                x: 0,
                y: self.y.saturating_add(self.height),
                height: 0,
            }
        } else {
            self
        };
        if start.y.saturating_add(h) > bounds_h {
            return None;
        }
        let next = Shelf {
            x: start.x + w,
            y: start.y,
            height: start.height.max(h),
        };
        Some((PixelRect::new(start.x, start.y, w, h), next))
    }
}

/// Single-channel atlas with a shelf allocator + free-slot reuse.
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    width: u32,
    height: u32,
    padding: u32,
    pixels: Vec<u8>,
    shelf: Shelf,
    /// Padded slots handed back through [`AtlasPacker::free`].
    free_slots: Vec<PixelRect>,
    dirty: Vec<PixelRect>,
}

impl SpriteAtlas {
    /// Empty atlas with a 1px padding border around each sprite.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            padding: 1,
            pixels: vec![0u8; len],
            shelf: Shelf::default(),
            free_slots: Vec::new(),
            dirty: Vec::new(),
        }
    }

    /// Replace the per-sprite padding border.
    #[must_use]
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Coverage at `(x, y)`, or `None` outside the atlas.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Take the list of rects written since the last call.
    pub fn take_dirty_rects(&mut self) -> Vec<PixelRect> {
        std::mem::take(&mut self.dirty)
    }

    /// Number of freed slots waiting to be reused.
    #[must_use]
    pub fn free_slot_count(&self) -> usize {
        self.free_slots.len()
    }

    /// Smallest freed slot that holds `w x h`, removed from the free list.
    fn take_free_slot(&mut self, w: u32, h: u32) -> Option<PixelRect> {
        let (idx, _) = self
            .free_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.width >= w && slot.height >= h)
            .min_by_key(|(_, slot)| u64::from(slot.width) * u64::from(slot.height))?;
        crate::trace!(idx, w, h, "reusing freed atlas slot");
        Some(self.free_slots.swap_remove(idx))
    }

    /// Reserve a padded `w x h` slot. Nothing changes when this returns `None`.
    fn reserve(&mut self, w: u32, h: u32) -> Option<PixelRect> {
        if let Some(slot) = self.take_free_slot(w, h) {
            return Some(slot);
        }
        let (slot, next) = self.shelf.place(w, h, self.width, self.height)?;
        self.shelf = next;
        Some(slot)
    }

    /// Copy a non-empty sprite into `dst` and mark it dirty.
    ///
    /// Only reached after [`SpriteAtlas::reserve`] succeeded, so `dst` lies
    /// inside the atlas and `src` holds exactly `dst.width * dst.height`
    /// bytes.
    fn blit(&mut self, dst: PixelRect, src: &[u8]) {
        let stride = self.width as usize;
        let row_len = dst.width as usize;
        let rows = src.chunks_exact(row_len).zip(dst.y as usize..);
        for (src_row, y) in rows {
            let start = y * stride + dst.x as usize;
            self.pixels[start..start + row_len].copy_from_slice(src_row);
        }
        self.dirty.push(dst);
    }
}

impl AtlasPacker for SpriteAtlas {
    fn allocate_and_copy(
        &mut self,
        coverage: &[u8],
        width: u32,
        height: u32,
    ) -> Result<AtlasRegion, SpriteError> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(coverage.len()) {
            return Err(SpriteError::InvalidRaster);
        }
        // Zero-area sprites occupy no atlas space and are never freed.
        if width == 0 || height == 0 {
            return Ok(AtlasRegion::new(0, 0, width, height));
        }

        let pad = self.padding;
        let slot_w = width.saturating_add(pad.saturating_mul(2));
        let slot_h = height.saturating_add(pad.saturating_mul(2));
        if slot_w > self.width || slot_h > self.height {
            return Err(SpriteError::GlyphTooLarge);
        }

        let Some(slot) = self.reserve(slot_w, slot_h) else {
            crate::warn!(width, height, "sprite atlas exhausted");
            return Err(SpriteError::AtlasFull);
        };

        let region = AtlasRegion::new(slot.x + pad, slot.y + pad, width, height);
        self.blit(region, coverage);
        Ok(region)
    }

    /// Return `region` to the free list. The pixels stay until the next
    /// sprite placed there overwrites them. Empty and already-freed regions
    /// are ignored.
    fn free(&mut self, region: AtlasRegion) {
        if region.is_empty() {
            return;
        }
        let pad = self.padding;
        let slot = PixelRect::new(
            region.x.saturating_sub(pad),
            region.y.saturating_sub(pad),
            region.width.saturating_add(pad.saturating_mul(2)),
            region.height.saturating_add(pad.saturating_mul(2)),
        );
        if self.free_slots.contains(&slot) {
            return;
        }
        self.free_slots.push(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> Vec<u8> {
        vec![0xFF; (w as usize) * (h as usize)]
    }

    #[test]
    fn copies_sprite_inside_padding() {
        let mut atlas = SpriteAtlas::new(16, 16);
        let region = atlas.allocate_and_copy(&solid(3, 2), 3, 2).expect("place");
        assert_eq!(region, AtlasRegion::new(1, 1, 3, 2));
        assert_eq!(atlas.get(0, 0), Some(0));
        assert_eq!(atlas.get(1, 1), Some(255));
        assert_eq!(atlas.get(3, 2), Some(255));
        assert_eq!(atlas.get(4, 1), Some(0));
        assert_eq!(atlas.take_dirty_rects(), vec![region]);
        assert!(atlas.take_dirty_rects().is_empty());
    }

    #[test]
    fn shelves_wrap_to_next_row() {
        let mut atlas = SpriteAtlas::new(10, 10).with_padding(0);
        let a = atlas.allocate_and_copy(&solid(6, 3), 6, 3).expect("a");
        let b = atlas.allocate_and_copy(&solid(6, 2), 6, 2).expect("b");
        assert_eq!((a.x, a.y), (0, 0));
        assert_eq!((b.x, b.y), (0, 3));
    }

    #[test]
    fn full_atlas_reports_error_without_writing() {
        let mut atlas = SpriteAtlas::new(8, 4).with_padding(0);
        atlas.allocate_and_copy(&solid(8, 4), 8, 4).expect("fill");
        let before = atlas.pixels().to_vec();
        atlas.take_dirty_rects();

        let err = atlas.allocate_and_copy(&[7u8; 4], 2, 2).unwrap_err();
        assert_eq!(err, SpriteError::AtlasFull);
        assert_eq!(atlas.pixels(), &before[..]);
        assert!(atlas.take_dirty_rects().is_empty());
    }

    #[test]
    fn failed_request_keeps_current_shelf() {
        let mut atlas = SpriteAtlas::new(10, 10).with_padding(0);
        atlas.allocate_and_copy(&solid(6, 3), 6, 3).expect("first");
        // Would need a second shelf at y = 3, which runs past the bottom.
        let err = atlas.allocate_and_copy(&solid(6, 8), 6, 8).unwrap_err();
        assert_eq!(err, SpriteError::AtlasFull);
        let next = atlas.allocate_and_copy(&solid(4, 3), 4, 3).expect("next");
        assert_eq!(next, AtlasRegion::new(6, 0, 4, 3));
    }

    #[test]
    fn oversized_sprite_is_rejected() {
        let mut atlas = SpriteAtlas::new(8, 8);
        // 7 + 2 * padding exceeds the atlas width.
        let err = atlas.allocate_and_copy(&solid(7, 1), 7, 1).unwrap_err();
        assert_eq!(err, SpriteError::GlyphTooLarge);
    }

    #[test]
    fn mismatched_buffer_is_invalid() {
        let mut atlas = SpriteAtlas::new(8, 8);
        let err = atlas.allocate_and_copy(&[0u8; 5], 2, 2).unwrap_err();
        assert_eq!(err, SpriteError::InvalidRaster);
    }

    #[test]
    fn zero_area_sprite_takes_no_space() {
        let mut atlas = SpriteAtlas::new(8, 8).with_padding(0);
        let empty = atlas.allocate_and_copy(&[], 0, 5).expect("empty");
        assert_eq!(empty, AtlasRegion::new(0, 0, 0, 5));
        let next = atlas.allocate_and_copy(&solid(2, 2), 2, 2).expect("next");
        assert_eq!((next.x, next.y), (0, 0));
    }

    #[test]
    fn freed_slots_can_be_reused() {
        let mut atlas = SpriteAtlas::new(12, 6);
        let first = atlas.allocate_and_copy(&solid(4, 4), 4, 4).expect("first");
        let _second = atlas.allocate_and_copy(&solid(4, 4), 4, 4).expect("second");
        assert_eq!(
            atlas.allocate_and_copy(&solid(4, 4), 4, 4).unwrap_err(),
            SpriteError::AtlasFull
        );

        atlas.free(first);
        let third = atlas.allocate_and_copy(&[9u8; 6], 3, 2).expect("reuse");
        assert_eq!((third.x, third.y), (first.x, first.y));
        assert_eq!(atlas.get(third.x, third.y), Some(9));
    }

    #[test]
    fn double_free_is_ignored() {
        let mut atlas = SpriteAtlas::new(12, 6);
        let region = atlas.allocate_and_copy(&solid(4, 4), 4, 4).expect("place");
        atlas.free(region);
        atlas.free(region);
        assert_eq!(atlas.free_slot_count(), 1);
        atlas.free(AtlasRegion::new(0, 0, 0, 3));
        assert_eq!(atlas.free_slot_count(), 1);
    }
}
