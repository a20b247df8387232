#![forbid(unsafe_code)]

//! Single-channel coverage canvas that sprite rasterizers draw into.
//!
//! A [`Canvas`] is a zero-initialized `width x height` grid of 8-bit
//! coverage values, row-major, origin top-left. All writes are clipped to
//! the canvas bounds: fills silently drop the out-of-range part and stray
//! pixel writes are ignored, so no input geometry can index past the buffer.

use crate::error::SpriteError;

/// Opacity of one pixel (0 = empty, 255 = fully covered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coverage(pub u8);

impl Coverage {
    pub const NONE: Self = Self(0);
    pub const FULL: Self = Self(255);

    /// Coverage for a fraction in `[0, 1]`, rounded to the nearest level.
    ///
    /// Out-of-range inputs clamp to the nearest end; NaN maps to empty.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        Self((255.0 * fraction.clamp(0.0, 1.0)).round() as u8)
    }
}

/// Axis-aligned pixel rectangle `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap with `other`, or `None` when the two do not share a pixel.
    #[must_use]
    pub fn intersection_opt(&self, other: &PixelRect) -> Option<PixelRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(PixelRect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// Owned coverage buffer sized to one sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a zero-filled `width x height` canvas.
    ///
    /// Either dimension may be zero. Fails with [`SpriteError::CanvasAlloc`]
    /// when the buffer size overflows or cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self, SpriteError> {
        let alloc_err = || SpriteError::CanvasAlloc { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(alloc_err)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| alloc_err())?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the canvas has no pixels at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whole canvas as a rectangle anchored at the origin.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// Row-major coverage values; length is always `width * height`.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the canvas, keeping only its coverage buffer.
    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Coverage at `(x, y)`, or `None` outside the canvas.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.index_of(x, y).map(|idx| self.pixels[idx])
    }

    /// One row of coverage values. Empty for rows past the bottom edge.
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Fill `rect` (clipped to the canvas) with `coverage`.
    pub fn rect(&mut self, rect: PixelRect, coverage: Coverage) {
        let Some(clipped) = self.bounds().intersection_opt(&rect) else {
            return;
        };

        let w = self.width as usize;
        let span = clipped.width as usize;
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * w + clipped.x as usize;
            self.pixels[start..start + span].fill(coverage.0);
        }
    }

    /// Set a single pixel. Writes outside the canvas are ignored.
    #[inline]
    pub fn pixel(&mut self, x: u32, y: u32, coverage: Coverage) {
        if let Some(idx) = self.index_of(x, y) {
            self.pixels[idx] = coverage.0;
        }
    }

    /// Text dump for debugging and tests: `#` full, `+` partial, `.` empty.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.pixels.len() + self.height as usize);
        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }
            out.extend(self.row(y).iter().map(|&c| match c {
                0 => '.',
                255 => '#',
                _ => '+',
            }));
        }
        out
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}
