#![forbid(unsafe_code)]

//! Line-style rasterizers.
//!
//! Each style is a pure function of the target geometry that allocates a
//! fresh [`Canvas`], draws into it, and reports how the drawn content sits
//! relative to the nominal line position. None of them trust `thickness`:
//! every subtraction involving it saturates, so a stroke far thicker than
//! the cell degrades to an odd-looking but valid bitmap.

use std::f64::consts::PI;

use crate::canvas::{Canvas, Coverage, PixelRect};
use crate::error::SpriteError;
use crate::style::LineStyle;

/// Geometry of one sprite request, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteRequest {
    /// Cell width.
    pub width: u32,
    /// Cell height.
    pub height: u32,
    /// Distance from the cell top to the line's reference position.
    pub line_position: u32,
    /// Requested stroke thickness. May be zero or exceed the cell.
    pub thickness: u32,
}

impl SpriteRequest {
    #[must_use]
    pub const fn new(width: u32, height: u32, line_position: u32, thickness: u32) -> Self {
        Self {
            width,
            height,
            line_position,
            thickness,
        }
    }
}

/// A drawn sprite plus its vertical correction.
///
/// `y_offset` is positive when the sprite should move down; styles that need
/// more room than the nominal thickness (double, curly) report a negative
/// value to shift themselves up over the line position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rasterized {
    pub canvas: Canvas,
    pub y_offset: i32,
}

/// Rasterize `style` for the geometry in `request`.
pub fn rasterize(style: LineStyle, request: &SpriteRequest) -> Result<Rasterized, SpriteError> {
    let SpriteRequest {
        width,
        height,
        thickness,
        ..
    } = *request;

    crate::trace!(?style, width, height, thickness, "rasterize line sprite");
    match style {
        LineStyle::Underline | LineStyle::Overline | LineStyle::Strikethrough => {
            draw_single(width, thickness)
        }
        LineStyle::DoubleUnderline => draw_double(width, height, thickness),
        LineStyle::DottedUnderline => draw_dotted(width, thickness),
        LineStyle::DashedUnderline => draw_dashed(width, thickness),
        LineStyle::CurlyUnderline => draw_curly(width, thickness),
    }
}

/// Solid bar filling a `width x thickness` canvas.
pub fn draw_single(width: u32, thickness: u32) -> Result<Rasterized, SpriteError> {
    let mut canvas = Canvas::new(width, thickness)?;
    canvas.rect(canvas.bounds(), Coverage::FULL);
    Ok(Rasterized {
        canvas,
        y_offset: 0,
    })
}

/// Hollow frame spanning the whole cell with walls `thickness` wide.
///
/// The sprite is shifted up so its bottom bar lands on the line position.
pub fn draw_double(width: u32, height: u32, thickness: u32) -> Result<Rasterized, SpriteError> {
    let mut canvas = Canvas::new(width, height)?;
    let far_x = width.saturating_sub(thickness);
    let far_y = height.saturating_sub(thickness);

    canvas.rect(PixelRect::new(0, 0, thickness, height), Coverage::FULL);
    canvas.rect(PixelRect::new(far_x, 0, thickness, height), Coverage::FULL);
    canvas.rect(PixelRect::new(0, 0, width, thickness), Coverage::FULL);
    canvas.rect(PixelRect::new(0, far_y, width, thickness), Coverage::FULL);

    Ok(Rasterized {
        canvas,
        y_offset: shift_up(far_y),
    })
}

/// Two dots, each a quarter of the cell wide, centered in each half.
pub fn draw_dotted(width: u32, thickness: u32) -> Result<Rasterized, SpriteError> {
    let mut canvas = Canvas::new(width, thickness)?;
    let dot_width = width / 4;
    let first_x = dot_width / 2;
    let second_x = first_x + width / 2;

    canvas.rect(PixelRect::new(first_x, 0, dot_width, thickness), Coverage::FULL);
    canvas.rect(PixelRect::new(second_x, 0, dot_width, thickness), Coverage::FULL);

    Ok(Rasterized {
        canvas,
        y_offset: 0,
    })
}

/// One dash covering the middle two thirds of the cell.
pub fn draw_dashed(width: u32, thickness: u32) -> Result<Rasterized, SpriteError> {
    let mut canvas = Canvas::new(width, thickness)?;
    let dash_width = width - width / 3;

    canvas.rect(
        PixelRect::new(width / 6, 0, dash_width, thickness),
        Coverage::FULL,
    );

    Ok(Rasterized {
        canvas,
        y_offset: 0,
    })
}

/// Thinnest stroke the undercurl is drawn with.
///
/// Thinner strokes at 1px nominal thickness look too light next to straight
/// underlines and start to show artifacts.
pub const CURLY_MIN_THICKNESS: f64 = 0.414;

/// Geometry of the undercurl wave for one cell width and thickness.
///
/// One sine period spans the cell. The stroke is widened where the slope is
/// steep so the curve keeps a roughly even apparent thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurlyWave {
    stroke: f64,
    omega: f64,
    half_amplitude: f64,
    y_mid: f64,
    offset_factor: f64,
}

impl CurlyWave {
    #[must_use]
    pub fn new(width: u32, thickness: u32) -> Self {
        // This drawing method adds roughly 1px of apparent thickness.
        let stroke = CURLY_MIN_THICKNESS.max(f64::from(thickness.saturating_sub(1)));
        let omega = 2.0 * PI / f64::from(width);
        let half_amplitude = 1.0 / omega;
        Self {
            stroke,
            omega,
            half_amplitude,
            y_mid: half_amplitude + stroke * 0.5 + 1.0,
            offset_factor: (stroke * 0.5 * omega).min(1.0) * (half_amplitude * omega).min(1.0),
        }
    }

    /// Canvas rows needed to hold the whole wave.
    #[must_use]
    pub fn height(&self) -> u32 {
        ((self.half_amplitude + self.stroke + 1.0).ceil() * 2.0) as u32
    }

    /// Vertical correction that centres the wave on the line position.
    #[must_use]
    pub fn y_offset(&self) -> i32 {
        -(self.half_amplitude.round() as i32)
    }

    /// Upper and lower stroke edges of column `x`, in fractional rows.
    ///
    /// The wave is sampled at the column's horizontal midpoint.
    #[must_use]
    pub fn edges(&self, x: u32) -> (f64, f64) {
        let t = (f64::from(x) + 0.5) * self.omega;
        let slope_u = slope_widening(t + PI, self.offset_factor, self.omega);
        let slope_l = slope_widening(t, self.offset_factor, self.omega);

        let y = self.y_mid + self.half_amplitude * t.cos();
        (
            y - self.stroke * 0.5 - slope_u,
            y + self.stroke * 0.5 + slope_l,
        )
    }
}

/// Undercurl: one antialiased sine period per cell.
///
/// Each column writes fractional coverage on the two boundary rows of its
/// [`CurlyWave::edges`] with solid coverage in between. Rows past the bottom
/// of the canvas are clamped onto the last row.
pub fn draw_curly(width: u32, thickness: u32) -> Result<Rasterized, SpriteError> {
    let wave = CurlyWave::new(width, thickness);
    let height = wave.height();
    let max_row = height.saturating_sub(1);

    let mut canvas = Canvas::new(width, height)?;

    for x in 0..width {
        let (y_u, y_l) = wave.edges(x);

        let floor_u = y_u.floor();
        let ceil_l = y_l.ceil();
        let alpha_u = Coverage::from_fraction(1.0 - (y_u - floor_u).abs());
        let alpha_l = Coverage::from_fraction(1.0 - (y_l - ceil_l).abs());

        // `as` saturates: rows above the canvas land on 0.
        let y_upper = floor_u as u32;
        let y_lower = ceil_l as u32;

        canvas.pixel(x, y_upper.min(max_row), alpha_u);
        canvas.pixel(x, y_lower.min(max_row), alpha_l);
        for y_fill in y_upper.saturating_add(1)..y_lower {
            canvas.pixel(x, y_fill.min(max_row), Coverage::FULL);
        }
    }

    Ok(Rasterized {
        canvas,
        y_offset: wave.y_offset(),
    })
}

/// Extra half-thickness for the stroke edge at wave phase `phase`.
///
/// Approximates the offset curve of a sine wave; close enough visually but
/// not the exact perpendicular offset.
#[inline]
fn slope_widening(phase: f64, offset_factor: f64, omega: f64) -> f64 {
    let half_cos = (phase / 2.0).cos();
    (phase.sin() * phase.sin() * offset_factor) / ((1.0 + half_cos * half_cos * 2.0) * omega)
}

#[inline]
fn shift_up(rows: u32) -> i32 {
    -i32::try_from(rows).unwrap_or(i32::MAX)
}
