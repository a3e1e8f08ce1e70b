// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph rasterization: the adapter contract and the swash-backed engine.

#![allow(
    clippy::cast_possible_truncation,
    reason = "glyph bitmap extents are capped at MAX_BITMAP_DIM and placement\
offsets fit comfortably in f32"
)]

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Angle, Format, Transform};
use swash::{FontRef, StringId};

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Maximum width or height of a single rasterized glyph bitmap, in pixels.
///
/// The scratch buffer in [`GlyphBitmap`] is allocated once at this square
/// capacity; a glyph that would exceed it is an invariant violation that
/// aborts the build.
pub const MAX_BITMAP_DIM: u32 = 256;

/// Horizontal shear applied by [`RasterOptions::oblique`], in degrees.
const OBLIQUE_SKEW_DEGREES: f32 = 14.0;

/// Fraction of the em size used as the synthetic embolden strength.
const EMBOLDEN_EM_FRACTION: f32 = 1.0 / 24.0;

/// Rounds a pixel metric to the nearest integer, half away from zero.
///
/// Truncating instead under-reports ascent and descent by up to a pixel,
/// which shows up as clipped glyph tops. The same convention is applied to
/// every font-wide metric and to glyph advances.
pub(crate) fn round_px(v: f32) -> f32 {
    v.round()
}

/// Grid-fitting mode requested for glyph outlines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hinting {
    /// No grid fitting. Generally blurrier output.
    None,
    /// The engine's standard grid fitting.
    #[default]
    Normal,
    /// Vertical-only fitting: fuzzier glyphs that keep their designed
    /// horizontal spacing.
    Light,
    /// Strong fitting for monochrome output; coverage is quantized to fully
    /// on or fully off.
    Mono,
}

/// Outline processing requested for a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterOptions {
    /// Grid-fitting mode.
    pub hinting: Hinting,
    /// Synthetic bold: thicken the outline before rasterization.
    pub embolden: bool,
    /// Synthetic italic: shear the outline horizontally.
    pub oblique: bool,
}

/// Font-wide metrics at a specific pixel height.
///
/// All pixel values are rounded half away from zero, never truncated;
/// truncation would under-report extents by up to a pixel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// The pixel height the metrics were computed for. This is the target
    /// ascent minus descent, not the em size.
    pub pixel_height: u32,
    /// Extent above the baseline, in pixels. Positive.
    pub ascent: f32,
    /// Extent below the baseline, in pixels. Typically negative.
    pub descent: f32,
    /// Baseline-to-baseline distance, in pixels. Usually larger than
    /// `ascent - descent`.
    pub line_spacing: f32,
    /// Spacing between one row's descent and the next row's ascent, in
    /// pixels.
    pub line_gap: f32,
    /// Maximum horizontal advance over all glyphs, in pixels.
    pub max_advance: f32,
    /// Number of glyphs in the face.
    pub glyph_count: u32,
    /// Family name, when the face carries one.
    pub family_name: Option<String>,
    /// Style (subfamily) name, when the face carries one.
    pub style_name: Option<String>,
}

/// Placement metrics for one rasterized glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Distance from the pen position to the left edge of the bitmap.
    pub offset_x: f32,
    /// Distance from the baseline to the top edge of the bitmap. Negative
    /// for glyphs that extend above the baseline, which is most of them.
    pub offset_y: f32,
    /// Distance to the next glyph origin, rounded to an integer pixel.
    pub advance: f32,
}

/// Fatal rasterization failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// The glyph bitmap would exceed [`MAX_BITMAP_DIM`] on some side.
    Oversized {
        /// Row pitch of the rejected bitmap, in bytes.
        width: u32,
        /// Height of the rejected bitmap, in rows.
        height: u32,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oversized { width, height } => write!(
                f,
                "glyph bitmap {width}x{height} exceeds the {MAX_BITMAP_DIM}x{MAX_BITMAP_DIM} capacity"
            ),
        }
    }
}

impl core::error::Error for RasterError {}

/// Reusable scratch buffer holding one glyph's 8-bit coverage bitmap.
///
/// The backing store has a fixed capacity of `MAX_BITMAP_DIM²` bytes,
/// allocated once and reused for every glyph in a build. Rows start `pitch`
/// bytes apart and `pitch` may exceed `width`; bytes past `width` in a row
/// are padding, not coverage.
#[derive(Clone)]
pub struct GlyphBitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
    pitch: u32,
}

impl GlyphBitmap {
    /// Creates an empty bitmap with full backing capacity.
    pub fn new() -> Self {
        Self {
            data: vec![0; (MAX_BITMAP_DIM * MAX_BITMAP_DIM) as usize],
            width: 0,
            height: 0,
            pitch: 0,
        }
    }

    /// Coverage width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between the starts of consecutive rows, in bytes.
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// One row of coverage, `width` bytes long.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y * self.pitch) as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Replaces the contents with `height` rows of `pitch`-spaced coverage
    /// read from `src`.
    ///
    /// Fails if `pitch` or `height` exceed the fixed capacity; the caller
    /// must treat that as a build-aborting invariant violation, not as a
    /// skippable glyph.
    pub fn copy_from(
        &mut self,
        src: &[u8],
        width: u32,
        height: u32,
        pitch: u32,
    ) -> Result<(), RasterError> {
        debug_assert!(pitch >= width, "row pitch below coverage width");
        if pitch > MAX_BITMAP_DIM || height > MAX_BITMAP_DIM {
            return Err(RasterError::Oversized {
                width: pitch,
                height,
            });
        }
        let len = (pitch * height) as usize;
        self.data[..len].copy_from_slice(&src[..len]);
        self.width = width;
        self.height = height;
        self.pitch = pitch;
        Ok(())
    }

    /// Resets to a zero-sized bitmap, used for glyphs with empty outlines.
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.pitch = 0;
    }

    /// Quantizes coverage to fully on or fully off, for [`Hinting::Mono`].
    fn quantize(&mut self) {
        let len = (self.pitch * self.height) as usize;
        for coverage in &mut self.data[..len] {
            *coverage = if *coverage >= 128 { 255 } else { 0 };
        }
    }
}

impl Default for GlyphBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GlyphBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphBitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pitch", &self.pitch)
            .finish_non_exhaustive()
    }
}

/// Contract between the atlas assembler and a glyph rasterization engine.
///
/// One instance wraps one loaded face at one pixel height. Instances live
/// only for the duration of a single build and release their engine
/// resources on drop, on every exit path including mid-build failures.
pub trait RasterFont {
    /// Font-wide metrics at the current pixel height.
    fn metrics(&self) -> &FontMetrics;

    /// Recomputes metrics for a new pixel height without reloading the face.
    fn set_pixel_height(&mut self, pixel_height: u32);

    /// Rasterizes one code point into `bitmap`.
    ///
    /// Returns `Ok(None)` when the face's character map has no glyph for the
    /// code point; the caller skips it silently, since partial coverage of a
    /// requested range is an expected outcome. `Err` is reserved for
    /// invariant violations that abort the whole build. Aside from writing
    /// into `bitmap`, rasterizing one glyph is independent and
    /// side-effect-free.
    fn rasterize(
        &mut self,
        codepoint: u32,
        options: RasterOptions,
        bitmap: &mut GlyphBitmap,
    ) -> Result<Option<GlyphMetrics>, RasterError>;
}

/// [`RasterFont`] backed by the swash scaling and rendering engine.
///
/// Borrows the font bytes for its whole lifetime. The scale context is
/// per-face and not shared: the engine is single-threaded, so concurrent
/// rasterization requires one context per thread.
pub struct SwashFace<'a> {
    font: FontRef<'a>,
    context: ScaleContext,
    em_size: f32,
    metrics: FontMetrics,
}

impl<'a> SwashFace<'a> {
    /// Loads face `index` from `data` and computes metrics at `pixel_height`.
    ///
    /// `pixel_height` is the target ascent minus descent in pixels, not the em
    /// size; the em size handed to the scaler is derived from it so that
    /// glyphs of the requested height fill the line exactly.
    ///
    /// Returns `None` for malformed font data or a nonexistent face index.
    pub fn new(data: &'a [u8], index: u32, pixel_height: u32) -> Option<Self> {
        let font = FontRef::from_index(data, index as usize)?;
        let mut face = Self {
            font,
            context: ScaleContext::new(),
            em_size: 0.0,
            metrics: FontMetrics {
                family_name: find_name(&font, StringId::Family),
                style_name: find_name(&font, StringId::SubFamily),
                ..FontMetrics::default()
            },
        };
        face.set_pixel_height(pixel_height);
        Some(face)
    }

    /// The em size, in pixels, that realizes the requested pixel height.
    pub fn em_size(&self) -> f32 {
        self.em_size
    }
}

impl RasterFont for SwashFace<'_> {
    fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn set_pixel_height(&mut self, pixel_height: u32) {
        let units = self.font.metrics(&[]);
        // The engine reports descent as a positive distance below the
        // baseline.
        let descent = units.descent.abs();
        let extent = units.ascent + descent;
        self.em_size = if extent > 0.0 {
            pixel_height as f32 * f32::from(units.units_per_em) / extent
        } else {
            pixel_height as f32
        };
        let scale = self.em_size / f32::from(units.units_per_em).max(1.0);

        let metrics = &mut self.metrics;
        metrics.pixel_height = pixel_height;
        metrics.ascent = round_px(units.ascent * scale);
        metrics.descent = -round_px(descent * scale);
        metrics.line_spacing = round_px((units.ascent + descent + units.leading) * scale);
        metrics.line_gap = round_px(units.leading * scale);
        metrics.max_advance = round_px(units.max_width * scale);
        metrics.glyph_count = u32::from(units.glyph_count);
    }

    fn rasterize(
        &mut self,
        codepoint: u32,
        options: RasterOptions,
        bitmap: &mut GlyphBitmap,
    ) -> Result<Option<GlyphMetrics>, RasterError> {
        let glyph_id = self.font.charmap().map(codepoint);
        if glyph_id == 0 {
            return Ok(None);
        }
        let advance = round_px(
            self.font
                .glyph_metrics(&[])
                .scale(self.em_size)
                .advance_width(glyph_id),
        );

        let mut scaler = self
            .context
            .builder(self.font)
            .size(self.em_size)
            .hint(options.hinting != Hinting::None)
            .build();
        let mut render = Render::new(&[Source::Outline]);
        render.format(Format::Alpha);
        if options.oblique {
            render.transform(Some(Transform::skew(
                Angle::from_degrees(OBLIQUE_SKEW_DEGREES),
                Angle::from_degrees(0.0),
            )));
        }
        if options.embolden {
            render.embolden(self.em_size * EMBOLDEN_EM_FRACTION);
        }

        match render.render(&mut scaler, glyph_id) {
            Some(image) => {
                let width = image.placement.width;
                let height = image.placement.height;
                bitmap.copy_from(&image.data, width, height, width)?;
                if options.hinting == Hinting::Mono {
                    bitmap.quantize();
                }
                Ok(Some(GlyphMetrics {
                    offset_x: image.placement.left as f32,
                    offset_y: -(image.placement.top as f32),
                    advance,
                }))
            }
            // Mapped glyphs with no coverage (spaces and other blanks)
            // still carry an advance and get a table entry.
            None => {
                bitmap.clear();
                Ok(Some(GlyphMetrics {
                    advance,
                    ..GlyphMetrics::default()
                }))
            }
        }
    }
}

impl fmt::Debug for SwashFace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwashFace")
            .field("em_size", &self.em_size)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

fn find_name(font: &FontRef<'_>, id: StringId) -> Option<String> {
    font.localized_strings()
        .find(|s| s.id() == id)
        .map(|s| s.chars().collect())
}
