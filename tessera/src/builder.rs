// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The atlas build pipeline.

#![allow(
    clippy::cast_possible_truncation,
    reason = "baseline and advance snapping intentionally truncate after\
adding half a pixel"
)]

use alloc::vec::Vec;
use log::debug;

use crate::atlas::{Atlas, AtlasTexture, FontId, Glyph, GlyphTable, ReservedId, ReservedRect};
use crate::error::BuildError;
use crate::estimate;
use crate::pack::SkylinePacker;
use crate::raster::{GlyphBitmap, RasterError, RasterFont, RasterOptions, SwashFace};

/// Inclusive range of code points to build glyphs for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRange {
    first: u32,
    last: u32,
}

impl GlyphRange {
    /// Basic Latin plus Latin-1 Supplement; the default when a request names
    /// no ranges.
    pub const LATIN: Self = Self {
        first: 0x0020,
        last: 0x00FF,
    };

    /// Printable ASCII.
    pub const ASCII: Self = Self {
        first: 0x0020,
        last: 0x007E,
    };

    /// Creates the inclusive range `first..=last`.
    ///
    /// # Panics
    ///
    /// Panics if `first > last`.
    pub const fn new(first: u32, last: u32) -> Self {
        assert!(first <= last, "glyph range bounds out of order");
        Self { first, last }
    }

    /// First code point.
    pub const fn first(self) -> u32 {
        self.first
    }

    /// Last code point, inclusive.
    pub const fn last(self) -> u32 {
        self.last
    }

    /// Number of code points covered.
    pub const fn count(self) -> usize {
        (self.last - self.first + 1) as usize
    }
}

const DEFAULT_RANGES: &[GlyphRange] = &[GlyphRange::LATIN];

/// One font source plus the options controlling how its glyphs are built.
#[derive(Clone, Debug)]
pub struct FontRequest<'a> {
    /// Raw font program bytes. Borrowed; they must outlive the build call.
    pub data: &'a [u8],
    /// Face index for collection files, `0` for single-face fonts.
    pub index: u32,
    /// Target pixel height (ascent minus descent).
    pub pixel_height: u32,
    /// Code point ranges to build. Empty means [`GlyphRange::LATIN`].
    pub ranges: Vec<GlyphRange>,
    /// Hinting and style-synthesis options.
    pub options: RasterOptions,
    /// Extra horizontal spacing baked into each advance, in pixels.
    pub extra_spacing: f32,
    /// Round each final advance to an integer pixel.
    pub pixel_snap: bool,
    /// In merge mode, vertically center this font's glyphs against the
    /// destination font by half the ascent difference.
    pub center_merged: bool,
}

impl<'a> FontRequest<'a> {
    /// A request with default options for `data` at `pixel_height`.
    pub fn new(data: &'a [u8], pixel_height: u32) -> Self {
        Self {
            data,
            index: 0,
            pixel_height,
            ranges: Vec::new(),
            options: RasterOptions::default(),
            extra_spacing: 0.0,
            pixel_snap: false,
            center_merged: false,
        }
    }
}

#[derive(Clone, Debug)]
struct Request<'a> {
    cfg: FontRequest<'a>,
    target: FontId,
    merge: bool,
}

/// Configures and runs a one-shot atlas build.
///
/// A build is atomic: it either produces a complete [`Atlas`] covering every
/// requested font or fails without output. Rebuilding (for new sizes,
/// ranges or fonts) means configuring a fresh builder and building again;
/// there is no incremental path.
///
/// Fonts are processed in the order they were added, ranges in request
/// order, code points ascending, which makes layouts reproducible across
/// runs for identical inputs.
#[derive(Clone, Debug, Default)]
pub struct AtlasBuilder<'a> {
    width: Option<u32>,
    requests: Vec<Request<'a>>,
    font_count: usize,
    reserved: Vec<(u32, u32)>,
}

impl<'a> AtlasBuilder<'a> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the texture width instead of the glyph-count heuristic.
    pub fn desired_width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Registers a rectangle for non-glyph content.
    ///
    /// Reserved rectangles are packed before any glyph, so they land in the
    /// low-coordinate corner of the texture, where fixed-point UV formats
    /// keep the most precision. Fill them through [`Atlas::texture_mut`]
    /// once the build returns.
    pub fn reserve(&mut self, width: u32, height: u32) -> ReservedId {
        let id = ReservedId(self.reserved.len());
        self.reserved.push((width, height));
        id
    }

    /// Adds a font to build, returning the handle of its glyph table.
    pub fn add_font(&mut self, request: FontRequest<'a>) -> FontId {
        let id = FontId(self.font_count);
        self.font_count += 1;
        self.requests.push(Request {
            cfg: request,
            target: id,
            merge: false,
        });
        id
    }

    /// Adds glyphs from another font source into an existing table.
    ///
    /// Code points the table already covers are skipped, so merge requests
    /// can use broad ranges to add icon or fallback coverage without
    /// disturbing existing entries.
    pub fn merge_font(&mut self, target: FontId, request: FontRequest<'a>) {
        debug_assert!(
            target.0 < self.font_count,
            "merge target was not created by this builder"
        );
        self.requests.push(Request {
            cfg: request,
            target,
            merge: true,
        });
    }

    /// Runs the build.
    ///
    /// Fails fast: the first font that cannot be loaded, the first glyph
    /// over the raster buffer capacity, or packer exhaustion abandons the
    /// whole build with no partial output.
    pub fn build(&self) -> Result<Atlas, BuildError> {
        if self.requests.is_empty() {
            return Err(BuildError::Empty);
        }
        let mut faces = Vec::with_capacity(self.requests.len());
        for (i, request) in self.requests.iter().enumerate() {
            let face =
                SwashFace::new(request.cfg.data, request.cfg.index, request.cfg.pixel_height)
                    .ok_or(BuildError::InvalidFont { font: i })?;
            faces.push(face);
        }
        assemble(
            &mut faces,
            &self.requests,
            self.font_count,
            &self.reserved,
            self.width,
        )
    }
}

/// The ranges a request builds, substituting the default set when the
/// request names none.
fn ranges<'r>(cfg: &'r FontRequest<'_>) -> &'r [GlyphRange] {
    if cfg.ranges.is_empty() {
        DEFAULT_RANGES
    } else {
        &cfg.ranges
    }
}

fn fatal(error: RasterError, codepoint: u32) -> BuildError {
    match error {
        RasterError::Oversized { width, height } => BuildError::OversizedGlyph {
            codepoint,
            width,
            height,
        },
    }
}

/// One pass over every font, range and code point, producing the finished
/// atlas. Separated from [`AtlasBuilder::build`] so the pipeline can be
/// driven by any [`RasterFont`] implementation.
fn assemble(
    faces: &mut [impl RasterFont],
    requests: &[Request<'_>],
    font_count: usize,
    reserved: &[(u32, u32)],
    desired_width: Option<u32>,
) -> Result<Atlas, BuildError> {
    debug_assert_eq!(faces.len(), requests.len(), "one face per request");

    // Fold every face's worst-case footprint and count the requested code
    // points; both feed the extent estimate.
    let mut max_glyph = (1.0_f32, 1.0_f32);
    let mut total_glyphs = 0_usize;
    for (face, request) in faces.iter().zip(requests) {
        let metrics = face.metrics();
        max_glyph.0 = max_glyph.0.max(metrics.max_advance);
        max_glyph.1 = max_glyph.1.max(metrics.ascent - metrics.descent);
        for range in ranges(&request.cfg) {
            total_glyphs += range.count();
        }
    }

    let width = estimate::select_width(desired_width, total_glyphs);
    let total_rects = total_glyphs + reserved.len();
    let mut height = estimate::estimate_height(width, total_rects, max_glyph);
    let mut packer = SkylinePacker::new(width, height, total_rects + 1);

    // Reserved content packs first so it keeps small UV magnitudes.
    let mut reserved_rects = Vec::with_capacity(reserved.len());
    for (index, &(w, h)) in reserved.iter().enumerate() {
        let (x, y) = packer
            .pack(w, h)
            .ok_or(BuildError::ReservedRectTooBig { index })?;
        height = height.max(y + h);
        reserved_rects.push(ReservedRect {
            x,
            y,
            width: w,
            height: h,
        });
    }

    let mut texture = AtlasTexture::new(width, height);
    let mut tables: Vec<GlyphTable> = core::iter::repeat_with(GlyphTable::new)
        .take(font_count)
        .collect();
    let mut bitmap = GlyphBitmap::new();

    for (face, request) in faces.iter_mut().zip(requests) {
        let (ascent, descent) = {
            let metrics = face.metrics();
            (metrics.ascent, metrics.descent)
        };
        let table = &mut tables[request.target.0];
        if !request.merge {
            table.reset(request.cfg.pixel_height, ascent, descent);
        }
        let center_offset = if request.merge && request.cfg.center_merged {
            (ascent - table.ascent()) * 0.5
        } else {
            0.0
        };
        // Glyphs from every source font are shifted onto the destination
        // font's baseline.
        let baseline = (table.ascent() + center_offset + 0.5) as i32 as f32;

        for range in ranges(&request.cfg) {
            for codepoint in range.first()..=range.last() {
                if request.merge && table.contains(codepoint) {
                    continue;
                }
                let Some(metrics) = face
                    .rasterize(codepoint, request.cfg.options, &mut bitmap)
                    .map_err(|e| fatal(e, codepoint))?
                else {
                    // Not in this face's character map; expected, skip.
                    continue;
                };
                let (w, h) = (bitmap.width(), bitmap.height());
                // One extra pixel on each axis keeps bilinear sampling from
                // bleeding between neighbors.
                let (x, y) = packer
                    .pack(w + 1, h + 1)
                    .ok_or(BuildError::AtlasFull { codepoint })?;
                texture.blit(x, y, &bitmap);

                let mut advance = metrics.advance + request.cfg.extra_spacing;
                if request.cfg.pixel_snap {
                    advance = (advance + 0.5) as i32 as f32;
                }
                table.push(Glyph {
                    codepoint,
                    x0: metrics.offset_x,
                    y0: metrics.offset_y + baseline,
                    x1: metrics.offset_x + w as f32,
                    y1: metrics.offset_y + h as f32 + baseline,
                    u0: x as f32 / width as f32,
                    v0: y as f32 / height as f32,
                    u1: (x + w) as f32 / width as f32,
                    v1: (y + h) as f32 / height as f32,
                    advance,
                });
            }
        }
        table.finish();
        debug!(
            "font {}: {} glyphs at {}px{}",
            request.target.0,
            table.len(),
            request.cfg.pixel_height,
            if request.merge { " (merged)" } else { "" },
        );
    }

    debug!("atlas texture {width}x{height} holding {total_rects} rectangles");
    Ok(Atlas {
        texture,
        fonts: tables,
        reserved: reserved_rects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::FALLBACK_CODEPOINT;
    use crate::raster::{FontMetrics, GlyphMetrics};

    /// Pitch padding byte; must never show up in a texture.
    const PAD: u8 = 0xAA;

    /// Deterministic stand-in engine: covers printable ASCII only and
    /// renders every glyph as a solid box with a padded row pitch.
    struct FakeFont {
        metrics: FontMetrics,
        glyph_w: u32,
        glyph_h: u32,
        advance: f32,
    }

    impl FakeFont {
        fn new(pixel_height: u32) -> Self {
            let ascent = (pixel_height * 3 / 4) as f32;
            Self {
                metrics: FontMetrics {
                    pixel_height,
                    ascent,
                    descent: ascent - pixel_height as f32,
                    line_spacing: pixel_height as f32,
                    line_gap: 0.0,
                    max_advance: 8.0,
                    glyph_count: 95,
                    family_name: None,
                    style_name: None,
                },
                glyph_w: 6,
                glyph_h: 8,
                advance: 7.0,
            }
        }

        fn with_glyph_size(mut self, w: u32, h: u32) -> Self {
            self.glyph_w = w;
            self.glyph_h = h;
            self
        }
    }

    impl RasterFont for FakeFont {
        fn metrics(&self) -> &FontMetrics {
            &self.metrics
        }

        fn set_pixel_height(&mut self, pixel_height: u32) {
            self.metrics.pixel_height = pixel_height;
        }

        fn rasterize(
            &mut self,
            codepoint: u32,
            _options: RasterOptions,
            bitmap: &mut GlyphBitmap,
        ) -> Result<Option<GlyphMetrics>, crate::raster::RasterError> {
            if !(0x20..=0x7E).contains(&codepoint) {
                return Ok(None);
            }
            let (w, h) = (self.glyph_w, self.glyph_h);
            let pitch = w + 2;
            let mut src = vec![PAD; (pitch * h) as usize];
            for row in 0..h {
                for col in 0..w {
                    src[(row * pitch + col) as usize] = 0xFF;
                }
            }
            bitmap.copy_from(&src, w, h, pitch)?;
            Ok(Some(GlyphMetrics {
                offset_x: 0.0,
                offset_y: -(h as f32),
                advance: self.advance,
            }))
        }
    }

    fn ascii_request() -> FontRequest<'static> {
        FontRequest {
            ranges: vec![GlyphRange::ASCII],
            ..FontRequest::new(&[], 16)
        }
    }

    fn run(
        faces: Vec<FakeFont>,
        requests: Vec<Request<'static>>,
        font_count: usize,
    ) -> Result<Atlas, BuildError> {
        let mut faces = faces;
        assemble(&mut faces, &requests, font_count, &[], None)
    }

    fn single(request: FontRequest<'static>) -> Request<'static> {
        Request {
            cfg: request,
            target: FontId(0),
            merge: false,
        }
    }

    fn merge(request: FontRequest<'static>) -> Request<'static> {
        Request {
            cfg: request,
            target: FontId(0),
            merge: true,
        }
    }

    /// Reconstructs a glyph's packed rectangle (including the guard pixel)
    /// from its UVs.
    fn packed_rect(glyph: &Glyph, texture: &AtlasTexture) -> (u32, u32, u32, u32) {
        let w = texture.width() as f32;
        let h = texture.height() as f32;
        (
            (glyph.u0 * w).round() as u32,
            (glyph.v0 * h).round() as u32,
            ((glyph.u1 - glyph.u0) * w).round() as u32 + 1,
            ((glyph.v1 - glyph.v0) * h).round() as u32 + 1,
        )
    }

    #[test]
    fn ascii_build_covers_the_printable_range() {
        let atlas = run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        let table = atlas.font(FontId(0));

        assert_eq!(table.len(), 95);
        assert_eq!(table.pixel_height(), 16);
        assert_eq!(table.ascent(), 12.0);
        assert_eq!(table.descent(), -4.0);
        for glyph in table.glyphs() {
            assert!(glyph.advance > 0.0, "U+{:04X} has no advance", glyph.codepoint);
            for uv in [glyph.u0, glyph.v0, glyph.u1, glyph.v1] {
                assert!((0.0..=1.0).contains(&uv), "UV out of range: {uv}");
            }
        }

        let height = atlas.texture().height();
        assert!(height.is_power_of_two());
        assert!(height >= estimate::estimate_height(512, 95, (8.0, 16.0)));
    }

    #[test]
    fn uv_round_trip_recovers_the_packed_rectangle() {
        let atlas = run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        let texture = atlas.texture();
        for glyph in atlas.font(FontId(0)).glyphs() {
            let x = glyph.u0 * texture.width() as f32;
            let y = glyph.v0 * texture.height() as f32;
            assert!((x - x.round()).abs() < 1e-3, "u0 does not recover a pixel column");
            assert!((y - y.round()).abs() < 1e-3, "v0 does not recover a pixel row");
            let w = (glyph.u1 - glyph.u0) * texture.width() as f32;
            assert!((w - 6.0).abs() < 1e-3, "UV width does not match the bitmap");
        }
    }

    #[test]
    fn packed_rectangles_are_disjoint_and_in_bounds() {
        let atlas = run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        let texture = atlas.texture();
        let rects: Vec<_> = atlas
            .font(FontId(0))
            .glyphs()
            .iter()
            .map(|g| packed_rect(g, texture))
            .collect();
        for &(x, y, w, h) in &rects {
            assert!(x + w <= texture.width());
            assert!(y + h <= texture.height());
        }
        for (i, &a) in rects.iter().enumerate() {
            for &b in &rects[i + 1..] {
                let disjoint =
                    a.0 + a.2 <= b.0 || b.0 + b.2 <= a.0 || a.1 + a.3 <= b.1 || b.1 + b.3 <= a.1;
                assert!(disjoint, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn glyph_boxes_sit_on_the_shifted_baseline() {
        let atlas = run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        let glyph = atlas.font(FontId(0)).glyph('A' as u32).unwrap();
        // offset_y is -8 and the baseline shift is trunc(12 + 0.5) = 12.
        assert_eq!(glyph.y0, 4.0);
        assert_eq!(glyph.y1, 12.0);
        assert_eq!(glyph.x0, 0.0);
        assert_eq!(glyph.x1, 6.0);
    }

    #[test]
    fn pitch_padding_never_reaches_the_texture() {
        let atlas = run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        assert!(!atlas.texture().pixels().contains(&PAD));
    }

    #[test]
    fn unmapped_codepoints_are_skipped_in_every_range() {
        // Two overlapping ranges outside the fake font's coverage: no
        // entries, no duplicates, no error.
        let request = FontRequest {
            ranges: vec![GlyphRange::new(0x3000, 0x3010), GlyphRange::new(0x3000, 0x3010)],
            ..FontRequest::new(&[], 16)
        };
        let atlas = run(vec![FakeFont::new(16)], vec![single(request)], 1).unwrap();
        assert!(atlas.font(FontId(0)).is_empty());
    }

    #[test]
    fn empty_bitmaps_still_get_entries() {
        let atlas = run(
            vec![FakeFont::new(16).with_glyph_size(0, 0)],
            vec![single(ascii_request())],
            1,
        )
        .unwrap();
        let table = atlas.font(FontId(0));
        assert_eq!(table.len(), 95);
        for glyph in table.glyphs() {
            assert_eq!(glyph.u0, glyph.u1);
            assert!(glyph.advance > 0.0);
        }
    }

    #[test]
    fn merge_adds_only_new_codepoints() {
        let upper = FontRequest {
            ranges: vec![GlyphRange::new(0x41, 0x5A)],
            ..FontRequest::new(&[], 16)
        };
        let lower = FontRequest {
            ranges: vec![GlyphRange::new(0x61, 0x7A)],
            ..FontRequest::new(&[], 16)
        };
        let atlas = run(
            vec![FakeFont::new(16), FakeFont::new(16), FakeFont::new(16)],
            vec![single(upper.clone()), merge(lower), merge(upper)],
            1,
        )
        .unwrap();
        // 26 uppercase from the base font, 26 lowercase from the first
        // merge; the second merge fully overlaps and adds nothing.
        let table = atlas.font(FontId(0));
        assert_eq!(table.len(), 52);
        let mut codepoints: Vec<_> = table.glyphs().iter().map(|g| g.codepoint).collect();
        codepoints.sort_unstable();
        codepoints.dedup();
        assert_eq!(codepoints.len(), 52, "merge produced duplicate entries");
    }

    #[test]
    fn centered_merge_shifts_by_half_the_ascent_difference() {
        let upper = FontRequest {
            ranges: vec![GlyphRange::new(0x41, 0x5A)],
            ..FontRequest::new(&[], 16)
        };
        let lower = FontRequest {
            ranges: vec![GlyphRange::new(0x61, 0x7A)],
            center_merged: true,
            ..FontRequest::new(&[], 8)
        };
        let atlas = run(
            vec![FakeFont::new(16), FakeFont::new(8)],
            vec![single(upper), merge(lower)],
            1,
        )
        .unwrap();
        let table = atlas.font(FontId(0));
        // Merged face ascent is 6, destination ascent 12: the merged
        // baseline shift is trunc(12 + (6 - 12)/2 + 0.5) = 9, so a merged
        // glyph of height 8 spans rows 1..9.
        let merged = table.glyph('a' as u32).unwrap();
        assert_eq!(merged.y0, 1.0);
        assert_eq!(merged.y1, 9.0);
        // The destination font's own glyphs keep the uncentered baseline.
        let base = table.glyph('A' as u32).unwrap();
        assert_eq!(base.y0, 4.0);
    }

    #[test]
    fn extra_spacing_and_pixel_snap_shape_the_advance() {
        let spaced = FontRequest {
            ranges: vec![GlyphRange::ASCII],
            extra_spacing: 1.25,
            ..FontRequest::new(&[], 16)
        };
        let atlas = run(vec![FakeFont::new(16)], vec![single(spaced.clone())], 1).unwrap();
        assert_eq!(atlas.font(FontId(0)).glyph('A' as u32).unwrap().advance, 8.25);

        let snapped = FontRequest {
            pixel_snap: true,
            ..spaced
        };
        let atlas = run(vec![FakeFont::new(16)], vec![single(snapped)], 1).unwrap();
        assert_eq!(atlas.font(FontId(0)).glyph('A' as u32).unwrap().advance, 8.0);
    }

    #[test]
    fn reserved_rectangles_pack_first_in_the_low_corner() {
        let mut faces = vec![FakeFont::new(16)];
        let requests = vec![single(ascii_request())];
        let atlas = assemble(&mut faces, &requests, 1, &[(3, 3), (2, 2)], None).unwrap();

        let first = atlas.reserved(ReservedId(0));
        let second = atlas.reserved(ReservedId(1));
        assert_eq!((first.x, first.y), (0, 0));
        assert_eq!((second.x, second.y), (3, 0));

        // No glyph may overlap the reserved area.
        let texture = atlas.texture();
        for glyph in atlas.font(FontId(0)).glyphs() {
            let (x, y, w, h) = packed_rect(glyph, texture);
            for r in [first, second] {
                let disjoint = x >= r.x + r.width || r.x >= x + w || y >= r.y + r.height || r.y >= y + h;
                assert!(disjoint, "glyph U+{:04X} overlaps reserved content", glyph.codepoint);
            }
        }
    }

    #[test]
    fn reserved_content_is_fillable_after_the_build() {
        let mut faces = vec![FakeFont::new(16)];
        let requests = vec![single(ascii_request())];
        let mut atlas = assemble(&mut faces, &requests, 1, &[(1, 1)], None).unwrap();
        let rect = atlas.reserved(ReservedId(0));
        atlas.texture_mut().fill(rect.x, rect.y, rect.width, rect.height, 255);
        assert_eq!(atlas.texture().coverage(rect.x, rect.y), 255);
    }

    #[test]
    fn oversized_reserved_rectangle_fails_the_build() {
        let mut faces = vec![FakeFont::new(16)];
        let requests = vec![single(ascii_request())];
        let result = assemble(&mut faces, &requests, 1, &[(100, 10)], Some(64));
        assert_eq!(result.unwrap_err(), BuildError::ReservedRectTooBig { index: 0 });
    }

    #[test]
    fn oversized_glyph_aborts_the_build() {
        let result = run(
            vec![FakeFont::new(16).with_glyph_size(300, 4)],
            vec![single(ascii_request())],
            1,
        );
        assert!(matches!(
            result,
            Err(BuildError::OversizedGlyph {
                codepoint: 0x20,
                ..
            })
        ));
    }

    #[test]
    fn identical_builds_produce_identical_atlases() {
        let build = || run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        let (a, b) = (build(), build());
        assert_eq!(a.font(FontId(0)).glyphs(), b.font(FontId(0)).glyphs());
        assert_eq!(a.texture().pixels(), b.texture().pixels());
    }

    #[test]
    fn fallback_glyph_is_designated_when_covered() {
        let atlas = run(vec![FakeFont::new(16)], vec![single(ascii_request())], 1).unwrap();
        let table = atlas.font(FontId(0));
        assert_eq!(table.fallback().unwrap().codepoint, FALLBACK_CODEPOINT);
        assert_eq!(
            table.glyph_or_fallback(0x3042).unwrap().codepoint,
            FALLBACK_CODEPOINT
        );

        let no_question_mark = FontRequest {
            ranges: vec![GlyphRange::new(0x41, 0x5A)],
            ..FontRequest::new(&[], 16)
        };
        let atlas = run(vec![FakeFont::new(16)], vec![single(no_question_mark)], 1).unwrap();
        assert!(atlas.font(FontId(0)).fallback().is_none());
    }

    #[test]
    fn empty_builder_is_an_error() {
        assert_eq!(AtlasBuilder::new().build().unwrap_err(), BuildError::Empty);
    }

    #[test]
    fn invalid_font_data_fails_the_whole_build() {
        let mut builder = AtlasBuilder::new();
        builder.add_font(FontRequest::new(b"definitely not a font", 16));
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::InvalidFont { font: 0 }
        );
    }
}
