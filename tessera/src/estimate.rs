// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture extent estimation.

#![allow(
    clippy::cast_possible_truncation,
    reason = "estimated heights are far below u32::MAX before the cast"
)]

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Picks the texture width for a build.
///
/// A caller-supplied width always wins; otherwise the width is keyed on the
/// requested glyph count. Width mostly trades aspect ratio rather than total
/// pixel count, but GPU texture-size limits make very wide atlases
/// undesirable, so the ladder tops out at 4096.
pub(crate) fn select_width(desired: Option<u32>, total_glyphs: usize) -> u32 {
    if let Some(width) = desired {
        return width;
    }
    if total_glyphs > 4000 {
        4096
    } else if total_glyphs > 2000 {
        2048
    } else if total_glyphs > 1000 {
        1024
    } else {
        512
    }
}

/// Upper-bound height estimate for `total_rects` rectangles no larger than
/// `max_glyph`, rounded up to the next power of two.
///
/// Models the texture as a grid of worst-case cells, one guard pixel larger
/// than the largest glyph on each axis. An exact fit would require
/// rasterizing every glyph before packing; the build stays single-pass per
/// glyph and over-reserves instead.
pub(crate) fn estimate_height(width: u32, total_rects: usize, max_glyph: (f32, f32)) -> u32 {
    let cell_w = max_glyph.0 + 1.0;
    let cell_h = max_glyph.1 + 1.0;
    let per_row = (width as f32 / cell_w).ceil().max(1.0);
    let rows = (total_rects as f32 / per_row).ceil();
    let height = (rows * cell_h) as u32;
    height.max(1).next_power_of_two()
}
