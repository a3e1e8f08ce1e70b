// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font atlas construction.
//!
//! Tessera turns font sources plus requested code-point ranges into a single
//! shared 8-bit coverage texture and, per font, a table of glyph metrics
//! (bounding box, texture coordinates, advance) ready for a text-layout
//! renderer. A build is a one-shot batch: every glyph is rasterized through
//! the swash engine, placed by a skyline packer and blitted into the shared
//! texture in one deterministic pass, and the outputs are immutable until
//! the caller rebuilds from scratch.
//!
//! ```no_run
//! use tessera::{AtlasBuilder, FontRequest, GlyphRange};
//!
//! # fn main() -> Result<(), tessera::BuildError> {
//! let bytes = std::fs::read("fonts/body.ttf").expect("font file");
//! let mut builder = AtlasBuilder::new();
//! let body = builder.add_font(FontRequest {
//!     ranges: vec![GlyphRange::ASCII],
//!     ..FontRequest::new(&bytes, 16)
//! });
//! let atlas = builder.build()?;
//! let glyph = atlas.font(body).glyph('g' as u32);
//! # let _ = glyph;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the
//!   standard library (likely using your target's libc).
//! - `libm`: Use floating point implementations from libm.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("tessera requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;

mod atlas;
mod builder;
mod error;
mod estimate;
mod pack;
mod raster;

pub use atlas::{
    Atlas, AtlasTexture, FALLBACK_CODEPOINT, FontId, Glyph, GlyphTable, ReservedId, ReservedRect,
};
pub use builder::{AtlasBuilder, FontRequest, GlyphRange};
pub use error::BuildError;
pub use pack::SkylinePacker;
pub use raster::{
    FontMetrics, GlyphBitmap, GlyphMetrics, Hinting, MAX_BITMAP_DIM, RasterError, RasterFont,
    RasterOptions, SwashFace,
};
