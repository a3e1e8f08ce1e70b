// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build failure taxonomy.

use core::fmt;

/// Reasons an atlas build can fail.
///
/// Every variant is fatal: the build is abandoned as a whole and no partial
/// texture or glyph table is handed out. Per-glyph conditions that are
/// expected in normal use, like a code point the font does not cover or a
/// merge-mode duplicate, are absorbed inside the build loop and never
/// surface here. There is no retry logic; a failed build is retried
/// wholesale by the caller after fixing the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// The builder contained no font requests.
    Empty,
    /// A font source failed to load: malformed data, or a face index that
    /// does not exist in the collection.
    InvalidFont {
        /// Position of the offending request, in the order requests were
        /// added to the builder.
        font: usize,
    },
    /// A rasterized glyph exceeded the fixed bitmap capacity of
    /// [`MAX_BITMAP_DIM`](crate::MAX_BITMAP_DIM) pixels per side.
    OversizedGlyph {
        /// The code point whose glyph overflowed.
        codepoint: u32,
        /// Row pitch of the offending bitmap, in bytes.
        width: u32,
        /// Height of the offending bitmap, in rows.
        height: u32,
    },
    /// A reserved rectangle could not be placed within the texture.
    ReservedRectTooBig {
        /// Position of the rectangle, in reservation order.
        index: usize,
    },
    /// The packer ran out of room for a glyph that was already rasterized.
    ///
    /// Dropping the glyph instead would leave the glyph table inconsistent
    /// with the texture, so this aborts the build.
    AtlasFull {
        /// The code point that could not be placed.
        codepoint: u32,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no fonts were requested"),
            Self::InvalidFont { font } => {
                write!(f, "font request {font}: malformed data or missing face index")
            }
            Self::OversizedGlyph {
                codepoint,
                width,
                height,
            } => write!(
                f,
                "glyph for U+{codepoint:04X} is {width}x{height}, beyond the raster buffer capacity"
            ),
            Self::ReservedRectTooBig { index } => {
                write!(f, "reserved rectangle {index} does not fit in the texture")
            }
            Self::AtlasFull { codepoint } => {
                write!(f, "no room left in the texture for U+{codepoint:04X}")
            }
        }
    }
}

impl core::error::Error for BuildError {}
