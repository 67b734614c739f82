// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Describes the geometry of an image buffer.
//!
//! The layout is validated once, when it is constructed. Afterwards all derived quantities such
//! as the byte length of the raw format or the number of words of a row are known not to overflow
//! a `usize`.
use crate::Error;

/// The default limit on the number of pixels of a single image (or of a single plane of a stack).
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 32;

/// The number of bits that make up a single pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Depth {
    /// Binary images, eight pixels per byte.
    Bit,
    /// Grey-level images with one byte per pixel.
    Byte,
    /// Label and large range images, four bytes per pixel.
    Word,
}

impl Depth {
    /// The depth with the given number of bits per pixel.
    pub fn from_bits(bits: u32) -> Result<Self, Error> {
        match bits {
            1 => Ok(Depth::Bit),
            8 => Ok(Depth::Byte),
            32 => Ok(Depth::Word),
            _ => Err(Error::BadDepth),
        }
    }

    /// The number of bits per pixel.
    pub const fn bits(self) -> u32 {
        match self {
            Depth::Bit => 1,
            Depth::Byte => 8,
            Depth::Word => 32,
        }
    }

    /// The largest value representable by a pixel, also the value of a `FILLED` edge.
    pub const fn max_value(self) -> u32 {
        match self {
            Depth::Bit => 1,
            Depth::Byte => u8::MAX as u32,
            Depth::Word => u32::MAX,
        }
    }

    /// Clamp a wide intermediate result into the pixel range.
    pub(crate) const fn saturate(self, value: u64) -> u32 {
        let max = self.max_value() as u64;
        if value > max {
            max as u32
        } else {
            value as u32
        }
    }
}

/// The validated geometry of an image.
///
/// Width is always a multiple of 64 and height a multiple of 2, so that a row of any depth
/// occupies a whole number of 64-bit words and there are no partially used bytes at the end of a
/// binary row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageLayout {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) depth: Depth,
}

impl ImageLayout {
    /// Validate a layout with the default pixel limit.
    ///
    /// The requested width is rounded up to a multiple of 64 and the height up to a multiple of
    /// two. Zero extents, and extents above [`DEFAULT_MAX_PIXELS`] after rounding, are rejected.
    ///
    /// ```
    /// use image_morph::{Depth, ImageLayout};
    ///
    /// let layout = ImageLayout::new(100, 33, Depth::Byte)?;
    /// assert_eq!((layout.width(), layout.height()), (128, 34));
    /// assert_eq!(layout.row_bytes(), 128);
    /// # Ok::<(), image_morph::Error>(())
    /// ```
    pub fn new(width: u32, height: u32, depth: Depth) -> Result<Self, Error> {
        Self::with_limit(width, height, depth, DEFAULT_MAX_PIXELS)
    }

    /// Validate a layout against an explicit pixel limit.
    pub fn with_limit(
        width: u32,
        height: u32,
        depth: Depth,
        max_pixels: u64,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::BadSize);
        }

        let width = round_up(width, 64).ok_or(Error::BadSize)?;
        let height = round_up(height, 2).ok_or(Error::BadSize)?;

        let pixels = u64::from(width) * u64::from(height);
        if pixels > max_pixels {
            return Err(Error::BadSize);
        }

        // The byte length must be addressable on this platform.
        let bytes = pixels * u64::from(depth.bits()) / 8;
        usize::try_from(bytes).map_err(|_| Error::BadSize)?;

        Ok(ImageLayout {
            width,
            height,
            depth,
        })
    }

    /// The same geometry with another depth.
    pub fn with_depth(self, depth: Depth) -> Result<Self, Error> {
        Self::new(self.width, self.height, depth)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The number of pixels.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Layouts are never empty; provided for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The number of bytes of a row in the raw format.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.depth.bits() as usize / 8
    }

    /// The number of 64-bit words of a row.
    pub fn row_words(&self) -> usize {
        self.width as usize * self.depth.bits() as usize / 64
    }

    /// The number of 64-bit words of the whole buffer.
    pub fn word_len(&self) -> usize {
        self.row_words() * self.height as usize
    }

    /// The length of the raw format, `height · row_bytes`.
    pub fn byte_len(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Check that two images share width and height, regardless of depth.
    pub(crate) fn same_size(&self, other: &Self) -> Result<(), Error> {
        if (self.width, self.height) == (other.width, other.height) {
            Ok(())
        } else {
            Err(Error::BadSize)
        }
    }

    pub(crate) fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

fn round_up(value: u32, multiple: u32) -> Option<u32> {
    value.checked_add(multiple - 1).map(|v| v / multiple * multiple)
}
