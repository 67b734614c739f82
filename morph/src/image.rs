// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! The owned pixel buffer.
//!
//! Pixels are stored in rows of 64-bit words. This keeps every row, of every depth, aligned for
//! word-wise access and lets binary operators process 64 pixels at a time. Byte and word rows are
//! viewed through `bytemuck` casts of the same storage.
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use alloc::vec::Vec;

use crate::layout::{Depth, ImageLayout};
use crate::Error;

static LIVE_IMAGES: AtomicUsize = AtomicUsize::new(0);

/// The number of `Image` values currently alive in the process.
///
/// This is a diagnostic counter only. It is incremented on construction and clone, and
/// decremented on drop.
pub fn live_images() -> usize {
    LIVE_IMAGES.load(Ordering::Relaxed)
}

/// A rectangular image of binary, byte or word pixels.
///
/// ```
/// use image_morph::{Depth, Image};
///
/// let mut image = Image::new(16, 16, Depth::Byte)?;
/// // The width is rounded up to a multiple of 64.
/// assert_eq!(image.width(), 64);
///
/// image.set_pixel(5, 5, 200)?;
/// assert_eq!(image.get_pixel(5, 5)?, 200);
/// # Ok::<(), image_morph::Error>(())
/// ```
pub struct Image {
    layout: ImageLayout,
    words: Vec<u64>,
}

impl Image {
    /// Allocate a zeroed image, rounding the dimensions as described by [`ImageLayout::new`].
    pub fn new(width: u32, height: u32, depth: Depth) -> Result<Self, Error> {
        Self::with_layout(ImageLayout::new(width, height, depth)?)
    }

    /// Allocate a zeroed image of a validated layout.
    pub fn with_layout(layout: ImageLayout) -> Result<Self, Error> {
        let words = zeroed_words(layout.word_len())?;
        LIVE_IMAGES.fetch_add(1, Ordering::Relaxed);
        Ok(Image { layout, words })
    }

    /// Allocate a zeroed image with the size of this one and the given depth.
    pub fn like(&self, depth: Depth) -> Result<Self, Error> {
        Self::with_layout(self.layout.with_depth(depth)?)
    }

    /// Create an image from its raw format, see [`Image::load_raw`].
    pub fn from_raw(width: u32, height: u32, depth: Depth, data: &[u8]) -> Result<Self, Error> {
        let mut image = Self::new(width, height, depth)?;
        image.load_raw(data)?;
        Ok(image)
    }

    pub fn layout(&self) -> ImageLayout {
        self.layout
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn depth(&self) -> Depth {
        self.layout.depth
    }

    /// Set every pixel to zero.
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    /// Set every pixel to `value`.
    ///
    /// Fails with [`Error::BadValue`] if the value does not fit the depth.
    pub fn fill(&mut self, value: u32) -> Result<(), Error> {
        let depth = self.depth();
        if value > depth.max_value() {
            return Err(Error::BadValue);
        }

        let pattern = match depth {
            Depth::Bit => 0u64.wrapping_sub(u64::from(value)),
            Depth::Byte => u64::from(value) * 0x0101_0101_0101_0101,
            Depth::Word => u64::from(value) | (u64::from(value) << 32),
        };

        self.words.fill(pattern);
        Ok(())
    }

    /// Copy all pixels of an image with identical layout.
    pub fn copy_from(&mut self, src: &Image) -> Result<(), Error> {
        self.layout.same_size(&src.layout)?;
        if self.depth() != src.depth() {
            return Err(Error::BadDepth);
        }

        self.words.copy_from_slice(&src.words);
        Ok(())
    }

    /// Replace the pixels with data in the raw format.
    ///
    /// The raw format consists of `height` rows of `row_bytes` each; byte pixels in order, word
    /// pixels in little endian. There is no raw format for binary images, they fail with
    /// [`Error::BadDepth`].
    pub fn load_raw(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.depth() == Depth::Bit {
            return Err(Error::BadDepth);
        }

        if data.len() != self.layout.byte_len() {
            return Err(Error::LoadDataSize);
        }

        let row_bytes = self.layout.row_bytes();
        for (y, raw) in data.chunks_exact(row_bytes).enumerate() {
            match self.depth() {
                Depth::Byte => self.byte_row_mut(y as u32).copy_from_slice(raw),
                Depth::Word => {
                    let row = self.word_row_mut(y as u32);
                    for (px, le) in row.iter_mut().zip(raw.chunks_exact(4)) {
                        *px = u32::from_le_bytes([le[0], le[1], le[2], le[3]]);
                    }
                }
                Depth::Bit => unreachable!("rejected above"),
            }
        }

        Ok(())
    }

    /// Write the pixels in the raw format.
    ///
    /// Binary rows are written LSB-first, eight pixels per byte.
    pub fn extract_raw(&self) -> Result<Vec<u8>, Error> {
        let mut raw = Vec::new();
        raw.try_reserve_exact(self.layout.byte_len())?;

        for y in 0..self.height() {
            match self.depth() {
                Depth::Bit => {
                    for word in self.row(y) {
                        raw.extend_from_slice(&word.to_le_bytes());
                    }
                }
                Depth::Byte => raw.extend_from_slice(self.byte_row(y)),
                Depth::Word => {
                    for px in self.word_row(y) {
                        raw.extend_from_slice(&px.to_le_bytes());
                    }
                }
            }
        }

        Ok(raw)
    }

    /// Read a single pixel.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<u32, Error> {
        if !self.layout.in_bounds(i64::from(x), i64::from(y)) {
            return Err(Error::BadParameter);
        }

        Ok(self.pixel(x, y))
    }

    /// Write a single pixel.
    ///
    /// Fails with [`Error::BadValue`] if the value does not fit the depth.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u32) -> Result<(), Error> {
        if !self.layout.in_bounds(i64::from(x), i64::from(y)) {
            return Err(Error::BadParameter);
        }

        if value > self.depth().max_value() {
            return Err(Error::BadValue);
        }

        self.put_pixel(x, y, value);
        Ok(())
    }

    /// The underlying storage, `row_words` words per row.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn as_words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> u32 {
        match self.depth() {
            Depth::Bit => {
                let word = self.row(y)[x as usize / 64];
                ((word >> (x % 64)) & 1) as u32
            }
            Depth::Byte => u32::from(self.byte_row(y)[x as usize]),
            Depth::Word => self.word_row(y)[x as usize],
        }
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, value: u32) {
        match self.depth() {
            Depth::Bit => {
                let word = &mut self.row_mut(y)[x as usize / 64];
                let bit = 1u64 << (x % 64);
                if value != 0 {
                    *word |= bit;
                } else {
                    *word &= !bit;
                }
            }
            Depth::Byte => self.byte_row_mut(y)[x as usize] = value as u8,
            Depth::Word => self.word_row_mut(y)[x as usize] = value,
        }
    }

    pub(crate) fn row(&self, y: u32) -> &[u64] {
        let stride = self.layout.row_words();
        let start = y as usize * stride;
        &self.words[start..start + stride]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u64] {
        let stride = self.layout.row_words();
        let start = y as usize * stride;
        &mut self.words[start..start + stride]
    }

    pub(crate) fn byte_row(&self, y: u32) -> &[u8] {
        bytemuck::cast_slice(self.row(y))
    }

    pub(crate) fn byte_row_mut(&mut self, y: u32) -> &mut [u8] {
        bytemuck::cast_slice_mut(self.row_mut(y))
    }

    pub(crate) fn word_row(&self, y: u32) -> &[u32] {
        bytemuck::cast_slice(self.row(y))
    }

    pub(crate) fn word_row_mut(&mut self, y: u32) -> &mut [u32] {
        bytemuck::cast_slice_mut(self.row_mut(y))
    }

    /// Unpack row `y` into one `u32` per pixel.
    pub(crate) fn read_row(&self, y: u32, line: &mut [u32]) {
        debug_assert_eq!(line.len(), self.width() as usize);
        match self.depth() {
            Depth::Bit => {
                for (chunk, &word) in line.chunks_mut(64).zip(self.row(y)) {
                    for (bit, px) in chunk.iter_mut().enumerate() {
                        *px = ((word >> bit) & 1) as u32;
                    }
                }
            }
            Depth::Byte => {
                for (px, &b) in line.iter_mut().zip(self.byte_row(y)) {
                    *px = u32::from(b);
                }
            }
            Depth::Word => line.copy_from_slice(self.word_row(y)),
        }
    }

    /// Pack one `u32` per pixel into row `y`, saturating to the depth.
    pub(crate) fn write_row(&mut self, y: u32, line: &[u32]) {
        debug_assert_eq!(line.len(), self.width() as usize);
        match self.depth() {
            Depth::Bit => {
                for (chunk, word) in line.chunks(64).zip(self.row_mut(y)) {
                    *word = chunk
                        .iter()
                        .enumerate()
                        .fold(0, |acc, (bit, &px)| acc | (u64::from(px != 0) << bit));
                }
            }
            Depth::Byte => {
                for (b, &px) in self.byte_row_mut(y).iter_mut().zip(line) {
                    *b = px.min(u32::from(u8::MAX)) as u8;
                }
            }
            Depth::Word => self.word_row_mut(y).copy_from_slice(line),
        }
    }
}

/// Allocate a zeroed vector, reporting allocation failure as an error.
pub(crate) fn zeroed_words(len: usize) -> Result<Vec<u64>, Error> {
    zeroed(len)
}

/// Allocate a vector filled with a default value, reporting allocation failure as an error.
pub(crate) fn zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, Error> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)?;
    vec.resize(len, T::default());
    Ok(vec)
}

impl Clone for Image {
    fn clone(&self) -> Self {
        LIVE_IMAGES.fetch_add(1, Ordering::Relaxed);
        Image {
            layout: self.layout,
            words: self.words.clone(),
        }
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        LIVE_IMAGES.fetch_sub(1, Ordering::Relaxed);
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.words == other.words
    }
}

impl Eq for Image {}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn pixels_per_depth() {
        for depth in [Depth::Bit, Depth::Byte, Depth::Word] {
            let mut image = Image::new(70, 3, depth).unwrap();
            assert_eq!((image.width(), image.height()), (128, 4));

            let max = depth.max_value();
            image.set_pixel(65, 3, max).unwrap();
            assert_eq!(image.get_pixel(65, 3).unwrap(), max);
            assert_eq!(image.get_pixel(64, 3).unwrap(), 0);
            assert_eq!(image.get_pixel(128, 0), Err(Error::BadParameter));
        }
    }

    #[test]
    fn fill_and_reset() {
        let mut image = Image::new(64, 2, Depth::Word).unwrap();
        image.fill(0x1234_5678).unwrap();
        assert_eq!(image.get_pixel(63, 1).unwrap(), 0x1234_5678);
        image.reset();
        assert_eq!(image.get_pixel(63, 1).unwrap(), 0);

        let mut image = Image::new(64, 2, Depth::Byte).unwrap();
        assert_eq!(image.fill(256), Err(Error::BadValue));
    }

    #[test]
    fn raw_round_trip() {
        let mut data = vec![0u8; 64 * 4 * 2];
        data[4..8].copy_from_slice(&0xdead_beefu32.to_le_bytes());
        let image = Image::from_raw(64, 2, Depth::Word, &data).unwrap();
        assert_eq!(image.get_pixel(1, 0).unwrap(), 0xdead_beef);
        assert_eq!(image.extract_raw().unwrap(), data);

        let mut binary = Image::new(64, 2, Depth::Bit).unwrap();
        assert_eq!(binary.load_raw(&[0; 16]), Err(Error::BadDepth));
        binary.set_pixel(9, 1, 1).unwrap();
        let raw = binary.extract_raw().unwrap();
        assert_eq!(raw.len(), 16);
        assert_eq!(raw[9], 0b10);
    }

    #[test]
    fn raw_size_mismatch() {
        let mut image = Image::new(64, 2, Depth::Byte).unwrap();
        assert_eq!(image.load_raw(&[0; 127]), Err(Error::LoadDataSize));
    }

    #[test]
    fn rows() {
        let mut image = Image::new(64, 2, Depth::Bit).unwrap();
        let mut line = vec![0u32; 64];
        line[3] = 1;
        line[63] = 7;
        image.write_row(1, &line);
        assert_eq!(image.get_pixel(3, 1).unwrap(), 1);
        assert_eq!(image.get_pixel(63, 1).unwrap(), 1);

        let mut back = vec![0u32; 64];
        image.read_row(1, &mut back);
        assert_eq!(back[63], 1);
        assert_eq!(back[4], 0);
    }
}
