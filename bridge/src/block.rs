use image_morph::Error;

use crate::mode::Mode;

/// A borrowed block of pixels, rows `stride` bytes apart.
#[derive(Clone, Copy, Debug)]
pub struct PixelBlock<'data> {
    data: &'data [u8],
    width: u32,
    height: u32,
    stride: usize,
    mode: Mode,
}

impl<'data> PixelBlock<'data> {
    /// Describe a block, validating it against its buffer.
    ///
    /// Fails with [`Error::BadSize`] for empty dimensions or a stride shorter than a row and with
    /// [`Error::LoadDataSize`] if the buffer ends before the last row does. The padding after the
    /// last row need not be present.
    pub fn new(
        data: &'data [u8],
        width: u32,
        height: u32,
        stride: usize,
        mode: Mode,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::BadSize);
        }

        let row = (width as usize)
            .checked_mul(mode.bytes_per_pixel())
            .ok_or(Error::BadSize)?;
        if stride < row {
            return Err(Error::BadSize);
        }

        let needed = stride
            .checked_mul(height as usize - 1)
            .and_then(|len| len.checked_add(row))
            .ok_or(Error::BadSize)?;
        if data.len() < needed {
            return Err(Error::LoadDataSize);
        }

        Ok(PixelBlock {
            data,
            width,
            height,
            stride,
            mode,
        })
    }

    /// A block without row padding.
    pub fn packed(data: &'data [u8], width: u32, height: u32, mode: Mode) -> Result<Self, Error> {
        let stride = (width as usize)
            .checked_mul(mode.bytes_per_pixel())
            .ok_or(Error::BadSize)?;
        Self::new(data, width, height, stride, mode)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The pixel bytes of row `y`, without padding.
    pub(crate) fn row(&self, y: u32) -> &'data [u8] {
        let start = y as usize * self.stride;
        let len = self.width as usize * self.mode.bytes_per_pixel();
        &self.data[start..start + len]
    }
}
