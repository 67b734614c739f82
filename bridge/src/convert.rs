use image_morph::{Depth, Error, Image};
use log::debug;

use crate::block::PixelBlock;
use crate::luma::LumaWeights;
use crate::mode::Mode;

/// Convert a block into a new image of the depth of its mode.
///
/// Color modes are reduced to luminance with `weights`; CMYK blocks become `255 - K`.
pub fn import(block: &PixelBlock, weights: LumaWeights) -> Result<Image, Error> {
    let mut image = Image::new(block.width(), block.height(), block.mode().depth())?;
    import_into(block, weights, &mut image)?;
    Ok(image)
}

/// Convert a block into the top left corner of an existing image.
///
/// The image must have the depth of the mode and be at least as large as the block. Pixels
/// outside of the block are cleared.
pub fn import_into(
    block: &PixelBlock,
    weights: LumaWeights,
    image: &mut Image,
) -> Result<(), Error> {
    let mode = block.mode();
    if image.depth() != mode.depth() {
        return Err(Error::BadDepth);
    }

    if image.width() < block.width() || image.height() < block.height() {
        return Err(Error::BadImageDimensions);
    }

    debug!(
        "importing {}x{} {} block into {:?}",
        block.width(),
        block.height(),
        mode.name(),
        image.layout()
    );

    if mode == Mode::One {
        image.reset();
        for y in 0..block.height() {
            for (x, &px) in (0..).zip(block.row(y)) {
                image.set_pixel(x, y, u32::from(px != 0))?;
            }
        }

        return Ok(());
    }

    let layout = image.layout();
    let mut raw = vec![0u8; layout.byte_len()];
    for (y, out) in (0..block.height()).zip(raw.chunks_exact_mut(layout.row_bytes())) {
        let row = block.row(y);
        match mode {
            Mode::L | Mode::P | Mode::I => out[..row.len()].copy_from_slice(row),
            Mode::F => {
                let floats: &[[u8; 4]] = bytemuck::cast_slice(row);
                for (o, px) in out.chunks_exact_mut(4).zip(floats) {
                    let value = f32::from_le_bytes(*px) as i32;
                    o.copy_from_slice(&value.to_le_bytes());
                }
            }
            Mode::Rgb => {
                let pixels: &[[u8; 3]] = bytemuck::cast_slice(row);
                for (o, &px) in out.iter_mut().zip(pixels) {
                    *o = weights.apply(px);
                }
            }
            Mode::Rgba => {
                let pixels: &[[u8; 4]] = bytemuck::cast_slice(row);
                for (o, &[r, g, b, _]) in out.iter_mut().zip(pixels) {
                    *o = weights.apply([r, g, b]);
                }
            }
            Mode::Cmyk => {
                let pixels: &[[u8; 4]] = bytemuck::cast_slice(row);
                for (o, &[_, _, _, k]) in out.iter_mut().zip(pixels) {
                    *o = 255 - k;
                }
            }
            Mode::One => unreachable!("binary blocks are imported pixel by pixel"),
        }
    }

    image.load_raw(&raw)
}

/// Write the whole image as a tightly packed block of `mode`.
pub fn export(image: &Image, mode: Mode) -> Result<Vec<u8>, Error> {
    export_rect(image, mode, image.width(), image.height())
}

/// Write the top left `width` by `height` pixels as a tightly packed block of `mode`.
///
/// Only the modes `"1"`, `"L"` and `"I"` are written, others fail with [`Error::BadParameter`].
/// The image must have the depth of the mode. Set binary pixels become `255`.
pub fn export_rect(image: &Image, mode: Mode, width: u32, height: u32) -> Result<Vec<u8>, Error> {
    if !matches!(mode, Mode::One | Mode::L | Mode::I) {
        return Err(Error::BadParameter);
    }

    if image.depth() != mode.depth() {
        return Err(Error::BadDepth);
    }

    if width == 0 || height == 0 || width > image.width() || height > image.height() {
        return Err(Error::BadImageDimensions);
    }

    let stride = width as usize * mode.bytes_per_pixel();
    let mut data = Vec::new();
    data.try_reserve_exact(stride * height as usize)?;

    if mode == Mode::One {
        for y in 0..height {
            for x in 0..width {
                data.push(if image.get_pixel(x, y)? != 0 { 255 } else { 0 });
            }
        }

        return Ok(data);
    }

    let raw = image.extract_raw()?;
    for row in raw.chunks_exact(image.layout().row_bytes()).take(height as usize) {
        data.extend_from_slice(&row[..stride]);
    }

    Ok(data)
}
