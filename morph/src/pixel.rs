// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Pixel-wise operators.
//!
//! Every operator checks sizes and depths up front. Rows are unpacked into `u32` lines, combined,
//! and packed back into the destination, so the same arithmetic serves all depth combinations.
//! Binary images with matching depth take a word-wise path instead.
use alloc::vec::Vec;

use crate::image::{zeroed, Image};
use crate::layout::Depth;
use crate::Error;

/// How a real-valued product is brought back to an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealRounding {
    /// Round towards zero.
    Floor,
    /// Round to the nearest integer, halves away from zero.
    Nearest,
}

use Depth::{Bit, Byte, Word};

const ADD_DEPTHS: [(Depth, Depth, Depth); 12] = [
    (Bit, Bit, Bit),
    (Bit, Byte, Byte),
    (Byte, Bit, Byte),
    (Bit, Byte, Word),
    (Byte, Bit, Word),
    (Bit, Word, Word),
    (Word, Bit, Word),
    (Byte, Byte, Byte),
    (Byte, Byte, Word),
    (Byte, Word, Word),
    (Word, Byte, Word),
    (Word, Word, Word),
];

const DIV_DEPTHS: [(Depth, Depth, Depth); 4] = [
    (Byte, Byte, Byte),
    (Byte, Byte, Word),
    (Word, Byte, Word),
    (Word, Word, Word),
];

/// How a binary operand enters an arithmetic operator.
#[derive(Clone, Copy)]
enum Promote {
    /// A set pixel counts as the destination maximum.
    Max,
    /// A set pixel counts as one.
    Unit,
}

fn check_table(
    table: &[(Depth, Depth, Depth)],
    a: &Image,
    b: &Image,
    dst: &Image,
) -> Result<(), Error> {
    a.layout().same_size(&b.layout())?;
    a.layout().same_size(&dst.layout())?;

    if table.contains(&(a.depth(), b.depth(), dst.depth())) {
        Ok(())
    } else {
        Err(Error::BadDepth)
    }
}

fn check_equal(a: &Image, b: &Image) -> Result<(), Error> {
    a.layout().same_size(&b.layout())?;
    if a.depth() == b.depth() {
        Ok(())
    } else {
        Err(Error::BadDepth)
    }
}

fn check_equal3(a: &Image, b: &Image, dst: &Image) -> Result<(), Error> {
    check_equal(a, b)?;
    check_equal(a, dst)
}

fn promote(value: u32, from: Depth, to: Depth, how: Promote) -> u64 {
    match (from, how) {
        (Bit, Promote::Max) => u64::from(value) * u64::from(to.max_value()),
        _ => u64::from(value),
    }
}

/// Combine two images row by row into a third, operands promoted to the destination.
fn combine(
    a: &Image,
    b: &Image,
    dst: &mut Image,
    how: Promote,
    op: impl Fn(u64, u64) -> u64,
) -> Result<(), Error> {
    let width = a.width() as usize;
    let mut la: Vec<u32> = zeroed(width)?;
    let mut lb: Vec<u32> = zeroed(width)?;
    let to = dst.depth();

    for y in 0..a.height() {
        a.read_row(y, &mut la);
        b.read_row(y, &mut lb);

        for (pa, &pb) in la.iter_mut().zip(&lb) {
            let va = promote(*pa, a.depth(), to, how);
            let vb = promote(pb, b.depth(), to, how);
            *pa = to.saturate(op(va, vb));
        }

        dst.write_row(y, &la);
    }

    Ok(())
}

/// Map one image row by row into another.
fn map(src: &Image, dst: &mut Image, op: impl Fn(u32) -> u32) -> Result<(), Error> {
    let mut line: Vec<u32> = zeroed(src.width() as usize)?;

    for y in 0..src.height() {
        src.read_row(y, &mut line);
        line.iter_mut().for_each(|px| *px = op(*px));
        dst.write_row(y, &line);
    }

    Ok(())
}

/// Combine word-wise, for operators that act bit-by-bit on binary images.
fn combine_words(a: &Image, b: &Image, dst: &mut Image, op: impl Fn(u64, u64) -> u64) {
    let out = dst.as_words_mut();
    for ((o, &wa), &wb) in out.iter_mut().zip(a.as_words()).zip(b.as_words()) {
        *o = op(wa, wb);
    }
}

/// Saturating addition, `dst = a + b`.
///
/// A binary operand contributes the maximum of the destination depth for each set pixel, so that
/// adding a set is a saturating union. See the module documentation of the depth table.
pub fn add(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_table(&ADD_DEPTHS, a, b, dst)?;
    if dst.depth() == Bit {
        combine_words(a, b, dst, |x, y| x | y);
        return Ok(());
    }

    combine(a, b, dst, Promote::Max, |x, y| x + y)
}

/// Saturating subtraction, `dst = max(a - b, 0)`.
pub fn sub(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_table(&ADD_DEPTHS, a, b, dst)?;
    if dst.depth() == Bit {
        combine_words(a, b, dst, |x, y| x & !y);
        return Ok(());
    }

    combine(a, b, dst, Promote::Max, |x, y| x.saturating_sub(y))
}

/// Saturating multiplication, `dst = a · b`.
///
/// A binary operand counts as `0` or `1`, so it masks the other operand.
pub fn mul(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_table(&ADD_DEPTHS, a, b, dst)?;
    if dst.depth() == Bit {
        combine_words(a, b, dst, |x, y| x & y);
        return Ok(());
    }

    combine(a, b, dst, Promote::Unit, |x, y| x * y)
}

/// Integer division, `dst = a / b`, with `x / 0` giving the destination maximum.
pub fn div(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_table(&DIV_DEPTHS, a, b, dst)?;
    let max = u64::from(dst.depth().max_value());
    combine(a, b, dst, Promote::Unit, |x, y| x.checked_div(y).unwrap_or(max))
}

/// Bitwise conjunction of images of equal depth.
pub fn and(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal3(a, b, dst)?;
    combine_words(a, b, dst, |x, y| x & y);
    Ok(())
}

/// Bitwise disjunction of images of equal depth.
pub fn or(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal3(a, b, dst)?;
    combine_words(a, b, dst, |x, y| x | y);
    Ok(())
}

/// Bitwise exclusive disjunction of images of equal depth.
pub fn xor(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal3(a, b, dst)?;
    combine_words(a, b, dst, |x, y| x ^ y);
    Ok(())
}

/// The saturated difference `a - min(a, b)`.
pub fn diff(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal3(a, b, dst)?;
    if a.depth() == Bit {
        combine_words(a, b, dst, |x, y| x & !y);
        return Ok(());
    }

    combine(a, b, dst, Promote::Unit, |x, y| x - x.min(y))
}

/// Point-wise minimum.
pub fn inf(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal3(a, b, dst)?;
    if a.depth() == Bit {
        combine_words(a, b, dst, |x, y| x & y);
        return Ok(());
    }

    combine(a, b, dst, Promote::Unit, u64::min)
}

/// Point-wise maximum.
pub fn sup(a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal3(a, b, dst)?;
    if a.depth() == Bit {
        combine_words(a, b, dst, |x, y| x | y);
        return Ok(());
    }

    combine(a, b, dst, Promote::Unit, u64::max)
}

/// Complement with respect to the maximum of the depth.
pub fn invert(src: &Image, dst: &mut Image) -> Result<(), Error> {
    check_equal(src, dst)?;
    for (o, &w) in dst.as_words_mut().iter_mut().zip(src.as_words()) {
        *o = !w;
    }

    Ok(())
}

fn check_const(src: &Image, dst: &Image) -> Result<(), Error> {
    check_equal(src, dst)?;
    if src.depth() == Bit {
        return Err(Error::BadDepth);
    }

    Ok(())
}

/// Add a constant, saturating on byte images and wrapping on word images.
pub fn add_const(src: &Image, value: u32, dst: &mut Image) -> Result<(), Error> {
    check_const(src, dst)?;
    match src.depth() {
        Word => map(src, dst, |px| px.wrapping_add(value)),
        _ => map(src, dst, |px| px.saturating_add(value)),
    }
}

/// Subtract a constant, saturating on byte images and wrapping on word images.
pub fn sub_const(src: &Image, value: u32, dst: &mut Image) -> Result<(), Error> {
    check_const(src, dst)?;
    match src.depth() {
        Word => map(src, dst, |px| px.wrapping_sub(value)),
        _ => map(src, dst, |px| px.saturating_sub(value)),
    }
}

/// Add a constant, clamping at the maximum of the depth.
pub fn ceiling_add_const(src: &Image, value: u32, dst: &mut Image) -> Result<(), Error> {
    check_const(src, dst)?;
    map(src, dst, |px| px.saturating_add(value))
}

/// Subtract a constant, clamping at zero.
pub fn floor_sub_const(src: &Image, value: u32, dst: &mut Image) -> Result<(), Error> {
    check_const(src, dst)?;
    map(src, dst, |px| px.saturating_sub(value))
}

/// Multiply by a constant, saturating on byte images and wrapping on word images.
pub fn mul_const(src: &Image, value: u32, dst: &mut Image) -> Result<(), Error> {
    check_const(src, dst)?;
    match src.depth() {
        Word => map(src, dst, |px| px.wrapping_mul(value)),
        _ => map(src, dst, |px| px.saturating_mul(value)),
    }
}

/// Divide by a constant; division by zero yields the maximum of the depth.
pub fn div_const(src: &Image, value: u32, dst: &mut Image) -> Result<(), Error> {
    check_const(src, dst)?;
    let max = src.depth().max_value();
    map(src, dst, |px| px.checked_div(value).unwrap_or(max))
}

/// Multiply by a non-negative real factor, saturating at the maximum of the depth.
pub fn mul_real_const(
    src: &Image,
    factor: f64,
    dst: &mut Image,
    rounding: RealRounding,
) -> Result<(), Error> {
    check_const(src, dst)?;
    if factor.is_nan() || factor < 0.0 || factor.is_infinite() {
        return Err(Error::BadValue);
    }

    let max = src.depth().max_value();
    map(src, dst, |px| {
        let product = f64::from(px) * factor;
        let rounded = match rounding {
            RealRounding::Floor => libm::floor(product),
            RealRounding::Nearest => libm::round(product),
        };

        if rounded >= f64::from(max) {
            max
        } else {
            rounded as u32
        }
    })
}

/// Copy `a` into `out` and find the first differing pixel in row-major order.
///
/// Returns `None` when the images are identical.
pub fn compare(a: &Image, b: &Image, out: &mut Image) -> Result<Option<(u32, u32)>, Error> {
    check_equal3(a, b, out)?;
    out.copy_from(a)?;

    let stride = a.layout().row_words();
    let first = a
        .as_words()
        .iter()
        .zip(b.as_words())
        .position(|(wa, wb)| wa != wb);

    let Some(index) = first else {
        return Ok(None);
    };

    let y = (index / stride) as u32;
    let word = index % stride;
    let bit = (a.as_words()[index] ^ b.as_words()[index]).trailing_zeros() as usize;
    let x = (word * 64 + bit) / a.depth().bits() as usize;

    Ok(Some((x as u32, y)))
}

/// Binary image of the pixels with `lo ≤ src ≤ hi`.
pub fn threshold(src: &Image, dst: &mut Image, lo: u32, hi: u32) -> Result<(), Error> {
    src.layout().same_size(&dst.layout())?;
    if dst.depth() != Bit {
        return Err(Error::BadDepth);
    }

    map(src, dst, |px| u32::from(lo <= px && px <= hi))
}

/// Replace each byte pixel through a 256 entry table.
pub fn lookup(src: &Image, dst: &mut Image, table: &[u8; 256]) -> Result<(), Error> {
    check_equal(src, dst)?;
    if src.depth() != Byte {
        return Err(Error::BadDepth);
    }

    for y in 0..src.height() {
        let (s, d) = (src.byte_row(y), dst.byte_row_mut(y));
        for (o, &px) in d.iter_mut().zip(s) {
            *o = table[usize::from(px)];
        }
    }

    Ok(())
}

/// Remap pixels between depths.
///
/// - binary to byte or word: set pixels become the maximum,
/// - byte or word to binary: set exactly where the pixel is the maximum,
/// - word to byte: the most significant byte,
/// - byte to word: zero extension.
pub fn convert(src: &Image, dst: &mut Image) -> Result<(), Error> {
    src.layout().same_size(&dst.layout())?;
    let (from, to) = (src.depth(), dst.depth());

    if from == to {
        return dst.copy_from(src);
    }

    let from_max = from.max_value();
    let to_max = to.max_value();
    match (from, to) {
        (Bit, _) => map(src, dst, |px| px * to_max),
        (_, Bit) => map(src, dst, |px| u32::from(px == from_max)),
        (Word, Byte) => map(src, dst, |px| px >> 24),
        _ => map(src, dst, |px| px),
    }
}

/// Keep the most significant byte of each word pixel.
///
/// This is the downscaling conversion; the low byte is available through
/// [`extract_byte_plane`].
pub fn downscale_32_to_8(src: &Image, dst: &mut Image) -> Result<(), Error> {
    if src.depth() != Word || dst.depth() != Byte {
        return Err(Error::BadDepth);
    }

    convert(src, dst)
}

/// Copy byte number `plane` (0 is least significant) of each word pixel into a byte image.
pub fn extract_byte_plane(src: &Image, plane: u32, dst: &mut Image) -> Result<(), Error> {
    src.layout().same_size(&dst.layout())?;
    if src.depth() != Word || dst.depth() != Byte {
        return Err(Error::BadDepth);
    }

    if plane > 3 {
        return Err(Error::BadParameter);
    }

    map(src, dst, |px| (px >> (8 * plane)) & 0xff)
}

/// Replace byte number `plane` of each word pixel with the byte image.
pub fn insert_byte_plane(src: &Image, dst: &mut Image, plane: u32) -> Result<(), Error> {
    src.layout().same_size(&dst.layout())?;
    if src.depth() != Byte || dst.depth() != Word {
        return Err(Error::BadDepth);
    }

    if plane > 3 {
        return Err(Error::BadParameter);
    }

    let shift = 8 * plane;
    let mask = !(0xffu32 << shift);
    for y in 0..src.height() {
        for (o, &px) in dst.word_row_mut(y).iter_mut().zip(src.byte_row(y)) {
            *o = (*o & mask) | (u32::from(px) << shift);
        }
    }

    Ok(())
}

/// Copy a rectangle between images of the same depth but possibly different sizes.
///
/// The rectangle is clipped against both images.
pub fn crop_copy(
    src: &Image,
    (sx, sy): (u32, u32),
    dst: &mut Image,
    (dx, dy): (u32, u32),
    (w, h): (u32, u32),
) -> Result<(), Error> {
    if src.depth() != dst.depth() {
        return Err(Error::BadDepth);
    }

    let w = w
        .min(src.width().saturating_sub(sx))
        .min(dst.width().saturating_sub(dx));
    let h = h
        .min(src.height().saturating_sub(sy))
        .min(dst.height().saturating_sub(dy));

    for row in 0..h {
        for col in 0..w {
            let px = src.pixel(sx + col, sy + row);
            dst.put_pixel(dx + col, dy + row, px);
        }
    }

    Ok(())
}

/// The sum of all pixel values; the number of set pixels of a binary image.
pub fn volume(src: &Image) -> u64 {
    match src.depth() {
        Bit => src
            .as_words()
            .iter()
            .map(|w| u64::from(w.count_ones()))
            .sum(),
        Byte => (0..src.height())
            .flat_map(|y| src.byte_row(y).iter())
            .map(|&px| u64::from(px))
            .sum(),
        Word => (0..src.height())
            .flat_map(|y| src.word_row(y).iter())
            .map(|&px| u64::from(px))
            .sum(),
    }
}

/// The smallest and the largest pixel value.
pub fn range(src: &Image) -> (u32, u32) {
    (0..src.height())
        .flat_map(|y| (0..src.width()).map(move |x| (x, y)))
        .map(|(x, y)| src.pixel(x, y))
        .fold((u32::MAX, 0), |(lo, hi), px| (lo.min(px), hi.max(px)))
}

/// The number of pixels at each value of a binary or byte image.
pub fn histogram(src: &Image) -> Result<[u64; 256], Error> {
    let mut counts = [0u64; 256];
    match src.depth() {
        Bit => {
            let ones = volume(src);
            counts[1] = ones;
            counts[0] = src.layout().len() as u64 - ones;
        }
        Byte => {
            for y in 0..src.height() {
                for &px in src.byte_row(y) {
                    counts[usize::from(px)] += 1;
                }
            }
        }
        Word => return Err(Error::BadDepth),
    }

    Ok(counts)
}

/// Whether every pixel is zero.
pub fn is_empty(src: &Image) -> bool {
    src.as_words().iter().all(|&w| w == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte(value: u32) -> Image {
        let mut image = Image::new(64, 2, Byte).unwrap();
        image.fill(value).unwrap();
        image
    }

    fn word(value: u32) -> Image {
        let mut image = Image::new(64, 2, Word).unwrap();
        image.fill(value).unwrap();
        image
    }

    #[test]
    fn saturation() {
        let mut out = byte(0);
        add(&byte(255), &byte(1), &mut out).unwrap();
        assert_eq!(out.get_pixel(3, 1).unwrap(), 255);

        sub(&byte(0), &byte(1), &mut out).unwrap();
        assert_eq!(out.get_pixel(3, 1).unwrap(), 0);

        let mut wide = word(0);
        add(&byte(255), &byte(1), &mut wide).unwrap();
        assert_eq!(wide.get_pixel(0, 0).unwrap(), 256);

        ceiling_add_const(&word(u32::MAX - 1), 10, &mut wide).unwrap();
        assert_eq!(wide.get_pixel(0, 0).unwrap(), u32::MAX);

        add_const(&word(u32::MAX - 1), 10, &mut wide).unwrap();
        assert_eq!(wide.get_pixel(0, 0).unwrap(), 8);
    }

    #[test]
    fn depth_table() {
        let mut out = byte(0);
        assert_eq!(add(&word(1), &word(1), &mut out), Err(Error::BadDepth));
        assert_eq!(div(&byte(1), &word(1), &mut out), Err(Error::BadDepth));

        let other = Image::new(128, 2, Byte).unwrap();
        assert_eq!(add(&byte(1), &other, &mut out), Err(Error::BadSize));
    }

    #[test]
    fn binary_operands() {
        let mut set = Image::new(64, 2, Bit).unwrap();
        set.set_pixel(1, 0, 1).unwrap();

        let mut out = byte(0);
        add(&set, &byte(10), &mut out).unwrap();
        assert_eq!(out.get_pixel(1, 0).unwrap(), 255);
        assert_eq!(out.get_pixel(2, 0).unwrap(), 10);

        mul(&set, &byte(10), &mut out).unwrap();
        assert_eq!(out.get_pixel(1, 0).unwrap(), 10);
        assert_eq!(out.get_pixel(2, 0).unwrap(), 0);
    }

    #[test]
    fn division_by_zero() {
        let mut out = byte(0);
        div(&byte(7), &byte(0), &mut out).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 255);

        div(&byte(7), &byte(2), &mut out).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 3);

        div_const(&byte(7), 0, &mut out).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 255);
    }

    #[test]
    fn real_rounding() {
        let mut out = byte(0);
        mul_real_const(&byte(3), 0.5, &mut out, RealRounding::Floor).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 1);
        mul_real_const(&byte(3), 0.5, &mut out, RealRounding::Nearest).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 2);
        mul_real_const(&byte(200), 2.0, &mut out, RealRounding::Floor).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 255);
        assert_eq!(
            mul_real_const(&byte(3), -1.0, &mut out, RealRounding::Floor),
            Err(Error::BadValue)
        );
    }

    #[test]
    fn compare_positions() {
        let a = byte(4);
        let mut b = byte(4);
        let mut out = byte(0);
        assert_eq!(compare(&a, &b, &mut out).unwrap(), None);
        assert_eq!(out.get_pixel(9, 1).unwrap(), 4);

        b.set_pixel(13, 1, 5).unwrap();
        assert_eq!(compare(&a, &b, &mut out).unwrap(), Some((13, 1)));

        let mut wa = Image::new(64, 2, Word).unwrap();
        let mut wb = Image::new(64, 2, Word).unwrap();
        wb.set_pixel(33, 0, 0x100).unwrap();
        let mut wo = Image::new(64, 2, Word).unwrap();
        assert_eq!(compare(&wa, &wb, &mut wo).unwrap(), Some((33, 0)));
        wa.set_pixel(33, 0, 0x100).unwrap();
        assert_eq!(compare(&wa, &wb, &mut wo).unwrap(), None);

        let ba = Image::new(128, 2, Bit).unwrap();
        let mut bb = Image::new(128, 2, Bit).unwrap();
        bb.set_pixel(100, 1, 1).unwrap();
        let mut bo = Image::new(128, 2, Bit).unwrap();
        assert_eq!(compare(&ba, &bb, &mut bo).unwrap(), Some((100, 1)));
    }

    #[test]
    fn conversions() {
        let mut w = word(0x1234_5678);
        let mut b = byte(0);
        convert(&w, &mut b).unwrap();
        assert_eq!(b.get_pixel(0, 0).unwrap(), 0x12);

        extract_byte_plane(&w, 0, &mut b).unwrap();
        assert_eq!(b.get_pixel(0, 0).unwrap(), 0x78);

        insert_byte_plane(&byte(0xab), &mut w, 3).unwrap();
        assert_eq!(w.get_pixel(0, 0).unwrap(), 0xab34_5678);

        let mut set = Image::new(64, 2, Bit).unwrap();
        convert(&byte(255), &mut set).unwrap();
        assert_eq!(volume(&set), 128);
        convert(&byte(254), &mut set).unwrap();
        assert!(is_empty(&set));
    }

    #[test]
    fn downscaling_keeps_the_high_byte() {
        let mut w = word(0);
        w.set_pixel(0, 0, 0xff00_0001).unwrap();
        w.set_pixel(1, 0, 0x00ff_ffff).unwrap();
        w.set_pixel(2, 1, 0x8000_0000).unwrap();

        let mut b = byte(7);
        downscale_32_to_8(&w, &mut b).unwrap();
        assert_eq!(b.get_pixel(0, 0).unwrap(), 0xff);
        assert_eq!(b.get_pixel(1, 0).unwrap(), 0);
        assert_eq!(b.get_pixel(2, 1).unwrap(), 0x80);
        assert_eq!(b.get_pixel(3, 1).unwrap(), 0);

        let mut set = Image::new(64, 2, Bit).unwrap();
        assert_eq!(downscale_32_to_8(&w, &mut set), Err(Error::BadDepth));
        assert_eq!(downscale_32_to_8(&byte(1), &mut b), Err(Error::BadDepth));
    }

    #[test]
    fn differences() {
        let mut a = byte(10);
        a.set_pixel(0, 0, 200).unwrap();
        let mut out = byte(0);
        diff(&a, &byte(30), &mut out).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), 170);
        assert_eq!(out.get_pixel(1, 0).unwrap(), 0);

        let mut wide = word(0);
        diff(&word(5), &word(3), &mut wide).unwrap();
        assert_eq!(wide.get_pixel(9, 1).unwrap(), 2);

        // Binary difference is the set difference.
        let mut a = Image::new(64, 2, Bit).unwrap();
        let mut b = Image::new(64, 2, Bit).unwrap();
        for x in 0..10 {
            a.set_pixel(x, 0, 1).unwrap();
        }
        for x in 5..20 {
            b.set_pixel(x, 0, 1).unwrap();
        }
        let mut out = Image::new(64, 2, Bit).unwrap();
        diff(&a, &b, &mut out).unwrap();
        assert_eq!(volume(&out), 5);
        assert_eq!(out.get_pixel(4, 0).unwrap(), 1);
        assert_eq!(out.get_pixel(5, 0).unwrap(), 0);
    }

    #[test]
    fn lookup_and_threshold() {
        let mut table = [0u8; 256];
        table[9] = 90;
        let mut out = byte(0);
        lookup(&byte(9), &mut out, &table).unwrap();
        assert_eq!(out.get_pixel(5, 0).unwrap(), 90);

        let mut set = Image::new(64, 2, Bit).unwrap();
        threshold(&byte(9), &mut set, 5, 9).unwrap();
        assert_eq!(volume(&set), 128);
        threshold(&byte(9), &mut set, 10, 20).unwrap();
        assert_eq!(volume(&set), 0);
    }

    #[test]
    fn crop() {
        let src = byte(7);
        let mut dst = Image::new(128, 4, Byte).unwrap();
        crop_copy(&src, (60, 0), &mut dst, (0, 1), (10, 10)).unwrap();
        assert_eq!(dst.get_pixel(3, 1).unwrap(), 7);
        assert_eq!(dst.get_pixel(4, 1).unwrap(), 0);
        assert_eq!(dst.get_pixel(3, 2).unwrap(), 7);
        assert_eq!(dst.get_pixel(3, 3).unwrap(), 0);
    }

    #[test]
    fn measurements() {
        let mut image = byte(1);
        image.set_pixel(0, 0, 9).unwrap();
        assert_eq!(volume(&image), 127 + 9);
        assert_eq!(range(&image), (1, 9));
        let hist = histogram(&image).unwrap();
        assert_eq!((hist[1], hist[9]), (127, 1));
        assert_eq!(histogram(&word(0)), Err(Error::BadDepth));
    }
}
