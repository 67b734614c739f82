// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Connected component labelling.
use alloc::vec::Vec;
use log::debug;

use crate::grid::Grid;
use crate::image::{zeroed, Image};
use crate::lattice::{self, Lattice, Planar};
use crate::layout::Depth;
use crate::watershed::LABEL_MASK;
use crate::Error;

/// The labels handed out to components, in order.
///
/// The low byte cycles through `[lo, hi)` without zero; the bits above count the completed
/// cycles so that every component keeps a distinct label. Labels stay within [`LABEL_MASK`] so
/// that they can seed a watershed.
#[derive(Clone, Debug)]
pub(crate) struct Palette {
    cycle: Vec<u32>,
}

impl Palette {
    pub(crate) fn new(lo: u32, hi: u32) -> Result<Self, Error> {
        if hi <= lo || hi > 256 {
            return Err(Error::BadParameter);
        }

        let cycle: Vec<u32> = (lo..hi).filter(|&v| v != 0).collect();
        if cycle.is_empty() {
            return Err(Error::BadParameter);
        }

        Ok(Palette { cycle })
    }

    pub(crate) fn label(&self, index: u32) -> Result<u32, Error> {
        let len = self.cycle.len() as u32;
        let cycles = index / len;
        if cycles > LABEL_MASK >> 8 {
            return Err(Error::BadValue);
        }

        Ok((cycles << 8) | self.cycle[(index % len) as usize])
    }
}

/// Label the connected regions of equal non-zero value.
///
/// Components are numbered in the order their first pixel appears in `values`. Returns the
/// number of components.
pub(crate) fn components<L: Lattice>(
    lattice: &L,
    values: &[u32],
    labels: &mut [u32],
    palette: &Palette,
) -> Result<u32, Error> {
    labels.fill(0);
    let mut count = 0u32;
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..lattice.len() {
        let value = values[start];
        if value == 0 || labels[start] != 0 {
            continue;
        }

        let label = palette.label(count)?;
        count += 1;

        labels[start] = label;
        stack.try_reserve(1)?;
        stack.push(start);

        while let Some(p) = stack.pop() {
            for d in 1..=lattice.directions() {
                let Some(q) = lattice.neighbour(p, d) else {
                    continue;
                };

                if values[q] == value && labels[q] == 0 {
                    labels[q] = label;
                    stack.try_reserve(1)?;
                    stack.push(q);
                }
            }
        }
    }

    debug!("labelling: {} components", count);
    Ok(count)
}

/// Label the connected components of `src` into the word image `dst`.
///
/// Binary images have their set pixels labelled, grey images their maximal connected regions of
/// equal non-zero value. The low byte of a label cycles through `[lo, hi)`, skipping zero, so it
/// can serve as a palette index. Returns the number of components.
///
/// Labels are limited to 24 bits, more components than that fail with [`Error::BadValue`].
///
/// ```
/// use image_morph::{label, Depth, Grid, Image};
///
/// let mut src = Image::new(32, 32, Depth::Bit)?;
/// for (x, y) in [(6, 3), (5, 4), (6, 5)] {
///     src.set_pixel(x, y, 1)?;
/// }
///
/// let mut dst = Image::new(32, 32, Depth::Word)?;
/// assert_eq!(label(&src, &mut dst, 1, 256, Grid::Square)?, 1);
/// assert_eq!(label(&src, &mut dst, 1, 256, Grid::Hexagonal)?, 3);
/// # Ok::<(), image_morph::Error>(())
/// ```
pub fn label(src: &Image, dst: &mut Image, lo: u32, hi: u32, grid: Grid) -> Result<u32, Error> {
    let lattice = Planar::of(src, grid)?;
    src.layout().same_size(&dst.layout())?;
    if dst.depth() != Depth::Word {
        return Err(Error::BadDepth);
    }

    let palette = Palette::new(lo, hi)?;
    let values = lattice::load([src])?;
    let mut labels: Vec<u32> = zeroed(values.len())?;
    let count = components(&lattice, &values, &mut labels, &palette)?;
    lattice::store(&labels, [dst]);
    Ok(count)
}
