// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Distance to the background.
use log::debug;

use crate::fifo::HierarchicalQueue;
use crate::grid::{Edge, Grid};
use crate::image::Image;
use crate::lattice::{self, Lattice, Planar};
use crate::layout::Depth;
use crate::Error;

/// Replace the set pixels of `values` by their distance to the background.
///
/// Boundary pixels are at distance one, every further unit ball of the grid adds one. Outside
/// pixels are background for [`Edge::Empty`] and foreground for [`Edge::Filled`]. Set pixels the
/// propagation never reaches keep a distance of zero.
pub(crate) fn propagate<L: Lattice>(
    lattice: &L,
    values: &mut [u32],
    edge: Edge,
) -> Result<(), Error> {
    let mut queue = HierarchicalQueue::sparse();
    let mut reached = lattice::flags(lattice.len())?;

    for p in 0..lattice.len() {
        if values[p] == 0 {
            continue;
        }

        let boundary = (1..=lattice.directions()).any(|d| match lattice.neighbour(p, d) {
            Some(q) => values[q] == 0,
            None => edge == Edge::Empty,
        });

        if boundary {
            reached[p] = true;
            queue.push(1, p)?;
        }
    }

    let seeds = queue.len();
    let mut max = 0;
    while let Some((level, p)) = queue.pop() {
        values[p] = level;
        max = level;

        for d in 1..=lattice.directions() {
            let Some(q) = lattice.neighbour(p, d) else {
                continue;
            };

            if values[q] != 0 && !reached[q] {
                reached[q] = true;
                queue.push(level + 1, q)?;
            }
        }
    }

    for (value, &reached) in values.iter_mut().zip(reached.iter()) {
        if !reached {
            *value = 0;
        }
    }

    debug!("distance transform: {} boundary pixels, maximum distance {}", seeds, max);
    Ok(())
}

/// Compute the distance of every set pixel of the binary `src` to the background into the word
/// image `dst`.
///
/// ```
/// use image_morph::{compute_distance, Depth, Edge, Grid, Image};
///
/// let mut src = Image::new(64, 8, Depth::Bit)?;
/// src.fill(1)?;
///
/// let mut dst = Image::new(64, 8, Depth::Word)?;
/// compute_distance(&src, &mut dst, Grid::Square, Edge::Empty)?;
/// assert_eq!(dst.get_pixel(0, 0)?, 1);
/// assert_eq!(dst.get_pixel(3, 3)?, 4);
///
/// compute_distance(&src, &mut dst, Grid::Square, Edge::Filled)?;
/// assert_eq!(dst.get_pixel(3, 3)?, 0);
/// # Ok::<(), image_morph::Error>(())
/// ```
pub fn compute_distance(src: &Image, dst: &mut Image, grid: Grid, edge: Edge) -> Result<(), Error> {
    let lattice = Planar::of(src, grid)?;
    src.layout().same_size(&dst.layout())?;
    if src.depth() != Depth::Bit || dst.depth() != Depth::Word {
        return Err(Error::BadDepth);
    }

    let mut values = lattice::load([src])?;
    propagate(&lattice, &mut values, edge)?;
    lattice::store(&values, [dst]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chessboard_on_square() {
        let mut src = Image::new(64, 8, Depth::Bit).unwrap();
        src.fill(1).unwrap();
        let mut dst = Image::new(64, 8, Depth::Word).unwrap();
        compute_distance(&src, &mut dst, Grid::Square, Edge::Empty).unwrap();

        for y in 0..8 {
            for x in 0..64 {
                let expected = x.min(y).min(63 - x).min(7 - y) + 1;
                assert_eq!(dst.get_pixel(x, y).unwrap(), expected, "at {:?}", (x, y));
            }
        }
    }

    #[test]
    fn distance_to_a_hole() {
        let mut src = Image::new(64, 16, Depth::Bit).unwrap();
        src.fill(1).unwrap();
        src.set_pixel(20, 8, 0).unwrap();
        let mut dst = Image::new(64, 16, Depth::Word).unwrap();

        compute_distance(&src, &mut dst, Grid::Square, Edge::Filled).unwrap();
        assert_eq!(dst.get_pixel(20, 8).unwrap(), 0);
        assert_eq!(dst.get_pixel(21, 9).unwrap(), 1);
        assert_eq!(dst.get_pixel(23, 5).unwrap(), 3);

        compute_distance(&src, &mut dst, Grid::Hexagonal, Edge::Filled).unwrap();
        assert_eq!(dst.get_pixel(22, 8).unwrap(), 2);
        assert_eq!(dst.get_pixel(20, 10).unwrap(), 2);
    }

    #[test]
    fn depth_checks() {
        let src = Image::new(64, 2, Depth::Byte).unwrap();
        let mut dst = Image::new(64, 2, Depth::Word).unwrap();
        assert_eq!(
            compute_distance(&src, &mut dst, Grid::Square, Edge::Empty),
            Err(Error::BadDepth)
        );
    }
}
