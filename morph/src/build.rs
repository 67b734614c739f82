// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Geodesic reconstruction.
//!
//! Both directions run a single pass over a hierarchical queue. A pixel is queued whenever its
//! value may still improve one of its neighbours; build pops the highest values first, dual-build
//! the lowest. Entries whose pixel improved again after being queued are stale and skipped.
use log::debug;

use crate::fifo::HierarchicalQueue;
use crate::grid::{DirSet, Grid};
use crate::image::Image;
use crate::lattice::{self, Lattice, Planar};
use crate::layout::Depth;
use crate::shift::check_pair;
use crate::Error;

/// The direction in which values propagate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Order {
    /// Values grow up to the mask.
    Build,
    /// Values shrink down to the mask.
    Dual,
}

impl Order {
    fn key(self, value: u32, depth: Depth) -> u32 {
        match self {
            Order::Build => depth.max_value() - value,
            Order::Dual => value,
        }
    }

    fn clamp(self, mask: u32, value: u32) -> u32 {
        match self {
            Order::Build => value.min(mask),
            Order::Dual => value.max(mask),
        }
    }

    fn improves(self, candidate: u32, current: u32) -> bool {
        match self {
            Order::Build => candidate > current,
            Order::Dual => candidate < current,
        }
    }
}

/// Propagate `marker` along `dirs` until stable, clamped by `mask`.
///
/// Returns the number of queue entries processed.
pub(crate) fn reconstruct<L: Lattice>(
    lattice: &L,
    dirs: DirSet,
    mask: &[u32],
    marker: &mut [u32],
    depth: Depth,
    order: Order,
) -> Result<usize, Error> {
    let dirs = dirs.without(0);
    for (m, &bound) in marker.iter_mut().zip(mask) {
        *m = order.clamp(bound, *m);
    }

    let mut queue = HierarchicalQueue::for_depth(depth);
    for p in 0..lattice.len() {
        let value = marker[p];
        let seeds = dirs.iter().any(|d| {
            lattice
                .neighbour(p, d)
                .is_some_and(|q| order.improves(order.clamp(mask[q], value), marker[q]))
        });

        if seeds {
            queue.push(order.key(value, depth), p)?;
        }
    }

    let seeds = queue.len();
    let mut processed = 0;
    while let Some((level, p)) = queue.pop() {
        let value = marker[p];
        if level != order.key(value, depth) {
            continue;
        }

        processed += 1;
        for d in dirs.iter() {
            let Some(q) = lattice.neighbour(p, d) else {
                continue;
            };

            let candidate = order.clamp(mask[q], value);
            if order.improves(candidate, marker[q]) {
                marker[q] = candidate;
                queue.push(order.key(candidate, depth), q)?;
            }
        }
    }

    debug!("{:?} reconstruction: {} seeds, {} pixels processed", order, seeds, processed);
    Ok(processed)
}

fn planar(
    mask: &Image,
    marker: &mut Image,
    dirs: DirSet,
    grid: Grid,
    order: Order,
) -> Result<(), Error> {
    let lattice = Planar::of(mask, grid)?;
    check_pair(mask, marker)?;

    let bounds = lattice::load([mask])?;
    let mut values = lattice::load([&*marker])?;
    reconstruct(&lattice, dirs, &bounds, &mut values, mask.depth(), order)?;
    lattice::store(&values, [marker]);
    Ok(())
}

/// Reconstruct `marker` by geodesic dilation under `mask`, in place.
///
/// The result is the largest image below `mask` that is reachable from `inf(marker, mask)` by
/// repeated dilation with the unit ball of the grid. Only the planar grids are accepted.
///
/// ```
/// use image_morph::{build, Depth, Grid, Image};
///
/// let mut mask = Image::new(64, 4, Depth::Byte)?;
/// for x in 0..10 {
///     mask.set_pixel(x, 1, 80)?;
/// }
///
/// let mut marker = Image::new(64, 4, Depth::Byte)?;
/// marker.set_pixel(0, 1, 200)?;
/// build(&mask, &mut marker, Grid::Square)?;
/// assert_eq!(marker.get_pixel(9, 1)?, 80);
/// assert_eq!(marker.get_pixel(10, 1)?, 0);
/// # Ok::<(), image_morph::Error>(())
/// ```
pub fn build(mask: &Image, marker: &mut Image, grid: Grid) -> Result<(), Error> {
    planar(mask, marker, DirSet::neighbours(grid), grid, Order::Build)
}

/// Reconstruct `marker` by geodesic erosion above `mask`, in place.
pub fn dual_build(mask: &Image, marker: &mut Image, grid: Grid) -> Result<(), Error> {
    planar(mask, marker, DirSet::neighbours(grid), grid, Order::Dual)
}

/// Reconstruction restricted to a single direction.
///
/// Values only travel from a pixel to its neighbour in direction `d`, so every chain of pixels
/// along `d` is reconstructed independently.
pub fn build_neighbor(mask: &Image, marker: &mut Image, d: u32, grid: Grid) -> Result<(), Error> {
    grid.check_direction(d)?;
    planar(mask, marker, DirSet::EMPTY.with(d), grid, Order::Build)
}

/// Dual reconstruction restricted to a single direction.
pub fn dual_build_neighbor(
    mask: &Image,
    marker: &mut Image,
    d: u32,
    grid: Grid,
) -> Result<(), Error> {
    grid.check_direction(d)?;
    planar(mask, marker, DirSet::EMPTY.with(d), grid, Order::Dual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel;

    fn ramp() -> Image {
        let mut mask = Image::new(64, 8, Depth::Byte).unwrap();
        for y in 0..8 {
            for x in 0..64 {
                mask.set_pixel(x, y, (x * 3 + y) % 200).unwrap();
            }
        }
        mask
    }

    #[test]
    fn build_is_bounded_and_idempotent() {
        let mask = ramp();
        let mut marker = Image::new(64, 8, Depth::Byte).unwrap();
        marker.set_pixel(40, 4, 255).unwrap();

        build(&mask, &mut marker, Grid::Square).unwrap();
        for y in 0..8 {
            for x in 0..64 {
                let (r, m) = (marker.get_pixel(x, y).unwrap(), mask.get_pixel(x, y).unwrap());
                assert!(r <= m, "at {:?}", (x, y));
            }
        }

        let once = marker.clone();
        build(&mask, &mut marker, Grid::Square).unwrap();
        assert_eq!(marker, once);
    }

    #[test]
    fn duality() {
        let mask = ramp();
        let mut marker = Image::new(64, 8, Depth::Byte).unwrap();
        marker.set_pixel(10, 2, 150).unwrap();
        marker.set_pixel(50, 6, 90).unwrap();

        let mut not_mask = mask.clone();
        pixel::invert(&mask, &mut not_mask).unwrap();
        let mut not_marker = marker.clone();
        pixel::invert(&marker, &mut not_marker).unwrap();

        build(&mask, &mut marker, Grid::Hexagonal).unwrap();
        dual_build(&not_mask, &mut not_marker, Grid::Hexagonal).unwrap();

        let mut expected = marker.clone();
        pixel::invert(&marker, &mut expected).unwrap();
        assert_eq!(not_marker, expected);
    }

    #[test]
    fn single_direction() {
        let mut mask = Image::new(64, 2, Depth::Byte).unwrap();
        mask.fill(100).unwrap();
        let mut marker = Image::new(64, 2, Depth::Byte).unwrap();
        marker.set_pixel(30, 0, 100).unwrap();

        build_neighbor(&mask, &mut marker, 3, Grid::Square).unwrap();
        assert_eq!(marker.get_pixel(29, 0).unwrap(), 0);
        assert_eq!(marker.get_pixel(63, 0).unwrap(), 100);
        assert_eq!(marker.get_pixel(31, 1).unwrap(), 0);

        assert_eq!(
            build_neighbor(&mask, &mut marker, 7, Grid::Hexagonal),
            Err(Error::BadDirection)
        );
    }

    #[test]
    fn single_direction_dual() {
        // A bright row with a dark marker at x = 30 and a dark mask pocket further east.
        let mut mask = Image::new(64, 2, Depth::Byte).unwrap();
        mask.set_pixel(50, 0, 40).unwrap();
        let mut marker = Image::new(64, 2, Depth::Byte).unwrap();
        marker.fill(255).unwrap();
        marker.set_pixel(30, 0, 0).unwrap();

        dual_build_neighbor(&mask, &mut marker, 7, Grid::Square).unwrap();
        // Low values travel westwards only, and never below the mask.
        assert_eq!(marker.get_pixel(0, 0).unwrap(), 0);
        assert_eq!(marker.get_pixel(29, 0).unwrap(), 0);
        assert_eq!(marker.get_pixel(31, 0).unwrap(), 255);
        assert_eq!(marker.get_pixel(50, 0).unwrap(), 255);
        assert_eq!(marker.get_pixel(30, 1).unwrap(), 255);

        let mut marker = Image::new(64, 2, Depth::Byte).unwrap();
        marker.fill(255).unwrap();
        marker.set_pixel(60, 0, 10).unwrap();
        dual_build_neighbor(&mask, &mut marker, 7, Grid::Square).unwrap();
        assert_eq!(marker.get_pixel(51, 0).unwrap(), 10);
        assert_eq!(marker.get_pixel(50, 0).unwrap(), 40);
        assert_eq!(marker.get_pixel(49, 0).unwrap(), 40);
        assert_eq!(marker.get_pixel(0, 0).unwrap(), 40);

        assert_eq!(
            dual_build_neighbor(&mask, &mut marker, 9, Grid::Square),
            Err(Error::BadDirection)
        );
    }

    #[test]
    fn word_depth() {
        let mut mask = Image::new(64, 2, Depth::Word).unwrap();
        mask.fill(1 << 30).unwrap();
        mask.set_pixel(5, 0, 0).unwrap();
        mask.set_pixel(5, 1, 0).unwrap();
        let mut marker = Image::new(64, 2, Depth::Word).unwrap();
        marker.set_pixel(0, 0, u32::MAX).unwrap();

        build(&mask, &mut marker, Grid::Square).unwrap();
        assert_eq!(marker.get_pixel(4, 1).unwrap(), 1 << 30);
        assert_eq!(marker.get_pixel(6, 1).unwrap(), 0);
    }

    #[test]
    fn rejects_cubic_grids() {
        let mask = ramp();
        let mut marker = ramp();
        assert_eq!(build(&mask, &mut marker, Grid::Cubic), Err(Error::BadParameter));
    }
}
