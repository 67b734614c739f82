// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Watershed segmentation by flooding.
//!
//! Markers are word images. The low 24 bits hold a label, zero meaning unlabelled, and the high
//! byte is the line mask: [`LINE`] marks a pixel where two basins meet, its label bits are zero.
use alloc::vec::Vec;
use log::{debug, warn};

use crate::fifo::HierarchicalQueue;
use crate::grid::Grid;
use crate::image::{zeroed, Image};
use crate::label;
use crate::lattice::{self, Lattice, Planar};
use crate::layout::Depth;
use crate::Error;

/// The marker value of a watershed line pixel.
pub const LINE: u32 = 0xff00_0000;

/// The label bits of a marker pixel.
pub const LABEL_MASK: u32 = 0x00ff_ffff;

/// Whether meeting basins leave a line between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flood {
    Lines,
    Basins,
}

/// Check the topographic depth and the flooding cap, which excludes its own level.
pub(crate) fn check_levels(depth: Depth, max_level: u64) -> Result<(), Error> {
    let limit = match depth {
        Depth::Byte => 1 << 8,
        Depth::Word => 1 << 32,
        Depth::Bit => return Err(Error::BadDepth),
    };

    if max_level > limit {
        warn!("watershed level cap {} exceeds {} for {:?} images", max_level, limit, depth);
        return Err(Error::BadValue);
    }

    Ok(())
}

/// Flood `labels` over the relief `levels`, every level below `max_level`.
pub(crate) fn flood<L: Lattice>(
    lattice: &L,
    levels: &[u32],
    labels: &mut [u32],
    depth: Depth,
    max_level: u64,
    mode: Flood,
) -> Result<(), Error> {
    // The label of the pixel that queued each entry, zero while unqueued.
    let mut reach: Vec<u32> = zeroed(lattice.len())?;
    let mut queue = HierarchicalQueue::for_depth(depth);

    for p in 0..lattice.len() {
        labels[p] &= LABEL_MASK;
        if labels[p] != 0 {
            reach[p] = labels[p];
            queue.push(levels[p], p)?;
        }
    }

    let seeds = queue.len();
    let (mut flooded, mut lines) = (0usize, 0usize);
    while let Some((level, p)) = queue.pop() {
        if u64::from(level) >= max_level {
            break;
        }

        let label = if labels[p] != 0 {
            labels[p]
        } else {
            let mut found = 0;
            let mut meets = false;
            for d in 1..=lattice.directions() {
                let Some(q) = lattice.neighbour(p, d) else {
                    continue;
                };

                let label = labels[q];
                if label == 0 || label == LINE {
                    continue;
                }

                if found == 0 {
                    found = label;
                } else if found != label {
                    meets = true;
                }
            }

            // Only reached across a line, continue the basin that queued it.
            if found == 0 {
                found = reach[p];
            }

            if meets {
                labels[p] = LINE;
                lines += 1;
            } else {
                labels[p] = found;
            }

            found
        };

        flooded += 1;
        for d in 1..=lattice.directions() {
            let Some(q) = lattice.neighbour(p, d) else {
                continue;
            };

            if reach[q] != 0 || u64::from(levels[q]) >= max_level {
                continue;
            }

            reach[q] = label;
            if mode == Flood::Basins {
                labels[q] = label;
            }
            queue.push(levels[q], q)?;
        }
    }

    debug!(
        "{:?} flooding: {} seeds, {} pixels flooded, {} line pixels",
        mode, seeds, flooded, lines
    );
    Ok(())
}

fn segment(
    src: &Image,
    marker: &mut Image,
    grid: Grid,
    max_level: u64,
    mode: Flood,
) -> Result<(), Error> {
    let lattice = Planar::of(src, grid)?;
    src.layout().same_size(&marker.layout())?;
    if marker.depth() != Depth::Word {
        return Err(Error::BadDepth);
    }
    check_levels(src.depth(), max_level)?;

    let levels = lattice::load([src])?;
    let mut labels = lattice::load([&*marker])?;
    flood(&lattice, &levels, &mut labels, src.depth(), max_level, mode)?;
    lattice::store(&labels, [marker]);
    Ok(())
}

/// Flood the labels of `marker` over the relief `src` and mark where basins meet.
///
/// `src` is a byte or word image, `marker` a word image whose low 24 bits hold the seed labels.
/// Levels are flooded in ascending order, first-in first-out within a level, up to but excluding
/// `max_level`. Pixels left unflooded keep their input label. A pixel whose labelled neighbours
/// disagree when it is reached becomes a line pixel, [`LINE`]. Flooding carries on past line
/// pixels, whatever lies only behind a line continues the basin that reached the line first.
///
/// `max_level` is at most 256 for byte reliefs and 2³² for word reliefs; larger caps fail with
/// [`Error::BadValue`].
pub fn watershed_segment(
    src: &Image,
    marker: &mut Image,
    grid: Grid,
    max_level: u64,
) -> Result<(), Error> {
    segment(src, marker, grid, max_level, Flood::Lines)
}

/// Flood the labels of `marker` over the relief `src` without producing lines.
///
/// Every flooded pixel takes the label of the basin that reached it first.
pub fn basin_segment(
    src: &Image,
    marker: &mut Image,
    grid: Grid,
    max_level: u64,
) -> Result<(), Error> {
    segment(src, marker, grid, max_level, Flood::Basins)
}

/// The full range of levels of a relief depth.
pub(crate) fn full_range(depth: Depth) -> u64 {
    u64::from(depth.max_value()) + 1
}

/// Label the binary `marker`, flood the relief completely and extract a result.
///
/// A binary `dst` receives the watershed lines, a byte `dst` the low byte of the basin labels and
/// a word `dst` the labels themselves. Returns the number of basins.
pub fn marker_controlled_watershed(
    src: &Image,
    marker: &Image,
    dst: &mut Image,
    grid: Grid,
) -> Result<u32, Error> {
    src.layout().same_size(&dst.layout())?;
    let mut work = marker.like(Depth::Word)?;
    let basins = label::label(marker, &mut work, 1, 256, grid)?;
    watershed_segment(src, &mut work, grid, full_range(src.depth()))?;

    let extract: fn(u32) -> u32 = match dst.depth() {
        Depth::Bit => |px: u32| u32::from(px == LINE),
        Depth::Byte => |px: u32| px & 0xff,
        Depth::Word => |px: u32| px & LABEL_MASK,
    };

    let mut line: Vec<u32> = zeroed(src.width() as usize)?;
    for y in 0..src.height() {
        work.read_row(y, &mut line);
        line.iter_mut().for_each(|px| *px = extract(*px));
        dst.write_row(y, &line);
    }

    Ok(basins)
}
