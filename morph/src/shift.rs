// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Directional shifts and the point-wise neighbourhood reductions built on them.
//!
//! A destination row always reads a single source row, displaced horizontally by a constant. This
//! holds for hexagonal grids too since the displacement of an `n`-step walk only depends on the
//! parity of the row it starts from. All kernels therefore work row by row on unpacked `u32`
//! lines and never address single pixels.
use alloc::vec::Vec;

use crate::grid::{DirSet, Edge, Grid};
use crate::image::{zeroed, Image};
use crate::layout::Depth;
use crate::Error;

/// Where a destination row reads from: a column displacement, a row and a plane.
pub(crate) type Source = (i64, i64, i64);

/// Scratch lines for the row kernels.
pub(crate) struct Lines {
    pub(crate) acc: Vec<u32>,
    pub(crate) line: Vec<u32>,
    scratch: Vec<u32>,
}

impl Lines {
    pub(crate) fn new(width: u32) -> Result<Self, Error> {
        let width = width as usize;
        Ok(Lines {
            acc: zeroed(width)?,
            line: zeroed(width)?,
            scratch: zeroed(width)?,
        })
    }

    /// Load `line` with a displaced source row, using `fill` outside of the planes.
    pub(crate) fn fetch(&mut self, planes: &[Image], (dx, sy, sz): Source, fill: u32) {
        let Some(plane) = usize::try_from(sz).ok().and_then(|z| planes.get(z)) else {
            self.line.fill(fill);
            return;
        };

        if sy < 0 || sy >= i64::from(plane.height()) {
            self.line.fill(fill);
            return;
        }

        plane.read_row(sy as u32, &mut self.scratch);
        let width = self.line.len() as i64;
        for (x, px) in self.line.iter_mut().enumerate() {
            let sx = x as i64 + dx;
            *px = if (0..width).contains(&sx) {
                self.scratch[sx as usize]
            } else {
                fill
            };
        }
    }
}

/// A combination of an accumulated pixel with a fetched one.
pub(crate) type Combine = fn(u32, u32) -> u32;

pub(crate) fn take(_: u32, fetched: u32) -> u32 {
    fetched
}

/// Reduce displaced copies of `src` into `acc`, plane by plane and row by row.
///
/// Each step `(e, n)` reads the source at the end of an `n`-step walk along `e` from the
/// destination pixel. With no steps the accumulator is left untouched.
pub(crate) fn reduce(
    src: &[Image],
    acc: &mut [Image],
    grid: Grid,
    steps: &[(u32, u32)],
    fill: u32,
    op: Combine,
) -> Result<(), Error> {
    let Some(first) = src.first() else {
        return Ok(());
    };

    let mut lines = Lines::new(first.width())?;
    for (z, plane) in acc.iter_mut().enumerate() {
        for y in 0..plane.height() {
            plane.read_row(y, &mut lines.acc);
            for &(e, n) in steps {
                let (dx, sy, sz) = grid
                    .walk3(e, n, (0, i64::from(y), z as i64))
                    .ok_or(Error::BadDirection)?;
                lines.fetch(src, (dx, sy, sz), fill);
                for (a, &s) in lines.acc.iter_mut().zip(&lines.line) {
                    *a = op(*a, s);
                }
            }
            plane.write_row(y, &lines.acc);
        }
    }

    Ok(())
}

pub(crate) fn check_pair(src: &Image, dst: &Image) -> Result<(), Error> {
    src.layout().same_size(&dst.layout())?;
    if src.depth() == dst.depth() {
        Ok(())
    } else {
        Err(Error::BadDepth)
    }
}

pub(crate) fn check_fill(fill: u32, depth: Depth) -> Result<(), Error> {
    if fill > depth.max_value() {
        Err(Error::BadValue)
    } else {
        Ok(())
    }
}

/// Translate every pixel `n` steps along direction `d`; vacated pixels receive `fill`.
///
/// On the hexagonal grid the displacement is that of `n` unit steps, each one taking the parity
/// of the row it starts from into account.
///
/// ```
/// use image_morph::{shift, Depth, Grid, Image};
///
/// let mut src = Image::new(16, 16, Depth::Bit)?;
/// src.set_pixel(5, 5, 1)?;
///
/// let mut dst = Image::new(16, 16, Depth::Bit)?;
/// shift(&src, &mut dst, 3, 2, 0, Grid::Square)?;
/// assert_eq!(dst.get_pixel(7, 5)?, 1);
/// # Ok::<(), image_morph::Error>(())
/// ```
pub fn shift(
    src: &Image,
    dst: &mut Image,
    d: u32,
    n: u32,
    fill: u32,
    grid: Grid,
) -> Result<(), Error> {
    grid.require_planar()?;
    grid.check_direction(d)?;
    check_pair(src, dst)?;
    check_fill(fill, src.depth())?;

    let steps = [(grid.transpose(d), n)];
    reduce(
        core::slice::from_ref(src),
        core::slice::from_mut(dst),
        grid,
        &steps,
        fill,
        take,
    )
}

/// Translate every pixel by a free vector; vacated pixels receive `fill`.
pub fn shift_vector(
    src: &Image,
    dst: &mut Image,
    dx: i64,
    dy: i64,
    fill: u32,
) -> Result<(), Error> {
    check_pair(src, dst)?;
    check_fill(fill, src.depth())?;
    vector(src, dst, (dx, dy), fill, take)
}

/// `srcdst = sup(srcdst, src shifted by (dx, dy))`.
pub fn sup_vector(
    src: &Image,
    srcdst: &mut Image,
    dx: i64,
    dy: i64,
    edge: Edge,
) -> Result<(), Error> {
    check_pair(src, srcdst)?;
    vector(src, srcdst, (dx, dy), edge.value(src.depth()), u32::max)
}

/// `srcdst = inf(srcdst, src shifted by (dx, dy))`.
pub fn inf_vector(
    src: &Image,
    srcdst: &mut Image,
    dx: i64,
    dy: i64,
    edge: Edge,
) -> Result<(), Error> {
    check_pair(src, srcdst)?;
    vector(src, srcdst, (dx, dy), edge.value(src.depth()), u32::min)
}

fn vector(
    src: &Image,
    acc: &mut Image,
    (dx, dy): (i64, i64),
    fill: u32,
    op: Combine,
) -> Result<(), Error> {
    let mut lines = Lines::new(src.width())?;
    let planes = core::slice::from_ref(src);

    for y in 0..acc.height() {
        acc.read_row(y, &mut lines.acc);
        lines.fetch(planes, (-dx, i64::from(y) - dy, 0), fill);
        for (a, &s) in lines.acc.iter_mut().zip(&lines.line) {
            *a = op(*a, s);
        }
        acc.write_row(y, &lines.acc);
    }

    Ok(())
}

fn neighbor(
    src: &Image,
    srcdst: &mut Image,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
    op: Combine,
) -> Result<(), Error> {
    grid.require_planar()?;
    dirs.validate(grid)?;
    check_pair(src, srcdst)?;

    let steps: Vec<(u32, u32)> = dirs.iter().map(|d| (grid.transpose(d), 1)).collect();
    reduce(
        core::slice::from_ref(src),
        core::slice::from_mut(srcdst),
        grid,
        &steps,
        edge.value(src.depth()),
        op,
    )
}

/// For every direction `d` of `dirs`, `srcdst = sup(srcdst, shift(src, d, 1, edge))`.
///
/// The direction `0` is always legal and takes `src` itself into account. Masks naming
/// directions beyond the grid fail with [`Error::BadParameter`].
pub fn sup_neighbor(
    src: &Image,
    srcdst: &mut Image,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    neighbor(src, srcdst, dirs, grid, edge, u32::max)
}

/// For every direction `d` of `dirs`, `srcdst = inf(srcdst, shift(src, d, 1, edge))`.
pub fn inf_neighbor(
    src: &Image,
    srcdst: &mut Image,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    neighbor(src, srcdst, dirs, grid, edge, u32::min)
}

fn far_neighbor(
    src: &Image,
    srcdst: &mut Image,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
    op: Combine,
) -> Result<(), Error> {
    grid.require_planar()?;
    grid.check_direction(d)?;
    check_pair(src, srcdst)?;

    let steps = [(grid.transpose(d), n)];
    reduce(
        core::slice::from_ref(src),
        core::slice::from_mut(srcdst),
        grid,
        &steps,
        edge.value(src.depth()),
        op,
    )
}

/// `srcdst = sup(srcdst, shift(src, d, n, edge))`, the far neighbour at distance `n`.
pub fn sup_far_neighbor(
    src: &Image,
    srcdst: &mut Image,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    far_neighbor(src, srcdst, d, n, grid, edge, u32::max)
}

/// `srcdst = inf(srcdst, shift(src, d, n, edge))`, the far neighbour at distance `n`.
pub fn inf_far_neighbor(
    src: &Image,
    srcdst: &mut Image,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    far_neighbor(src, srcdst, d, n, grid, edge, u32::min)
}

/// Binary hit-or-miss transform.
///
/// A pixel `p` of `dst` is set iff `src` is set at every neighbour `p + d` with `d` in
/// `foreground` and clear at every neighbour with `d` in `background`. Off-image neighbours take
/// the value of `edge`. Overlapping sets fail with [`Error::BadParameter`].
pub fn hit_or_miss(
    src: &Image,
    dst: &mut Image,
    foreground: DirSet,
    background: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    grid.require_planar()?;
    foreground.validate(grid)?;
    background.validate(grid)?;
    if foreground.intersects(background) {
        return Err(Error::BadParameter);
    }

    check_pair(src, dst)?;
    if src.depth() != Depth::Bit {
        return Err(Error::BadDepth);
    }

    let fill = edge.value(Depth::Bit);
    let planes = core::slice::from_ref(src);
    let mut lines = Lines::new(src.width())?;
    let tests: Vec<(u32, u32)> = foreground
        .iter()
        .map(|d| (d, 1))
        .chain(background.iter().map(|d| (d, 0)))
        .collect();

    for y in 0..dst.height() {
        lines.acc.fill(1);
        for &(d, expected) in &tests {
            let source = grid
                .walk3(d, 1, (0, i64::from(y), 0))
                .ok_or(Error::BadDirection)?;
            lines.fetch(planes, source, fill);
            for (a, &s) in lines.acc.iter_mut().zip(&lines.line) {
                *a &= u32::from(s == expected);
            }
        }
        dst.write_row(y, &lines.acc);
    }

    Ok(())
}
