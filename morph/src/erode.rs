// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Erosion and dilation composed from backend kernels.
use crate::backend::Backend;
use crate::grid::{DirSet, Edge, Grid};
use crate::image::Image;
use crate::shift::check_pair;
use crate::Error;

/// Which neighbourhood reduction a pass applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    Erode,
    Dilate,
}

/// Directions to reduce over, on a grid, with the value of outside pixels.
#[derive(Clone, Copy, Debug)]
struct Element {
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
}

fn morphology<B: Backend + ?Sized>(
    backend: &B,
    src: &Image,
    dst: &mut Image,
    n: u32,
    element: Element,
    pass: Pass,
) -> Result<(), Error> {
    let Element { dirs, grid, edge } = element;
    grid.require_planar()?;
    dirs.validate(grid)?;
    check_pair(src, dst)?;
    let Some(first) = dirs.iter().next() else {
        return Err(Error::BadParameter);
    };

    if n == 0 {
        return backend.copy(src, dst);
    }

    // `dst` is only written once every pass succeeded.
    let mut out = backend.create(src.layout())?;
    let mut current = backend.create(src.layout())?;
    backend.copy(src, &mut out)?;

    let fill = edge.value(src.depth());
    let rest = dirs.without(first);
    for _ in 0..n {
        backend.copy(&out, &mut current)?;
        backend.shift(&current, &mut out, first, 1, fill, grid)?;
        match pass {
            Pass::Erode => backend.inf_neighbor(&current, &mut out, rest, grid, edge)?,
            Pass::Dilate => backend.sup_neighbor(&current, &mut out, rest, grid, edge)?,
        }
    }

    backend.copy(&out, dst)
}

/// The number of segment steps that can still reach into the image, longer walks only see the
/// edge value.
fn reach(src: &Image, n: u32) -> u32 {
    n.min(src.width().max(src.height()).saturating_add(1))
}

/// Erode `n` times by the structuring element `se`.
///
/// Each pass computes `dst(p) = min f(p + d)` over `d ∈ se`, outside pixels taking the value of
/// `edge`. An empty structuring element fails with [`Error::BadParameter`].
///
/// ```
/// use image_morph::{erode, Cpu, Depth, DirSet, Edge, Grid, Image};
///
/// let mut src = Image::new(16, 16, Depth::Byte)?;
/// src.fill(255)?;
/// src.set_pixel(8, 8, 0)?;
///
/// let mut dst = Image::new(16, 16, Depth::Byte)?;
/// let cross = DirSet::of(&[0, 1, 3, 5, 7]);
/// erode(&Cpu, &src, &mut dst, 1, cross, Grid::Square, Edge::Filled)?;
/// assert_eq!(dst.get_pixel(9, 8)?, 0);
/// assert_eq!(dst.get_pixel(9, 9)?, 255);
/// # Ok::<(), image_morph::Error>(())
/// ```
pub fn erode<B: Backend + ?Sized>(
    backend: &B,
    src: &Image,
    dst: &mut Image,
    n: u32,
    se: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    se.validate(grid)?;
    let dirs = se.transposed(grid);
    morphology(backend, src, dst, n, Element { dirs, grid, edge }, Pass::Erode)
}

/// Dilate `n` times by the structuring element `se`, `dst(p) = max f(p - d)` over `d ∈ se`.
pub fn dilate<B: Backend + ?Sized>(
    backend: &B,
    src: &Image,
    dst: &mut Image,
    n: u32,
    se: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    morphology(backend, src, dst, n, Element { dirs: se, grid, edge }, Pass::Dilate)
}

/// Erode by the segment `{0, d, 2d, …, nd}`, `dst(p) = min f(p + kd)` over `0 ≤ k ≤ n`.
pub fn linear_erode<B: Backend + ?Sized>(
    backend: &B,
    src: &Image,
    dst: &mut Image,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    grid.require_planar()?;
    grid.check_direction(d)?;
    check_pair(src, dst)?;
    let back = grid.transpose(d);

    let mut out = backend.create(src.layout())?;
    backend.copy(src, &mut out)?;
    for k in 1..=reach(src, n) {
        backend.inf_far_neighbor(src, &mut out, back, k, grid, edge)?;
    }

    backend.copy(&out, dst)
}

/// Dilate by the segment `{0, d, 2d, …, nd}`, `dst(p) = max f(p - kd)` over `0 ≤ k ≤ n`.
pub fn linear_dilate<B: Backend + ?Sized>(
    backend: &B,
    src: &Image,
    dst: &mut Image,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    grid.require_planar()?;
    grid.check_direction(d)?;
    check_pair(src, dst)?;

    let mut out = backend.create(src.layout())?;
    backend.copy(src, &mut out)?;
    for k in 1..=reach(src, n) {
        backend.sup_far_neighbor(src, &mut out, d, k, grid, edge)?;
    }

    backend.copy(&out, dst)
}
