// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Three-dimensional images as stacks of planes.
//!
//! A [`Stack`] is a non-empty sequence of images sharing one layout. The neighbourhood operators
//! read, for every output row, the rows of the adjacent planes the grid points to. The
//! propagation operators run on a [`Stacked`] lattice over all planes at once.
use alloc::vec::Vec;

use crate::build::{self, Order};
use crate::distance;
use crate::grid::{DirSet, Edge, Grid};
use crate::image::{zeroed, Image};
use crate::label::{self, Palette};
use crate::lattice::{self, Stacked};
use crate::layout::{Depth, ImageLayout};
use crate::pixel::{self, RealRounding};
use crate::shift::{self, check_fill, take, Combine};
use crate::watershed::{self, Flood};
use crate::Error;

/// A three-dimensional image.
///
/// ```
/// use image_morph::{Depth, Stack};
///
/// let mut stack = Stack::new(16, 16, 4, Depth::Byte)?;
/// stack.set_voxel(3, 4, 2, 17)?;
/// assert_eq!(stack.get_voxel(3, 4, 2)?, 17);
/// assert_eq!(stack.len(), 4);
/// # Ok::<(), image_morph::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    planes: Vec<Image>,
}

impl Stack {
    /// Allocate `len` zeroed planes.
    pub fn new(width: u32, height: u32, len: u32, depth: Depth) -> Result<Self, Error> {
        Self::with_layout(ImageLayout::new(width, height, depth)?, len)
    }

    /// Allocate `len` zeroed planes of a validated layout.
    pub fn with_layout(layout: ImageLayout, len: u32) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::BadSize);
        }

        let mut planes = Vec::new();
        planes.try_reserve_exact(len as usize)?;
        for _ in 0..len {
            planes.push(Image::with_layout(layout)?);
        }

        Ok(Stack { planes })
    }

    /// Assemble a stack from planes of one layout.
    ///
    /// Fails with [`Error::BadSize`] without planes and with [`Error::BadImageDimensions`] if
    /// their layouts differ.
    pub fn from_planes(planes: Vec<Image>) -> Result<Self, Error> {
        let stack = Stack { planes };
        stack.check()?;
        Ok(stack)
    }

    /// Zeroed planes with the geometry of this stack and another depth.
    pub fn like(&self, depth: Depth) -> Result<Self, Error> {
        Self::with_layout(self.layout()?.with_depth(depth)?, self.len() as u32)
    }

    /// The layout shared by all planes.
    pub fn layout(&self) -> Result<ImageLayout, Error> {
        self.check()
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Stacks always hold at least one plane.
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn planes(&self) -> &[Image] {
        &self.planes
    }

    pub fn plane(&self, z: usize) -> Option<&Image> {
        self.planes.get(z)
    }

    /// A plane for modification.
    ///
    /// Replacing it by an image of another layout makes the next operator on the stack fail with
    /// [`Error::BadImageDimensions`].
    pub fn plane_mut(&mut self, z: usize) -> Option<&mut Image> {
        self.planes.get_mut(z)
    }

    pub fn into_planes(self) -> Vec<Image> {
        self.planes
    }

    pub fn reset(&mut self) {
        self.planes.iter_mut().for_each(Image::reset);
    }

    pub fn fill(&mut self, value: u32) -> Result<(), Error> {
        self.planes.iter_mut().try_for_each(|plane| plane.fill(value))
    }

    pub fn copy_from(&mut self, src: &Stack) -> Result<(), Error> {
        check_same(src, self)?;
        for (dst, src) in self.planes.iter_mut().zip(&src.planes) {
            dst.copy_from(src)?;
        }
        Ok(())
    }

    pub fn get_voxel(&self, x: u32, y: u32, z: u32) -> Result<u32, Error> {
        self.plane(z as usize)
            .ok_or(Error::BadParameter)?
            .get_pixel(x, y)
    }

    pub fn set_voxel(&mut self, x: u32, y: u32, z: u32, value: u32) -> Result<(), Error> {
        self.plane_mut(z as usize)
            .ok_or(Error::BadParameter)?
            .set_pixel(x, y, value)
    }

    fn check(&self) -> Result<ImageLayout, Error> {
        let first = self.planes.first().ok_or(Error::BadSize)?.layout();
        if self.planes.iter().any(|plane| plane.layout() != first) {
            return Err(Error::BadImageDimensions);
        }

        Ok(first)
    }

    fn lattice(&self, grid: Grid) -> Result<Stacked, Error> {
        let layout = self.check()?;
        Stacked::new(layout.width(), layout.height(), self.len() as u32, grid)
    }
}

/// Check that two stacks have the same geometry, regardless of depth.
fn check_shape(a: &Stack, b: &Stack) -> Result<(), Error> {
    let (la, lb) = (a.check()?, b.check()?);
    if a.len() != b.len() {
        return Err(Error::BadImageDimensions);
    }

    la.same_size(&lb)
}

fn check_same(a: &Stack, b: &Stack) -> Result<(), Error> {
    check_shape(a, b)?;
    if a.check()?.depth() == b.check()?.depth() {
        Ok(())
    } else {
        Err(Error::BadDepth)
    }
}

/// Translate every voxel `n` steps along direction `d` of a cubic grid.
///
/// Every step takes the parity of the plane and of the row it starts from into account. Vacated
/// voxels, including whole planes, receive `fill`.
pub fn shift3d(
    src: &Stack,
    dst: &mut Stack,
    d: u32,
    n: u32,
    fill: u32,
    grid: Grid,
) -> Result<(), Error> {
    grid.require_cubic()?;
    grid.check_direction(d)?;
    check_same(src, dst)?;
    check_fill(fill, src.check()?.depth())?;

    let steps = [(grid.transpose(d), n)];
    shift::reduce(&src.planes, &mut dst.planes, grid, &steps, fill, take)
}

/// One more than the largest extent of the stack.
fn walk_limit(stack: &Stack) -> Result<u32, Error> {
    let layout = stack.check()?;
    let largest = layout.width().max(layout.height()).max(stack.len() as u32);
    Ok(largest.saturating_add(1))
}

fn morphology3d(
    src: &Stack,
    dst: &mut Stack,
    n: u32,
    se: DirSet,
    grid: Grid,
    edge: Edge,
    erode: bool,
) -> Result<(), Error> {
    grid.require_cubic()?;
    se.validate(grid)?;
    if se.is_empty() {
        return Err(Error::BadParameter);
    }
    check_same(src, dst)?;

    let depth = src.check()?.depth();
    let op: Combine = if erode { u32::min } else { u32::max };
    let start = if erode { depth.max_value() } else { 0 };
    let steps: Vec<(u32, u32)> = se
        .iter()
        .map(|d| if erode { (d, 1) } else { (grid.transpose(d), 1) })
        .collect();

    let mut out = src.like(depth)?;
    let mut current = src.like(depth)?;
    out.copy_from(src)?;
    for _ in 0..n {
        current.copy_from(&out)?;
        out.fill(start)?;
        shift::reduce(&current.planes, &mut out.planes, grid, &steps, edge.value(depth), op)?;
    }

    dst.copy_from(&out)
}

/// Erode `n` times by the structuring element `se`, `dst(p) = min f(p + d)` over `d ∈ se`.
pub fn erode3d(
    src: &Stack,
    dst: &mut Stack,
    n: u32,
    se: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    morphology3d(src, dst, n, se, grid, edge, true)
}

/// Dilate `n` times by the structuring element `se`, `dst(p) = max f(p - d)` over `d ∈ se`.
pub fn dilate3d(
    src: &Stack,
    dst: &mut Stack,
    n: u32,
    se: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    morphology3d(src, dst, n, se, grid, edge, false)
}

fn linear3d(
    src: &Stack,
    dst: &mut Stack,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
    erode: bool,
) -> Result<(), Error> {
    grid.require_cubic()?;
    grid.check_direction(d)?;
    check_same(src, dst)?;

    let depth = src.check()?.depth();
    let op: Combine = if erode { u32::min } else { u32::max };
    let e = if erode { d } else { grid.transpose(d) };

    // Walks longer than every extent only fetch the edge value.
    let extent = walk_limit(src)?;
    let steps: Vec<(u32, u32)> = (1..=n.min(extent)).map(|k| (e, k)).collect();
    let mut out = src.like(depth)?;
    out.copy_from(src)?;
    shift::reduce(&src.planes, &mut out.planes, grid, &steps, edge.value(depth), op)?;
    dst.copy_from(&out)
}

/// Erode by the segment `{0, d, 2d, …, nd}`.
pub fn linear_erode3d(
    src: &Stack,
    dst: &mut Stack,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    linear3d(src, dst, d, n, grid, edge, true)
}

/// Dilate by the segment `{0, d, 2d, …, nd}`.
pub fn linear_dilate3d(
    src: &Stack,
    dst: &mut Stack,
    d: u32,
    n: u32,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    linear3d(src, dst, d, n, grid, edge, false)
}

fn reconstruct3d(mask: &Stack, marker: &mut Stack, grid: Grid, order: Order) -> Result<(), Error> {
    if !matches!(grid, Grid::Cubic | Grid::FaceCenterCubic) {
        return Err(Error::BadParameter);
    }

    let lattice = mask.lattice(grid)?;
    check_same(mask, marker)?;

    let bounds = lattice::load(&mask.planes)?;
    let mut values = lattice::load(&marker.planes)?;
    let depth = mask.check()?.depth();
    build::reconstruct(&lattice, DirSet::neighbours(grid), &bounds, &mut values, depth, order)?;
    lattice::store(&values, &mut marker.planes);
    Ok(())
}

/// Geodesic reconstruction of `marker` under `mask` on the cubic or face centred cubic grid.
pub fn build3d(mask: &Stack, marker: &mut Stack, grid: Grid) -> Result<(), Error> {
    reconstruct3d(mask, marker, grid, Order::Build)
}

/// Dual geodesic reconstruction of `marker` above `mask`.
pub fn dual_build3d(mask: &Stack, marker: &mut Stack, grid: Grid) -> Result<(), Error> {
    reconstruct3d(mask, marker, grid, Order::Dual)
}

/// The distance of every set voxel of a binary stack to the background.
pub fn compute_distance3d(
    src: &Stack,
    dst: &mut Stack,
    grid: Grid,
    edge: Edge,
) -> Result<(), Error> {
    let lattice = src.lattice(grid)?;
    check_shape(src, dst)?;
    if src.check()?.depth() != Depth::Bit || dst.check()?.depth() != Depth::Word {
        return Err(Error::BadDepth);
    }

    let mut values = lattice::load(&src.planes)?;
    distance::propagate(&lattice, &mut values, edge)?;
    lattice::store(&values, &mut dst.planes);
    Ok(())
}

fn segment3d(
    src: &Stack,
    marker: &mut Stack,
    grid: Grid,
    max_level: u64,
    mode: Flood,
) -> Result<(), Error> {
    let lattice = src.lattice(grid)?;
    check_shape(src, marker)?;
    if marker.check()?.depth() != Depth::Word {
        return Err(Error::BadDepth);
    }

    let depth = src.check()?.depth();
    watershed::check_levels(depth, max_level)?;

    let levels = lattice::load(&src.planes)?;
    let mut labels = lattice::load(&marker.planes)?;
    watershed::flood(&lattice, &levels, &mut labels, depth, max_level, mode)?;
    lattice::store(&labels, &mut marker.planes);
    Ok(())
}

/// Watershed segmentation of a stack, see [`watershed_segment`](crate::watershed_segment).
pub fn watershed_segment3d(
    src: &Stack,
    marker: &mut Stack,
    grid: Grid,
    max_level: u64,
) -> Result<(), Error> {
    segment3d(src, marker, grid, max_level, Flood::Lines)
}

/// Basin segmentation of a stack, see [`basin_segment`](crate::basin_segment).
pub fn basin_segment3d(
    src: &Stack,
    marker: &mut Stack,
    grid: Grid,
    max_level: u64,
) -> Result<(), Error> {
    segment3d(src, marker, grid, max_level, Flood::Basins)
}

/// Label the connected components of a stack, see [`label`](crate::label()).
pub fn label3d(src: &Stack, dst: &mut Stack, lo: u32, hi: u32, grid: Grid) -> Result<u32, Error> {
    let lattice = src.lattice(grid)?;
    check_shape(src, dst)?;
    if dst.check()?.depth() != Depth::Word {
        return Err(Error::BadDepth);
    }

    let palette = Palette::new(lo, hi)?;
    let values = lattice::load(&src.planes)?;
    let mut labels: Vec<u32> = zeroed(values.len())?;
    let count = label::components(&lattice, &values, &mut labels, &palette)?;
    lattice::store(&labels, &mut dst.planes);
    Ok(count)
}

type PlaneOp = fn(&Image, &Image, &mut Image) -> Result<(), Error>;

fn planewise(a: &Stack, b: &Stack, dst: &mut Stack, op: PlaneOp) -> Result<(), Error> {
    check_shape(a, b)?;
    check_shape(a, dst)?;
    for ((a, b), dst) in a.planes.iter().zip(&b.planes).zip(&mut dst.planes) {
        op(a, b, dst)?;
    }
    Ok(())
}

/// Plane-wise [`add`](crate::add).
pub fn add3d(a: &Stack, b: &Stack, dst: &mut Stack) -> Result<(), Error> {
    planewise(a, b, dst, pixel::add)
}

/// Plane-wise [`sub`](crate::sub).
pub fn sub3d(a: &Stack, b: &Stack, dst: &mut Stack) -> Result<(), Error> {
    planewise(a, b, dst, pixel::sub)
}

/// Plane-wise [`inf`](crate::inf).
pub fn inf3d(a: &Stack, b: &Stack, dst: &mut Stack) -> Result<(), Error> {
    planewise(a, b, dst, pixel::inf)
}

/// Plane-wise [`sup`](crate::sup).
pub fn sup3d(a: &Stack, b: &Stack, dst: &mut Stack) -> Result<(), Error> {
    planewise(a, b, dst, pixel::sup)
}

/// Plane-wise [`mul_real_const`](crate::mul_real_const).
pub fn mul_real_const3d(
    src: &Stack,
    factor: f64,
    dst: &mut Stack,
    rounding: RealRounding,
) -> Result<(), Error> {
    check_shape(src, dst)?;
    for (src, dst) in src.planes.iter().zip(&mut dst.planes) {
        pixel::mul_real_const(src, factor, dst, rounding)?;
    }
    Ok(())
}

/// Plane-wise [`convert`](crate::convert).
pub fn convert3d(src: &Stack, dst: &mut Stack) -> Result<(), Error> {
    check_shape(src, dst)?;
    for (src, dst) in src.planes.iter().zip(&mut dst.planes) {
        pixel::convert(src, dst)?;
    }
    Ok(())
}

/// Copy `a` into `out` and find the first differing voxel, planes in order.
pub fn compare3d(a: &Stack, b: &Stack, out: &mut Stack) -> Result<Option<(u32, u32, u32)>, Error> {
    check_same(a, b)?;
    check_same(a, out)?;

    let mut first = None;
    for (z, ((a, b), out)) in a.planes.iter().zip(&b.planes).zip(&mut out.planes).enumerate() {
        let found = pixel::compare(a, b, out)?;
        if first.is_none() {
            first = found.map(|(x, y)| (x, y, z as u32));
        }
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watershed::LINE;

    fn point(depth: Depth, (x, y, z): (u32, u32, u32), value: u32) -> Stack {
        let mut stack = Stack::new(64, 8, 5, depth).unwrap();
        stack.set_voxel(x, y, z, value).unwrap();
        stack
    }

    fn count_set(stack: &Stack) -> u64 {
        stack.planes().iter().map(pixel::volume).sum()
    }

    #[test]
    fn construction() {
        assert_eq!(Stack::new(64, 8, 0, Depth::Byte), Err(Error::BadSize));

        let planes = alloc::vec![
            Image::new(64, 8, Depth::Byte).unwrap(),
            Image::new(64, 10, Depth::Byte).unwrap(),
        ];
        assert_eq!(Stack::from_planes(planes), Err(Error::BadImageDimensions));

        let mut stack = Stack::new(64, 8, 2, Depth::Byte).unwrap();
        *stack.plane_mut(1).unwrap() = Image::new(64, 8, Depth::Word).unwrap();
        assert_eq!(stack.layout(), Err(Error::BadImageDimensions));
    }

    #[test]
    fn shift_across_planes() {
        let src = point(Depth::Bit, (10, 4, 1), 1);
        let mut dst = src.like(Depth::Bit).unwrap();

        shift3d(&src, &mut dst, 12, 2, 0, Grid::Cubic).unwrap();
        assert_eq!(dst.get_voxel(12, 4, 3).unwrap(), 1);
        assert_eq!(count_set(&dst), 1);

        shift3d(&src, &mut dst, 9, 2, 0, Grid::Cubic).unwrap();
        assert_eq!(dst.get_voxel(10, 4, 3).unwrap(), 1);

        shift3d(&src, &mut dst, 18, 5, 0, Grid::Cubic).unwrap();
        assert_eq!(count_set(&dst), 0);

        // From the odd plane 1 upwards through the second entry moves east, then west.
        shift3d(&src, &mut dst, 10, 2, 0, Grid::CenterCubic).unwrap();
        assert_eq!(dst.get_voxel(10, 4, 3).unwrap(), 1);
        shift3d(&src, &mut dst, 10, 1, 0, Grid::CenterCubic).unwrap();
        assert_eq!(dst.get_voxel(11, 4, 2).unwrap(), 1);

        assert_eq!(
            shift3d(&src, &mut dst, 1, 1, 0, Grid::Square),
            Err(Error::BadParameter)
        );
    }

    #[test]
    fn face_centred_shifts() {
        let src = point(Depth::Bit, (10, 4, 1), 1);
        let mut dst = src.like(Depth::Bit).unwrap();
        let grid = Grid::FaceCenterCubic;

        shift3d(&src, &mut dst, 7, 2, 0, grid).unwrap();
        assert_eq!(dst.get_voxel(10, 4, 3).unwrap(), 1);
        assert_eq!(count_set(&dst), 1);

        // Up and south-west, the row parity alternates between the two steps.
        shift3d(&src, &mut dst, 8, 2, 0, grid).unwrap();
        assert_eq!(dst.get_voxel(9, 6, 3).unwrap(), 1);
        assert_eq!(count_set(&dst), 1);
        assert_eq!(grid.walk3(8, 2, (10, 4, 1)), Some((9, 6, 3)));

        shift3d(&src, &mut dst, 11, 1, 0, grid).unwrap();
        assert_eq!(dst.get_voxel(10, 3, 0).unwrap(), 1);
        shift3d(&src, &mut dst, 11, 2, 0, grid).unwrap();
        assert_eq!(count_set(&dst), 0);

        assert_eq!(shift3d(&src, &mut dst, 13, 1, 0, grid), Err(Error::BadDirection));
    }

    #[test]
    fn long_segments_saturate() {
        let src = point(Depth::Byte, (20, 4, 2), 9);
        let mut dst = src.like(Depth::Byte).unwrap();
        linear_dilate3d(&src, &mut dst, 12, u32::MAX, Grid::Cubic, Edge::Empty).unwrap();
        let mut short = src.like(Depth::Byte).unwrap();
        linear_dilate3d(&src, &mut short, 12, 200, Grid::Cubic, Edge::Empty).unwrap();
        assert_eq!(dst, short);
        assert_eq!(count_set(&dst), 9 * 3);
    }

    #[test]
    fn dilation_counts_the_ball() {
        for (grid, size) in [
            (Grid::Cubic, 27),
            (Grid::FaceCenterCubic, 13),
            (Grid::CenterCubic, 17),
        ] {
            let src = point(Depth::Byte, (20, 4, 2), 9);
            let mut dst = src.like(Depth::Byte).unwrap();
            dilate3d(&src, &mut dst, 1, DirSet::all(grid), grid, Edge::Empty).unwrap();
            assert_eq!(count_set(&dst), 9 * size, "{:?}", grid);

            let mut back = src.like(Depth::Byte).unwrap();
            erode3d(&dst, &mut back, 1, DirSet::all(grid), grid, Edge::Empty).unwrap();
            assert_eq!(back, src, "{:?}", grid);
        }
    }

    #[test]
    fn linear_segments() {
        let src = point(Depth::Bit, (20, 4, 0), 1);
        let mut dst = src.like(Depth::Bit).unwrap();
        linear_dilate3d(&src, &mut dst, 9, 3, Grid::Cubic, Edge::Empty).unwrap();
        assert_eq!(count_set(&dst), 4);
        assert_eq!(dst.get_voxel(20, 4, 3).unwrap(), 1);

        let mut back = src.like(Depth::Bit).unwrap();
        linear_erode3d(&dst, &mut back, 9, 3, Grid::Cubic, Edge::Empty).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn reconstruction_through_planes() {
        let mut mask = Stack::new(64, 8, 5, Depth::Byte).unwrap();
        for z in 0..5 {
            mask.set_voxel(3, 3, z, 60).unwrap();
        }
        let mut marker = point(Depth::Byte, (3, 3, 0), 200);

        build3d(&mask, &mut marker, Grid::Cubic).unwrap();
        assert_eq!(marker.get_voxel(3, 3, 4).unwrap(), 60);
        assert_eq!(marker.get_voxel(4, 3, 4).unwrap(), 0);

        assert_eq!(
            build3d(&mask, &mut marker, Grid::CenterCubic),
            Err(Error::BadParameter)
        );
    }

    #[test]
    fn dual_reconstruction_through_planes() {
        for grid in [Grid::Cubic, Grid::FaceCenterCubic] {
            let mut mask = Stack::new(64, 8, 5, Depth::Byte).unwrap();
            mask.fill(200).unwrap();
            for z in 0..5 {
                mask.set_voxel(3, 3, z, 20).unwrap();
            }
            let mut marker = Stack::new(64, 8, 5, Depth::Byte).unwrap();
            marker.fill(255).unwrap();
            marker.set_voxel(3, 3, 0, 0).unwrap();

            dual_build3d(&mask, &mut marker, grid).unwrap();
            assert_eq!(marker.get_voxel(3, 3, 0).unwrap(), 20, "{:?}", grid);
            assert_eq!(marker.get_voxel(3, 3, 4).unwrap(), 20, "{:?}", grid);
            assert_eq!(marker.get_voxel(4, 3, 4).unwrap(), 200, "{:?}", grid);
            assert_eq!(marker.get_voxel(63, 7, 2).unwrap(), 200, "{:?}", grid);
        }

        let mask = Stack::new(64, 8, 5, Depth::Byte).unwrap();
        let mut marker = mask.clone();
        assert_eq!(
            dual_build3d(&mask, &mut marker, Grid::CenterCubic),
            Err(Error::BadParameter)
        );
    }

    #[test]
    fn watershed_between_planes() {
        let mut relief = Stack::new(64, 8, 4, Depth::Byte).unwrap();
        relief.plane_mut(2).unwrap().fill(255).unwrap();

        let mut marker = Stack::new(64, 8, 4, Depth::Word).unwrap();
        marker.set_voxel(5, 5, 0, 1).unwrap();
        marker.set_voxel(5, 5, 3, 2).unwrap();
        watershed_segment3d(&relief, &mut marker, Grid::Cubic, 256).unwrap();

        for (z, expected) in [(0, 1), (1, 1), (2, LINE), (3, 2)] {
            for (x, y) in [(0, 0), (5, 5), (63, 7)] {
                assert_eq!(marker.get_voxel(x, y, z).unwrap(), expected, "at {:?}", (x, y, z));
            }
        }

        // Capped below the wall, the wall keeps its input labels.
        let mut capped = Stack::new(64, 8, 4, Depth::Word).unwrap();
        capped.set_voxel(5, 5, 0, 1).unwrap();
        capped.set_voxel(5, 5, 3, 2).unwrap();
        watershed_segment3d(&relief, &mut capped, Grid::Cubic, 255).unwrap();
        assert_eq!(capped.get_voxel(5, 5, 2).unwrap(), 0);
        assert_eq!(capped.get_voxel(60, 1, 1).unwrap(), 1);
        assert_eq!(capped.get_voxel(60, 1, 3).unwrap(), 2);
    }

    #[test]
    fn distance_in_a_box() {
        let mut src = Stack::new(64, 8, 5, Depth::Bit).unwrap();
        src.fill(1).unwrap();
        let mut dst = src.like(Depth::Word).unwrap();

        compute_distance3d(&src, &mut dst, Grid::Cubic, Edge::Empty).unwrap();
        assert_eq!(dst.get_voxel(10, 4, 0).unwrap(), 1);
        assert_eq!(dst.get_voxel(10, 4, 2).unwrap(), 3);

        compute_distance3d(&src, &mut dst, Grid::Cubic, Edge::Filled).unwrap();
        assert_eq!(count_set(&dst), 0);
    }

    #[test]
    fn labels_and_basins() {
        let mut src = Stack::new(64, 8, 4, Depth::Bit).unwrap();
        src.set_voxel(5, 5, 0, 1).unwrap();
        src.set_voxel(6, 6, 1, 1).unwrap();
        src.set_voxel(30, 5, 3, 1).unwrap();

        let mut labels = src.like(Depth::Word).unwrap();
        assert_eq!(label3d(&src, &mut labels, 1, 256, Grid::Cubic).unwrap(), 2);

        let relief = Stack::new(64, 8, 4, Depth::Byte).unwrap();
        basin_segment3d(&relief, &mut labels, Grid::Cubic, 256).unwrap();
        assert_eq!(labels.get_voxel(0, 0, 0).unwrap(), 1);
        assert_eq!(labels.get_voxel(63, 7, 3).unwrap(), 2);
    }

    #[test]
    fn planewise_arithmetic() {
        let a = point(Depth::Byte, (1, 1, 4), 100);
        let b = point(Depth::Byte, (1, 1, 4), 200);
        let mut dst = a.like(Depth::Byte).unwrap();
        add3d(&a, &b, &mut dst).unwrap();
        assert_eq!(dst.get_voxel(1, 1, 4).unwrap(), 255);

        mul_real_const3d(&a, 0.125, &mut dst, RealRounding::Nearest).unwrap();
        assert_eq!(dst.get_voxel(1, 1, 4).unwrap(), 13);

        assert_eq!(compare3d(&a, &b, &mut dst).unwrap(), Some((1, 1, 4)));
        assert_eq!(compare3d(&a, &a, &mut dst).unwrap(), None);
    }
}
