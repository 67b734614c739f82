// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! The kernel capability set and the context binding it to defaults.
//!
//! Composed operators such as [`erode`](crate::erode()) only talk to a [`Backend`]. The [`Cpu`]
//! backend runs the kernels of this crate; other implementations may keep images elsewhere and
//! only need to provide the capabilities below. A backend is always passed explicitly.
use crate::build;
use crate::erode;
use crate::grid::{DirSet, Edge, Grid};
use crate::image::Image;
use crate::layout::{Depth, ImageLayout};
use crate::pixel;
use crate::shift;
use crate::stack::{self, Stack};
use crate::watershed;
use crate::{distance, label, Config, Error};

/// The kernels the composed operators are written against.
pub trait Backend {
    /// Allocate a zeroed image.
    fn create(&self, layout: ImageLayout) -> Result<Image, Error>;

    fn copy(&self, src: &Image, dst: &mut Image) -> Result<(), Error>;

    fn add(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error>;

    fn sub(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error>;

    fn inf(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error>;

    fn sup(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error>;

    fn shift(
        &self,
        src: &Image,
        dst: &mut Image,
        d: u32,
        n: u32,
        fill: u32,
        grid: Grid,
    ) -> Result<(), Error>;

    fn inf_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        dirs: DirSet,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error>;

    fn sup_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        dirs: DirSet,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error>;

    fn inf_far_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        d: u32,
        n: u32,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error>;

    fn sup_far_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        d: u32,
        n: u32,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error>;

    fn build(&self, mask: &Image, marker: &mut Image, grid: Grid) -> Result<(), Error>;

    fn dual_build(&self, mask: &Image, marker: &mut Image, grid: Grid) -> Result<(), Error>;
}

/// The backend running the kernels of this crate on the calling thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cpu;

impl Backend for Cpu {
    fn create(&self, layout: ImageLayout) -> Result<Image, Error> {
        Image::with_layout(layout)
    }

    fn copy(&self, src: &Image, dst: &mut Image) -> Result<(), Error> {
        dst.copy_from(src)
    }

    fn add(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
        pixel::add(a, b, dst)
    }

    fn sub(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
        pixel::sub(a, b, dst)
    }

    fn inf(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
        pixel::inf(a, b, dst)
    }

    fn sup(&self, a: &Image, b: &Image, dst: &mut Image) -> Result<(), Error> {
        pixel::sup(a, b, dst)
    }

    fn shift(
        &self,
        src: &Image,
        dst: &mut Image,
        d: u32,
        n: u32,
        fill: u32,
        grid: Grid,
    ) -> Result<(), Error> {
        shift::shift(src, dst, d, n, fill, grid)
    }

    fn inf_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        dirs: DirSet,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error> {
        shift::inf_neighbor(src, srcdst, dirs, grid, edge)
    }

    fn sup_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        dirs: DirSet,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error> {
        shift::sup_neighbor(src, srcdst, dirs, grid, edge)
    }

    fn inf_far_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        d: u32,
        n: u32,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error> {
        shift::inf_far_neighbor(src, srcdst, d, n, grid, edge)
    }

    fn sup_far_neighbor(
        &self,
        src: &Image,
        srcdst: &mut Image,
        d: u32,
        n: u32,
        grid: Grid,
        edge: Edge,
    ) -> Result<(), Error> {
        shift::sup_far_neighbor(src, srcdst, d, n, grid, edge)
    }

    fn build(&self, mask: &Image, marker: &mut Image, grid: Grid) -> Result<(), Error> {
        build::build(mask, marker, grid)
    }

    fn dual_build(&self, mask: &Image, marker: &mut Image, grid: Grid) -> Result<(), Error> {
        build::dual_build(mask, marker, grid)
    }
}

/// A backend together with the defaults of a [`Config`].
///
/// ```
/// use image_morph::{Config, Context, DirSet, Depth, Grid};
///
/// let context = Context::new(Config::default())?;
/// let mut src = context.image(16, 16, Depth::Byte)?;
/// src.fill(255)?;
/// src.set_pixel(8, 8, 0)?;
///
/// let mut dst = context.image(16, 16, Depth::Byte)?;
/// context.erode(&src, &mut dst, 1, DirSet::of(&[0, 1, 3, 5, 7]))?;
/// assert_eq!(dst.get_pixel(8, 7)?, 0);
/// assert_eq!(dst.get_pixel(7, 7)?, 255);
/// # Ok::<(), image_morph::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Context<B = Cpu> {
    config: Config,
    backend: B,
}

impl Context<Cpu> {
    /// A context running on the [`Cpu`] backend.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_backend(config, Cpu)
    }
}

impl<B: Backend> Context<B> {
    /// Bind a backend to validated defaults.
    pub fn with_backend(config: Config, backend: B) -> Result<Self, Error> {
        config.validate()?;
        Ok(Context { config, backend })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Allocate a zeroed image within the configured pixel limit.
    pub fn image(&self, width: u32, height: u32, depth: Depth) -> Result<Image, Error> {
        self.backend.create(self.config.layout(width, height, depth)?)
    }

    /// Allocate a zeroed stack within the configured pixel limit.
    pub fn stack(&self, width: u32, height: u32, len: u32, depth: Depth) -> Result<Stack, Error> {
        Stack::with_layout(self.config.layout(width, height, depth)?, len)
    }

    pub fn shift(
        &self,
        src: &Image,
        dst: &mut Image,
        d: u32,
        n: u32,
        fill: u32,
    ) -> Result<(), Error> {
        self.backend.shift(src, dst, d, n, fill, self.config.grid)
    }

    pub fn erode(&self, src: &Image, dst: &mut Image, n: u32, se: DirSet) -> Result<(), Error> {
        let Config { grid, edge, .. } = self.config;
        erode::erode(&self.backend, src, dst, n, se, grid, edge)
    }

    pub fn dilate(&self, src: &Image, dst: &mut Image, n: u32, se: DirSet) -> Result<(), Error> {
        let Config { grid, edge, .. } = self.config;
        erode::dilate(&self.backend, src, dst, n, se, grid, edge)
    }

    pub fn linear_erode(&self, src: &Image, dst: &mut Image, d: u32, n: u32) -> Result<(), Error> {
        let Config { grid, edge, .. } = self.config;
        erode::linear_erode(&self.backend, src, dst, d, n, grid, edge)
    }

    pub fn linear_dilate(&self, src: &Image, dst: &mut Image, d: u32, n: u32) -> Result<(), Error> {
        let Config { grid, edge, .. } = self.config;
        erode::linear_dilate(&self.backend, src, dst, d, n, grid, edge)
    }

    pub fn build(&self, mask: &Image, marker: &mut Image) -> Result<(), Error> {
        self.backend.build(mask, marker, self.config.grid)
    }

    pub fn dual_build(&self, mask: &Image, marker: &mut Image) -> Result<(), Error> {
        self.backend.dual_build(mask, marker, self.config.grid)
    }

    /// Multiply by a real factor with the planar rounding of the configuration.
    pub fn mul_real_const(&self, src: &Image, factor: f64, dst: &mut Image) -> Result<(), Error> {
        pixel::mul_real_const(src, factor, dst, self.config.planar_rounding())
    }

    pub fn compute_distance(&self, src: &Image, dst: &mut Image) -> Result<(), Error> {
        distance::compute_distance(src, dst, self.config.grid, self.config.edge)
    }

    pub fn label(&self, src: &Image, dst: &mut Image, lo: u32, hi: u32) -> Result<u32, Error> {
        label::label(src, dst, lo, hi, self.config.grid)
    }

    pub fn watershed_segment(
        &self,
        src: &Image,
        marker: &mut Image,
        max_level: u64,
    ) -> Result<(), Error> {
        watershed::watershed_segment(src, marker, self.config.grid, max_level)
    }

    pub fn basin_segment(
        &self,
        src: &Image,
        marker: &mut Image,
        max_level: u64,
    ) -> Result<(), Error> {
        watershed::basin_segment(src, marker, self.config.grid, max_level)
    }

    pub fn erode3d(&self, src: &Stack, dst: &mut Stack, n: u32, se: DirSet) -> Result<(), Error> {
        stack::erode3d(src, dst, n, se, self.config.grid3d, self.config.edge)
    }

    pub fn dilate3d(&self, src: &Stack, dst: &mut Stack, n: u32, se: DirSet) -> Result<(), Error> {
        stack::dilate3d(src, dst, n, se, self.config.grid3d, self.config.edge)
    }

    pub fn linear_erode3d(
        &self,
        src: &Stack,
        dst: &mut Stack,
        d: u32,
        n: u32,
    ) -> Result<(), Error> {
        stack::linear_erode3d(src, dst, d, n, self.config.grid3d, self.config.edge)
    }

    pub fn linear_dilate3d(
        &self,
        src: &Stack,
        dst: &mut Stack,
        d: u32,
        n: u32,
    ) -> Result<(), Error> {
        stack::linear_dilate3d(src, dst, d, n, self.config.grid3d, self.config.edge)
    }

    pub fn build3d(&self, mask: &Stack, marker: &mut Stack) -> Result<(), Error> {
        stack::build3d(mask, marker, self.config.grid3d)
    }

    pub fn dual_build3d(&self, mask: &Stack, marker: &mut Stack) -> Result<(), Error> {
        stack::dual_build3d(mask, marker, self.config.grid3d)
    }

    /// Multiply a stack by a real factor with the stacked rounding of the configuration.
    pub fn mul_real_const3d(&self, src: &Stack, factor: f64, dst: &mut Stack) -> Result<(), Error> {
        stack::mul_real_const3d(src, factor, dst, self.config.stacked_rounding())
    }
}
