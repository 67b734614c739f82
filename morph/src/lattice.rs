// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Pixel graphs for the propagation operators.
//!
//! The geodesic operators only ever ask for the neighbours of a pixel. Writing them against
//! [`Lattice`] lets one implementation serve single images and stacks of planes alike. Pixels are
//! addressed by a flat index, `x + width · (y + height · z)`.
use alloc::vec::Vec;

use crate::grid::Grid;
use crate::image::{zeroed, Image};
use crate::Error;

/// A finite set of pixels with a neighbour relation.
pub trait Lattice {
    /// The number of pixels.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of directions, not counting the centre.
    fn directions(&self) -> u32;

    /// The neighbour of a pixel in direction `d`, `None` if it lies outside.
    fn neighbour(&self, index: usize, d: u32) -> Option<usize>;

    /// Whether some neighbour of a pixel lies outside.
    fn on_border(&self, index: usize) -> bool {
        (1..=self.directions()).any(|d| self.neighbour(index, d).is_none())
    }
}

/// The pixels of a single image on a planar grid.
#[derive(Clone, Copy, Debug)]
pub struct Planar {
    width: u32,
    height: u32,
    grid: Grid,
}

/// The pixels of a stack of planes on a cubic grid.
#[derive(Clone, Copy, Debug)]
pub struct Stacked {
    width: u32,
    height: u32,
    planes: u32,
    grid: Grid,
}

impl Planar {
    pub fn new(width: u32, height: u32, grid: Grid) -> Result<Self, Error> {
        grid.require_planar()?;
        Ok(Planar {
            width,
            height,
            grid,
        })
    }

    pub fn of(image: &Image, grid: Grid) -> Result<Self, Error> {
        Self::new(image.width(), image.height(), grid)
    }
}

impl Stacked {
    pub fn new(width: u32, height: u32, planes: u32, grid: Grid) -> Result<Self, Error> {
        grid.require_cubic()?;
        Ok(Stacked {
            width,
            height,
            planes,
            grid,
        })
    }
}

impl Lattice for Planar {
    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn directions(&self) -> u32 {
        self.grid.neighbours()
    }

    fn neighbour(&self, index: usize, d: u32) -> Option<usize> {
        let width = self.width as usize;
        let (x, y) = ((index % width) as i64, (index / width) as i64);
        let (dx, dy) = self.grid.offset(d, y)?;
        let (nx, ny) = (x + dx, y + dy);

        if nx < 0 || ny < 0 || nx >= i64::from(self.width) || ny >= i64::from(self.height) {
            return None;
        }

        Some(nx as usize + width * ny as usize)
    }
}

impl Lattice for Stacked {
    fn len(&self) -> usize {
        self.width as usize * self.height as usize * self.planes as usize
    }

    fn directions(&self) -> u32 {
        self.grid.neighbours()
    }

    fn neighbour(&self, index: usize, d: u32) -> Option<usize> {
        let width = self.width as usize;
        let plane = width * self.height as usize;
        let z = (index / plane) as i64;
        let y = (index % plane / width) as i64;
        let x = (index % width) as i64;

        let (nx, ny, nz) = self.grid.walk3(d, 1, (x, y, z))?;
        if nx < 0 || ny < 0 || nz < 0 {
            return None;
        }

        if nx >= i64::from(self.width)
            || ny >= i64::from(self.height)
            || nz >= i64::from(self.planes)
        {
            return None;
        }

        Some(nx as usize + width * (ny as usize + self.height as usize * nz as usize))
    }
}

/// Unpack the pixels of a sequence of planes into one flat work buffer.
pub(crate) fn load<'a>(planes: impl IntoIterator<Item = &'a Image>) -> Result<Vec<u32>, Error> {
    let mut values = Vec::new();
    for image in planes {
        let width = image.width() as usize;
        let start = values.len();
        values.try_reserve_exact(image.layout().len())?;
        values.resize(start + image.layout().len(), 0);

        for (y, row) in values[start..].chunks_exact_mut(width).enumerate() {
            image.read_row(y as u32, row);
        }
    }

    Ok(values)
}

/// Pack a flat work buffer back into the planes it was loaded from.
pub(crate) fn store<'a>(values: &[u32], planes: impl IntoIterator<Item = &'a mut Image>) {
    let mut rest = values;
    for image in planes {
        let width = image.width() as usize;
        let (head, tail) = rest.split_at(image.layout().len());
        for (y, row) in head.chunks_exact(width).enumerate() {
            image.write_row(y as u32, row);
        }
        rest = tail;
    }
}

/// A flat buffer of per-pixel flags.
pub(crate) fn flags(len: usize) -> Result<Vec<bool>, Error> {
    zeroed(len)
}
