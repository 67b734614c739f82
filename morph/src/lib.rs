// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! # Morph
//!
//! Mathematical morphology on bit-packed binary, 8-bit and 32-bit images.
//!
//! Images are rectangles of pixels whose rows are stored as 64-bit words. Binary images pack one
//! pixel per bit, so that the point-wise and neighborhood operators work on whole words at once.
//! On top of the pixel-wise arithmetic and logic the crate offers:
//!
//! - Shifts and neighborhood operators (erosion, dilation, hit-or-miss) on the square and the
//!   hexagonal grid.
//! - Geodesic reconstruction by dilation and by erosion, driven by a hierarchical queue.
//! - Watershed segmentation, distance maps and connected component labelling.
//! - Stacks of planes with the same operators on the cubic, face-centered and body-centered
//!   cubic grids.
//!
//! Operators are free functions writing into a caller provided destination. A [`Context`] bundles
//! a [`Config`] with a [`Backend`] for code that wants to pick its defaults once.
//!
//! ## Usage
//!
//! ```
//! use image_morph::{dilate, pixel, Cpu, Depth, DirSet, Edge, Grid, Image};
//!
//! let mut dot = Image::new(64, 16, Depth::Bit)?;
//! dot.set_pixel(10, 8, 1)?;
//!
//! let mut disk = dot.like(Depth::Bit)?;
//! let grid = Grid::Hexagonal;
//! dilate(&Cpu, &dot, &mut disk, 1, DirSet::all(grid), grid, Edge::Empty)?;
//! assert_eq!(pixel::volume(&disk), 7);
//! # Ok::<(), image_morph::Error>(())
//! ```
// Be std for doctests, avoids a weird warning about missing allocator.
#![cfg_attr(not(doctest), no_std)]
#![deny(unsafe_code)]
extern crate alloc;

mod backend;
mod build;
mod config;
mod distance;
mod erode;
mod error;
mod fifo;
pub mod grid;
mod image;
mod label;
mod lattice;
pub mod layout;
pub mod pixel;
mod shift;
mod stack;
mod watershed;

pub use self::backend::{Backend, Context, Cpu};
pub use self::build::{build, build_neighbor, dual_build, dual_build_neighbor};
pub use self::config::Config;
pub use self::distance::compute_distance;
pub use self::erode::{dilate, erode, linear_dilate, linear_erode};
pub use self::error::{describe, Error, NO_ERR};
pub use self::fifo::{HierarchicalQueue, DENSE_LEVELS};
pub use self::grid::{DirSet, Edge, Grid};
pub use self::image::{live_images, Image};
pub use self::label::label;
pub use self::lattice::{Lattice, Planar, Stacked};
pub use self::layout::{Depth, ImageLayout, DEFAULT_MAX_PIXELS};
pub use self::pixel::{
    add, add_const, and, ceiling_add_const, compare, convert, crop_copy, diff, div, div_const,
    downscale_32_to_8, extract_byte_plane, floor_sub_const, histogram, insert_byte_plane, inf,
    invert, lookup, mul, mul_const, mul_real_const, or, range, sub, sub_const, sup, threshold,
    volume, xor, RealRounding,
};
pub use self::shift::{
    hit_or_miss, inf_far_neighbor, inf_neighbor, inf_vector, shift, shift_vector,
    sup_far_neighbor, sup_neighbor, sup_vector,
};
pub use self::stack::{
    add3d, basin_segment3d, build3d, compare3d, compute_distance3d, convert3d, dilate3d,
    dual_build3d, erode3d, inf3d, label3d, linear_dilate3d, linear_erode3d, mul_real_const3d,
    shift3d, sub3d, sup3d, watershed_segment3d, Stack,
};
pub use self::watershed::{
    basin_segment, marker_controlled_watershed, watershed_segment, LABEL_MASK, LINE,
};
