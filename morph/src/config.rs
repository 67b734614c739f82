// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Defaults shared by the operators of a [`Context`](crate::Context).
use crate::grid::{Edge, Grid};
use crate::image::Image;
use crate::layout::{Depth, ImageLayout, DEFAULT_MAX_PIXELS};
use crate::pixel::RealRounding;
use crate::Error;

/// Operator defaults.
///
/// With the `serde` feature every field may be omitted from a serialized configuration and takes
/// its default value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The grid of planar operators.
    pub grid: Grid,
    /// The grid of operators on stacks.
    pub grid3d: Grid,
    /// The value of pixels outside of images.
    pub edge: Edge,
    /// Rounding of real-valued products.
    ///
    /// - `None` (default): floor on images, nearest on stacks (legacy behavior).
    /// - `Some(r)`: `r` everywhere.
    pub rounding: Option<RealRounding>,
    /// The largest number of pixels of an image or of a single plane.
    pub max_pixels: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid: Grid::Square,
            grid3d: Grid::Cubic,
            edge: Edge::Filled,
            rounding: None,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_grid(self, grid: Grid) -> Self {
        Config { grid, ..self }
    }

    #[must_use]
    pub fn with_grid3d(self, grid3d: Grid) -> Self {
        Config { grid3d, ..self }
    }

    #[must_use]
    pub fn with_edge(self, edge: Edge) -> Self {
        Config { edge, ..self }
    }

    #[must_use]
    pub fn with_rounding(self, rounding: RealRounding) -> Self {
        Config {
            rounding: Some(rounding),
            ..self
        }
    }

    #[must_use]
    pub fn with_max_pixels(self, max_pixels: u64) -> Self {
        Config { max_pixels, ..self }
    }

    /// Fail with [`Error::BadParameter`] if a grid does not fit its role or the pixel limit is
    /// zero.
    pub fn validate(&self) -> Result<(), Error> {
        self.grid.require_planar()?;
        self.grid3d.require_cubic()?;
        if self.max_pixels == 0 {
            return Err(Error::BadParameter);
        }

        Ok(())
    }

    /// The rounding used on single images.
    pub fn planar_rounding(&self) -> RealRounding {
        self.rounding.unwrap_or(RealRounding::Floor)
    }

    /// The rounding used on stacks.
    pub fn stacked_rounding(&self) -> RealRounding {
        self.rounding.unwrap_or(RealRounding::Nearest)
    }

    /// Validate a layout against the configured pixel limit.
    pub fn layout(&self, width: u32, height: u32, depth: Depth) -> Result<ImageLayout, Error> {
        ImageLayout::with_limit(width, height, depth, self.max_pixels)
    }
}

impl Image {
    /// Allocate a zeroed image within the pixel limit of a configuration.
    pub fn with_config(
        width: u32,
        height: u32,
        depth: Depth,
        config: &Config,
    ) -> Result<Self, Error> {
        Self::with_layout(config.layout(width, height, depth)?)
    }
}
