// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Neighbour grids, directions and edge policies.
//!
//! A direction is a small integer naming a neighbour; `0` is always the pixel itself. Planar
//! grids map a direction to a pixel offset, hexagonal offsets depend on the parity of the row the
//! step starts from. Cubic grids map a direction to a plane offset and a direction of their
//! planar grid, which may depend on the parity of the plane the step starts from.
use core::fmt;

use crate::layout::Depth;
use crate::Error;

/// A neighbour set, fixing connectivity and metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Grid {
    /// Eight neighbours, directions clockwise from north.
    Square = 1,
    /// Six neighbours, directions clockwise from north-east. Odd rows sit half a pixel to the
    /// right of even rows.
    Hexagonal = 2,
    /// Twenty-six neighbours on a stack of square planes.
    Cubic = 3,
    /// Twelve neighbours on a stack of hexagonal planes.
    FaceCenterCubic = 4,
    /// Sixteen neighbours on a stack of square planes, alternate planes sitting half a pixel
    /// diagonally offset.
    CenterCubic = 5,
}

/// The virtual value of pixels outside of the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Edge {
    /// Outside pixels are zero.
    Empty = 0,
    /// Outside pixels hold the maximum value of the depth.
    Filled = 1,
}

/// A set of directions, encoded as a bitmask where bit `d` stands for direction `d`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirSet(u32);

pub const SQUARE: u32 = Grid::Square as u32;
pub const HEXAGONAL: u32 = Grid::Hexagonal as u32;
pub const CUBIC: u32 = Grid::Cubic as u32;
pub const FACE_CENTER_CUBIC: u32 = Grid::FaceCenterCubic as u32;
pub const CENTER_CUBIC: u32 = Grid::CenterCubic as u32;
pub const EMPTY: u32 = Edge::Empty as u32;
pub const FILLED: u32 = Edge::Filled as u32;

/// Square offsets, clockwise from north, `y` growing downwards.
const SQUARE_OFFSETS: [(i64, i64); 9] = [
    (0, 0),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Hexagonal offsets when stepping from an even row.
const HEX_EVEN_OFFSETS: [(i64, i64); 7] = [
    (0, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Hexagonal offsets when stepping from an odd row.
const HEX_ODD_OFFSETS: [(i64, i64); 7] = [
    (0, 0),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 0),
    (0, -1),
];

/// Face centred cubic: hexagonal directions towards the next and the previous plane.
const FCC_UP: [u32; 3] = [0, 4, 5];
const FCC_DOWN: [u32; 3] = [0, 1, 2];

/// Centre cubic: square directions towards both adjacent planes, by parity of the current plane.
const BCC_EVEN: [u32; 4] = [0, 7, 8, 1];
const BCC_ODD: [u32; 4] = [0, 3, 4, 5];

impl Grid {
    /// The grid with the given ABI constant.
    pub fn from_code(code: u32) -> Result<Self, Error> {
        match code {
            SQUARE => Ok(Grid::Square),
            HEXAGONAL => Ok(Grid::Hexagonal),
            CUBIC => Ok(Grid::Cubic),
            FACE_CENTER_CUBIC => Ok(Grid::FaceCenterCubic),
            CENTER_CUBIC => Ok(Grid::CenterCubic),
            _ => Err(Error::BadParameter),
        }
    }

    pub const fn code(self) -> u32 {
        self as u32
    }

    /// The number of neighbours, not counting the centre.
    pub const fn neighbours(self) -> u32 {
        match self {
            Grid::Square => 8,
            Grid::Hexagonal => 6,
            Grid::Cubic => 26,
            Grid::FaceCenterCubic => 12,
            Grid::CenterCubic => 16,
        }
    }

    pub const fn is_planar(self) -> bool {
        matches!(self, Grid::Square | Grid::Hexagonal)
    }

    /// The planar grid of a single plane.
    pub const fn planar(self) -> Grid {
        match self {
            Grid::Square | Grid::Cubic | Grid::CenterCubic => Grid::Square,
            Grid::Hexagonal | Grid::FaceCenterCubic => Grid::Hexagonal,
        }
    }

    /// Fail with [`Error::BadDirection`] unless `d` names a direction of this grid.
    pub fn check_direction(self, d: u32) -> Result<(), Error> {
        if d <= self.neighbours() {
            Ok(())
        } else {
            Err(Error::BadDirection)
        }
    }

    /// Fail with [`Error::BadParameter`] unless this is a planar grid.
    pub(crate) fn require_planar(self) -> Result<(), Error> {
        if self.is_planar() {
            Ok(())
        } else {
            Err(Error::BadParameter)
        }
    }

    /// Fail with [`Error::BadParameter`] unless this is a cubic grid.
    pub(crate) fn require_cubic(self) -> Result<(), Error> {
        if self.is_planar() {
            Err(Error::BadParameter)
        } else {
            Ok(())
        }
    }

    /// The direction pointing the opposite way.
    ///
    /// The direction must be valid for the grid; stepping along `d` and then along
    /// `transpose(d)` returns to the starting pixel on every grid and at every parity.
    pub fn transpose(self, d: u32) -> u32 {
        debug_assert!(d <= self.neighbours());
        match self {
            Grid::Square => square_transpose(d),
            Grid::Hexagonal => hex_transpose(d),
            Grid::Cubic => match d {
                0..=8 => square_transpose(d),
                9..=17 => 18 + square_transpose(d - 9),
                _ => 9 + square_transpose(d - 18),
            },
            Grid::FaceCenterCubic => match d {
                0..=6 => hex_transpose(d),
                7..=9 => d + 3,
                _ => d - 3,
            },
            Grid::CenterCubic => match d {
                0..=8 => square_transpose(d),
                9..=12 => d + 4,
                _ => d - 4,
            },
        }
    }

    /// The pixel offset of a planar direction when stepping from row `y`.
    ///
    /// Returns `None` if `d` is not a direction of the planar grid.
    pub fn offset(self, d: u32, y: i64) -> Option<(i64, i64)> {
        let table: &[(i64, i64)] = match self.planar() {
            Grid::Hexagonal if y.rem_euclid(2) == 1 => &HEX_ODD_OFFSETS,
            Grid::Hexagonal => &HEX_EVEN_OFFSETS,
            _ => &SQUARE_OFFSETS,
        };

        table.get(d as usize).copied()
    }

    /// Split a direction into a plane offset and a direction of the planar grid.
    ///
    /// `z` is the index of the plane the step starts from. Planar grids always stay on their
    /// plane. Returns `None` if `d` is not a direction of this grid.
    pub fn decompose(self, d: u32, z: i64) -> Option<(i64, u32)> {
        if d > self.neighbours() {
            return None;
        }

        let split = match self {
            Grid::Square | Grid::Hexagonal => (0, d),
            Grid::Cubic => match d {
                0..=8 => (0, d),
                9..=17 => (1, d - 9),
                _ => (-1, d - 18),
            },
            Grid::FaceCenterCubic => match d {
                0..=6 => (0, d),
                7..=9 => (1, FCC_UP[(d - 7) as usize]),
                _ => (-1, FCC_DOWN[(d - 10) as usize]),
            },
            Grid::CenterCubic => {
                let across = if z.rem_euclid(2) == 0 {
                    &BCC_EVEN
                } else {
                    &BCC_ODD
                };

                match d {
                    0..=8 => (0, d),
                    9..=12 => (1, across[(d - 9) as usize]),
                    _ => (-1, across[(d - 13) as usize]),
                }
            }
        };

        Some(split)
    }

    fn step(self, d: u32, (x, y, z): (i64, i64, i64)) -> Option<(i64, i64, i64)> {
        let (dz, d2) = self.decompose(d, z)?;
        let (dx, dy) = self.offset(d2, y)?;
        Some((x + dx, y + dy, z + dz))
    }

    /// Take `n` steps in a planar direction, honouring the row parity at each step.
    pub fn walk(self, d: u32, n: u32, (x, y): (i64, i64)) -> Option<(i64, i64)> {
        let (x, y, _) = self.planar().walk3(d, n, (x, y, 0))?;
        Some((x, y))
    }

    /// Take `n` steps in any direction of the grid, in a stack of planes.
    ///
    /// Planar grids never leave plane `z`. Every step consults the parity of the plane and of the
    /// row it starts from. Returns `None` if `d` is not a direction of this grid.
    pub fn walk3(self, d: u32, n: u32, start: (i64, i64, i64)) -> Option<(i64, i64, i64)> {
        // Two steps restore the parity of both the row and the plane, so a walk is a number of
        // identical pairs and at most one single step.
        let once = self.step(d, start)?;
        let twice = self.step(d, once)?;

        let pairs = i64::from(n / 2);
        let single = i64::from(n % 2);
        let along = |s: i64, o: i64, t: i64| s + pairs * (t - s) + single * (o - s);
        Some((
            along(start.0, once.0, twice.0),
            along(start.1, once.1, twice.1),
            along(start.2, once.2, twice.2),
        ))
    }
}

impl Edge {
    /// The edge with the given ABI constant.
    pub fn from_code(code: u32) -> Result<Self, Error> {
        match code {
            EMPTY => Ok(Edge::Empty),
            FILLED => Ok(Edge::Filled),
            _ => Err(Error::BadParameter),
        }
    }

    pub const fn code(self) -> u32 {
        self as u32
    }

    /// The value outside pixels take for an image of the given depth.
    pub const fn value(self, depth: Depth) -> u32 {
        match self {
            Edge::Empty => 0,
            Edge::Filled => depth.max_value(),
        }
    }
}

impl DirSet {
    pub const EMPTY: DirSet = DirSet(0);

    /// Only the centre.
    pub const CENTER: DirSet = DirSet(1);

    pub const fn from_bits(bits: u32) -> Self {
        DirSet(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The centre and all neighbours of a grid, the unit ball.
    pub const fn all(grid: Grid) -> Self {
        DirSet((1 << (grid.neighbours() + 1)) - 1)
    }

    /// All neighbours of a grid, without the centre.
    pub const fn neighbours(grid: Grid) -> Self {
        DirSet(Self::all(grid).0 & !1)
    }

    /// A set containing the given directions, see [`DirSet::with`].
    pub fn of(directions: &[u32]) -> Self {
        directions.iter().fold(Self::EMPTY, |set, &d| set.with(d))
    }

    /// A set containing exactly the given directions of `grid`.
    ///
    /// Fails with [`Error::BadDirection`] if a direction lies beyond the grid.
    pub fn try_of(directions: &[u32], grid: Grid) -> Result<Self, Error> {
        directions.iter().try_fold(Self::EMPTY, |set, &d| {
            grid.check_direction(d)?;
            Ok(set.with(d))
        })
    }

    /// Add a direction. Directions from 32 on are not representable and leave the set as is.
    #[must_use]
    pub const fn with(self, d: u32) -> Self {
        DirSet(self.0 | bit(d))
    }

    #[must_use]
    pub const fn without(self, d: u32) -> Self {
        DirSet(self.0 & !bit(d))
    }

    pub const fn contains(self, d: u32) -> bool {
        self.0 & bit(d) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersects(self, other: DirSet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: DirSet) -> Self {
        DirSet(self.0 | other.0)
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Fail with [`Error::BadParameter`] if a direction lies beyond the grid.
    pub fn validate(self, grid: Grid) -> Result<Self, Error> {
        if self.0 & !Self::all(grid).0 != 0 {
            Err(Error::BadParameter)
        } else {
            Ok(self)
        }
    }

    /// The set of transposed directions.
    pub fn transposed(self, grid: Grid) -> Self {
        self.iter().fold(Self::EMPTY, |set, d| set.with(grid.transpose(d)))
    }

    /// The directions in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u32> {
        (0..32).filter(move |&d| self.contains(d))
    }
}

impl fmt::Debug for DirSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

const fn bit(d: u32) -> u32 {
    if d < 32 {
        1 << d
    } else {
        0
    }
}

fn square_transpose(d: u32) -> u32 {
    if d == 0 {
        0
    } else {
        (d + 3) % 8 + 1
    }
}

fn hex_transpose(d: u32) -> u32 {
    if d == 0 {
        0
    } else {
        (d + 2) % 6 + 1
    }
}
