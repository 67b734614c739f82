// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! The flat error enumeration visible at the boundary of every operator.
use core::fmt;

/// The numeric code of a successful operation.
///
/// Operators return `Result`, this constant only exists for hosts that exchange the numeric form
/// of [`Error::code`] across a binding layer.
pub const NO_ERR: u32 = 0;

/// The reason an operator refused to run.
///
/// Every check that leads to one of these is performed before any pixel of an output image is
/// written, with the exception of [`Error::CannotAllocate`] which is raised while acquiring the
/// transient work buffers and still leaves the outputs untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The depth of an image, or the combination of depths, is not supported by the operator.
    BadDepth,
    /// Image sizes differ, are zero, or exceed the configured limit.
    BadSize,
    /// A numeric argument is outside of the legal range for the image depth.
    BadValue,
    /// A grid, an edge, a direction mask or some other parameter is not acceptable.
    BadParameter,
    /// A single direction does not exist on the grid.
    BadDirection,
    /// The images of a stack do not share their dimensions.
    BadImageDimensions,
    /// A raw buffer has the wrong length for the image.
    LoadDataSize,
    /// A work buffer or queue could not be allocated.
    CannotAllocate,
    /// Anything else.
    Unknown,
}

impl Error {
    /// All kinds, in the order of their numeric codes starting at 1.
    pub const ALL: [Error; 9] = [
        Error::BadDepth,
        Error::BadSize,
        Error::BadValue,
        Error::BadParameter,
        Error::BadDirection,
        Error::BadImageDimensions,
        Error::LoadDataSize,
        Error::CannotAllocate,
        Error::Unknown,
    ];

    /// The stable numeric code of this error, never equal to [`NO_ERR`].
    pub const fn code(self) -> u32 {
        match self {
            Error::BadDepth => 1,
            Error::BadSize => 2,
            Error::BadValue => 3,
            Error::BadParameter => 4,
            Error::BadDirection => 5,
            Error::BadImageDimensions => 6,
            Error::LoadDataSize => 7,
            Error::CannotAllocate => 8,
            Error::Unknown => 9,
        }
    }

    /// Recover the error from its numeric code.
    ///
    /// Returns `None` for [`NO_ERR`] and for codes that name no error.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|err| err.code() == code)
    }

    /// The fixed diagnostic string of this error.
    pub const fn as_str(self) -> &'static str {
        match self {
            Error::BadDepth => "Incorrect depth for operation",
            Error::BadSize => "Incorrect size for operation",
            Error::BadValue => "Incorrect value for operation",
            Error::BadParameter => "Incorrect parameter for operation",
            Error::BadDirection => "Incorrect direction for grid",
            Error::BadImageDimensions => "Incorrect image dimensions",
            Error::LoadDataSize => "Incorrect data size for loading",
            Error::CannotAllocate => "Memory allocation failed",
            Error::Unknown => "Unknown error",
        }
    }
}

/// The diagnostic string of a numeric status code, including [`NO_ERR`].
pub fn describe(code: u32) -> &'static str {
    match Error::from_code(code) {
        Some(err) => err.as_str(),
        None if code == NO_ERR => "No error",
        None => Error::Unknown.as_str(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for Error {}

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Error::CannotAllocate
    }
}
