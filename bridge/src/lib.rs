//! Exchange pixel blocks of external image libraries with `image-morph` images.
//!
//! A host hands over a contiguous block of pixels together with its width, height, row stride and
//! a mode name in the convention of the Python Imaging Library. The block is converted into an
//! image of the depth the mode maps to, and images are written back as tightly packed blocks.
//!
//! # Usage
//!
//! ```
//! use image_morph::Depth;
//! use image_morph_bridge::{import, LumaWeights, Mode, PixelBlock};
//!
//! // Two rows of three RGB pixels, padded to a stride of 12 bytes.
//! let data = [
//!     255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 0, 0,
//!     0, 255, 0, 0, 0, 255, 10, 10, 10, 0, 0, 0,
//! ];
//!
//! let block = PixelBlock::new(&data, 3, 2, 12, Mode::from_name("RGB")?)?;
//! let image = import(&block, LumaWeights::default())?;
//!
//! assert_eq!(image.depth(), Depth::Byte);
//! assert_eq!(image.get_pixel(0, 0)?, 255);
//! assert_eq!(image.get_pixel(2, 1)?, 10);
//! # Ok::<(), image_morph::Error>(())
//! ```
// Deny, not forbid, unsafe code. No module needs it at the moment.
#![deny(unsafe_code)]

/// The pixel block descriptor.
mod block;
/// Conversion in both directions.
mod convert;
/// Weighting of color channels.
mod luma;
/// Mode names and their properties.
mod mode;

#[cfg(test)]
mod tests;

pub use self::block::PixelBlock;
pub use self::convert::{export, export_rect, import, import_into};
pub use self::luma::LumaWeights;
pub use self::mode::Mode;
