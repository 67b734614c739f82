use image_morph::{Depth, Error};

/// The pixel modes a block may be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `"1"`, one byte per pixel where non-zero is set.
    One,
    /// `"L"`, eight bit luminance.
    L,
    /// `"P"`, eight bit palette indices, taken as they are.
    P,
    /// `"I"`, 32-bit signed integers in little endian.
    I,
    /// `"F"`, 32-bit floats in little endian.
    F,
    /// `"RGB"`, three bytes per pixel.
    Rgb,
    /// `"RGBA"`, four bytes per pixel, alpha is ignored.
    Rgba,
    /// `"CMYK"`, four bytes per pixel. Only the black channel is read.
    Cmyk,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::One,
        Mode::L,
        Mode::P,
        Mode::I,
        Mode::F,
        Mode::Rgb,
        Mode::Rgba,
        Mode::Cmyk,
    ];

    /// Look up a mode by its name, failing with [`Error::BadParameter`] on unknown names.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == name)
            .ok_or(Error::BadParameter)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::One => "1",
            Mode::L => "L",
            Mode::P => "P",
            Mode::I => "I",
            Mode::F => "F",
            Mode::Rgb => "RGB",
            Mode::Rgba => "RGBA",
            Mode::Cmyk => "CMYK",
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Mode::One | Mode::L | Mode::P => 1,
            Mode::Rgb => 3,
            Mode::I | Mode::F | Mode::Rgba | Mode::Cmyk => 4,
        }
    }

    /// The depth of the image a block of this mode imports into.
    pub const fn depth(self) -> Depth {
        match self {
            Mode::One => Depth::Bit,
            Mode::I | Mode::F => Depth::Word,
            Mode::L | Mode::P | Mode::Rgb | Mode::Rgba | Mode::Cmyk => Depth::Byte,
        }
    }
}
