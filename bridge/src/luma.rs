use image_morph::Error;

/// Weights of the red, green and blue channel in the luminance of a color pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LumaWeights {
    r: f32,
    g: f32,
    b: f32,
}

impl LumaWeights {
    /// The luma coefficients of ITU-R BT.601.
    pub const BT601: Self = LumaWeights {
        r: 0.299,
        g: 0.587,
        b: 0.114,
    };

    /// The luma coefficients of ITU-R BT.709.
    pub const BT709: Self = LumaWeights {
        r: 0.2126,
        g: 0.7152,
        b: 0.0722,
    };

    /// Weights that sum to one, within `1e-3`.
    ///
    /// Negative, non-finite or unbalanced weights fail with [`Error::BadValue`].
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self, Error> {
        let all = [r, g, b];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::BadValue);
        }

        if libm::fabsf(r + g + b - 1.0) > 1e-3 {
            return Err(Error::BadValue);
        }

        Ok(LumaWeights { r, g, b })
    }

    pub fn weights(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// The rounded luminance of a pixel.
    pub fn apply(&self, [r, g, b]: [u8; 3]) -> u8 {
        let luma = self.r * f32::from(r) + self.g * f32::from(g) + self.b * f32::from(b);
        libm::roundf(luma).clamp(0.0, 255.0) as u8
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::BT601
    }
}
