use std::fmt;

use crate::error::PaletteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB`. The leading `#` is required and exactly six hex digits must follow.
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex.strip_prefix('#').ok_or(PaletteError::InvalidHex)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidHex);
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| PaletteError::InvalidHex)
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn luminance_sum(&self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Blends toward white for positive factors and toward black otherwise.
pub fn interpolate(rgb: Rgb, factor: f64) -> Rgb {
    let blend = |c: u8| -> u8 {
        let c = c as f64;
        let v = if factor > 0.0 {
            c + (255.0 - c) * factor
        } else {
            c * (1.0 + factor)
        };
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb {
        r: blend(rgb.r),
        g: blend(rgb.g),
        b: blend(rgb.b),
    }
}
