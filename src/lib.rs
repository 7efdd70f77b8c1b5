pub mod api;
pub mod color;
pub mod config;
pub mod error;
pub mod palette;
pub mod templates;

pub use color::Rgb;
pub use error::PaletteError;
pub use palette::{generate_palette, generate_palette_with, Palette, Shade, ShadeCurve, SHADES};
