use crate::color::{self, Rgb};
use crate::error::PaletteError;

pub const SHADES: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

const BASE_SHADE_INDEX: usize = 5;

/// How blend factors are assigned to the shade stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadeCurve {
    /// Shade 500 is pinned to the base color; the other stops follow the linear ramp.
    #[default]
    Anchored,
    /// The linear ramp at every stop, shade 500 included.
    Linear,
}

impl ShadeCurve {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anchored" => Some(Self::Anchored),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }

    /// Ranges from 0.95 at index 0 to -0.8 at index 9.
    pub fn factor(&self, index: usize) -> f64 {
        if *self == Self::Anchored && index == BASE_SHADE_INDEX {
            return 0.0;
        }
        0.95 - (index as f64 * 1.75) / 9.0
    }
}

#[derive(Debug, Clone)]
pub struct Shade {
    pub shade: u16,
    pub color: String,
    pub rgb: Rgb,
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub name: String,
    pub base: Rgb,
    pub shades: Vec<Shade>,
}

pub fn generate_palette(hex_color: &str, color_name: &str) -> Result<Palette, PaletteError> {
    generate_palette_with(hex_color, color_name, ShadeCurve::default())
}

pub fn generate_palette_with(hex_color: &str, color_name: &str, curve: ShadeCurve) -> Result<Palette, PaletteError> {
    let base = Rgb::from_hex(hex_color)?;
    if color_name.is_empty() {
        return Err(PaletteError::MissingName);
    }

    let shades = SHADES
        .iter()
        .enumerate()
        .map(|(index, &shade)| {
            let rgb = color::interpolate(base, curve.factor(index));
            Shade { shade, color: rgb.to_hex(), rgb }
        })
        .collect();

    Ok(Palette {
        name: color_name.to_string(),
        base,
        shades,
    })
}

impl Palette {
    pub fn get(&self, shade: u16) -> Option<&Shade> {
        self.shades.iter().find(|s| s.shade == shade)
    }

    /// The `'<name>': { 50: '#..', ... },` entry for the `colors` block of a Tailwind config.
    pub fn config_entry(&self) -> String {
        let lines = self
            .shades
            .iter()
            .map(|s| format!("      {}: '{}',", s.shade, s.color))
            .collect::<Vec<_>>()
            .join("\n");
        format!("'{}': {{\n{}\n    }},", escape_js_single_quoted(&self.name), lines)
    }

    /// A complete `tailwind.config.js` body extending the theme with this palette.
    pub fn tailwind_config(&self) -> String {
        format!(
            "module.exports = {{\n  theme: {{\n    extend: {{\n      colors: {{\n        {}\n      }}\n    }}\n  }}\n}}",
            self.config_entry()
        )
    }
}

fn escape_js_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}
