use std::env;

use log::warn;

use crate::color::Rgb;
use crate::palette::ShadeCurve;

pub const FALLBACK_BASE_COLOR: &str = "#3498DB";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub default_base_color: String,
    pub shade_curve: ShadeCurve,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_base_color = match lookup("DEFAULT_BASE_COLOR") {
            Some(hex) if Rgb::from_hex(&hex).is_ok() => hex.to_uppercase(),
            Some(hex) => {
                warn!("Ignoring DEFAULT_BASE_COLOR '{}': not a 6-digit hex color", hex);
                FALLBACK_BASE_COLOR.to_string()
            }
            None => FALLBACK_BASE_COLOR.to_string(),
        };
        let shade_curve = match lookup("SHADE_CURVE") {
            Some(v) => ShadeCurve::parse(&v).unwrap_or_else(|| {
                warn!("Unknown SHADE_CURVE '{}', using anchored", v);
                ShadeCurve::Anchored
            }),
            None => ShadeCurve::Anchored,
        };
        Self {
            // Listener
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            // Palette defaults
            default_base_color,
            shade_curve,
        }
    }
}
