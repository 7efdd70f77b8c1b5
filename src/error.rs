use thiserror::Error;

/// Validation failures for a palette submission. The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Invalid hex color. Please provide a valid 6-digit hex color (e.g., #3498DB).")]
    InvalidHex,

    #[error("Please provide a name for your color palette.")]
    MissingName,
}
