//! Theme Module - background brightness classification and adaptive palettes
//!
//! - `brightness`: samples an image and classifies it light/dark
//! - `palette`: the two fixed token sets and their egui resolution
//! - `adaptive`: per-source request tracking so stale results are dropped

pub mod adaptive;
pub mod brightness;
pub mod palette;

pub use adaptive::{AdaptiveTheme, ClassificationRequest};
pub use brightness::{classify_bytes, classify_source, Classification};
pub use palette::{theme, Palette, ThemeTokens, DARK_TOKENS, LIGHT_TOKENS};
