//! Note color palette and color token validation.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// Fallback color when a palette is empty.
pub const FALLBACK_COLOR: &str = "#ffcc80";

/// Default palette for new notes.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#ffcc80", "#80deea", "#a5d6a7", "#ef9a9a", "#ce93d8", "#b39ddb", "#9fa8da",
];

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});
static HSL_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^hsl\(\s*\d{1,3}(?:\.\d+)?\s*,\s*\d{1,3}(?:\.\d+)?%\s*,\s*\d{1,3}(?:\.\d+)?%\s*\)$")
        .expect("valid hsl color regex")
});

/// Returns whether `value` is a color token notes may carry.
///
/// Accepted forms: `#rgb`, `#rrggbb`, `hsl(h, s%, l%)`.
pub fn is_valid_color_token(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value) || HSL_COLOR_RE.is_match(value)
}

/// Picks one palette entry uniformly at random.
pub fn pick_color<R: Rng + ?Sized>(palette: &[String], rng: &mut R) -> String {
    palette
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_COLOR.to_string())
}

/// Owned copy of [`DEFAULT_PALETTE`].
pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|value| value.to_string()).collect()
}
