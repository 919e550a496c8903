use bevy::prelude::*;

/// Cyan, violet, magenta.
pub const DEFAULT_PALETTE: [&str; 3] = ["#00ffff", "#a855f7", "#ff00ff"];

pub const DEFAULT_CONNECTION_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
pub const DEFAULT_POINTER_COLOR: Color = Color::srgb(168.0 / 255.0, 85.0 / 255.0, 247.0 / 255.0);

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex(hex: &str) -> Result<Color, String> {
    Srgba::hex(hex.trim())
        .map(Color::from)
        .map_err(|e| format!("invalid color {hex:?}: {e}"))
}

/// Parses every entry, skipping the ones that fail. Falls back to the default
/// palette when nothing usable remains, so the result is never empty.
pub fn resolve_palette(entries: &[String]) -> Vec<Color> {
    let colors: Vec<Color> = entries.iter().filter_map(|h| parse_hex(h).ok()).collect();
    if colors.is_empty() {
        return DEFAULT_PALETTE
            .iter()
            .filter_map(|h| parse_hex(h).ok())
            .collect();
    }
    colors
}

#[inline]
pub fn resolve_or(hex: &str, fallback: Color) -> Color {
    parse_hex(hex).unwrap_or(fallback)
}
