//! Hex formatting for entry display names.

use super::ColorValue;

/// Encode one 0-1 channel as two lowercase hex digits.
fn hex_part(channel: f64) -> String {
    let byte = (channel * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("{:02x}", byte)
}

/// Format a color as `#rrggbb`, appending `aa` only when alpha is below 1.
pub fn to_hex(color: &ColorValue) -> String {
    let mut hex = format!(
        "#{}{}{}",
        hex_part(color.r),
        hex_part(color.g),
        hex_part(color.b)
    );
    if color.alpha() < 1.0 {
        hex.push_str(&hex_part(color.alpha()));
    }
    hex
}
