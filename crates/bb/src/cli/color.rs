//! 256-color quantization and colored status badges.
//!
//! Bitbucket hands back web hex colors; terminals that aren't true-color
//! take a palette index. The mapping here targets the standard xterm
//! palette: indices 16–231 form a 6×6×6 color cube, 232–255 a 24-step
//! grayscale ramp, and the 16 base colors are never produced. Pure grays
//! go through the ramp, except near-black and near-white, which map to the
//! cube's own black (16) and white (231); the ramp's outermost steps are
//! visually redundant with those two.
//!
//! Everything here degrades instead of failing: a malformed hex string
//! renders text unstyled.

use colored::Colorize;

const COLOR_PREFIX: &str = "\x1b[38;5;";
const COLOR_RESET: &str = "\x1b[0m";
const BADGE_BULLET: &str = "●";

/// An 8-bit-per-channel RGB triplet parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Parses `RRGGBB` or `#RRGGBB`, case-insensitive. Anything else is `None`.
pub fn parse_hex_color(input: &str) -> Option<Rgb> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb(r, g, b))
}

/// Nearest 256-color palette index for an RGB value. Always in 16..=255.
pub fn rgb_to_ansi256(rgb: Rgb) -> u8 {
    let Rgb(r, g, b) = rgb;

    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r as f32 - 8.0) / 247.0 * 24.0).round() as u8;
    }

    let red = (r as f32 / 255.0 * 5.0).round() as u8;
    let green = (g as f32 / 255.0 * 5.0).round() as u8;
    let blue = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * red + 6 * green + blue
}

/// Wraps `text` in a foreground color escape for the quantized palette
/// index. A missing or unparseable hex color returns the text unchanged,
/// never a broken escape sequence.
pub fn colorize(text: &str, hex_color: Option<&str>) -> String {
    let Some(hex) = hex_color else {
        return text.to_string();
    };
    let Some(rgb) = parse_hex_color(hex) else {
        return text.to_string();
    };

    let index = rgb_to_ansi256(rgb);
    format!("{}{}m{}{}", COLOR_PREFIX, index, text, COLOR_RESET)
}

/// A colored bullet followed by the plain label, e.g. `● OPEN`. Without a
/// color the label falls back to a bracket form so states stay readable on
/// colorless terminals.
pub fn badge(label: &str, hex_color: Option<&str>) -> String {
    let Some(hex) = hex_color else {
        return format!("[{}]", label).bright_black().to_string();
    };
    let Some(rgb) = parse_hex_color(hex) else {
        return format!("[{}]", label);
    };

    let index = rgb_to_ansi256(rgb);
    format!(
        "{}{}m{}{} {}",
        COLOR_PREFIX, index, BADGE_BULLET, COLOR_RESET, label
    )
}

/// Hex color for a PR state. Unrecognized states share the neutral gray
/// used for `SUPERSEDED`.
pub fn state_color(state: &str) -> &'static str {
    match state {
        "OPEN" => "#2da44e",
        "MERGED" => "#8250df",
        "DECLINED" => "#cf222e",
        _ => "#94a3b8",
    }
}
