//! Hex and rgba color conversion

/// Returned by [`hex_to_rgba`] when the stored color is not `#RRGGBB`
pub const FALLBACK_RGBA: &str = "rgba(0, 0, 0, 0.20)";

/// Parses a strict `#RRGGBB` string into its channels
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Formats channels as lowercase `#rrggbb`
///
/// Values above 255 print with more than two digits, which yields a
/// malformed hex that [`hex_to_rgba`] later maps to the fallback.
pub fn to_hex(r: u32, g: u32, b: u32) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Formats an opacity percent as an alpha with two decimals
///
/// The percent is clamped to `0..=100` first. Integer percents divide by
/// 100 exactly, so no rounding rule is involved.
pub fn format_alpha(opacity_percent: i32) -> String {
    let p = opacity_percent.clamp(0, 100);
    format!("{}.{:02}", p / 100, p % 100)
}

/// Combines a `#RRGGBB` color and an opacity percent into `rgba(r, g, b, a)`
///
/// Any color that is not exactly `#` followed by six hex digits yields
/// [`FALLBACK_RGBA`], whatever the opacity.
pub fn hex_to_rgba(hex: &str, opacity_percent: i32) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => format!("rgba({}, {}, {}, {})", r, g, b, format_alpha(opacity_percent)),
        None => FALLBACK_RGBA.to_string(),
    }
}
