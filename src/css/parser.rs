//! `box-shadow` text to layers
//!
//! Parsing happens in two steps:
//!
//! 1. [`split_top_level`] cuts the value on commas outside parentheses,
//!    so the commas inside `rgba(...)` never split a clause.
//! 2. Each clause is matched against a fixed grammar:
//!
//! ```text
//! clause := ["inset" ws*] length ws+ length ws+ length ws+ length ws+ color
//! length := ["-"] digit+ "px"
//! color  := rest of the clause
//! ```
//!
//! Clauses that do not match are skipped; the parse only fails as a whole
//! when no clause matches. Blur may carry a minus sign here: the grammar
//! accepts it and the value is kept as written.

use super::color::to_hex;
use super::serializer::NONE;
use crate::domain::{LayerId, ShadowLayer};

/// Color assigned to clauses whose color token is not understood
pub const DEFAULT_COLOR: &str = "#000000";

/// Opacity assigned to clauses whose color token is not understood
pub const DEFAULT_OPACITY: i32 = 20;

const PROPERTY_PREFIX: &str = "box-shadow:";

/// Result of parsing every clause of a value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Layers from the clauses that matched, in clause order
    pub layers: Vec<ShadowLayer>,
    /// Trimmed text of the clauses that did not match
    pub skipped: Vec<String>,
}

/// Parses CSS text into layers
///
/// Accepts a bare value or a full `box-shadow: ...;` declaration. Returns
/// `None` when the input is blank, is `none`, or has no usable clause.
/// Every returned layer is enabled and has a fresh id.
pub fn parse_shadow_css(text: &str) -> Option<Vec<ShadowLayer>> {
    let outcome = parse_clauses(text)?;
    if outcome.layers.is_empty() {
        return None;
    }
    Some(outcome.layers)
}

/// Parses CSS text, also reporting which clauses were skipped
///
/// Returns `None` only for blank input or `none`.
pub fn parse_clauses(text: &str) -> Option<ParseOutcome> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NONE {
        return None;
    }

    let mut outcome = ParseOutcome::default();
    for clause in split_top_level(strip_declaration(trimmed)) {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }
        match parse_clause(clause) {
            Some(layer) => outcome.layers.push(layer),
            None => outcome.skipped.push(clause.to_string()),
        }
    }
    Some(outcome)
}

/// Removes a leading `box-shadow:` (any case) and one trailing `;`
fn strip_declaration(text: &str) -> &str {
    let body = match text.get(..PROPERTY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(PROPERTY_PREFIX) => {
            &text[PROPERTY_PREFIX.len()..]
        }
        _ => text,
    };
    let body = body.trim();
    body.strip_suffix(';').unwrap_or(body).trim()
}

/// Splits on commas that are not nested inside parentheses
///
/// A stray `)` never drives the depth below zero.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Matches one trimmed clause, returning `None` if it has the wrong shape
pub fn parse_clause(clause: &str) -> Option<ShadowLayer> {
    let (inset, rest) = match clause.strip_prefix("inset") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, clause),
    };

    let mut cursor = Cursor { rest };
    let offset_x = cursor.length()?;
    cursor.whitespace()?;
    let offset_y = cursor.length()?;
    cursor.whitespace()?;
    let blur = cursor.length()?;
    cursor.whitespace()?;
    let spread = cursor.length()?;
    cursor.whitespace()?;

    let token = cursor.rest;
    if token.is_empty() {
        return None;
    }
    let (color, opacity) = resolve_color(token);

    Some(ShadowLayer {
        id: LayerId::generate(),
        enabled: true,
        offset_x,
        offset_y,
        blur,
        spread,
        color,
        opacity,
        inset,
    })
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    /// Consumes `-?digit+px`
    fn length(&mut self) -> Option<i32> {
        let (negative, body) = match self.rest.strip_prefix('-') {
            Some(body) => (true, body),
            None => (false, self.rest),
        };

        let digits = leading_digits(body);
        if digits == 0 {
            return None;
        }
        let after = body[digits..].strip_prefix("px")?;

        let magnitude: i64 = body[..digits].parse().ok()?;
        let value = i32::try_from(if negative { -magnitude } else { magnitude }).ok()?;
        self.rest = after;
        Some(value)
    }

    /// Consumes at least one whitespace character
    fn whitespace(&mut self) -> Option<()> {
        let trimmed = self.rest.trim_start();
        if trimmed.len() == self.rest.len() {
            return None;
        }
        self.rest = trimmed;
        Some(())
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Maps a color token to a `#rrggbb` color and an opacity percent
///
/// - `rgb(r, g, b)` / `rgba(r, g, b, a)` anywhere in the token: channels
///   become hex, opacity is `round(a * 100)` or 100 without alpha.
/// - A token starting with `#`: its first seven characters are taken as
///   the color, unvalidated, with opacity 100. Short and 8-digit forms are
///   truncated as they come.
/// - Anything else (named colors, `var(...)`, `hsl(...)`): `#000000` at 20.
pub fn resolve_color(token: &str) -> (String, i32) {
    if let Some(rgb) = find_rgb_function(token) {
        let opacity = rgb
            .alpha
            .map_or(100, |a| (a * 100.0).round() as i32);
        return (to_hex(rgb.r, rgb.g, rgb.b), opacity);
    }

    if token.starts_with('#') {
        let end = token.char_indices().nth(7).map_or(token.len(), |(i, _)| i);
        return (token[..end].to_string(), 100);
    }

    (DEFAULT_COLOR.to_string(), DEFAULT_OPACITY)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RgbFunction {
    r: u32,
    g: u32,
    b: u32,
    alpha: Option<f64>,
}

/// Finds the first `rgb(...)` or `rgba(...)` with integer channels
///
/// Channels are `digit+` separated by `,` and optional whitespace after
/// the comma; no whitespace is allowed after `(` or before `)`. The alpha
/// is a run of digits and dots read up to its first invalid character.
fn find_rgb_function(token: &str) -> Option<RgbFunction> {
    token
        .match_indices("rgb")
        .find_map(|(i, _)| match_rgb_at(&token[i + 3..]))
}

fn match_rgb_at(s: &str) -> Option<RgbFunction> {
    let s = s.strip_prefix('a').unwrap_or(s);
    let s = s.strip_prefix('(')?;

    let (r, s) = channel(s)?;
    let (g, s) = channel(s.strip_prefix(',')?.trim_start())?;
    let (b, s) = channel(s.strip_prefix(',')?.trim_start())?;

    if s.starts_with(')') {
        return Some(RgbFunction { r, g, b, alpha: None });
    }

    let s = s.strip_prefix(',')?.trim_start();
    let run = s.bytes().take_while(|c| c.is_ascii_digit() || *c == b'.').count();
    if run == 0 || !s[run..].starts_with(')') {
        return None;
    }
    let alpha = leading_float(&s[..run])?;
    Some(RgbFunction { r, g, b, alpha: Some(alpha) })
}

fn channel(s: &str) -> Option<(u32, &str)> {
    let digits = leading_digits(s);
    if digits == 0 {
        return None;
    }
    Some((s[..digits].parse().ok()?, &s[digits..]))
}

/// Reads the longest `digit* [. digit*]` prefix as a float
fn leading_float(run: &str) -> Option<f64> {
    let int_len = leading_digits(run);
    let mut end = int_len;
    if run[end..].starts_with('.') {
        end += 1 + leading_digits(&run[end + 1..]);
    }
    run[..end].parse().ok()
}
