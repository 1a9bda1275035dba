//! # Primitives
//!
//! Small pure helpers shared by every stage: numeric clamping, tolerant
//! list coercion for section props, hex colour blending, and aspect-ratio
//! parsing. None of these fail; bad input degrades to "absent" or passes
//! through untouched.

use serde_json::Value;

/// Standard clamp. `lo` wins if the bounds are inverted.
pub fn clamp(n: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(n))
}

/// Coerce a prop value into a list.
///
/// Lists pass through. Strings are parsed as JSON and kept only if they
/// decode to a list (a compatibility path for content stored as encoded
/// strings). Everything else is an empty list.
pub fn to_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => vec![],
        },
        _ => vec![],
    }
}

/// Decode a hex colour into its RGB channels.
///
/// Accepts 3, 4, 6 or 8 hex digits with an optional leading `#`. The
/// alpha digits of the 4/8-digit forms are ignored.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.trim().trim_start_matches('#');
    if !h.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match h.len() {
        3 | 4 => {
            let r = channel(&h[0..1].repeat(2))?;
            let g = channel(&h[1..2].repeat(2))?;
            let b = channel(&h[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 | 8 => Some((channel(&h[0..2])?, channel(&h[2..4])?, channel(&h[4..6])?)),
        _ => None,
    }
}

/// `rgba(r, g, b, alpha)` for a hex colour; any other input is returned
/// unchanged (no blending for named, `rgb()` or `hsl()` colours).
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => format_rgba(r, g, b, alpha),
        None => hex.to_string(),
    }
}

/// Blend a base colour with an opacity clamped to `[0, 1]`.
///
/// Hex bases become `rgba(...)`. Non-hex bases are returned as-is at every
/// opacity; callers relying on translucency must supply a hex colour.
pub fn color_with_opacity(base: &str, opacity: f64) -> String {
    let o = if opacity.is_nan() { 1.0 } else { clamp(opacity, 0.0, 1.0) };
    match parse_hex(base) {
        Some((r, g, b)) => format_rgba(r, g, b, o),
        None => base.to_string(),
    }
}

fn format_rgba(r: u8, g: u8, b: u8, alpha: f64) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, format_number(alpha))
}

/// Format a number the way a CSS author would write it: integers without a
/// trailing `.0`, everything else with the shortest round-trip form.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse an aspect ratio from a number, `"W/H"`, or a bare numeric string.
pub fn parse_aspect_ratio(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_aspect_ratio_str(s),
        _ => None,
    }
}

fn parse_aspect_ratio_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some((w, h)) = s.split_once('/') {
        let w: f64 = w.trim().parse().ok()?;
        let h: f64 = h.trim().parse().ok()?;
        if h == 0.0 || !w.is_finite() || !h.is_finite() {
            return None;
        }
        return Some(w / h);
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}
