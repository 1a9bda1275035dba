//! # Section Spacing
//!
//! The vertical box around each section. Spacing comes from four layers,
//! applied in order with later layers overwriting earlier ones:
//!
//! 1. global defaults (`py = {xs: 5, md: 8}` theme units)
//! 2. the section's own `sx` bag
//! 3. `sx.py` as a pixel value when numeric
//! 4. `props.spaceAbove` / `props.spaceBelow` in theme units
//!
//! The orchestrator then forces the last section's bottom padding and
//! bottom margin.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{px, Breakpoint, ResponsiveValue};
use crate::model::Props;
use crate::primitives::format_number;

/// One spacing value.
#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    /// Theme spacing units (multiplied by the spacing unit).
    Units(f64),
    /// Absolute pixels.
    Px(f64),
    /// Theme units varying by breakpoint.
    Responsive(ResponsiveValue),
    /// Verbatim CSS (e.g. `"2rem"`).
    Raw(String),
}

impl Space {
    /// Interpret a value from an `sx` bag.
    pub fn from_sx(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(Space::Units),
            Value::String(s) if !s.is_empty() => Some(Space::Raw(s.clone())),
            Value::Object(_) => ResponsiveValue::from_value(value).map(Space::Responsive),
            _ => None,
        }
    }

    pub fn to_css(&self, bp: Breakpoint, unit: f64) -> String {
        match self {
            Space::Units(u) => px(u * unit),
            Space::Px(v) => px(*v),
            Space::Responsive(r) => px(r.resolve(bp) * unit),
            Space::Raw(s) => s.clone(),
        }
    }
}

/// Resolved spacing box for one section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionBox {
    pub padding_top: Option<Space>,
    pub padding_bottom: Option<Space>,
    pub padding_x: Option<Space>,
    pub margin_top: Option<Space>,
    pub margin_bottom: Option<Space>,
    /// Gap above this section, applied only when a previous sibling exists.
    pub space_above: Option<f64>,
    /// Any other `sx` keys, already converted to CSS declarations.
    pub extra: IndexMap<String, String>,
}

impl SectionBox {
    /// Layer 1: the global per-section defaults.
    pub fn defaults() -> Self {
        let py = Space::Responsive(ResponsiveValue::ByBreakpoint {
            xs: Some(5.0),
            sm: None,
            md: Some(8.0),
            lg: None,
        });
        Self {
            padding_top: Some(py.clone()),
            padding_bottom: Some(py),
            ..Default::default()
        }
    }

    /// Apply every layer for one section.
    pub fn for_section(sx: &Map<String, Value>, props: &Props<'_>) -> Self {
        let mut sbox = Self::defaults();
        sbox.apply_sx(sx);

        // Builder stores `py` in pixels, not theme units.
        if let Some(py) = sx.get("py").and_then(Value::as_f64).filter(|f| f.is_finite()) {
            sbox.padding_top = Some(Space::Px(py));
            sbox.padding_bottom = Some(Space::Px(py));
        }
        if let Some(above) = props.num("spaceAbove") {
            sbox.space_above = Some(above);
        }
        if let Some(below) = props.num("spaceBelow") {
            sbox.margin_bottom = Some(Space::Units(below));
        }
        sbox
    }

    /// Layer 2: merge a raw `sx` bag.
    pub fn apply_sx(&mut self, sx: &Map<String, Value>) {
        for (key, value) in sx {
            let space = Space::from_sx(value);
            match key.as_str() {
                "py" | "paddingY" => {
                    if let Some(s) = space {
                        self.padding_top = Some(s.clone());
                        self.padding_bottom = Some(s);
                    }
                }
                "pt" | "paddingTop" => self.padding_top = space.or(self.padding_top.take()),
                "pb" | "paddingBottom" => self.padding_bottom = space.or(self.padding_bottom.take()),
                "px" | "paddingX" => self.padding_x = space.or(self.padding_x.take()),
                "my" | "marginY" => {
                    if let Some(s) = space {
                        self.margin_top = Some(s.clone());
                        self.margin_bottom = Some(s);
                    }
                }
                "mt" | "marginTop" => self.margin_top = space.or(self.margin_top.take()),
                "mb" | "marginBottom" => self.margin_bottom = space.or(self.margin_bottom.take()),
                _ => {
                    if let Some(css) = css_value(key, value) {
                        self.extra.insert(kebab_case(key), css);
                    }
                }
            }
        }
    }

    /// Force the closing spacing of the page's last section.
    pub fn close_page(&mut self, bottom_spacing: f64) {
        self.padding_bottom = Some(Space::Px(bottom_spacing));
        self.margin_bottom = Some(Space::Px(0.0));
    }

    pub fn to_css(&self, bp: Breakpoint, unit: f64, has_previous: bool) -> IndexMap<String, String> {
        // Pass-through keys first; the typed box overrides them.
        let mut css = self.extra.clone();
        let mut put = |prop: &str, space: &Option<Space>| {
            if let Some(s) = space {
                css.insert(prop.to_string(), s.to_css(bp, unit));
            }
        };
        put("padding-top", &self.padding_top);
        put("padding-bottom", &self.padding_bottom);
        put("padding-left", &self.padding_x);
        put("padding-right", &self.padding_x);
        put("margin-top", &self.margin_top);
        put("margin-bottom", &self.margin_bottom);
        if let (Some(above), true) = (self.space_above, has_previous) {
            css.insert("margin-top".to_string(), px(above * unit));
        }
        css
    }
}

const UNITLESS: &[&str] = &["opacity", "zIndex", "fontWeight", "lineHeight", "flex", "order"];

fn css_value(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let n = n.as_f64()?;
            if UNITLESS.contains(&key) {
                Some(format_number(n))
            } else {
                Some(px(n))
            }
        }
        _ => None,
    }
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
