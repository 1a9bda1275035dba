//! # Layout Framing
//!
//! Decides how each section sits on the page. Two framing modes exist:
//!
//! - **boxed**: content lives in a centred container capped at the page's
//!   content width, with the resolved gutter as inner padding.
//! - **full**: content spans the whole width with only horizontal padding.
//!
//! Gutters and column counts may be a single number or a responsive record
//! (`{xs, sm, md, lg}`) resolved against the current viewport breakpoint.
//! Vertical spacing between sections lives in [`spacing`].

pub mod spacing;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::primitives::format_number;
use crate::tree::{el, VNode};

/// Named viewport-width thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "xs" => Some(Breakpoint::Xs),
            "sm" => Some(Breakpoint::Sm),
            "md" => Some(Breakpoint::Md),
            "lg" => Some(Breakpoint::Lg),
            "xl" => Some(Breakpoint::Xl),
            _ => None,
        }
    }

    /// Maximum container width for this breakpoint, in px.
    pub fn container_width(self) -> f64 {
        match self {
            Breakpoint::Xs => 444.0,
            Breakpoint::Sm => 600.0,
            Breakpoint::Md => 900.0,
            Breakpoint::Lg => 1200.0,
            Breakpoint::Xl => 1536.0,
        }
    }
}

/// Lower bounds (px) of each breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            sm: 600.0,
            md: 900.0,
            lg: 1200.0,
            xl: 1536.0,
        }
    }
}

impl Breakpoints {
    /// The largest breakpoint whose threshold the viewport satisfies.
    pub fn classify(&self, viewport_width: f64) -> Breakpoint {
        if viewport_width >= self.xl {
            Breakpoint::Xl
        } else if viewport_width >= self.lg {
            Breakpoint::Lg
        } else if viewport_width >= self.md {
            Breakpoint::Md
        } else if viewport_width >= self.sm {
            Breakpoint::Sm
        } else {
            Breakpoint::Xs
        }
    }
}

/// A value that is either fixed or varies by breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsiveValue {
    Fixed(f64),
    ByBreakpoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        xs: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sm: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        md: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lg: Option<f64>,
    },
}

impl ResponsiveValue {
    /// Read a number or a `{xs, sm, md, lg}` record from a prop value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(ResponsiveValue::Fixed),
            Value::Object(map) => {
                let key = |k: &str| map.get(k).and_then(Value::as_f64).filter(|f| f.is_finite());
                let (xs, sm, md, lg) = (key("xs"), key("sm"), key("md"), key("lg"));
                if xs.is_none() && sm.is_none() && md.is_none() && lg.is_none() {
                    return None;
                }
                Some(ResponsiveValue::ByBreakpoint { xs, sm, md, lg })
            }
            _ => None,
        }
    }

    /// Resolve against the current breakpoint.
    ///
    /// Larger keys fall back to the next smaller one (`lg ?? md ?? sm ?? xs`),
    /// bottoming out at 0.
    pub fn resolve(&self, bp: Breakpoint) -> f64 {
        match *self {
            ResponsiveValue::Fixed(v) => v,
            ResponsiveValue::ByBreakpoint { xs, sm, md, lg } => {
                let xs = xs.unwrap_or(0.0);
                let sm = sm.unwrap_or(xs);
                let md = md.unwrap_or(sm);
                let lg = lg.unwrap_or(md);
                match bp {
                    Breakpoint::Lg | Breakpoint::Xl => lg,
                    Breakpoint::Md => md,
                    Breakpoint::Sm => sm,
                    Breakpoint::Xs => xs,
                }
            }
        }
    }
}

/// Resolve an optional responsive value; `None` stays `None`.
pub fn resolve_responsive_value(val: Option<&ResponsiveValue>, bp: Breakpoint) -> Option<f64> {
    val.map(|v| v.resolve(bp))
}

/// Framing mode for a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Boxed,
    Full,
}

impl LayoutMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boxed" => Some(LayoutMode::Boxed),
            "full" => Some(LayoutMode::Full),
            _ => None,
        }
    }
}

/// Page content width: a breakpoint-named cap, a px cap, or no cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentWidth {
    Named(Breakpoint),
    Px(f64),
    Full,
}

impl ContentWidth {
    /// Read `"full"`, a breakpoint name, `false`, or a px number.
    /// Anything else is `lg`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if s == "full" => ContentWidth::Full,
            Some(Value::String(s)) => Breakpoint::from_name(s)
                .map(ContentWidth::Named)
                .or_else(|| {
                    s.trim_end_matches("px")
                        .parse::<f64>()
                        .ok()
                        .map(ContentWidth::Px)
                })
                .unwrap_or(ContentWidth::Named(Breakpoint::Lg)),
            Some(Value::Bool(false)) => ContentWidth::Full,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(ContentWidth::Px)
                .unwrap_or(ContentWidth::Named(Breakpoint::Lg)),
            _ => ContentWidth::Named(Breakpoint::Lg),
        }
    }

    pub fn max_width_css(self) -> Option<String> {
        match self {
            ContentWidth::Named(bp) => Some(px(bp.container_width())),
            ContentWidth::Px(v) => Some(px(v)),
            ContentWidth::Full => None,
        }
    }
}

/// Per-section framing inputs, read from the section's effective props.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOptions {
    pub layout_override: Option<LayoutMode>,
    pub gutter_x: Option<f64>,
    pub bleed_left: bool,
    pub bleed_right: bool,
}

/// Wraps section content in boxed or full-bleed framing.
#[derive(Debug, Clone)]
pub struct Framer {
    layout: LayoutMode,
    default_gutter: Option<ResponsiveValue>,
    breakpoint: Breakpoint,
}

impl Framer {
    pub fn new(
        layout: LayoutMode,
        default_gutter: Option<ResponsiveValue>,
        breakpoint: Breakpoint,
    ) -> Self {
        Self {
            layout,
            default_gutter,
            breakpoint,
        }
    }

    /// Gutter in px: an explicit numeric gutter wins, else the page default.
    pub fn resolve_gutter(&self, opts: &FrameOptions) -> Option<f64> {
        opts.gutter_x
            .or_else(|| resolve_responsive_value(self.default_gutter.as_ref(), self.breakpoint))
    }

    pub fn frame(&self, content: VNode, opts: &FrameOptions) -> VNode {
        let gx = self.resolve_gutter(opts);
        let gutter = px(gx.unwrap_or(0.0));
        let layout = opts.layout_override.unwrap_or(self.layout);

        if layout == LayoutMode::Full {
            let left = if opts.bleed_left { px(0.0) } else { gutter.clone() };
            let right = if opts.bleed_right { px(0.0) } else { gutter };
            return el("div")
                .class("frame-full")
                .style("padding-left", left)
                .style("padding-right", right)
                .child(content)
                .into();
        }

        // A gutter of exactly zero also drops the container's own padding.
        let container_pad = if gx == Some(0.0) {
            0.0
        } else if self.breakpoint >= Breakpoint::Sm {
            24.0
        } else {
            16.0
        };
        el("div")
            .class("frame-boxed")
            .style("max-width", px(Breakpoint::Lg.container_width()))
            .style("margin-left", "auto")
            .style("margin-right", "auto")
            .style("padding-left", px(container_pad))
            .style("padding-right", px(container_pad))
            .child(
                el("div")
                    .class("frame-gutter")
                    .style("padding-left", gutter.clone())
                    .style("padding-right", gutter)
                    .child(content),
            )
            .into()
    }
}

/// `"{n}px"` with integer values written without a fraction.
pub fn px(v: f64) -> String {
    format!("{}px", format_number(v))
}
