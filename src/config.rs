//! # Engine Configuration
//!
//! Everything the composition pass needs that isn't in the page document:
//! the framing mode, the viewport the page is composed for, the user's
//! motion preference and the theming service's default tokens.
//!
//! Every field has a default so a partial JSON config file is valid.

use serde::{Deserialize, Serialize};

use crate::error::{MontageError, Result};
use crate::layout::{Breakpoint, Breakpoints, LayoutMode, ResponsiveValue};
use crate::style::ThemeDefaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Page-wide framing mode. Sections may override it with `layout`.
    pub layout: LayoutMode,

    /// Viewport width in px. Selects the active breakpoint.
    pub viewport_width: f64,

    /// The user prefers reduced motion; every carousel stops autoplaying.
    pub reduced_motion: bool,

    /// Gutter used when neither the section nor the page style sets one.
    pub default_gutter_x: Option<ResponsiveValue>,

    pub theme: ThemeDefaults,

    pub breakpoints: Breakpoints,

    /// Pixels per theme spacing unit.
    pub spacing_unit: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Boxed,
            viewport_width: 1280.0,
            reduced_motion: false,
            default_gutter_x: None,
            theme: ThemeDefaults::default(),
            breakpoints: Breakpoints::default(),
            spacing_unit: 8.0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| MontageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.viewport_width.is_finite() || self.viewport_width < 0.0 {
            return Err(MontageError::Config(format!(
                "viewportWidth must be a non-negative number, got {}",
                self.viewport_width
            )));
        }
        if !self.spacing_unit.is_finite() || self.spacing_unit <= 0.0 {
            return Err(MontageError::Config(format!(
                "spacingUnit must be positive, got {}",
                self.spacing_unit
            )));
        }
        let b = &self.breakpoints;
        if !(b.sm <= b.md && b.md <= b.lg && b.lg <= b.xl) {
            return Err(MontageError::Config(
                "breakpoints must be ascending (sm <= md <= lg <= xl)".to_string(),
            ));
        }
        Ok(())
    }

    /// The breakpoint the configured viewport falls into.
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoints.classify(self.viewport_width)
    }

    pub fn with_viewport(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}
