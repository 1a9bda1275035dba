//! # Lightbox
//!
//! Modal full-size image viewer owned by a gallery. Closed is
//! `active == None`; open is `Some(i)` with `i < len`.
//!
//! Navigation wraps at either end when looping is on. With looping off,
//! stepping past an end is a no-op.

use crate::model::Props;
use crate::primitives::parse_aspect_ratio;

use super::{Key, KeyInput};

/// Grid thumbnails are requested at this width.
pub const THUMB_TARGET_WIDTH: u32 = 800;
/// The open lightbox requests images at this width.
pub const FULL_TARGET_WIDTH: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightboxOptions {
    pub enabled: bool,
    pub loop_nav: bool,
    pub show_arrows: bool,
    pub close_on_backdrop: bool,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            loop_nav: true,
            show_arrows: true,
            close_on_backdrop: true,
        }
    }
}

impl LightboxOptions {
    pub fn from_props(p: &Props<'_>) -> Self {
        Self {
            enabled: p.bool_or("lightboxEnabled", true),
            loop_nav: p.bool_or("lightboxLoop", true),
            show_arrows: p.bool_or("lightboxShowArrows", true),
            close_on_backdrop: p.bool_or("lightboxCloseOnBackdrop", true),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    options: LightboxOptions,
    len: usize,
    active: Option<usize>,
}

impl Lightbox {
    pub fn new(len: usize, options: LightboxOptions) -> Self {
        Self {
            options,
            len,
            active: None,
        }
    }

    pub fn options(&self) -> &LightboxOptions {
        &self.options
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Open at `index`. Ignored when the lightbox is disabled or the index
    /// is out of range.
    pub fn open(&mut self, index: usize) -> bool {
        if !self.options.enabled || index >= self.len {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn go_prev(&mut self) {
        if let Some(i) = self.active {
            if i > 0 {
                self.active = Some(i - 1);
            } else if self.options.loop_nav {
                self.active = Some(self.len - 1);
            }
        }
    }

    pub fn go_next(&mut self) {
        if let Some(i) = self.active {
            if i + 1 < self.len {
                self.active = Some(i + 1);
            } else if self.options.loop_nav {
                self.active = Some(0);
            }
        }
    }

    /// A click on the dimmed area around the image.
    pub fn backdrop_click(&mut self) {
        if self.options.close_on_backdrop {
            self.close();
        }
    }

    /// Keyboard handling while open. Returns whether the key was consumed.
    pub fn on_key(&mut self, input: KeyInput) -> bool {
        if !self.is_open() {
            return false;
        }
        match input.key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.go_prev(),
            Key::ArrowRight => self.go_next(),
            _ => return false,
        }
        true
    }

    /// New options from changed props. Disabling closes the viewer.
    pub fn set_options(&mut self, options: LightboxOptions) {
        self.options = options;
        if !options.enabled {
            self.close();
        }
    }

    /// The image list changed. Closes if the open image no longer exists.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.active.is_some_and(|i| i >= len) {
            self.active = None;
        }
    }
}

/// How an image should be fetched: a width and, when the tile has a fixed
/// aspect ratio, a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTarget {
    pub width: u32,
    pub height: Option<u32>,
    pub fit: Fit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Fill the box exactly, cropping overflow.
    Crop,
    /// Scale down to fit inside the box.
    Max,
}

impl Fit {
    fn as_str(self) -> &'static str {
        match self {
            Fit::Crop => "crop",
            Fit::Max => "max",
        }
    }
}

impl ImageTarget {
    /// Append the target as query parameters.
    pub fn apply(&self, src: &str) -> String {
        let sep = if src.contains('?') { '&' } else { '?' };
        let mut url = format!("{}{}w={}", src, sep, self.width);
        if let Some(h) = self.height {
            url.push_str(&format!("&h={}", h));
        }
        url.push_str("&fit=");
        url.push_str(self.fit.as_str());
        url
    }
}

/// Thumbnail and full-size targets for a gallery, both derived from the
/// same configured tile aspect ratio (width / height).
pub fn asset_targets(aspect_ratio: Option<f64>) -> (ImageTarget, ImageTarget) {
    let height = |w: u32| {
        aspect_ratio
            .filter(|r| *r > 0.0)
            .map(|r| (w as f64 / r).round() as u32)
    };
    (
        ImageTarget {
            width: THUMB_TARGET_WIDTH,
            height: height(THUMB_TARGET_WIDTH),
            fit: Fit::Crop,
        },
        ImageTarget {
            width: FULL_TARGET_WIDTH,
            height: height(FULL_TARGET_WIDTH),
            fit: Fit::Max,
        },
    )
}

/// Targets for a gallery's props (`tileAspectRatio`).
pub fn gallery_targets(p: &Props<'_>) -> (ImageTarget, ImageTarget) {
    asset_targets(p.get("tileAspectRatio").and_then(parse_aspect_ratio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(loop_nav: bool) -> LightboxOptions {
        LightboxOptions {
            loop_nav,
            ..Default::default()
        }
    }

    #[test]
    fn test_loop_wraps_both_ways() {
        let mut lb = Lightbox::new(5, opts(true));
        assert!(lb.open(4));
        lb.go_next();
        assert_eq!(lb.active(), Some(0));
        lb.go_prev();
        assert_eq!(lb.active(), Some(4));
    }

    #[test]
    fn test_no_loop_is_bounded() {
        let mut lb = Lightbox::new(3, opts(false));
        lb.open(0);
        lb.go_prev();
        assert_eq!(lb.active(), Some(0));
        lb.open(2);
        lb.go_next();
        assert_eq!(lb.active(), Some(2));
        lb.go_prev();
        assert_eq!(lb.active(), Some(1));
    }

    #[test]
    fn test_disabled_never_opens() {
        let mut lb = Lightbox::new(
            3,
            LightboxOptions {
                enabled: false,
                ..Default::default()
            },
        );
        assert!(!lb.open(1));
        assert!(!lb.is_open());
        lb.go_next();
        assert_eq!(lb.active(), None);
    }

    #[test]
    fn test_keys_and_backdrop() {
        let mut lb = Lightbox::new(3, opts(true));
        assert!(!lb.on_key(KeyInput::new(Key::Escape)));
        lb.open(1);
        assert!(lb.on_key(KeyInput::new(Key::ArrowRight)));
        assert_eq!(lb.active(), Some(2));
        assert!(!lb.on_key(KeyInput::new(Key::Enter)));
        lb.backdrop_click();
        assert!(!lb.is_open());

        let mut sticky = Lightbox::new(
            3,
            LightboxOptions {
                close_on_backdrop: false,
                ..Default::default()
            },
        );
        sticky.open(0);
        sticky.backdrop_click();
        assert!(sticky.is_open());
        sticky.on_key(KeyInput::new(Key::Escape));
        assert!(!sticky.is_open());
    }

    #[test]
    fn test_out_of_range_open_and_shrink() {
        let mut lb = Lightbox::new(2, opts(true));
        assert!(!lb.open(2));
        lb.open(1);
        lb.set_len(1);
        assert!(!lb.is_open());
    }

    #[test]
    fn test_asset_targets_share_ratio() {
        let (thumb, full) = asset_targets(parse_aspect_ratio(&json!("4/5")));
        assert_eq!((thumb.width, thumb.height), (800, Some(1000)));
        assert_eq!((full.width, full.height), (2000, Some(2500)));
        assert_eq!(thumb.apply("a.jpg"), "a.jpg?w=800&h=1000&fit=crop");
        assert_eq!(full.apply("a.jpg?v=2"), "a.jpg?v=2&w=2000&h=2500&fit=max");

        let (thumb, _) = asset_targets(None);
        assert_eq!(thumb.height, None);
    }
}
