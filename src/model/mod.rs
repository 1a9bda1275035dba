//! # Document Model
//!
//! The input representation for the composition engine. A page document is
//! an ordered list of sections, each carrying a type tag and a loosely
//! shaped property bag produced by the website builder. Order is render
//! order.
//!
//! Nothing here validates props. A section whose props are missing or of
//! the wrong shape still parses; the renderers treat every field as
//! optional and skip what they can't use.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::primitives::to_array;

/// Reserved tag of the page-style pseudo-section.
pub const PAGE_STYLE_TAG: &str = "pageStyle";

/// A complete page document: sections in render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDocument {
    pub sections: Vec<Section>,
}

impl PageDocument {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Parse a document from JSON text.
    ///
    /// Only malformed JSON is an error. A top-level value that isn't a list
    /// yields an empty document, and list entries that aren't objects become
    /// untyped sections (which never render).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Build a document from an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Self {
        let sections = match value {
            Value::Array(items) => items.iter().map(Section::from_value).collect(),
            Value::Object(map) => match map.get("sections") {
                Some(Value::Array(items)) => items.iter().map(Section::from_value).collect(),
                _ => vec![],
            },
            _ => vec![],
        };
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// One entry of a page document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Type tag. Unknown tags are kept and skipped at dispatch.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub props: Map<String, Value>,

    /// Builder-supplied spacing overrides (`py` in px, anything else passed through).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub sx: Map<String, Value>,
}

impl Section {
    pub fn new(kind: &str, props: Value) -> Self {
        Self {
            id: None,
            kind: kind.to_string(),
            props: match props {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            sx: Map::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_sx(mut self, sx: Value) -> Self {
        if let Value::Object(map) = sx {
            self.sx = map;
        }
        self
    }

    /// Tolerant conversion from an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            log::debug!("non-object section entry ignored");
            return Self::default();
        };
        let id = match map.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let kind = map
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let props = match map.get("props") {
            Some(Value::Object(p)) => p.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                log::debug!("section '{}' has non-object props; treating as empty", kind);
                Map::new()
            }
        };
        let sx = match map.get("sx") {
            Some(Value::Object(s)) => s.clone(),
            _ => Map::new(),
        };
        Self { id, kind, props, sx }
    }

    pub fn is_page_style(&self) -> bool {
        self.kind == PAGE_STYLE_TAG
    }

    pub fn section_kind(&self) -> Option<SectionKind> {
        SectionKind::from_tag(&self.kind)
    }

    pub fn props(&self) -> Props<'_> {
        Props::new(&self.props)
    }
}

/// The closed set of renderable section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    HeroSplit,
    HeroCarousel,
    RichText,
    Cta,
    Stats,
    Contact,
    ContactForm,
    Footer,
    PricingTable,
    Faq,
    LogoCloud,
    LogoCarousel,
    FeatureGrid,
    FeatureZigzag,
    FeaturePillars,
    FeatureStories,
    ServiceGrid,
    Gallery,
    GalleryCarousel,
    Testimonials,
    TestimonialCarousel,
    TestimonialTiles,
    TextFree,
    Video,
    BookingCtaBar,
}

impl SectionKind {
    pub const ALL: [SectionKind; 26] = [
        SectionKind::Hero,
        SectionKind::HeroSplit,
        SectionKind::HeroCarousel,
        SectionKind::RichText,
        SectionKind::Cta,
        SectionKind::Stats,
        SectionKind::Contact,
        SectionKind::ContactForm,
        SectionKind::Footer,
        SectionKind::PricingTable,
        SectionKind::Faq,
        SectionKind::LogoCloud,
        SectionKind::LogoCarousel,
        SectionKind::FeatureGrid,
        SectionKind::FeatureZigzag,
        SectionKind::FeaturePillars,
        SectionKind::FeatureStories,
        SectionKind::ServiceGrid,
        SectionKind::Gallery,
        SectionKind::GalleryCarousel,
        SectionKind::Testimonials,
        SectionKind::TestimonialCarousel,
        SectionKind::TestimonialTiles,
        SectionKind::TextFree,
        SectionKind::Video,
        SectionKind::BookingCtaBar,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::HeroSplit => "heroSplit",
            SectionKind::HeroCarousel => "heroCarousel",
            SectionKind::RichText => "richText",
            SectionKind::Cta => "cta",
            SectionKind::Stats => "stats",
            SectionKind::Contact => "contact",
            SectionKind::ContactForm => "contactForm",
            SectionKind::Footer => "footer",
            SectionKind::PricingTable => "pricingTable",
            SectionKind::Faq => "faq",
            SectionKind::LogoCloud => "logoCloud",
            SectionKind::LogoCarousel => "logoCarousel",
            SectionKind::FeatureGrid => "featureGrid",
            SectionKind::FeatureZigzag => "featureZigzag",
            SectionKind::FeaturePillars => "featurePillars",
            SectionKind::FeatureStories => "featureStories",
            SectionKind::ServiceGrid => "serviceGrid",
            SectionKind::Gallery => "gallery",
            SectionKind::GalleryCarousel => "galleryCarousel",
            SectionKind::Testimonials => "testimonials",
            SectionKind::TestimonialCarousel => "testimonialCarousel",
            SectionKind::TestimonialTiles => "testimonialTiles",
            SectionKind::TextFree => "textFree",
            SectionKind::Video => "video",
            SectionKind::BookingCtaBar => "bookingCtaBar",
        }
    }
}

/// Read-only, absent-safe view over a section's property bag.
///
/// Every accessor answers "absent" for missing keys, nulls, empty strings
/// and wrongly typed values instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Props<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map: Some(map) }
    }

    pub fn empty() -> Self {
        Self { map: None }
    }

    /// View over an arbitrary value: objects expose their keys, anything
    /// else behaves as an empty bag.
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Self::empty(),
        }
    }

    /// Raw value, `None` for missing or `null`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    /// True when the key holds something other than null or an empty string.
    pub fn has(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Non-empty string value. Numbers are stringified.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or_else(|| default.to_string())
    }

    /// Finite number. Numeric strings are not accepted.
    pub fn num(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64().filter(|f| f.is_finite())
    }

    pub fn num_or(&self, key: &str, default: f64) -> f64 {
        self.num(key).unwrap_or(default)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// List value, tolerating JSON-encoded strings (see [`to_array`]).
    pub fn list(&self, key: &str) -> Vec<Value> {
        self.get(key).map(to_array).unwrap_or_default()
    }

    /// Nested object view.
    pub fn obj(&self, key: &str) -> Props<'a> {
        self.get(key).map(Props::of).unwrap_or_else(Props::empty)
    }
}
