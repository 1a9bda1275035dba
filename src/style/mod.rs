//! # Page Style
//!
//! Resolves the page-wide presentation cascade. A page document may carry a
//! `pageStyle` pseudo-section whose props are a flat bag of optional tokens
//! (colours, fonts, card and button looks, background, overlay, widths).
//!
//! Resolution happens once per document:
//!
//! ```text
//! sections ─▶ pick_page_style ─▶ (style bag, content sections)
//!                    │
//!                    ▼
//!          resolve_style_tokens ─▶ StyleTokens (read-only, shared)
//!                    │
//!                    ▼
//!     renderer asks for a token ─▶ token, else ThemeDefaults, else nothing
//! ```
//!
//! A token exists only when its source value is present and non-empty. A
//! missing token is omitted rather than defaulted, so the theming
//! service's value still applies downstream.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Props, Section};
use crate::primitives::{clamp, color_with_opacity, format_number, hex_to_rgba};

/// Ceiling for the page-wide bottom spacing, in px.
pub const MAX_BOTTOM_SPACING: f64 = 240.0;

/// Default card colour and opacity used when only half of the pair is set.
const CARD_BASE_COLOR: &str = "#ffffff";
const CARD_BASE_OPACITY: f64 = 0.92;

/// The raw page-style property bag.
pub type StyleBag = Map<String, Value>;

/// Split the page-style pseudo-section off a section list.
///
/// The first `pageStyle` entry supplies the bag; any later ones are dropped
/// from the render stream. Every other section keeps its relative order.
pub fn pick_page_style(sections: &[Section]) -> (StyleBag, Vec<Section>) {
    let mut style: Option<StyleBag> = None;
    let mut content = Vec::with_capacity(sections.len());
    for section in sections {
        if section.is_page_style() {
            if style.is_none() {
                style = Some(section.props.clone());
            } else {
                log::debug!("ignoring extra pageStyle section");
            }
            continue;
        }
        content.push(section.clone());
    }
    (style.unwrap_or_default(), content)
}

/// A page-scoped presentation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Token {
    HeadingColor,
    BodyColor,
    LinkColor,
    HeadingFont,
    BodyFont,
    HeroHeadingShadow,
    CardBg,
    CardRadius,
    CardShadow,
    CardBlur,
    BtnBg,
    BtnColor,
    BtnRadius,
    SecondaryBg,
}

impl Token {
    /// CSS custom property the token is published under on the page root.
    pub fn css_var(self) -> &'static str {
        match self {
            Token::HeadingColor => "--page-heading-color",
            Token::BodyColor => "--page-body-color",
            Token::LinkColor => "--page-link-color",
            Token::HeadingFont => "--page-heading-font",
            Token::BodyFont => "--page-body-font",
            Token::HeroHeadingShadow => "--page-hero-heading-shadow",
            Token::CardBg => "--page-card-bg",
            Token::CardRadius => "--page-card-radius",
            Token::CardShadow => "--page-card-shadow",
            Token::CardBlur => "--page-card-blur",
            Token::BtnBg => "--page-btn-bg",
            Token::BtnColor => "--page-btn-color",
            Token::BtnRadius => "--page-btn-radius",
            Token::SecondaryBg => "--page-secondary-bg",
        }
    }

    /// Source keys in priority order: primary first, then legacy aliases.
    fn source_keys(self) -> &'static [&'static str] {
        match self {
            Token::HeadingColor => &["headingColor", "textHeadingColor"],
            Token::BodyColor => &["bodyColor", "textBodyColor"],
            Token::LinkColor => &["linkColor", "textLinkColor"],
            Token::HeadingFont => &["headingFont"],
            Token::BodyFont => &["bodyFont"],
            Token::HeroHeadingShadow => &["heroHeadingShadow"],
            Token::CardBg => &["cardBg"],
            Token::CardRadius => &["cardRadius"],
            Token::CardShadow => &["cardShadow"],
            Token::CardBlur => &["cardBlur"],
            Token::BtnBg => &["btnBg", "buttonBg"],
            Token::BtnColor => &["btnColor", "buttonColor"],
            Token::BtnRadius => &["btnRadius", "buttonRadius"],
            Token::SecondaryBg => &["secondaryBackground", "secondaryBackgroundColor"],
        }
    }

    fn is_length(self) -> bool {
        matches!(self, Token::CardRadius | Token::CardBlur | Token::BtnRadius)
    }

    pub const ALL: [Token; 14] = [
        Token::HeadingColor,
        Token::BodyColor,
        Token::LinkColor,
        Token::HeadingFont,
        Token::BodyFont,
        Token::HeroHeadingShadow,
        Token::CardBg,
        Token::CardRadius,
        Token::CardShadow,
        Token::CardBlur,
        Token::BtnBg,
        Token::BtnColor,
        Token::BtnRadius,
        Token::SecondaryBg,
    ];
}

/// A resolved token value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// A length in px (radii, blur).
    Px(f64),
    /// Any other CSS value, verbatim.
    Css(String),
}

impl TokenValue {
    pub fn to_css(&self) -> String {
        match self {
            TokenValue::Px(v) => format!("{}px", format_number(*v)),
            TokenValue::Css(s) => s.clone(),
        }
    }

    pub fn as_px(&self) -> Option<f64> {
        match self {
            TokenValue::Px(v) => Some(*v),
            TokenValue::Css(_) => None,
        }
    }
}

/// The page's resolved token map. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleTokens {
    tokens: IndexMap<Token, TokenValue>,
}

impl StyleTokens {
    pub fn get(&self, token: Token) -> Option<&TokenValue> {
        self.tokens.get(&token)
    }

    pub fn contains(&self, token: Token) -> bool {
        self.tokens.contains_key(&token)
    }

    pub fn px(&self, token: Token) -> Option<f64> {
        self.get(token).and_then(TokenValue::as_px)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, &TokenValue)> {
        self.tokens.iter()
    }

    /// CSS value for a token, falling back to the theme's default.
    pub fn css_or_theme(&self, token: Token, theme: &ThemeDefaults) -> Option<String> {
        self.get(token)
            .map(TokenValue::to_css)
            .or_else(|| theme.get(token).map(str::to_string))
    }

    /// Custom-property declarations for the page root, in token order.
    pub fn css_vars(&self) -> IndexMap<String, String> {
        self.tokens
            .iter()
            .map(|(t, v)| (t.css_var().to_string(), v.to_css()))
            .collect()
    }
}

/// Build the token map from a page-style bag.
pub fn resolve_style_tokens(bag: &StyleBag) -> StyleTokens {
    let props = Props::new(bag);
    let mut tokens = IndexMap::new();

    for token in Token::ALL {
        let value = if token == Token::CardBg {
            card_background(&props)
        } else {
            first_present(&props, token)
        };
        if let Some(v) = value {
            tokens.insert(token, v);
        }
    }
    StyleTokens { tokens }
}

fn first_present(props: &Props<'_>, token: Token) -> Option<TokenValue> {
    token.source_keys().iter().find_map(|key| {
        if token.is_length() {
            props.num(key).map(TokenValue::Px)
        } else {
            props.text(key).map(TokenValue::Css)
        }
    })
}

/// `cardBg` verbatim, else a blend of `cardColor`/`cardOpacity` when either is set.
fn card_background(props: &Props<'_>) -> Option<TokenValue> {
    if let Some(bg) = props.text("cardBg") {
        return Some(TokenValue::Css(bg));
    }
    if !props.has("cardColor") && props.num("cardOpacity").is_none() {
        return None;
    }
    let base = props.text("cardColor").unwrap_or_else(|| CARD_BASE_COLOR.to_string());
    let opacity = props.num("cardOpacity").unwrap_or(CARD_BASE_OPACITY);
    Some(TokenValue::Css(color_with_opacity(&base, opacity)))
}

/// The translucent tint laid over the whole page, if any.
pub fn page_overlay(bag: &StyleBag) -> Option<String> {
    let props = Props::new(bag);
    let color = props.text("overlayColor")?;
    let opacity = props.num("overlayOpacity").unwrap_or(0.0);
    if opacity <= 0.0 {
        return None;
    }
    Some(hex_to_rgba(&color, clamp(opacity, 0.0, 1.0)))
}

/// Page-wide bottom spacing in px, clamped to `[0, MAX_BOTTOM_SPACING]`.
pub fn bottom_spacing(bag: &StyleBag) -> f64 {
    let raw = Props::new(bag).num("pageBottomSpacing").unwrap_or(0.0);
    clamp(raw, 0.0, MAX_BOTTOM_SPACING)
}

/// Background declarations for the page root.
pub fn page_background(bag: &StyleBag) -> IndexMap<String, String> {
    let props = Props::new(bag);
    let mut css = IndexMap::new();
    if let Some(color) = props.text("backgroundColor") {
        css.insert("background-color".to_string(), color);
    }
    if let Some(image) = props.text("backgroundImage") {
        css.insert("background-image".to_string(), format!("url({})", image));
    }
    let with_default = |key: &str, default: &str| props.text_or(key, default);
    css.insert("background-repeat".into(), with_default("backgroundRepeat", "no-repeat"));
    css.insert("background-size".into(), with_default("backgroundSize", "cover"));
    css.insert("background-position".into(), with_default("backgroundPosition", "center"));
    css.insert("background-attachment".into(), with_default("backgroundAttachment", "fixed"));
    css
}

/// Default token values supplied by the external theming service.
///
/// Consulted only when the page's own token map lacks a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeDefaults {
    pub values: IndexMap<Token, String>,
}

impl ThemeDefaults {
    pub fn empty() -> Self {
        Self { values: IndexMap::new() }
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }

    pub fn with(mut self, token: Token, value: &str) -> Self {
        self.values.insert(token, value.to_string());
        self
    }
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self::empty()
            .with(Token::CardRadius, "12px")
            .with(Token::BtnRadius, "10px")
            .with(Token::BtnBg, "var(--sched-primary)")
            .with(Token::BtnColor, "#fff")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(v: Value) -> StyleBag {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_pick_first_page_style_only() {
        let sections = vec![
            Section::new("hero", json!({"heading": "A"})),
            Section::new("pageStyle", json!({"cardRadius": 20})),
            Section::new("faq", json!({})),
            Section::new("pageStyle", json!({"cardRadius": 4})),
        ];
        let (style, rest) = pick_page_style(&sections);
        assert_eq!(style.get("cardRadius"), Some(&json!(20)));
        let kinds: Vec<&str> = rest.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(kinds, vec!["hero", "faq"]);
    }

    #[test]
    fn test_pick_without_page_style() {
        let sections = vec![Section::new("hero", json!({}))];
        let (style, rest) = pick_page_style(&sections);
        assert!(style.is_empty());
        assert_eq!(rest, sections);
    }

    #[test]
    fn test_legacy_aliases_and_priority() {
        let tokens = resolve_style_tokens(&bag(json!({
            "textBodyColor": "#111",
            "headingColor": "#222",
            "textHeadingColor": "#333",
            "linkColor": "",
            "textLinkColor": "#444"
        })));
        assert_eq!(tokens.get(Token::BodyColor), Some(&TokenValue::Css("#111".into())));
        assert_eq!(tokens.get(Token::HeadingColor), Some(&TokenValue::Css("#222".into())));
        // Empty primary falls through to the alias.
        assert_eq!(tokens.get(Token::LinkColor), Some(&TokenValue::Css("#444".into())));
    }

    #[test]
    fn test_missing_tokens_are_omitted() {
        let tokens = resolve_style_tokens(&StyleBag::new());
        assert!(tokens.is_empty());
        assert!(!tokens.contains(Token::CardBg));
    }

    #[test]
    fn test_lengths_become_px() {
        let tokens = resolve_style_tokens(&bag(json!({"cardRadius": 20, "btnRadius": 0})));
        assert_eq!(tokens.px(Token::CardRadius), Some(20.0));
        assert_eq!(tokens.get(Token::BtnRadius).unwrap().to_css(), "0px");
    }

    #[test]
    fn test_card_background_blend() {
        let tokens = resolve_style_tokens(&bag(json!({"cardColor": "#000000", "cardOpacity": 0.5})));
        assert_eq!(
            tokens.get(Token::CardBg).unwrap().to_css(),
            "rgba(0, 0, 0, 0.5)"
        );
        let only_opacity = resolve_style_tokens(&bag(json!({"cardOpacity": 0.8})));
        assert_eq!(
            only_opacity.get(Token::CardBg).unwrap().to_css(),
            "rgba(255, 255, 255, 0.8)"
        );
        let verbatim = resolve_style_tokens(&bag(json!({"cardBg": "rgba(1,2,3,.4)", "cardColor": "#fff"})));
        assert_eq!(verbatim.get(Token::CardBg).unwrap().to_css(), "rgba(1,2,3,.4)");
    }

    #[test]
    fn test_theme_fallback() {
        let theme = ThemeDefaults::default();
        let tokens = resolve_style_tokens(&bag(json!({"btnRadius": 4})));
        assert_eq!(tokens.css_or_theme(Token::BtnRadius, &theme).as_deref(), Some("4px"));
        assert_eq!(tokens.css_or_theme(Token::CardRadius, &theme).as_deref(), Some("12px"));
        assert_eq!(tokens.css_or_theme(Token::HeadingFont, &theme), None);
    }

    #[test]
    fn test_page_overlay() {
        assert_eq!(
            page_overlay(&bag(json!({"overlayColor": "#000", "overlayOpacity": 0.4}))).as_deref(),
            Some("rgba(0, 0, 0, 0.4)")
        );
        assert_eq!(page_overlay(&bag(json!({"overlayColor": "#000", "overlayOpacity": 0}))), None);
        assert_eq!(page_overlay(&bag(json!({"overlayOpacity": 0.5}))), None);
        assert_eq!(
            page_overlay(&bag(json!({"overlayColor": "#fff", "overlayOpacity": 3}))).as_deref(),
            Some("rgba(255, 255, 255, 1)")
        );
    }

    #[test]
    fn test_bottom_spacing_is_clamped() {
        assert_eq!(bottom_spacing(&bag(json!({"pageBottomSpacing": 500}))), 240.0);
        assert_eq!(bottom_spacing(&bag(json!({"pageBottomSpacing": -10}))), 0.0);
        assert_eq!(bottom_spacing(&StyleBag::new()), 0.0);
    }

    #[test]
    fn test_page_background_defaults() {
        let css = page_background(&bag(json!({"backgroundImage": "bg.jpg"})));
        assert_eq!(css.get("background-image").map(String::as_str), Some("url(bg.jpg)"));
        assert_eq!(css.get("background-attachment").map(String::as_str), Some("fixed"));
        assert!(!css.contains_key("background-color"));
    }
}
