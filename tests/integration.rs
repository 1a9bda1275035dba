//! Integration tests for the Montage composition pipeline.
//!
//! These tests exercise the full path from JSON input to a rendered tree
//! and HTML. They verify:
//! - page-style extraction and token resolution reach the renderers
//! - responsive gutters resolve against the configured viewport
//! - the last section closes the page with the clamped bottom spacing
//! - gallery lightbox navigation on a live page
//! - unknown sections are skipped and malformed props degrade quietly
//! - live pages never leak timers or drag sessions

use montage::layout::{resolve_responsive_value, Breakpoint, LayoutMode, ResponsiveValue};
use montage::model::{PageDocument, Section};
use montage::page::{Page, PagePlan, SectionEvent, Services};
use montage::primitives::{color_with_opacity, parse_aspect_ratio, to_array};
use montage::sections::SectionState;
use montage::style::{bottom_spacing, pick_page_style};
use montage::widgets::{Key, KeyInput};
use montage::{render, render_json, EngineConfig, MontageError, VNode};

use proptest::prelude::*;
use serde_json::{json, Value};

// ─── Helpers ────────────────────────────────────────────────────

fn doc(v: Value) -> PageDocument {
    PageDocument::from_value(&v)
}

fn at_viewport(width: f64) -> EngineConfig {
    EngineConfig::default().with_viewport(width)
}

fn lightbox_index(page: &Page, index: usize) -> Option<usize> {
    match page.state(index) {
        Some(SectionState::Gallery(lb)) => lb.active(),
        _ => None,
    }
}

fn section_style<'a>(node: &'a VNode, i: usize, prop: &str) -> Option<&'a str> {
    node.find_by_tag("section").get(i).and_then(|s| s.get_style(prop))
}

// ─── Scenarios ──────────────────────────────────────────────────

#[test]
fn test_page_style_card_radius_reaches_hero() {
    let d = doc(json!([
        {"type": "pageStyle", "props": {"cardRadius": 20}},
        {"type": "hero", "props": {"heading": "Welcome"}}
    ]));
    let (bag, content) = pick_page_style(&d.sections);
    assert_eq!(Value::Object(bag), json!({"cardRadius": 20}));
    assert_eq!(content, vec![Section::new("hero", json!({"heading": "Welcome"}))]);

    let node = render(&d, &EngineConfig::default());
    let hero = node.find_by_class("hero")[0];
    assert_eq!(hero.get_style("border-radius"), Some("20px"));
    assert!(node.text_content().contains("Welcome"));
}

#[test]
fn test_responsive_gutter_at_xs_viewport() {
    let gutter = ResponsiveValue::from_value(&json!({"xs": 0, "md": 16})).unwrap();
    let config = at_viewport(375.0);
    assert_eq!(config.breakpoint(), Breakpoint::Xs);
    assert_eq!(resolve_responsive_value(Some(&gutter), config.breakpoint()), Some(0.0));

    // The same gutter through the page: a zero gutter drops the container padding too.
    let d = doc(json!([{"type": "richText", "props": {"body": "x", "gutterX": {"xs": 0, "md": 16}}}]));
    let node = render(&d, &config);
    let boxed = node.find_by_class("frame-boxed")[0];
    assert_eq!(boxed.get_style("padding-left"), Some("0px"));
    let node = render(&d, &at_viewport(1000.0));
    let inner = node.find_by_class("frame-gutter")[0];
    assert_eq!(inner.get_style("padding-left"), Some("16px"));
}

#[test]
fn test_last_section_bottom_spacing_is_clamped() {
    let d = doc(json!([
        {"type": "pageStyle", "props": {"pageBottomSpacing": 500}},
        {"type": "richText", "props": {"body": "a"}},
        {"type": "stats", "props": {"items": [{"value": "10", "label": "Years"}]}},
        {"type": "cta", "props": {"title": "Book", "spaceBelow": 12}, "sx": {"pb": 3}}
    ]));
    let plan = PagePlan::build(&d, &EngineConfig::default());
    assert_eq!(plan.bottom_spacing, 240.0);

    let node = render(&d, &EngineConfig::default());
    assert_eq!(node.find_by_tag("section").len(), 3);
    assert_eq!(section_style(&node, 2, "padding-bottom"), Some("240px"));
    assert_eq!(section_style(&node, 2, "margin-bottom"), Some("0px"));
    assert_eq!(section_style(&node, 0, "padding-bottom"), Some("64px"));
}

#[test]
fn test_gallery_lightbox_wraps_on_live_page() {
    let d = doc(json!([
        {"type": "gallery", "props": {"images": ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"]}}
    ]));
    let mut page = Page::mount(&d, EngineConfig::default(), Services::default());
    page.dispatch(0, SectionEvent::OpenImage(4)).unwrap();
    page.dispatch(0, SectionEvent::LightboxNext).unwrap();
    assert_eq!(lightbox_index(&page, 0), Some(0));

    page.dispatch(0, SectionEvent::Key(KeyInput::new(Key::ArrowLeft))).unwrap();
    assert_eq!(lightbox_index(&page, 0), Some(4));
    assert!(page.to_html().contains("5.jpg?w=2000&amp;fit=max"));

    page.dispatch(0, SectionEvent::BackdropClick).unwrap();
    assert_eq!(lightbox_index(&page, 0), None);
    assert!(!page.to_html().contains("role=\"dialog\""));
}

#[test]
fn test_disabled_lightbox_never_opens() {
    let d = doc(json!([
        {"type": "gallery", "props": {"images": ["1.jpg", "2.jpg"], "lightboxEnabled": false}}
    ]));
    let mut page = Page::mount(&d, EngineConfig::default(), Services::default());
    page.dispatch(0, SectionEvent::OpenImage(0)).unwrap();
    assert_eq!(lightbox_index(&page, 0), None);
}

// ─── Pipeline ───────────────────────────────────────────────────

#[test]
fn test_json_to_html() {
    let json = r##"[
        {"type": "pageStyle", "props": {"backgroundColor": "#fafafa", "btnBg": "#ff6a3d"}},
        {"type": "cta", "id": "book", "props": {"title": "Ready?", "buttonText": "Book <now>"}},
        {"type": "footer", "props": {}}
    ]"##;
    let html = render_json(json, &EngineConfig::default()).unwrap();
    assert!(html.starts_with("<div class=\"page-scope\""));
    assert!(html.contains("background-color: #fafafa"));
    assert!(html.contains("--page-btn-bg: #ff6a3d"));
    assert!(html.contains("<section id=\"book\" class=\"section section-cta\""));
    assert!(html.contains("Book &lt;now&gt;"));
    assert!(html.contains("© Your business"));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = render_json("[{\"type\": \"hero\",]", &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, MontageError::Parse { .. }));
    assert!(err.to_string().contains("Hint:"));
}

#[test]
fn test_unknown_types_and_junk_props_do_not_break_the_page() {
    let d = doc(json!([
        {"type": "carouselOfTheFuture", "props": {"title": "nope"}},
        {"type": "testimonials", "props": {"items": "{bad json"}},
        {"type": "pricingTable", "props": {"plans": "[{\"name\": \"Basic\", \"price\": \"$10\"}]"}},
        {"type": "gallery", "props": {"images": 42}},
        "not even an object",
        {"type": "faq", "props": {"items": [null, 3, {"q": "Open?", "a": "Daily"}]}}
    ]));
    let node = render(&d, &EngineConfig::default());
    let sections = node.find_by_tag("section");
    assert_eq!(sections.len(), 4);
    assert!(sections[0].has_class("section-testimonials"));
    assert!(node.text_content().contains("Basic"));
}

#[test]
fn test_full_bleed_layout_and_section_override() {
    let d = doc(json!([
        {"type": "richText", "props": {"body": "a", "gutterX": 24, "bleedLeft": true}},
        {"type": "richText", "props": {"body": "b", "layoutOverride": "boxed"}},
        {"type": "featurePillars", "props": {"layout": "carousel", "pillars": [{}, {}]}}
    ]));
    let config = EngineConfig::default().with_layout(LayoutMode::Full);
    let node = render(&d, &config);
    let full = node.find_by_class("frame-full")[0];
    assert_eq!(full.get_style("padding-left"), Some("0px"));
    assert_eq!(full.get_style("padding-right"), Some("24px"));
    assert_eq!(node.find_by_class("frame-boxed").len(), 1);
    assert_eq!(node.find_by_class("frame-full").len(), 2);

    // And the other way round on a boxed page.
    let d = doc(json!([
        {"type": "richText", "props": {"body": "a", "layoutOverride": "full"}},
        {"type": "richText", "props": {"body": "b"}}
    ]));
    let node = render(&d, &EngineConfig::default());
    assert_eq!(node.find_by_class("frame-full").len(), 1);
    assert_eq!(node.find_by_class("frame-boxed").len(), 1);
}

#[test]
fn test_last_section_long_form_sx_cannot_undo_page_close() {
    let d = doc(json!([
        {"type": "pageStyle", "props": {"pageBottomSpacing": 500}},
        {"type": "richText", "props": {"body": "a"}},
        {"type": "richText", "props": {"body": "b"}},
        {"type": "cta", "props": {"title": "Go", "spaceBelow": 9}, "sx": {"paddingBottom": 12, "marginBottom": 30}}
    ]));
    let node = render(&d, &EngineConfig::default());
    assert_eq!(section_style(&node, 2, "padding-bottom"), Some("240px"));
    assert_eq!(section_style(&node, 2, "margin-bottom"), Some("0px"));
}

#[test]
fn test_built_document_ids_and_sx() {
    let d = PageDocument::new(vec![
        Section::new("richText", json!({"body": "first"})).with_id("intro"),
        Section::new("cta", json!({"title": "Go", "spaceAbove": 2}))
            .with_sx(json!({"pt": 1, "backgroundColor": "#eee"})),
    ]);
    let node = render(&d, &EngineConfig::default());
    let sections = node.find_by_tag("section");
    assert_eq!(sections[0].get_attr("id"), Some("intro"));
    assert_eq!(sections[1].get_attr("id"), None);
    assert_eq!(sections[1].get_style("padding-top"), Some("8px"));
    assert_eq!(sections[1].get_style("margin-top"), Some("16px"));
    assert_eq!(sections[1].get_style("background-color"), Some("#eee"));
}

// ─── Live page lifecycle ────────────────────────────────────────

#[test]
fn test_hover_pause_is_intent_only() {
    let d = doc(json!([
        {"type": "testimonialCarousel", "props": {"reviews": [{"text": "a"}, {"text": "b"}, {"text": "c"}]}}
    ]));
    let mut page = Page::mount(&d, EngineConfig::default(), Services::default());
    page.dispatch(0, SectionEvent::HoverStart).unwrap();
    // The armed interval still lands, then the paused cycler stays idle.
    assert_eq!(page.advance(5_000), 1);
    match page.state(0) {
        Some(SectionState::Carousel(a)) => {
            assert!(a.is_paused());
            assert!(!a.is_running());
            assert!(!a.is_disabled());
            assert_eq!(a.index(), 1);
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert_eq!(page.advance(20_000), 0);
}

#[test]
fn test_carousels_tick_independently() {
    let d = doc(json!([
        {"type": "heroCarousel", "props": {"slides": [{"heading": "A"}, {"heading": "B"}]}},
        {"type": "logoCarousel", "props": {"logos": [{"label": "x"}, {"label": "y"}, {"label": "z"}]}}
    ]));
    let mut page = Page::mount(&d, EngineConfig::default(), Services::default());
    assert_eq!(page.active_timers(), 2);
    // Logos tick at 4000 and 8000, the hero at 6000.
    assert_eq!(page.advance(8_000), 3);
    let index = |p: &Page, i: usize| match p.state(i) {
        Some(SectionState::Carousel(a)) => a.index(),
        _ => usize::MAX,
    };
    assert_eq!(index(&page, 0), 1);
    assert_eq!(index(&page, 1), 2);
    assert!(page.to_html().contains(">B<"));
}

#[test]
fn test_unmount_cancels_every_timer_once() {
    let d = doc(json!([
        {"type": "heroCarousel", "props": {"slides": [{}, {}]}},
        {"type": "testimonials", "props": {"items": [{"quote": "a"}, {"quote": "b"}]}},
        {"type": "textFree", "props": {}}
    ]));
    let mut page = Page::mount(&d, EngineConfig::default(), Services::default());
    page.dispatch(2, SectionEvent::PointerDown(montage::widgets::drag::PointerInput::primary(0.0, 0.0)))
        .unwrap();
    assert_eq!(page.active_timers(), 2);
    page.unmount();
    assert_eq!(page.active_timers(), 0);
    assert!(!page.is_mounted());
    assert_eq!(page.advance(60_000), 0);
    match page.state(2) {
        Some(SectionState::FreeText(d)) => assert_eq!(d.releases(), 1),
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn test_reduced_motion_config_arms_nothing() {
    let d = doc(json!([
        {"type": "galleryCarousel", "props": {"images": ["a.jpg", "b.jpg"]}},
        {"type": "featurePillars", "props": {"layout": "carousel", "pillars": [{}, {}]}}
    ]));
    let config = EngineConfig::default().with_reduced_motion(true);
    let mut page = Page::mount(&d, config, Services::default());
    assert_eq!(page.active_timers(), 0);
    // Manual navigation still works.
    page.dispatch(1, SectionEvent::DotClick(1)).unwrap();
    match page.state(1) {
        Some(SectionState::Carousel(a)) => assert_eq!(a.index(), 1),
        other => panic!("unexpected state {:?}", other),
    }
}

// ─── Primitives ─────────────────────────────────────────────────

#[test]
fn test_aspect_ratio_and_to_array() {
    assert_eq!(parse_aspect_ratio(&json!("16/9")), Some(16.0 / 9.0));
    assert_eq!(parse_aspect_ratio(&json!(1.5)), Some(1.5));
    assert_eq!(parse_aspect_ratio(&json!("not-a-ratio")), None);
    assert_eq!(to_array(&json!("[1,2,3]")), vec![json!(1), json!(2), json!(3)]);
    assert!(to_array(&json!("{bad json")).is_empty());
    assert!(to_array(&json!(42)).is_empty());
}

#[test]
fn test_bottom_spacing_clamp() {
    let bag = |v: Value| v.as_object().cloned().unwrap_or_default();
    assert_eq!(bottom_spacing(&bag(json!({"pageBottomSpacing": -5}))), 0.0);
    assert_eq!(bottom_spacing(&bag(json!({}))), 0.0);
    assert_eq!(bottom_spacing(&bag(json!({"pageBottomSpacing": 96}))), 96.0);
}

proptest! {
    #[test]
    fn prop_hex_channels_survive_opacity(r in 0u8.., g in 0u8.., b in 0u8.., o in 0.0f64..=1.0) {
        let hex = format!("#{:02x}{:02x}{:02x}", r, g, b);
        let out = color_with_opacity(&hex, o);
        let prefix = format!("rgba({}, {}, {}, ", r, g, b);
        prop_assert!(out.starts_with(&prefix), "{} from {}", out, hex);
    }

    #[test]
    fn prop_page_style_extraction_keeps_order(
        kinds in prop::collection::vec(prop::sample::select(vec!["hero", "faq", "cta", "mystery"]), 0..12),
        style_at in prop::option::of(0usize..12),
    ) {
        let mut sections: Vec<Section> = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| Section::new(k, json!({"n": i})))
            .collect();
        let has_style = match style_at {
            Some(at) if at <= sections.len() => {
                sections.insert(at, Section::new("pageStyle", json!({"cardRadius": 4})));
                true
            }
            _ => false,
        };
        let (bag, content) = pick_page_style(&sections);
        if has_style {
            prop_assert_eq!(content.len(), sections.len() - 1);
            prop_assert_eq!(bag.get("cardRadius"), Some(&json!(4)));
        } else {
            prop_assert_eq!(&content, &sections);
            prop_assert!(bag.is_empty());
        }
        let order: Vec<&Value> = content.iter().filter_map(|s| s.props.get("n")).collect();
        let expected: Vec<Value> = (0..kinds.len()).map(|i| json!(i)).collect();
        prop_assert_eq!(order, expected.iter().collect::<Vec<_>>());
    }
}
