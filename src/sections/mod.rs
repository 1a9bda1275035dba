//! # Section Registry
//!
//! Maps each [`SectionKind`] to its renderer. Renderers are plain
//! functions of `(props, state, ctx)` returning a [`VNode`]; they never
//! fail. Missing or wrongly typed props degrade to "not shown", and list
//! props always go through `to_array` before iteration.
//!
//! Interactive kinds own a [`SectionState`] created by [`create_state`].
//! The renderer only reads it; the live page mutates it.
//!
//! ```text
//! Section ─▶ SectionKind::from_tag ─▶ render_kind ─▶ family renderer ─▶ VNode
//!                 │ (unknown tag)
//!                 └──────────────▶ VNode::Empty
//! ```

mod carousels;
mod contact_form;
mod features;
mod free_text;
mod gallery;
mod static_blocks;

use serde_json::Value;

use crate::layout::{Breakpoint, ContentWidth};
use crate::model::{Props, Section, SectionKind};
use crate::runtime::{Owner, TimerQueue};
use crate::style::{StyleTokens, ThemeDefaults, Token};
use crate::tree::{el, text, Element, VNode};
use crate::widgets::autoplay::Autoplay;
use crate::widgets::contact::ContactForm;
use crate::widgets::drag::{FreeTextDrag, Position};
use crate::widgets::lightbox::{Lightbox, LightboxOptions};

/// Intervals shorter than this in `intervalMs` are ignored.
pub const MIN_INTERVAL_MS: u64 = 500;

/// Read-only inputs shared by every renderer in one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx<'a> {
    pub tokens: &'a StyleTokens,
    pub theme: &'a ThemeDefaults,
    pub breakpoint: Breakpoint,
    pub reduced_motion: bool,
}

impl RenderCtx<'_> {
    /// A token's CSS value, else the theme default.
    pub fn token(&self, token: Token) -> Option<String> {
        self.tokens.css_or_theme(token, self.theme)
    }
}

/// State owned by one interactive section instance.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState {
    Carousel(Autoplay),
    Gallery(Lightbox),
    FreeText(FreeTextDrag),
    ContactForm(ContactForm),
}

/// How a carousel kind should autoplay, given its props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    pub len: usize,
    pub interval_ms: u64,
    /// Autoplay switched off by props (reduced motion is applied separately).
    pub autoplay_off: bool,
}

impl CarouselConfig {
    pub fn disabled(&self, reduced_motion: bool) -> bool {
        self.autoplay_off || reduced_motion
    }
}

/// Carousel settings for kinds that own an autoplay cycler; `None` for
/// everything else, including tiles in grid mode and pillars in dense mode.
pub fn carousel_config(kind: SectionKind, p: &Props<'_>) -> Option<CarouselConfig> {
    let (list_key, default_interval, honours_autoplay) = match kind {
        SectionKind::HeroCarousel => ("slides", 6000, true),
        SectionKind::GalleryCarousel => ("images", 4000, true),
        SectionKind::Testimonials => ("items", 6000, false),
        SectionKind::TestimonialCarousel => ("reviews", 5000, true),
        SectionKind::LogoCarousel => ("logos", 4000, true),
        SectionKind::TestimonialTiles if p.text("style").as_deref() == Some("slider") => {
            ("testimonials", 4000, false)
        }
        SectionKind::FeaturePillars if p.text("layout").as_deref() == Some("carousel") => {
            ("pillars", 4000, false)
        }
        _ => return None,
    };
    let interval_ms = p
        .num("intervalMs")
        .filter(|ms| *ms >= MIN_INTERVAL_MS as f64)
        .map(|ms| ms as u64)
        .unwrap_or(default_interval);
    // Sized by what the renderer will actually show.
    let len = match kind {
        SectionKind::GalleryCarousel => carousels::carousel_images(p).len(),
        _ => object_items(p, list_key).len(),
    };
    Some(CarouselConfig {
        len,
        interval_ms,
        autoplay_off: honours_autoplay && !p.bool_or("autoplay", true),
    })
}

/// Build the state for an interactive kind. With a timer queue, carousels
/// start running; without one they are created idle.
pub fn create_state(
    kind: SectionKind,
    p: &Props<'_>,
    owner: Owner,
    reduced_motion: bool,
    timers: Option<&mut TimerQueue>,
) -> Option<SectionState> {
    if let Some(cfg) = carousel_config(kind, p) {
        let disabled = cfg.disabled(reduced_motion);
        let autoplay = match timers {
            Some(q) => Autoplay::start(owner, cfg.len, cfg.interval_ms, disabled, q),
            None => Autoplay::idle(owner, cfg.len, cfg.interval_ms, disabled),
        };
        return Some(SectionState::Carousel(autoplay));
    }
    match kind {
        SectionKind::Gallery => Some(SectionState::Gallery(Lightbox::new(
            gallery::image_list(p).len(),
            LightboxOptions::from_props(p),
        ))),
        SectionKind::TextFree => Some(SectionState::FreeText(FreeTextDrag::new(Position::new(
            p.num_or("x", 0.0),
            p.num_or("y", 0.0),
        )))),
        SectionKind::ContactForm => Some(SectionState::ContactForm(ContactForm::from_props(p))),
        _ => None,
    }
}

/// Feed changed props into a live instance of `kind`.
///
/// Returns false when the instance no longer matches the props (a tiles
/// section switched between grid and slider, say); the caller disposes it
/// and builds a fresh one with [`create_state`].
pub fn update_state(
    state: &mut SectionState,
    kind: SectionKind,
    p: &Props<'_>,
    reduced_motion: bool,
    timers: &mut TimerQueue,
) -> bool {
    match (state, carousel_config(kind, p)) {
        (SectionState::Carousel(a), Some(cfg)) => {
            a.set_len(cfg.len, timers);
            a.set_interval(cfg.interval_ms, timers);
            a.set_disabled(cfg.disabled(reduced_motion), timers);
            true
        }
        (SectionState::Carousel(_), None) | (_, Some(_)) => false,
        (SectionState::Gallery(lb), None) => {
            lb.set_options(LightboxOptions::from_props(p));
            lb.set_len(gallery::image_list(p).len());
            true
        }
        (SectionState::FreeText(d), None) => {
            d.sync_props(p.num_or("x", 0.0), p.num_or("y", 0.0));
            true
        }
        (SectionState::ContactForm(f), None) => {
            let fresh = ContactForm::from_props(p);
            // Typed values survive unless the form itself changed.
            if fresh.form_key() != f.form_key() || fresh.fields() != f.fields() {
                *f = fresh;
            }
            true
        }
    }
}

/// Release everything a live instance holds.
pub fn dispose_state(state: &mut SectionState, timers: &mut TimerQueue) {
    match state {
        SectionState::Carousel(a) => a.dispose(timers),
        SectionState::FreeText(d) => d.dispose(),
        SectionState::Gallery(lb) => lb.close(),
        SectionState::ContactForm(_) => {}
    }
}

/// Render one section. Unknown tags render nothing.
pub fn render_section(section: &Section, state: Option<&SectionState>, ctx: &RenderCtx<'_>) -> VNode {
    match section.section_kind() {
        Some(kind) => render_kind(kind, &section.props(), state, ctx),
        None => {
            log::debug!("no renderer for section type '{}'; skipped", section.kind);
            VNode::Empty
        }
    }
}

pub fn render_kind(
    kind: SectionKind,
    p: &Props<'_>,
    state: Option<&SectionState>,
    ctx: &RenderCtx<'_>,
) -> VNode {
    let index = carousel_index(state);
    match kind {
        SectionKind::Hero => static_blocks::hero(p, ctx),
        SectionKind::HeroSplit => static_blocks::hero_split(p, ctx),
        SectionKind::RichText => static_blocks::rich_text(p, ctx),
        SectionKind::Cta => static_blocks::cta(p, ctx),
        SectionKind::Stats => static_blocks::stats(p, ctx),
        SectionKind::Contact => static_blocks::contact(p, ctx),
        SectionKind::Footer => static_blocks::footer(p, ctx),
        SectionKind::PricingTable => static_blocks::pricing_table(p, ctx),
        SectionKind::Faq => static_blocks::faq(p, ctx),
        SectionKind::LogoCloud => static_blocks::logo_cloud(p, ctx),
        SectionKind::Video => static_blocks::video(p, ctx),
        SectionKind::BookingCtaBar => static_blocks::booking_cta_bar(p, ctx),
        SectionKind::FeatureGrid => features::feature_grid(p, ctx),
        SectionKind::FeatureZigzag => features::feature_zigzag(p, ctx),
        SectionKind::FeaturePillars => features::feature_pillars(p, index, ctx),
        SectionKind::FeatureStories => features::feature_stories(p, ctx),
        SectionKind::ServiceGrid => features::service_grid(p, ctx),
        SectionKind::HeroCarousel => carousels::hero_carousel(p, index, ctx),
        SectionKind::GalleryCarousel => carousels::gallery_carousel(p, index, ctx),
        SectionKind::Testimonials => carousels::testimonials(p, index, ctx),
        SectionKind::TestimonialCarousel => carousels::testimonial_carousel(p, index, ctx),
        SectionKind::LogoCarousel => carousels::logo_carousel(p, index, ctx),
        SectionKind::TestimonialTiles => carousels::testimonial_tiles(p, index, ctx),
        SectionKind::Gallery => {
            let lightbox = match state {
                Some(SectionState::Gallery(lb)) => Some(lb),
                _ => None,
            };
            gallery::gallery(p, lightbox, ctx)
        }
        SectionKind::TextFree => {
            let drag = match state {
                Some(SectionState::FreeText(d)) => Some(d),
                _ => None,
            };
            free_text::free_text(p, drag)
        }
        SectionKind::ContactForm => {
            let form = match state {
                Some(SectionState::ContactForm(f)) => Some(f),
                _ => None,
            };
            contact_form::contact_form(p, form, ctx)
        }
    }
}

fn carousel_index(state: Option<&SectionState>) -> usize {
    match state {
        Some(SectionState::Carousel(a)) => a.index(),
        _ => 0,
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

/// The content container every block renders into.
fn container(p: &Props<'_>) -> Element {
    el("div")
        .class("container")
        .style_opt("max-width", ContentWidth::from_value(p.get("maxWidth")).max_width_css())
        .style("margin-left", "auto")
        .style("margin-right", "auto")
}

fn align(p: &Props<'_>, key: &str, default: &'static str) -> &'static str {
    match p.text(key).as_deref() {
        Some("left") => "left",
        Some("center") => "center",
        Some("right") => "right",
        _ => default,
    }
}

/// A heading carrying the page's heading colour and font.
fn heading(tag: &str, content: &str, text_align: &str, ctx: &RenderCtx<'_>) -> Element {
    rich(
        el(tag)
            .style("text-align", text_align)
            .style_opt("color", ctx.tokens.get(Token::HeadingColor).map(|v| v.to_css()))
            .style_opt("font-family", ctx.tokens.get(Token::HeadingFont).map(|v| v.to_css())),
        content,
    )
}

/// `props[key]` as a heading, if present.
fn title(p: &Props<'_>, key: &str, tag: &str, text_align: &str, ctx: &RenderCtx<'_>) -> Option<Element> {
    p.text(key)
        .map(|t| heading(tag, &t, text_align, ctx).class("section-title"))
}

/// Secondary copy in the page's body colour and font.
fn body(tag: &str, content: &str, ctx: &RenderCtx<'_>) -> Element {
    rich(
        el(tag)
            .class("text-secondary")
            .style_opt("color", ctx.tokens.get(Token::BodyColor).map(|v| v.to_css()))
            .style_opt("font-family", ctx.tokens.get(Token::BodyFont).map(|v| v.to_css())),
        content,
    )
}

fn body_opt(p: &Props<'_>, key: &str, tag: &str, ctx: &RenderCtx<'_>) -> Option<Element> {
    p.text(key).map(|t| body(tag, &t, ctx))
}

/// Append text, turning newlines into `<br>`.
fn rich(mut e: Element, content: &str) -> Element {
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            e = e.child(el("br"));
        }
        if !line.is_empty() {
            e = e.child(text(line));
        }
    }
    e
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonVariant {
    Contained,
    Outlined,
}

/// A link styled as a button from the page's button tokens.
fn button(label: &str, href: Option<String>, variant: ButtonVariant, ctx: &RenderCtx<'_>) -> Element {
    let bg = ctx.token(Token::BtnBg);
    let b = el("a")
        .class("btn")
        .attr("href", href.unwrap_or_else(|| "#".to_string()))
        .attr("aria-label", label)
        .style_opt("border-radius", ctx.token(Token::BtnRadius))
        .text(label);
    match variant {
        ButtonVariant::Contained => b
            .class("btn-contained")
            .style_opt("background-color", bg)
            .style_opt("color", ctx.token(Token::BtnColor)),
        ButtonVariant::Outlined => b
            .class("btn-outlined")
            .style_opt("border-color", bg.clone())
            .style_opt("color", bg)
            .style("background-color", "transparent"),
    }
}

/// `props[text_key]` as a button linking to `props[link_key]`.
fn button_opt(
    p: &Props<'_>,
    text_key: &str,
    link_key: &str,
    variant: ButtonVariant,
    ctx: &RenderCtx<'_>,
) -> Option<Element> {
    p.text(text_key)
        .map(|label| button(&label, p.text(link_key), variant, ctx))
}

/// A surface styled from the card tokens.
fn card(ctx: &RenderCtx<'_>) -> Element {
    el("div")
        .class("card")
        .style_opt("background", ctx.tokens.get(Token::CardBg).map(|v| v.to_css()))
        .style_opt("border-radius", ctx.token(Token::CardRadius))
        .style_opt("box-shadow", ctx.tokens.get(Token::CardShadow).map(|v| v.to_css()))
        .style_opt(
            "backdrop-filter",
            ctx.tokens.px(Token::CardBlur).map(|b| format!("blur({}px)", crate::primitives::format_number(b))),
        )
}

fn img(src: &str, alt: &str) -> Element {
    el("img").attr("src", src).attr("alt", alt).attr("loading", "lazy")
}

/// Navigation dots for a carousel. Each dot is keyboard-activatable.
fn dots(len: usize, active: usize, label: &str) -> Option<Element> {
    if len <= 1 {
        return None;
    }
    Some(
        el("div")
            .class("carousel-dots")
            .attr("role", "tablist")
            .children((0..len).map(|i| {
                let dot = el("span")
                    .class("dot")
                    .attr("role", "tab")
                    .attr("tabindex", "0")
                    .attr("data-index", i.to_string())
                    .attr("aria-label", format!("Go to {} {}", label, i + 1))
                    .attr("aria-selected", (i == active).to_string());
                if i == active {
                    dot.class("active")
                } else {
                    dot
                }
            })),
    )
}

/// Previous / next arrow buttons.
fn arrows(len: usize) -> Vec<Element> {
    if len <= 1 {
        return vec![];
    }
    vec![
        el("button")
            .class("carousel-prev")
            .attr("type", "button")
            .attr("aria-label", "Previous slide")
            .text("‹"),
        el("button")
            .class("carousel-next")
            .attr("type", "button")
            .attr("aria-label", "Next slide")
            .text("›"),
    ]
}

/// Wrap a carousel track with hover-pause hooks and slide count.
fn carousel_root(class: &str, len: usize, active: usize) -> Element {
    el("div")
        .class("carousel")
        .class(class)
        .attr("data-hover-pause", "true")
        .attr("data-slides", len.to_string())
        .attr("data-active", active.to_string())
}

fn item_props(v: &Value) -> Props<'_> {
    Props::of(v)
}

/// The object entries of a list prop. Anything else in the list is skipped.
fn object_items(p: &Props<'_>, key: &str) -> Vec<Value> {
    p.list(key).into_iter().filter(Value::is_object).collect()
}
