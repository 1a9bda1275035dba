//! Autoplaying carousels. Every renderer here takes the active slide
//! index from the section's cycler; without one the first slide shows.

use serde_json::Value;

use super::static_blocks::hero_view;
use super::{
    align, arrows, body, body_opt, card, carousel_root, container, dots, img, item_props,
    object_items, title, RenderCtx,
};
use crate::layout::Breakpoint;
use crate::model::Props;
use crate::primitives::{clamp, format_number};
use crate::tree::{el, Element, VNode};

/// Mark a slide as shown or hidden.
fn slide(e: Element, i: usize, active: usize) -> Element {
    let e = e
        .class("slide")
        .attr("data-index", i.to_string())
        .attr("aria-hidden", (i != active).to_string());
    if i == active {
        e.class("active")
    } else {
        e.style("display", "none")
    }
}

fn active_of(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

/// Slides laid side by side in a track shifted to the active one.
fn track(items: Vec<Element>, active: usize, per_view: usize) -> Element {
    let per_view = per_view.max(1);
    let basis = 100.0 / per_view as f64;
    let offset = basis * active as f64;
    el("div")
        .class("carousel-track")
        .style("display", "flex")
        .style("transform", format!("translateX(-{}%)", format_number(offset)))
        .style("transition", "transform 400ms ease")
        .children(items.into_iter().enumerate().map(|(i, e)| {
            e.class("slide")
                .attr("data-index", i.to_string())
                .style("flex", format!("0 0 {}%", format_number(basis)))
        }))
}

// ── Hero carousel ───────────────────────────────────────────────────

pub(super) fn hero_carousel(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let slides = object_items(p, "slides");
    if slides.is_empty() {
        return VNode::Empty;
    }
    let active = active_of(index, slides.len());
    let current = item_props(&slides[active]);
    carousel_root("hero-carousel", slides.len(), active)
        .style("position", "relative")
        .child(hero_view(p, &current, ctx).attr("data-index", active.to_string()))
        .children(arrows(slides.len()))
        .child(dots(slides.len(), active, "slide"))
        .into()
}

// ── Gallery carousel ────────────────────────────────────────────────

/// Image sources as plain strings or `{src}` records; blanks dropped.
pub(super) fn carousel_images(p: &Props<'_>) -> Vec<String> {
    p.list("images")
        .into_iter()
        .filter_map(|v| match &v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(_) => Props::of(&v).text("src"),
            _ => None,
        })
        .collect()
}

pub(super) fn gallery_carousel(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let images = carousel_images(p);
    let active = active_of(index, images.len());
    let caption = p.text("caption");

    container(p)
        .class("gallery-carousel")
        .child(title(p, "title", "h4", align(p, "titleAlign", "center"), ctx))
        .child((!images.is_empty()).then(|| {
            carousel_root("gallery-carousel-track", images.len(), active)
                .style("position", "relative")
                .children(images.iter().enumerate().map(|(i, src)| {
                    let alt = caption.clone().unwrap_or_else(|| format!("Slide {}", i + 1));
                    slide(el("figure").child(img(src, &alt)), i, active)
                }))
                .children(arrows(images.len()))
                .child(dots(images.len(), active, "slide"))
        }))
        .child(caption.as_deref().map(|c| body("p", c, ctx).class("caption")))
        .into()
}

// ── Testimonials ────────────────────────────────────────────────────

pub(super) fn testimonials(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let items = object_items(p, "items");
    if items.is_empty() {
        return VNode::Empty;
    }
    let active = active_of(index, items.len());
    container(p)
        .class("testimonials")
        .child(title(p, "title", "h4", align(p, "titleAlign", "center"), ctx))
        .child(
            carousel_root("testimonials-track", items.len(), active)
                .children(items.iter().enumerate().map(|(i, v)| {
                    let t = item_props(v);
                    let quote = card(ctx)
                        .child(t.text("avatar").map(|a| img(&a, &t.text_or("author", "")).class("avatar")))
                        .child(
                            t.text("quote")
                                .map(|q| el("blockquote").text(format!("“{}”", q))),
                        )
                        .child(
                            t.text("author")
                                .map(|a| el("p").class("author").text(format!("— {}", a))),
                        );
                    slide(quote, i, active)
                }))
                .child(dots(items.len(), active, "testimonial")),
        )
        .into()
}

/// Reviews per view at this breakpoint.
fn per_view(p: &Props<'_>, bp: Breakpoint) -> usize {
    let pv = p.obj("perView");
    let (key, default) = match bp {
        Breakpoint::Xs => ("mobile", 1.0),
        Breakpoint::Sm => ("tablet", 2.0),
        _ => ("desktop", 3.0),
    };
    clamp(pv.num_or(key, default), 1.0, 6.0).round() as usize
}

fn stars(rating: f64) -> String {
    let full = clamp(rating.round(), 0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

pub(super) fn testimonial_carousel(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let reviews = object_items(p, "reviews");
    let active = active_of(index, reviews.len());
    let view = per_view(p, ctx.breakpoint);
    let cards: Vec<Element> = reviews
        .iter()
        .map(|v| {
            let r = item_props(v);
            let meta: Vec<String> = ["source", "ago"].iter().filter_map(|k| r.text(k)).collect();
            card(ctx)
                .class("review")
                .child(r.num("rating").map(|n| {
                    el("span")
                        .class("rating")
                        .attr("aria-label", format!("{} out of 5", format_number(n)))
                        .text(stars(n))
                }))
                .child(body_opt(&r, "text", "p", ctx))
                .child(r.text("name").map(|n| el("strong").text(n)))
                .child((!meta.is_empty()).then(|| el("small").text(meta.join(" · "))))
        })
        .collect();

    let show_arrows = p.bool_or("showArrows", true);
    let show_dots = p.bool_or("showDots", true);
    container(p)
        .class("testimonial-carousel")
        .child(title(p, "title", "h4", align(p, "titleAlign", "center"), ctx))
        .child((!cards.is_empty()).then(|| {
            carousel_root("reviews", reviews.len(), active)
                .style("overflow", "hidden")
                .child(track(cards, active, view))
                .children(if show_arrows { arrows(reviews.len()) } else { vec![] })
                .child(if show_dots { dots(reviews.len(), active, "review") } else { None })
        }))
        .into()
}

pub(super) fn logo_carousel(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let logos = object_items(p, "logos");
    let active = active_of(index, logos.len());
    let view = match ctx.breakpoint {
        Breakpoint::Xs => 2,
        Breakpoint::Sm => 3,
        _ => 5,
    };
    let items: Vec<Element> = logos
        .iter()
        .map(|v| {
            let l = item_props(v);
            let label = l.text_or("label", "");
            let inner: Element = match l.text("src") {
                Some(src) => img(&src, &label),
                None => el("span").class("logo-label").text(label),
            };
            el("div").class("logo").child(inner)
        })
        .collect();

    container(p)
        .class("logo-carousel")
        .child(title(p, "title", "h5", align(p, "titleAlign", "center"), ctx))
        .child(body_opt(p, "caption", "p", ctx))
        .child((!items.is_empty()).then(|| {
            carousel_root("logos", logos.len(), active)
                .style("overflow", "hidden")
                .child(track(items, active, view))
                .child(if p.bool_or("showDots", true) {
                    dots(logos.len(), active, "logo")
                } else {
                    None
                })
        }))
        .into()
}

// ── Testimonial tiles ───────────────────────────────────────────────

fn tile(v: &Value, ctx: &RenderCtx<'_>) -> Element {
    let t = item_props(v);
    let who: Vec<String> = ["author", "role"].iter().filter_map(|k| t.text(k)).collect();
    card(ctx)
        .class("tile")
        .child(
            el("div")
                .class("tile-head")
                .child(t.text("brand").map(|b| el("strong").class("brand").text(b)))
                .child(t.text("badge").map(|b| el("span").class("badge").text(b))),
        )
        .child(t.text("quote").map(|q| body("blockquote", &format!("“{}”", q), ctx)))
        .child(
            el("div")
                .class("tile-author")
                .child(t.text("avatar").map(|a| img(&a, &t.text_or("author", "")).class("avatar")))
                .child((!who.is_empty()).then(|| el("span").text(who.join(", ")))),
        )
}

/// A grid of quote tiles, or a slider when `style = "slider"`.
pub(super) fn testimonial_tiles(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let tiles = object_items(p, "testimonials");
    let slider = p.text("style").as_deref() == Some("slider");
    let active = active_of(index, tiles.len());

    let inner = if slider && !tiles.is_empty() {
        carousel_root("tiles-slider", tiles.len(), active)
            .children(tiles.iter().enumerate().map(|(i, v)| slide(tile(v, ctx), i, active)))
            .children(arrows(tiles.len()))
            .child(if p.bool_or("showDots", true) {
                dots(tiles.len(), active, "testimonial")
            } else {
                None
            })
    } else {
        el("div")
            .class("grid")
            .class("tiles-grid")
            .children(tiles.iter().map(|v| tile(v, ctx)))
    };

    container(p)
        .class("testimonial-tiles")
        .child(title(p, "title", "h4", align(p, "titleAlign", "center"), ctx))
        .child(body_opt(p, "caption", "p", ctx))
        .child(inner)
        .into()
}
