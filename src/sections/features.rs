//! Feature and service blocks.

use serde_json::Value;

use super::{
    align, arrows, body, body_opt, button_opt, card, carousel_root, container, dots, heading, img,
    item_props, object_items, title, ButtonVariant, RenderCtx,
};
use crate::layout::{px, ResponsiveValue};
use crate::model::Props;
use crate::tree::{el, Element, VNode};

/// Non-empty strings of a list prop (bullets, chips, legends).
fn strings(p: &Props<'_>, key: &str) -> Vec<String> {
    p.list(key)
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
        .collect()
}

fn chips(items: &[String], class: &str) -> Option<Element> {
    if items.is_empty() {
        return None;
    }
    Some(
        el("div")
            .class("chips")
            .class(class)
            .children(items.iter().map(|s| el("span").class("chip").text(s.clone()))),
    )
}

fn bullets(items: &[String]) -> Option<Element> {
    if items.is_empty() {
        return None;
    }
    Some(el("ul").children(items.iter().map(|s| el("li").text(s.clone()))))
}

pub(super) fn feature_grid(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let columns = p
        .get("columns")
        .and_then(ResponsiveValue::from_value)
        .map(|c| c.resolve(ctx.breakpoint))
        .filter(|c| *c >= 1.0)
        .unwrap_or(3.0);
    let items = p.list("items");
    container(p)
        .class("feature-grid")
        .child(title(p, "title", "h4", text_align, ctx))
        .child(body_opt(p, "subtitle", "p", ctx))
        .child(
            el("div")
                .class("grid")
                .style("grid-template-columns", format!("repeat({}, 1fr)", columns.round() as u32))
                .children(items.iter().map(|v| {
                    let f = item_props(v);
                    card(ctx)
                        .class("feature")
                        .child(f.text("icon").map(|i| el("span").class("feature-icon").text(i)))
                        .child(f.text("title").map(|t| heading("h6", &t, "left", ctx)))
                        .child(
                            f.text("body")
                                .or_else(|| f.text("description"))
                                .map(|b| body("p", &b, ctx)),
                        )
                })),
        )
        .into()
}

pub(super) fn feature_zigzag(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let rows = p.list("items");
    container(p)
        .class("feature-zigzag")
        .child(p.text("eyebrow").map(|t| el("p").class("eyebrow").text(t)))
        .child(title(p, "title", "h3", text_align, ctx))
        .child(body_opt(p, "supportingText", "p", ctx))
        .children(rows.iter().map(|v| {
            let row = item_props(v);
            // "right" puts the copy second, so the image leads.
            let image_first = row.text("align").as_deref() == Some("right");
            let copy = el("div")
                .class("zigzag-copy")
                .child(row.text("eyebrow").map(|t| el("p").class("eyebrow").text(t)))
                .child(row.text("title").map(|t| heading("h4", &t, "left", ctx)))
                .child(body_opt(&row, "body", "p", ctx))
                .child(button_opt(&row, "ctaText", "ctaLink", ButtonVariant::Contained, ctx));
            let media = el("div").class("zigzag-media").child(
                row.text("imageUrl")
                    .map(|src| img(&src, &row.text_or("imageAlt", ""))),
            );
            let r = el("div").class("zigzag-row");
            if image_first {
                r.class("image-first").child(media).child(copy)
            } else {
                r.child(copy).child(media)
            }
        }))
        .into()
}

fn pillar_card(v: &Value, ctx: &RenderCtx<'_>) -> Element {
    let pl = item_props(v);
    let metrics = pl.list("metrics");
    card(ctx)
        .class("pillar")
        .child(pl.text("icon").map(|i| el("span").class("pillar-icon").text(i)))
        .child(pl.text("label").map(|l| el("span").class("pillar-label").text(l)))
        .child(pl.text("heading").map(|h| heading("h5", &h, "left", ctx)))
        .child(body_opt(&pl, "summary", "p", ctx))
        .child(bullets(&strings(&pl, "bullets")))
        .child((!metrics.is_empty()).then(|| {
            el("dl").class("pillar-metrics").children(metrics.iter().flat_map(|m| {
                let m = item_props(m);
                [
                    el("dt").text(m.text_or("label", "")),
                    el("dd").text(m.text_or("value", "")),
                ]
            }))
        }))
}

/// Dense grid, or a one-at-a-time carousel when `layout = "carousel"`.
pub(super) fn feature_pillars(p: &Props<'_>, index: usize, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "center");
    let pillars = object_items(p, "pillars");
    let carousel = p.text("layout").as_deref() == Some("carousel");

    let body_el = if carousel && !pillars.is_empty() {
        let active = index.min(pillars.len() - 1);
        carousel_root("pillars-carousel", pillars.len(), active)
            .children(pillars.iter().enumerate().map(|(i, v)| {
                let c = pillar_card(v, ctx).attr("aria-hidden", (i != active).to_string());
                if i == active {
                    c
                } else {
                    c.style("display", "none")
                }
            }))
            .children(arrows(pillars.len()))
            .child(dots(pillars.len(), active, "pillar"))
    } else {
        el("div")
            .class("grid")
            .class("pillars-dense")
            .children(pillars.iter().map(|v| pillar_card(v, ctx)))
    };

    container(p)
        .class("feature-pillars")
        .child(p.text("badge").map(|b| el("span").class("badge").text(b)))
        .child(title(p, "title", "h3", text_align, ctx))
        .child(body_opt(p, "caption", "p", ctx))
        .child(body_el)
        .into()
}

pub(super) fn feature_stories(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let look = p.obj("card");
    let stories = p.list("stories");
    let gap = look.num("gap").map(px);
    container(p)
        .class("feature-stories")
        .style_opt("background", look.text("sectionBackground"))
        .child(p.text("badge").map(|b| el("span").class("badge").text(b)))
        .child(title(p, "title", "h3", text_align, ctx))
        .child(body_opt(p, "caption", "p", ctx))
        .child(
            chips(&strings(p, "legend"), "legend")
                .map(|c| c.style("justify-content", align(p, "legendAlign", "center"))),
        )
        .child(
            el("div")
                .class("grid")
                .style_opt("gap", gap)
                .children(stories.iter().filter(|v| v.is_object()).map(|v| {
                    let s = item_props(v);
                    card(ctx)
                        .class("story")
                        .style_opt("background", s.text("background").or_else(|| look.text("surface")))
                        .style_opt("padding", look.num("padding").map(px))
                        .style_opt("border-radius", look.num("radius").map(px))
                        .style_opt("box-shadow", look.text("shadow"))
                        .child(s.text("icon").map(|i| el("span").class("story-icon").text(i)))
                        .child(s.text("title").map(|t| heading("h5", &t, "left", ctx)))
                        .child(s.text("subtitle").map(|t| el("p").class("story-subtitle").text(t)))
                        .child(s.text("statValue").map(|v| {
                            el("div")
                                .class("story-stat")
                                .child(el("strong").text(v))
                                .child(s.text("statLabel").map(|l| el("span").text(l)))
                        }))
                        .child(s.text("feature").map(|f| el("span").class("chip").text(f)))
                        .child(body_opt(&s, "description", "p", ctx))
                        .child(bullets(&strings(&s, "bullets")))
                        .child(button_opt(&s, "ctaText", "ctaLink", ButtonVariant::Outlined, ctx))
                })),
        )
        .child(chips(&strings(p, "metrics"), "metrics"))
        .into()
}

pub(super) fn service_grid(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let items = p.list("items");
    container(p)
        .class("service-grid")
        .child(title(p, "title", "h4", text_align, ctx))
        .child(body_opt(p, "subtitle", "p", ctx))
        .child(el("div").class("grid").children(items.iter().map(|v| {
            let s = item_props(v);
            let tags: Vec<String> = ["price", "meta"].iter().filter_map(|k| s.text(k)).collect();
            card(ctx)
                .class("service")
                .child(s.text("image").map(|src| img(&src, "").style("height", "160px")))
                .child(s.text("name").map(|n| el("strong").text(n)))
                .child(body_opt(&s, "description", "p", ctx))
                .child(chips(&tags, "service-tags"))
        })))
        .child(
            button_opt(p, "ctaText", "ctaLink", ButtonVariant::Contained, ctx)
                .map(|b| el("div").class("service-cta").child(b)),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;
    use crate::style::{StyleTokens, ThemeDefaults};
    use serde_json::json;

    fn render(f: impl FnOnce(&RenderCtx<'_>) -> VNode, bp: Breakpoint) -> VNode {
        let tokens = StyleTokens::default();
        let theme = ThemeDefaults::default();
        let ctx = RenderCtx {
            tokens: &tokens,
            theme: &theme,
            breakpoint: bp,
            reduced_motion: false,
        };
        f(&ctx)
    }

    #[test]
    fn test_pillars_dense_vs_carousel() {
        let v = json!({"pillars": [{"heading": "A"}, {"heading": "B"}, {"heading": "C"}]});
        let node = render(|c| feature_pillars(&Props::of(&v), 0, c), Breakpoint::Lg);
        assert_eq!(node.find_by_class("pillar").len(), 3);
        assert!(node.find_by_class("carousel").is_empty());

        let v = json!({"layout": "carousel", "pillars": [{"heading": "A"}, {"heading": "B"}]});
        let node = render(|c| feature_pillars(&Props::of(&v), 1, c), Breakpoint::Lg);
        let cards = node.find_by_class("pillar");
        assert_eq!(cards[0].get_style("display"), Some("none"));
        assert_eq!(cards[1].get_style("display"), None);
        assert_eq!(node.find_by_class("dot").len(), 2);
    }

    #[test]
    fn test_zigzag_row_order() {
        let v = json!({"items": [{"title": "L"}, {"title": "R", "align": "right"}]});
        let node = render(|c| feature_zigzag(&Props::of(&v), c), Breakpoint::Lg);
        let rows = node.find_by_class("zigzag-row");
        assert!(rows[0].children[0].as_element().unwrap().has_class("zigzag-copy"));
        assert!(rows[1].children[0].as_element().unwrap().has_class("zigzag-media"));
    }

    #[test]
    fn test_feature_grid_responsive_columns() {
        let v = json!({"columns": {"xs": 1, "md": 4}, "items": [{"title": "x"}]});
        let node = render(|c| feature_grid(&Props::of(&v), c), Breakpoint::Xs);
        let grid = node.find_by_class("grid")[0];
        assert_eq!(grid.get_style("grid-template-columns"), Some("repeat(1, 1fr)"));
    }

    #[test]
    fn test_service_grid_chips() {
        let v = json!({"items": [{"name": "Cut", "price": "$20"}], "ctaText": "Book"});
        let node = render(|c| service_grid(&Props::of(&v), c), Breakpoint::Lg);
        assert_eq!(node.find_by_class("chip").len(), 1);
        assert_eq!(node.find_by_class("service-cta").len(), 1);
    }
}
