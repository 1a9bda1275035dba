//! Static content blocks: pure functions of props.

use super::{
    align, body, body_opt, button, button_opt, card, container, heading, img, item_props, rich,
    title, ButtonVariant, RenderCtx,
};
use crate::layout::{px, Breakpoint, ContentWidth, ResponsiveValue};
use crate::model::Props;
use crate::primitives::{clamp, color_with_opacity, format_number};
use crate::style::Token;
use crate::tree::{el, Element, VNode};

const DEFAULT_HERO_SHADOW: &str = "0 2px 24px rgba(0,0,0,.25)";

// ── Hero ────────────────────────────────────────────────────────────

pub(super) fn hero(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    hero_view(p, p, ctx).into()
}

/// A hero panel. `look` supplies presentation (overlay, height, width),
/// `content` supplies copy and media. A plain hero passes its props as
/// both; a carousel passes section props and the active slide.
pub(super) fn hero_view(look: &Props<'_>, content: &Props<'_>, ctx: &RenderCtx<'_>) -> Element {
    let text_align = align(look, "align", "center");
    let min_height = match look.num("heroHeight").filter(|h| *h > 0.0) {
        Some(vh) => format!("{}vh", format_number(vh)),
        None if ctx.breakpoint >= Breakpoint::Md => px(560.0),
        None => px(380.0),
    };
    let radius = if ctx.breakpoint >= Breakpoint::Md {
        ctx.token(Token::CardRadius)
    } else {
        Some(px(0.0))
    };

    let bg_url = content.text("backgroundUrl").or_else(|| content.text("image"));
    let brightness = look.num_or("brightness", 1.0);
    let background = bg_url.map(|url| {
        el("div")
            .class("hero-bg")
            .attr("aria-hidden", "true")
            .style("background-image", format!("url({})", url))
            .style("background-size", "cover")
            .style("background-position", content.text_or("backgroundPosition", "center"))
            .style_opt(
                "filter",
                (brightness != 0.0 && brightness != 1.0)
                    .then(|| format!("brightness({})", format_number(brightness))),
            )
    });
    let video = content.text("backgroundVideo").map(|src| {
        el("div").class("hero-video").attr("aria-hidden", "true").child(
            el("video")
                .attr("src", src)
                .attr("autoplay", "")
                .attr("muted", "")
                .attr("loop", "")
                .attr("playsinline", ""),
        )
    });
    let tint = color_with_opacity(
        &look.text_or("overlayColor", "#000000"),
        clamp(look.num_or("overlay", 0.35), 0.0, 1.0),
    );
    let gradient = look
        .text("overlayGradient")
        .map(|g| el("div").class("hero-gradient").style("background", g));

    let gutter = look
        .get("gutterX")
        .and_then(ResponsiveValue::from_value)
        .map(|g| px(g.resolve(ctx.breakpoint)));
    let inner = hero_inner(content, text_align, ctx);
    let holder = match ContentWidth::from_value(look.get("contentMaxWidth")) {
        ContentWidth::Full => el("div")
            .class("hero-content")
            .style("width", "100%")
            .style("padding-left", gutter.clone().unwrap_or_else(|| px(16.0)))
            .style("padding-right", gutter.unwrap_or_else(|| px(16.0)))
            .child(inner),
        width => el("div")
            .class("hero-content")
            .style_opt("max-width", width.max_width_css())
            .style("margin-left", "auto")
            .style("margin-right", "auto")
            .child(
                el("div")
                    .style("padding-left", gutter.clone().unwrap_or_else(|| px(0.0)))
                    .style("padding-right", gutter.unwrap_or_else(|| px(0.0)))
                    .child(inner),
            ),
    };

    el("div")
        .class("hero")
        .style("position", "relative")
        .style("overflow", "hidden")
        .style_opt("border-radius", radius)
        .style("min-height", min_height)
        .style_opt(
            "padding-top",
            look.bool_or("safeTop", true).then_some("env(safe-area-inset-top)"),
        )
        .style_opt("color", ctx.tokens.get(Token::BodyColor).map(|v| v.to_css()))
        .child(background)
        .child(video)
        .child(el("div").class("hero-overlay").style("background", tint))
        .child(gradient)
        .child(holder)
}

fn hero_inner(p: &Props<'_>, text_align: &str, ctx: &RenderCtx<'_>) -> Element {
    let shadow = ctx
        .tokens
        .get(Token::HeroHeadingShadow)
        .map(|v| v.to_css())
        .unwrap_or_else(|| DEFAULT_HERO_SHADOW.to_string());
    let ctas = [
        button_opt(p, "ctaText", "ctaLink", ButtonVariant::Contained, ctx),
        button_opt(p, "secondaryCtaText", "secondaryCtaLink", ButtonVariant::Outlined, ctx),
    ];
    let has_cta = ctas.iter().any(Option::is_some);
    el("div")
        .class("hero-inner")
        .style("text-align", text_align)
        .child(p.text("eyebrow").map(|t| rich(el("p").class("eyebrow"), &t)))
        .child(p.text("heading").map(|t| {
            heading("h2", &t, text_align, ctx)
                .class("hero-heading")
                .style("text-shadow", shadow)
        }))
        .child(p.text("subheading").map(|t| body("p", &t, ctx).class("hero-subheading")))
        .child(has_cta.then(|| el("div").class("hero-ctas").children(ctas)))
}

pub(super) fn hero_split(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    container(p)
        .class("hero-split")
        .child(
            el("div")
                .class("split-copy")
                .child(title(p, "heading", "h3", text_align, ctx))
                .child(body_opt(p, "subheading", "p", ctx))
                .child(button_opt(p, "ctaText", "ctaLink", ButtonVariant::Contained, ctx)),
        )
        .child(
            el("div")
                .class("split-media")
                .style_opt("border-radius", ctx.token(Token::CardRadius))
                .child(p.text("image").map(|src| img(&src, ""))),
        )
        .into()
}

// ── Copy blocks ─────────────────────────────────────────────────────

pub(super) fn rich_text(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "align", "left");
    container(p)
        .class("rich-text")
        .child(title(p, "title", "h4", text_align, ctx))
        .child(
            p.text("body")
                .map(|b| body("div", &b, ctx).style("text-align", text_align)),
        )
        .into()
}

pub(super) fn cta(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "center");
    container(p)
        .child(
            card(ctx)
                .class("cta")
                .style("text-align", text_align)
                .child(title(p, "title", "h5", text_align, ctx))
                .child(body_opt(p, "subtitle", "p", ctx))
                .child(button_opt(p, "buttonText", "buttonLink", ButtonVariant::Contained, ctx)),
        )
        .into()
}

pub(super) fn stats(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let items = p.list("items");
    container(p)
        .class("stats")
        .child(title(p, "title", "h4", text_align, ctx))
        .child(el("div").class("grid").children(items.iter().map(|v| {
            let s = item_props(v);
            card(ctx)
                .class("stat")
                .style("text-align", "center")
                .child(s.text("value").map(|t| el("div").class("stat-value").text(t)))
                .child(s.text("label").map(|t| body("div", &t, ctx)))
        })))
        .child(body_opt(p, "disclaimer", "small", ctx))
        .into()
}

pub(super) fn contact(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let line = |label: &str, key: &str| {
        p.text(key).map(|v| {
            el("p")
                .child(el("strong").text(format!("{}:", label)))
                .text(format!(" {}", v))
        })
    };
    let map = match p.text("mapEmbedUrl") {
        Some(url) => el("div").class("contact-map").child(
            el("iframe")
                .attr("src", url)
                .attr("title", "map")
                .attr("loading", "lazy")
                .attr("allowfullscreen", ""),
        ),
        None => card(ctx).child(body("p", "Map unavailable", ctx)),
    };
    container(p)
        .class("contact")
        .child(title(p, "title", "h5", text_align, ctx))
        .child(body_opt(p, "intro", "p", ctx))
        .child(
            el("div")
                .class("grid")
                .child(
                    card(ctx)
                        .child(heading("h6", "Contact us", "left", ctx))
                        .child(line("Email", "email"))
                        .child(line("Phone", "phone"))
                        .child(line("Address", "address")),
                )
                .child(map),
        )
        .into()
}

pub(super) fn footer(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let copy = p.text("text").unwrap_or_else(|| "© Your business".to_string());
    container(p)
        .class("footer")
        .child(el("hr"))
        .child(body("p", &copy, ctx).style("text-align", "center"))
        .into()
}

// ── Lists ───────────────────────────────────────────────────────────

pub(super) fn pricing_table(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let plans = p.list("plans");
    container(p)
        .class("pricing")
        .child(title(p, "title", "h4", text_align, ctx))
        .child(body_opt(p, "intro", "p", ctx))
        .child(el("div").class("grid").children(plans.iter().map(|v| {
            let plan = item_props(v);
            let featured = plan.bool_or("featured", false);
            let variant = if featured {
                ButtonVariant::Contained
            } else {
                ButtonVariant::Outlined
            };
            let mut c = card(ctx).class("plan");
            if featured {
                c = c.class("featured").style("border-width", "2px");
            }
            c.child(plan.text("ribbon").map(|r| el("span").class("ribbon").text(r)))
                .child(plan.text("name").map(|n| heading("h6", &n, "left", ctx)))
                .child(plan.text("price").map(|pr| el("div").class("price").text(pr)))
                .child(el("ul").class("plan-features").children(
                    plan.list("features").iter().filter_map(|f| match f {
                        serde_json::Value::String(s) if !s.is_empty() => {
                            Some(el("li").text(s.clone()))
                        }
                        _ => None,
                    }),
                ))
                .child(button_opt(&plan, "ctaText", "ctaLink", variant, ctx))
        })))
        .into()
}

pub(super) fn faq(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let items = p.list("items");
    container(p)
        .class("faq")
        .child(title(p, "title", "h4", text_align, ctx))
        .children(items.iter().map(|v| {
            let q = item_props(v);
            el("details")
                .class("faq-item")
                .child(el("summary").text(q.text_or("question", "")))
                .child(q.text("answer").map(|a| body("div", &a, ctx)))
        }))
        .into()
}

pub(super) fn logo_cloud(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let monochrome = p.bool_or("monochrome", false);
    let show_labels = p.bool_or("showLabels", false);
    let logos = p.list("logos");
    container(p)
        .class("logo-cloud")
        .child(title(p, "title", "h6", text_align, ctx))
        .child(body_opt(p, "caption", "p", ctx))
        .child(el("div").class("grid").children(logos.iter().filter_map(|v| {
            let l = item_props(v);
            let src = l.text("src")?;
            let alt = l.text_or("alt", "");
            Some(
                el("div")
                    .class("logo")
                    .child(
                        img(&src, &alt)
                            .style("height", "36px")
                            .style("filter", if monochrome { "grayscale(1)" } else { "none" }),
                    )
                    .child((show_labels && !alt.is_empty()).then(|| el("span").class("caption").text(alt))),
            )
        })))
        .into()
}

// ── Media ───────────────────────────────────────────────────────────

/// YouTube and Vimeo links are embedded; anything else is a video file.
pub fn is_embed_url(url: &str) -> bool {
    ["youtube.com", "youtu.be", "vimeo.com"]
        .iter()
        .any(|host| url.contains(host))
}

pub(super) fn video(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let text_align = align(p, "titleAlign", "left");
    let url = p.text("url");
    let player = match url {
        Some(u) if is_embed_url(&u) => el("div")
            .class("video-embed")
            .style("position", "relative")
            .style("padding-top", "56.25%")
            .child(
                el("iframe")
                    .attr("src", u)
                    .attr("title", p.text_or("title", "video"))
                    .attr("loading", "lazy")
                    .attr("allowfullscreen", ""),
            ),
        other => el("video")
            .attr_opt("src", other)
            .attr("controls", "")
            .attr("preload", "metadata")
            .attr_opt("poster", p.text("poster")),
    };
    container(p)
        .class("video")
        .child(title(p, "title", "h4", text_align, ctx))
        .child(body_opt(p, "description", "p", ctx))
        .child(
            el("div")
                .class("video-frame")
                .style_opt("border-radius", ctx.token(Token::CardRadius))
                .child(player),
        )
        .into()
}

pub(super) fn booking_cta_bar(p: &Props<'_>, ctx: &RenderCtx<'_>) -> VNode {
    let label = p.text_or("buttonText", "See availability");
    let href = p.text_or("buttonLink", "?page=services-classic");
    el("div")
        .class("booking-bar")
        .style("position", "sticky")
        .style("bottom", "16px")
        .style("z-index", "1200")
        .child(
            card(ctx)
                .class("booking-bar-inner")
                .child(rich(el("strong"), &p.text_or("text", "Ready to book?")))
                .child(button(&label, Some(href), ButtonVariant::Contained, ctx)),
        )
        .into()
}
