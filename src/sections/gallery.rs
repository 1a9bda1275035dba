//! Image gallery with an optional lightbox.

use serde_json::Value;

use super::{align, body_opt, container, img, title, RenderCtx};
use crate::layout::{px, ResponsiveValue};
use crate::model::Props;
use crate::primitives::{format_number, parse_aspect_ratio};
use crate::tree::{el, Element, VNode};
use crate::widgets::lightbox::{gallery_targets, Lightbox};

const DEFAULT_GAP: f64 = 18.0;

/// `(src, alt)` for every usable entry of `images`. Entries may be plain
/// URLs or `{src, alt}` objects; blank sources are dropped.
pub(super) fn image_list(p: &Props<'_>) -> Vec<(String, String)> {
    p.list("images")
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let (src, alt) = match v {
                Value::String(s) => (s.trim().to_string(), None),
                Value::Object(_) => {
                    let item = Props::of(v);
                    (item.text_or("src", "").trim().to_string(), item.text("alt"))
                }
                _ => return None,
            };
            if src.is_empty() {
                return None;
            }
            Some((src, alt.unwrap_or_else(|| format!("Image {}", i + 1))))
        })
        .collect()
}

/// Column count at the current breakpoint: `columns` as a number or
/// responsive record, else the `columnsXs/Sm/Md` trio.
fn columns(p: &Props<'_>, ctx: &RenderCtx<'_>) -> u32 {
    let responsive = p
        .get("columns")
        .and_then(ResponsiveValue::from_value)
        .unwrap_or(ResponsiveValue::ByBreakpoint {
            xs: Some(p.num_or("columnsXs", 2.0)),
            sm: Some(p.num_or("columnsSm", 2.0)),
            md: Some(p.num_or("columnsMd", 3.0)),
            lg: None,
        });
    responsive.resolve(ctx.breakpoint).round().max(1.0) as u32
}

fn tile(i: usize, thumb: String, alt: &str, p: &Props<'_>, clickable: bool) -> Element {
    let ratio = p.get("tileAspectRatio").and_then(parse_aspect_ratio);
    let t = el("figure")
        .class("gallery-tile")
        .attr("data-index", i.to_string())
        .style_opt("aspect-ratio", ratio.map(format_number))
        .style_opt("border-radius", p.num("tileBorderRadius").map(px))
        .style_opt("border", p.text("tileBorder"))
        .style("overflow", "hidden")
        .child(img(&thumb, alt).style("width", "100%").style("height", "100%").style("object-fit", "cover"));
    let t = if p.bool_or("tileHoverLift", true) {
        t.class("hover-lift")
    } else {
        t
    };
    if clickable {
        t.attr("role", "button")
            .attr("tabindex", "0")
            .attr("aria-label", format!("Open image {}", i + 1))
            .style("cursor", "zoom-in")
    } else {
        t
    }
}

fn lightbox_overlay(lb: &Lightbox, images: &[(String, String)], p: &Props<'_>) -> Option<Element> {
    let i = lb.active()?;
    let (src, alt) = images.get(i)?;
    let full = gallery_targets(p).1.apply(src);
    let opts = lb.options();
    let nav = |class: &str, label: &str, glyph: &str| {
        el("button")
            .class(class)
            .attr("type", "button")
            .attr("aria-label", label)
            .text(glyph)
    };
    let show_arrows = opts.show_arrows && images.len() > 1;
    Some(
        el("div")
            .class("lightbox")
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr("aria-label", alt.as_str())
            .attr("data-close-on-backdrop", opts.close_on_backdrop.to_string())
            .style("position", "fixed")
            .style("inset", "0")
            .style("z-index", "1300")
            .style("background", "rgba(0,0,0,0.85)")
            .child(nav("lightbox-close", "Close", "×"))
            .child(show_arrows.then(|| nav("lightbox-prev", "Previous image", "‹")))
            .child(
                el("img")
                    .class("lightbox-image")
                    .attr("src", full)
                    .attr("alt", alt.as_str())
                    .style("max-width", "92vw")
                    .style("max-height", "88vh"),
            )
            .child(show_arrows.then(|| nav("lightbox-next", "Next image", "›")))
            .child(
                el("span")
                    .class("lightbox-counter")
                    .text(format!("{} / {}", i + 1, images.len())),
            ),
    )
}

pub(super) fn gallery(p: &Props<'_>, lightbox: Option<&Lightbox>, ctx: &RenderCtx<'_>) -> VNode {
    let images = image_list(p);
    let (thumb_target, _) = gallery_targets(p);
    let clickable = lightbox.is_some_and(|lb| lb.options().enabled);
    let gap = p.num("gap").filter(|g| *g >= 0.0).unwrap_or(DEFAULT_GAP);

    container(p)
        .class("gallery")
        .child(title(p, "title", "h4", align(p, "titleAlign", "center"), ctx))
        .child(body_opt(p, "subtitle", "p", ctx))
        .child((!images.is_empty()).then(|| {
            el("div")
                .class("gallery-grid")
                .style("display", "grid")
                .style("grid-template-columns", format!("repeat({}, 1fr)", columns(p, ctx)))
                .style("gap", px(gap))
                .children(
                    images
                        .iter()
                        .enumerate()
                        .map(|(i, (src, alt))| tile(i, thumb_target.apply(src), alt, p, clickable)),
                )
        }))
        .child(lightbox.and_then(|lb| lightbox_overlay(lb, &images, p)))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;
    use crate::style::{StyleTokens, ThemeDefaults};
    use crate::widgets::lightbox::LightboxOptions;
    use serde_json::json;

    fn render(v: &Value, lb: Option<&Lightbox>, bp: Breakpoint) -> VNode {
        let tokens = StyleTokens::default();
        let theme = ThemeDefaults::default();
        let ctx = RenderCtx {
            tokens: &tokens,
            theme: &theme,
            breakpoint: bp,
            reduced_motion: false,
        };
        gallery(&Props::of(v), lb, &ctx)
    }

    #[test]
    fn test_image_list_mixed_entries() {
        let v = json!({"images": ["a.jpg", {"src": "b.jpg", "alt": "Bee"}, {"alt": "none"}, " ", 3]});
        let list = image_list(&Props::of(&v));
        assert_eq!(
            list,
            vec![("a.jpg".to_string(), "Image 1".to_string()), ("b.jpg".to_string(), "Bee".to_string())]
        );
    }

    #[test]
    fn test_columns_from_trio_and_record() {
        let v = json!({"images": ["a.jpg"], "columnsMd": 4});
        let node = render(&v, None, Breakpoint::Lg);
        let grid = node.find_by_class("gallery-grid")[0];
        assert_eq!(grid.get_style("grid-template-columns"), Some("repeat(4, 1fr)"));
        assert_eq!(grid.get_style("gap"), Some("18px"));

        let v = json!({"images": ["a.jpg"], "columns": {"xs": 1, "md": 5}});
        let node = render(&v, None, Breakpoint::Xs);
        let grid = node.find_by_class("gallery-grid")[0];
        assert_eq!(grid.get_style("grid-template-columns"), Some("repeat(1, 1fr)"));
    }

    #[test]
    fn test_thumbnails_use_crop_target() {
        let v = json!({"images": ["https://cdn.test/a.jpg"], "tileAspectRatio": "4/3"});
        let node = render(&v, None, Breakpoint::Lg);
        let img = node.find_by_tag("img")[0];
        assert_eq!(img.get_attr("src"), Some("https://cdn.test/a.jpg?w=800&h=600&fit=crop"));
    }

    #[test]
    fn test_open_lightbox_without_loop_or_arrows() {
        let v = json!({
            "images": ["a.jpg", "b.jpg", "c.jpg"],
            "lightboxLoop": false,
            "lightboxShowArrows": false
        });
        let p = Props::of(&v);
        let mut lb = Lightbox::new(3, LightboxOptions::from_props(&p));
        lb.open(2);
        lb.go_next();
        assert_eq!(lb.active(), Some(2));

        let node = render(&v, Some(&lb), Breakpoint::Lg);
        let dialog = node.find_by_class("lightbox")[0];
        assert_eq!(dialog.get_attr("role"), Some("dialog"));
        assert!(node.find_by_class("lightbox-next").is_empty());
        let full = node.find_by_class("lightbox-image")[0];
        assert_eq!(full.get_attr("src"), Some("c.jpg?w=2000&fit=max"));
        assert_eq!(node.find_by_class("gallery-tile")[0].get_attr("role"), Some("button"));
    }

    #[test]
    fn test_closed_or_disabled_lightbox() {
        let v = json!({"images": ["a.jpg"], "lightboxEnabled": false});
        let p = Props::of(&v);
        let lb = Lightbox::new(1, LightboxOptions::from_props(&p));
        let node = render(&v, Some(&lb), Breakpoint::Lg);
        assert!(node.find_by_class("lightbox").is_empty());
        assert_eq!(node.find_by_class("gallery-tile")[0].get_attr("role"), None);
    }
}
