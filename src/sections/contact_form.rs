//! Contact form block. Field state and submission live in
//! [`ContactForm`]; this only draws it.

use super::{align, body_opt, container, heading, RenderCtx};
use crate::layout::{px, ResponsiveValue};
use crate::model::Props;
use crate::style::Token;
use crate::tree::{el, Element, VNode};
use crate::widgets::contact::{ContactForm, FormField, FormStatus, DEFAULT_SUCCESS_MESSAGE};

fn field_view(f: &FormField, value: &str, disabled: bool) -> Element {
    let id = format!("field-{}", f.name);
    let label = el("label")
        .attr("for", id.as_str())
        .text(if f.required { format!("{} *", f.label) } else { f.label.clone() });
    let input = if f.is_textarea() {
        el("textarea").attr("rows", "5").text(value)
    } else {
        el("input").attr("type", f.input_type.as_str()).attr("value", value)
    };
    let input = input
        .attr("id", id.as_str())
        .attr("name", f.name.as_str())
        .attr_opt("placeholder", f.placeholder.clone());
    let input = if f.required { input.attr("required", "true") } else { input };
    let input = if disabled { input.attr("disabled", "true") } else { input };

    let wrap = el("div").class("form-field").child(label).child(input);
    if f.full_row() {
        wrap.class("full-row").style("grid-column", "1 / -1")
    } else {
        wrap
    }
}

fn status_alert(status: &FormStatus, success: &str) -> Option<Element> {
    let (severity, message) = match status {
        FormStatus::Idle => return None,
        FormStatus::Sent => ("success", success.to_string()),
        FormStatus::Failed(msg) => ("error", msg.clone()),
    };
    Some(
        el("div")
            .class("alert")
            .class(&format!("alert-{}", severity))
            .attr("role", "alert")
            .text(message),
    )
}

pub(super) fn contact_form(p: &Props<'_>, form: Option<&ContactForm>, ctx: &RenderCtx<'_>) -> VNode {
    // Without live state the form still renders, empty and idle.
    let owned;
    let form = match form {
        Some(f) => f,
        None => {
            owned = ContactForm::from_props(p);
            &owned
        }
    };
    let sending = form.is_sending();
    let success = p.text("successMessage").unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
    let gutter = p
        .get("gutterX")
        .and_then(ResponsiveValue::from_value)
        .map(|g| g.resolve(ctx.breakpoint));

    let submit = el("button")
        .class("btn")
        .class("btn-contained")
        .attr("type", "submit")
        .style_opt("background-color", ctx.token(Token::BtnBg))
        .style_opt("color", ctx.token(Token::BtnColor))
        .style_opt("border-radius", ctx.token(Token::BtnRadius))
        .text(if sending { "Sending…" } else { "Send message" });
    let submit = if sending { submit.attr("disabled", "true") } else { submit };
    let text_align = align(p, "titleAlign", "left");

    container(p)
        .class("contact-form")
        .style_opt("padding-left", gutter.map(px))
        .style_opt("padding-right", gutter.map(px))
        .child(heading("h4", &p.text_or("title", "Contact Us"), text_align, ctx).class("section-title"))
        .child(body_opt(p, "intro", "p", ctx))
        .child(status_alert(form.status(), &success))
        .child(
            el("form")
                .attr("data-form-key", p.text_or("formKey", "contact"))
                .attr("novalidate", "true")
                .child(
                    el("div")
                        .class("form-grid")
                        .style("display", "grid")
                        .style("grid-template-columns", "repeat(2, 1fr)")
                        .style("gap", "16px")
                        .children(form.fields().iter().map(|f| field_view(f, form.value(&f.name), sending))),
                )
                .child(submit),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;
    use crate::style::{StyleTokens, ThemeDefaults};
    use crate::widgets::contact::{normalize_fields, SiteContext};
    use serde_json::json;

    fn render(p: &Props<'_>, form: Option<&ContactForm>) -> VNode {
        let tokens = StyleTokens::default();
        let theme = ThemeDefaults::default();
        let ctx = RenderCtx {
            tokens: &tokens,
            theme: &theme,
            breakpoint: Breakpoint::Lg,
            reduced_motion: false,
        };
        contact_form(p, form, &ctx)
    }

    #[test]
    fn test_default_form() {
        let node = render(&Props::empty(), None);
        assert_eq!(node.find_by_class("section-title")[0].tag, "h4");
        assert!(node.text_content().contains("Contact Us"));
        assert_eq!(node.find_by_tag("input").len(), 4);
        assert_eq!(node.find_by_tag("textarea").len(), 1);
        let submit = node.find_by_tag("button")[0];
        assert_eq!(submit.get_attr("type"), Some("submit"));
        assert_eq!(submit.get_attr("href"), None);
        assert!(node.find_by_class("alert").is_empty());
    }

    #[test]
    fn test_status_alerts() {
        let v = json!({"successMessage": "Got it", "fields": ["email"]});
        let p = Props::of(&v);
        let mut form = ContactForm::new("contact", normalize_fields(p.get("fields")));
        form.submit(&SiteContext::default(), None);
        let node = render(&p, Some(&form));
        let alert = node.find_by_class("alert")[0];
        assert!(alert.has_class("alert-error"));
        assert_eq!(
            VNode::from(alert.clone()).text_content(),
            "Missing company slug in route."
        );
        assert_eq!(status_alert(&FormStatus::Sent, "Got it").map(|e| e.has_class("alert-success")), Some(true));
    }
}
