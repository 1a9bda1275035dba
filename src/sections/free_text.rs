//! Free-floating text block positioned by translation.

use super::rich;
use crate::layout::px;
use crate::model::Props;
use crate::primitives::format_number;
use crate::tree::{el, VNode};
use crate::widgets::drag::{FreeTextDrag, Position};

pub const DEFAULT_TEXT: &str = "Double-click to edit text. Drag to move. Use arrow keys to nudge.";

/// Render at the drag state's position, else at the `x`/`y` props.
pub(super) fn free_text(p: &Props<'_>, drag: Option<&FreeTextDrag>) -> VNode {
    let pos = drag
        .map(FreeTextDrag::position)
        .unwrap_or_else(|| Position::new(p.num_or("x", 0.0), p.num_or("y", 0.0)));
    let editable = p.bool_or("editable", true);
    let content = p.text("text").unwrap_or_else(|| DEFAULT_TEXT.to_string());

    let block = el("div")
        .class("free-text")
        .attr("tabindex", "0")
        .attr("role", "textbox")
        .attr("aria-label", "Free text")
        .style(
            "transform",
            format!("translate({}px, {}px)", format_number(pos.x), format_number(pos.y)),
        )
        .style("width", px(p.num("width").filter(|w| *w > 0.0).unwrap_or(480.0)))
        .style("text-align", p.text_or("align", "left"))
        .style("font-size", px(p.num_or("fontSize", 24.0)))
        .style("font-weight", format_number(p.num_or("fontWeight", 700.0)))
        .style("color", p.text_or("color", "inherit"))
        .style("background", p.text_or("background", "transparent"))
        .style("padding", px(p.num_or("padding", 8.0)))
        .style("border-radius", px(p.num_or("borderRadius", 8.0)))
        .style("white-space", "pre-wrap")
        .style("cursor", "move")
        .style("user-select", "none");
    let block = if editable {
        block
            .attr("contenteditable", "true")
            .style("outline", "1px dashed rgba(0,0,0,0.2)")
    } else {
        block
    };
    let block = match drag {
        Some(d) if d.is_dragging() => block.attr("data-dragging", "true"),
        _ => block,
    };

    el("div")
        .class("free-text-layer")
        .style("position", "relative")
        .style("height", "0")
        .child(rich(block, &content))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::drag::PointerInput;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let node = free_text(&Props::empty(), None);
        let block = node.find_by_class("free-text")[0];
        assert_eq!(block.get_style("transform"), Some("translate(0px, 0px)"));
        assert_eq!(block.get_style("width"), Some("480px"));
        assert_eq!(block.get_style("font-weight"), Some("700"));
        assert_eq!(block.get_attr("contenteditable"), Some("true"));
        assert_eq!(node.text_content(), DEFAULT_TEXT);
    }

    #[test]
    fn test_drag_position_wins_over_props() {
        let v = json!({"x": 10, "y": 20, "editable": false, "text": "Hi"});
        let p = Props::of(&v);
        let mut drag = FreeTextDrag::new(Position::new(10.0, 20.0));
        drag.pointer_down(PointerInput::primary(0.0, 0.0));
        drag.pointer_move(5.5, -3.0);
        let node = free_text(&p, Some(&drag));
        let block = node.find_by_class("free-text")[0];
        assert_eq!(block.get_style("transform"), Some("translate(15.5px, 17px)"));
        assert_eq!(block.get_attr("contenteditable"), None);
        assert_eq!(block.get_attr("data-dragging"), Some("true"));
    }
}
