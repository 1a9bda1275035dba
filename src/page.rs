//! # Page Composition
//!
//! Turns a [`PageDocument`] into a rendered tree, and keeps a mounted page
//! alive so its interactive sections can react to time and input.
//!
//! ```text
//! PageDocument
//!   │ pick_page_style
//!   ▼
//! (style bag, content sections)
//!   │ resolve_style_tokens, page_overlay, bottom_spacing
//!   ▼
//! PagePlan ── one Slot per known section: effective props, SectionBox, FrameOptions
//!   │
//!   ├─ render_document: idle states, one pass
//!   └─ Page::mount: live states, timers armed
//!            │ advance / dispatch / set_reduced_motion
//!            ▼
//!         compose ─▶ VNode ─▶ HtmlWriter
//! ```
//!
//! The page root carries the background and the token custom properties;
//! an optional overlay tint sits under a stacked content column.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::EngineConfig;
use crate::error::{MontageError, Result};
use crate::html::HtmlWriter;
use crate::layout::spacing::SectionBox;
use crate::layout::{FrameOptions, Framer, LayoutMode, ResponsiveValue};
use crate::model::{PageDocument, Props, Section, SectionKind};
use crate::runtime::TimerQueue;
use crate::sections::{
    self, carousel_config, create_state, dispose_state, update_state, RenderCtx, SectionState,
};
use crate::style::{self, StyleBag, StyleTokens};
use crate::tree::{el, Element, VNode};
use crate::widgets::contact::{ContactSubmitter, SiteContext};
use crate::widgets::drag::PointerInput;
use crate::widgets::{Key, KeyInput};

// ── Plan ────────────────────────────────────────────────────────────

/// One content section, ready to render.
#[derive(Debug, Clone)]
pub struct Slot {
    pub id: Option<String>,
    pub kind: SectionKind,
    /// Props after page-wide width and gutter fallbacks.
    pub props: Map<String, Value>,
    pub spacing: SectionBox,
    pub frame: FrameOptions,
}

impl Slot {
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.props)
    }
}

/// Everything resolved once per document.
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub tokens: StyleTokens,
    pub overlay: Option<String>,
    pub background: IndexMap<String, String>,
    pub bottom_spacing: f64,
    pub slots: Vec<Slot>,
}

impl PagePlan {
    pub fn build(doc: &PageDocument, config: &EngineConfig) -> Self {
        let (bag, content) = style::pick_page_style(&doc.sections);
        let tokens = style::resolve_style_tokens(&bag);
        let overlay = style::page_overlay(&bag);
        let background = style::page_background(&bag);
        let bottom_spacing = style::bottom_spacing(&bag);
        let bp = config.breakpoint();

        let known: Vec<(SectionKind, &Section)> = content
            .iter()
            .filter_map(|s| match s.section_kind() {
                Some(kind) => Some((kind, s)),
                None => {
                    log::debug!("no renderer for section type '{}'; skipped", s.kind);
                    None
                }
            })
            .collect();

        let last = known.len().saturating_sub(1);
        let slots = known
            .into_iter()
            .enumerate()
            .map(|(i, (kind, section))| {
                let props = effective_props(section, &bag);
                let p = Props::new(&props);
                let mut spacing = SectionBox::for_section(&section.sx, &p);
                if i == last {
                    spacing.close_page(bottom_spacing);
                }
                let frame = FrameOptions {
                    layout_override: p.text("layoutOverride").and_then(|l| LayoutMode::from_name(&l)),
                    gutter_x: p
                        .get("gutterX")
                        .and_then(ResponsiveValue::from_value)
                        .map(|g| g.resolve(bp)),
                    bleed_left: p.bool_or("bleedLeft", false),
                    bleed_right: p.bool_or("bleedRight", false),
                };
                Slot {
                    id: section.id.clone(),
                    kind,
                    props,
                    spacing,
                    frame,
                }
            })
            .collect();

        Self {
            tokens,
            overlay,
            background,
            bottom_spacing,
            slots,
        }
    }
}

/// Section props with `maxWidth` and `gutterX` defaulted from the page
/// style's `contentMaxWidth` and `gutterX`.
fn effective_props(section: &Section, bag: &StyleBag) -> Map<String, Value> {
    let mut props = section.props.clone();
    let page = Props::new(bag);
    for (own, page_key) in [("maxWidth", "contentMaxWidth"), ("gutterX", "gutterX")] {
        let unset = matches!(props.get(own), None | Some(Value::Null));
        if unset {
            if let Some(v) = page.get(page_key).filter(|v| !v.is_null()) {
                props.insert(own.to_string(), v.clone());
            }
        }
    }
    props
}

// ── Compose ─────────────────────────────────────────────────────────

fn compose(plan: &PagePlan, states: &[Option<SectionState>], config: &EngineConfig) -> VNode {
    let bp = config.breakpoint();
    let ctx = RenderCtx {
        tokens: &plan.tokens,
        theme: &config.theme,
        breakpoint: bp,
        reduced_motion: config.reduced_motion,
    };
    let framer = Framer::new(config.layout, config.default_gutter_x, bp);

    let stack = el("div")
        .class("page-stack")
        .style("position", "relative")
        .style("z-index", "1")
        .children(plan.slots.iter().enumerate().map(|(i, slot)| {
            let state = states.get(i).and_then(Option::as_ref);
            let content = sections::render_kind(slot.kind, &slot.props(), state, &ctx);
            section_element(slot, i > 0, config)
                .child(framer.frame(content, &slot.frame))
        }));

    let overlay = plan.overlay.as_ref().map(|tint| {
        el("div")
            .class("page-overlay")
            .attr("aria-hidden", "true")
            .style("position", "absolute")
            .style("inset", "0")
            .style("z-index", "0")
            .style("pointer-events", "none")
            .style("background", tint.as_str())
    });

    el("div")
        .class("page-scope")
        .style("position", "relative")
        .style("min-height", "100vh")
        .styles(plan.background.clone())
        .styles(plan.tokens.css_vars())
        .child(overlay)
        .child(stack)
        .into()
}

fn section_element(slot: &Slot, has_previous: bool, config: &EngineConfig) -> Element {
    el("section")
        .attr_opt("id", slot.id.clone())
        .class("section")
        .class(&format!("section-{}", slot.kind.tag()))
        .styles(
            slot.spacing
                .to_css(config.breakpoint(), config.spacing_unit, has_previous),
        )
}

/// Render a document once. Interactive sections show their initial state
/// and no timers are armed.
pub fn render_document(doc: &PageDocument, config: &EngineConfig) -> VNode {
    let plan = PagePlan::build(doc, config);
    let states: Vec<Option<SectionState>> = plan
        .slots
        .iter()
        .enumerate()
        .map(|(i, s)| create_state(s.kind, &s.props(), i, config.reduced_motion, None))
        .collect();
    compose(&plan, &states, config)
}

// ── Live page ───────────────────────────────────────────────────────

/// Host-provided collaborators.
#[derive(Default)]
pub struct Services {
    pub submitter: Option<Box<dyn ContactSubmitter>>,
    pub site: SiteContext,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("submitter", &self.submitter.is_some())
            .field("site", &self.site)
            .finish()
    }
}

/// A user event addressed to one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEvent {
    DotClick(usize),
    /// A key pressed while dot `i` has focus.
    DotKey(usize, KeyInput),
    Prev,
    Next,
    HoverStart,
    HoverEnd,
    OpenImage(usize),
    CloseLightbox,
    LightboxPrev,
    LightboxNext,
    BackdropClick,
    Key(KeyInput),
    PointerDown(PointerInput),
    PointerMove { x: f64, y: f64 },
    PointerUp,
    FieldInput(String, String),
    Submit,
    SyncPosition(f64, f64),
}

/// A mounted page: one instance per content section, a timer queue, and
/// the services interactive sections call out to.
#[derive(Debug)]
pub struct Page {
    config: EngineConfig,
    plan: PagePlan,
    states: Vec<Option<SectionState>>,
    timers: TimerQueue,
    services: Services,
    mounted: bool,
}

impl Page {
    /// Build every section instance and arm carousel timers.
    pub fn mount(doc: &PageDocument, config: EngineConfig, services: Services) -> Self {
        let plan = PagePlan::build(doc, &config);
        let mut timers = TimerQueue::new();
        let states = plan
            .slots
            .iter()
            .enumerate()
            .map(|(i, s)| create_state(s.kind, &s.props(), i, config.reduced_motion, Some(&mut timers)))
            .collect();
        log::debug!(
            "mounted page: {} sections, {} timers armed",
            plan.slots.len(),
            timers.active_count()
        );
        Self {
            config,
            plan,
            states,
            timers,
            services,
            mounted: true,
        }
    }

    pub fn len(&self) -> usize {
        self.plan.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.slots.is_empty()
    }

    pub fn plan(&self) -> &PagePlan {
        &self.plan
    }

    pub fn state(&self, index: usize) -> Option<&SectionState> {
        self.states.get(index).and_then(Option::as_ref)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current virtual time in ms.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Timers currently armed across the page.
    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    pub fn render(&self) -> VNode {
        compose(&self.plan, &self.states, &self.config)
    }

    pub fn to_html(&self) -> String {
        HtmlWriter::new().write(&self.render())
    }

    /// Advance the clock by `ms`, delivering every due tick in order.
    /// Returns how many ticks reached a section.
    pub fn advance(&mut self, ms: u64) -> usize {
        let deadline = self.timers.now().saturating_add(ms);
        let mut delivered = 0;
        while let Some(fired) = self.timers.next_due(deadline) {
            if let Some(Some(SectionState::Carousel(a))) = self.states.get_mut(fired.owner) {
                // A tick from a timer the cycler already replaced is stale.
                if a.timer() == Some(fired.timer) {
                    a.on_tick(&mut self.timers);
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Route a user event. Events that don't apply to the section's kind
    /// are ignored.
    pub fn dispatch(&mut self, index: usize, event: SectionEvent) -> Result<()> {
        if !self.mounted {
            return Err(MontageError::UnknownSection(index));
        }
        let state = self
            .states
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(MontageError::UnknownSection(index))?;
        let timers = &mut self.timers;

        let handled = match (state, event) {
            (SectionState::Carousel(a), SectionEvent::DotClick(i)) => {
                a.set_index(i, timers);
                true
            }
            (SectionState::Carousel(a), SectionEvent::DotKey(i, k)) if k.key.activates() => {
                a.set_index(i, timers);
                true
            }
            (SectionState::Carousel(a), SectionEvent::Prev) => {
                a.step(-1, timers);
                true
            }
            (SectionState::Carousel(a), SectionEvent::Next) => {
                a.step(1, timers);
                true
            }
            (SectionState::Carousel(a), SectionEvent::HoverStart) => {
                a.set_paused(true);
                true
            }
            (SectionState::Carousel(a), SectionEvent::HoverEnd) => {
                a.set_paused(false);
                true
            }
            (SectionState::Carousel(a), SectionEvent::Key(k)) => match k.key {
                Key::ArrowLeft => {
                    a.step(-1, timers);
                    true
                }
                Key::ArrowRight => {
                    a.step(1, timers);
                    true
                }
                _ => false,
            },

            (SectionState::Gallery(lb), SectionEvent::OpenImage(i)) => lb.open(i),
            (SectionState::Gallery(lb), SectionEvent::CloseLightbox) => {
                lb.close();
                true
            }
            (SectionState::Gallery(lb), SectionEvent::LightboxPrev) => {
                lb.go_prev();
                true
            }
            (SectionState::Gallery(lb), SectionEvent::LightboxNext) => {
                lb.go_next();
                true
            }
            (SectionState::Gallery(lb), SectionEvent::BackdropClick) => {
                lb.backdrop_click();
                true
            }
            (SectionState::Gallery(lb), SectionEvent::Key(k)) => lb.on_key(k),

            (SectionState::FreeText(d), SectionEvent::PointerDown(p)) => d.pointer_down(p),
            (SectionState::FreeText(d), SectionEvent::PointerMove { x, y }) => {
                d.pointer_move(x, y);
                true
            }
            (SectionState::FreeText(d), SectionEvent::PointerUp) => {
                d.pointer_up();
                true
            }
            (SectionState::FreeText(d), SectionEvent::Key(k)) => d.on_key(k),
            (SectionState::FreeText(d), SectionEvent::SyncPosition(x, y)) => {
                d.sync_props(x, y);
                true
            }

            (SectionState::ContactForm(f), SectionEvent::FieldInput(name, value)) => {
                f.input(&name, &value);
                true
            }
            (SectionState::ContactForm(f), SectionEvent::Submit) => {
                f.submit(&self.services.site, self.services.submitter.as_deref());
                true
            }

            (_, event) => {
                log::debug!("section {} ignored {:?}", index, event);
                false
            }
        };
        if handled {
            log::trace!("section {} handled event", index);
        }
        Ok(())
    }

    /// Switch the motion preference and re-evaluate every carousel.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.config.reduced_motion = reduced;
        for (slot, state) in self.plan.slots.iter().zip(self.states.iter_mut()) {
            if let Some(SectionState::Carousel(a)) = state {
                let disabled = carousel_config(slot.kind, &slot.props())
                    .map(|c| c.disabled(reduced))
                    .unwrap_or(true);
                a.set_disabled(disabled, &mut self.timers);
            }
        }
    }

    /// Apply a new revision of the document to the mounted page.
    ///
    /// Instances are matched by position. Where the kind is unchanged the
    /// instance keeps its state and takes the new props: carousel length,
    /// interval and autoplay flag, lightbox images and options, free-text
    /// `x`/`y`, contact fields. Anything else is disposed and rebuilt, and
    /// slots past the new end are dropped with their timers.
    pub fn update(&mut self, doc: &PageDocument) {
        if !self.mounted {
            log::debug!("update ignored: page is unmounted");
            return;
        }
        let plan = PagePlan::build(doc, &self.config);
        let reduced = self.config.reduced_motion;
        let mut old = std::mem::take(&mut self.states).into_iter();
        let mut states = Vec::with_capacity(plan.slots.len());

        for (i, slot) in plan.slots.iter().enumerate() {
            let p = slot.props();
            let same_kind = self.plan.slots.get(i).map(|s| s.kind) == Some(slot.kind);
            let mut previous = old.next().flatten();
            let kept = match previous.as_mut() {
                Some(state) => same_kind && update_state(state, slot.kind, &p, reduced, &mut self.timers),
                None => false,
            };
            if !kept {
                if let Some(state) = previous.as_mut() {
                    dispose_state(state, &mut self.timers);
                }
                previous = create_state(slot.kind, &p, i, reduced, Some(&mut self.timers));
            }
            states.push(previous);
        }

        for (offset, state) in old.enumerate() {
            let owner = plan.slots.len() + offset;
            let cancelled = self.timers.cancel_owner(owner);
            if let Some(mut state) = state {
                dispose_state(&mut state, &mut self.timers);
            }
            log::debug!("section {} removed, {} timers cancelled", owner, cancelled);
        }

        self.plan = plan;
        self.states = states;
    }

    /// Dispose every instance. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        for state in self.states.iter_mut().flatten() {
            dispose_state(state, &mut self.timers);
        }
        log::debug!("unmounted page; {} timers left", self.timers.active_count());
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}
