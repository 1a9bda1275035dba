//! # Montage
//!
//! A section-driven page composition engine.
//!
//! A website builder stores each page as an ordered list of typed sections
//! (hero, gallery, testimonials, contact form...) plus one optional
//! `pageStyle` pseudo-section holding page-wide presentation tokens.
//! Montage turns that list into a rendered page: it resolves the style
//! cascade once, gives every section its vertical spacing and framing,
//! dispatches each one to its renderer, and stacks the results.
//!
//! Props are never validated. A section whose fields are missing or of the
//! wrong type still renders whatever it can, and an unknown section type is
//! skipped without failing the page.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON page document)
//!       ↓
//!   [model]     sections, kinds, lenient prop access
//!       ↓
//!   [style]     page-style pick, token map, overlay, background
//!       ↓
//!   [layout]    breakpoints, framing, section spacing
//!       ↓
//!   [sections]  registry + renderers, reading [widgets] state
//!       ↓
//!   [page]      orchestration, live instances on a [runtime] timer queue
//!       ↓
//!   [html]      serialize the [tree]
//! ```

pub mod config;
pub mod error;
pub mod html;
pub mod layout;
pub mod model;
pub mod page;
pub mod primitives;
pub mod runtime;
pub mod sections;
pub mod style;
pub mod tree;
pub mod widgets;

pub use config::EngineConfig;
pub use error::{MontageError, Result};
pub use model::{PageDocument, Section, SectionKind};
pub use page::{Page, SectionEvent, Services};
pub use tree::VNode;

use html::HtmlWriter;

/// Render a document to a tree in one pass.
///
/// This is the primary entry point. Interactive sections show their
/// initial state; nothing is left running.
pub fn render(document: &PageDocument, config: &EngineConfig) -> VNode {
    page::render_document(document, config)
}

/// Render a document described as JSON to an HTML fragment.
pub fn render_json(json: &str, config: &EngineConfig) -> Result<String> {
    let document = PageDocument::from_json_str(json)?;
    Ok(HtmlWriter::new().write(&render(&document, config)))
}
