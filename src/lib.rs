//! # Folio
//!
//! A static generator for single-page personal portfolios. One JSON content
//! document describes the profile, career journey, articles, publications,
//! media coverage and social stats; `folio build` renders it into a page
//! with carousels, navbar search, a light/dark theme and scroll-driven
//! navigation highlighting.
//!
//! # Architecture
//!
//! ```text
//! site.toml ─┐
//!            ├─ config::load_config ─┐
//! content.json ── content::load_content ─┼─ render::render_all → page::Mounts ─┐
//! settings.json ─ generate::Personalization ─────────────────────────────────┴─ generate → dist/
//! ```
//!
//! Everything interactive on the page is modelled here as plain state
//! machines with their side effects injected, so the behaviour is tested in
//! Rust and the embedded page script only mirrors it:
//!
//! - timers behind [`carousel::Scheduler`]
//! - viewport observation behind [`reveal::Observer`]
//! - persistence behind [`settings::SettingsStore`]
//! - DOM mount points as [`page::Slot`]s that may simply be absent
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The content document, its loader, and latest-load-wins arbitration |
//! | [`config`] | `site.toml` loading, validation, merging, and CSS generation |
//! | [`page`] | Mount point ids and the slots renderers fill |
//! | [`render`] | One maud renderer per page section |
//! | [`carousel`] | Carousel state machine, autoplay, drag gestures, markup |
//! | [`search`] | Substring search index, query outcomes, results panel |
//! | [`theme`] | Dark/light theme persisted in the settings store |
//! | [`navigation`] | Scroll spy, anchor scrolling, mobile menu |
//! | [`reveal`] | Reveal-once tracking over an intersection observer |
//! | [`avatar`] | Profile picture validation, fitting, and storage |
//! | [`settings`] | Key/value settings store (file-backed or in-memory) |
//! | [`dates`] | Short date display |
//! | [`generate`] | Builds the page, search index, and asset copy |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Render at Build Time
//!
//! Sections are rendered into the page when it is built rather than fetched
//! and injected in the browser. Each carousel ships already showing slide
//! one with its first indicator active, and a section whose collection is
//! empty ships as a bare track that nothing ever animates.
//!
//! ## Missing Mounts Are Not Errors
//!
//! The layout in `site.toml` decides which sections the page has. A renderer
//! whose mount point is not in the layout receives `None` and returns;
//! nothing is logged. Only a missing or malformed content document is
//! reported, and even then the page is still written.

pub mod avatar;
pub mod carousel;
pub mod config;
pub mod content;
pub mod dates;
pub mod generate;
pub mod navigation;
pub mod output;
pub mod page;
pub mod render;
pub mod reveal;
pub mod search;
pub mod settings;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
