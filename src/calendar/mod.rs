//! # Calendar Module
//!
//! The pure core of calinject: everything here is an in-memory transform with
//! no filesystem access, so it can be exercised against plain strings.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog ──select──▶ entries ──render──▶ RenderedBlock ──upsert──▶ document text
//! ```
//!
//! - [`select`] - Picks catalog entries for a week, block and/or topic filter and
//!   orders them by title.
//! - [`render`] - Turns the selection into a deterministic markdown block with a
//!   stable heading, one bullet per entry and a trailing blank line.
//! - [`upsert`] - Places the block into the document using the three-tier
//!   strategy (marker replace, heading-anchored insert, tail append).
//!
//! ## Section Ownership
//!
//! Injected content is wrapped in HTML comment sentinels:
//!
//! ```text
//! <!-- BOOKS_BASE:S3 START -->
//! ### Lecturas base — S3
//!
//! - [Fluent Python](https://...) — Luciano Ramalho (2022, en) — temas: python
//!
//! <!-- BOOKS_BASE:S3 END -->
//! ```
//!
//! Everything between a matching pair belongs to the injector and is rewritten
//! on every run. Text outside the sentinels is never touched, except for the
//! trailing whitespace trimmed before a tail append.
//!
//! Persisting the result (and taking the backup first) is the job of
//! [`crate::management`].

mod inject;
pub mod markers;
mod render;
mod select;

pub use inject::Upserted;
pub use inject::upsert;
pub use markers::MarkerPair;
pub use markers::find_heading_offset;
pub use render::render;
pub use select::matches_key;
pub use select::matches_topics;
pub use select::select;
