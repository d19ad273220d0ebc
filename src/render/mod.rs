// src/render/mod.rs
// =============================================================================
// Everything that turns content into HTML.
//
// Submodules:
// - html: escaping and the shared error / empty-state messages
// - loose: forgiving deserializers for hand-edited record fields
// - markdown: the restricted Markdown renderer
// - records: typed content records and their templates
// - collection: filtering records and joining their fragments
// - section: async loaders that fetch content for one render target
//
// The first four are pure functions; only section touches a ContentSource.
// =============================================================================

pub mod collection;
pub mod html;
pub mod loose;
pub mod markdown;
pub mod records;
pub mod section;

pub use collection::ResearchFilter;
pub use markdown::render_markdown;
pub use section::{SectionRender, SectionStatus};
