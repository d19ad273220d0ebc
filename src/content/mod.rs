// src/content/mod.rs
// =============================================================================
// This module fetches content files (Markdown and JSON) for the portal pages.
//
// Submodules:
// - source: where content comes from (an HTTP host or a static directory)
// - error: the FetchError type every source reports
//
// Nothing here retries or caches. Callers decide what to show on failure.
// =============================================================================

mod error;
mod source;
#[cfg(test)]
pub(crate) mod test_support;

pub use error::FetchError;
pub use source::ContentSource;
