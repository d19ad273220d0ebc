// src/nav/anchor.rs
// =============================================================================
// In-page anchor links ("#research-list") and the elements they point at.
//
// A click on such a link scrolls to its target and moves focus there, but
// only if the page actually has an element with that id. A bare "#" or a
// dangling id is left to the browser.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn id_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("[id]").expect("id selector is valid"))
}

/// Ids present on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorTargets {
    ids: BTreeSet<String>,
}

impl AnchorTargets {
    /// Collects every element id in `html`
    pub fn from_html(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let ids = fragment
            .select(id_selector())
            .filter_map(|element| element.value().attr("id"))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        AnchorTargets { ids }
    }

    /// Adds ids of elements that aren't part of the parsed markup, such as
    /// section containers
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// The id an anchor link scrolls to, if it is an in-page link whose
    /// target exists
    pub fn resolve<'a>(&self, href: &'a str) -> Option<&'a str> {
        let id = href.trim().strip_prefix('#')?;
        if id.is_empty() || !self.ids.contains(id) {
            return None;
        }
        Some(id)
    }
}
