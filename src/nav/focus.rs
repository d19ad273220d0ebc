// src/nav/focus.rs
// =============================================================================
// Finds the keyboard-focusable elements inside the navigation menu.
//
// The focus trap cycles through these in document order. The menu markup is
// parsed with `scraper` and matched against one CSS selector list, the same
// way a browser decides what Tab can land on.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::OnceLock;

const FOCUSABLE: &str = "a[href], area[href], button:not([disabled]), \
     input:not([disabled]):not([type=\"hidden\"]), select:not([disabled]), \
     textarea:not([disabled]), [tabindex]";

// The selector is a constant, so parsing can only fail on a programmer error
fn focusable_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(FOCUSABLE).expect("focusable selector is valid"))
}

/// One element Tab can move to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Focusable {
    pub tag: String,
    /// "#id" when the element has an id, else its href, else its text
    pub label: String,
}

/// The menu's focusable elements, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusOrder {
    items: Vec<Focusable>,
}

impl FocusOrder {
    /// Collects focusable elements from the menu's HTML
    pub fn from_menu_html(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let items = fragment
            .select(focusable_selector())
            .filter(|element| !has_negative_tabindex(element))
            .map(|element| Focusable {
                tag: element.value().name().to_string(),
                label: label_of(&element),
            })
            .collect();
        FocusOrder { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Focusable> {
        self.items.get(index)
    }

    /// Index Tab (or Shift+Tab when `backwards`) moves to from `current`,
    /// wrapping at both ends
    pub fn next(&self, current: Option<usize>, backwards: bool) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        Some(next)
    }
}

// tabindex="-1" takes an element out of the Tab sequence even if it would
// otherwise be focusable
fn has_negative_tabindex(element: &ElementRef) -> bool {
    element
        .value()
        .attr("tabindex")
        .and_then(|v| v.trim().parse::<i32>().ok())
        .is_some_and(|v| v < 0)
}

fn label_of(element: &ElementRef) -> String {
    if let Some(id) = element.value().attr("id") {
        return format!("#{}", id);
    }
    if let Some(href) = element.value().attr("href") {
        return href.to_string();
    }
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r##"
        <nav class="main-navigation">
          <ul>
            <li><a href="/">Home</a></li>
            <li><a>No href</a></li>
            <li><a href="/about/" tabindex="-1">Hidden</a></li>
            <li><button id="search" type="button">Search</button></li>
            <li><button disabled>Off</button></li>
            <li><input type="hidden" name="x"></li>
            <li><span tabindex="0">Custom</span></li>
            <li><a href="/contact/">Contact</a></li>
          </ul>
        </nav>
    "##;

    #[test]
    fn test_collects_focusables_in_document_order() {
        let order = FocusOrder::from_menu_html(MENU);
        let labels: Vec<_> = (0..order.len())
            .map(|i| order.get(i).unwrap().label.clone())
            .collect();
        assert_eq!(labels, vec!["/", "#search", "Custom", "/contact/"]);
        assert_eq!(order.get(1).unwrap().tag, "button");
    }

    #[test]
    fn test_next_wraps_both_ways() {
        let order = FocusOrder::from_menu_html(MENU);
        assert_eq!(order.next(None, false), Some(0));
        assert_eq!(order.next(None, true), Some(3));
        assert_eq!(order.next(Some(3), false), Some(0));
        assert_eq!(order.next(Some(0), true), Some(3));
        assert_eq!(order.next(Some(1), false), Some(2));
    }

    #[test]
    fn test_empty_menu() {
        let order = FocusOrder::from_menu_html("<nav><p>text only</p></nav>");
        assert!(order.is_empty());
        assert_eq!(order.next(None, false), None);
    }
}
