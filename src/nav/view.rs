// src/nav/view.rs
// =============================================================================
// What the page shows for a given menu state.
//
// The ARIA attribute, the active class and the scroll lock are all computed
// from MenuState here. Nothing stores them separately, so they always agree.
// =============================================================================

use maud::{html, Markup};
use serde::Serialize;

use super::MenuState;

pub const MENU_ID: &str = "main-navigation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub aria_expanded: bool,
    /// The "active" class on the menu element
    pub active: bool,
    /// Page scrolling is locked while the menu covers it
    pub scroll_locked: bool,
}

impl From<MenuState> for MenuView {
    fn from(state: MenuState) -> Self {
        let open = state == MenuState::Open;
        MenuView {
            aria_expanded: open,
            active: open,
            scroll_locked: open,
        }
    }
}

impl MenuView {
    pub fn menu_class(&self) -> &'static str {
        if self.active {
            "main-navigation active"
        } else {
            "main-navigation"
        }
    }

    pub fn body_class(&self) -> Option<&'static str> {
        self.scroll_locked.then_some("menu-open")
    }

    /// The mobile menu button
    pub fn toggle_markup(&self) -> Markup {
        let expanded = if self.aria_expanded { "true" } else { "false" };
        html! {
            button.mobile-menu-toggle type="button" aria-controls=(MENU_ID)
                aria-expanded=(expanded) aria-label="Toggle navigation" {
                span.hamburger {}
            }
        }
    }
}
