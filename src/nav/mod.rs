// src/nav/mod.rs
// =============================================================================
// The mobile navigation menu.
//
// Submodules:
// - anchor: in-page links and the ids they can scroll to
// - controller: the open/closed state machine and its timers
// - focus: which menu elements the focus trap cycles through
// - view: markup and classes derived from the state
// =============================================================================

mod anchor;
mod controller;
mod focus;
mod view;

pub use anchor::AnchorTargets;
pub use controller::{MenuState, NavConfig, NavEffect, NavEvent, NavigationController};
pub use focus::FocusOrder;
pub use view::{MenuView, MENU_ID};
