// src/nav/controller.rs
// =============================================================================
// The mobile navigation menu as a state machine.
//
// States: Closed (initial) and Open. There is no final state; the controller
// lives as long as the page.
//
//   Closed --toggle--> Open
//   Open --toggle | escape | outside click | wide viewport--> Closed
//
// While open:
// - focus moves to the first menu item after `focus_delay`
// - Tab and Shift+Tab cycle through the menu items only (focus trap)
//
// Resize events are debounced: only the last width seen in a quiet period of
// `resize_debounce` counts.
//
// Independent of the menu state, a click on an in-page anchor link whose
// target exists scrolls to the target and focuses it.
//
// The controller never reads a clock. Callers pass `now` into every call,
// which makes the timing rules easy to test.
//
// Rust concepts:
// - Enums as state: MenuState has exactly one value at a time
// - Returning effects: the controller says what should happen (render, move
//   focus) and the caller does it
// =============================================================================

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

use super::anchor::AnchorTargets;
use super::focus::FocusOrder;
use super::view::MenuView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    Closed,
    Open,
}

/// Timing and layout settings of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavConfig {
    /// Viewports wider than this (in px) show the full menu, so the mobile
    /// menu is closed
    pub breakpoint: u32,
    pub resize_debounce: Duration,
    pub focus_delay: Duration,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            breakpoint: 768,
            resize_debounce: Duration::from_millis(150),
            focus_delay: Duration::from_millis(100),
        }
    }
}

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    ToggleClicked,
    EscapePressed,
    ClickedInsideMenu,
    ClickedOutside,
    Resized { width: u32 },
    Tab { backwards: bool },
    /// A link with this href was clicked
    AnchorClicked { href: String },
}

/// Something the page has to do in response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum NavEffect {
    /// The state changed; apply this view
    Render { view: MenuView },
    /// Move focus to the menu item at `index`
    FocusItem { index: usize, label: String },
    /// Move focus back to the toggle button
    FocusToggle,
    /// Stop the browser's own handling of the key or click
    PreventDefault,
    /// Smooth-scroll the element with this id to the top of the viewport
    ScrollTo { id: String },
    /// Move focus to the element with this id without scrolling again
    FocusTarget { id: String },
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    width: u32,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    config: NavConfig,
    state: MenuState,
    items: FocusOrder,
    anchors: AnchorTargets,
    focused: Option<usize>,
    focus_due: Option<Instant>,
    resize: Option<PendingResize>,
}

impl NavigationController {
    pub fn new(config: NavConfig, items: FocusOrder) -> Self {
        NavigationController {
            config,
            state: MenuState::Closed,
            items,
            anchors: AnchorTargets::default(),
            focused: None,
            focus_due: None,
            resize: None,
        }
    }

    /// Lets anchor links scroll to the ids in `anchors`
    pub fn with_anchor_targets(mut self, anchors: AnchorTargets) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn view(&self) -> MenuView {
        MenuView::from(self.state)
    }

    pub fn focus_order(&self) -> &FocusOrder {
        &self.items
    }

    /// Index of the menu item the trap last focused
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// When the next timer fires, if any is pending
    pub fn deadline(&self) -> Option<Instant> {
        match (self.focus_due, self.resize.map(|r| r.due)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handles one event at time `now`
    ///
    /// Timers that came due before `now` fire first.
    pub fn handle(&mut self, event: NavEvent, now: Instant) -> Vec<NavEffect> {
        let mut effects = self.tick(now);

        match event {
            NavEvent::ToggleClicked => match self.state {
                MenuState::Closed => effects.extend(self.open(now)),
                MenuState::Open => effects.extend(self.close(false)),
            },
            NavEvent::EscapePressed if self.state == MenuState::Open => {
                effects.extend(self.close(true));
            }
            NavEvent::ClickedOutside if self.state == MenuState::Open => {
                effects.extend(self.close(false));
            }
            NavEvent::Resized { width } => {
                self.resize = Some(PendingResize {
                    width,
                    due: now + self.config.resize_debounce,
                });
            }
            NavEvent::Tab { backwards } if self.state == MenuState::Open => {
                effects.push(NavEffect::PreventDefault);
                if let Some(index) = self.items.next(self.focused, backwards) {
                    self.focus_due = None;
                    effects.extend(self.focus_item(index));
                }
            }
            NavEvent::AnchorClicked { href } => {
                if let Some(id) = self.anchors.resolve(&href) {
                    debug!(id, "scrolling to anchor target");
                    effects.push(NavEffect::PreventDefault);
                    effects.push(NavEffect::ScrollTo { id: id.to_string() });
                    effects.push(NavEffect::FocusTarget { id: id.to_string() });
                }
            }
            // Escape, outside clicks and Tab mean nothing while closed, and
            // clicks inside the menu never close it
            _ => {}
        }

        effects
    }

    /// Fires timers that are due at `now`
    pub fn tick(&mut self, now: Instant) -> Vec<NavEffect> {
        let mut effects = Vec::new();

        if let Some(pending) = self.resize {
            if pending.due <= now {
                self.resize = None;
                if pending.width > self.config.breakpoint && self.state == MenuState::Open {
                    debug!(width = pending.width, "viewport widened, closing menu");
                    effects.extend(self.close(false));
                }
            }
        }

        if let Some(due) = self.focus_due {
            if due <= now {
                self.focus_due = None;
                if let Some(index) = self.items.next(None, false) {
                    effects.extend(self.focus_item(index));
                }
            }
        }

        effects
    }

    fn open(&mut self, now: Instant) -> Vec<NavEffect> {
        self.state = MenuState::Open;
        self.focused = None;
        self.focus_due = Some(now + self.config.focus_delay);
        vec![NavEffect::Render { view: self.view() }]
    }

    fn close(&mut self, restore_focus: bool) -> Vec<NavEffect> {
        self.state = MenuState::Closed;
        self.focused = None;
        self.focus_due = None;

        let mut effects = vec![NavEffect::Render { view: self.view() }];
        if restore_focus {
            effects.push(NavEffect::FocusToggle);
        }
        effects
    }

    fn focus_item(&mut self, index: usize) -> Vec<NavEffect> {
        self.focused = Some(index);
        let label = self
            .items
            .get(index)
            .map(|item| item.label.clone())
            .unwrap_or_default();
        vec![NavEffect::FocusItem { index, label }]
    }
}
