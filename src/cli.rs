// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - render: render every section of one portal page
// - markdown: render a single Markdown file
// - nav: replay navigation menu events and print what happens
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - FromStr: lets clap turn "resize:1024" into a NavStep
// =============================================================================

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::nav::{NavConfig, NavEvent};
use crate::pages::Page;
use crate::render::collection::ANY;
use crate::render::ResearchFilter;

#[derive(Parser, Debug)]
#[command(
    name = "portal-pages",
    version,
    about = "Render the content sections of the research portal's pages",
    long_about = "portal-pages fetches the portal's Markdown and JSON content from a static host or a \
                  local copy of the site and renders the HTML for each page section."
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every section of a page
    ///
    /// Example: portal-pages render research --source ./site --year 2021
    Render {
        /// Which page to render
        #[arg(value_enum)]
        page: Page,

        /// Site root: an http(s) URL or a local directory
        #[arg(long, env = "PORTAL_CONTENT_SOURCE")]
        source: String,

        /// Request timeout in seconds for an http(s) source, 0 for none
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Research topic filter ("all" for any)
        #[arg(long)]
        topic: Option<String>,

        /// Research country filter ("all" for any)
        #[arg(long)]
        country: Option<String>,

        /// Research year filter ("all" for any)
        #[arg(long)]
        year: Option<String>,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        nav: NavArgs,
    },

    /// Render a local Markdown file to HTML
    Markdown {
        /// Path to the Markdown file
        file: PathBuf,
    },

    /// Replay navigation events against a menu and print each step
    ///
    /// Example: portal-pages nav --events toggle,wait:100,tab,escape
    Nav {
        /// HTML of the menu (ids in it are valid anchor targets); defaults to
        /// the site menu of --page
        #[arg(long)]
        menu: Option<PathBuf>,

        /// Page whose site menu is used when --menu is not given
        #[arg(long, value_enum, default_value = "home")]
        page: Page,

        /// Comma separated: toggle, escape, inside, outside, tab, shift-tab,
        /// resize:<px>, anchor:<href>, wait:<ms>
        #[arg(long, value_delimiter = ',', required = true)]
        events: Vec<NavStep>,

        #[command(flatten)]
        nav: NavArgs,
    },
}

/// Navigation menu settings
#[derive(Args, Debug, Clone)]
pub struct NavArgs {
    /// Viewport width (px) above which the mobile menu closes
    #[arg(long, default_value_t = 768)]
    pub breakpoint: u32,

    /// Quiet period (ms) before a resize is acted on
    #[arg(long, default_value_t = 150)]
    pub resize_debounce_ms: u64,

    /// Delay (ms) before focus moves into an opened menu
    #[arg(long, default_value_t = 100)]
    pub focus_delay_ms: u64,
}

impl NavArgs {
    pub fn config(&self) -> NavConfig {
        NavConfig {
            breakpoint: self.breakpoint,
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
            focus_delay: Duration::from_millis(self.focus_delay_ms),
        }
    }
}

/// Turns the research filter flags into a ResearchFilter
pub fn research_filter(
    topic: Option<&str>,
    country: Option<&str>,
    year: Option<&str>,
) -> Result<ResearchFilter> {
    let year = match year.map(str::trim) {
        None => None,
        Some(value) if value.is_empty() || value.eq_ignore_ascii_case(ANY) => None,
        Some(value) => Some(
            value
                .parse::<i32>()
                .map_err(|_| anyhow!("Invalid year '{}': expected a number or 'all'", value))?,
        ),
    };
    Ok(ResearchFilter::from_controls(topic, country, year))
}

/// One step of a replayed navigation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavStep {
    Event(NavEvent),
    Wait(Duration),
}

impl FromStr for NavStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let step = match s {
            "toggle" => NavStep::Event(NavEvent::ToggleClicked),
            "escape" => NavStep::Event(NavEvent::EscapePressed),
            "inside" => NavStep::Event(NavEvent::ClickedInsideMenu),
            "outside" => NavStep::Event(NavEvent::ClickedOutside),
            "tab" => NavStep::Event(NavEvent::Tab { backwards: false }),
            "shift-tab" => NavStep::Event(NavEvent::Tab { backwards: true }),
            _ => {
                if let Some(px) = s.strip_prefix("resize:") {
                    let width = px.parse().map_err(|_| format!("invalid width in '{}'", s))?;
                    NavStep::Event(NavEvent::Resized { width })
                } else if let Some(href) = s.strip_prefix("anchor:") {
                    NavStep::Event(NavEvent::AnchorClicked {
                        href: href.to_string(),
                    })
                } else if let Some(ms) = s.strip_prefix("wait:") {
                    let ms = ms.parse().map_err(|_| format!("invalid duration in '{}'", s))?;
                    NavStep::Wait(Duration::from_millis(ms))
                } else {
                    return Err(format!("unknown navigation event '{}'", s));
                }
            }
        };
        Ok(step)
    }
}

impl fmt::Display for NavStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavStep::Event(NavEvent::ToggleClicked) => write!(f, "toggle"),
            NavStep::Event(NavEvent::EscapePressed) => write!(f, "escape"),
            NavStep::Event(NavEvent::ClickedInsideMenu) => write!(f, "inside"),
            NavStep::Event(NavEvent::ClickedOutside) => write!(f, "outside"),
            NavStep::Event(NavEvent::Tab { backwards: false }) => write!(f, "tab"),
            NavStep::Event(NavEvent::Tab { backwards: true }) => write!(f, "shift-tab"),
            NavStep::Event(NavEvent::Resized { width }) => write!(f, "resize:{}", width),
            NavStep::Event(NavEvent::AnchorClicked { href }) => write!(f, "anchor:{}", href),
            NavStep::Wait(d) => write!(f, "wait:{}", d.as_millis()),
        }
    }
}
