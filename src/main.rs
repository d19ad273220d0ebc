// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = a section fell back, 2 = error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod content;  // src/content/ - fetching Markdown and JSON files
mod nav;      // src/nav/ - navigation menu state machine
mod pages;    // src/pages.rs - which sections each page loads
mod render;   // src/render/ - Markdown and record templates

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, NavArgs, NavStep};
use content::ContentSource;
use nav::{AnchorTargets, FocusOrder, MenuState, MenuView, NavEffect, NavigationController};
use pages::{Page, PageRender};
use render::SectionStatus;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with HTML or JSON on stdout
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Render {
            page,
            source,
            timeout,
            topic,
            country,
            year,
            json,
            nav,
        } => {
            let timeout = (timeout > 0).then(|| Duration::from_secs(timeout));
            let source = ContentSource::parse(&source, timeout)?;
            let filter = cli::research_filter(topic.as_deref(), country.as_deref(), year.as_deref())?;

            let render = pages::render_page(&source, page, &filter, nav.config()).await;
            print_page(&render, json)?;

            Ok(if render.all_ok() { 0 } else { 1 })
        }
        Commands::Markdown { file } => {
            let markdown = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!("{}", render::render_markdown(&markdown));
            Ok(0)
        }
        Commands::Nav {
            menu,
            page,
            events,
            nav,
        } => {
            replay_navigation(menu.as_deref(), page, &events, &nav).await?;
            Ok(0)
        }
    }
}

// Prints each section under a comment naming its container (and why it fell
// back, if it did), or the whole page as JSON
fn print_page(render: &PageRender, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(render)?);
        return Ok(());
    }

    let navigation = &render.navigation;
    println!(
        "<!-- navigation ({:?}, body class: {}) -->",
        navigation.state,
        navigation.body_class.unwrap_or("none")
    );
    println!("{}", navigation.toggle);
    println!("{}", navigation.menu);

    for section in &render.sections {
        match &section.status {
            SectionStatus::Failed { error } => println!("<!-- #{} failed: {} -->", section.target, error),
            _ => println!("<!-- #{} -->", section.target),
        }
        println!("{}", section.html);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StepReport {
    step: String,
    state: MenuState,
    view: MenuView,
    /// Menu item the focus trap is on
    focused: Option<usize>,
    /// Virtual time until the next pending timer fires
    next_timer_ms: Option<u64>,
    effects: Vec<NavEffect>,
}

// Runs the steps against a controller on a virtual clock; "wait" steps
// advance the clock and fire any timers that came due
async fn replay_navigation(
    menu: Option<&Path>,
    page: Page,
    steps: &[NavStep],
    args: &NavArgs,
) -> Result<()> {
    let mut controller = match menu {
        Some(path) => {
            let html = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            NavigationController::new(args.config(), FocusOrder::from_menu_html(&html))
                .with_anchor_targets(AnchorTargets::from_html(&html))
        }
        None => pages::init_navigation(page, args.config()),
    };

    if controller.focus_order().is_empty() {
        warn!("menu has no focusable elements; Tab will not move focus");
    }

    let start = Instant::now();
    let mut elapsed = Duration::ZERO;

    for step in steps {
        let effects = match step {
            NavStep::Event(event) => controller.handle(event.clone(), start + elapsed),
            NavStep::Wait(duration) => {
                elapsed += *duration;
                controller.tick(start + elapsed)
            }
        };

        let now = start + elapsed;
        let report = StepReport {
            step: step.to_string(),
            state: controller.state(),
            view: controller.view(),
            focused: controller.focused(),
            next_timer_ms: controller
                .deadline()
                .map(|due| u64::try_from(due.saturating_duration_since(now).as_millis()).unwrap_or(u64::MAX)),
            effects,
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
