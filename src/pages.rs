// src/pages.rs
// =============================================================================
// The portal's pages and the sections each one loads.
//
// Rendering a page:
// 1. Set up the navigation menu (always first)
// 2. Load every section concurrently; each one either renders its content or
//    its own fallback message, independent of the others
// 3. Report sections in the order the page declares them
// =============================================================================

use clap::ValueEnum;
use futures::future::join_all;
use maud::{html, Markup};
use serde::Serialize;
use tracing::info;

use crate::content::ContentSource;
use crate::nav::{
    AnchorTargets, FocusOrder, MenuState, MenuView, NavConfig, NavigationController, MENU_ID,
};
use crate::render::collection::{featured, resources_of_kind, FEATURED_LIMIT};
use crate::render::records::{
    dataset_item, featured_research_card, research_card, resource_card, stat_card, team_card,
    Dataset, ResearchItem, Resource, Stat, TeamMember,
};
use crate::render::section::{load_collection, load_markdown, Messages};
use crate::render::{ResearchFilter, SectionRender};

const STATS_JSON: &str = "/content/json/stats.json";
const RESEARCH_JSON: &str = "/content/json/research.json";
const TEAM_JSON: &str = "/content/json/team.json";
const DATASETS_JSON: &str = "/content/json/datasets.json";
const RESOURCES_JSON: &str = "/content/json/resources.json";

const MARKDOWN_ERROR: &str = "Content could not be loaded at this time.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    About,
    Research,
    Data,
    Resources,
    Contact,
}

/// One render target on a page and the content that fills it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Markdown {
        target: &'static str,
        path: &'static str,
    },
    Stats,
    FeaturedResearch,
    Research,
    Team,
    Datasets,
    Resources {
        target: &'static str,
        kind: &'static str,
    },
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Research,
        Page::Data,
        Page::Resources,
        Page::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Research => "Research",
            Page::Data => "Data",
            Page::Resources => "Resources",
            Page::Contact => "Contact",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about/",
            Page::Research => "/research/",
            Page::Data => "/data/",
            Page::Resources => "/resources/",
            Page::Contact => "/contact/",
        }
    }

    pub fn sections(self) -> Vec<Section> {
        match self {
            Page::Home => vec![
                Section::Markdown {
                    target: "intro-content",
                    path: "/content/markdown/intro.md",
                },
                Section::Stats,
                Section::FeaturedResearch,
            ],
            Page::About => vec![
                Section::Markdown {
                    target: "about-content",
                    path: "/content/markdown/about.md",
                },
                Section::Team,
            ],
            Page::Research => vec![Section::Research],
            Page::Data => vec![Section::Datasets],
            Page::Resources => vec![
                Section::Resources {
                    target: "guides-list",
                    kind: "guide",
                },
                Section::Resources {
                    target: "tools-list",
                    kind: "tool",
                },
                Section::Resources {
                    target: "external-links",
                    kind: "external",
                },
            ],
            Page::Contact => Vec::new(),
        }
    }
}

impl Section {
    pub fn target(&self) -> &'static str {
        match self {
            Section::Markdown { target, .. } | Section::Resources { target, .. } => *target,
            Section::Stats => "stats-grid",
            Section::FeaturedResearch => "featured-research",
            Section::Research => "research-list",
            Section::Team => "team-grid",
            Section::Datasets => "datasets-list",
        }
    }

    /// Fetches and renders this section; failures become the fallback message
    pub async fn load(&self, source: &ContentSource, filter: &ResearchFilter) -> SectionRender {
        let target = self.target();
        match self {
            Section::Markdown { path, .. } => load_markdown(source, target, path, MARKDOWN_ERROR).await,
            Section::Stats => {
                let messages = Messages {
                    error: "Statistics could not be loaded.",
                    empty: "No statistics available.",
                };
                load_collection::<Stat, _, _>(source, target, STATS_JSON, messages, |r| r, stat_card).await
            }
            Section::FeaturedResearch => {
                let messages = Messages {
                    error: "Featured research could not be loaded.",
                    empty: "No featured research yet.",
                };
                load_collection::<ResearchItem, _, _>(
                    source,
                    target,
                    RESEARCH_JSON,
                    messages,
                    |r| featured(r, FEATURED_LIMIT),
                    featured_research_card,
                )
                .await
            }
            Section::Research => {
                let messages = Messages {
                    error: "Research could not be loaded.",
                    empty: "No research found matching the selected filters.",
                };
                load_collection::<ResearchItem, _, _>(
                    source,
                    target,
                    RESEARCH_JSON,
                    messages,
                    |r| filter.apply(r),
                    research_card,
                )
                .await
            }
            Section::Team => {
                let messages = Messages {
                    error: "Team information could not be loaded.",
                    empty: "No team members listed yet.",
                };
                load_collection::<TeamMember, _, _>(source, target, TEAM_JSON, messages, |r| r, team_card).await
            }
            Section::Datasets => {
                let messages = Messages {
                    error: "Datasets could not be loaded.",
                    empty: "No datasets available.",
                };
                load_collection::<Dataset, _, _>(source, target, DATASETS_JSON, messages, |r| r, dataset_item)
                    .await
            }
            Section::Resources { kind, .. } => {
                let messages = Messages {
                    error: "Resources could not be loaded.",
                    empty: "No resources available in this category.",
                };
                load_collection::<Resource, _, _>(
                    source,
                    target,
                    RESOURCES_JSON,
                    messages,
                    |r| resources_of_kind(r, kind),
                    resource_card,
                )
                .await
            }
        }
    }
}

/// The site menu, marking `current` as the page being viewed
pub fn menu_markup(current: Page, view: MenuView) -> Markup {
    html! {
        nav id=(MENU_ID) class=(view.menu_class()) aria-label="Main navigation" {
            ul {
                @for page in Page::ALL {
                    li {
                        a href=(page.href()) aria-current=[(page == current).then_some("page")] {
                            (page.title())
                        }
                    }
                }
            }
        }
    }
}

/// Navigation markup of a rendered page
#[derive(Debug, Clone, Serialize)]
pub struct NavigationRender {
    pub state: MenuState,
    pub toggle: String,
    pub menu: String,
    /// Class the page body carries while scrolling is locked
    pub body_class: Option<&'static str>,
    /// How many menu elements the focus trap cycles through
    pub focusable: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageRender {
    pub page: Page,
    pub navigation: NavigationRender,
    pub sections: Vec<SectionRender>,
}

impl PageRender {
    pub fn all_ok(&self) -> bool {
        self.sections.iter().all(SectionRender::is_ok)
    }
}

/// Builds the page's navigation controller from its menu markup
///
/// Anchor links can point at any id in the menu or at the page's section
/// containers.
pub fn init_navigation(page: Page, config: NavConfig) -> NavigationController {
    let menu = menu_markup(page, MenuView::from(MenuState::Closed)).into_string();
    let anchors = AnchorTargets::from_html(&menu).with_ids(page.sections().iter().map(Section::target));
    NavigationController::new(config, FocusOrder::from_menu_html(&menu)).with_anchor_targets(anchors)
}

/// Renders every section of `page`
pub async fn render_page(
    source: &ContentSource,
    page: Page,
    filter: &ResearchFilter,
    nav_config: NavConfig,
) -> PageRender {
    let nav = init_navigation(page, nav_config);
    let view = nav.view();
    let navigation = NavigationRender {
        state: nav.state(),
        toggle: view.toggle_markup().into_string(),
        menu: menu_markup(page, view).into_string(),
        body_class: view.body_class(),
        focusable: nav.focus_order().len(),
    };
    info!(page = ?page, "navigation initialized");

    let sections = page.sections();
    let renders = join_all(sections.iter().map(|section| section.load(source, filter))).await;

    let failed = renders.iter().filter(|r| !r.is_ok()).count();
    info!(
        page = ?page,
        sections = renders.len(),
        failed,
        filtered = !filter.is_empty(),
        "page rendered"
    );

    PageRender {
        page,
        navigation,
        sections: renders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SectionStatus;
    use std::fs;

    const RESEARCH: &str = r#"[
        {"title":"Plastics 2020","year":2020,"featured":true,"topics":["plastics"],"countries":["Kenya"]},
        {"title":"Landfills 2021","year":2021,"featured":true,"topics":["landfill"],"countries":["Ghana"]},
        {"title":"Compost 2021","year":2021,"featured":false,"topics":["organic"],"countries":["Ghana"]},
        {"title":"Recycling 2022","year":2022,"featured":true,"topics":["recycling"],"countries":["Nigeria"]},
        {"title":"E-waste 2023","year":2023,"featured":true,"topics":["e-waste"],"countries":["Kenya"]}
    ]"#;

    fn full_site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            ("content/markdown/intro.md", "# Welcome\n\nOpen **data** on waste."),
            ("content/markdown/about.md", "## Who we are"),
            ("content/json/stats.json", r#"[{"label":"Countries","value":12}]"#),
            ("content/json/research.json", RESEARCH),
            ("content/json/team.json", r#"[{"name":"Ama","role":"Lead","bio":"Researcher."}]"#),
            ("content/json/datasets.json", "[]"),
            (
                "content/json/resources.json",
                r#"[{"title":"How to sort","type":"guide"},{"title":"Calculator","type":"tool"}]"#,
            ),
        ];
        for (path, body) in files {
            let file = dir.path().join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, body).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_home_page() {
        let dir = full_site();
        let source = ContentSource::dir(dir.path());

        let page = render_page(&source, Page::Home, &ResearchFilter::default(), NavConfig::default()).await;
        assert!(page.all_ok());

        let targets: Vec<_> = page.sections.iter().map(|s| s.target).collect();
        assert_eq!(targets, vec!["intro-content", "stats-grid", "featured-research"]);

        let featured = &page.sections[2];
        assert_eq!(featured.status, SectionStatus::Rendered { count: 3 });
        assert!(featured.html.contains("Plastics 2020"));
        assert!(featured.html.contains("Recycling 2022"));
        assert!(!featured.html.contains("E-waste 2023"));
        assert!(!featured.html.contains("Compost 2021"));
    }

    #[tokio::test]
    async fn test_research_year_filter() {
        let dir = full_site();
        let source = ContentSource::dir(dir.path());
        let filter = ResearchFilter::from_controls(Some("all"), Some("all"), Some(2020));

        let page = render_page(&source, Page::Research, &filter, NavConfig::default()).await;
        let list = &page.sections[0];
        assert_eq!(list.status, SectionStatus::Rendered { count: 1 });
        assert!(list.html.contains("Plastics 2020"));
        assert!(!list.html.contains("2021"));

        let none = ResearchFilter::from_controls(Some("plastics"), Some("Ghana"), None);
        let page = render_page(&source, Page::Research, &none, NavConfig::default()).await;
        assert_eq!(
            page.sections[0].html,
            r#"<p class="empty-state">No research found matching the selected filters.</p>"#
        );
    }

    #[tokio::test]
    async fn test_one_failing_section_does_not_block_others() {
        let dir = full_site();
        fs::remove_file(dir.path().join("content/json/team.json")).unwrap();
        let source = ContentSource::dir(dir.path());

        let page = render_page(&source, Page::About, &ResearchFilter::default(), NavConfig::default()).await;
        assert!(!page.all_ok());
        assert_eq!(page.sections[0].html, "<h2>Who we are</h2>");
        assert_eq!(
            page.sections[1].html,
            r#"<p class="error">Team information could not be loaded.</p>"#
        );
    }

    #[tokio::test]
    async fn test_hand_edited_records_still_render() {
        let dir = full_site();
        fs::write(
            dir.path().join("content/json/team.json"),
            r#"[{"name":"Ama","role":"Lead","bio":null},{"name":"Kofi","role":"Analyst","photo":null}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("content/json/research.json"),
            r#"[{"title":"Quoted year","year":"2021","featured":true},{"title":"Plain year","year":2020}]"#,
        )
        .unwrap();
        let source = ContentSource::dir(dir.path());

        let about = render_page(&source, Page::About, &ResearchFilter::default(), NavConfig::default()).await;
        assert_eq!(about.sections[1].status, SectionStatus::Rendered { count: 2 });
        assert!(about.sections[1].html.contains("Kofi"));

        let filter = ResearchFilter::from_controls(None, None, Some(2021));
        let research = render_page(&source, Page::Research, &filter, NavConfig::default()).await;
        assert_eq!(research.sections[0].status, SectionStatus::Rendered { count: 1 });
        assert!(research.sections[0].html.contains("Quoted year"));

        let home = render_page(&source, Page::Home, &ResearchFilter::default(), NavConfig::default()).await;
        assert_eq!(home.sections[2].status, SectionStatus::Rendered { count: 1 });
    }

    #[tokio::test]
    async fn test_resources_and_empty_datasets() {
        let dir = full_site();
        let source = ContentSource::dir(dir.path());

        let page = render_page(&source, Page::Resources, &ResearchFilter::default(), NavConfig::default()).await;
        assert!(page.sections[0].html.contains("How to sort"));
        assert!(page.sections[1].html.contains("Calculator"));
        assert_eq!(page.sections[2].status, SectionStatus::Empty);

        let page = render_page(&source, Page::Data, &ResearchFilter::default(), NavConfig::default()).await;
        assert_eq!(
            page.sections[0].html,
            r#"<p class="empty-state">No datasets available.</p>"#
        );
    }

    #[tokio::test]
    async fn test_contact_page_has_navigation_only() {
        let dir = full_site();
        let source = ContentSource::dir(dir.path());

        let page = render_page(&source, Page::Contact, &ResearchFilter::default(), NavConfig::default()).await;
        assert!(page.sections.is_empty());
        assert_eq!(page.navigation.state, MenuState::Closed);
        assert_eq!(page.navigation.body_class, None);
        assert!(page.navigation.toggle.contains(r#"aria-expanded="false""#));
        assert!(page.navigation.menu.contains(r#"<a href="/contact/" aria-current="page">Contact</a>"#));
    }

    #[test]
    fn test_menu_focus_order_covers_every_page() {
        let nav = init_navigation(Page::Home, NavConfig::default());
        let menu = menu_markup(Page::Home, nav.view()).into_string();
        assert_eq!(FocusOrder::from_menu_html(&menu).len(), Page::ALL.len());
        assert!(menu.starts_with(r#"<nav id="main-navigation" class="main-navigation""#));
    }

    #[test]
    fn test_anchor_links_reach_section_containers() {
        use crate::nav::{NavEffect, NavEvent};
        use std::time::Instant;

        let mut nav = init_navigation(Page::Resources, NavConfig::default());
        let effects = nav.handle(
            NavEvent::AnchorClicked {
                href: "#tools-list".to_string(),
            },
            Instant::now(),
        );
        assert!(effects.contains(&NavEffect::ScrollTo {
            id: "tools-list".to_string()
        }));

        // Home has no team grid
        let mut home = init_navigation(Page::Home, NavConfig::default());
        let event = NavEvent::AnchorClicked {
            href: "#team-grid".to_string(),
        };
        assert!(home.handle(event, Instant::now()).is_empty());
    }
}
