// src/render/records.rs
// =============================================================================
// Content records and their HTML templates.
//
// Each JSON file under /content/json/ is an array of one record type. Every
// field has a serde default and a forgiving deserializer (see loose.rs): a
// record with missing, null or oddly typed fields still renders, with blanks
// or the value's text where the data would be. Only a file that isn't an
// array of objects fails to load.
// =============================================================================

use maud::{html, Markup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::html::safe_href;
use super::loose::{self, value_text};

pub const PLACEHOLDER_PHOTO: &str = "/images/placeholder.jpg";

/// A headline number on the home page ("12 Countries")
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Stat {
    #[serde(deserialize_with = "loose::string")]
    pub label: String,
    /// Numbers and strings are both used in the data files
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearchItem {
    #[serde(deserialize_with = "loose::string")]
    pub title: String,
    #[serde(deserialize_with = "loose::strings")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "loose::year")]
    pub year: Option<i32>,
    #[serde(rename = "abstract", deserialize_with = "loose::string")]
    pub summary: String,
    #[serde(deserialize_with = "loose::string")]
    pub url: String,
    #[serde(deserialize_with = "loose::strings")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "loose::strings")]
    pub countries: Vec<String>,
    #[serde(deserialize_with = "loose::flag")]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamMember {
    #[serde(deserialize_with = "loose::string")]
    pub name: String,
    #[serde(deserialize_with = "loose::string")]
    pub role: String,
    #[serde(deserialize_with = "loose::string")]
    pub bio: String,
    #[serde(deserialize_with = "loose::optional_string")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    #[serde(deserialize_with = "loose::string")]
    pub title: String,
    #[serde(deserialize_with = "loose::string")]
    pub description: String,
    #[serde(deserialize_with = "loose::string")]
    pub format: String,
    #[serde(deserialize_with = "loose::string")]
    pub size: String,
    #[serde(deserialize_with = "loose::string")]
    pub last_updated: String,
    #[serde(deserialize_with = "loose::string")]
    pub download_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "loose::string")]
    pub title: String,
    #[serde(deserialize_with = "loose::string")]
    pub description: String,
    #[serde(deserialize_with = "loose::string")]
    pub url: String,
    /// "guide", "tool", "external", ...
    #[serde(rename = "type", deserialize_with = "loose::string")]
    pub kind: String,
}

fn year_text(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

pub fn stat_card(stat: &Stat) -> Markup {
    html! {
        div.card.stat-card {
            span.stat-value { (value_text(&stat.value)) }
            span.stat-label { (stat.label) }
        }
    }
}

/// Research card without the topic tags, used for the home page highlights
pub fn featured_research_card(item: &ResearchItem) -> Markup {
    research_article(item, false)
}

pub fn research_card(item: &ResearchItem) -> Markup {
    research_article(item, true)
}

fn research_article(item: &ResearchItem, with_topics: bool) -> Markup {
    html! {
        article.card.research-card {
            header.card-header {
                h3.card-title { (item.title) }
                div.card-meta {
                    (item.authors.join(", ")) " • " (year_text(item.year))
                }
            }
            div.card-content {
                p { (item.summary) }
                @if with_topics {
                    div.topics {
                        @for topic in &item.topics {
                            span.tag { (topic) }
                        }
                    }
                }
            }
            footer.card-footer {
                a.btn.btn-link href=(safe_href(&item.url)) { "Read More →" }
            }
        }
    }
}

pub fn team_card(member: &TeamMember) -> Markup {
    let photo = member
        .photo
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(PLACEHOLDER_PHOTO);

    html! {
        div.card.team-card {
            img src=(safe_href(photo)) alt=(member.name);
            h3.team-name { (member.name) }
            p.team-role { (member.role) }
            p { (member.bio) }
        }
    }
}

pub fn dataset_item(dataset: &Dataset) -> Markup {
    html! {
        div.dataset-item {
            div.dataset-header {
                h3.dataset-title { (dataset.title) }
                a.btn.btn-primary.btn-sm href=(safe_href(&dataset.download_url)) { "Download" }
            }
            div.dataset-meta {
                (dataset.format) " • " (dataset.size) " • Updated: " (dataset.last_updated)
            }
            p { (dataset.description) }
        }
    }
}

pub fn resource_card(resource: &Resource) -> Markup {
    html! {
        div.card {
            h3.card-title { (resource.title) }
            p.card-content { (resource.description) }
            div.card-footer {
                a.btn.btn-link href=(safe_href(&resource.url)) { "Access Resource →" }
            }
        }
    }
}
