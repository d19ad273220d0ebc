// src/render/collection.rs
// =============================================================================
// Pure helpers for collections of records: filtering and joining fragments.
//
// Nothing here does I/O. The loaders in section.rs fetch the records and then
// run them through these functions, which keeps the interesting part testable
// with plain vectors.
// =============================================================================

use maud::{html, Markup};
use serde::Serialize;

use super::html::empty_message;
use super::records::{ResearchItem, Resource};

/// How many featured research items the home page shows
pub const FEATURED_LIMIT: usize = 3;

/// The value a filter control sends when nothing is selected
pub const ANY: &str = "all";

/// Keeps featured items only, at most `limit`, in their original order
pub fn featured(records: Vec<ResearchItem>, limit: usize) -> Vec<ResearchItem> {
    records.into_iter().filter(|item| item.featured).take(limit).collect()
}

/// The research page's filter controls
///
/// Each criterion is optional; None matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResearchFilter {
    pub topic: Option<String>,
    pub country: Option<String>,
    pub year: Option<i32>,
}

impl ResearchFilter {
    /// Builds a filter from raw control values, where "all" (or nothing)
    /// means the criterion is not applied
    pub fn from_controls(topic: Option<&str>, country: Option<&str>, year: Option<i32>) -> Self {
        ResearchFilter {
            topic: selected(topic),
            country: selected(country),
            year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.topic.is_none() && self.country.is_none() && self.year.is_none()
    }

    pub fn matches(&self, item: &ResearchItem) -> bool {
        if let Some(topic) = &self.topic {
            if !item.topics.contains(topic) {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if !item.countries.contains(country) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if item.year != Some(year) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, records: Vec<ResearchItem>) -> Vec<ResearchItem> {
        records.into_iter().filter(|item| self.matches(item)).collect()
    }
}

fn selected(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ANY))
        .map(str::to_string)
}

/// Keeps resources whose type equals `kind`; "all" keeps everything
pub fn resources_of_kind(records: Vec<Resource>, kind: &str) -> Vec<Resource> {
    if kind == ANY {
        return records;
    }
    records.into_iter().filter(|r| r.kind == kind).collect()
}

/// Renders every record with `template` and joins the fragments
///
/// An empty slice renders `empty` as an informational message, never blank.
pub fn render_collection<T>(records: &[T], template: impl Fn(&T) -> Markup, empty: &str) -> Markup {
    if records.is_empty() {
        return empty_message(empty);
    }
    html! {
        @for record in records {
            (template(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::records::research_card;

    fn item(title: &str, year: i32, featured: bool) -> ResearchItem {
        ResearchItem {
            title: title.to_string(),
            year: Some(year),
            featured,
            topics: vec!["recycling".to_string()],
            countries: vec!["Kenya".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_featured_keeps_order_and_limit() {
        let records = vec![
            item("a", 2020, true),
            item("b", 2020, false),
            item("c", 2021, true),
            item("d", 2021, true),
            item("e", 2022, true),
        ];
        let titles: Vec<_> = featured(records, FEATURED_LIMIT)
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_year_filter_renders_only_matching_item() {
        let records = vec![item("Survey 2020", 2020, false), item("Survey 2021", 2021, false)];
        let filter = ResearchFilter::from_controls(None, None, Some(2021));

        let kept = filter.apply(records);
        let html = render_collection(&kept, research_card, "none").into_string();

        assert_eq!(kept.len(), 1);
        assert_eq!(html, research_card(&kept[0]).into_string());
        assert!(html.contains("Survey 2021"));
        assert!(!html.contains("Survey 2020"));
    }

    #[test]
    fn test_topic_and_country_filters() {
        let mut other = item("other", 2021, false);
        other.topics = vec!["landfill".to_string()];
        other.countries = vec!["Ghana".to_string()];
        let records = vec![item("match", 2021, false), other];

        let by_topic = ResearchFilter::from_controls(Some("recycling"), Some("all"), None);
        assert_eq!(by_topic.apply(records.clone()).len(), 1);

        let by_country = ResearchFilter::from_controls(Some("all"), Some("Ghana"), None);
        let kept = by_country.apply(records);
        assert_eq!(kept[0].title, "other");
    }

    #[test]
    fn test_all_controls_mean_no_filter() {
        let filter = ResearchFilter::from_controls(Some("all"), Some(" "), None);
        assert!(filter.is_empty());
        assert!(filter.matches(&ResearchItem::default()));
    }

    #[test]
    fn test_resources_of_kind() {
        let resource = |kind: &str| Resource {
            kind: kind.to_string(),
            ..Default::default()
        };
        let records = vec![resource("guide"), resource("tool"), resource("guide")];
        assert_eq!(resources_of_kind(records.clone(), "guide").len(), 2);
        assert_eq!(resources_of_kind(records.clone(), "external").len(), 0);
        assert_eq!(resources_of_kind(records, "all").len(), 3);
    }

    #[test]
    fn test_empty_collection_renders_message() {
        let html = render_collection::<ResearchItem>(&[], research_card, "No research found.");
        assert_eq!(
            html.into_string(),
            r#"<p class="empty-state">No research found.</p>"#
        );
    }
}
