//! Catalog filtering and sorting.
//!
//! Mirrors what the browser catalog does client-side: sort by campaign
//! length or target amount, then keep projects whose name contains the
//! search term (case-insensitive), whose category matches exactly and whose
//! target is at least `minTarget`. Empty parameters are ignored.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::models::ProjectDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Longest,
    Shortest,
    HighestAmount,
    LowestAmount,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "longest" => Ok(SortOrder::Longest),
            "shortest" => Ok(SortOrder::Shortest),
            "highestAmount" => Ok(SortOrder::HighestAmount),
            "lowestAmount" => Ok(SortOrder::LowestAmount),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_target: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sort: Option<SortOrder>,
}

/// Parse a query value, treating `key=` the same as an absent key.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl CatalogQuery {
    fn matches(&self, project: &ProjectDocument) -> bool {
        let info = &project.basic_info;

        if let Some(term) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !info
                .project_name
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }

        if let Some(category) = self.category.as_deref().filter(|s| !s.is_empty()) {
            if info.category != category {
                return false;
            }
        }

        if let Some(min) = self.min_target {
            if info.target_amount < min {
                return false;
            }
        }

        true
    }
}

/// Sort then filter `projects` according to `query`. Sorting is stable, so
/// ties keep their storage order.
pub fn apply(mut projects: Vec<ProjectDocument>, query: &CatalogQuery) -> Vec<ProjectDocument> {
    match query.sort {
        Some(SortOrder::Longest) => projects.sort_by(|a, b| {
            b.basic_info
                .campaign_duration
                .cmp(&a.basic_info.campaign_duration)
        }),
        Some(SortOrder::Shortest) => projects.sort_by_key(|p| p.basic_info.campaign_duration),
        Some(SortOrder::HighestAmount) => projects
            .sort_by(|a, b| b.basic_info.target_amount.cmp(&a.basic_info.target_amount)),
        Some(SortOrder::LowestAmount) => projects.sort_by_key(|p| p.basic_info.target_amount),
        None => {}
    }

    projects.retain(|p| query.matches(p));
    projects
}
