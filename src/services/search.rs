// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! In-memory search, filtering, sorting, and CSV export over a fetched
//! event listing. Every filter is a conjunction: an event must pass all
//! of the ones that are set.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Category, Event};

/// Search request. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    /// Case-insensitive substring over title, description, skills, and
    /// organizer name.
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub location: Option<LocationFilter>,
    /// Inclusive date range. An event with no date never matches a range.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring against the space-joined skills list.
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub volunteers: Option<VolunteerBucket>,
    /// Keep only events flagged urgent by their organizer.
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub sort_by: SortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFilter {
    Remote,
    Onsite,
}

/// Volunteers-needed buckets, mirroring the filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VolunteerBucket {
    #[serde(rename = "1-5")]
    Small,
    #[serde(rename = "6-10")]
    Medium,
    #[serde(rename = "11+")]
    Large,
}

impl VolunteerBucket {
    fn contains(self, needed: u32) -> bool {
        match self {
            VolunteerBucket::Small => (1..=5).contains(&needed),
            VolunteerBucket::Medium => (6..=10).contains(&needed),
            VolunteerBucket::Large => needed >= 11,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Soonest first. Events without a date sort before everything.
    #[default]
    Date,
    DateDesc,
    Title,
    Volunteers,
    /// Urgent events first, original order otherwise.
    Urgent,
}

impl SearchFilters {
    /// Whether one event passes every set filter.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            if !needle.is_empty() {
                let haystack = format!(
                    "{} {} {} {}",
                    event.title,
                    event.description,
                    event.skills.join(" "),
                    event.organizer.name
                )
                .to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }

        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }

        if let Some(location) = self.location {
            let wanted_remote = location == LocationFilter::Remote;
            if event.is_remote() != wanted_remote {
                return false;
            }
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = event.date else {
                return false;
            };
            if let Some(from) = self.date_from {
                if date < from {
                    return false;
                }
            }
            if let Some(to) = self.date_to {
                if date > to {
                    return false;
                }
            }
        }

        if let Some(skills) = &self.skills {
            let needle = skills.to_lowercase();
            // Matched against the space-joined list, so a needle may span
            // adjacent skills.
            if !needle.is_empty() && !event.skills.join(" ").to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(bucket) = self.volunteers {
            if !bucket.contains(event.volunteers_needed) {
                return false;
            }
        }

        if self.urgent && !event.urgent {
            return false;
        }

        true
    }

    /// Filter and sort a listing. Sorts are stable so ties keep the
    /// store's order.
    pub fn search(&self, events: Vec<Event>) -> Vec<Event> {
        let mut matched: Vec<Event> = events
            .into_iter()
            .filter(|e| self.matches(e))
            .collect();

        match self.sort_by {
            SortBy::Date => matched.sort_by_key(sortable_date),
            SortBy::DateDesc => {
                matched.sort_by_key(|e| std::cmp::Reverse(sortable_date(e)))
            }
            SortBy::Title => matched.sort_by_key(|e| e.title.to_lowercase()),
            SortBy::Volunteers => matched.sort_by_key(|e| e.volunteers_needed),
            SortBy::Urgent => matched.sort_by_key(|e| !e.urgent),
        }

        matched
    }
}

/// Missing dates sort as the Unix epoch (`NaiveDate::default`): first
/// ascending, last descending.
fn sortable_date(event: &Event) -> NaiveDate {
    event.date.unwrap_or_default()
}

/// Render search results as CSV for download.
///
/// Every field is quoted; embedded quotes are doubled per RFC 4180.
pub fn export_csv(events: &[Event]) -> String {
    let mut out = String::from(
        "\"Title\",\"Category\",\"Date\",\"Location\",\"Duration\",\"Volunteers Needed\",\"Skills\",\"Description\"\n",
    );

    for event in events {
        let date = event
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "TBD".to_string());
        let duration = event.duration.as_deref().unwrap_or("TBD");

        let row = [
            event.title.as_str(),
            event.category.display_name(),
            date.as_str(),
            event.location.as_str(),
            duration,
            &event.volunteers_needed.to_string(),
            &event.skills.join(", "),
            event.description.as_str(),
        ];

        let line: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
