//! Pure text and categorical filtering shared by the local listing and the
//! remote search path. Both paths go through `apply_filters` so they can
//! never drift apart.

use serde::{Deserialize, Serialize};

use crate::models::{InterviewListing, InterviewRecord};
use crate::services::aggregator;
use crate::utils::CompanyKey;

pub const ALL_COMPANIES: &str = "All Companies";
pub const ALL_ROLES: &str = "All Roles";

/// Dropdown selections. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub company: Option<String>,
    pub role: Option<String>,
}

impl FilterSelection {
    /// Builds a selection from raw dropdown values; blanks and the
    /// "All ..." sentinels clear the filter.
    pub fn from_dropdowns(company: Option<&str>, role: Option<&str>) -> Self {
        fn pick(value: Option<&str>, all: &str) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != all)
                .map(str::to_string)
        }
        Self {
            company: pick(company, ALL_COMPANIES),
            role: pick(role, ALL_ROLES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.role.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    pub roles: Vec<String>,
}

/// Visible records as listing rows, newest first.
pub fn to_listings(records: &[InterviewRecord]) -> Vec<InterviewListing> {
    aggregator::recent(records, None)
        .into_iter()
        .map(InterviewListing::from)
        .collect()
}

/// Case-insensitive substring match on company, role or any interview type.
/// An empty query matches everything.
pub fn matches_query(listing: &InterviewListing, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    listing.company.to_lowercase().contains(&needle)
        || listing.role.to_lowercase().contains(&needle)
        || listing
            .types()
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
}

pub fn search_local(list: &[InterviewListing], query: &str) -> Vec<InterviewListing> {
    list.iter()
        .filter(|l| matches_query(l, query))
        .cloned()
        .collect()
}

/// Company: equality under the configured company key.
/// Role: case-insensitive substring. A selection that matches nothing in
/// the current list simply yields an empty result.
pub fn apply_filters(
    list: &[InterviewListing],
    selection: &FilterSelection,
    key: CompanyKey,
) -> Vec<InterviewListing> {
    let role = selection.role.as_ref().map(|r| r.to_lowercase());
    list.iter()
        .filter(|l| {
            selection
                .company
                .as_deref()
                .map_or(true, |c| key.same(&l.company, c))
        })
        .filter(|l| {
            role.as_deref()
                .map_or(true, |r| l.role.to_lowercase().contains(r))
        })
        .cloned()
        .collect()
}

/// Dropdown options derived from whichever base list is active.
pub fn filter_options(list: &[InterviewListing]) -> FilterOptions {
    let mut companies: Vec<String> = list.iter().map(|l| l.company.clone()).collect();
    let mut roles: Vec<String> = list.iter().map(|l| l.role.clone()).collect();
    companies.sort();
    companies.dedup();
    roles.sort();
    roles.dedup();
    FilterOptions { companies, roles }
}
