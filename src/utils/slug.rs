//! Company name normalization shared by grouping, filtering and detail lookup.

use serde::{Deserialize, Serialize};

/// How two company names are decided to be "the same company".
///
/// `Exact` keys on the raw string, so "Google" and "google" are two
/// companies. `Folded` lower-cases and collapses whitespace first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyKey {
    #[default]
    Exact,
    Folded,
}

impl CompanyKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "exact" => Some(CompanyKey::Exact),
            "folded" => Some(CompanyKey::Folded),
            _ => None,
        }
    }

    pub fn key(&self, company: &str) -> String {
        match self {
            CompanyKey::Exact => company.to_string(),
            CompanyKey::Folded => fold(company),
        }
    }

    pub fn same(&self, a: &str, b: &str) -> bool {
        self.key(a) == self.key(b)
    }
}

/// Lower-case and collapse runs of whitespace into single spaces.
pub fn fold(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// URL slug for a company detail page: lower-cased, whitespace runs become
/// hyphens, anything else non-alphanumeric is dropped. Lossy and not
/// reversible; distinct names can share a slug.
pub fn slugify(company: &str) -> String {
    let lowered = company.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
        }
    }
    slug
}

/// Best-effort inverse used by the fallback scan: hyphens back to spaces.
pub fn unslug(slug: &str) -> String {
    slug.replace('-', " ")
}
