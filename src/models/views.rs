//! Derived view models. Built fresh from the record list, never persisted.

use serde::Serialize;

use super::{Difficulty, ModerationStatus};

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub name: String,
    pub slug: String,
    /// Distinct roles in first-seen order
    pub roles: Vec<String>,
    pub industry: String,
    pub interview_count: usize,
}

/// Card used by the recent and recommended lists.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewCard {
    pub id: String,
    pub company: String,
    pub role: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub shared_by: String,
    pub date: String,
    pub is_new: bool,
    pub is_recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct RoundPartition {
    /// 1-based
    pub round: usize,
    pub label: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetail {
    pub id: String,
    pub company: String,
    pub role: String,
    pub interview_types: Vec<String>,
    pub rounds: Vec<RoundPartition>,
    pub process: String,
    pub preparation: Vec<String>,
    pub timeline: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub outcome: Option<String>,
    pub shared_by: String,
    pub date: String,
    #[schema(value_type = String)]
    pub status: ModerationStatus,
}

/// Result of a company page lookup. `found = false` means the interviews are
/// placeholder sample content, not a store failure.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    pub company: String,
    pub slug: String,
    pub found: bool,
    pub interviews: Vec<InterviewDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub interviews_explored: usize,
    pub companies_researched: usize,
    pub your_contributions: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent: Vec<InterviewCard>,
    pub recommended: Vec<InterviewCard>,
}
