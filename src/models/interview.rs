use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::{display, AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Moderation state. Anything that is not `pending` or `approved` is hidden
/// from every public view; unknown strings land in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ModerationStatus {
    pub fn is_visible(&self) -> bool {
        matches!(self, ModerationStatus::Pending | ModerationStatus::Approved)
    }
}

/// One submitted interview experience (stored in the `interviews` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub company: String,
    pub role: String,

    /// Comma-separated categories ("Technical, Behavioral")
    #[serde(default)]
    pub interview_type: String,

    #[serde(default)]
    pub rounds: i32,

    #[serde(default)]
    pub process: String,

    /// Newline-delimited questions
    #[serde(default)]
    pub questions: String,

    /// Newline-delimited preparation tips
    #[serde(default)]
    pub preparation: Option<String>,

    #[serde(default)]
    pub timeline: Option<String>,

    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    #[serde(default)]
    pub outcome: Option<String>,

    /// Unix seconds, assigned by the service at insert
    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_by_email: Option<String>,

    #[serde(default)]
    pub status: ModerationStatus,
}

impl InterviewRecord {
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn interview_types(&self) -> Vec<String> {
        display::split_types(&self.interview_type)
    }

    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }
}

/// Request body for `POST /api/v1/interviews`
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub interview_type: String,
    #[serde(default)]
    pub rounds: i32,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub questions: String,
    pub preparation: Option<String>,
    pub timeline: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub outcome: Option<String>,
}

impl CreateInterviewRequest {
    /// Required-field check done before any write is attempted.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("company", &self.company),
            ("role", &self.role),
            ("interviewType", &self.interview_type),
            ("process", &self.process),
            ("questions", &self.questions),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::InvalidRequest(format!("{} is required", field)));
            }
        }
        if self.rounds <= 0 {
            return Err(AppError::InvalidRequest("rounds must be a positive integer".into()));
        }
        if self.difficulty.is_none() {
            return Err(AppError::InvalidRequest("difficulty is required".into()));
        }
        Ok(())
    }
}

/// Flat search/listing row. This is also the wire shape of `GET /search`:
/// `{id, company, role, type, outcome?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InterviewListing {
    pub id: String,
    pub company: String,
    pub role: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl InterviewListing {
    pub fn types(&self) -> Vec<String> {
        display::split_types(&self.kind)
    }
}

impl From<&InterviewRecord> for InterviewListing {
    fn from(r: &InterviewRecord) -> Self {
        InterviewListing {
            id: r.id_hex(),
            company: r.company.clone(),
            role: r.role.clone(),
            kind: r.interview_type.clone(),
            outcome: r.outcome.clone(),
        }
    }
}
