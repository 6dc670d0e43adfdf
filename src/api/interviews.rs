use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;

use crate::config::Config;
use crate::middleware::auth::require_user;
use crate::models::{CreateInterviewRequest, CurrentUser};
use crate::services::aggregator::{self, EditorialHighlights, HOME_RECENT_LIMIT};
use crate::services::filter::FilterSelection;
use crate::services::interview_service;
use crate::store::Store;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Free-text match on company, role or interview type
    pub q: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/interviews - visible interviews, newest first, with filters
#[utoipa::path(
    get,
    path = "/api/v1/interviews",
    tag = "Interviews",
    params(ListingQuery),
    responses((status = 200, description = "Filtered listing and dropdown options"))
)]
#[get("")]
pub async fn list_interviews(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    query: web::Query<ListingQuery>,
) -> HttpResponse {
    let selection = FilterSelection::from_dropdowns(query.company.as_deref(), query.role.as_deref());
    let page = interview_service::listing(
        store.interviews(),
        query.q.as_deref().unwrap_or_default(),
        &selection,
        config.company_key,
        query.limit,
    )
    .await;

    HttpResponse::Ok().json(serde_json::json!({
        "success": page.notice.is_none(),
        "interviews": page.interviews,
        "total": page.interviews.len(),
        "filters": page.options,
        "notice": page.notice,
    }))
}

/// GET /api/v1/interviews/recent - newest cards for the home page
#[utoipa::path(
    get,
    path = "/api/v1/interviews/recent",
    tag = "Interviews",
    params(LimitQuery),
    responses((status = 200, description = "Recent interview cards", body = [crate::models::InterviewCard]))
)]
#[get("/recent")]
pub async fn recent_interviews(
    store: web::Data<dyn Store>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(HOME_RECENT_LIMIT);
    let now = chrono::Utc::now().timestamp();

    match interview_service::recent_visible(store.interviews(), limit).await {
        Ok(records) => {
            let cards: Vec<_> = records
                .iter()
                .map(|r| aggregator::card(r, &EditorialHighlights, now))
                .collect();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "interviews": cards,
                "notice": null,
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to load recent interviews: {}", e);
            HttpResponse::Ok().json(serde_json::json!({
                "success": false,
                "interviews": [],
                "notice": "Failed to load interviews. Please try again.",
            }))
        }
    }
}

/// GET /api/v1/interviews/{id} - full detail of one visible interview
#[utoipa::path(
    get,
    path = "/api/v1/interviews/{id}",
    tag = "Interviews",
    params(("id" = String, Path, description = "Interview id")),
    responses(
        (status = 200, description = "Interview detail", body = crate::models::InterviewDetail),
        (status = 404, description = "Missing or hidden")
    )
)]
#[get("/{id}")]
pub async fn get_interview(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let detail = interview_service::get_interview(store.interviews(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "interview": detail,
    })))
}

/// POST /api/v1/interviews - submit an experience (enters moderation as pending)
#[utoipa::path(
    post,
    path = "/api/v1/interviews",
    tag = "Interviews",
    request_body = CreateInterviewRequest,
    responses(
        (status = 201, description = "Created, pending moderation"),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_interview(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
    body: web::Json<CreateInterviewRequest>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let now = chrono::Utc::now().timestamp();
    let record =
        interview_service::create_interview(store.interviews(), &user, body.into_inner(), now).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "interview": aggregator::detail(&record),
    })))
}

/// DELETE /api/v1/interviews/{id} - remove one of the caller's own submissions
#[utoipa::path(
    delete,
    path = "/api/v1/interviews/{id}",
    tag = "Interviews",
    params(("id" = String, Path, description = "Interview id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found or not owned by the caller")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_interview(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let id = path.into_inner();
    interview_service::delete_interview(store.interviews(), &user, &id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deleted": id,
    })))
}
