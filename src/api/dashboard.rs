use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::config::Config;
use crate::middleware::auth::require_user;
use crate::models::CurrentUser;
use crate::services::aggregator::{ContributionTab, EditorialHighlights};
use crate::services::interview_service;
use crate::store::Store;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContributionsQuery {
    /// published | drafts | all (default all)
    pub tab: Option<String>,
}

/// GET /api/v1/dashboard - stats, recent cards and recommendations
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard", body = crate::models::Dashboard),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let now = chrono::Utc::now().timestamp();
    let (dashboard, notice) = interview_service::dashboard(
        store.interviews(),
        Some(&user),
        config.company_key,
        &EditorialHighlights,
        now,
    )
    .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": notice.is_none(),
        "dashboard": dashboard,
        "notice": notice,
    })))
}

/// GET /api/v1/me/contributions - the caller's own submissions by moderation tab
#[utoipa::path(
    get,
    path = "/api/v1/me/contributions",
    tag = "Dashboard",
    params(ContributionsQuery),
    responses(
        (status = 200, description = "Caller's contributions, newest first"),
        (status = 400, description = "Unknown tab")
    ),
    security(("bearer_auth" = []))
)]
#[get("/me/contributions")]
pub async fn my_contributions(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
    query: web::Query<ContributionsQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let tab = match query.tab.as_deref() {
        None => ContributionTab::All,
        Some(value) => ContributionTab::parse(value)
            .ok_or_else(|| AppError::InvalidRequest(format!("unknown tab '{}'", value)))?,
    };

    let interviews = interview_service::contributions(store.interviews(), Some(&user), tab).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "total": interviews.len(),
        "interviews": interviews,
    })))
}
