use actix_web::{get, web, HttpResponse};

use crate::api::interviews::LimitQuery;
use crate::config::Config;
use crate::services::{aggregator, interview_service};
use crate::store::Store;
use crate::utils::AppError;

/// GET /api/v1/companies/featured - companies with the most visible interviews
#[utoipa::path(
    get,
    path = "/api/v1/companies/featured",
    tag = "Companies",
    params(LimitQuery),
    responses((status = 200, description = "Company summaries", body = [crate::models::CompanySummary]))
)]
#[get("/featured")]
pub async fn featured_companies(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    let snap = interview_service::snapshot(store.interviews()).await;
    let companies = aggregator::featured_companies(
        &snap.records,
        config.company_key,
        query.limit.unwrap_or(config.featured_limit),
    );

    HttpResponse::Ok().json(serde_json::json!({
        "success": snap.notice.is_none(),
        "companies": companies,
        "notice": snap.notice,
    }))
}

/// GET /api/v1/companies/{slug} - interviews for one company
#[utoipa::path(
    get,
    path = "/api/v1/companies/{slug}",
    tag = "Companies",
    params(("slug" = String, Path, description = "Company slug, e.g. tech-giant-corp")),
    responses((status = 200, description = "Company page; found=false means placeholder content", body = crate::models::CompanyDetail))
)]
#[get("/{slug}")]
pub async fn company_detail(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let detail =
        interview_service::company_detail(store.interviews(), &path.into_inner(), config.company_key)
            .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "company": detail,
    })))
}
