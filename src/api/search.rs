use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::services::interview_service;
use crate::store::Store;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /search?q= - remote search used by the search box. An empty term
/// returns an empty array.
#[utoipa::path(
    get,
    path = "/search",
    tag = "Search",
    params(SearchQuery),
    responses((status = 200, description = "Matching listings", body = [crate::models::InterviewListing]))
)]
pub async fn search(
    store: web::Data<dyn Store>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let term = query.q.as_deref().unwrap_or_default();
    let hits = interview_service::search(store.interviews(), term).await?;
    log::info!("🔍 Search '{}' → {} hits", term, hits.len());
    Ok(HttpResponse::Ok().json(hits))
}
