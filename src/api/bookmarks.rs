use actix_web::{delete, get, post, web, HttpResponse};

use crate::middleware::auth::require_user;
use crate::models::{BookmarkResponse, CreateBookmarkRequest, CurrentUser};
use crate::services::bookmark_service;
use crate::store::Store;
use crate::utils::AppError;

/// GET /api/v1/bookmarks - the caller's saved interviews, newest first
#[utoipa::path(
    get,
    path = "/api/v1/bookmarks",
    tag = "Bookmarks",
    responses((status = 200, description = "Bookmarks", body = [BookmarkResponse])),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn list_bookmarks(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let bookmarks: Vec<BookmarkResponse> = bookmark_service::list_bookmarks(store.bookmarks(), &user)
        .await?
        .into_iter()
        .map(BookmarkResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "total": bookmarks.len(),
        "bookmarks": bookmarks,
    })))
}

/// POST /api/v1/bookmarks - save an interview; saving twice returns the existing bookmark
#[utoipa::path(
    post,
    path = "/api/v1/bookmarks",
    tag = "Bookmarks",
    request_body = CreateBookmarkRequest,
    responses(
        (status = 201, description = "Saved", body = BookmarkResponse),
        (status = 200, description = "Already saved", body = BookmarkResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn add_bookmark(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
    body: web::Json<CreateBookmarkRequest>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let now = chrono::Utc::now().timestamp();
    let outcome = bookmark_service::add_bookmark(store.bookmarks(), &user, body.into_inner(), now).await?;

    let mut response = if outcome.created() {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(serde_json::json!({
        "success": true,
        "bookmark": BookmarkResponse::from(outcome.bookmark()),
    })))
}

/// DELETE /api/v1/bookmarks/{interview_id} - unsave an interview
#[utoipa::path(
    delete,
    path = "/api/v1/bookmarks/{interview_id}",
    tag = "Bookmarks",
    params(("interview_id" = String, Path, description = "Bookmarked interview id")),
    responses(
        (status = 200, description = "Removed"),
        (status = 404, description = "Interview was not bookmarked")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{interview_id}")]
pub async fn remove_bookmark(
    user: Option<web::ReqData<CurrentUser>>,
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(user)?;
    let interview_id = path.into_inner();
    if !bookmark_service::remove_bookmark(store.bookmarks(), &user, &interview_id).await? {
        return Err(AppError::NotFound(format!("bookmark for {}", interview_id)));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "removed": interview_id,
    })))
}
