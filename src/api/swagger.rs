use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Prep Well API",
        version = "1.0.0",
        description = "Interview experiences shared by students.\n\n**Authentication:** submitting, bookmarks, contributions and the dashboard require a JWT Bearer token. Browsing and search are public.",
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Search
        crate::api::search::search,

        // Interviews
        crate::api::interviews::list_interviews,
        crate::api::interviews::recent_interviews,
        crate::api::interviews::get_interview,
        crate::api::interviews::create_interview,
        crate::api::interviews::delete_interview,

        // Companies
        crate::api::companies::featured_companies,
        crate::api::companies::company_detail,

        // Bookmarks
        crate::api::bookmarks::list_bookmarks,
        crate::api::bookmarks::add_bookmark,
        crate::api::bookmarks::remove_bookmark,

        // Dashboard
        crate::api::dashboard::get_dashboard,
        crate::api::dashboard::my_contributions,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::InterviewListing,
            crate::models::InterviewCard,
            crate::models::InterviewDetail,
            crate::models::RoundPartition,
            crate::models::CompanySummary,
            crate::models::CompanyDetail,
            crate::models::Dashboard,
            crate::models::DashboardStats,
            crate::models::CreateInterviewRequest,
            crate::models::CreateBookmarkRequest,
            crate::models::BookmarkResponse,
            crate::models::Difficulty,
            crate::services::filter::FilterOptions,
        )
    ),
    tags(
        (name = "Health", description = "Service and store health."),
        (name = "Search", description = "Free-text search over visible interviews."),
        (name = "Interviews", description = "Browse, submit and delete interview experiences."),
        (name = "Companies", description = "Featured companies and per-company pages."),
        (name = "Bookmarks", description = "Saved interviews of the signed-in user."),
        (name = "Dashboard", description = "Personal stats, recommendations and contributions."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by the sign-in provider"))
                        .build(),
                ),
            );
        }
    }
}
