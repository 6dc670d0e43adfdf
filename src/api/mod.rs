pub mod bookmarks;
pub mod companies;
pub mod dashboard;
pub mod health;
pub mod interviews;
pub mod search;
pub mod swagger;

use actix_web::web;

use crate::middleware::AuthMiddleware;
use crate::services::auth_service::JwtSettings;

/// Registers every route. Shared by `main` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtSettings) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Remote search for the search box
        .route("/search", web::get().to(search::search))
        .service(
            web::scope("/api/v1")
                .wrap(AuthMiddleware::new(jwt))
                .service(
                    web::scope("/interviews")
                        .service(interviews::list_interviews)
                        .service(interviews::recent_interviews)
                        .service(interviews::create_interview)
                        .service(interviews::get_interview)
                        .service(interviews::delete_interview),
                )
                .service(
                    web::scope("/companies")
                        .service(companies::featured_companies)
                        .service(companies::company_detail),
                )
                .service(
                    web::scope("/bookmarks")
                        .service(bookmarks::list_bookmarks)
                        .service(bookmarks::add_bookmark)
                        .service(bookmarks::remove_bookmark),
                )
                .service(dashboard::get_dashboard)
                .service(dashboard::my_contributions),
        );
}
