//! HTTP handlers and route configuration.

mod authors;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| error::Error::from(AppError::BadRequest(err.to_string()))),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| error::Error::from(AppError::BadRequest(err.to_string()))),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/authors")
                    .route("", web::post().to(authors::create_author))
                    .route("/{id}", web::get().to(authors::get_author)),
            ),
    );
}
