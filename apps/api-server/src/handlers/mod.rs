//! HTTP handlers and route configuration.

mod auth;
mod books;
mod health;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(auth::signup))
                    .route("/login", web::post().to(auth::login)),
            )
            // Catalog routes (bearer token required)
            .service(
                web::scope("/books")
                    .route("", web::post().to(books::create_book))
                    .route("", web::get().to(books::get_all_books))
                    .route("/{id}", web::get().to(books::get_book))
                    .route("/{id}", web::put().to(books::update_book))
                    .route("/{id}", web::delete().to(books::delete_book)),
            ),
    );
}
