// Storefront route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Landing + liveness
        .route("/", web::get().to(handlers::home))
        .route("/health", web::get().to(handlers::health_check))
        // Browse: page, search, category, sortBy, order
        .route("/products", web::get().to(handlers::browse_products))
        // Detail: dateOrder, ratingOrder, image
        .route("/products/{id}", web::get().to(handlers::product_detail))
        .route("/categories", web::get().to(handlers::list_categories));
}
