// HTTP request handlers for storefront endpoints

use std::time::Instant;

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Result};

use crate::api::models::*;
use crate::api::request_id::RequestId;
use crate::browse::BrowseQuery;
use crate::catalog::ProductSource;
use crate::views::{BrowseView, DetailView, LoadFailure};

/// Process-level facts reported by the health endpoint.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub started: Instant,
    pub product_api: String,
}

impl ServerInfo {
    pub fn new(product_api: impl Into<String>) -> Self {
        Self {
            started: Instant::now(),
            product_api: product_api.into(),
        }
    }
}

fn failure_response(failure: &LoadFailure, request_id: &RequestId) -> HttpResponse {
    let status = if failure.not_found {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_GATEWAY
    };
    HttpResponse::build(status).json(ApiResponse::<()>::failure(failure).for_request(request_id))
}

/// Landing page
pub async fn home(request_id: RequestId) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(HomeResponse::storefront()).for_request(&request_id)))
}

/// Health check endpoint
pub async fn health_check(info: web::Data<ServerInfo>, request_id: RequestId) -> Result<HttpResponse> {
    let response = ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        product_api: info.product_api.clone(),
        uptime_seconds: info.started.elapsed().as_secs(),
    });

    Ok(HttpResponse::Ok().json(response.for_request(&request_id)))
}

/// Product listing driven entirely by the URL query string
pub async fn browse_products(
    req: HttpRequest,
    source: web::Data<dyn ProductSource>,
    request_id: RequestId,
) -> Result<HttpResponse> {
    let query = BrowseQuery::decode(req.query_string());
    tracing::info!(
        page = query.page,
        search = %query.search,
        category = %query.category,
        sort_by = ?query.sort_by,
        order = ?query.order,
        "Browse requested"
    );

    match BrowseView::new(source.into_inner()).load(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page).for_request(&request_id))),
        Err(failure) => Ok(failure_response(&failure, &request_id)),
    }
}

/// Single product with gallery and sorted reviews
pub async fn product_detail(
    req: HttpRequest,
    path: web::Path<String>,
    source: web::Data<dyn ProductSource>,
    request_id: RequestId,
) -> Result<HttpResponse> {
    let Ok(id) = path.trim().parse::<u64>() else {
        return Ok(not_found_response(&request_id));
    };
    let params = DetailParams::decode(req.query_string());
    tracing::info!(id, sort = ?params.sort, image = params.image, "Product detail requested");

    match DetailView::new(source.into_inner())
        .load(id, params.sort, params.image)
        .await
    {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail).for_request(&request_id))),
        Err(failure) => Ok(failure_response(&failure, &request_id)),
    }
}

/// Categories for the filter control
pub async fn list_categories(
    source: web::Data<dyn ProductSource>,
    request_id: RequestId,
) -> Result<HttpResponse> {
    match source.list_categories().await {
        Ok(categories) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(categories).for_request(&request_id)))
        }
        Err(e) => {
            let failure = LoadFailure::from_fetch(
                "Failed to load categories. Please try again later.",
                "/categories".to_string(),
                &e,
            );
            Ok(failure_response(&failure, &request_id))
        }
    }
}

fn not_found_response(request_id: &RequestId) -> HttpResponse {
    HttpResponse::NotFound()
        .json(ApiResponse::<()>::error("This page could not be found").for_request(request_id))
}

/// Fallback for unknown routes
pub async fn not_found(request_id: RequestId) -> Result<HttpResponse> {
    Ok(not_found_response(&request_id))
}
