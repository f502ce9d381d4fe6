// Additional middleware for logging, compression and CORS

use actix_web::middleware::{Compress, Logger};

pub fn setup_middleware() -> (Logger, Compress) {
    let logger = Logger::new("%a \"%r\" %s %b %{x-request-id}o %Dms");
    let compress = Compress::default();
    (logger, compress)
}

// CORS configuration
use actix_cors::Cors;
use actix_web::http::header;

/// Read-only storefront: GET from the configured origins only.
pub fn setup_cors<'a>(allowed_origins: impl IntoIterator<Item = &'a str>) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static(
            crate::api::request_id::REQUEST_ID_HEADER,
        )])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin.trim());
    }

    cors
}
