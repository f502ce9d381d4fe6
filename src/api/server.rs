// Storefront server implementation using actix-web

use std::sync::Arc;

use crate::api::handlers::{self, ServerInfo};
use crate::api::{middleware, request_id::RequestIds, routes};
use crate::catalog::{ProductSource, RemoteProductSource};
use crate::config::StoreConfig;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

pub struct StorefrontServer {
    pub config: StoreConfig,
}

impl StorefrontServer {
    /// Create server from environment variables
    pub fn from_env() -> Self {
        Self {
            config: StoreConfig::from_env(),
        }
    }

    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Upstream catalog client built from the configured URL and timeout.
    pub fn remote_source(&self) -> Result<Arc<dyn ProductSource>> {
        let source = RemoteProductSource::new(
            Some(&self.config.product_api_url),
            self.config.product_api_timeout_secs,
        )
        .context("Failed to build product API client")?;
        Ok(Arc::new(source))
    }

    /// Start the HTTP server
    pub async fn run(self, source: Arc<dyn ProductSource>) -> Result<()> {
        let bind_addr = self.config.bind_addr();

        tracing::info!(
            host = %self.config.host,
            port = %self.config.port,
            product_api = %self.config.product_api_url,
            "Starting her-store storefront server"
        );

        let source_data: web::Data<dyn ProductSource> = web::Data::from(source);
        let info = web::Data::new(ServerInfo::new(self.config.product_api_url.clone()));
        let origins: Vec<String> = self.config.origins().map(str::to_string).collect();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(origins.iter().map(String::as_str));

            App::new()
                .app_data(source_data.clone())
                .app_data(info.clone())
                .wrap(RequestIds)
                .wrap(compress)
                .wrap(logger)
                .wrap(cors)
                .configure(routes::configure_routes)
                .default_service(web::to(handlers::not_found))
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
