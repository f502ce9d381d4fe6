// HTTP storefront server binary for her-store
// Serves browse/detail pages as JSON over the remote product catalog

use anyhow::Result;
use her_store::api::StorefrontServer;
use her_store::tracing::{init_tracing, DEFAULT_FILTER};
use her_store::util::env as env_util;

#[actix_web::main]
async fn main() -> Result<()> {
    init_tracing(DEFAULT_FILTER)?;

    tracing::info!("Initializing her-store storefront server");

    // Load dotenv/env once (safe to call multiple times)
    env_util::init_env();

    // Load configuration from environment
    let server = StorefrontServer::from_env();

    let source = server.remote_source()?;
    server.run(source).await?;

    Ok(())
}
