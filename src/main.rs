use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use her_store::browse::{BrowseOverrides, BrowseQuery, SortOrder};
use her_store::catalog::{ProductSource, RemoteProductSource};
use her_store::config::StoreConfig;
use her_store::tracing::{init_tracing_to, LogSink, CLI_FILTER};
use her_store::views::{
    BrowseController, DateOrder, DetailController, RatingOrder, ReviewSort, ViewState,
};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "her-store", version, about = "HerStore catalog inspection CLI")]
struct Cli {
    /// Override PRODUCT_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Render one listing page, exactly as GET /products would
    Browse {
        /// Raw browse query string, e.g. "page=2&search=phone"
        query: Option<String>,
        /// Replace the search term (resets to page 1)
        #[arg(long)]
        search: Option<String>,
        /// Replace the category filter (resets to page 1)
        #[arg(long)]
        category: Option<String>,
        /// Price sort: asc, desc or none (resets to page 1)
        #[arg(long)]
        sort: Option<String>,
        /// Jump to a page, keeping filters
        #[arg(long)]
        page: Option<u32>,
    },
    /// Render a product detail page
    Product {
        id: u64,
        /// latest, earliest or none
        #[arg(long, default_value = "latest")]
        date_order: String,
        /// highest, lowest or none
        #[arg(long, default_value = "highest")]
        rating_order: String,
        /// Advance the gallery this many images (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step_images: i32,
    },
    /// List categories available for filtering
    Categories,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}

/// Print the final view state; a failed load is a non-zero exit.
fn finish<T: Serialize>(state: &ViewState<T>) -> Result<()> {
    print_json(state)?;
    if let ViewState::Failed(failure) = state {
        bail!("{} (retry: {})", failure.message, failure.retry_href);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_to(CLI_FILTER, LogSink::Stderr)?;

    let cli = Cli::parse();
    let mut config = StoreConfig::from_env();
    if let Some(url) = cli.api_url {
        config.product_api_url = url;
    }
    let source: Arc<dyn ProductSource> = Arc::new(
        RemoteProductSource::new(Some(&config.product_api_url), config.product_api_timeout_secs)
            .context("failed to build product API client")?,
    );
    info!(product_api = %config.product_api_url, "catalog source ready");

    match cli.command {
        Commands::Browse {
            query,
            search,
            category,
            sort,
            page,
        } => {
            let current = BrowseQuery::decode(query.as_deref().unwrap_or_default());
            let sort = sort.map(|raw| BrowseOverrides::price_sort(SortOrder::parse(&raw)));
            let overrides = BrowseOverrides {
                page,
                search,
                category,
                sort_by: sort.as_ref().and_then(|s| s.sort_by),
                order: sort.as_ref().and_then(|s| s.order),
            };
            let encoded = current.encode(&overrides);
            info!(query = %encoded, "browsing");

            let controller = BrowseController::new(source);
            controller.navigate_raw(&encoded).await;
            finish(&controller.state())
        }
        Commands::Product {
            id,
            date_order,
            rating_order,
            step_images,
        } => {
            let controller = DetailController::new(source);
            let sort = ReviewSort::new(
                DateOrder::parse(&date_order),
                RatingOrder::parse(&rating_order),
            );
            controller.open(id, sort).await;
            for _ in 0..step_images.unsigned_abs() {
                if step_images > 0 {
                    controller.next_image();
                } else {
                    controller.previous_image();
                }
            }
            finish(&controller.state())
        }
        Commands::Categories => {
            let categories = source
                .list_categories()
                .await
                .context("Failed to load categories")?;
            print_json(&categories)
        }
    }
}
