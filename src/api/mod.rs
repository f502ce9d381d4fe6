// API module for the her-store HTTP storefront
// Serves browse/detail view models as JSON over the remote product catalog

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod request_id;
pub mod routes;
pub mod server;


pub use server::StorefrontServer;
