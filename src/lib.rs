//! HerStore: a product catalog storefront over a remote product API.
//!
//! The browse and detail views are plain async functions of an upstream
//! [`catalog::ProductSource`]; the `api` module serves them as JSON and the
//! `her-store` binary renders them on the command line.

pub mod api;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod tracing;
pub mod views;

pub mod util {
    pub mod env;
}
