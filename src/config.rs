use crate::catalog::remote::DEFAULT_BASE_URL;
use crate::util::env::{env_opt, env_parse, env_parse_opt, init_env, log_config_snapshot};

const CONFIG_KEYS: &[&str] = &[
    "API_HOST",
    "API_PORT",
    "PRODUCT_API_URL",
    "PRODUCT_API_TIMEOUT_SECS",
    "ALLOWED_ORIGINS",
];

/// Storefront settings, read from the process environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub product_api_url: String,
    /// Unset means no client-side timeout.
    pub product_api_timeout_secs: Option<u64>,
    pub allowed_origins: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            product_api_url: DEFAULT_BASE_URL.to_string(),
            product_api_timeout_secs: None,
            allowed_origins: "http://localhost:3000".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        init_env();
        let defaults = Self::default();
        let cfg = Self {
            host: env_opt("API_HOST").unwrap_or(defaults.host),
            port: env_parse("API_PORT", defaults.port),
            product_api_url: env_opt("PRODUCT_API_URL").unwrap_or(defaults.product_api_url),
            product_api_timeout_secs: env_parse_opt("PRODUCT_API_TIMEOUT_SECS"),
            allowed_origins: env_opt("ALLOWED_ORIGINS").unwrap_or(defaults.allowed_origins),
        };
        log_config_snapshot("storefront", CONFIG_KEYS);
        cfg
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_catalog() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.product_api_url, "https://next-ecommerce-api.vercel.app");
        assert_eq!(cfg.product_api_timeout_secs, None);
    }

    #[test]
    fn origins_split_and_trim() {
        let cfg = StoreConfig {
            allowed_origins: "http://a.test, http://b.test,,".into(),
            ..StoreConfig::default()
        };
        assert_eq!(cfg.origins().collect::<Vec<_>>(), vec!["http://a.test", "http://b.test"]);
    }
}
