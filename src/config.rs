use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;

const TEST_BASE_URL: &str = "https://test.api.amadeus.com";
const PRODUCTION_BASE_URL: &str = "https://api.amadeus.com";

/// Credentials and endpoint for the flight-search provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

/// Bind address for the web server. Read separately from the provider
/// credentials so a degraded start (no credentials) still honors it.
pub fn bind_addr_from_env() -> String {
    dotenv().ok(); // Load .env file if present
    get_env_or_default("BIND_ADDR", "0.0.0.0:8000")
}

impl ProviderConfig {
    pub fn from_env() -> Result<ProviderConfig> {
        dotenv().ok();
        let api_key = get_env("PROVIDER_API_KEY")?;
        let api_secret = get_env("PROVIDER_API_SECRET")?;
        let hostname = get_env_or_default("PROVIDER_HOSTNAME", "test");
        let base_url = match hostname.as_str() {
            "test" => TEST_BASE_URL.to_string(),
            "production" => PRODUCTION_BASE_URL.to_string(),
            other => bail!("Unknown PROVIDER_HOSTNAME: {other} (expected test or production)"),
        };
        Ok(ProviderConfig {
            api_key,
            api_secret,
            base_url,
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required environment variable: {key}"))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // set_var/remove_var are unsafe in edition 2024; this is the only test
    // in the crate touching process env.
    #[test]
    fn bind_addr_is_read_independently_of_credentials() {
        unsafe {
            env::set_var("BIND_ADDR", "127.0.0.1:9999");
            env::remove_var("PROVIDER_API_KEY");
            env::remove_var("PROVIDER_API_SECRET");
        }

        assert_eq!(bind_addr_from_env(), "127.0.0.1:9999");
        assert!(ProviderConfig::from_env().is_err());

        unsafe {
            env::remove_var("BIND_ADDR");
        }
    }
}
