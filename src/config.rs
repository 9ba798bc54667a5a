use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 8080)
    pub port: u16,
    /// Okta org base URL, e.g. https://example.okta.com (no default)
    pub okta_org_url: Option<String>,
    /// Okta API token (no default)
    pub okta_api_token: Option<String>,
    /// Cache backend selector (default: memory)
    pub cache_backend: CacheBackend,
    /// TTL for cached search results, in seconds (default: 600)
    pub cache_ttl_seconds: u64,
    /// Deployment environment label reported by /health (default: development)
    pub environment: String,
    /// Log level (default: info)
    pub log_level: String,
}

/// Which cache implementation the process uses. Chosen once at startup,
/// not switchable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Redis,
}

impl CacheBackend {
    /// Parse the CACHE_BACKEND value; anything other than "redis" falls
    /// back to the in-process cache.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("redis") {
            CacheBackend::Redis
        } else {
            CacheBackend::Memory
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Memory => "memory",
            CacheBackend::Redis => "redis",
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Okta credentials are optional here so the service can boot (and serve
    /// /health) without them; directory calls validate their presence.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            okta_org_url: env::var("OKTA_ORG_URL").ok(),
            okta_api_token: env::var("OKTA_API_TOKEN").ok(),
            cache_backend: env::var("CACHE_BACKEND")
                .map(|value| CacheBackend::parse(&value))
                .unwrap_or(CacheBackend::Memory),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidTtl)?,
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid CACHE_TTL_SECONDS value")]
    InvalidTtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_backend_parse() {
        assert_eq!(CacheBackend::parse("redis"), CacheBackend::Redis);
        assert_eq!(CacheBackend::parse("Redis"), CacheBackend::Redis);
        assert_eq!(CacheBackend::parse("memory"), CacheBackend::Memory);
        assert_eq!(CacheBackend::parse("anything-else"), CacheBackend::Memory);
    }

    #[test]
    fn test_cache_backend_as_str() {
        assert_eq!(CacheBackend::Memory.as_str(), "memory");
        assert_eq!(CacheBackend::Redis.as_str(), "redis");
    }
}
