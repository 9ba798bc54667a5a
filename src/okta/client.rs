//! HTTP client for the Okta users API.
//!
//! Okta free tier allows 1000 requests per minute; 429 responses are
//! recovered by the retry policy in [`super::retry`].

use std::time::Duration;

use reqwest::header;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::retry::RetryPolicy;
use crate::config::Config;
use crate::models::{SearchResult, User};

/// A hung upstream call is aborted after this long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Okta users API.
///
/// Credentials are optional at construction so the process can boot without
/// them; each call validates presence and fails with [`OktaError::Config`].
pub struct OktaClient {
    http_client: Client,
    org_url: Option<String>,
    api_token: Option<String>,
    retry_policy: RetryPolicy,
}

/// Raw user record as returned by Okta. Never exposed past normalization.
#[derive(Debug, Deserialize)]
struct OktaUser {
    id: String,
    profile: OktaProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OktaProfile {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    email: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    office_location: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OktaError {
    #[error("Okta configuration error: {0}")]
    Config(&'static str),
    #[error("Okta request failed: {0}")]
    Request(String),
    #[error("Okta API error: {status}")]
    Api { status: u16 },
    #[error("Invalid Okta response: {0}")]
    InvalidResponse(String),
}

impl OktaError {
    /// Whether this failure looks like upstream rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            OktaError::Api { status } => *status == 429,
            other => other.to_string().to_lowercase().contains("rate limit"),
        }
    }
}

impl OktaClient {
    pub fn new(org_url: Option<String>, api_token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            org_url: org_url.map(|url| url.trim_end_matches('/').to_string()),
            api_token,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.okta_org_url.clone(), config.okta_api_token.clone())
    }

    /// Replace the retry schedule (tests inject a fast one).
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub(super) fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    fn credentials(&self) -> Result<(&str, &str), OktaError> {
        let org_url = self
            .org_url
            .as_deref()
            .ok_or(OktaError::Config("OKTA_ORG_URL is required"))?;
        let api_token = self
            .api_token
            .as_deref()
            .ok_or(OktaError::Config("OKTA_API_TOKEN is required"))?;
        Ok((org_url, api_token))
    }

    /// Fetch one page of users from the directory.
    ///
    /// A filter is sent only when `query` trims non-empty; `cursor` threads
    /// Okta's `after` continuation token through repeated calls. The next
    /// page's cursor is parsed from the `Link` response header.
    pub async fn fetch_users(
        &self,
        query: Option<&str>,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<SearchResult, OktaError> {
        let (org_url, api_token) = self.credentials()?;

        let url = format!("{}/api/v1/users", org_url);

        let mut params: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            params.push(("after", cursor.to_string()));
        }
        if let Some(trimmed) = query.map(str::trim).filter(|q| !q.is_empty()) {
            params.push(("search", build_filter(trimmed)));
        }

        tracing::debug!(url = %url, limit, "Sending request to Okta");

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("SSWS {}", api_token))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| OktaError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OktaError::Api {
                status: response.status().as_u16(),
            });
        }

        // Read before the body consumes the response.
        let next_cursor = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_next_cursor);

        let users: Vec<OktaUser> = response
            .json()
            .await
            .map_err(|e| OktaError::InvalidResponse(e.to_string()))?;

        Ok(SearchResult {
            items: users.into_iter().map(normalize_user).collect(),
            next_cursor,
        })
    }
}

/// Build the Okta `search` filter: starts-with predicates over the profile
/// fields the picker displays. Embedded quotes are escaped so a query cannot
/// terminate the filter's string literal early.
fn build_filter(query: &str) -> String {
    let q = query.replace('"', "\\\"");
    format!(
        "profile.displayName sw \"{q}\" or profile.email sw \"{q}\" \
         or profile.title sw \"{q}\" or profile.officeLocation sw \"{q}\""
    )
}

/// Extract the `after` cursor from a `Link` header's `rel="next"` entry.
/// Returns `None` when there is no next page.
fn parse_next_cursor(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        if !parts.any(|part| part.trim() == "rel=\"next\"") {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "after")
            .map(|(_, value)| value.into_owned())
    })
}

/// Map a raw Okta record to the canonical shape. Display name falls back to
/// "first last", then email, so it is never empty when the email is not.
fn normalize_user(user: OktaUser) -> User {
    let profile = user.profile;

    let display_name = match profile.display_name.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => match (profile.first_name, profile.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => profile.email.clone(),
        },
    };

    User {
        id: user.id,
        display_name,
        email: profile.email,
        title: profile.title.filter(|title| !title.is_empty()),
        office_location: profile
            .office_location
            .filter(|location| !location.is_empty())
            .or(profile.city.filter(|city| !city.is_empty())),
        avatar_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str) -> OktaProfile {
        OktaProfile {
            first_name: None,
            last_name: None,
            display_name: None,
            email: email.to_string(),
            title: None,
            city: None,
            office_location: None,
        }
    }

    #[test]
    fn test_normalize_prefers_display_name() {
        let user = OktaUser {
            id: "u1".to_string(),
            profile: OktaProfile {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                display_name: Some("Ada L.".to_string()),
                ..profile("a@b.com")
            },
        };
        assert_eq!(normalize_user(user).display_name, "Ada L.");
    }

    #[test]
    fn test_normalize_falls_back_to_first_last() {
        let user = OktaUser {
            id: "u1".to_string(),
            profile: OktaProfile {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                ..profile("a@b.com")
            },
        };
        assert_eq!(normalize_user(user).display_name, "Ada Lovelace");
    }

    #[test]
    fn test_normalize_falls_back_to_email() {
        let user = OktaUser {
            id: "u1".to_string(),
            profile: profile("a@b.com"),
        };
        let normalized = normalize_user(user);
        assert_eq!(normalized.display_name, "a@b.com");
        assert_eq!(normalized.email, "a@b.com");
    }

    #[test]
    fn test_normalize_ignores_empty_display_name() {
        let user = OktaUser {
            id: "u1".to_string(),
            profile: OktaProfile {
                display_name: Some(String::new()),
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                ..profile("a@b.com")
            },
        };
        assert_eq!(normalize_user(user).display_name, "Ada Lovelace");
    }

    #[test]
    fn test_normalize_office_location_falls_back_to_city() {
        let user = OktaUser {
            id: "u1".to_string(),
            profile: OktaProfile {
                city: Some("Berlin".to_string()),
                ..profile("a@b.com")
            },
        };
        assert_eq!(normalize_user(user).office_location.as_deref(), Some("Berlin"));

        let user = OktaUser {
            id: "u2".to_string(),
            profile: OktaProfile {
                city: Some("Berlin".to_string()),
                office_location: Some("HQ 4th floor".to_string()),
                ..profile("a@b.com")
            },
        };
        assert_eq!(
            normalize_user(user).office_location.as_deref(),
            Some("HQ 4th floor")
        );
    }

    #[test]
    fn test_build_filter_covers_picker_fields() {
        let filter = build_filter("ada");
        assert!(filter.contains("profile.displayName sw \"ada\""));
        assert!(filter.contains("profile.email sw \"ada\""));
        assert!(filter.contains("profile.title sw \"ada\""));
        assert!(filter.contains("profile.officeLocation sw \"ada\""));
    }

    #[test]
    fn test_build_filter_escapes_quotes() {
        let filter = build_filter("a\"da");
        assert!(filter.contains("sw \"a\\\"da\""));
        // The only unescaped quotes are the literal delimiters.
        assert!(!filter.contains("sw \"a\"da\""));
    }

    #[test]
    fn test_parse_next_cursor_from_link_header() {
        let header = "<https://example.okta.com/api/v1/users?limit=10>; rel=\"self\", \
                      <https://example.okta.com/api/v1/users?after=X&limit=10>; rel=\"next\"";
        assert_eq!(parse_next_cursor(header).as_deref(), Some("X"));
    }

    #[test]
    fn test_parse_next_cursor_no_next_relation() {
        let header = "<https://example.okta.com/api/v1/users?limit=10>; rel=\"self\"";
        assert_eq!(parse_next_cursor(header), None);
    }

    #[test]
    fn test_parse_next_cursor_next_without_after_param() {
        let header = "<https://example.okta.com/api/v1/users?limit=10>; rel=\"next\"";
        assert_eq!(parse_next_cursor(header), None);
    }

    #[test]
    fn test_parse_next_cursor_malformed_entry_is_skipped() {
        let header = "garbage; rel=\"next\", \
                      <https://example.okta.com/api/v1/users?after=Y>; rel=\"next\"";
        assert_eq!(parse_next_cursor(header).as_deref(), Some("Y"));
    }

    #[test]
    fn test_rate_limited_detection() {
        assert!(OktaError::Api { status: 429 }.is_rate_limited());
        assert!(!OktaError::Api { status: 500 }.is_rate_limited());
        assert!(OktaError::Request("upstream rate limit exceeded".to_string()).is_rate_limited());
        assert!(!OktaError::Config("OKTA_ORG_URL is required").is_rate_limited());
    }
}
