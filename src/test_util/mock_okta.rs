//! Canned Okta users-API payloads for tests.

use serde_json::{json, Value};

/// Record whose profile carries an explicit display name.
pub fn user_with_display_name(id: &str, display_name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "profile": {
            "displayName": display_name,
            "email": email,
            "title": "Engineer",
            "officeLocation": "HQ"
        }
    })
}

/// Record with first/last name only; normalization joins them.
pub fn user_with_names(id: &str, first: &str, last: &str, email: &str) -> Value {
    json!({
        "id": id,
        "profile": {
            "firstName": first,
            "lastName": last,
            "email": email,
            "city": "Berlin"
        }
    })
}

/// Bare record; normalization falls back to the email for display.
pub fn user_with_email_only(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "profile": {
            "email": email
        }
    })
}

/// A typical search page exercising every normalization branch.
pub fn sample_page() -> Value {
    json!([
        user_with_display_name("u1", "Ada L.", "ada@example.com"),
        user_with_names("u2", "Grace", "Hopper", "grace@example.com"),
        user_with_email_only("u3", "anon@example.com"),
    ])
}

/// Okta-style `Link` header with a self entry and a next entry carrying
/// `after`.
pub fn link_header_with_next(base_url: &str, after: &str) -> String {
    format!(
        "<{base_url}/api/v1/users?limit=10>; rel=\"self\", \
         <{base_url}/api/v1/users?after={after}&limit=10>; rel=\"next\""
    )
}

/// Body Okta sends alongside a 429.
pub fn rate_limit_body() -> Value {
    json!({
        "errorCode": "E0000047",
        "errorSummary": "API call exceeded rate limit due to too many requests."
    })
}
