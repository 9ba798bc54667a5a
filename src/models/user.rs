use serde::{Deserialize, Serialize};

/// Canonical user shape returned to the picker widget.
///
/// Normalized from the raw Okta record by the directory client; immutable
/// once built. `display_name` is never empty for a record with an email
/// because normalization falls back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub title: Option<String>,
    pub office_location: Option<String>,
    /// No Okta profile field is mapped to this yet.
    pub avatar_url: Option<String>,
}

/// One page of directory search results, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub items: Vec<User>,
    /// Opaque continuation token; `None` means no further pages. Only
    /// meaningful together with the query that produced it.
    pub next_cursor: Option<String>,
}
