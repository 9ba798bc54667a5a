use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::{ApiResponse, ResponseMeta};
use crate::AppState;

/// Results per page for picker searches.
const PAGE_SIZE: u32 = 10;
/// Results returned by the uncached sample endpoint.
const SAMPLE_SIZE: u32 = 5;

#[derive(Debug, Deserialize)]
struct PeopleParams {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    cursor: Option<String>,
}

/// GET /people - paginated directory search.
///
/// Cache key is `people:{query}:{cursor|first}` so every pagination point of
/// a query caches independently. Concurrent misses for the same key are not
/// de-duplicated; both fetch upstream and both write.
async fn search_people(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeopleParams>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let query = params.query.as_deref().unwrap_or("").trim().to_string();
    if query.chars().count() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure("Query must be at least 2 characters")),
        );
    }

    let cursor = params.cursor.as_deref();
    let cache_key = format!("people:{}:{}", query, cursor.unwrap_or("first"));

    match state.cache.get(&cache_key).await {
        Ok(Some(cached)) => {
            return (
                StatusCode::OK,
                Json(ApiResponse::success(
                    cached,
                    ResponseMeta {
                        count: None,
                        cached: Some(true),
                    },
                )),
            );
        }
        Ok(None) => {}
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(err.to_string())),
            );
        }
    }

    let result = state
        .okta_client
        .fetch_users_with_retry(Some(&query), PAGE_SIZE, cursor)
        .await;

    match result {
        Ok(result) => {
            let count = result.items.len();
            let data = json!({
                "items": result.items,
                "nextCursor": result.next_cursor,
            });

            if let Err(err) = state
                .cache
                .set(&cache_key, data.clone(), state.config.cache_ttl_seconds)
                .await
            {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::failure(err.to_string())),
                );
            }

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    data,
                    ResponseMeta {
                        count: Some(count),
                        cached: Some(false),
                    },
                )),
            )
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(err.to_string())),
        ),
    }
}

/// GET /people/sample - small uncached directory slice for dev pages.
async fn sample_people(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    match state
        .okta_client
        .fetch_users_with_retry(None, SAMPLE_SIZE, None)
        .await
    {
        Ok(result) => {
            let count = result.items.len();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    json!({ "items": result.items }),
                    ResponseMeta {
                        count: Some(count),
                        cached: None,
                    },
                )),
            )
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(err.to_string())),
        ),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/people", get(search_people))
        .route("/people/sample", get(sample_people))
        .with_state(state)
}
