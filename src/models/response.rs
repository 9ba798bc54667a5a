use serde::Serialize;

/// Uniform envelope for every API route: `{ok, data?, error?, meta?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Debug, Default, Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, meta: ResponseMeta) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            meta: Some(meta),
        }
    }

    /// Failure body carrying only a human-readable message; internal detail
    /// never leaves the handler.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_omits_error_field() {
        let response = ApiResponse::success(
            json!({"items": []}),
            ResponseMeta {
                count: Some(0),
                cached: Some(false),
            },
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["ok"], json!(true));
        assert_eq!(value["meta"]["cached"], json!(false));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_omits_data_and_meta() {
        let response = ApiResponse::<serde_json::Value>::failure("boom");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["ok"], json!(false));
        assert_eq!(value["error"], json!("boom"));
        assert!(value.get("data").is_none());
        assert!(value.get("meta").is_none());
    }
}
