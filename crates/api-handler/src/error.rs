use infrastructure::StoreError;
use lambda_http::{Body, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn into_response(self) -> Response<Body> {
        let (status, message) = match &self {
            ApiError::NotFound => (404, self.to_string()),
            ApiError::BadRequest(_) => (400, self.to_string()),
            ApiError::Unauthorized(_) => (401, self.to_string()),
            ApiError::Internal(_) => (500, "Internal server error".to_string()),
        };

        let body = serde_json::json!({ "error": message }).to_string();

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => {
                tracing::error!(error = %other, "store operation failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("Invalid JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_string(resp: &Response<Body>) -> String {
        match resp.body() {
            Body::Text(s) => s.clone(),
            _ => String::new(),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.into_response().status(), 404);
        assert_eq!(
            ApiError::BadRequest("x".to_string()).into_response().status(),
            400
        );
        assert_eq!(
            ApiError::Unauthorized("x".to_string())
                .into_response()
                .status(),
            401
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).into_response().status(),
            500
        );
    }

    #[test]
    fn test_internal_detail_is_not_echoed() {
        let resp = ApiError::Internal("table missing".to_string()).into_response();

        assert!(!body_string(&resp).contains("table missing"));
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound("t1".to_string()).into();

        assert_eq!(err.into_response().status(), 404);
    }

    #[test]
    fn test_store_request_failure_maps_to_500() {
        let err: ApiError = StoreError::DynamoDb("throttled".to_string()).into();

        assert_eq!(err.into_response().status(), 500);
    }
}
