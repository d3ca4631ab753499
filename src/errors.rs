use crate::models::ApiResponse;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    Json,
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("activity {activity_type}/{id} already marked as done today")]
    Duplicate { activity_type: String, id: u32 },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::Duplicate { .. })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let dup = AppError::Duplicate {
            activity_type: "fitness".into(),
            id: 3,
        };
        assert!(dup.is_duplicate());
        assert_eq!(dup.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            dup.to_string(),
            "activity fitness/3 already marked as done today"
        );
        assert_eq!(
            AppError::bad_request("type must not be empty").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn body_missing_field_maps_to_validation() {
        use crate::models::MarkDoneRequest;
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"type":"fitness"}"#))
            .unwrap();
        let rejection = Json::<MarkDoneRequest>::from_request(request, &())
            .await
            .unwrap_err();

        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn malformed_query_maps_to_validation() {
        use crate::models::HistoryQuery;
        use axum::{extract::Query, http::Uri};

        let uri: Uri = "/api/activities/history?type=fitness&type=stretching"
            .parse()
            .unwrap();
        let rejection = Query::<HistoryQuery>::try_from_uri(&uri).unwrap_err();

        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_failures_become_persistence_errors() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_duplicate());
    }
}
