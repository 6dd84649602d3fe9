//! Error types for the query API.
//!
//! [`ApiError`] is converted into an Axum response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Bodies
//! are plain text so clients see exactly the validation message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cafe_core::QueryError;

/// Errors that can occur while answering a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The query parameters failed validation.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Query(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_are_bad_requests() {
        let err = ApiError::from(QueryError::UnknownCity);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "unknown city");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
