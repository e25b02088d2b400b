/**
 * Error Response Conversion
 *
 * Renders a `BackendError` as `{"error": ..., "status": ...}`, adding an
 * `errors` list when field validation failed.
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let mut body = json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        let errors = self.field_errors();
        if !errors.is_empty() {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}
