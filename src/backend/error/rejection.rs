/**
 * Extractor Rejections
 *
 * Turns axum's body, query and path rejections into `BackendError`s. Body
 * and query failures become 400 validation errors naming the offending
 * field, so clients treat them like any other form mistake.
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::backend::error::types::BackendError;
use crate::shared::validation::FieldError;
use crate::shared::SharedError;

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        let error = match &rejection {
            JsonRejection::JsonDataError(_) => field_error(&rejection.body_text(), "body"),
            JsonRejection::JsonSyntaxError(_) => FieldError::new("body", "Malformed JSON"),
            JsonRejection::MissingJsonContentType(_) => {
                FieldError::new("body", "Expected a JSON body")
            }
            _ => FieldError::new("body", "Could not read the request body"),
        };
        SharedError::ValidationError {
            errors: vec![error],
        }
        .into()
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Rejected query string: {}", rejection.body_text());
        SharedError::ValidationError {
            errors: vec![field_error(&rejection.body_text(), "query")],
        }
        .into()
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!("Rejected path: {}", rejection.body_text());
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}

/// Pick the field out of a deserialization failure.
///
/// axum renders these as `<summary>: [<path>: ]<serde message>`; the serde
/// message may end with a ` at line L column C` position.
fn field_error(text: &str, fallback: &str) -> FieldError {
    let detail = text.split_once(": ").map_or(text, |(_, rest)| rest);

    if let Some(name) = detail
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
    {
        return FieldError::new(name, format!("{} is required", name));
    }

    match detail.split_once(": ") {
        Some((path, message)) if is_field_path(path) => {
            FieldError::new(path, without_position(message))
        }
        _ => FieldError::new(fallback, without_position(detail)),
    }
}

fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}

fn without_position(message: &str) -> String {
    match message.find(" at line ") {
        Some(end) => message[..end].to_string(),
        None => message.to_string(),
    }
}
