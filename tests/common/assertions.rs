//! Custom assertion macros
//!
//! Assertions over the JSON error bodies returned by the API.

/// Assert that a JSON error body names every listed field
#[macro_export]
macro_rules! assert_field_errors {
    ($body:expr, [$($field:expr),+ $(,)?]) => {
        let fields: Vec<String> = $body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["field"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        $(
            assert!(
                fields.iter().any(|f| f == $field),
                "Expected a field error for '{}', got {:?}",
                $field,
                fields
            );
        )+
    };
}
