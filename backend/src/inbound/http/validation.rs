//! Field-level request validation helpers.
//!
//! Handlers reject a request with a single `invalid_request` error naming
//! the offending field in `details`, so clients can surface the problem
//! next to the form input.

use serde_json::json;

use crate::domain::Error;

/// `invalid_request` error attributed to one request field.
pub fn field_error(field: &str, reason: impl Into<String>) -> Error {
    let reason = reason.into();
    Error::invalid_request(format!("invalid {field}: {reason}"))
        .with_details(json!({ "field": field, "reason": reason }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn field_error_names_the_field() {
        let err = field_error("latitude", "out of range");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        let details = err.details.expect("details");
        assert_eq!(details["field"], "latitude");
        assert_eq!(details["reason"], "out of range");
    }
}
