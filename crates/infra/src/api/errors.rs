//! Turning raw responses into `Value`s or normalized [`ApiError`]s

use mizan_domain::{ApiError, FieldErrors};
use serde_json::Value;

use crate::http::HttpResponse;

/// 2xx body → parsed JSON; an empty body (204, 205, or a bare 200) is `Null`.
pub fn success_body(response: &HttpResponse) -> Result<Value, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::decode(
            Some(response.status),
            format!("status {} with a non-JSON body: {e}", response.status),
        )
    })
}

/// Non-2xx response → [`ApiError`].
///
/// The backend's `message` and `errors` are used when the body is a JSON
/// object; HTML error pages and empty bodies keep only the status.
pub fn map_status_error(response: &HttpResponse) -> ApiError {
    let parsed = serde_json::from_str::<Value>(&response.body).ok();
    let object = parsed.as_ref().and_then(Value::as_object);

    let message = object
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let errors = object.and_then(|body| body.get("errors")).map(FieldErrors::from_json);

    let error = ApiError::http(response.status, message, errors);
    if object.is_none() && !response.body.trim().is_empty() {
        error.with_detail(format!("status {} with a non-JSON body", response.status))
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use mizan_domain::constants::MSG_GENERIC_FAILURE;
    use mizan_domain::{ApiErrorKind, FailureCategory};
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse { status, body: body.to_string() }
    }

    #[test]
    fn empty_success_is_null() {
        assert_eq!(success_body(&response(204, "")).unwrap(), Value::Null);
        assert_eq!(success_body(&response(200, "  \n")).unwrap(), Value::Null);
    }

    #[test]
    fn success_body_is_returned_unchanged() {
        let body = json!({ "status": true, "customers": [{ "name": "Ali", "odd_field": [1, 2] }] });
        assert_eq!(success_body(&response(200, &body.to_string())).unwrap(), body);
    }

    #[test]
    fn non_json_success_is_a_decode_error_with_status() {
        let err = success_body(&response(200, "<html>ok</html>")).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
        assert_eq!(err.status, Some(200));
    }

    #[test]
    fn validation_errors_are_kept_per_field() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": { "name": ["The name has already been taken."], "code": "Required" }
        });
        let err = map_status_error(&response(422, &body.to_string()));

        assert_eq!(err.message, "The given data was invalid.");
        assert_eq!(err.status, Some(422));
        assert_eq!(err.field("name"), ["The name has already been taken."]);
        assert_eq!(err.field("code"), ["Required"]);
        assert_eq!(err.category(), FailureCategory::Validation);
    }

    #[test]
    fn html_404_keeps_the_status() {
        let err = map_status_error(&response(404, "<!doctype html><h1>Not Found</h1>"));
        assert!(err.is_not_found());
        assert_eq!(err.message, MSG_GENERIC_FAILURE);
        assert!(err.detail.is_some());
    }

    #[test]
    fn errors_ignored_outside_422() {
        let body = json!({ "message": "Server Error", "errors": { "x": ["y"] } });
        let err = map_status_error(&response(500, &body.to_string()));
        assert_eq!(err.message, "Server Error");
        assert!(err.errors.is_none());
    }

    #[test]
    fn unauthorized_is_authentication_absent() {
        let err = map_status_error(&response(401, r#"{"message":"Unauthenticated."}"#));
        assert_eq!(err.category(), FailureCategory::AuthenticationAbsent);
        assert_eq!(err.user_message(), "Unauthenticated.");
    }
}
