use super::*;

#[test]
fn parse_error_detail_reads_string_detail() {
    assert_eq!(parse_error_detail(r#"{"detail":"Book not found"}"#), Some("Book not found".to_owned()));
}

#[test]
fn parse_error_detail_joins_validation_messages() {
    let body = r#"{"detail":[{"loc":["body","title"],"msg":"field required"},{"msg":"bad status"}]}"#;
    assert_eq!(parse_error_detail(body), Some("field required; bad status".to_owned()));
}

#[test]
fn parse_error_detail_ignores_missing_or_unusable_detail() {
    assert_eq!(parse_error_detail("{}"), None);
    assert_eq!(parse_error_detail(r#"{"detail":""}"#), None);
    assert_eq!(parse_error_detail(r#"{"detail":42}"#), None);
    assert_eq!(parse_error_detail("<html>Bad Gateway</html>"), None);
    assert_eq!(parse_error_detail(""), None);
}

#[test]
fn api_error_user_message_prefers_detail() {
    let err = ApiError::from_response(404, r#"{"detail":"Book not found"}"#);
    assert_eq!(err.detail(), Some("Book not found"));
    assert_eq!(err.user_message("Failed to delete book"), "Book not found");
}

#[test]
fn api_error_user_message_falls_back() {
    assert_eq!(ApiError::from_response(500, "oops").user_message("Failed to add book"), "Failed to add book");
    assert_eq!(
        ApiError::Request("connection refused".to_owned()).user_message("Failed to add book"),
        "Failed to add book"
    );
}

#[test]
fn parse_auth_message_checks_known_fields_in_order() {
    assert_eq!(
        parse_auth_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
        Some("Invalid login credentials".to_owned())
    );
    assert_eq!(
        parse_auth_message(r#"{"code":422,"msg":"User already registered"}"#),
        Some("User already registered".to_owned())
    );
    assert_eq!(parse_auth_message(r#"{"message":"Invalid API key"}"#), Some("Invalid API key".to_owned()));
    assert_eq!(parse_auth_message("not json"), None);
}

#[test]
fn auth_error_from_response_falls_back_to_status() {
    let err = AuthError::from_response(502, "");
    assert_eq!(err.user_message(), "auth request failed: 502");
    let err = AuthError::from_response(400, r#"{"msg":"Password should be at least 6 characters"}"#);
    assert_eq!(err.user_message(), "Password should be at least 6 characters");
}
