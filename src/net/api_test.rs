use super::*;

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(dish_get_endpoint("/puceats/dish", "12"), "/puceats/dish/12/get/");
    assert_eq!(dish_delete_endpoint("/puceats/dish", "12"), "/puceats/dish/12/delete/");
}

#[test]
fn success_body_parses() {
    let resp = parse_response(r#"{"success":true}"#).expect("success");
    assert!(resp.success);
}

#[test]
fn non_json_body_is_malformed() {
    let err = parse_response("<html>Server Error</html>").expect_err("not json");
    assert!(matches!(err, ApiError::Malformed(_)));
    assert_eq!(err.to_string(), "invalid server response");
}

#[test]
fn business_failure_keeps_server_message_verbatim() {
    let err = parse_response(r#"{"success":false,"error":"Nome é obrigatório"}"#).expect_err("rejected");
    assert_eq!(err, ApiError::Rejected("Nome é obrigatório".to_owned()));
}

#[test]
fn business_failure_without_message_is_unknown_error() {
    assert_eq!(
        parse_response(r#"{"success":false}"#),
        Err(ApiError::Rejected("unknown error".to_owned()))
    );
    assert_eq!(
        parse_response(r#"{"success":false,"error":""}"#),
        Err(ApiError::Rejected("unknown error".to_owned()))
    );
}

#[test]
fn alert_messages_per_failure_kind() {
    assert_eq!(
        alert_message("save", &ApiError::Rejected("Campos obrigatórios faltando".into())),
        "Failed to save: Campos obrigatórios faltando"
    );
    assert_eq!(
        alert_message("save", &ApiError::Malformed("expected value".into())),
        "Error: invalid server response"
    );
    assert_eq!(
        alert_message("delete", &ApiError::Network("offline".into())),
        "Failed to delete: request failed: offline"
    );
}

#[test]
fn take_dish_requires_payload() {
    let resp = parse_response(r#"{"success":true,"dish":{"name":"Moqueca","price":40}}"#).expect("success");
    let dish = take_dish(resp).expect("dish");
    assert_eq!(dish.name, "Moqueca");
    assert_eq!(take_dish(ApiResponse { success: true, ..ApiResponse::default() }), Err(ApiError::MissingDish));
}
