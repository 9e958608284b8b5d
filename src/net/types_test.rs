use super::*;

#[test]
fn success_envelope_without_extras() {
    let resp: ApiResponse = serde_json::from_str(r#"{"success":true}"#).expect("valid");
    assert!(resp.success);
    assert_eq!(resp.error, None);
    assert_eq!(resp.dish, None);
}

#[test]
fn failure_envelope_carries_error() {
    let resp: ApiResponse =
        serde_json::from_str(r#"{"success":false,"error":"Campos obrigatórios faltando"}"#).expect("valid");
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Campos obrigatórios faltando"));
}

#[test]
fn missing_success_counts_as_failure() {
    let resp: ApiResponse = serde_json::from_str("{}").expect("valid");
    assert!(!resp.success);
}

#[test]
fn dish_fields_accept_numbers_strings_and_null() {
    let resp: ApiResponse = serde_json::from_str(
        r#"{"success":true,"dish":{"restaurant_id":4,"name":"Feijoada","description":null,"category":2,"price":"32.50"}}"#,
    )
    .expect("valid");
    let dish = resp.dish.expect("dish present");
    assert_eq!(dish.restaurant_id, "4");
    assert_eq!(dish.name, "Feijoada");
    assert_eq!(dish.description, "");
    assert_eq!(dish.category, "2");
    assert_eq!(dish.price, "32.50");
}

#[test]
fn numeric_price_keeps_its_digits() {
    let dish: Dish = serde_json::from_str(r#"{"name":"x","price":19.9}"#).expect("valid");
    assert_eq!(dish.price, "19.9");
    assert_eq!(dish.restaurant_id, "");
}

#[test]
fn nested_objects_are_rejected_for_scalar_fields() {
    assert!(serde_json::from_str::<Dish>(r#"{"category":{"id":1}}"#).is_err());
}
