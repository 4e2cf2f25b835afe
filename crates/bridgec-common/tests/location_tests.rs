//! Location rendering and deserialization.

use bridgec_common::Location;

#[test]
fn test_location_display_forms() {
    assert_eq!(Location::new("Api.kt", 4, 2).to_string(), "Api.kt:4:2");
    assert_eq!(Location::new("Api.kt", 0, 0).to_string(), "Api.kt");
    assert_eq!(Location::unknown().to_string(), "<unknown location>");
}

#[test]
fn test_location_deserializes_with_defaults() {
    let location: Location = serde_json::from_str(r#"{ "file": "Model.kt" }"#).unwrap();
    assert_eq!(location, Location::new("Model.kt", 0, 0));
    assert!(location.is_known());

    let empty: Location = serde_json::from_str("{}").unwrap();
    assert!(!empty.is_known());
}
