//! Validation of caller input against the built-in schemas

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use zia_schema::{Error, SchemaRegistry};

fn validate(kind: &str, input: Value) -> zia_schema::Result<serde_json::Map<String, Value>> {
    let registry = SchemaRegistry::with_builtins();
    registry.require(kind)?.validate(&input)
}

#[test]
fn test_gateway_minimal_input_gets_default_type() {
    let cleaned = validate(
        "zpa_gateway",
        json!({
            "name": "GW01",
            "zpa_server_group": {"external_id": "123", "name": "SRV01"}
        }),
    )
    .unwrap();

    assert_eq!(cleaned.get("type"), Some(&json!("ZPA")));
    assert!(!cleaned.contains_key("description"));
    assert!(!cleaned.contains_key("id"));
}

#[test]
fn test_gateway_numeric_external_id_is_kept_as_given() {
    let cleaned = validate(
        "zpa_gateway",
        json!({
            "name": "GW01",
            "zpa_server_group": {"external_id": 216196257331370454_u64, "name": "SRV01"}
        }),
    )
    .unwrap();

    assert_eq!(
        cleaned["zpa_server_group"]["external_id"],
        json!(216196257331370454_u64)
    );
}

#[rstest]
#[case::missing_name(json!({"zpa_server_group": {"external_id": "1", "name": "S"}}), "name")]
#[case::missing_server_group(json!({"name": "GW01"}), "zpa_server_group")]
#[case::missing_nested_key(
    json!({"name": "GW01", "zpa_server_group": {"name": "S"}}),
    "zpa_server_group.external_id"
)]
#[case::missing_segment_key(
    json!({
        "name": "GW01",
        "zpa_server_group": {"external_id": "1", "name": "S"},
        "zpa_app_segments": [{"name": "A"}]
    }),
    "zpa_app_segments[0].external_id"
)]
fn test_gateway_missing_required(#[case] input: Value, #[case] expected_path: &str) {
    let err = validate("zpa_gateway", input).unwrap_err();
    assert!(matches!(err, Error::MissingField { .. }), "got {err:?}");
    assert_eq!(err.path(), Some(expected_path));
}

#[test]
fn test_gateway_rejects_unknown_type_choice() {
    let err = validate(
        "zpa_gateway",
        json!({
            "name": "GW01",
            "type": "GRE",
            "zpa_server_group": {"external_id": "1", "name": "S"}
        }),
    )
    .unwrap_err();

    match err {
        Error::InvalidChoice { value, choices, .. } => {
            assert_eq!(value, "GRE");
            assert_eq!(choices, vec!["ZPA".to_string(), "ECZPA".to_string()]);
        }
        other => panic!("expected InvalidChoice, got {other:?}"),
    }
}

#[rstest]
#[case::top_level(
    json!({
        "name": "GW01",
        "state": "present",
        "zpa_server_group": {"external_id": "1", "name": "S"}
    }),
    "state"
)]
#[case::nested(
    json!({"name": "GW01", "zpa_server_group": {"external_id": "1", "name": "S", "id": 4}}),
    "zpa_server_group.id"
)]
fn test_gateway_rejects_unknown_fields(#[case] input: Value, #[case] expected_path: &str) {
    let err = validate("zpa_gateway", input).unwrap_err();
    assert!(matches!(err, Error::UnknownField { .. }), "got {err:?}");
    assert_eq!(err.path(), Some(expected_path));
}

#[test]
fn test_gateway_rejects_object_as_stable_key() {
    let err = validate(
        "zpa_gateway",
        json!({
            "name": "GW01",
            "zpa_server_group": {"external_id": {"value": 1}, "name": "S"}
        }),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidType { .. }));
}

#[test]
fn test_application_group_set_items_coerced() {
    let cleaned = validate(
        "network_application_group",
        json!({"name": "Office", "network_applications": ["SHAREPOINT", 365]}),
    )
    .unwrap();
    assert_eq!(
        cleaned["network_applications"],
        json!(["SHAREPOINT", "365"])
    );
}

#[test]
fn test_unknown_kind() {
    let err = validate("firewall_rule", json!({})).unwrap_err();
    assert!(matches!(err, Error::UnknownKind { .. }));
}

#[test]
fn test_error_messages_name_the_field() {
    let err = validate("zpa_gateway", json!({"name": "GW01"})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required field 'zpa_server_group' for zpa_gateway"
    );
}
