//! Comparator behavior on realistic gateway records

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use zia_content::{ChangeKind, DesiredResource, Error, Record, compare, create_payload, normalize};
use zia_schema::builtins::zpa_gateway;

fn canonical(value: Value) -> zia_content::CanonicalResource {
    normalize(&zpa_gateway(), &Record::from_value(value).unwrap()).unwrap()
}

#[rstest]
#[case::server_computed_field(
    json!({"id": 1, "name": "GW01", "type": "ZPA", "last_modified_time": 1700000000}),
    json!({"name": "GW01", "type": "ZPA"})
)]
#[case::null_equals_absent(
    json!({"name": "GW01", "description": null}),
    json!({"name": "GW01"})
)]
#[case::empty_segments_equal_absent(
    json!({"name": "GW01", "zpa_app_segments": []}),
    json!({"name": "GW01"})
)]
#[case::nested_id_ignored(
    json!({"name": "GW01", "zpa_server_group": {"id": 9, "external_id": 5, "name": "S"}}),
    json!({"name": "GW01", "zpa_server_group": {"external_id": "5", "name": "S"}})
)]
fn test_semantically_identical(#[case] current: Value, #[case] desired: Value) {
    let diff = compare(&canonical(current), &canonical(desired));
    assert!(diff.is_empty(), "unexpected diff: {diff:?}");
}

#[rstest]
#[case::description_set(
    json!({"name": "GW01"}),
    json!({"name": "GW01", "description": "x"}),
    "description",
    ChangeKind::Added
)]
#[case::description_unset(
    json!({"name": "GW01", "description": "x"}),
    json!({"name": "GW01"}),
    "description",
    ChangeKind::Removed
)]
#[case::server_group_swapped(
    json!({"name": "GW01", "zpa_server_group": {"external_id": 1, "name": "S"}}),
    json!({"name": "GW01", "zpa_server_group": {"external_id": 2, "name": "S"}}),
    "zpa_server_group",
    ChangeKind::Modified
)]
#[case::segment_renamed(
    json!({"name": "GW01", "zpa_app_segments": [{"external_id": 1, "name": "A"}]}),
    json!({"name": "GW01", "zpa_app_segments": [{"external_id": 1, "name": "B"}]}),
    "zpa_app_segments",
    ChangeKind::Modified
)]
fn test_single_field_difference(
    #[case] current: Value,
    #[case] desired: Value,
    #[case] field: &str,
    #[case] kind: ChangeKind,
) {
    let diff = compare(&canonical(current), &canonical(desired));
    assert_eq!(diff.fields(), vec![field]);
    assert_eq!(diff.get(field).map(|c| c.kind), Some(kind));
}

#[test]
fn test_create_payload_omits_unset_fields() {
    let schema = zpa_gateway();
    let desired = DesiredResource::from_input(
        &schema,
        &json!({
            "name": "GW01",
            "description": null,
            "zpa_server_group": {"external_id": "216196257331370454", "name": "SRV01"}
        }),
    )
    .unwrap();

    let payload = create_payload(&schema, &desired);
    assert!(!payload.as_map().contains_key("description"));
    assert!(!payload.as_map().contains_key("zpa_app_segments"));
    assert!(!payload.as_map().contains_key("id"));
    assert_eq!(payload.get("type"), Some(&json!("ZPA")));
}

#[test]
fn test_invalid_input_surfaces_schema_error() {
    let err = DesiredResource::from_input(&zpa_gateway(), &json!({"name": "GW01"})).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn test_remote_with_non_object_segment_is_malformed() {
    let err = normalize(
        &zpa_gateway(),
        &Record::from_value(json!({"name": "GW01", "zpa_app_segments": ["oops"]})).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedResource { .. }));
}
