//! Request payload construction for create and update calls

use serde_json::Value;
use zia_schema::ResourceSchema;

use crate::record::{DesiredResource, Record, RemoteResource};

/// Remove `null` values and empty lists or objects, recursively.
///
/// Unspecified fields are never sent as explicit nulls.
pub fn prune_unset(record: &Record) -> Record {
    record
        .iter()
        .filter_map(|(field, value)| prune_value(value).map(|v| (field.clone(), v)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn prune_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => {
            let items: Vec<Value> = items.iter().filter_map(prune_value).collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        Value::Object(map) => {
            let map: serde_json::Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| prune_value(v).map(|v| (k.clone(), v)))
                .collect();
            (!map.is_empty()).then_some(Value::Object(map))
        }
        other => Some(other.clone()),
    }
}

/// Payload for creating `desired`: declared fields only, no id, nothing unset.
pub fn create_payload(schema: &ResourceSchema, desired: &DesiredResource) -> Record {
    prune_unset(&declared_fields(schema, desired.record()))
}

/// Payload for replacing `existing` with `desired`.
///
/// Every declared field takes the desired value, so a field left unset on
/// the desired side is cleared. The identifier always comes from the
/// existing resource. The whole object is resent.
pub fn merge_for_update(
    schema: &ResourceSchema,
    existing: &RemoteResource,
    desired: &DesiredResource,
) -> Record {
    let mut merged = declared_fields(schema, desired.record());
    merged.insert(schema.id_field.clone(), existing.id().to_value());
    prune_unset(&merged)
}

fn declared_fields(schema: &ResourceSchema, record: &Record) -> Record {
    let mut out = Record::new();
    for field in &schema.fields {
        if field.name == schema.id_field {
            continue;
        }
        if let Some(value) = record.get(&field.name) {
            out.insert(field.name.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use zia_schema::builtins::zpa_gateway;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_prune_unset_is_recursive() {
        let pruned = prune_unset(&record(json!({
            "a": null,
            "b": [],
            "c": {"d": null, "e": []},
            "f": [null, {"g": 1}],
            "h": ""
        })));
        assert_eq!(pruned.into_value(), json!({"f": [{"g": 1}], "h": ""}));
    }

    #[test]
    fn test_create_payload_omits_id_and_unset() {
        let schema = zpa_gateway();
        let desired = DesiredResource::new(
            &schema,
            record(json!({
                "id": 5,
                "name": "GW01",
                "description": null,
                "type": "ZPA",
                "zpa_server_group": {"external_id": "1", "name": "S"}
            })),
        )
        .unwrap();

        assert_eq!(
            create_payload(&schema, &desired).into_value(),
            json!({
                "name": "GW01",
                "type": "ZPA",
                "zpa_server_group": {"external_id": "1", "name": "S"}
            })
        );
    }

    #[test]
    fn test_merge_for_update_keeps_existing_id_and_clears_unset() {
        let schema = zpa_gateway();
        let existing = RemoteResource::from_record(
            &schema,
            record(json!({
                "id": 42,
                "name": "GW01",
                "description": "old",
                "last_modified_time": 1700000000,
                "zpa_server_group": {"external_id": "1", "name": "S"}
            })),
        )
        .unwrap();
        let desired = DesiredResource::new(
            &schema,
            record(json!({
                "id": 7,
                "name": "GW01",
                "zpa_server_group": {"external_id": "2", "name": "T"}
            })),
        )
        .unwrap();

        assert_eq!(
            merge_for_update(&schema, &existing, &desired).into_value(),
            json!({
                "name": "GW01",
                "zpa_server_group": {"external_id": "2", "name": "T"},
                "id": 42
            })
        );
    }
}
