//! ZPA gateway fixtures.

use serde_json::{Value, json};
use zia_content::{DesiredResource, Record};
use zia_schema::ResourceSchema;

pub fn zpa_gateway_schema() -> ResourceSchema {
    zia_schema::builtins::zpa_gateway()
}

/// Caller input for a gateway anchored on one server group and the given
/// app segments, as `(external_id, name)` pairs.
pub fn gateway_input(name: &str, server_group: (i64, &str), segments: &[(i64, &str)]) -> Value {
    let mut input = json!({
        "name": name,
        "type": "ZPA",
        "zpa_server_group": {"external_id": server_group.0, "name": server_group.1},
    });
    if !segments.is_empty() {
        input["zpa_app_segments"] = segments
            .iter()
            .map(|(id, name)| json!({"external_id": id, "name": name}))
            .collect();
    }
    input
}

/// Validated desired gateway built from [`gateway_input`].
pub fn desired_gateway(
    name: &str,
    server_group: (i64, &str),
    segments: &[(i64, &str)],
) -> DesiredResource {
    let input = gateway_input(name, server_group, segments);
    DesiredResource::from_input(&zpa_gateway_schema(), &input)
        .unwrap_or_else(|e| panic!("invalid gateway fixture: {e}"))
}

/// A gateway as the remote API returns it: numeric id, text stable keys,
/// nested ids and a server-computed timestamp.
pub fn remote_gateway(
    id: i64,
    name: &str,
    server_group: (i64, &str),
    segments: &[(i64, &str)],
) -> Record {
    let mut value = json!({
        "id": id,
        "name": name,
        "type": "ZPA",
        "last_modified_time": 1_700_000_000,
        "zpa_server_group": {
            "id": 900 + id,
            "external_id": server_group.0.to_string(),
            "name": server_group.1,
        },
    });
    if !segments.is_empty() {
        value["zpa_app_segments"] = segments
            .iter()
            .rev()
            .map(|(key, name)| json!({"external_id": key.to_string(), "name": name}))
            .collect();
    }
    Record::from_value(value).unwrap_or_else(|e| panic!("invalid remote fixture: {e}"))
}
