//! Built-in resource kinds - SINGLE SOURCE OF TRUTH
//!
//! Every kind the manager knows about is declared here. Listing, lookup,
//! validation and reconciliation all derive from these declarations.

use crate::field::{FieldSpec, ScalarType};
use crate::schema::ResourceSchema;

/// Number of built-in kinds.
pub const BUILTIN_COUNT: usize = 6;

/// Returns all built-in resource schemas.
pub fn builtin_schemas() -> Vec<ResourceSchema> {
    vec![
        // Managed (present/absent)
        zpa_gateway(),
        network_application_group(),
        // Read-only
        admin_role(),
        dlp_engine(),
        url_filtering_rule(),
        vpn_credential(),
    ]
}

fn external_ref_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::stable_key("external_id")
            .required()
            .describe("External identifier, managed outside of ZIA"),
        FieldSpec::string("name").required(),
    ]
}

/// ZPA gateway used for source IP anchoring.
pub fn zpa_gateway() -> ResourceSchema {
    ResourceSchema::new("zpa_gateway", "ZPA Gateway")
        .with_field(
            FieldSpec::string("name")
                .required()
                .describe("Name of the ZPA gateway"),
        )
        .with_field(FieldSpec::string("description"))
        .with_field(
            FieldSpec::string("type")
                .choices(&["ZPA", "ECZPA"])
                .default_value("ZPA")
                .describe("ZPA for Zscaler Internet Access, ECZPA for Cloud Connector"),
        )
        .with_field(
            FieldSpec::nested_one("zpa_server_group", "external_id", external_ref_fields())
                .required()
                .describe("Server group associated with the gateway"),
        )
        .with_field(
            FieldSpec::nested_many("zpa_app_segments", "external_id", external_ref_fields())
                .describe("Application segments anchored through the gateway"),
        )
}

/// Cloud firewall network application group.
pub fn network_application_group() -> ResourceSchema {
    ResourceSchema::new("network_application_group", "Network Application Group")
        .with_field(FieldSpec::string("name").required())
        .with_field(FieldSpec::string("description"))
        .with_field(FieldSpec::set_of("network_applications", ScalarType::String))
}

pub fn admin_role() -> ResourceSchema {
    ResourceSchema::new("admin_role", "Admin Role")
        .read_only()
        .with_field(FieldSpec::string("name"))
        .with_field(FieldSpec::integer("rank"))
        .with_field(FieldSpec::string("role_type"))
        .with_field(FieldSpec::string("policy_access"))
}

/// DLP engines match by their own name or by the predefined engine name.
pub fn dlp_engine() -> ResourceSchema {
    ResourceSchema::new("dlp_engine", "DLP Engine")
        .read_only()
        .with_name_alias("predefined_engine_name")
        .with_field(FieldSpec::string("name"))
        .with_field(FieldSpec::string("description"))
        .with_field(FieldSpec::string("engine_expression"))
        .with_field(FieldSpec::boolean("custom_dlp_engine"))
        .with_field(FieldSpec::string("predefined_engine_name"))
}

pub fn url_filtering_rule() -> ResourceSchema {
    ResourceSchema::new("url_filtering_rule", "URL Filtering Rule")
        .read_only()
        .with_field(FieldSpec::string("name"))
        .with_field(FieldSpec::integer("order"))
        .with_field(FieldSpec::string("state"))
        .with_field(FieldSpec::string("action"))
        .with_field(FieldSpec::set_of("protocols", ScalarType::String))
}

/// VPN credentials have no name; they are addressed by FQDN.
pub fn vpn_credential() -> ResourceSchema {
    ResourceSchema::new("vpn_credential", "VPN Credential")
        .read_only()
        .with_name_field("fqdn")
        .with_field(FieldSpec::string("fqdn"))
        .with_field(FieldSpec::string("type"))
        .with_field(FieldSpec::string("comments"))
}
