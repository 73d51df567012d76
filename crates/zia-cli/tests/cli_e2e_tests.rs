//! CLI end-to-end tests that invoke the compiled `zia` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use zia_test_utils::TestWorkspace;

const GATEWAY_MANIFEST: &str = r#"
[[resources]]
kind = "zpa_gateway"
state = "present"
[resources.spec]
name = "GW01"
description = "Egress anchoring"
zpa_server_group = { external_id = 123, name = "SRV01" }
zpa_app_segments = [
    { external_id = 11, name = "Intranet" },
    { external_id = 12, name = "Wiki" },
]
"#;

fn zia(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("zia").unwrap();
    cmd.current_dir(ws.root()).env_remove("ZIA_CONFIG").env_remove("ZIA_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_help_lists_commands() {
    let ws = TestWorkspace::new();
    zia(&ws)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply").and(predicate::str::contains("plan")));
}

#[test]
fn test_version_flag() {
    let ws = TestWorkspace::new();
    zia(&ws)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zia"));
}

#[test]
fn test_apply_twice_is_idempotent() {
    let ws = TestWorkspace::new();
    ws.write_manifest(GATEWAY_MANIFEST);

    let first = json_stdout(zia(&ws).args(["apply", "--json"]));
    assert_eq!(first[0]["action"], json!("create"));
    assert_eq!(first[0]["changed"], json!(true));

    let stored = ws.store_records("zpa_gateway");
    assert_eq!(stored.len(), 1);
    assert!(stored[0]["id"].is_number());
    assert!(stored[0].get("last_modified_time").is_some());

    let second = json_stdout(zia(&ws).args(["apply", "--json"]));
    assert_eq!(second[0]["action"], json!("no_op"));
    assert_eq!(second[0]["changed"], json!(false));
}

#[test]
fn test_apply_updates_drifted_description() {
    let ws = TestWorkspace::new();
    ws.write_manifest(GATEWAY_MANIFEST);
    ws.write_store(&json!({
        "zpa_gateway": [{
            "id": 42,
            "name": "GW01",
            "description": "stale",
            "type": "ZPA",
            "zpa_server_group": {"external_id": "123", "name": "SRV01"},
            "zpa_app_segments": [
                {"external_id": "12", "name": "Wiki"},
                {"external_id": "11", "name": "Intranet"}
            ]
        }]
    }));

    let report = json_stdout(zia(&ws).args(["apply", "--json"]));
    assert_eq!(report[0]["action"], json!("update"));
    assert_eq!(report[0]["diff"][0]["field"], json!("description"));

    let stored = ws.store_records("zpa_gateway");
    assert_eq!(stored[0]["id"], json!(42));
    assert_eq!(stored[0]["description"], json!("Egress anchoring"));
}

#[test]
fn test_apply_check_does_not_write() {
    let ws = TestWorkspace::new();
    ws.write_manifest(GATEWAY_MANIFEST);

    zia(&ws)
        .args(["apply", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create zpa_gateway 'GW01'"));
    assert!(!ws.store_path().exists());
}

#[test]
fn test_plan_shows_unified_diff() {
    let ws = TestWorkspace::new();
    ws.write_manifest(GATEWAY_MANIFEST);
    ws.write_store(&json!({
        "zpa_gateway": [{
            "id": 7,
            "name": "GW01",
            "type": "ZPA",
            "zpa_server_group": {"external_id": 123, "name": "SRV01"},
            "zpa_app_segments": [{"external_id": 11, "name": "Intranet"}]
        }]
    }));

    zia(&ws)
        .arg("plan")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--- current")
                .and(predicate::str::contains("+  \"description\": \"Egress anchoring\""))
                .and(predicate::str::contains("\"12\"")),
        );

    assert_eq!(ws.store_records("zpa_gateway")[0]["id"], json!(7));
}

#[test]
fn test_absent_removes_resource() {
    let ws = TestWorkspace::new();
    ws.write_manifest(
        r#"
[[resources]]
kind = "zpa_gateway"
state = "absent"
spec = { name = "GW01", zpa_server_group = { external_id = 1, name = "S" } }
"#,
    );
    ws.write_store(&json!({"zpa_gateway": [{"id": 3, "name": "GW01"}]}));

    let report = json_stdout(zia(&ws).args(["apply", "--json"]));
    assert_eq!(report[0]["action"], json!("delete"));
    assert_eq!(report[0]["data"]["id"], json!(3));
    assert!(ws.store_records("zpa_gateway").is_empty());
}

#[test]
fn test_invalid_entry_reports_failure_json() {
    let ws = TestWorkspace::new();
    ws.write_manifest(
        r#"
[[resources]]
kind = "zpa_gateway"
spec = { name = "GW01" }
"#,
    );

    let mut cmd = zia(&ws);
    cmd.args(["apply", "--json"]);
    cmd.assert().failure().code(1);

    let report = json_stdout(&mut cmd);
    assert_eq!(report[0]["failed"], json!(true));
    assert_eq!(report[0]["kind"], json!("validation"));
    assert!(report[0]["msg"].as_str().unwrap().contains("zpa_server_group"));
}

#[test]
fn test_missing_manifest_fails() {
    let ws = TestWorkspace::new();
    zia(&ws)
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("zia.toml"));

    let failure = json_stdout(zia(&ws).args(["apply", "--json"]));
    assert_eq!(failure["kind"], json!("config"));
}

#[test]
fn test_get_by_alias_name() {
    let ws = TestWorkspace::new();
    ws.write_store(&json!({
        "dlp_engine": [
            {"id": 60, "name": "", "predefined_engine_name": "PCI", "custom_dlp_engine": false},
            {"id": 61, "name": "Custom", "custom_dlp_engine": true}
        ]
    }));

    let report = json_stdout(zia(&ws).args(["get", "dlp_engine", "--name", "PCI", "--json"]));
    assert_eq!(report["changed"], json!(false));
    assert_eq!(report["data"][0]["id"], json!(60));

    zia(&ws)
        .args(["get", "dlp_engine", "--id", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dlp_engine not found: id 99"));
}

#[test]
fn test_get_unknown_kind() {
    let ws = TestWorkspace::new();
    zia(&ws)
        .args(["get", "firewall_rule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("firewall_rule"));
}

#[test]
fn test_kinds_lists_builtins() {
    let ws = TestWorkspace::new();
    let kinds = json_stdout(zia(&ws).args(["kinds", "--json"]));
    let names: Vec<&str> = kinds
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|k| k["kind"].as_str())
        .collect();
    assert!(names.contains(&"zpa_gateway"));
    assert!(names.contains(&"vpn_credential"));
}

#[rstest]
#[case::bash("bash")]
#[case::zsh("zsh")]
#[case::fish("fish")]
fn test_completions(#[case] shell: &str) {
    let ws = TestWorkspace::new();
    zia(&ws)
        .args(["completions", shell])
        .assert()
        .success()
        .stdout(predicate::str::contains("zia"));
}
