//! End-to-end tests: export directory on disk → loader → every generator.
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

use unimap_core::report::{FirewallMode, logical, physical, ports, switches};
use unimap_core::{ReportKind, combined_document, generate_all, load_dir};

// ── Helpers ─────────────────────────────────────────────────────────

fn write_export(dir: &Path, file: &str, records: Value) {
    let body = json!({ "meta": { "rc": "ok" }, "data": records });
    fs::write(dir.join(file), serde_json::to_vec_pretty(&body).unwrap()).unwrap();
}

/// The two-network, gateway-plus-switch site with no optional files.
fn small_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "networks.json",
        json!([
            { "_id": "n1", "vlan": 1, "name": "Main", "ip_subnet": "10.0.0.0/24" },
            { "_id": "n2", "vlan": 20, "name": "Secure", "ip_subnet": "10.0.20.0/24" }
        ]),
    );
    write_export(
        dir.path(),
        "devices.json",
        json!([
            { "_id": "g1", "type": "udm", "name": "UDM SE" },
            { "_id": "s1", "type": "usw", "name": "Sw1", "port_table": [ { "port_idx": 1, "up": true } ] }
        ]),
    );
    dir
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn small_site_physical_and_logical() {
    let dir = small_site();
    let inv = load_dir(dir.path()).unwrap().inventory;

    let physical = physical::generate(&inv);
    assert!(physical.contains("    Gateway[\"UDM SE<br/>Gateway\"]\n"));
    assert!(physical.contains("    Internet --> Gateway\n"));
    assert!(physical.contains("    USW_s1[\"Sw1<br/>Switch (1 ports)\"]\n"));
    assert!(physical.contains("    Gateway ---|\"Port 1\"| USW_s1\n"));

    let logical = logical::generate(&inv);
    assert!(logical.contains("    VLAN1[\"Main<br/>VLAN 1<br/>10.0.0.0/24\"]\n"));
    assert!(logical.contains("    Router --> VLAN1\n"));
    assert!(logical.contains("    Router --> VLAN20\n"));
    for service in ["SambaAD", "Proxmox", "DNS"] {
        assert!(logical.contains(&format!("    VLAN1 --> SVC_{service}\n")));
    }
    for service in ["SMBServer", "UserDevices"] {
        assert!(logical.contains(&format!("    VLAN20 --> SVC_{service}\n")));
    }
    assert!(!logical.contains("Keycloak"));
}

#[test]
fn missing_optional_files_degrade_to_defaults() {
    let dir = small_site();
    let outcome = load_dir(dir.path()).unwrap();
    assert_eq!(outcome.skipped.len(), 3);

    let inv = &outcome.inventory;
    assert_eq!(FirewallMode::for_inventory(inv), FirewallMode::IsolationMatrix);

    let reports = generate_all(inv);
    let firewall = &reports
        .iter()
        .find(|r| r.kind == ReportKind::FirewallMatrix)
        .unwrap()
        .body;
    assert!(firewall.starts_with("## Firewall Zone Configuration\n"));

    let ports = ports::generate(inv);
    let row = ports.lines().find(|l| l.starts_with("| 1 ")).unwrap();
    let cells: Vec<&str> = row.trim_matches('|').split('|').map(str::trim).collect();
    assert_eq!(cells[5], "Default");
    assert_eq!(cells[6], "Default");

    let switches = switches::generate(inv);
    assert!(switches.contains("🟢 Port 1<br/>Default<br/>Default"));
    assert!(!switches.contains("_EXT"));
}

#[test]
fn summary_line_counts_poe_wattage() {
    let dir = small_site();
    write_export(
        dir.path(),
        "devices.json",
        json!([{ "_id": "s1", "type": "usw", "name": "Sw1", "port_table": [
            { "port_idx": 1, "up": true },
            { "port_idx": 2, "up": true, "port_poe": true, "poe_power": "4.5" },
            { "port_idx": 3, "up": true },
            { "port_idx": 4, "up": false }
        ] }]),
    );
    let inv = load_dir(dir.path()).unwrap().inventory;
    assert!(ports::generate(&inv).contains("**Summary:** 3/4 ports active, 1 PoE ports (4.5W total)"));
}

#[test]
fn table_rows_match_indexed_ports() {
    let dir = small_site();
    write_export(
        dir.path(),
        "devices.json",
        json!([
            { "_id": "g1", "type": "ugw", "port_table": [ { "port_idx": 2 }, { "port_idx": 1 } ] },
            { "_id": "s1", "type": "switch", "port_table": [ { "port_idx": 3 }, {}, { "port_idx": 0 } ] }
        ]),
    );
    let inv = load_dir(dir.path()).unwrap().inventory;
    let out = ports::generate(&inv);

    let rows_per_section: Vec<usize> = out
        .split("\n---\n")
        .filter(|s| s.contains("| Port"))
        .map(|s| s.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| Port")).count())
        .collect();
    assert_eq!(rows_per_section, [2, 1]);
}

#[test]
fn explicit_rules_switch_firewall_mode() {
    let dir = small_site();
    write_export(
        dir.path(),
        "firewall-rules.json",
        json!([{ "name": "Secure to Main", "action": "accept", "protocol": "tcp", "dst_port": "445",
                 "src_networkconf_id": "n2", "dst_networkconf_id": "n1" }]),
    );
    let outcome = load_dir(dir.path()).unwrap();
    assert_eq!(outcome.skipped.len(), 2);
    let inv = &outcome.inventory;
    assert_eq!(FirewallMode::for_inventory(inv), FirewallMode::RuleGraph);

    let body = ReportKind::FirewallMatrix.generate(inv);
    assert!(body.contains("    SRC_n2 -->|\"tcp:445\"| DST_n1\n"));
    assert!(logical::generate(inv).contains("FW0[\"✅ Secure to Main\"]"));
}

#[test]
fn output_is_idempotent() {
    let dir = small_site();
    let first = combined_document(&generate_all(&load_dir(dir.path()).unwrap().inventory));
    let second = combined_document(&generate_all(&load_dir(dir.path()).unwrap().inventory));
    assert_eq!(first, second);
    assert!(first.starts_with("# Network Documentation\n"));
    assert!(first.ends_with("*Generated automatically from UniFi configuration*"));
    assert_eq!(first.matches("```mermaid").count(), 4);
}
