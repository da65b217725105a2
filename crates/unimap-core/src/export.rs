// Controller export record types
//
// Raw shapes of the JSON documents produced by exporting a UniFi site's
// `rest/networkconf`, `stat/device`, `rest/portconf`, `rest/firewallrule`
// and `rest/firewallgroup` collections. Fields use `#[serde(default)]`
// liberally because exports differ across firmware versions. Values the
// controller emits as either numbers or strings are kept as raw JSON and
// normalized in `crate::convert`. Unmodeled fields are ignored.

use serde::Deserialize;
use serde_json::Value;

// ── Envelope ─────────────────────────────────────────────────────────

/// Standard export envelope:
/// ```json
/// { "meta": { "rc": "ok" }, "data": [...] }
/// ```
/// A missing `data` field is an empty collection.
#[derive(Debug, Deserialize)]
pub struct ExportEnvelope<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub rc: Option<String>,
}

// ── Network ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawNetwork {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Number on most firmware, numeric string on some.
    #[serde(default)]
    pub vlan: Option<Value>,
    #[serde(default)]
    pub ip_subnet: Option<String>,
    #[serde(default)]
    pub firewall_zone_id: Option<String>,
    #[serde(default)]
    pub internet_access_enabled: Option<bool>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device object from `stat/device`.
///
/// Devices carry 100+ fields; only the topology-relevant ones are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDevice {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub port_table: Vec<RawPort>,
    #[serde(default)]
    pub port_overrides: Vec<RawPortOverride>,
    #[serde(default)]
    pub uplink: Option<RawUplink>,
}

/// One `port_table` entry.
///
/// Counters and indices are numbers on current firmware but strings or
/// floats on some older exports, so they stay raw until conversion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPort {
    #[serde(default)]
    pub port_idx: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub up: Option<bool>,
    #[serde(default)]
    pub speed: Option<Value>,
    #[serde(default)]
    pub port_poe: Option<bool>,
    /// Watts; usually a decimal string such as `"4.50"`.
    #[serde(default)]
    pub poe_power: Option<Value>,
    #[serde(default)]
    pub full_duplex: Option<bool>,
    #[serde(default)]
    pub tx_bytes: Option<Value>,
    #[serde(default)]
    pub rx_bytes: Option<Value>,
}

/// One `port_overrides` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPortOverride {
    #[serde(default)]
    pub port_idx: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub portconf_id: Option<String>,
    #[serde(default)]
    pub poe_mode: Option<String>,
}

/// Device-reported uplink.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUplink {
    /// `"wire"`, `"wireless"`, or absent.
    #[serde(default, rename = "type")]
    pub uplink_type: Option<String>,
    #[serde(default)]
    pub uplink_mac: Option<String>,
    #[serde(default)]
    pub uplink_remote_port: Option<Value>,
}

// ── Port profile ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawPortProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub native_networkconf_id: Option<String>,
}

// ── Firewall ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawFirewallRule {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    /// Single port, list, or range; string or number.
    #[serde(default)]
    pub dst_port: Option<Value>,
    #[serde(default)]
    pub src_networkconf_id: Option<String>,
    #[serde(default)]
    pub dst_networkconf_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFirewallGroup {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_data_is_empty() {
        let env: ExportEnvelope<RawNetwork> =
            serde_json::from_value(json!({ "meta": { "rc": "ok" } })).unwrap();
        assert!(env.data.is_empty());
    }

    #[test]
    fn device_ignores_unmodeled_fields() {
        let dev: RawDevice = serde_json::from_value(json!({
            "_id": "abc123",
            "mac": "aa:bb:cc:dd:ee:ff",
            "type": "usw",
            "version": "7.1.26"
        }))
        .unwrap();
        assert_eq!(dev.device_type.as_deref(), Some("usw"));
        assert!(dev.port_table.is_empty());
    }

    #[test]
    fn port_counters_accept_any_json_scalar() {
        let port: RawPort = serde_json::from_value(json!({
            "port_idx": "3",
            "speed": 1000.0,
            "tx_bytes": "12"
        }))
        .unwrap();
        assert_eq!(port.port_idx, Some(json!("3")));
        assert_eq!(port.speed, Some(json!(1000.0)));
    }

    #[test]
    fn network_requires_id() {
        let res: Result<RawNetwork, _> = serde_json::from_value(json!({ "name": "LAN" }));
        assert!(res.is_err());
    }
}
