// ── Export-to-domain type conversions ──
//
// Bridges raw `crate::export` records into canonical `crate::model`
// types. Each `From` impl normalizes field names, parses loosely typed
// values into strong types, and fills documented defaults for missing
// optional data.

use std::collections::HashMap;

use serde_json::Value;

use crate::export::{
    RawDevice, RawFirewallGroup, RawFirewallRule, RawNetwork, RawPort, RawPortOverride,
    RawPortProfile, RawUplink,
};
use crate::model::{
    Device, DeviceType, EntityId, FirewallAction, FirewallGroup, FirewallRule, MacAddress,
    Network, Port, PortOverride, PortProfile, Uplink, UplinkMedium,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a number-or-numeric-string value into `f64`, dropping anything else.
pub(crate) fn lenient_f64(raw: Option<&Value>) -> Option<f64> {
    let value = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Parse a non-negative integer from a number or numeric string.
/// Fractional, negative and non-numeric values are dropped.
fn lenient_u64(raw: Option<&Value>) -> Option<u64> {
    match raw? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(|f| f.to_string().parse().ok())),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_u32(raw: Option<&Value>) -> Option<u32> {
    lenient_u64(raw).and_then(|v| u32::try_from(v).ok())
}

/// Parse a 1-based index; 0 is as good as missing.
fn lenient_index(raw: Option<&Value>) -> Option<u32> {
    lenient_u32(raw).filter(|i| *i != 0)
}

/// Parse a VLAN tag; 0 and out-of-range values count as untagged.
fn lenient_vlan(raw: Option<&Value>) -> Option<u16> {
    lenient_u64(raw)
        .and_then(|v| u16::try_from(v).ok())
        .filter(|v| *v != 0)
}

/// Render a scalar value as text; arrays and objects are dropped.
fn lenient_text(raw: Option<&Value>) -> Option<String> {
    let text = match raw? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    text.filter(|s| !s.is_empty())
}

fn non_empty_id(raw: Option<String>) -> Option<EntityId> {
    raw.filter(|s| !s.is_empty()).map(EntityId::from)
}

// ── Network ────────────────────────────────────────────────────────

impl From<RawNetwork> for Network {
    fn from(n: RawNetwork) -> Self {
        Network {
            id: EntityId::from(n.id),
            name: n.name.unwrap_or_else(|| "Unknown".into()),
            vlan_id: lenient_vlan(n.vlan.as_ref()),
            subnet: n.ip_subnet.filter(|s| !s.is_empty()),
            firewall_zone_id: non_empty_id(n.firewall_zone_id),
            internet_access_enabled: n.internet_access_enabled.unwrap_or(true),
        }
    }
}

impl From<RawPortProfile> for PortProfile {
    fn from(p: RawPortProfile) -> Self {
        PortProfile {
            id: EntityId::from(p.id),
            name: p.name.filter(|s| !s.is_empty()),
            native_network_id: non_empty_id(p.native_networkconf_id),
        }
    }
}

// ── Device ─────────────────────────────────────────────────────────

impl From<RawPort> for Port {
    fn from(p: RawPort) -> Self {
        Port {
            index: lenient_index(p.port_idx.as_ref()),
            up: p.up.unwrap_or(false),
            speed_mbps: lenient_u32(p.speed.as_ref()).unwrap_or(0),
            poe_capable: p.port_poe.unwrap_or(false),
            poe_power_w: lenient_f64(p.poe_power.as_ref()),
            full_duplex: p.full_duplex.unwrap_or(false),
            tx_bytes: lenient_u64(p.tx_bytes.as_ref()).unwrap_or(0),
            rx_bytes: lenient_u64(p.rx_bytes.as_ref()).unwrap_or(0),
        }
    }
}

impl From<RawUplink> for Uplink {
    fn from(u: RawUplink) -> Self {
        let medium = match u.uplink_type.as_deref() {
            Some("wireless") => UplinkMedium::Wireless,
            _ => UplinkMedium::Wired,
        };
        Uplink {
            medium,
            peer_mac: MacAddress::parse_opt(u.uplink_mac.as_deref()),
            remote_port: lenient_index(u.uplink_remote_port.as_ref()),
        }
    }
}

/// Index overrides by port; entries without an index are dropped and a
/// repeated index keeps the last entry.
fn index_overrides(raw: Vec<RawPortOverride>) -> HashMap<u32, PortOverride> {
    raw.into_iter()
        .filter_map(|o| {
            let index = lenient_index(o.port_idx.as_ref())?;
            Some((
                index,
                PortOverride {
                    index,
                    name: o.name.filter(|s| !s.is_empty()),
                    profile_id: non_empty_id(o.portconf_id),
                    poe_mode: o.poe_mode.filter(|s| !s.is_empty()),
                },
            ))
        })
        .collect()
}

impl From<RawDevice> for Device {
    fn from(d: RawDevice) -> Self {
        let type_tag = d.device_type.unwrap_or_default();
        Device {
            id: EntityId::from(d.id),
            mac: MacAddress::parse_opt(d.mac.as_deref()),
            name: d.name.filter(|s| !s.is_empty()),
            model: d.model.filter(|s| !s.is_empty()),
            device_type: DeviceType::from_tag(&type_tag),
            type_tag,
            ports: d.port_table.into_iter().map(Port::from).collect(),
            port_overrides: index_overrides(d.port_overrides),
            uplink: d.uplink.map(Uplink::from),
        }
    }
}

// ── Firewall ───────────────────────────────────────────────────────

impl From<RawFirewallRule> for FirewallRule {
    fn from(r: RawFirewallRule) -> Self {
        FirewallRule {
            id: non_empty_id(r.id),
            name: r.name.filter(|s| !s.is_empty()),
            enabled: r.enabled.unwrap_or(true),
            action: FirewallAction::from_raw(r.action.as_deref()),
            protocol: r
                .protocol
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "all".into()),
            dst_port: lenient_text(r.dst_port.as_ref()),
            src_network_id: non_empty_id(r.src_networkconf_id),
            dst_network_id: non_empty_id(r.dst_networkconf_id),
        }
    }
}

impl From<RawFirewallGroup> for FirewallGroup {
    fn from(g: RawFirewallGroup) -> Self {
        FirewallGroup {
            id: EntityId::from(g.id),
            name: g.name.filter(|s| !s.is_empty()),
        }
    }
}
