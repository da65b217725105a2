// ── Device domain types ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, MacAddress};

/// Canonical device type -- normalized from the export's `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum DeviceType {
    #[strum(serialize = "Gateway")]
    Gateway,
    #[strum(serialize = "Switch")]
    Switch,
    #[strum(serialize = "Access Point")]
    AccessPoint,
    #[strum(serialize = "Other")]
    Other,
}

impl DeviceType {
    /// Map a raw `type` tag to its variant.
    ///
    /// The vocabulary is closed: anything outside the known gateway,
    /// switch and access-point tags is `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "udm" | "usg" | "ugw" => Self::Gateway,
            "usw" | "switch" => Self::Switch,
            "uap" | "uap-ac" | "uap-hd" | "uap-pro" => Self::AccessPoint,
            _ => Self::Other,
        }
    }

    /// Carries a port table worth documenting.
    pub fn has_ports(self) -> bool {
        matches!(self, Self::Gateway | Self::Switch)
    }

    /// Prefix for diagram node ids.
    pub fn node_prefix(self) -> &'static str {
        match self {
            Self::Gateway => "GW",
            Self::Switch => "USW",
            Self::AccessPoint => "UAP",
            Self::Other => "DEV",
        }
    }
}

/// How a device reaches its upstream peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UplinkMedium {
    Wired,
    Wireless,
}

/// Uplink descriptor reported by the device itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uplink {
    pub medium: UplinkMedium,
    pub peer_mac: Option<MacAddress>,
    /// Port index on the peer the uplink lands on.
    pub remote_port: Option<u32>,
}

/// Port on a switch or gateway (one `port_table` entry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// 1-based index; `None` when the export omitted it.
    pub index: Option<u32>,
    pub up: bool,
    /// Link speed in Mbps, 0 = unknown.
    pub speed_mbps: u32,
    pub poe_capable: bool,
    /// Measured PoE draw in watts, absent when missing or unparsable.
    pub poe_power_w: Option<f64>,
    pub full_duplex: bool,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl Port {
    /// Traffic counters are the only evidence of an unnamed peer.
    pub fn has_traffic(&self) -> bool {
        self.tx_bytes > 0 || self.rx_bytes > 0
    }
}

/// Per-port customization from `port_overrides`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortOverride {
    pub index: u32,
    pub name: Option<String>,
    pub profile_id: Option<EntityId>,
    pub poe_mode: Option<String>,
}

/// The canonical Device type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: EntityId,
    pub mac: Option<MacAddress>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub device_type: DeviceType,
    /// Raw `type` tag, kept for display of unknown kinds.
    pub type_tag: String,
    pub ports: Vec<Port>,
    pub port_overrides: HashMap<u32, PortOverride>,
    pub uplink: Option<Uplink>,
}

impl Device {
    /// Display name: name, then model, then `fallback`.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name
            .as_deref()
            .or(self.model.as_deref())
            .unwrap_or(fallback)
    }

    /// Deterministic diagram node id: kind prefix + first 8 id characters.
    pub fn node_id(&self) -> String {
        crate::render::mermaid::sanitize_id(&format!(
            "{}_{}",
            self.device_type.node_prefix(),
            self.id.prefix(8)
        ))
    }

    pub fn port_override(&self, index: u32) -> Option<&PortOverride> {
        self.port_overrides.get(&index)
    }

    pub fn is_gateway(&self) -> bool {
        self.device_type == DeviceType::Gateway
    }

    pub fn is_switch(&self) -> bool {
        self.device_type == DeviceType::Switch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_map_to_variants() {
        assert_eq!(DeviceType::from_tag("udm"), DeviceType::Gateway);
        assert_eq!(DeviceType::from_tag("ugw"), DeviceType::Gateway);
        assert_eq!(DeviceType::from_tag("switch"), DeviceType::Switch);
        assert_eq!(DeviceType::from_tag("uap-hd"), DeviceType::AccessPoint);
        assert_eq!(DeviceType::from_tag("uxg-lite"), DeviceType::Other);
        assert_eq!(DeviceType::from_tag("UAP"), DeviceType::Other);
    }

    #[test]
    fn only_gateways_and_switches_have_ports() {
        assert!(DeviceType::Gateway.has_ports());
        assert!(DeviceType::Switch.has_ports());
        assert!(!DeviceType::AccessPoint.has_ports());
        assert!(!DeviceType::Other.has_ports());
    }

    #[test]
    fn display_labels() {
        assert_eq!(DeviceType::AccessPoint.to_string(), "Access Point");
        assert_eq!(DeviceType::Switch.to_string(), "Switch");
    }
}
