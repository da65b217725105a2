// ── Network domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use crate::render::mermaid::sanitize_id;

/// The canonical Network type (one VLAN / subnet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub id: EntityId,
    pub name: String,

    /// VLAN tag; `None` means untagged (default LAN or WAN uplinks).
    pub vlan_id: Option<u16>,

    /// Free-form subnet descriptor, e.g. `10.0.20.1/24`.
    pub subnet: Option<String>,

    pub firewall_zone_id: Option<EntityId>,
    pub internet_access_enabled: bool,
}

impl Network {
    /// `VLAN <n>` for tagged networks, `Default` otherwise.
    pub fn vlan_label(&self) -> String {
        vlan_label(self.vlan_id)
    }

    pub fn subnet_or_na(&self) -> &str {
        self.subnet.as_deref().unwrap_or("N/A")
    }

    /// Diagram node id: `VLAN<n>` when tagged, `NET_<id>` otherwise.
    pub fn node_id(&self) -> String {
        match self.vlan_id {
            Some(vlan) => format!("VLAN{vlan}"),
            None => sanitize_id(&format!("NET_{}", self.id)),
        }
    }
}

/// Shared VLAN label used by every generator.
pub fn vlan_label(vlan: Option<u16>) -> String {
    vlan.map_or_else(|| "Default".to_owned(), |v| format!("VLAN {v}"))
}

/// Port profile (`portconf`): a named port template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortProfile {
    pub id: EntityId,
    pub name: Option<String>,
    /// Network that untagged traffic on the port lands in.
    pub native_network_id: Option<EntityId>,
}
