// ── Firewall domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirewallAction {
    Allow,
    Deny,
}

impl FirewallAction {
    /// `allow`/`accept` allow; every other action (`drop`, `reject`, ...) denies.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            None | Some("allow" | "accept") => Self::Allow,
            Some(_) => Self::Deny,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Allow => "✅",
            Self::Deny => "❌",
        }
    }
}

/// A legacy network-to-network firewall rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub enabled: bool,
    pub action: FirewallAction,
    pub protocol: String,
    pub dst_port: Option<String>,
    pub src_network_id: Option<EntityId>,
    pub dst_network_id: Option<EntityId>,
}

impl FirewallRule {
    /// Name for logs: the rule name, else its id, else `-`.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.id.as_ref().map(EntityId::as_str))
            .unwrap_or("-")
    }

    /// Edge label: `<protocol>[:<port>]`.
    pub fn traffic_label(&self) -> String {
        match self.dst_port.as_deref() {
            Some(port) if !port.is_empty() => format!("{}:{port}", self.protocol),
            _ => self.protocol.clone(),
        }
    }
}

/// Firewall address/port group. Loaded and indexed; no generator reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallGroup {
    pub id: EntityId,
    pub name: Option<String>,
}
