// ── Indexed, read-only inventory ──
//
// Built once at load time, then shared immutably by every generator.
// All collections iterate in input order.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::{
    Device, EntityId, FirewallGroup, FirewallRule, MacAddress, Network, PortProfile,
};

/// The loaded controller export, indexed by id and MAC.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    networks: IndexMap<EntityId, Network>,
    devices: IndexMap<EntityId, Device>,
    port_profiles: IndexMap<EntityId, PortProfile>,
    firewall_rules: Vec<FirewallRule>,
    firewall_groups: IndexMap<EntityId, FirewallGroup>,

    /// Secondary index: MAC -> device id. First device wins on duplicates.
    mac_to_id: HashMap<MacAddress, EntityId>,
}

impl Inventory {
    /// Index the given collections. A repeated id replaces the earlier
    /// record while keeping its position.
    pub fn new(
        networks: impl IntoIterator<Item = Network>,
        devices: impl IntoIterator<Item = Device>,
        port_profiles: impl IntoIterator<Item = PortProfile>,
        firewall_rules: impl IntoIterator<Item = FirewallRule>,
        firewall_groups: impl IntoIterator<Item = FirewallGroup>,
    ) -> Self {
        let devices: IndexMap<EntityId, Device> =
            devices.into_iter().map(|d| (d.id.clone(), d)).collect();

        let mut mac_to_id = HashMap::new();
        for device in devices.values() {
            if let Some(mac) = &device.mac {
                mac_to_id
                    .entry(mac.clone())
                    .or_insert_with(|| device.id.clone());
            }
        }

        Self {
            networks: networks.into_iter().map(|n| (n.id.clone(), n)).collect(),
            devices,
            port_profiles: port_profiles
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            firewall_rules: firewall_rules.into_iter().collect(),
            firewall_groups: firewall_groups
                .into_iter()
                .map(|g| (g.id.clone(), g))
                .collect(),
            mac_to_id,
        }
    }

    // ── Collections ─────────────────────────────────────────────────

    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn port_profiles(&self) -> impl Iterator<Item = &PortProfile> {
        self.port_profiles.values()
    }

    pub fn firewall_rules(&self) -> &[FirewallRule] {
        &self.firewall_rules
    }

    pub fn firewall_groups(&self) -> impl Iterator<Item = &FirewallGroup> {
        self.firewall_groups.values()
    }

    // ── Lookups ─────────────────────────────────────────────────────

    pub fn network(&self, id: &EntityId) -> Option<&Network> {
        self.networks.get(id)
    }

    pub fn device(&self, id: &EntityId) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn device_by_mac(&self, mac: &MacAddress) -> Option<&Device> {
        let id = self.mac_to_id.get(mac)?;
        self.devices.get(id)
    }

    pub fn port_profile(&self, id: &EntityId) -> Option<&PortProfile> {
        self.port_profiles.get(id)
    }

    pub fn firewall_group(&self, id: &EntityId) -> Option<&FirewallGroup> {
        self.firewall_groups.get(id)
    }

    // ── Counts ──────────────────────────────────────────────────────

    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn port_profile_count(&self) -> usize {
        self.port_profiles.len()
    }

    pub fn firewall_group_count(&self) -> usize {
        self.firewall_groups.len()
    }
}
