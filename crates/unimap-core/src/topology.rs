// ── Topology resolver ──
//
// Reconstructs implied structure from flat records: which device is the
// gateway, who uplinks to whom, which VLAN a port lands in, and what sits
// on the far end of a port. Every function is a pure lookup over the
// read-only inventory; a missing link in any chain yields a documented
// default, never an error.
//
// The uplink and peer rules are heuristics with a fixed precedence. The
// export carries no authoritative cabling data, so these stay as-is.

use tracing::debug;

use crate::model::{Device, DeviceType, Port, PortProfile, UplinkMedium};
use crate::store::Inventory;

/// Node id of the selected (or placeholder) gateway in every diagram.
pub const GATEWAY_NODE: &str = "Gateway";

/// Inferred uplink of a switch toward the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchUplink {
    /// First port that is up and has index 1.
    Port(u32),
    /// No such port; drawn as a plain Ethernet link.
    Generic,
}

impl SwitchUplink {
    pub fn label(self) -> String {
        match self {
            Self::Port(index) => format!("Port {index}"),
            Self::Generic => "Ethernet".to_owned(),
        }
    }
}

/// Upstream end of an inferred link.
#[derive(Debug, Clone, Copy)]
pub enum LinkSource<'a> {
    Gateway,
    Device(&'a Device),
}

impl LinkSource<'_> {
    pub fn node_id(&self) -> String {
        match self {
            Self::Gateway => GATEWAY_NODE.to_owned(),
            Self::Device(device) => device.node_id(),
        }
    }
}

/// Resolved uplink of an access point.
#[derive(Debug, Clone)]
pub struct AccessPointLink<'a> {
    pub source: LinkSource<'a>,
    pub medium: UplinkMedium,
    /// Edge label: `Mesh`, `Port <n>`, or `Ethernet`.
    pub label: String,
}

/// What sits on the far end of a port.
#[derive(Debug, Clone, Copy)]
pub enum PortPeer<'a> {
    /// Another device reports uplinking into this exact port.
    Device(&'a Device),
    /// Gateway port 1 with no known peer.
    InternetWan,
    /// Gateway port with traffic but no known peer.
    LanDevice,
    /// Switch port 1 with no known peer.
    UpstreamGateway,
    /// Switch port with traffic but no known peer.
    Unknown,
    NotConnected,
}

impl PortPeer<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Device(device) => device.display_name("Unknown"),
            Self::InternetWan => "Internet/WAN",
            Self::LanDevice => "LAN Device",
            Self::UpstreamGateway => "Gateway/Router",
            Self::Unknown => "Unknown Device",
            Self::NotConnected => "Not Connected",
        }
    }

    pub fn kind(&self) -> String {
        match self {
            Self::Device(device) => match device.device_type {
                DeviceType::Other => device.type_tag.to_uppercase(),
                known => known.to_string(),
            },
            Self::InternetWan => "ISP Connection".to_owned(),
            Self::LanDevice => "Network".to_owned(),
            Self::UpstreamGateway => "Uplink".to_owned(),
            Self::Unknown => "Unknown".to_owned(),
            Self::NotConnected => String::new(),
        }
    }
}

/// Resolver over one inventory.
#[derive(Debug, Clone, Copy)]
pub struct Topology<'a> {
    inventory: &'a Inventory,
}

impl<'a> Topology<'a> {
    pub fn new(inventory: &'a Inventory) -> Self {
        Self { inventory }
    }

    /// First gateway-type device in input order.
    pub fn gateway(&self) -> Option<&'a Device> {
        let gateway = self.inventory.devices().find(|d| d.is_gateway());
        match gateway {
            Some(gw) => debug!(device = %gw.id, name = gw.display_name("-"), "gateway selected"),
            None => debug!("no gateway device, using placeholder"),
        }
        gateway
    }

    /// Port 1, if it is up, is taken as the switch's uplink.
    pub fn switch_uplink(&self, switch: &Device) -> SwitchUplink {
        switch
            .ports
            .iter()
            .find(|p| p.up && p.index == Some(1))
            .and_then(|p| p.index)
            .map_or(SwitchUplink::Generic, SwitchUplink::Port)
    }

    /// Resolve an access point's uplink edge. `None` means the edge is omitted.
    ///
    /// 1. Wireless: the peer is looked up by MAC across all devices; a
    ///    gateway-type peer maps to the gateway node. No MAC or no match
    ///    omits the edge.
    /// 2. Wired (anything not wireless): the peer is looked up by MAC among
    ///    switches and the edge is labeled with the remote port. Without a
    ///    switch match the AP is assumed to hang off the gateway.
    pub fn access_point_link(&self, ap: &Device) -> Option<AccessPointLink<'a>> {
        let uplink = ap.uplink.as_ref();
        let medium = uplink.map_or(UplinkMedium::Wired, |u| u.medium);
        let peer = uplink
            .and_then(|u| u.peer_mac.as_ref())
            .and_then(|mac| self.inventory.device_by_mac(mac));

        match medium {
            UplinkMedium::Wireless => {
                let Some(peer) = peer else {
                    debug!(device = %ap.id, "mesh parent not resolved, edge omitted");
                    return None;
                };
                let source = if peer.is_gateway() {
                    LinkSource::Gateway
                } else {
                    LinkSource::Device(peer)
                };
                Some(AccessPointLink {
                    source,
                    medium,
                    label: "Mesh".to_owned(),
                })
            }
            UplinkMedium::Wired => {
                let label = uplink
                    .and_then(|u| u.remote_port)
                    .map_or_else(|| "Ethernet".to_owned(), |p| format!("Port {p}"));
                let source = match peer.filter(|p| p.is_switch()) {
                    Some(switch) => LinkSource::Device(switch),
                    None => {
                        debug!(device = %ap.id, "no upstream switch, assuming gateway");
                        LinkSource::Gateway
                    }
                };
                Some(AccessPointLink {
                    source,
                    medium,
                    label,
                })
            }
        }
    }

    /// Override → profile for a port.
    pub fn port_profile(&self, device: &Device, index: u32) -> Option<&'a PortProfile> {
        let profile_id = device.port_override(index)?.profile_id.as_ref()?;
        self.inventory.port_profile(profile_id)
    }

    /// Override → profile → native network → VLAN tag.
    pub fn port_vlan(&self, device: &Device, index: u32) -> Option<u16> {
        let network_id = self.port_profile(device, index)?.native_network_id.as_ref()?;
        self.inventory.network(network_id)?.vlan_id
    }

    /// Profile name for display: `Default` without a profile, `Custom` for
    /// an unnamed one.
    pub fn port_profile_label(&self, device: &Device, index: u32) -> String {
        match self.port_profile(device, index) {
            Some(profile) => profile.name.clone().unwrap_or_else(|| "Custom".to_owned()),
            None => "Default".to_owned(),
        }
    }

    /// Identify the peer on a port. Only ports that are up have peers.
    ///
    /// 1. Another device whose uplink names this device's MAC and this port.
    /// 2. Gateway: port 1 is the WAN; any other port with traffic is a LAN device.
    /// 3. Switch: port 1 is the uplink; any other port with traffic is unknown.
    pub fn port_peer(&self, device: &Device, port: &Port) -> PortPeer<'a> {
        let Some(index) = port.index.filter(|_| port.up) else {
            return PortPeer::NotConnected;
        };

        if let Some(mac) = &device.mac {
            let reported = self.inventory.devices().find(|other| {
                other.id != device.id
                    && other.uplink.as_ref().is_some_and(|u| {
                        u.peer_mac.as_ref() == Some(mac) && u.remote_port == Some(index)
                    })
            });
            if let Some(other) = reported {
                return PortPeer::Device(other);
            }
        }

        match device.device_type {
            DeviceType::Gateway if index == 1 => PortPeer::InternetWan,
            DeviceType::Gateway if port.has_traffic() => PortPeer::LanDevice,
            DeviceType::Switch if index == 1 => PortPeer::UpstreamGateway,
            DeviceType::Switch if port.has_traffic() => PortPeer::Unknown,
            _ => PortPeer::NotConnected,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::EntityId;
    use crate::store::fixtures;

    fn inventory() -> Inventory {
        fixtures::inventory(
            json!([
                { "_id": "net-main", "name": "Main", "vlan": 1 },
                { "_id": "net-secure", "name": "Secure", "vlan": 20 },
                { "_id": "net-untagged", "name": "LAN" }
            ]),
            json!([
                { "_id": "ap-orphan", "type": "uap", "name": "Orphan",
                  "uplink": { "type": "wireless" } },
                { "_id": "gw1", "type": "udm", "name": "UDM SE", "mac": "00:00:00:00:00:01",
                  "port_table": [
                      { "port_idx": 1, "up": true },
                      { "port_idx": 2, "up": true, "tx_bytes": 10 },
                      { "port_idx": 3, "up": true },
                      { "port_idx": 4, "up": false, "rx_bytes": 10 }
                  ] },
                { "_id": "gw2", "type": "ugw", "name": "Second" },
                { "_id": "sw1", "type": "usw", "name": "Core", "mac": "00:00:00:00:00:02",
                  "port_table": [
                      { "port_idx": 2, "up": true },
                      { "port_idx": 1, "up": true },
                      { "port_idx": 5, "up": true },
                      { "port_idx": 6, "up": true, "rx_bytes": 1 }
                  ],
                  "port_overrides": [
                      { "port_idx": 2, "portconf_id": "prof-secure" },
                      { "port_idx": 3, "portconf_id": "prof-untagged" },
                      { "port_idx": 4, "portconf_id": "prof-missing" },
                      { "port_idx": 5, "portconf_id": "prof-nameless" }
                  ],
                  "uplink": { "type": "wire", "uplink_mac": "00:00:00:00:00:01", "uplink_remote_port": 3 } },
                { "_id": "sw2", "type": "switch", "name": "Edge", "mac": "00:00:00:00:00:03",
                  "port_table": [ { "port_idx": 1, "up": false }, { "port_idx": 2, "up": true } ] },
                { "_id": "ap-mesh", "type": "uap-ac", "name": "Mesh AP",
                  "uplink": { "type": "wireless", "uplink_mac": "00:00:00:00:00:04" } },
                { "_id": "ap-wired", "type": "uap", "name": "Wired AP", "mac": "00:00:00:00:00:04",
                  "uplink": { "type": "wire", "uplink_mac": "00:00:00:00:00:02", "uplink_remote_port": 5 } },
                { "_id": "ap-gwmesh", "type": "uap-pro",
                  "uplink": { "type": "wireless", "uplink_mac": "00:00:00:00:00:01" } },
                { "_id": "ap-direct", "type": "uap",
                  "uplink": { "uplink_mac": "00:00:00:00:00:01" } },
                { "_id": "ap-bare", "type": "uap" },
                { "_id": "ap-unknown-peer", "type": "uap",
                  "uplink": { "type": "wireless", "uplink_mac": "de:ad:be:ef:00:00" } }
            ]),
            json!([
                { "_id": "prof-secure", "name": "Secure", "native_networkconf_id": "net-secure" },
                { "_id": "prof-untagged", "name": "Untagged", "native_networkconf_id": "net-untagged" },
                { "_id": "prof-nameless", "native_networkconf_id": "net-gone" }
            ]),
            json!([]),
        )
    }

    fn device<'a>(inv: &'a Inventory, id: &str) -> &'a Device {
        inv.device(&EntityId::from(id)).unwrap()
    }

    fn port<'a>(device: &'a Device, index: u32) -> &'a Port {
        device.ports.iter().find(|p| p.index == Some(index)).unwrap()
    }

    // ── Gateway ─────────────────────────────────────────────────────

    #[test]
    fn first_gateway_in_input_order_wins() {
        let inv = inventory();
        let gw = Topology::new(&inv).gateway().unwrap();
        assert_eq!(gw.id, EntityId::from("gw1"));
    }

    #[test]
    fn no_gateway_yields_none() {
        let inv = fixtures::inventory(
            json!([]),
            json!([{ "_id": "s", "type": "usw" }]),
            json!([]),
            json!([]),
        );
        assert!(Topology::new(&inv).gateway().is_none());
    }

    // ── Switch uplink ───────────────────────────────────────────────

    #[test]
    fn switch_uplink_is_port_one_when_up() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        assert_eq!(topo.switch_uplink(device(&inv, "sw1")), SwitchUplink::Port(1));
        assert_eq!(topo.switch_uplink(device(&inv, "sw1")).label(), "Port 1");
    }

    #[test]
    fn switch_uplink_is_generic_when_port_one_down() {
        let inv = inventory();
        let uplink = Topology::new(&inv).switch_uplink(device(&inv, "sw2"));
        assert_eq!(uplink, SwitchUplink::Generic);
        assert_eq!(uplink.label(), "Ethernet");
    }

    // ── Access point uplink ─────────────────────────────────────────

    #[test]
    fn wireless_ap_links_to_mesh_parent_node() {
        let inv = inventory();
        let link = Topology::new(&inv)
            .access_point_link(device(&inv, "ap-mesh"))
            .unwrap();
        assert_eq!(link.medium, UplinkMedium::Wireless);
        assert_eq!(link.label, "Mesh");
        assert_eq!(link.source.node_id(), "UAP_ap_wired");
    }

    #[test]
    fn wireless_ap_with_gateway_parent_links_to_gateway() {
        let inv = inventory();
        let link = Topology::new(&inv)
            .access_point_link(device(&inv, "ap-gwmesh"))
            .unwrap();
        assert_eq!(link.source.node_id(), GATEWAY_NODE);
    }

    #[test]
    fn wireless_ap_without_resolvable_parent_is_omitted() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        assert!(topo.access_point_link(device(&inv, "ap-orphan")).is_none());
        assert!(topo.access_point_link(device(&inv, "ap-unknown-peer")).is_none());
    }

    #[test]
    fn wired_ap_links_to_switch_with_remote_port() {
        let inv = inventory();
        let link = Topology::new(&inv)
            .access_point_link(device(&inv, "ap-wired"))
            .unwrap();
        assert_eq!(link.medium, UplinkMedium::Wired);
        assert_eq!(link.label, "Port 5");
        assert_eq!(link.source.node_id(), "USW_sw1");
    }

    #[test]
    fn wired_ap_on_non_switch_peer_falls_back_to_gateway() {
        let inv = inventory();
        let link = Topology::new(&inv)
            .access_point_link(device(&inv, "ap-direct"))
            .unwrap();
        assert_eq!(link.source.node_id(), GATEWAY_NODE);
        assert_eq!(link.label, "Ethernet");
    }

    #[test]
    fn ap_without_uplink_is_wired_to_gateway() {
        let inv = inventory();
        let link = Topology::new(&inv)
            .access_point_link(device(&inv, "ap-bare"))
            .unwrap();
        assert_eq!(link.medium, UplinkMedium::Wired);
        assert_eq!(link.source.node_id(), GATEWAY_NODE);
    }

    // ── Port → VLAN ─────────────────────────────────────────────────

    #[test]
    fn port_vlan_follows_full_chain() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        let sw = device(&inv, "sw1");
        assert_eq!(topo.port_vlan(sw, 2), Some(20));
        assert_eq!(topo.port_profile_label(sw, 2), "Secure");
    }

    #[test]
    fn every_broken_link_yields_default() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        let sw = device(&inv, "sw1");
        // no override
        assert_eq!(topo.port_vlan(sw, 1), None);
        assert_eq!(topo.port_profile_label(sw, 1), "Default");
        // network without a tag
        assert_eq!(topo.port_vlan(sw, 3), None);
        // dangling profile reference
        assert_eq!(topo.port_vlan(sw, 4), None);
        assert_eq!(topo.port_profile_label(sw, 4), "Default");
        // dangling network reference, unnamed profile
        assert_eq!(topo.port_vlan(sw, 5), None);
        assert_eq!(topo.port_profile_label(sw, 5), "Custom");
    }

    #[test]
    fn port_vlan_is_stable_across_calls() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        let sw = device(&inv, "sw1");
        let first = topo.port_vlan(sw, 2);
        assert!((0..5).all(|_| topo.port_vlan(sw, 2) == first));
    }

    // ── Port peers ──────────────────────────────────────────────────

    #[test]
    fn reported_uplink_identifies_peer() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        let sw = device(&inv, "sw1");
        let peer = topo.port_peer(sw, port(sw, 5));
        assert_eq!(peer.name(), "Wired AP");
        assert_eq!(peer.kind(), "Access Point");

        let gw = device(&inv, "gw1");
        let peer = topo.port_peer(gw, port(gw, 3));
        assert_eq!(peer.name(), "Core");
        assert_eq!(peer.kind(), "Switch");
    }

    #[test]
    fn peer_kind_uses_device_type_then_raw_tag() {
        let inv = fixtures::inventory(
            json!([]),
            json!([
                { "_id": "g", "type": "ugw" },
                { "_id": "a", "type": "uap-hd" },
                { "_id": "x", "type": "uxg-lite" }
            ]),
            json!([]),
            json!([]),
        );
        assert_eq!(PortPeer::Device(device(&inv, "g")).kind(), "Gateway");
        assert_eq!(PortPeer::Device(device(&inv, "a")).kind(), "Access Point");
        assert_eq!(PortPeer::Device(device(&inv, "x")).kind(), "UXG-LITE");
    }

    #[test]
    fn gateway_fallbacks() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        let gw = device(&inv, "gw1");
        assert_eq!(topo.port_peer(gw, port(gw, 1)).name(), "Internet/WAN");
        assert_eq!(topo.port_peer(gw, port(gw, 1)).kind(), "ISP Connection");
        assert_eq!(topo.port_peer(gw, port(gw, 2)).name(), "LAN Device");
        // down port never has a peer, traffic or not
        assert_eq!(topo.port_peer(gw, port(gw, 4)).name(), "Not Connected");
        assert_eq!(topo.port_peer(gw, port(gw, 4)).kind(), "");
    }

    #[test]
    fn switch_fallbacks() {
        let inv = inventory();
        let topo = Topology::new(&inv);
        let sw = device(&inv, "sw1");
        assert_eq!(topo.port_peer(sw, port(sw, 1)).name(), "Gateway/Router");
        assert_eq!(topo.port_peer(sw, port(sw, 1)).kind(), "Uplink");
        assert_eq!(topo.port_peer(sw, port(sw, 6)).name(), "Unknown Device");
        assert_eq!(topo.port_peer(sw, port(sw, 2)).name(), "Not Connected");
    }
}
