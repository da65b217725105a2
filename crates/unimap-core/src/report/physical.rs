//! Physical topology: Internet → gateway → switches, access points by
//! their reported uplink (solid for cable, dotted for mesh).

use crate::model::{Device, DeviceType, UplinkMedium};
use crate::render::{Direction, EdgeStyle, Flowchart};
use crate::store::Inventory;
use crate::topology::{AccessPointLink, GATEWAY_NODE, Topology};

const INTERNET_NODE: &str = "Internet";

pub fn generate(inventory: &Inventory) -> String {
    let topo = Topology::new(inventory);
    let mut chart = Flowchart::new(Direction::TopDown);

    chart.node(INTERNET_NODE, "🌐 Internet");
    let gateway_label = topo.gateway().map_or_else(
        || "Gateway".to_owned(),
        |gw| {
            format!(
                "{}<br/>{}",
                gw.display_name("Gateway"),
                gw.model.as_deref().unwrap_or("Gateway")
            )
        },
    );
    chart.node(GATEWAY_NODE, &gateway_label);
    chart.edge(INTERNET_NODE, GATEWAY_NODE, EdgeStyle::Arrow, None);

    // Device nodes and switch links first, AP links once every node exists.
    let mut ap_links: Vec<(&Device, AccessPointLink<'_>)> = Vec::new();
    for device in inventory.devices() {
        match device.device_type {
            DeviceType::Switch => {
                let node = device.node_id();
                chart.node(
                    &node,
                    &format!(
                        "{}<br/>Switch ({} ports)",
                        device.display_name("Unknown"),
                        device.ports.len()
                    ),
                );
                let uplink = topo.switch_uplink(device);
                chart.edge(GATEWAY_NODE, &node, EdgeStyle::Line, Some(&uplink.label()));
            }
            DeviceType::AccessPoint => {
                let medium = device
                    .uplink
                    .as_ref()
                    .map_or(UplinkMedium::Wired, |u| u.medium);
                let annotation = match medium {
                    UplinkMedium::Wireless => "📶 Wireless Mesh",
                    UplinkMedium::Wired => "🔌 Ethernet",
                };
                chart.node(
                    &device.node_id(),
                    &format!(
                        "{}<br/>Access Point<br/>{annotation}",
                        device.display_name("Unknown")
                    ),
                );
                if let Some(link) = topo.access_point_link(device) {
                    ap_links.push((device, link));
                }
            }
            DeviceType::Gateway | DeviceType::Other => {}
        }
    }

    for (ap, link) in ap_links {
        let style = match link.medium {
            UplinkMedium::Wireless => EdgeStyle::Dotted,
            UplinkMedium::Wired => EdgeStyle::Line,
        };
        chart.edge(&link.source.node_id(), &ap.node_id(), style, Some(&link.label));
    }

    chart.render()
}
