//! Port mapping: one table per gateway or switch, peers and VLANs
//! resolved per port, plus an activity/PoE summary line.

use std::fmt::Write as _;

use tabled::Tabled;

use crate::model::{Device, DeviceType, Port, vlan_label};
use crate::render::markdown::{escape_cell, table};
use crate::store::Inventory;
use crate::topology::Topology;

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Port")]
    port: u32,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Device Connected")]
    peer: String,
    #[tabled(rename = "Device Type")]
    peer_kind: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "PoE")]
    poe: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

fn status(port: &Port) -> &'static str {
    if port.up { "🟢 Up" } else { "🔴 Down" }
}

fn speed(port: &Port) -> String {
    if port.speed_mbps > 0 {
        format!("{}M", port.speed_mbps)
    } else {
        "N/A".to_owned()
    }
}

fn poe(device: &Device, port: &Port, index: u32) -> String {
    if !port.poe_capable {
        return "No".to_owned();
    }
    match port.poe_power_w {
        Some(watts) if watts > 0.0 => format!("Yes ({watts:.1}W)"),
        _ => {
            let mode = device
                .port_override(index)
                .and_then(|o| o.poe_mode.as_deref())
                .unwrap_or("auto");
            format!("Yes ({mode})")
        }
    }
}

fn notes(device: &Device, port: &Port, index: u32) -> String {
    let mut notes = Vec::new();
    let default_name = format!("Port {index}");
    if let Some(name) = device
        .port_override(index)
        .and_then(|o| o.name.as_deref())
        .filter(|name| *name != default_name)
    {
        notes.push(format!("Named: {name}"));
    }
    if port.full_duplex {
        notes.push("Full Duplex".to_owned());
    }
    notes.join(", ")
}

fn summary(ports: &[Port]) -> String {
    let active = ports.iter().filter(|p| p.up).count();
    let poe_ports = ports.iter().filter(|p| p.poe_capable).count();
    let mut line = format!("**Summary:** {active}/{} ports active", ports.len());
    if poe_ports > 0 {
        let watts: f64 = ports.iter().filter_map(|p| p.poe_power_w).sum();
        let _ = write!(line, ", {poe_ports} PoE ports ({watts:.1}W total)");
    }
    line
}

fn device_section(topo: &Topology<'_>, device: &Device) -> String {
    let role = match device.device_type {
        DeviceType::Gateway => "Gateway/Router",
        _ => "Switch",
    };
    let mut lines = vec![format!("## {} ({role})", device.display_name("Unknown"))];
    if let Some(model) = &device.model {
        lines.push(format!("*Model: {model}*"));
    }
    lines.push(String::new());

    let mut indexed: Vec<(u32, &Port)> = device
        .ports
        .iter()
        .filter_map(|p| p.index.map(|i| (i, p)))
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    let rows: Vec<PortRow> = indexed
        .into_iter()
        .map(|(index, port)| {
            let peer = topo.port_peer(device, port);
            PortRow {
                port: index,
                status: status(port),
                speed: speed(port),
                peer: escape_cell(peer.name()),
                peer_kind: escape_cell(&peer.kind()),
                vlan: vlan_label(topo.port_vlan(device, index)),
                profile: escape_cell(&topo.port_profile_label(device, index)),
                poe: escape_cell(&poe(device, port, index)),
                notes: escape_cell(&notes(device, port, index)),
            }
        })
        .collect();

    lines.push(table(&rows));
    lines.push(String::new());
    lines.push(summary(&device.ports));
    lines.push(String::new());
    lines.push("---".to_owned());
    lines.push(String::new());
    lines.join("\n")
}

pub fn generate(inventory: &Inventory) -> String {
    let topo = Topology::new(inventory);
    let sections: Vec<String> = inventory
        .devices()
        .filter(|d| d.device_type.has_ports())
        .map(|d| device_section(&topo, d))
        .collect();

    if sections.is_empty() {
        "No switches or gateways found for port mapping.".to_owned()
    } else {
        sections.join("\n")
    }
}
