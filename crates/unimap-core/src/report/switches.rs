//! Switch details: one diagram per switch with a node per port and
//! dotted references to the VLANs active ports land in.

use std::fmt::Write as _;

use crate::model::{Device, Port, vlan_label};
use crate::render::mermaid::sanitize_id;
use crate::render::{Direction, EdgeStyle, Flowchart, Subgraph};
use crate::store::Inventory;
use crate::topology::Topology;

fn port_label(topo: &Topology<'_>, switch: &Device, port: &Port, index: u32) -> String {
    let icon = if port.up { "🟢" } else { "🔴" };
    let port_override = switch.port_override(index);
    let name = port_override
        .and_then(|o| o.name.clone())
        .unwrap_or_else(|| format!("Port {index}"));

    let mut label = format!(
        "{icon} {name}<br/>{}<br/>{}",
        topo.port_profile_label(switch, index),
        vlan_label(topo.port_vlan(switch, index))
    );
    if port.poe_capable {
        let mode = port_override
            .and_then(|o| o.poe_mode.as_deref())
            .unwrap_or("auto");
        let _ = write!(label, "<br/>PoE: {mode}");
    }
    label
}

fn switch_diagram(topo: &Topology<'_>, switch: &Device) -> String {
    let name = switch.display_name("Switch");
    let group = sanitize_id(&format!("SW_{}", switch.id.prefix(8)));
    let mut chart = Flowchart::new(Direction::TopDown);

    let indexed: Vec<(u32, &Port)> = switch
        .ports
        .iter()
        .filter_map(|p| p.index.map(|i| (i, p)))
        .collect();

    let mut ports = Subgraph::new(&group, name);
    for &(index, port) in &indexed {
        ports.node(
            &format!("{group}_P{index}"),
            &port_label(topo, switch, port, index),
        );
    }
    chart.subgraph(ports);

    for &(index, port) in &indexed {
        if !port.up {
            continue;
        }
        if let Some(vlan) = topo.port_vlan(switch, index) {
            let external = format!("VLAN{vlan}_EXT");
            chart.node(&external, &format!("External VLAN {vlan}"));
            chart.edge(&format!("{group}_P{index}"), &external, EdgeStyle::Dotted, None);
        }
    }

    format!("## {name}\n\n{}", chart.render())
}

pub fn generate(inventory: &Inventory) -> String {
    let topo = Topology::new(inventory);
    let sections: Vec<String> = inventory
        .devices()
        .filter(|d| d.is_switch())
        .map(|d| switch_diagram(&topo, d))
        .collect();

    if sections.is_empty() {
        "No switches found in configuration.".to_owned()
    } else {
        sections.join("\n\n")
    }
}
