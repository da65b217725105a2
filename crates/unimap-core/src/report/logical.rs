//! Logical topology: router, one node per network, example services and
//! a short firewall-rule overlay.

use std::collections::HashSet;

use tracing::debug;

use crate::model::Network;
use crate::render::{Direction, EdgeStyle, Flowchart, Subgraph};
use crate::store::Inventory;
use crate::topology::Topology;

const ROUTER_NODE: &str = "Router";

/// Number of enabled rules shown in the overlay.
const OVERLAY_RULES: usize = 3;

/// Illustrative services attached to well-known VLANs.
const EXAMPLE_SERVICES: &[(u16, &[&str])] = &[
    (1, &["Samba AD", "Proxmox", "DNS"]),
    (20, &["SMB Server", "User Devices"]),
    (30, &["Keycloak", "Web Services"]),
];

fn services_for(network: &Network) -> &'static [&'static str] {
    network
        .vlan_id
        .and_then(|vlan| EXAMPLE_SERVICES.iter().find(|(v, _)| *v == vlan))
        .map(|&(_, services)| services)
        .unwrap_or_default()
}

pub fn generate(inventory: &Inventory) -> String {
    let topo = Topology::new(inventory);
    let mut chart = Flowchart::new(Direction::TopDown);

    let router = topo.gateway().map_or("Gateway", |gw| gw.display_name("Gateway"));
    chart.node(ROUTER_NODE, &format!("{router}<br/>Router/Firewall"));

    // Networks sharing a VLAN tag share a node; the first one labels it.
    let mut seen = HashSet::new();
    let mut drawn = Vec::new();
    for network in inventory.networks() {
        let node = network.node_id();
        if !seen.insert(node.clone()) {
            debug!(network = %network.id, node = %node, "duplicate network node, skipped");
            continue;
        }
        chart.node(
            &node,
            &format!(
                "{}<br/>{}<br/>{}",
                network.name,
                network.vlan_label(),
                network.subnet_or_na()
            ),
        );
        chart.edge(ROUTER_NODE, &node, EdgeStyle::Arrow, None);
        drawn.push(network);
    }

    for network in drawn {
        for service in services_for(network) {
            let node = format!("SVC_{}", service.replace(' ', ""));
            chart.node(&node, service);
            chart.edge(&network.node_id(), &node, EdgeStyle::Arrow, None);
        }
    }

    let rules = inventory.firewall_rules();
    if !rules.is_empty() {
        let mut overlay = Subgraph::new("FirewallRules", "Firewall Rules");
        for (i, rule) in rules
            .iter()
            .enumerate()
            .filter(|(_, r)| r.enabled)
            .take(OVERLAY_RULES)
        {
            let name = rule
                .name
                .clone()
                .unwrap_or_else(|| format!("Rule {}", i + 1));
            overlay.node(&format!("FW{i}"), &format!("{} {name}", rule.action.icon()));
        }
        chart.subgraph(overlay);
    }

    chart.render()
}
