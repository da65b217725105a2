//! Firewall report.
//!
//! With explicit rules in the export, draws a source → destination graph of
//! every enabled rule. Without any, falls back to a VLAN isolation matrix
//! derived from the networks' zone assignments.

use indexmap::{IndexMap, IndexSet};
use tabled::Tabled;
use tracing::debug;

use crate::model::{EntityId, FirewallAction, Network};
use crate::render::markdown::{escape_cell, table};
use crate::render::mermaid::sanitize_id;
use crate::render::{Direction, EdgeStyle, Flowchart, Subgraph};
use crate::store::Inventory;

/// Which of the two renderings applies to an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallMode {
    RuleGraph,
    IsolationMatrix,
}

impl FirewallMode {
    /// Any rule at all (even a disabled one) selects the rule graph.
    pub fn for_inventory(inventory: &Inventory) -> Self {
        if inventory.firewall_rules().is_empty() {
            Self::IsolationMatrix
        } else {
            Self::RuleGraph
        }
    }
}

pub fn generate(inventory: &Inventory) -> String {
    match FirewallMode::for_inventory(inventory) {
        FirewallMode::RuleGraph => rule_graph(inventory),
        FirewallMode::IsolationMatrix => isolation_matrix(inventory),
    }
}

// ── Rule graph ──────────────────────────────────────────────────────

fn source_node(id: &EntityId) -> String {
    sanitize_id(&format!("SRC_{id}"))
}

fn destination_node(id: &EntityId) -> String {
    sanitize_id(&format!("DST_{id}"))
}

fn network_label(network: &Network) -> String {
    format!("{}<br/>{}", network.name, network.vlan_label())
}

fn rule_graph(inventory: &Inventory) -> String {
    let resolve = |id: Option<&EntityId>| id.and_then(|id| inventory.network(id));
    let enabled = || inventory.firewall_rules().iter().filter(|r| r.enabled);

    let mut sources: IndexSet<&EntityId> = IndexSet::new();
    let mut destinations: IndexSet<&EntityId> = IndexSet::new();
    for rule in enabled() {
        if let Some(network) = resolve(rule.src_network_id.as_ref()) {
            sources.insert(&network.id);
        }
        if let Some(network) = resolve(rule.dst_network_id.as_ref()) {
            destinations.insert(&network.id);
        }
    }

    let mut chart = Flowchart::new(Direction::LeftRight);
    for (group, title, ids, node_id) in [
        ("Sources", "Sources", &sources, source_node as fn(&EntityId) -> String),
        ("Destinations", "Destinations", &destinations, destination_node),
    ] {
        if ids.is_empty() {
            continue;
        }
        let mut subgraph = Subgraph::new(group, title);
        for &id in ids {
            if let Some(network) = inventory.network(id) {
                subgraph.node(&node_id(id), &network_label(network));
            }
        }
        chart.subgraph(subgraph);
    }

    for rule in enabled() {
        let (Some(src), Some(dst)) = (
            resolve(rule.src_network_id.as_ref()),
            resolve(rule.dst_network_id.as_ref()),
        ) else {
            debug!(rule = rule.label(), "rule endpoint not resolved, skipped");
            continue;
        };
        let traffic = rule.traffic_label();
        match rule.action {
            FirewallAction::Allow => chart.edge(
                &source_node(&src.id),
                &destination_node(&dst.id),
                EdgeStyle::Arrow,
                Some(&traffic),
            ),
            FirewallAction::Deny => chart.edge(
                &source_node(&src.id),
                &destination_node(&dst.id),
                EdgeStyle::Dotted,
                Some(&format!("❌ {traffic}")),
            ),
        };
    }

    chart.render()
}

// ── Isolation matrix ────────────────────────────────────────────────

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Network Name")]
    name: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
    #[tabled(rename = "Internet Access")]
    internet: &'static str,
    #[tabled(rename = "Firewall Zone")]
    zone: String,
}

/// Shorten `id` to `keep` chars plus an ellipsis once it exceeds `limit`.
fn shorten(id: &str, keep: usize, limit: usize) -> String {
    if id.chars().count() > limit {
        let head: String = id.chars().take(keep).collect();
        format!("{head}...")
    } else {
        id.to_owned()
    }
}

/// Network roles that drive the cross-zone access suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Management,
    Secure,
    Services,
}

impl Role {
    fn matches(self, network: &Network) -> bool {
        let name = network.name.to_lowercase();
        let (keyword, vlan) = match self {
            Self::Management => ("management", 1),
            Self::Secure => ("secure", 20),
            Self::Services => ("service", 30),
        };
        name.contains(keyword) || network.vlan_id == Some(vlan)
    }

    fn first<'a>(self, networks: &[&'a Network]) -> Option<&'a Network> {
        networks.iter().copied().find(|n| self.matches(n))
    }
}

fn isolation_matrix(inventory: &Inventory) -> String {
    if inventory.network_count() == 0 {
        return "No network configuration found.".to_owned();
    }

    let mut sorted: Vec<&Network> = inventory.networks().collect();
    sorted.sort_by_key(|n| (n.vlan_id.is_none(), n.vlan_id));

    let rows: Vec<VlanRow> = sorted
        .iter()
        .map(|n| VlanRow {
            vlan: n.vlan_id.map_or_else(|| "WAN".to_owned(), |v| v.to_string()),
            name: escape_cell(&n.name),
            subnet: escape_cell(n.subnet_or_na()),
            internet: if n.internet_access_enabled {
                "🌐 Yes"
            } else {
                "🚫 No"
            },
            zone: n
                .firewall_zone_id
                .as_ref()
                .map_or_else(|| "No Zone".to_owned(), |z| escape_cell(&shorten(z.as_str(), 8, 12))),
        })
        .collect();

    let mut zones: IndexMap<&EntityId, Vec<&str>> = IndexMap::new();
    for network in inventory.networks() {
        if let Some(zone) = &network.firewall_zone_id {
            zones.entry(zone).or_default().push(&network.name);
        }
    }

    let mut out = vec![
        "## Firewall Zone Configuration".to_owned(),
        String::new(),
        "*Zone-based firewall in use; zone policies are not part of the controller export.*"
            .to_owned(),
        String::new(),
        table(&rows),
        String::new(),
    ];

    if !zones.is_empty() {
        out.push("### Firewall Zone Groupings:".to_owned());
        for (zone, names) in &zones {
            out.push(format!(
                "- **Zone {}**: {}",
                shorten(zone.as_str(), 12, 16),
                names.join(", ")
            ));
        }
        out.push(String::new());
    }

    out.extend(
        [
            "### Typical Zone-Based Firewall Behavior:",
            "- **Same Zone**: Networks in same zone can communicate freely",
            "- **Different Zones**: Communication blocked by default",
            "- **WAN Zones**: Handle internet/external access",
            "- **Custom Rules**: Can be created between zones in UniFi UI",
            "",
            "### Required Cross-Zone Access for Your Setup:",
        ]
        .map(str::to_owned),
    );

    if let Some(mgmt) = Role::Management.first(&sorted) {
        if let Some(secure) = Role::Secure.first(&sorted) {
            out.push(format!(
                "- **{} → {}**: Ports 53, 88, 389, 445, 464 (for AD authentication)",
                secure.name, mgmt.name
            ));
        }
        if let Some(services) = Role::Services.first(&sorted) {
            out.push(format!(
                "- **{} → {}**: Ports 389, 636 (for Keycloak LDAP)",
                services.name, mgmt.name
            ));
        }
    }

    out.push(String::new());
    out.push(
        "*Configure these rules in UniFi Network → Settings → Policy Engine → Firewall*".to_owned(),
    );
    out.join("\n")
}
