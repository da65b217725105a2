// ── Report generators and document assembly ──
//
// Each generator is a pure function of the inventory. `ReportKind` names
// the five artifacts and owns their titles, file names and the sections
// of the combined document.

pub mod firewall;
pub mod logical;
pub mod physical;
pub mod ports;
pub mod switches;

use strum::{EnumIter, IntoEnumIterator};

use crate::store::Inventory;

pub use firewall::FirewallMode;

/// The five generated artifacts, in combined-document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ReportKind {
    PhysicalTopology,
    LogicalTopology,
    PortMapping,
    SwitchDetails,
    FirewallMatrix,
}

impl ReportKind {
    /// Title of the standalone document.
    pub fn title(self) -> &'static str {
        match self {
            Self::PhysicalTopology => "Physical Topology",
            Self::LogicalTopology => "Logical Topology",
            Self::PortMapping => "Port Mapping",
            Self::SwitchDetails => "Switch Details",
            Self::FirewallMatrix => "Firewall Matrix",
        }
    }

    /// Output file name, e.g. `physical_topology.md`.
    pub fn file_name(self) -> String {
        format!("{self}.md")
    }

    fn section_heading(self) -> &'static str {
        match self {
            Self::PhysicalTopology => "Physical Topology",
            Self::LogicalTopology => "Logical Network",
            Self::PortMapping => "Port Mapping",
            Self::SwitchDetails => "Switch Configuration",
            Self::FirewallMatrix => "Firewall Rules",
        }
    }

    fn section_blurb(self) -> Option<&'static str> {
        match self {
            Self::PhysicalTopology => Some("Shows actual cable connections and wireless mesh links."),
            Self::LogicalTopology => Some("Shows VLANs, subnets, and logical network segmentation."),
            Self::PortMapping => Some("Detailed port-by-port documentation for cable management."),
            Self::SwitchDetails | Self::FirewallMatrix => None,
        }
    }

    pub fn generate(self, inventory: &Inventory) -> String {
        match self {
            Self::PhysicalTopology => physical::generate(inventory),
            Self::LogicalTopology => logical::generate(inventory),
            Self::PortMapping => ports::generate(inventory),
            Self::SwitchDetails => switches::generate(inventory),
            Self::FirewallMatrix => firewall::generate(inventory),
        }
    }
}

/// One generated artifact body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub body: String,
}

impl Report {
    pub fn new(kind: ReportKind, inventory: &Inventory) -> Self {
        Self {
            kind,
            body: kind.generate(inventory),
        }
    }

    /// Standalone document: `# <Title>` followed by the body.
    pub fn document(&self) -> String {
        format!("# {}\n\n{}", self.kind.title(), self.body)
    }
}

/// Run every generator in order.
pub fn generate_all(inventory: &Inventory) -> Vec<Report> {
    ReportKind::iter()
        .map(|kind| Report::new(kind, inventory))
        .collect()
}

/// The combined document. Sections follow `ReportKind` order regardless of
/// the order of `reports`; kinds not present are left out.
pub fn combined_document(reports: &[Report]) -> String {
    let mut out = String::from(
        "# Network Documentation\n\n*Auto-generated from UniFi Controller configuration*\n\n",
    );
    for kind in ReportKind::iter() {
        let Some(report) = reports.iter().find(|r| r.kind == kind) else {
            continue;
        };
        out.push_str("## ");
        out.push_str(kind.section_heading());
        out.push_str("\n\n");
        if let Some(blurb) = kind.section_blurb() {
            out.push_str(blurb);
            out.push_str("\n\n");
        }
        out.push_str(&report.body);
        out.push_str("\n\n");
    }
    out.push_str("---\n*Generated automatically from UniFi configuration*");
    out
}
