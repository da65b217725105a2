//! Topology inference and rendering for UniFi controller exports.
//!
//! The crate turns a directory of exported JSON collections into Mermaid
//! diagrams and Markdown tables:
//!
//! - **[`loader`]** reads the export documents (`networks.json`,
//!   `devices.json` and three optional files) through the raw [`export`]
//!   shapes and the [`convert`] layer into canonical [`model`] types.
//! - **[`Inventory`]** indexes those records by id and MAC, in input order.
//! - **[`Topology`]** reconstructs what the export only implies: the gateway,
//!   uplinks, port VLANs and port peers.
//! - **[`report`]** holds the five generators and assembles the standalone
//!   and combined documents. Output is deterministic for a given input.

pub mod convert;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod render;
pub mod report;
pub mod store;
pub mod topology;

pub use error::CoreError;
pub use loader::{ExportFile, LoadOutcome, SkipReason, SkippedFile, load_dir};
pub use report::{Report, ReportKind, combined_document, generate_all};
pub use store::Inventory;
pub use topology::Topology;

pub use model::{
    Device, DeviceType, EntityId, FirewallAction, FirewallGroup, FirewallRule, MacAddress,
    Network, Port, PortOverride, PortProfile, Uplink, UplinkMedium,
};
