// ── Domain model ──
//
// Canonical, read-only representations of the exported records. Raw
// export shapes live in `crate::export`; `crate::convert` bridges them.

pub mod device;
pub mod entity_id;
pub mod firewall;
pub mod network;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::{Device, DeviceType, Port, PortOverride, Uplink, UplinkMedium};
pub use entity_id::{EntityId, MacAddress};
pub use firewall::{FirewallAction, FirewallGroup, FirewallRule};
pub use network::{Network, PortProfile, vlan_label};
