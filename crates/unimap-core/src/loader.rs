// ── Export directory loader ──
//
// Reads the five export documents from a directory, converts them into
// domain types and indexes them. `networks.json` and `devices.json` must
// exist and parse; the other three fall back to empty collections and are
// reported back to the caller as skipped.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::export::{
    ExportEnvelope, RawDevice, RawFirewallGroup, RawFirewallRule, RawNetwork, RawPortProfile,
};
use crate::model::{Device, FirewallGroup, FirewallRule, Network, PortProfile};
use crate::store::Inventory;

/// The export documents read from the input directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumIter)]
pub enum ExportFile {
    #[strum(serialize = "networks.json")]
    Networks,
    #[strum(serialize = "devices.json")]
    Devices,
    #[strum(serialize = "port-profiles.json")]
    PortProfiles,
    #[strum(serialize = "firewall-rules.json")]
    FirewallRules,
    #[strum(serialize = "firewall-groups.json")]
    FirewallGroups,
}

impl ExportFile {
    pub fn is_required(self) -> bool {
        matches!(self, Self::Networks | Self::Devices)
    }

    /// Collection name for progress output.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Networks => "networks",
            Self::Devices => "devices",
            Self::PortProfiles => "port profiles",
            Self::FirewallRules => "firewall rules",
            Self::FirewallGroups => "firewall groups",
        }
    }
}

/// Why an optional file contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file: ExportFile,
    pub reason: SkipReason,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub inventory: Inventory,
    pub skipped: Vec<SkippedFile>,
}

impl LoadOutcome {
    /// Record count per loaded file, in `ExportFile` order.
    pub fn counts(&self) -> Vec<(ExportFile, usize)> {
        let inv = &self.inventory;
        ExportFile::iter()
            .filter(|file| !self.skipped.iter().any(|s| s.file == *file))
            .map(|file| {
                let count = match file {
                    ExportFile::Networks => inv.network_count(),
                    ExportFile::Devices => inv.device_count(),
                    ExportFile::PortProfiles => inv.port_profile_count(),
                    ExportFile::FirewallRules => inv.firewall_rules().len(),
                    ExportFile::FirewallGroups => inv.firewall_group_count(),
                };
                (file, count)
            })
            .collect()
    }
}

/// Parse one export document into domain records.
fn read_file<R, T>(dir: &Path, file: ExportFile) -> Result<Vec<T>, CoreError>
where
    R: DeserializeOwned,
    T: From<R>,
{
    let path = dir.join(file.to_string());
    let text = fs::read_to_string(&path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            CoreError::MissingInput {
                file: file.to_string(),
                dir: dir.to_path_buf(),
            }
        } else {
            CoreError::Io { path, source }
        }
    })?;

    let envelope: ExportEnvelope<R> =
        serde_json::from_str(&text).map_err(|source| CoreError::InvalidInput {
            file: file.to_string(),
            source,
        })?;
    let rc = envelope.meta.as_ref().and_then(|m| m.rc.as_deref());
    if let Some(rc) = rc.filter(|rc| *rc != "ok") {
        debug!(%file, rc, "export envelope reports non-ok status");
    }

    let records: Vec<T> = envelope.data.into_iter().map(T::from).collect();
    info!(%file, count = records.len(), "loaded export file");
    Ok(records)
}

/// Optional files degrade to an empty collection plus a skip entry.
fn read_optional<R, T>(dir: &Path, file: ExportFile, skipped: &mut Vec<SkippedFile>) -> Vec<T>
where
    R: DeserializeOwned,
    T: From<R>,
{
    match read_file::<R, T>(dir, file) {
        Ok(records) => records,
        Err(err) => {
            let reason = match err {
                CoreError::MissingInput { .. } => SkipReason::Missing,
                other => SkipReason::Invalid(other.to_string()),
            };
            warn!(%file, ?reason, "optional export file skipped");
            skipped.push(SkippedFile { file, reason });
            Vec::new()
        }
    }
}

/// Load and index every export document under `dir`.
pub fn load_dir(dir: &Path) -> Result<LoadOutcome, CoreError> {
    // Fail on a missing mandatory file before reading anything.
    for file in ExportFile::iter().filter(|f| f.is_required()) {
        if !dir.join(file.to_string()).is_file() {
            return Err(CoreError::MissingInput {
                file: file.to_string(),
                dir: dir.to_path_buf(),
            });
        }
    }

    let networks = read_file::<RawNetwork, Network>(dir, ExportFile::Networks)?;
    let devices = read_file::<RawDevice, Device>(dir, ExportFile::Devices)?;

    let mut skipped = Vec::new();
    let profiles =
        read_optional::<RawPortProfile, PortProfile>(dir, ExportFile::PortProfiles, &mut skipped);
    let rules =
        read_optional::<RawFirewallRule, FirewallRule>(dir, ExportFile::FirewallRules, &mut skipped);
    let groups = read_optional::<RawFirewallGroup, FirewallGroup>(
        dir,
        ExportFile::FirewallGroups,
        &mut skipped,
    );

    Ok(LoadOutcome {
        inventory: Inventory::new(networks, devices, profiles, rules, groups),
        skipped,
    })
}
