use serde::{Deserialize, Serialize};

/// Version recorded for apps whose installed version is unknown.
pub const VERSION_NONE: &str = "none";

/// Persisted install state for one app. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRecord {
    pub name: String,
    pub installed: bool,
    pub version: String,
}

impl InstallRecord {
    /// Record for a catalogue app that has never been seen before.
    pub fn not_installed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            installed: false,
            version: VERSION_NONE.to_string(),
        }
    }

    pub fn has_known_version(&self) -> bool {
        !self.version.is_empty() && self.version != VERSION_NONE
    }
}
