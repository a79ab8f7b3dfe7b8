use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::TrackerError;

/// Platforms a catalogue entry can carry an installer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    /// The platform this binary was built for. Anything that is not Windows
    /// uses the Linux descriptor.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }
}

/// How an app gets installed on one platform.
///
/// The catalogue has two shapes in the wild: an object naming the installer
/// and package id, and a bare command string. Anything else is kept as-is
/// and only counts as "present".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InstallerSpec {
    Package {
        installer: String,
        #[serde(default)]
        id: String,
    },
    Command(String),
    Other(serde_json::Value),
}

impl fmt::Display for InstallerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallerSpec::Package { installer, id } if id.is_empty() => write!(f, "{installer}"),
            InstallerSpec::Package { installer, id } => write!(f, "{installer} {id}"),
            InstallerSpec::Command(cmd) => write!(f, "{cmd}"),
            InstallerSpec::Other(value) => write!(f, "{value}"),
        }
    }
}

/// One app known to the static catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogueEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub windows: Option<InstallerSpec>,
    #[serde(default)]
    pub linux: Option<InstallerSpec>,
    /// Names of other apps; informational only, never resolved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogueEntry {
    pub fn installer_for(&self, platform: Platform) -> Option<&InstallerSpec> {
        match platform {
            Platform::Windows => self.windows.as_ref(),
            Platform::Linux => self.linux.as_ref(),
        }
    }
}

/// Read the catalogue file, keeping entries in file order.
pub fn load(path: &Path) -> Result<Vec<CatalogueEntry>, TrackerError> {
    let raw = fs::read_to_string(path).map_err(|source| TrackerError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse(&raw).map_err(|source| TrackerError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "loaded {} catalogue entries from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

pub fn parse(raw: &str) -> Result<Vec<CatalogueEntry>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Find the catalogue entry for a record name (exact, case-sensitive).
pub fn find<'a>(catalogue: &'a [CatalogueEntry], name: &str) -> Option<&'a CatalogueEntry> {
    catalogue.iter().find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"[
        {
            "name": "GoLang",
            "windows": { "installer": "winget", "id": "GoLang.Go" },
            "linux": { "installer": "apt", "id": "golang-go" },
            "prerequisites": []
        },
        {
            "name": "Neovim",
            "windows": "scoop install neovim",
            "linux": null,
            "prerequisites": ["GoLang", "Git"]
        }
    ]"#;

    #[test]
    fn parses_both_descriptor_shapes() {
        let entries = parse(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(
            entries[0].installer_for(Platform::Linux),
            Some(&InstallerSpec::Package {
                installer: "apt".to_string(),
                id: "golang-go".to_string(),
            })
        );
        assert_eq!(
            entries[1].installer_for(Platform::Windows),
            Some(&InstallerSpec::Command("scoop install neovim".to_string()))
        );
        assert_eq!(entries[1].installer_for(Platform::Linux), None);
        assert_eq!(entries[1].prerequisites, vec!["GoLang", "Git"]);
    }

    #[test]
    fn missing_fields_become_empty() {
        let entries = parse(r#"[{"name":"GoLang"}]"#).unwrap();
        assert_eq!(entries[0].name, "GoLang");
        assert!(entries[0].windows.is_none());
        assert!(entries[0].linux.is_none());
        assert!(entries[0].prerequisites.is_empty());
    }

    #[test]
    fn unknown_descriptor_shapes_are_kept_opaque() {
        let entries = parse(
            r#"[
                {"name":"GoLang","windows":{"winget":"GoLang.Go"}},
                {"name":"Neovim","linux":["apt","neovim"]},
                {"name":"Rust","linux":{"installer":"apt","id":7}},
                {"name":"Git","windows":true}
            ]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 4);

        let golang = entries[0].installer_for(Platform::Windows).unwrap();
        assert!(matches!(golang, InstallerSpec::Other(_)));
        assert_eq!(golang.to_string(), r#"{"winget":"GoLang.Go"}"#);

        let neovim = entries[1].installer_for(Platform::Linux).unwrap();
        assert!(matches!(neovim, InstallerSpec::Other(_)));
        assert_eq!(neovim.to_string(), r#"["apt","neovim"]"#);

        let rust = entries[2].installer_for(Platform::Linux).unwrap();
        assert!(matches!(rust, InstallerSpec::Other(_)));
        assert!(rust.to_string().contains(r#""id":7"#));

        assert_eq!(
            entries[3].installer_for(Platform::Windows).map(ToString::to_string),
            Some("true".to_string())
        );
    }

    #[test]
    fn missing_name_and_null_prerequisites_become_empty() {
        let entries = parse(
            r#"[{"linux":"apt install go"},{"name":"GoLang","prerequisites":null}]"#,
        )
        .unwrap();

        assert_eq!(entries[0].name, "");
        assert_eq!(
            entries[0].installer_for(Platform::Linux),
            Some(&InstallerSpec::Command("apt install go".to_string()))
        );
        assert_eq!(entries[1].name, "GoLang");
        assert!(entries[1].prerequisites.is_empty());
    }

    #[test]
    fn installer_display() {
        let pkg = InstallerSpec::Package {
            installer: "winget".to_string(),
            id: "GoLang.Go".to_string(),
        };
        assert_eq!(pkg.to_string(), "winget GoLang.Go");
        let bare: InstallerSpec = serde_json::from_str(r#"{"installer":"flatpak"}"#).unwrap();
        assert_eq!(bare.to_string(), "flatpak");
        assert_eq!(
            InstallerSpec::Command("brew install go".to_string()).to_string(),
            "brew install go"
        );
    }

    #[test]
    fn load_reports_read_and_parse_failures() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("apps.json");
        assert!(matches!(load(&missing), Err(TrackerError::Read { .. })));

        std::fs::write(&missing, "{ not json").unwrap();
        assert!(matches!(load(&missing), Err(TrackerError::Parse { .. })));

        std::fs::write(&missing, r#"{"name":"GoLang"}"#).unwrap();
        assert!(matches!(load(&missing), Err(TrackerError::Parse { .. })));
    }

    #[test]
    fn load_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apps.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let names: Vec<String> = load(&path).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["GoLang", "Neovim"]);
    }

    #[test]
    fn find_is_exact_match() {
        let entries = parse(SAMPLE).unwrap();
        assert!(find(&entries, "GoLang").is_some());
        assert!(find(&entries, "golang").is_none());
    }
}
