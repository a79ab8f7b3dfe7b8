use super::catalogue::{self, CatalogueEntry, Platform};
use super::record::InstallRecord;

pub const PLACEHOLDER_TITLE: &str = "No apps tracked";
pub const PLACEHOLDER_DESCRIPTION: &str = "catalogue is empty";

/// A row in the app list. Rebuilt on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    title: String,
    installed: bool,
    description: String,
}

impl DisplayItem {
    pub fn new(title: impl Into<String>, installed: bool, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            installed,
            description: description.into(),
        }
    }

    pub fn from_record(
        record: &InstallRecord,
        entry: Option<&CatalogueEntry>,
        platform: Platform,
    ) -> Self {
        let mut description = if !record.installed {
            "not installed".to_string()
        } else if record.has_known_version() {
            format!("installed · {}", record.version)
        } else {
            "installed".to_string()
        };

        match entry {
            Some(entry) => {
                match entry.installer_for(platform) {
                    Some(spec) => description.push_str(&format!(" · {spec}")),
                    None => description.push_str(&format!(" · no installer for {}", platform.label())),
                }
                if !entry.prerequisites.is_empty() {
                    description.push_str(&format!(" · needs {}", entry.prerequisites.join(", ")));
                }
            }
            None => description.push_str(" · not in catalogue"),
        }

        Self::new(record.name.clone(), record.installed, description)
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TITLE, false, PLACEHOLDER_DESCRIPTION)
    }

    /// Text the list filter matches against.
    pub fn filter_value(&self) -> &str {
        &self.title
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn installed(&self) -> bool {
        self.installed
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Project the records into list rows. An empty store shows one placeholder.
pub fn items(
    records: &[InstallRecord],
    catalogue: &[CatalogueEntry],
    platform: Platform,
) -> Vec<DisplayItem> {
    if records.is_empty() {
        return vec![DisplayItem::placeholder()];
    }

    records
        .iter()
        .map(|record| {
            DisplayItem::from_record(record, catalogue::find(catalogue, &record.name), platform)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalogue::InstallerSpec;

    fn golang() -> CatalogueEntry {
        CatalogueEntry {
            name: "GoLang".to_string(),
            windows: Some(InstallerSpec::Package {
                installer: "winget".to_string(),
                id: "GoLang.Go".to_string(),
            }),
            linux: None,
            prerequisites: vec!["Git".to_string()],
        }
    }

    #[test]
    fn empty_store_shows_placeholder() {
        let rows = items(&[], &[golang()], Platform::Linux);
        assert_eq!(rows, vec![DisplayItem::placeholder()]);
        assert_eq!(rows[0].title(), PLACEHOLDER_TITLE);
    }

    #[test]
    fn one_row_per_record_in_order() {
        let records = vec![
            InstallRecord::not_installed("Neovim"),
            InstallRecord::not_installed("GoLang"),
        ];
        let rows = items(&records, &[golang()], Platform::Windows);

        let titles: Vec<&str> = rows.iter().map(DisplayItem::title).collect();
        assert_eq!(titles, vec!["Neovim", "GoLang"]);
        assert_eq!(rows[1].filter_value(), "GoLang");
    }

    #[test]
    fn description_shows_status_installer_and_prerequisites() {
        let record = InstallRecord {
            name: "GoLang".to_string(),
            installed: true,
            version: "1.2".to_string(),
        };
        let item = DisplayItem::from_record(&record, Some(&golang()), Platform::Windows);

        assert!(item.installed());
        assert_eq!(item.description(), "installed · 1.2 · winget GoLang.Go · needs Git");
    }

    #[test]
    fn missing_platform_descriptor_falls_back() {
        let record = InstallRecord::not_installed("GoLang");
        let item = DisplayItem::from_record(&record, Some(&golang()), Platform::Linux);

        assert!(!item.installed());
        assert_eq!(item.description(), "not installed · no installer for linux · needs Git");
    }

    #[test]
    fn stale_record_is_marked() {
        let record = InstallRecord::not_installed("Docker");
        let item = DisplayItem::from_record(&record, None, Platform::Linux);
        assert_eq!(item.description(), "not installed · not in catalogue");
    }
}
