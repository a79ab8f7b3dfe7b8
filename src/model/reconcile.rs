use super::catalogue::{self, CatalogueEntry};
use super::record::InstallRecord;

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Names appended as not installed, in catalogue order.
    pub added: Vec<String>,
    /// Records with no catalogue entry. They are kept as-is.
    pub stale: Vec<String>,
    /// Catalogue names seen more than once in this pass.
    pub duplicates: Vec<String>,
}

/// Append a not-installed record for every catalogue app that has none.
///
/// Existing records keep their position and values. Matching is an exact,
/// case-sensitive name comparison against everything already present,
/// including records appended earlier in the same pass.
pub fn reconcile(
    catalogue: &[CatalogueEntry],
    records: &mut Vec<InstallRecord>,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for entry in catalogue {
        if records.iter().any(|record| record.name == entry.name) {
            if report.added.contains(&entry.name) {
                tracing::warn!("duplicate catalogue entry {}", entry.name);
                report.duplicates.push(entry.name.clone());
            }
            continue;
        }
        records.push(InstallRecord::not_installed(entry.name.clone()));
        report.added.push(entry.name.clone());
    }

    report.stale = records
        .iter()
        .filter(|record| catalogue::find(catalogue, &record.name).is_none())
        .map(|record| record.name.clone())
        .collect();

    for name in &report.added {
        tracing::info!("tracking new app {name}");
    }
    for name in &report.stale {
        tracing::warn!("install record {name} has no catalogue entry");
    }

    report
}
