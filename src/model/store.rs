use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::record::InstallRecord;
use crate::error::TrackerError;

/// Content of a freshly created state file.
pub const EMPTY_STATE: &str = "[]";

/// The per-user install state file and the directory that holds it.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
    path: PathBuf,
}

impl StateStore {
    pub fn new(dir: PathBuf, file_name: &str) -> Self {
        let path = dir.join(file_name);
        Self { dir, path }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the directory and the state file exist. Existing content is
    /// never touched.
    pub fn prepare(&self) -> Result<(), TrackerError> {
        let dir = self.dir();
        if ensure_directory(dir)? {
            tracing::info!("created state directory {}", dir.display());
        } else {
            tracing::info!("state directory already exists: {}", dir.display());
        }

        if ensure_file(&self.path, EMPTY_STATE)? {
            tracing::info!("created state file {}", self.path.display());
        } else {
            tracing::info!("state file already exists: {}", self.path.display());
        }

        Ok(())
    }

    pub fn load(&self) -> Result<Vec<InstallRecord>, TrackerError> {
        load(&self.path)
    }

    pub fn save(&self, records: &[InstallRecord]) -> Result<(), TrackerError> {
        save(&self.path, records)
    }
}

/// Create `path` as a directory when it is absent. Returns whether it was
/// created.
pub fn ensure_directory(path: &Path) -> Result<bool, TrackerError> {
    if path.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(path).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Create `path` with `default` content when it is absent. Returns whether it
/// was created.
pub fn ensure_file(path: &Path, default: &str) -> Result<bool, TrackerError> {
    let io_err = |source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(io_err(err)),
    };

    file.write_all(default.as_bytes()).map_err(io_err)?;
    Ok(true)
}

/// Read the install records, in file order.
pub fn load(path: &Path) -> Result<Vec<InstallRecord>, TrackerError> {
    let raw = fs::read_to_string(path).map_err(|source| TrackerError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<InstallRecord> =
        serde_json::from_str(&raw).map_err(|source| TrackerError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!("loaded {} install records from {}", records.len(), path.display());
    Ok(records)
}

/// Overwrite the state file with every record, indented by four spaces.
pub fn save(path: &Path, records: &[InstallRecord]) -> Result<(), TrackerError> {
    let data = to_pretty_json(records).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source: io::Error::other(source),
    })?;

    fs::write(path, data).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("wrote {} install records to {}", records.len(), path.display());
    Ok(())
}

fn to_pretty_json(records: &[InstallRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut ser)?;
    Ok(out)
}
