use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run before (or while) the state file is written.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("cannot read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot create or write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine home directory")]
    HomeDir,

    #[error("invalid config {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid log level {level:?}")]
    LogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

impl TrackerError {
    /// Process exit status for this failure, following sysexits.h.
    pub fn exit_code(&self) -> u8 {
        match self {
            TrackerError::Parse { .. } => 65,
            TrackerError::Read { .. } => 66,
            TrackerError::Io { .. } => 74,
            TrackerError::HomeDir | TrackerError::Config { .. } | TrackerError::LogLevel { .. } => {
                78
            }
        }
    }
}

/// Exit status for any error reaching `main`. Terminal and UI failures are 1.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TrackerError>())
        .map(TrackerError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> serde_json::Error {
        serde_json::from_str::<Vec<String>>("{").unwrap_err()
    }

    #[test]
    fn each_category_has_its_own_exit_code() {
        let read = TrackerError::Read {
            path: PathBuf::from("apps.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let parse = TrackerError::Parse {
            path: PathBuf::from("apps.json"),
            source: parse_error(),
        };
        let write = TrackerError::Io {
            path: PathBuf::from("nk-apps.json"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };

        assert_eq!(read.exit_code(), 66);
        assert_eq!(parse.exit_code(), 65);
        assert_eq!(write.exit_code(), 74);
        assert_eq!(TrackerError::HomeDir.exit_code(), 78);
    }

    #[test]
    fn exit_code_survives_anyhow_context() {
        let err = anyhow::Error::new(TrackerError::Parse {
            path: PathBuf::from("nk-apps.json"),
            source: parse_error(),
        })
        .context("loading install records");
        assert_eq!(exit_code_for(&err), 65);

        let other = anyhow::anyhow!("terminal went away");
        assert_eq!(exit_code_for(&other), 1);
    }

    #[test]
    fn message_names_the_path() {
        let err = TrackerError::Read {
            path: PathBuf::from("../apps.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("cannot read ../apps.json"));
    }
}
