use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BumpError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid version format '{value}': {reason}")]
    InvalidVersionFormat { value: String, reason: String },

    #[error("No `version = \"...\"` declaration found in {}", .path.display())]
    MissingVersionLine { path: PathBuf },

    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("git executable not found in PATH")]
    GitUnavailable,

    #[error("{step} failed: `{command}` ({status}){}", format_stderr(.stderr))]
    Subprocess {
        step: &'static str,
        command: String,
        status: String,
        stderr: String,
    },
}

impl BumpError {
    /// Maps an I/O error on `path` to the most specific variant.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => BumpError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => BumpError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => BumpError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn invalid_version(value: &str, reason: impl Into<String>) -> Self {
        BumpError::InvalidVersionFormat {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn subprocess(
        step: &'static str,
        command: String,
        status: Option<ExitStatus>,
        stderr: &[u8],
    ) -> Self {
        let status = match status {
            Some(s) => s.to_string(),
            None => "no status (failed to spawn)".to_string(),
        };
        BumpError::Subprocess {
            step,
            command,
            status,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

pub type Result<T> = std::result::Result<T, BumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_file_not_found() {
        let err = BumpError::from_io(
            Path::new("build.gradle.kts"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, BumpError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: build.gradle.kts");
    }

    #[test]
    fn io_permission_maps_to_permission_denied() {
        let err = BumpError::from_io(
            Path::new("x"),
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, BumpError::PermissionDenied { .. }));
    }

    #[test]
    fn subprocess_message_names_step_and_stderr() {
        let err = BumpError::subprocess(
            "Tagging",
            "git tag v1.0".into(),
            None,
            b"fatal: tag 'v1.0' already exists\n",
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Tagging failed: `git tag v1.0`"));
        assert!(msg.ends_with("fatal: tag 'v1.0' already exists"));
    }
}
