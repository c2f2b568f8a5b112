use serde::Serialize;

/// What a release run did, or would do on a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseOutcome {
    pub previous_version: String,
    pub next_version: String,
    /// Named after the previous version.
    pub tag: String,
    pub build_file: String,
    pub settings_file: String,
    pub settings_replacements: usize,
    pub dry_run: bool,
    pub files_written: bool,
    pub tagged: bool,
    pub committed: bool,
}
