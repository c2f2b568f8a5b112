use crate::error::{BumpError, Result};
use crate::utils::path::{self, BUILD_FILE, CONFIG_FILE, SETTINGS_FILE};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_COMMIT_MESSAGE: &str = "Bump version";
pub const DEFAULT_TAG_PREFIX: &str = "v";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ReleaseSection {
    build_file: Option<String>,
    settings_file: Option<String>,
    commit_message: Option<String>,
    tag_prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct VerbumpTomlDoc {
    release: Option<ReleaseSection>,
}

/// Values given on the command line; `None` defers to the next layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub build_file: Option<PathBuf>,
    pub settings_file: Option<PathBuf>,
    pub commit_message: Option<String>,
    pub tag_prefix: Option<String>,
    pub dry_run: bool,
    pub skip_git: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseConfig {
    pub root: PathBuf,
    /// Relative to `root` unless absolute.
    pub build_file: PathBuf,
    /// Relative to `root` unless absolute.
    pub settings_file: PathBuf,
    pub commit_message: String,
    pub tag_prefix: String,
    pub dry_run: bool,
    pub skip_git: bool,
}

impl ReleaseConfig {
    /// Resolves flags, then environment, then `verbump.toml`, then defaults.
    pub fn resolve<E>(overrides: &Overrides, env: E, cwd: &Path) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let root = overrides
            .root
            .clone()
            .or_else(|| env("VERBUMP_ROOT").map(PathBuf::from))
            .map(|r| path::resolve_in(cwd, &r))
            .or_else(|| path::find_project_root_from(cwd))
            .unwrap_or_else(|| cwd.to_path_buf());

        let section = load_release_section(&root.join(CONFIG_FILE))?;

        let build_file = overrides
            .build_file
            .clone()
            .or_else(|| env("VERBUMP_BUILD_FILE").map(PathBuf::from))
            .or_else(|| section.build_file.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(BUILD_FILE));

        let settings_file = overrides
            .settings_file
            .clone()
            .or_else(|| env("VERBUMP_SETTINGS_FILE").map(PathBuf::from))
            .or_else(|| section.settings_file.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));

        let commit_message = overrides
            .commit_message
            .clone()
            .or(section.commit_message)
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string());
        if commit_message.trim().is_empty() {
            return Err(BumpError::Config {
                path: root.join(CONFIG_FILE),
                message: "commit message must not be empty".into(),
            });
        }

        let tag_prefix = overrides
            .tag_prefix
            .clone()
            .or(section.tag_prefix)
            .unwrap_or_else(|| DEFAULT_TAG_PREFIX.to_string());

        Ok(ReleaseConfig {
            root,
            build_file,
            settings_file,
            commit_message,
            tag_prefix,
            dry_run: overrides.dry_run,
            skip_git: overrides.skip_git,
        })
    }

    pub fn build_path(&self) -> PathBuf {
        path::resolve_in(&self.root, &self.build_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        path::resolve_in(&self.root, &self.settings_file)
    }

    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}

/// Reads a non-empty environment variable.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn load_release_section(config_path: &Path) -> Result<ReleaseSection> {
    if !config_path.is_file() {
        return Ok(ReleaseSection::default());
    }
    let text = fs::read_to_string(config_path).map_err(|e| BumpError::from_io(config_path, e))?;
    let doc: VerbumpTomlDoc = toml::from_str(&text).map_err(|e| BumpError::Config {
        path: config_path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(doc.release.unwrap_or_default())
}
