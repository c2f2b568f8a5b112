use crate::error::Result;
use crate::utils::fs::{self as ufs, FileTransaction};
use std::path::Path;

/// Result of replacing version path fragments in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRewrite {
    pub contents: String,
    pub replacements: usize,
}

fn fragment(version: &str) -> String {
    format!("/v{}/", version)
}

/// Replaces every `/v<old>/` in `original` with `/v<new>/`.
pub fn rewrite_settings(original: &str, old_version: &str, new_version: &str) -> SettingsRewrite {
    let needle = fragment(old_version);
    let replacements = original.matches(&needle).count();
    let contents = if replacements == 0 {
        original.to_string()
    } else {
        original.replace(&needle, &fragment(new_version))
    };
    SettingsRewrite {
        contents,
        replacements,
    }
}

/// Reads the settings file at `path` and stages its fragment rewrite in
/// `tx`. Nothing is written until `tx` commits.
pub fn stage_settings_update(
    tx: &mut FileTransaction,
    path: &Path,
    old_version: &str,
    new_version: &str,
) -> Result<SettingsRewrite> {
    let original = ufs::read_text(path)?;
    let rewrite = rewrite_settings(&original, old_version, new_version);
    tx.stage(path, original, rewrite.contents.clone());
    Ok(rewrite)
}

/// Rewrites the settings file at `path` in place. Returns the number of
/// fragments replaced.
///
/// A release goes through `stage_settings_update` instead, so the build and
/// settings files land in the same transaction.
#[cfg_attr(not(test), allow(dead_code))]
pub fn update_settings_file(path: &Path, old_version: &str, new_version: &str) -> Result<usize> {
    let mut tx = FileTransaction::new();
    let rewrite = stage_settings_update(&mut tx, path, old_version, new_version)?;
    tx.commit()?;
    Ok(rewrite.replacements)
}
