use crate::error::{BumpError, Result};
use crate::utils::{
    fs::{self as ufs, FileTransaction},
    semver,
};
use std::path::Path;

const VERSION_PREFIX: &str = "version = \"";

/// Result of rewriting the version declaration in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRewrite {
    pub old_version: String,
    pub new_version: String,
    pub contents: String,
    /// Further `version = "` lines after the first, left untouched.
    pub ignored_declarations: usize,
}

/// Extracts the version from a `version = "X.Y"` line, if the line is one.
///
/// Returns `Ok(None)` for lines without the prefix.
pub fn parse_version_line(line: &str) -> Result<Option<&str>> {
    let Some(rest) = line.strip_prefix(VERSION_PREFIX) else {
        return Ok(None);
    };
    let body = rest.trim_end();
    body.strip_suffix('"').map(Some).ok_or_else(|| {
        BumpError::invalid_version(line.trim_end(), "version declaration is not closed by '\"'")
    })
}

/// Rewrites the first version declaration of `original`. Every other line,
/// terminator included, is copied through unchanged.
pub fn rewrite_config(original: &str, path: &Path) -> Result<ConfigRewrite> {
    let mut out = String::with_capacity(original.len() + 2);
    let mut versions: Option<(String, String)> = None;
    let mut ignored_declarations = 0;

    for line in original.split_inclusive('\n') {
        if versions.is_some() {
            if line.starts_with(VERSION_PREFIX) {
                ignored_declarations += 1;
            }
            out.push_str(line);
            continue;
        }

        let Some(current) = parse_version_line(line)? else {
            out.push_str(line);
            continue;
        };

        let next = semver::compute_next_version(current)?;
        let terminator = if line.ends_with("\r\n") { "\r\n" } else { "\n" };
        out.push_str(VERSION_PREFIX);
        out.push_str(&next);
        out.push('"');
        out.push_str(terminator);
        versions = Some((current.to_string(), next));
    }

    let (old_version, new_version) = versions.ok_or_else(|| BumpError::MissingVersionLine {
        path: path.to_path_buf(),
    })?;

    Ok(ConfigRewrite {
        old_version,
        new_version,
        contents: out,
        ignored_declarations,
    })
}

/// Reads the build file at `path`, computes its bump and stages the
/// rewrite in `tx`. Nothing is written until `tx` commits.
pub fn stage_config_bump(tx: &mut FileTransaction, path: &Path) -> Result<ConfigRewrite> {
    let original = ufs::read_text(path)?;
    let rewrite = rewrite_config(&original, path)?;
    tx.stage(path, original, rewrite.contents.clone());
    Ok(rewrite)
}

/// Bumps the version declared in the build file at `path`, in place.
/// Returns `(old, new)`.
///
/// A release goes through `stage_config_bump` instead, so the build and
/// settings files land in the same transaction.
#[cfg_attr(not(test), allow(dead_code))]
pub fn bump_config_file(path: &Path) -> Result<(String, String)> {
    let mut tx = FileTransaction::new();
    let rewrite = stage_config_bump(&mut tx, path)?;
    tx.commit()?;
    Ok((rewrite.old_version, rewrite.new_version))
}
