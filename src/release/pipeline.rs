use crate::config::ReleaseConfig;
use crate::error::{BumpError, Result};
use crate::release::config_file::{self, ConfigRewrite};
use crate::release::settings_file::{self, SettingsRewrite};
use crate::types::release::ReleaseOutcome;
use crate::utils::{
    fs::{CommittedFiles, FileTransaction},
    logger::{LogLevel, Logger},
    path::to_unix_string,
    spinner,
};
use crate::vcs::Vcs;
use std::path::PathBuf;

/// Git steps that have landed so far, so a failure can undo exactly those.
#[derive(Debug, Default)]
pub struct GitProgress {
    pub tagged: bool,
    pub staged: bool,
    pub committed: bool,
}

/// Runs a full release: bump the build file, rewrite the settings file,
/// tag the previous version, then stage and commit both files.
///
/// `vcs` may be `None` only for dry runs or when git is skipped.
pub fn run_release(config: &ReleaseConfig, vcs: Option<&dyn Vcs>) -> Result<ReleaseOutcome> {
    let logger = Logger::new();
    let build_path = config.build_path();
    let settings_path = config.settings_path();

    let needs_git = !config.dry_run && !config.skip_git;
    let vcs = match (needs_git, vcs) {
        (true, None) => return Err(BumpError::GitUnavailable),
        (_, vcs) => vcs,
    };

    let mut tx = FileTransaction::new();

    let config_rw: ConfigRewrite = spinner::run_step(
        &format!("Reading {}", build_path.display()),
        |rw: &ConfigRewrite| format!("✅ {} -> {}", rw.old_version, rw.new_version),
        || config_file::stage_config_bump(&mut tx, &build_path),
    )?;
    if config_rw.ignored_declarations > 0 {
        logger.log_message(
            LogLevel::Warning,
            &format!(
                "{} further `version = \"` line(s) in {} left unchanged",
                config_rw.ignored_declarations,
                to_unix_string(&config.build_file)
            ),
        );
    }

    let settings_rw: SettingsRewrite = spinner::run_step(
        &format!("Reading {}", settings_path.display()),
        |rw: &SettingsRewrite| format!("{} fragment(s) to rewrite", rw.replacements),
        || {
            settings_file::stage_settings_update(
                &mut tx,
                &settings_path,
                &config_rw.old_version,
                &config_rw.new_version,
            )
        },
    )?;
    if settings_rw.replacements == 0 {
        logger.log_message(
            LogLevel::Warning,
            &format!(
                "No /v{}/ fragment in {}, file left as is",
                config_rw.old_version,
                to_unix_string(&config.settings_file)
            ),
        );
    }

    let mut outcome = ReleaseOutcome {
        previous_version: config_rw.old_version.clone(),
        next_version: config_rw.new_version.clone(),
        tag: config.tag_name(&config_rw.old_version),
        build_file: to_unix_string(&config.build_file),
        settings_file: to_unix_string(&config.settings_file),
        settings_replacements: settings_rw.replacements,
        dry_run: config.dry_run,
        files_written: false,
        tagged: false,
        committed: false,
    };

    if config.dry_run {
        logger.log_message(LogLevel::Info, "Dry run: no files written, git not invoked");
        return Ok(outcome);
    }

    let committed_files = spinner::run_step(
        "Writing build and settings files",
        |_| "Files updated".to_string(),
        || tx.commit(),
    )?;
    outcome.files_written = true;

    let Some(vcs) = vcs.filter(|_| needs_git) else {
        return Ok(outcome);
    };

    let paths = vec![config.build_file.clone(), config.settings_file.clone()];
    let mut progress = GitProgress::default();
    if let Err(err) = tag_and_commit(vcs, config, &config_rw.old_version, &paths, &mut progress) {
        roll_back(vcs, &committed_files, &outcome.tag, &paths, &progress);
        return Err(err);
    }
    outcome.tagged = progress.tagged;
    outcome.committed = progress.committed;

    Ok(outcome)
}

/// Tags `old_version` and commits `paths`, recording each step that succeeds.
pub fn tag_and_commit(
    vcs: &dyn Vcs,
    config: &ReleaseConfig,
    old_version: &str,
    paths: &[PathBuf],
    progress: &mut GitProgress,
) -> Result<()> {
    let tag = config.tag_name(old_version);

    spinner::run_unit_step(
        &format!("Creating tag {}", tag),
        &format!("Tagged {}", tag),
        || vcs.create_tag(&tag),
    )?;
    progress.tagged = true;

    spinner::run_unit_step("Staging changes", "Changes staged", || vcs.stage(paths))?;
    progress.staged = true;

    spinner::run_unit_step(
        "Committing",
        &format!("Committed \"{}\"", config.commit_message),
        || vcs.commit(&config.commit_message),
    )?;
    progress.committed = true;

    Ok(())
}

/// Undoes whatever `progress` says landed, then restores both files.
/// Failures here are logged, not returned; the original error wins.
fn roll_back(
    vcs: &dyn Vcs,
    files: &CommittedFiles,
    tag: &str,
    paths: &[PathBuf],
    progress: &GitProgress,
) {
    let mut problems: Vec<String> = Vec::new();

    if progress.staged {
        if let Err(e) = vcs.unstage(paths) {
            problems.push(e.to_string());
        }
    }
    if progress.tagged {
        if let Err(e) = vcs.delete_tag(tag) {
            problems.push(e.to_string());
        }
    }
    problems.extend(files.rollback().into_iter().map(|e| e.to_string()));

    let logger = Logger::new();
    if problems.is_empty() {
        let restored: Vec<String> = files.paths().map(to_unix_string).collect();
        logger.log_message(
            LogLevel::Warning,
            &format!("Rolled back release changes ({})", restored.join(", ")),
        );
    } else {
        let refs: Vec<&str> = problems.iter().map(|s| s.as_str()).collect();
        logger.log_message_with_trace(LogLevel::Error, "Rollback incomplete", refs);
    }
}
