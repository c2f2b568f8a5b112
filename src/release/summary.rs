use crate::types::release::ReleaseOutcome;
use crate::utils::logger::{LogLevel, Logger};

pub fn print_release_summary(outcome: &ReleaseOutcome) {
    let logger = Logger::new();

    let headline = if outcome.dry_run {
        format!(
            "🔎 Dry run: {} -> {} (nothing written)",
            outcome.previous_version, outcome.next_version
        )
    } else {
        format!(
            "🚀 Released {} -> {}",
            outcome.previous_version, outcome.next_version
        )
    };

    let mut lines: Vec<String> = vec![
        format!("Build file : {}", outcome.build_file),
        format!(
            "Settings   : {} ({} fragment(s))",
            outcome.settings_file, outcome.settings_replacements
        ),
    ];
    if outcome.tagged {
        lines.push(format!("Tag        : {}", outcome.tag));
    } else if outcome.dry_run {
        lines.push(format!("Tag        : {} (planned)", outcome.tag));
    }
    if outcome.committed {
        lines.push("Commit     : created".to_string());
    }

    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    logger.log_message_with_trace(LogLevel::Success, &headline, refs);
}

/// Machine-readable form, printed with `--json`.
pub fn render_json(outcome: &ReleaseOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
