/// Returns the CLI version: `VERBUMP_CLI_VERSION` when set, else the
/// compile-time package version.
pub fn get_version() -> String {
    if let Ok(v) = std::env::var("VERBUMP_CLI_VERSION") {
        if !v.trim().is_empty() {
            return v;
        }
    }

    option_env!("CARGO_PKG_VERSION")
        .unwrap_or("0.0.0")
        .to_string()
}
