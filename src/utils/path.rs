use std::{
    env,
    path::{Path, PathBuf},
};

pub const BUILD_FILE: &str = "build.gradle.kts";
pub const SETTINGS_FILE: &str = "example/settings.gradle.kts";
pub const CONFIG_FILE: &str = "verbump.toml";

/// Returns the current working directory.
pub fn get_cwd() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns true if the given directory looks like a project root.
/// A `verbump.toml` wins, but a plain `build.gradle.kts` is enough.
pub fn is_project_root(dir: &Path) -> bool {
    dir.join(CONFIG_FILE).is_file() || dir.join(BUILD_FILE).is_file()
}

/// Walks upward from `start` to locate the first directory considered a project root.
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|ancestor| is_project_root(ancestor))
        .map(Path::to_path_buf)
}

/// Joins `rel` onto `root` unless it is already absolute.
pub fn resolve_in(root: &Path, rel: &Path) -> PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

/// Renders a path with forward slashes, for git arguments and log lines.
pub fn to_unix_string<P: AsRef<Path>>(p: P) -> String {
    p.as_ref().to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_root_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BUILD_FILE), "version = \"1.0\"\n").unwrap();
        let nested = dir.path().join("example").join("app");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_project_root_from(&nested).as_deref(),
            Some(dir.path())
        );
    }

    #[test]
    fn nested_build_file_is_a_root_of_its_own() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BUILD_FILE), "").unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join(BUILD_FILE), "").unwrap();

        assert_eq!(find_project_root_from(&app).as_deref(), Some(app.as_path()));
    }

    #[test]
    fn absolute_paths_are_not_rejoined() {
        let root = Path::new("/project");
        assert_eq!(resolve_in(root, Path::new("a/b")), PathBuf::from("/project/a/b"));
        assert_eq!(resolve_in(root, Path::new("/etc/x")), PathBuf::from("/etc/x"));
    }
}
