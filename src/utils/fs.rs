use crate::error::{BumpError, Result};
use crate::utils::logger::{LogLevel, Logger};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| BumpError::from_io(path, e))
}

/// Writes `contents` to a temp file next to `path`, carrying over the
/// original permissions, without touching `path` yet.
fn stage_sibling(path: &Path, contents: &str) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| BumpError::from_io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| BumpError::from_io(tmp.path(), e))?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| BumpError::from_io(path, e))?;
    }
    Ok(tmp)
}

/// Replaces `path` with `contents` via rename.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = stage_sibling(path, contents)?;
    tmp.persist(path)
        .map_err(|e| BumpError::from_io(path, e.error))?;
    Ok(())
}

struct StagedWrite {
    path: PathBuf,
    original: String,
    contents: String,
}

/// A set of whole-file rewrites that land together or not at all.
///
/// Staging only records the rewrite; nothing touches the disk until `commit`.
#[derive(Default)]
pub struct FileTransaction {
    staged: Vec<StagedWrite>,
}

impl FileTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, path: &Path, original: String, contents: String) {
        self.staged.push(StagedWrite {
            path: path.to_path_buf(),
            original,
            contents,
        });
    }

    /// Writes every staged file next to its target, then renames them all
    /// into place. A failed write leaves every target untouched.
    pub fn commit(self) -> Result<CommittedFiles> {
        self.prepare()?.apply()
    }

    fn prepare(self) -> Result<PreparedTransaction> {
        let mut ready = Vec::with_capacity(self.staged.len());
        for staged in self.staged {
            let tmp = stage_sibling(&staged.path, &staged.contents)?;
            ready.push((staged, tmp));
        }
        Ok(PreparedTransaction { ready })
    }
}

/// Temp files written and waiting to be renamed over their targets.
struct PreparedTransaction {
    ready: Vec<(StagedWrite, NamedTempFile)>,
}

impl PreparedTransaction {
    /// A failed rename restores the targets already replaced before the
    /// error is returned, and logs any restore that failed in turn.
    fn apply(self) -> Result<CommittedFiles> {
        let mut done = CommittedFiles::default();
        for (staged, tmp) in self.ready {
            if let Err(e) = tmp.persist(&staged.path) {
                let err = BumpError::from_io(&staged.path, e.error);
                report_failed_restores(&done.rollback());
                return Err(err);
            }
            done.originals.push((staged.path, staged.original));
        }
        Ok(done)
    }
}

fn report_failed_restores(failures: &[BumpError]) {
    if failures.is_empty() {
        return;
    }
    let lines: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    Logger::new().log_message_with_trace(
        LogLevel::Error,
        "Could not restore files after a failed write; they may still hold the new version",
        refs,
    );
}

/// Original contents of committed files, kept so a later failure can undo them.
#[derive(Debug, Default)]
pub struct CommittedFiles {
    originals: Vec<(PathBuf, String)>,
}

impl CommittedFiles {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.originals.iter().map(|(p, _)| p.as_path())
    }

    /// Restores every file, newest first. Returns the restores that failed.
    pub fn rollback(&self) -> Vec<BumpError> {
        self.originals
            .iter()
            .rev()
            .filter_map(|(path, original)| write_atomic(path, original).err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_replaces_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a1").unwrap();
        fs::write(&b, "b1").unwrap();

        let mut tx = FileTransaction::new();
        tx.stage(&a, "a1".into(), "a2".into());
        tx.stage(&b, "b1".into(), "b2".into());

        // nothing lands before commit
        assert_eq!(fs::read_to_string(&a).unwrap(), "a1");

        let committed = tx.commit().unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "a2");
        assert_eq!(fs::read_to_string(&b).unwrap(), "b2");
        assert_eq!(committed.paths().count(), 2);
    }

    #[test]
    fn rollback_restores_originals() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "before\n").unwrap();

        let mut tx = FileTransaction::new();
        tx.stage(&a, "before\n".into(), "after\n".into());
        let committed = tx.commit().unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "after\n");

        assert!(committed.rollback().is_empty());
        assert_eq!(fs::read_to_string(&a).unwrap(), "before\n");
    }

    #[test]
    fn dropped_transaction_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "x").unwrap();
        {
            let mut tx = FileTransaction::new();
            tx.stage(&a, "x".into(), "y".into());
        }
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(names.len(), 1);
        assert_eq!(fs::read_to_string(&a).unwrap(), "x");
    }

    #[test]
    fn failed_rename_restores_files_already_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let sub = dir.path().join("sub");
        let b = sub.join("b.txt");
        fs::create_dir_all(&sub).unwrap();
        fs::write(&a, "a1\n").unwrap();
        fs::write(&b, "b1\n").unwrap();

        let mut tx = FileTransaction::new();
        tx.stage(&a, "a1\n".into(), "a2\n".into());
        tx.stage(&b, "b1\n".into(), "b2\n".into());
        let prepared = tx.prepare().unwrap();

        // the second target's directory disappears between write and rename
        fs::remove_dir_all(&sub).unwrap();

        let err = prepared.apply().unwrap_err();
        assert!(matches!(err, BumpError::FileNotFound { .. }));
        assert_eq!(fs::read_to_string(&a).unwrap(), "a1\n");
    }

    #[test]
    fn failed_write_touches_no_target() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "a1").unwrap();

        let mut tx = FileTransaction::new();
        tx.stage(&a, "a1".into(), "a2".into());
        tx.stage(&dir.path().join("missing/b.txt"), String::new(), "b2".into());

        assert!(tx.commit().is_err());
        assert_eq!(fs::read_to_string(&a).unwrap(), "a1");
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn read_missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, BumpError::FileNotFound { .. }));
    }
}
