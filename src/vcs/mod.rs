pub mod git;

use crate::error::Result;
use std::path::PathBuf;

/// The version-control operations a release needs, including the ones
/// used to undo a partially applied release.
pub trait Vcs {
    fn create_tag(&self, name: &str) -> Result<()>;
    fn delete_tag(&self, name: &str) -> Result<()>;
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;
    fn unstage(&self, paths: &[PathBuf]) -> Result<()>;
    fn commit(&self, message: &str) -> Result<()>;
}
