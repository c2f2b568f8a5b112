use crate::error::{BumpError, Result};
use crate::vcs::Vcs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `git` driven through its command line, run from the project root.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: PathBuf,
}

impl GitCli {
    /// Finds `git` on `PATH`.
    pub fn locate(workdir: &Path) -> Result<Self> {
        let program = which::which("git").map_err(|_| BumpError::GitUnavailable)?;
        Ok(GitCli {
            program,
            workdir: workdir.to_path_buf(),
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.workdir);
        cmd
    }

    fn run(&self, step: &'static str, mut cmd: Command) -> Result<()> {
        let line = describe(&cmd);
        let output = cmd
            .output()
            .map_err(|e| BumpError::subprocess(step, line.clone(), None, e.to_string().as_bytes()))?;
        if !output.status.success() {
            return Err(BumpError::subprocess(
                step,
                line,
                Some(output.status),
                &output.stderr,
            ));
        }
        Ok(())
    }
}

impl Vcs for GitCli {
    fn create_tag(&self, name: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("tag").arg(name);
        self.run("Tagging", cmd)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["tag", "-d"]).arg(name);
        self.run("Deleting tag", cmd)
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("add").arg("--").args(paths);
        self.run("Staging", cmd)
    }

    fn unstage(&self, paths: &[PathBuf]) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["reset", "-q", "--"]).args(paths);
        self.run("Unstaging", cmd)
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["commit", "-m", message]);
        self.run("Committing", cmd)
    }
}

fn describe(cmd: &Command) -> String {
    let mut s = String::from("git");
    for arg in cmd.get_args() {
        s.push(' ');
        let a = arg.to_string_lossy();
        if a.contains(' ') {
            s.push('"');
            s.push_str(&a);
            s.push('"');
        } else {
            s.push_str(&a);
        }
    }
    s
}
