//! Command objects and their execution.
//!
//! Every filesystem/VCS mutation in this crate is expressed as a [`CmdObj`]
//! and handed to a [`Runner`]. The real runner executes argv commands
//! directly and shell-mode commands through the platform shell:
//! - Unix: `sh -c`
//! - Windows: Git Bash, located by deriving `bash.exe` from the git
//!   installation (nearly universal on Windows since git itself is required)

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::Error;

/// A command line plus its execution mode.
///
/// Constructed by this crate, executed by a [`Runner`], never retained
/// afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdObj {
    /// Argument vector, exec'd directly without shell interpretation.
    Direct(Vec<String>),
    /// Raw command line interpreted by the platform shell. Needed when the
    /// program itself comes from a config value or environment variable.
    Shell(String),
}

impl CmdObj {
    /// Build a direct command from argument parts. The first part is the
    /// program name.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = args.into_iter().map(Into::into).collect();
        debug_assert!(!argv.is_empty());
        CmdObj::Direct(argv)
    }

    /// Build a `git <args>` direct command.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = vec!["git".to_string()];
        argv.extend(args.into_iter().map(Into::into));
        CmdObj::Direct(argv)
    }

    /// Build a shell-mode command from a raw line.
    pub fn shell(line: impl Into<String>) -> Self {
        CmdObj::Shell(line.into())
    }
}

impl fmt::Display for CmdObj {
    /// Rendered for logging and test journals; not re-parsed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmdObj::Direct(argv) => write!(f, "{}", argv.join(" ")),
            CmdObj::Shell(line) => write!(f, "{}", line),
        }
    }
}

/// Quote a value for inclusion in a shell-mode command line.
///
/// Shell-mode commands run through a POSIX shell on every platform (Git
/// Bash on Windows), so POSIX quoting applies unconditionally.
pub fn quote(s: &str) -> String {
    shell_escape::unix::escape(Cow::from(s)).into_owned()
}

/// Executes command objects.
///
/// The front end substitutes a recording implementation in tests; every
/// mutation this crate issues goes through here.
pub trait Runner {
    fn run(&self, cmd: &CmdObj) -> Result<(), Error>;
}

/// Real executor: spawns processes rooted at the working-tree directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn command_for(cmd: &CmdObj) -> Command {
        match cmd {
            CmdObj::Direct(argv) => {
                let mut command = Command::new(&argv[0]);
                command.args(&argv[1..]);
                command
            }
            CmdObj::Shell(line) => shell_command(line),
        }
    }
}

impl Runner for ProcessRunner {
    fn run(&self, cmd: &CmdObj) -> Result<(), Error> {
        log::debug!("running: {}", cmd);

        let output = Self::command_for(cmd)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| Error::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(stderr.trim().to_string()));
        }

        Ok(())
    }
}

#[cfg(unix)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new(git_bash());
    command.arg("-c").arg(line);
    command
}

/// Locate Git Bash by deriving `bash.exe` from the git installation.
///
/// `which bash` is avoided: on systems with WSL, `C:\Windows\System32\bash.exe`
/// (the WSL launcher) often comes before Git Bash in PATH.
#[cfg(windows)]
fn git_bash() -> PathBuf {
    if let Ok(git_path) = which::which("git") {
        // git.exe is typically at Git/cmd/git.exe or Git/bin/git.exe
        if let Some(git_dir) = git_path.parent().and_then(|p| p.parent()) {
            for candidate in [
                git_dir.join("bin").join("bash.exe"),
                git_dir.join("usr").join("bin").join("bash.exe"),
            ] {
                if candidate.exists() {
                    return candidate;
                }
            }
        }
    }

    // Standard Git for Windows path, for environments where git isn't on PATH
    PathBuf::from(r"C:\Program Files\Git\bin\bash.exe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_constructor_prepends_program() {
        let cmd = CmdObj::git(["add", "-A"]);
        assert_eq!(
            cmd,
            CmdObj::Direct(vec!["git".into(), "add".into(), "-A".into()])
        );
    }

    #[test]
    fn display_joins_direct_argv() {
        let cmd = CmdObj::git(["checkout", "--", "a.txt"]);
        assert_eq!(cmd.to_string(), "git checkout -- a.txt");
    }

    #[test]
    fn display_shows_shell_line_raw() {
        let cmd = CmdObj::shell("vim 'a file.txt'");
        assert_eq!(cmd.to_string(), "vim 'a file.txt'");
    }

    #[test]
    fn quote_wraps_values_with_spaces() {
        assert_eq!(quote("a file.txt"), "'a file.txt'");
    }

    #[test]
    fn quote_leaves_plain_values_alone() {
        assert_eq!(quote("a.txt"), "a.txt");
    }
}
