//! Submodule collaborator: configuration listing and stash-and-reset.

use std::path::PathBuf;

use crate::cmd::{CmdObj, Runner};
use crate::error::Error;

/// One `[submodule "<name>"]` stanza from `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleConfig {
    pub name: String,
    pub path: String,
    pub url: String,
}

/// The reset orchestrator only checks the config list for non-emptiness and
/// forwards it back into `stash_and_reset`.
pub trait SubmoduleOps {
    fn configs(&self) -> Result<Vec<SubmoduleConfig>, Error>;
    fn stash_and_reset(&self, configs: &[SubmoduleConfig]) -> Result<(), Error>;
}

/// Parse `.gitmodules` content into submodule configs.
///
/// Stanzas without a `path` entry are dropped; there is nothing to stash or
/// reset for them.
pub fn parse_gitmodules(text: &str) -> Vec<SubmoduleConfig> {
    let mut configs = Vec::new();
    let mut current: Option<SubmoduleConfig> = None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(name) = line
            .strip_prefix("[submodule \"")
            .and_then(|rest| rest.strip_suffix("\"]"))
        {
            if let Some(done) = current.take().filter(|c| !c.path.is_empty()) {
                configs.push(done);
            }
            current = Some(SubmoduleConfig {
                name: name.to_string(),
                path: String::new(),
                url: String::new(),
            });
            continue;
        }

        let Some(config) = current.as_mut() else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "path" => config.path = value.trim().to_string(),
                "url" => config.url = value.trim().to_string(),
                _ => {}
            }
        }
    }

    if let Some(done) = current.take().filter(|c| !c.path.is_empty()) {
        configs.push(done);
    }

    configs
}

/// Runner-backed submodule operations rooted at the working-tree directory.
pub struct GitSubmoduleOps<R: Runner> {
    runner: R,
    root: PathBuf,
}

impl<R: Runner> GitSubmoduleOps<R> {
    pub fn new(runner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }
}

impl<R: Runner> SubmoduleOps for GitSubmoduleOps<R> {
    fn configs(&self) -> Result<Vec<SubmoduleConfig>, Error> {
        let path = self.root.join(".gitmodules");
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(parse_gitmodules(&text))
    }

    /// Stash each submodule's local changes, then force-update them all back
    /// to the superproject's recorded commits.
    fn stash_and_reset(&self, configs: &[SubmoduleConfig]) -> Result<(), Error> {
        for config in configs {
            self.runner.run(&CmdObj::git([
                "-C",
                &config.path,
                "stash",
                "--include-untracked",
            ]))?;
        }

        self.runner
            .run(&CmdObj::git(["submodule", "update", "--init", "--force"]))
    }
}
