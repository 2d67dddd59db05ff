//! Branch reset collaborator.

use crate::cmd::{CmdObj, Runner};
use crate::error::Error;

/// Reset strength, mirroring `git reset --soft|--mixed|--hard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    Soft,
    Mixed,
    Hard,
}

impl ResetMode {
    pub fn flag(self) -> &'static str {
        match self {
            ResetMode::Soft => "--soft",
            ResetMode::Mixed => "--mixed",
            ResetMode::Hard => "--hard",
        }
    }
}

/// Resets the current branch to a reference. Front ends with their own
/// branch manager implement this; [`GitBranchReset`] covers the rest.
pub trait BranchReset {
    fn reset_to_ref(&self, reference: &str, mode: ResetMode) -> Result<(), Error>;
}

/// Runner-backed reset.
pub struct GitBranchReset<R: Runner> {
    runner: R,
}

impl<R: Runner> GitBranchReset<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: Runner> BranchReset for GitBranchReset<R> {
    fn reset_to_ref(&self, reference: &str, mode: ResetMode) -> Result<(), Error> {
        self.runner.run(&CmdObj::git(["reset", mode.flag(), reference]))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<String>>,
    }

    impl Runner for &RecordingRunner {
        fn run(&self, cmd: &CmdObj) -> Result<(), Error> {
            self.calls.borrow_mut().push(cmd.to_string());
            Ok(())
        }
    }

    #[test]
    fn hard_reset_to_head() {
        let runner = RecordingRunner::default();
        GitBranchReset::new(&runner)
            .reset_to_ref("HEAD", ResetMode::Hard)
            .unwrap();
        assert_eq!(*runner.calls.borrow(), vec!["git reset --hard HEAD"]);
    }

    #[test]
    fn soft_reset_to_arbitrary_ref() {
        let runner = RecordingRunner::default();
        GitBranchReset::new(&runner)
            .reset_to_ref("HEAD~2", ResetMode::Soft)
            .unwrap();
        assert_eq!(*runner.calls.borrow(), vec!["git reset --soft HEAD~2"]);
    }
}
