//! Working-tree mutations: staging, discarding, removal, reset-and-clean,
//! and editor resolution.

use std::path::Path;

use crate::branches::{BranchReset, ResetMode};
use crate::cmd::{CmdObj, Runner, quote};
use crate::config::{GitConfig, UserConfig};
use crate::error::Error;
use crate::file::{File, ShortStatus};
use crate::file_tree::FileNode;
use crate::os::OsOps;
use crate::status::{LoadStatusOpts, StatusLoader};
use crate::submodules::SubmoduleOps;

/// File-level mutation operations on the working tree.
///
/// Given a classified file record or directory node, selects and sequences
/// the git commands that stage, revert, or remove it. All collaborators are
/// injected; every mutation goes through the [`Runner`], so tests can record
/// exactly what would run.
///
/// Operations are synchronous and blocking. Multi-step operations are not
/// transactional: on failure, completed steps stay applied and the error is
/// returned for the user to retry the whole action. Each underlying mutation
/// is idempotent, so a retry is safe.
pub struct WorktreeMgr {
    runner: Box<dyn Runner>,
    statuses: Box<dyn StatusLoader>,
    branches: Box<dyn BranchReset>,
    submodules: Box<dyn SubmoduleOps>,
    os: Box<dyn OsOps>,
    git_config: Box<dyn GitConfig>,
    user_config: UserConfig,
}

impl WorktreeMgr {
    pub fn new(
        runner: Box<dyn Runner>,
        statuses: Box<dyn StatusLoader>,
        branches: Box<dyn BranchReset>,
        submodules: Box<dyn SubmoduleOps>,
        os: Box<dyn OsOps>,
        git_config: Box<dyn GitConfig>,
        user_config: UserConfig,
    ) -> Self {
        Self {
            runner,
            statuses,
            branches,
            submodules,
            os,
            git_config,
            user_config,
        }
    }

    fn run_git<const N: usize>(&self, args: [&str; N]) -> Result<(), Error> {
        self.runner.run(&CmdObj::git(args))
    }

    /// Current status listing, delegated to the injected loader.
    pub fn load_status_files(&self, opts: LoadStatusOpts) -> Vec<File> {
        self.statuses.load(opts)
    }

    /// Command object for launching the configured merge tool.
    pub fn open_merge_tool_cmd_obj(&self) -> CmdObj {
        CmdObj::git(["mergetool"])
    }

    /// Stage a single path.
    pub fn stage_file(&self, path: &str) -> Result<(), Error> {
        self.run_git(["add", "--", path])
    }

    /// Stage every change in the tree.
    pub fn stage_all(&self) -> Result<(), Error> {
        self.run_git(["add", "-A"])
    }

    /// Reset the index to HEAD for all paths.
    pub fn unstage_all(&self) -> Result<(), Error> {
        self.run_git(["reset"])
    }

    /// Unstage each path in order. A rename passes both its old and new name
    /// (see [`File::unstage_names`]). With `reset`, paths are reset to HEAD;
    /// otherwise they are removed from the index with the working copy kept.
    ///
    /// Stops at the first failure; earlier paths stay unstaged. Each
    /// mutation is idempotent, so the caller just retries the whole call.
    pub fn unstage_file(&self, paths: &[&str], reset: bool) -> Result<(), Error> {
        for &path in paths {
            if reset {
                self.run_git(["reset", "HEAD", "--", path])?;
            } else {
                self.run_git(["rm", "--cached", "--force", "--", path])?;
            }
        }
        Ok(())
    }

    /// Split a rename record into its delete half and its add half by
    /// re-fetching the listing with rename detection off.
    fn before_and_after_file_for_rename(&self, file: &File) -> Result<(File, File), Error> {
        let Some(previous_name) = file.previous_name.as_deref().filter(|n| !n.is_empty()) else {
            return Err(Error::RenameResolution("expected a renamed file".into()));
        };

        let listing = self.statuses.load(LoadStatusOpts { no_renames: true });
        let before = listing.iter().find(|f| f.name == previous_name);
        let after = listing.iter().find(|f| f.name == file.name);

        let (Some(before), Some(after)) = (before, after) else {
            return Err(Error::RenameResolution(
                "could not find deleted file or new file for file rename".into(),
            ));
        };

        if before.is_rename() || after.is_rename() {
            // Probably can't happen, but the guard bounds the recursion
            // below at depth one.
            return Err(Error::RenameResolution("nested rename found".into()));
        }

        Ok((before.clone(), after.clone()))
    }

    /// Discard all changes to a file, staged and unstaged.
    ///
    /// What "discard" means depends on the record: a rename is split into
    /// its two halves and each discarded on its own; conflicted paths
    /// re-stage our side or get removed; never-tracked files are deleted
    /// from disk; everything else is reset out of the index if needed and
    /// checked out from HEAD.
    pub fn discard_all_file_changes(&self, file: &File) -> Result<(), Error> {
        if file.is_rename() {
            let (before, after) = self.before_and_after_file_for_rename(file)?;
            self.discard_all_file_changes(&before)?;
            self.discard_all_file_changes(&after)?;
            return Ok(());
        }

        match file.short_status_kind() {
            ShortStatus::BothAdded => {
                self.run_git(["checkout", "--ours", "--", &file.name])?;
                self.run_git(["add", "--", &file.name])
            }
            ShortStatus::DeletedUnmerged => self.run_git(["rm", "--", &file.name]),
            ShortStatus::BothDeleted | ShortStatus::AddedUnmerged => {
                // Nothing is left in the worktree to revert once the index
                // entry is gone.
                if file.has_staged_changes || file.has_merge_conflicts {
                    self.run_git(["reset", "--", &file.name])?;
                }
                Ok(())
            }
            ShortStatus::Other => {
                if file.has_staged_changes || file.has_merge_conflicts {
                    self.run_git(["reset", "--", &file.name])?;
                }
                if file.added {
                    // Unknown to git; deleting the file is the whole discard.
                    return self.os.remove_file(Path::new(&file.name));
                }
                self.discard_unstaged_file_changes(file)
            }
        }
    }

    /// Discard all changes to every file under the node.
    pub fn discard_all_dir_changes(&self, node: &FileNode) -> Result<(), Error> {
        // Per leaf rather than per directory: leaves in mixed states need
        // different commands.
        for file in node.files() {
            self.discard_all_file_changes(file)?;
        }
        Ok(())
    }

    /// Discard unstaged changes under the node.
    ///
    /// Untracked leaves are invisible to checkout and must be deleted from
    /// disk before the directory path is checked out.
    pub fn discard_unstaged_dir_changes(&self, node: &FileNode) -> Result<(), Error> {
        self.remove_untracked_dir_files(node)?;
        self.run_git(["checkout", "--", node.path()])
    }

    fn remove_untracked_dir_files(&self, node: &FileNode) -> Result<(), Error> {
        let untracked = node.paths_matching(|n| n.file().is_some_and(|f| !f.tracked));
        for path in untracked {
            self.os.remove_file(Path::new(&path))?;
        }
        Ok(())
    }

    /// Discard unstaged changes to a single file; the index is untouched.
    pub fn discard_unstaged_file_changes(&self, file: &File) -> Result<(), Error> {
        self.run_git(["checkout", "--", &file.name])
    }

    /// Discard every unstaged change in the working tree.
    pub fn discard_any_unstaged_file_changes(&self) -> Result<(), Error> {
        self.run_git(["checkout", "--", "."])
    }

    /// Recursively remove a path from the index, keeping the working copy.
    pub fn remove_tracked_files(&self, name: &str) -> Result<(), Error> {
        self.run_git(["rm", "-r", "--cached", "--", name])
    }

    /// Delete every untracked file and directory.
    pub fn remove_untracked_files(&self) -> Result<(), Error> {
        self.run_git(["clean", "-fd"])
    }

    /// Reset the current branch hard to HEAD and delete everything
    /// untracked.
    ///
    /// Submodules are stashed and reset first; a hard reset must not run
    /// while they are in an unknown state. Steps fail fast with no
    /// compensating rollback; a hard reset is idempotent, so the user
    /// re-triggers the whole action on error.
    pub fn reset_and_clean(&self) -> Result<(), Error> {
        let submodule_configs = self.submodules.configs()?;
        if !submodule_configs.is_empty() {
            self.submodules.stash_and_reset(&submodule_configs)?;
        }

        self.branches.reset_to_ref("HEAD", ResetMode::Hard)?;

        self.remove_untracked_files()
    }

    /// Append the filename to the ignore file at the tree root.
    pub fn ignore(&self, filename: &str) -> Result<(), Error> {
        self.os
            .append_line_to_file(Path::new(".gitignore"), filename)
    }

    /// Restore a file's content as of the given commit into the working
    /// tree and index, without switching branches.
    pub fn checkout_file(&self, commit_sha: &str, filename: &str) -> Result<(), Error> {
        self.run_git(["checkout", commit_sha, "--", filename])
    }

    /// Resolve the editor and build a shell-mode command opening the file.
    ///
    /// Sources in order, first non-empty wins: user config `edit_command`,
    /// git config `core.editor`, `$GIT_EDITOR`, `$VISUAL`, `$EDITOR`, then a
    /// `which vi` probe through the runner. Later sources are not consulted
    /// once one resolves.
    pub fn edit_file_cmd_obj(&self, filename: &str) -> Result<CmdObj, Error> {
        let editor = self
            .user_config
            .edit_command
            .clone()
            .filter(|e| !e.is_empty())
            .or_else(|| self.git_config.get("core.editor").filter(|e| !e.is_empty()))
            .or_else(|| self.env_editor("GIT_EDITOR"))
            .or_else(|| self.env_editor("VISUAL"))
            .or_else(|| self.env_editor("EDITOR"))
            .or_else(|| self.probe_vi());

        let Some(editor) = editor else {
            return Err(Error::NoEditorConfigured);
        };

        // Shell mode: the editor value may carry its own flags.
        Ok(CmdObj::shell(format!("{} {}", editor, quote(filename))))
    }

    fn env_editor(&self, key: &str) -> Option<String> {
        self.os.env_var(key).filter(|v| !v.is_empty())
    }

    fn probe_vi(&self) -> Option<String> {
        self.runner
            .run(&CmdObj::new(["which", "vi"]))
            .ok()
            .map(|_| "vi".to_string())
    }
}
