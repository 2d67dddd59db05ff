//! File records produced by the status loader.

/// A tracked or untracked path with its status classification.
///
/// `short_status` is the two-character (index, worktree) code from the
/// porcelain status listing, e.g. `"AA"`, `"DU"`, `" M"`, `"??"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub name: String,
    /// Set and non-empty iff this record represents a detected rename.
    pub previous_name: Option<String>,
    pub short_status: String,
    pub has_staged_changes: bool,
    pub has_merge_conflicts: bool,
    /// Newly added; not yet known to version control.
    pub added: bool,
    pub tracked: bool,
}

impl File {
    pub fn is_rename(&self) -> bool {
        self.previous_name.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Names to unstage for this record: a rename requires unstaging both
    /// the old and the new path.
    pub fn unstage_names(&self) -> Vec<&str> {
        match self.previous_name.as_deref().filter(|n| !n.is_empty()) {
            Some(previous) => vec![previous, &self.name],
            None => vec![&self.name],
        }
    }

    pub fn short_status_kind(&self) -> ShortStatus {
        ShortStatus::from_code(&self.short_status)
    }
}

/// Tagged view of the short-status codes that change discard semantics.
///
/// One arm per (index, worktree) combination keeps the decision table
/// auditable; a new combination is a new variant plus a match arm, nothing
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortStatus {
    /// `AA`: added on both sides of a merge.
    BothAdded,
    /// `DU`: deleted by us, unmerged.
    DeletedUnmerged,
    /// `DD`: deleted on both sides.
    BothDeleted,
    /// `AU`: added by us, unmerged.
    AddedUnmerged,
    /// Any other combination.
    Other,
}

impl ShortStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "AA" => ShortStatus::BothAdded,
            "DU" => ShortStatus::DeletedUnmerged,
            "DD" => ShortStatus::BothDeleted,
            "AU" => ShortStatus::AddedUnmerged,
            _ => ShortStatus::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("AA", ShortStatus::BothAdded)]
    #[case("DU", ShortStatus::DeletedUnmerged)]
    #[case("DD", ShortStatus::BothDeleted)]
    #[case("AU", ShortStatus::AddedUnmerged)]
    #[case(" M", ShortStatus::Other)]
    #[case("??", ShortStatus::Other)]
    #[case("", ShortStatus::Other)]
    fn short_status_codes(#[case] code: &str, #[case] expected: ShortStatus) {
        assert_eq!(ShortStatus::from_code(code), expected);
    }

    #[test]
    fn empty_previous_name_is_not_a_rename() {
        let file = File {
            name: "a.txt".into(),
            previous_name: Some(String::new()),
            ..Default::default()
        };
        assert!(!file.is_rename());
        assert_eq!(file.unstage_names(), vec!["a.txt"]);
    }

    #[test]
    fn rename_unstages_both_names_old_first() {
        let file = File {
            name: "new.txt".into(),
            previous_name: Some("old.txt".into()),
            ..Default::default()
        };
        assert!(file.is_rename());
        assert_eq!(file.unstage_names(), vec!["old.txt", "new.txt"]);
    }
}
