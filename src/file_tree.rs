//! Directory nodes handed over by the front end's file tree.
//!
//! The tree itself is owned and built by the UI layer; this core only reads
//! it: enumerate the file records under a node, or collect leaf paths
//! matching a predicate.

use crate::file::File;

/// A node in the status file tree: a leaf wrapping one file record, or a
/// directory aggregating children.
#[derive(Debug, Clone, Default)]
pub struct FileNode {
    path: String,
    file: Option<File>,
    children: Vec<FileNode>,
}

impl FileNode {
    pub fn dir(path: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            path: path.into(),
            file: None,
            children,
        }
    }

    pub fn leaf(file: File) -> Self {
        Self {
            path: file.name.clone(),
            file: Some(file),
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    /// Every file record in this subtree, depth first.
    pub fn files(&self) -> Vec<&File> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a File>) {
        if let Some(file) = &self.file {
            out.push(file);
        }
        for child in &self.children {
            child.collect_files(out);
        }
    }

    /// Paths of nodes matching the predicate, depth first.
    pub fn paths_matching<F>(&self, pred: F) -> Vec<String>
    where
        F: Fn(&FileNode) -> bool,
    {
        let mut out = Vec::new();
        self.collect_paths(&pred, &mut out);
        out
    }

    fn collect_paths<F>(&self, pred: &F, out: &mut Vec<String>)
    where
        F: Fn(&FileNode) -> bool,
    {
        if pred(self) {
            out.push(self.path.clone());
        }
        for child in &self.children {
            child.collect_paths(pred, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, tracked: bool) -> File {
        File {
            name: name.into(),
            tracked,
            ..Default::default()
        }
    }

    fn sample_tree() -> FileNode {
        FileNode::dir(
            "dir",
            vec![
                FileNode::leaf(file("dir/a.txt", true)),
                FileNode::dir(
                    "dir/sub",
                    vec![
                        FileNode::leaf(file("dir/sub/b.txt", false)),
                        FileNode::leaf(file("dir/sub/c.txt", true)),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn files_enumerates_leaves_depth_first() {
        let node = sample_tree();
        let names: Vec<&str> = node.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["dir/a.txt", "dir/sub/b.txt", "dir/sub/c.txt"]);
    }

    #[test]
    fn paths_matching_filters_untracked_leaves() {
        let node = sample_tree();
        let untracked = node.paths_matching(|n| n.file().is_some_and(|f| !f.tracked));
        assert_eq!(untracked, vec!["dir/sub/b.txt"]);
    }

    #[test]
    fn directories_do_not_match_leaf_predicates() {
        let node = sample_tree();
        let all = node.paths_matching(|n| n.file().is_some());
        assert!(!all.contains(&"dir".to_string()));
        assert_eq!(all.len(), 3);
    }
}
