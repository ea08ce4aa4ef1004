//! File tree types for uploaded project folders.

use serde::{Deserialize, Serialize};

/// Whether a tree node is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// A node of the tree built from a flat upload.
///
/// `path` is the `/`-joined name chain from the root and is the node's
/// external key. The payload is only set on file leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct FileTreeNode<P> {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(default = "Vec::new")]
    pub children: Vec<FileTreeNode<P>>,
    #[serde(skip)]
    pub payload: Option<P>,
}

impl<P> FileTreeNode<P> {
    /// An empty directory node.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
            payload: None,
        }
    }

    /// A file leaf carrying its payload.
    pub fn file(name: impl Into<String>, path: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: Vec::new(),
            payload: Some(payload),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// The node to show as the root of a project view.
    ///
    /// Folder uploads wrap everything in the uploaded folder's own name; when
    /// the root has exactly one child and it is a directory, that child is
    /// returned instead.
    pub fn display_root(&self) -> &FileTreeNode<P> {
        match self.children.as_slice() {
            [only] if only.is_dir() => only,
            _ => self,
        }
    }

    /// Look up a node by its path key.
    pub fn find(&self, path: &str) -> Option<&FileTreeNode<P>> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    /// File leaves, depth-first in child order.
    pub fn files(&self) -> Vec<&FileTreeNode<P>> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a FileTreeNode<P>>) {
        if self.kind == NodeKind::File {
            out.push(self);
        }
        for child in &self.children {
            child.collect_files(out);
        }
    }
}
