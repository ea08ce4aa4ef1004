//! Folds a flat list of `/`-separated relative paths into a directory tree.
//!
//! Children keep first-seen order at every level. Each directory keeps a
//! name-to-index map so lookups stay constant time on large uploads.

use devagent_types::FileTreeNode;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Name of the synthetic root directory.
const ROOT_NAME: &str = "root";

enum Slot<P> {
    Dir(usize),
    File(FileTreeNode<P>),
}

struct DirBuilder<P> {
    name: String,
    path: String,
    order: Vec<Slot<P>>,
    subdirs: Vec<DirBuilder<P>>,
    by_name: HashMap<String, usize>,
}

impl<P> DirBuilder<P> {
    fn new(name: String, path: String) -> Self {
        Self {
            name,
            path,
            order: Vec::new(),
            subdirs: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Find or create the child directory `name`, returning its index.
    fn subdir(&mut self, name: &str, path: impl FnOnce() -> String) -> usize {
        if let Some(&idx) = self.by_name.get(name) {
            return idx;
        }
        let idx = self.subdirs.len();
        self.subdirs.push(DirBuilder::new(name.to_string(), path()));
        self.by_name.insert(name.to_string(), idx);
        self.order.push(Slot::Dir(idx));
        idx
    }

    fn finish(self) -> FileTreeNode<P> {
        let mut dirs: Vec<Option<FileTreeNode<P>>> =
            self.subdirs.into_iter().map(|d| Some(d.finish())).collect();

        let children = self
            .order
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Dir(idx) => dirs.get_mut(idx).and_then(Option::take),
                Slot::File(node) => Some(node),
            })
            .collect();

        let mut node = FileTreeNode::directory(self.name, self.path);
        node.children = children;
        node
    }
}

/// Incremental tree builder.
pub struct PathTreeBuilder<P> {
    root: DirBuilder<P>,
    files: usize,
}

impl<P> Default for PathTreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PathTreeBuilder<P> {
    pub fn new() -> Self {
        Self {
            root: DirBuilder::new(ROOT_NAME.to_string(), String::new()),
            files: 0,
        }
    }

    /// Add one file. Every segment but the last names a directory, created on
    /// first reference. The leaf keeps `path` verbatim as its key.
    ///
    /// Files are never merged: inserting the same path twice yields two
    /// leaves. Empty segments (`a//b`, leading or trailing `/`) are ignored,
    /// and a path with no segments at all is skipped.
    pub fn insert(&mut self, path: &str, payload: P) -> &mut Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dirs)) = segments.split_last() else {
            warn!(target: "devagent::tree", "Skipping upload entry with empty path: {:?}", path);
            return self;
        };

        let mut current = &mut self.root;
        for (depth, name) in dirs.iter().enumerate() {
            let idx = current.subdir(name, || segments[..=depth].join("/"));
            current = &mut current.subdirs[idx];
        }

        current
            .order
            .push(Slot::File(FileTreeNode::file(*file_name, path, payload)));
        self.files += 1;
        self
    }

    /// Number of file leaves inserted so far.
    pub fn len(&self) -> usize {
        self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }

    /// Finish building and return the root directory.
    pub fn finish(self) -> FileTreeNode<P> {
        debug!(target: "devagent::tree", "Built tree with {} file(s)", self.files);
        self.root.finish()
    }
}

/// Build a tree from `(path, payload)` pairs in the given order.
pub fn build<K, P>(entries: impl IntoIterator<Item = (K, P)>) -> FileTreeNode<P>
where
    K: AsRef<str>,
{
    let mut builder = PathTreeBuilder::new();
    for (path, payload) in entries {
        builder.insert(path.as_ref(), payload);
    }
    builder.finish()
}
