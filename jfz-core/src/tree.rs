//! Decomposition of JSON values into ordered file/folder trees

use serde_json::Value;

use crate::{classify, sanitize, CancelFlag, ConvertError, Limits, Result, DEFAULT_EXTENSION};

/// Whether a tree node materializes as a directory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Directory entry, originates from an object or array
    Folder,
    /// File entry, originates from a scalar or a synthetic placeholder
    File,
}

/// One node of the generated file/folder tree
///
/// A node is a `File` iff its originating JSON value was a scalar (null,
/// boolean, number, or string), with one exception: an empty object or array
/// becomes a `Folder` holding a single synthetic placeholder `File`
/// (`empty_object.json` / `empty_array.json`), so every folder materializes
/// as a non-empty archive directory.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Sanitized path segment
    pub name: String,
    /// Folder or file
    pub kind: NodeKind,
    /// Originating scalar value, present on `File` nodes only
    pub value: Option<Value>,
    /// Ordered children, present on `Folder` nodes only; order matches the
    /// source JSON (object key order, array index order)
    pub children: Vec<TreeNode>,
    /// Distance from the root, root at 0
    pub depth: usize,
}

impl TreeNode {
    fn folder(name: String, depth: usize) -> Self {
        Self {
            name,
            kind: NodeKind::Folder,
            value: None,
            children: Vec::new(),
            depth,
        }
    }

    fn file(name: String, depth: usize, value: Value) -> Self {
        Self {
            name,
            kind: NodeKind::File,
            value: Some(value),
            children: Vec::new(),
            depth,
        }
    }

    /// Check whether this node is a file
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Count the file nodes in this subtree, placeholders included
    pub fn file_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.is_file() {
                count += 1;
            }
            pending.extend(node.children.iter());
        }
        count
    }
}

/// Placeholder file name inside an empty-object folder
pub const EMPTY_OBJECT_PLACEHOLDER: &str = "empty_object.json";
/// Placeholder file name inside an empty-array folder
pub const EMPTY_ARRAY_PLACEHOLDER: &str = "empty_array.json";

/// Builds a [`TreeNode`] tree from a JSON value
///
/// Total over any valid JSON value: construction cannot fail except through
/// the configured [`Limits`] or a raised [`CancelFlag`]. The builder walks an
/// explicit work-stack rather than recursing, so adversarially deep input
/// trips the depth limit with a clear error instead of exhausting the native
/// call stack.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    default_extension: &'a str,
    name_suffix: Option<&'a str>,
    limits: &'a Limits,
    cancel: Option<&'a CancelFlag>,
}

/// A value waiting to be materialized, with its sanitized segment and parent
struct PendingNode<'v> {
    value: &'v Value,
    segment: String,
    depth: usize,
    parent: Option<usize>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder with the default extension and no suffix or cancel flag
    pub fn new(limits: &'a Limits) -> Self {
        Self {
            default_extension: DEFAULT_EXTENSION,
            name_suffix: None,
            limits,
            cancel: None,
        }
    }

    /// Extension for non-string scalar leaves (default `.json`)
    pub fn default_extension(mut self, ext: &'a str) -> Self {
        self.default_extension = ext;
        self
    }

    /// Suffix inserted between a leaf file's stem and its extension
    ///
    /// Used for timestamped file names; placeholder files keep their fixed
    /// names regardless.
    pub fn name_suffix(mut self, suffix: &'a str) -> Self {
        self.name_suffix = Some(suffix);
        self
    }

    /// Flag consulted at every folder; raising it aborts the build
    pub fn cancel_flag(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Decompose `value` into a tree rooted at `root_name`
    ///
    /// A scalar root yields a single file node named `{root}{extension}`;
    /// a container root yields a folder carrying the whole hierarchy.
    pub fn build(&self, value: &Value, root_name: &str) -> Result<TreeNode> {
        // Flat arena in pre-order; children always carry a higher index than
        // their parent, which the assembly pass below relies on.
        let mut nodes: Vec<Option<TreeNode>> = Vec::new();
        let mut child_indices: Vec<Vec<usize>> = Vec::new();

        let mut stack = vec![PendingNode {
            value,
            segment: sanitize(root_name),
            depth: 0,
            parent: None,
        }];

        while let Some(pending) = stack.pop() {
            if pending.depth > self.limits.max_depth {
                return Err(ConvertError::LimitExceeded(format!(
                    "nesting depth {} exceeds limit {}",
                    pending.depth, self.limits.max_depth
                )));
            }

            match pending.value {
                Value::Object(map) => {
                    self.check_cancelled()?;
                    let index = self.push_node(
                        &mut nodes,
                        &mut child_indices,
                        TreeNode::folder(pending.segment, pending.depth),
                        pending.parent,
                    )?;
                    if map.is_empty() {
                        let placeholder = TreeNode::file(
                            EMPTY_OBJECT_PLACEHOLDER.to_string(),
                            pending.depth + 1,
                            Value::Object(serde_json::Map::new()),
                        );
                        self.push_node(&mut nodes, &mut child_indices, placeholder, Some(index))?;
                    } else {
                        // Reversed so the popped order matches key order.
                        for (key, child) in map.iter().rev() {
                            stack.push(PendingNode {
                                value: child,
                                segment: sanitize(key),
                                depth: pending.depth + 1,
                                parent: Some(index),
                            });
                        }
                    }
                }
                Value::Array(items) => {
                    self.check_cancelled()?;
                    let index = self.push_node(
                        &mut nodes,
                        &mut child_indices,
                        TreeNode::folder(pending.segment, pending.depth),
                        pending.parent,
                    )?;
                    if items.is_empty() {
                        let placeholder = TreeNode::file(
                            EMPTY_ARRAY_PLACEHOLDER.to_string(),
                            pending.depth + 1,
                            Value::Array(Vec::new()),
                        );
                        self.push_node(&mut nodes, &mut child_indices, placeholder, Some(index))?;
                    } else {
                        for (i, child) in items.iter().enumerate().rev() {
                            stack.push(PendingNode {
                                value: child,
                                segment: format!("item_{i:03}"),
                                depth: pending.depth + 1,
                                parent: Some(index),
                            });
                        }
                    }
                }
                scalar => {
                    let leaf = TreeNode::file(
                        self.leaf_name(&pending.segment, scalar),
                        pending.depth,
                        scalar.clone(),
                    );
                    self.push_node(&mut nodes, &mut child_indices, leaf, pending.parent)?;
                }
            }
        }

        self.assemble(nodes, child_indices)
    }

    fn leaf_name(&self, segment: &str, value: &Value) -> String {
        let extension = classify(value, self.default_extension);
        match self.name_suffix {
            Some(suffix) => format!("{segment}{suffix}{extension}"),
            None => format!("{segment}{extension}"),
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(ConvertError::Cancelled);
        }
        Ok(())
    }

    fn push_node(
        &self,
        nodes: &mut Vec<Option<TreeNode>>,
        child_indices: &mut Vec<Vec<usize>>,
        node: TreeNode,
        parent: Option<usize>,
    ) -> Result<usize> {
        if nodes.len() >= self.limits.max_entries {
            return Err(ConvertError::LimitExceeded(format!(
                "tree exceeds {} entries",
                self.limits.max_entries
            )));
        }
        let index = nodes.len();
        nodes.push(Some(node));
        child_indices.push(Vec::new());
        if let Some(parent) = parent {
            child_indices[parent].push(index);
        }
        Ok(index)
    }

    /// Attach children to parents, deepest indices first
    fn assemble(
        &self,
        mut nodes: Vec<Option<TreeNode>>,
        mut child_indices: Vec<Vec<usize>>,
    ) -> Result<TreeNode> {
        for index in (0..nodes.len()).rev() {
            let indices = std::mem::take(&mut child_indices[index]);
            if indices.is_empty() {
                continue;
            }
            let mut children = Vec::with_capacity(indices.len());
            for child_index in indices {
                let child = nodes[child_index]
                    .take()
                    .ok_or_else(|| ConvertError::Internal("tree child consumed twice".into()))?;
                children.push(child);
            }
            match nodes[index].as_mut() {
                Some(parent) => parent.children = children,
                None => {
                    return Err(ConvertError::Internal(
                        "tree parent missing during assembly".into(),
                    ))
                }
            }
        }
        nodes
            .first_mut()
            .and_then(Option::take)
            .ok_or_else(|| ConvertError::Internal("tree produced no root".into()))
    }
}
