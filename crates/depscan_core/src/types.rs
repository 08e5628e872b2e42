use serde::{Deserialize, Serialize};

/// A dependency from the scanned file to a module, with the local binding if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportEdge {
    /// Raw literal between the quotes, unresolved
    pub module_path: String,
    /// `None` for side-effect imports like `import './polyfills'`
    pub binding: Option<String>,
}

impl ImportEdge {
    pub fn new(module_path: impl Into<String>, binding: Option<String>) -> Self {
        Self { module_path: module_path.into(), binding }
    }

    pub fn is_side_effect(&self) -> bool {
        self.binding.is_none()
    }
}

impl From<ImportEdge> for (String, Option<String>) {
    fn from(edge: ImportEdge) -> Self {
        (edge.module_path, edge.binding)
    }
}

impl<S: Into<String>> From<(S, Option<S>)> for ImportEdge {
    fn from((module_path, binding): (S, Option<S>)) -> Self {
        Self { module_path: module_path.into(), binding: binding.map(Into::into) }
    }
}

/// Classification of a single offset within a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Live,
    LineComment,
    BlockComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Half-open byte range `[start, end)` covered by a comment.
///
/// `terminated` is false when the comment runs into the end of the text
/// (a `/*` with no `*/`, or a `//` on the last line); such spans also
/// cover the end-of-text offset itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan {
    pub kind: CommentKind,
    pub start: usize,
    pub end: usize,
    pub terminated: bool,
}

impl CommentSpan {
    pub fn contains(&self, offset: usize) -> bool {
        (self.start <= offset && offset < self.end) || (!self.terminated && offset == self.end)
    }
}
