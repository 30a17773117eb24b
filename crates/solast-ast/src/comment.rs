//! Source comments carried on line-level nodes

use serde::{Deserialize, Serialize};

use crate::SourceRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentStyle {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// Where a comment sits relative to the code on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Nothing but whitespace precedes the comment on its line
    Standalone,
    /// The comment follows code on the same line
    Trailing,
}

/// A comment recovered from source text. `text` keeps its delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub src: SourceRange,
    pub text: String,
    pub style: CommentStyle,
    pub placement: Placement,
}

impl Comment {
    pub fn is_standalone(&self) -> bool {
        self.placement == Placement::Standalone
    }
}

/// Comments attached to one node: standalone comments printed on the lines
/// above it, trailing comments printed after it on its last line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<Comment>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.leading.iter().chain(self.trailing.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Comment> {
        self.leading.iter_mut().chain(self.trailing.iter_mut())
    }
}
