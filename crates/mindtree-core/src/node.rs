//! Mind map node content and edges.
//!
//! A node is either waiting for the user to type a question
//! ([`NodeContent::Input`]) or holds a question together with the answer that
//! is being streamed into it ([`NodeContent::Answer`]). Answer-only fields are
//! reachable only after matching on the variant.

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// The kind of a node without its payload.
///
/// Anchor offsets and fallback size estimates are defined per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Input,
    Answer,
}

/// A question together with its (possibly partial) answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    question: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<String>>,
}

impl Answer {
    /// Creates an unfinished answer for `question` with no text yet.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Answer text streamed so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true once the answer stream has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Follow-up questions suggested after the answer finished, if any.
    pub fn suggestions(&self) -> Option<&[String]> {
        self.suggestions.as_deref()
    }

    /// Appends a streamed chunk to the answer text.
    pub fn push_chunk(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    /// Marks the answer stream as complete.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = Some(suggestions);
    }

    /// Builder-style variant of [`Answer::push_chunk`] + [`Answer::finish`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mindtree_core::node::Answer;
    ///
    /// let answer = Answer::new("Why is the sky blue?").with_text("Rayleigh scattering.", true);
    /// assert!(answer.is_finished());
    /// assert_eq!(answer.text(), "Rayleigh scattering.");
    /// ```
    pub fn with_text(mut self, text: impl Into<String>, finished: bool) -> Self {
        self.text = text.into();
        self.finished = finished;
        self
    }
}

/// Kind-specific payload of a mind map node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NodeContent {
    /// Awaiting a question from the user.
    Input,
    /// Holds a question and its streamed answer.
    Answer(Answer),
}

impl NodeContent {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Input => NodeKind::Input,
            Self::Answer(_) => NodeKind::Answer,
        }
    }

    /// Number of characters of displayed content used for size estimation.
    ///
    /// Input nodes have no content of their own.
    pub fn content_len(&self) -> usize {
        match self {
            Self::Input => 0,
            Self::Answer(answer) => answer.text().chars().count(),
        }
    }

    pub fn as_answer(&self) -> Option<&Answer> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::Input => None,
        }
    }

    pub fn as_answer_mut(&mut self) -> Option<&mut Answer> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::Input => None,
        }
    }
}

/// Directed parent → child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    source: Id,
    target: Id,
}

impl GraphEdge {
    pub fn new(source: Id, target: Id) -> Self {
        Self { source, target }
    }

    /// The parent end of the edge.
    pub fn source(self) -> Id {
        self.source
    }

    /// The child end of the edge.
    pub fn target(self) -> Id {
        self.target
    }

    /// Returns true if either end of the edge is `id`.
    pub fn touches(self, id: Id) -> bool {
        self.source == id || self.target == id
    }
}
