use crate::context::ContextValue;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete, validated workflow: the entry node plus its metadata.
///
/// Construction always goes through the document parser, so a `Workflow` in
/// hand is structurally valid and ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    graph: Node,
    metadata: WorkflowMetadata,
}

impl Workflow {
    pub(crate) fn new(graph: Node, metadata: WorkflowMetadata) -> Self {
        Self { graph, metadata }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ValidationError> {
        super::parser::parse_str(raw)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        super::parser::parse_slice(bytes)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        super::parser::parse_file(path.as_ref())
    }

    pub fn graph(&self) -> &Node {
        &self.graph
    }

    pub fn metadata(&self) -> &WorkflowMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One instruction in a workflow graph, tagged by its action or control-flow
/// kind.
///
/// Action nodes chain through `next`; `Conditional` and `Question` fork into
/// branches instead. `Sequence` runs its children to completion (each child's
/// own `next` chain included) before following its own `next`, and `ForEach`
/// re-runs its `next` subtree once per list element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    MoveToPage {
        url: String,
        next: Option<Box<Node>>,
    },
    FillField {
        selector: String,
        value: String,
        next: Option<Box<Node>>,
    },
    ClickButton {
        selector: String,
        next: Option<Box<Node>>,
    },
    SendFile {
        selector: String,
        file_path: String,
        next: Option<Box<Node>>,
    },
    Conditional {
        expression: String,
        branches: Branches,
    },
    Question {
        check: DataCheck,
        branches: Branches,
    },
    Sequence {
        children: Vec<Node>,
        next: Option<Box<Node>>,
    },
    ForEach {
        iterator_key: String,
        next: Option<Box<Node>>,
    },
    Wait {
        duration_ms: u64,
        next: Option<Box<Node>>,
    },
}

impl Node {
    /// The wire-format type tag, as used in documents and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::MoveToPage { .. } => "moveToPage",
            Node::FillField { .. } => "fillField",
            Node::ClickButton { .. } => "clickButton",
            Node::SendFile { .. } => "sendFile",
            Node::Conditional { .. } => "conditional",
            Node::Question { .. } => "question",
            Node::Sequence { .. } => "sequence",
            Node::ForEach { .. } => "forEach",
            Node::Wait { .. } => "wait",
        }
    }
}

/// The two continuations following a branch point. Exactly one arm is selected
/// per evaluation; a missing arm terminates that path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Branches {
    pub yes: Option<Box<Node>>,
    pub no: Option<Box<Node>>,
}

/// A structured check evaluated against the context by a `question` node.
#[derive(Debug, Clone, PartialEq)]
pub struct DataCheck {
    pub data_path: String,
    pub operator: CheckOperator,
    pub expected_value: ContextValue,
}

/// Data-check operators. Documents may carry operators this engine does not
/// know; those load as `Other` and evaluate to false at run time rather than
/// failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOperator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "greaterThan")]
    GreaterThan,
    #[serde(rename = "contains")]
    Contains,
    #[serde(untagged)]
    Other(String),
}
