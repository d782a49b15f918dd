//! Wire-format documents and their lowering into the canonical typed model.
//!
//! A workflow file is first deserialized into permissive document structs in
//! which every node field is optional, then lowered node by node into [`Node`]
//! variants. Lowering enforces the per-type structural requirements and tracks
//! the position of the node under inspection, so a malformed node anywhere in
//! a branch, sequence, or `next` chain is reported with its path.

use super::definition::{Branches, CheckOperator, DataCheck, Node, Workflow, WorkflowMetadata};
use crate::context::ContextValue;
use crate::error::ValidationError;
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct WorkflowDocument {
    graph: Option<NodeDocument>,
    #[serde(default)]
    metadata: WorkflowMetadata,
}

/// A node as it appears on the wire. Fields irrelevant to the node's type are
/// ignored during lowering.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDocument {
    node_type: Option<String>,
    url: Option<String>,
    selector: Option<String>,
    value: Option<String>,
    file_path: Option<String>,
    condition_expression: Option<String>,
    branches: Option<BranchesDocument>,
    check: Option<DataCheckDocument>,
    sequence: Option<Vec<NodeDocument>>,
    data_source_iterator_param: Option<String>,
    duration: Option<i64>,
    next: Option<Box<NodeDocument>>,
}

#[derive(Debug, Deserialize)]
struct BranchesDocument {
    yes: Option<Box<NodeDocument>>,
    no: Option<Box<NodeDocument>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataCheckDocument {
    data_path: Option<String>,
    operator: Option<CheckOperator>,
    expected_value: Option<ContextValue>,
}

pub(crate) fn parse_str(raw: &str) -> Result<Workflow, ValidationError> {
    let document: WorkflowDocument =
        serde_json::from_str(raw).map_err(|e| ValidationError::Json(e.to_string()))?;
    lower_document(document)
}

pub(crate) fn parse_slice(bytes: &[u8]) -> Result<Workflow, ValidationError> {
    let document: WorkflowDocument =
        serde_json::from_slice(bytes).map_err(|e| ValidationError::Json(e.to_string()))?;
    lower_document(document)
}

pub(crate) fn parse_file(path: &Path) -> Result<Workflow, ValidationError> {
    let raw = fs::read_to_string(path).map_err(|e| ValidationError::Io(e.to_string()))?;
    parse_str(&raw)
}

fn lower_document(document: WorkflowDocument) -> Result<Workflow, ValidationError> {
    let graph = document.graph.ok_or(ValidationError::MissingGraph)?;
    let mut path = NodePath::root();
    let graph = lower_node(graph, &mut path)?;
    Ok(Workflow::new(graph, document.metadata))
}

/// Tracks where in the document the lowering currently is, for error reports.
struct NodePath(Vec<String>);

impl NodePath {
    fn root() -> Self {
        Self(vec!["graph".to_string()])
    }

    fn render(&self) -> String {
        self.0.iter().join(".")
    }

    fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

fn lower_node(document: NodeDocument, path: &mut NodePath) -> Result<Node, ValidationError> {
    let node_type = document.node_type.clone().unwrap_or_default();

    match node_type.as_str() {
        "moveToPage" => {
            let url = require_string(document.url, "moveToPage", "url", path)?;
            let next = lower_next(document.next, path)?;
            Ok(Node::MoveToPage { url, next })
        }
        "fillField" => {
            let selector = require_string(document.selector, "fillField", "selector", path)?;
            let value = require_string(document.value, "fillField", "value", path)?;
            let next = lower_next(document.next, path)?;
            Ok(Node::FillField {
                selector,
                value,
                next,
            })
        }
        "clickButton" => {
            let selector = require_string(document.selector, "clickButton", "selector", path)?;
            let next = lower_next(document.next, path)?;
            Ok(Node::ClickButton { selector, next })
        }
        "sendFile" => {
            let selector = require_string(document.selector, "sendFile", "selector", path)?;
            let file_path = require_string(document.file_path, "sendFile", "filePath", path)?;
            let next = lower_next(document.next, path)?;
            Ok(Node::SendFile {
                selector,
                file_path,
                next,
            })
        }
        "conditional" => {
            let expression = require_string(
                document.condition_expression,
                "conditional",
                "conditionExpression",
                path,
            )?;
            let branches = document
                .branches
                .ok_or_else(|| missing_field(path, "conditional", "branches"))?;
            let branches = lower_branches(branches, path)?;
            Ok(Node::Conditional {
                expression,
                branches,
            })
        }
        "question" => {
            let check = document
                .check
                .ok_or_else(|| missing_field(path, "question", "check"))?;
            let check = lower_check(check, path)?;
            let branches = document
                .branches
                .ok_or_else(|| missing_field(path, "question", "branches"))?;
            let branches = lower_branches(branches, path)?;
            Ok(Node::Question { check, branches })
        }
        "sequence" => {
            let children = document.sequence.unwrap_or_default();
            if children.is_empty() {
                return Err(ValidationError::EmptySequence {
                    path: path.render(),
                });
            }
            let mut lowered = Vec::with_capacity(children.len());
            for (index, child) in children.into_iter().enumerate() {
                path.push(format!("sequence[{index}]"));
                lowered.push(lower_node(child, path)?);
                path.pop();
            }
            let next = lower_next(document.next, path)?;
            Ok(Node::Sequence {
                children: lowered,
                next,
            })
        }
        "forEach" => {
            let iterator_key = require_string(
                document.data_source_iterator_param,
                "forEach",
                "dataSourceIteratorParam",
                path,
            )?;
            let next = lower_next(document.next, path)?;
            Ok(Node::ForEach { iterator_key, next })
        }
        "wait" => {
            let duration = document.duration.unwrap_or(0);
            if duration <= 0 {
                return Err(ValidationError::NonPositiveDuration {
                    path: path.render(),
                });
            }
            let next = lower_next(document.next, path)?;
            Ok(Node::Wait {
                duration_ms: duration as u64,
                next,
            })
        }
        other => Err(ValidationError::InvalidNodeType {
            path: path.render(),
            node_type: other.to_string(),
        }),
    }
}

fn lower_next(
    next: Option<Box<NodeDocument>>,
    path: &mut NodePath,
) -> Result<Option<Box<Node>>, ValidationError> {
    lower_child(next, "next", path)
}

fn lower_branches(
    document: BranchesDocument,
    path: &mut NodePath,
) -> Result<Branches, ValidationError> {
    let yes = lower_child(document.yes, "branches.yes", path)?;
    let no = lower_child(document.no, "branches.no", path)?;
    Ok(Branches { yes, no })
}

fn lower_child(
    child: Option<Box<NodeDocument>>,
    segment: &str,
    path: &mut NodePath,
) -> Result<Option<Box<Node>>, ValidationError> {
    match child {
        Some(document) => {
            path.push(segment);
            let node = lower_node(*document, path)?;
            path.pop();
            Ok(Some(Box::new(node)))
        }
        None => Ok(None),
    }
}

fn lower_check(
    document: DataCheckDocument,
    path: &mut NodePath,
) -> Result<DataCheck, ValidationError> {
    let data_path = document
        .data_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| missing_field(path, "question", "check.dataPath"))?;
    let operator = document
        .operator
        .ok_or_else(|| missing_field(path, "question", "check.operator"))?;
    Ok(DataCheck {
        data_path,
        operator,
        expected_value: document.expected_value.unwrap_or(ContextValue::Null),
    })
}

fn require_string(
    field: Option<String>,
    node_type: &'static str,
    name: &'static str,
    path: &NodePath,
) -> Result<String, ValidationError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing_field(path, node_type, name))
}

fn missing_field(path: &NodePath, node_type: &'static str, field: &'static str) -> ValidationError {
    ValidationError::MissingField {
        path: path.render(),
        node_type,
        field,
    }
}
