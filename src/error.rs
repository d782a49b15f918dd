use thiserror::Error;

/// Errors that can occur while loading and validating a workflow document.
///
/// Validation is fail-closed: any of these rejects the whole document and no
/// partial workflow is returned. Structural errors carry the path of the node
/// where they were detected (e.g. `graph.next.branches.yes.sequence[2]`).
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("failed to read workflow file: {0}")]
    Io(String),

    #[error("failed to parse workflow JSON: {0}")]
    Json(String),

    #[error("workflow must have a graph")]
    MissingGraph,

    #[error("invalid node type '{node_type}' at {path}")]
    InvalidNodeType { path: String, node_type: String },

    #[error("{node_type} node at {path} requires {field}")]
    MissingField {
        path: String,
        node_type: &'static str,
        field: &'static str,
    },

    #[error("sequence node at {path} requires at least one child node")]
    EmptySequence { path: String },

    #[error("wait node at {path} requires a positive duration")]
    NonPositiveDuration { path: String },
}

/// Errors that can occur while loading a user-data context document.
#[derive(Error, Debug, Clone)]
pub enum ContextError {
    #[error("failed to read context file: {0}")]
    Io(String),

    #[error("failed to parse context JSON: {0}")]
    Json(String),

    #[error("context document must be a JSON object")]
    NotAnObject,
}

/// An error reported by a browser-automation backend.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct BackendError(String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that abort a workflow run.
///
/// Backend failures are wrapped with the node type that issued the call;
/// sequence and forEach failures additionally carry the 1-based index of the
/// item that failed.
#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    #[error("{action} failed: {source}")]
    Action {
        action: &'static str,
        source: BackendError,
    },

    #[error("dataSourceIteratorParam does not hold a list: {0}")]
    IteratorSource(String),

    #[error("sequence item {index} failed: {source}")]
    SequenceItem {
        index: usize,
        source: Box<ExecutionError>,
    },

    #[error("forEach item {index} failed: {source}")]
    ForEachItem {
        index: usize,
        source: Box<ExecutionError>,
    },
}

/// Combined error for the high-level runner, covering both load phases and
/// the run itself.
#[derive(Error, Debug, Clone)]
pub enum RunError {
    #[error("failed to load workflow: {0}")]
    Workflow(#[from] ValidationError),

    #[error("failed to load context: {0}")]
    Context(#[from] ContextError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}
