//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the meguri crate so that
//! typical callers only need a single `use meguri::prelude::*;`.
//!
//! # Example
//!
//! ```rust,no_run
//! use meguri::prelude::*;
//!
//! fn run() -> Result<(), RunError> {
//!     let mut runner = Runner::new(RecordingBrowser::new());
//!     runner.execute_file("workflow.json", "context.json")?;
//!     Ok(())
//! }
//! ```

// Execution
pub use crate::backend::{Browser, BrowserAction, RecordingBrowser};
pub use crate::executor::{Executor, Runner, validate};

// Workflow model
pub use crate::workflow::{Branches, CheckOperator, DataCheck, Node, Workflow, WorkflowMetadata};

// Context and resolution
pub use crate::context::{ContextValue, UserContext};
pub use crate::resolver::{SelectorRegistry, TemplateResolver};

// Error types
pub use crate::error::{BackendError, ContextError, ExecutionError, RunError, ValidationError};
