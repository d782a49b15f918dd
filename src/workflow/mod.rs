mod definition;
mod parser;

pub use definition::{Branches, CheckOperator, DataCheck, Node, Workflow, WorkflowMetadata};
