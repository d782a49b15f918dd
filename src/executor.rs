//! The control-flow engine that walks a validated workflow graph.
//!
//! Execution is single-threaded and synchronous: nodes run strictly in
//! order, `wait` blocks the calling thread, and every effectful action is
//! delegated to the [`Browser`] backend. A backend failure aborts the whole
//! run; the backend is closed exactly once regardless of outcome.

use crate::backend::Browser;
use crate::context::{ContextValue, UserContext};
use crate::error::{BackendError, ExecutionError, RunError, ValidationError};
use crate::resolver::TemplateResolver;
use crate::workflow::{Branches, Node, Workflow};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Walks the workflow graph node by node, resolving parameters through the
/// [`TemplateResolver`] and invoking the backend for effectful actions.
pub struct Executor<'a, B: Browser> {
    workflow: &'a Workflow,
    resolver: TemplateResolver,
    backend: &'a mut B,
}

impl<'a, B: Browser> Executor<'a, B> {
    pub fn new(workflow: &'a Workflow, context: UserContext, backend: &'a mut B) -> Self {
        Self {
            workflow,
            resolver: TemplateResolver::new(context),
            backend,
        }
    }

    /// Builds an executor around a preconfigured resolver, e.g. one with
    /// extra selector mappings.
    pub fn with_resolver(
        workflow: &'a Workflow,
        resolver: TemplateResolver,
        backend: &'a mut B,
    ) -> Self {
        Self {
            workflow,
            resolver,
            backend,
        }
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut TemplateResolver {
        &mut self.resolver
    }

    /// Runs the workflow to completion. The backend is closed exactly once,
    /// whether the run succeeds or aborts on a failed node.
    pub fn execute(mut self) -> Result<(), ExecutionError> {
        let metadata = self.workflow.metadata();
        info!(
            name = %metadata.name,
            version = %metadata.version,
            "starting workflow execution"
        );
        if let Some(description) = &metadata.description {
            info!(description = %description, "workflow description");
        }

        let graph = self.workflow.graph();
        let outcome = self.execute_node(Some(graph));

        if let Err(close_error) = self.backend.close() {
            warn!(error = %close_error, "failed to close browser backend");
        }

        outcome
    }

    fn execute_node(&mut self, node: Option<&'a Node>) -> Result<(), ExecutionError> {
        let Some(node) = node else {
            debug!("workflow path completed");
            return Ok(());
        };
        debug!(node = node.kind_name(), "executing node");

        match node {
            Node::MoveToPage { url, next } => {
                let url = self.resolver.resolve(url);
                action(self.backend.navigate_to(&url), "moveToPage")?;
                self.execute_node(next.as_deref())
            }
            Node::FillField {
                selector,
                value,
                next,
            } => {
                let selector = self.resolver.resolve_selector(selector);
                let value = self.resolver.resolve(value);
                action(self.backend.fill_field(&selector, &value), "fillField")?;
                self.execute_node(next.as_deref())
            }
            Node::ClickButton { selector, next } => {
                let selector = self.resolver.resolve_selector(selector);
                action(self.backend.click_element(&selector), "clickButton")?;
                self.execute_node(next.as_deref())
            }
            Node::SendFile {
                selector,
                file_path,
                next,
            } => {
                let selector = self.resolver.resolve_selector(selector);
                let file_path = self.resolver.resolve(file_path);
                action(self.backend.send_file(&selector, &file_path), "sendFile")?;
                self.execute_node(next.as_deref())
            }
            Node::Conditional {
                expression,
                branches,
            } => {
                let outcome = self.resolver.evaluate_condition(expression);
                debug!(outcome, expression = %expression, "conditional evaluated");
                self.execute_branch(branches, outcome)
            }
            Node::Question { check, branches } => {
                let outcome = self.resolver.evaluate_data_check(check);
                debug!(outcome, data_path = %check.data_path, "question evaluated");
                self.execute_branch(branches, outcome)
            }
            Node::Sequence { children, next } => {
                info!(items = children.len(), "executing sequence");
                for (index, child) in children.iter().enumerate() {
                    debug!(item = index + 1, of = children.len(), "executing sequence item");
                    self.execute_node(Some(child)).map_err(|source| {
                        ExecutionError::SequenceItem {
                            index: index + 1,
                            source: Box::new(source),
                        }
                    })?;
                }
                self.execute_node(next.as_deref())
            }
            Node::ForEach { iterator_key, next } => {
                let items = match self.resolver.context().get(iterator_key) {
                    Some(ContextValue::List(items)) => items.clone(),
                    _ => return Err(ExecutionError::IteratorSource(iterator_key.clone())),
                };
                for (index, item) in items.into_iter().enumerate() {
                    self.resolver.context_mut().insert(iterator_key.clone(), item);
                    self.execute_node(next.as_deref()).map_err(|source| {
                        ExecutionError::ForEachItem {
                            index: index + 1,
                            source: Box::new(source),
                        }
                    })?;
                }
                // The key must not stay aliased to the last element.
                self.resolver
                    .context_mut()
                    .insert(iterator_key.clone(), ContextValue::Null);
                info!(key = %iterator_key, "forEach loop completed");
                Ok(())
            }
            Node::Wait { duration_ms, next } => {
                let duration = Duration::from_millis(*duration_ms);
                info!(?duration, "waiting");
                thread::sleep(duration);
                self.execute_node(next.as_deref())
            }
        }
    }

    fn execute_branch(
        &mut self,
        branches: &'a Branches,
        outcome: bool,
    ) -> Result<(), ExecutionError> {
        if outcome {
            info!("taking yes branch");
            self.execute_node(branches.yes.as_deref())
        } else {
            info!("taking no branch");
            self.execute_node(branches.no.as_deref())
        }
    }
}

fn action(result: Result<(), BackendError>, action: &'static str) -> Result<(), ExecutionError> {
    result.map_err(|source| ExecutionError::Action { action, source })
}

/// High-level entry point that loads workflow and context documents and
/// executes them against an owned backend.
pub struct Runner<B: Browser> {
    backend: B,
}

impl<B: Browser> Runner<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Loads both documents from disk and runs the workflow.
    pub fn execute_file(
        &mut self,
        workflow_path: impl AsRef<Path>,
        context_path: impl AsRef<Path>,
    ) -> Result<(), RunError> {
        let context = UserContext::from_file(context_path)?;
        self.execute_file_with_context(workflow_path, context)
    }

    pub fn execute_file_with_context(
        &mut self,
        workflow_path: impl AsRef<Path>,
        context: UserContext,
    ) -> Result<(), RunError> {
        let workflow = Workflow::from_file(workflow_path)?;
        self.execute(&workflow, context)
    }

    pub fn execute(&mut self, workflow: &Workflow, context: UserContext) -> Result<(), RunError> {
        Executor::new(workflow, context, &mut self.backend).execute()?;
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Loads and validates a workflow file without executing it.
pub fn validate(workflow_path: impl AsRef<Path>) -> Result<(), ValidationError> {
    Workflow::from_file(workflow_path).map(|_| ())
}
