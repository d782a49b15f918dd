//! # Meguri - Declarative Browser-Workflow Interpreter
//!
//! **Meguri** interprets JSON-described workflow graphs that automate
//! browser-based form interactions: logging in, entering data, uploading
//! files. A workflow is a tree of typed nodes (page navigations, field
//! fills, clicks, file uploads, conditionals, sequences, and loops) chained
//! through `next` pointers and `yes`/`no` branches.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a workflow document with [`workflow::Workflow::from_json_str`]
//!     (or `from_file`). Loading validates the whole graph recursively and
//!     fails closed on any structural defect.
//! 2.  **Bind data**: Load the run's user data into a [`context::UserContext`].
//!     Node parameters reference it through `{{key}}` template placeholders.
//! 3.  **Execute**: Build an [`executor::Executor`] with the workflow, the
//!     context, and a [`backend::Browser`] implementation, then call
//!     `execute()`. The engine walks the graph, resolves every parameter and
//!     branch decision, and drives the backend for each effectful action.
//!
//! The browser backend is a narrow capability interface, so the interpreter
//! runs unchanged against a real driver, the bundled
//! [`backend::RecordingBrowser`], or any custom stub.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meguri::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workflow = Workflow::from_json_str(
//!         r#"{
//!             "graph": {
//!                 "nodeType": "moveToPage",
//!                 "url": "https://example.com/login",
//!                 "next": {
//!                     "nodeType": "fillField",
//!                     "selector": "LOGIN_USERNAME",
//!                     "value": "{{username}}",
//!                     "next": {
//!                         "nodeType": "clickButton",
//!                         "selector": "LOGIN_SUBMIT"
//!                     }
//!                 }
//!             },
//!             "metadata": { "name": "login", "version": "1.0.0" }
//!         }"#,
//!     )?;
//!
//!     let context = UserContext::from_json_str(r#"{ "username": "ada" }"#)?;
//!
//!     let mut browser = RecordingBrowser::new();
//!     Executor::new(&workflow, context, &mut browser).execute()?;
//!
//!     // The selector constant resolved through the registry, the template
//!     // through the context.
//!     assert_eq!(browser.field_value("#username"), Some("ada"));
//!     assert!(browser.clicked("#loginButton"));
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod context;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod resolver;
pub mod workflow;
