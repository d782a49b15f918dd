//! Common test utilities for building workflows and contexts.
use meguri::prelude::*;

/// Parses a workflow document, panicking on any validation error.
#[allow(dead_code)]
pub fn workflow(raw: &str) -> Workflow {
    Workflow::from_json_str(raw).expect("workflow should be valid")
}

/// Parses a context document, panicking on any error.
#[allow(dead_code)]
pub fn context(raw: &str) -> UserContext {
    UserContext::from_json_str(raw).expect("context should be valid")
}

/// A login chain: navigate -> fill username -> fill password -> click submit.
#[allow(dead_code)]
pub fn login_workflow() -> Workflow {
    workflow(
        r##"{
            "graph": {
                "nodeType": "moveToPage",
                "url": "{{site}}/login",
                "next": {
                    "nodeType": "fillField",
                    "selector": "#username",
                    "value": "{{username}}",
                    "next": {
                        "nodeType": "fillField",
                        "selector": "#password",
                        "value": "{{password}}",
                        "next": {
                            "nodeType": "clickButton",
                            "selector": "#loginButton"
                        }
                    }
                }
            },
            "metadata": { "name": "login", "version": "1.0.0" }
        }"##,
    )
}

#[allow(dead_code)]
pub fn login_context() -> UserContext {
    context(
        r##"{
            "site": "https://example.com",
            "username": "ada",
            "password": "hunter2"
        }"##,
    )
}
