//! End-to-end tests: documents on disk, loaded and executed through the
//! high-level runner.
mod common;
use common::*;
use meguri::backend::BrowserAction;
use meguri::prelude::*;
use std::fs;

const APPLICATION_WORKFLOW: &str = r##"{
    "graph": {
        "nodeType": "moveToPage",
        "url": "{{portal}}/apply",
        "next": {
            "nodeType": "sequence",
            "sequence": [
                { "nodeType": "fillField", "selector": "LOGIN_USERNAME", "value": "{{username}}" },
                { "nodeType": "fillField", "selector": "LOGIN_PASSWORD", "value": "{{password}}" },
                { "nodeType": "clickButton", "selector": "LOGIN_SUBMIT" }
            ],
            "next": {
                "nodeType": "question",
                "check": { "dataPath": "resume", "operator": "contains", "expectedValue": ".pdf" },
                "branches": {
                    "yes": {
                        "nodeType": "sendFile",
                        "selector": "FILE_INPUT",
                        "filePath": "{{resume}}",
                        "next": {
                            "nodeType": "forEach",
                            "dataSourceIteratorParam": "references",
                            "next": {
                                "nodeType": "fillField",
                                "selector": "#reference",
                                "value": "{{references}}"
                            }
                        }
                    },
                    "no": { "nodeType": "clickButton", "selector": "#skip-upload" }
                }
            }
        }
    },
    "metadata": {
        "name": "job-application",
        "version": "2.1.0",
        "description": "Fills the application portal and uploads a resume"
    }
}"##;

const APPLICATION_CONTEXT: &str = r##"{
    "portal": "https://jobs.example.com",
    "username": "ada",
    "password": "hunter2",
    "resume": "/home/ada/resume.pdf",
    "references": ["grace", "mary"]
}"##;

#[test]
fn runs_a_full_application_workflow() {
    let workflow = workflow(APPLICATION_WORKFLOW);
    assert_eq!(workflow.metadata().name, "job-application");

    let mut runner = Runner::new(RecordingBrowser::new());
    runner
        .execute(&workflow, context(APPLICATION_CONTEXT))
        .expect("run should succeed");

    let browser = runner.into_backend();
    assert_eq!(
        browser.actions(),
        &[
            BrowserAction::Navigate {
                url: "https://jobs.example.com/apply".to_string()
            },
            BrowserAction::Fill {
                selector: "#username".to_string(),
                value: "ada".to_string()
            },
            BrowserAction::Fill {
                selector: "#password".to_string(),
                value: "hunter2".to_string()
            },
            BrowserAction::Click {
                selector: "#loginButton".to_string()
            },
            BrowserAction::Upload {
                selector: "input[type='file']".to_string(),
                file_path: "/home/ada/resume.pdf".to_string()
            },
            BrowserAction::Fill {
                selector: "#reference".to_string(),
                value: "grace".to_string()
            },
            BrowserAction::Fill {
                selector: "#reference".to_string(),
                value: "mary".to_string()
            },
        ]
    );
    assert!(browser.is_closed());
}

#[test]
fn the_untaken_branch_skips_the_upload() {
    let workflow = workflow(APPLICATION_WORKFLOW);
    let context = context(
        r##"{
            "portal": "https://jobs.example.com",
            "username": "ada",
            "password": "hunter2",
            "resume": "/home/ada/resume.docx",
            "references": []
        }"##,
    );

    let mut runner = Runner::new(RecordingBrowser::new());
    runner.execute(&workflow, context).expect("run should succeed");

    let browser = runner.into_backend();
    assert!(browser.clicked("#skip-upload"));
    assert!(browser.uploaded_file("input[type='file']").is_none());
}

#[test]
fn loads_and_executes_documents_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let workflow_path = dir.path().join("workflow.json");
    let context_path = dir.path().join("context.json");
    fs::write(&workflow_path, APPLICATION_WORKFLOW).expect("write workflow");
    fs::write(&context_path, APPLICATION_CONTEXT).expect("write context");

    let mut runner = Runner::new(RecordingBrowser::new());
    runner
        .execute_file(&workflow_path, &context_path)
        .expect("run should succeed");

    let browser = runner.into_backend();
    assert_eq!(
        browser.last_navigation(),
        Some("https://jobs.example.com/apply")
    );
    assert_eq!(browser.field_value("#reference"), Some("mary"));
}

#[test]
fn validate_checks_a_file_without_executing_it() {
    let dir = tempfile::tempdir().expect("temp dir");

    let good = dir.path().join("good.json");
    fs::write(&good, APPLICATION_WORKFLOW).expect("write workflow");
    assert!(validate(&good).is_ok());

    let bad = dir.path().join("bad.json");
    fs::write(
        &bad,
        r##"{ "graph": { "nodeType": "sequence", "sequence": [] } }"##,
    )
    .expect("write workflow");
    assert!(matches!(
        validate(&bad),
        Err(ValidationError::EmptySequence { .. })
    ));
}

#[test]
fn load_failures_surface_through_the_runner() {
    let dir = tempfile::tempdir().expect("temp dir");
    let context_path = dir.path().join("context.json");
    fs::write(&context_path, "{}").expect("write context");

    let mut runner = Runner::new(RecordingBrowser::new());
    let error = runner
        .execute_file(dir.path().join("missing.json"), &context_path)
        .expect_err("load should fail");
    assert!(matches!(error, RunError::Workflow(ValidationError::Io(_))));

    // Nothing ran, so nothing was recorded or closed.
    let browser = runner.into_backend();
    assert!(browser.actions().is_empty());
    assert!(!browser.is_closed());
}
