use clap::Parser;
use meguri::prelude::*;

/// A declarative browser-workflow interpreter CLI.
///
/// Loads a workflow document and a user-data context, then executes the
/// workflow in dry-run mode against a recording backend and prints the
/// resulting action log.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file
    workflow_path: String,

    /// Path to the context JSON file with user data
    context_path: Option<String>,

    /// Only load and validate the workflow, then exit
    #[arg(short, long)]
    check: bool,

    /// Log filter directive, e.g. `info` or `meguri=debug`
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log))
        .init();

    if cli.check {
        match validate(&cli.workflow_path) {
            Ok(()) => println!("Workflow '{}' is valid.", cli.workflow_path),
            Err(e) => exit_with_error(&format!("Validation failed: {}", e)),
        }
        return;
    }

    let context_path = cli
        .context_path
        .unwrap_or_else(|| exit_with_error("A context path is required unless --check is given."));

    let workflow = Workflow::from_file(&cli.workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load workflow '{}': {}",
            cli.workflow_path, e
        ))
    });
    let context = UserContext::from_file(&context_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to load context '{}': {}", context_path, e))
    });

    let metadata = workflow.metadata();
    println!(
        "Executing workflow '{}' (version {}) in dry-run mode...",
        metadata.name, metadata.version
    );

    let mut browser = RecordingBrowser::new();
    let outcome = Executor::new(&workflow, context, &mut browser).execute();

    println!("\n--- Recorded actions ---");
    for (index, action) in browser.actions().iter().enumerate() {
        let step = index + 1;
        match action {
            BrowserAction::Navigate { url } => println!("{step:>3}. navigate  {url}"),
            BrowserAction::Fill { selector, value } => {
                println!("{step:>3}. fill      {selector} = {value}")
            }
            BrowserAction::Click { selector } => println!("{step:>3}. click     {selector}"),
            BrowserAction::Upload {
                selector,
                file_path,
            } => println!("{step:>3}. upload    {selector} <- {file_path}"),
        }
    }

    match outcome {
        Ok(()) => println!(
            "\nWorkflow completed: {} actions recorded.",
            browser.actions().len()
        ),
        Err(e) => exit_with_error(&format!("Workflow aborted: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
