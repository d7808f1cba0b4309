//! Implementation of the task commands (`debug`, `optimize`, `explain`, `test`).
//!
//! Every task goes through the same steps:
//! 1. Resolve config and the model name
//! 2. Render the prompt around the source file
//! 3. Run the model once
//! 4. Save the response as `<stem>_<suffix>.txt` beside the source

use crate::cli::TaskArgs;
use crate::config::Config;
use crate::error::{Result, SmartcodeError};
use crate::events::{Event, EventAction, append_event};
use crate::invoke::{ModelInvoker, ProcessInvoker};
use crate::prompt::PromptBuilder;
use crate::report::report_path;
use crate::runner::{InvocationRequest, TaskOutcome, TaskRunner};
use crate::task::Task;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute a task command.
pub fn cmd_task(task: Task, args: &TaskArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::resolve(config_path)?;
    let invoker = ProcessInvoker::from_config(&config);

    if args.dry_run {
        return print_dry_run(task, args, &config, &invoker);
    }

    execute(task, args, &config, &invoker).map(|_| ())
}

/// Run `task` with `invoker` and report progress on stdout.
///
/// Returns the report path. A run that produced no report is an
/// `InvocationFailed` error.
pub(crate) fn execute<I: ModelInvoker + ?Sized>(
    task: Task,
    args: &TaskArgs,
    config: &Config,
    invoker: &I,
) -> Result<PathBuf> {
    let model = select_model(args.model.as_deref(), config)?;
    let prompts = PromptBuilder::from_config(config)?;
    let request = InvocationRequest {
        source_path: args.file.clone(),
        model: model.clone(),
        task,
    };

    let started = Instant::now();
    let mut runner = TaskRunner::new(invoker, &prompts);
    let prompt = match runner.prepare(&request) {
        Ok(prompt) => prompt,
        Err(err) => {
            let duration_ms = started.elapsed().as_millis() as u64;
            log_failure(config, task, &model, args, &err.to_string(), duration_ms);
            return Err(err);
        }
    };

    println!(
        "{} {} using model '{}'...",
        task.label(),
        args.file.display(),
        model
    );

    log_event(
        config,
        Event::new(EventAction::TaskStart, task).with_details(json!({
            "model": model,
            "source": args.file.to_string_lossy(),
        })),
    );

    let result = runner.complete(&request, &prompt);
    let duration_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(TaskOutcome::Completed { output_path }) => {
            log_event(
                config,
                Event::new(EventAction::TaskComplete, task).with_details(json!({
                    "model": model,
                    "source": args.file.to_string_lossy(),
                    "output": output_path.to_string_lossy(),
                    "duration_ms": duration_ms,
                })),
            );
            println!(
                "{} saved to: {}",
                task.profile().report_name,
                output_path.display()
            );
            Ok(output_path)
        }
        Ok(TaskOutcome::Failed { reason }) => {
            log_failure(config, task, &model, args, &reason, duration_ms);
            eprintln!("Warning: {} failed.", task.label());
            Err(SmartcodeError::InvocationFailed {
                task: task.name().to_string(),
                reason,
            })
        }
        Err(err) => {
            log_failure(config, task, &model, args, &err.to_string(), duration_ms);
            Err(err)
        }
    }
}

/// `--model` if given, otherwise the configured default.
fn select_model(requested: Option<&str>, config: &Config) -> Result<String> {
    match requested {
        Some(name) if name.trim().is_empty() => Err(SmartcodeError::UserError(
            "model name must not be empty".to_string(),
        )),
        Some(name) => Ok(name.to_string()),
        None => Ok(config.default_model.clone()),
    }
}

fn print_dry_run(
    task: Task,
    args: &TaskArgs,
    config: &Config,
    invoker: &ProcessInvoker,
) -> Result<()> {
    let model = select_model(args.model.as_deref(), config)?;
    let prompts = PromptBuilder::from_config(config)?;
    let request = InvocationRequest {
        source_path: args.file.clone(),
        model: model.clone(),
        task,
    };

    let command = invoker
        .describe(&model)
        .map_err(|e| SmartcodeError::ConfigError(e.to_string()))?;
    let prompt = TaskRunner::new(invoker, &prompts).prepare(&request)?;

    println!("[DRY RUN] Would run task '{}':", task);
    println!();
    println!("  Model:    {}", model);
    println!("  Command:  {}", command);
    println!(
        "  Report:   {}",
        report_path(&args.file, task.output_suffix()).display()
    );
    println!("  Prompt:   {} bytes", prompt.len());
    println!();
    println!("--- prompt ---");
    println!("{}", prompt);
    println!("--- end prompt ---");

    Ok(())
}

fn log_failure(
    config: &Config,
    task: Task,
    model: &str,
    args: &TaskArgs,
    reason: &str,
    duration_ms: u64,
) {
    log_event(
        config,
        Event::new(EventAction::TaskFailed, task).with_details(json!({
            "model": model,
            "source": args.file.to_string_lossy(),
            "reason": reason,
            "duration_ms": duration_ms,
        })),
    );
}

/// Append to the run log when one is configured. Failures only warn.
fn log_event(config: &Config, event: Event) {
    let Some(log) = config.run_log.as_deref() else {
        return;
    };
    if let Err(e) = append_event(log, &event) {
        eprintln!("Warning: failed to log {:?} event: {}", event.action, e);
    }
}
