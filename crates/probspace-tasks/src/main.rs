use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use probspace_core::AppInfo;
use probspace_tasks::config::{LoggingConfig, ScenarioFile};
use probspace_tasks::logging::init_logging;
use probspace_tasks::report::TaskReport;
use probspace_tasks::scenario::run_file;
use probspace_tasks::tasks::{BuiltinTask, run_builtin};

/// Classical probability task runner.
#[derive(Debug, Parser)]
#[command(
    name = "probspace",
    author,
    version,
    about = "Evaluates events over equiprobable sample spaces"
)]
struct Cli {
    /// Path to a YAML scenario file; built-in tasks run when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in task to run (repeatable); defaults to all of them.
    #[arg(short, long = "task", value_enum, value_name = "TASK")]
    tasks: Vec<BuiltinTask>,

    /// Print reports as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Exit after validating the scenario file (no scenario is evaluated).
    #[arg(long, requires = "config")]
    validate_only: bool,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (reports, _logging_guard) = match cli.config.as_ref() {
        Some(path) => {
            let mut file = ScenarioFile::from_path(path)?;
            if let Some(level) = cli.log_level.clone() {
                file.logging.tracing_level = level;
                file.validate()?;
            }

            if cli.validate_only {
                println!(
                    "Scenario file '{}' is valid ({} scenario{})",
                    file.run_id,
                    file.scenarios.len(),
                    if file.scenarios.len() == 1 { "" } else { "s" }
                );
                return Ok(());
            }

            let log_path = file.resolved_log_path();
            let guard = init_logging(&file.logging, log_path.as_deref())?;
            let reports = run_file(&file)
                .with_context(|| format!("evaluating scenarios from {}", path.display()))?;
            (reports, guard)
        }
        None => {
            let mut logging = LoggingConfig::default();
            if let Some(level) = cli.log_level.clone() {
                logging.tracing_level = level;
            }
            let guard = init_logging(&logging, None)?;
            let reports = run_builtin(&cli.tasks).context("running built-in tasks")?;
            (reports, guard)
        }
    };

    print_reports(&reports, cli.json)
}

fn print_reports(reports: &[TaskReport], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }

    println!("{} {}", AppInfo::name(), AppInfo::version());
    for report in reports {
        println!();
        print!("{report}");
    }
    Ok(())
}
