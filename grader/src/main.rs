use anyhow::{Context, Result};
use clap::Parser;
use marker::GradingJob;
use marker::report::{FileSink, publish_summary, render_console, render_json};
use marker::traits::sink::SummarySink;
use marker::types::GradeReport;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use util::config::GraderConfig;

/// Statically grades a Lab 7-2 RESTful API submission.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Lab directory containing `server/` (overrides LAB_ROOT)
    #[arg(long)]
    lab_root: Option<PathBuf>,
    /// Due date such as 2025-11-20T23:59:59+03:00 (overrides LAB_DUE_DATE)
    #[arg(long)]
    due_date: Option<String>,
    /// Markdown job-summary file (overrides GITHUB_STEP_SUMMARY)
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Write the report as JSON to this path (overrides GRADE_REPORT_JSON)
    #[arg(long)]
    json_report: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut config: GraderConfig) -> GraderConfig {
        if let Some(root) = self.lab_root {
            config = config.with_lab_root(root);
        }
        if let Some(due) = self.due_date {
            config = config.with_due_date(due);
        }
        if let Some(path) = self.summary {
            config = config.with_summary_path(path);
        }
        if let Some(path) = self.json_report {
            config = config.with_json_report_path(path);
        }
        config
    }
}

/// What the command line asks for.
#[derive(Debug)]
enum Invocation {
    /// Grade with `config`. `ignored` holds a rejected command line, if any.
    Grade {
        config: GraderConfig,
        ignored: Option<clap::Error>,
    },
    /// `--help` or `--version`: print and stop.
    Info(clap::Error),
}

/// Layers the command line over `base`. Bad arguments never stop grading;
/// they are ignored and `base` is used as is.
fn resolve_invocation<I, T>(argv: I, base: GraderConfig) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Invocation::Grade {
            config: args.apply(base),
            ignored: None,
        },
        Err(e) if e.use_stderr() => Invocation::Grade {
            config: base,
            ignored: Some(e),
        },
        Err(e) => Invocation::Info(e),
    }
}

fn init_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

fn write_json_report(report: &GradeReport, path: &Path) -> Result<()> {
    let json = render_json(report)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() {
    let (config, ignored) = match resolve_invocation(env::args_os(), GraderConfig::from_env()) {
        Invocation::Grade { config, ignored } => (config, ignored),
        Invocation::Info(info) => {
            let _ = info.print();
            return;
        }
    };
    init_logging(&config.log_level);
    if let Some(e) = ignored {
        warn!("ignoring command-line arguments: {e}");
    }

    let report = GradingJob::from_config(&config).run();
    println!("{}", render_console(&report));

    let sink = config.summary_path.as_ref().map(FileSink::new);
    if publish_summary(&report, sink.as_ref().map(|s| s as &dyn SummarySink)) {
        info!("job summary written");
    }

    if let Some(path) = &config.json_report_path {
        if let Err(e) = write_json_report(&report, path) {
            warn!("could not write JSON report: {e:#}");
        }
    }
}
