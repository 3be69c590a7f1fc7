use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use tfcheck_core::{
    CheckOrchestrator, ProcessRunner, StageCommands, build_receipt, render_markdown_for_results,
    truncate_report,
};

mod config_loader;
mod env_expand;
mod settings;

use config_loader::load_config;
use settings::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "tfcheck")]
#[command(about = "Run terraform init/fmt/validate/plan and report the outcome", long_about = None)]
struct Cli {
    /// Only log warnings and errors (hides the command echo).
    #[arg(long, short = 'q', global = true, conflicts_with = "debug")]
    quiet: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more terraform directories.
    ///
    /// Exit code: 0 when every target is clean, 2 when some plan has pending
    /// changes, 1 when any fmt, validate or plan stage failed.
    Check(Box<CheckArgs>),

    /// Shrink an existing Markdown report in place if it is over the size limit.
    Truncate(TruncateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Target directories, checked in order.
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<String>,

    /// Extra argument appended to the plan command. Repeatable.
    ///
    /// Examples:
    ///   --plan-args -var-file=prod.tfvars
    ///   --plan-args -lock=false --plan-args -parallelism=4
    #[arg(long, value_name = "ARG", allow_hyphen_values = true, action = clap::ArgAction::Append)]
    plan_args: Vec<String>,

    /// Remove state-refresh progress lines from the plan output.
    #[arg(long)]
    strip_refresh: bool,

    /// Write the Markdown report, with plan details removed when it is over
    /// the size limit. Use '-' for stdout.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Write the complete Markdown report. Use '-' for stdout.
    #[arg(long, value_name = "PATH")]
    full_report: Option<PathBuf>,

    /// Write a JSON receipt.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    /// Executable used for every stage (defaults to config, else terraform).
    #[arg(long, value_name = "BIN")]
    terraform_bin: Option<String>,
}

#[derive(Parser, Debug)]
struct TruncateArgs {
    /// Markdown report to rewrite.
    report: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Path to a config file. If omitted, uses ./tfcheck.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report size in bytes above which plan details are removed.
    #[arg(long, value_name = "BYTES")]
    size_limit: Option<usize>,

    /// Link to the full report, shown in the truncation notice.
    #[arg(long, value_name = "URL")]
    run_url: Option<String>,
}

#[cfg(not(test))]
fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.quiet, cli.debug);

    match cli.command {
        Commands::Check(args) => cmd_check(*args),
        Commands::Truncate(args) => {
            cmd_truncate(args)?;
            Ok(0)
        }
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(quiet: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn resolve_settings(common: &CommonArgs, overrides: Overrides) -> Result<Settings> {
    let config = load_config(common.config.as_deref())?;
    let settings = Settings::resolve(overrides, &config.defaults, |name| {
        std::env::var(name).ok()
    });
    debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

fn cmd_check(args: CheckArgs) -> Result<i32> {
    info!("Starting tfcheck on {} target(s)", args.paths.len());

    let settings = resolve_settings(
        &args.common,
        Overrides {
            terraform_bin: args.terraform_bin.clone(),
            plan_args: args.plan_args.clone(),
            strip_refresh: args.strip_refresh,
            size_limit: args.common.size_limit,
            run_url: args.common.run_url.clone(),
        },
    )?;

    let orchestrator = CheckOrchestrator::new(
        ProcessRunner,
        StageCommands::for_binary(&settings.terraform_bin),
    );

    // Summary lines go out as each target finishes, before any report file.
    let run = orchestrator
        .check_all(&args.paths, &settings.options, |result| {
            println!(
                "Terraform check on {} {}",
                result.path,
                result.check_result_msg()
            );
        })
        .context("run terraform checks")?;

    let full = render_markdown_for_results(&run.results);

    if let Some(path) = &args.full_report {
        write_text(path, &full)?;
    }

    if let Some(path) = &args.report {
        let report = truncate_report(&full, settings.size_limit, &settings.notice);
        write_text(path, &report)?;
    }

    if let Some(path) = &args.out {
        write_json(path, &build_receipt(&run))?;
    }

    Ok(run.exit_code())
}

fn cmd_truncate(args: TruncateArgs) -> Result<()> {
    let settings = resolve_settings(
        &args.common,
        Overrides {
            size_limit: args.common.size_limit,
            run_url: args.common.run_url.clone(),
            ..Overrides::default()
        },
    )?;

    let report = std::fs::read_to_string(&args.report)
        .with_context(|| format!("read report {}", args.report.display()))?;
    let truncated = truncate_report(&report, settings.size_limit, &settings.notice);

    if truncated == report {
        info!(
            "Report {} left unchanged ({} bytes)",
            args.report.display(),
            report.len()
        );
        return Ok(());
    }

    write_text(&args.report, &truncated)
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    create_parent_dir(path)?;
    let bytes = serde_json::to_vec_pretty(value).context("serialize receipt")?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes()).context("write stdout")?;
        stdout.flush().context("flush stdout")?;
        return Ok(());
    }

    create_parent_dir(path)?;
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    Ok(())
}
