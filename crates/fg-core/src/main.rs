//! Field Gauge - custom object field size audit.
//!
//! Selects a set of custom objects (explicitly or by org discovery), flags
//! the custom fields whose declared size exceeds the limit policy, pulls
//! live records for those fields, and reports per-field usage statistics in
//! the requested format.

use clap::{ArgGroup, Parser};
use fg_common::{OutputFormat, UsageReport};
use fg_core::audit::{run_audit, AuditOptions};
use fg_core::exit_codes::ExitCode;
use fg_core::logging;
use fg_core::policy::LimitPolicy;
use fg_core::select::Selection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Audit custom object field sizes against live usage
#[derive(Parser)]
#[command(name = "fg-core")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("selection").required(true).args(["from_org", "objects"])))]
struct Cli {
    /// Discover custom metadata types from the org
    #[arg(long)]
    from_org: bool,

    /// Audit exactly these objects
    #[arg(short = 'l', long = "objects", num_args = 1.., value_name = "OBJECT")]
    objects: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// CSV output path (csv format only)
    #[arg(short = 'o', long, default_value = "output.csv")]
    output: PathBuf,

    /// Platform CLI binary to spawn
    #[arg(long, env = "FG_SF_BIN", default_value = "sf")]
    sf_bin: String,

    /// Per-call timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum parallel describe/query calls
    #[arg(long, default_value_t = 4)]
    jobs: usize,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Warnings and errors only
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, matches!(cli.format, OutputFormat::Json));

    if cli.jobs == 0 {
        error!("--jobs must be at least 1");
        std::process::exit(ExitCode::ArgsError.as_i32());
    }

    let run_id = logging::generate_run_id();
    info!(run_id = %run_id, format = %cli.format, "starting field audit");

    let selection = if cli.from_org {
        Selection::Discover
    } else {
        Selection::Explicit(cli.objects.clone())
    };

    let options = AuditOptions {
        selection,
        policy: LimitPolicy::default(),
        sf_bin: cli.sf_bin.clone(),
        timeout: Duration::from_secs(cli.timeout),
        jobs: cli.jobs,
    };
    let report = run_audit(&options);

    let exit_code = emit_report(&report, cli.format, &cli.output);
    std::process::exit(exit_code.as_i32());
}

fn emit_report(report: &UsageReport, format: OutputFormat, output: &Path) -> ExitCode {
    match format {
        OutputFormat::Plain => {
            for (object, fields) in report {
                for (field, stat) in fields {
                    println!(
                        "{}.{}: longest={} shortest={} count={} limit={} type_info={}",
                        object, field, stat.longest, stat.shortest, stat.count, stat.declared_limit, stat.type_info
                    );
                }
            }
            ExitCode::Clean
        }
        OutputFormat::Table => {
            print!("{}", fg_report::render_table(report));
            ExitCode::Clean
        }
        OutputFormat::Csv => match fg_report::write_csv(report, output) {
            Ok(()) => ExitCode::Clean,
            Err(e) => {
                error!(path = %output.display(), error = %e, "failed to write CSV report");
                ExitCode::IoError
            }
        },
        OutputFormat::Json => match serde_json::to_string_pretty(report) {
            Ok(payload) => {
                println!("{payload}");
                ExitCode::Clean
            }
            Err(e) => {
                error!(error = %e, "failed to serialize report");
                ExitCode::InternalError
            }
        },
    }
}
