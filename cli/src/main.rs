use std::path::PathBuf;
use std::sync::Once;

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "genbench=info,genbench_core=info,genbench_cli=info";

use anyhow::Context;
use clap::Parser;
use genbench_core::{
    fixtures,
    perf::{
        catalogue,
        report::{RunRecord, render_table, write_csv, write_json},
        run_suite,
    },
};

mod config;
#[cfg(test)]
mod main_test;

#[derive(Debug, Parser)]
#[command(
    name = "genbench",
    author,
    version,
    about = "Compare lazy iterator pipelines against hand-written loops",
    long_about = None
)]
struct CliArgs {
    /// Only run cases whose name contains this substring
    #[arg(long, value_name = "SUBSTRING")]
    filter: Option<String>,

    /// Time budget per case in milliseconds
    #[arg(long, value_name = "MS")]
    min_time_ms: Option<u64>,

    /// Upper bound on iterations per epoch
    #[arg(long, value_name = "N")]
    max_iters: Option<u64>,

    /// Number of timed epochs per case (the fastest one is kept)
    #[arg(long, value_name = "N")]
    epochs: Option<u32>,

    /// TOML file with runner settings; flags above take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the run record as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write the per-case metrics as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Free-form note stored with the run record
    #[arg(long)]
    notes: Option<String>,

    /// Print the case catalogue and exit
    #[arg(long)]
    list: bool,
}

impl CliArgs {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            filter: self.filter.clone(),
            min_time_ms: self.min_time_ms,
            max_iters: self.max_iters,
            epochs: self.epochs,
        }
    }
}

fn env_toggle_enabled(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    !(trimmed.eq_ignore_ascii_case("0") || trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("off"))
}

fn filter_expr_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("1")
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("on")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn maybe_init_tracing() {
    let raw = match std::env::var("GENBENCH_TRACE") {
        Ok(value) => value,
        Err(_) => return,
    };

    if !env_toggle_enabled(&raw) {
        return;
    }

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = filter_expr_from(&raw).or_else(|| std::env::var("RUST_LOG").ok());

        let builder = fmt().with_writer(std::io::stderr);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

fn print_catalogue() {
    for group in catalogue() {
        println!("{} - {}", group.key, group.title);
        for case in group.cases {
            println!("  {}", case.label());
        }
    }
}

fn main() -> anyhow::Result<()> {
    maybe_init_tracing();

    let args = CliArgs::parse();
    if args.list {
        print_catalogue();
        return Ok(());
    }

    let runner_config = config::resolve(args.config.as_deref(), args.overrides())?;
    tracing::info!(target: "genbench", ?runner_config, "starting suite");

    fixtures::init();
    let run = run_suite(catalogue(), &runner_config).context("run benchmark suite")?;
    print!("{}", render_table("genbench", &run));

    if args.json.is_some() || args.csv.is_some() {
        let record = RunRecord::from_run(&run, chrono::Utc::now(), args.notes.clone());
        if let Some(path) = &args.json {
            write_json(path, &record)?;
            tracing::info!(target: "genbench", path = %path.display(), "wrote json record");
        }
        if let Some(path) = &args.csv {
            write_csv(path, &record.metrics)?;
            tracing::info!(target: "genbench", path = %path.display(), "wrote csv metrics");
        }
    }

    Ok(())
}
