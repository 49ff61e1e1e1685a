//! Times packed mip chain generation for each buffer storage strategy.
//!
//! Each strategy allocates one buffer sized for the whole chain, fills the
//! base level with a synthetic gradient, generates every smaller level, and
//! releases the buffer before the next strategy starts.
//!
//! Run from the workspace root:
//!   cargo run --release -p ms-bench -- --help
//!   cargo run --release -p ms-bench -- --size 1024 --repeat 5 --json out.json

mod dump;
mod report;
mod trial;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use ms_core::{DEFAULT_BASE_WIDTH, MipLayout};
use tracing::{Level, info, warn};

use crate::report::{BenchReport, write_json};
use crate::trial::{FIXED_ARRAY_WIDTHS, Strategy, run_trial};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "mipstore-bench")]
#[command(about = "Time mip chain generation for each buffer storage strategy")]
struct Cli {
    /// Base image width in pixels
    #[arg(long, default_value_t = DEFAULT_BASE_WIDTH)]
    size: usize,

    /// Storage strategy to run; repeat the flag for several (default: all)
    #[arg(long = "strategy", value_enum)]
    strategies: Vec<Strategy>,

    /// Iterations per strategy
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    /// Write the timings as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Save every mip level of the last iteration as PNG into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn strategies(&self) -> Vec<Strategy> {
        if self.strategies.is_empty() {
            return Strategy::ALL.to_vec();
        }

        let mut out = Vec::with_capacity(self.strategies.len());
        for &s in &self.strategies {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        out
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.size == 0 {
        bail!("--size must be at least 1");
    }
    if cli.repeat == 0 {
        bail!("--repeat must be at least 1");
    }

    let layout = MipLayout::new(cli.size).context("building mip layout")?;
    info!(
        base_width = layout.base_width(),
        levels = layout.level_count(),
        channels = layout.total_channels(),
        "starting benchmark"
    );

    let mut report = BenchReport::new(&layout);

    for (idx, strategy) in cli.strategies().into_iter().enumerate() {
        if idx > 0 {
            println!();
        }
        println!("{}:", strategy.label());

        for iteration in 0..cli.repeat {
            let keep_levels = cli.dump_dir.is_some() && iteration + 1 == cli.repeat;
            let Some(outcome) = run_trial(strategy, &layout, keep_levels)
                .with_context(|| format!("running {} trial", strategy.label()))?
            else {
                warn!(
                    base_width = layout.base_width(),
                    "fixed array is only compiled for widths {FIXED_ARRAY_WIDTHS:?}; skipping"
                );
                println!("  skipped (no fixed-size instantiation for width {})", cli.size);
                break;
            };

            let prefix = if cli.repeat > 1 {
                format!("  [{iteration}] ")
            } else {
                "  ".to_string()
            };
            println!("{prefix}init: {:.6} ms", outcome.init_ms);
            println!("{prefix}mips: {:.6} ms", outcome.mips_ms);

            if let (Some(dir), Some(levels)) = (&cli.dump_dir, &outcome.levels) {
                dump::save_levels(dir, strategy, &layout, levels)?;
                info!(dir = %dir.display(), strategy = strategy.name(), "saved mip levels");
            }

            report.record(strategy, iteration, &outcome);
        }

        if cli.repeat > 1
            && let Some(s) = report.summary(strategy)
        {
            println!(
                "  init min/mean: {:.6} / {:.6} ms",
                s.init_min_ms, s.init_mean_ms
            );
            println!(
                "  mips min/mean: {:.6} / {:.6} ms",
                s.mips_min_ms, s.mips_mean_ms
            );
        }
    }

    let mismatched = report.disagreeing_strategies();
    if !mismatched.is_empty() {
        warn!(?mismatched, "strategies produced different 1x1 levels");
    }

    if let Some(path) = &cli.json {
        write_json(path, &report)?;
        println!("\nresults written to {}", path.display());
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use crate::Cli;
    use crate::trial::Strategy;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_reference_run() {
        let cli = Cli::try_parse_from(["mipstore-bench"]).expect("parses");
        assert_eq!(cli.size, 512);
        assert_eq!(cli.repeat, 1);
        assert_eq!(cli.strategies(), Strategy::ALL.to_vec());
        assert!(cli.json.is_none());
        assert!(cli.dump_dir.is_none());
    }

    #[test]
    fn repeated_strategies_are_deduplicated_in_order() {
        let cli = Cli::try_parse_from([
            "mipstore-bench",
            "--strategy",
            "raw",
            "--strategy",
            "vector",
            "--strategy",
            "raw",
            "-vv",
        ])
        .expect("parses");
        assert_eq!(cli.strategies(), vec![Strategy::Raw, Strategy::Vector]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Cli::try_parse_from(["mipstore-bench", "--strategy", "linked"]).is_err());
    }
}
