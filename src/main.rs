//! leadscore: website quality scorer and sales-lead classifier CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use leadscore::analyzer::{BatchDriver, BatchSummary, SiteAnalyzer};
use leadscore::config::{load_config, write_starter, CONFIG_FILENAME};
use leadscore::fetcher::HttpFetcher;
use leadscore::input::collect_urls;
use leadscore::reporter::{ConsoleReporter, CsvSink, JsonReporter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// leadscore: score business websites and flag redesign leads
#[derive(Parser, Debug)]
#[command(name = "leadscore")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URLs or bare hostnames to analyze
    urls: Vec<String>,

    /// File with one URL per line (blank lines and # comments ignored)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// CSV output path (default: leads.csv)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print results and summary as JSON
    #[arg(long, short)]
    json: bool,

    /// Seconds to wait between requests (default: 2)
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Skip the status check and broken-image probes
    #[arg(long)]
    lite: bool,

    /// Export only hot leads
    #[arg(long)]
    hot_leads_only: bool,

    /// Path to config file (default: search .leadscorerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode (summary only)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (issues per site, debug logs)
    #[arg(long, short)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .leadscorerc.json with the default settings
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Seconds to wait between requests
        #[arg(long)]
        delay: Option<f64>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(Commands::Init { dir, delay }) = args.command {
        return run_init(dir.as_deref(), delay);
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    // CLI flags override config file
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(
        args.delay,
        args.output.as_deref(),
        args.lite,
        args.hot_leads_only,
    );
    config.validate().context("Invalid command-line options")?;

    let urls = collect_urls(&args.urls, args.file.as_deref())?;
    if urls.is_empty() {
        anyhow::bail!("No URLs to analyze");
    }

    let show_progress = !args.quiet && !args.json;
    if show_progress {
        println!("Starting analysis of {} websites...", urls.len());
    }

    let fetcher = HttpFetcher::new(config.fetch_settings())?;
    let analyzer = SiteAnalyzer::new(fetcher, config.analyzer_options());
    let driver = BatchDriver::new(&analyzer, config.delay());

    let output = config.output_path();
    let mut sink = CsvSink::create(&output, config.hot_leads_only)?;

    let mut console = ConsoleReporter::new().with_thresholds(config.thresholds());
    if args.no_color {
        console = console.without_colors();
    }
    if args.verbose {
        console = console.verbose();
    }

    let total = urls.len();
    let results = driver.try_run_with(&urls, |i, record| {
        if show_progress {
            console.report_record(i, total, record);
        }
        sink.append(record).map(|_| ()).inspect_err(|e| {
            log::warn!("Stopping after {} of {} URLs: {:#}", i + 1, total, e);
        })
    })?;

    log::info!("Exported {} results to {}", sink.written(), output.display());

    let summary = BatchSummary::from_results(&results);
    if args.json {
        println!(
            "{}",
            JsonReporter::new()
                .pretty()
                .report_with_summary(&results, &summary)
        );
    } else {
        console.report_summary(&results, &summary, Some(output.as_path()));
    }

    Ok(ExitCode::SUCCESS)
}

fn run_init(dir: Option<&Path>, delay: Option<f64>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);

    match write_starter(dir, delay)? {
        Some(path) => {
            println!("{}: Created {}", "Done".green().bold(), path.display());
        }
        None => {
            eprintln!(
                "{}: {} already exists; use --dir to write elsewhere or remove it first",
                "Warning".yellow(),
                dir.join(CONFIG_FILENAME).display()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
