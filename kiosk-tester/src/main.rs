mod scenarios;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use scenarios::{FIXTURE_CATALOG, get_all_scenarios, get_scenarios_by_names, session_from_feed};

#[derive(Debug, Parser)]
#[command(name = "kiosk-tester", version = "0.1.0")]
#[command(about = "Automated QA scenarios for the Kiosk storefront widget core")]
struct Args {
    /// Scenarios to run (comma-separated); "all" runs everything
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// Catalog feed to run against instead of the embedded fixture
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list {
        for scenario in get_all_scenarios() {
            println!("{:<14} {}", scenario.name.bold(), scenario.desc);
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(failures) if failures == 0 => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{}", format!("{failures} scenario(s) failed").red().bold());
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<usize> {
    let feed = match &args.catalog {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog feed {}", path.display()))?,
        None => FIXTURE_CATALOG.to_string(),
    };

    let selected = if args.scenarios.trim().eq_ignore_ascii_case("all") {
        get_all_scenarios()
    } else {
        let names = split_csv(&args.scenarios);
        let selected = get_scenarios_by_names(&names);
        anyhow::ensure!(
            !selected.is_empty(),
            "no scenarios match {:?}; use --list to see what exists",
            args.scenarios
        );
        selected
    };

    let mut failures = 0;
    for scenario in &selected {
        log::info!("running scenario {}", scenario.name);
        // Every scenario gets a fresh session; state never leaks across runs.
        let outcome = session_from_feed(&feed)
            .and_then(|mut session| (scenario.test_fn)(&mut session));
        match outcome {
            Ok(()) => println!("{} {}", "PASS".green().bold(), scenario.name),
            Err(error) => {
                failures += 1;
                println!("{} {} - {error:#}", "FAIL".red().bold(), scenario.name);
            }
        }
    }

    println!(
        "{} passed, {} failed",
        selected.len() - failures,
        failures
    );
    Ok(failures)
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
