use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stunt_cli::config::PlannerConfig;
use stunt_cli::input::{InputFormat, read_problem};
use stunt_cli::logging::init_logging;
use stunt_cli::output::{OutputFormat, render};
use stunt_cli::run::plan_problem;
use stunt_core::SolveStrategy;

/// Plans which tricks to perform at each stage for the highest total score.
#[derive(Debug, Parser)]
#[command(
    name = "stunt-plan",
    author,
    version,
    about = "Maximum-score trick planner over ordered stages"
)]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read the problem from FILE instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Override the input encoding.
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,

    /// Override the output encoding.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Override the solver strategy (memoized or bottom_up).
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<SolveStrategy>,

    /// Override the maximum number of tricks accepted.
    #[arg(long, value_name = "COUNT")]
    max_tricks: Option<usize>,

    /// Exit after reading and validating the input (no plan is computed).
    #[arg(long)]
    validate_only: bool,
}

fn parse_strategy(name: &str) -> Result<SolveStrategy, String> {
    SolveStrategy::from_name(name)
        .ok_or_else(|| format!("unknown strategy '{name}' (expected memoized or bottom_up)"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => PlannerConfig::from_path(path)?,
        None => PlannerConfig::default(),
    };

    if let Some(format) = cli.input_format {
        config.io.input_format = format;
    }

    if let Some(format) = cli.format {
        config.io.output_format = format;
    }

    if let Some(strategy) = cli.strategy {
        config.solver.strategy = strategy;
    }

    if let Some(max_tricks) = cli.max_tricks {
        config.limits.max_tricks = max_tricks;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    let problem = match cli.input.as_ref() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening input {}", path.display()))?;
            read_problem(
                BufReader::new(file),
                config.io.input_format,
                config.limits.max_tricks,
            )
            .with_context(|| format!("reading problem from {}", path.display()))?
        }
        None => read_problem(
            io::stdin().lock(),
            config.io.input_format,
            config.limits.max_tricks,
        )
        .context("reading problem from stdin")?,
    };

    if cli.validate_only {
        println!(
            "Validated input: {} stage{}, {} trick{}",
            problem.stage_count(),
            if problem.stage_count() == 1 { "" } else { "s" },
            problem.trick_count(),
            if problem.trick_count() == 1 { "" } else { "s" }
        );
        return Ok(());
    }

    let report = plan_problem(&problem, config.solver.strategy);
    let rendered = render(&report.plan, &problem, config.io.output_format)
        .context("rendering plan")?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("writing plan to stdout")?;
    stdout.flush().context("flushing stdout")?;

    Ok(())
}
