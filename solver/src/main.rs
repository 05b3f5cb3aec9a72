use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use murdoku::loader::load_puzzle;
use murdoku::solver::{solve_with_progress, NoProgress, Progress, SolveOptions, Strategy};
use murdoku::{Puzzle, Solution};

/// Murdoku solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the puzzle file (JSON)
    puzzle: PathBuf,

    /// Search strategy: exhaustive or backtracking
    #[arg(short, long, default_value_t = Strategy::Backtracking)]
    strategy: Strategy,

    /// Show a progress bar while searching
    #[arg(short, long)]
    verbose: bool,

    /// Disable pruning hints (full scan; same answer, more work)
    #[arg(long)]
    no_pruning: bool,

    /// Search branches in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debug: bool,
}

struct Bar(ProgressBar);

impl Progress for Bar {
    fn set_total(&self, total: u64) {
        self.0.set_length(total);
        self.0.set_position(0);
    }

    fn advance(&self, delta: u64) {
        self.0.inc(delta);
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

fn progress_bar(strategy: Strategy) -> anyhow::Result<Bar> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    bar.set_message(strategy.to_string());
    Ok(Bar(bar))
}

fn print_solution(puzzle: &Puzzle, solution: &Solution) {
    match solution {
        Solution::Unique { placement, murderer } => {
            println!("=== Murdoku solved ===\n");
            print!("{}", puzzle.render(placement));
            println!();
            for line in puzzle.describe(placement) {
                println!("  {line}");
            }
            println!("\n  Murderer: {}", puzzle.name_of(*murderer).unwrap_or("?"));
        }
        Solution::NoSolution => println!("[NO SOLUTION] no placement satisfies every clue"),
        Solution::Ambiguous { candidates } => {
            println!("[MULTIPLE SOLUTIONS] {} placements satisfy every clue", candidates.len());
            for (i, candidate) in candidates.iter().enumerate() {
                let murderer = candidate.murderer.and_then(|m| puzzle.name_of(m)).unwrap_or("?");
                println!("\n  Solution {}: murderer={murderer}", i + 1);
                for line in puzzle.describe(&candidate.placement) {
                    println!("    {line}");
                }
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match try_main(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load, solve and print. Returns whether the puzzle had exactly one solution.
fn try_main(cli: Cli) -> anyhow::Result<bool> {
    let puzzle = load_puzzle(&cli.puzzle).with_context(|| format!("loading {}", cli.puzzle.display()))?;
    log::info!("loaded {} with {} people", cli.puzzle.display(), puzzle.size());

    let options = SolveOptions {
        verbose: cli.verbose,
        pruning: !cli.no_pruning,
        parallel: cli.parallel,
    };

    let t_solve = Instant::now();
    let report = if cli.verbose {
        solve_with_progress(&puzzle, cli.strategy, &options, &progress_bar(cli.strategy)?)?
    } else {
        solve_with_progress(&puzzle, cli.strategy, &options, &NoProgress)?
    };
    let solve_secs = t_solve.elapsed().as_secs_f64();

    print_solution(&puzzle, &report.solution);
    eprintln!("\n{} search in {solve_secs:.3}s: {}", cli.strategy, report.stats);

    Ok(report.solution.is_unique())
}
