//! Thin driver: pick a problem, solve every instance file in a directory,
//! write the result files. All search logic lives in the library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use metasolve::error::Result;
use metasolve::problems::{assignment, binpacking, circuits, knapsack, queens, tsp};
use metasolve::report::{self, SolvedInstance};
use metasolve::rng::RandomNumberGenerator;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Problem {
    /// Binary knapsack (genetic algorithm)
    Mochila,
    /// Traveling salesman routing (simulated annealing)
    Tsp,
    /// Generalized assignment (simulated annealing)
    Designacao,
    /// One-dimensional bin packing (first fit decreasing)
    Empacotamento,
    /// Circuit connections (simulated annealing)
    Circuitos,
    /// N-queens (simulated annealing)
    Rainhas,
}

#[derive(Debug, Parser)]
#[command(name = "metasolve", about = "Metaheuristic solvers for classic combinatorial problems")]
struct Args {
    /// Which problem the instance files belong to.
    #[arg(value_enum)]
    problem: Problem,

    /// Directory holding the `.txt` instance files.
    input_dir: PathBuf,

    /// Output directory; defaults to a `saidas` sibling of the input directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for the random source, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn solve(problem: Problem, path: &std::path::Path, rng: &mut RandomNumberGenerator) -> Result<SolvedInstance> {
    match problem {
        Problem::Mochila => knapsack::solve_file(path, rng),
        Problem::Tsp => tsp::solve_file(path, rng),
        Problem::Designacao => assignment::solve_file(path, rng),
        Problem::Empacotamento => binpacking::solve_file(path),
        Problem::Circuitos => circuits::solve_file(path, rng),
        Problem::Rainhas => queens::solve_file(path, rng),
    }
}

fn run(args: Args) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };
    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| report::default_output_dir(&args.input_dir));

    let instances = report::list_instances(&args.input_dir)?;
    if instances.is_empty() {
        println!("nenhum arquivo de entrada em {}", args.input_dir.display());
        return Ok(());
    }

    for path in instances {
        let solved = solve(args.problem, &path, &mut rng)?;
        report::write_output(&out_dir.join(&solved.file_name), &solved.body)?;
        println!("{} -> {}", solved.summary, solved.file_name);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
