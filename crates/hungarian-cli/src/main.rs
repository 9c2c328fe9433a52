use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hungarian_core::{
    read_cost_matrix, solve_with_options, verify, Assignment, AssignmentError, CertificateError,
    CostMatrix, SolverOptions,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "hungarian")]
#[command(about = "Solve a square assignment problem with the Hungarian method")]
#[command(version)]
pub struct Cli {
    #[arg(
        value_name = "INPUT",
        help = "Cost matrix file: N followed by N*N costs (stdin when absent or '-')"
    )]
    input: Option<String>,
    #[arg(long, short, value_enum, default_value = "cost", help = "What to print")]
    mode: Mode,
    #[arg(long, help = "Check the optimality certificate before printing")]
    verify: bool,
    #[arg(long, help = "Re-check solver invariants after every phase")]
    check_invariants: bool,
    #[arg(long, help = "Print solve statistics on stderr")]
    stats: bool,
    #[arg(long, short, help = "Verbose mode: log solver phases on stderr")]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Mode {
    /// Only the optimal total cost.
    Cost,
    /// One `row column` line per row, then the cost.
    Match,
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Solve(AssignmentError),
    Certificate(CertificateError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Solve(err) => write!(f, "{err}"),
            CliError::Certificate(err) => write!(f, "certificate check failed: {err}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<AssignmentError> for CliError {
    fn from(value: AssignmentError) -> Self {
        Self::Solve(value)
    }
}

impl From<CertificateError> for CliError {
    fn from(value: CertificateError) -> Self {
        Self::Certificate(value)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn load(input: Option<&str>) -> Result<CostMatrix, CliError> {
    let matrix = match input {
        None | Some("-") => read_cost_matrix(io::stdin().lock())?,
        Some(path) => read_cost_matrix(File::open(path)?)?,
    };
    Ok(matrix)
}

fn print_assignment(out: &mut impl Write, mode: Mode, assignment: &Assignment) -> io::Result<()> {
    if mode == Mode::Match {
        for (row, col) in assignment.pairs() {
            writeln!(out, "{row} {col}")?;
        }
        writeln!(out, "cost {}", assignment.cost)?;
    } else {
        writeln!(out, "{}", assignment.cost)?;
    }
    out.flush()
}

fn print_stats(assignment: &Assignment) {
    let stats = &assignment.stats;
    eprintln!(
        "phases={} dual_updates={} zero_theta_rounds={} columns_labelled={} longest_path={}",
        stats.phases,
        stats.dual_updates,
        stats.zero_theta_rounds,
        stats.columns_labelled,
        stats.longest_augmenting_path
    );
    for record in &stats.phase_records {
        eprintln!(
            "phase={} roots={} rounds={} labelled_rows={} path_len={} dual_objective={}",
            record.phase,
            record.roots,
            record.rounds,
            record.labelled_rows,
            record.path_len,
            record.dual_objective
        );
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let costs = load(cli.input.as_deref())?;
    debug!(n = costs.size(), "loaded cost matrix");

    let opts = SolverOptions {
        check_invariants: cli.check_invariants,
        record_phases: cli.stats,
    };
    let assignment = solve_with_options(&costs, &opts)?;
    if cli.verify {
        verify(&costs, &assignment)?;
        debug!("certificate verified");
    }
    if cli.stats {
        print_stats(&assignment);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    print_assignment(&mut out, cli.mode, &assignment)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}
