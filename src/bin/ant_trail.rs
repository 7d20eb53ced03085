//! Interactive reference run: four places, three ants, an update, then a
//! fourth ant and a final update.
//!
//! Set `RUST_LOG=u_antcolony=debug` to see per-round diagnostics on stderr.

use std::error::Error;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use u_antcolony::aco::input::read_pheromone_matrix;
use u_antcolony::aco::scenario::{ant_label, reference_config, reference_problem, PLACES};
use u_antcolony::aco::Colony;

const RULE: &str = "--------------------------------------------------";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let problem = reference_problem();
    let config = reference_config();
    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "--- Ant Colony Optimization Setup ({} Cities) ---", problem.size())?;
    writeln!(
        out,
        "Places: {}. Start: {}, End: {}.",
        PLACES.join(", "),
        problem.label(problem.start()),
        problem.label(problem.end())
    )?;
    writeln!(out, "\nCOST MATRIX (Fixed):")?;
    write!(out, "{}", problem.costs())?;

    writeln!(
        out,
        "\nEnter Initial Pheromone Matrix ({0}x{0}):",
        problem.size()
    )?;
    let initial = read_pheromone_matrix(&mut io::stdin().lock(), &mut out, problem.size())?;

    writeln!(
        out,
        "\nParameters: Alpha={}, Beta={}, Q={}, Rho={}",
        config.alpha, config.beta, config.deposit, config.evaporation
    )?;
    writeln!(out, "{RULE}")?;

    let mut colony = Colony::new(&problem, &config, initial);
    let mut ordinal = 0;
    for &ants in &config.rounds {
        let first = ant_label(ordinal);
        let last = ant_label(ordinal + ants - 1);
        writeln!(out, "\nRound {}: ants {first}..{last}", colony.rounds_run() + 1)?;

        let report = colony.run_round(ants);
        for tour in &report.tours {
            writeln!(
                out,
                "  Ant {}: {} (Cost: {:.2})",
                ant_label(ordinal),
                problem.format_path(&tour.path),
                tour.cost
            )?;
            ordinal += 1;
        }

        writeln!(out, "{RULE}")?;
        writeln!(out, "Pheromone Matrix after {first}..{last} update:")?;
        write!(out, "{}", report.pheromone)?;
        writeln!(out, "{RULE}")?;
    }

    Ok(())
}
