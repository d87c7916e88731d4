//! bell - Hidden-variable Bell experiments
//! Command-line interface for running and reporting the inequality evaluators

use anyhow::{Context, Result};
use bell_core::config::{SEED_VAR, TRIALS_VAR};
use bell_core::{BellConfig, Inequality, InequalityReport, TrialRunner, Verdict};
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bell")]
#[command(author = "SIL Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "A Bell's Inequality Experiment with local hidden variables", long_about = None)]
struct Cli {
    /// Evaluators to run (bell-spin, bell-photon, chsh, ch74, percentage,
    /// tri-axis-photon, tri-axis-electron, chsh-tracks) or "all"
    #[arg(value_name = "INEQUALITY", default_value = "all")]
    inequalities: Vec<String>,

    /// Trials per statistic (overrides BELL_TRIALS)
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Seed for the random source (overrides BELL_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print reports as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bell=info,bell_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let inequalities = resolve_inequalities(&cli.inequalities)?;

    tracing::info!(trials = config.trials, seed = ?config.seed, "starting run");

    let mut runner = TrialRunner::new(&config).context("cannot build trial runner")?;

    if !cli.json {
        println!("{}", "A Bell's Inequality Experiment!".bold());
    }

    for inequality in inequalities {
        let report = inequality
            .evaluate(&mut runner)
            .with_context(|| format!("evaluating {inequality}"))?;

        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    Ok(())
}

/// Command-line flags shadow the environment before anything is validated
fn resolve_config(cli: &Cli) -> Result<BellConfig> {
    BellConfig::from_env_with(|key| cli_override(cli, key)).context("reading BELL_* configuration")
}

fn cli_override(cli: &Cli, key: &str) -> Option<String> {
    match key {
        TRIALS_VAR => cli.trials.map(|trials| trials.to_string()),
        SEED_VAR => cli.seed.map(|seed| seed.to_string()),
        _ => None,
    }
}

fn resolve_inequalities(names: &[String]) -> Result<Vec<Inequality>> {
    if names.iter().any(|name| name.eq_ignore_ascii_case("all")) {
        return Ok(Inequality::ALL.to_vec());
    }

    names
        .iter()
        .map(|name| name.parse::<Inequality>().map_err(anyhow::Error::from))
        .collect()
}

fn print_report(report: &InequalityReport) {
    println!();
    println!("{}", report.inequality.to_string().cyan().bold());

    let components = report
        .components
        .iter()
        .map(|c| format!("{}={:.4}", c.label, c.value))
        .collect::<Vec<_>>()
        .join(" ");

    println!(
        "  S={:.4} from {} trials == {}",
        report.statistic,
        report.trials,
        colored_verdict(report.verdict)
    );
    println!("  {}", components.dimmed());
    println!("  classical bound: {}", report.inequality.bound());
}

fn colored_verdict(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Classical => verdict.name().green().bold(),
        Verdict::Spooky => verdict.name().magenta().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all() {
        let names = vec!["all".to_string()];
        assert_eq!(resolve_inequalities(&names).unwrap().len(), Inequality::ALL.len());
    }

    #[test]
    fn test_resolve_named() {
        let names = vec!["chsh".to_string(), "ch74".to_string()];
        assert_eq!(
            resolve_inequalities(&names).unwrap(),
            vec![Inequality::Chsh, Inequality::Ch74]
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let names = vec!["bogus".to_string()];
        assert!(resolve_inequalities(&names).is_err());
    }

    #[test]
    fn test_flags_override_config_keys() {
        let cli = Cli::try_parse_from(["bell", "-n", "10", "--seed", "3"]).unwrap();
        assert_eq!(cli_override(&cli, TRIALS_VAR), Some("10".to_string()));
        assert_eq!(cli_override(&cli, SEED_VAR), Some("3".to_string()));
        assert_eq!(cli_override(&cli, "OTHER"), None);

        let bare = Cli::try_parse_from(["bell"]).unwrap();
        assert_eq!(cli_override(&bare, TRIALS_VAR), None);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["bell", "-n", "500", "--seed", "7", "--json", "chsh"]).unwrap();
        assert_eq!(cli.trials, Some(500));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.json);
        assert_eq!(cli.inequalities, vec!["chsh".to_string()]);
    }
}
