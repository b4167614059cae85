use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symcheck_core::config::{
    min_symptoms_from_env_value, rulebook_path_from_env_value, threshold_from_env_value,
};
use symcheck_core::constants::{MIN_SYMPTOMS_ENV, PARTIAL_THRESHOLD_ENV, RULES_FILE_ENV};
use symcheck_core::{CoreConfig, RuleSet, SymptomChecker};

const EXIT_COMMAND: &str = "exit";
const PROMPT: &str = "Enter your symptoms (comma-separated): ";

/// Interactive symptom checker shell.
///
/// Reads comma-separated symptoms from stdin, prints the assessment for each entry, and stops
/// on `exit` (any case) or end of input. Log output goes to stderr so it never mixes with the
/// conversation on stdout.
///
/// # Environment Variables
/// - `SYMCHECK_RULES_FILE`: rulebook YAML file (default: built-in rulebook)
/// - `SYMCHECK_PARTIAL_THRESHOLD`: partial match threshold in whole percent (default: 70)
/// - `SYMCHECK_MIN_SYMPTOMS`: minimum distinct symptoms before assessing (default: 3)
/// - `RUST_LOG`: tracing filter
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symcheck=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = CoreConfig::new(
        threshold_from_env_value(std::env::var(PARTIAL_THRESHOLD_ENV).ok())?,
        min_symptoms_from_env_value(std::env::var(MIN_SYMPTOMS_ENV).ok())?,
        rulebook_path_from_env_value(std::env::var(RULES_FILE_ENV).ok()),
    )?;
    let rules = RuleSet::resolve(&cfg)?;

    tracing::info!(
        conditions = rules.knowledge_base.len(),
        threshold = cfg.partial_threshold_percent(),
        "++ Starting symcheck shell"
    );

    let checker = SymptomChecker::new(Arc::new(cfg), Arc::new(rules));
    run_shell(&checker, std::io::stdin().lock(), std::io::stdout().lock())?;

    Ok(())
}

/// Drive one interactive session over `input`, writing everything shown to the user to `out`.
fn run_shell<R: BufRead, W: Write>(
    checker: &SymptomChecker,
    mut input: R,
    mut out: W,
) -> std::io::Result<()> {
    writeln!(out, "Welcome to the Simple Medical Diagnostic Tool! (Demo)")?;
    writeln!(out, "Type 'exit' to quit.")?;
    writeln!(
        out,
        "Enter symptoms comma-separated (e.g., fever, cough, sore throat, sudden onset)"
    )?;
    writeln!(
        out,
        "Tip: try phrases like 'no cough', 'no fever', 'after meal', 'others sick', 'loss of smell'."
    )?;

    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let entry = line.trim();
        if entry.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }

        let symptoms: Vec<&str> = entry.split(',').map(str::trim).collect();
        for result in checker.recommend(&symptoms).lines() {
            writeln!(out, "{result}")?;
        }
    }

    writeln!(out, "Goodbye! Stay well.")?;
    Ok(())
}
