use clap::{Parser, Subcommand};
use rulebook::{Rulebook, RulebookData};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use symcheck_core::{
    constants::{
        BUILTIN_RULEBOOK_YAML, DEFAULT_MIN_DISTINCT_SYMPTOMS, DEFAULT_PARTIAL_THRESHOLD_PERCENT,
    },
    CoreConfig, RuleSet, Signal, SymptomChecker,
};

#[derive(Parser)]
#[command(name = "symcheck")]
#[command(about = "Rule-based symptom checker CLI (educational demo, not medical advice)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a list of symptoms
    Check {
        /// Symptoms; each argument may itself be comma-separated
        #[arg(required = true)]
        symptoms: Vec<String>,
        /// Rulebook YAML file (defaults to the built-in rulebook)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Partial match threshold in whole percent (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        /// Minimum number of distinct symptoms (at least 1)
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        min_symptoms: Option<usize>,
        /// Print the full assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the canonical form of a symptom phrase
    Normalize {
        /// Symptom phrase
        phrase: String,
        /// Rulebook YAML file (defaults to the built-in rulebook)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Rulebook utilities
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
}

#[derive(Subcommand)]
enum RulesCommands {
    /// Check that a rulebook file parses and all clauses are well-formed
    Validate {
        /// Rulebook YAML file
        path: PathBuf,
    },
    /// Print a rulebook as canonical YAML
    Export {
        /// Rulebook YAML file (defaults to the built-in rulebook)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// List triage rules and conditions
    List {
        /// Rulebook YAML file (defaults to the built-in rulebook)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check {
            symptoms,
            rules,
            threshold,
            min_symptoms,
            json,
        }) => {
            let cfg = CoreConfig::new(
                threshold.unwrap_or(DEFAULT_PARTIAL_THRESHOLD_PERCENT),
                min_symptoms.unwrap_or(DEFAULT_MIN_DISTINCT_SYMPTOMS),
                rules,
            )?;
            let rule_set = RuleSet::resolve(&cfg)?;
            let checker = SymptomChecker::new(Arc::new(cfg), Arc::new(rule_set));

            let recommendation = checker.recommend(&split_symptoms(&symptoms));
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                for line in recommendation.lines() {
                    println!("{line}");
                }
            }
        }
        Some(Commands::Normalize { phrase, rules }) => {
            let rule_set = load_rule_set(rules.as_deref())?;
            println!("{}", normalize_phrase(&rule_set, &phrase)?);
        }
        Some(Commands::Rules { command }) => match command {
            RulesCommands::Validate { path } => {
                println!("{}", validate_rulebook(&path)?);
            }
            RulesCommands::Export { rules } => {
                let data = load_rulebook_data(rules.as_deref())?;
                print!("{}", Rulebook::render(&data)?);
            }
            RulesCommands::List { rules } => {
                let rule_set = load_rule_set(rules.as_deref())?;
                for line in describe_rule_set(&rule_set) {
                    println!("{line}");
                }
            }
        },
        None => {
            println!("Use 'symcheck --help' for commands");
        }
    }

    Ok(())
}

/// Flatten arguments such as `["fever, cough", "sore throat"]` into individual phrases.
fn split_symptoms(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(|s| s.trim().to_string())
        .collect()
}

fn load_rule_set(path: Option<&Path>) -> Result<RuleSet, Box<dyn std::error::Error>> {
    let rule_set = match path {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::builtin()?,
    };
    Ok(rule_set)
}

fn normalize_phrase(rule_set: &RuleSet, phrase: &str) -> Result<String, Box<dyn std::error::Error>> {
    let token = rule_set
        .synonyms
        .normalize(phrase)
        .ok_or("symptom phrase is blank")?;
    Ok(token.to_string())
}

/// Load `path` through the full clause parser and summarise it.
fn validate_rulebook(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let rule_set = RuleSet::load(path)
        .map_err(|e| format!("error validating {}: {}", path.display(), e))?;
    Ok(format!(
        "Rulebook OK: {} conditions, {} triage rules, {} synonyms",
        rule_set.knowledge_base.len(),
        rule_set.triage.rules().len(),
        rule_set.synonyms.len()
    ))
}

fn load_rulebook_data(path: Option<&Path>) -> Result<RulebookData, Box<dyn std::error::Error>> {
    let data = match path {
        Some(path) => Rulebook::load(path)?,
        None => Rulebook::parse(BUILTIN_RULEBOOK_YAML)?,
    };
    Ok(data)
}

fn describe_rule_set(rule_set: &RuleSet) -> Vec<String> {
    let mut lines = vec!["Triage rules:".to_string()];
    for (index, rule) in rule_set.triage.rules().iter().enumerate() {
        let (kind, symptoms) = match &rule.signal {
            Signal::AnyOf(symptoms) => ("any of", symptoms),
            Signal::AllOf(symptoms) => ("all of", symptoms),
        };
        let symptoms: Vec<&str> = symptoms.iter().map(|s| s.as_str()).collect();
        lines.push(format!(
            "  {}. [{:?}] {}: {}",
            index + 1,
            rule.severity,
            kind,
            symptoms.join(", ")
        ));
    }

    lines.push("Conditions:".to_string());
    for condition in rule_set.knowledge_base.conditions() {
        let clauses: Vec<String> = condition
            .requirements()
            .iter()
            .map(ToString::to_string)
            .collect();
        lines.push(format!("  {}: {}", condition.name(), clauses.join("; ")));
    }
    lines
}
