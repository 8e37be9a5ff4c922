//! Headless Mitigation Runner
//!
//! Resolves a scenario file (roll components, source metadata, defense
//! profile, bypass overrides) and prints the outcome as text or JSON.
//! Useful for rules authors debugging homebrew content.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use wardbreak::bypass::OverrideChain;
use wardbreak::classify::{DamageSource, RollComponent};
use wardbreak::core::error::{Result, WardError};
use wardbreak::core::types::AbilityDeltaEntry;
use wardbreak::engine::{resolve, ResolutionContext, Tuning};
use wardbreak::profile::DefenseProfile;
use wardbreak::registry::{loader, PriorityLadder};

/// Headless Mitigation Runner - resolve one damage scenario
#[derive(Parser, Debug)]
#[command(name = "mitigation_runner")]
#[command(about = "Resolve a damage scenario and print the mitigation outcome")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Optional registry content file (TOML) layered over the builtin catalog
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable verbose resolution logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Scenario file structure.
#[derive(Deserialize)]
struct Scenario {
    components: Vec<RollComponent>,
    #[serde(default)]
    source: DamageSource,
    #[serde(default)]
    profile: DefenseProfile,
    #[serde(default)]
    overrides: OverrideChain,
    /// Optional priority-ladder override: array of tag-id arrays.
    #[serde(default)]
    ladder: Option<Vec<Vec<String>>>,
    #[serde(default)]
    tuning: Option<Tuning>,
}

/// JSON output structure
#[derive(Serialize)]
struct Outcome {
    hp_delta: i64,
    escalation_rank: i32,
    ability_deltas: Vec<AbilityDeltaEntry>,
    surviving_instances: Vec<InstanceOutcome>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct InstanceOutcome {
    tags: Vec<String>,
    value: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "wardbreak=debug"
        } else {
            "wardbreak=warn"
        })
        .init();

    let content = fs::read_to_string(&args.scenario)?;
    let scenario: Scenario = serde_json::from_str(&content)?;

    let mut ctx = ResolutionContext::standard();
    if let Some(path) = &args.registry {
        let (registry, ladder) = loader::load_content(path)?;
        ctx.registry = registry;
        if let Some(ladder) = ladder {
            ctx.ladder = ladder;
        }
    }
    if let Some(raw) = &scenario.ladder {
        ctx.ladder = PriorityLadder::from_raw(raw);
    }
    ctx.overrides = scenario.overrides.clone();
    if let Some(tuning) = scenario.tuning {
        ctx.tuning = tuning;
    }

    let report = resolve(&scenario.components, &scenario.source, &scenario.profile, &ctx);

    let outcome = Outcome {
        hp_delta: report.hp_delta,
        escalation_rank: report.escalation_rank,
        ability_deltas: report.ability_deltas.clone(),
        surviving_instances: report
            .instances
            .iter()
            .map(|i| InstanceOutcome {
                tags: {
                    let mut tags: Vec<String> =
                        i.tags.iter().map(|t| t.as_str().to_string()).collect();
                    tags.sort();
                    tags
                },
                value: i.value,
            })
            .collect(),
        warnings: report.warnings.clone(),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        "text" => print_text(&outcome),
        other => {
            return Err(WardError::Scenario(format!(
                "unknown output format '{}'",
                other
            )))
        }
    }

    Ok(())
}

fn print_text(outcome: &Outcome) {
    println!("=== MITIGATION OUTCOME ===");
    println!("Hit-point delta: {}", outcome.hp_delta);
    println!("Escalation rank: {}", outcome.escalation_rank);
    for instance in &outcome.surviving_instances {
        println!("  [{}] -> {}", instance.tags.join(", "), instance.value);
    }
    for delta in &outcome.ability_deltas {
        println!(
            "  ability {} {}: {}",
            delta.ability.key(),
            delta.kind.key(),
            delta.amount
        );
    }
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }
}
