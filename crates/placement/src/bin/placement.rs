//! Placement command line.
//!
//! **Usage:**
//! ```bash
//! placement train --data students.csv --out model.json [--calibrate --folds 5 --ensemble]
//! placement predict --profile '{"cgpa": 8.1, "attendance": 85, ...}'
//! placement explain [--profile '{...}']
//! placement whatif --profile '{...}' --role "Data Scientist" --skill Python --skill SQL
//! placement whatif --profile '{...}' --feature internships --value 2
//! ```
//!
//! Serving commands read `placement.toml` from the working directory when it
//! exists; a relative `artifact_path` in it is resolved against the config
//! file's directory. `RUST_LOG` controls log output.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use placement::data::load_csv;
use placement::features::{Feature, FeatureVector};
use placement::persist;
use placement::training::{CalibrationConfig, Trainer, TrainerConfig, Verbosity};
use placement::whatif::{FeatureChange, Session, WhatIf};
use placement::{PlacementConfig, PlacementModel, PlacementService, Role};

#[derive(Parser, Debug)]
#[command(name = "placement")]
#[command(about = "Placement-probability scoring for student profiles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train an artifact from a labelled CSV file
    Train(TrainArgs),
    /// Score one profile
    Predict(ProfileArgs),
    /// Show feature influences, and per-feature contributions for a profile
    Explain(ExplainArgs),
    /// Simulate a single change against an assessed profile
    Whatif(WhatIfArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// CSV with the six feature columns and `placed`
    #[arg(long, value_name = "FILE")]
    data: PathBuf,

    /// Where to write the artifact
    #[arg(long, value_name = "FILE", default_value = "model.json")]
    out: PathBuf,

    /// Wrap the pipeline in sigmoid calibration
    #[arg(long)]
    calibrate: bool,

    /// Stratified folds for calibration
    #[arg(long, default_value_t = 5)]
    folds: usize,

    /// Keep one calibrated pipeline per fold
    #[arg(long, requires = "calibrate")]
    ensemble: bool,

    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Inverse L2 regularisation strength
    #[arg(short = 'C', long = "c", default_value_t = 1.0)]
    c: f64,
}

#[derive(Args, Debug)]
struct ModelArgs {
    /// Serving config
    #[arg(long, value_name = "FILE", default_value = "placement.toml", env = "PLACEMENT_CONFIG")]
    config: PathBuf,

    /// Artifact path, overriding the config
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Profile as a JSON object of the six named features
    #[arg(long, value_name = "JSON")]
    profile: String,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    #[command(flatten)]
    model: ModelArgs,

    #[arg(long, value_name = "JSON")]
    profile: Option<String>,
}

#[derive(Args, Debug)]
struct WhatIfArgs {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Target role; the skill score is computed from its checklist
    #[arg(long, conflicts_with = "feature")]
    role: Option<String>,

    /// A checklist skill the student has (repeatable)
    #[arg(long = "skill", requires = "role")]
    skills: Vec<String>,

    /// Feature to change
    #[arg(long, requires = "value")]
    feature: Option<String>,

    #[arg(long)]
    value: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("placement=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Train(args) => train(args),
        Command::Predict(args) => predict(args),
        Command::Explain(args) => explain(args),
        Command::Whatif(args) => whatif(args),
    }
}

fn train(args: TrainArgs) -> Result<()> {
    let data = load_csv(&args.data)
        .with_context(|| format!("loading training data from {}", args.data.display()))?;
    let calibration = args.calibrate.then_some(CalibrationConfig {
        folds: args.folds,
        ensemble: args.ensemble,
    });
    let config = TrainerConfig::builder()
        .test_fraction(args.test_fraction)
        .seed(args.seed)
        .c(args.c)
        .maybe_calibration(calibration)
        .verbosity(Verbosity::Info)
        .build()?;

    let outcome = Trainer::new(config).train(&data)?;
    persist::save_json(&args.out, &outcome.artifact, &outcome.meta)
        .with_context(|| format!("writing artifact to {}", args.out.display()))?;
    info!(path = %args.out.display(), kind = %outcome.artifact.kind(), "saved artifact");

    let report = &outcome.report;
    println!("rows       train={} test={}", report.n_train, report.n_test);
    println!("accuracy   {:.4}", report.accuracy);
    println!("log_loss   {:.4}", report.log_loss);
    match report.auc {
        Some(auc) => println!("roc_auc    {auc:.4}"),
        None => println!("roc_auc    undefined"),
    }
    println!("brier      {:.4}", report.brier);
    if let Some(priority) = &report.priority {
        println!("priority");
        for influence in priority {
            println!("  {:<12} {:+.4}", influence.feature.name(), influence.weight);
        }
    }
    Ok(())
}

fn open_service(args: &ModelArgs) -> Result<PlacementService> {
    let config = PlacementConfig::load_or_default(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;
    let path = args
        .model
        .clone()
        .unwrap_or_else(|| config.artifact_path_for(&args.config));
    let model = PlacementModel::load(&path)
        .with_context(|| format!("loading artifact from {}", path.display()))?;
    Ok(PlacementService::from_config(Arc::new(model), &config)?)
}

fn parse_profile(json: &str) -> Result<FeatureVector> {
    let value: serde_json::Value = serde_json::from_str(json).context("profile is not valid JSON")?;
    let Some(object) = value.as_object() else {
        bail!("profile must be a JSON object");
    };
    Ok(FeatureVector::from_named(object.iter())?)
}

fn predict(args: ProfileArgs) -> Result<()> {
    let service = open_service(&args.model)?;
    let vector = parse_profile(&args.profile)?;
    let assessment = service.assess(&vector)?;

    println!("probability  {:.4}", assessment.probability);
    println!("tier         {} ({})", assessment.tier, assessment.tier.label());
    if assessment.uncertain {
        println!("note         near the decision boundary; treat as a coin flip");
    }
    match &assessment.influences {
        Ok(influences) => {
            let order: Vec<&str> = influences.iter().map(|i| i.feature.name()).collect();
            println!("priority     {}", order.join(", "));
        }
        Err(err) => println!("priority     unavailable: {err}"),
    }
    Ok(())
}

fn explain(args: ExplainArgs) -> Result<()> {
    let service = open_service(&args.model)?;
    let model = service.model();

    for influence in model.influences(service.ranking())? {
        println!("{:<12} {:+.4}", influence.feature.name(), influence.weight);
    }

    if let Some(profile) = &args.profile {
        let contributions = model.contributions(&parse_profile(profile)?)?;
        println!();
        println!("{:<12} {:+.4}", "intercept", contributions.base_value);
        for (feature, value) in contributions.ranked() {
            println!("{:<12} {:+.4}", feature.name(), value);
        }
        println!("{:<12} {:+.4}", "margin", contributions.total());
    }
    Ok(())
}

fn whatif(args: WhatIfArgs) -> Result<()> {
    let service = open_service(&args.profile.model)?;
    let mut vector = parse_profile(&args.profile.profile)?;

    let role = match &args.role {
        Some(name) => {
            let role = Role::parse(name).with_context(|| format!("unknown role `{name}`"))?;
            vector = vector.with(Feature::Skills, role.skill_score(&args.skills));
            Some(role)
        }
        None => None,
    };

    let mut session = Session::new();
    let assessment = service.assess_in(&mut session, vector)?;
    println!("baseline     {:.4} {}", assessment.probability, assessment.tier);

    let outcome = match (role, &args.feature, args.value) {
        (Some(role), _, _) => {
            let missing = role.missing_skills(&args.skills);
            if let Some(next) = missing.first() {
                println!("next skill   {next}");
            }
            session.simulate_next_skill(service.model(), role, &args.skills)?
        }
        (None, Some(name), Some(value)) => {
            let feature = Feature::from_name(name)
                .with_context(|| format!("unknown feature `{name}`"))?;
            session.simulate_change(service.model(), FeatureChange::new(feature, value))?
        }
        _ => bail!("pass either --role or --feature with --value"),
    };

    match outcome {
        WhatIf::Simulated(o) => {
            println!("{}    {} -> {}", o.feature, o.from, o.to);
            println!("simulated    {:.4} ({:+.4})", o.probability, o.delta);
        }
        WhatIf::AllSkillsMet => println!("all required skills already selected"),
        WhatIf::Unavailable => println!("assess a profile first"),
    }
    Ok(())
}
