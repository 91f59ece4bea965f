//! tsag-rs CLI for generating anomalies and splicing them into series.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tsag::core::with_default_rng;
use tsag::prelude::*;

#[derive(Parser)]
#[command(name = "tsag")]
#[command(author, version)]
#[command(about = "Time series anomaly generator - synthesize labeled anomalies from template windows")]
#[command(long_about = "tsag-rs: generate labeled anomalies for time series.

Series and specs are JSON. Any JSON argument may be given inline or as @path
to read it from a file. A spec is either a bare kind name (defaults are used)
or an object tagged with \"kind\".

EXAMPLES:
  # List anomaly kinds and their defaults
  tsag kinds

  # Level-shift a template by half its span
  tsag generate --spec '{\"kind\": \"range_shift\", \"ratio\": 0.5}' --template '[0, 1, 0, -1]'

  # Chain several anomalies and splice them into a host at a random position
  tsag insert --spec @compound.json --template @template.json --host @host.json --seed 42 --labels

ANOMALY KINDS:
  point            - spikes a few standard deviations out
  frequency_shift  - the pattern replayed faster
  amplitude_shift  - fluctuation scaled around the mean
  range_shift      - level shift proportional to the span
  noisy            - seeded Gaussian noise
  compound         - ordered chain of steps

The random insertion position honours TSAG_SEED when --seed is not given.")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List anomaly kinds with their default parameters
    Kinds,
    /// Print a spec with defaults filled in, optionally validating it
    Describe {
        /// Anomaly spec (kind name, JSON object, or @file)
        #[arg(long, value_name = "SPEC")]
        spec: String,

        /// Validate against a template of this length
        #[arg(long, value_name = "N")]
        len: Option<usize>,
    },
    /// Print the anomalous variant of a template
    Generate {
        /// Anomaly spec (kind name, JSON object, or @file)
        #[arg(long, value_name = "SPEC")]
        spec: String,

        /// Template window as a JSON array (or @file)
        #[arg(long, value_name = "JSON")]
        template: String,
    },
    /// Splice a generated anomaly into a host series
    Insert {
        /// Anomaly spec (kind name, JSON object, or @file)
        #[arg(long, value_name = "SPEC")]
        spec: String,

        /// Template window as a JSON array (or @file)
        #[arg(long, value_name = "JSON")]
        template: String,

        /// Host series as a JSON array (or @file)
        #[arg(long, value_name = "JSON")]
        host: String,

        /// Start index of the anomaly; random when omitted
        #[arg(long, value_name = "N")]
        index: Option<usize>,

        /// Random seed for the insertion position
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Also print the anomaly window and per-sample labels
        #[arg(long, default_value = "false")]
        labels: bool,
    },
}

/// Output of `tsag insert --labels`.
#[derive(Serialize)]
struct LabeledOutput<'a> {
    anomaly: String,
    start: usize,
    end: usize,
    series: &'a [f64],
    labels: Vec<u8>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    match cli.command {
        Commands::Kinds => handle_kinds(),
        Commands::Describe { spec, len } => handle_describe(&spec, len),
        Commands::Generate { spec, template } => handle_generate(&spec, &template),
        Commands::Insert {
            spec,
            template,
            host,
            index,
            seed,
            labels,
        } => handle_insert(&spec, &template, &host, index, seed, labels),
    }
}

fn handle_kinds() -> Result<()> {
    println!("Available anomaly kinds:\n");
    for kind in AnomalySpec::KINDS {
        let spec = AnomalySpec::default_for(kind)
            .with_context(|| format!("no default for kind '{kind}'"))?;
        println!("  {:<16} {}", kind, serde_json::to_string(&spec)?);
    }
    println!("\nUsage:");
    println!("  tsag describe --spec KIND");
    println!("  tsag generate --spec KIND --template '[...]'");
    Ok(())
}

fn handle_describe(spec: &str, len: Option<usize>) -> Result<()> {
    let spec = parse_spec(spec)?;
    if let Some(len) = len {
        if len == 0 {
            bail!("Template length must be at least 1");
        }
        spec.validate(len)
            .with_context(|| format!("Invalid anomaly spec for a template of length {len}"))?;
        println!(
            "{} - {} (output length {})",
            spec.name(),
            spec.params(),
            spec.output_len(len)
        );
    }
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

fn handle_generate(spec: &str, template: &str) -> Result<()> {
    let anomaly = build_anomaly(spec, template)?;
    tracing::info!("{}", anomaly.describe());
    println!("{}", serde_json::to_string(anomaly.generate())?);
    Ok(())
}

fn handle_insert(
    spec: &str,
    template: &str,
    host: &str,
    index: Option<usize>,
    seed: Option<u64>,
    labels: bool,
) -> Result<()> {
    let anomaly = build_anomaly(spec, template)?;
    let host: Vec<f64> = parse_json(host, "host series")?;

    let labeled = match seed {
        Some(seed) => {
            let mut rng = Seed::new(seed).to_rng();
            anomaly.insert_labeled(&host, index, &mut rng)
        }
        None => with_default_rng(|rng| anomaly.insert_labeled(&host, index, rng)),
    }
    .context("Failed to insert anomaly")?;

    tracing::info!(
        start = labeled.start,
        end = labeled.end,
        "inserted {}",
        anomaly.describe()
    );

    if labels {
        let output = LabeledOutput {
            anomaly: anomaly.describe(),
            start: labeled.start,
            end: labeled.end,
            series: &labeled.series,
            labels: labeled.labels().into_iter().map(u8::from).collect(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string(&labeled.series)?);
    }
    Ok(())
}

fn build_anomaly(spec: &str, template: &str) -> Result<Anomaly<AnomalySpec>> {
    let spec = parse_spec(spec)?;
    let values: Vec<f64> = parse_json(template, "template")?;
    let template = Template::new(values).context("Invalid template")?;
    spec.build(template).context("Invalid anomaly spec for this template")
}

/// Parse a spec given as a bare kind name, a JSON object, or `@path`.
fn parse_spec(arg: &str) -> Result<AnomalySpec> {
    let trimmed = arg.trim();
    if let Some(spec) = AnomalySpec::default_for(trimmed) {
        return Ok(spec);
    }
    if !trimmed.starts_with('{') && !trimmed.starts_with('@') {
        bail!(
            "Unknown anomaly kind: '{}'. Use 'tsag kinds' to see available kinds.",
            trimmed
        );
    }
    parse_json(trimmed, "anomaly spec")
}

/// Parse inline JSON, or the contents of a file when `arg` is `@path`.
fn parse_json<T: serde::de::DeserializeOwned>(arg: &str, what: &str) -> Result<T> {
    let text = match arg.strip_prefix('@') {
        Some(path) => read_file(Path::new(path))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {what} as JSON"))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}
