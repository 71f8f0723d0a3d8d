//! rebib command line interface
//!
//! Reads BibTeX-like text, normalizes venue names against a rule library,
//! regenerates citation keys, and prints the cleaned entries to stdout.
//! Warnings go to stderr so the output stays pipeable.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rebib_core::{compile, config, format_entries, pipeline, PipelineConfig, VenueMode};

#[derive(Parser)]
#[command(name = "rebib", about = "Normalize BibTeX entries and regenerate citation keys")]
struct Cli {
    /// Input .bib file
    input: PathBuf,

    /// Rule library file; the bundled library is used when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Citation key template
    #[arg(long, default_value = config::DEFAULT_KEY_TEMPLATE)]
    template: String,

    /// Comma-separated list of fields to keep on output
    #[arg(long)]
    fields: Option<String>,

    /// Write full venue names instead of abbreviations
    #[arg(long)]
    full_venues: bool,

    /// Keep non-empty source citation keys verbatim
    #[arg(long)]
    keep_original_keys: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let rule_text = match &cli.rules {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => config::DEFAULT_RULES.to_string(),
    };
    let rules = compile(&rule_text);

    let keep_fields = match &cli.fields {
        Some(list) => list
            .split(',')
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect(),
        None => config::DEFAULT_KEEP_FIELDS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let pipeline_config = PipelineConfig {
        key_template: cli.template,
        keep_fields,
        venue_mode: if cli.full_venues {
            VenueMode::Full
        } else {
            VenueMode::Abbrev
        },
        keep_original_keys: cli.keep_original_keys,
    };

    let output = pipeline::run(&input, &rules, &pipeline_config, &HashMap::new(), None);

    println!("{}", format_entries(&output.entries));

    for warning in &output.warnings {
        eprintln!("warning[{}]: {}", warning.field, warning);
    }

    Ok(())
}
