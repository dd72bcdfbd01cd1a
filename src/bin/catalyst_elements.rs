//! Command-line front end for the element catalog.
//!
//! Every subcommand prints one compact JSON document on stdout so the output can
//! be piped into other tools; diagnostics go to stderr through `tracing`.

use anyhow::{Context, Result, anyhow};
use catalyst_elements::catalog::strip_decoration;
use catalyst_elements::features::{
    ADD_ON_DOPANTS, COMPOUND_FEATURES, REGULAR_DOPANTS, SINGLE_ELEMENT_FEATURES,
};
use catalyst_elements::{
    CatalogError, ElementCatalog, Family, FamilyClassifier, ScoreTable, compare, featurize,
    normalize_weights, resolve_properties_path,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalyst-elements",
    about = "Element property lookups and dopant family aggregates",
    version
)]
struct Cli {
    /// Property table (CSV or JSON catalog document)
    #[arg(long, global = true, env = "CATALYST_PROPERTIES")]
    properties: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the catalog record for one element
    Lookup { symbol: String },

    /// Print the family of an element and its description
    Classify { symbol: String },

    /// Compare the properties of two elements
    Compare { first: String, second: String },

    /// Weighted properties of a family's members
    Family {
        family: String,

        /// Member weight as SYMBOL=WEIGHT; repeatable, missing members weigh 0
        #[arg(long = "weight", value_parser = parse_pair)]
        weights: Vec<(String, f64)>,
    },

    /// Refactor one experiment row into family features
    Featurize {
        /// Feature amount as FEATURE=AMOUNT (e.g. _K=1.2, _NO3=3.4); repeatable
        #[arg(long = "amount", value_parser = parse_pair)]
        amounts: Vec<(String, f64)>,

        /// Print labelled columns instead of nested family blocks
        #[arg(long)]
        columns: bool,
    },

    /// List every family with its member records and description
    Families,

    /// Print every record in the property table
    Elements,

    /// Print the dopant lists and the feature vocabulary
    Vocabulary,

    /// Compare previous vs proposed R² scores for selected ids
    Scores {
        /// Score table with id,type,value columns; repeatable (e.g. selectivity and pEO)
        #[arg(long = "table", required = true)]
        tables: Vec<PathBuf>,

        /// Id to include; repeatable. Without any, every id is selected.
        #[arg(long = "id")]
        ids: Vec<String>,
    },
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalyst_elements=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let classifier = FamilyClassifier::standard().context("building family classifier")?;

    match cli.command {
        Command::Classify { symbol } => {
            let classification = classifier.classify(&symbol);
            emit(&json!({
                "symbol": symbol,
                "classification": classification,
                "description": classification.description(),
            }))
        }
        Command::Scores { tables, ids } => {
            let mut reports = Vec::with_capacity(tables.len());
            for table in &tables {
                let scores = ScoreTable::load(table)
                    .with_context(|| format!("loading score table {}", table.display()))?;
                let selected: Vec<String> = if ids.is_empty() {
                    scores.ids().into_iter().map(str::to_string).collect()
                } else {
                    ids.clone()
                };
                reports.push(json!({
                    "table": table.display().to_string(),
                    "ids": selected,
                    "comparison": scores.compare(selected.as_slice()),
                }));
            }
            emit(&reports)
        }
        command => {
            let catalog = load_catalog(cli.properties)?;
            run_with_catalog(command, &classifier, &catalog)
        }
    }
}

fn run_with_catalog(
    command: Command,
    classifier: &FamilyClassifier,
    catalog: &ElementCatalog,
) -> Result<()> {
    match command {
        Command::Lookup { symbol } => emit(catalog.lookup(&symbol)?),
        Command::Compare { first, second } => emit(&compare(&first, &second, classifier, catalog)?),
        Command::Family { family, weights } => {
            let family: Family = family.parse()?;
            let weights = normalize_weights(weights)?;
            let aggregate = classifier
                .aggregate_family(family, catalog, &weights)
                .with_context(|| format!("aggregating {family}"))?;
            emit(&json!({
                "family": family,
                "members": classifier.members(family),
                "aggregate": aggregate,
            }))
        }
        Command::Featurize { amounts, columns } => {
            let row = featurize(amounts, classifier, catalog)?;
            if columns {
                let labelled: serde_json::Map<String, serde_json::Value> = row
                    .columns()
                    .into_iter()
                    .map(|(name, value)| (name, json!(value)))
                    .collect();
                emit(&labelled)
            } else {
                emit(&row)
            }
        }
        Command::Families => {
            let mut families = Vec::with_capacity(Family::ALL.len());
            for family in Family::ALL {
                let records = classifier
                    .members(family)
                    .iter()
                    .map(|symbol| {
                        catalog
                            .get(symbol)
                            .ok_or_else(|| CatalogError::UnknownElement(symbol.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                families.push(json!({
                    "family": family,
                    "label": family.label(),
                    "members": records,
                    "description": classifier.describe(family),
                }));
            }
            emit(&families)
        }
        Command::Elements => emit(&catalog.records().collect::<Vec<_>>()),
        Command::Vocabulary => {
            let missing: Vec<&str> = SINGLE_ELEMENT_FEATURES
                .iter()
                .copied()
                .filter(|feature| !catalog.contains(strip_decoration(feature)))
                .collect();
            emit(&json!({
                "regular_dopants": REGULAR_DOPANTS,
                "add_on_dopants": ADD_ON_DOPANTS,
                "compound_features": COMPOUND_FEATURES,
                "single_element_features": SINGLE_ELEMENT_FEATURES,
                "missing_from_catalog": missing,
            }))
        }
        Command::Classify { .. } | Command::Scores { .. } => {
            Err(anyhow!("subcommand does not use the element catalog"))
        }
    }
}

fn load_catalog(explicit: Option<PathBuf>) -> Result<ElementCatalog> {
    let path = resolve_properties_path(explicit.as_deref())?;
    let catalog = ElementCatalog::load(&path)
        .with_context(|| format!("loading property table {}", path.display()))?;
    tracing::info!(path = %path.display(), elements = catalog.len(), "element catalog ready");
    Ok(catalog)
}

fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn parse_pair(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        assert_eq!(parse_pair("_K=1.5").unwrap(), ("_K".to_string(), 1.5));
        assert_eq!(parse_pair(" Na = 0 ").unwrap(), ("Na".to_string(), 0.0));
        assert!(parse_pair("K").is_err());
        assert!(parse_pair("=1").is_err());
        assert!(parse_pair("K=abc").is_err());
    }

    #[test]
    fn cli_accepts_repeated_weights() {
        let cli = Cli::try_parse_from([
            "catalyst-elements",
            "family",
            "alkali",
            "--weight",
            "K=1",
            "--weight",
            "Na=0",
        ])
        .unwrap();
        match cli.command {
            Command::Family { family, weights } => {
                assert_eq!(family, "alkali");
                assert_eq!(weights.len(), 2);
            }
            _ => panic!("expected family subcommand"),
        }
    }

    #[test]
    fn scores_require_at_least_one_table() {
        assert!(Cli::try_parse_from(["catalyst-elements", "scores"]).is_err());
        let cli = Cli::try_parse_from([
            "catalyst-elements",
            "scores",
            "--table",
            "selectivity.csv",
            "--table",
            "peo.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Scores { tables, ids } => {
                assert_eq!(tables.len(), 2);
                assert!(ids.is_empty());
            }
            _ => panic!("expected scores subcommand"),
        }
    }
}
