//! Kinship CLI: load a family dataset and answer relationship queries.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinship::graph::RelationKind;
use kinship::ingest::load_dataset;
use kinship::stats::DatasetStats;
use kinship::{Config, KinshipStore, QueryLimits};
use serde_json::json;
use std::path::PathBuf;

/// Relationship inference over genealogical family data.
#[derive(Parser, Debug)]
#[command(name = "kinship", version)]
struct Args {
    /// Dataset file (.json, .yaml, .yml or .toml). Defaults to kinship.dataset_path.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// How is A related to B?
    Relate { a: String, b: String },
    /// Every ancestor of ID with its distance in generations.
    Ancestors { id: String },
    /// Descendants of ID.
    Descendants {
        id: String,
        /// Generations to expand (default: query.default_descendant_depth).
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Stored primary edges, optionally only those starting at ID.
    Edges { id: Option<String> },
    /// Generation number of every individual.
    Generations,
    /// Dataset summary.
    Stats,
}

fn main() -> Result<()> {
    let config = Config::load_or_default()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.kinship.log_level.as_str()),
    )
    .init();

    let args = Args::parse();

    let dataset_path = args
        .dataset
        .clone()
        .or_else(|| config.dataset_path().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No dataset given. Pass --dataset <PATH> or set dataset_path in kinship.toml."
            )
        })?;

    let dataset = load_dataset(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;
    let store = KinshipStore::from_dataset(dataset, QueryLimits::from(&config.query))
        .context("Failed to build relationship graph")?;

    run(&args, &config, &store)
}

fn run(args: &Args, config: &Config, store: &KinshipStore) -> Result<()> {
    let snapshot = store.snapshot()?;
    let graph = snapshot.graph();

    match &args.command {
        Command::Relate { a, b } => {
            let tag = store.classify(a, b)?;
            let label = store.describe(a, b)?;
            if args.json {
                println!("{}", json!({ "a": a, "b": b, "tag": tag, "label": label }));
            } else {
                println!(
                    "{} is the {} of {}",
                    graph.require(a)?,
                    label,
                    graph.require(b)?
                );
            }
        }
        Command::Ancestors { id } => {
            let mut ancestors: Vec<(String, usize)> =
                store.ancestor_distances(id)?.into_iter().collect();
            ancestors.sort_by(|(id_x, dx), (id_y, dy)| dx.cmp(dy).then_with(|| id_x.cmp(id_y)));
            if args.json {
                println!("{}", serde_json::to_string_pretty(&ancestors)?);
            } else {
                for (ancestor, distance) in &ancestors {
                    println!("{:>3}  {}", distance, graph.require(ancestor)?);
                }
            }
        }
        Command::Descendants { id, depth } => {
            let depth = depth.unwrap_or(config.query.default_descendant_depth);
            let descendants = store.descendants(id, depth)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&descendants)?);
            } else {
                for descendant in &descendants {
                    println!("{}", graph.require(descendant)?);
                }
            }
        }
        Command::Edges { id } => {
            let edges: Vec<_> = match id {
                Some(id) => {
                    graph.require(id)?;
                    graph.edges().filter(|e| e.source == id.as_str()).collect()
                }
                None => graph.edges().collect(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&edges)?);
            } else {
                for edge in &edges {
                    println!("{}\t{}\t{}", edge.source, edge.kind, edge.target);
                }
                let counts: Vec<String> = RelationKind::ALL
                    .iter()
                    .map(|kind| format!("{}={}", kind, graph.edge_count(*kind)))
                    .collect();
                log::info!("Edge counts: {}", counts.join(", "));
            }
        }
        Command::Generations => {
            let levels = snapshot.walker().generation_levels()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&levels)?);
            } else {
                for (id, level) in &levels {
                    println!("{:>3}  {}", level, graph.require(id)?);
                }
            }
        }
        Command::Stats => {
            let stats = DatasetStats::compute(graph);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", stats);
            }
        }
    }

    Ok(())
}
