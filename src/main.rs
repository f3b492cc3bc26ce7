use std::fs;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use graphquest::api::PuzzleEngine;
use graphquest::config::Config;
use graphquest::core::error::ToPublicError;
use graphquest::core::{GraphModel, Path};
use graphquest::services::Difficulty;
use graphquest::utils::logging;

#[derive(Parser)]
#[clap(version = "0.1.0", author = "GraphQuest Contributors")]
enum Cli {
    /// Generate a puzzle graph and print it as JSON
    Generate {
        #[clap(short, long)]
        config: Option<String>,
        /// easy, medium or hard; overrides the generator section of the config
        #[clap(short, long)]
        difficulty: Option<Difficulty>,
        #[clap(short, long)]
        seed: Option<u64>,
        #[clap(short, long)]
        nodes: Option<usize>,
        #[clap(short, long)]
        required: Option<usize>,
        /// Write the graph to this file instead of stdout
        #[clap(short, long)]
        output: Option<String>,
    },
    /// Compute the optimal route for a graph file
    Solve {
        #[clap(short, long)]
        graph: String,
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Validate and score a submitted path, e.g. "A,C,E,F" or "A -> C -> E -> F"
    Evaluate {
        #[clap(short, long)]
        graph: String,
        /// Node ids separated by "," or "->"; ids must not contain either separator
        #[clap(short, long)]
        path: Path,
        #[clap(short, long)]
        config: Option<String>,
    },
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).map_err(|e| anyhow!("Failed to load config {}: {}", path, e)),
        None => Ok(Config::default()),
    }
}

fn read_graph(path: &str) -> Result<GraphModel> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Malformed graph in {}", path))
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli {
        Cli::Generate {
            config: _,
            difficulty,
            seed,
            nodes,
            required,
            output,
        } => {
            let seed = seed.unwrap_or(config.generator.seed);
            let mut generator = match difficulty {
                Some(difficulty) => difficulty.config(seed),
                None => config.generator.clone().with_seed(seed),
            };
            if let Some(nodes) = nodes {
                generator.node_count = nodes;
            }
            if let Some(required) = required {
                generator.required_node_count = required;
            }

            let engine = PuzzleEngine::new(&config.engine);
            let graph = engine.generate_graph(&generator)?;
            let json = serde_json::to_string_pretty(&graph)?;
            match output {
                Some(output) => {
                    fs::write(&output, json).with_context(|| format!("Failed to write {}", output))?;
                    println!("Graph written to {}", output);
                }
                None => println!("{}", json),
            }
        }
        Cli::Solve { graph, .. } => {
            let graph = read_graph(&graph)?;
            let optimal = PuzzleEngine::new(&config.engine).compute_optimal_path(&graph)?;
            println!("{}", serde_json::to_string_pretty(&optimal)?);
        }
        Cli::Evaluate { graph, path, .. } => {
            let graph = read_graph(&graph)?;
            match PuzzleEngine::new(&config.engine).evaluate_submission(&graph, &path) {
                Ok(score) => println!("{}", serde_json::to_string_pretty(&score)?),
                Err(e) => {
                    log::warn!("Submission rejected: {}", e);
                    println!("{}", serde_json::to_string_pretty(&e.to_public_error())?);
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli {
        Cli::Generate { config, .. } | Cli::Solve { config, .. } | Cli::Evaluate { config, .. } => {
            config.clone()
        }
    };
    let config = load_config(config_path.as_deref())?;
    let _log_guard = match logging::init(&config.log) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let result = run(cli, &config);
    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    result
}
