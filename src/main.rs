use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use usercf::config::{Config, MethodSelection};
use usercf::output::terminal;
use usercf::recommend::Recommender;
use usercf::similarity::Imputation;

/// usercf: user-based collaborative filtering.
///
/// Predicts unseen ratings from similar users (cosine or Pearson) and ranks
/// the items a user hasn't rated yet.
#[derive(Parser)]
#[command(name = "usercf", version, about)]
struct Cli {
    /// JSON rating matrix to load (default: built-in reference data)
    #[arg(long, global = true)]
    matrix: Option<PathBuf>,

    /// Similarity method: cosine, pearson or both
    #[arg(long, global = true)]
    method: Option<MethodSelection>,

    /// How missing ratings enter similarity vectors: zero, mean or exclude
    #[arg(long, global = true)]
    imputation: Option<Imputation>,

    /// Leave the target user's own rating out of their prediction
    #[arg(long, global = true)]
    exclude_self: bool,

    /// Print predict/recommend results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict one user's rating of one item
    Predict {
        /// The user to predict for (e.g. user_304)
        #[arg(long)]
        user: String,

        /// The item to predict (e.g. 2533)
        #[arg(long)]
        item: String,
    },

    /// Rank the items a user hasn't rated yet
    Recommend {
        /// The user to recommend for
        #[arg(long)]
        user: String,

        /// How many items to return (default: 3)
        #[arg(long, short, default_value = "3")]
        n: usize,
    },

    /// Show the user x user similarity matrix
    Similarity,

    /// Show the loaded rating matrix
    Dataset,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("usercf=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.matrix {
        config.matrix_path = Some(path);
    }
    if let Some(method) = cli.method {
        config.method = method;
    }
    if let Some(imputation) = cli.imputation {
        config.imputation = imputation;
    }
    if cli.exclude_self {
        config.include_self = false;
    }

    let ratings = config.load_matrix()?;
    info!(
        items = ratings.item_count(),
        users = ratings.user_count(),
        imputation = %config.imputation,
        include_self = config.include_self,
        "Rating matrix ready"
    );

    let recommender = Recommender::new(
        ratings,
        config.similarity_options(),
        config.predict_options(),
    );
    let metrics = config.method.metrics();

    match cli.command {
        Commands::Predict { user, item } => {
            let mut predictions = Vec::with_capacity(metrics.len());
            for metric in &metrics {
                predictions.push(recommender.predict(&user, &item, *metric)?);
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&predictions)?);
            } else {
                println!("{}", format!("Predicted rating for {user} on item {item}:").bold());
                for prediction in &predictions {
                    terminal::display_prediction(prediction);
                }
            }
        }

        Commands::Recommend { user, n } => {
            let mut rankings = Vec::with_capacity(metrics.len());
            for metric in &metrics {
                rankings.push((*metric, recommender.top_n(&user, n, *metric)?));
            }

            if cli.json {
                let json: Vec<serde_json::Value> = rankings
                    .iter()
                    .map(|(metric, ranked)| {
                        serde_json::json!({
                            "user": user,
                            "method": metric,
                            "recommendations": ranked,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                for (metric, ranked) in &rankings {
                    terminal::display_recommendations(&user, *metric, ranked);
                }
            }
        }

        Commands::Similarity => {
            for metric in &metrics {
                terminal::display_similarity(recommender.similarity(*metric));
            }
        }

        Commands::Dataset => {
            terminal::display_ratings(recommender.ratings());
        }
    }

    Ok(())
}
