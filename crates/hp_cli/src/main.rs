use anyhow::{bail, Context};
use clap::Parser;
use hp_core::{Feature, FormCollector};
use hp_inference::{create_model, estimate, Config, DEFAULT_MODEL_PATH};
use hp_web::{create_app, AppState};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// A `key=value` override for one form field.
#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    feature: Feature,
    value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{}'", s))?;
        let key = key.trim();
        let feature = Feature::from_key(key).ok_or_else(|| {
            let known: Vec<&str> = Feature::ALL.iter().map(|f| f.key()).collect();
            format!("Unknown field '{}'. Known fields: {}", key, known.join(", "))
        })?;
        Ok(Assignment {
            feature,
            value: value.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "House price estimator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the estimate form over HTTP
    Serve {
        /// Path to the model artifact (JSON)
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
    },
    /// Print a single estimate, starting from the form defaults
    Predict {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        /// Override a field, e.g. --set overall_qual=7 --set "roof_style=Hip"
        #[arg(long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<Assignment>,
    },
    /// List the model columns in training order
    Schema,
}

async fn serve(model: PathBuf, bind: &str) -> anyhow::Result<()> {
    let model = create_model(Some(Config::new(&model)))
        .await
        .with_context(|| format!("failed to load model from {}", model.display()))?;

    let app = create_app(AppState::new(model));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!("🏠 Serving the estimate form on http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn predict(model: PathBuf, assignments: Vec<Assignment>) -> anyhow::Result<()> {
    let model = create_model(Some(Config::new(&model)))
        .await
        .with_context(|| format!("failed to load model from {}", model.display()))?;

    let collector = FormCollector::new();
    let mut raw = collector.default_inputs();
    for assignment in assignments {
        raw.insert(assignment.feature.key().to_string(), assignment.value);
    }
    let record = collector.collect(&raw)?;

    match estimate(model.as_ref(), &record) {
        Ok(estimate) => {
            println!("{}", estimate.message());
            Ok(())
        }
        Err(failure) => bail!(failure),
    }
}

fn schema() {
    for (i, feature) in Feature::ALL.iter().enumerate() {
        println!("{:>2}  {:<16} {}", i, feature.column(), feature.key());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { model, bind } => serve(model, &bind).await,
        Commands::Predict { model, assignments } => predict(model, assignments).await,
        Commands::Schema => {
            schema();
            Ok(())
        }
    }
}
