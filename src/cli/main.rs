use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::json;
use std::error::Error;

#[derive(Parser)]
#[command(name = "runbook-advisor-cli")]
#[command(about = "Runbook Advisor CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest runbooks for free-text input
    Suggest {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Show the signals extracted from free-text input
    Signals {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Show the loaded runbook catalog
    Catalog,

    /// Force a catalog refresh
    Refresh,

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Suggest { text } => {
            let response = client
                .post(format!("{}/v1/detect", cli.endpoint))
                .json(&json!({ "query": text }))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Signals { text } => {
            let response = client
                .get(format!("{}/v1/signals", cli.endpoint))
                .query(&[("q", text.as_str())])
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Catalog => {
            let response = client
                .get(format!("{}/v1/catalog", cli.endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Refresh => {
            let response = client
                .post(format!("{}/v1/catalog/refresh", cli.endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", cli.endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }
    }

    Ok(())
}

async fn print_json(response: reqwest::Response) -> Result<(), Box<dyn Error>> {
    let body: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
