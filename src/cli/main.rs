use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::json;

#[derive(Parser)]
#[command(name = "string-analyzer-cli")]
#[command(about = "String Analyzer CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "STRING_ANALYZER_ENDPOINT", default_value = "http://localhost:8080")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze and store a string
    Analyze {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Get the analysis of a stored string
    Get {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// List stored strings with optional filters
    List {
        #[arg(short = 'p', long)]
        is_palindrome: Option<bool>,

        #[arg(long, allow_negative_numbers = true)]
        min_length: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        max_length: Option<i64>,

        #[arg(short, long, allow_negative_numbers = true)]
        word_count: Option<i64>,

        #[arg(short, long)]
        contains_character: Option<char>,
    },

    /// Filter stored strings with a natural-language query
    Query {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Delete a stored string
    Delete {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = Url::parse(&cli.endpoint)
        .with_context(|| format!("invalid endpoint '{}'", cli.endpoint))?;

    let response = match cli.command {
        Commands::Analyze { value } => {
            client
                .post(endpoint_url(&base, &["strings"])?)
                .json(&json!({ "value": value }))
                .send()
                .await?
        }

        Commands::Get { value } => {
            client
                .get(endpoint_url(&base, &["strings", &value])?)
                .send()
                .await?
        }

        Commands::List {
            is_palindrome,
            min_length,
            max_length,
            word_count,
            contains_character,
        } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(v) = is_palindrome {
                params.push(("is_palindrome", v.to_string()));
            }
            if let Some(v) = min_length {
                params.push(("min_length", v.to_string()));
            }
            if let Some(v) = max_length {
                params.push(("max_length", v.to_string()));
            }
            if let Some(v) = word_count {
                params.push(("word_count", v.to_string()));
            }
            if let Some(v) = contains_character {
                params.push(("contains_character", v.to_string()));
            }

            client
                .get(endpoint_url(&base, &["strings"])?)
                .query(&params)
                .send()
                .await?
        }

        Commands::Query { query } => {
            client
                .get(endpoint_url(&base, &["strings", "filter-by-natural-language"])?)
                .query(&[("query", query)])
                .send()
                .await?
        }

        Commands::Delete { value } => {
            client
                .delete(endpoint_url(&base, &["strings", &value])?)
                .send()
                .await?
        }

        Commands::Health => {
            client
                .get(endpoint_url(&base, &["health"])?)
                .send()
                .await?
        }
    };

    print_response(response).await
}

/// Append percent-encoded path segments to the endpoint
fn endpoint_url(base: &Url, segments: &[&str]) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("endpoint '{}' cannot carry a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(response: Response) -> anyhow::Result<()> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        println!("{}", status);
        return Ok(());
    }

    let body: serde_json::Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if status.is_success() {
        Ok(())
    } else {
        Err(anyhow!("request failed with status {}", status))
    }
}
