use clap::{Args, Parser, Subcommand};

use crate::error::CliError;
use crate::request::SearchRequest;

#[derive(Parser)]
#[command(name = "querybind", about = "Bind URL query strings onto a typed record")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the parameter signature of the search request as JSON
    Signature,
    /// Decode a query string onto the search request
    Decode(DecodeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Raw query string, without the leading `?`
    pub query: String,
    /// TOML file with starting values for the request
    #[arg(long, env = "QUERYBIND_SEED")]
    pub seed: Option<String>,
}

// ---- TOML seed ----

impl SearchRequest {
    pub fn load(path: &str) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            context: "read",
            detail: format!("'{path}': {e}"),
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            context: "parse",
            detail: format!("'{path}': {e}"),
        })
    }
}
