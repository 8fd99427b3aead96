use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "swagger-validation")]
#[command(version)]
#[command(about = "Validate API responses against an OpenAPI document", long_about = None)]
pub struct Cli {
    /// JSON config file with a default document (`{"env": {"swaggerFile": "..."}}`).
    /// Falls back to the SWAGGER_FILE environment variable
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log the endpoint, payload and result
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a response body against its documented schema
    ValidateResponse {
        /// Path as declared in the document (e.g. /pets/{id})
        #[arg(short, long)]
        endpoint: String,

        /// HTTP method, matching the document's casing (e.g. get)
        #[arg(short, long)]
        method: String,

        /// Response status code
        #[arg(short, long)]
        status: u16,

        /// Response content type
        #[arg(short = 't', long, default_value = "application/json")]
        content_type: String,

        /// OpenAPI document (overrides the configured default)
        #[arg(short, long)]
        file: Option<String>,

        /// File containing the JSON response body (stdin if not specified)
        #[arg(short, long)]
        body: Option<PathBuf>,
    },

    /// Check that the OpenAPI document itself is valid
    ValidateDocument {
        /// OpenAPI document (overrides the configured default)
        #[arg(short, long)]
        file: Option<String>,
    },
}
