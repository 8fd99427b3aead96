use anyhow::Context;
use clap::Parser;
use swagger_validation::{
    Config, SwaggerValidation,
    cli::{Cli, Commands},
    commands::{self, ResponseArgs},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let telemetry_guard = telemetry::init_telemetry(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => Config::from_env(),
    };
    let plugin = SwaggerValidation::new(config);

    let outcome = match &cli.command {
        Commands::ValidateResponse {
            endpoint,
            method,
            status,
            content_type,
            file,
            body,
        } => {
            let args = ResponseArgs {
                endpoint,
                method,
                status: *status,
                content_type,
                file: file.as_deref(),
                body: body.as_deref(),
                verbose: cli.verbose,
            };
            commands::execute_validate_response(&plugin, args).await
        }
        Commands::ValidateDocument { file } => {
            commands::execute_validate_document(&plugin, file.as_deref()).await
        }
    };

    if outcome.is_err() {
        drop(telemetry_guard);
        std::process::exit(1);
    }

    Ok(())
}
