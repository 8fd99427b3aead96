use crate::{Result, SwaggerValidation};
use colored::*;

pub async fn execute_validate_document(plugin: &SwaggerValidation, file: Option<&str>) -> Result<()> {
    println!("{}", "Validating OpenAPI document...".bright_blue());
    if let Some(path) = file.or(plugin.config().swagger_file()) {
        println!("  Path: {}", path);
    }

    match plugin.validate_document(file).await {
        Ok(summary) => {
            println!("{}", "✓ OpenAPI document is valid".green());
            println!("  Title: {}", summary.title.bold());
            println!("  Version: {}", summary.version);
            println!("  OpenAPI Version: {}", summary.openapi);
            println!("  Paths: {}", summary.path_count);
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ OpenAPI validation failed".red().bold());
            println!("  {}", e.to_string().red());
            Err(e)
        }
    }
}
