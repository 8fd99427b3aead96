use crate::{Result, SwaggerValidation, ValidationRequest};
use colored::*;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;

pub struct ResponseArgs<'a> {
    pub endpoint: &'a str,
    pub method: &'a str,
    pub status: u16,
    pub content_type: &'a str,
    pub file: Option<&'a str>,
    pub body: Option<&'a Path>,
    pub verbose: bool,
}

pub async fn execute_validate_response(plugin: &SwaggerValidation, args: ResponseArgs<'_>) -> Result<()> {
    let response = match read_body(args.body).await {
        Ok(response) => response,
        Err(e) => {
            println!("{}", "✗ Could not read response body".red().bold());
            println!("  {}", e.to_string().red());
            return Err(e);
        }
    };

    let mut request = ValidationRequest::new(args.endpoint, args.method, args.status)
        .with_response(response)
        .with_content_type(args.content_type)
        .with_verbose(args.verbose);
    if let Some(file) = args.file {
        request = request.with_file(file);
    }

    println!("{}", "Validating response...".bright_blue());
    println!(
        "  {} {} -> {} ({})",
        args.method.to_uppercase().bold(),
        args.endpoint,
        args.status,
        request.content_type_or_default()
    );

    match plugin.validate_response(&request).await {
        Ok(()) => {
            println!("{}", "✓ Response matches the documented schema".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Response validation failed".red().bold());
            println!("  {}", e.to_string().red());
            Err(e)
        }
    }
}

async fn read_body(body: Option<&Path>) -> Result<Value> {
    let content = match body {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            content
        }
    };

    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, SwaggerValidationError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(body: &Path) -> ResponseArgs<'_> {
        ResponseArgs {
            endpoint: "/status",
            method: "get",
            status: 200,
            content_type: "application/json",
            file: None,
            body: Some(body),
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_reported() {
        let mut body = NamedTempFile::with_suffix(".json").unwrap();
        body.write_all(b"{ not json").unwrap();
        let plugin = SwaggerValidation::new(Config::default());

        let result = execute_validate_response(&plugin, args(body.path())).await;
        assert!(matches!(result, Err(SwaggerValidationError::JsonError(_))));
        assert_eq!(plugin.loader().cached_documents(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_body_is_reported() {
        let plugin = SwaggerValidation::new(Config::default());

        let result = execute_validate_response(&plugin, args(Path::new("/nonexistent/body.json"))).await;
        assert!(matches!(result, Err(SwaggerValidationError::IoError(_))));
    }

    #[tokio::test]
    async fn test_body_file_parsed() {
        let mut body = NamedTempFile::with_suffix(".json").unwrap();
        body.write_all(br#"{ "ok": true }"#).unwrap();

        let value = read_body(Some(body.path())).await.unwrap();
        assert_eq!(value["ok"], Value::Bool(true));
    }
}
