use crate::config::Config;
use crate::error::{Result, SwaggerValidationError};
use crate::loader::{DocumentSource, FsDocumentSource, SpecLoader};
use crate::models::{DocumentSummary, ValidationRequest};
use crate::validation::{ResponseTarget, ResponseValidator, validate_document};

/// Validates API responses and documents for one test run.
///
/// Holds the run configuration and the document cache, so every call made
/// through the same instance shares already-dereferenced documents.
pub struct SwaggerValidation<S = FsDocumentSource> {
    config: Config,
    loader: SpecLoader<S>,
}

impl SwaggerValidation<FsDocumentSource> {
    pub fn new(config: Config) -> Self {
        Self::with_source(config, FsDocumentSource)
    }
}

impl<S: DocumentSource> SwaggerValidation<S> {
    pub fn with_source(config: Config, source: S) -> Self {
        tracing::info!("Swagger validation loaded");
        Self {
            config,
            loader: SpecLoader::with_source(source),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &SpecLoader<S> {
        &self.loader
    }

    /// Validate a response payload against the schema documented for
    /// `endpoint`/`method`/`statusCode`/`contentType`.
    ///
    /// Field checks run before the document is loaded.
    pub async fn validate_response(&self, request: &ValidationRequest) -> Result<()> {
        let target = ResponseTarget::from_request(request)?;
        let document = self.loader.load(&self.config, request.file.as_deref()).await?;

        if request.verbose {
            tracing::debug!("Endpoint: {}", target.endpoint);
            tracing::debug!(
                "Response Schema: {}",
                serde_json::to_string_pretty(target.response).unwrap_or_default()
            );
        }

        match ResponseValidator::new(&document).validate(&target) {
            Ok(()) => {
                if request.verbose {
                    tracing::info!("Validation Success");
                }
                Ok(())
            }
            Err(e) => {
                if let SwaggerValidationError::SchemaValidation(message) = &e {
                    tracing::error!("{}", message);
                } else if request.verbose {
                    tracing::error!("Validation Failed: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Check that the API document itself is structurally valid
    pub async fn validate_document(&self, file: Option<&str>) -> Result<DocumentSummary> {
        let document = self.loader.load(&self.config, file).await?;
        let summary = validate_document(&document)?;

        tracing::info!("API name: {}, Version: {}", summary.title, summary.version);
        Ok(summary)
    }
}
