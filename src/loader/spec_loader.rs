use crate::config::Config;
use crate::error::{Result, SwaggerValidationError};
use crate::loader::dereference::{CircularRefs, Dereferencer, load_with_references};
use crate::loader::{DocumentSource, FsDocumentSource};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// Loads and dereferences API documents, memoizing them per file path.
///
/// Entries are never evicted: a document edited on disk is only re-read by a
/// new loader. Two calls racing on the same cold path may both dereference it;
/// the later insert wins and both results are equivalent.
pub struct SpecLoader<S = FsDocumentSource> {
    source: S,
    cache: DashMap<String, Arc<Value>>,
}

impl Default for SpecLoader<FsDocumentSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecLoader<FsDocumentSource> {
    pub fn new() -> Self {
        Self::with_source(FsDocumentSource)
    }
}

impl<S: DocumentSource> SpecLoader<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            cache: DashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of documents currently cached
    pub fn cached_documents(&self) -> usize {
        self.cache.len()
    }

    /// Get the dereferenced document for `file_override`, or the configured default
    pub async fn load(&self, config: &Config, file_override: Option<&str>) -> Result<Arc<Value>> {
        let path = resolve_path(config, file_override)?;

        if let Some(document) = self.cache.get(path) {
            tracing::debug!(path = %path, "Using cached document");
            return Ok(Arc::clone(document.value()));
        }

        let documents = load_with_references(&self.source, path).await?;
        let document = Dereferencer::new(&documents, CircularRefs::Ignore).dereference(path)?;
        let document = Arc::new(document);

        self.cache.insert(path.to_string(), Arc::clone(&document));
        tracing::debug!(path = %path, files = documents.len(), "Document loaded and dereferenced");

        Ok(document)
    }
}

/// The explicit override wins, then the configured `swaggerFile`
pub fn resolve_path<'a>(config: &'a Config, file_override: Option<&'a str>) -> Result<&'a str> {
    file_override
        .filter(|f| !f.is_empty())
        .or_else(|| config.swagger_file().filter(|f| !f.is_empty()))
        .ok_or(SwaggerValidationError::MissingFile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_override_wins_over_config() {
        let config = Config::with_swagger_file("default.yaml");
        assert_eq!(resolve_path(&config, Some("other.yaml")).unwrap(), "other.yaml");
        assert_eq!(resolve_path(&config, None).unwrap(), "default.yaml");
        assert_eq!(resolve_path(&config, Some("")).unwrap(), "default.yaml");
    }

    #[test]
    fn test_missing_file() {
        let config = Config::default();
        let result = resolve_path(&config, None);
        assert!(matches!(result, Err(SwaggerValidationError::MissingFile)));
    }

    #[tokio::test]
    async fn test_load_from_disk_and_cache() {
        let yaml = r#"
openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /test:
    get:
      responses:
        200:
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Test'
components:
  schemas:
    Test:
      type: object
"#;
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let loader = SpecLoader::new();
        let config = Config::with_swagger_file(path.clone());

        let document = loader.load(&config, None).await.unwrap();
        assert_eq!(
            document["paths"]["/test"]["get"]["responses"]["200"]["content"]["application/json"]["schema"]["type"],
            "object"
        );
        assert_eq!(loader.cached_documents(), 1);

        let again = loader.load(&config, Some(path.as_str())).await.unwrap();
        assert!(Arc::ptr_eq(&document, &again));
    }

    #[tokio::test]
    async fn test_load_error_propagates() {
        let loader = SpecLoader::new();
        let result = loader
            .load(&Config::default(), Some("/nonexistent/openapi.yaml"))
            .await;

        assert!(matches!(result, Err(SwaggerValidationError::IoError(_))));
        assert_eq!(loader.cached_documents(), 0);
    }
}
