use crate::error::{Result, SwaggerValidationError};
use crate::loader::DocumentSource;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// What to do with a `$ref` that points back into the node being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CircularRefs {
    /// Leave the `$ref` object in place
    #[default]
    Ignore,
    /// Fail with [`SwaggerValidationError::CircularRef`]
    Error,
}

/// A position inside one of the loaded files
#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    file: String,
    /// JSON pointer, `""` for the document root
    pointer: String,
}

impl Location {
    fn root(file: &str) -> Self {
        Self {
            file: file.to_string(),
            pointer: String::new(),
        }
    }

    /// Parse a `$ref` value relative to the file that contains it
    fn parse(current_file: &str, reference: &str) -> Result<Self> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Err(SwaggerValidationError::UnsupportedRef(reference.to_string()));
        }

        let (file_part, fragment) = reference.split_once('#').unwrap_or((reference, ""));

        let file = if file_part.is_empty() {
            current_file.to_string()
        } else if Path::new(file_part).is_absolute() {
            file_part.to_string()
        } else {
            match Path::new(current_file).parent() {
                Some(dir) => dir.join(file_part).to_string_lossy().into_owned(),
                None => file_part.to_string(),
            }
        };

        Ok(Self {
            file,
            pointer: fragment.to_string(),
        })
    }

    fn child(&self, key: &str) -> Self {
        let escaped = key.replace('~', "~0").replace('/', "~1");
        Self {
            file: self.file.clone(),
            pointer: format!("{}/{}", self.pointer, escaped),
        }
    }

    /// True when `other` is this location or nested below it
    fn contains(&self, other: &Location) -> bool {
        self.file == other.file
            && (other.pointer == self.pointer
                || other
                    .pointer
                    .strip_prefix(self.pointer.as_str())
                    .is_some_and(|rest| rest.starts_with('/')))
    }
}

/// Load `root` and every file reachable from it through `$ref`s
pub async fn load_with_references<S: DocumentSource>(
    source: &S,
    root: &str,
) -> Result<HashMap<String, Value>> {
    let mut documents = HashMap::new();
    let mut pending = vec![root.to_string()];

    while let Some(path) = pending.pop() {
        if documents.contains_key(&path) {
            continue;
        }

        tracing::debug!(path = %path, "Reading document");
        let document = source.read_document(&path).await?;

        let mut referenced = Vec::new();
        collect_external_files(&path, &document, &mut referenced)?;
        pending.extend(
            referenced
                .into_iter()
                .filter(|file| !documents.contains_key(file)),
        );

        documents.insert(path, document);
    }

    Ok(documents)
}

fn collect_external_files(current_file: &str, value: &Value, out: &mut Vec<String>) -> Result<()> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                let target = Location::parse(current_file, reference)?;
                if target.file != current_file && !out.contains(&target.file) {
                    out.push(target.file);
                }
            }
            for child in map.values() {
                collect_external_files(current_file, child, out)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_external_files(current_file, item, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Replaces `$ref`s with the content they point at
pub struct Dereferencer<'a> {
    documents: &'a HashMap<String, Value>,
    circular: CircularRefs,
}

impl<'a> Dereferencer<'a> {
    pub fn new(documents: &'a HashMap<String, Value>, circular: CircularRefs) -> Self {
        Self {
            documents,
            circular,
        }
    }

    /// Produce the fully dereferenced form of the document loaded from `root`
    pub fn dereference(&self, root: &str) -> Result<Value> {
        let document = self.documents.get(root).ok_or_else(|| {
            SwaggerValidationError::UnresolvedRef {
                file: root.to_string(),
                reference: "#".to_string(),
            }
        })?;

        let mut trail = Vec::new();
        self.resolve(document, &Location::root(root), &mut trail)
    }

    fn resolve(&self, value: &Value, at: &Location, trail: &mut Vec<Location>) -> Result<Value> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(reference)) = map.get("$ref") {
                    return self.follow(map, reference, at, trail);
                }

                let mut resolved = Map::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), self.resolve(child, &at.child(key), trail)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| self.resolve(item, &at.child(&idx.to_string()), trail))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn follow(
        &self,
        ref_object: &Map<String, Value>,
        reference: &str,
        at: &Location,
        trail: &mut Vec<Location>,
    ) -> Result<Value> {
        let target = Location::parse(&at.file, reference)?;

        // Pointing at the node being built, or at anything enclosing it
        if target.contains(at) || trail.iter().any(|site| target.contains(site)) {
            return match self.circular {
                CircularRefs::Ignore => Ok(Value::Object(ref_object.clone())),
                CircularRefs::Error => Err(SwaggerValidationError::CircularRef {
                    file: at.file.clone(),
                    reference: reference.to_string(),
                }),
            };
        }

        let node = self
            .documents
            .get(&target.file)
            .and_then(|doc| doc.pointer(&target.pointer))
            .ok_or_else(|| SwaggerValidationError::UnresolvedRef {
                file: at.file.clone(),
                reference: reference.to_string(),
            })?;

        trail.push(at.clone());
        let resolved = self.resolve(node, &target, trail);
        trail.pop();
        let mut resolved = resolved?;

        // Keys next to `$ref` are layered over the referenced object
        if let Value::Object(object) = &mut resolved {
            for (key, sibling) in ref_object.iter().filter(|(key, _)| *key != "$ref") {
                object.insert(key.clone(), self.resolve(sibling, &at.child(key), trail)?);
            }
        }

        Ok(resolved)
    }
}
