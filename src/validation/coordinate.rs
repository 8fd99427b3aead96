use serde_json::Value;
use std::fmt;

/// One step of a [`CoordinatePath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain identifier, rendered as `.name`
    Field(String),
    /// Arbitrary key, rendered as `['key']`
    Quoted(String),
}

impl Segment {
    fn key(&self) -> &str {
        match self {
            Segment::Field(key) | Segment::Quoted(key) => key,
        }
    }
}

/// An ordered list of keys leading to a node inside a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatePath {
    segments: Vec<Segment>,
}

impl CoordinatePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Field(key.into()));
        self
    }

    pub fn quoted(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Quoted(key.into()));
        self
    }

    /// `paths[endpoint][method].responses[status].content[content_type].schema`
    pub fn response_schema(endpoint: &str, method: &str, status_code: u16, content_type: &str) -> Self {
        Self::new()
            .field("paths")
            .quoted(endpoint)
            .field(method)
            .field("responses")
            .field(status_code.to_string())
            .field("content")
            .quoted(content_type)
            .field("schema")
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk `document` along the path; objects by key, arrays by numeric index
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        descend(document, &self.segments)
    }
}

fn descend<'a>(node: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(node);
    };

    let next = match node {
        Value::Object(map) => map.get(first.key()),
        Value::Array(items) => first.key().parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }?;

    descend(next, rest)
}

impl fmt::Display for CoordinatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(key) => write!(f, ".{}", key)?,
                Segment::Quoted(key) => write!(f, "['{}']", key)?,
            }
        }
        Ok(())
    }
}
