//! Push-event payload shaping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One push event's payload as delivered by the upstream client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPayload {
    /// Data for this delivery.
    #[serde(default)]
    pub data: Option<Value>,
    /// Execution errors reported alongside (or instead of) data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLErrorObject>,
    /// Extensions (tracing, cache hints, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl SubscriptionPayload {
    /// A payload carrying only data.
    pub fn data(value: Value) -> Self {
        Self {
            data: Some(value),
            ..Default::default()
        }
    }

    /// Check whether the payload carries execution errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fold the payload into data, turning execution errors into
    /// [`SubscriptionError::GraphQL`].
    ///
    /// [`SubscriptionError::GraphQL`]: crate::SubscriptionError::GraphQL
    pub fn into_result(self) -> crate::Result<Value> {
        if !self.errors.is_empty() {
            return Err(crate::SubscriptionError::GraphQL(self.errors));
        }
        self.data
            .ok_or_else(|| crate::SubscriptionError::Decode("payload contained no data".to_string()))
    }
}

/// A GraphQL error object from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLErrorObject {
    /// Error message.
    pub message: String,
    /// Locations in the operation where the error occurred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<SourceLocation>>,
    /// Path to the field that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Additional error extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQLErrorObject {
    /// An error object carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

impl std::fmt::Display for GraphQLErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = &self.path
            && !path.is_empty()
        {
            write!(f, " (at {})", format_path(path))?;
        }
        if let Some(locations) = &self.locations
            && !locations.is_empty()
        {
            write!(f, " [")?;
            for (i, loc) in locations.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}:{}", loc.line, loc.column)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Location in the GraphQL operation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

/// Path segment in a GraphQL error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Field name.
    Field(String),
    /// Array index.
    Index(usize),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{}", name),
            Self::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// Format a path as a dotted string.
pub fn format_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
