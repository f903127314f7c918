//! Subscription error types.

use thiserror::Error;

use crate::{GraphQLErrorObject, OperationKind};

/// Result type for client boundary operations.
pub type Result<T> = std::result::Result<T, SubscriptionError>;

/// Errors surfaced by an upstream subscription client.
///
/// These arrive through the error event of a delivery registration and end
/// up in the result state handed to the sink; the binding layer never
/// returns them synchronously.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubscriptionError {
    /// Transport-level failure (connection refused, socket closed, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Execution errors returned by the GraphQL server.
    #[error("graphql errors: {}", summarize(.0))]
    GraphQL(Vec<GraphQLErrorObject>),

    /// Payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The delivery stream closed without completing the operation.
    #[error("subscription closed: {0}")]
    Closed(String),

    /// The provided document does not declare a subscription operation.
    #[error("invalid document: expected a subscription, got a {0}")]
    InvalidDocument(OperationKind),
}

impl SubscriptionError {
    /// Check if this is a transport-level error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Closed(_))
    }

    /// Check if this is a GraphQL execution error (server-side).
    pub fn is_graphql(&self) -> bool {
        matches!(self, Self::GraphQL(_))
    }

    /// Get the GraphQL error objects if this is an execution error.
    pub fn graphql_errors(&self) -> Option<&[GraphQLErrorObject]> {
        match self {
            Self::GraphQL(errors) => Some(errors),
            _ => None,
        }
    }
}

fn summarize(errors: &[GraphQLErrorObject]) -> String {
    match errors {
        [] => "none".to_string(),
        [first] => first.to_string(),
        [first, rest @ ..] => format!("{} (+{} more)", first, rest.len()),
    }
}
