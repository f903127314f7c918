//! Subscription documents.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The kind of operation a GraphQL document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// A read operation.
    Query,
    /// A write operation.
    Mutation,
    /// A long-lived push operation.
    Subscription,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// An immutable GraphQL document used to open a subscription.
///
/// Documents compare by identity, not content: callers are expected to
/// deduplicate their documents, and two structurally equal copies are
/// treated as different documents. Clones share the same identity.
#[derive(Debug, Clone)]
pub struct SubscriptionDocument {
    inner: Arc<DocumentInner>,
}

#[derive(Debug)]
struct DocumentInner {
    source: String,
    kind: OperationKind,
}

impl SubscriptionDocument {
    /// Create a document from GraphQL source text.
    ///
    /// The operation kind is taken from the document's leading keyword; a
    /// bare selection set counts as a query per the GraphQL shorthand rule.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let kind = leading_operation_kind(&source);
        Self {
            inner: Arc::new(DocumentInner { source, kind }),
        }
    }

    /// The document source text.
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// The operation kind the document declares.
    pub fn kind(&self) -> OperationKind {
        self.inner.kind
    }

    /// Whether this document declares a subscription operation.
    pub fn is_subscription(&self) -> bool {
        self.inner.kind == OperationKind::Subscription
    }

    /// Identity comparison: same document value, not same text.
    pub fn same_document(&self, other: &SubscriptionDocument) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Find the first operation keyword, skipping comments and whitespace.
fn leading_operation_kind(source: &str) -> OperationKind {
    for line in source.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let word: String = line
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        return match word.as_str() {
            "subscription" => OperationKind::Subscription,
            "mutation" => OperationKind::Mutation,
            _ => OperationKind::Query,
        };
    }
    OperationKind::Query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_leading_keyword() {
        let doc = SubscriptionDocument::new("subscription OnPing { ping }");
        assert_eq!(doc.kind(), OperationKind::Subscription);
        assert!(doc.is_subscription());

        let doc = SubscriptionDocument::new("mutation AddPing { addPing }");
        assert_eq!(doc.kind(), OperationKind::Mutation);

        let doc = SubscriptionDocument::new("query GetPing { ping }");
        assert_eq!(doc.kind(), OperationKind::Query);
    }

    #[test]
    fn test_shorthand_selection_set_is_query() {
        let doc = SubscriptionDocument::new("{ ping }");
        assert_eq!(doc.kind(), OperationKind::Query);
    }

    #[test]
    fn test_kind_skips_comments_and_blank_lines() {
        let doc = SubscriptionDocument::new("# updates feed\n\n  subscription Feed { entry }");
        assert!(doc.is_subscription());
    }

    #[test]
    fn test_identity_not_structural_equality() {
        let a = SubscriptionDocument::new("subscription S { a }");
        let b = SubscriptionDocument::new("subscription S { a }");
        assert!(!a.same_document(&b));
        assert!(a.same_document(&a.clone()));
    }
}
