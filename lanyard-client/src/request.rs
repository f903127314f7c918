//! Subscribe request shaping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::SubscriptionDocument;

/// How the upstream client should consult its cache when opening the
/// subscribed-to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Serve from cache, fall back to the network.
    #[default]
    CacheFirst,
    /// Serve from cache and refresh from the network.
    CacheAndNetwork,
    /// Always hit the network.
    NetworkOnly,
    /// Never hit the network.
    CacheOnly,
    /// Hit the network and bypass the cache entirely.
    NoCache,
    /// Hold the query without executing it.
    Standby,
}

/// The payload handed to [`SubscriptionClient::subscribe`].
///
/// [`SubscriptionClient::subscribe`]: crate::SubscriptionClient::subscribe
#[derive(Debug, Clone)]
pub struct SubscribeRequest {
    /// The subscription document.
    pub document: SubscriptionDocument,
    /// Variables for the operation.
    pub variables: Map<String, Value>,
    /// Cache policy for the subscribed-to query.
    pub fetch_policy: FetchPolicy,
}

impl SubscribeRequest {
    /// Create a request for the given document with no variables.
    pub fn new(document: SubscriptionDocument) -> Self {
        Self {
            document,
            variables: Map::new(),
            fetch_policy: FetchPolicy::default(),
        }
    }

    /// Replace the variables wholesale.
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Set a single variable.
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        self.variables
            .insert(name.into(), serde_json::to_value(value).unwrap_or_default());
        self
    }

    /// Set the fetch policy.
    pub fn fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }
}
