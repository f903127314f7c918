//! Per-subscription options.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use lanyard_client::{FetchPolicy, SubscriptionClient, SubscriptionDocument, SubscriptionPayload};

/// Context handed to the [`OnData`] callback.
pub struct SubscriptionDataContext {
    /// The client that delivered the payload.
    pub client: Arc<dyn SubscriptionClient>,
    /// The delivered payload.
    pub subscription_data: SubscriptionPayload,
}

/// Side-effecting callback invoked synchronously on every delivered
/// payload, before the sink sees it and regardless of mounted state.
pub type OnData = Arc<dyn Fn(SubscriptionDataContext) + Send + Sync>;

/// Callback invoked when the upstream completes the subscription.
pub type OnComplete = Arc<dyn Fn() + Send + Sync>;

/// Whether an options update should tear down and recreate the
/// subscription when its parameters changed.
#[derive(Clone, Default)]
pub enum ResubscribePolicy {
    /// Resubscribe whenever variables or the document change (default).
    #[default]
    Always,
    /// Never resubscribe; parameter changes leave the registration alone.
    Never,
    /// Ask the predicate, passing the options in effect for this update.
    When(Arc<dyn Fn(&SubscriptionOptions) -> bool + Send + Sync>),
}

impl ResubscribePolicy {
    /// Resolve the policy to a bool for the given options.
    pub fn resolve(&self, options: &SubscriptionOptions) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::When(predicate) => predicate(options),
        }
    }
}

impl fmt::Debug for ResubscribePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "Always"),
            Self::Never => write!(f, "Never"),
            Self::When(_) => write!(f, "When(..)"),
        }
    }
}

/// Options for one bound subscription.
///
/// Immutable per call; a fresh value arrives on every `execute`. Clones are
/// cheap (the document and callbacks are shared).
#[derive(Clone)]
pub struct SubscriptionOptions {
    document: SubscriptionDocument,
    variables: Map<String, Value>,
    fetch_policy: FetchPolicy,
    resubscribe: ResubscribePolicy,
    on_data: Option<OnData>,
    on_complete: Option<OnComplete>,
}

impl SubscriptionOptions {
    /// Options for the given document with every other field defaulted.
    pub fn new(document: SubscriptionDocument) -> Self {
        Self {
            document,
            variables: Map::new(),
            fetch_policy: FetchPolicy::default(),
            resubscribe: ResubscribePolicy::default(),
            on_data: None,
            on_complete: None,
        }
    }

    /// Create an options builder.
    pub fn builder(document: SubscriptionDocument) -> SubscriptionOptionsBuilder {
        SubscriptionOptionsBuilder {
            options: Self::new(document),
        }
    }

    /// The subscription document.
    pub fn document(&self) -> &SubscriptionDocument {
        &self.document
    }

    /// Variables for the operation.
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Cache policy for the subscribed-to query.
    pub fn fetch_policy(&self) -> FetchPolicy {
        self.fetch_policy
    }

    /// The resubscription policy.
    pub fn resubscribe(&self) -> &ResubscribePolicy {
        &self.resubscribe
    }

    /// The per-delivery callback, if configured.
    pub fn on_data(&self) -> Option<&OnData> {
        self.on_data.as_ref()
    }

    /// The completion callback, if configured.
    pub fn on_complete(&self) -> Option<&OnComplete> {
        self.on_complete.as_ref()
    }
}

impl fmt::Debug for SubscriptionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionOptions")
            .field("document", &self.document.kind())
            .field("variables", &self.variables)
            .field("fetch_policy", &self.fetch_policy)
            .field("resubscribe", &self.resubscribe)
            .field("on_data", &self.on_data.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Builder for subscription options.
pub struct SubscriptionOptionsBuilder {
    options: SubscriptionOptions,
}

impl SubscriptionOptionsBuilder {
    /// Replace the variables wholesale.
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.options.variables = variables;
        self
    }

    /// Set a single variable.
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        self.options
            .variables
            .insert(name.into(), serde_json::to_value(value).unwrap_or_default());
        self
    }

    /// Set the fetch policy.
    pub fn fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.options.fetch_policy = policy;
        self
    }

    /// Set the resubscription policy.
    pub fn resubscribe(mut self, policy: ResubscribePolicy) -> Self {
        self.options.resubscribe = policy;
        self
    }

    /// Set the per-delivery callback.
    pub fn on_data(mut self, callback: impl Fn(SubscriptionDataContext) + Send + Sync + 'static) -> Self {
        self.options.on_data = Some(Arc::new(callback));
        self
    }

    /// Set the completion callback.
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.options.on_complete = Some(Arc::new(callback));
        self
    }

    /// Build the options.
    pub fn build(self) -> SubscriptionOptions {
        self.options
    }
}
