//! Result state surfaced to the view layer.

use std::sync::Arc;

use serde_json::{Map, Value};

use lanyard_client::SubscriptionError;

/// The value surfaced to the sink for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultState {
    /// True while the subscription is being (re)established.
    pub loading: bool,
    /// Data from the most recent delivery.
    pub data: Option<Value>,
    /// Error from the most recent failed delivery.
    pub error: Option<SubscriptionError>,
}

impl ResultState {
    /// The synthetic state used while (re)establishing a subscription.
    pub fn loading() -> Self {
        Self {
            loading: true,
            data: None,
            error: None,
        }
    }

    /// A settled state carrying delivered data.
    pub fn data(value: Value) -> Self {
        Self {
            loading: false,
            data: Some(value),
            error: None,
        }
    }

    /// A settled state carrying a delivery error.
    pub fn error(error: SubscriptionError) -> Self {
        Self {
            loading: false,
            data: None,
            error: Some(error),
        }
    }

    /// Settled with data and no error.
    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

/// What `execute` hands back to the host: the result state merged with the
/// variables in effect for this update pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedResult {
    /// The (possibly overridden) result state.
    pub state: ResultState,
    /// Variables the subscription is currently bound to.
    pub variables: Map<String, Value>,
}

/// Callback that receives result-state updates for rendering.
pub type ResultSink = Arc<dyn Fn(ResultState) + Send + Sync>;
