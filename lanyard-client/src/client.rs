//! Upstream client boundary traits.

use std::sync::Arc;

use crate::{SubscribeRequest, SubscriptionError, SubscriptionPayload};

/// Receives the events of one delivery registration.
///
/// Callbacks run whenever the client delivers, on whatever task the client
/// runs them from; an observer attached inside an update pass is never
/// invoked before the attach call returns.
pub trait SubscriptionObserver: Send + Sync {
    /// A payload was pushed for the subscribed query.
    fn on_next(&self, payload: SubscriptionPayload);

    /// The upstream failed. Delivery for the registration may or may not
    /// continue afterwards.
    fn on_error(&self, error: SubscriptionError);

    /// The upstream completed the subscription; no further events follow.
    fn on_complete(&self);
}

/// A subscription-capable GraphQL client.
///
/// Implementations own transport, query execution, caching, and reconnect
/// behavior. `subscribe` is infallible at this boundary: malformed
/// documents or variables are the client's concern and surface through the
/// observer's error event once delivery is attached.
pub trait SubscriptionClient: Send + Sync {
    /// Open a subscribed-to query and return its handle.
    fn subscribe(&self, request: SubscribeRequest) -> Arc<dyn QueryHandle>;
}

/// The client-side representation of an active subscribed query,
/// prerequisite for registering delivery.
pub trait QueryHandle: Send + Sync {
    /// Register delivery of this query's event stream.
    fn attach(&self, observer: Arc<dyn SubscriptionObserver>) -> Box<dyn DeliveryHandle>;
}

/// A live delivery registration. Owns the ability to cancel further
/// delivery.
pub trait DeliveryHandle: Send + Sync {
    /// Stop delivery. After this returns, no further observer callbacks
    /// fire for this registration.
    fn cancel(&self);
}
