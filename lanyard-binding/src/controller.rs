//! The subscription controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use lanyard_client::{
    SubscribeRequest, SubscriptionClient, SubscriptionError, SubscriptionObserver,
    SubscriptionPayload,
};

use crate::lifecycle::LifecycleToken;
use crate::options::{SubscriptionDataContext, SubscriptionOptions};
use crate::result::{ExecutedResult, ResultSink, ResultState};
use crate::state::{DeliveryEvent, ObservableState, Reaction, react};

/// Snapshot of the option fields the resubscription comparison looks at.
struct PreviousOptions {
    document: lanyard_client::SubscriptionDocument,
    variables: serde_json::Map<String, serde_json::Value>,
}

struct ControllerInner {
    state: ObservableState,
    client: Option<Arc<dyn SubscriptionClient>>,
    previous: Option<PreviousOptions>,
    options: SubscriptionOptions,
}

impl ControllerInner {
    fn cleanup(&mut self) {
        self.state.teardown();
    }
}

fn lock(inner: &Arc<Mutex<ControllerInner>>) -> MutexGuard<'_, ControllerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Binds one GraphQL subscription to a host component.
///
/// The host calls [`execute`] once per update pass with the options in
/// effect for that pass, then [`after_execute`] once the pass has been
/// applied. Delivered events reach the sink only while the returned
/// [`DetachGuard`] has not been consumed.
///
/// [`execute`]: SubscriptionController::execute
/// [`after_execute`]: SubscriptionController::after_execute
pub struct SubscriptionController {
    inner: Arc<Mutex<ControllerInner>>,
    token: LifecycleToken,
    sink: ResultSink,
}

impl SubscriptionController {
    /// Create a controller with its own lifecycle token.
    pub fn new(
        options: SubscriptionOptions,
        sink: impl Fn(ResultState) + Send + Sync + 'static,
    ) -> Self {
        Self::with_token(options, sink, LifecycleToken::new())
    }

    /// Create a controller gated on a host-owned lifecycle token.
    pub fn with_token(
        options: SubscriptionOptions,
        sink: impl Fn(ResultState) + Send + Sync + 'static,
        token: LifecycleToken,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                state: ObservableState::Inactive,
                client: None,
                previous: None,
                options,
            })),
            token,
            sink: Arc::new(sink),
        }
    }

    /// The lifecycle token gating forwards to the sink.
    pub fn token(&self) -> &LifecycleToken {
        &self.token
    }

    /// Apply an options update. Called once per host update pass.
    ///
    /// Decides whether the active subscription must be torn down and
    /// recreated, lazily (re)creates the query and delivery registration,
    /// and returns the result to render merged with the variables in
    /// effect. Never fails synchronously: upstream problems surface
    /// through the sink as error states.
    pub fn execute(
        &self,
        client: &Arc<dyn SubscriptionClient>,
        options: SubscriptionOptions,
        incoming: ResultState,
    ) -> ExecutedResult {
        let mut inner = lock(&self.inner);
        let mut current = incoming;

        // A swapped (or first-seen) client invalidates whatever the host
        // carried over from the previous pass.
        let client_is_new = match &inner.client {
            Some(held) => !Arc::ptr_eq(held, client),
            None => true,
        };
        if client_is_new {
            debug!("subscription client changed, resetting to loading");
            inner.client = Some(Arc::clone(client));
            current = ResultState::loading();
        }

        // Event callbacks read the latest options.
        inner.options = options.clone();

        if !options.document().is_subscription() {
            let kind = options.document().kind();
            warn!(%kind, "document does not declare a subscription operation");
            return ExecutedResult {
                state: ResultState::error(SubscriptionError::InvalidDocument(kind)),
                variables: options.variables().clone(),
            };
        }

        let resubscribe = options.resubscribe().resolve(&options);
        let parameters_changed = inner.previous.as_ref().is_some_and(|previous| {
            previous.variables != *options.variables()
                || !previous.document.same_document(options.document())
        });
        if resubscribe && parameters_changed {
            debug!("subscription parameters changed, resubscribing");
            inner.state.teardown();
            current = ResultState::loading();
        }

        if inner.state.is_inactive() {
            let request = SubscribeRequest::new(options.document().clone())
                .variables(options.variables().clone())
                .fetch_policy(options.fetch_policy());
            trace!("opening subscribed-to query");
            let query = client.subscribe(request);
            inner.state = ObservableState::QueryOnly { query };
        }

        if matches!(inner.state, ObservableState::QueryOnly { .. }) {
            let prev = std::mem::replace(&mut inner.state, ObservableState::Inactive);
            if let ObservableState::QueryOnly { query } = prev {
                let observer: Arc<dyn SubscriptionObserver> = Arc::new(ControllerObserver {
                    inner: Arc::clone(&self.inner),
                    token: self.token.clone(),
                    sink: Arc::clone(&self.sink),
                });
                let delivery = query.attach(observer);
                inner.state = ObservableState::Subscribed { query, delivery };
            }
        }

        inner.previous = Some(PreviousOptions {
            document: options.document().clone(),
            variables: options.variables().clone(),
        });

        ExecutedResult {
            state: current,
            variables: options.variables().clone(),
        }
    }

    /// Mark the host mounted and hand back the teardown guard.
    ///
    /// The host must consume the guard exactly once at detach time.
    pub fn after_execute(&self) -> DetachGuard {
        self.token.mount();
        DetachGuard {
            inner: Arc::clone(&self.inner),
            token: self.token.clone(),
        }
    }
}

/// Teardown handle returned by [`SubscriptionController::after_execute`].
///
/// Consuming [`detach`] makes the exactly-once contract structural.
///
/// [`detach`]: DetachGuard::detach
#[must_use = "the host must invoke detach exactly once"]
pub struct DetachGuard {
    inner: Arc<Mutex<ControllerInner>>,
    token: LifecycleToken,
}

impl DetachGuard {
    /// Unmount and release both upstream handles.
    pub fn detach(self) {
        self.token.unmount();
        debug!("host detached, releasing subscription handles");
        lock(&self.inner).cleanup();
    }
}

/// Observer registered against the query handle; one per attach.
struct ControllerObserver {
    inner: Arc<Mutex<ControllerInner>>,
    token: LifecycleToken,
    sink: ResultSink,
}

impl SubscriptionObserver for ControllerObserver {
    fn on_next(&self, payload: SubscriptionPayload) {
        let (on_data, client) = {
            let inner = lock(&self.inner);
            (inner.options.on_data().cloned(), inner.client.clone())
        };
        if let (Some(on_data), Some(client)) = (on_data, client) {
            on_data(SubscriptionDataContext {
                client,
                subscription_data: payload.clone(),
            });
        }
        match react(DeliveryEvent::Next(payload), self.token.is_mounted()) {
            Reaction::Forward(state) => (self.sink)(state),
            Reaction::Suppress => trace!("payload delivered after detach, dropping"),
            Reaction::EndDelivery => {}
        }
    }

    fn on_error(&self, error: SubscriptionError) {
        match react(DeliveryEvent::Failed(error), self.token.is_mounted()) {
            Reaction::Forward(state) => (self.sink)(state),
            _ => trace!("error delivered after detach, dropping"),
        }
    }

    fn on_complete(&self) {
        let on_complete = lock(&self.inner).options.on_complete().cloned();
        if let Some(on_complete) = on_complete {
            on_complete();
        }
        if react(DeliveryEvent::Completed, self.token.is_mounted()) == Reaction::EndDelivery {
            lock(&self.inner).state.end_delivery();
        }
    }
}
