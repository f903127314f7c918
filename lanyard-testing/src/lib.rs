//! Test doubles for the lanyard client boundary.
//!
//! Provides a scripted [`MockClient`] that records every subscribe call
//! and hands out manually driven query handles, so binding behavior can be
//! exercised without any transport.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use lanyard_client::{SubscribeRequest, SubscriptionClient, SubscriptionDocument};
//! use lanyard_testing::MockClient;
//! use serde_json::json;
//!
//! let mock = MockClient::new();
//! let client: Arc<dyn SubscriptionClient> = Arc::new(mock.clone());
//!
//! let request = SubscribeRequest::new(SubscriptionDocument::new("subscription S { a }"));
//! let _query = client.subscribe(request);
//!
//! assert_eq!(mock.subscribe_count(), 1);
//!
//! // Drive delivery from the test:
//! mock.handle(0).emit_data(json!({"a": 1}));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use lanyard_client::{
    DeliveryHandle, QueryHandle, SubscribeRequest, SubscriptionClient, SubscriptionError,
    SubscriptionObserver, SubscriptionPayload,
};

/// Scripted subscription client.
///
/// Records every subscribe request and creates one [`MockQueryHandle`] per
/// call; clones share state, so a test can keep the concrete mock while
/// handing an `Arc<dyn SubscriptionClient>` to the code under test.
#[derive(Clone, Default)]
pub struct MockClient {
    state: Arc<MockClientState>,
}

#[derive(Default)]
struct MockClientState {
    requests: Mutex<Vec<SubscribeRequest>>,
    handles: Mutex<Vec<Arc<MockQueryHandle>>>,
}

impl MockClient {
    /// Create a new mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscribe calls seen.
    pub fn subscribe_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// Requests recorded, in call order.
    pub fn requests(&self) -> Vec<SubscribeRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The query handle created by the n-th subscribe call.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `index + 1` subscribe calls happened.
    pub fn handle(&self, index: usize) -> Arc<MockQueryHandle> {
        self.state.handles.lock().unwrap()[index].clone()
    }

    /// The query handle created by the most recent subscribe call.
    ///
    /// # Panics
    ///
    /// Panics if no subscribe call happened yet.
    pub fn last_handle(&self) -> Arc<MockQueryHandle> {
        self.state
            .handles
            .lock()
            .unwrap()
            .last()
            .expect("no subscribe call recorded")
            .clone()
    }
}

impl SubscriptionClient for MockClient {
    fn subscribe(&self, request: SubscribeRequest) -> Arc<dyn QueryHandle> {
        self.state.requests.lock().unwrap().push(request);
        let handle = Arc::new(MockQueryHandle::default());
        self.state.handles.lock().unwrap().push(handle.clone());
        handle
    }
}

/// Query handle driven manually from tests.
///
/// Each attach creates an independent registration; `emit_*` delivers to
/// every registration that has not been cancelled, honoring the boundary
/// contract that a cancelled registration sees no further events.
#[derive(Default)]
pub struct MockQueryHandle {
    registrations: Mutex<Vec<Arc<MockRegistration>>>,
}

struct MockRegistration {
    observer: Arc<dyn SubscriptionObserver>,
    cancelled: AtomicBool,
}

impl MockQueryHandle {
    /// Number of attach calls seen.
    pub fn attach_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }

    /// Number of registrations that have been cancelled.
    pub fn cancel_count(&self) -> usize {
        self.registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.cancelled.load(Ordering::Acquire))
            .count()
    }

    fn active(&self) -> Vec<Arc<MockRegistration>> {
        self.registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.cancelled.load(Ordering::Acquire))
            .cloned()
            .collect()
    }

    /// Deliver a payload to every active registration.
    pub fn emit_next(&self, payload: SubscriptionPayload) {
        for registration in self.active() {
            registration.observer.on_next(payload.clone());
        }
    }

    /// Deliver a data-only payload to every active registration.
    pub fn emit_data(&self, value: Value) {
        self.emit_next(SubscriptionPayload::data(value));
    }

    /// Deliver an error to every active registration.
    pub fn emit_error(&self, error: SubscriptionError) {
        for registration in self.active() {
            registration.observer.on_error(error.clone());
        }
    }

    /// Complete every active registration.
    pub fn emit_complete(&self) {
        for registration in self.active() {
            registration.observer.on_complete();
        }
    }
}

impl QueryHandle for MockQueryHandle {
    fn attach(&self, observer: Arc<dyn SubscriptionObserver>) -> Box<dyn DeliveryHandle> {
        let registration = Arc::new(MockRegistration {
            observer,
            cancelled: AtomicBool::new(false),
        });
        self.registrations.lock().unwrap().push(registration.clone());
        Box::new(MockDeliveryHandle { registration })
    }
}

struct MockDeliveryHandle {
    registration: Arc<MockRegistration>,
}

impl DeliveryHandle for MockDeliveryHandle {
    fn cancel(&self) {
        self.registration.cancelled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanyard_client::SubscriptionDocument;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingObserver {
        next: Mutex<Vec<SubscriptionPayload>>,
        errors: Mutex<Vec<SubscriptionError>>,
        completes: Mutex<usize>,
    }

    impl SubscriptionObserver for RecordingObserver {
        fn on_next(&self, payload: SubscriptionPayload) {
            self.next.lock().unwrap().push(payload);
        }
        fn on_error(&self, error: SubscriptionError) {
            self.errors.lock().unwrap().push(error);
        }
        fn on_complete(&self) {
            *self.completes.lock().unwrap() += 1;
        }
    }

    fn request() -> SubscribeRequest {
        SubscribeRequest::new(SubscriptionDocument::new("subscription S { a }"))
    }

    #[test]
    fn test_records_requests_per_subscribe() {
        let mock = MockClient::new();
        mock.subscribe(request().variable("id", 1));
        mock.subscribe(request().variable("id", 2));

        assert_eq!(mock.subscribe_count(), 2);
        assert_eq!(mock.requests()[1].variables["id"], 2);
    }

    #[test]
    fn test_emit_reaches_attached_observer() {
        let mock = MockClient::new();
        let query = mock.subscribe(request());
        let observer = Arc::new(RecordingObserver::default());
        let _delivery = query.attach(observer.clone());

        mock.handle(0).emit_data(json!({"a": 1}));
        mock.handle(0).emit_complete();

        assert_eq!(observer.next.lock().unwrap().len(), 1);
        assert_eq!(*observer.completes.lock().unwrap(), 1);
    }

    #[test]
    fn test_cancelled_registration_sees_no_events() {
        let mock = MockClient::new();
        let query = mock.subscribe(request());
        let observer = Arc::new(RecordingObserver::default());
        let delivery = query.attach(observer.clone());

        delivery.cancel();
        mock.handle(0).emit_data(json!({"a": 1}));
        mock.handle(0).emit_error(SubscriptionError::Transport("gone".into()));

        assert!(observer.next.lock().unwrap().is_empty());
        assert!(observer.errors.lock().unwrap().is_empty());
        assert_eq!(mock.handle(0).cancel_count(), 1);
    }

    #[test]
    fn test_registrations_are_independent() {
        let mock = MockClient::new();
        let query = mock.subscribe(request());
        let first = Arc::new(RecordingObserver::default());
        let second = Arc::new(RecordingObserver::default());
        let delivery = query.attach(first.clone());
        let _second_delivery = query.attach(second.clone());

        delivery.cancel();
        mock.handle(0).emit_data(json!({"a": 1}));

        assert!(first.next.lock().unwrap().is_empty());
        assert_eq!(second.next.lock().unwrap().len(), 1);
        assert_eq!(mock.handle(0).attach_count(), 2);
    }
}
