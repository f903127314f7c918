//! Subscription lifecycle state machine.

use std::sync::Arc;

use lanyard_client::{DeliveryHandle, QueryHandle, SubscriptionError, SubscriptionPayload};

use crate::result::ResultState;

/// The controller's hold on upstream resources.
///
/// A delivery registration can only exist while its query handle does; the
/// variants encode that directly.
pub(crate) enum ObservableState {
    /// No upstream resources held.
    Inactive,
    /// Query opened, delivery not yet attached.
    QueryOnly { query: Arc<dyn QueryHandle> },
    /// Query opened and delivery attached.
    Subscribed {
        query: Arc<dyn QueryHandle>,
        delivery: Box<dyn DeliveryHandle>,
    },
}

impl ObservableState {
    pub(crate) fn is_inactive(&self) -> bool {
        matches!(self, Self::Inactive)
    }

    /// Cancel and discard the delivery registration, keeping the query
    /// handle.
    pub(crate) fn end_delivery(&mut self) {
        if matches!(self, Self::Subscribed { .. }) {
            let prev = std::mem::replace(self, Self::Inactive);
            if let Self::Subscribed { query, delivery } = prev {
                delivery.cancel();
                *self = Self::QueryOnly { query };
            }
        }
    }

    /// Cancel delivery if attached and discard both handles.
    pub(crate) fn teardown(&mut self) {
        self.end_delivery();
        *self = Self::Inactive;
    }
}

/// One message from the upstream delivery stream.
#[derive(Debug)]
pub(crate) enum DeliveryEvent {
    Next(SubscriptionPayload),
    Failed(SubscriptionError),
    Completed,
}

/// What the controller must do in response to a delivery event.
///
/// Computed by [`react`] as a pure function of the event and the mounted
/// flag, so the decision table is testable without upstream plumbing.
#[derive(Debug, PartialEq)]
pub(crate) enum Reaction {
    /// Forward the state to the sink.
    Forward(ResultState),
    /// Swallow the event; the host is no longer mounted.
    Suppress,
    /// Discard the delivery registration; the query handle stays.
    EndDelivery,
}

pub(crate) fn react(event: DeliveryEvent, mounted: bool) -> Reaction {
    match event {
        DeliveryEvent::Next(payload) if mounted => Reaction::Forward(ResultState {
            loading: false,
            data: payload.data,
            error: None,
        }),
        DeliveryEvent::Next(_) => Reaction::Suppress,
        DeliveryEvent::Failed(error) if mounted => Reaction::Forward(ResultState::error(error)),
        DeliveryEvent::Failed(_) => Reaction::Suppress,
        // Completion releases the registration whether mounted or not.
        DeliveryEvent::Completed => Reaction::EndDelivery,
    }
}
