// Lanyard - GraphQL subscription-to-view binding for Rust
//
// This library decides when to (re)subscribe, shapes intermediate result
// objects, and unsubscribes on teardown. Transport, delivery guarantees,
// and caching belong to the upstream client behind the boundary traits.

// Re-export the client boundary
pub use lanyard_client::*;

// Re-export the binding layer
pub use lanyard_binding::*;

// Re-export test doubles
#[cfg(feature = "testing")]
pub use lanyard_testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        DeliveryHandle,
        DetachGuard,
        ExecutedResult,
        FetchPolicy,
        LifecycleToken,
        QueryHandle,
        ResubscribePolicy,
        ResultState,
        SubscribeRequest,
        SubscriptionClient,
        SubscriptionController,
        SubscriptionDocument,
        SubscriptionObserver,
        SubscriptionOptions,
        SubscriptionPayload,
    };
}
