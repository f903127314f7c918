//! # Lanyard Binding
//!
//! Binds one GraphQL subscription to a host component's lifecycle.
//!
//! The controller decides, on every options update, whether to tear down
//! and recreate the subscription; forwards delivered events to a result
//! sink gated on the host's mounted state; and releases both upstream
//! handles on detach. Everything hard — transport, delivery guarantees,
//! backpressure, reconnect — belongs to the client behind the
//! [`lanyard_client`] boundary traits.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lanyard_binding::{SubscriptionController, SubscriptionOptions, ResultState};
//! use lanyard_client::SubscriptionDocument;
//!
//! let document = SubscriptionDocument::new(
//!     "subscription OnMessage($room: ID!) { messageAdded(room: $room) { id body } }",
//! );
//! let options = SubscriptionOptions::builder(document)
//!     .variable("room", "general")
//!     .build();
//!
//! let controller = SubscriptionController::new(options.clone(), move |result| {
//!     render(result);
//! });
//!
//! // Once per host update pass:
//! let result = controller.execute(&client, options, ResultState::loading());
//! let guard = controller.after_execute();
//!
//! // At detach time, exactly once:
//! guard.detach();
//! ```

mod controller;
mod lifecycle;
mod options;
mod result;
mod state;

pub use controller::{DetachGuard, SubscriptionController};
pub use lifecycle::LifecycleToken;
pub use options::{
    OnComplete, OnData, ResubscribePolicy, SubscriptionDataContext, SubscriptionOptions,
    SubscriptionOptionsBuilder,
};
pub use result::{ExecutedResult, ResultSink, ResultState};
