//! # Lanyard Client Boundary
//!
//! Types and traits at the seam between the lanyard binding layer and a
//! subscription-capable GraphQL client.
//!
//! ## Features
//!
//! - **Documents**: identity-compared subscription documents with an
//!   inferred operation kind
//! - **Requests**: the subscribe-call payload (document, variables, fetch
//!   policy)
//! - **Payloads**: push-event shaping for data and GraphQL error objects
//! - **Handles**: query and delivery registration traits, plus the
//!   observer the client invokes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lanyard_client::{SubscribeRequest, SubscriptionClient, SubscriptionDocument};
//!
//! let document = SubscriptionDocument::new(
//!     "subscription OnMessage($room: ID!) { messageAdded(room: $room) { id body } }",
//! );
//!
//! let request = SubscribeRequest::new(document)
//!     .variable("room", "general");
//!
//! let query = client.subscribe(request);
//! let delivery = query.attach(observer);
//! // ... later
//! delivery.cancel();
//! ```
//!
//! Implementations of [`SubscriptionClient`] own transport, delivery
//! guarantees, backpressure, and reconnect behavior. Nothing in this crate
//! touches the wire.

mod client;
mod document;
mod error;
mod payload;
mod request;

pub use client::{DeliveryHandle, QueryHandle, SubscriptionClient, SubscriptionObserver};
pub use document::{OperationKind, SubscriptionDocument};
pub use error::{Result, SubscriptionError};
pub use payload::{GraphQLErrorObject, PathSegment, SourceLocation, SubscriptionPayload, format_path};
pub use request::{FetchPolicy, SubscribeRequest};

// Re-export common types
pub use serde_json::Value as JsonValue;
