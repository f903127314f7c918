//! Integration tests for the lanyard facade.

use std::sync::{Arc, Mutex};

use serde_json::json;

use lanyard::prelude::*;
use lanyard_testing::MockClient;

#[test]
fn test_full_flow_through_the_prelude() {
    let document = SubscriptionDocument::new(
        "subscription OnMessage($room: ID!) { messageAdded(room: $room) { id body } }",
    );
    let options = SubscriptionOptions::builder(document)
        .variable("room", "general")
        .fetch_policy(FetchPolicy::NoCache)
        .build();

    let states: Arc<Mutex<Vec<ResultState>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = states.clone();
    let controller = SubscriptionController::new(options.clone(), move |state| {
        sink.lock().unwrap().push(state);
    });

    let mock = MockClient::new();
    let client: Arc<dyn SubscriptionClient> = Arc::new(mock.clone());

    let result = controller.execute(&client, options, ResultState::loading());
    assert!(result.state.loading);
    assert_eq!(result.variables["room"], "general");
    assert_eq!(mock.requests()[0].fetch_policy, FetchPolicy::NoCache);

    let guard = controller.after_execute();
    mock.handle(0).emit_data(json!({"messageAdded": {"id": "1", "body": "hi"}}));

    assert_eq!(states.lock().unwrap().len(), 1);
    assert!(states.lock().unwrap()[0].is_ready());

    guard.detach();
    assert_eq!(mock.handle(0).cancel_count(), 1);
}
