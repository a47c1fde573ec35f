//! End-to-end persistence flows against a recording transport.

use apiorm_connector::{Connector, ConnectorError, ResponsePayload, TransportError};
use apiorm_route::{
    HttpMethod, ResourceOptions, RouteDescriptor, RouteOverride, Router, RouterConfig,
};
use apiorm_test_utils::{
    new_user, persisted_user, setup_connector, user_class, RecordingTransport,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn save_new_record_assigns_server_identifier() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.respond_with_json(&json!({ "id": 7, "name": "foo" }));

    let class = Arc::new(user_class());
    let mut record = new_user(&class, "foo");
    let saved = connector.save(&mut record).await.unwrap();

    assert_eq!(record.id(), Some(&json!(7)));
    assert!(record.is_persisted());
    assert_eq!(saved, record);

    let request = wire.last_request().unwrap();
    assert_eq!(request.url, "/users/create");
}

#[tokio::test]
async fn save_persisted_record_updates() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.respond_with_json(&json!({ "id": 1, "name": "bar", "age": 30 }));

    let class = Arc::new(user_class());
    let mut record = persisted_user(&class, 1, "bar");
    let saved = connector.save(&mut record).await.unwrap();

    assert_eq!(saved.get("age"), Some(&json!(30)));
    assert_eq!(wire.last_request().unwrap().url, "/user/1/update");
}

#[tokio::test]
async fn delete_substitutes_only_the_placeholder() {
    let options = ResourceOptions::new()
        .with_method(HttpMethod::Delete)
        .only(apiorm_route::Action::Delete, RouteOverride::path("id/:id"));
    let (connector, wire) = setup_connector(
        RouterConfig::new().with_domain("http://example.com"),
        options,
    );
    wire.respond_with("true");

    let class = Arc::new(user_class());
    let payload = connector.delete(&persisted_user(&class, 1, "foo")).await.unwrap();

    assert_eq!(payload, ResponsePayload::Scalar(json!(true)));
    let request = wire.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, "http://example.com/user/1/id/:id");
}

#[tokio::test]
async fn string_identifiers_substituted_verbatim() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    let class = Arc::new(user_class());
    let mut record = new_user(&class, "foo");
    record.set_id(json!("a1b2"));

    connector.delete(&record).await.unwrap();
    assert_eq!(wire.last_request().unwrap().url, "/user/a1b2/delete");
}

#[tokio::test]
async fn all_maps_each_element() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.respond_with_json(&json!([
        { "id": 1, "name": "a" },
        { "id": 2, "name": "b", "age": 40 }
    ]));

    let class = Arc::new(user_class());
    let users = connector.all(&class).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].get("age"), Some(&json!(null)));
    assert_eq!(users[1].get("age"), Some(&json!(40)));
    assert!(users.iter().all(|u| u.is_persisted() && u.model_name() == "User"));
}

#[tokio::test]
async fn list_route_serves_all() {
    let mut router = Router::new(RouterConfig::new().with_domain("http://example.com"));
    router.add_route(RouteDescriptor::new("User", "list", "/users").with_method(HttpMethod::Get));
    let wire = RecordingTransport::new();
    let connector = Connector::with_transport(router, wire.clone());
    wire.respond_with_json(&json!([{ "id": 1, "name": "a" }]));

    let users = connector.all(&Arc::new(user_class())).await.unwrap();

    assert_eq!(users.len(), 1);
    let request = wire.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "http://example.com/users");
}

#[tokio::test]
async fn first_and_last_map_single_records() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.respond_with(r#"{"id":1,"name":"first"}"#)
        .respond_with(r#"{"id":9,"name":"last"}"#);

    let class = Arc::new(user_class());
    let first = connector.first(&class).await.unwrap().unwrap();
    let last = connector.last(&class).await.unwrap().unwrap();

    assert_eq!(first.get("name"), Some(&json!("first")));
    assert_eq!(last.id(), Some(&json!(9)));
    assert_eq!(wire.request_count(), 2);
}

#[tokio::test]
async fn count_passes_scalar_through() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.respond_with("1337");

    assert_eq!(connector.count(&Arc::new(user_class())).await.unwrap(), 1337);
}

#[tokio::test]
async fn custom_collection_action() {
    let options = ResourceOptions::new()
        .with_collection_action("search", RouteOverride::method(HttpMethod::Get));
    let (connector, wire) = setup_connector(RouterConfig::new().with_path("api"), options);
    wire.respond_with("[]");

    let class = Arc::new(user_class());
    let payload = connector.collection_action(&class, "search").await.unwrap();

    assert_eq!(payload, ResponsePayload::List(Vec::new()));
    let request = wire.last_request().unwrap();
    assert_eq!(request.url, "/api/users/search");
    assert_eq!(request.query_param("skip"), Some("0"));
}

#[tokio::test]
async fn route_miss_sends_nothing() {
    let (connector, wire) = setup_connector(
        RouterConfig::new(),
        ResourceOptions::new().except(apiorm_route::Action::First),
    );

    let err = connector.first(&Arc::new(user_class())).await.unwrap_err();
    assert!(matches!(err, ConnectorError::RouteNotFound { .. }));
    assert_eq!(wire.request_count(), 0);

    let other = Arc::new(apiorm_model::ModelClass::new("Post"));
    let err = connector.all(&other).await.unwrap_err();
    assert!(err.is_before_dispatch());
    assert_eq!(wire.request_count(), 0);
}

#[tokio::test]
async fn malformed_body_surfaces_as_parse_failure() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.respond_with("<html>oops</html>");

    let err = connector.all(&Arc::new(user_class())).await.unwrap_err();
    assert!(matches!(err, ConnectorError::MalformedResponse(_)));
}

#[tokio::test]
async fn transport_failure_is_not_retried() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    wire.fail_with(TransportError::Status {
        status: 503,
        body: "unavailable".into(),
    });

    let class = Arc::new(user_class());
    let mut record = new_user(&class, "foo");
    let err = connector.save(&mut record).await.unwrap_err();

    assert!(matches!(err, ConnectorError::Transport(ref e) if e.status() == Some(503)));
    assert_eq!(wire.request_count(), 1);
    assert!(record.is_new());
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let (connector, wire) = setup_connector(RouterConfig::new(), ResourceOptions::new());
    for n in 0..8 {
        wire.respond_with(n.to_string());
    }

    let class = Arc::new(user_class());
    let calls: Vec<_> = (0..8)
        .map(|_| {
            let connector = connector.clone();
            let class = Arc::clone(&class);
            tokio::spawn(async move { connector.count(&class).await })
        })
        .collect();

    let mut counts = Vec::new();
    for call in calls {
        counts.push(call.await.unwrap().unwrap());
    }
    counts.sort_unstable();
    assert_eq!(counts, (0..8).collect::<Vec<u64>>());
    assert_eq!(wire.request_count(), 8);
}
