//! Integration tests for the top-level collection clients.
//!
//! A mock server stands in for the remote API so each test can check the
//! exact request the client sends and how it shapes the response.

mod common;

use common::{api_for, TEST_API_KEY};
use httpmock::prelude::*;
use open_to_close::{ListParams, OpenToCloseError, Resource};
use serde_json::json;

#[tokio::test]
async fn test_list_sends_params_and_api_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/properties")
                .query_param("api_token", TEST_API_KEY)
                .query_param("limit", "2")
                .query_param("status", "active")
                .header("accept", "application/json");
            then.status(200).json_body(json!([
                {"id": 1, "title": "12 Oak St"},
                {"id": 2, "title": "9 Elm Ave"}
            ]));
        })
        .await;

    let api = api_for(&server);
    let params = ListParams::new().limit(2).param("status", "active");
    let properties = api.properties().list(Some(&params)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0]["title"], "12 Oak St");
}

/// The record count never exceeds the requested limit, even if the server
/// ignores it.
#[tokio::test]
async fn test_list_never_exceeds_limit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/contacts");
            then.status(200).json_body(json!({
                "data": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}]
            }));
        })
        .await;

    let api = api_for(&server);
    let contacts = api
        .contacts()
        .list(Some(&ListParams::new().limit(3)))
        .await
        .unwrap();
    assert_eq!(contacts.len(), 3);
}

#[tokio::test]
async fn test_list_empty_collection_is_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(200).json_body(json!([]));
        })
        .await;

    let api = api_for(&server);
    let tags = api.tags().list(None).await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_create_then_retrieve_returns_accepted_fields() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/contacts")
                .query_param("api_token", TEST_API_KEY)
                .header("content-type", "application/json")
                .json_body(json!({
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "ada@example.com",
                    "company": "Analytical Engines"
                }));
            then.status(201).json_body(json!({
                "id": 501,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            }));
        })
        .await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/contacts/501");
            then.status(200).json_body(json!({
                "id": 501,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            }));
        })
        .await;

    let api = api_for(&server);
    let created = api
        .contacts()
        .create(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "company": "Analytical Engines"
        }))
        .await
        .unwrap();
    let id = created["id"].as_u64().unwrap();

    let fetched = api.contacts().retrieve(id).await.unwrap();

    create.assert_async().await;
    retrieve.assert_async().await;
    assert_eq!(fetched["first_name"], "Ada");
    assert_eq!(fetched["email"], "ada@example.com");
    // the server silently dropped `company`; the client passes that through
    assert!(fetched.get("company").is_none());
}

#[tokio::test]
async fn test_update_sends_partial_body_with_put() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/teams/8")
                .json_body(json!({"name": "West Coast"}));
            then.status(200)
                .json_body(json!({"id": 8, "name": "West Coast", "size": 4}));
        })
        .await;

    let api = api_for(&server);
    let team = api
        .teams()
        .update(8, &json!({"name": "West Coast"}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(team["name"], "West Coast");
    assert_eq!(team["size"], 4);
}

#[tokio::test]
async fn test_delete_then_retrieve_is_not_found() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/agents/77");
            then.status(200).json_body(json!({
                "success": true,
                "message": "Agent deleted",
                "id": 77
            }));
        })
        .await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/agents/77");
            then.status(404).json_body(json!({"message": "Agent not found"}));
        })
        .await;

    let api = api_for(&server);
    let confirmation = api.agents().delete(77).await.unwrap();
    assert!(confirmation.success);
    assert_eq!(confirmation.message.as_deref(), Some("Agent deleted"));
    assert_eq!(confirmation.id, 77);

    let error = api.agents().retrieve(77).await.unwrap_err();
    delete.assert_async().await;
    retrieve.assert_async().await;
    match error {
        OpenToCloseError::NotFound { message, .. } => assert_eq!(message, "Agent not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_with_no_content_synthesizes_confirmation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/3");
            then.status(204);
        })
        .await;

    let api = api_for(&server);
    let confirmation = api.users().delete(3).await.unwrap();
    assert!(confirmation.success);
    assert_eq!(confirmation.message, None);
    assert_eq!(confirmation.id, 3);
}

#[tokio::test]
async fn test_delete_absent_record_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/tags/404");
            then.status(404);
        })
        .await;

    let api = api_for(&server);
    let error = api.tags().delete(404).await.unwrap_err();
    assert!(matches!(error, OpenToCloseError::NotFound { .. }));
    assert_eq!(error.status_code(), Some(404));
}

/// Every top-level accessor talks to its own collection path.
#[tokio::test]
async fn test_every_resource_uses_its_collection_path() {
    let server = MockServer::start_async().await;
    let api = api_for(&server);

    for (resource, path) in [
        (Resource::Properties, "/properties/1"),
        (Resource::Contacts, "/contacts/1"),
        (Resource::Agents, "/agents/1"),
        (Resource::Teams, "/teams/1"),
        (Resource::Tags, "/tags/1"),
        (Resource::Users, "/users/1"),
    ] {
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(json!({"id": 1, "kind": path}));
            })
            .await;

        let record = api.resource(resource).retrieve(1).await.unwrap();
        mock.assert_async().await;
        assert_eq!(record["kind"], path);
    }
}

#[tokio::test]
async fn test_retrieve_non_object_is_unexpected_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/properties/1");
            then.status(200).json_body(json!(["not", "a", "record"]));
        })
        .await;

    let api = api_for(&server);
    let error = api.properties().retrieve(1).await.unwrap_err();
    assert!(matches!(error, OpenToCloseError::UnexpectedResponse(_)));
}
