//! Integration tests for the todo endpoints

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use uuid::Uuid;

use common::authed;

fn create_request(token: &str, text: &str) -> test::TestRequest {
    authed(test::TestRequest::post().uri("/todos"), token).set_json(json!({ "text": text }))
}

#[actix_web::test]
async fn test_create_and_list_todos() {
    let app = test_app!();
    let token = register!(app, "a@x.com", "secret1");

    let response = test::call_service(&app, create_request(&token, "  Walk the dog ").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let todo: Value = test::read_body_json(response).await;
    assert_eq!(todo["text"], "Walk the dog");
    assert_eq!(todo["completed"], false);
    assert!(todo["completedAt"].is_null());
    assert!(todo["_creator"].is_string());

    let request = authed(test::TestRequest::get().uri("/todos"), &token).to_request();
    let body: Value = test::read_body_json(test::call_service(&app, request).await).await;
    let todos = body["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["_id"], todo["_id"]);
}

#[actix_web::test]
async fn test_create_rejects_blank_text() {
    let app = test_app!();
    let token = register!(app, "a@x.com", "secret1");

    for text in ["", "   "] {
        let response = test::call_service(&app, create_request(&token, text).to_request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response =
        test::call_service(&app, create_request(&token, &"x".repeat(1025)).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_todos_are_scoped_to_their_creator() {
    let app = test_app!();
    let alice = register!(app, "alice@x.com", "secret1");
    let bob = register!(app, "bob@x.com", "secret1");

    let response = test::call_service(&app, create_request(&alice, "Alice's task").to_request()).await;
    let todo: Value = test::read_body_json(response).await;
    let uri = format!("/todos/{}", todo["_id"].as_str().unwrap());

    let request = authed(test::TestRequest::get().uri("/todos"), &bob).to_request();
    let body: Value = test::read_body_json(test::call_service(&app, request).await).await;
    assert!(body["todos"].as_array().unwrap().is_empty());

    let request = authed(test::TestRequest::get().uri(&uri), &bob).to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);

    let request = authed(test::TestRequest::patch().uri(&uri), &bob)
        .set_json(json!({ "text": "hijacked" }))
        .to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);

    let request = authed(test::TestRequest::delete().uri(&uri), &bob).to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);

    let request = authed(test::TestRequest::get().uri(&uri), &alice).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["todo"]["text"], "Alice's task");
}

#[actix_web::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let app = test_app!();
    let token = register!(app, "a@x.com", "secret1");

    let missing = format!("/todos/{}", Uuid::new_v4());
    for uri in [missing.as_str(), "/todos/not-a-uuid", "/todos/123"] {
        let request = authed(test::TestRequest::get().uri(uri), &token).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {}", uri);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "not_found");
    }
}

#[actix_web::test]
async fn test_patch_completion_semantics() {
    let app = test_app!();
    let token = register!(app, "a@x.com", "secret1");

    let response = test::call_service(&app, create_request(&token, "Water plants").to_request()).await;
    let todo: Value = test::read_body_json(response).await;
    let uri = format!("/todos/{}", todo["_id"].as_str().unwrap());

    let request = authed(test::TestRequest::patch().uri(&uri), &token)
        .set_json(json!({ "completed": true }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, request).await).await;
    assert_eq!(body["todo"]["completed"], true);
    assert!(body["todo"]["completedAt"].is_i64());

    // a text-only patch also resets completion
    let request = authed(test::TestRequest::patch().uri(&uri), &token)
        .set_json(json!({ "text": "Water the plants" }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, request).await).await;
    assert_eq!(body["todo"]["text"], "Water the plants");
    assert_eq!(body["todo"]["completed"], false);
    assert!(body["todo"]["completedAt"].is_null());

    // unknown fields are ignored
    let request = authed(test::TestRequest::patch().uri(&uri), &token)
        .set_json(json!({ "completed": true, "_creator": Uuid::new_v4().to_string() }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, request).await).await;
    assert_eq!(body["todo"]["_creator"], todo["_creator"]);
}

#[actix_web::test]
async fn test_delete_returns_removed_todo() {
    let app = test_app!();
    let token = register!(app, "a@x.com", "secret1");

    let response = test::call_service(&app, create_request(&token, "Pay rent").to_request()).await;
    let todo: Value = test::read_body_json(response).await;
    let uri = format!("/todos/{}", todo["_id"].as_str().unwrap());

    let request = authed(test::TestRequest::delete().uri(&uri), &token).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["todo"]["_id"], todo["_id"]);

    let request = authed(test::TestRequest::delete().uri(&uri), &token).to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_todo_routes_require_authentication() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/todos")
        .set_json(json!({ "text": "sneaky" }))
        .to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::UNAUTHORIZED);

    let request = test::TestRequest::get().uri("/todos").to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::UNAUTHORIZED);
}
