//! End-to-end behaviour of the contact routes, driven in-process through
//! the same router and middleware stack the binary serves.

use std::sync::Arc;

use bytes::Bytes;
use contactd::app::build_app;
use contactd::contacts::{ContactState, TypedFields};
use contactd::store::{MemoryCollection, ObjectId};
use contactd::{Response, Router};
use http::{Method, StatusCode};
use http_body_util::Full;
use serde_json::{Value, json};

struct TestApp {
    router: Router<ContactState>,
}

impl TestApp {
    fn new() -> Self {
        let contacts = Arc::new(MemoryCollection::new("contacts"));
        Self { router: build_app(ContactState::unvalidated(contacts)) }
    }

    fn strict() -> Self {
        let contacts = Arc::new(MemoryCollection::new("contacts"));
        Self { router: build_app(ContactState::new(contacts, Arc::new(TypedFields))) }
    }

    async fn send(&self, method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Response {
        let mut req = http::Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            req = req.header("content-type", ct);
        }
        let req = req.body(Full::new(Bytes::copy_from_slice(body.as_bytes()))).unwrap();
        self.router.call(req).await
    }

    async fn send_json(&self, method: Method, uri: &str, body: Value) -> Response {
        self.send(method, uri, Some("application/json"), &body.to_string()).await
    }

    async fn create(&self, body: Value) -> String {
        let res = self.send_json(Method::POST, "/contact", body).await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        json_of(&res)["insertedId"].as_str().unwrap().to_owned()
    }

    async fn fetch(&self, id: &str) -> Response {
        self.send(Method::GET, &format!("/contact/{id}"), None, "").await
    }
}

fn json_of(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

fn ann() -> Value {
    json!({ "name": "Ann", "age": 30, "email": "ann@x.com", "address": "1 Main St" })
}

#[tokio::test]
async fn create_then_get_round_trips_all_fields() {
    let app = TestApp::new();

    let res = app.send_json(Method::POST, "/contact", ann()).await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert_eq!(res.header("content-type"), Some("application/json"));
    let id = json_of(&res)["insertedId"].as_str().unwrap().to_owned();
    assert!(id.parse::<ObjectId>().is_ok());

    let res = app.fetch(&id).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        json_of(&res),
        json!({ "id": id, "name": "Ann", "age": 30, "email": "ann@x.com", "address": "1 Main St" })
    );
}

#[tokio::test]
async fn create_accepts_any_subset_of_fields() {
    let app = TestApp::new();
    let id = app.create(json!({ "email": "solo@x.com" })).await;

    assert_eq!(json_of(&app.fetch(&id).await), json!({ "id": id, "email": "solo@x.com" }));
}

#[tokio::test]
async fn list_returns_contacts_in_creation_order() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/contacts", None, "").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(json_of(&res), json!([]));

    let first = app.create(json!({ "name": "Ann" })).await;
    let second = app.create(json!({ "name": "Bob", "age": 41 })).await;

    let res = app.send(Method::GET, "/contacts", None, "").await;
    assert_eq!(
        json_of(&res),
        json!([
            { "id": first, "name": "Ann" },
            { "id": second, "name": "Bob", "age": 41 },
        ])
    );
}

#[tokio::test]
async fn unknown_ids_are_404_on_every_id_route() {
    let app = TestApp::new();
    let unknown = ObjectId::new().to_string();

    for id in [unknown.as_str(), "doesnotexist"] {
        let uri = format!("/contact/{id}");
        let responses = [
            app.send(Method::GET, &uri, None, "").await,
            app.send_json(Method::PUT, &uri, json!({ "age": 31 })).await,
            app.send(Method::DELETE, &uri, None, "").await,
        ];
        for res in responses {
            assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
            assert_eq!(json_of(&res), json!({ "message": "Contact not found" }));
        }
    }
}

#[tokio::test]
async fn non_json_content_type_is_422_regardless_of_body() {
    let app = TestApp::new();
    let id = app.create(ann()).await;
    let body = ann().to_string();

    for content_type in [None, Some("text/plain"), Some("application/x-www-form-urlencoded")] {
        for (method, uri) in [(Method::POST, "/contact".to_owned()), (Method::PUT, format!("/contact/{id}"))] {
            for payload in [body.as_str(), "{}", ""] {
                let res = app.send(method.clone(), &uri, content_type, payload).await;
                assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(json_of(&res), json!({ "message": "Invalid body" }));
            }
        }
    }
}

#[tokio::test]
async fn empty_json_object_is_400() {
    let app = TestApp::new();
    let id = app.create(ann()).await;

    for (method, uri) in [(Method::POST, "/contact".to_owned()), (Method::PUT, format!("/contact/{id}"))] {
        let res = app.send_json(method, &uri, json!({})).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json_of(&res), json!({ "message": "Request body can not be empty!" }));
    }
}

#[tokio::test]
async fn json_content_type_with_charset_is_accepted() {
    let app = TestApp::new();
    let res = app
        .send(Method::POST, "/contact", Some("application/json; charset=utf-8"), r#"{"name":"Ann"}"#)
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn non_object_json_is_400() {
    let app = TestApp::new();
    for body in ["[1,2]", "\"Ann\"", "{broken"] {
        let res = app.send(Method::POST, "/contact", Some("application/json"), body).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json_of(&res), json!({ "message": "Request body must be a JSON object" }));
    }
}

#[tokio::test]
async fn update_changes_only_supplied_fields_and_is_idempotent() {
    let app = TestApp::new();
    let id = app.create(ann()).await;
    let uri = format!("/contact/{id}");

    let res = app.send_json(Method::PUT, &uri, json!({ "age": 31 })).await;
    assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
    assert!(res.body().is_empty());
    let once = json_of(&app.fetch(&id).await);
    assert_eq!(
        once,
        json!({ "id": id, "name": "Ann", "age": 31, "email": "ann@x.com", "address": "1 Main St" })
    );

    let res = app.send_json(Method::PUT, &uri, json!({ "age": 31 })).await;
    assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(json_of(&app.fetch(&id).await), once);
}

#[tokio::test]
async fn update_ignores_keys_outside_the_contact_shape() {
    let app = TestApp::new();
    let id = app.create(ann()).await;

    let res = app
        .send_json(Method::PUT, &format!("/contact/{id}"), json!({ "id": "forged", "admin": true, "name": "Annie" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::NO_CONTENT);

    let contact = json_of(&app.fetch(&id).await);
    assert_eq!(contact["id"], json!(id));
    assert_eq!(contact["name"], "Annie");
    assert!(contact.get("admin").is_none());
}

#[tokio::test]
async fn delete_is_204_then_404() {
    let app = TestApp::new();
    let id = app.create(ann()).await;
    let uri = format!("/contact/{id}");

    let res = app.send(Method::DELETE, &uri, None, "").await;
    assert_eq!(res.status_code(), StatusCode::NO_CONTENT);

    let res = app.send(Method::DELETE, &uri, None, "").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    assert_eq!(app.fetch(&id).await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unrouted_paths_get_the_json_error_shape() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/contact", None, "").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(json_of(&res), json!({ "message": "Route not found" }));

    let res = app.send(Method::POST, "/contacts", Some("application/json"), "{}").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn strict_validation_rejects_wrong_types() {
    let app = TestApp::strict();

    let res = app.send_json(Method::POST, "/contact", json!({ "name": "Ann", "age": "thirty" })).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&res), json!({ "message": "age must be a non-negative number" }));

    let id = app.create(ann()).await;
    let res = app.send_json(Method::PUT, &format!("/contact/{id}"), json!({ "email": 5 })).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&app.fetch(&id).await)["email"], "ann@x.com");
}
