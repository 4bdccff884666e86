//! Runs the contact service on a seeded in-memory collection.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/contacts
//!   curl -X POST http://localhost:3000/contact \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"Bob","age":41}'
//!   curl -X PUT http://localhost:3000/contact/<id> \
//!        -H 'content-type: application/json' \
//!        -d '{"age":42}'
//!   curl -X DELETE http://localhost:3000/contact/<id>

use std::net::SocketAddr;

use contactd::app::build_app;
use contactd::contacts::ContactState;
use contactd::store::{Collection, MemoryDatabase};
use contactd::Server;
use serde_json::json;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let db = MemoryDatabase::new("demo");
    let contacts = db.collection("contacts");
    let seeded = contacts
        .insert_one(
            json!({ "name": "Ann", "age": 30, "email": "ann@x.com", "address": "1 Main St" })
                .as_object()
                .cloned()
                .unwrap_or_default(),
        )
        .await
        .expect("seed insert");
    tracing::info!(id = %seeded.inserted_id, "seeded one contact");

    let addr: SocketAddr = ([127, 0, 0, 1], 3000).into();
    Server::bind(addr)
        .serve(build_app(ContactState::unvalidated(contacts)))
        .await
        .expect("server error");
}
