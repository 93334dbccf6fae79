//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::Trace;
use crate::domain::Account;
use crate::inbound::http::validation::{json_config, path_config};
use crate::test_support::{InMemoryStore, bearer_for, http_state_for};

/// Full `/api` surface running against an in-memory store.
pub struct TestApp {
    store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
        }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub async fn register(&self, email: &str, password: &str) -> Account {
        self.store
            .register(email, password, "tester")
            .await
            .expect("fixture account registers")
    }

    /// Build the app and dispatch one request.
    pub async fn call(&self, req: actix_test::TestRequest) -> ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state_for(&self.store)))
                .app_data(json_config())
                .app_data(path_config())
                .wrap(Trace)
                .configure(super::configure),
        )
        .await;
        actix_test::call_service(&app, req.to_request()).await
    }
}

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: &str) -> String {
    format!("Bearer {}", bearer_for(user_id))
}

pub async fn json_body(res: ServiceResponse) -> Value {
    actix_test::read_body_json(res).await
}
