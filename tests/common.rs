#![allow(dead_code)]

use serde_json::{Value, json};
use social_media_api::AppBuilder;
use social_media_api::api::{self, MgmtState};
use social_media_api::api::schemas::account::Account;
use social_media_api::api::schemas::message::Message;
use social_media_api::config::Config;
use social_media_api::storage::{self, AccountStore, DbPool, MessageStore};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Once};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("social_media_api=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Connects to `DATABASE_URL` and applies migrations. Returns `None` when
/// the variable is unset so the Postgres suite is skipped on machines without
/// a database.
pub async fn get_test_pool() -> Option<DbPool> {
    setup_tracing();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::warn!("DATABASE_URL not set, skipping Postgres-backed test");
        return None;
    };

    let config = Config::default();
    let pool = storage::init_pool(&database_url, &config.database)
        .await
        .expect("Failed to connect to DB. Is Postgres running?");

    social_media_api::run_migrations(&pool).await.expect("Failed to run migrations");

    Some(pool)
}

/// Name unique across tests sharing one database.
pub fn unique_name(prefix: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let nanos = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().subsec_nanos();
    format!("{prefix}_{}_{nanos}_{}", std::process::id(), COUNTER.fetch_add(1, Ordering::Relaxed))
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawns the API and management routers on ephemeral ports, backed by a fresh in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_builder(AppBuilder::new(Config::default())).await
    }

    pub async fn spawn_with_stores(accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        Self::spawn_with_builder(AppBuilder::new(Config::default()).with_stores(accounts, messages)).await
    }

    /// Spawns the app on the Postgres repositories, or `None` without `DATABASE_URL`.
    pub async fn spawn_with_database() -> Option<Self> {
        let pool = get_test_pool().await?;
        Some(Self::spawn_with_builder(AppBuilder::new(Config::default()).with_database(pool)).await)
    }

    async fn spawn_with_builder(builder: AppBuilder) -> Self {
        setup_tracing();
        let app = builder.build();

        let app_router = api::app_router(app.state);
        let mgmt_app = api::mgmt_router(MgmtState { health_service: app.health_service });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app_router).await.unwrap();
        });

        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_app).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new() }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client.post(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client.put(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn register_user(&self, username: &str, password: &str) -> Account {
        let resp = self.post_json("/register", &json!({ "username": username, "password": password })).await;
        assert_eq!(resp.status(), 200, "registration of {username} failed");
        resp.json().await.unwrap()
    }

    pub async fn post_message(&self, posted_by: i32, message_text: &str, time_posted_epoch: i64) -> reqwest::Response {
        self.post_json(
            "/messages",
            &json!({
                "posted_by": posted_by,
                "message_text": message_text,
                "time_posted_epoch": time_posted_epoch
            }),
        )
        .await
    }

    pub async fn create_message(&self, posted_by: i32, message_text: &str, time_posted_epoch: i64) -> Message {
        let resp = self.post_message(posted_by, message_text, time_posted_epoch).await;
        assert_eq!(resp.status(), 200, "posting message failed");
        resp.json().await.unwrap()
    }
}
