#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::api::AppState;
use crate::config::Config;
use crate::services::account_service::AccountService;
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use crate::storage::{AccountRepository, AccountStore, DbPool, MemoryStore, MessageRepository, MessageStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Fully wired application components, ready to be mounted on routers.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub health_service: HealthService,
}

/// Wires stores into services.
///
/// With neither a pool nor explicit stores the application runs on a fresh
/// [`MemoryStore`].
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    pool: Option<DbPool>,
    stores: Option<(Arc<dyn AccountStore>, Arc<dyn MessageStore>)>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, pool: None, stores: None }
    }

    #[must_use]
    pub fn with_database(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Uses the given stores instead of the ones derived from the pool.
    #[must_use]
    pub fn with_stores(mut self, accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        self.stores = Some((accounts, messages));
        self
    }

    #[must_use]
    pub fn build(self) -> App {
        let (accounts, messages) = match (self.stores, &self.pool) {
            (Some(stores), _) => stores,
            (None, Some(pool)) => {
                let accounts: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(pool.clone()));
                let messages: Arc<dyn MessageStore> = Arc::new(MessageRepository::new(pool.clone()));
                (accounts, messages)
            }
            (None, None) => {
                let store = Arc::new(MemoryStore::new());
                let accounts: Arc<dyn AccountStore> = Arc::clone(&store) as Arc<dyn AccountStore>;
                let messages: Arc<dyn MessageStore> = store;
                (accounts, messages)
            }
        };

        let account_service = AccountService::new(Arc::clone(&accounts));
        let message_service = MessageService::new(messages, accounts);
        let health_service =
            HealthService::new(self.pool, Duration::from_millis(self.config.database.health_timeout_ms));

        App { state: AppState { account_service, message_service }, health_service }
    }
}

/// Applies the embedded SQL migrations.
///
/// # Errors
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations complete");
    Ok(())
}

/// Routes panics through tracing before the default hook runs.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Thread panicked");
        default_hook(info);
    }));
}

/// Flips `shutdown_tx` to `true` on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
