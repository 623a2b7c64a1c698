//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    ChatService, ChatServiceImpl, MessageService, MessageServiceImpl, PostService, PostServiceImpl,
    UserService, UserServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    PgChatRepository, PgMessageRepository, PgPostRepository, PgUserRepository,
};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub posts: Arc<dyn PostService>,
    pub messages: Arc<dyn MessageService>,
    pub chats: Arc<dyn ChatService>,
}

impl AppState {
    /// Wire the PostgreSQL repositories into the services.
    pub fn from_pool(db: PgPool) -> Self {
        let user_repo = Arc::new(PgUserRepository::new(db.clone()));
        let post_repo = Arc::new(PgPostRepository::new(db.clone()));
        let message_repo = Arc::new(PgMessageRepository::new(db.clone()));
        let chat_repo = Arc::new(PgChatRepository::new(db));

        Self {
            users: Arc::new(UserServiceImpl::new(user_repo.clone())),
            posts: Arc::new(PostServiceImpl::new(post_repo, user_repo.clone())),
            messages: Arc::new(MessageServiceImpl::new(
                message_repo,
                user_repo.clone(),
                chat_repo.clone(),
            )),
            chats: Arc::new(ChatServiceImpl::new(chat_repo, user_repo)),
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db = database::create_pool(&settings.database)
            .await
            .with_context(|| format!("connect to {}", settings.database.redacted_url()))?;
        tracing::info!(url = %settings.database.redacted_url(), "Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await.context("run migrations")?;
            tracing::info!("Database migrations applied");
        }

        let state = AppState::from_pool(db);

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
