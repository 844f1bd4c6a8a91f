use std::{process, sync::Arc, time::Duration};

use kabar::{
    application::error::AppError,
    application::repos::{
        AuthorsRepo, CategoriesRepo, ContactMessagesRepo, HealthRepo, PostsRepo, PostsWriteRepo,
        SubscribersRepo,
    },
    config::{self, Settings},
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, HttpState},
        memory::InMemoryRepositories,
        seed, telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let chain = error.chain();
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?chain, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?chain, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_migrate(settings: Settings) -> Result<(), AppError> {
    let url = settings.database.url.as_deref().ok_or_else(|| {
        InfraError::configuration(
            "database url is required (provide --database-url or set KABAR_DATABASE__URL)",
        )
    })?;

    let pool = PostgresRepositories::connect(url, &settings.database).await?;
    PostgresRepositories::run_migrations(&pool).await?;
    Ok(())
}

async fn run_serve(settings: Settings) -> Result<(), AppError> {
    match settings.database.url.clone() {
        Some(url) => {
            let pool = PostgresRepositories::connect(&url, &settings.database).await?;
            if settings.database.run_migrations {
                PostgresRepositories::run_migrations(&pool).await?;
            }
            info!(target = "kabar::serve", backend = "postgres", "repositories ready");
            serve_with(Arc::new(PostgresRepositories::new(pool)), &settings).await
        }
        None => {
            info!(target = "kabar::serve", backend = "memory", "repositories ready");
            serve_with(Arc::new(InMemoryRepositories::new()), &settings).await
        }
    }
}

async fn serve_with<R>(repos: Arc<R>, settings: &Settings) -> Result<(), AppError>
where
    R: PostsRepo
        + PostsWriteRepo
        + AuthorsRepo
        + CategoriesRepo
        + SubscribersRepo
        + ContactMessagesRepo
        + HealthRepo
        + 'static,
{
    if settings.content.seed_sample_data {
        seed::seed_sample_content(repos.as_ref()).await?;
    }

    let state = HttpState::from_repositories(repos, &settings.admin, &settings.rate_limit);
    if !state.auth.is_enabled() {
        warn!(
            target = "kabar::serve",
            "admin password or token not configured, admin routes will reject every request"
        );
    }
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        target = "kabar::serve",
        addr = %settings.server.addr,
        "listening"
    );

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()));

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = shutdown_deadline(shutdown, settings.server.graceful_shutdown) => {
            warn!(
                target = "kabar::serve",
                timeout_secs = settings.server.graceful_shutdown.as_secs(),
                "graceful shutdown timed out, dropping open connections"
            );
        }
    }

    info!(target = "kabar::serve", "server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: Arc<Notify>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "kabar::serve", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target = "kabar::serve", "shutdown signal received");
    shutdown.notify_one();
}

async fn shutdown_deadline(shutdown: Arc<Notify>, grace: Duration) {
    shutdown.notified().await;
    tokio::time::sleep(grace).await;
}
