//! HTTP API server with observability for the gym registration service.
//!
//! Provides the registration endpoint backed by the saga orchestrator,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod current_gym;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{
    GymDirectory, IdentityService, InMemoryGymDirectory, InMemoryIdentityService, InMemoryMailer,
    InMemoryRegistrationLog, Mailer, RegistrationLog, RegistrationOrchestrator,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::registrations::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<G, I, L, M>(
    state: Arc<AppState<G, I, L, M>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    G: GymDirectory + 'static,
    I: IdentityService + 'static,
    L: RegistrationLog + 'static,
    M: Mailer + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/registrations", post(routes::registrations::create::<G, I, L, M>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Handles on the in-memory service doubles wired by
/// [`create_default_state`], for tests and local runs.
#[derive(Clone)]
pub struct DefaultServices {
    pub gym_directory: InMemoryGymDirectory,
    pub identity: InMemoryIdentityService,
    pub registration_log: InMemoryRegistrationLog,
    pub mailer: InMemoryMailer,
}

/// Creates the default application state with in-memory services.
pub fn create_default_state(
    config: &Config,
) -> (
    Arc<
        AppState<
            InMemoryGymDirectory,
            InMemoryIdentityService,
            InMemoryRegistrationLog,
            InMemoryMailer,
        >,
    >,
    DefaultServices,
) {
    let gym_directory = InMemoryGymDirectory::new();
    let identity = InMemoryIdentityService::new();
    let registration_log = InMemoryRegistrationLog::new();
    let mailer = InMemoryMailer::new();

    let orchestrator = RegistrationOrchestrator::new(
        gym_directory.clone(),
        identity.clone(),
        registration_log.clone(),
        mailer.clone(),
        config.tenant_id,
        config.login_url.clone(),
    );

    let state = Arc::new(AppState { orchestrator });
    let services = DefaultServices {
        gym_directory,
        identity,
        registration_log,
        mailer,
    };

    (state, services)
}
