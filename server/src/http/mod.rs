use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{self, HeaderName, HeaderValue, Method},
    routing::get,
};
use platform_db::DbPool;
use products_hr::EmployeeService;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::AppConfig;

pub mod employees;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub employees: EmployeeService,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// Bind and serve the employee API until Ctrl-C or SIGTERM.
pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    let local_addr = listener.local_addr().context("listener has no local address")?;

    info!(%local_addr, body_limit = state.config.request_body_limit, "employee API listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("employee API server error")
}

/// Browser access to `/api/employees`. An explicit origin list allows
/// credentials; with no usable origin any site may call, without credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let mut allowed = Vec::with_capacity(origins.len());
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => allowed.push(value),
            Err(_) => warn!(%origin, "ignoring unparsable CORS origin"),
        }
    }

    let layer = CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .expose_headers([REQUEST_ID])
        .max_age(Duration::from_secs(600));
    if allowed.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(employees::routes())
        .layer(DefaultBodyLimit::max(state.config.request_body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = match state.pool.ping().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "database ping failed");
            false
        }
    };
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("draining in-flight requests");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use sea_orm::Database;
    use tower::ServiceExt;

    use super::*;
    use products_hr::SeaOrmEmployeeStore;

    async fn router(origins: &[&str]) -> Router {
        let pool = Database::connect("sqlite::memory:").await.unwrap();
        let store = Arc::new(SeaOrmEmployeeStore::new(pool.clone()));
        build_router(AppState {
            pool,
            employees: EmployeeService::new(store),
            config: Arc::new(AppConfig {
                cors_allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
                ..AppConfig::default()
            }),
        })
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/employees/1")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn listed_origin_may_update_with_credentials() {
        let router = router(&["http://localhost:5173"]).await;
        let response = router.oneshot(preflight("http://localhost:5173")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS]
                .to_str()
                .unwrap()
                .contains("PUT")
        );
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_grant() {
        let router = router(&["http://localhost:5173"]).await;
        let response = router.oneshot(preflight("http://evil.test")).await.unwrap();
        assert!(
            !response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn without_origins_any_site_is_allowed_without_credentials() {
        let router = router(&[]).await;
        let response = router.oneshot(preflight("http://anywhere.test")).await.unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
    }

    #[tokio::test]
    async fn request_id_is_exposed_to_browsers() {
        let router = router(&["http://localhost:5173"]).await;
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let headers = response.headers();
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers[header::ACCESS_CONTROL_EXPOSE_HEADERS], "x-request-id");
    }

    #[test]
    fn serve_config_joins_host_and_port() {
        let config = ServeConfig::new(IpAddr::from([127, 0, 0, 1]), 8080);
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }
}
