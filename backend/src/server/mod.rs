//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use carlot::doc::ApiDoc;
use carlot::inbound::http::routes::configure_api;
use carlot::inbound::http::state::HttpState;
use carlot::middleware::{ApiKeyGuard, RequestLog};
use carlot::settings::ApiKey;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    api_key: Option<ApiKey>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        api_key,
    } = deps;
    let guard = ApiKeyGuard::new(api_key);

    let app = App::new()
        .app_data(http_state)
        .wrap(RequestLog)
        .configure(|cfg| configure_api(cfg, guard));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

fn log_banner(config: &ServerConfig) {
    let base = format!("http://{}", config.bind_addr);
    info!(address = %config.bind_addr, environment = %config.environment, "server listening");
    match &config.api_key {
        Some(key) => info!(fingerprint = %key.fingerprint(), "API key protection enabled"),
        None => warn!("CARLOT_API_KEY is not set; API key protection disabled"),
    }
    info!(
        welcome = %format!("{base}/api"),
        health = %format!("{base}/api/health"),
        users = %format!("{base}/api/users"),
        cars = %format!("{base}/api/cars"),
        "endpoints"
    );
    #[cfg(debug_assertions)]
    info!(docs = %format!("{base}/docs"), "swagger UI available");
}

/// Construct an Actix HTTP server over the prepared handler state.
///
/// # Parameters
/// - `http_state`: record use-cases and environment shared by every worker.
/// - `config`: bind address, environment and optional API key.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let api_key = config.api_key.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            api_key: api_key.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    log_banner(&config);
    Ok(server)
}
