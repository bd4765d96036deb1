//! Public service endpoints: welcome document, health check and the API 404
//! fallback.
//!
//! ```text
//! GET /api          Service name, version and endpoint table
//! GET /api/health   {"status":"OK", ...}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Entry points listed by the welcome document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointTable {
    #[schema(example = "/api/users")]
    pub users: String,
    #[schema(example = "/api/cars")]
    pub cars: String,
}

/// Body of `GET /api`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Welcome {
    #[schema(example = "Welcome to the carlot API")]
    pub message: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(example = "development")]
    pub environment: String,
    pub endpoints: EndpointTable,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    #[schema(example = "OK")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "development")]
    pub environment: String,
}

/// Describe the API.
#[utoipa::path(
    get,
    path = "/api",
    tags = ["system"],
    security([]),
    responses((status = 200, description = "Welcome document", body = Welcome))
)]
#[get("")]
pub async fn welcome(state: web::Data<HttpState>) -> web::Json<Welcome> {
    web::Json(Welcome {
        message: "Welcome to the carlot API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        environment: state.environment.to_string(),
        endpoints: EndpointTable {
            users: "/api/users".to_owned(),
            cars: "/api/cars".to_owned(),
        },
    })
}

/// Report that the process is serving requests.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["system"],
    security([]),
    responses((status = 200, description = "Server is up", body = HealthReport))
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthReport {
            status: "OK".to_owned(),
            timestamp: Utc::now(),
            environment: state.environment.to_string(),
        })
}

/// Default service for unmatched routes under `/api`.
pub async fn api_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}
