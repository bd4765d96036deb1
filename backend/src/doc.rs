//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` endpoint, the record and error schemas,
//! and the `X-API-Key` security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Car, Error, ErrorCode, User};
use crate::inbound::http::cars::{CreateCarRequest, UpdateCarRequest};
use crate::inbound::http::system::{EndpointTable, HealthReport, Welcome};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest};

/// Enrich the generated document with the API key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-API-Key",
                "Shared secret configured through CARLOT_API_KEY.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "carlot API",
        description = "CRUD access to users and cars behind a shared API key."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::system::welcome,
        crate::inbound::http::system::health,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::get_car,
        crate::inbound::http::cars::create_car,
        crate::inbound::http::cars::update_car,
        crate::inbound::http::cars::delete_car,
    ),
    components(schemas(
        User,
        Car,
        Error,
        ErrorCode,
        CreateUserRequest,
        UpdateUserRequest,
        CreateCarRequest,
        UpdateCarRequest,
        Welcome,
        HealthReport,
        EndpointTable
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "cars", description = "Car records"),
        (name = "system", description = "Welcome document and health check")
    )
)]
pub struct ApiDoc;
