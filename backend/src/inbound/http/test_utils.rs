//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::{Car, ResourceService, User};
use crate::inbound::http::routes::configure_api;
use crate::inbound::http::state::HttpState;
use crate::middleware::{ApiKeyGuard, RequestLog};
use crate::outbound::persistence::ConnectionConfig;
use crate::settings::Environment;
use crate::startup::open_storage;

/// Build handler state over a private in-memory database.
///
/// With `seed` set the tables hold the sample users and cars.
pub async fn sqlite_state(seed: bool) -> HttpState {
    let storage = open_storage(ConnectionConfig::in_memory(), seed)
        .await
        .expect("in-memory storage opens");
    HttpState::new(
        Arc::new(ResourceService::<User, _>::new(storage.users)),
        Arc::new(ResourceService::<Car, _>::new(storage.cars)),
        Environment::Test,
    )
}

/// Application with the full `/api` route table and no API key.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(RequestLog)
        .configure(|cfg| configure_api(cfg, ApiKeyGuard::new(None)))
}
