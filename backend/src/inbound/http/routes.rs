//! Route table for the `/api` surface.
//!
//! ```text
//! /api               public  welcome document
//! /api/health        public  health check
//! /api/users[/{id}]  X-API-Key when configured
//! /api/cars[/{id}]   X-API-Key when configured
//! anything else      404 envelope
//! ```

use actix_web::web;

use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::{cars, system, users};
use crate::middleware::ApiKeyGuard;

/// Register every `/api` route on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use carlot::inbound::http::routes::configure_api;
/// use carlot::middleware::ApiKeyGuard;
///
/// let app = App::new().configure(|cfg| configure_api(cfg, ApiKeyGuard::new(None)));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig, guard: ApiKeyGuard) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(system::welcome)
                .service(system::health)
                .service(
                    web::scope("/users")
                        .wrap(guard.clone())
                        .service(users::list_users)
                        .service(users::create_user)
                        .service(users::get_user)
                        .service(users::update_user)
                        .service(users::delete_user)
                        .default_service(web::to(system::api_not_found)),
                )
                .service(
                    web::scope("/cars")
                        .wrap(guard)
                        .service(cars::list_cars)
                        .service(cars::create_car)
                        .service(cars::get_car)
                        .service(cars::update_car)
                        .service(cars::delete_car)
                        .default_service(web::to(system::api_not_found)),
                )
                .default_service(web::to(system::api_not_found)),
        );
}
