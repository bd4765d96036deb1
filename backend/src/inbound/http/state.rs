//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ResourceUseCases;
use crate::domain::{Car, User};
use crate::settings::Environment;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn ResourceUseCases<User>>,
    pub cars: Arc<dyn ResourceUseCases<Car>>,
    pub environment: Environment,
}

impl HttpState {
    /// Construct state from the record use-cases and the active environment.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use carlot::domain::{Car, ResourceService, User};
    /// use carlot::inbound::http::state::HttpState;
    /// use carlot::outbound::persistence::ConnectionConfig;
    /// use carlot::settings::Environment;
    /// use carlot::startup::open_storage;
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let storage = open_storage(ConnectionConfig::in_memory(), true).await?;
    /// let state = HttpState::new(
    ///     Arc::new(ResourceService::<User, _>::new(storage.users)),
    ///     Arc::new(ResourceService::<Car, _>::new(storage.cars)),
    ///     Environment::Development,
    /// );
    /// # drop(state);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        users: Arc<dyn ResourceUseCases<User>>,
        cars: Arc<dyn ResourceUseCases<Car>>,
        environment: Environment,
    ) -> Self {
        Self {
            users,
            cars,
            environment,
        }
    }
}
