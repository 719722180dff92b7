pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rental;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use config::{ClientConfig, Config};
pub use error::{AppError, AppResult, BookingError};

use models::{Car, City};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub cars: Arc<Vec<Car>>,
    pub cities: Arc<Vec<City>>,
}

impl AppState {
    /// State with the seeded catalog.
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config,
            cars: Arc::new(rental::seed::cars()),
            cities: Arc::new(rental::seed::cities()),
        }
    }
}
