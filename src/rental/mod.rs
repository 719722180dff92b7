//! Client-side booking logic: catalog, pricing, payment and the session
//! state machine that ties them together.

pub mod auth;
pub mod catalog;
pub mod clock;
pub mod documents;
pub mod lifecycle;
pub mod payment;
pub mod persistence;
pub mod pricing;
pub mod receipt;
pub mod seed;

pub use auth::{AuthProvider, LocalAuth, LoginData};
pub use catalog::{filter_cars, filter_cities, CatalogQuery, CategoryFilter, SortKey};
pub use clock::{Clock, FixedClock, SystemClock};
pub use documents::DocumentClient;
pub use lifecycle::{BookingForm, BookingSession, Stage};
pub use payment::{PaymentGateway, PaymentRequest, SimulatedGateway};
pub use persistence::{BookingStore, FileStore, KeyValueStore, MemoryStore};
pub use pricing::{breakdown, rental_hours, Quote};
pub use receipt::Receipt;

use crate::config::ClientConfig;
use crate::error::AppResult;

/// A booking session wired to its real collaborators: the on-disk store,
/// local auth, the system clock, the simulated gateway and the document
/// service.
pub struct Client {
    pub session: BookingSession<FileStore, LocalAuth, SystemClock>,
    pub gateway: SimulatedGateway,
    pub documents: DocumentClient,
}

impl Client {
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        tracing::debug!(store = %config.store_path.display(), "Opening booking session");

        Ok(Self {
            session: BookingSession::restore(
                FileStore::open(&config.store_path),
                LocalAuth::new(),
                SystemClock,
            ),
            gateway: SimulatedGateway::new(config.settlement_delay),
            documents: DocumentClient::new(config.document_api_url.clone())?,
        })
    }
}
