//! String-keyed storage for the client session and the shim that keeps the
//! selected city and booking list in it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BookingError;
use crate::models::Booking;

pub const SELECTED_CITY_KEY: &str = "selectedCity";
pub const BOOKINGS_KEY: &str = "bookings";

type Result<T> = std::result::Result<T, BookingError>;

/// Get/set/remove over opaque string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store that lives only as long as the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed store file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| BookingError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                BookingError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
            })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Persists the selected city and the booking list.
///
/// Writes overwrite the whole value. Reads never fail: missing or malformed
/// data comes back as "no city" / an empty list.
#[derive(Debug)]
pub struct BookingStore<S> {
    store: S,
}

impl<S: KeyValueStore> BookingStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Failed to read from store");
            None
        })
    }

    pub fn load_city(&self) -> Option<String> {
        self.read(SELECTED_CITY_KEY).filter(|city| !city.is_empty())
    }

    pub fn save_city(&mut self, city: &str) -> Result<()> {
        self.store.set(SELECTED_CITY_KEY, city.to_string())
    }

    pub fn clear_city(&mut self) -> Result<()> {
        self.store.remove(SELECTED_CITY_KEY)
    }

    pub fn load_bookings(&self) -> Vec<Booking> {
        let Some(raw) = self.read(BOOKINGS_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding malformed stored bookings");
            Vec::new()
        })
    }

    pub fn save_bookings(&mut self, bookings: &[Booking]) -> Result<()> {
        let raw =
            serde_json::to_string(bookings).map_err(|e| BookingError::Storage(e.to_string()))?;
        self.store.set(BOOKINGS_KEY, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingDraft, Payment, PaymentMethod, PaymentStatus};
    use crate::rental::pricing::breakdown;
    use crate::rental::seed;
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn sample_booking() -> Booking {
        let car = seed::find_car("4").unwrap();
        let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap();
        let draft = BookingDraft {
            car_id: car.id.clone(),
            car,
            user_id: "u1".to_string(),
            start_date: at("2024-01-01T10:00"),
            end_date: at("2024-01-01T13:00"),
            total_hours: 3,
            total_amount: 1500,
            pickup_location: "Andheri West".to_string(),
        };
        let payment = Payment {
            id: "PAY1".to_string(),
            method: PaymentMethod::Card,
            status: PaymentStatus::Completed,
            transaction_id: "TXN1".to_string(),
            breakdown: breakdown(1500),
        };

        Booking::confirm(draft, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(), payment)
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("drive-easy-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_city_round_trip() {
        let mut store = BookingStore::new(MemoryStore::new());
        assert_eq!(store.load_city(), None);

        store.save_city("Pune").unwrap();
        assert_eq!(store.load_city(), Some("Pune".to_string()));

        store.save_city("Goa").unwrap();
        assert_eq!(store.load_city(), Some("Goa".to_string()));

        store.clear_city().unwrap();
        assert_eq!(store.load_city(), None);
    }

    #[test]
    fn test_empty_city_is_absent() {
        let mut kv = MemoryStore::new();
        kv.set(SELECTED_CITY_KEY, String::new()).unwrap();

        assert_eq!(BookingStore::new(kv).load_city(), None);
    }

    #[test]
    fn test_bookings_overwrite_whole_list() {
        let mut store = BookingStore::new(MemoryStore::new());
        assert!(store.load_bookings().is_empty());

        let booking = sample_booking();
        store.save_bookings(&[booking.clone(), booking.clone()]).unwrap();
        assert_eq!(store.load_bookings().len(), 2);

        store.save_bookings(&[booking.clone()]).unwrap();
        assert_eq!(store.load_bookings(), vec![booking]);
    }

    #[test]
    fn test_malformed_bookings_load_as_empty() {
        let mut kv = MemoryStore::new();
        kv.set(BOOKINGS_KEY, "{not json".to_string()).unwrap();
        assert!(BookingStore::new(kv).load_bookings().is_empty());

        let mut kv = MemoryStore::new();
        kv.set(BOOKINGS_KEY, r#"[{"id": 42}]"#.to_string()).unwrap();
        assert!(BookingStore::new(kv).load_bookings().is_empty());
    }

    #[test]
    fn test_resave_is_stable() {
        let mut store = BookingStore::new(MemoryStore::new());
        store.save_bookings(&[sample_booking()]).unwrap();
        let before = store.inner().get(BOOKINGS_KEY).unwrap();

        let loaded = store.load_bookings();
        store.save_bookings(&loaded).unwrap();

        assert_eq!(store.inner().get(BOOKINGS_KEY).unwrap(), before);
    }

    #[test]
    fn test_stored_shape_is_camel_case() {
        let mut store = BookingStore::new(MemoryStore::new());
        store.save_bookings(&[sample_booking()]).unwrap();

        let raw = store.inner().get(BOOKINGS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];

        assert_eq!(first["id"], "BK1704099600000");
        assert_eq!(first["status"], "confirmed");
        assert_eq!(first["totalHours"], 3);
        assert_eq!(first["startDate"], "2024-01-01T10:00");
        assert_eq!(first["endDate"], "2024-01-01T13:00");
        assert_eq!(first["car"]["pricePerHour"], 500);
        assert_eq!(first["payment"]["transactionId"], "TXN1");
        assert_eq!(first["payment"]["breakdown"]["total"], 1870);
    }

    #[test]
    fn test_loads_bookings_saved_by_the_browser_client() {
        let raw = r#"[{
            "id": "BK1704099600000",
            "carId": "4",
            "car": {
                "id": "4", "name": "3 Series", "brand": "BMW", "category": "Luxury",
                "pricePerHour": 500, "pricePerDay": 10000, "image": "https://example.com/bmw.jpg",
                "features": ["Leather Seats"], "fuelType": "Petrol", "transmission": "Automatic",
                "seats": 5, "available": true, "city": "Mumbai", "rating": 4.8, "trips": 210
            },
            "userId": "u1",
            "startDate": "2024-01-01T10:00",
            "endDate": "2024-01-01T13:00",
            "totalHours": 3,
            "totalAmount": 1500,
            "status": "confirmed",
            "pickupLocation": "Andheri West",
            "createdAt": "2024-01-01T09:00:00.000Z",
            "payment": {
                "id": "PAY1704099602000",
                "method": "upi",
                "status": "completed",
                "transactionId": "TXN1704099602000",
                "breakdown": {
                    "baseAmount": 1500, "gst": 270, "insurance": 75,
                    "convenience": 25, "discount": 0, "total": 1870
                }
            }
        }]"#;

        let mut kv = MemoryStore::new();
        kv.set(BOOKINGS_KEY, raw.to_string()).unwrap();
        let mut store = BookingStore::new(kv);

        let bookings = store.load_bookings();
        assert_eq!(bookings.len(), 1);
        let booking = &bookings[0];
        assert_eq!(booking.start_date.to_string(), "2024-01-01 10:00:00");
        assert_eq!(booking.end_date.to_string(), "2024-01-01 13:00:00");
        assert_eq!(booking.payment.method, PaymentMethod::Upi);
        assert_eq!(booking.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());

        store.save_bookings(&bookings).unwrap();
        let resaved: serde_json::Value =
            serde_json::from_str(&store.inner().get(BOOKINGS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(resaved[0]["startDate"], "2024-01-01T10:00");
        assert_eq!(resaved[0]["endDate"], "2024-01-01T13:00");
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let path = temp_path();

        {
            let mut store = BookingStore::new(FileStore::open(&path));
            store.save_city("Delhi").unwrap();
            store.save_bookings(&[sample_booking()]).unwrap();
        }

        let store = BookingStore::new(FileStore::open(&path));
        assert_eq!(store.load_city(), Some("Delhi".to_string()));
        assert_eq!(store.load_bookings(), vec![sample_booking()]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage_file() {
        let path = temp_path();
        fs::write(&path, "garbage").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get(SELECTED_CITY_KEY).unwrap(), None);

        store.set(SELECTED_CITY_KEY, "Goa".to_string()).unwrap();
        assert_eq!(
            FileStore::open(&path).get(SELECTED_CITY_KEY).unwrap(),
            Some("Goa".to_string())
        );

        fs::remove_file(&path).unwrap();
    }
}
