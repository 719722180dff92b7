use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub rate_limit_per_minute: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a number"),
            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("RATE_LIMIT_PER_MINUTE must be a number"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Settings for the booking client session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// File backing the key-value store.
    pub store_path: PathBuf,
    /// Simulated latency of a payment settlement.
    pub settlement_delay: Duration,
    /// Base URL of the document service.
    pub document_api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            store_path: env::var("DRIVE_EASY_STORE")
                .unwrap_or_else(|_| "drive_easy.json".to_string())
                .into(),
            settlement_delay: Duration::from_millis(
                env::var("PAYMENT_DELAY_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .expect("PAYMENT_DELAY_MS must be a number"),
            ),
            document_api_url: env::var("DOCUMENT_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("drive_easy.json"),
            settlement_delay: Duration::from_millis(2000),
            document_api_url: "http://localhost:5000".to_string(),
        }
    }
}
